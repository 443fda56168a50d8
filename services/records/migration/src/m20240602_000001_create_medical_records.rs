use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicalRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MedicalRecords::RecordId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MedicalRecords::PatientId).string_len(16).not_null())
                    .col(ColumnDef::new(MedicalRecords::DoctorId).string_len(16).not_null())
                    .col(ColumnDef::new(MedicalRecords::VisitDate).date().not_null())
                    .col(ColumnDef::new(MedicalRecords::Diagnosis).text())
                    .col(ColumnDef::new(MedicalRecords::Treatment).text())
                    .col(ColumnDef::new(MedicalRecords::Prescription).text())
                    .col(ColumnDef::new(MedicalRecords::Notes).text())
                    .col(ColumnDef::new(MedicalRecords::GlucoseLevel).double())
                    .col(ColumnDef::new(MedicalRecords::BloodPressureSystolic).integer())
                    .col(ColumnDef::new(MedicalRecords::BloodPressureDiastolic).integer())
                    .col(ColumnDef::new(MedicalRecords::HeartRate).integer())
                    .col(ColumnDef::new(MedicalRecords::Temperature).double())
                    .col(
                        ColumnDef::new(MedicalRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MedicalRecords::Table, MedicalRecords::PatientId)
                            .to(Patients::Table, Patients::PatientId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MedicalRecords::Table, MedicalRecords::DoctorId)
                            .to(Doctors::Table, Doctors::DoctorId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(MedicalRecords::Table)
                    .col(MedicalRecords::PatientId)
                    .col(MedicalRecords::VisitDate)
                    .name("idx_medical_records_patient_visit")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MedicalRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MedicalRecords {
    Table,
    RecordId,
    PatientId,
    DoctorId,
    VisitDate,
    Diagnosis,
    Treatment,
    Prescription,
    Notes,
    GlucoseLevel,
    BloodPressureSystolic,
    BloodPressureDiastolic,
    HeartRate,
    Temperature,
    CreatedAt,
}

#[derive(Iden)]
enum Patients {
    Table,
    PatientId,
}

#[derive(Iden)]
enum Doctors {
    Table,
    DoctorId,
}
