use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Patients::PatientId)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Patients::FirstName).string().not_null())
                    .col(ColumnDef::new(Patients::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Patients::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Patients::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Patients::Phone).string())
                    .col(ColumnDef::new(Patients::DateOfBirth).date())
                    .col(ColumnDef::new(Patients::Gender).string())
                    .col(ColumnDef::new(Patients::BloodGroup).string())
                    .col(ColumnDef::new(Patients::Address).text())
                    .col(ColumnDef::new(Patients::EmergencyContact).string())
                    .col(ColumnDef::new(Patients::EmergencyPhone).string())
                    .col(ColumnDef::new(Patients::InsuranceProvider).string())
                    .col(ColumnDef::new(Patients::InsuranceNumber).string())
                    .col(ColumnDef::new(Patients::HeightCm).integer())
                    .col(ColumnDef::new(Patients::WeightKg).double())
                    .col(
                        ColumnDef::new(Patients::QrToken)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Patients::LastLogin).date())
                    .col(
                        ColumnDef::new(Patients::HealthStreak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Patients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Patients {
    Table,
    PatientId,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Phone,
    DateOfBirth,
    Gender,
    BloodGroup,
    Address,
    EmergencyContact,
    EmergencyPhone,
    InsuranceProvider,
    InsuranceNumber,
    HeightCm,
    WeightKg,
    QrToken,
    LastLogin,
    HealthStreak,
    CreatedAt,
}
