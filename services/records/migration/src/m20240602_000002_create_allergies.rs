use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Allergies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Allergies::AllergyId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Allergies::PatientId).string_len(16).not_null())
                    .col(ColumnDef::new(Allergies::AllergyName).string().not_null())
                    .col(ColumnDef::new(Allergies::Severity).string_len(16).not_null())
                    .col(ColumnDef::new(Allergies::Notes).text())
                    .col(
                        ColumnDef::new(Allergies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Allergies::Table, Allergies::PatientId)
                            .to(Patients::Table, Patients::PatientId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Allergies::Table)
                    .col(Allergies::PatientId)
                    .name("idx_allergies_patient_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Allergies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Allergies {
    Table,
    AllergyId,
    PatientId,
    AllergyName,
    Severity,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum Patients {
    Table,
    PatientId,
}
