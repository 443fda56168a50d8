use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Doctors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doctors::DoctorId)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Doctors::FirstName).string().not_null())
                    .col(ColumnDef::new(Doctors::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Doctors::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Doctors::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Doctors::Phone).string())
                    .col(ColumnDef::new(Doctors::LicenseNumber).string().not_null())
                    .col(ColumnDef::new(Doctors::Specialization).string())
                    .col(ColumnDef::new(Doctors::Hospital).string())
                    .col(ColumnDef::new(Doctors::ExperienceYears).integer())
                    .col(
                        ColumnDef::new(Doctors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Doctors::Table)
                    .col(Doctors::Specialization)
                    .name("idx_doctors_specialization")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Doctors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Doctors {
    Table,
    DoctorId,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Phone,
    LicenseNumber,
    Specialization,
    Hospital,
    ExperienceYears,
    CreatedAt,
}
