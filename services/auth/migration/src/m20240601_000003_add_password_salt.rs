use sea_orm_migration::prelude::*;

/// Rows that predate this migration keep an empty salt and still verify
/// against their unsalted hash.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [Accounts::Patients, Accounts::Doctors] {
            manager
                .alter_table(
                    Table::alter()
                        .table(table)
                        .add_column(
                            ColumnDef::new(Accounts::PasswordSalt)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [Accounts::Patients, Accounts::Doctors] {
            manager
                .alter_table(
                    Table::alter()
                        .table(table)
                        .drop_column(Accounts::PasswordSalt)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum Accounts {
    Patients,
    Doctors,
    PasswordSalt,
}
