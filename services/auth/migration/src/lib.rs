pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_patients;
mod m20240601_000002_create_doctors;
mod m20240601_000003_add_password_salt;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_patients::Migration),
            Box::new(m20240601_000002_create_doctors::Migration),
            Box::new(m20240601_000003_add_password_salt::Migration),
        ]
    }

    // Records migrations share the database; keep the bookkeeping apart.
    fn migration_table_name() -> DynIden {
        Alias::new("auth_migrations").into_iden()
    }
}
