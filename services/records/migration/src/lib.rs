pub use sea_orm_migration::prelude::*;

mod m20240602_000001_create_medical_records;
mod m20240602_000002_create_allergies;

/// Requires the auth migrations to have run: both tables reference
/// `patients`, and records also reference `doctors`.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240602_000001_create_medical_records::Migration),
            Box::new(m20240602_000002_create_allergies::Migration),
        ]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("records_migrations").into_iden()
    }
}
