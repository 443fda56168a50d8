use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(medrec_records_migration::Migrator).await;
}
