pub use sea_orm_migration::prelude::*;

mod m20250812_create_all_tables;
mod m20250812_add_unique_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250812_create_all_tables::Migration),
            Box::new(m20250812_add_unique_indexes::Migration),
        ]
    }
}
