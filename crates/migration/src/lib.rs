pub use sea_orm_migration::prelude::*;

mod m20260715_000001_recipes;
mod m20260715_000002_ingredients;
mod m20260722_000001_recipes_ingredients;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260715_000001_recipes::Migration),
            Box::new(m20260715_000002_ingredients::Migration),
            Box::new(m20260722_000001_recipes_ingredients::Migration),
        ]
    }
}
