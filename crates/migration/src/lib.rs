pub use sea_orm_migration::prelude::*;

mod m20261001_000001_registrants;
mod m20261008_000002_referred_by_index;

pub struct Migrator;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_registrants::Migration),
            Box::new(m20261008_000002_referred_by_index::Migration),
        ]
    }
}
