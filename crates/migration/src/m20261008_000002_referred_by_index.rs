use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Referee listings and count reconciliation filter on this column.
        manager
            .create_index(
                Index::create()
                    .name("idx_registrants_referred_by_code")
                    .table(Registrants::Table)
                    .col(Registrants::ReferredByCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_registrants_referred_by_code")
                    .table(Registrants::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Registrants {
    Table,
    ReferredByCode,
}
