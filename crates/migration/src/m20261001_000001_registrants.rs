use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registrants::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Registrants::ReferralCode).string().not_null())
                    .col(ColumnDef::new(Registrants::ReferredByCode).string())
                    .col(
                        ColumnDef::new(Registrants::ReferralCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Registrants::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // The unique index is what makes concurrent code allocation safe; the
        // registrar's pre-check only avoids most of the conflicts.
        manager
            .create_index(
                Index::create()
                    .name("idx_registrants_referral_code")
                    .table(Registrants::Table)
                    .col(Registrants::ReferralCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let _ = manager
            .drop_index(
                Index::drop()
                    .name("idx_registrants_referral_code")
                    .to_owned(),
            )
            .await;

        manager
            .drop_table(Table::drop().table(Registrants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Registrants {
    Table,
    Email,
    ReferralCode,
    ReferredByCode,
    ReferralCount,
    CreatedAt,
}
