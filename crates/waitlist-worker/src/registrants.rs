use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, SqlErr,
};

use entity::registrant;

use crate::referral::{InsertOutcome, NewRegistrant, Registrant, RegistrantStore, StoreError};

/// [`RegistrantStore`] over a SeaORM connection (libSQL in production, SQLite in tests).
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Registrants whose `referred_by_code` is `code`.
    pub async fn count_referees(&self, code: &str) -> Result<u64, StoreError> {
        let n = registrant::Entity::find()
            .filter(registrant::Column::ReferredByCode.eq(code))
            .count(&self.db)
            .await?;
        Ok(n)
    }
}

enum Conflict {
    Email,
    Code,
}

/// Maps a unique-constraint failure to the column that caused it.
///
/// Drivers without structured error codes (the libSQL HTTP proxy) are matched on
/// their message text. The email column is the primary key, so anything that does
/// not name the code index is treated as an email conflict.
fn classify_conflict(err: &DbErr) -> Option<Conflict> {
    let message = match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => msg,
        _ => {
            let text = err.to_string();
            let lower = text.to_ascii_lowercase();
            if !lower.contains("unique constraint") && !lower.contains("duplicate key") {
                return None;
            }
            text
        }
    };

    if message.contains("referral_code") {
        Some(Conflict::Code)
    } else {
        Some(Conflict::Email)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl RegistrantStore for SeaOrmStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registrant>, StoreError> {
        let found = registrant::Entity::find_by_id(email.to_string())
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Registrant>, StoreError> {
        let found = registrant::Entity::find()
            .filter(registrant::Column::ReferralCode.eq(code))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, StoreError> {
        let n = registrant::Entity::find()
            .filter(registrant::Column::ReferralCode.eq(code))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn insert(&self, new: NewRegistrant) -> Result<InsertOutcome, StoreError> {
        let row = new.into_registrant();
        let active = registrant::ActiveModel {
            email: Set(row.email.clone()),
            referral_code: Set(row.referral_code.clone()),
            referred_by_code: Set(row.referred_by_code.clone()),
            referral_count: Set(row.referral_count),
            created_at: Set(row.created_at),
        };

        match registrant::Entity::insert(active).exec_without_returning(&self.db).await {
            Ok(_) => Ok(InsertOutcome::Inserted(row)),
            Err(e) => match classify_conflict(&e) {
                Some(Conflict::Code) => Ok(InsertOutcome::DuplicateCode),
                Some(Conflict::Email) => Ok(InsertOutcome::DuplicateEmail),
                None => Err(e.into()),
            },
        }
    }

    async fn increment_referral_count(&self, code: &str) -> Result<Option<Registrant>, StoreError> {
        let res = registrant::Entity::update_many()
            .col_expr(
                registrant::Column::ReferralCount,
                Expr::col(registrant::Column::ReferralCount).add(1),
            )
            .filter(registrant::Column::ReferralCode.eq(code))
            .exec(&self.db)
            .await?;

        if res.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_code(code).await
    }
}
