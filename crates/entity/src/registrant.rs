use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A person who joined the waitlist.
///
/// `email` and `referral_code` are both unique; the storage layer enforces it and
/// callers rely on the constraint violation rather than on a prior read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "registrants")]
pub struct Model {
    /// Normalized (trimmed, lowercased) address.
    #[sea_orm(primary_key, auto_increment = false)]
    pub email: String,

    #[sea_orm(unique)]
    pub referral_code: String,

    /// Code of the registrant credited for this signup. Set once at creation.
    pub referred_by_code: Option<String>,

    /// Only ever changed through a single `referral_count = referral_count + 1` update.
    pub referral_count: i64,

    /// Unix timestamp (seconds).
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
