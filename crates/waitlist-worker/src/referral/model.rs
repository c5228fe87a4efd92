use serde::{Deserialize, Serialize};

use crate::util::ts_to_rfc3339;

pub use entity::registrant::Model as Registrant;

/// Row to insert for a first-time signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistrant {
    pub email: String,
    pub referral_code: String,
    pub referred_by_code: Option<String>,
    pub created_at: i64,
}

impl NewRegistrant {
    pub fn into_registrant(self) -> Registrant {
        Registrant {
            email: self.email,
            referral_code: self.referral_code,
            referred_by_code: self.referred_by_code,
            referral_count: 0,
            created_at: self.created_at,
        }
    }
}

/// Result of an insert, decided by the storage unique constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(Registrant),
    DuplicateEmail,
    DuplicateCode,
}

/// Public fields rendered by the referral dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantProfile {
    pub email: String,
    pub referral_code: String,
    pub referral_count: i64,
    pub created_at: String,
}

impl From<&Registrant> for RegistrantProfile {
    fn from(r: &Registrant) -> Self {
        Self {
            email: r.email.clone(),
            referral_code: r.referral_code.clone(),
            referral_count: r.referral_count,
            created_at: ts_to_rfc3339(r.created_at),
        }
    }
}
