use super::error::StoreError;
use super::model::{InsertOutcome, NewRegistrant, Registrant};

/// Persistence contract for registrants.
///
/// Implementations must enforce uniqueness of `email` and `referral_code` themselves
/// and report violations through [`InsertOutcome`] instead of an error.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait RegistrantStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registrant>, StoreError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Registrant>, StoreError>;

    async fn code_exists(&self, code: &str) -> Result<bool, StoreError>;

    async fn insert(&self, new: NewRegistrant) -> Result<InsertOutcome, StoreError>;

    /// Adds one to the referrer's count in a single store-side update and returns the
    /// row as read afterwards. `None` when no registrant owns `code`.
    async fn increment_referral_count(&self, code: &str) -> Result<Option<Registrant>, StoreError>;
}
