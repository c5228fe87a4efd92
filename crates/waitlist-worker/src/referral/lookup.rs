use super::error::ReferralError;
use super::model::RegistrantProfile;
use super::store::RegistrantStore;
use super::validate::normalize_code;

/// Read-only access to a registrant's dashboard data.
pub struct ReferralLookup<S> {
    store: S,
}

impl<S: RegistrantStore> ReferralLookup<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn profile(&self, code: Option<&str>) -> Result<RegistrantProfile, ReferralError> {
        let Some(code) = normalize_code(code) else {
            return Err(ReferralError::Validation("Referral code is required".to_string()));
        };

        tracing::info!(referral_code = %code, "Fetching referral data");

        let Some(registrant) = self.store.find_by_code(&code).await? else {
            return Err(ReferralError::NotFound);
        };

        Ok(RegistrantProfile::from(&registrant))
    }
}
