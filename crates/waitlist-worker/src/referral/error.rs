use thiserror::Error;

/// Failures surfaced by the registrar and the lookup.
#[derive(Debug, Error)]
pub enum ReferralError {
    #[error("{0}")]
    Validation(String),

    #[error("Referral code not found")]
    NotFound,

    #[error("no free referral code after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    #[error("store error: {0}")]
    Upstream(#[from] StoreError),
}

impl ReferralError {
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound => 404,
            Self::ExhaustedRetries { .. } | Self::Upstream(_) => 500,
        }
    }

    /// Message safe to return to clients. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(_) | Self::NotFound => self.to_string(),
            Self::ExhaustedRetries { .. } | Self::Upstream(_) => "Internal server error".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("email delivery is not configured")]
    NotConfigured,

    #[error("email delivery failed: {0}")]
    Delivery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_failures_do_not_leak_detail() {
        let err = ReferralError::Upstream(StoreError::new("connection refused to 10.0.0.3"));
        assert_eq!(err.status(), 500);
        assert_eq!(err.public_message(), "Internal server error");

        let err = ReferralError::ExhaustedRetries { attempts: 13 };
        assert_eq!(err.status(), 500);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn client_failures_keep_their_message() {
        let err = ReferralError::Validation("Email is required".into());
        assert_eq!(err.status(), 400);
        assert_eq!(err.public_message(), "Email is required");

        assert_eq!(ReferralError::NotFound.status(), 404);
        assert_eq!(ReferralError::NotFound.public_message(), "Referral code not found");
    }
}
