//! Waitlist signup, referral attribution and dashboard lookup.

pub mod code;
pub mod config;
pub mod error;
pub mod lookup;
pub mod mailer;
pub mod model;
pub mod registrar;
pub mod store;
pub mod templates;
pub mod tiers;
pub mod validate;

pub use code::{CodeGenerator, RandomCodes};
pub use config::ReferralConfig;
pub use error::{NotificationError, ReferralError, StoreError};
pub use lookup::ReferralLookup;
pub use mailer::{EmailMessage, Mailer};
pub use model::{InsertOutcome, NewRegistrant, Registrant, RegistrantProfile};
pub use registrar::{deliver_referrer_notice, AttributionOutcome, Registrar, Signup, SignupRequest, SignupResponse};
pub use store::RegistrantStore;
pub use tiers::RewardTier;
