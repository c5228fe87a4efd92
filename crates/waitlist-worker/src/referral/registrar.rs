use serde::{Deserialize, Serialize};

use crate::util::now_ts;

use super::code::CodeGenerator;
use super::config::ReferralConfig;
use super::error::{NotificationError, ReferralError, StoreError};
use super::mailer::{EmailMessage, Mailer};
use super::model::{InsertOutcome, NewRegistrant, Registrant};
use super::store::RegistrantStore;
use super::templates;
use super::validate::{normalize_code, normalize_email};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub referrer_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponse {
    pub success: bool,
    #[serde(rename = "isNew")]
    pub is_new: bool,
    pub referral_code: String,
    #[serde(rename = "emailError", skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
}

/// Outcome of [`Registrar::register_deferred`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub response: SignupResponse,
    /// Mail for the credited referrer, not yet sent.
    pub referrer_notice: Option<EmailMessage>,
}

impl Signup {
    fn existing(registrant: &Registrant) -> Self {
        Self {
            response: SignupResponse {
                success: true,
                is_new: false,
                referral_code: registrant.referral_code.clone(),
                email_error: None,
            },
            referrer_notice: None,
        }
    }
}

/// Sends a referrer notification; failures are logged and never reach the signup.
pub async fn deliver_referrer_notice<M: Mailer>(mailer: &M, notice: &EmailMessage) {
    if let Err(e) = mailer.send(notice).await {
        tracing::warn!(to = %notice.to, error = %e, "Failed to send referral notification");
    }
}

/// Result of crediting a referrer. Never fails the signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributionOutcome {
    Credited(Registrant),
    UnknownReferrer,
    Failed(StoreError),
}

enum Creation {
    Created(Registrant),
    AlreadyRegistered(Registrant),
}

/// Find-or-create of registrants plus referral attribution and notification emails.
pub struct Registrar<S, M, G> {
    store: S,
    mailer: M,
    codes: G,
    config: ReferralConfig,
}

impl<S, M, G> Registrar<S, M, G>
where
    S: RegistrantStore,
    M: Mailer,
    G: CodeGenerator,
{
    pub fn new(store: S, mailer: M, codes: G, config: ReferralConfig) -> Self {
        Self {
            store,
            mailer,
            codes,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Full signup, delivering the referrer notification before returning.
    pub async fn register(&self, request: SignupRequest) -> Result<SignupResponse, ReferralError> {
        let signup = self.register_deferred(request).await?;
        if let Some(notice) = &signup.referrer_notice {
            deliver_referrer_notice(&self.mailer, notice).await;
        }
        Ok(signup.response)
    }

    /// Signup without sending the referrer notification; the caller delivers
    /// [`Signup::referrer_notice`] after responding (see [`deliver_referrer_notice`]).
    pub async fn register_deferred(&self, request: SignupRequest) -> Result<Signup, ReferralError> {
        let email = normalize_email(&request.email)?;
        let referrer_code = normalize_code(request.referrer_code.as_deref());

        tracing::info!(%email, referrer_code = ?referrer_code, "Processing signup");

        if let Some(existing) = self.store.find_by_email(&email).await? {
            tracing::info!(referral_code = %existing.referral_code, "Registrant already exists");
            return Ok(Signup::existing(&existing));
        }

        let referrer = match referrer_code {
            Some(code) => self.resolve_referrer(&email, &code).await?,
            None => None,
        };

        let registrant = match self.create(&email, referrer.as_ref()).await? {
            Creation::Created(r) => r,
            Creation::AlreadyRegistered(existing) => {
                tracing::info!(
                    referral_code = %existing.referral_code,
                    "Concurrent signup for the same email, returning existing code"
                );
                return Ok(Signup::existing(&existing));
            }
        };
        tracing::info!(referral_code = %registrant.referral_code, "New registrant created");

        let referrer_notice = match referrer {
            Some(referrer) => match self.attribute(&referrer.referral_code).await {
                AttributionOutcome::Credited(updated) => {
                    Some(templates::referral_credited(&self.config, &updated))
                }
                _ => None,
            },
            None => None,
        };

        let email_error = match self.send_welcome(&registrant).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(referral_code = %registrant.referral_code, error = %e, "Failed to send welcome email");
                Some(e.to_string())
            }
        };

        Ok(Signup {
            response: SignupResponse {
                success: true,
                is_new: true,
                referral_code: registrant.referral_code,
                email_error,
            },
            referrer_notice,
        })
    }

    /// Unknown codes and self-referrals degrade to an organic signup.
    async fn resolve_referrer(&self, email: &str, code: &str) -> Result<Option<Registrant>, ReferralError> {
        let Some(referrer) = self.store.find_by_code(code).await? else {
            tracing::warn!(referrer_code = %code, "Unknown referrer code, signing up without referrer");
            return Ok(None);
        };
        if referrer.email == email {
            tracing::warn!(referrer_code = %code, "Ignoring self-referral");
            return Ok(None);
        }
        Ok(Some(referrer))
    }

    fn candidates<'a>(&'a self, email: &'a str) -> impl Iterator<Item = String> + 'a {
        let short = (0..self.config.max_code_attempts).map(move |_| self.codes.short_code(email));
        let wide = (0..self.config.wide_code_attempts).map(move |_| self.codes.wide_code(email));
        short.chain(wide)
    }

    async fn create(&self, email: &str, referrer: Option<&Registrant>) -> Result<Creation, ReferralError> {
        let mut attempts = 0;

        for candidate in self.candidates(email) {
            attempts += 1;

            // Best-effort pre-check; the unique index decides.
            if self.store.code_exists(&candidate).await? {
                tracing::debug!(attempt = attempts, code = %candidate, "Referral code taken");
                continue;
            }

            let new = NewRegistrant {
                email: email.to_string(),
                referral_code: candidate,
                referred_by_code: referrer.map(|r| r.referral_code.clone()),
                created_at: now_ts(),
            };

            match self.store.insert(new).await? {
                InsertOutcome::Inserted(r) => return Ok(Creation::Created(r)),
                InsertOutcome::DuplicateCode => {
                    tracing::debug!(attempt = attempts, "Referral code claimed concurrently");
                }
                InsertOutcome::DuplicateEmail => {
                    return match self.store.find_by_email(email).await? {
                        Some(existing) => Ok(Creation::AlreadyRegistered(existing)),
                        None => Err(StoreError::new("insert reported duplicate email but no row was found").into()),
                    };
                }
            }
        }

        tracing::error!(attempts, "Could not allocate a free referral code");
        Err(ReferralError::ExhaustedRetries { attempts })
    }

    async fn attribute(&self, referrer_code: &str) -> AttributionOutcome {
        let outcome = match self.store.increment_referral_count(referrer_code).await {
            Ok(Some(updated)) => AttributionOutcome::Credited(updated),
            Ok(None) => AttributionOutcome::UnknownReferrer,
            Err(e) => AttributionOutcome::Failed(e),
        };

        match &outcome {
            AttributionOutcome::Credited(r) => {
                tracing::info!(referrer_code, referral_count = r.referral_count, "Updated referrer count");
            }
            AttributionOutcome::UnknownReferrer => {
                tracing::warn!(referrer_code, "Referrer disappeared before attribution");
            }
            AttributionOutcome::Failed(e) => {
                tracing::error!(referrer_code, error = %e, "Error updating referrer count");
            }
        }

        outcome
    }

    async fn send_welcome(&self, registrant: &Registrant) -> Result<(), NotificationError> {
        let message = templates::welcome(&self.config, registrant);
        self.mailer.send(&message).await
    }
}
