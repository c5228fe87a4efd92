use serde::Serialize;
use worker::{Env, Headers, Method, Request, RequestInit};

use crate::referral::{EmailMessage, Mailer, NotificationError};

use super::env::env_string;

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoEmailAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailBody {
    sender: BrevoEmailAddress,
    to: Vec<BrevoEmailAddress>,
    subject: String,
    html_content: String,
    text_content: String,
}

#[derive(Debug, Clone)]
struct BrevoSettings {
    api_key: String,
    sender_email: String,
    sender_name: Option<String>,
}

/// Brevo transactional email client. Unconfigured instances fail every send with
/// [`NotificationError::NotConfigured`].
#[derive(Debug, Clone)]
pub struct BrevoMailer {
    settings: Option<BrevoSettings>,
}

impl BrevoMailer {
    pub fn from_env(env: &Env) -> Self {
        let settings = match (
            env_string(env, "BREVO_API_KEY"),
            env_string(env, "BREVO_SENDER_EMAIL"),
        ) {
            (Some(api_key), Some(sender_email)) => Some(BrevoSettings {
                api_key,
                sender_email,
                sender_name: env_string(env, "BREVO_SENDER_NAME"),
            }),
            _ => {
                tracing::warn!("BREVO_API_KEY or BREVO_SENDER_EMAIL missing, emails are disabled");
                None
            }
        };
        Self { settings }
    }

    async fn deliver(settings: &BrevoSettings, message: &EmailMessage) -> worker::Result<u16> {
        let body = BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: settings.sender_email.clone(),
                name: settings.sender_name.clone(),
            },
            to: vec![BrevoEmailAddress {
                email: message.to.clone(),
                name: None,
            }],
            subject: message.subject.clone(),
            html_content: message.html.clone(),
            text_content: message.text.clone(),
        };

        let json = serde_json::to_string(&body)
            .map_err(|e| worker::Error::RustError(format!("Failed to serialize Brevo payload: {e}")))?;

        let headers = Headers::new();
        headers.set("api-key", &settings.api_key)?;
        headers.set("Content-Type", "application/json")?;
        headers.set("Accept", "application/json")?;
        headers.set("User-Agent", "Waitlist/0.1 (Cloudflare Worker)")?;

        let mut init = RequestInit::new();
        init.with_method(Method::Post);
        init.with_headers(headers);
        init.with_body(Some(json.into()));

        let req = Request::new_with_init(BREVO_SEND_URL, &init)?;
        let mut resp = worker::Fetch::Request(req).send().await?;
        let status = resp.status_code();
        if (200..=299).contains(&status) {
            return Ok(status);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(worker::Error::RustError(format!(
            "Brevo send failed (status={status}): {body}"
        )))
    }
}

#[async_trait::async_trait(?Send)]
impl Mailer for BrevoMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        let Some(settings) = &self.settings else {
            return Err(NotificationError::NotConfigured);
        };

        match Self::deliver(settings, message).await {
            Ok(status) => {
                tracing::info!(to = %message.to, status, "Email sent");
                Ok(())
            }
            Err(e) => Err(NotificationError::Delivery(e.to_string())),
        }
    }
}
