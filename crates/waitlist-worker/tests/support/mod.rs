#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use waitlist_worker::referral::{
    CodeGenerator, EmailMessage, InsertOutcome, Mailer, NewRegistrant, NotificationError, RandomCodes,
    ReferralConfig, Registrant, RegistrantStore, Registrar, StoreError,
};

/// In-memory store with the same uniqueness rules as the `registrants` table.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<Registrant>>,
    pub insert_calls: AtomicUsize,
    pub fail_increment: AtomicBool,
    /// `code_exists` always answers `false`, so collisions surface at insert time.
    pub blind_code_check: AtomicBool,
    /// The next `find_by_email` misses, as if another request inserted concurrently.
    pub hide_email_once: AtomicBool,
}

impl FakeStore {
    pub async fn seed(&self, email: &str, code: &str, count: i64) {
        self.rows.lock().await.push(Registrant {
            email: email.to_string(),
            referral_code: code.to_string(),
            referred_by_code: None,
            referral_count: count,
            created_at: 1_700_000_000,
        });
    }

    pub async fn get(&self, email: &str) -> Option<Registrant> {
        self.rows.lock().await.iter().find(|r| r.email == email).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait::async_trait]
impl RegistrantStore for FakeStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registrant>, StoreError> {
        if self.hide_email_once.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.get(email).await)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Registrant>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|r| r.referral_code == code).cloned())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, StoreError> {
        if self.blind_code_check.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.find_by_code(code).await?.is_some())
    }

    async fn insert(&self, new: NewRegistrant) -> Result<InsertOutcome, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().await;
        if rows.iter().any(|r| r.email == new.email) {
            return Ok(InsertOutcome::DuplicateEmail);
        }
        if rows.iter().any(|r| r.referral_code == new.referral_code) {
            return Ok(InsertOutcome::DuplicateCode);
        }
        let row = new.into_registrant();
        rows.push(row.clone());
        Ok(InsertOutcome::Inserted(row))
    }

    async fn increment_referral_count(&self, code: &str) -> Result<Option<Registrant>, StoreError> {
        if self.fail_increment.load(Ordering::SeqCst) {
            return Err(StoreError::new("update timed out"));
        }
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.iter_mut().find(|r| r.referral_code == code) else {
            return Ok(None);
        };
        row.referral_count += 1;
        Ok(Some(row.clone()))
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_to(&self, email: &str) -> Vec<EmailMessage> {
        self.sent().await.into_iter().filter(|m| m.to == email).collect()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery("status=502".to_string()));
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

/// Hands out queued codes first, then random ones.
#[derive(Default)]
pub struct ScriptedCodes {
    short: std::sync::Mutex<VecDeque<String>>,
    wide: std::sync::Mutex<VecDeque<String>>,
}

impl ScriptedCodes {
    pub fn new(short: &[&str], wide: &[&str]) -> Self {
        Self {
            short: std::sync::Mutex::new(short.iter().map(|s| s.to_string()).collect()),
            wide: std::sync::Mutex::new(wide.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl CodeGenerator for ScriptedCodes {
    fn short_code(&self, email: &str) -> String {
        let next = self.short.lock().expect("lock").pop_front();
        next.unwrap_or_else(|| RandomCodes.short_code(email))
    }

    fn wide_code(&self, email: &str) -> String {
        let next = self.wide.lock().expect("lock").pop_front();
        next.unwrap_or_else(|| RandomCodes.wide_code(email))
    }
}

pub type TestRegistrar = Registrar<FakeStore, RecordingMailer, ScriptedCodes>;

pub fn registrar(codes: ScriptedCodes) -> TestRegistrar {
    registrar_with(codes, ReferralConfig::default())
}

pub fn registrar_with(codes: ScriptedCodes, config: ReferralConfig) -> TestRegistrar {
    Registrar::new(FakeStore::default(), RecordingMailer::default(), codes, config)
}
