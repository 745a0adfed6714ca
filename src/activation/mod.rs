//! Single-use activation credentials.
//!
//! Flow: an admin generates a short display code with a bounded validity
//! period; a client redeems it exactly once for a signed token; the token
//! gates report generation until it expires. Codes are stored only as
//! SHA-256 digests, everything lives in memory, and expired entries are
//! evicted lazily, at redemption or by an opportunistic sweep, never by
//! a timer.

pub mod code;
pub mod store;
pub mod token;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::config::Settings;
use code::{CodeRecord, ValidityPeriod};
use store::{CodeStore, InMemoryCodeStore, TokenRegistry};
use token::{TokenClaims, TokenSigner};

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Errors from the credential lifecycle.
///
/// Expired and used codes cannot be retried into validity, so nothing
/// here is transient and no operation retries internally.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    #[error("Not authorized")]
    Unauthorized,
    #[error("Unknown activation code")]
    NotFound,
    #[error("Activation code or token expired")]
    Expired,
    #[error("Activation code already used")]
    AlreadyUsed,
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Internal lock poisoned")]
    LockPoisoned,
    #[error("Token signing failed: {0}")]
    TokenEncoding(String),
}

// ═══════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════

/// Result of `generate`, the only place the plaintext code exists.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub period: ValidityPeriod,
}

/// Result of `redeem`.
#[derive(Debug, Clone, Serialize)]
pub struct RedeemedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════
// ActivationService
// ═══════════════════════════════════════════════════════════

/// Generates, redeems, and verifies activation credentials.
///
/// Shared behind an `Arc` by the transport layer; every method takes
/// `&self` and the store serializes its own mutation.
pub struct ActivationService {
    store: Arc<dyn CodeStore>,
    registry: TokenRegistry,
    signer: TokenSigner,
    admin_key: String,
}

impl ActivationService {
    /// Service backed by the default in-memory store.
    pub fn new(settings: &Settings) -> Self {
        Self::with_store(settings, Arc::new(InMemoryCodeStore::new()))
    }

    /// Service backed by an injected store.
    pub fn with_store(settings: &Settings, store: Arc<dyn CodeStore>) -> Self {
        Self {
            store,
            registry: TokenRegistry::new(),
            signer: TokenSigner::new(&settings.token_secret),
            admin_key: settings.admin_key.clone(),
        }
    }

    /// Generate a new single-use code under the given validity period.
    ///
    /// `custom_days` applies only when `period` is `"custom"`. Doubles as
    /// the scheduled call site of the lazy sweep.
    pub fn generate(
        &self,
        admin_key: &str,
        period: &str,
        custom_days: Option<u16>,
    ) -> Result<GeneratedCode, ActivationError> {
        self.require_admin(admin_key)?;

        // Opportunistic eviction keeps the store from accumulating dead
        // entries; nothing else runs on a schedule.
        self.sweep()?;

        let period = ValidityPeriod::resolve(period, custom_days)?;
        let display = code::generate_display_code(&mut rand::thread_rng());
        let record = CodeRecord::new(period, Utc::now());
        let expires_at = record.expires_at;

        self.store.put(code::hash_code(&display), record)?;
        tracing::info!(%period, %expires_at, "activation code generated");

        Ok(GeneratedCode {
            code: display,
            expires_at,
            period,
        })
    }

    /// Redeem a display code for a signed activation token.
    ///
    /// The code is consumed atomically: of two concurrent calls with the
    /// same code, exactly one receives a token.
    pub fn redeem(&self, input: &str) -> Result<RedeemedToken, ActivationError> {
        let normalized = code::normalize_code(input);
        if !code::is_well_formed(&normalized) {
            return Err(ActivationError::Validation(
                "malformed activation code".into(),
            ));
        }

        // remove-if-present is the single-use guarantee: the entry leaves
        // the store before any token is issued.
        let digest = code::hash_code(&normalized);
        let mut record = self
            .store
            .remove(&digest)?
            .ok_or(ActivationError::NotFound)?;

        if record.used {
            // Only reachable with a backend that retains consumed entries.
            return Err(ActivationError::AlreadyUsed);
        }
        if record.is_expired(Utc::now()) {
            tracing::debug!("redemption attempt on expired code");
            return Err(ActivationError::Expired);
        }

        record.used = true;
        let (token, claims) = self.signer.issue(record.expires_at)?;
        self.registry.register(claims.jti, record.expires_at)?;
        tracing::info!(jti = %claims.jti, expires_at = %record.expires_at, "activation code redeemed");

        Ok(RedeemedToken {
            token,
            expires_at: record.expires_at,
        })
    }

    /// Verify an activation token and return its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, ActivationError> {
        self.signer.verify(token)
    }

    /// Evict every expired code and token-registry entry.
    pub fn sweep(&self) -> Result<usize, ActivationError> {
        let now = Utc::now();
        let codes = self.store.sweep(now)?;
        let tokens = self.registry.sweep(now)?;
        if codes + tokens > 0 {
            tracing::info!(codes, tokens, "sweep evicted expired entries");
        }
        Ok(codes + tokens)
    }

    /// Constant-time admin key comparison over digests, so neither length
    /// nor prefix leaks through timing.
    fn require_admin(&self, presented: &str) -> Result<(), ActivationError> {
        let expected = code::hash_code(&self.admin_key);
        let given = code::hash_code(presented);
        if expected.ct_eq(&given).unwrap_u8() == 0 {
            tracing::warn!("generate rejected: bad admin key");
            return Err(ActivationError::Unauthorized);
        }
        Ok(())
    }
}
