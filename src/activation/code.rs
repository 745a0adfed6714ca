//! Activation code generation, normalization, and digesting.
//!
//! Display codes are short, human-typeable secrets. Only their SHA-256
//! digest is ever stored; the plaintext exists in the `generate` response
//! and nowhere else.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Serialize, Serializer};

use super::ActivationError;

/// Display code length in characters.
pub const CODE_LENGTH: usize = 8;

/// Uppercase alphanumerics minus the ambiguous glyphs `0 O 1 I`.
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Custom validity is capped at one year.
const MAX_CUSTOM_DAYS: u16 = 365;

// ═══════════════════════════════════════════════════════════
// ValidityPeriod
// ═══════════════════════════════════════════════════════════

/// Closed set of supported code lifetimes.
///
/// `Custom` carries its day count, so an unvalidated day count is
/// unrepresentable past `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityPeriod {
    ThirtyMinutes,
    OneHour,
    OneDay,
    OneWeek,
    ThirtyDays,
    Custom(u16),
}

impl ValidityPeriod {
    /// Resolve a wire period string plus optional day count.
    ///
    /// `custom_days` is consulted only when `period` is literally
    /// `"custom"`; named periods ignore it.
    pub fn resolve(period: &str, custom_days: Option<u16>) -> Result<Self, ActivationError> {
        match period.trim() {
            "30m" => Ok(Self::ThirtyMinutes),
            "1h" => Ok(Self::OneHour),
            "1d" => Ok(Self::OneDay),
            "1w" => Ok(Self::OneWeek),
            "30d" => Ok(Self::ThirtyDays),
            "custom" => {
                let days = custom_days.ok_or_else(|| {
                    ActivationError::Validation("custom period requires custom_days".into())
                })?;
                if days == 0 || days > MAX_CUSTOM_DAYS {
                    return Err(ActivationError::Validation(format!(
                        "custom_days must be between 1 and {MAX_CUSTOM_DAYS}, got {days}"
                    )));
                }
                Ok(Self::Custom(days))
            }
            other => Err(ActivationError::Validation(format!(
                "unknown validity period '{other}'"
            ))),
        }
    }

    /// Nominal lifetime of a code generated under this period.
    pub fn duration(&self) -> Duration {
        match self {
            Self::ThirtyMinutes => Duration::minutes(30),
            Self::OneHour => Duration::hours(1),
            Self::OneDay => Duration::days(1),
            Self::OneWeek => Duration::weeks(1),
            Self::ThirtyDays => Duration::days(30),
            Self::Custom(days) => Duration::days(i64::from(*days)),
        }
    }

    /// Wire label, matching the strings `resolve` accepts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
            Self::ThirtyDays => "30d",
            Self::Custom(_) => "custom",
        }
    }
}

impl std::fmt::Display for ValidityPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(days) => write!(f, "custom ({days}d)"),
            named => f.write_str(named.as_str()),
        }
    }
}

impl Serialize for ValidityPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Stored record
// ═══════════════════════════════════════════════════════════

/// What the store holds per code, keyed by digest, never by plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRecord {
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub period: ValidityPeriod,
    /// Flipped exactly once, at redemption.
    pub used: bool,
}

impl CodeRecord {
    pub fn new(period: ValidityPeriod, now: DateTime<Utc>) -> Self {
        Self {
            expires_at: now + period.duration(),
            created_at: now,
            period,
            used: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

// ═══════════════════════════════════════════════════════════
// Code helpers
// ═══════════════════════════════════════════════════════════

/// Generate a random display code from the unambiguous charset.
pub fn generate_display_code(rng: &mut impl Rng) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Normalize redemption input: surrounding whitespace and case are
/// user-side noise, not part of the secret.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

/// Shape check for a normalized code. Rejecting before the store lookup
/// distinguishes malformed input from an unknown code.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_CHARSET.contains(&b))
}

/// SHA-256 digest of a display code, the sole storage key.
pub fn hash_code(code: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hasher.finalize().into()
}
