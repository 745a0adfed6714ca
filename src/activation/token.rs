//! Signed activation tokens.
//!
//! A token proves one successful redemption. It is an HS256 JWT carrying
//! a type discriminator, the expiry inherited from the originating code,
//! and a unique id. Verification is stateless; nothing server-side can
//! extend or revoke a token before its `exp`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ActivationError;

/// Type discriminator embedded in every activation token.
pub const TOKEN_TYPE: &str = "activation";

/// Claims carried by an activation token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Token type; anything but [`TOKEN_TYPE`] is rejected at verification.
    pub typ: String,
    /// Expiry (unix seconds), copied verbatim from the redeemed code.
    pub exp: i64,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Unique token id.
    pub jti: Uuid,
}

/// Signs and verifies activation tokens with a process-wide HMAC secret.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token expiring at `expires_at`, the remaining validity of
    /// the redeemed code, never more.
    pub fn issue(&self, expires_at: DateTime<Utc>) -> Result<(String, TokenClaims), ActivationError> {
        let claims = TokenClaims {
            typ: TOKEN_TYPE.to_string(),
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ActivationError::TokenEncoding(e.to_string()))?;
        Ok((token, claims))
    }

    /// Verify signature, expiry, and token type.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, ActivationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock slack: a code's validity window is exact, and tokens
        // inherit it.
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ActivationError::Expired,
                _ => ActivationError::Unauthorized,
            })?;

        if claims.typ != TOKEN_TYPE {
            return Err(ActivationError::Unauthorized);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn issue_and_verify_roundtrip() {
        let signer = TokenSigner::new("signing-secret");
        let expires_at = Utc::now() + Duration::hours(1);

        let (token, issued) = signer.issue(expires_at).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.typ, TOKEN_TYPE);
        assert_eq!(claims.exp, expires_at.timestamp());
        assert_eq!(claims.jti, issued.jti);
    }

    #[test]
    fn expiry_is_copied_not_extended() {
        let signer = TokenSigner::new("signing-secret");
        let expires_at = Utc::now() + Duration::minutes(30);

        let (_, claims) = signer.issue(expires_at).unwrap();
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn token_ids_are_unique() {
        let signer = TokenSigner::new("signing-secret");
        let expires_at = Utc::now() + Duration::hours(1);

        let (_, a) = signer.issue(expires_at).unwrap();
        let (_, b) = signer.issue(expires_at).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let signer = TokenSigner::new("secret-a");
        let other = TokenSigner::new("secret-b");
        let (token, _) = signer.issue(Utc::now() + Duration::hours(1)).unwrap();

        assert!(matches!(
            other.verify(&token),
            Err(ActivationError::Unauthorized)
        ));
    }

    #[test]
    fn garbage_is_unauthorized() {
        let signer = TokenSigner::new("signing-secret");
        assert!(matches!(
            signer.verify("not-a-token"),
            Err(ActivationError::Unauthorized)
        ));
    }

    #[test]
    fn elapsed_exp_is_expired() {
        let signer = TokenSigner::new("signing-secret");
        let (token, _) = signer.issue(Utc::now() - Duration::seconds(5)).unwrap();

        assert!(matches!(
            signer.verify(&token),
            Err(ActivationError::Expired)
        ));
    }

    #[test]
    fn wrong_type_is_unauthorized() {
        let signer = TokenSigner::new("signing-secret");
        let claims = TokenClaims {
            typ: "refresh".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"signing-secret"),
        )
        .unwrap();

        assert!(matches!(
            signer.verify(&token),
            Err(ActivationError::Unauthorized)
        ));
    }
}
