use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Taqyim";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,taqyim=debug"
}

/// Development fallbacks, used only when the corresponding environment
/// variable is absent. Deployments must set both variables.
const DEV_ADMIN_KEY: &str = "taqyim-dev-admin-key";
const DEV_TOKEN_SECRET: &str = "taqyim-dev-token-secret";

/// Process-wide settings for the activation core.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Shared secret required by `ActivationService::generate`.
    pub admin_key: String,
    /// HMAC secret for signing activation tokens.
    pub token_secret: String,
}

impl Settings {
    /// Load settings from the environment (`TAQYIM_ADMIN_KEY`,
    /// `TAQYIM_TOKEN_SECRET`), warning once per missing variable.
    pub fn from_env() -> Self {
        Self {
            admin_key: env_or_dev("TAQYIM_ADMIN_KEY", DEV_ADMIN_KEY),
            token_secret: env_or_dev("TAQYIM_TOKEN_SECRET", DEV_TOKEN_SECRET),
        }
    }

    /// Fixed settings, for tests and embedding processes that manage
    /// their own secrets.
    pub fn new(admin_key: impl Into<String>, token_secret: impl Into<String>) -> Self {
        Self {
            admin_key: admin_key.into(),
            token_secret: token_secret.into(),
        }
    }
}

fn env_or_dev(var: &str, dev_value: &str) -> String {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            tracing::warn!(var, "environment variable not set, using development value");
            dev_value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_taqyim() {
        assert_eq!(APP_NAME, "Taqyim");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn from_env_always_produces_secrets() {
        let settings = Settings::from_env();
        assert!(!settings.admin_key.is_empty());
        assert!(!settings.token_secret.is_empty());
    }

    #[test]
    fn explicit_settings_are_kept_verbatim() {
        let settings = Settings::new("admin", "signing");
        assert_eq!(settings.admin_key, "admin");
        assert_eq!(settings.token_secret, "signing");
    }
}
