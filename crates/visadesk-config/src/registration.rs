use std::env;

/// Self-registration rules for `POST /auth/register`.
#[derive(Clone, Debug)]
pub struct RegistrationConfig {
    /// Whether a caller may pick `role: "admin"` when registering
    /// (`ALLOW_ADMIN_SELF_REGISTRATION`, default: true).
    pub allow_admin_self_registration: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            allow_admin_self_registration: true,
        }
    }
}

impl RegistrationConfig {
    pub fn from_env() -> Self {
        Self {
            allow_admin_self_registration: env::var("ALLOW_ADMIN_SELF_REGISTRATION")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(true),
        }
    }
}
