//! Application status transition policy.
//!
//! - `permissive` (default): an admin may set any status, including moving an
//!   already approved or rejected application to a different status.
//! - `strict`: approved and rejected are terminal; only a re-set to the same
//!   status is accepted once an application has left `pending`.
//!
//! Configured with `APPLICATION_TRANSITION_POLICY`.

use std::env;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "permissive" => Some(Self::Permissive),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LifecycleConfig {
    pub transition_policy: TransitionPolicy,
}

impl LifecycleConfig {
    pub fn from_env() -> Self {
        Self {
            transition_policy: env::var("APPLICATION_TRANSITION_POLICY")
                .ok()
                .and_then(|v| TransitionPolicy::parse(&v))
                .unwrap_or_default(),
        }
    }

    pub fn strict() -> Self {
        Self {
            transition_policy: TransitionPolicy::Strict,
        }
    }
}
