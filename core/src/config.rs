//! Error handling configuration.
//!
//! Controls whether fail transitions may omit their error payload.

/// Environment variable enabling strict error handling
pub const STRICT_ERROR_HANDLING_VAR: &str = "STOREFRONT_STRICT_ERROR_HANDLING";

/// Strictness of fail transitions
///
/// In lenient mode (the default) a fail transition without an error payload
/// stores the `true` sentinel and logs a deprecation warning. In strict mode
/// it is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorHandlingConfig {
    /// Reject fail transitions that carry no error payload
    pub strict: bool,
}

impl ErrorHandlingConfig {
    /// Lenient configuration
    #[must_use]
    pub const fn lenient() -> Self {
        Self { strict: false }
    }

    /// Strict configuration
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }

    /// Load from the process environment ([`STRICT_ERROR_HANDLING_VAR`])
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through a variable lookup function
    ///
    /// `true`, `1`, `yes` and `on` (any case) enable strict mode; anything
    /// else, including an unset variable, is lenient.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let strict = lookup(STRICT_ERROR_HANDLING_VAR).is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        });

        Self { strict }
    }
}
