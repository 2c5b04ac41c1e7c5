//! Loader state machine for one remotely loaded value.
//!
//! ```text
//! IDLE ──LOAD──▶ LOADING ──SUCCESS──▶ SUCCESS
//!                   │  ▲                 │
//!                  FAIL└──────LOAD───────┘
//!                   ▼
//!                FAILED ──RESET──▶ IDLE
//! ```
//!
//! Transitions travel as [`LoaderMeta`] attached to an action, so a single
//! [`LoaderReducer`] per entity type applies them without per-feature code.

use crate::config::ErrorHandlingConfig;
use crate::error::{HttpErrorModel, StateError};
use serde::{Deserialize, Serialize};

/// Error slot of a loader state
///
/// Serializes as `false`, `true` (legacy sentinel) or the error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoaderError {
    /// No error (`false`) or the legacy sentinel (`true`)
    Flag(bool),
    /// Normalized error payload
    Payload(HttpErrorModel),
}

impl LoaderError {
    /// No error
    pub const NONE: Self = Self::Flag(false);

    /// Whether this represents a failure
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }

    /// The error payload, if one was supplied
    #[must_use]
    pub const fn payload(&self) -> Option<&HttpErrorModel> {
        match self {
            Self::Payload(model) => Some(model),
            Self::Flag(_) => None,
        }
    }
}

impl Default for LoaderError {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<HttpErrorModel> for LoaderError {
    fn from(model: HttpErrorModel) -> Self {
        Self::Payload(model)
    }
}

/// Resolve the error of a fail transition that was given no payload
pub(crate) fn missing_error_payload(
    entity_type: &str,
    config: &ErrorHandlingConfig,
) -> Result<LoaderError, StateError> {
    if config.strict {
        return Err(StateError::ErrorRequired {
            entity_type: entity_type.to_string(),
        });
    }

    tracing::warn!(
        entity_type,
        "Fail transition without an error payload is deprecated, storing `true`"
    );
    Ok(LoaderError::Flag(true))
}

/// Lifecycle of one remote-loaded value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderState<T> {
    /// A load is in flight
    pub loading: bool,
    /// Last failure; cleared by the next load
    pub error: LoaderError,
    /// The last transition was a success
    pub success: bool,
    /// Last successfully loaded value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
}

impl<T> Default for LoaderState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: LoaderError::NONE,
            success: false,
            value: None,
        }
    }
}

/// A decoded loader transition
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderTransition<T> {
    /// Start loading
    Load,
    /// Loading finished; a value, if present, replaces the stored one
    Success(Option<T>),
    /// Loading failed
    Fail(LoaderError),
    /// Back to the initial state
    Reset,
}

impl<T> LoaderState<T> {
    /// Apply a transition.
    ///
    /// `Load` clears `success` and `error` before setting `loading`. `Fail`
    /// keeps the last successful value.
    pub fn apply(&mut self, transition: LoaderTransition<T>) {
        match transition {
            LoaderTransition::Load => {
                self.loading = true;
                self.error = LoaderError::NONE;
                self.success = false;
            },
            LoaderTransition::Success(value) => {
                if value.is_some() {
                    self.value = value;
                }
                self.loading = false;
                self.error = LoaderError::NONE;
                self.success = true;
            },
            LoaderTransition::Fail(error) => {
                self.loading = false;
                self.error = error;
                self.success = false;
            },
            LoaderTransition::Reset => *self = Self::default(),
        }
    }

    /// Nothing loaded, nothing loading, no error
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.loading && !self.success && !self.error.is_error() && self.value.is_none()
    }
}

/// The `loader` object of transition metadata
///
/// Decoded with precedence load, error, success; an object with none of them
/// set means reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderFlags {
    /// Start loading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<bool>,
    /// Failure payload or sentinel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<LoaderError>,
    /// Loading finished successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl LoaderFlags {
    /// `{ load: true }`
    #[must_use]
    pub const fn load() -> Self {
        Self {
            load: Some(true),
            error: None,
            success: None,
        }
    }

    /// `{ success: true }`
    #[must_use]
    pub const fn success() -> Self {
        Self {
            load: None,
            error: None,
            success: Some(true),
        }
    }

    /// `{ error: <error> }`
    #[must_use]
    pub const fn fail(error: LoaderError) -> Self {
        Self {
            load: None,
            error: Some(error),
            success: None,
        }
    }

    /// `{}`
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            load: None,
            error: None,
            success: None,
        }
    }

    /// Decode the transition, attaching `value` to a success
    #[must_use]
    pub fn transition<T>(&self, value: Option<T>) -> LoaderTransition<T> {
        if self.load == Some(true) {
            LoaderTransition::Load
        } else if let Some(error) = self.error.as_ref().filter(|error| error.is_error()) {
            LoaderTransition::Fail(error.clone())
        } else if self.success == Some(true) {
            LoaderTransition::Success(value)
        } else {
            LoaderTransition::Reset
        }
    }
}

/// Loader metadata for a singleton resource: `{ entityType, loader }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderMeta {
    /// Namespace of the resource
    pub entity_type: String,
    /// Transition flags; absent means no loader transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<LoaderFlags>,
}

impl LoaderMeta {
    fn with_flags(entity_type: impl Into<String>, flags: LoaderFlags) -> Self {
        Self {
            entity_type: entity_type.into(),
            loader: Some(flags),
        }
    }

    /// LOAD transition
    #[must_use]
    pub fn load(entity_type: impl Into<String>) -> Self {
        Self::with_flags(entity_type, LoaderFlags::load())
    }

    /// SUCCESS transition
    #[must_use]
    pub fn success(entity_type: impl Into<String>) -> Self {
        Self::with_flags(entity_type, LoaderFlags::success())
    }

    /// FAIL transition carrying an error payload
    #[must_use]
    pub fn fail(entity_type: impl Into<String>, error: HttpErrorModel) -> Self {
        Self::with_flags(entity_type, LoaderFlags::fail(error.into()))
    }

    /// FAIL transition without an error payload
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ErrorRequired`] when `config` is strict.
    #[deprecated(note = "pass the normalized error to `LoaderMeta::fail`")]
    pub fn fail_without_error(
        entity_type: impl Into<String>,
        config: &ErrorHandlingConfig,
    ) -> Result<Self, StateError> {
        let entity_type = entity_type.into();
        let error = missing_error_payload(&entity_type, config)?;
        Ok(Self::with_flags(entity_type, LoaderFlags::fail(error)))
    }

    /// RESET transition
    #[must_use]
    pub fn reset(entity_type: impl Into<String>) -> Self {
        Self::with_flags(entity_type, LoaderFlags::reset())
    }
}

/// Applies [`LoaderMeta`] of one entity type to a singleton [`LoaderState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderReducer {
    entity_type: &'static str,
}

impl LoaderReducer {
    /// Reducer for `entity_type`
    #[must_use]
    pub const fn new(entity_type: &'static str) -> Self {
        Self { entity_type }
    }

    /// The entity type this reducer owns
    #[must_use]
    pub const fn entity_type(&self) -> &'static str {
        self.entity_type
    }

    /// Apply `meta` if it targets this entity type.
    ///
    /// Returns whether a transition was applied.
    pub fn reduce<T>(&self, state: &mut LoaderState<T>, meta: &LoaderMeta, value: Option<T>) -> bool {
        if meta.entity_type != self.entity_type {
            return false;
        }
        let Some(flags) = &meta.loader else {
            return false;
        };

        state.apply(flags.transition(value));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CURRENCIES: &str = "currencies";

    fn out_of_stock() -> HttpErrorModel {
        HttpErrorModel {
            status: Some(400),
            message: Some("out of stock".into()),
            ..HttpErrorModel::default()
        }
    }

    #[test]
    fn load_clears_previous_success() {
        let reducer = LoaderReducer::new(CURRENCIES);
        let mut state = LoaderState::default();

        reducer.reduce(&mut state, &LoaderMeta::load(CURRENCIES), None);
        assert!(state.loading);

        reducer.reduce(&mut state, &LoaderMeta::success(CURRENCIES), Some(vec!["USD"]));
        assert!(state.success);
        assert!(!state.loading);

        reducer.reduce(&mut state, &LoaderMeta::load(CURRENCIES), None);
        assert!(!state.success);
        assert!(state.loading);
        assert_eq!(state.value, Some(vec!["USD"]));
    }

    #[test]
    fn fail_stores_payload_and_keeps_value() {
        let mut state = LoaderState {
            value: Some(1),
            ..LoaderState::default()
        };

        state.apply(LoaderTransition::Load);
        state.apply(LoaderTransition::Fail(out_of_stock().into()));

        assert!(!state.loading);
        assert!(!state.success);
        assert_eq!(state.error.payload(), Some(&out_of_stock()));
        assert_eq!(state.value, Some(1));

        state.apply(LoaderTransition::Load);
        assert_eq!(state.error, LoaderError::NONE);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut state = LoaderState::default();
        state.apply(LoaderTransition::Load);
        state.apply(LoaderTransition::Success(Some("EUR")));
        state.apply(LoaderTransition::Reset);

        assert!(state.is_idle());
        assert_eq!(state, LoaderState::default());
    }

    #[test]
    fn reducer_ignores_other_entity_types_and_missing_flags() {
        let reducer = LoaderReducer::new(CURRENCIES);
        let mut state: LoaderState<u8> = LoaderState::default();

        assert!(!reducer.reduce(&mut state, &LoaderMeta::load("languages"), None));
        let no_transition = LoaderMeta {
            entity_type: CURRENCIES.into(),
            loader: None,
        };
        assert!(!reducer.reduce(&mut state, &no_transition, None));
        assert!(state.is_idle());
    }

    #[test]
    fn flags_decode_with_load_precedence() {
        let flags = LoaderFlags {
            load: Some(true),
            error: Some(LoaderError::Flag(true)),
            success: Some(true),
        };
        assert_eq!(flags.transition::<()>(None), LoaderTransition::Load);

        let flags = LoaderFlags {
            error: Some(LoaderError::NONE),
            success: Some(true),
            ..LoaderFlags::default()
        };
        assert_eq!(flags.transition(Some(3)), LoaderTransition::Success(Some(3)));

        assert_eq!(LoaderFlags::reset().transition::<()>(None), LoaderTransition::Reset);
    }

    #[test]
    fn meta_wire_shape() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_value(LoaderMeta::load(CURRENCIES))?,
            json!({"entityType": "currencies", "loader": {"load": true}})
        );
        assert_eq!(
            serde_json::to_value(LoaderMeta::fail(CURRENCIES, out_of_stock()))?,
            json!({"entityType": "currencies", "loader": {"error": {"message": "out of stock", "status": 400}}})
        );
        assert_eq!(
            serde_json::to_value(LoaderMeta::reset(CURRENCIES))?,
            json!({"entityType": "currencies", "loader": {}})
        );

        let decoded: LoaderMeta =
            serde_json::from_value(json!({"entityType": "currencies", "loader": {"error": true}}))?;
        assert_eq!(decoded.loader, Some(LoaderFlags::fail(LoaderError::Flag(true))));
        Ok(())
    }

    #[test]
    #[allow(deprecated)]
    fn fail_without_error_depends_on_strictness() {
        let lenient = LoaderMeta::fail_without_error(CURRENCIES, &ErrorHandlingConfig::lenient());
        assert!(matches!(
            lenient,
            Ok(LoaderMeta { loader: Some(LoaderFlags { error: Some(LoaderError::Flag(true)), .. }), .. })
        ));

        let strict = LoaderMeta::fail_without_error(CURRENCIES, &ErrorHandlingConfig::strict());
        assert!(matches!(strict, Err(StateError::ErrorRequired { .. })));
    }

    #[test]
    fn sentinel_error_is_stored_as_true() {
        let mut state: LoaderState<()> = LoaderState::default();
        state.apply(LoaderTransition::Fail(LoaderError::Flag(true)));
        assert!(state.error.is_error());
        assert_eq!(state.error.payload(), None);
    }
}
