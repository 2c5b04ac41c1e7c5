//! Action plumbing shared by all features.
//!
//! Feature actions are closed enums. Each variant has a stable type string
//! (via `#[derive(Action)]`) and may carry loader or entity metadata that the
//! generic reducers in [`crate::state_utils`] apply. [`envelope`] renders an
//! action in the `{ type, payload, meta }` form used for logging and
//! cross-process transfer.

use crate::error::StateError;
use crate::state_utils::entity::EntityMeta;
use crate::state_utils::loader::LoaderMeta;
use serde::Serialize;

/// User id the backend assigns to unauthenticated callers
pub const OCC_USER_ID_ANONYMOUS: &str = "anonymous";

/// User id alias for the authenticated caller
pub const OCC_USER_ID_CURRENT: &str = "current";

/// Whether a user id denotes an anonymous caller
#[must_use]
pub fn is_anonymous(user_id: &str) -> bool {
    user_id == OCC_USER_ID_ANONYMOUS
}

/// An action with a stable type string
///
/// Usually implemented with `#[derive(Action)]` from `storefront-macros`.
pub trait Action {
    /// Type string, e.g. `"[Cart-entry] Add Entry"`
    fn action_type(&self) -> &'static str;
}

/// Transition metadata attached to an action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionMeta {
    /// Transition on one or more ids of an entity type
    Entity(EntityMeta),
    /// Transition on a singleton resource
    Loader(LoaderMeta),
}

impl From<EntityMeta> for ActionMeta {
    fn from(meta: EntityMeta) -> Self {
        Self::Entity(meta)
    }
}

impl From<LoaderMeta> for ActionMeta {
    fn from(meta: LoaderMeta) -> Self {
        Self::Loader(meta)
    }
}

/// An action that may carry transition metadata
pub trait MetaAction: Action {
    /// The transition this action triggers, if any
    fn meta(&self) -> Option<ActionMeta>;
}

/// Serialized form of an action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionEnvelope {
    /// Action type string
    #[serde(rename = "type")]
    pub action_type: &'static str,
    /// Action payload; absent for payload-less actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    /// Transition metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ActionMeta>,
}

/// Render an action as `{ type, payload, meta }`
///
/// # Errors
///
/// Returns [`StateError::Serialization`] if the payload cannot be serialized.
pub fn envelope<A>(action: &A) -> Result<ActionEnvelope, StateError>
where
    A: MetaAction + Serialize,
{
    let payload = match serde_json::to_value(action)? {
        serde_json::Value::Null => None,
        value => Some(value),
    };

    Ok(ActionEnvelope {
        action_type: action.action_type(),
        payload,
        meta: action.meta(),
    })
}
