//! Id-keyed entity state and the generic entity reducer.
//!
//! Entity actions carry [`EntityMeta`]: the entity type, the targeted id(s)
//! and the loader and process transitions to apply. One
//! [`EntityLoaderReducer`] per entity type applies every matching meta to its
//! [`EntityState`], creating sub-states lazily on first use.

use super::loader::{missing_error_payload, LoaderFlags};
use super::processes::{ProcessTransition, ProcessesLoaderState};
use crate::config::ErrorHandlingConfig;
use crate::error::{HttpErrorModel, StateError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Target of an entity transition
///
/// Serializes as a string, an array of strings, or `null` for every id
/// currently present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// A single id
    One(String),
    /// Several ids; a list payload is partitioned across them by position
    Many(Vec<String>),
    /// Every id currently present in the state
    All,
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::One(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::One(id)
    }
}

impl From<Vec<String>> for EntityId {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

/// Transition metadata for keyed state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    /// Namespace of the resource
    pub entity_type: String,
    /// Targeted id(s)
    pub entity_id: EntityId,
    /// Loader transition; absent means none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<LoaderFlags>,
    /// A command against the id started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes_count_increment: Option<bool>,
    /// A command against the id finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes_count_decrement: Option<bool>,
    /// Clear loader and counter of the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processes_count_reset: Option<bool>,
    /// Generation the originating command started under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}

impl EntityMeta {
    /// Meta targeting `entity_id` with no transition yet
    #[must_use]
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<EntityId>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            loader: None,
            processes_count_increment: None,
            processes_count_decrement: None,
            processes_count_reset: None,
            generation: None,
        }
    }

    /// LOAD transition
    #[must_use]
    pub fn load(entity_type: impl Into<String>, entity_id: impl Into<EntityId>) -> Self {
        Self::new(entity_type, entity_id).with_loader(LoaderFlags::load())
    }

    /// SUCCESS transition
    #[must_use]
    pub fn success(entity_type: impl Into<String>, entity_id: impl Into<EntityId>) -> Self {
        Self::new(entity_type, entity_id).with_loader(LoaderFlags::success())
    }

    /// FAIL transition carrying an error payload
    #[must_use]
    pub fn fail(
        entity_type: impl Into<String>,
        entity_id: impl Into<EntityId>,
        error: HttpErrorModel,
    ) -> Self {
        Self::new(entity_type, entity_id).with_loader(LoaderFlags::fail(error.into()))
    }

    /// FAIL transition without an error payload
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ErrorRequired`] when `config` is strict.
    #[deprecated(note = "pass the normalized error to `EntityMeta::fail`")]
    pub fn fail_without_error(
        entity_type: impl Into<String>,
        entity_id: impl Into<EntityId>,
        config: &ErrorHandlingConfig,
    ) -> Result<Self, StateError> {
        let meta = Self::new(entity_type, entity_id);
        let error = missing_error_payload(&meta.entity_type, config)?;
        Ok(meta.with_loader(LoaderFlags::fail(error)))
    }

    /// RESET transition
    #[must_use]
    pub fn reset(entity_type: impl Into<String>, entity_id: impl Into<EntityId>) -> Self {
        Self::new(entity_type, entity_id).with_loader(LoaderFlags::reset())
    }

    /// INCREMENT of the process counter
    #[must_use]
    pub fn processes_increment(
        entity_type: impl Into<String>,
        entity_id: impl Into<EntityId>,
    ) -> Self {
        Self::new(entity_type, entity_id).with_process_increment()
    }

    /// DECREMENT of the process counter
    #[must_use]
    pub fn processes_decrement(
        entity_type: impl Into<String>,
        entity_id: impl Into<EntityId>,
    ) -> Self {
        Self::new(entity_type, entity_id).with_process_decrement()
    }

    /// Clear loader and process counter
    #[must_use]
    pub fn processes_reset(entity_type: impl Into<String>, entity_id: impl Into<EntityId>) -> Self {
        let mut meta = Self::new(entity_type, entity_id);
        meta.processes_count_reset = Some(true);
        meta
    }

    /// Set the loader transition
    #[must_use]
    pub fn with_loader(mut self, flags: LoaderFlags) -> Self {
        self.loader = Some(flags);
        self
    }

    /// Add an INCREMENT
    #[must_use]
    pub const fn with_process_increment(mut self) -> Self {
        self.processes_count_increment = Some(true);
        self
    }

    /// Add a DECREMENT
    #[must_use]
    pub const fn with_process_decrement(mut self) -> Self {
        self.processes_count_decrement = Some(true);
        self
    }

    /// Tag with the generation the originating command started under
    #[must_use]
    pub const fn with_generation(mut self, generation: Option<u64>) -> Self {
        self.generation = generation;
        self
    }

    /// Decode the process transition, if any (reset, then increment, then decrement)
    #[must_use]
    pub fn process_transition(&self) -> Option<ProcessTransition> {
        if self.processes_count_reset == Some(true) {
            Some(ProcessTransition::Reset)
        } else if self.processes_count_increment == Some(true) {
            Some(ProcessTransition::Increment)
        } else if self.processes_count_decrement == Some(true) {
            Some(ProcessTransition::Decrement {
                generation: self.generation,
            })
        } else {
            None
        }
    }
}

/// Value(s) carried by an entity action
#[derive(Debug, Clone, PartialEq)]
pub enum EntityPayload<T> {
    /// No value
    None,
    /// One value, applied to every targeted id
    One(T),
    /// One value per targeted id, by position
    Many(Vec<T>),
}

/// Id-keyed collection of per-entity sub-states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState<S> {
    /// Sub-state per id
    pub entities: HashMap<String, S>,
}

impl<S> Default for EntityState<S> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }
}

impl<S> EntityState<S> {
    /// Sub-state of `id`, if it was ever touched
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&S> {
        self.entities.get(id)
    }

    /// Ids present, sorted
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of ids present
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// No id present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Applies [`EntityMeta`] of one entity type to an [`EntityState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLoaderReducer {
    entity_type: &'static str,
}

impl EntityLoaderReducer {
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
    /// For each targeted id the loader transition is applied first, then the
    /// process transition. A meta tagged with a generation other than the
    /// id's current one is skipped for that id. Returns whether the meta
    /// targeted this entity type.
    pub fn reduce<T: Clone>(
        &self,
        state: &mut EntityState<ProcessesLoaderState<T>>,
        meta: &EntityMeta,
        payload: EntityPayload<T>,
    ) -> bool {
        if meta.entity_type != self.entity_type {
            return false;
        }

        let ids: Vec<String> = match &meta.entity_id {
            EntityId::One(id) => vec![id.clone()],
            EntityId::Many(ids) => ids.clone(),
            EntityId::All => state.ids().into_iter().map(str::to_string).collect(),
        };
        let values = self.partition(ids.len(), payload);
        let process = meta.process_transition();

        for (id, value) in ids.into_iter().zip(values) {
            let entity = state.entities.entry(id).or_default();

            if meta
                .generation
                .is_some_and(|generation| generation != entity.generation)
            {
                tracing::debug!(
                    entity_type = self.entity_type,
                    "Skipping transition from before the last reset"
                );
                continue;
            }

            if let Some(flags) = &meta.loader {
                entity.apply_loader(flags.transition(value));
            }
            if let Some(transition) = process {
                entity.apply_process(transition);
            }
        }

        true
    }

    fn partition<T: Clone>(&self, count: usize, payload: EntityPayload<T>) -> Vec<Option<T>> {
        match payload {
            EntityPayload::None => (0..count).map(|_| None).collect(),
            EntityPayload::One(value) => vec![Some(value); count],
            EntityPayload::Many(values) => {
                if values.len() != count {
                    tracing::warn!(
                        entity_type = self.entity_type,
                        ids = count,
                        values = values.len(),
                        "Payload length does not match targeted ids"
                    );
                }
                values
                    .into_iter()
                    .map(Some)
                    .chain(std::iter::repeat_with(|| None))
                    .take(count)
                    .collect()
            },
        }
    }
}
