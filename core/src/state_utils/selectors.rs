//! Read-side accessors over entity state.
//!
//! Every selector has a defined answer for an id that was never touched:
//! not loading, no success, no error, no value, zero processes, stable.

use super::entity::EntityState;
use super::loader::LoaderError;
use super::processes::ProcessesLoaderState;

static NO_ERROR: LoaderError = LoaderError::NONE;

/// Sub-state of `id`
#[must_use]
pub fn get_entity<'a, T>(
    state: &'a EntityState<ProcessesLoaderState<T>>,
    id: &str,
) -> Option<&'a ProcessesLoaderState<T>> {
    state.get(id)
}

/// A load of `id` is in flight
#[must_use]
pub fn get_loading<T>(state: &EntityState<ProcessesLoaderState<T>>, id: &str) -> bool {
    state.get(id).is_some_and(|entity| entity.loader.loading)
}

/// The last transition of `id` was a success
#[must_use]
pub fn get_success<T>(state: &EntityState<ProcessesLoaderState<T>>, id: &str) -> bool {
    state.get(id).is_some_and(|entity| entity.loader.success)
}

/// Error slot of `id`; [`LoaderError::NONE`] when untouched
#[must_use]
pub fn get_error<'a, T>(state: &'a EntityState<ProcessesLoaderState<T>>, id: &str) -> &'a LoaderError {
    state.get(id).map_or(&NO_ERROR, |entity| &entity.loader.error)
}

/// Last loaded value of `id`
#[must_use]
pub fn get_value<'a, T>(state: &'a EntityState<ProcessesLoaderState<T>>, id: &str) -> Option<&'a T> {
    state.get(id).and_then(|entity| entity.loader.value.as_ref())
}

/// Commands in flight against `id`
#[must_use]
pub fn get_processes_count<T>(state: &EntityState<ProcessesLoaderState<T>>, id: &str) -> u32 {
    state.get(id).map_or(0, |entity| entity.processes_count)
}

/// At least one command is in flight against `id`
#[must_use]
pub fn has_pending_processes<T>(state: &EntityState<ProcessesLoaderState<T>>, id: &str) -> bool {
    get_processes_count(state, id) > 0
}

/// No command in flight and no load running for `id`
#[must_use]
pub fn is_stable<T>(state: &EntityState<ProcessesLoaderState<T>>, id: &str) -> bool {
    state.get(id).is_none_or(ProcessesLoaderState::is_stable)
}

/// Number of resets `id` has seen
#[must_use]
pub fn get_generation<T>(state: &EntityState<ProcessesLoaderState<T>>, id: &str) -> u64 {
    state.get(id).map_or(0, |entity| entity.generation)
}
