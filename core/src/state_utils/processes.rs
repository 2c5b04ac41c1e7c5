//! Per-id counters of in-flight commands.
//!
//! A boolean `loading` flag cannot describe two overlapping commands against
//! the same aggregate: the first completion would mark it idle while the second
//! is still running. Each command increments the counter when it starts and
//! decrements it exactly once when it ends, so the id stays busy until the last
//! one finishes, in whatever order they complete.
//!
//! Decrements saturate at zero. Duplicate or out-of-order terminal actions are
//! tolerated, never reported as errors.
//!
//! Every reset of an id bumps its `generation`. Commands remember the
//! generation they started under; a decrement tagged with an older generation
//! belongs to work that was reset away and is ignored.

use super::loader::{LoaderState, LoaderTransition};
use serde::{Deserialize, Serialize};

/// Loader state plus in-flight command counter for one id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessesLoaderState<T> {
    /// Load/success/error/value of the id
    #[serde(flatten)]
    pub loader: LoaderState<T>,
    /// Commands started and not yet finished
    pub processes_count: u32,
    /// Number of resets this id has seen
    pub generation: u64,
}

impl<T> Default for ProcessesLoaderState<T> {
    fn default() -> Self {
        Self {
            loader: LoaderState::default(),
            processes_count: 0,
            generation: 0,
        }
    }
}

/// A decoded process counter transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessTransition {
    /// A command started
    Increment,
    /// A command finished; `generation` is the one it started under, if tagged
    Decrement {
        /// Generation captured when the command started
        generation: Option<u64>,
    },
    /// Clear the loader and the counter
    Reset,
}

impl<T> ProcessesLoaderState<T> {
    /// Apply a loader transition; a loader reset also resets the counter
    pub fn apply_loader(&mut self, transition: LoaderTransition<T>) {
        if matches!(transition, LoaderTransition::Reset) {
            self.reset();
        } else {
            self.loader.apply(transition);
        }
    }

    /// Apply a counter transition.
    ///
    /// Returns `false` when a decrement was ignored because its generation is
    /// stale.
    pub fn apply_process(&mut self, transition: ProcessTransition) -> bool {
        match transition {
            ProcessTransition::Increment => {
                self.processes_count = self.processes_count.saturating_add(1);
            },
            ProcessTransition::Decrement { generation } => {
                if generation.is_some_and(|generation| generation != self.generation) {
                    tracing::debug!(
                        command_generation = generation,
                        current_generation = self.generation,
                        "Ignoring decrement from before the last reset"
                    );
                    return false;
                }
                if self.processes_count == 0 {
                    tracing::debug!("Process counter already at zero, clamping decrement");
                }
                self.processes_count = self.processes_count.saturating_sub(1);
            },
            ProcessTransition::Reset => self.reset(),
        }
        true
    }

    /// Clear loader and counter, starting a new generation
    pub fn reset(&mut self) {
        self.loader = LoaderState::default();
        self.processes_count = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// At least one command is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.processes_count > 0
    }

    /// No command in flight and no load running
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !self.is_busy() && !self.loader.loading
    }
}
