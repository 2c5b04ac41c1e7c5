//! Property-based testing utilities using proptest.

use proptest::prelude::*;

/// One step of a schedule of overlapping commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStep {
    /// Command `n` starts
    Start(usize),
    /// Command `n` finishes
    Finish(usize),
}

/// Interleavings of up to `max_ops` commands, each started once and
/// finished once after its start, completing in arbitrary order.
pub fn paired_process_schedule(max_ops: usize) -> impl Strategy<Value = Vec<ProcessStep>> {
    (1..=max_ops.max(1)).prop_flat_map(|ops| {
        proptest::collection::vec((any::<bool>(), any::<usize>()), ops * 2)
            .prop_map(move |choices| schedule_from_choices(ops, &choices))
    })
}

/// Build a valid schedule for `ops` commands from random choices.
///
/// Each choice either starts the next command or finishes one of the
/// running ones, picked by index.
fn schedule_from_choices(ops: usize, choices: &[(bool, usize)]) -> Vec<ProcessStep> {
    let mut steps = Vec::with_capacity(ops * 2);
    let mut next = 0;
    let mut running: Vec<usize> = Vec::new();

    for &(prefer_start, pick) in choices {
        if next < ops && (running.is_empty() || prefer_start) {
            steps.push(ProcessStep::Start(next));
            running.push(next);
            next += 1;
        } else if !running.is_empty() {
            let op = running.swap_remove(pick % running.len());
            steps.push(ProcessStep::Finish(op));
        }
    }

    steps
}
