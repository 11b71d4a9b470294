// This module groups time entry domain components.
//
// Structure
// - model.rs: the stored entry and its review status
// - decider/: pure validation turning a create command into a new entry
// - transitions.rs: pure approve, reject and patch transitions
// - legacy_hours.rs: total hours derived from an hours-from/hours-to range

pub mod legacy_hours;
pub mod model;
pub mod transitions;
pub mod decider {
    pub mod create {
        pub mod command;
        pub mod decide;
    }
}
