//! Check-in domain - a user's record of one emotional state.

mod check_in;
mod outcome;

pub use check_in::{CheckIn, CheckInSummary, NewCheckIn};
pub use outcome::{CheckInOutcome, SideEffectReport, StepStatus, SAVE_FAILED_MESSAGE};
