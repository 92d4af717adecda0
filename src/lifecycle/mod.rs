//! KPI record lifecycle: progress arithmetic and state transitions.
//!
//! The lifecycle is `not_started -> in_progress -> completed ->
//! pending_approval -> {approved | rejected}`, with rejection looping back
//! through resubmission. Overdue is a derived read-time condition on the
//! record model, not a stored status.

mod progress;
mod transitions;

pub use progress::{COMPLETION_THRESHOLD, advance_status, compute_progress};
pub use transitions::{Decision, decide, record_progress, submit};
