//! HTTP API module for the KPI engine.
//!
//! This module provides the REST endpoints for the record lifecycle,
//! reward computation, batch assignment and adjustment management.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AdjustmentRequest, BatchAssignRequest, DecisionRequest, ProgressRequest, RewardRequest,
    SubmitRequest,
};
pub use response::{ApiError, KpiRecordView};
pub use state::AppState;
