//! Upstream Todoist API binding
//!
//! - **client**: `TodoistApi` trait and the reqwest-backed `TodoistClient`
//! - **fields**: partial-record builder, query encoding, move destinations
//! - **error**: the single error type for transport and command failures

mod client;
mod error;
mod fields;


pub use client::{
    DEFAULT_API_URL, DEFAULT_SYNC_PATH, TodoistApi, TodoistClient, check_sync_status,
};
#[cfg(test)]
pub use client::MockTodoistApi;
pub use error::{ApiError, ApiResult};
pub use fields::{Destination, Fields, JsonObject, is_truthy, query_pairs, resource_path};
