//! Task-local trace id propagation.
//!
//! The request-trace middleware scopes each request future with the
//! trace id it minted; anything running inside that scope (handlers,
//! services, error rendering) can read the id without threading it
//! through arguments.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Runs `f` with `trace_id` installed as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, f: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, f).await
}

/// Returns the current trace id, or `None` outside a request scope.
pub fn trace_id() -> Option<String> {
    TRACE_ID.try_with(|id| id.clone()).ok()
}
