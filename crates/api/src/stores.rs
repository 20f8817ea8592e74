//! Ephemeral, process-local stores.
//!
//! Nothing here is persisted; all state is lost on restart.
//!
//! ## Stores
//!
//! - **rate_limit** - Sliding window request timestamps per client address
//!
//! ## Usage in Handlers
//!
//! Stores are accessed via `state.stores`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let result = state.stores.rate_limiter.check(&client_key, Utc::now());
//! }
//! ```

mod rate_limit;

pub use rate_limit::{RateLimitResult, RateLimiter, SlidingWindowLimiter};

#[cfg(test)]
pub use rate_limit::MockRateLimiter;

use std::sync::Arc;

/// Collection of all ephemeral stores.
#[derive(Clone)]
pub struct Stores {
    pub rate_limiter: Arc<dyn RateLimiter>,
}
