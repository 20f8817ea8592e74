//! Rate limiting extractor for submission endpoints.
//!
//! Usage: Add `RateLimitedClient` as an extractor parameter to count the
//! request against the client's sliding window. Requests over the limit are
//! rejected with 429 before the handler body (and its JSON extraction) runs.
//!
//! ```ignore
//! async fn my_handler(client: RateLimitedClient, ...) -> ... {
//!     // client.ip is available here
//! }
//! ```
//!
//! The client key is the peer address of the TCP connection, so the server
//! must be served with `into_make_service_with_connect_info::<SocketAddr>()`.

use std::net::{IpAddr, SocketAddr};

use axum::{
    RequestPartsExt,
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use chrono::Utc;

use crate::{error::AppError, state::AppState, stores::RateLimitResult};

/// A client that has been admitted by the rate limiter.
pub struct RateLimitedClient {
    pub ip: IpAddr,
}

impl FromRequestParts<AppState> for RateLimitedClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ConnectInfo(addr) = parts
            .extract::<ConnectInfo<SocketAddr>>()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("client address unavailable: {e}")))?;
        let ip = addr.ip();

        match state.stores.rate_limiter.check(&ip.to_string(), Utc::now()) {
            RateLimitResult::Allowed(_) => Ok(RateLimitedClient { ip }),
            RateLimitResult::Exceeded {
                limit,
                window_secs,
                retry_after_secs,
            } => {
                tracing::warn!(ip = %ip, limit, window_secs, "rate limit exceeded");
                Err(AppError::RateLimited {
                    limit,
                    window_secs,
                    retry_after_secs,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        extract::connect_info::MockConnectInfo,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::stores::{MockRateLimiter, SlidingWindowLimiter, Stores};
    use crate::test_utils::TestStateBuilder;

    async fn admitted(client: RateLimitedClient) -> String {
        client.ip.to_string()
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/submit", post(admitted))
            .with_state(state)
            .layer(MockConnectInfo(SocketAddr::from(([203, 0, 113, 7], 4242))))
    }

    fn submit() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn admits_under_limit_and_rejects_over_it() {
        let mut state = TestStateBuilder::new().build();
        state.stores = Stores {
            rate_limiter: Arc::new(SlidingWindowLimiter::new(2, 60)),
        };
        let app = app(state);

        for _ in 0..2 {
            let response = app.clone().oneshot(submit()).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(submit()).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn keys_on_peer_ip() {
        let mut limiter = MockRateLimiter::new();
        limiter
            .expect_check()
            .withf(|key, _| key == "203.0.113.7")
            .times(1)
            .returning(|_, _| RateLimitResult::Allowed(1));

        let state = TestStateBuilder::new().with_rate_limiter(limiter).build();

        let response = app(state).oneshot(submit()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_connect_info_is_a_server_error() {
        let mut limiter = MockRateLimiter::new();
        limiter.expect_check().never();
        let state = TestStateBuilder::new().with_rate_limiter(limiter).build();

        let app = Router::new()
            .route("/submit", post(admitted))
            .with_state(state);

        let response = app.oneshot(submit()).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
