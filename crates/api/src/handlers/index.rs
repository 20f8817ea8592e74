use axum::{Json, Router, extract::State, routing::get};
use shared::api::MessageResponse;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(greeting))
}

async fn greeting(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello from the {} API!", state.config.company_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestStateBuilder;

    #[tokio::test]
    async fn greeting_names_the_company() {
        let state = TestStateBuilder::new().build();

        let Json(body) = greeting(State(state)).await;

        assert_eq!(body.message, "Hello from the Test Carpentry API!");
    }
}
