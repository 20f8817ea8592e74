use std::sync::Arc;

use crate::{config::Config, repos::Repos, services::ContactDispatcher, stores::Stores};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Database repositories.
    pub repos: Repos,
    /// Process-local stores (rate limiter).
    pub stores: Stores,
    /// Contact form relay.
    pub dispatcher: Arc<ContactDispatcher>,
}
