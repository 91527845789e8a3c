use std::sync::Arc;

use crate::controllers::token::TokenController;
use crate::core::config::{self, Args};
use crate::core::error::ConfigError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api_key: Arc<str>,
    pub(crate) token_controller: TokenController,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("api_key", &"<redacted>")
            .field("token_controller", &self.token_controller)
            .finish()
    }
}

impl AppState {
    pub(crate) fn new(api_key: &str, token_controller: TokenController) -> Self {
        AppState {
            api_key: Arc::from(api_key),
            token_controller,
        }
    }

    pub(crate) fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let secret = config::resolve_secret(args.secret.clone())?;

        let token_controller =
            TokenController::new(&secret, args.token_ttl(), args.sweep_interval());

        Ok(AppState::new(&args.api_key, token_controller))
    }
}
