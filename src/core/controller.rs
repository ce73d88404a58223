use std::sync::Arc;
use axum::http::StatusCode;
use axum::Json;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::election::ElectionResult;
use crate::core::repository::RepositoryStore;
use crate::registry::domain::PartyService;
use crate::registry::dto::GenericOutput;
use crate::registry::factory::create_party_service;

// AppState is built once at startup so the store and its clients outlive single requests.
#[derive(Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) service: Arc<dyn PartyService>,
}

impl AppState {
    pub async fn new(config: Configuration, store: RepositoryStore) -> ElectionResult<AppState> {
        let service = create_party_service(&config, store).await?;
        Ok(AppState::with_service(config, service))
    }

    pub(crate) fn with_service(config: Configuration, service: Arc<dyn PartyService>) -> AppState {
        AppState {
            config,
            service,
        }
    }
}

pub(crate) type ServerError = (StatusCode, Json<GenericOutput>);

pub(crate) fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, Json(GenericOutput::failure(format!("{}", err).as_str(), None)))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Validation { .. } |
            CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::DuplicateKey { .. } |
            CommandError::Conflict { .. } => StatusCode::CONFLICT,
            CommandError::Remote { .. } => StatusCode::BAD_GATEWAY,
            CommandError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            CommandError::Database { .. } |
            CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(GenericOutput::failure(err.message(), err.reason_code())))
    }
}
