use axum::{
    body::HttpBody,
    extract::{Path, State},
    response::Json,
    routing::get,
    BoxError, Router,
};
use serde_json::Value;
use tracing::debug;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::registry::command::add_party_cmd::{AddPartyCommand, AddPartyCommandRequest, AddPartyCommandResponse};
use crate::registry::command::get_all_parties_cmd::{GetAllPartiesCommand, GetAllPartiesCommandRequest, GetAllPartiesCommandResponse};
use crate::registry::command::get_party_cmd::{GetPartyCommand, GetPartyCommandRequest, GetPartyCommandResponse};
use crate::registry::command::remove_party_cmd::{RemovePartyCommand, RemovePartyCommandRequest, RemovePartyCommandResponse};
use crate::registry::command::update_party_cmd::{UpdatePartyCommand, UpdatePartyCommandRequest, UpdatePartyCommandResponse};
use crate::registry::dto::PartyInput;

pub fn routes<B>(state: AppState) -> Router<(), B>
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    Router::new()
        .route("/v1/party/", get(get_all_parties).post(add_party))
        .route("/v1/party/:id",
               get(get_party).put(update_party).delete(remove_party))
        .with_state(state)
}

pub(crate) async fn get_all_parties(
    State(state): State<AppState>) -> Result<Json<GetAllPartiesCommandResponse>, ServerError> {
    let res = GetAllPartiesCommand::new(state.service).execute(GetAllPartiesCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn get_party(
    State(state): State<AppState>,
    Path(party_id): Path<String>) -> Result<Json<GetPartyCommandResponse>, ServerError> {
    let req = GetPartyCommandRequest { party_id };
    let res = GetPartyCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_party(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddPartyCommandResponse>, ServerError> {
    let req: AddPartyCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    debug!(env = state.config.env.as_str(), code = req.party.code.as_str(), "adding party");
    let res = AddPartyCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_party(
    State(state): State<AppState>,
    Path(party_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdatePartyCommandResponse>, ServerError> {
    let party: PartyInput = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let req = UpdatePartyCommandRequest::new(party_id.as_str(), party);
    let res = UpdatePartyCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_party(
    State(state): State<AppState>,
    Path(party_id): Path<String>) -> Result<Json<RemovePartyCommandResponse>, ServerError> {
    let req = RemovePartyCommandRequest { party_id };
    let res = RemovePartyCommand::new(state.service).execute(req).await?;
    Ok(Json(res))
}
