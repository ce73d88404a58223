use std::env;
use lambda_http::{run, Error};
use tracing::info;
use election_party::core::controller::AppState;
use election_party::core::domain::Configuration;
use election_party::core::repository::RepositoryStore;
use election_party::registry::controller::routes;
use election_party::utils::logging::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env();
    setup_tracing(config.log_level.as_str());

    let store = RepositoryStore::from(env::var("PARTY_STORE").unwrap_or_else(|_| "local".to_string()));
    if store != RepositoryStore::DynamoDB {
        // outside Lambda the runtime API is served by the local emulator
        env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        if env::var("AWS_LAMBDA_RUNTIME_API").is_err() {
            env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        }
    }
    info!(env = config.env.as_str(), store = %store,
        candidate_service_url = config.candidate_service_url.as_str(), "starting party service");

    let state = AppState::new(config, store).await?;
    run(routes(state)).await
}
