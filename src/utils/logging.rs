use tracing::Level;

// Installs the JSON subscriber. Unknown levels fall back to info.
pub fn setup_tracing(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        // module names add noise to every line
        .with_target(false)
        // ANSI color codes show up as garbage in CloudWatch logs
        .with_ansi(false)
        // CloudWatch adds the ingestion time
        .without_time()
        .json()
        .try_init();
}

pub(crate) fn parse_level(level: &str) -> Level {
    level.trim().parse::<Level>().unwrap_or(Level::INFO)
}
