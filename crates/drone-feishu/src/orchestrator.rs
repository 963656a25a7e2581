use tracing::info;

use crate::card::SignedEnvelope;
use crate::cli::SendArgs;
use crate::config::Config;
use crate::context::BuildContext;
use crate::error::Result;
use crate::sink::{sink_for, Delivery, Mode, Sink};

/// Validate settings, build the card and hand it to the sink for `mode`.
///
/// Configuration is checked before anything else, so a missing webhook or
/// secret never reaches the network.
pub async fn notify(args: &SendArgs, build: BuildContext, mode: Mode) -> Result<Delivery> {
    let config = Config::new(args, build)?;
    let sink = sink_for(&config, mode)?;
    run(&config, sink.as_ref(), chrono::Utc::now().timestamp()).await
}

/// Sign the card for `config` at `timestamp` and deliver it once.
pub async fn run(config: &Config, sink: &dyn Sink, timestamp: i64) -> Result<Delivery> {
    let envelope = SignedEnvelope::new(config, timestamp);
    info!(
        repo = %config.build.repo_name,
        build = %config.build.build_number,
        status = %config.build.build_status,
        "sending build card"
    );
    sink.deliver(&envelope).await
}
