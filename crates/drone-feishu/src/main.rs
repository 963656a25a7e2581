use clap::Parser;
use tokio::runtime::Runtime;
use tracing::{error, warn};

use drone_feishu::cli::{Cli, Commands};
use drone_feishu::context::BuildContext;
use drone_feishu::logging::setup_logging;
use drone_feishu::orchestrator::notify;
use drone_feishu::sink::Mode;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mode = match &cli.command {
        Some(Commands::Version { json }) => return print_version(*json),
        Some(Commands::Preview(_)) => Mode::Preview,
        Some(Commands::Send(_)) | None => Mode::Send,
    };
    let args = cli.send_args();
    setup_logging(cli.verbose, args.debug);

    let rt = Runtime::new()?;
    if let Err(e) = rt.block_on(notify(args, BuildContext::from_env(), mode)) {
        println!("{e}");
        error!(error = %e, "notification not sent");
        if args.soft_fail {
            warn!("soft fail enabled, exiting successfully");
            return Ok(());
        }
        std::process::exit(e.exit_code());
    }
    Ok(())
}

fn print_version(json: bool) -> anyhow::Result<()> {
    if json {
        let info = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "commit": option_env!("GIT_SHA").unwrap_or("unknown"),
            "build_date": option_env!("BUILD_DATE").unwrap_or("unknown"),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "drone-feishu {} (commit: {}, built: {})",
            env!("CARGO_PKG_VERSION"),
            option_env!("GIT_SHA").unwrap_or("unknown"),
            option_env!("BUILD_DATE").unwrap_or("unknown"),
        );
    }
    Ok(())
}
