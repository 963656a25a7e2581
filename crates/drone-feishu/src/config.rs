use std::time::Duration;

use crate::cli::{FooterStyle, RenderStyle, SendArgs};
use crate::context::BuildContext;
use crate::error::{NotifyError, Result};

pub const ENV_WEBHOOK: &str = "PLUGIN_WEBHOOK";
pub const ENV_SECRET: &str = "PLUGIN_SECRET";

/// Everything one invocation needs, validated once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub webhook: String,
    pub secret: String,
    pub debug: bool,
    pub style: RenderStyle,
    pub footer: FooterStyle,
    pub timeout: Duration,
    pub strict: bool,
    pub build: BuildContext,
}

impl Config {
    /// Validate plugin settings and pair them with the build context.
    ///
    /// Fails on the first required setting that is missing or empty, webhook
    /// before secret.
    pub fn new(args: &SendArgs, build: BuildContext) -> Result<Self> {
        let webhook = required(args.webhook.as_deref(), ENV_WEBHOOK)?;
        let secret = required(args.secret.as_deref(), ENV_SECRET)?;

        Ok(Self {
            webhook,
            secret,
            debug: args.debug,
            style: args.style,
            footer: args.footer,
            timeout: Duration::from_secs(args.timeout),
            strict: args.strict,
            build,
        })
    }
}

fn required(value: Option<&str>, name: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(NotifyError::MissingConfig(name)),
    }
}
