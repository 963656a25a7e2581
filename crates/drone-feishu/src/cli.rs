use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// drone-feishu – post Drone build results to a Feishu/Lark bot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Plugin settings used when no subcommand is given
    #[command(flatten)]
    pub send: SendArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign and post the build card (default)
    Send(SendArgs),
    /// Print the signed request body instead of posting it
    Preview(SendArgs),
    /// Print build information
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Plugin settings; each one can come from a flag or a `PLUGIN_*` variable.
#[derive(Args, Debug, Clone, Default)]
pub struct SendArgs {
    /// Bot webhook URL
    #[arg(long, env = "PLUGIN_WEBHOOK", hide_env_values = true)]
    pub webhook: Option<String>,

    /// Bot signing secret
    #[arg(long, env = "PLUGIN_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Log request and response bodies
    #[arg(long, env = "PLUGIN_DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,

    /// Label markup used in the card body
    #[arg(
        long,
        env = "PLUGIN_STYLE",
        value_enum,
        ignore_case = true,
        default_value_t = RenderStyle::Plain
    )]
    pub style: RenderStyle,

    /// How the card links to the build page
    #[arg(
        long,
        env = "PLUGIN_FOOTER",
        value_enum,
        ignore_case = true,
        default_value_t = FooterStyle::Button
    )]
    pub footer: FooterStyle,

    /// Request timeout in seconds
    #[arg(long, env = "PLUGIN_TIMEOUT", value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Fail when the webhook rejects the message
    #[arg(long, env = "PLUGIN_STRICT", value_parser = FalseyValueParser::new())]
    pub strict: bool,

    /// Exit 0 even when the notification could not be sent
    #[arg(long, env = "PLUGIN_SOFT_FAIL", value_parser = FalseyValueParser::new())]
    pub soft_fail: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderStyle {
    /// Bold labels with emoji icons
    #[default]
    Plain,
    /// Colored `text_tag` labels
    Rich,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FooterStyle {
    /// A primary button to the build, then a static note
    #[default]
    Button,
    /// No button; the note links to the build
    Link,
}

impl Cli {
    /// Settings for the send/preview path, preferring the subcommand's own.
    pub fn send_args(&self) -> &SendArgs {
        match &self.command {
            Some(Commands::Send(args)) | Some(Commands::Preview(args)) => args,
            _ => &self.send,
        }
    }
}
