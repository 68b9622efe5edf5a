use clap::Parser;

/// swishbot — terminal driver for the Swish support chat widget.
#[derive(Parser, Debug)]
#[command(name = "swishbot", version, about)]
pub struct Args {
    /// Chat backend origin (defaults to SWISH_CHAT_URL or the local build).
    #[arg(short = 'u', long)]
    pub backend_url: Option<String>,

    /// Bearer token override; skips the stored-credentials lookup.
    #[arg(long)]
    pub token: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
