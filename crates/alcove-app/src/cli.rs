use clap::Parser;

/// Alcove — one window for all your web services.
#[derive(Parser, Debug)]
#[command(name = "alcove", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
