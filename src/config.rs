use crate::cpg::DEFAULT_TRACK_WINDOW;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cpg-predictor")]
#[command(about = "CpG density predictor for the genomic prediction API")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "CPG_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CPG_PORT", default_value = "5000")]
    pub port: u16,

    /// Sliding window width in bases for track readouts
    #[arg(
        long,
        env = "CPG_TRACK_WINDOW",
        default_value_t = NonZeroUsize::new(DEFAULT_TRACK_WINDOW).unwrap_or(NonZeroUsize::MIN)
    )]
    pub track_window: NonZeroUsize,

    /// JSON document served by /help instead of the built-in description
    #[arg(long, env = "CPG_HELP_FILE")]
    pub help_file: Option<PathBuf>,

    /// Enable CORS for all origins
    #[arg(long, env = "CPG_CORS", default_value = "true")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes
    #[arg(long, env = "CPG_MAX_PAYLOAD", default_value = "104857600")]
    pub max_payload: usize,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
