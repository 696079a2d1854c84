use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};

pub const BASE_URL_ENV: &str = "PINHOLE_BASE_URL";
pub const LOG_FILTER_ENV: &str = "PINHOLE_LOG";
pub const LOG_FORMAT_ENV: &str = "PINHOLE_LOG_FORMAT";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pinhole", about = "Base62 short codes for URLs")]
pub struct CLI {
    #[arg(long, global = true, env = LOG_FILTER_ENV, default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    #[arg(
        long,
        global = true,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the short code for a decimal identifier.
    Encode { identifier: String },

    /// Print the identifier a short code stands for.
    Decode { token: String },

    /// Check whether a custom short code would be accepted.
    Check {
        token: String,

        /// Short codes to treat as already in use.
        #[arg(long = "taken")]
        taken: Vec<String>,
    },

    /// Shorten a URL against a fresh in-memory store.
    Shorten {
        url: String,

        #[arg(long)]
        alias: Option<String>,

        #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Short codes to treat as already in use.
        #[arg(long = "taken")]
        taken: Vec<String>,
    },
}
