use clap::{Parser, builder::BoolishValueParser};
use recreation_core::fetch::DEFAULT_FETCH_TIMEOUT;
use recreation_core::schema::CREATIVE_GOODS_TRADE_URL;
use recreation_mcp::server::{DEFAULT_MCP_HTTP_ADDR, DEFAULT_SSE_KEEP_ALIVE, DEFAULT_SSE_RETRY};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = DEFAULT_FETCH_TIMEOUT.as_secs();
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = DEFAULT_SSE_KEEP_ALIVE.as_secs();
const DEFAULT_SSE_RETRY_SECS: u64 = DEFAULT_SSE_RETRY.as_secs();

#[derive(Parser, Debug)]
#[command(
    name = "recreation-mcpd",
    version,
    about = "Hong Kong recreation open data MCP daemon."
)]
struct CliArgs {
    #[arg(
        long = "http",
        env = "RECREATION_MCP_HTTP",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    serve_http: bool,

    #[arg(long, env = "RECREATION_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "RECREATION_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateful: bool,

    /// Interval between SSE keep-alive pings; 0 disables them.
    #[arg(
        long,
        env = "RECREATION_MCP_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    /// Reconnect delay advertised to SSE clients; 0 omits it.
    #[arg(
        long,
        env = "RECREATION_MCP_SSE_RETRY_SECS",
        default_value_t = DEFAULT_SSE_RETRY_SECS
    )]
    sse_retry_secs: u64,

    #[arg(long, env = "RECREATION_DATASET_URL", default_value = CREATIVE_GOODS_TRADE_URL)]
    dataset_url: String,

    #[arg(
        long,
        env = "RECREATION_FETCH_TIMEOUT_SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS
    )]
    fetch_timeout_secs: u64,
}

/// Which MCP transport the daemon serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    StreamableHttp,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct RecreationConfig {
    pub transport: Transport,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateful: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
    pub dataset_url: String,
    pub fetch_timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl RecreationConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for RecreationConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let dataset_url = args.dataset_url.trim().to_string();
        if dataset_url.is_empty() {
            return Err(ConfigError::MissingSetting("RECREATION_DATASET_URL"));
        }
        if !(dataset_url.starts_with("https://") || dataset_url.starts_with("http://")) {
            return Err(ConfigError::InvalidSetting {
                name: "RECREATION_DATASET_URL",
                value: dataset_url,
            });
        }

        if args.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "RECREATION_FETCH_TIMEOUT_SECS",
                value: args.fetch_timeout_secs.to_string(),
            });
        }

        let transport = if args.serve_http {
            Transport::StreamableHttp
        } else {
            Transport::Stdio
        };

        Ok(Self {
            transport,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateful: args.mcp_stateful,
            sse_keep_alive: optional_secs(args.sse_keep_alive_secs),
            sse_retry: optional_secs(args.sse_retry_secs),
            dataset_url,
            fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
        })
    }
}

fn optional_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then_some(Duration::from_secs(secs))
}
