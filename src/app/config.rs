use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_GATEWAY_URL: &str = "https://api.yoco.com";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 15;

/// Yoco secret key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Empty or whitespace-only values count as unset.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

/// Command line flags, each one backed by an environment variable.
#[derive(Debug, Parser)]
#[command(name = "relay", about = "Relays card charges to the Yoco API")]
pub struct Cli {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Secret key sent in `X-Auth-Secret-Key`. Without it `/paiement` answers 500.
    #[arg(long, env = "YOCO_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Base URL of the charge API
    #[arg(long, env = "YOCO_API_URL", default_value = DEFAULT_GATEWAY_URL)]
    pub gateway_url: Url,

    #[arg(long, env = "GATEWAY_TIMEOUT_SECS", default_value_t = DEFAULT_GATEWAY_TIMEOUT_SECS)]
    pub gateway_timeout_secs: u64,

    /// Landing document served on `GET /`
    #[arg(long, env = "INDEX_FILE", default_value = "static/index.html")]
    pub index_file: PathBuf,

    /// Public address, only logged at startup
    #[arg(long, env = "PUBLIC_URL")]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub secret_key: Option<SecretKey>,
    pub gateway_url: Url,
    pub gateway_timeout: Duration,
    pub index_file: PathBuf,
    pub public_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Cli::parse().into()
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Into::into)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            secret_key: cli.secret_key.and_then(SecretKey::new),
            gateway_url: cli.gateway_url,
            gateway_timeout: Duration::from_secs(cli.gateway_timeout_secs),
            index_file: cli.index_file,
            public_url: cli.public_url.filter(|u| !u.is_empty()),
        }
    }
}
