//! Gateway configuration from environment variables
//!
//! - `CNI_GATEWAY_HOST` (default `0.0.0.0`)
//! - `CNI_GATEWAY_PORT`, then `PORT` (default `18620`)

use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 18620;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("CNI_GATEWAY_HOST") {
            config.host = host
                .parse()
                .with_context(|| format!("CNI_GATEWAY_HOST is not an IP address: {host}"))?;
        }

        if let Some(port) = lookup("CNI_GATEWAY_PORT").or_else(|| lookup("PORT")) {
            config.port = port
                .parse()
                .with_context(|| format!("gateway port is not a valid u16: {port}"))?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
