//! Server configuration

use std::net::SocketAddr;

use crate::hub::PumpConfig;

/// Configuration for the frame broadcast server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Path of the WebSocket handshake endpoint
    pub endpoint: String,

    /// Per-connection pump settings
    pub pump: PumpConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            endpoint: "/ws".to_string(),
            pump: PumpConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with a custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the handshake endpoint path
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the pump configuration
    pub fn pump(mut self, pump: PumpConfig) -> Self {
        self.pump = pump;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.endpoint, "/ws");
        assert_eq!(config.pump.queue_capacity, 256);
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:3030".parse().unwrap();
        let config = ServerConfig::with_addr(addr);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.endpoint, "/ws");
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let config = ServerConfig::default()
            .bind(addr)
            .endpoint("/leds")
            .pump(PumpConfig::default().write_deadline(Duration::from_secs(5)));

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.endpoint, "/leds");
        assert_eq!(config.pump.write_deadline, Duration::from_secs(5));
    }
}
