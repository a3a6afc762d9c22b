use std::env::VarError;
use std::net::SocketAddr;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

static SERVER_PORT: &str = "SERVER_PORT";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ServerConfig {
    port: u16,
}

impl ServerConfig {
    /// Reads `SERVER_PORT` from the environment or a `.env` file.
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let port = match dotenvy::var(SERVER_PORT) {
            Ok(port) => parse_port(&port)?,
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => DEFAULT_PORT,
            Err(error) => {
                return Err(Report::new(error)
                    .change_context(KernelError::Internal)
                    .attach_printable(format!("Failed to read {SERVER_PORT}")))
            }
        };
        Ok(Self { port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

fn parse_port(raw: &str) -> error_stack::Result<u16, KernelError> {
    raw.trim()
        .parse::<u16>()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("{SERVER_PORT} must be a port number, got `{raw}`"))
}

#[cfg(test)]
mod test {
    use crate::config::{parse_port, ServerConfig};

    #[test]
    fn default_listens_on_3000() {
        let config = ServerConfig::default();
        assert_eq!(config.port(), 3000);
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn parses_port() {
        assert_eq!(parse_port(" 8080 ").ok(), Some(8080));
        assert!(parse_port("http").is_err());
        assert!(parse_port("70000").is_err());
    }
}
