//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Serve the interactive GraphiQL explorer on `GET /graphql`
    #[arg(long, env = "GRAPHIQL_ENABLED", default_value_t = false)]
    pub graphiql_enabled: bool,

    /// Seconds to let in-flight requests finish after a shutdown signal; unbounded when unset
    #[arg(long, env = "SHUTDOWN_GRACE_PERIOD_SECS")]
    pub shutdown_grace_period_secs: Option<u64>,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn shutdown_grace_period(&self) -> Option<Duration> {
        self.shutdown_grace_period_secs.map(Duration::from_secs)
    }
}
