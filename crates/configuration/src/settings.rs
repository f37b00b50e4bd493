use serde::Deserialize;
use std::net::SocketAddr;

/// The root configuration structure for the entire application.
///
/// Every field maps 1:1 to an environment variable of the same name in
/// upper case (`PORT`, `DB_HOST`, ...). Defaults are applied by the loader
/// in `lib.rs`, so a bare environment yields a fully usable configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The TCP port the HTTP server listens on.
    pub port: u16,
    /// The version string reported by the health endpoint.
    pub app_version: String,
    /// Hostname of the PostgreSQL server.
    pub db_host: String,
    /// Port of the PostgreSQL server.
    pub db_port: u16,
    /// Name of the database holding the `items` table.
    pub db_name: String,
    /// Role used to authenticate against the database.
    pub db_user: String,
    /// Password for `db_user`. Optional so local trust-auth setups work.
    #[serde(default)]
    pub db_password: Option<String>,
}

impl Settings {
    /// The socket address the server binds to. We always listen on all
    /// interfaces; only the port is configurable.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
