use configuration::Settings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

/// Hard upper bound on concurrent database connections.
const MAX_CONNECTIONS: u32 = 20;
/// How long an acquisition may wait for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_millis(2000);
/// Connections idle for longer than this are closed and evicted.
const IDLE_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Builds the connection pool for the PostgreSQL database.
///
/// The pool is created lazily: no connection is opened until a query first
/// asks for one. This lets the process come up and serve its liveness probe
/// even while the database is still unreachable; readiness reports the
/// difference. Acquisitions beyond the connection bound queue up to
/// `ACQUIRE_TIMEOUT` and then fail with `sqlx::Error::PoolTimedOut`.
pub fn connect(settings: &Settings) -> PgPool {
    tracing::debug!(
        host = %settings.db_host,
        port = settings.db_port,
        database = %settings.db_name,
        "Configuring database connection pool."
    );
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .connect_lazy_with(pg_connect_options(settings))
}

/// Assembles the server/credential options from the discrete `DB_*` settings.
fn pg_connect_options(settings: &Settings) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .host(&settings.db_host)
        .port(settings.db_port)
        .database(&settings.db_name)
        .username(&settings.db_user);

    if let Some(password) = settings.db_password.as_deref() {
        options = options.password(password);
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            port: 3000,
            app_version: "1.0.0".to_string(),
            db_host: "db.internal".to_string(),
            db_port: 6543,
            db_name: "warehouse".to_string(),
            db_user: "svc".to_string(),
            db_password: Some("hunter2".to_string()),
        }
    }

    #[test]
    fn connect_options_reflect_settings() {
        let options = pg_connect_options(&settings());

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("warehouse"));
        assert_eq!(options.get_username(), "svc");
    }

    #[tokio::test]
    async fn pool_is_created_without_touching_the_database() {
        // `connect` must not perform I/O; a pool against a host nobody is
        // listening on still constructs.
        let pool = connect(&settings());

        assert!(!pool.is_closed());
    }
}
