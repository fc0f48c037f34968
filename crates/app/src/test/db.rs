//! Per-test databases on a shared `PostgreSQL` container.

use std::env;

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

const OWNER: &str = "bitebuddy_test";
const OWNER_PASSWORD: &str = "bitebuddy_test_password";

/// Started on first use and shared by every test in the binary.
static SERVER: Lazy<OnceCell<TestServer>> = Lazy::new(OnceCell::new);

/// Databases to drop, fed by `TestDb::drop`.
static DROPS: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

struct TestServer {
    _container: ContainerAsync<PostgresImage>,
    host: String,
    port: u16,
}

impl TestServer {
    async fn start() -> Self {
        let container = PostgresImage::default()
            .with_user(OWNER)
            .with_password(OWNER_PASSWORD)
            .with_db_name(OWNER)
            .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let host =
            env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

        Self {
            _container: container,
            host,
            port,
        }
    }

    fn url(&self, user: &str, password: &str, database: &str) -> String {
        format!(
            "postgresql://{user}:{password}@{}:{}/{database}",
            self.host, self.port
        )
    }

    async fn drop_database(&self, name: &str) -> Result<(), sqlx::Error> {
        let mut conn = PgConnection::connect(&self.url(OWNER, OWNER_PASSWORD, "postgres")).await?;

        sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\""))
            .execute(&mut conn)
            .await?;

        conn.close().await
    }
}

async fn server() -> &'static TestServer {
    SERVER.get_or_init(TestServer::start).await
}

async fn spawn_dropper() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Some(server) = SERVER.get()
                && let Err(err) = server.drop_database(&name).await
            {
                eprintln!("Failed to drop test database '{name}': {err}");
            }
        }
    });

    sender
}

/// A freshly migrated database owned by the test superuser.
///
/// Every test gets its own, so committed writes never leak between tests.
/// The database is dropped in the background once this value goes away.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    pub name: String,
    pub(super) owner_url: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROPS.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        DROPS.get_or_init(spawn_dropper).await;

        let server = server().await;

        // Only ever built from a uuid, so it is safe to splice into DDL.
        let name = format!("bitebuddy_test_{}", Uuid::now_v7().simple());

        let mut conn = PgConnection::connect(&server.url(OWNER, OWNER_PASSWORD, "postgres"))
            .await
            .expect("Failed to connect to maintenance database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close maintenance connection");

        let owner_url = server.url(OWNER, OWNER_PASSWORD, &name);

        let pool = PgPool::connect(&owner_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            name,
            owner_url,
        }
    }

    /// Pool connected as the owner. Row-level security does not apply to it.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The maintenance database, for server-scoped statements such as `CREATE ROLE`.
    pub(super) fn maintenance_url(&self) -> String {
        self.owner_url
            .rsplit_once('/')
            .map_or_else(|| self.owner_url.clone(), |(server, _)| format!("{server}/postgres"))
    }

    /// This database, connected as another role.
    pub(super) fn url_as(&self, user: &str, password: &str) -> String {
        self.owner_url.replacen(
            &format!("{OWNER}:{OWNER_PASSWORD}"),
            &format!("{user}:{password}"),
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::database::role_bypasses_rls;

    use super::*;

    #[tokio::test]
    async fn user_scoped_tables_have_row_level_security() {
        let test_db = TestDb::new().await;

        let protected: Vec<String> = sqlx::query_scalar(
            "SELECT relname::text FROM pg_class \
             WHERE relnamespace = 'public'::regnamespace AND relkind = 'r' AND relrowsecurity \
             ORDER BY relname",
        )
        .fetch_all(test_db.pool())
        .await
        .expect("Failed to read pg_class");

        assert_eq!(
            protected,
            vec!["cart_lines", "messages", "order_items", "orders"]
        );
    }

    #[tokio::test]
    async fn owner_pool_is_detected_as_bypassing_rls() {
        let test_db = TestDb::new().await;

        let bypasses = role_bypasses_rls(test_db.pool())
            .await
            .expect("Failed to check role");

        assert!(bypasses, "the container superuser must be refused by the server");
    }

    #[tokio::test]
    async fn databases_are_isolated() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        assert_ne!(first.name, second.name);

        sqlx::query("CREATE TABLE scratch (id INTEGER)")
            .execute(first.pool())
            .await
            .expect("Failed to create table");

        let visible: Option<String> =
            sqlx::query_scalar("SELECT to_regclass('scratch')::text")
                .fetch_one(second.pool())
                .await
                .expect("Failed to look up table");

        assert_eq!(visible, None);
    }
}
