use bitebuddy_app::database;
use clap::Args;
use sqlx::{Postgres, Transaction, query, query_scalar};

/// Attributes the runtime role always gets; the API refuses to start without
/// NOBYPASSRLS.
const ROLE_ATTRIBUTES: &str =
    "LOGIN NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS";

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative PostgreSQL connection string (the migration owner)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Role the JSON API connects as
    #[arg(long, default_value = "bitebuddy_app")]
    role_name: String,

    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

/// `CREATE ROLE` or `ALTER ROLE`, so rerunning rotates the password.
fn upsert_role_sql(exists: bool, role: &str, password: &str) -> String {
    let verb = if exists { "ALTER" } else { "CREATE" };

    format!("{verb} ROLE {role} {ROLE_ATTRIBUTES} PASSWORD {password}")
}

/// Table DML for the current and future tables, plus the function the
/// row-level security policies call. No ownership, so policies apply.
fn grant_sql(database: &str, role: &str) -> [String; 5] {
    [
        format!("GRANT CONNECT ON DATABASE {database} TO {role}"),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
        format!("GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {role}"),
        format!("GRANT EXECUTE ON FUNCTION app_current_user_uuid() TO {role}"),
        format!(
            "ALTER DEFAULT PRIVILEGES IN SCHEMA public \
             GRANT SELECT, INSERT, UPDATE, DELETE ON TABLES TO {role}"
        ),
    ]
}

/// Identifiers and literals cannot be bound, so let the server quote them.
async fn quote(
    tx: &mut Transaction<'_, Postgres>,
    function: &str,
    value: &str,
) -> Result<String, String> {
    query_scalar(&format!("SELECT {function}($1)"))
        .bind(value)
        .fetch_one(&mut **tx)
        .await
        .map_err(|error| format!("failed to {function} value: {error}"))
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    let role_name = args.role_name.trim();

    if role_name.is_empty() {
        return Err("role_name cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let role = quote(&mut tx, "quote_ident", role_name).await?;
    let password = quote(&mut tx, "quote_literal", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to look up role: {error}"))?;

    query(&upsert_role_sql(exists, &role, &password))
        .execute(&mut *tx)
        .await
        .map_err(|error| format!("failed to create or alter role {role_name}: {error}"))?;

    let database: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))?;

    for sql in grant_sql(&database, &role) {
        query(&sql)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to run `{sql}`: {error}"))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit role changes: {error}"))?;

    println!("{} role {role_name}", if exists { "updated" } else { "created" });
    println!("run the JSON API with DATABASE_URL pointing at this role");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_roles_are_altered_not_recreated() {
        let sql = upsert_role_sql(true, "bitebuddy_app", "'pw'");

        assert!(sql.starts_with("ALTER ROLE bitebuddy_app "), "got {sql}");
        assert!(sql.contains("NOBYPASSRLS"), "got {sql}");
        assert!(sql.ends_with("PASSWORD 'pw'"), "got {sql}");
    }

    #[test]
    fn new_roles_are_created_without_superuser() {
        let sql = upsert_role_sql(false, "bitebuddy_app", "'pw'");

        assert!(sql.starts_with("CREATE ROLE "), "got {sql}");
        assert!(sql.contains("NOSUPERUSER"), "got {sql}");
    }

    #[test]
    fn grants_cover_the_rls_helper() {
        let grants = grant_sql("bitebuddy", "bitebuddy_app");

        assert!(
            grants
                .iter()
                .any(|sql| sql.contains("app_current_user_uuid()")),
            "missing function grant: {grants:?}"
        );
        assert!(grants.iter().all(|sql| !sql.contains("OWNER")));
    }
}
