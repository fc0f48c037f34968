use bitebuddy_app::database::{self, Db};
use clap::{Parser, Subcommand};

mod catalog;
mod db;
mod order;
mod user;

#[derive(Debug, Parser)]
#[command(name = "bitebuddy-app", about = "BiteBuddy operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCommand),
    Db(db::DbCommand),
    Order(order::OrderCommand),
    User(user::UserCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Catalog(command) => catalog::run(command).await,
            Commands::Db(command) => db::run(command).await,
            Commands::Order(command) => order::run(command).await,
            Commands::User(command) => user::run(command).await,
        }
    }
}

/// Connect with the administrative role. It owns the tables, so row-level
/// security does not apply to operator commands.
pub(crate) async fn connect_admin(database_url: &str) -> Result<Db, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(Db::new(pool))
}
