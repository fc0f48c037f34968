use bitebuddy_app::domain::catalog::{CatalogService, PgCatalogService, records::CatalogItemUuid};
use clap::Args;

use crate::cli::connect_admin;

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    item_uuid: CatalogItemUuid,
}

pub(crate) async fn run(args: DeleteArgs) -> Result<(), String> {
    let service = PgCatalogService::new(connect_admin(&args.database_url).await?);

    service
        .delete_item(args.item_uuid)
        .await
        .map_err(|error| format!("failed to delete item: {error}"))?;

    println!("deleted: {}", args.item_uuid);
    println!("lines already in carts stay listed but can no longer be checked out");

    Ok(())
}
