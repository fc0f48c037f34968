use bitebuddy_app::domain::catalog::{
    CatalogService, PgCatalogService, data::NewServiceItem, records::CatalogItemUuid,
};
use clap::Args;

use crate::cli::connect_admin;

#[derive(Debug, Args)]
pub(crate) struct AddServiceItemArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Service the item is listed under
    #[arg(long)]
    service_uuid: CatalogItemUuid,

    #[arg(long)]
    name: String,

    /// Price in paise
    #[arg(long, default_value_t = 0)]
    price: u64,

    #[arg(long, default_value_t = 0)]
    serial_number: i32,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    image_url: Option<String>,
}

pub(crate) async fn run(args: AddServiceItemArgs) -> Result<(), String> {
    let service = PgCatalogService::new(connect_admin(&args.database_url).await?);

    let created = service
        .add_service_item(
            args.service_uuid,
            NewServiceItem {
                name: args.name,
                description: args.description,
                image_url: args.image_url,
                price: args.price,
                serial_number: args.serial_number,
            },
        )
        .await
        .map_err(|error| format!("failed to add service item: {error}"))?;

    println!("uuid: {}", created.uuid);
    println!("service_uuid: {}", created.service_uuid);
    println!("name: {}", created.name);

    Ok(())
}
