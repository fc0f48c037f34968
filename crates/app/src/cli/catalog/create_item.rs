use bitebuddy_app::{
    domain::catalog::{
        CatalogService, PgCatalogService, data::NewCatalogItem, records::CatalogItemRecord,
    },
    money,
};
use clap::Args;

use super::parse_timestamp;
use crate::cli::connect_admin;

#[derive(Debug, Args)]
pub(crate) struct CreateItemArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    name: String,

    /// Price in paise
    #[arg(long)]
    base_price: u64,

    /// Discount in paise
    #[arg(long, default_value_t = 0)]
    discount: u64,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    image_url: Option<String>,

    /// Display position on the menu
    #[arg(long)]
    serial_number: Option<i32>,

    /// Start of the availability window (RFC 3339)
    #[arg(long)]
    available_from: Option<String>,

    /// End of the availability window (RFC 3339), exclusive
    #[arg(long)]
    available_until: Option<String>,
}

impl CreateItemArgs {
    fn into_new_item(self) -> Result<(String, NewCatalogItem), String> {
        let item = NewCatalogItem {
            available_from: parse_timestamp("available-from", self.available_from.as_deref())?,
            available_until: parse_timestamp("available-until", self.available_until.as_deref())?,
            name: self.name,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            base_price: self.base_price,
            discount: self.discount,
            serial_number: self.serial_number,
        };

        Ok((self.database_url, item))
    }
}

pub(crate) async fn run_service(args: CreateItemArgs) -> Result<(), String> {
    let (database_url, item) = args.into_new_item()?;
    let service = PgCatalogService::new(connect_admin(&database_url).await?);

    let created = service
        .create_service(item)
        .await
        .map_err(|error| format!("failed to create service: {error}"))?;

    print_item(&created)
}

pub(crate) async fn run_menu_item(args: CreateItemArgs) -> Result<(), String> {
    let (database_url, item) = args.into_new_item()?;
    let service = PgCatalogService::new(connect_admin(&database_url).await?);

    let created = service
        .create_menu_item(item)
        .await
        .map_err(|error| format!("failed to create menu item: {error}"))?;

    print_item(&created)
}

pub(super) fn print_item(item: &CatalogItemRecord) -> Result<(), String> {
    let final_price = item
        .final_price()
        .map_err(|error| format!("stored pricing is invalid: {error}"))?;
    let display = money::format_inr(final_price).map_err(|error| error.to_string())?;

    println!("uuid: {}", item.uuid);
    println!("kind: {}", item.kind);
    println!("name: {}", item.name);
    println!("final_price: {final_price} ({display})");

    Ok(())
}
