use bitebuddy_app::domain::catalog::{
    CatalogService, PgCatalogService, data::PricingUpdate, records::CatalogItemUuid,
};
use clap::Args;

use super::create_item::print_item;
use crate::cli::connect_admin;

#[derive(Debug, Args)]
pub(crate) struct SetPricingArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    item_uuid: CatalogItemUuid,

    /// Price in paise
    #[arg(long)]
    base_price: u64,

    /// Discount in paise
    #[arg(long, default_value_t = 0)]
    discount: u64,
}

pub(crate) async fn run(args: SetPricingArgs) -> Result<(), String> {
    let service = PgCatalogService::new(connect_admin(&args.database_url).await?);

    let updated = service
        .update_pricing(
            args.item_uuid,
            PricingUpdate {
                base_price: args.base_price,
                discount: args.discount,
            },
        )
        .await
        .map_err(|error| format!("failed to update pricing: {error}"))?;

    print_item(&updated)
}
