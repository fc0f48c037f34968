use clap::{Args, Subcommand};
use jiff::Timestamp;

mod add_service_item;
mod create_item;
mod delete;
mod set_pricing;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    CreateService(create_item::CreateItemArgs),
    CreateMenuItem(create_item::CreateItemArgs),
    AddServiceItem(add_service_item::AddServiceItemArgs),
    SetPricing(set_pricing::SetPricingArgs),
    Delete(delete::DeleteArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::CreateService(args) => create_item::run_service(args).await,
        CatalogSubcommand::CreateMenuItem(args) => create_item::run_menu_item(args).await,
        CatalogSubcommand::AddServiceItem(args) => add_service_item::run(args).await,
        CatalogSubcommand::SetPricing(args) => set_pricing::run(args).await,
        CatalogSubcommand::Delete(args) => delete::run(args).await,
    }
}

fn parse_timestamp(flag: &str, raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid {flag} timestamp: {error}"))
    })
    .transpose()
}
