use bitebuddy_app::domain::orders::{
    OrdersService, PgOrdersService,
    records::{OrderStatus, OrderUuid},
};
use clap::Args;

use crate::cli::connect_admin;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    order_uuid: OrderUuid,

    /// pending, preparing, delivery, delivered or cancelled
    #[arg(long)]
    status: String,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let status = args
        .status
        .parse::<OrderStatus>()
        .map_err(|error| error.to_string())?;

    let service = PgOrdersService::new(connect_admin(&args.database_url).await?);

    let order = service
        .update_status(args.order_uuid, status)
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status);

    Ok(())
}
