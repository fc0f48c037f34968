use bitebuddy_app::domain::users::{PgUsersService, UsersService, records::UserUuid};
use clap::Args;

use crate::cli::connect_admin;

#[derive(Debug, Args)]
pub(crate) struct IssueTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    user_uuid: UserUuid,
}

pub(crate) async fn run(args: IssueTokenArgs) -> Result<(), String> {
    let service = PgUsersService::new(connect_admin(&args.database_url).await?);

    let issued = service
        .issue_token(args.user_uuid)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_uuid: {}", issued.user.uuid);
    println!("mobile: {}", issued.user.mobile);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
