use clap::{Args, Subcommand};

mod issue_token;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    IssueToken(issue_token::IssueTokenArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::IssueToken(args) => issue_token::run(args).await,
    }
}
