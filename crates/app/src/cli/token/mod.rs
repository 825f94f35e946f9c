use clap::{Args, Subcommand};
use discounts_app::{auth::PgAuthService, database};

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: String,

    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a token; the raw value is printed once
    Create(create::CreateTokenArgs),

    /// List tokens issued to a principal
    List(list::ListTokensArgs),

    /// Revoke a token by UUID
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    let pool = database::connect(&command.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool);

    match command.command {
        TokenSubcommand::Create(args) => create::run(&service, args).await,
        TokenSubcommand::List(args) => list::run(&service, args).await,
        TokenSubcommand::Revoke(args) => revoke::run(&service, args).await,
    }
}
