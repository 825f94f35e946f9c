use clap::{Parser, Subcommand};

mod token;

#[derive(Debug, Parser)]
#[command(name = "discounts-app", about = "Discounts administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage API tokens
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
        }
    }
}
