use clap::{Parser, Subcommand};

use crate::commands::{CheckFixturesParams, HashPasswordParams, InspectTokenParams, IssueTokenParams};

mod commands;

#[derive(Parser)]
#[command(name = "transitctl")]
pub struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Clone, Subcommand)]
pub enum Command {
    /// Mint a driver bearer token without going through `/login`.
    #[command(name = "issue-token")]
    IssueToken(IssueTokenParams),

    /// Verify a token and print its claims.
    #[command(name = "inspect-token")]
    InspectToken(InspectTokenParams),

    /// Load and validate a fixture file.
    #[command(name = "check-fixtures")]
    CheckFixtures(CheckFixturesParams),

    /// Produce a bcrypt `passwordHash` for a driver fixture.
    #[command(name = "hash-password")]
    HashPassword(HashPasswordParams),
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let output = match args.command {
        Command::IssueToken(params) => commands::issue_token(params)?,
        Command::InspectToken(params) => commands::inspect_token(params)?,
        Command::CheckFixtures(params) => commands::check_fixtures(params)?,
        Command::HashPassword(params) => commands::hash_password(params)?,
    };

    println!("{output}");

    Ok(())
}
