pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jobly")]
#[command(about = "Jobly API - companies and jobs REST backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default when no command is given)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides JOBLY_PORT / PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,

    #[command(about = "Issue a signed token for local testing")]
    Token {
        #[arg(long, help = "Username carried in the token")]
        username: String,
        #[arg(long, help = "Grant admin rights")]
        admin: bool,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(port).await,
        Commands::Migrate => commands::migrate::handle().await,
        Commands::Token { username, admin } => commands::token::handle(&username, admin),
    }
}
