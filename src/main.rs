//! oubridge CLI - export Google Workspace organizational units as an Active
//! Directory provisioning script

use clap::{CommandFactory, Parser};

mod auth;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod script;

use cli::{Cli, Commands, GlobalOptions, OuCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "oubridge=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("oubridge version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Ou(ou_cmd) => match ou_cmd {
            OuCommands::List => cli::ou::list(&opts).await,
        },
        Commands::Generate { root_dn, output } => cli::generate::run(&opts, root_dn, output).await,
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "oubridge", &mut std::io::stdout());
            Ok(())
        }
    }
}
