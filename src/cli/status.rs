//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "oubridge Configuration Status".bold());

    let config_result = Config::load_at(opts.config_ref());

    match config_result {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            // Credentials file status
            let credentials_path = config.credentials_path(opts.credentials_ref())?;
            if credentials_path.exists() {
                println!(
                    "{} OAuth credentials: {}",
                    "✓".green(),
                    credentials_path.display()
                );
            } else {
                println!(
                    "{} OAuth credentials file missing: {}",
                    "✗".red(),
                    credentials_path.display()
                );
                println!("  → Download one from the Google Cloud console");
            }

            // Token status
            if let Some(ref token) = config.token {
                if config.is_token_expired() {
                    if token.refresh_token.is_some() {
                        println!(
                            "{} Access token expired (will refresh on next command)",
                            "⚠".yellow()
                        );
                    } else {
                        println!(
                            "{} Access token expired and no refresh token cached",
                            "✗".red()
                        );
                        println!("  → Run 'oubridge init' to re-authorize");
                    }
                } else {
                    let now = chrono::Utc::now();
                    let remaining = token.expires_at.signed_duration_since(now);
                    println!(
                        "{} Access token valid (expires in {}m)",
                        "✓".green(),
                        remaining.num_minutes()
                    );
                }
            } else {
                println!("{} Not authorized yet", "○".dimmed());
                println!("  → Run 'oubridge init' to authorize");
            }

            // Customer scope
            println!(
                "{} Customer scope: {}",
                "○".dimmed(),
                config.customer_id(opts.customer_ref())
            );

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "oubridge init".cyan()
            );
            println!();
        }
    }

    Ok(())
}
