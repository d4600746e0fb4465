//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::auth::{ClientCredentials, OauthClient};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Walks the operator through the installed-app authorization flow: print
/// the authorization URL, collect the code, exchange it for tokens, and
/// cache them in the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to oubridge!".bold().green());
    println!("Let's authorize access to your Google Workspace tenant.\n");

    // Keep whatever configuration already exists
    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();

    let credentials_path = config.credentials_path(opts.credentials_ref())?;
    let credentials = ClientCredentials::load(&credentials_path)?;
    println!(
        "{} Using OAuth client from {}",
        "✓".green(),
        credentials_path.display()
    );

    let oauth = OauthClient::new(credentials)?;

    println!("\nAuthorize this app by visiting this url:\n");
    println!("  {}\n", oauth.credentials().authorization_url().cyan());

    let code: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the code from that page here")
        .interact_text()?;

    println!("\n{}", "Exchanging authorization code...".cyan());
    let token = oauth.exchange_code(code.trim()).await?;
    println!("{}", "✓ Authorization successful!".green());

    if token.refresh_token.is_none() {
        println!(
            "{}",
            "⚠ No refresh token was issued; re-run `oubridge init` once this token expires."
                .yellow()
        );
    }

    if opts.credentials_ref().is_some() {
        config.credentials_path = Some(credentials_path);
    }
    if let Some(customer) = opts.customer_ref() {
        config.customer_id = Some(customer.to_string());
    }
    config.token = Some(token);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Token stored in: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Inspect the OU tree", "oubridge ou list".cyan());
    println!(
        "  {} - Generate the provisioning script",
        "oubridge generate".cyan()
    );

    Ok(())
}
