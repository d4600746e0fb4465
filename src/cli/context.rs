//! Command execution context
//!
//! Bundles the loaded config, an API client holding a valid access token,
//! and the resolved customer id, so command handlers share one setup path.

use std::sync::Arc;

use clap::ValueEnum;

use crate::auth::{ClientCredentials, OauthClient};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::GoogleDirectoryClient;
use crate::config::{Config, StoredToken};
use crate::error::{AuthError, Result};

/// Context for commands that talk to the Directory API
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Directory API client with a valid token
    pub client: Arc<GoogleDirectoryClient>,
    /// Output format preference
    pub format: OutputFormat,
    /// Resolved Workspace customer id
    pub customer_id: String,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads the config, parses the OAuth client credentials, and ensures a
    /// usable access token: a valid cached token is reused, an expired one
    /// is refreshed (and persisted for future runs), and anything else sends
    /// the operator to `oubridge init`.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;

        let credentials_path = config.credentials_path(opts.credentials_ref())?;
        let credentials = ClientCredentials::load(&credentials_path)?;
        let oauth = OauthClient::new(credentials)?;

        let token = Self::ensure_token(&mut config, &oauth, opts).await?;

        let client = match opts.api_host_ref() {
            Some(host) => GoogleDirectoryClient::with_base_url(oauth, token, host.to_string())?,
            None => GoogleDirectoryClient::new(oauth, token)?,
        };

        let customer_id = config.customer_id(opts.customer_ref());
        let format = resolve_format(opts.format, &config);

        Ok(Self {
            config,
            client: Arc::new(client),
            format,
            customer_id,
        })
    }

    async fn ensure_token(
        config: &mut Config,
        oauth: &OauthClient,
        opts: &GlobalOptions,
    ) -> Result<StoredToken> {
        if !config.is_token_expired() {
            if let Some(ref token) = config.token {
                return Ok(token.clone());
            }
        }

        let refresh_token = config
            .token
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
            .ok_or(AuthError::NotAuthorized)?;

        let refreshed = oauth.refresh(&refresh_token).await?;

        // Persist so future runs skip the refresh
        config.token = Some(refreshed.clone());
        config.save_at(opts.config_ref())?;

        Ok(refreshed)
    }
}

/// Resolve the output format: CLI flag or environment beats the config file
/// preference, which beats the default. An unrecognized preference value is
/// ignored rather than failing the run.
fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| {
        config
            .preferences
            .format
            .as_deref()
            .and_then(|s| OutputFormat::from_str(s, true).ok())
    })
    .unwrap_or_default()
}
