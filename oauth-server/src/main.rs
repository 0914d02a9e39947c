use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use oauth_service::prelude::*;
use oauth_service::session::store_from_config;

/// oauth-server - OAuth2 authorization code login service
#[derive(Parser, Debug)]
#[command(name = "oauth-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (.toml or .json).
    /// Standard locations are searched when omitted.
    #[arg(long, env = "OAUTH_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Authenticator implementation to use, e.g. google.com
    #[arg(long)]
    authenticator: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    if let Some(name) = cli.authenticator {
        config.authenticator.provider = name;
    }

    init_tracing(&config)?;

    let registry = AuthenticatorRegistry::builtin(&config.authenticator)
        .context("invalid authenticator configuration")?;
    let provider = config.authenticator.provider.clone();
    let authenticator = match registry.resolve(&provider) {
        Ok(authenticator) => authenticator,
        Err(e) => {
            tracing::error!(available = ?registry.names(), "{e}");
            return Err(e.into());
        }
    };

    let store = store_from_config(&config.session).await?;

    let mut builder = AuthHandler::builder()
        .client_config(config.oauth.clone())
        .authenticator(authenticator)
        .login_pattern(config.routes.login.clone())
        .redirect_pattern(config.routes.redirect.clone())
        .session_config(config.session.clone())
        .shared_store(store);

    if let Some(redirect_to) = &config.completion.redirect_to {
        tracing::info!(redirect_to = %redirect_to, "completed logins redirect into the app");
        builder = builder.login_handler(Arc::new(SessionLogin::new(redirect_to.clone())));
    }

    let handler = builder.build().context("invalid handler configuration")?;
    tracing::info!(?handler, "login handler ready");

    let app = handler.router().merge(
        Router::new()
            .route("/health", get(health))
            .with_state(config.service.name.clone()),
    );

    Server::new(config).serve(app).await?;
    Ok(())
}
