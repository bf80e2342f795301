//! `banking-client` entry-point: loads settings, restores the session, and
//! runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use banking_client::ClientSettings;
use banking_client::SessionHandle;
use banking_client::cli::{App, Cli};
use banking_client::outbound::http::ReqwestTransport;
use banking_client::outbound::storage::FileSessionStorage;
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let mut settings = ClientSettings::load_from_iter([OsString::from("banking-client")])
        .wrap_err("failed to load banking client settings")?;
    cli.apply_to(&mut settings);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(cli, &settings))
}

async fn run(cli: Cli, settings: &ClientSettings) -> Result<()> {
    let base_url = settings.api_url()?;
    let timeout = settings.timeout()?;
    let session_file = settings.session_file();
    debug!(%base_url, ?timeout, %session_file, "starting banking client");

    let transport = ReqwestTransport::new(base_url, timeout)
        .wrap_err("failed to build HTTP client")?;
    let storage = FileSessionStorage::open(&session_file)
        .wrap_err_with(|| format!("failed to open session file {session_file}"))?;
    let session = SessionHandle::restore(Arc::new(storage))
        .wrap_err_with(|| format!("failed to restore session from {session_file}"))?;

    let app = App::new(Arc::new(transport), session);
    let mut stdout = io::stdout().lock();
    app.run(cli.command, &mut stdout).await?;
    stdout.flush().wrap_err("failed to flush output")?;
    Ok(())
}
