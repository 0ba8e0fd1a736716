//! `gphotos FILENAME`: authenticate, search, print the verdict.

use anyhow::Result;

use crate::auth::{self, GoogleAuth};
use crate::cli::Cli;
use crate::logging;
use crate::lookup::{LookupClient, Verdict};
use crate::resolve;

pub fn run(cli: &Cli) -> Result<()> {
    let run_log = logging::init(&cli.config_path)?;
    log::info!("Logging to {}", run_log.path.display());

    let config_file = resolve::config_file(&cli.config_path);
    log::debug!("Using config file: {}", config_file.display());

    let mut oauth = GoogleAuth::new(config_file, &auth::default_scope(), auth::SERVICE);
    let verdict = check_file(&mut oauth, &LookupClient::default(), &cli.filename)?;
    println!("{}", verdict);
    Ok(())
}

/// One authentication and one search request.
pub fn check_file(oauth: &mut GoogleAuth, client: &LookupClient, filename: &str) -> Result<Verdict> {
    let session = oauth.authenticate()?;
    let email = oauth.google_get_email(&session)?;
    log::debug!("Getting emails for: {}", email);

    let verdict = client.check(&session, filename)?;
    log::info!("{}: {}", filename, verdict);
    Ok(verdict)
}
