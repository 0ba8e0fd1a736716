//! Interactive authorization-code retrieval.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub const CODE_PROMPT: &str = "Enter auth code from the above link: ";

/// Print the consent URL, open it in the default browser and block until
/// the operator pastes the code back on stdin.
pub fn browser_prompt(login_url: &str) -> Result<String> {
    println!("{}", login_url);
    log::info!("Opening consent page in browser");
    if let Err(e) = open::that(login_url) {
        // The URL is already on screen; the operator can open it by hand.
        log::warn!("Could not launch browser: {}", e);
        eprintln!("Warning: could not open a browser: {}", e);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    read_code(&mut stdin.lock(), &mut stdout.lock())
}

/// Show the prompt and read one line. Only the line terminator is removed.
pub fn read_code<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "{}", CODE_PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .context("reading auth code from console")?;
    if n == 0 {
        anyhow::bail!("no auth code entered (end of input)");
    }
    let code = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(&line);
    Ok(code.to_string())
}
