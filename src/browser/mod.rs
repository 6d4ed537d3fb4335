use anyhow::{Context, Result};
use std::io::Write;

/// What to do with a finished URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Launch the default browser and report it
    Browser,
    /// Only print the URL to stdout
    Print,
}

/// Open a URL in the user's default browser
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}

/// Send `url` to the browser or to `out`, depending on `mode`
pub fn emit_url(url: &str, mode: OpenMode, out: &mut dyn Write) -> Result<()> {
    match mode {
        OpenMode::Browser => {
            open_url(url)?;
            writeln!(out, "Opening {}", url)?;
        }
        OpenMode::Print => writeln!(out, "{}", url)?,
    }
    Ok(())
}
