use std::env;
use std::path::PathBuf;

const HISTORY_FILE: &str = ".sec-filings.history";

/// Line-editor history lives in `$HOME`, or the working directory when unset.
pub fn history_path() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(HISTORY_FILE),
        Err(_) => PathBuf::from(HISTORY_FILE),
    }
}
