use std::path::PathBuf;

use crate::error::ExtractError;

/// Run configuration, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub nmap_out: PathBuf,
    pub service_substr: String,
    pub verbosity: i32,
}

impl Config {
    pub fn new(
        nmap_out: impl Into<PathBuf>,
        service_substr: impl Into<String>,
        verbosity: i32,
    ) -> Result<Self, ExtractError> {
        let nmap_out = nmap_out.into();
        if nmap_out.as_os_str().is_empty() {
            return Err(ExtractError::MissingFlag("nmap_out"));
        }

        Ok(Self {
            nmap_out,
            service_substr: service_substr.into(),
            verbosity,
        })
    }
}
