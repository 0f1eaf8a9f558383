//! Parsing of Nmap greppable output (`nmap -oG`).
//!
//! A host line looks like:
//!
//! ```text
//! Host: 10.0.0.5 (web.local)\tPorts: 80/open/tcp//http///, 22/open/tcp//ssh///\tIgnored State: closed (998)
//! ```

use std::fmt::{self, Display};

mod port;

pub use port::{layout, PortEntry};

const COMMENT_MARKER: char = '#';
const FIELD_SEPARATOR: char = '\t';
const HOST_PREFIX: &str = "Host:";
const PORTS_PREFIX: &str = "Ports:";
const PORT_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine<'a> {
    pub host: &'a str,
    pub ports: Vec<PortEntry<'a>>,
}

impl<'a> ScanLine<'a> {
    /// Returns `None` for comments, lines without a `Ports:` field and lines
    /// without a host token.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim_start().starts_with(COMMENT_MARKER) {
            return None;
        }

        let ports = field(line, PORTS_PREFIX)?;

        let host = match field(line, HOST_PREFIX).and_then(|h| h.split_whitespace().next()) {
            Some(host) => host,
            None => {
                log::debug!("Skipping line with ports but no host: `{}`", line);
                return None;
            }
        };

        let ports = ports
            .split(PORT_SEPARATOR)
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .filter_map(PortEntry::parse)
            .collect();

        Some(Self { host, ports })
    }
}

fn field<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.split(FIELD_SEPARATOR)
        .find_map(|f| f.trim_start().strip_prefix(prefix))
}

/// A matched port, displayed as `host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    pub port: u32,
}

impl HostPort {
    pub fn new(host: impl Into<String>, port: u32) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
