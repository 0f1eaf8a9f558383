use std::io::{self, BufRead, Write};

use crate::{
    config::Config,
    error::ExtractError,
    gnmap::{HostPort, PortEntry, ScanLine},
};

pub use self::input::InputLines;

mod input;

/// Selects ports by a literal, case-sensitive substring of the service name.
/// An empty substring selects every port.
#[derive(Debug, Clone, Copy)]
pub struct ServiceFilter<'s> {
    substr: &'s str,
}

impl<'s> ServiceFilter<'s> {
    pub fn new(substr: &'s str) -> Self {
        Self { substr }
    }

    #[inline]
    pub fn matches(&self, entry: &PortEntry) -> bool {
        self.substr.is_empty() || entry.service.contains(self.substr)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Lines carrying both a host and a `Ports:` field.
    pub scan_lines: usize,
    pub matches: usize,
}

/// Streams matching `host:port` pairs out of greppable lines, in input order.
pub struct Matches<'s, R> {
    lines: InputLines<R>,
    filter: ServiceFilter<'s>,
    pending: std::vec::IntoIter<HostPort>,
    stats: Stats,
}

impl<'s, R: BufRead> Matches<'s, R> {
    pub fn new(lines: InputLines<R>, filter: ServiceFilter<'s>) -> Self {
        Self {
            lines,
            filter,
            pending: Vec::new().into_iter(),
            stats: Stats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn select(&self, line: &ScanLine) -> Vec<HostPort> {
        line.ports
            .iter()
            .filter(|entry| self.filter.matches(entry))
            .map(|entry| HostPort::new(line.host, entry.number))
            .collect()
    }
}

impl<'s, R: BufRead> Iterator for Matches<'s, R> {
    type Item = Result<HostPort, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(hit) = self.pending.next() {
                self.stats.matches += 1;
                log::debug!("Match `{}`", hit);
                return Some(Ok(hit));
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            let Some(scan_line) = ScanLine::parse(&line) else {
                log::trace!("Skipping line `{}`", line.trim_end());
                continue;
            };
            self.stats.scan_lines += 1;

            log::debug!("Host `{}` with {} port(s)", scan_line.host, scan_line.ports.len());
            for entry in &scan_line.ports {
                log::debug!(
                    "Port {}/{} state `{}` service `{}` version `{}`",
                    entry.number,
                    entry.protocol,
                    entry.state,
                    entry.service,
                    entry.version,
                );
            }

            self.pending = self.select(&scan_line).into_iter();
        }
    }
}

/// Downstream consumers like `head` may close the pipe before we're done.
fn is_closed(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::BrokenPipe
}

/// Writes every match for `config` to `out`, one `host:port` per line.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<Stats, ExtractError> {
    log::debug!("Reading input file `{}`", config.nmap_out.display());

    let lines = InputLines::open(&config.nmap_out)?;
    let mut matches = Matches::new(lines, ServiceFilter::new(&config.service_substr));

    let mut closed = false;
    for hit in matches.by_ref() {
        if let Err(e) = writeln!(out, "{}", hit?) {
            if is_closed(&e) {
                closed = true;
                break;
            }
            return Err(ExtractError::OutputWriteFailed(e));
        }
    }

    if !closed {
        match out.flush() {
            Err(e) if is_closed(&e) => closed = true,
            Err(e) => return Err(ExtractError::OutputWriteFailed(e)),
            Ok(()) => {}
        }
    }

    let stats = matches.stats();
    if closed {
        log::debug!("Output closed after {} match(es), stopping", stats.matches);
    } else if stats.scan_lines == 0 {
        log::warn!(
            "No line with `Host:` and `Ports:` found in input file `{}`",
            config.nmap_out.display()
        );
    } else if stats.matches == 0 {
        log::warn!(
            "No ports found for service substring `{}` and input file `{}`",
            config.service_substr,
            config.nmap_out.display()
        );
    } else {
        log::debug!(
            "Parsed {} host/port line(s) into {} match(es)",
            stats.scan_lines,
            stats.matches
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const SCAN: &str = "\
# Nmap 7.94 scan initiated Mon Oct 12 10:00:00 2026 as: nmap -sV -oG scan.gnmap 10.0.0.0/29
Host: 10.0.0.5 ()\tStatus: Up
Host: 10.0.0.5 ()\tPorts: 80/open/tcp//http///, 22/open/tcp//ssh///\tIgnored State: closed (998)
Host: 10.0.0.6 (db.lan)\tStatus: Up
Host: 10.0.0.6 (db.lan)\tPorts: 5432/open/tcp//postgresql///, 8443/open/tcp//ssl|https-alt///
Host: 10.0.0.7 ()\tPorts: 53//udp
# Nmap done at Mon Oct 12 10:00:05 2026 -- 8 IP addresses (3 hosts up) scanned in 5.00 seconds
";

    fn collect(input: &str, substr: &str) -> Vec<String> {
        let lines = InputLines::new(Cursor::new(input.to_owned()), "mem");
        Matches::new(lines, ServiceFilter::new(substr))
            .map(|hit| hit.unwrap().to_string())
            .collect()
    }

    #[test]
    fn filter_by_service() {
        assert_eq!(collect(SCAN, "http"), vec!["10.0.0.5:80", "10.0.0.6:8443"]);
        assert_eq!(collect(SCAN, "ssh"), vec!["10.0.0.5:22"]);
    }

    #[test]
    fn empty_substring_matches_all_ports_in_order() {
        assert_eq!(
            collect(SCAN, ""),
            vec![
                "10.0.0.5:80",
                "10.0.0.5:22",
                "10.0.0.6:5432",
                "10.0.0.6:8443",
                "10.0.0.7:53",
            ]
        );
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(collect(SCAN, "HTTP").is_empty());
    }

    #[test]
    fn empty_service_never_matches_non_empty_substring() {
        assert!(collect(SCAN, "dns").is_empty());
    }

    #[test]
    fn stats_count_scan_lines_and_matches() {
        let lines = InputLines::new(Cursor::new(SCAN.to_owned()), "mem");
        let mut matches = Matches::new(lines, ServiceFilter::new("http"));
        let hits = matches.by_ref().count();

        assert_eq!(hits, 2);
        assert_eq!(
            matches.stats(),
            Stats {
                scan_lines: 3,
                matches: 2
            }
        );
    }

    #[test]
    fn filter_matches_substring_anywhere() {
        let entry = PortEntry::parse("8443/open/tcp//ssl|https-alt///").unwrap();

        assert!(ServiceFilter::new("https").matches(&entry));
        assert!(ServiceFilter::new("ssl|").matches(&entry));
        assert!(ServiceFilter::new("").matches(&entry));
        assert!(!ServiceFilter::new("ftp").matches(&entry));
    }
}
