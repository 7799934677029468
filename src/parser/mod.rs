//! Log line parsing.
//!
//! # Responsibilities
//! - Extract pool, release and upstream status from one raw log line
//! - Tolerate lines that do not match (frequent, non-exceptional)
//!
//! # Design Decisions
//! - Field-tagged pattern matched anywhere in the line, not anchored
//! - Absence of a match is `None`, never an error
//! - Parsing is pure: no counters, no logging

use regex::Regex;

/// Structured fields extracted from a single access log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Serving pool that handled the request (e.g., "blue" or "green").
    pub pool: String,
    /// Release identifier of the deployed build.
    pub release: String,
    /// HTTP status code returned by the upstream.
    pub status: u16,
}

/// Tolerant parser for the load balancer's custom log format.
///
/// Lines are expected to contain `pool=<word> release=<word/dot/dash>
/// upstream_status=<digits>` somewhere in the line; any surrounding
/// content is ignored.
#[derive(Debug)]
pub struct LineParser {
    pattern: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        let pattern = Regex::new(
            r"pool=(?P<pool>\w+)\s+release=(?P<release>[\w.\-]+)\s+upstream_status=(?P<status>\d+)",
        )
        .expect("log line pattern is a valid regex");
        Self { pattern }
    }

    /// Parse one raw line. Returns `None` when any of the three fields
    /// is missing or the status code is out of range.
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        let caps = self.pattern.captures(line)?;
        let status: u16 = caps["status"].parse().ok()?;

        Some(LogRecord {
            pool: caps["pool"].to_string(),
            release: caps["release"].to_string(),
            status,
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let parser = LineParser::new();
        let record = parser
            .parse("2026-08-26T10:00:00Z pool=blue release=v1.2.3 upstream_status=200 rt=0.012")
            .unwrap();

        assert_eq!(record.pool, "blue");
        assert_eq!(record.release, "v1.2.3");
        assert_eq!(record.status, 200);
    }

    #[test]
    fn accepts_dashes_in_release() {
        let parser = LineParser::new();
        let record = parser
            .parse("pool=green release=2026-08-26-hotfix upstream_status=502")
            .unwrap();

        assert_eq!(record.release, "2026-08-26-hotfix");
        assert_eq!(record.status, 502);
    }

    #[test]
    fn ignores_surrounding_content() {
        let parser = LineParser::new();
        let record = parser
            .parse("prefix junk pool=blue release=r1 upstream_status=404 trailing junk")
            .unwrap();

        assert_eq!(record.status, 404);
    }

    #[test]
    fn rejects_line_missing_status() {
        let parser = LineParser::new();
        assert!(parser.parse("pool=blue release=v1").is_none());
    }

    #[test]
    fn rejects_unrelated_line() {
        let parser = LineParser::new();
        assert!(parser.parse("GET /healthz 200").is_none());
        assert!(parser.parse("").is_none());
    }

    #[test]
    fn rejects_out_of_range_status() {
        let parser = LineParser::new();
        assert!(parser
            .parse("pool=blue release=v1 upstream_status=99999999")
            .is_none());
    }
}
