use std::fmt;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

/// RFC 3339 timestamp formatter, always in UTC.
#[derive(Debug, Clone, Copy)]
pub struct LoggerRfc3339;

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match OffsetDateTime::now_utc().format(&Rfc3339) {
            Ok(ts) => write!(w, "{ts} "),
            Err(_) => write!(w, "<invalid-time> "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_utc_timestamp_followed_by_space() {
        let mut out = String::new();
        LoggerRfc3339
            .format_time(&mut Writer::new(&mut out))
            .unwrap();

        assert!(out.ends_with(' '), "got {out:?}");
        let ts = out.trim_end();
        assert!(ts.ends_with('Z'), "expected UTC designator in {ts:?}");
        assert!(OffsetDateTime::parse(ts, &Rfc3339).is_ok());
    }
}
