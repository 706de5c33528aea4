use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Local midnight of the day `t` falls on, in `t`'s own time zone.
pub fn start_of_day<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let midnight = t.date_naive().and_time(NaiveTime::MIN);
    match t.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start,
        // midnight skipped by a DST jump
        None => {
            t.clone()
                - Duration::seconds(t.num_seconds_from_midnight() as i64)
                - Duration::nanoseconds(t.nanosecond() as i64)
        }
    }
}

/// Reads a line-delimited text file, trimming each line and skipping blanks.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::io::Write;

    #[test]
    fn start_of_day_truncates_to_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = tz.with_ymd_and_hms(2024, 3, 10, 17, 45, 12).unwrap();
        let start = start_of_day(&t);
        assert_eq!(start, tz.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn read_lines_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a@example.com\n\n  b@example.com \r\n").unwrap();
        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["a@example.com", "b@example.com"]);
    }
}
