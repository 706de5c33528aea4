use crate::util::start_of_day;
use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, TimeZone, Utc};

/// The lookback window ending today, pinned to a single "now".
#[derive(Debug, Clone)]
pub struct Window {
    now: DateTime<FixedOffset>,
    today_start: DateTime<FixedOffset>,
    days: u32,
}

impl Window {
    pub fn new<Tz: TimeZone>(now: DateTime<Tz>, days: u32) -> Self {
        let today_start = start_of_day(&now).fixed_offset();
        Self {
            now: now.fixed_offset(),
            today_start,
            days,
        }
    }

    pub fn local(days: u32) -> Self {
        Self::new(Local::now(), days)
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn weeks(&self) -> u32 {
        self.days / 7
    }

    /// Row shift that puts today at a fixed grid position: Monday is 1, Sunday is 7.
    pub fn today_offset(&self) -> u32 {
        self.now.weekday().number_from_monday()
    }

    /// Whole days between `when` and today's midnight.
    ///
    /// Counts the 24-hour steps needed from `when` to reach midnight; anything
    /// at or after midnight is 0. More than `days` steps yields `None`.
    pub fn days_since(&self, when: DateTime<Utc>) -> Option<u32> {
        let start = self.today_start.with_timezone(&Utc);
        if when >= start {
            return Some(0);
        }
        const DAY_MS: i64 = 24 * 60 * 60 * 1000;
        let behind = (start - when).num_milliseconds();
        let steps = (behind + DAY_MS - 1) / DAY_MS;
        if steps > self.days as i64 {
            None
        } else {
            Some(steps as u32)
        }
    }

    /// Bucket for a commit made at `when`, or `None` when it falls outside the window.
    pub fn offset_of(&self, when: DateTime<Utc>) -> Option<usize> {
        let offset = self.days_since(when)? + self.today_offset();
        (offset < self.days).then_some(offset as usize)
    }

    /// Week boundaries from `days` before midnight up to now, oldest first.
    ///
    /// Boundaries carry today's UTC offset, so across a DST change they sit
    /// an hour off local midnight.
    pub fn week_starts(&self) -> Vec<DateTime<FixedOffset>> {
        let mut week = self.today_start - Duration::days(self.days as i64);
        let mut starts = vec![week];
        loop {
            week += Duration::days(7);
            if week > self.now {
                break;
            }
            starts.push(week);
        }
        starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    // Wednesday afternoon
    fn window() -> Window {
        Window::new(tz().with_ymd_and_hms(2024, 6, 12, 15, 30, 0).unwrap(), 183)
    }

    fn utc(dt: DateTime<FixedOffset>) -> DateTime<Utc> {
        dt.with_timezone(&Utc)
    }

    #[test]
    fn commit_made_now_is_zero_days_ago() {
        let w = window();
        assert_eq!(w.days_since(utc(w.now())), Some(0));
    }

    #[test]
    fn commit_earlier_today_is_zero_days_ago() {
        let w = window();
        let morning = tz().with_ymd_and_hms(2024, 6, 12, 0, 0, 0).unwrap();
        assert_eq!(w.days_since(utc(morning)), Some(0));
    }

    #[test]
    fn day_boundaries_follow_local_midnight() {
        let w = window();
        let late_yesterday = tz().with_ymd_and_hms(2024, 6, 11, 23, 59, 59).unwrap();
        let early_yesterday = tz().with_ymd_and_hms(2024, 6, 11, 0, 0, 0).unwrap();
        let two_days = tz().with_ymd_and_hms(2024, 6, 10, 23, 0, 0).unwrap();
        assert_eq!(w.days_since(utc(late_yesterday)), Some(1));
        assert_eq!(w.days_since(utc(early_yesterday)), Some(1));
        assert_eq!(w.days_since(utc(two_days)), Some(2));
    }

    #[test]
    fn window_edge_is_183_days() {
        let w = window();
        let edge = utc(w.now()) - Duration::days(183);
        let beyond = utc(w.now()) - Duration::days(184);
        assert_eq!(w.days_since(edge), Some(183));
        assert_eq!(w.days_since(beyond), None);
    }

    #[test]
    fn today_offset_per_weekday() {
        // 2024-06-10 is a Monday
        for (day, expected) in (10..=16).zip(1..=7) {
            let w = Window::new(tz().with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(), 183);
            assert_eq!(w.today_offset(), expected);
        }
    }

    #[test]
    fn offset_shifts_by_weekday_and_drops_overflow() {
        let w = window();
        assert_eq!(w.today_offset(), 3);
        assert_eq!(w.offset_of(utc(w.now())), Some(3));
        assert_eq!(w.offset_of(utc(w.now()) - Duration::days(179)), Some(182));
        assert_eq!(w.offset_of(utc(w.now()) - Duration::days(180)), None);
    }

    #[test]
    fn week_starts_step_weekly_up_to_now() {
        let w = window();
        let starts = w.week_starts();
        assert_eq!(starts.len(), 27);
        assert_eq!(
            starts[0],
            tz().with_ymd_and_hms(2023, 12, 12, 0, 0, 0).unwrap()
        );
        assert!(starts.windows(2).all(|p| p[1] - p[0] == Duration::days(7)));
        assert!(*starts.last().unwrap() <= w.now());
    }
}
