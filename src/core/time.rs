use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Clock abstracts access to the current date so validation stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Real-time clock backed by the system's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Pins the clock to noon on the given date.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// First instant of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_bounds_cover_whole_day() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert!(start_of_day(date) < end_of_day(date));
        assert_eq!(end_of_day(date).date(), date);
        assert_eq!(start_of_day(date).date(), date);
    }

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(FixedClock::on(date).today(), date);
    }
}
