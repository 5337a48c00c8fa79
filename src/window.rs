use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The calendar slices a dashboard run reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateWindow {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    pub month: u32,
    pub year: i32,
}

impl DateWindow {
    /// Resolves the window from an injected instant, in that instant's own time zone.
    pub fn resolve<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::from_today(now.date_naive())
    }

    pub fn from_today(today: NaiveDate) -> Self {
        // Only fails on NaiveDate::MIN, where there is no previous day to report on.
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

        Self {
            today,
            yesterday,
            month: today.month(),
            year: today.year(),
        }
    }

    pub fn in_current_month(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    pub fn is_yesterday(&self, date: NaiveDate) -> bool {
        date == self.yesterday
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_resolve_mid_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 16, 9, 30, 0).unwrap();
        let window = DateWindow::resolve(&now);

        assert_eq!(window.today, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        assert_eq!(window.yesterday, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(window.month, 3);
        assert_eq!(window.year, 2024);
    }

    #[test]
    fn test_first_of_month_yesterday_is_previous_month() {
        let window = DateWindow::from_today(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(window.yesterday, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(window.month, 3);
        assert!(!window.in_current_month(window.yesterday));

        let window = DateWindow::from_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(window.yesterday, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(window.year, 2024);
    }

    #[test]
    fn test_resolve_uses_local_date_of_instant() {
        // 23:30 UTC on the 15th is already the 16th at UTC+3.
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = Utc
            .with_ymd_and_hms(2024, 3, 15, 23, 30, 0)
            .unwrap()
            .with_timezone(&offset);
        let window = DateWindow::resolve(&now);
        assert_eq!(window.today, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn test_month_membership_checks_year() {
        let window = DateWindow::from_today(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        assert!(window.in_current_month(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(!window.in_current_month(NaiveDate::from_ymd_opt(2023, 3, 16).unwrap()));
        assert!(window.is_yesterday(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
    }
}
