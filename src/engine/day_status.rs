use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::model::attendance::Attendance;

/// Sub-status of a day that has an attendance record, picked by elapsed
/// hours between check-in and check-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
pub enum WorkedStatus {
    Absent,
    #[strum(serialize = "Half Day")]
    #[serde(rename = "Half Day")]
    HalfDay,
    #[strum(serialize = "Early Leave")]
    #[serde(rename = "Early Leave")]
    EarlyLeave,
    #[strum(serialize = "Short Leave")]
    #[serde(rename = "Short Leave")]
    ShortLeave,
    Present,
    Overtime,
    #[strum(serialize = "Forgot to Checkout")]
    #[serde(rename = "Forgot to Checkout")]
    ForgotCheckout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
#[serde(tag = "status", content = "detail")]
pub enum DayStatus {
    Present(WorkedStatus),
    Holiday,
    /// Non-working weekday
    Off,
    /// Before the employee's join date
    NA,
    Absent,
    Upcoming,
}

const HOURS_ABSENT: f64 = 4.0;
const HOURS_HALF_DAY: f64 = 4.5;
const HOURS_EARLY_LEAVE: f64 = 8.0;
const HOURS_FULL_DAY: f64 = 9.0;
const HOURS_OVERTIME: f64 = 9.05;

fn worked_status(record: &Attendance, today: NaiveDate) -> WorkedStatus {
    let (check_in, check_out) = match (record.check_in, record.check_out) {
        (Some(ci), Some(co)) => (ci, co),
        // Open record: still on the clock today, stale otherwise.
        _ if record.date == today => return WorkedStatus::Present,
        _ => return WorkedStatus::ForgotCheckout,
    };

    let hours = (check_out - check_in).num_seconds() as f64 / 3600.0;
    if hours < HOURS_ABSENT {
        WorkedStatus::Absent
    } else if hours < HOURS_HALF_DAY {
        WorkedStatus::HalfDay
    } else if hours < HOURS_EARLY_LEAVE {
        WorkedStatus::EarlyLeave
    } else if hours < HOURS_FULL_DAY {
        WorkedStatus::ShortLeave
    } else if hours < HOURS_OVERTIME {
        WorkedStatus::Present
    } else {
        WorkedStatus::Overtime
    }
}

/// Classify one calendar day from pre-fetched records.
///
/// Lookup is a linear scan by date equality; the inputs are a single month of
/// rows at most, fetched once per calendar request.
pub fn classify_day(
    date: NaiveDate,
    today: NaiveDate,
    join_date: NaiveDate,
    records: &[Attendance],
    holidays: &[NaiveDate],
    working_weekdays: &[Weekday],
) -> DayStatus {
    if date < join_date {
        return DayStatus::NA;
    }
    if holidays.contains(&date) {
        return DayStatus::Holiday;
    }
    if !working_weekdays.contains(&date.weekday()) {
        return DayStatus::Off;
    }
    if let Some(record) = records.iter().find(|r| r.date == date) {
        return DayStatus::Present(worked_status(record, today));
    }
    if date > today {
        DayStatus::Upcoming
    } else {
        DayStatus::Absent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    const WORK_WEEK: [Weekday; 6] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn record(date: NaiveDate, check_in: Option<NaiveTime>, check_out: Option<NaiveTime>) -> Attendance {
        Attendance {
            id: 1,
            employee_id: 7,
            date,
            check_in,
            check_out,
        }
    }

    #[test]
    fn precedence_na_holiday_off() {
        let today = d(2026, 3, 20);
        let join = d(2026, 3, 10);

        assert_eq!(
            classify_day(d(2026, 3, 9), today, join, &[], &[], &WORK_WEEK),
            DayStatus::NA
        );
        // Holiday wins even with an attendance record on file.
        let rec = record(d(2026, 3, 17), Some(t(9, 0)), Some(t(18, 0)));
        assert_eq!(
            classify_day(d(2026, 3, 17), today, join, &[rec], &[d(2026, 3, 17)], &WORK_WEEK),
            DayStatus::Holiday
        );
        // 2026-03-15 is a Sunday.
        assert_eq!(
            classify_day(d(2026, 3, 15), today, join, &[], &[], &WORK_WEEK),
            DayStatus::Off
        );
    }

    #[test]
    fn working_day_without_record_splits_on_today() {
        let today = d(2026, 3, 20);
        let join = d(2026, 3, 2);
        assert_eq!(
            classify_day(d(2026, 3, 18), today, join, &[], &[], &WORK_WEEK),
            DayStatus::Absent
        );
        assert_eq!(
            classify_day(d(2026, 3, 20), today, join, &[], &[], &WORK_WEEK),
            DayStatus::Absent,
            "today with no record counts as absent, not upcoming"
        );
        assert_eq!(
            classify_day(d(2026, 3, 23), today, join, &[], &[], &WORK_WEEK),
            DayStatus::Upcoming
        );
    }

    #[test]
    fn elapsed_hour_bands() {
        let today = d(2026, 3, 20);
        let join = d(2026, 3, 2);
        let day = d(2026, 3, 18); // Wednesday

        let classify = |check_out: NaiveTime| {
            let rec = record(day, Some(t(9, 0)), Some(check_out));
            classify_day(day, today, join, &[rec], &[], &WORK_WEEK)
        };

        assert_eq!(classify(t(12, 59)), DayStatus::Present(WorkedStatus::Absent));
        assert_eq!(classify(t(13, 15)), DayStatus::Present(WorkedStatus::HalfDay));
        assert_eq!(classify(t(16, 0)), DayStatus::Present(WorkedStatus::EarlyLeave));
        assert_eq!(classify(t(17, 30)), DayStatus::Present(WorkedStatus::ShortLeave));
        assert_eq!(classify(t(18, 1)), DayStatus::Present(WorkedStatus::Present));
        assert_eq!(classify(t(18, 30)), DayStatus::Present(WorkedStatus::Overtime));
    }

    #[test]
    fn open_record_is_present_today_and_stale_afterwards() {
        let join = d(2026, 3, 2);
        let day = d(2026, 3, 18);
        let rec = record(day, Some(t(9, 0)), None);

        assert_eq!(
            classify_day(day, day, join, &[rec.clone()], &[], &WORK_WEEK),
            DayStatus::Present(WorkedStatus::Present)
        );
        assert_eq!(
            classify_day(day, d(2026, 3, 19), join, &[rec], &[], &WORK_WEEK),
            DayStatus::Present(WorkedStatus::ForgotCheckout)
        );
    }
}
