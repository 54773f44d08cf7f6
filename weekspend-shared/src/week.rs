/// Week bucketing and the yearly spend aggregation
///
/// Every transaction belongs to a "week bucket": the Monday 00:00:00 UTC that
/// starts the ISO week of its `paid_at` timestamp. Budgets are keyed by the
/// same convention, so the truncation here is the single source of truth:
/// it runs at write time (to derive `for_week`) and again at read time as an
/// invariant check.
///
/// The aggregation half of this module turns per-week spend totals into the
/// display ordering the UI wants: grouped by calendar year, years descending,
/// weeks descending within each year.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use weekspend_shared::week::week_start;
///
/// // Wednesday 2024-01-03 belongs to the week of Monday 2024-01-01
/// let paid_at = Utc.with_ymd_and_hms(2024, 1, 3, 15, 30, 0).unwrap();
/// assert_eq!(week_start(paid_at), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// ```

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Truncates a timestamp to the Monday 00:00:00 UTC starting its ISO week
///
/// Pure and idempotent: `week_start(week_start(ts)) == week_start(ts)`.
pub fn week_start(ts: DateTime<Utc>) -> DateTime<Utc> {
    let monday = week_start_date(ts.date_naive());
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Truncates a date to the Monday of its ISO week
///
/// Used to normalize budget `applies_to` keys.
pub fn week_start_date(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Spend total for one week bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeekSpend {
    /// Week bucket (Monday-aligned)
    pub week: DateTime<Utc>,

    /// Summed amount for the week, as fixed-point decimal
    pub amount: Decimal,
}

/// Spend totals for one calendar year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpend {
    /// Calendar year of the contained week buckets
    pub year: i32,

    /// Week totals within the year
    pub weeks: Vec<WeekSpend>,
}

/// Partitions week totals by the calendar year of their week bucket
///
/// Accumulation order is preserved within each year; no ordering guarantees
/// until [`sort_spend_by_year`] runs.
pub fn group_spend_by_year(rows: Vec<WeekSpend>) -> Vec<YearSpend> {
    let mut grouped: Vec<YearSpend> = Vec::new();

    for row in rows {
        let year = row.week.year();
        match grouped.iter_mut().find(|y| y.year == year) {
            Some(existing) => existing.weeks.push(row),
            None => grouped.push(YearSpend {
                year,
                weeks: vec![row],
            }),
        }
    }

    grouped
}

/// Sorts grouped week totals most-recent-first
///
/// Years descending, weeks descending within each year. The sort is stable,
/// so duplicate week timestamps keep their accumulation order.
pub fn sort_spend_by_year(mut grouped: Vec<YearSpend>) -> Vec<YearSpend> {
    grouped.sort_by(|a, b| b.year.cmp(&a.year));
    for year in &mut grouped {
        year.weeks.sort_by(|a, b| b.week.cmp(&a.week));
    }
    grouped
}
