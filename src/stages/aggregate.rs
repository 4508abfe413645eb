use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::debug;

use crate::models::{DateRange, Period, PeriodAggregate, ResolvedSession};

/// Aggregate zone volumes of the sessions dated within `range`.
///
/// No sessions in range yields a zero-valued aggregate, not an error.
pub fn aggregate(sessions: &[ResolvedSession], range: DateRange) -> PeriodAggregate {
    let in_range: Vec<ResolvedSession> = sessions
        .iter()
        .filter(|s| range.contains(s.date))
        .cloned()
        .collect();

    debug!("Aggregating {} of {} sessions for {}", in_range.len(), sessions.len(), range);

    PeriodAggregate::from_sessions(range, in_range)
}

/// First day of the period containing `date`
pub fn period_start(date: NaiveDate, period: Period) -> NaiveDate {
    match period {
        Period::Day => date,
        Period::Week => {
            let offset = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(offset)).unwrap_or(date)
        }
        Period::Month => date.with_day(1).unwrap_or(date),
    }
}

/// First day of the period after the one containing `date`
fn next_period_start(date: NaiveDate, period: Period) -> Option<NaiveDate> {
    let start = period_start(date, period);
    match period {
        Period::Day => start.succ_opt(),
        Period::Week => start.checked_add_days(Days::new(7)),
        Period::Month => start.checked_add_months(Months::new(1)),
    }
}

/// Split a range into calendar periods, clipping the first and last to the range
pub fn period_buckets(range: DateRange, period: Period) -> Vec<DateRange> {
    let mut buckets = Vec::new();
    let mut cursor = range.start;

    while cursor <= range.end {
        let next = next_period_start(cursor, period);
        let bucket_end = next
            .and_then(|n| n.pred_opt())
            .map_or(range.end, |last| last.min(range.end));
        buckets.push(DateRange::new(cursor, bucket_end));

        match next {
            Some(n) if bucket_end < range.end => cursor = n,
            _ => break,
        }
    }

    buckets
}

/// Aggregate each calendar period of the range separately
pub fn aggregate_by_period(
    sessions: &[ResolvedSession],
    range: DateRange,
    period: Period,
) -> Vec<PeriodAggregate> {
    period_buckets(range, period)
        .into_iter()
        .map(|bucket| aggregate(sessions, bucket))
        .collect()
}
