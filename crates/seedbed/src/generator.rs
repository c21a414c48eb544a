//! Constrained procedural generation helpers
//!
//! Derived fields are produced by construction rather than checked after the
//! fact: totals are split into components that sum back exactly, and date
//! pairs always come out ordered.

use chrono::{DateTime, Duration, Utc};

use crate::fake::Faker;

/// Split an integer total into `parts` non-negative components that sum to
/// exactly `total`. Used for financial breakdowns such as
/// `available + retired + transferred == total`.
pub fn split_total(faker: &mut Faker, total: i64, parts: usize) -> Vec<i64> {
    assert!(parts > 0, "split_total needs at least one part");
    if parts == 1 {
        return vec![total];
    }
    let mut cuts: Vec<i64> = (0..parts - 1).map(|_| faker.range_i64(0, total)).collect();
    cuts.sort_unstable();
    let mut components = Vec::with_capacity(parts);
    let mut previous = 0;
    for cut in cuts {
        components.push(cut - previous);
        previous = cut;
    }
    components.push(total - previous);
    components
}

/// A past instant between `max_days_ago` and `min_days_ago` before `now`
pub fn past_datetime(
    faker: &mut Faker,
    now: DateTime<Utc>,
    min_days_ago: i64,
    max_days_ago: i64,
) -> DateTime<Utc> {
    let days = faker.range_i64(min_days_ago, max_days_ago);
    let minutes = faker.range_i64(0, 24 * 60 - 1);
    now - Duration::days(days) - Duration::minutes(minutes)
}

/// A future instant between `min_days_ahead` and `max_days_ahead` after `now`
pub fn future_datetime(
    faker: &mut Faker,
    now: DateTime<Utc>,
    min_days_ahead: i64,
    max_days_ahead: i64,
) -> DateTime<Utc> {
    let days = faker.range_i64(min_days_ahead, max_days_ahead);
    let minutes = faker.range_i64(0, 24 * 60 - 1);
    now + Duration::days(days) + Duration::minutes(minutes)
}

/// An ordered pair of instants with `start < end`, where `start` lies in the
/// past and `end` at least `min_span_days` later
pub fn date_pair(
    faker: &mut Faker,
    now: DateTime<Utc>,
    max_days_ago: i64,
    min_span_days: i64,
    max_span_days: i64,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = past_datetime(faker, now, 1, max_days_ago);
    let span = faker.range_i64(min_span_days, max_span_days);
    let end = start + Duration::days(span.max(1));
    (start, end)
}

/// An approval instant at or after `submitted`, never after `now`
pub fn approval_after(
    faker: &mut Faker,
    submitted: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let window = (now - submitted).num_minutes().max(0);
    submitted + Duration::minutes(faker.range_i64(0, window))
}
