//! Aggregation helpers
//!
//! Pure, stateless functions over a collection snapshot. Nothing in
//! here touches the store; services load a snapshot and hand it in.

use chrono::{Datelike, NaiveDate};

/// Sum an amount across every record.
pub fn sum<T>(records: &[T], amount: impl Fn(&T) -> f64) -> f64 {
    records.iter().map(amount).sum()
}

/// Records whose date falls in the given calendar month (1-based, as
/// chrono counts months).
pub fn filter_by_period<T>(
    records: &[T],
    date: impl Fn(&T) -> NaiveDate,
    year: i32,
    month: u32,
) -> Vec<&T> {
    records
        .iter()
        .filter(|record| {
            let d = date(record);
            d.year() == year && d.month() == month
        })
        .collect()
}

/// Total amount for the given calendar month.
pub fn monthly_total<T>(
    records: &[T],
    date: impl Fn(&T) -> NaiveDate,
    amount: impl Fn(&T) -> f64,
    year: i32,
    month: u32,
) -> f64 {
    filter_by_period(records, date, year, month)
        .into_iter()
        .map(amount)
        .sum()
}

/// Monthly total divided by the full calendar month length (28-31
/// days), never by elapsed days. Early in the month the average is
/// diluted on purpose; that is the dashboard's long-standing behavior.
pub fn daily_average<T>(
    records: &[T],
    date: impl Fn(&T) -> NaiveDate,
    amount: impl Fn(&T) -> f64,
    year: i32,
    month: u32,
) -> f64 {
    let total = monthly_total(records, date, amount, year, month);
    let days = days_in_month(year, month);
    if days == 0 {
        return 0.0;
    }
    total / days as f64
}

/// Number of days in a calendar month; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return 0,
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(n) => (n - first).num_days() as u32,
        None => 0,
    }
}

/// Summed amount per key, keys in first-seen order.
pub fn group_totals<T, K>(
    records: &[T],
    key: impl Fn(&T) -> K,
    amount: impl Fn(&T) -> f64,
) -> Vec<(K, f64)>
where
    K: PartialEq,
{
    let mut totals: Vec<(K, f64)> = Vec::new();
    for record in records {
        let k = key(record);
        let value = amount(record);
        match totals.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, total)) => *total += value,
            None => totals.push((k, value)),
        }
    }
    totals
}

/// Case-insensitive substring match across one or more fields,
/// OR-combined. An empty query returns the full input unchanged.
pub fn filter_by_text<'a, T>(
    records: &'a [T],
    query: &str,
    fields: impl Fn(&T) -> Vec<String>,
) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| {
            fields(record)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
