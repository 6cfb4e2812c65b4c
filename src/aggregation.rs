//! Monthly aggregation of finance records for the income chart.
//!
//! [aggregate] turns any list of records into exactly twelve buckets, one per
//! calendar month from January to December. Records from different years that
//! fall in the same month are summed into the same bucket.
//!
//! Every bucket is labelled with the same caller-supplied year. This mirrors
//! how the chart has always been labelled, even though a bucket may contain
//! amounts from other years.

use crate::{
    Error,
    date::{CalendarDate, SHORT_MONTH_LABELS},
};

/// The number of buckets produced by [aggregate].
pub const MONTHS_IN_YEAR: usize = 12;

/// A finance record that can be bucketed by month.
pub trait MonthlyRecord {
    /// The amount as a decimal string, e.g. "1500.50".
    fn amount(&self) -> &str;

    /// The date as an ISO-8601 string starting with `YYYY-MM-DD`.
    fn date(&self) -> &str;
}

/// The total amount for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Three-letter month label, e.g. "Jan".
    pub month: &'static str,
    /// The year label shared by every bucket.
    pub year: String,
    /// Sum of the amounts of every record in this month.
    pub amount: f64,
}

impl Bucket {
    /// Hand this bucket's month and year labels to `on_select`.
    ///
    /// This is the hook the chart's click handler uses: the labels are passed
    /// through unchanged and whatever happens next is up to the caller.
    pub fn select<T>(&self, on_select: impl FnOnce(&str, &str) -> T) -> T {
        on_select(self.month, &self.year)
    }
}

/// Twelve buckets in calendar order, January first.
pub type MonthlyBuckets = [Bucket; MONTHS_IN_YEAR];

/// Sum `records` into one bucket per calendar month.
///
/// `current_year` only labels the buckets, it never decides which bucket a
/// record goes into.
///
/// # Errors
///
/// Fails on the first record with a malformed date ([Error::InvalidDate]) or
/// an amount that is not a finite, non-negative number ([Error::InvalidAmount]).
/// Malformed records are never skipped. Impossible dates such as `2023-02-30`
/// are rejected as malformed rather than rolled over into the next month.
pub fn aggregate<R: MonthlyRecord>(
    records: &[R],
    current_year: i32,
) -> Result<MonthlyBuckets, Error> {
    let year = current_year.to_string();
    let mut buckets: MonthlyBuckets = std::array::from_fn(|index| Bucket {
        month: SHORT_MONTH_LABELS[index],
        year: year.clone(),
        amount: 0.0,
    });

    for record in records {
        let date = CalendarDate::parse(record.date())?;
        let amount = parse_amount(record.amount())?;

        buckets[date.month_index()].amount += amount;
    }

    Ok(buckets)
}

fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}
