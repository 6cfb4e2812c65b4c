//! Domain types shared by income and recurring payments.

use std::fmt::Display;

use rusqlite::types::Type;
use serde::Deserialize;

use crate::{Error, date::CalendarDate};

/// Alias for the integer type used for record IDs in the database.
pub type RecordId = i64;

/// A fixed set of options shown in a `<select>`, e.g. income categories.
pub trait Choice: Copy + PartialEq + 'static {
    /// Every option, in the order they are shown.
    const ALL: &'static [Self];

    /// The value submitted by forms and stored in the database.
    fn value(&self) -> &'static str;

    /// The text shown to the user.
    fn label(&self) -> &'static str;

    /// Find the option whose [Choice::value] is `value`.
    fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.value() == value)
    }
}

/// An amount of money greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Parse a user-entered amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `text` is not a finite number greater than zero.
    pub fn new(text: &str) -> Result<Self, Error> {
        match text.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(Self(amount)),
            _ => Err(Error::InvalidAmount(text.to_owned())),
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// Displays as a plain decimal string, the form amounts are stored in.
impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable fields of an income or recurring payment record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDetails<C, M> {
    pub name: String,
    pub amount: Amount,
    pub date: CalendarDate,
    pub category: C,
    pub payment_method: M,
}

/// The form data for creating or editing a record.
///
/// Every field is optional so that missing fields can be reported together
/// with one alert instead of a generic deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct RecordForm {
    pub name: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

impl RecordForm {
    /// Validate a form for creating a new record.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingFields] if any field is empty, otherwise the
    /// error for the first field that fails to parse.
    pub fn validate<C: Choice, M: Choice>(&self) -> Result<RecordDetails<C, M>, Error> {
        let (Some(name), Some(amount), Some(date), Some(category), Some(payment_method)) = (
            non_empty(&self.name),
            non_empty(&self.amount),
            non_empty(&self.date),
            non_empty(&self.category),
            non_empty(&self.payment_method),
        ) else {
            return Err(Error::MissingFields);
        };

        Ok(RecordDetails {
            name: name.to_owned(),
            amount: Amount::new(amount)?,
            date: CalendarDate::parse(date)?,
            category: parse_choice(category, Error::InvalidCategory)?,
            payment_method: parse_choice(payment_method, Error::InvalidPaymentMethod)?,
        })
    }

    /// Apply an edit form on top of the stored record.
    ///
    /// Empty fields keep the stored value.
    ///
    /// # Errors
    ///
    /// Returns [Error::NothingToUpdate] if the result is identical to
    /// `original`, otherwise the error for the first field that fails to parse.
    pub fn merge_onto<C: Choice, M: Choice>(
        &self,
        original: &RecordDetails<C, M>,
    ) -> Result<RecordDetails<C, M>, Error> {
        let merged = RecordDetails {
            name: non_empty(&self.name)
                .map(str::to_owned)
                .unwrap_or_else(|| original.name.clone()),
            amount: non_empty(&self.amount)
                .map(Amount::new)
                .transpose()?
                .unwrap_or(original.amount),
            date: non_empty(&self.date)
                .map(CalendarDate::parse)
                .transpose()?
                .unwrap_or(original.date),
            category: non_empty(&self.category)
                .map(|value| parse_choice(value, Error::InvalidCategory))
                .transpose()?
                .unwrap_or(original.category),
            payment_method: non_empty(&self.payment_method)
                .map(|value| parse_choice(value, Error::InvalidPaymentMethod))
                .transpose()?
                .unwrap_or(original.payment_method),
        };

        if &merged == original {
            return Err(Error::NothingToUpdate);
        }

        Ok(merged)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_choice<T: Choice>(value: &str, error: fn(String) -> Error) -> Result<T, Error> {
    T::from_value(value).ok_or_else(|| error(value.to_owned()))
}

/// Parse the raw columns of a stored record.
///
/// `first_column` is the index of the name column; amount, date, category and
/// payment method must follow it in that order.
pub(crate) fn map_details_row<C: Choice, M: Choice>(
    row: &rusqlite::Row,
    first_column: usize,
) -> Result<RecordDetails<C, M>, rusqlite::Error> {
    let name: String = row.get(first_column)?;
    let raw_amount: String = row.get(first_column + 1)?;
    let raw_date: String = row.get(first_column + 2)?;
    let raw_category: String = row.get(first_column + 3)?;
    let raw_method: String = row.get(first_column + 4)?;

    let conversion_error = |offset: usize, error: Error| {
        rusqlite::Error::FromSqlConversionFailure(first_column + offset, Type::Text, Box::new(error))
    };

    Ok(RecordDetails {
        name,
        amount: Amount::new(&raw_amount).map_err(|error| conversion_error(1, error))?,
        date: CalendarDate::parse(&raw_date).map_err(|error| conversion_error(2, error))?,
        category: parse_choice(&raw_category, Error::InvalidCategory)
            .map_err(|error| conversion_error(3, error))?,
        payment_method: parse_choice(&raw_method, Error::InvalidPaymentMethod)
            .map_err(|error| conversion_error(4, error))?,
    })
}
