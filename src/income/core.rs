//! Income records and the database queries that manage them.

use rusqlite::{Connection, Row, params};

use crate::{
    Error,
    aggregation::MonthlyRecord,
    record::{Choice, RecordDetails, RecordId, map_details_row},
};

/// Where an income came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeCategory {
    Salary,
    Business,
    Investments,
    RentalIncome,
    Pensions,
}

impl Choice for IncomeCategory {
    const ALL: &'static [Self] = &[
        Self::Salary,
        Self::Business,
        Self::Investments,
        Self::RentalIncome,
        Self::Pensions,
    ];

    fn value(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Business => "business",
            Self::Investments => "investments",
            Self::RentalIncome => "rental_income",
            Self::Pensions => "pensions",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Business => "Business",
            Self::Investments => "Investments",
            Self::RentalIncome => "Rental Income",
            Self::Pensions => "Pensions",
        }
    }
}

/// How an income was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomePaymentMethod {
    Cash,
    Check,
    DirectDeposit,
    MobilePayment,
    PayrollCard,
}

impl Choice for IncomePaymentMethod {
    const ALL: &'static [Self] = &[
        Self::Cash,
        Self::Check,
        Self::DirectDeposit,
        Self::MobilePayment,
        Self::PayrollCard,
    ];

    fn value(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::DirectDeposit => "direct_deposit",
            Self::MobilePayment => "mobile_payment",
            Self::PayrollCard => "payroll_card",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Check => "Check",
            Self::DirectDeposit => "Direct Deposit",
            Self::MobilePayment => "Mobile Payment (Paypal, CashApp, Zelle, etc.)",
            Self::PayrollCard => "Payroll Card",
        }
    }
}

/// The details of an income record.
pub type IncomeDetails = RecordDetails<IncomeCategory, IncomePaymentMethod>;

/// An income record as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    pub id: RecordId,
    pub details: IncomeDetails,
}

/// The amount and date of an income exactly as stored, for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRecord {
    pub amount: String,
    pub date: String,
}

impl MonthlyRecord for IncomeRecord {
    fn amount(&self) -> &str {
        &self.amount
    }

    fn date(&self) -> &str {
        &self.date
    }
}

pub fn create_income_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS income (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            amount TEXT NOT NULL,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            payment_method TEXT NOT NULL
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_income_date ON income(date)",
        (),
    )?;

    Ok(())
}

/// Add a new income record.
///
/// # Errors
///
/// Returns [Error::SqlError] if the record could not be inserted.
pub fn create_income(details: IncomeDetails, connection: &Connection) -> Result<Income, Error> {
    connection.execute(
        "INSERT INTO income (name, amount, date, category, payment_method)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            details.name,
            details.amount.to_string(),
            details.date.to_iso_timestamp(),
            details.category.value(),
            details.payment_method.value(),
        ],
    )?;

    Ok(Income {
        id: connection.last_insert_rowid(),
        details,
    })
}

/// Retrieve the income record with `id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no income with `id`, or
/// [Error::SqlError] if a stored column cannot be parsed.
pub fn get_income(id: RecordId, connection: &Connection) -> Result<Income, Error> {
    connection
        .prepare(
            "SELECT id, name, amount, date, category, payment_method FROM income WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_income_row)
        .map_err(Error::from)
}

/// Retrieve every income record, newest first.
///
/// Records with the same date are ordered by ID, newest first.
pub fn get_all_income(connection: &Connection) -> Result<Vec<Income>, Error> {
    connection
        .prepare(
            "SELECT id, name, amount, date, category, payment_method FROM income
            ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_income_row)?
        .map(|maybe_income| maybe_income.map_err(Error::from))
        .collect()
}

/// Retrieve the income received in `month` of `year`, newest first.
pub fn get_income_in_month(
    year: i32,
    month: time::Month,
    connection: &Connection,
) -> Result<Vec<Income>, Error> {
    let prefix = format!("{year:04}-{:02}-%", u8::from(month));

    connection
        .prepare(
            "SELECT id, name, amount, date, category, payment_method FROM income
            WHERE date LIKE ?1
            ORDER BY date DESC, id DESC",
        )?
        .query_map([prefix], map_income_row)?
        .map(|maybe_income| maybe_income.map_err(Error::from))
        .collect()
}

/// Retrieve the raw amount and date of every income record.
///
/// The values are not parsed here, malformed values are reported by
/// [crate::aggregate].
pub fn get_income_records(connection: &Connection) -> Result<Vec<IncomeRecord>, Error> {
    connection
        .prepare("SELECT amount, date FROM income")?
        .query_map([], |row| {
            Ok(IncomeRecord {
                amount: row.get(0)?,
                date: row.get(1)?,
            })
        })?
        .map(|maybe_record| maybe_record.map_err(Error::from))
        .collect()
}

/// Overwrite the stored fields of the income with `id`.
///
/// # Errors
///
/// Returns [Error::UpdateMissingIncome] if there is no income with `id`.
pub fn update_income(
    id: RecordId,
    details: &IncomeDetails,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE income
        SET name = ?1, amount = ?2, date = ?3, category = ?4, payment_method = ?5
        WHERE id = ?6",
        params![
            details.name,
            details.amount.to_string(),
            details.date.to_iso_timestamp(),
            details.category.value(),
            details.payment_method.value(),
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingIncome);
    }

    Ok(())
}

/// Map a row of `id, name, amount, date, category, payment_method` to an [Income].
fn map_income_row(row: &Row) -> Result<Income, rusqlite::Error> {
    Ok(Income {
        id: row.get(0)?,
        details: map_details_row(row, 1)?,
    })
}

/// The sum of the amounts of `income`.
pub fn total_income(income: &[Income]) -> f64 {
    income
        .iter()
        .map(|income| income.details.amount.as_f64())
        .sum()
}
