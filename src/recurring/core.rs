//! Recurring payments and the database queries that manage them.

use rusqlite::{Connection, Row, params};

use crate::{
    Error,
    record::{Choice, RecordDetails, RecordId, map_details_row},
};

/// What a recurring payment is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurringCategory {
    BillAndUtilities,
    CreditCardPayment,
    CarPayment,
    Insurance,
    Loan,
    Mortgage,
    MonthlySubscription,
    Rent,
}

impl Choice for RecurringCategory {
    const ALL: &'static [Self] = &[
        Self::BillAndUtilities,
        Self::CreditCardPayment,
        Self::CarPayment,
        Self::Insurance,
        Self::Loan,
        Self::Mortgage,
        Self::MonthlySubscription,
        Self::Rent,
    ];

    fn value(&self) -> &'static str {
        match self {
            Self::BillAndUtilities => "bill_and_utilities",
            Self::CreditCardPayment => "credit_card_payment",
            Self::CarPayment => "car_payment",
            Self::Insurance => "insurance",
            Self::Loan => "loan",
            Self::Mortgage => "mortgage",
            Self::MonthlySubscription => "monthly_subscription",
            Self::Rent => "rent",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::BillAndUtilities => "Bill and Utilities",
            Self::CreditCardPayment => "Credit Card Payment",
            Self::CarPayment => "Car Payment",
            Self::Insurance => "Insurance",
            Self::Loan => "Loan",
            Self::Mortgage => "Mortgage",
            Self::MonthlySubscription => "Monthly Subscription",
            Self::Rent => "Rent",
        }
    }
}

/// How a recurring payment is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurringPaymentMethod {
    Cash,
    Check,
    CreditCard,
    DebitCard,
    MobilePayment,
    PayrollCard,
}

impl Choice for RecurringPaymentMethod {
    const ALL: &'static [Self] = &[
        Self::Cash,
        Self::Check,
        Self::CreditCard,
        Self::DebitCard,
        Self::MobilePayment,
        Self::PayrollCard,
    ];

    fn value(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::MobilePayment => "mobile_payment",
            Self::PayrollCard => "payroll_card",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Check => "Check",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::MobilePayment => "Mobile Payment (Paypal, CashApp, Zelle, etc.)",
            Self::PayrollCard => "Payroll Card",
        }
    }
}

/// The details of a recurring payment. The date is the next due date.
pub type RecurringDetails = RecordDetails<RecurringCategory, RecurringPaymentMethod>;

/// A recurring payment as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Recurring {
    pub id: RecordId,
    pub details: RecurringDetails,
}

pub fn create_recurring_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS recurring (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            amount TEXT NOT NULL,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            payment_method TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn create_recurring(
    details: RecurringDetails,
    connection: &Connection,
) -> Result<Recurring, Error> {
    connection.execute(
        "INSERT INTO recurring (name, amount, date, category, payment_method)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            details.name,
            details.amount.to_string(),
            details.date.to_iso_timestamp(),
            details.category.value(),
            details.payment_method.value(),
        ],
    )?;

    Ok(Recurring {
        id: connection.last_insert_rowid(),
        details,
    })
}

/// Retrieve the recurring payment with `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a recurring payment,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_recurring(id: RecordId, connection: &Connection) -> Result<Recurring, Error> {
    connection
        .prepare(
            "SELECT id, name, amount, date, category, payment_method FROM recurring
            WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_recurring_row)
        .map_err(Error::from)
}

/// Retrieve every recurring payment in the order they fall due within a
/// month, e.g. a payment due on the 3rd comes before one due on the 20th.
pub fn get_all_recurring(connection: &Connection) -> Result<Vec<Recurring>, Error> {
    connection
        .prepare(
            "SELECT id, name, amount, date, category, payment_method FROM recurring
            ORDER BY substr(date, 9, 2) ASC, id ASC",
        )?
        .query_map([], map_recurring_row)?
        .map(|maybe_recurring| maybe_recurring.map_err(Error::from))
        .collect()
}

/// Overwrite the stored fields of the recurring payment with `id`.
///
/// # Errors
///
/// Returns [Error::UpdateMissingRecurring] if there is no recurring payment with `id`.
pub fn update_recurring(
    id: RecordId,
    details: &RecurringDetails,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE recurring
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

    match rows_affected {
        0 => Err(Error::UpdateMissingRecurring),
        _ => Ok(()),
    }
}

fn map_recurring_row(row: &Row) -> Result<Recurring, rusqlite::Error> {
    Ok(Recurring {
        id: row.get(0)?,
        details: map_details_row(row, 1)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        date::CalendarDate,
        recurring::{
            RecurringCategory, RecurringDetails, RecurringPaymentMethod, create_recurring,
            create_recurring_table, get_all_recurring, get_recurring, update_recurring,
        },
        record::Amount,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_recurring_table(&connection).unwrap();
        connection
    }

    fn details(name: &str, date: &str) -> RecurringDetails {
        RecurringDetails {
            name: name.to_owned(),
            amount: Amount::new("49.99").unwrap(),
            date: CalendarDate::parse(date).unwrap(),
            category: RecurringCategory::MonthlySubscription,
            payment_method: RecurringPaymentMethod::CreditCard,
        }
    }

    #[test]
    fn create_and_get_recurring() {
        let connection = get_test_connection();
        let want = create_recurring(details("Internet", "2024-01-15"), &connection).unwrap();

        assert_eq!(get_recurring(want.id, &connection), Ok(want));
    }

    #[test]
    fn get_missing_recurring_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(get_recurring(3, &connection), Err(Error::NotFound));
    }

    #[test]
    fn lists_by_due_day() {
        let connection = get_test_connection();
        let rent = create_recurring(details("Rent", "2024-03-20"), &connection).unwrap();
        let phone = create_recurring(details("Phone", "2024-05-03"), &connection).unwrap();
        let gym = create_recurring(details("Gym", "2023-12-11"), &connection).unwrap();

        let got = get_all_recurring(&connection).unwrap();

        assert_eq!(got, vec![phone, gym, rent]);
    }

    #[test]
    fn update_recurring_overwrites_fields() {
        let connection = get_test_connection();
        let recurring = create_recurring(details("Internet", "2024-01-15"), &connection).unwrap();
        let new_details = RecurringDetails {
            payment_method: RecurringPaymentMethod::DebitCard,
            ..details("Fibre", "2024-01-16")
        };

        update_recurring(recurring.id, &new_details, &connection).unwrap();

        assert_eq!(
            get_recurring(recurring.id, &connection).map(|recurring| recurring.details),
            Ok(new_details)
        );
    }

    #[test]
    fn update_missing_recurring_fails() {
        let connection = get_test_connection();

        assert_eq!(
            update_recurring(9, &details("Internet", "2024-01-15"), &connection),
            Err(Error::UpdateMissingRecurring)
        );
    }
}
