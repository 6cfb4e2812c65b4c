//! Database initialisation.

use rusqlite::{Connection, TransactionBehavior};

use crate::{Error, income::create_income_table, recurring::create_recurring_table};

/// Create every table the app needs if it does not exist yet.
///
/// All tables are created in one exclusive transaction, so either all of them
/// exist afterwards or none of the changes are kept.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_income_table(&transaction)?;
    create_recurring_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
