//! Recurring payments such as rent, bills and subscriptions.

mod core;
mod create;
mod edit;
mod page;

pub use core::{
    Recurring, RecurringCategory, RecurringDetails, RecurringPaymentMethod, create_recurring,
    create_recurring_table, get_all_recurring, get_recurring, update_recurring,
};
pub use create::{create_recurring_endpoint, get_new_recurring_page};
pub use edit::{get_edit_recurring_page, update_recurring_endpoint};
pub use page::get_recurring_page;
