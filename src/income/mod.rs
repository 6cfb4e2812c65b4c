//! Income tracking.
//!
//! This module contains everything related to income:
//! - The [Income] model, its categories and payment methods
//! - Database functions for storing and querying income
//! - The income page with the monthly income chart
//! - The pages and endpoints for adding and editing income

mod chart;
mod core;
mod create;
mod edit;
mod page;

pub use core::{
    Income, IncomeCategory, IncomeDetails, IncomePaymentMethod, create_income,
    create_income_table, get_all_income, get_income, get_income_in_month, get_income_records,
    total_income, update_income,
};
pub use create::{create_income_endpoint, get_new_income_page};
pub use edit::{get_edit_income_page, update_income_endpoint};
pub use page::get_income_page;
