//! The fields, validation and form inputs shared by income and recurring payments.

mod core;
mod form;

pub(crate) use core::map_details_row;
pub use core::{Amount, Choice, RecordDetails, RecordForm, RecordId};
pub use form::{FormTarget, RecordFormDefaults, record_form};
