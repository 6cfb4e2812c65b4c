//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, error_page::ErrorPage};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date string could not be parsed as a `YYYY-MM-DD` calendar date.
    ///
    /// The string is the offending input.
    #[error("could not parse \"{0}\" as a YYYY-MM-DD date")]
    InvalidDate(String),

    /// An amount could not be parsed as a non-negative decimal number, or an
    /// amount entered by the user was not greater than zero.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A form was submitted with one or more required fields left empty.
    #[error("missing required information")]
    MissingFields,

    /// The category in a submitted form is not one of the known categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The payment method in a submitted form is not one of the known methods.
    #[error("\"{0}\" is not a valid payment method")]
    InvalidPaymentMethod(String),

    /// An edit form was submitted without changing anything.
    #[error("nothing to update")]
    NothingToUpdate,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update an income record that does not exist
    #[error("tried to update an income record that is not in the database")]
    UpdateMissingIncome,

    /// Tried to update a recurring payment that does not exist
    #[error("tried to update a recurring payment that is not in the database")]
    UpdateMissingRecurring,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => ErrorPage::not_found().into_response(),
            Error::InvalidTimezoneError(timezone) => ErrorPage::internal(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response(),
            Error::InvalidDate(_) | Error::InvalidAmount(_) => ErrorPage::internal(
                "Corrupted Records",
                "Some stored records have an invalid date or amount. \
                Check the server logs for the offending values.",
            )
            .into_response(),
            Error::DatabaseLockError => ErrorPage::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::MissingFields => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Missing required information".to_owned(),
                    details: "Fill in the name, amount, date, category and payment method."
                        .to_owned(),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid amount".to_owned(),
                    details: format!("{amount:?} is not an amount greater than zero."),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid date".to_owned(),
                    details: format!("{date:?} is not a valid date."),
                },
            ),
            Error::InvalidCategory(category) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid category".to_owned(),
                    details: format!("{category:?} is not one of the available categories."),
                },
            ),
            Error::InvalidPaymentMethod(method) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid payment method".to_owned(),
                    details: format!("{method:?} is not one of the available payment methods."),
                },
            ),
            Error::NothingToUpdate => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Nothing to update".to_owned(),
                    details: "Change at least one field before saving.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::UpdateMissingIncome => (
                StatusCode::NOT_FOUND,
                Alert {
                    message: "Could not update income".to_owned(),
                    details: "The income could not be found.".to_owned(),
                },
            ),
            Error::UpdateMissingRecurring => (
                StatusCode::NOT_FOUND,
                Alert {
                    message: "Could not update recurring payment".to_owned(),
                    details: "The recurring payment could not be found.".to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn query_returned_no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_render_bad_request_alerts() {
        let errors = [
            Error::MissingFields,
            Error::InvalidAmount("-1".to_owned()),
            Error::InvalidDate("yesterday".to_owned()),
            Error::InvalidCategory("lottery".to_owned()),
            Error::InvalidPaymentMethod("barter".to_owned()),
            Error::NothingToUpdate,
        ];

        for error in errors {
            let want = format!("{error}");
            let response = error.into_alert_response();
            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "want bad request for {want}"
            );
        }
    }

    #[test]
    fn missing_records_render_not_found_alerts() {
        assert_eq!(
            Error::UpdateMissingIncome.into_alert_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::UpdateMissingRecurring.into_alert_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
