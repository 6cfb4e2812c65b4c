//! Adding recurring payments.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    record::{FormTarget, RecordForm, RecordFormDefaults, record_form},
    recurring::{RecurringCategory, RecurringDetails, RecurringPaymentMethod, create_recurring},
};

#[derive(Debug, Clone)]
pub struct CreateRecurringState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

pub async fn get_new_recurring_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_RECURRING_VIEW).into_html();
    let defaults = RecordFormDefaults::<RecurringCategory, RecurringPaymentMethod> {
        name: None,
        amount: None,
        date: None,
        category: None,
        payment_method: None,
        date_label: "Next due date",
        required: true,
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Add Recurring Payment" }

            (record_form(
                FormTarget::Create(endpoints::POST_RECURRING),
                &defaults,
                "Add Recurring Payment",
            ))
        }
    };

    base("Add Recurring Payment", &[dollar_input_styles()], &content).into_response()
}

/// Add a recurring payment from the submitted form and redirect to the list.
pub async fn create_recurring_endpoint(
    State(state): State<CreateRecurringState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let details: RecurringDetails = match form.validate() {
        Ok(details) => details,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_recurring(details, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::RECURRING_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not add recurring payment {form:?}: {error}");
            error.into_alert_response()
        }
    }
}
