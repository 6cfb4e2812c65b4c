//! The page and endpoint for adding income.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    income::{IncomeCategory, IncomeDetails, IncomePaymentMethod, create_income},
    navigation::NavBar,
    record::{FormTarget, RecordForm, RecordFormDefaults, record_form},
};

/// The state needed for adding income.
#[derive(Debug, Clone)]
pub struct CreateIncomeState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateIncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for adding income.
pub async fn get_new_income_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_INCOME_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Add Income" }
            (new_income_form())
        }
    };

    base("Add Income", &[dollar_input_styles()], &content).into_response()
}

fn new_income_form() -> Markup {
    let defaults = RecordFormDefaults::<IncomeCategory, IncomePaymentMethod> {
        name: None,
        amount: None,
        date: None,
        category: None,
        payment_method: None,
        date_label: "Date received",
        required: true,
    };

    record_form(
        FormTarget::Create(endpoints::POST_INCOME),
        &defaults,
        "Add Income",
    )
}

/// Add an income from the submitted form and redirect to the income page.
pub async fn create_income_endpoint(
    State(state): State<CreateIncomeState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let details: IncomeDetails = match form.validate() {
        Ok(details) => details,
        Err(error) => {
            tracing::debug!("Rejected new income {form:?}: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_income(details, &connection) {
        Ok(income) => {
            tracing::info!("Added income {}", income.id);
            (
                HxRedirect(endpoints::INCOME_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not add income {form:?}: {error}");
            error.into_alert_response()
        }
    }
}
