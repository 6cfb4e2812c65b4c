//! Editing recurring payments.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    record::{FormTarget, RecordForm, RecordFormDefaults, RecordId, record_form},
    recurring::{Recurring, get_recurring, update_recurring},
};

#[derive(Debug, Clone)]
pub struct EditRecurringState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditRecurringState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

pub async fn get_edit_recurring_page(
    State(state): State<EditRecurringState>,
    Path(recurring_id): Path<RecordId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let recurring = get_recurring(recurring_id, &connection)?;

    Ok(edit_recurring_view(&recurring).into_response())
}

fn edit_recurring_view(recurring: &Recurring) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_RECURRING_VIEW).into_html();
    let update_url = format_endpoint(endpoints::PUT_RECURRING, recurring.id);
    let details = &recurring.details;
    let defaults = RecordFormDefaults {
        name: Some(details.name.as_str()),
        amount: Some(details.amount),
        date: Some(details.date),
        category: Some(details.category),
        payment_method: Some(details.payment_method),
        date_label: "Next due date",
        required: false,
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Edit Recurring Payment" }

            (record_form(FormTarget::Update(&update_url), &defaults, "Save"))
        }
    };

    base("Edit Recurring Payment", &[dollar_input_styles()], &content)
}

pub async fn update_recurring_endpoint(
    State(state): State<EditRecurringState>,
    Path(recurring_id): Path<RecordId>,
    Form(form): Form<RecordForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let result = get_recurring(recurring_id, &connection)
        .map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingRecurring,
            error => error,
        })
        .and_then(|original| form.merge_onto(&original.details))
        .and_then(|details| update_recurring(recurring_id, &details, &connection));

    match result {
        Ok(()) => (
            HxRedirect(endpoints::RECURRING_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::debug!("Could not update recurring payment {recurring_id}: {error}");
            error.into_alert_response()
        }
    }
}
