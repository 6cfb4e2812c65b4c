//! The page and endpoint for editing income.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    income::{Income, get_income, update_income},
    navigation::NavBar,
    record::{FormTarget, RecordForm, RecordFormDefaults, RecordId, record_form},
};

/// The state needed for editing income.
#[derive(Debug, Clone)]
pub struct EditIncomeState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditIncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for editing the income with `income_id`.
pub async fn get_edit_income_page(
    State(state): State<EditIncomeState>,
    Path(income_id): Path<RecordId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let income = get_income(income_id, &connection).inspect_err(|error| {
        if *error != Error::NotFound {
            tracing::error!("Failed to retrieve income {income_id}: {error}");
        }
    })?;

    Ok(edit_income_view(&income).into_response())
}

fn edit_income_view(income: &Income) -> maud::Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_INCOME_VIEW).into_html();
    let update_url = format_endpoint(endpoints::PUT_INCOME, income.id);
    let details = &income.details;
    let defaults = RecordFormDefaults {
        name: Some(details.name.as_str()),
        amount: Some(details.amount),
        date: Some(details.date),
        category: Some(details.category),
        payment_method: Some(details.payment_method),
        date_label: "Date received",
        required: false,
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Edit Income" }

            (record_form(FormTarget::Update(&update_url), &defaults, "Save"))
        }
    };

    base("Edit Income", &[dollar_input_styles()], &content)
}

/// Apply the submitted changes to the income with `income_id` and redirect
/// to the income page.
pub async fn update_income_endpoint(
    State(state): State<EditIncomeState>,
    Path(income_id): Path<RecordId>,
    Form(form): Form<RecordForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let original = match get_income(income_id, &connection) {
        Ok(income) => income,
        Err(Error::NotFound) => return Error::UpdateMissingIncome.into_alert_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve income {income_id}: {error}");
            return error.into_alert_response();
        }
    };

    let details = match form.merge_onto(&original.details) {
        Ok(details) => details,
        Err(error) => return error.into_alert_response(),
    };

    match update_income(income_id, &details, &connection) {
        Ok(()) => (
            HxRedirect(endpoints::INCOME_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update income {income_id}: {error}");
            error.into_alert_response()
        }
    }
}


#[cfg(test)]
mod update_income_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;

    use crate::{
        date::CalendarDate,
        db::initialize,
        endpoints,
        income::{
            IncomeCategory, IncomeDetails, IncomePaymentMethod, create_income,
            edit::EditIncomeState, get_income, update_income_endpoint,
        },
        record::{Amount, RecordForm},
        test_utils::{assert_alert_message, assert_hx_redirect, parse_html_fragment},
    };

    fn stored_details() -> IncomeDetails {
        IncomeDetails {
            name: "Paycheck".to_owned(),
            amount: Amount::new("1500").unwrap(),
            date: CalendarDate::parse("2024-01-05").unwrap(),
            category: IncomeCategory::Salary,
            payment_method: IncomePaymentMethod::DirectDeposit,
        }
    }

    fn get_state() -> EditIncomeState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        create_income(stored_details(), &connection).unwrap();

        EditIncomeState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn form(query: &str) -> RecordForm {
        serde_html_form::from_str(query).unwrap()
    }

    #[tokio::test]
    async fn blank_fields_keep_stored_values() {
        let state = get_state();

        let response = update_income_endpoint(
            State(state.clone()),
            Path(1),
            Form(form(
                "name=&amount=&date=2024-02-10&category=business&payment_method=direct_deposit",
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::INCOME_VIEW);

        let got = get_income(1, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(
            got.details,
            IncomeDetails {
                date: CalendarDate::parse("2024-02-10").unwrap(),
                category: IncomeCategory::Business,
                ..stored_details()
            }
        );
    }

    #[tokio::test]
    async fn unchanged_income_is_rejected() {
        let response = update_income_endpoint(
            State(get_state()),
            Path(1),
            Form(form(
                "name=Paycheck&amount=1500&date=2024-01-05&category=salary&payment_method=direct_deposit",
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_alert_message(&html, "Nothing to update");
    }

    #[tokio::test]
    async fn updating_missing_income_is_not_found() {
        let response =
            update_income_endpoint(State(get_state()), Path(42), Form(form("name=Bonus"))).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
