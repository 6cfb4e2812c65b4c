//! The list of recurring payments.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    date::DateFormat,
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    record::Choice,
    recurring::{Recurring, get_all_recurring},
};

#[derive(Debug, Clone)]
pub struct RecurringPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecurringPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the list of recurring payments ordered by the day they are due.
pub async fn get_recurring_page(State(state): State<RecurringPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let recurring = get_all_recurring(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve recurring payments: {error}"))?;

    Ok(recurring_view(&recurring).into_response())
}

fn recurring_view(recurring: &[Recurring]) -> Markup {
    let nav_bar = NavBar::new(endpoints::RECURRING_VIEW).into_html();
    let monthly_total: f64 = recurring
        .iter()
        .map(|recurring| recurring.details.amount.as_f64())
        .sum();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full space-y-4 lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Recurring Payments" }

                    a href=(endpoints::NEW_RECURRING_VIEW) class=(LINK_STYLE)
                    {
                        "Add Recurring Payment"
                    }
                }

                p id="recurring-total" class="font-semibold"
                {
                    "Total per month: " (format_currency(monthly_total))
                }

                div class="relative overflow-x-auto shadow-md rounded dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Due" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Payment Method" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for recurring in recurring {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td
                                        class=(TABLE_CELL_STYLE)
                                        title=(format!(
                                            "Next due {}",
                                            recurring.details.date.format(DateFormat::NumMonthNumDate)
                                        ))
                                    {
                                        (recurring.details.date.format(DateFormat::NumDate))
                                    }
                                    td class=(TABLE_CELL_STYLE) { (recurring.details.name) }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (format_currency(recurring.details.amount.as_f64()))
                                    }
                                    td class=(TABLE_CELL_STYLE) { (recurring.details.category.label()) }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (recurring.details.payment_method.label())
                                    }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        a
                                            href=(format_endpoint(endpoints::EDIT_RECURRING_VIEW, recurring.id))
                                            class=(LINK_STYLE)
                                        {
                                            "Edit"
                                        }
                                    }
                                }
                            }

                            @if recurring.is_empty() {
                                tr
                                {
                                    td
                                        colspan="6"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        "No recurring payments yet."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Recurring Payments", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, response::IntoResponse};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        date::CalendarDate,
        db::initialize,
        record::Amount,
        recurring::{
            RecurringCategory, RecurringDetails, RecurringPaymentMethod, create_recurring,
            get_recurring_page, page::RecurringPageState,
        },
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html, parse_html_document,
            table_column_text,
        },
    };

    #[tokio::test]
    async fn lists_payments_by_due_day() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        for (name, date) in [("Rent", "2024-02-28"), ("Phone", "2024-03-07")] {
            create_recurring(
                RecurringDetails {
                    name: name.to_owned(),
                    amount: Amount::new("12.5").unwrap(),
                    date: CalendarDate::parse(date).unwrap(),
                    category: RecurringCategory::Rent,
                    payment_method: RecurringPaymentMethod::Cash,
                },
                &connection,
            )
            .unwrap();
        }
        let state = RecurringPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_recurring_page(State(state)).await.into_response();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(table_column_text(&html, 0), vec!["07", "28"]);
        let due_dates = html
            .select(&Selector::parse("tbody td[title]").unwrap())
            .filter_map(|cell| cell.value().attr("title"))
            .collect::<Vec<_>>();
        assert_eq!(due_dates, vec!["Next due 3/7", "Next due 2/28"]);
        assert_eq!(table_column_text(&html, 1), vec!["Phone", "Rent"]);
        assert_eq!(table_column_text(&html, 2), vec!["$12.50", "$12.50"]);
    }
}
