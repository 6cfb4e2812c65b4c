//! The income overview: monthly chart, total and list of income.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    aggregation::aggregate,
    date::{DateFormat, SHORT_MONTH_LABELS, month_from_short_label},
    endpoints::{self, format_endpoint},
    html::{
        HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    income::{
        Income, get_all_income, get_income_in_month, get_income_records,
        chart::{income_chart_script, income_chart_view},
        total_income,
    },
    navigation::NavBar,
    record::Choice,
    timezone::current_year,
};

/// The state needed for the income page.
#[derive(Debug, Clone)]
pub struct IncomePageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for IncomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The month selected by clicking a bar in the chart, e.g. `?month=Jan&year=2025`.
#[derive(Debug, Default, Deserialize)]
pub struct IncomePageQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl IncomePageQuery {
    /// The month and year to filter by, if both are present and valid.
    fn selected_month(&self) -> Option<(Month, i32)> {
        let (Some(month_label), Some(year)) = (&self.month, &self.year) else {
            return None;
        };

        let Some(month) = month_from_short_label(month_label) else {
            tracing::warn!("Ignoring unknown month {month_label:?}");
            return None;
        };

        let Ok(year) = year.trim().parse::<i32>() else {
            tracing::warn!("Ignoring invalid year {year:?}");
            return None;
        };

        Some((month, year))
    }
}

/// Render the income overview, optionally limited to one month.
pub async fn get_income_page(
    State(state): State<IncomePageState>,
    Query(query): Query<IncomePageQuery>,
) -> Result<Response, Error> {
    let current_year = current_year(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let records = get_income_records(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve income records: {error}"))?;
    let buckets = aggregate(&records, current_year)
        .inspect_err(|error| tracing::error!("Could not aggregate income by month: {error}"))?;

    let selected_month = query.selected_month();
    let income = match selected_month {
        Some((month, year)) => get_income_in_month(year, month, &connection),
        None => get_all_income(&connection),
    }
    .inspect_err(|error| tracing::error!("Failed to retrieve income: {error}"))?;

    let head_elements = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        income_chart_script(&buckets),
    ];

    Ok(base(
        "Income",
        &head_elements,
        &income_view(&income, selected_month),
    )
    .into_response())
}

fn income_view(income: &[Income], selected_month: Option<(Month, i32)>) -> Markup {
    let nav_bar = NavBar::new(endpoints::INCOME_VIEW).into_html();
    let total = format_currency(total_income(income));

    let table_row = |income: &Income| {
        let details = &income.details;
        let edit_url = format_endpoint(endpoints::EDIT_INCOME_VIEW, income.id);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th scope="row" class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    (details.name)
                }
                td class=(TABLE_CELL_STYLE) { (format_currency(details.amount.as_f64())) }
                td class=(TABLE_CELL_STYLE) title=(details.date.format(DateFormat::FullFormat))
                {
                    (details.date.format(DateFormat::ShortMonthNumDate))
                }
                td class=(TABLE_CELL_STYLE) { (details.category.label()) }
                td class=(TABLE_CELL_STYLE) { (details.payment_method.label()) }
                td class=(TABLE_CELL_STYLE)
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                }
            }
        )
    };

    html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full space-y-4 lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Income" }

                    a href=(endpoints::NEW_INCOME_VIEW) class=(LINK_STYLE) { "Add Income" }
                }

                (income_chart_view())

                div class="flex justify-between flex-wrap items-end"
                {
                    @match selected_month {
                        Some((month, year)) => {
                            p id="income-filter"
                            {
                                "Showing income for "
                                (SHORT_MONTH_LABELS[usize::from(u8::from(month) - 1)])
                                " " (year) ". "
                                a href=(endpoints::INCOME_VIEW) class=(LINK_STYLE) { "Show all" }
                            }
                        }
                        None => {
                            p { "Showing all income." }
                        }
                    }

                    p id="income-total" class="font-semibold" { "Total: " (total) }
                }

                div class="relative overflow-x-auto shadow-md rounded dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Payment Method" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for income in income {
                                (table_row(income))
                            }

                            @if income.is_empty() {
                                tr
                                {
                                    td
                                        colspan="6"
                                        class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                    {
                                        "No income yet. "
                                        a href=(endpoints::NEW_INCOME_VIEW) class=(LINK_STYLE)
                                        {
                                            "Add your first income"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}
