//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/income/{income_id}/edit', use [format_endpoint].

/// The root route which redirects to the income page.
pub const ROOT: &str = "/";
/// The page listing income with the monthly income chart.
pub const INCOME_VIEW: &str = "/income";
/// The page for adding income.
pub const NEW_INCOME_VIEW: &str = "/income/new";
/// The page for editing income.
pub const EDIT_INCOME_VIEW: &str = "/income/{income_id}/edit";
/// The page listing recurring payments.
pub const RECURRING_VIEW: &str = "/recurring";
/// The page for adding a recurring payment.
pub const NEW_RECURRING_VIEW: &str = "/recurring/new";
/// The page for editing a recurring payment.
pub const EDIT_RECURRING_VIEW: &str = "/recurring/{recurring_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create income.
pub const POST_INCOME: &str = "/api/income";
/// The route to update income.
pub const PUT_INCOME: &str = "/api/income/{income_id}";
/// The route to create a recurring payment.
pub const POST_RECURRING: &str = "/api/recurring";
/// The route to update a recurring payment.
pub const PUT_RECURRING: &str = "/api/recurring/{recurring_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
