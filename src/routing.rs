//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    error_page::{get_404_not_found, get_internal_server_error_page},
    income::{
        create_income_endpoint, get_edit_income_page, get_income_page, get_new_income_page,
        update_income_endpoint,
    },
    recurring::{
        create_recurring_endpoint, get_edit_recurring_page, get_new_recurring_page,
        get_recurring_page, update_recurring_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::INCOME_VIEW, get(get_income_page))
        .route(endpoints::NEW_INCOME_VIEW, get(get_new_income_page))
        .route(endpoints::EDIT_INCOME_VIEW, get(get_edit_income_page))
        .route(endpoints::RECURRING_VIEW, get(get_recurring_page))
        .route(endpoints::NEW_RECURRING_VIEW, get(get_new_recurring_page))
        .route(endpoints::EDIT_RECURRING_VIEW, get(get_edit_recurring_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // The form endpoints respond with HX-Redirect on success and alert fragments on failure.
    let api_routes = Router::new()
        .route(endpoints::POST_INCOME, post(create_income_endpoint))
        .route(endpoints::PUT_INCOME, put(update_income_endpoint))
        .route(endpoints::POST_RECURRING, post(create_recurring_endpoint))
        .route(endpoints::PUT_RECURRING, put(update_recurring_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the income page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::INCOME_VIEW)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::Html;

    use crate::{
        AppState, build_router, endpoints,
        endpoints::format_endpoint,
        test_utils::{assert_valid_html, table_column_text},
    };

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_income_page() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        response.assert_header("location", endpoints::INCOME_VIEW);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let server = get_test_server();

        let response = server.get("/definitely/not/a/page").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn added_income_is_listed() {
        let server = get_test_server();

        server
            .post(endpoints::POST_INCOME)
            .form(&[
                ("name", "Freelance"),
                ("amount", "250.75"),
                ("date", "2024-04-12"),
                ("category", "business"),
                ("payment_method", "direct_deposit"),
            ])
            .await
            .assert_status_see_other();

        let response = server.get(endpoints::INCOME_VIEW).await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_valid_html(&html);
        assert_eq!(table_column_text(&html, 0), vec!["Freelance"]);
    }

    #[tokio::test]
    async fn edited_recurring_payment_is_listed() {
        let server = get_test_server();
        server
            .post(endpoints::POST_RECURRING)
            .form(&[
                ("name", "Gym"),
                ("amount", "45"),
                ("date", "2024-04-03"),
                ("category", "monthly_subscription"),
                ("payment_method", "debit_card"),
            ])
            .await
            .assert_status_see_other();

        server
            .put(&format_endpoint(endpoints::PUT_RECURRING, 1))
            .form(&[("name", "Climbing gym")])
            .await
            .assert_status_see_other();

        let response = server.get(endpoints::RECURRING_VIEW).await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_eq!(table_column_text(&html, 1), vec!["Climbing gym"]);
    }
}
