use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// Assert `html` contains an alert whose headline is `want_message`.
#[track_caller]
pub(crate) fn assert_alert_message(html: &Html, want_message: &str) {
    let message = html
        .select(&Selector::parse("[role=alert] span").unwrap())
        .next()
        .expect("No alert found")
        .text()
        .collect::<String>();

    assert_eq!(message.trim(), want_message);
}

/// The trimmed text of the `column`-th cell of every row in the table body.
pub(crate) fn table_column_text(html: &Html, column: usize) -> Vec<String> {
    let row_selector = Selector::parse("tbody tr").unwrap();
    let cell_selector = Selector::parse("td, th").unwrap();

    html.select(&row_selector)
        .filter_map(|row| row.select(&cell_selector).nth(column))
        .map(|cell| cell.text().collect::<String>().trim().to_owned())
        .collect()
}
