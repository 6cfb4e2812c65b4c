#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_form_select, assert_hx_endpoint, must_get_form, selected_option,
};
pub(crate) use html::{
    assert_alert_message, assert_valid_html, parse_html_document, parse_html_fragment,
    table_column_text,
};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok};
