use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Assert the form has a required input called `name` of type `type_`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input {name} with type \"{type_}\", got {input_type:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

/// Assert the form has a select called `name` with `option_count` non-empty options.
#[track_caller]
pub(crate) fn assert_form_select(form: &ElementRef<'_>, name: &str, option_count: usize) {
    let selector = Selector::parse(&format!("select[name={name}] option")).unwrap();
    let got_count = form
        .select(&selector)
        .filter(|option| !option.value().attr("value").unwrap_or_default().is_empty())
        .count();

    assert_eq!(
        got_count, option_count,
        "want {option_count} options for select {name}, got {got_count}"
    );
}

/// The value of the selected option of the select called `name`, if any.
pub(crate) fn selected_option<'a>(form: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    let selector = Selector::parse(&format!("select[name={name}] option[selected]")).unwrap();

    form.select(&selector)
        .next()
        .and_then(|option| option.value().attr("value"))
}
