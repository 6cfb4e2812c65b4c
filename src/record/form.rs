use maud::{Markup, html};

use crate::{
    date::CalendarDate,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    record::{Amount, Choice},
};

/// Where a record form is submitted to.
#[derive(Debug, Clone, Copy)]
pub enum FormTarget<'a> {
    /// POST a new record to the URL.
    Create(&'a str),
    /// PUT the changes to an existing record to the URL.
    Update(&'a str),
}

/// A complete create or edit form whose errors are shown in the alert container.
pub fn record_form<C: Choice, M: Choice>(
    target: FormTarget<'_>,
    defaults: &RecordFormDefaults<'_, C, M>,
    submit_label: &str,
) -> Markup {
    let (hx_post, hx_put) = match target {
        FormTarget::Create(url) => (Some(url), None),
        FormTarget::Update(url) => (None, Some(url)),
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            (record_form_fields(defaults))

            button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                (submit_label)
            }
        }
    }
}

/// Prefilled values for [record_form_fields].
pub struct RecordFormDefaults<'a, C, M> {
    pub name: Option<&'a str>,
    pub amount: Option<Amount>,
    pub date: Option<CalendarDate>,
    pub category: Option<C>,
    pub payment_method: Option<M>,
    /// The label for the date input, e.g. "Date received".
    pub date_label: &'a str,
    /// Whether every field must be filled in before the form can be submitted.
    ///
    /// Edit forms leave this off so that blank fields keep the stored value.
    pub required: bool,
}

/// The inputs shared by the create and edit forms for income and recurring payments.
pub fn record_form_fields<C: Choice, M: Choice>(defaults: &RecordFormDefaults<'_, C, M>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount.as_f64()));
    let date_str = defaults.date.map(|date| date.to_string());

    html! {
        div
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Name" }

            input
                name="name"
                id="name"
                type="text"
                placeholder=(defaults.name.unwrap_or("Name"))
                value=[defaults.name]
                required[defaults.required]
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder=(amount_str.as_deref().unwrap_or("0.01"))
                    value=[amount_str.as_deref()]
                    required[defaults.required]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { (defaults.date_label) }

            input
                name="date"
                id="date"
                type="date"
                value=[date_str.as_deref()]
                required[defaults.required]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (choice_select("category", "Category", defaults.category, defaults.required))
        (choice_select("payment_method", "Payment method", defaults.payment_method, defaults.required))
    }
}

fn choice_select<T: Choice>(name: &str, label: &str, selected: Option<T>, required: bool) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select
                name=(name)
                id=(name)
                required[required]
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @if selected.is_none() {
                    option value="" { "Select " (label.to_lowercase()) }
                }

                @for choice in T::ALL {
                    option
                        value=(choice.value())
                        selected[Some(*choice) == selected]
                    {
                        (choice.label())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::{RecordFormDefaults, record_form_fields};
    use crate::{
        date::CalendarDate,
        income::{IncomeCategory, IncomePaymentMethod},
        record::{Amount, Choice},
    };

    fn render(defaults: &RecordFormDefaults<'_, IncomeCategory, IncomePaymentMethod>) -> Html {
        let markup = maud::html! { form { (record_form_fields(defaults)) } };
        Html::parse_document(&markup.into_string())
    }

    fn empty_defaults<'a>() -> RecordFormDefaults<'a, IncomeCategory, IncomePaymentMethod> {
        RecordFormDefaults {
            name: None,
            amount: None,
            date: None,
            category: None,
            payment_method: None,
            date_label: "Date",
            required: true,
        }
    }

    #[test]
    fn lists_every_choice_with_placeholder() {
        let html = render(&empty_defaults());

        let options = html
            .select(&Selector::parse("select[name=category] option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();

        let mut want = vec![String::new()];
        want.extend(
            IncomeCategory::ALL
                .iter()
                .map(|category| category.value().to_owned()),
        );
        assert_eq!(options, want);
    }

    #[test]
    fn prefills_stored_values_without_requiring_them() {
        let html = render(&RecordFormDefaults {
            name: Some("Paycheck"),
            amount: Some(Amount::new("12.5").unwrap()),
            date: Some(CalendarDate::from(date!(2024 - 01 - 05))),
            category: Some(IncomeCategory::Business),
            payment_method: Some(IncomePaymentMethod::Check),
            required: false,
            ..empty_defaults()
        });

        let input_value = |name: &str| {
            html.select(&Selector::parse(&format!("input[name={name}]")).unwrap())
                .next()
                .and_then(|input| input.value().attr("value"))
                .map(str::to_owned)
        };
        assert_eq!(input_value("name").as_deref(), Some("Paycheck"));
        assert_eq!(input_value("amount").as_deref(), Some("12.50"));
        assert_eq!(input_value("date").as_deref(), Some("2024-01-05"));

        let selected = html
            .select(&Selector::parse("select[name=category] option[selected]").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(selected, vec![IncomeCategory::Business.value()]);

        let required_count = html
            .select(&Selector::parse("[required]").unwrap())
            .count();
        assert_eq!(required_count, 0);
    }
}
