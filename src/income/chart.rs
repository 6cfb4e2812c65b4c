//! The monthly income bar chart.
//!
//! The chart options are built on the server for both a full and a compact
//! layout. The page script picks one based on the window width and swaps
//! them when the window is resized across [COMPACT_WIDTH_THRESHOLD].

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{
        AxisLabel, AxisLine, AxisPointer, AxisPointerType, AxisTick, AxisType, JsFunction,
        Tooltip, Trigger,
    },
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{aggregation::MonthlyBuckets, endpoints, html::HeadElement};

/// Windows this wide (in CSS pixels) or narrower get the compact chart.
pub const COMPACT_WIDTH_THRESHOLD: u32 = 768;

const CHART_ID: &str = "income-chart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    Full,
    Compact,
}

/// Build the bar chart of `buckets`.
pub fn income_chart(buckets: &MonthlyBuckets, mode: ChartMode) -> Chart {
    let labels: Vec<&str> = buckets.iter().map(|bucket| bucket.month).collect();
    let values: Vec<f64> = buckets
        .iter()
        .map(|bucket| (bucket.amount * 100.0).round() / 100.0)
        .collect();
    let year = &buckets[0].year;

    let title = match mode {
        ChartMode::Full => Title::new()
            .text("Income")
            .subtext(format!("Monthly totals for {year}")),
        ChartMode::Compact => Title::new().text("Income"),
    };

    let x_axis = Axis::new().type_(AxisType::Category).data(labels);
    // Narrow windows drop the month labels along with their ticks and line.
    let x_axis = match mode {
        ChartMode::Full => x_axis,
        ChartMode::Compact => x_axis
            .axis_label(AxisLabel::new().show(false))
            .axis_tick(AxisTick::new().show(false))
            .axis_line(AxisLine::new().show(false)),
    };

    Chart::new()
        .title(title)
        .tooltip(bucket_tooltip(buckets))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(x_axis)
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Income").data(values))
}

/// The element the chart is drawn in.
pub fn income_chart_view() -> Markup {
    html!(
        section class="w-full mx-auto mb-4"
        {
            div
                id=(CHART_ID)
                class="min-h-[380px] rounded dark:bg-gray-100 cursor-pointer"
            {}
        }
    )
}

/// The script that draws the chart, keeps its layout in sync with the window
/// width and opens the income for a month when its bar is clicked.
pub fn income_chart_script(buckets: &MonthlyBuckets) -> HeadElement {
    let full_options = income_chart(buckets, ChartMode::Full).to_string();
    let compact_options = income_chart(buckets, ChartMode::Compact).to_string();
    let bucket_links = bucket_links(buckets);

    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CHART_ID}");
            const chart = echarts.init(chartDom);
            const fullOption = {full_options};
            const compactOption = {compact_options};
            const bucketLinks = {bucket_links};

            let isCompact = null;
            const updateLayout = () => {{
                const compact = window.innerWidth <= {COMPACT_WIDTH_THRESHOLD};
                if (compact !== isCompact) {{
                    isCompact = compact;
                    chart.setOption(compact ? compactOption : fullOption, true);
                }}
                chart.resize();
            }};
            window.addEventListener('resize', updateLayout);
            updateLayout();

            chart.on('click', function(params) {{
                const link = bucketLinks[params.dataIndex];
                if (link) {{
                    window.location.href = link;
                }}
            }});

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// The page listing the income of each bucket's month, in bucket order.
fn bucket_links(buckets: &MonthlyBuckets) -> String {
    let links: Vec<String> = buckets
        .iter()
        .map(|bucket| {
            bucket.select(|month, year| {
                format!("{}?month={month}&year={year}", endpoints::INCOME_VIEW)
            })
        })
        .collect();

    // A list of plain strings always serializes.
    serde_json::to_string(&links).unwrap_or_else(|_| "[]".to_owned())
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"$0.00\";",
    )
}

/// A tooltip showing the month, year and total of the hovered bar.
fn bucket_tooltip(buckets: &MonthlyBuckets) -> Tooltip {
    let years: Vec<&str> = buckets.iter().map(|bucket| bucket.year.as_str()).collect();
    let years = serde_json::to_string(&years).unwrap_or_else(|_| "[]".to_owned());

    Tooltip::new()
        .trigger(Trigger::Axis)
        .formatter(JsFunction::new_with_args(
            "params",
            &format!(
                "const years = {years};
                const currencyFormatter = new Intl.NumberFormat('en-US', {{
                  style: 'currency',
                  currency: 'USD'
                }});
                const point = Array.isArray(params) ? params[0] : params;
                return point.name + ' ' + years[point.dataIndex] + '<br/>'
                    + currencyFormatter.format(point.value);"
            ),
        ))
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use maud::PreEscaped;

    use crate::{
        aggregation::aggregate,
        html::HeadElement,
        income::{
            chart::{COMPACT_WIDTH_THRESHOLD, ChartMode, income_chart, income_chart_script},
            core::IncomeRecord,
        },
    };

    fn buckets() -> crate::aggregation::MonthlyBuckets {
        aggregate(
            &[
                IncomeRecord {
                    amount: "100".to_owned(),
                    date: "2024-01-05T00:00:00.000Z".to_owned(),
                },
                IncomeRecord {
                    amount: "50".to_owned(),
                    date: "2023-03-20T00:00:00.000Z".to_owned(),
                },
            ],
            2025,
        )
        .unwrap()
    }

    #[test]
    fn chart_has_a_bar_for_every_month() {
        let options = income_chart(&buckets(), ChartMode::Full).to_string();

        for month in ["Jan", "Feb", "Jun", "Dec"] {
            assert!(options.contains(&format!("\"{month}\"")), "missing {month}");
        }
        assert!(options.contains("Monthly totals for 2025"));
    }

    fn without_whitespace(options: &str) -> String {
        options.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn compact_chart_hides_month_axis() {
        let compact = without_whitespace(&income_chart(&buckets(), ChartMode::Compact).to_string());

        assert!(
            compact.contains(r#""axisLabel":{"show":false}"#),
            "want month labels hidden in {compact}"
        );
        assert!(compact.contains(r#""axisTick":{"show":false}"#));
        assert!(compact.contains(r#""axisLine":{"show":false}"#));
        assert!(!compact.contains("Monthlytotals"));
    }

    #[test]
    fn full_chart_shows_month_axis() {
        let full = without_whitespace(&income_chart(&buckets(), ChartMode::Full).to_string());

        assert!(!full.contains(r#""show":false"#), "want nothing hidden in {full}");
    }

    #[test]
    fn empty_compact_chart_hides_month_axis() {
        let buckets = aggregate::<IncomeRecord>(&[], 2025).unwrap();

        let compact = without_whitespace(&income_chart(&buckets, ChartMode::Compact).to_string());

        assert!(compact.contains(r#""axisLabel":{"show":false}"#));
    }

    #[test]
    fn script_links_bars_to_their_month() {
        let HeadElement::ScriptSource(PreEscaped(script)) = income_chart_script(&buckets()) else {
            panic!("want an inline script");
        };

        assert!(script.contains("/income?month=Jan&year=2025"));
        assert!(script.contains("/income?month=Dec&year=2025"));
        assert!(script.contains(&format!("window.innerWidth <= {COMPACT_WIDTH_THRESHOLD}")));
    }
}
