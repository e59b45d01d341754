//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of a [DashboardSummary]:
//! - **Income vs Expenses**: a doughnut comparing total income with total expenses
//! - **Top Expense Categories**: a bar chart of the largest expense categories
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.
//! A chart with nothing to plot is replaced by a short message.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::DashboardSummary, html::HeadElement};

pub(super) const NO_TRANSACTION_DATA: &str = "No transaction data available";
pub(super) const NO_EXPENSE_DATA: &str = "No expense data available";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string, or `None` when there is nothing to plot.
    pub options: Option<String>,
    /// Shown in place of the chart when `options` is `None`.
    pub empty_message: &'static str,
}

/// Build the dashboard charts for `summary`.
pub(super) fn dashboard_charts(summary: &DashboardSummary) -> Vec<DashboardChart> {
    let has_totals = summary.total_income > 0.0 || summary.total_expense > 0.0;
    let has_categories = !summary.category_totals.is_empty();

    vec![
        DashboardChart {
            id: "income-expense-chart",
            options: has_totals.then(|| income_expense_chart(summary).to_string()),
            empty_message: NO_TRANSACTION_DATA,
        },
        DashboardChart {
            id: "category-chart",
            options: has_categories.then(|| category_chart(summary).to_string()),
            empty_message: NO_EXPENSE_DATA,
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    @if chart.options.is_some() {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    } @else {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded flex items-center justify-center
                                bg-gray-50 dark:bg-gray-800 text-gray-500 dark:text-gray-400"
                            data-empty-state="true"
                        {
                            p { (chart.empty_message) }
                        }
                    }
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing. Charts without options are skipped.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .filter_map(|chart| chart.options.as_ref().map(|options| (chart.id, options)))
        .map(|(id, options)| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                id, options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn income_expense_chart(summary: &DashboardSummary) -> Chart {
    Chart::new()
        .title(Title::new().text("Income vs Expenses"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .color(vec![Color::from("#16a34a"), Color::from("#dc2626")])
        .series(
            Pie::new()
                .name("Income vs Expenses")
                .radius(vec!["40%", "70%"])
                .data(vec![
                    (summary.total_income, "Income"),
                    (summary.total_expense, "Expenses"),
                ]),
        )
}

pub(super) fn category_chart(summary: &DashboardSummary) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = summary
        .category_totals
        .iter()
        .map(|total| (total.category.clone(), total.total))
        .unzip();

    Chart::new()
        .title(Title::new().text("Top Expense Categories"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Expenses").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
