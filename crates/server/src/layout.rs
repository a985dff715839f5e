//! Page shell: header, sidebar, and the card grid the page script fills in.

use dashboard::Dashboard;
use shared::domain::ViewId;

pub(crate) const TITLE: &str = "Billionaires Data Analysis Dashboard";

const SIDEBAR_HEADING: &str = "Billionaires Dashboard";

const WELCOME: &str = "Welcome to the Billionaire Wealth Dashboard! This interactive tool \
    analyses how billionaire wealth is distributed across industries and demographics: \
    the average wealth by category, the number of billionaires by country, and how age \
    relates to wealth. Filter by age range, birth year, or industry category and the \
    charts update in place.";

const PAGE_SCRIPT: &str = include_str!("../assets/dashboard.js");

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Card rows, top to bottom.
const ROWS: &[&[ViewId]] = &[
    &[ViewId::WealthDistribution, ViewId::AverageWealth],
    &[ViewId::CountryDistribution],
    &[ViewId::AgeGroupsByIndustry, ViewId::AgeVsWorth],
    &[ViewId::BillionairesOverTime, ViewId::EconomicIndicators],
];

fn heading(view: ViewId) -> &'static str {
    match view {
        ViewId::WealthDistribution => "Wealth Distribution",
        ViewId::AverageWealth => "Average Wealth by Category",
        ViewId::CountryDistribution => "Number of Billionaires by Country",
        ViewId::AgeVsWorth => "Age vs. Wealth",
        ViewId::AgeGroupsByIndustry => "Proportion of Young Billionaires by Industry",
        ViewId::BillionairesOverTime => "Number of Billionaires Over Time by Industry",
        ViewId::EconomicIndicators => {
            "Correlation Between Economic Indicators and Billionaire Wealth"
        }
    }
}

fn card(dashboard: &Dashboard, view: ViewId) -> String {
    let controls = dashboard
        .view(view)
        .map(|view| {
            view.depends_on()
                .iter()
                .map(|control| control.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();
    format!(
        r#"<section class="card" data-view="{view}" data-controls="{controls}">
<h3>{heading}</h3>
<div class="controls" id="controls-{view}"></div>
<div class="view-error" id="error-{view}" hidden></div>
<div class="chart" id="chart-{view}"></div>
</section>"#,
        heading = heading(view),
    )
}

pub(crate) fn render_page(dashboard: &Dashboard) -> String {
    let rows: String = ROWS
        .iter()
        .map(|row| {
            let cards: String = row.iter().map(|view| card(dashboard, *view)).collect();
            format!("<div class=\"row\">\n{cards}\n</div>\n")
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
<link rel="icon" href="/assets/favicon">
<script src="{PLOTLY_CDN}"></script>
<style>
body {{ margin: 0; font-family: sans-serif; display: grid; grid-template-columns: 320px 1fr; grid-template-rows: auto 1fr; min-height: 100vh; }}
header {{ grid-column: 1 / 3; background: #1a73e8; color: #fff; padding: 12px 20px; }}
aside {{ padding: 16px; border-right: 1px solid #ddd; }}
aside h2 {{ font-size: 20px; color: #1a73e8; text-align: center; margin-bottom: 15px; }}
aside p {{ font-size: 12px; color: #333; text-align: center; }}
main {{ padding: 16px; }}
.row {{ display: flex; gap: 16px; margin-bottom: 16px; }}
.card {{ flex: 1; border: 1px solid #ddd; border-radius: 4px; padding: 12px; }}
.controls label {{ display: block; margin: 4px 0; }}
.view-error, #banner {{ color: #b00020; }}
</style>
</head>
<body>
<header><h1>{TITLE}</h1></header>
<aside>
<h2>{SIDEBAR_HEADING}</h2>
<img src="/assets/sidebar-image" alt="" width="300" height="300">
<p>{WELCOME}</p>
</aside>
<main>
<div id="banner" hidden></div>
{rows}</main>
<script>
{PAGE_SCRIPT}
</script>
</body>
</html>
"#
    )
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
