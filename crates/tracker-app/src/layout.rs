//! Page layouts and view fragments.

use crate::component::{el, Element, Node};
use crate::summary::{NotFoundView, SummaryOutcome, SummaryView};
use serde::Serialize;

/// Container the router fills for the current path.
pub const PAGE_CONTENT_ID: &str = "page-content";
/// Ticker text box.
pub const INPUT_ID: &str = "input";
/// Container the ticker binding fills.
pub const OUTPUT_ID: &str = "output_graph";
/// Chart element inside a summary view.
pub const GRAPH_ID: &str = "stocks_graph";

/// Landing page: the ticker form and an empty output container.
pub fn index_page() -> Node {
    let field = el("div").class("form-group").children([
        el("label").attr("for", INPUT_ID).text("Ticker"),
        el("input")
            .id(INPUT_ID)
            .class("form-control")
            .attr("value", "")
            .attr("type", "text")
            .attr("autocomplete", "off"),
    ]);

    el("div")
        .child(
            el("div").class("container").children([
                el("hr").class("seperator"),
                el("div").class("row").child(
                    el("div")
                        .class("col-lg-12")
                        .child(el("form").child(el("fieldset").child(field))),
                ),
                el("div")
                    .class("row")
                    .child(el("div").class("col-lg-12").child(el("div").id(OUTPUT_ID))),
            ]),
        )
        .into()
}

pub fn outcome_view(outcome: &SummaryOutcome) -> Node {
    match outcome {
        SummaryOutcome::Summary(view) => summary_view(view),
        SummaryOutcome::NotFound(view) => not_found_view(view),
    }
}

pub fn not_found_view(view: &NotFoundView) -> Node {
    el("h5")
        .text(format!("No data found for ticker: {}", view.ticker))
        .into()
}

/// Chart on the left, latest statistics on the right.
pub fn summary_view(view: &SummaryView) -> Node {
    let headline = el("div").class("row").children([
        el("div").class("col-sm-8").child(
            el("h1")
                .class("center-align big-Close")
                .text(view.close_text()),
        ),
        el("div").class("col-sm-4").child(
            el("h5")
                .class(view.style.css_class())
                .text(view.change_text.clone()),
        ),
    ]);

    let stats = el("div").class("container top-margin").children([
        headline,
        stat_row(("Open", view.open_text()), ("High", view.high_text())),
        stat_row(("Low", view.low_text()), ("Volume", view.volume_text())),
    ]);

    el("div")
        .class("row")
        .children([
            el("div").class("col-lg-8").child(graph(view)),
            el("div").class("col-lg-4").child(stats),
        ])
        .into()
}

fn stat_row(left: (&str, String), right: (&str, String)) -> Element {
    el("div")
        .class("row")
        .children([stat_cell(left.0, left.1), stat_cell(right.0, right.1)])
}

fn stat_cell(label: &str, value: String) -> Element {
    el("div").class("col-sm-6").children([
        el("h6").class("center-align").text(label),
        el("h4").class("center-align").text(value),
    ])
}

fn graph(view: &SummaryView) -> Element {
    // a `Figure` only holds strings, dates and floats, so serialization cannot fail
    let figure = serde_json::to_string(&figure(view)).unwrap_or_default();
    el("div")
        .id(GRAPH_ID)
        .class("stocks-graph")
        .attr("data-figure", figure)
}

/// Line chart description handed to the client-side charting script.
///
/// ```json
/// {
///     "data": [{"x": ["2024-01-02", ...], "y": [185.64, ...], "type": "line", "name": "AAPL"}],
///     "layout": {"title": "Apple Inc. (AAPL)"}
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub title: String,
}

pub fn figure(view: &SummaryView) -> Figure {
    Figure {
        data: vec![Trace {
            x: view
                .series
                .dates()
                .iter()
                .map(|date| date.to_string())
                .collect(),
            y: view.series.closes(),
            kind: "line",
            name: view.ticker.clone(),
        }],
        layout: FigureLayout { title: view.title() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize;
    use chrono::NaiveDate;
    use tracker_fetch::prelude::*;

    fn view() -> SummaryView {
        let bars = [(2, 150.0), (3, 153.0)]
            .into_iter()
            .map(|(day, close)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                open: 151.25,
                high: 154.5,
                low: 149.75,
                close,
                volume: 82488700,
            })
            .collect();
        let quote = Quote {
            series: PriceSeries::new("AAPL", bars),
            name: Some("Apple Inc.".into()),
        };
        match summarize("AAPL", quote).unwrap() {
            SummaryOutcome::Summary(view) => view,
            other => panic!("expected a summary, got {other:?}"),
        }
    }

    #[test]
    fn index_page_has_input_and_output() {
        let page = index_page();
        let input = page.find(INPUT_ID).unwrap();
        assert_eq!(input.tag, "input");
        assert!(page.find(OUTPUT_ID).unwrap().children.is_empty());
    }

    #[test]
    fn not_found_names_the_ticker() {
        let node = not_found_view(&NotFoundView {
            ticker: "ZZZZ".into(),
        });
        assert_eq!(node.to_string(), "<h5>No data found for ticker: ZZZZ</h5>");
    }

    #[test]
    fn summary_shows_latest_statistics() {
        let node = summary_view(&view());
        let text = node.text_content();
        assert_eq!(text, "153.0+2.0%Open151.25High154.5Low149.75Volume82488700");

        let html = node.to_string();
        assert!(html.contains(r#"<h5 class="center-align text-success">+2.0%</h5>"#));
        assert!(html.contains(r#"<h1 class="center-align big-Close">153.0</h1>"#));
    }

    #[test]
    fn figure_is_a_line_of_closes() {
        let figure = figure(&view());
        assert_eq!(figure.layout.title, "Apple Inc. (AAPL)");
        assert_eq!(figure.data[0].x, vec!["2024-01-02", "2024-01-03"]);
        assert_eq!(figure.data[0].y, vec![150.0, 153.0]);

        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"][0]["type"], "line");
        assert_eq!(json["data"][0]["name"], "AAPL");
    }
}
