pub mod report;

use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;

use crate::board::BoardView;
use crate::model::Order;

pub const EMPTY_TITLE: &str = "No orders found";
pub const EMPTY_HINT: &str = "Try changing the filter or select a different date";
pub const NO_NAME: &str = "No name";
pub const NO_PHONE: &str = "No phone";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn customer_name(order: &Order) -> &str {
    if order.customer_name.is_empty() {
        NO_NAME
    } else {
        &order.customer_name
    }
}

pub fn customer_phone(order: &Order) -> &str {
    if order.customer_phone.is_empty() {
        NO_PHONE
    } else {
        &order.customer_phone
    }
}

pub fn item_lines(order: &Order) -> Vec<String> {
    order
        .items
        .iter()
        .map(|item| format!("{} x {}", item.quantity, item.name))
        .collect()
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord<'a> {
    pub date: String,
    pub filter: &'a str,
    pub count: usize,
    pub orders: &'a [&'a Order],
    pub daily_sales: String,
    pub summary: String,
}

impl<'a> ViewRecord<'a> {
    pub fn from_view(view: &'a BoardView<'a>) -> Self {
        Self {
            date: view.state.date().to_string(),
            filter: view.state.filter().tag(),
            count: view.orders.len(),
            orders: &view.orders,
            daily_sales: view.daily_sales_text(),
            summary: view.summary(),
        }
    }
}

fn render_tab_bar(view: &BoardView<'_>) -> String {
    view.tabs
        .iter()
        .map(|tab| {
            if view.state.is_active(tab) {
                format!("[{}]", tab.label).green().bold().to_string()
            } else {
                format!(" {} ", tab.label)
            }
        })
        .join(" ")
}

fn render_text_card(order: &Order, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}\n",
        format!("Order #: {}", order.order_id).bold(),
        order.created_at.dimmed()
    ));
    out.push_str(&format!("  {}\n", order.order_type.cyan()));
    for line in item_lines(order) {
        out.push_str(&format!("    {line}\n"));
    }
    out.push_str(&format!("  {}\n", format!("{currency} {}", order.total).bold()));
    out.push_str(&format!(
        "  {} | {}\n",
        customer_name(order),
        customer_phone(order)
    ));
    out
}

/// The whole board as terminal text: tab bar, date, order cards, sales total.
pub fn render_text(view: &BoardView<'_>) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!(":: {:<8}: {}\n", "Filter", render_tab_bar(view)));
    out.push_str(&format!(":: {:<8}: {}\n", "Date", view.state.date()));
    out.push('\n');
    if view.orders.is_empty() {
        out.push_str(&format!("{}\n", EMPTY_TITLE.bold()));
        out.push_str(&format!("{}\n", EMPTY_HINT.dimmed()));
    } else {
        let cards = view
            .orders
            .iter()
            .map(|order| render_text_card(order, view.currency))
            .join("\n");
        out.push_str(&cards);
    }
    out.push('\n');
    out.push_str(&format!("{}\n", view.summary().yellow().bold()));
    out.into_bytes()
}

pub fn render_json(view: &BoardView<'_>) -> Result<Vec<u8>, serde_json::Error> {
    let record = ViewRecord::from_view(view);
    let mut out = serde_json::to_vec_pretty(&record)?;
    out.push(b'\n');
    Ok(out)
}

pub fn render_html(view: &BoardView<'_>) -> Result<Vec<u8>, serde_json::Error> {
    report::render_page(view)
}

pub fn render(format: OutputFormat, view: &BoardView<'_>) -> Result<Vec<u8>, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(view)),
        OutputFormat::Json => render_json(view),
        OutputFormat::Html => render_html(view),
    }
}
