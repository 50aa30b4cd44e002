use itertools::Itertools;
use serde::Serialize;

use super::{customer_name, customer_phone, item_lines, EMPTY_HINT, EMPTY_TITLE, NO_NAME, NO_PHONE};
use crate::board::BoardView;
use crate::model::Order;
use crate::utils;

/// Re-runs the type/day filter and the sales sum in the browser when a tab,
/// the date picker or the Today button is used. Cards mirror `render_card`.
const PAGE_SCRIPT: &str = r#"(function () {
  const board = JSON.parse(document.getElementById('boardData').textContent);
  const tabs = document.querySelectorAll('.tab-btn');
  const picker = document.getElementById('datePicker');
  const container = document.getElementById('ordersContainer');
  const sales = document.getElementById('dailySales');
  let currentFilter = board.filter;
  let selectedDate = board.date;

  function escapeHtml(value) {
    const entities = { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' };
    return String(value).replace(/[&<>"']/g, (c) => entities[c]);
  }

  function today() {
    const now = new Date();
    const offset = board.zoneOffsetMinutes === null
      ? -now.getTimezoneOffset()
      : board.zoneOffsetMinutes;
    return new Date(now.getTime() + offset * 60000).toISOString().slice(0, 10);
  }

  function card(order) {
    const items = (order.items || [])
      .map((item) => '<div>' + escapeHtml(item.quantity + ' x ' + item.name) + '</div>')
      .join('');
    return '<div class="order-card">'
      + '<div class="order-header">'
      + '<span class="order-id">Order #: ' + escapeHtml(order.orderId) + '</span>'
      + '<span class="order-time">' + escapeHtml(order.createdAt) + '</span>'
      + '</div>'
      + '<div class="order-type">' + escapeHtml(order.orderType) + '</div>'
      + '<div class="order-details">'
      + '<div class="order-items">' + items + '</div>'
      + '<div class="order-total">' + escapeHtml(board.currency) + ' ' + escapeHtml(order.total ?? '') + '</div>'
      + '</div>'
      + '<div class="order-footer">'
      + '<span class="customer-name">' + escapeHtml(order.customerName || board.noName) + '</span>'
      + '<span class="customer-phone">' + escapeHtml(order.customerPhone || board.noPhone) + '</span>'
      + '</div>'
      + '</div>';
  }

  function render() {
    const orders = board.orders.filter((order) =>
      (currentFilter === 'all' || order.orderType === currentFilter) && order.day === selectedDate);
    tabs.forEach((tab) => tab.classList.toggle('active', tab.dataset.filter === currentFilter));
    picker.value = selectedDate;
    container.innerHTML = orders.length ? orders.map(card).join('') : board.emptyState;
    const total = orders.reduce((sum, order) => sum + (order.amount ?? 0), 0);
    sales.textContent = 'Total for ' + selectedDate + ': ' + board.currency + ' ' + total.toFixed(2);
  }

  tabs.forEach((tab) => tab.addEventListener('click', () => {
    currentFilter = tab.dataset.filter;
    render();
  }));
  picker.addEventListener('change', () => {
    if (picker.value) {
      selectedDate = picker.value;
      render();
    }
  });
  document.getElementById('todayBtn').addEventListener('click', () => {
    selectedDate = today();
    render();
  });
})();
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageOrder<'a> {
    #[serde(flatten)]
    order: &'a Order,
    day: Option<String>,
    amount: Option<f64>,
}

/// Everything the page script needs to redo a render cycle.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    filter: &'a str,
    date: String,
    currency: &'a str,
    zone_offset_minutes: Option<i32>,
    empty_state: String,
    no_name: &'static str,
    no_phone: &'static str,
    orders: Vec<PageOrder<'a>>,
}

fn page_data(view: &BoardView<'_>) -> Result<String, serde_json::Error> {
    let data = PageData {
        filter: view.state.filter().tag(),
        date: view.state.date().to_string(),
        currency: view.currency,
        zone_offset_minutes: view.zone.offset_minutes(),
        empty_state: empty_state(),
        no_name: NO_NAME,
        no_phone: NO_PHONE,
        orders: view
            .all_orders
            .iter()
            .map(|order| PageOrder {
                order,
                day: utils::calendar_day(&order.created_at, view.zone).map(|day| day.to_string()),
                amount: order.total.amount(),
            })
            .collect(),
    };
    // "</" would end the surrounding script element.
    Ok(serde_json::to_string(&data)?.replace("</", "<\\/"))
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_card(order: &Order, currency: &str) -> String {
    let items = item_lines(order)
        .iter()
        .map(|line| format!("<div>{}</div>", escape_html(line)))
        .join("");
    format!(
        r#"<div class="order-card">
  <div class="order-header">
    <span class="order-id">Order #: {id}</span>
    <span class="order-time">{time}</span>
  </div>
  <div class="order-type">{order_type}</div>
  <div class="order-details">
    <div class="order-items">{items}</div>
    <div class="order-total">{currency} {total}</div>
  </div>
  <div class="order-footer">
    <span class="customer-name">{name}</span>
    <span class="customer-phone">{phone}</span>
  </div>
</div>
"#,
        id = escape_html(&order.order_id),
        time = escape_html(&order.created_at),
        order_type = escape_html(&order.order_type),
        items = items,
        currency = escape_html(currency),
        total = escape_html(&order.total.to_string()),
        name = escape_html(customer_name(order)),
        phone = escape_html(customer_phone(order)),
    )
}

fn empty_state() -> String {
    format!(
        r#"<div class="empty-state">
  <h3>{EMPTY_TITLE}</h3>
  <p>{EMPTY_HINT}</p>
</div>
"#
    )
}

/// Contents of the order container: one card per order, or the empty-state
/// placeholder.
pub fn render_cards(view: &BoardView<'_>) -> String {
    if view.orders.is_empty() {
        return empty_state();
    }
    view.orders
        .iter()
        .map(|order| render_card(order, view.currency))
        .join("")
}

fn render_tabs(view: &BoardView<'_>) -> String {
    view.tabs
        .iter()
        .map(|tab| {
            let class = if view.state.is_active(tab) {
                "tab-btn active"
            } else {
                "tab-btn"
            };
            format!(
                r#"<button class="{class}" data-filter="{filter}" type="button">{label}</button>"#,
                filter = escape_html(tab.filter.tag()),
                label = escape_html(&tab.label),
            )
        })
        .join("\n        ")
}

/// A standalone page: filter tabs, date picker, today button, the order
/// container and the daily sales line. The initial render is static; the
/// embedded board data lets the controls re-filter it in place.
pub fn render_page(view: &BoardView<'_>) -> Result<Vec<u8>, serde_json::Error> {
    let data = page_data(view)?;
    let tabs = render_tabs(view);
    let cards = render_cards(view);
    let date = view.state.date();
    let summary = escape_html(&view.summary());

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Orders for {date}</title>
  <style>
    body {{ font-family: 'Inter', sans-serif; background: #f8fafc; color: #0f172a; margin: 0; }}
    header {{ display: flex; flex-wrap: wrap; gap: 16px; align-items: center; justify-content: space-between; padding: 16px 32px; background: #fff; border-bottom: 1px solid #e2e8f0; }}
    .tabs {{ display: flex; gap: 8px; }}
    .tab-btn {{ border: 1px solid #cbd5e1; background: #fff; border-radius: 8px; padding: 8px 16px; cursor: pointer; }}
    .tab-btn.active {{ background: #135bec; border-color: #135bec; color: #fff; }}
    .date-controls {{ display: flex; gap: 8px; align-items: center; }}
    #dailySales {{ font-weight: 700; }}
    #ordersContainer {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 16px; padding: 32px; }}
    .order-card {{ background: #fff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 16px; }}
    .order-header, .order-details, .order-footer {{ display: flex; justify-content: space-between; gap: 8px; }}
    .order-type {{ color: #135bec; font-weight: 600; margin: 8px 0; }}
    .order-total {{ font-weight: 700; }}
    .order-footer {{ color: #64748b; margin-top: 12px; }}
    .empty-state {{ grid-column: 1 / -1; text-align: center; padding: 40px; color: #555; }}
  </style>
</head>
<body>
  <header>
    <div class="tabs">
        {tabs}
    </div>
    <div class="date-controls">
      <input id="datePicker" type="date" value="{date}"/>
      <button id="todayBtn" type="button">Today</button>
    </div>
    <div id="dailySales">{summary}</div>
  </header>
  <main id="ordersContainer">
{cards}  </main>
  <script id="boardData" type="application/json">{data}</script>
  <script>
{PAGE_SCRIPT}  </script>
</body>
</html>
"####
    );
    Ok(html.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Options};
    use crate::filter::OrderFilter;
    use crate::model::{Order, OrderItem, Total};
    use crate::state::ViewState;
    use crate::utils::DayZone;
    use chrono::NaiveDate;

    fn order(id: &str, name: &str) -> Order {
        Order {
            order_id: id.to_string(),
            created_at: "2024-05-01T10:00".to_string(),
            order_type: "Takeaway".to_string(),
            table_number: String::new(),
            customer_name: name.to_string(),
            customer_phone: String::new(),
            delivery_address: String::new(),
            items: vec![
                OrderItem {
                    name: "Tea".to_string(),
                    quantity: "2".to_string(),
                },
                OrderItem {
                    name: "Fish & Chips".to_string(),
                    quantity: "1".to_string(),
                },
            ],
            total: Total::Text("15".to_string()),
        }
    }

    fn board(orders: Vec<Order>) -> Board {
        let options = Options {
            zone: DayZone::Utc,
            ..Options::default()
        };
        Board::new(orders, options).unwrap()
    }

    fn may_first(filter: OrderFilter) -> ViewState {
        ViewState::new(filter, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    #[test]
    fn one_card_per_order() {
        let board = board(vec![order("1", ""), order("2", "<b>Mina</b>"), order("3", "Jo")]);
        let view = board.view(&may_first(OrderFilter::All));
        let html = render_cards(&view);
        assert_eq!(html.matches(r#"<div class="order-card">"#).count(), 3);
        assert!(html.contains("<div>2 x Tea</div><div>1 x Fish &amp; Chips</div>"));
        assert!(html.contains(r#"<span class="customer-name">No name</span>"#));
        assert!(html.contains(r#"<span class="customer-phone">No phone</span>"#));
        assert!(html.contains("&lt;b&gt;Mina&lt;/b&gt;"));
        assert!(html.contains("₹ 15"));
    }

    #[test]
    fn empty_placeholder_has_no_cards() {
        let board = board(vec![order("1", "")]);
        let view = board.view(&may_first(OrderFilter::Type("Delivery".to_string())));
        let html = render_cards(&view);
        assert!(html.contains(EMPTY_TITLE));
        assert!(!html.contains("order-card"));
    }

    #[test]
    fn page_marks_only_selected_tab_active() {
        let board = board(vec![order("1", "")]);
        let view = board.view(&may_first(OrderFilter::Type("Takeaway".to_string())));
        let page = String::from_utf8(render_page(&view).unwrap()).unwrap();
        assert_eq!(page.matches("tab-btn active").count(), 1);
        assert!(page.contains(r#"<button class="tab-btn active" data-filter="Takeaway""#));
        assert!(page.contains(r#"<input id="datePicker" type="date" value="2024-05-01"/>"#));
        assert!(page.contains("Total for 2024-05-01: ₹ 15.00"));
    }

    fn embedded_data(page: &str) -> serde_json::Value {
        let start = page.find(r#"<script id="boardData" type="application/json">"#).unwrap();
        let body = &page[start..];
        let body = &body[body.find('>').unwrap() + 1..];
        let end = body.find("</script>").unwrap();
        serde_json::from_str(&body[..end]).unwrap()
    }

    #[test]
    fn page_embeds_every_order_for_the_controls() {
        let mut delivery = order("2", "Asha");
        delivery.order_type = "Delivery".to_string();
        delivery.created_at = "2024-05-02T09:30".to_string();
        delivery.total = Total::Text("oops".to_string());
        let board = board(vec![order("1", ""), delivery]);
        let view = board.view(&may_first(OrderFilter::Type("Takeaway".to_string())));
        assert_eq!(view.orders.len(), 1);

        let page = String::from_utf8(render_page(&view).unwrap()).unwrap();
        assert!(page.contains("addEventListener('click'"));
        let data = embedded_data(&page);
        assert_eq!(data["filter"], "Takeaway");
        assert_eq!(data["date"], "2024-05-01");
        assert_eq!(data["currency"], "₹");
        assert_eq!(data["zoneOffsetMinutes"], 0);
        assert_eq!(data["noName"], NO_NAME);
        assert_eq!(data["orders"].as_array().unwrap().len(), 2);
        assert_eq!(data["orders"][0]["day"], "2024-05-01");
        assert_eq!(data["orders"][0]["amount"], 15.0);
        assert_eq!(data["orders"][0]["items"][0]["name"], "Tea");
        assert_eq!(data["orders"][1]["orderType"], "Delivery");
        assert_eq!(data["orders"][1]["day"], "2024-05-02");
        assert!(data["orders"][1]["amount"].is_null());
    }

    #[test]
    fn embedded_data_cannot_close_the_script() {
        let board = board(vec![order("1", "</script><b>x</b>")]);
        let view = board.view(&may_first(OrderFilter::All));
        let page = String::from_utf8(render_page(&view).unwrap()).unwrap();
        assert_eq!(page.matches("</script>").count(), 2);
        assert_eq!(embedded_data(&page)["orders"][0]["customerName"], "</script><b>x</b>");
    }
}
