use chrono::{NaiveDate, TimeZone, Utc};

use crate::board::{Board, Options};
use crate::filter::OrderFilter;
use crate::output::{self, EMPTY_TITLE, NO_NAME, NO_PHONE};
use crate::state::{BoardEvent, ViewState};
use crate::store::{self, JsonFileStore, MemoryStore};
use crate::utils::{DayZone, FixedClock};

const TEA_ORDER: &str = r#"[{
    "orderId": "1001",
    "orderType": "Takeaway",
    "createdAt": "2024-05-01T10:00",
    "total": "15",
    "items": [{"name": "Tea", "quantity": 2}],
    "customerName": "",
    "customerPhone": ""
}]"#;

fn utc_options() -> Options {
    Options {
        zone: DayZone::Utc,
        ..Options::default()
    }
}

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

#[test]
fn single_takeaway_order_scenario() {
    let store = MemoryStore::new().with_item("orders", TEA_ORDER);
    let board = Board::from_store(&store, utc_options()).unwrap();
    let view = board.view(&ViewState::new(OrderFilter::All, may(1)));

    assert_eq!(view.orders.len(), 1);
    assert_eq!(view.daily_sales_text(), "15.00");

    let card = output::report::render_cards(&view);
    assert!(card.contains("2 x Tea"));
    assert!(card.contains(NO_NAME));
    assert!(card.contains(NO_PHONE));
}

#[test]
fn legacy_orders_are_backfilled_on_load() {
    let store = MemoryStore::new().with_item(
        "orders",
        r#"[
            {"orderId": 1, "createdAt": "2024-05-01T08:00", "total": 5, "items": []},
            {"orderId": 2, "orderType": "Delivery", "createdAt": "2024-05-01T09:00", "total": 6,
             "customerName": "Ira", "deliveryAddress": "4 Lake View"}
        ]"#,
    );
    let orders = store::load_orders(&store, "orders");
    let legacy = &orders[0];
    assert_eq!(legacy.order_type, "Dine In");
    for field in [
        &legacy.table_number,
        &legacy.customer_name,
        &legacy.customer_phone,
        &legacy.delivery_address,
    ] {
        assert_eq!(field, "");
    }
    assert_eq!(orders[1].customer_name, "Ira");
    assert_eq!(orders[1].delivery_address, "4 Lake View");
}

#[test]
fn every_tab_and_day_combination_without_orders_renders_placeholder() {
    let store = MemoryStore::new().with_item("orders", TEA_ORDER);
    let board = Board::from_store(&store, utc_options()).unwrap();
    for tab in board.tabs() {
        for day in [may(2), may(30)] {
            let view = board.view(&ViewState::new(tab.filter.clone(), day));
            let html = output::report::render_cards(&view);
            assert!(html.contains(EMPTY_TITLE));
            assert!(!html.contains("order-card"));
            assert_eq!(view.daily_sales_text(), "0.00");
        }
    }
}

#[test]
fn unreadable_store_renders_empty_board() {
    let store = JsonFileStore::new(std::env::temp_dir().join("orderboard-no-such-store.json"));
    let board = Board::from_store(&store, utc_options()).unwrap();
    assert!(board.orders().is_empty());
    let view = board.view(&ViewState::new(OrderFilter::All, may(1)));
    let text = String::from_utf8(output::render_text(&view)).unwrap();
    assert!(text.contains(EMPTY_TITLE));
}

#[test]
fn event_sequence_recomputes_each_time() {
    let store = MemoryStore::new().with_item(
        "orders",
        r#"[
            {"orderId": "a", "orderType": "Takeaway", "createdAt": "2024-05-01T10:00", "total": "10"},
            {"orderId": "b", "orderType": "Dine In", "createdAt": "2024-05-01T11:00", "total": "20.5"},
            {"orderId": "c", "orderType": "Dine In", "createdAt": "2024-05-02T11:00", "total": "9.49"},
            {"orderId": "d", "orderType": "Dine In", "createdAt": "2024-05-02T12:00", "total": "oops"}
        ]"#,
    );
    let board = Board::from_store(&store, utc_options()).unwrap();
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 2, 15, 0, 0).unwrap());

    let state = board.initial_state(&clock);
    assert_eq!(board.view(&state).daily_sales_text(), "9.49");

    let dine_in = board.resolve_filter("Dine In").unwrap();
    let state = board.apply(&state, &BoardEvent::SelectFilter(dine_in), &clock);
    let state = board.apply(&state, &BoardEvent::SelectDate(may(1)), &clock);
    let view = board.view(&state);
    assert_eq!(view.orders.len(), 1);
    assert_eq!(view.daily_sales_text(), "20.50");

    let state = board.apply(&state, &BoardEvent::SelectFilter(OrderFilter::All), &clock);
    assert_eq!(board.view(&state).daily_sales_text(), "30.50");

    let state = board.apply(&state, &BoardEvent::Today, &clock);
    assert_eq!(state.date(), may(2));
    let view = board.view(&state);
    let ids: Vec<_> = view.orders.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "d"]);
    assert_eq!(view.summary(), "Total for 2024-05-02: ₹ 9.49");
}

#[test]
fn timezone_decides_day_of_offset_timestamps() {
    let store = MemoryStore::new().with_item(
        "orders",
        r#"[{"orderId": "late", "createdAt": "2024-05-01T20:00:00Z", "total": "12"}]"#,
    );
    let utc = Board::from_store(&store, utc_options()).unwrap();
    assert_eq!(utc.view(&ViewState::new(OrderFilter::All, may(1))).orders.len(), 1);

    let ist = Board::from_store(
        &store,
        Options {
            zone: DayZone::parse("+05:30").unwrap(),
            ..Options::default()
        },
    )
    .unwrap();
    assert!(ist.view(&ViewState::new(OrderFilter::All, may(1))).orders.is_empty());
    assert_eq!(ist.view(&ViewState::new(OrderFilter::All, may(2))).orders.len(), 1);
}
