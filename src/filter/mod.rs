use std::fmt;

use chrono::NaiveDate;

use crate::model::Order;
use crate::utils::{self, DayZone};

/// Filter tag that matches every order type.
pub const ALL_FILTER: &str = "all";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OrderFilter {
    #[default]
    All,
    Type(String),
}

impl OrderFilter {
    pub fn parse(value: &str) -> Self {
        let raw = value.trim();
        if raw.eq_ignore_ascii_case(ALL_FILTER) {
            Self::All
        } else {
            Self::Type(raw.to_string())
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::All => ALL_FILTER,
            Self::Type(order_type) => order_type,
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Type(order_type) => order.order_type == *order_type,
        }
    }
}

impl fmt::Display for OrderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

pub fn placed_on(order: &Order, date: NaiveDate, zone: DayZone) -> bool {
    match utils::calendar_day(&order.created_at, zone) {
        Some(day) => day == date,
        None => {
            tracing::debug!(
                order_id = %order.order_id,
                created_at = %order.created_at,
                "order timestamp unreadable, excluded from date filter"
            );
            false
        }
    }
}

/// Orders of the selected type placed on `date`, in stored order.
pub fn filter_orders<'a>(
    orders: &'a [Order],
    filter: &OrderFilter,
    date: NaiveDate,
    zone: DayZone,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order))
        .filter(|order| placed_on(order, date, zone))
        .collect()
}
