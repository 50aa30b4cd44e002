use chrono::NaiveDate;

use crate::filter::OrderFilter;
use crate::utils::{self, Clock, DayZone};

/// A selectable filter tab. The "All" tab is always first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterTab {
    pub label: String,
    pub filter: OrderFilter,
}

pub fn build_tabs(order_types: &[String]) -> Vec<FilterTab> {
    let mut tabs = Vec::with_capacity(order_types.len() + 1);
    tabs.push(FilterTab {
        label: "All".to_string(),
        filter: OrderFilter::All,
    });
    tabs.extend(order_types.iter().map(|order_type| FilterTab {
        label: order_type.clone(),
        filter: OrderFilter::Type(order_type.clone()),
    }));
    tabs
}

/// A user interaction that changes what the board shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    SelectFilter(OrderFilter),
    SelectDate(NaiveDate),
    Today,
}

/// The current selection: which tab is active and which day is shown.
///
/// Values are never modified in place; every event yields a new state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    filter: OrderFilter,
    date: NaiveDate,
}

impl ViewState {
    pub fn new(filter: OrderFilter, date: NaiveDate) -> Self {
        Self { filter, date }
    }

    /// All orders placed today.
    pub fn initial(clock: &dyn Clock, zone: DayZone) -> Self {
        Self::new(OrderFilter::All, utils::today(clock, zone))
    }

    pub fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn with_filter(&self, filter: OrderFilter) -> Self {
        Self {
            filter,
            date: self.date,
        }
    }

    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            filter: self.filter.clone(),
            date,
        }
    }

    pub fn apply(&self, event: &BoardEvent, clock: &dyn Clock, zone: DayZone) -> Self {
        match event {
            BoardEvent::SelectFilter(filter) => self.with_filter(filter.clone()),
            BoardEvent::SelectDate(date) => self.with_date(*date),
            BoardEvent::Today => self.with_date(utils::today(clock, zone)),
        }
    }

    pub fn is_active(&self, tab: &FilterTab) -> bool {
        tab.filter == self.filter
    }
}
