use chrono::NaiveDate;
use thiserror::Error;

use crate::filter::{self, OrderFilter};
use crate::model::{Order, DEFAULT_ORDER_TYPES};
use crate::sales;
use crate::state::{self, BoardEvent, FilterTab, ViewState};
use crate::store::{self, KeyValueStore, DEFAULT_STORE_KEY};
use crate::utils::{self, Clock, DayZone};

pub const DEFAULT_CURRENCY: &str = "₹";

#[derive(Clone, Debug)]
pub struct Options {
    pub store_key: String,
    pub zone: DayZone,
    pub currency: String,
    pub order_types: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            store_key: DEFAULT_STORE_KEY.to_string(),
            zone: DayZone::Local,
            currency: DEFAULT_CURRENCY.to_string(),
            order_types: DEFAULT_ORDER_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("store key is empty")]
    EmptyStoreKey,

    #[error("no order types configured")]
    NoOrderTypes,

    #[error("order type '{value}' is listed twice")]
    DuplicateOrderType { value: String },

    #[error("'all' is reserved for the all-orders tab")]
    ReservedOrderType,

    #[error("unknown filter tab '{value}' (available: {available})")]
    UnknownTab { value: String, available: String },

    #[error("{message}")]
    InvalidDate { message: String },
}

/// The loaded order list together with the tabs offered for filtering it.
#[derive(Clone, Debug)]
pub struct Board {
    orders: Vec<Order>,
    tabs: Vec<FilterTab>,
    options: Options,
}

/// What one render cycle shows: the selection and the orders it matched.
#[derive(Clone, Debug)]
pub struct BoardView<'a> {
    pub state: ViewState,
    pub tabs: &'a [FilterTab],
    pub orders: Vec<&'a Order>,
    pub daily_sales: f64,
    pub currency: &'a str,
    /// Every loaded order, for renderers that filter on their own.
    pub all_orders: &'a [Order],
    pub zone: DayZone,
}

impl BoardView<'_> {
    pub fn daily_sales_text(&self) -> String {
        sales::format_amount(self.daily_sales)
    }

    pub fn summary(&self) -> String {
        format!(
            "Total for {}: {} {}",
            self.state.date(),
            self.currency,
            self.daily_sales_text()
        )
    }
}

impl Board {
    pub fn new(orders: Vec<Order>, options: Options) -> Result<Self, BoardError> {
        if options.store_key.trim().is_empty() {
            return Err(BoardError::EmptyStoreKey);
        }
        if options.order_types.is_empty() {
            return Err(BoardError::NoOrderTypes);
        }
        let mut seen: Vec<&str> = Vec::with_capacity(options.order_types.len());
        for order_type in options.order_types.iter() {
            let name = order_type.trim();
            if name.eq_ignore_ascii_case(filter::ALL_FILTER) {
                return Err(BoardError::ReservedOrderType);
            }
            // Tabs resolve case-insensitively, so "Takeaway" and "takeaway" collide.
            if seen.iter().any(|prev| prev.eq_ignore_ascii_case(name)) {
                return Err(BoardError::DuplicateOrderType {
                    value: order_type.clone(),
                });
            }
            seen.push(name);
        }
        let tabs = state::build_tabs(&options.order_types);
        Ok(Self {
            orders,
            tabs,
            options,
        })
    }

    /// Load the order list from `store` and build a board over it.
    pub fn from_store(store: &dyn KeyValueStore, options: Options) -> Result<Self, BoardError> {
        if options.store_key.trim().is_empty() {
            return Err(BoardError::EmptyStoreKey);
        }
        let orders = store::load_orders(store, &options.store_key);
        Self::new(orders, options)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn tabs(&self) -> &[FilterTab] {
        &self.tabs
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn initial_state(&self, clock: &dyn Clock) -> ViewState {
        ViewState::initial(clock, self.options.zone)
    }

    /// Find the tab named by `value`, by tag or label, ignoring case.
    pub fn resolve_tab(&self, value: &str) -> Result<&FilterTab, BoardError> {
        let wanted = value.trim();
        self.tabs
            .iter()
            .find(|tab| {
                tab.filter.tag().eq_ignore_ascii_case(wanted) || tab.label.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| BoardError::UnknownTab {
                value: wanted.to_string(),
                available: self
                    .tabs
                    .iter()
                    .map(|tab| tab.filter.tag())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    pub fn resolve_filter(&self, value: &str) -> Result<OrderFilter, BoardError> {
        self.resolve_tab(value).map(|tab| tab.filter.clone())
    }

    pub fn parse_date(&self, value: &str) -> Result<NaiveDate, BoardError> {
        utils::parse_iso_date(value).map_err(|message| BoardError::InvalidDate { message })
    }

    pub fn apply(&self, state: &ViewState, event: &BoardEvent, clock: &dyn Clock) -> ViewState {
        let next = state.apply(event, clock, self.options.zone);
        tracing::debug!(
            filter = %next.filter(),
            date = %next.date(),
            ?event,
            "selection changed"
        );
        next
    }

    /// Run the filter and aggregate for `state`.
    pub fn view(&self, state: &ViewState) -> BoardView<'_> {
        let orders = filter::filter_orders(
            &self.orders,
            state.filter(),
            state.date(),
            self.options.zone,
        );
        let daily_sales = sales::daily_sales(&orders);
        tracing::info!(
            filter = %state.filter(),
            date = %state.date(),
            matched = orders.len(),
            of = self.orders.len(),
            "orders filtered"
        );
        BoardView {
            state: state.clone(),
            tabs: &self.tabs,
            orders,
            daily_sales,
            currency: &self.options.currency,
            all_orders: &self.orders,
            zone: self.options.zone,
        }
    }
}
