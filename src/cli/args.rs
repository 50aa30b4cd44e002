use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "orderboard",
    version,
    about = "point-of-sale order board",
    long_about = "Orderboard shows the orders kept in a key-value store, filtered by order type and day, with the day's sales total.\n\nExamples:\n  orderboard -s orders.json\n  orderboard -s orders.json -f Takeaway -d 2024-05-01\n  orderboard -s orders.json -o board.html\n  orderboard -s orders.json --interactive\n\nTip: Use --config to keep the store path, time zone and tabs out of every invocation."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the board to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 's',
        long = "st",
        visible_alias = "store",
        value_name = "FILE",
        help_heading = "Input",
        help = "Order store file: a JSON object of keys to values."
    )]
    pub store: Option<String>,

    #[arg(
        short = 'k',
        long = "key",
        visible_alias = "store-key",
        value_name = "KEY",
        help_heading = "Input",
        help = "Store key holding the order list (default: orders)."
    )]
    pub store_key: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.orderboard/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'f',
        long = "flt",
        visible_alias = "filter",
        value_name = "TAB",
        help_heading = "View",
        help = "Filter tab to show: all, or one of the order types."
    )]
    pub filter: Option<String>,

    #[arg(
        short = 'd',
        long = "dt",
        visible_alias = "date",
        value_name = "YYYY-MM-DD",
        conflicts_with = "today",
        help_heading = "View",
        help = "Day to show (defaults to today)."
    )]
    pub date: Option<String>,

    #[arg(
        short = 't',
        long = "td",
        visible_alias = "today",
        help_heading = "View",
        help = "Show today's orders."
    )]
    pub today: bool,

    #[arg(
        short = 'z',
        long = "tz",
        visible_alias = "timezone",
        value_name = "ZONE",
        help_heading = "View",
        help = "Day boundaries: local, utc, or an offset like +05:30."
    )]
    pub timezone: Option<String>,

    #[arg(
        long = "cur",
        visible_alias = "currency",
        value_name = "SYMBOL",
        help_heading = "View",
        help = "Currency prefix for totals (default: ₹)."
    )]
    pub currency: Option<String>,

    #[arg(
        short = 'T',
        long = "ot",
        visible_alias = "order-types",
        value_name = "LIST",
        help_heading = "View",
        help = "Comma-separated order types offered as filter tabs."
    )]
    pub order_types: Option<String>,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Read filter/date commands from stdin and redraw after each."
    )]
    pub interactive: bool,
}
