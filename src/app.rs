use std::io::{IsTerminal, Write};

use chrono::NaiveDate;
use clap::{error::ErrorKind, Parser};
use tracing_subscriber::EnvFilter;

use crate::board::{self, Board};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::filter::ALL_FILTER;
use crate::output::{self, OutputFormat};
use crate::session::Session;
use crate::state::ViewState;
use crate::store::{JsonFileStore, DEFAULT_STORE_KEY};
use crate::utils::{self, DayZone, SystemClock};

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<8}: {}", label, value);
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_tracing(verbose: u8) {
    let level = default_log_level(verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("orderboard={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[derive(Clone, Debug)]
struct RunConfig {
    store_path: String,
    options: board::Options,
    filter: String,
    date: Option<NaiveDate>,
    output: Option<String>,
    output_format: OutputFormat,
    interactive: bool,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let store_path = args
        .store
        .or(cfg.store)
        .map(|p| config::expand_tilde(p.trim()).to_string_lossy().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| "an order store must be specified (--store or 'store' in config)".to_string())?;

    let store_key = args
        .store_key
        .or(cfg.store_key)
        .unwrap_or_else(|| DEFAULT_STORE_KEY.to_string());

    let zone = match args.timezone.or(cfg.timezone) {
        Some(raw) => DayZone::parse(&raw).map_err(|e| format!("invalid timezone '{raw}': {e}"))?,
        None => DayZone::Local,
    };

    let currency = args
        .currency
        .or(cfg.currency)
        .unwrap_or_else(|| board::DEFAULT_CURRENCY.to_string());

    let order_types = match (args.order_types, cfg.order_types) {
        (Some(raw), _) => utils::parse_order_types_csv(&raw)
            .map_err(|e| format!("invalid --order-types '{raw}': {e}"))?,
        (None, Some(list)) => utils::parse_order_types_csv(&list.join(","))
            .map_err(|e| format!("invalid order_types in config: {e}"))?,
        (None, None) => board::Options::default().order_types,
    };

    let filter = args
        .filter
        .or(cfg.filter)
        .unwrap_or_else(|| ALL_FILTER.to_string());

    let date = match args.date.as_deref() {
        Some(raw) if !args.today => Some(utils::parse_iso_date(raw)?),
        _ => None,
    };

    let output = args.output.or(cfg.output);
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json, or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or_default(),
    };

    Ok(RunConfig {
        store_path,
        options: board::Options {
            store_key,
            zone,
            currency,
            order_types,
        },
        filter,
        date,
        output,
        output_format,
        interactive: args.interactive,
        no_color,
    })
}

fn run(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    let store = JsonFileStore::new(&run.store_path);
    let board = Board::from_store(&store, run.options.clone()).map_err(|e| e.to_string())?;
    let clock = SystemClock;

    let filter = board.resolve_filter(&run.filter).map_err(|e| e.to_string())?;
    let date = run
        .date
        .unwrap_or_else(|| utils::today(&clock, run.options.zone));
    let state = ViewState::new(filter, date);

    if run.interactive {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut session =
            Session::new(&board, &clock, state).clear_screen(stdout.is_terminal());
        return session
            .run(stdin.lock(), stdout.lock())
            .map_err(|e| e.to_string());
    }

    let view = board.view(&state);
    let rendered = output::render(run.output_format, &view)
        .map_err(|e| format!("failed to render {:?} output: {e}", run.output_format))?;

    match run.output.as_ref() {
        Some(outfile_path) => {
            format_kv_line("Store", &run.store_path);
            format_kv_line("Filter", state.filter().tag());
            format_kv_line("Date", &state.date().to_string());
            format_kv_line(
                "Orders",
                &format!("{} of {}", view.orders.len(), board.orders().len()),
            );
            format_kv_line("Sales", &view.summary());
            std::fs::write(outfile_path, &rendered)
                .map_err(|e| format!("failed to write output file '{outfile_path}': {e}"))?;
            format_kv_line("Output", outfile_path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&rendered)
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("failed to write output: {e}"))?;
        }
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                e.print().map_err(|e| format!("failed to print help: {e}"))?;
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    init_tracing(args.verbose);

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));

    if args.init_config {
        let path = user_config_path
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine a config path, pass --config".to_string())?;
        let created = config::ensure_default_config_file(&path)?;
        let state = if created { "created" } else { "exists" };
        format_kv_line("Config", &format!("{} ({state})", path.display()));
        return Ok(());
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };
    tracing::debug!(?cfg, "configuration loaded");

    let run_config = build_run_config(args, cfg)?;
    run(run_config)
}
