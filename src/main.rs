use std::process::exit;

fn main() {
    if let Err(e) = orderboard::app::run_cli() {
        eprintln!("{e}");
        exit(1);
    }
}
