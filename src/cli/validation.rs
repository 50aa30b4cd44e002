use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.date.as_deref() {
        crate::utils::parse_iso_date(raw).map_err(|e| format!("invalid --date: {e}"))?;
    }
    if let Some(raw) = args.timezone.as_deref() {
        crate::utils::DayZone::parse(raw)
            .map_err(|e| format!("invalid --timezone '{raw}': {e}"))?;
    }
    if let Some(raw) = args.order_types.as_deref() {
        crate::utils::parse_order_types_csv(raw)
            .map_err(|e| format!("invalid --order-types '{raw}': {e}"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json, or html"
            ));
        }
    }
    if let Some(key) = args.store_key.as_deref() {
        if key.trim().is_empty() {
            return Err("invalid --store-key, expected a non-empty key".to_string());
        }
    }
    if args.interactive && args.output.is_some() {
        return Err("--interactive draws to the terminal and cannot be combined with --output".to_string());
    }
    Ok(())
}
