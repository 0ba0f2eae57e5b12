use std::fs;

use diffable::{format_markup, Settings};
use tracing::{info, span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

struct Args {
    pub input: String,
    pub settings: Option<String>,
    pub trace: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::DEBUG)
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish()
            .init();
        info!("Logger initialized");
    }

    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    let markup = fs::read_to_string(&args.input).map_err(diffable::Error::from)?;
    println!("{}", format_markup(&markup, &settings)?);
    Ok(())
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    let args = Args {
        settings: pargs.opt_value_from_str(["--settings", "-s"])?,
        trace: pargs.contains(["--trace", "-t"]),
        input: pargs.free_from_str()?,
    };
    Ok(args)
}

fn load_settings(path: &str) -> diffable::Result<Settings> {
    let span = span!(Level::DEBUG, "Loading settings", path);
    let _enter = span.enter();
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    Ok(Settings::from_json(&value))
}
