use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use gpssnmp::data::duration::parse_duration;
use gpssnmp::{logging, query_gpsd, Error, FixSource, Settings};

const EXAMPLES: &str = "\
Examples:
to get OID_VISIBLE
   $ gpssnmp -g .1.3.6.1.2.1.25.1.31
   .1.3.6.1.2.1.25.1.31 = gauge: 13

to get OID_USED
   $ gpssnmp -g .1.3.6.1.2.1.25.1.32
   .1.3.6.1.2.1.25.1.32 = gauge: 4

to get OID_SNR_AVG
   $ gpssnmp -g .1.3.6.1.2.1.25.1.33
   .1.3.6.1.2.1.25.1.33 = gauge: 22.250000";

#[derive(Parser, Debug)]
#[command(name = "gpssnmp", version)]
#[command(about = "Poll local gpsd for SNMP variables")]
#[command(after_help = EXAMPLES)]
struct Args {
    /// gpsd to poll, as server[:port[:device]]
    #[arg(value_name = "server[:port[:device]]")]
    source: Option<String>,

    /// OID to print
    #[arg(short = 'g', long = "get", value_name = "OID")]
    oid: Option<String>,

    /// Debug level: 0 warnings, 1 info, 2 debug, 3 trace
    #[arg(short = 'D', long, default_value_t = 0)]
    debug: u8,

    /// Give up when no satellite report arrived in time (e.g., "10s", "500ms")
    #[arg(short, long)]
    timeout: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    logging::init_logging(args.debug);

    if let Err(err) = run(&args) {
        report_error(&err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let oid = args.oid.as_deref().ok_or(Error::MissingArgument)?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(ref timeout) = args.timeout {
        settings.poll.deadline = parse_duration(timeout).context("Invalid --timeout")?;
    }

    let source = match args.source {
        Some(ref spec) => FixSource::parse_with_defaults(spec, &settings.source)?,
        None => settings.source.clone(),
    };
    tracing::debug!(?source, poll = ?settings.poll, "Polling gpsd");

    let line = query_gpsd(&source, oid, &settings.poll)?;
    println!("{}", line);
    Ok(())
}

/// Print `<program>: ERROR: <message>`, plus usage where it helps.
fn report_error(err: &anyhow::Error) {
    eprintln!("{}: ERROR: {:#}", program_name(), err);

    if err.downcast_ref::<Error>().is_some_and(Error::shows_usage) {
        eprintln!();
        Args::command().write_help(&mut io::stderr()).ok();
    }
}

fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| std::path::Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "gpssnmp".to_string())
}
