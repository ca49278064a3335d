use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use urania::{AspectCalculator, BirthData, CdoAssembler, Ephemeris, TimeConfidence};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a Cosmic Data Object for a birth tuple")]
struct Args {
    #[arg(long, help = "Birth date, e.g. 1995-04-20 or \"April 20, 1995\"")]
    dob: String,

    #[arg(long, help = "Local birth time (HH:MM, HH:MM:SS or 4:30 PM); noon when omitted")]
    time: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    #[arg(long, allow_hyphen_values = true, help = "Hours east of UTC at the birth place")]
    offset: Option<f64>,

    #[arg(long, help = "Query moment as RFC 3339; defaults to the current time")]
    now: Option<String>,

    #[arg(long, help = "Report longitudes in the configured sidereal frame")]
    sidereal: bool,

    #[arg(long, help = "Compute transits from the birth place")]
    topocentric: bool,

    #[arg(long, help = "Path to urania.toml")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the condensed summary instead of the full object")]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = urania_config::load_engine_config(args.config.as_deref())?;
    let ephemeris = Ephemeris::new(&config.ephemeris);
    let assembler = CdoAssembler::new(&ephemeris, AspectCalculator::new(config.orbs));

    let query: DateTime<Utc> = match args.now.as_deref() {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map_err(|e| anyhow::anyhow!("Invalid --now '{}': {e}", s))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut birth = BirthData::new(args.dob, args.lat, args.lon);
    birth.birth_time = args.time;
    birth.utc_offset_hours = args.offset;
    birth.sidereal = args.sidereal;
    birth.topocentric_transits = args.topocentric;

    let cdo = assembler.assemble(&birth, query)?;
    log::info!(
        "CDO for {} at {}: {} precision, {} time",
        birth.birth_date,
        query.to_rfc3339(),
        cdo.precision,
        if cdo.time_confidence == TimeConfidence::Exact {
            "exact"
        } else {
            "assumed"
        }
    );
    let out = if args.summary {
        serde_json::to_string_pretty(&cdo.summary())?
    } else {
        serde_json::to_string_pretty(&cdo.to_document()?)?
    };
    println!("{}", out);
    Ok(())
}
