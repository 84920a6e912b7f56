use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{debug, warn};
use mii_core::core_api::{Engine, Session};
use mii_core::mii::MiiFormat;
use mii_core::save::{LayoutOverrides, MAX_SLOTS, Region};
use mii_render::{
    TextRenderOptions, render_extraction_json, render_extraction_text, render_mii_json,
    render_mii_text, render_slot_json, render_slot_text,
};
use serde_json::Value as JsonValue;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Save file, or a single raw Mii record with --mii.
    #[arg(value_name = "FILE")]
    path: PathBuf,
    /// Decode FILE as one standalone record instead of a save file.
    #[arg(
        long,
        value_name = "legacy|wii|modern|3ds|wiiu",
        value_parser = parse_mii_format,
        conflicts_with_all = ["region", "slot", "max_slots", "layout"]
    )]
    mii: Option<MiiFormat>,
    /// Save region. Unrecognised values fall back to EU.
    #[arg(long, value_name = "EU|US|KR|JP", default_value = "EU")]
    region: String,
    /// Extract a single slot.
    #[arg(long)]
    slot: Option<usize>,
    /// Number of leading slots to scan in batch mode.
    #[arg(long = "max-slots", default_value_t = MAX_SLOTS)]
    max_slots: usize,
    /// JSON document overriding individual layout offsets.
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,
    #[arg(long)]
    json: bool,
    /// List every relationship edge in text output.
    #[arg(long)]
    edges: bool,
    /// Raise the default log level to debug.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let bytes = fs::read(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });
    let engine = Engine::new();

    if let Some(format) = cli.mii {
        run_record(&engine, bytes, format, cli.json);
        return;
    }

    let region = parse_region(&cli.region);
    let overrides = cli.layout.as_deref().map(read_overrides);
    let session = engine
        .open_save(bytes, region, overrides.as_ref())
        .unwrap_or_else(|e| {
            eprintln!("Error opening save file: {}", cli.path.display());
            eprintln!("  {e}");
            process::exit(1);
        });
    let options = TextRenderOptions { verbose: cli.edges };

    if let Some(slot) = cli.slot {
        let record = session.slot(slot).unwrap_or_else(|e| {
            eprintln!("Error reading slot {slot}: {e}");
            process::exit(2);
        });
        if cli.json {
            print_json(&render_slot_json(&record));
        } else {
            print!("{}", render_slot_text(&record, options));
        }
        return;
    }

    run_batch(&session, cli.max_slots, cli.json, options);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_record(engine: &Engine, bytes: Vec<u8>, format: MiiFormat, json: bool) {
    let checksum_valid = match format {
        MiiFormat::Modern => match engine.verify_mii_checksum(&bytes, format) {
            Ok(valid) => Some(valid),
            Err(e) => {
                debug!("checksum not verified: {e}");
                None
            }
        },
        MiiFormat::Legacy => None,
    };
    let record = engine.decode_mii(bytes, format).unwrap_or_else(|e| {
        eprintln!("Error decoding record: {e}");
        process::exit(1);
    });

    if json {
        print_json(&render_mii_json(&record, checksum_valid));
    } else {
        print!("{}", render_mii_text(&record, checksum_valid));
    }
}

fn run_batch(session: &Session, max_slots: usize, json: bool, options: TextRenderOptions) {
    let extraction = session.extract_all(max_slots);
    if json {
        print_json(&render_extraction_json(
            &extraction,
            session.info(),
            session.capabilities(),
        ));
    } else {
        print!(
            "{}",
            render_extraction_text(&extraction, session.capabilities(), options)
        );
    }
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn read_overrides(path: &Path) -> LayoutOverrides {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading layout {}: {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing layout {}: {e}", path.display());
        process::exit(2);
    })
}

fn parse_region(value: &str) -> Region {
    match value.parse::<Region>() {
        Ok(region) => region,
        Err(e) => {
            warn!("{e}; using EU layout");
            Region::Eu
        }
    }
}

fn parse_mii_format(value: &str) -> Result<MiiFormat, String> {
    value.parse()
}
