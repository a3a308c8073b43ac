use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use kunkunlib::{
    convert_with_options, generate_dummy_notes, melody_from_file, render_tab_to_svg, tab_to_json,
    tab_to_text, ConversionOptions, CostModel, ImportOptions, SheetOptions,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `start-end<TAB>string<TAB>symbol<TAB>noteName` lines
    Text,
    Json,
    Svg,
}

/// Convert a melody to sanshin kunkunshi tablature.
#[derive(Debug, Parser)]
#[command(name = "kunkunshi", version)]
struct Args {
    /// Melody file (.musicxml, .xml, .mxl or notes .json). Omit with --demo.
    input: Option<PathBuf>,

    /// Use the built-in reference melody instead of an input file
    #[arg(long, conflicts_with = "input")]
    demo: bool,

    /// Key root (C, C#, Db, ... B)
    #[arg(short, long, default_value = "C")]
    key: String,

    /// MusicXML part to read (0-based)
    #[arg(long, default_value_t = 0)]
    part: usize,

    /// JSON file overriding cost model weights
    #[arg(long)]
    cost: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Sheet title (svg output)
    #[arg(long)]
    title: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "kunkunlib=debug,kunkunshi=debug"
    } else {
        "kunkunlib=info,kunkunshi=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

fn run(args: Args) -> Result<(), String> {
    let notes = match (&args.input, args.demo) {
        (Some(path), _) => {
            let import = ImportOptions {
                part_index: args.part,
                ..ImportOptions::default()
            };
            melody_from_file(path, &import).map_err(|e| e.to_string())?
        }
        (None, true) => generate_dummy_notes(kunkunlib::transcription::DEFAULT_DURATION_SEC),
        (None, false) => return Err("an input file or --demo is required".to_string()),
    };

    let cost = match &args.cost {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {e}", path.display()))?;
            serde_json::from_str::<CostModel>(&text)
                .map_err(|e| format!("Invalid cost model '{}': {e}", path.display()))?
        }
        None => CostModel::default(),
    };

    let options = ConversionOptions {
        key_root: args.key.clone(),
        cost,
    };
    if kunkunlib::key_offset(&args.key) == 0 && args.key != "C" {
        tracing::warn!(key = %args.key, "unrecognized key root, not transposing");
    }

    let tab = convert_with_options(&notes, &options);
    tracing::info!(notes = notes.len(), key = %args.key, "converted melody");

    let mut rendered = match args.format {
        OutputFormat::Text => tab_to_text(&tab),
        OutputFormat::Json => tab_to_json(&tab).map_err(|e| e.to_string())?,
        OutputFormat::Svg => render_tab_to_svg(
            &tab,
            &SheetOptions {
                title: args.title.clone(),
                ..SheetOptions::default()
            },
        ),
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .map_err(|e| format!("Failed to write '{}': {e}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
