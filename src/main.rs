use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use nf::fd_parser::{ParseMode, parse_attribute_list, parse_csv_header};
use nf::samples::Sample;
use nf::{AnalysisInput, AnalysisOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nf",
    about = "Classify a table's normal form from its functional dependencies and suggest a decomposition"
)]
struct Cli {
    /// Dependency file, one `A, B -> C` per line (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Attribute names, comma-separated
    #[arg(long, short = 'a', conflicts_with = "header")]
    attributes: Option<String>,

    /// Take attribute names from the header row of a CSV file
    #[arg(long)]
    header: Option<PathBuf>,

    /// Primary key attributes, comma-separated
    #[arg(long, short = 'k', default_value = "")]
    key: String,

    /// Name of the main table
    #[arg(long, short = 'n', default_value = "Main")]
    name: String,

    /// Analyze a built-in sample (student, medical, library, flat)
    #[arg(long, short = 's', conflicts_with_all = ["file", "attributes", "header", "key", "name"])]
    sample: Option<Sample>,

    /// Skip malformed dependency lines instead of failing
    #[arg(long)]
    lenient: bool,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Maximum width of the table diagram in columns
    #[arg(long, short = 'w')]
    width: Option<usize>,

    /// Report 3NF+ results as BCNF
    #[arg(long)]
    bcnf: bool,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Sql,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = match cli.sample {
        Some(sample) => sample.input(),
        None => read_input(&cli),
    };

    let mode = if cli.lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };
    let options = AnalysisOptions::default()
        .with_mode(mode)
        .with_bcnf_claim(cli.bcnf)
        .with_max_width(cli.width);

    let result = match cli.format {
        Format::Text => nf::render_with_options(&input, &options),
        Format::Json => nf::render_json(&input, &options),
        Format::Sql => nf::render_sql(&input, &options),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => fail(&e.to_string()),
    }
}

fn read_input(cli: &Cli) -> AnalysisInput {
    let attributes = match (&cli.attributes, &cli.header) {
        (Some(list), _) => parse_attribute_list(list),
        (None, Some(path)) => {
            parse_csv_header(&read_file(path)).unwrap_or_else(|e| fail(&e.to_string()))
        }
        (None, None) => fail("no attributes given (use --attributes, --header or --sample)"),
    };

    let dependencies = match &cli.file {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .unwrap_or_else(|e| fail(&format!("failed to read stdin: {e}")));
            buf
        }
    };

    AnalysisInput {
        table_name: cli.name.trim().to_string(),
        attributes,
        primary_key: parse_attribute_list(&cli.key),
        dependencies,
    }
}

fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("failed to read {}: {e}", path.display())))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
