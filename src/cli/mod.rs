mod export;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use unihan_d::{field_order, has_decoder, FieldFormat, Manifest, Options};

#[derive(Parser)]
#[command(name = "unihan-d")]
#[command(version)]
#[command(about = "Decode the Unihan database into structured per-character records", long_about = None)]
struct Cli {
    /// Directory containing the extracted Unihan_*.txt files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    input: PathBuf,

    /// Only load these fields (repeatable); default is every manifest field
    #[arg(short, long, value_name = "FIELD")]
    field: Vec<String>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value = "json")]
    format: Format,

    /// Keep raw field strings instead of running the decoders
    #[arg(long)]
    no_expand: bool,

    /// Drop absent/empty fields from each record
    #[arg(short, long)]
    prune: bool,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// List every manifest field with its classification and decoder status
    #[arg(short, long)]
    list_fields: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Pretty-printed JSON array
    Json,
    /// One compact JSON record per line
    Ndjson,
    /// Flat table of raw field strings (never expanded)
    Csv,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load the manifest with user overrides
    let manifest = Manifest::load_with_overrides()?;

    if cli.list_fields {
        print_fields(&manifest);
        return Ok(());
    }

    let requested = if cli.field.is_empty() {
        None
    } else {
        Some(cli.field.clone())
    };

    let options = Options {
        input_dir: cli.input.clone(),
        fields: requested.clone(),
        // Structured values do not fit flat CSV cells; the CSV path keeps
        // the raw strings.
        expand: !cli.no_expand && cli.format != Format::Csv,
        prune: cli.prune,
    };

    let records = unihan_d::process(&manifest, &options)?;
    tracing::debug!("{} records", records.len());

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match cli.format {
        Format::Json => export::write_json(out, &records)?,
        Format::Ndjson => export::write_ndjson(out, &records)?,
        Format::Csv => {
            let fields = manifest.resolve_fields(requested.as_deref())?;
            let columns = field_order(fields.iter().map(String::as_str));
            export::write_csv(out, &records, &columns)?;
        }
    }

    Ok(())
}

fn print_fields(manifest: &Manifest) {
    println!("Fields by source file:\n");
    for (file, source) in &manifest.sources {
        println!("{}", file);
        for field in &source.fields {
            let format = match FieldFormat::of(field) {
                FieldFormat::Scalar => "scalar",
                FieldFormat::SemicolonList => "semicolon",
                FieldFormat::SpaceList => "list",
                FieldFormat::LocalePair => "pair",
            };
            let decoded = if has_decoder(field) { "decoded" } else { "raw" };
            println!("  {:<28} {:<10} {}", field, format, decoded);
        }
        println!();
    }
}
