//! sbomnom CLI - SPDX document ingestion and relationship inference.
//!
//! `parse` ingests a tag-value document and prints a summary (or the whole
//! document as JSON); `relationships` runs relationship inference over a
//! mapping-shaped YAML/JSON document. Both print the complete defect list
//! and exit non-zero when the input is invalid.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process;

use sbomnom::parser::{load_mapping_document, parse_all_relationships};
use sbomnom::{Document, TagValueParser};

#[derive(Parser)]
#[command(name = "sbomnom")]
#[command(version, about = "SPDX document ingestion and relationship inference", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a tag-value SPDX document
    Parse {
        /// Path to the tag-value document
        input: PathBuf,

        /// Print the parsed document as JSON instead of a summary
        #[arg(short, long)]
        json: bool,
    },

    /// Infer structural relationships from a mapping-shaped (YAML/JSON) document
    Relationships {
        /// Path to the YAML or JSON document
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Parse { input, json } => run_parse(&input, json),
        Commands::Relationships { input } => run_relationships(&input),
    };

    if let Err(message) = outcome {
        eprintln!("{}", message);
        process::exit(1);
    }
}

fn run_parse(input: &PathBuf, json: bool) -> Result<(), String> {
    let contents = fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let document = TagValueParser::parse(&contents).map_err(|error| error.to_string())?;

    if json {
        let rendered = serde_json::to_string_pretty(&document)
            .map_err(|e| format!("Failed to serialize document: {}", e))?;
        println!("{}", rendered);
    } else {
        print_summary(&document);
    }
    Ok(())
}

fn run_relationships(input: &PathBuf) -> Result<(), String> {
    let doc = load_mapping_document(input)?;
    let relationships = parse_all_relationships(&doc).map_err(|error| error.to_string())?;
    let rendered = serde_json::to_string_pretty(&relationships)
        .map_err(|e| format!("Failed to serialize relationships: {}", e))?;
    println!("{}", rendered);
    Ok(())
}

fn print_summary(document: &Document) {
    let info = &document.creation_info;
    println!("{} ({})", info.name, info.spdx_version);
    println!("  namespace:      {}", info.document_namespace);
    println!("  packages:       {}", document.packages.len());
    println!("  files:          {}", document.files.len());
    println!("  snippets:       {}", document.snippets.len());
    println!("  annotations:    {}", document.annotations.len());
    println!("  relationships:  {}", document.relationships.len());
    println!(
        "  licensing info: {}",
        document.extracted_licensing_info.len()
    );
}
