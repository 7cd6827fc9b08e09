use anyhow::{Context, Result};
use bat::PrettyPrinter;
use clap::Parser;
use console::{style, Term};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use orchestration_parser::{handle, InvocationEvent, ListFlattening, ParserOptions};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Event JSON file to parse (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Which list-valued tool parameters are joined into a comma-separated string
    #[arg(long, default_value_t = ListFlattening::Every)]
    list_flattening: ListFlattening,

    /// Treat the input as the raw model output instead of a full event
    #[arg(long)]
    raw: bool,

    /// Print compact JSON without highlighting
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = read_input(cli.file.as_deref())?;
    let event = if cli.raw {
        InvocationEvent {
            prompt_type: None,
            invoke_model_raw_response: Some(input),
        }
    } else {
        serde_json::from_str(&input).context("Input is not a valid parser event")?
    };

    let options = ParserOptions::with_list_flattening(cli.list_flattening);
    let response = match handle(&event, &options) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    if cli.compact || !Term::stdout().is_term() {
        println!("{}", serde_json::to_string(&response)?);
    } else {
        render(&serde_json::to_string_pretty(&response)?)?;
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn render(json: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(json.as_bytes())
        .language("json")
        .print()
        .map_err(|e| anyhow::anyhow!("Failed to render output: {}", e))?;
    println!();
    Ok(())
}
