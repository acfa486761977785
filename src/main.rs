use anyhow::{anyhow, bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use butils::config::Config;
use butils::document::TreeValue;
use butils::file::loader::{load_file_with, load_from_stdin, read_stdin_text, read_text, LoadOptions};
use butils::pathmap::{diff, map_values, resolve, slice_value, PathSpec};
use butils::text::{clean_html, clean_string, clean_xml};

/// butils - look up, slice and diff values in JSON, YAML and XML documents
#[derive(Parser)]
#[command(name = "butils")]
#[command(version)]
#[command(about = "Look up, slice and diff values in JSON, YAML and XML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of ~/.config/butils/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first non-empty value among alternative dotted paths
    Resolve {
        /// Document to read ("-" for stdin)
        file: String,
        /// Dotted paths, tried in order (e.g. "address.street")
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Select a range or positions from a sequence, e.g. "[1:3]" or "[2,0]"
    Slice {
        /// Document to read ("-" for stdin)
        file: String,
        /// Slice expression
        spec: String,
        /// Dotted path to the sequence (default: the document root)
        #[arg(long)]
        path: Option<String>,
    },
    /// Show what changed between two documents
    Diff {
        /// Original document ("-" for stdin)
        left: String,
        /// Changed document ("-" for stdin)
        right: String,
    },
    /// Collect a leaf field whether it occurs once or many times
    Values {
        /// Document to read ("-" for stdin)
        file: String,
        /// Dotted path whose last segment is the leaf field
        path: String,
        /// Return a lone value as-is instead of a one-element list
        #[arg(long)]
        no_force_array: bool,
        /// Trim whitespace from string values
        #[arg(long)]
        trim: bool,
    },
    /// Clean up text, XML or HTML
    Clean {
        /// Text file to read ("-" for stdin)
        file: String,
        /// Apply HTML cleanup
        #[arg(long, conflicts_with = "xml")]
        html: bool,
        /// Fix Windows character references in XML
        #[arg(long)]
        xml: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    setup_logging(cli.verbose, &config.log_level);
    debug!(?config, "configuration loaded");

    let pretty = config.pretty_output && !cli.compact;
    let load_options = config.load_options();

    match cli.command {
        Command::Resolve { file, paths } => {
            let tree = load(&file, &load_options)?;
            let spec = PathSpec::new(paths);
            match resolve(spec.clone(), &tree) {
                Some(value) => print_json(value, pretty)?,
                None => {
                    eprintln!("No match for {}", spec.paths().join(", "));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Slice { file, spec, path } => {
            let tree = load(&file, &load_options)?;
            let target = match &path {
                Some(path) => resolve(path, &tree).ok_or_else(|| anyhow!("No match for {}", path))?,
                None => &tree,
            };
            print_json(&slice_value(target, &spec)?, pretty)?;
        }
        Command::Diff { left, right } => {
            if left == "-" && right == "-" {
                bail!("Only one side of a diff can be read from stdin");
            }
            let left = load(&left, &load_options)?;
            let right = load(&right, &load_options)?;
            print_json(&diff(&left, &right), pretty)?;
        }
        Command::Values {
            file,
            path,
            no_force_array,
            trim,
        } => {
            let tree = load(&file, &load_options)?;
            let mut options = config.map_options();
            if no_force_array {
                options.force_array = false;
            }
            if trim {
                options.trim = true;
            }
            print_json(&map_values(&path, &tree, &options), pretty)?;
        }
        Command::Clean { file, html, xml } => {
            let text = if file == "-" {
                read_stdin_text()?
            } else {
                read_text(&file)?
            };
            let cleaned = if html {
                clean_html(&text)
            } else if xml {
                clean_xml(&text)
            } else {
                clean_string(&text)
            };
            println!("{}", cleaned);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins, then `-v` flags, then the configured level.
fn setup_logging(verbosity: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
        0 => EnvFilter::new(configured),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(file: &str, options: &LoadOptions) -> Result<TreeValue> {
    if file == "-" {
        load_from_stdin(options)
    } else {
        load_file_with(file, options)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
