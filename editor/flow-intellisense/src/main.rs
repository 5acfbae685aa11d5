//! flow-intellisense CLI - Completion, hover and validation for flow elements
//!
//! # Usage
//!
//! ```bash
//! # Get completions at position
//! flow-intellisense complete page.vue --line 10 --column 5
//!
//! # Get hover info
//! flow-intellisense hover page.vue --line 10 --column 5
//!
//! # Validate files (exit code 1 on errors)
//! flow-intellisense validate page.vue index.html
//!
//! # Read from stdin
//! cat page.html | flow-intellisense --language html validate -
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flow_intellisense::{Engine, Position, QuoteStyle, Settings, TextDocument};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "flow-intellisense")]
#[command(about = "Completion, hover and validation for flow design system elements")]
#[command(version)]
struct Cli {
    /// Output format (text, json)
    #[arg(long, short, default_value = "text")]
    format: OutputFormat,

    /// Document language (vue, html, typescript, mdx); guessed from the extension by default
    #[arg(long, env = "FLOW_LANGUAGE")]
    language: Option<String>,

    /// Log engine decisions to stderr
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Get completions at position
    Complete {
        /// Path to the file, or - for stdin
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,

        /// Character that triggered the request
        #[arg(long)]
        trigger: Option<String>,

        /// Spaces per level in tag snippets
        #[arg(long, default_value = "2")]
        indent_size: usize,

        /// Quote style in attribute snippets
        #[arg(long, default_value = "double")]
        quotes: QuoteStyle,
    },

    /// Get hover information at position
    Hover {
        /// Path to the file, or - for stdin
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,
    },

    /// Check required attributes
    Validate {
        /// Files to validate, or - for stdin
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the cursor context
    Context {
        /// Path to the file, or - for stdin
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, short)]
        line: u32,

        /// Column number (1-based)
        #[arg(long, short)]
        column: u32,
    },

    /// List known elements
    Elements,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let engine = Engine::new().context("Failed to load element schemas")?;

    match cli.command {
        Commands::Complete {
            file,
            line,
            column,
            trigger,
            indent_size,
            quotes,
        } => {
            let doc = load_document(&file, cli.language.as_deref())?;
            let settings = Settings {
                indent_size,
                quotes,
            };
            let result = engine.complete(
                &doc,
                to_position(line, column),
                trigger.as_deref(),
                &settings,
            );

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => {
                    if result.items.is_empty() {
                        println!("No completions found");
                    } else {
                        println!("Completions ({}):", result.items.len());
                        for item in &result.items {
                            let kind = format!("{:?}", item.kind);
                            let detail = item.detail.as_deref().unwrap_or("");
                            println!("  {:20} {:10} {}", item.label, kind, detail);
                        }
                    }
                }
            }
        }

        Commands::Hover { file, line, column } => {
            let doc = load_document(&file, cli.language.as_deref())?;
            let result = engine.hover(&doc, to_position(line, column));

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Text => match result {
                    Some(info) => println!("{}", info.content),
                    None => println!("No hover information"),
                },
            }
        }

        Commands::Validate { files } => {
            let mut error_count = 0;
            let mut reports = Vec::new();

            for file in &files {
                let doc = load_document(file, cli.language.as_deref())?;
                let diagnostics = engine.validate(&doc);
                error_count += diagnostics.len();
                reports.push((file.display().to_string(), diagnostics));
            }

            match cli.format {
                OutputFormat::Json => {
                    let json: serde_json::Map<String, serde_json::Value> = reports
                        .iter()
                        .map(|(file, diagnostics)| Ok((file.clone(), serde_json::to_value(diagnostics)?)))
                        .collect::<Result<_>>()?;
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                OutputFormat::Text => {
                    for (file, diagnostics) in &reports {
                        for diag in diagnostics {
                            println!(
                                "{}:{}: {}: {} [{}]",
                                file, diag.range.start, diag.severity, diag.message, diag.code
                            );
                        }
                    }
                    println!("{} error(s) in {} file(s)", error_count, files.len());
                }
            }

            if error_count > 0 {
                std::process::exit(1);
            }
        }

        Commands::Context { file, line, column } => {
            let doc = load_document(&file, cli.language.as_deref())?;
            let ctx = engine.context(&doc, to_position(line, column));

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&ctx)?);
                }
                OutputFormat::Text => {
                    println!("{:#?}", ctx);
                }
            }
        }

        Commands::Elements => {
            let elements: Vec<_> = engine.data().elements().collect();

            match cli.format {
                OutputFormat::Json => {
                    let json: Vec<_> = elements
                        .iter()
                        .map(|(tag, element)| {
                            serde_json::json!({
                                "tag": tag,
                                "title": element.title,
                                "category": element.category,
                                "description": element.description,
                                "docLink": element.doc_link,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                OutputFormat::Text => {
                    for (tag, element) in &elements {
                        println!("{:16} {:12} {}", tag, element.category, element.description);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Convert 1-based command line coordinates.
fn to_position(line: u32, column: u32) -> Position {
    Position::new(line.saturating_sub(1), column.saturating_sub(1))
}

fn load_document(path: &Path, language: Option<&str>) -> Result<TextDocument> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let language = language
        .map(str::to_string)
        .unwrap_or_else(|| language_for(path).to_string());

    Ok(TextDocument::new(text, language))
}

fn language_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("vue") => "vue",
        Some("ts") | Some("tsx") => "typescript",
        Some("mdx") => "mdx",
        _ => "html",
    }
}
