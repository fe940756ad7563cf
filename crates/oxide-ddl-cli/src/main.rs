//! oxide-ddl CLI
//!
//! Command-line tool for checking, reformatting and inspecting DDL files.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl::ast::Node;
use oxide_ddl::{CreateQuery, FormatSettings, ParseOptions, parse_create_queries_with};

/// Check, format and inspect CREATE/ATTACH statements.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Nesting limit for the parser.
    #[arg(long, env = "OXIDE_DDL_MAX_DEPTH", default_value_t = oxide_ddl::parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse files and report the first error in each.
    Check {
        /// Files to check (`-` for stdin).
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the statements of a file in canonical form.
    Format {
        /// File to format (`-` for stdin).
        file: PathBuf,

        /// Print each statement on a single line.
        #[arg(long)]
        one_line: bool,

        /// Highlight keywords and names with ANSI escapes.
        #[arg(long)]
        hilite: bool,
    },

    /// Print the syntax tree of a file as JSON.
    Ast {
        /// File to parse (`-` for stdin).
        file: PathBuf,

        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = ParseOptions::default().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Check { files } => {
            let mut failed = 0usize;
            for file in &files {
                let source = read_source(file)?;
                match parse_file(file, &source, options) {
                    Ok(queries) => {
                        for query in &queries {
                            debug!(
                                "{} {}: {}",
                                query.kind.as_str(),
                                query.qualified_name(),
                                query.span.slice(&source)
                            );
                        }
                        info!("{}: {} statement(s) OK", file.display(), queries.len());
                    }
                    Err(e) => {
                        eprintln!("{e:#}");
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} of {} file(s) failed", files.len());
            }
        }

        Commands::Format {
            file,
            one_line,
            hilite,
        } => {
            let source = read_source(&file)?;
            let queries = parse_file(&file, &source, options)?;
            let settings = FormatSettings {
                one_line,
                hilite,
            };
            println!("{}", format_queries(queries, &settings));
        }

        Commands::Ast { file, pretty } => {
            let source = read_source(&file)?;
            let queries = parse_file(&file, &source, options)?;
            let json = if pretty {
                serde_json::to_string_pretty(&queries)?
            } else {
                serde_json::to_string(&queries)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn parse_file(
    path: &Path,
    source: &str,
    options: ParseOptions,
) -> anyhow::Result<Vec<CreateQuery>> {
    debug!("Parsing {} ({} bytes)", path.display(), source.len());
    parse_create_queries_with(source, options).map_err(|e| {
        let (line, column) = line_column(source, e.position());
        anyhow::Error::new(e).context(format!("{}:{line}:{column}", path.display()))
    })
}

/// 1-based line and column of byte offset `position`.
fn line_column(source: &str, position: usize) -> (usize, usize) {
    let before = source.get(..position).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}

fn format_queries(queries: Vec<CreateQuery>, settings: &FormatSettings) -> String {
    let separator = if settings.one_line { "\n" } else { "\n\n" };
    queries
        .into_iter()
        .map(|q| format!("{};", Node::from(q).to_sql(settings)))
        .collect::<Vec<_>>()
        .join(separator)
}
