use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use legalease::types::LegalEaseError;

#[derive(Parser)]
#[command(name = "legalease")]
#[command(
    version,
    about = "Plain-language analysis of Indian legal documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short = 'v', global = true, help = "Enable debug logging")]
    verbose: bool,

    #[arg(long, short, global = true, help = "Only log errors")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a legal document (PDF, DOCX, or image)
    Analyze {
        #[arg(help = "Document file to analyze")]
        file: PathBuf,
        #[arg(
            short,
            long,
            help = "Two-letter language code for summaries (e.g. en, hi)"
        )]
        language: Option<String>,
        #[arg(long, help = "Print the full report as JSON")]
        json: bool,
    },

    /// Extract text from a document without analyzing it
    Extract {
        #[arg(help = "Document file to extract")]
        file: PathBuf,
    },

    /// Ask a question about a document
    Chat {
        #[arg(help = "Question to ask")]
        question: String,
        #[arg(short, long, help = "Context text file, or '-' for stdin")]
        context: Option<String>,
        #[arg(long, help = "Print the response as JSON")]
        json: bool,
    },

    /// Summarize document text
    Summary {
        #[arg(help = "Text file to summarize, or '-' for stdin")]
        input: String,
        #[arg(
            short,
            long,
            help = "Two-letter language code for the summary (e.g. en, hi)"
        )]
        language: Option<String>,
    },

    /// Check configuration and readiness
    Health,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Edit configuration file with $EDITOR
    Edit {
        #[arg(long, short, help = "Edit global config")]
        global: bool,
    },
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // Extract panic message
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mLegalEase encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    // Install panic handler first
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            if let Some(app_err) = e.downcast_ref::<LegalEaseError>() {
                let category = app_err.category();
                eprintln!("\x1b[90m[{}] {}\x1b[0m", category, category.hint());
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    // Logs go to stderr so stdout stays clean for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            language,
            json,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(legalease::cli::commands::analyze::run(
                &file,
                language.as_deref(),
                json,
            ))?;
        }
        Commands::Extract { file } => {
            legalease::cli::commands::extract::run(&file)?;
        }
        Commands::Chat {
            question,
            context,
            json,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(legalease::cli::commands::chat::run(
                &question,
                context.as_deref(),
                json,
            ))?;
        }
        Commands::Summary { input, language } => {
            let rt = Runtime::new()?;
            rt.block_on(legalease::cli::commands::summary::run(
                &input,
                language.as_deref(),
            ))?;
        }
        Commands::Health => {
            legalease::cli::commands::health::run()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                legalease::cli::commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                legalease::cli::commands::config::path()?;
            }
            ConfigAction::Edit { global } => {
                legalease::cli::commands::config::edit(global)?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    legalease::cli::commands::config::init_global(force)?;
                } else {
                    legalease::cli::commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
