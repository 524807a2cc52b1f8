//! Binary entry point for the tugj CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Rewrite matching calls, report as JSON
//! tugj run replace-method-call-with-ternary \
//!     --method-pattern 'org.springframework..* getReasonPhrase()' \
//!     --type org.springframework.http.HttpStatus \
//!     Sample.json
//!
//! # Options from a config file, rendered source on stdout
//! tugj run replace-method-call-with-ternary --config recipe.json --format source - < Sample.json
//!
//! # List matching calls without rewriting
//! tugj search --method-pattern 'org.springframework..* getReasonPhrase()' Sample.json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use tugjava::cli::{run_search, run_ternary, InputUnits, OutputFormat, RunOutput};
use tugjava::config::RecipeConfig;
use tugjava_core::error::{OutputErrorCode, TugError};
use tugjava_core::output::{emit_response, emit_response_compact, ErrorResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Recipe-driven rewrites of typed Java syntax trees.
///
/// Input is a JSON-serialized, type-attributed compilation unit (or an
/// array of them). All structured output is JSON on stdout.
#[derive(Parser, Debug)]
#[command(name = "tugj", version, about = "Recipe-driven rewrites of typed Java syntax trees")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

/// Global arguments shared by all subcommands.
#[derive(Parser, Debug)]
struct GlobalArgs {
    /// Log level for tracing output.
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Emit log records as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    /// Emit single-line JSON responses.
    #[arg(long, global = true)]
    compact: bool,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a recipe over compilation units.
    Run {
        #[command(subcommand)]
        recipe: RecipeCommand,
    },
    /// List calls matching a method pattern.
    Search {
        /// Method signature pattern, e.g. `org.example..* getName()`.
        #[arg(long)]
        method_pattern: String,
        /// Input JSON file, or `-` for stdin.
        input: String,
    },
}

#[derive(Subcommand, Debug)]
enum RecipeCommand {
    /// Replace matching calls with an instanceof check, a cast and a fallback.
    ReplaceMethodCallWithTernary(TernaryArgs),
}

#[derive(Args, Debug)]
struct TernaryArgs {
    /// Method signature pattern (overrides the config file).
    #[arg(long)]
    method_pattern: Option<String>,

    /// Fully-qualified target type (overrides the config file).
    #[arg(long = "type", value_name = "FQN")]
    type_name: Option<String>,

    /// JSON config file with `methodPattern`, `fullyQualifiedTypeName` and
    /// optional `classpath`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Type resolvable by the template; repeat to list several. Without
    /// any, every type resolves.
    #[arg(long = "classpath", value_name = "FQN")]
    classpath: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Input JSON file, or `-` for stdin.
    input: String,
}

impl TernaryArgs {
    /// Options from `--config`, overlaid with the flags.
    fn recipe_config(&self) -> Result<RecipeConfig, TugError> {
        let base = match &self.config {
            Some(path) => RecipeConfig::load(path)?,
            None => RecipeConfig::default(),
        };
        let flags = RecipeConfig {
            method_pattern: self.method_pattern.clone(),
            fully_qualified_type_name: self.type_name.clone(),
            classpath: (!self.classpath.is_empty()).then(|| self.classpath.clone()),
        };
        Ok(base.merge(flags))
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.log_level, cli.global.log_json);

    let compact = cli.global.compact;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON, like every other response
            let _ = emit(&response, compact);
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel, json: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Execute the CLI command.
fn execute(cli: Cli) -> Result<(), TugError> {
    let compact = cli.global.compact;
    match cli.command {
        Command::Run {
            recipe: RecipeCommand::ReplaceMethodCallWithTernary(args),
        } => {
            // Options are validated before any input is read.
            let config = args.recipe_config()?;
            config.build()?;
            let input = InputUnits::load(&args.input)?;
            match run_ternary(&config, input, args.format)? {
                RunOutput::Json(response) => emit(&response, compact),
                RunOutput::Source(source) => write_stdout(&source),
            }
        }
        Command::Search {
            method_pattern,
            input,
        } => {
            let input = InputUnits::load(&input)?;
            let response = run_search(&method_pattern, &input)?;
            emit(&response, compact)
        }
    }
}

/// Write a JSON response to stdout.
fn emit<T: Serialize>(response: &T, compact: bool) -> Result<(), TugError> {
    let mut stdout = io::stdout();
    let result = if compact {
        emit_response_compact(response, &mut stdout)
    } else {
        emit_response(response, &mut stdout)
    };
    result.map_err(output_error)
}

fn write_stdout(text: &str) -> Result<(), TugError> {
    let mut stdout = io::stdout();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(output_error)
}

fn output_error(err: io::Error) -> TugError {
    TugError::ApplyError {
        message: format!("failed to write output: {}", err),
        file: None,
    }
}
