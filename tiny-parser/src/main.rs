use std::fs;
use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use tiny_parser::backends::EmitterType;
use tiny_parser::{parse_with, tokenize, ParseError, ParseOptions};

#[derive(Parser)]
#[command(name = "tiny-parser")]
#[command(about = "Scanner and recursive-descent parser for the TINY language", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Разбирает программу и печатает AST
    Parse {
        /// Исходник ("-" для stdin)
        input: String,

        /// Формат вывода
        #[arg(short, long, default_value = "tree")]
        emit: String,

        /// Предельная вложенность
        #[arg(long, default_value_t = ParseOptions::DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Предельный размер исходника в байтах
        #[arg(long, default_value_t = ParseOptions::DEFAULT_MAX_INPUT_LEN)]
        max_input: usize,
    },

    /// Показать токены без разбора
    Tokens {
        /// Исходник ("-" для stdin)
        input: String,
    },

    /// Список форматов вывода
    Emitters,
}

fn main() -> ExitCode {
    initialize_logging();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), ParseError> {
    match command {
        Commands::Parse { input, emit, max_depth, max_input } => {
            let Some(emitter_type) = EmitterType::from_name(&emit) else {
                return Err(ParseError::EmitError {
                    message: format!("unknown emitter '{}'", emit),
                });
            };

            let source = read_source(&input)?;
            let options = ParseOptions::default()
                .with_max_depth(max_depth)
                .with_max_input_len(max_input);

            let root = parse_with(&source, &options)?;
            info!(input = %input, statements = root.chain_len(), "parsed");

            let mut emitter = emitter_type.create();
            print!("{}", emitter.emit(&root)?);
        }
        Commands::Tokens { input } => {
            let source = read_source(&input)?;
            for token in tokenize(&source)? {
                let kind = format!("{:?}", token.kind);
                println!("{:>4}:{:<3} {:<12} {}", token.span.line, token.span.column, kind, token.text);
            }
        }
        Commands::Emitters => {
            println!("Supported emitters:");
            for emitter in EmitterType::all() {
                println!("  {:8} - {}", emitter.name(), emitter.description());
            }
        }
    }

    Ok(())
}

fn read_source(input: &str) -> Result<String, ParseError> {
    let source = if input == "-" {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(input)?
    };
    Ok(source)
}

fn initialize_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_filter(env_filter))
        .init();
}
