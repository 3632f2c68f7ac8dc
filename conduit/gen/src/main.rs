//! Conduit Code Generator
//!
//! Generates typed client and server glue from RPC service schema files.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use conduit_gen::errors::GeneratorError;
use conduit_gen::output::{generate_and_write, load_service, module_file_name};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Conduit code generator - transforms service schemas into typed Rust modules
#[derive(Parser, Debug)]
#[command(name = "conduit-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service schema file (repeat for several services)
    #[arg(short, long, required = true)]
    schema: Vec<PathBuf>,

    /// Output directory for generated code
    #[arg(short, long, default_value = "src/generated")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Sets up logging to stderr. `RUST_LOG` takes precedence over `-v` flags.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,conduit_gen=info".to_string(),
            2 => "info,conduit_gen=debug,conduit_define=debug".to_string(),
            _ => "debug,conduit_gen=trace,conduit_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.dry_run {
        tracing::info!("dry run mode, no files will be written");
    } else if cli.output.is_file() {
        return Err(GeneratorError::ConfigError(format!(
            "Output path '{}' is a file, expected a directory",
            cli.output.display()
        )));
    }

    for schema in &cli.schema {
        let service = load_service(schema)?;

        if cli.verbose > 1 {
            eprintln!(
                "Service: {} ({} routes)",
                service.name,
                service.routes.len()
            );
            for route in &service.routes {
                eprintln!("  - {} {} {}", route.name, route.method, route.path);
            }
        }

        generate_and_write(&service, &cli.output, cli.dry_run)?;

        if !cli.dry_run {
            eprintln!(
                "{} {} -> {}",
                "Generated".green().bold(),
                service.name,
                cli.output.join(module_file_name(&service)).display()
            );
        }
    }

    Ok(())
}
