mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use formwork_core::component_registry::DynRenderer;
use formwork_core::config::FrameworkConfig;
use formwork_core::kernel::bootstrap::Application;
use formwork_core::kernel::constants::DEFAULT_CONFIG_FILE;
use formwork_core::kernel::error::Result;

use core_widgets::builtin_plugins;

/// Formwork: component registry host for the visual designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    ping: bool,

    /// Config file (JSON, YAML or TOML). Defaults to ./formwork.toml when present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered component keys
    Components {
        /// Only list components registered under this namespace
        #[arg(long)]
        namespace: Option<String>,
    },
    /// List loaded plugins in load order
    Plugins,
}

fn load_config(path: Option<&Path>) -> Result<FrameworkConfig> {
    match path {
        Some(path) => Ok(FrameworkConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Ok(FrameworkConfig::load(Path::new(DEFAULT_CONFIG_FILE))?),
        None => Ok(FrameworkConfig::default()),
    }
}

fn init_logging(config: &FrameworkConfig, verbose: u8) {
    let level = match verbose {
        0 => config.level_filter(),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG still wins per module
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

async fn run(args: CliArgs, config: FrameworkConfig) -> Result<()> {
    let app: Application<DynRenderer> = Application::new(config);
    app.load_plugins(builtin_plugins()).await?;

    match args.command {
        Some(Commands::Components { namespace }) => {
            let registry = app.registry().read().await;
            for line in cli::component_lines(&registry, namespace.as_deref()) {
                println!("{}", line);
            }
        }
        Some(Commands::Plugins) => {
            for line in cli::plugin_lines(app.plugins()) {
                println!("{}", line);
            }
        }
        None => {
            let registry = app.registry().read().await;
            println!(
                "{} plugin(s) loaded, {} component key(s) registered",
                app.plugins().loaded_plugins().len(),
                registry.len()
            );
        }
    }

    app.shutdown().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config, args.verbose);

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("formwork: {}", e);
            ExitCode::FAILURE
        }
    }
}
