//! Shopforge CLI - Compose a new e-commerce project from template overlays

use anyhow::Result;
use clap::{Parser, Subcommand};
use composer_core::tui::CreateArgs;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "create-shopforge")]
#[command(about = "Compose a Shopforge e-commerce project from a base template and feature overlays")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Shopforge project
    Create(CliCreateArgs),
    /// List the features and themes available in the template root
    List(ListArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use as the template root (for development use)
    #[arg(long = "templates-dir")]
    pub templates_dir: Option<PathBuf>,

    /// Skip the Node.js runtime check
    #[arg(long = "skip-runtime-check")]
    pub skip_runtime_check: bool,

    /// Skip dependency installation
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            templates_dir: args.templates_dir,
            skip_runtime_check: args.skip_runtime_check,
            skip_install: args.skip_install,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Local directory to use as the template root (for development use)
    #[arg(long = "templates-dir")]
    pub templates_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = composer_core::run(create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::List(list_args)) => {
            composer_core::features::list_features(&list_args.templates_dir)
        }
        None => {
            // No subcommand provided, default to interactive create
            let result = composer_core::run(CreateArgs::default(), CLI_VERSION).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
