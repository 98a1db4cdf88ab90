use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use homepage_core::{ThemeRegistry, Transformer};

mod build;
mod config;
mod init;

#[derive(Parser)]
#[command(name = "homepage", version, about = "Compile a markdown homepage into a themed static site")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build homepage.zip (index.html, stylesheet.css, sourcecode.md)
    Build {
        /// Path to the markdown source
        file: PathBuf,

        /// Theme id (default: from homepage.json, else "default")
        #[arg(long)]
        theme: Option<String>,

        /// Directory to write homepage.zip into
        #[arg(long)]
        out: Option<PathBuf>,

        /// Leave sourcecode.md out of the archive
        #[arg(long)]
        no_source: bool,

        /// Rebuild whenever the source file changes
        #[arg(long)]
        watch: bool,
    },

    /// Print the rendered HTML fragment for a markdown file
    Render {
        /// Path to the markdown source
        file: PathBuf,
    },

    /// List available themes
    Themes,

    /// Print a theme's stylesheet
    Css {
        /// Theme id
        theme: String,
    },

    /// Create a new markdown file from a theme's starter content
    New {
        /// Path of the file to create
        file: PathBuf,

        /// Theme whose starter content to use
        #[arg(long, default_value = homepage_core::DEFAULT_THEME_ID)]
        theme: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let registry = Arc::new(ThemeRegistry::builtin());

    match cli.command {
        Commands::Build {
            file,
            theme,
            out,
            no_source,
            watch,
        } => {
            let config = config::load_config_for(&file)?;
            let opts = build::BuildOpts {
                file,
                out_dir: out.unwrap_or(config.out_dir),
                theme: theme.unwrap_or(config.default_theme),
                include_source: config.include_source && !no_source,
                max_source_bytes: config.max_source_bytes,
                quiet: cli.quiet,
            };
            if watch {
                build::watch_and_rebuild(registry, &opts)?;
            } else {
                build::handle_build(registry, &opts)?;
            }
        }
        Commands::Render { file } => {
            let config = config::load_config_for(&file)?;
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read '{}'", file.display()))?;
            let html = Transformer::new()
                .max_source_bytes(config.max_source_bytes)
                .render(&content);
            print!("{html}");
        }
        Commands::Themes => {
            let default_id = registry.default_theme().id();
            for theme in registry.iter() {
                let marker = if theme.id() == default_id {
                    " (default)".dimmed().to_string()
                } else {
                    String::new()
                };
                println!("{:<10} {}{}", theme.id().bold(), theme.label(), marker);
            }
        }
        Commands::Css { theme } => {
            let theme = registry.resolve(&theme)?;
            print!("{}", theme.generate_css());
        }
        Commands::New { file, theme, force } => {
            init::new_document(&registry, &file, &theme, force, cli.quiet)?;
        }
    }

    Ok(())
}
