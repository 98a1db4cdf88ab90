//! `homepage build`: compile a markdown file into `homepage.zip`.
//!
//! The archive holds `index.html`, `stylesheet.css` and (unless disabled)
//! `sourcecode.md`, and is written into the output directory.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use homepage_core::{
    BundleOptions, Bundler, DirectorySaver, DocumentSource, ThemeRegistry, Transformer,
};

/// Options passed from the CLI to the build.
pub struct BuildOpts {
    pub file: PathBuf,
    pub out_dir: PathBuf,
    pub theme: String,
    pub include_source: bool,
    pub max_source_bytes: usize,
    pub quiet: bool,
}

/// A source file read from disk, paired with the theme chosen for it.
struct LoadedDocument {
    source: String,
    theme: String,
}

impl LoadedDocument {
    fn read(path: &Path, theme: &str) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Ok(Self {
            source,
            theme: theme.to_string(),
        })
    }
}

impl DocumentSource for LoadedDocument {
    fn current_source_text(&self) -> String {
        self.source.clone()
    }

    fn current_theme_id(&self) -> String {
        self.theme.clone()
    }
}

/// A bundler plus the runtime its builds run on.
pub struct SiteBuilder {
    bundler: Bundler<DirectorySaver>,
    runtime: tokio::runtime::Runtime,
}

impl SiteBuilder {
    pub fn new(registry: Arc<ThemeRegistry>, opts: &BuildOpts) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start build runtime")?;

        let bundler = Bundler::new(registry, DirectorySaver::new(&opts.out_dir))
            .with_transformer(Transformer::new().max_source_bytes(opts.max_source_bytes))
            .with_options(BundleOptions {
                include_source: opts.include_source,
                ..BundleOptions::default()
            });

        Ok(Self { bundler, runtime })
    }

    /// Run one build of `opts.file`.
    pub fn build(&self, opts: &BuildOpts) -> Result<()> {
        let doc = LoadedDocument::read(&opts.file, &opts.theme)?;

        let bundle = self
            .runtime
            .block_on(self.bundler.build_current(&doc))
            .with_context(|| format!("Failed to build '{}'", opts.file.display()))?;

        if !opts.quiet {
            let archive = self.bundler.saver().dir().join(bundle.archive_name());
            println!("{} {}", "Built".green().bold(), archive.display());
            for name in bundle.file_names() {
                println!("  {} {}", "file:".dimmed(), name);
            }
        }

        Ok(())
    }
}

pub fn handle_build(registry: Arc<ThemeRegistry>, opts: &BuildOpts) -> Result<()> {
    SiteBuilder::new(registry, opts)?.build(opts)
}

/// Watch the source file for changes and rebuild on each save.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// Ctrl+C exits cleanly.
pub fn watch_and_rebuild(registry: Arc<ThemeRegistry>, opts: &BuildOpts) -> Result<()> {
    let builder = SiteBuilder::new(registry, opts)?;

    let file_path = std::fs::canonicalize(&opts.file)
        .with_context(|| format!("Cannot resolve path '{}'", opts.file.display()))?;

    let watch_dir = file_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine parent directory of '{}'", opts.file.display()))?;

    if let Err(e) = builder.build(opts) {
        eprintln!("{} {:#}", "Build error:".red().bold(), e);
    }

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        opts.file.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
                let affects_our_file = event
                    .paths
                    .iter()
                    .any(|p| p.canonicalize().ok().as_ref() == Some(&file_path));

                if relevant && affects_our_file && last_rebuild.elapsed() > debounce {
                    // Let the editor finish writing.
                    std::thread::sleep(Duration::from_millis(50));

                    match builder.build(opts) {
                        Ok(()) => last_rebuild = Instant::now(),
                        Err(e) => eprintln!("{} {:#}", "Build error:".red().bold(), e),
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
