//! Build orchestration: render, theme, package, hand off.
//!
//! A [`Bundler`] owns a shared [`ThemeRegistry`] and a [`SaveTarget`]. Each
//! `build` either hands exactly one complete archive to the save target or
//! returns an error; nothing partial is ever saved. Only one build runs at a
//! time: a request arriving while another build is in progress is rejected
//! with [`BuildFailure::Busy`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::bundle::{Bundle, BundleFile};
use crate::error::{BuildFailure, BundleError};
use crate::theme::ThemeRegistry;
use crate::transform::Transformer;
use crate::{ARCHIVE_NAME, INDEX_FILE, SOURCE_FILE, STYLESHEET_FILE};

/// Receives the finished archive.
pub trait SaveTarget: Send + Sync {
    fn save_binary(&self, content: &[u8], suggested_name: &str) -> Result<(), BundleError>;
}

/// Supplies the document currently being edited.
pub trait DocumentSource {
    fn current_source_text(&self) -> String;
    fn current_theme_id(&self) -> String;
}

/// Writes archives into a directory.
///
/// The archive is written to a temporary name first and renamed into place,
/// so a failed save never leaves a truncated file under the final name.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SaveTarget for DirectorySaver {
    fn save_binary(&self, content: &[u8], suggested_name: &str) -> Result<(), BundleError> {
        fs::create_dir_all(&self.dir)?;

        let dest = self.dir.join(suggested_name);
        let partial = self.dir.join(format!(".{suggested_name}.partial"));

        if let Err(e) = fs::write(&partial, content).and_then(|()| fs::rename(&partial, &dest)) {
            let _ = fs::remove_file(&partial);
            return Err(BundleError::Save {
                name: dest.display().to_string(),
                message: e.to_string(),
            });
        }

        log::debug!("saved {} ({} bytes)", dest.display(), content.len());
        Ok(())
    }
}

/// Keeps saved archives in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySaver {
    saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(name, bytes)` pair saved so far, oldest first.
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SaveTarget for MemorySaver {
    fn save_binary(&self, content: &[u8], suggested_name: &str) -> Result<(), BundleError> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((suggested_name.to_string(), content.to_vec()));
        Ok(())
    }
}

/// Lifecycle of the bundler's build slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Building,
    Failed,
}

/// What goes into each bundle.
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Ship the markdown source as `sourcecode.md` so the site can be edited again.
    pub include_source: bool,
    pub archive_name: String,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self {
            include_source: true,
            archive_name: ARCHIVE_NAME.to_string(),
        }
    }
}

/// Resets the build slot when a build ends, however it ends.
struct BuildSlot<'a> {
    state: &'a Mutex<BuildState>,
    outcome: BuildState,
}

impl BuildSlot<'_> {
    fn succeed(&mut self) {
        self.outcome = BuildState::Idle;
    }
}

impl Drop for BuildSlot<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = self.outcome;
    }
}

pub struct Bundler<S> {
    registry: Arc<ThemeRegistry>,
    transformer: Transformer,
    saver: Arc<S>,
    options: BundleOptions,
    state: Mutex<BuildState>,
}

impl<S: SaveTarget + 'static> Bundler<S> {
    pub fn new(registry: Arc<ThemeRegistry>, saver: S) -> Self {
        Self {
            registry,
            transformer: Transformer::default(),
            saver: Arc::new(saver),
            options: BundleOptions::default(),
            state: Mutex::new(BuildState::Idle),
        }
    }

    pub fn with_options(mut self, options: BundleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = transformer;
        self
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn saver(&self) -> &S {
        &self.saver
    }

    pub fn state(&self) -> BuildState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build the document currently held by `doc`.
    pub async fn build_current(&self, doc: &dyn DocumentSource) -> Result<Bundle, BuildFailure> {
        let source = doc.current_source_text();
        let theme_id = doc.current_theme_id();
        self.build(&source, &theme_id).await
    }

    /// Render `source` with the theme `theme_id`, archive the result and hand
    /// it to the save target.
    ///
    /// Unknown theme ids fall back to the registry's default theme.
    pub async fn build(&self, source: &str, theme_id: &str) -> Result<Bundle, BuildFailure> {
        let mut slot = self.acquire()?;

        let theme = self.registry.resolve_or_default(theme_id);
        log::info!("building {} with theme '{}'", self.options.archive_name, theme.id());

        let html = self.transformer.try_render(source)?;

        let mut bundle = Bundle::new(self.options.archive_name.as_str());
        bundle.insert(INDEX_FILE, BundleFile::Text(theme.generate_html(&html)))?;
        bundle.insert(STYLESHEET_FILE, BundleFile::Text(theme.generate_css()))?;
        if self.options.include_source {
            bundle.insert(SOURCE_FILE, BundleFile::Text(source.to_string()))?;
        }

        // Serialization and the save handoff both block.
        let saver = Arc::clone(&self.saver);
        let (bundle, size) = tokio::task::spawn_blocking(move || -> Result<_, BundleError> {
            let archive = bundle.to_zip()?;
            saver.save_binary(&archive, bundle.archive_name())?;
            Ok((bundle, archive.len()))
        })
        .await
        .map_err(|e| BundleError::Join(e.to_string()))??;

        slot.succeed();
        log::info!("built {} ({size} bytes)", bundle.archive_name());
        Ok(bundle)
    }

    fn acquire(&self) -> Result<BuildSlot<'_>, BuildFailure> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == BuildState::Building {
            log::warn!("build requested while another build is in progress");
            return Err(BuildFailure::Busy);
        }
        *state = BuildState::Building;
        Ok(BuildSlot {
            state: &self.state,
            outcome: BuildState::Failed,
        })
    }
}
