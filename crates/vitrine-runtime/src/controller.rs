//! The application controller: registry, gating, and the update protocol.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

use vitrine_bridge::{DEFAULT_TIMEOUT, RendererBridge};
use vitrine_config::ConfigStore;
use vitrine_core::{HostShell, HostWindow, LogLevel, Platform, VitrineHome};
use vitrine_modules::{
    BuiltinModule, Module, ModuleId, ModuleSource, builtin_manifest, find_builtin, resolve_source,
};

use crate::error::RuntimeResult;

/// Process-wide controller handle.
static CONTROLLER: OnceCell<Arc<Controller>> = OnceCell::const_new();

/// What happened to one load attempt.
///
/// Expected failure modes are data, not errors, so callers and tests can
/// assert on the reason instead of a bare boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The module is now live in the registry.
    Loaded,
    /// The candidate does not match the module file contract.
    SkippedUnrecognized,
    /// The module does not apply to the current platform.
    SkippedNotApplicable,
    /// The module is disabled in the settings document.
    SkippedDisabled,
    /// A module with the same identifier is already live.
    RejectedDuplicate,
}

impl LoadOutcome {
    /// Whether the attempt produced a live module.
    #[must_use]
    pub fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded)
    }
}

/// What happened to one unload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadOutcome {
    /// The module's unload hook ran and it left the registry.
    Unloaded,
    /// Core modules are never unloadable.
    RejectedCore,
    /// No live module matched the target.
    NotLoaded,
}

/// Accounting for one refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Renderer reads issued (one per observed property of a live module).
    pub reads: usize,
    /// Updates dispatched (reads whose round-trip succeeded).
    pub dispatched: usize,
    /// Round-trips that failed or timed out.
    pub failed: usize,
}

/// The process-wide orchestrator of the module loader.
///
/// At most one instance exists per process (see [`Controller::get_or_create`]);
/// the registry holds at most one live instance per module identifier. All
/// registry and config mutation goes through the write locks here, so a
/// multi-threaded embedding stays consistent even though the host shell
/// drives the controller from a single logical event loop.
pub struct Controller {
    platform: Platform,
    home: VitrineHome,
    manifest: Vec<BuiltinModule>,
    config: RwLock<ConfigStore>,
    registry: RwLock<Vec<Arc<dyn Module>>>,
    bridge_timeout: Duration,
}

impl Controller {
    /// Construct a controller and run module discovery.
    ///
    /// Discovery attempts every builtin manifest entry, then every entry of
    /// the external (user) module directory, which is created if absent.
    /// Entries that fail resolution are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the home layout cannot be prepared or the
    /// settings document cannot be loaded or saved. Construction failures
    /// are fatal by design; a partially discovered registry is never
    /// handed out.
    pub async fn new(home: VitrineHome, platform: Platform) -> RuntimeResult<Self> {
        Self::with_manifest(home, platform, builtin_manifest().to_vec()).await
    }

    /// Construct a controller with an explicit builtin manifest.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Controller::new`].
    pub async fn with_manifest(
        home: VitrineHome,
        platform: Platform,
        manifest: Vec<BuiltinModule>,
    ) -> RuntimeResult<Self> {
        home.ensure_layout()?;
        let config = ConfigStore::load(home.config_path())?;

        let controller = Self {
            platform,
            home,
            manifest,
            config: RwLock::new(config),
            registry: RwLock::new(Vec::new()),
            bridge_timeout: DEFAULT_TIMEOUT,
        };

        controller.discover_modules().await?;
        Ok(controller)
    }

    /// The process-wide controller, lazily constructed on first call.
    ///
    /// Later calls return the same handle; the construction runs at most
    /// once per process.
    ///
    /// # Errors
    ///
    /// Returns an error if the first construction fails (home unavailable,
    /// settings unreadable). Such a failure is fatal for the loader.
    pub async fn get_or_create() -> RuntimeResult<Arc<Self>> {
        let controller = CONTROLLER
            .get_or_try_init(|| async {
                let home = VitrineHome::resolve()?;
                let controller = Self::new(home, Platform::current()).await?;
                Ok::<_, crate::error::RuntimeError>(Arc::new(controller))
            })
            .await?;
        Ok(Arc::clone(controller))
    }

    /// The platform this controller gates modules against.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Override the per-round-trip bound used by refresh cycles.
    #[must_use]
    pub fn with_bridge_timeout(mut self, timeout: Duration) -> Self {
        self.bridge_timeout = timeout;
        self
    }

    async fn discover_modules(&self) -> RuntimeResult<()> {
        // Bundled modules first, in manifest order.
        let builtin_ids: Vec<ModuleId> = self
            .manifest
            .iter()
            .map(|entry| (entry.descriptor)().id.clone())
            .collect();
        for id in builtin_ids {
            let outcome = self.load_module(&format!("{id}.module")).await?;
            debug!(module = %id, ?outcome, "Builtin discovery");
        }

        // Then the external, user-writable directory.
        let modules_dir = self.home.modules_dir();
        let entries = match std::fs::read_dir(&modules_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %modules_dir.display(), error = %e, "Cannot enumerate external modules");
                return Ok(());
            }
        };

        for entry in entries.flatten() {
            let Some(name) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            let outcome = self.load_module(&name).await?;
            debug!(module = %name, ?outcome, "External discovery");
        }

        Ok(())
    }

    /// Resolve a module by live identifier or loadable source.
    pub async fn get_module(&self, name_or_path: &str) -> Option<Arc<dyn Module>> {
        let registry = self.registry.read().await;
        if let Some(module) = registry
            .iter()
            .find(|m| m.descriptor().id.as_str() == name_or_path)
        {
            return Some(Arc::clone(module));
        }

        let source = resolve_source(name_or_path, &self.manifest, &self.home.modules_dir())?;
        let stem = source.stem()?.to_string();
        registry
            .iter()
            .find(|m| m.descriptor().id.as_str() == stem)
            .map(Arc::clone)
    }

    /// Identifiers of every live module, in registry order.
    pub async fn loaded_modules(&self) -> Vec<ModuleId> {
        self.registry
            .read()
            .await
            .iter()
            .map(|m| m.descriptor().id.clone())
            .collect()
    }

    /// Attempt to load one module candidate.
    ///
    /// The duplicate check runs before any config mutation, so a rejected
    /// load never touches the settings document. For a non-core module with
    /// no recorded flag, the flag is initialized to the module's default
    /// and persisted exactly once, whether or not the module ends up live.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the settings document fails.
    pub async fn load_module(&self, candidate: &str) -> RuntimeResult<LoadOutcome> {
        let Some(source) = resolve_source(candidate, &self.manifest, &self.home.modules_dir())
        else {
            return Ok(LoadOutcome::SkippedUnrecognized);
        };

        let entry = match &source {
            ModuleSource::Builtin(id) => find_builtin(&self.manifest, id.as_str()),
            ModuleSource::External(path) => {
                if !path.exists() {
                    return Ok(LoadOutcome::SkippedUnrecognized);
                }
                source.stem().and_then(|s| find_builtin(&self.manifest, s))
            }
        };
        let Some(entry) = entry else {
            // Recognized shape, but nothing we know how to instantiate.
            return Ok(LoadOutcome::SkippedUnrecognized);
        };

        let descriptor = (entry.descriptor)();
        if !descriptor.is_applicable(self.platform) {
            return Ok(LoadOutcome::SkippedNotApplicable);
        }

        let mut registry = self.registry.write().await;
        if registry
            .iter()
            .any(|m| m.descriptor().id == descriptor.id)
        {
            return Ok(LoadOutcome::RejectedDuplicate);
        }

        let mut config = self.config.write().await;
        if !descriptor.core {
            match config.module_enabled(descriptor.id.as_str()) {
                None => {
                    config.set_module_enabled(descriptor.id.as_str(), descriptor.default_on);
                    if !descriptor.default_on {
                        config.save()?;
                        debug!(module = %descriptor.id, "Defaulted to disabled");
                        return Ok(LoadOutcome::SkippedDisabled);
                    }
                }
                Some(false) => return Ok(LoadOutcome::SkippedDisabled),
                Some(true) => {}
            }
        }

        registry.push((entry.construct)());
        config.save()?;
        info!(module = %descriptor.id, core = descriptor.core, "Module loaded");
        Ok(LoadOutcome::Loaded)
    }

    /// Attempt to unload a module by identifier or source path.
    ///
    /// Core modules are never unloadable. A live non-core module gets its
    /// unload hook invoked exactly once before removal.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the settings document fails.
    pub async fn unload_module(&self, target: &str) -> RuntimeResult<UnloadOutcome> {
        let mut registry = self.registry.write().await;

        let position = registry
            .iter()
            .position(|m| m.descriptor().id.as_str() == target)
            .or_else(|| {
                let source = resolve_source(target, &self.manifest, &self.home.modules_dir())?;
                let stem = source.stem()?.to_string();
                registry
                    .iter()
                    .position(|m| m.descriptor().id.as_str() == stem)
            });

        let Some(position) = position else {
            return Ok(UnloadOutcome::NotLoaded);
        };

        if registry[position].descriptor().core {
            return Ok(UnloadOutcome::RejectedCore);
        }

        let module = registry.remove(position);
        module.unload().await;
        info!(module = %module.descriptor().id, "Module unloaded");

        self.config.read().await.save()?;
        Ok(UnloadOutcome::Unloaded)
    }

    /// Run one refresh cycle for `window`.
    ///
    /// Every observed property of every live module is read from the
    /// window's renderer and dispatched to its module. All round-trips for
    /// the cycle run concurrently; the cycle completes only when every
    /// dispatch has settled. A slow or failing module never blocks the
    /// others: individual failures are logged and counted, not rethrown.
    pub async fn update_variables(&self, window: &dyn HostWindow) -> RefreshReport {
        let snapshot: Vec<Arc<dyn Module>> =
            self.registry.read().await.iter().map(Arc::clone).collect();
        let bridge = RendererBridge::new(window.renderer()).with_timeout(self.bridge_timeout);

        let mut tasks = Vec::new();
        for module in &snapshot {
            for prop in module.descriptor().css_props.clone() {
                let module = Arc::clone(module);
                let bridge = bridge.clone();
                tasks.push(async move {
                    match bridge.read_css_property(&prop).await {
                        Ok(value) => {
                            module.update(window, &prop, value).await;
                            true
                        }
                        Err(e) => {
                            warn!(
                                window = %window.id(),
                                module = %module.descriptor().id,
                                property = %prop,
                                error = %e,
                                "Refresh round-trip failed"
                            );
                            false
                        }
                    }
                });
            }
        }

        let reads = tasks.len();
        let results = futures::future::join_all(tasks).await;
        let dispatched = results.iter().filter(|ok| **ok).count();

        let report = RefreshReport {
            reads,
            dispatched,
            failed: reads.saturating_sub(dispatched),
        };
        debug!(window = %window.id(), ?report, "Refresh cycle complete");

        // Best-effort completion note on the window's own console.
        if bridge.log(LogLevel::Log, "Updated!").await.is_err() {
            debug!(window = %window.id(), "Renderer unreachable for completion log");
        }

        report
    }

    /// Notify every live module that a window was created.
    ///
    /// Modules are notified sequentially, in registry order.
    pub async fn emit_window_init(&self, window: &dyn HostWindow) {
        let snapshot: Vec<Arc<dyn Module>> =
            self.registry.read().await.iter().map(Arc::clone).collect();
        for module in snapshot {
            module.window_init(window).await;
        }
    }

    /// Notify every live module that a window is closing.
    pub async fn emit_window_close(&self, window: &dyn HostWindow) {
        let snapshot: Vec<Arc<dyn Module>> =
            self.registry.read().await.iter().map(Arc::clone).collect();
        for module in snapshot {
            module.window_close(window).await;
        }
    }

    /// Log a `[Vitrine]`-prefixed message to one window's DevTools console.
    ///
    /// Best-effort: a dead renderer only produces a debug trace.
    pub async fn log_to_window(&self, window: &dyn HostWindow, level: LogLevel, message: &str) {
        let bridge = RendererBridge::new(window.renderer()).with_timeout(self.bridge_timeout);
        if let Err(e) = bridge.log(level, message).await {
            debug!(window = %window.id(), error = %e, "Renderer log dropped");
        }
    }

    /// Log to the process console and echo to every known renderer context.
    ///
    /// Best-effort on every channel; unreachable renderers are skipped.
    pub async fn log_global(&self, shell: &dyn HostShell, level: LogLevel, message: &str) {
        let line = vitrine_bridge::format_log_message(message, vitrine_bridge::LogChannel::Cli)
            .swap_remove(0);
        match level {
            LogLevel::Log => info!(target: "vitrine", "{line}"),
            LogLevel::Warn => warn!(target: "vitrine", "{line}"),
            LogLevel::Error => tracing::error!(target: "vitrine", "{line}"),
        }

        for context in shell.renderer_contexts() {
            let bridge = RendererBridge::new(context).with_timeout(self.bridge_timeout);
            if let Err(e) = bridge.log(level, message).await {
                debug!(error = %e, "Global log dropped for one renderer");
            }
        }
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("platform", &self.platform)
            .field("home", &self.home.root())
            .field("bridge_timeout", &self.bridge_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_outcome_is_loaded() {
        assert!(LoadOutcome::Loaded.is_loaded());
        assert!(!LoadOutcome::SkippedDisabled.is_loaded());
        assert!(!LoadOutcome::RejectedDuplicate.is_loaded());
    }

    #[test]
    fn test_refresh_report_default() {
        let report = RefreshReport::default();
        assert_eq!(report.reads, 0);
        assert_eq!(report.failed, 0);
    }
}
