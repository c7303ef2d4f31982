//! The annotation engine.
//!
//! One `Engine` owns everything that changes over time: the locale table,
//! the active locale path, the watcher binding and the pending debounce.
//! Hosts create it with [`Engine::init`], feed it [`EngineEvent`]s, call
//! [`Engine::poll`] when [`Engine::next_deadline`] passes, and finally
//! [`Engine::dispose`] it. Every method runs to completion; nothing here
//! spawns or blocks.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use crate::config::Config;
use crate::core::{
    Annotation, AnnotationPlanner, CallSiteExtractor, KeyExtractor, LocaleResolver, LocaleStore,
    schedule::{Clock, Schedule, SystemClock, Trigger, UpdateScheduler},
    watch::{FileEvent, FileWatcher, WatchTarget, same_file},
};
use crate::error::LensError;

/// The editing surface the engine renders into.
pub trait Host {
    /// Full text of the active buffer, `None` when no buffer is focused.
    fn active_text(&self) -> Option<String>;

    /// Replace every overlay with `annotations`. An empty slice clears them.
    fn render(&mut self, annotations: &[Annotation]);
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A different buffer got focus.
    FocusChanged,
    /// The active buffer's text changed.
    BufferEdited,
    /// The watcher reported a change.
    File(FileEvent),
    /// Configuration was reloaded.
    ConfigChanged(Config),
}

pub struct Engine<W: FileWatcher, C: Clock = SystemClock> {
    workspace: Option<PathBuf>,
    config: Config,
    resolver: LocaleResolver,
    store: LocaleStore,
    extractor: Box<dyn KeyExtractor>,
    planner: AnnotationPlanner,
    scheduler: UpdateScheduler<C>,
    watcher: W,
    binding: Option<WatchTarget>,
    active: Option<PathBuf>,
}

impl<W: FileWatcher, C: Clock> Engine<W, C> {
    /// Create the engine, resolve and load the locale file and bind the
    /// watcher.
    ///
    /// Without a usable workspace directory the engine is inert: it never
    /// renders and ignores every event.
    pub fn init(workspace: Option<PathBuf>, config: Config, watcher: W, clock: C) -> Self {
        let workspace = workspace.filter(|root| root.is_dir());
        let mut engine = Self {
            workspace,
            config,
            resolver: LocaleResolver::default(),
            store: LocaleStore::new(),
            extractor: Box::new(CallSiteExtractor),
            planner: AnnotationPlanner::default(),
            scheduler: UpdateScheduler::new(clock),
            watcher,
            binding: None,
            active: None,
        };

        if engine.workspace.is_none() {
            tracing::warn!(error = %LensError::NoWorkspace, "annotations disabled");
            return engine;
        }
        engine.reload();
        engine
    }

    pub fn with_extractor(mut self, extractor: impl KeyExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_planner(mut self, planner: AnnotationPlanner) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_resolver(mut self, resolver: LocaleResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolve the locale file from scratch, reload the table and move the
    /// watcher binding. Returns the active locale path, if any.
    pub fn reload(&mut self) -> Option<&Path> {
        let root = self.workspace.clone()?;

        match self.resolver.resolve(&root, self.config.locale_path.as_deref()) {
            Some(path) => {
                self.store.load(&path);
                self.rebind(WatchTarget::File(path.clone()));
                self.active = Some(path);
            }
            None => {
                self.store.clear();
                self.rebind(WatchTarget::Discovery(root));
                self.active = None;
            }
        }
        self.active.as_deref()
    }

    /// React to one host event. Immediate triggers render before returning;
    /// buffer edits only arm the debounce timer.
    pub fn handle<H: Host + ?Sized>(&mut self, event: EngineEvent, host: &mut H) {
        if self.is_inert() {
            return;
        }

        let trigger = match event {
            EngineEvent::FocusChanged => Trigger::Immediate,
            EngineEvent::BufferEdited => Trigger::Debounced,
            EngineEvent::File(file_event) => {
                if !self.on_file_event(&file_event) {
                    return;
                }
                Trigger::Immediate
            }
            EngineEvent::ConfigChanged(config) => {
                self.apply_config(config);
                Trigger::Immediate
            }
        };

        match self.scheduler.request(trigger) {
            Schedule::RunNow => {
                self.recompute(host);
            }
            Schedule::Deferred(deadline) => {
                tracing::trace!(?deadline, "recomputation deferred");
            }
        }
    }

    /// Run the debounced recomputation if it is due. Returns whether it ran.
    pub fn poll<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.scheduler.fire_due() {
            return false;
        }
        self.recompute(host);
        true
    }

    /// When the host should call [`poll`](Self::poll) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Extract, plan and render for the active buffer. Returns the number of
    /// annotations rendered.
    pub fn recompute<H: Host + ?Sized>(&self, host: &mut H) -> usize {
        if self.is_inert() {
            return 0;
        }
        let Some(text) = host.active_text() else {
            return 0;
        };
        let annotations = self.annotate(&text);
        tracing::debug!(count = annotations.len(), "rendering annotations");
        host.render(&annotations);
        annotations.len()
    }

    /// Annotations for `text` against the current table, without rendering.
    pub fn annotate(&self, text: &str) -> Vec<Annotation> {
        let table = self.store.snapshot();
        let occurrences = self.extractor.extract(text);
        self.planner.plan(text, &occurrences, &table)
    }

    /// Cancel pending work and release the watcher.
    pub fn dispose(&mut self) {
        self.scheduler.cancel();
        if let Err(err) = self.watcher.release() {
            tracing::debug!(error = %err, "ignoring watcher release failure");
        }
        self.binding = None;
    }

    pub fn is_inert(&self) -> bool {
        self.workspace.is_none()
    }

    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_deref()
    }

    pub fn binding(&self) -> Option<&WatchTarget> {
        self.binding.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    pub fn watcher(&self) -> &W {
        &self.watcher
    }

    pub fn is_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Returns whether the event changed anything worth re-rendering.
    fn on_file_event(&mut self, event: &FileEvent) -> bool {
        match (self.active.clone(), event) {
            (Some(active), FileEvent::Modified(path) | FileEvent::Created(path))
                if same_file(&active, path) =>
            {
                tracing::debug!(path = %active.display(), "locale file changed, reloading");
                self.store.load(&active);
                true
            }
            (Some(active), FileEvent::Removed(path)) if same_file(&active, path) => {
                tracing::debug!(path = %active.display(), "locale file removed, resolving again");
                self.reload();
                true
            }
            (None, FileEvent::Created(path) | FileEvent::Modified(path))
                if self.could_resolve_to(path) =>
            {
                tracing::debug!(path = %path.display(), "locale file appeared, resolving again");
                self.reload().is_some()
            }
            _ => false,
        }
    }

    /// Whether `path` is something resolution would pick.
    fn could_resolve_to(&self, path: &Path) -> bool {
        let Some(root) = self.workspace.as_deref() else {
            return false;
        };
        let is_manual = self
            .config
            .locale_path
            .as_deref()
            .is_some_and(|manual| same_file(&root.join(manual), path));
        is_manual || self.resolver.is_candidate(root, path)
    }

    fn apply_config(&mut self, config: Config) {
        let path_changed = config.locale_path != self.config.locale_path;
        self.config = config;
        if path_changed {
            tracing::debug!(locale_path = ?self.config.locale_path, "locale path changed");
            self.reload();
        }
    }

    /// Release the current binding, then bind `target`. A failed release
    /// never prevents the new binding.
    fn rebind(&mut self, target: WatchTarget) {
        if self.binding.as_ref() == Some(&target) {
            return;
        }
        if let Err(err) = self.watcher.release() {
            tracing::debug!(error = %err, "ignoring watcher release failure");
        }
        self.binding = None;

        match self.watcher.bind(&target) {
            Ok(()) => self.binding = Some(target),
            Err(err) => {
                let err = LensError::WatcherRebindFailure {
                    path: target.path().to_path_buf(),
                    reason: err.to_string(),
                };
                tracing::warn!(error = %err, "live reload disabled");
            }
        }
    }
}
