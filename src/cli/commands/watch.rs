//! Live preview of one file.
//!
//! Three notify subscriptions feed one `select!` loop: the engine's own
//! locale watcher, the previewed file (edits are debounced) and the config
//! file. The debounce deadline is a `sleep_until` branch.

use std::{
    cell::RefCell,
    fs,
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result, bail};
use tokio::sync::mpsc;

use crate::cli::{
    args::WatchCommand,
    exit_status::ExitStatus,
    report::{print_file, print_warning},
};
use crate::core::{
    Annotation, Engine, EngineEvent, FileEvent, FileWatcher, Host, NotifyWatcher, SystemClock,
    WatchTarget, watch::same_file,
};

use super::Workspace;

/// Terminal host: the watched file is the only buffer, rendering redraws it.
struct TerminalHost {
    path: PathBuf,
    label: String,
    /// Text read by the last `active_text`, rendered by the next `render`.
    last_text: RefCell<String>,
    clear_screen: bool,
}

impl TerminalHost {
    fn new(path: PathBuf) -> Self {
        let label = path.display().to_string();
        Self {
            path,
            label,
            last_text: RefCell::new(String::new()),
            clear_screen: io::stdout().is_terminal(),
        }
    }
}

impl Host for TerminalHost {
    fn active_text(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                self.last_text.replace(text.clone());
                Some(text)
            }
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "buffer unreadable");
                None
            }
        }
    }

    fn render(&mut self, annotations: &[Annotation]) {
        if self.clear_screen {
            print!("\x1B[2J\x1B[H");
        }
        print_file(&self.label, &self.last_text.borrow(), annotations);
        let _ = io::stdout().flush();
    }
}

pub fn watch(cmd: WatchCommand) -> Result<ExitStatus> {
    let workspace = Workspace::from_args(&cmd.common)?;
    if !cmd.file.is_file() {
        bail!("File not found: {}", cmd.file.display());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(watch_loop(workspace, cmd.file))
}

async fn watch_loop(mut workspace: Workspace, file: PathBuf) -> Result<ExitStatus> {
    let (locale_tx, mut locale_rx) = mpsc::unbounded_channel();
    let (buffer_tx, mut buffer_rx) = mpsc::unbounded_channel();
    let (config_tx, mut config_rx) = mpsc::unbounded_channel();

    let mut engine = Engine::init(
        Some(workspace.root.clone()),
        workspace.config.clone(),
        NotifyWatcher::new(locale_tx),
        SystemClock,
    );
    if engine.is_inert() {
        bail!(
            "Workspace root is not a directory: {}",
            workspace.root.display()
        );
    }
    if engine.active_path().is_none() {
        print_warning("no locale file found yet, waiting for one to appear");
    }

    let mut buffer_watcher = NotifyWatcher::new(buffer_tx);
    buffer_watcher
        .bind(&WatchTarget::File(file.clone()))
        .with_context(|| format!("Failed to watch {}", file.display()))?;

    let config_file = workspace.config_watch_path();
    let mut config_watcher = NotifyWatcher::new(config_tx);
    if let Err(err) = config_watcher.bind(&WatchTarget::File(config_file.clone())) {
        print_warning(&format!("config changes will not be picked up: {}", err));
    }

    let mut host = TerminalHost::new(file.clone());
    engine.handle(EngineEvent::FocusChanged, &mut host);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            Some(event) = locale_rx.recv() => {
                engine.handle(EngineEvent::File(event), &mut host);
            }
            Some(event) = buffer_rx.recv() => {
                if let Some(event) = buffer_event(&file, event) {
                    engine.handle(event, &mut host);
                }
            }
            Some(event) = config_rx.recv() => {
                if same_file(&config_file, event.path()) {
                    match workspace.reload_config() {
                        Ok(config) => {
                            workspace.config = config.clone();
                            engine.handle(EngineEvent::ConfigChanged(config), &mut host);
                        }
                        Err(err) => print_warning(&format!("{:#}", err)),
                    }
                }
            }
            _ = sleep_until(engine.next_deadline()) => {
                engine.poll(&mut host);
            }
        }
    }

    engine.dispose();
    for watcher in [&mut buffer_watcher, &mut config_watcher] {
        if let Err(err) = watcher.release() {
            tracing::debug!(error = %err, "ignoring watcher release failure");
        }
    }
    Ok(ExitStatus::Success)
}

/// Map a change of the previewed file onto an engine event.
fn buffer_event(file: &Path, event: FileEvent) -> Option<EngineEvent> {
    if !same_file(file, event.path()) {
        return None;
    }
    match event {
        FileEvent::Modified(_) => Some(EngineEvent::BufferEdited),
        // Atomic saves replace the file: treat as a fresh buffer
        FileEvent::Created(_) => Some(EngineEvent::FocusChanged),
        FileEvent::Removed(path) => {
            print_warning(&format!("{} was removed", path.display()));
            None
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
