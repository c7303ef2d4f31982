//! End-to-end engine scenarios against real files, with an in-memory host,
//! a recording watcher and a manual clock.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ghostlens::config::Config;
use ghostlens::core::{
    Annotation, AnnotationPlanner, DEBOUNCE_DELAY, Engine, EngineEvent, FileEvent, FileWatcher,
    Host, KeyExtractor, KeyOccurrence, LocaleResolver, ManualClock, Position, WatchTarget,
};
use ghostlens::error::LensResult;
use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

#[derive(Default)]
struct Editor {
    buffer: Option<String>,
    frames: Vec<Vec<Annotation>>,
}

impl Editor {
    fn open(text: &str) -> Self {
        Self {
            buffer: Some(text.to_string()),
            frames: Vec::new(),
        }
    }

    fn values(&self) -> Vec<String> {
        self.frames
            .last()
            .map(|frame| frame.iter().map(|a| a.value.clone()).collect())
            .unwrap_or_default()
    }
}

impl Host for Editor {
    fn active_text(&self) -> Option<String> {
        self.buffer.clone()
    }

    fn render(&mut self, annotations: &[Annotation]) {
        self.frames.push(annotations.to_vec());
    }
}

#[derive(Default)]
struct Bindings {
    current: Option<WatchTarget>,
    history: Vec<WatchTarget>,
}

impl FileWatcher for Bindings {
    fn bind(&mut self, target: &WatchTarget) -> LensResult<()> {
        self.current = Some(target.clone());
        self.history.push(target.clone());
        Ok(())
    }

    fn release(&mut self) -> LensResult<()> {
        self.current = None;
        Ok(())
    }
}

/// Picks up `@key.path` mentions instead of `t('...')` calls.
struct MentionExtractor;

impl KeyExtractor for MentionExtractor {
    fn extract(&self, text: &str) -> Vec<KeyOccurrence> {
        text.match_indices('@')
            .filter_map(|(at, _)| {
                let rest = &text[at + 1..];
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
                    .unwrap_or(rest.len());
                (len > 0).then(|| KeyOccurrence::new(&rest[..len], at + 1 + len))
            })
            .collect()
    }
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self { dir: tempdir().unwrap() }
    }

    fn write(&self, path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn engine(&self, config: Config) -> (Engine<Bindings, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let engine = Engine::init(
            Some(self.root().to_path_buf()),
            config,
            Bindings::default(),
            clock.clone(),
        );
        (engine, clock)
    }
}

#[test]
fn nested_key_resolves_at_call_end() {
    let ws = Workspace::new();
    ws.write("messages/en.json", r#"{"greeting":{"hello":"Hello there"}}"#);
    let (mut engine, _) = ws.engine(Config::default());

    let text = "t('greeting.hello')";
    let mut editor = Editor::open(text);
    engine.handle(EngineEvent::FocusChanged, &mut editor);

    assert_eq!(
        editor.frames,
        vec![vec![Annotation {
            key: "greeting.hello".to_string(),
            offset: text.len(),
            position: Position::new(0, text.chars().count()),
            value: "Hello there".to_string(),
        }]]
    );
    assert_eq!(editor.frames[0][0].label(), "  \u{279C}  Hello there");
}

#[test]
fn missing_key_renders_nothing() {
    let ws = Workspace::new();
    ws.write("en.json", r#"{"present": "yes"}"#);
    let (mut engine, _) = ws.engine(Config::default());

    let mut editor = Editor::open("t('missing.key')");
    engine.handle(EngineEvent::FocusChanged, &mut editor);

    assert_eq!(editor.frames, vec![Vec::<Annotation>::new()]);
}

#[test]
fn burst_of_edits_recomputes_once() {
    let ws = Workspace::new();
    ws.write("en.json", r#"{"a": "A", "b": "B"}"#);
    let (mut engine, clock) = ws.engine(Config::default());
    let mut editor = Editor::open("t('a')");

    for i in 0..10 {
        editor.buffer = Some(if i % 2 == 0 { "t('a')" } else { "t('b')" }.to_string());
        engine.handle(EngineEvent::BufferEdited, &mut editor);
        clock.advance(DEBOUNCE_DELAY / 10);
        assert!(!engine.poll(&mut editor));
    }
    assert!(editor.frames.is_empty());

    clock.advance(DEBOUNCE_DELAY);
    assert!(engine.poll(&mut editor));
    assert!(!engine.poll(&mut editor));

    assert_eq!(editor.frames.len(), 1);
    assert_eq!(editor.values(), vec!["B"]);
}

#[test]
fn edited_locale_file_is_picked_up() {
    let ws = Workspace::new();
    let locale = ws.write("en.json", r#"{"title": "Old"}"#);
    let (mut engine, _) = ws.engine(Config::default());
    let mut editor = Editor::open("t('title')");

    engine.handle(EngineEvent::FocusChanged, &mut editor);
    assert_eq!(editor.values(), vec!["Old"]);

    fs::write(&locale, r#"{"title": "New"}"#).unwrap();
    engine.handle(EngineEvent::File(FileEvent::Modified(locale)), &mut editor);

    assert_eq!(editor.values(), vec!["New"]);
}

#[test]
fn deleting_locale_file_falls_back_then_clears() {
    let ws = Workspace::new();
    let english = ws.write("a/en.json", r#"{"title": "Hello"}"#);
    let french = ws.write("b/fr.json", r#"{"title": "Bonjour"}"#);
    let (mut engine, _) = ws.engine(Config::default());
    let mut editor = Editor::open("t('title')");

    engine.handle(EngineEvent::FocusChanged, &mut editor);
    assert_eq!(editor.values(), vec!["Hello"]);

    fs::remove_file(&english).unwrap();
    engine.handle(EngineEvent::File(FileEvent::Removed(english)), &mut editor);
    assert_eq!(editor.values(), vec!["Bonjour"]);
    assert_eq!(engine.active_path(), Some(french.as_path()));
    assert_eq!(
        engine.watcher().current,
        Some(WatchTarget::File(french.clone()))
    );

    fs::remove_file(&french).unwrap();
    engine.handle(EngineEvent::File(FileEvent::Removed(french)), &mut editor);
    assert_eq!(editor.values(), Vec::<String>::new());
    assert!(engine.store().is_empty());
    assert_eq!(
        engine.watcher().current,
        Some(WatchTarget::Discovery(ws.root().to_path_buf()))
    );
}

#[test]
fn locale_file_created_after_activation() {
    let ws = Workspace::new();
    let (mut engine, _) = ws.engine(Config::default());
    let mut editor = Editor::open("<p>{t('welcome')}</p>");

    engine.handle(EngineEvent::FocusChanged, &mut editor);
    assert_eq!(editor.values(), Vec::<String>::new());
    assert_eq!(
        engine.watcher().current,
        Some(WatchTarget::Discovery(ws.root().to_path_buf()))
    );

    let created = ws.write("locales/en.json", r#"{"welcome": "Welcome!"}"#);
    engine.handle(EngineEvent::File(FileEvent::Created(created.clone())), &mut editor);

    assert_eq!(editor.values(), vec!["Welcome!"]);
    assert_eq!(engine.watcher().current, Some(WatchTarget::File(created)));
}

#[test]
fn configured_path_wins_and_can_be_switched() {
    let ws = Workspace::new();
    ws.write("en.json", r#"{"title": "Discovered"}"#);
    ws.write("i18n/strings.json", r#"{"title": "Configured"}"#);
    let config = Config {
        locale_path: Some("i18n/strings.json".to_string()),
    };
    let (mut engine, _) = ws.engine(config);
    let mut editor = Editor::open("t(\"title\")");

    engine.handle(EngineEvent::FocusChanged, &mut editor);
    assert_eq!(editor.values(), vec!["Configured"]);

    engine.handle(EngineEvent::ConfigChanged(Config::default()), &mut editor);
    assert_eq!(editor.values(), vec!["Discovered"]);
    assert_eq!(
        engine.watcher().history.last(),
        Some(&WatchTarget::File(ws.root().join("en.json")))
    );
}

#[test]
fn long_values_are_truncated() {
    let ws = Workspace::new();
    let value = "abcdefghij".repeat(5);
    ws.write("en.json", &format!(r#"{{"long": "{}"}}"#, value));
    let (mut engine, _) = ws.engine(Config::default());
    let mut editor = Editor::open("t(`long`)");

    engine.handle(EngineEvent::FocusChanged, &mut editor);

    let shown = &editor.values()[0];
    assert_eq!(shown.chars().count(), 40);
    assert_eq!(shown, &format!("{}...", &value[..37]));
}

#[test]
fn dispose_stops_pending_work() {
    let ws = Workspace::new();
    ws.write("en.json", r#"{"a": "A"}"#);
    let (mut engine, clock) = ws.engine(Config::default());
    let mut editor = Editor::open("t('a')");

    engine.handle(EngineEvent::BufferEdited, &mut editor);
    engine.dispose();
    clock.advance(DEBOUNCE_DELAY * 2);

    assert!(!engine.poll(&mut editor));
    assert!(editor.frames.is_empty());
    assert_eq!(engine.watcher().current, None);
}

#[test]
fn extractor_and_planner_are_swappable() {
    let ws = Workspace::new();
    ws.write("en.json", r#"{"home": {"title": "Welcome back home"}}"#);
    let (engine, _) = ws.engine(Config::default());
    let mut engine = engine
        .with_extractor(MentionExtractor)
        .with_planner(AnnotationPlanner::new(10));

    let mut editor = Editor::open("title: @home.title, t('home.title')");
    engine.handle(EngineEvent::FocusChanged, &mut editor);

    assert_eq!(editor.frames.len(), 1);
    let frame = &editor.frames[0];
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].key, "home.title");
    assert_eq!(frame[0].offset, 18);
    assert_eq!(frame[0].value, "Welcome...");
}

#[test]
fn custom_resolver_applies_on_reload() {
    let ws = Workspace::new();
    ws.write("en.json", r#"{"a": "A"}"#);
    let (engine, _) = ws.engine(Config::default());
    assert_eq!(engine.active_path(), Some(ws.root().join("en.json").as_path()));

    let mut engine = engine.with_resolver(LocaleResolver::new(0));
    assert_eq!(engine.reload(), None);

    assert!(engine.store().is_empty());
    assert_eq!(
        engine.watcher().current,
        Some(WatchTarget::Discovery(ws.root().to_path_buf()))
    );
}
