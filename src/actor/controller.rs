//! Controller: Key handling and fetch bookkeeping for the interactive UI.
//!
//! Owns the view, the reveal engine and the problem sink; knows nothing
//! about the terminal, so it can be driven directly in tests.

use super::messages::{AppEvent, FetchRequest, KeyCode, KeyModifiers};
use crate::config::Config;
use crate::error::Error;
use crate::reveal::{RevealEngine, TextSink};
use crate::terminal::{draw, BodyFit, DrawContext, OutputBuffer};
use crate::view::{export_to, Panel, ScenarioView, Screen};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// What the app loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed.
    None,
    /// The frame is stale.
    Redraw,
    /// Send a request to the fetch thread, then redraw.
    Fetch(FetchRequest),
    /// Leave the app.
    Quit,
}

/// UI state machine.
pub struct Controller {
    view: ScenarioView,
    sink: Arc<Mutex<TextSink>>,
    engine: RevealEngine,
    include_error_detail: bool,
    export_dir: PathBuf,
    next_request: u64,
    pending: Option<u64>,
    status: Option<String>,
    /// Fit of the last drawn frame; bounds scrolling.
    fit: BodyFit,
}

impl Controller {
    /// Create a controller from configuration; exports land in `export_dir`.
    pub fn new(config: &Config, export_dir: impl Into<PathBuf>) -> Self {
        let sink = Arc::new(Mutex::new(TextSink::new()));
        Self {
            view: ScenarioView::new(sink.clone(), config.interval()),
            sink,
            engine: RevealEngine::new(config.reveal_options()),
            include_error_detail: config.include_error_detail,
            export_dir: export_dir.into(),
            next_request: 0,
            pending: None,
            status: None,
            fit: BodyFit::default(),
        }
    }

    /// The display shell.
    pub const fn view(&self) -> &ScenarioView {
        &self.view
    }

    /// The reveal engine.
    pub const fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    /// Id of the request awaiting a reply.
    pub const fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Transient status line.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Current content of the problem sink.
    pub fn problem_content(&self) -> String {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .content()
            .to_string()
    }

    /// Render counter of the problem sink; changes whenever it is redrawn.
    pub fn sink_renders(&self) -> u64 {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .renders()
    }

    /// Compose a frame.
    pub fn draw(&mut self, width: u16, height: u16, out: &mut OutputBuffer) {
        let problem = self.problem_content();
        let ctx = DrawContext {
            problem: &problem,
            preserve_markup: self.engine.options().preserve_markup,
            status: self.status(),
        };
        self.fit = draw(&self.view, ctx, width, height, out);
        self.view.scroll_by(0, self.fit.max_scroll);
    }

    /// React to a key press.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Action {
        if code == KeyCode::Char('q') || (modifiers.control && code == KeyCode::Char('c')) {
            return Action::Quit;
        }
        self.status = None;

        match self.view.screen() {
            Screen::Selection => self.selection_key(code),
            Screen::Loading => match code {
                KeyCode::Esc | KeyCode::Char('b') => {
                    debug!(request_id = ?self.pending, "request abandoned");
                    self.pending = None;
                    self.view.reset(&self.engine);
                    Action::Redraw
                }
                _ => Action::None,
            },
            Screen::Result => self.result_key(code),
        }
    }

    fn result_key(&mut self, code: KeyCode) -> Action {
        let page = isize::try_from(self.fit.visible.max(1)).unwrap_or(isize::MAX);
        let delta = match code {
            KeyCode::Up | KeyCode::Char('k') => -1,
            KeyCode::Down | KeyCode::Char('j') => 1,
            KeyCode::PageUp => -page,
            KeyCode::PageDown | KeyCode::Char(' ') => page,
            _ => return self.panel_key(code),
        };
        let before = self.view.scroll();
        self.view.scroll_by(delta, self.fit.max_scroll);
        if self.view.scroll() == before {
            Action::None
        } else {
            Action::Redraw
        }
    }

    fn panel_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('h') => {
                self.view.toggle(Panel::Hints);
                Action::Redraw
            }
            KeyCode::Char('s') => {
                self.view.toggle(Panel::Steps);
                Action::Redraw
            }
            KeyCode::Char('e') => {
                self.export();
                Action::Redraw
            }
            KeyCode::Esc | KeyCode::Char('b') => {
                self.view.reset(&self.engine);
                Action::Redraw
            }
            _ => Action::None,
        }
    }

    fn selection_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.view.move_cursor(-1);
                Action::Redraw
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.view.move_cursor(1);
                Action::Redraw
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if self.view.select_index(index) {
                    Action::Redraw
                } else {
                    Action::None
                }
            }
            KeyCode::Enter => Action::Fetch(self.generate()),
            _ => Action::None,
        }
    }

    /// Resolve the highlighted entry and switch to the loading screen.
    fn generate(&mut self) -> FetchRequest {
        let module = self.view.selection().resolve(&mut rand::rng());
        self.next_request += 1;
        self.pending = Some(self.next_request);
        self.view.begin_loading();
        info!(request_id = self.next_request, module = module.name(), "scenario requested");
        FetchRequest {
            request_id: self.next_request,
            module,
        }
    }

    /// React to a reply from the fetch thread.
    pub fn handle_event(&mut self, event: AppEvent) -> Action {
        match event {
            AppEvent::Scenario {
                request_id,
                module,
                result,
            } => {
                if self.pending != Some(request_id) {
                    debug!(request_id, "stale reply ignored");
                    return Action::None;
                }
                self.pending = None;
                match result {
                    Ok(response) => {
                        debug!(module = module.name(), "populating view");
                        self.view.populate(&response, &self.engine);
                    }
                    Err(error) => self.fail(&error),
                }
                Action::Redraw
            }
        }
    }

    /// Report a failure that happened outside the fetch thread.
    pub fn fail(&mut self, error: &Error) {
        let alert = self.view.fail(error, self.include_error_detail, &self.engine);
        warn!(%alert, "scenario failed");
    }

    fn export(&mut self) {
        let path = export_path(&self.export_dir, self.view.module_label());
        let preserve = self.engine.options().preserve_markup;
        self.status = Some(match export_to(&self.view, &path, preserve) {
            Ok(()) => format!("Exported to {}", path.display()),
            Err(error) => {
                warn!(%error, path = %path.display(), "export failed");
                format!("Export failed: {error}")
            }
        });
    }
}

/// File name for an exported scenario: the module label, slugged.
fn export_path(dir: &Path, module_label: &str) -> PathBuf {
    let mut slug = String::with_capacity(module_label.len());
    for c in module_label.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "scenario" } else { slug };
    dir.join(format!("scenario-{slug}.md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::JobState;
    use crate::scenario::{Module, ScenarioResponse};
    use std::time::Duration;

    fn controller(dir: &Path) -> Controller {
        let config = Config {
            interval_ms: 1,
            ..Config::default()
        };
        Controller::new(&config, dir)
    }

    fn key(c: &mut Controller, code: KeyCode) -> Action {
        c.handle_key(code, KeyModifiers::NONE)
    }

    fn reply(request_id: u64, result: crate::error::Result<ScenarioResponse>) -> AppEvent {
        AppEvent::Scenario {
            request_id,
            module: Module::Utilities,
            result,
        }
    }

    fn response() -> ScenarioResponse {
        ScenarioResponse {
            module_name: Some("ServiceNow Utilities".into()),
            problem_statement: Some("Fix **this**".into()),
            pro_tips: Some("Be careful".into()),
            hints: Some(vec!["hint one".into()]),
            ..ScenarioResponse::default()
        }
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        assert_eq!(key(&mut c, KeyCode::Char('q')), Action::Quit);
        assert_eq!(c.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
    }

    #[test]
    fn test_menu_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Up);
        assert_eq!(c.view().menu_cursor(), 8);
        key(&mut c, KeyCode::Char('j'));
        assert_eq!(c.view().menu_cursor(), 0);
        key(&mut c, KeyCode::Char('7'));
        assert_eq!(c.view().menu_cursor(), 6);
    }

    #[test]
    fn test_enter_requests_highlighted_module() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Char('7'));

        let action = key(&mut c, KeyCode::Enter);
        assert_eq!(
            action,
            Action::Fetch(FetchRequest {
                request_id: 1,
                module: Module::Utilities,
            })
        );
        assert_eq!(c.view().screen(), Screen::Loading);
        assert_eq!(c.pending(), Some(1));
    }

    #[test]
    fn test_random_resolves_to_a_module() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Char('9'));
        match key(&mut c, KeyCode::Enter) {
            Action::Fetch(request) => assert!(Module::ALL.contains(&request.module)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_reply_populates_and_reveals() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Enter);

        assert_eq!(c.handle_event(reply(1, Ok(response()))), Action::Redraw);
        assert_eq!(c.view().screen(), Screen::Result);
        assert_eq!(c.view().module_label(), "ServiceNow Utilities");

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while c.engine().state(c.view().problem_id()) == JobState::Running {
            assert!(std::time::Instant::now() < deadline);
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(c.problem_content(), crate::markup::expand("Fix **this**", true));
    }

    #[test]
    fn test_stale_reply_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Enter);
        key(&mut c, KeyCode::Esc);
        assert_eq!(c.view().screen(), Screen::Selection);
        key(&mut c, KeyCode::Enter);

        assert_eq!(c.handle_event(reply(1, Ok(response()))), Action::None);
        assert_eq!(c.view().screen(), Screen::Loading);
        assert_eq!(c.handle_event(reply(2, Ok(response()))), Action::Redraw);
        assert_eq!(c.view().screen(), Screen::Result);
    }

    #[test]
    fn test_failed_reply_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Enter);

        c.handle_event(reply(1, Err(Error::Backend("quota exceeded".into()))));
        assert_eq!(c.view().screen(), Screen::Selection);
        let alert = c.view().alert().unwrap();
        assert!(alert.contains("quota exceeded"));
    }

    #[test]
    fn test_result_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Enter);
        c.handle_event(reply(1, Ok(response())));

        key(&mut c, KeyCode::Char('h'));
        assert!(c.view().is_open(Panel::Hints));
        key(&mut c, KeyCode::Char('s'));
        assert!(c.view().is_open(Panel::Steps));
        assert!(!c.view().is_open(Panel::Hints));

        key(&mut c, KeyCode::Char('b'));
        assert_eq!(c.view().screen(), Screen::Selection);
        assert!(!c.engine().is_running(c.view().problem_id()));
    }

    #[test]
    fn test_result_scrolls_within_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Enter);
        c.handle_event(reply(1, Ok(response())));

        let mut out = OutputBuffer::new();
        assert_eq!(key(&mut c, KeyCode::Down), Action::None);

        c.draw(80, 8, &mut out);
        assert_eq!(key(&mut c, KeyCode::Down), Action::Redraw);
        assert_eq!(c.view().scroll(), 1);
        assert_eq!(key(&mut c, KeyCode::PageDown), Action::Redraw);
        assert_eq!(key(&mut c, KeyCode::PageDown), Action::Redraw);
        let bottom = c.view().scroll();
        assert!(bottom > 1);
        assert_eq!(key(&mut c, KeyCode::PageDown), Action::None);
        assert_eq!(c.view().scroll(), bottom);

        assert_eq!(key(&mut c, KeyCode::PageUp), Action::Redraw);
        key(&mut c, KeyCode::Char('k'));
        key(&mut c, KeyCode::PageUp);
        assert_eq!(c.view().scroll(), 0);

        c.draw(80, 60, &mut out);
        assert_eq!(key(&mut c, KeyCode::PageDown), Action::None);
    }

    #[test]
    fn test_export_key_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = controller(dir.path());
        key(&mut c, KeyCode::Enter);
        c.handle_event(reply(1, Ok(response())));

        key(&mut c, KeyCode::Char('e'));
        let path = dir.path().join("scenario-servicenow-utilities.md");
        assert!(c.status().unwrap().starts_with("Exported to"));
        let doc = std::fs::read_to_string(path).unwrap();
        assert!(doc.contains("Fix this"));

        key(&mut c, KeyCode::Char('h'));
        assert_eq!(c.status(), None);
    }

    #[test]
    fn test_export_path_slug() {
        let dir = Path::new("/tmp");
        assert_eq!(
            export_path(dir, "Lists, Filters & Forms"),
            Path::new("/tmp/scenario-lists-filters-forms.md")
        );
        assert_eq!(export_path(dir, "!!"), Path::new("/tmp/scenario-scenario.md"));
    }
}
