//! ScenarioView: Screen state and named content targets.

use crate::error::Error;
use crate::reveal::{JobHandle, RevealEngine, SharedSink, SinkId};
use crate::scenario::{Module, ModuleSelection, ScenarioResponse};
use std::time::Duration;
use tracing::{debug, info};

/// Name of the problem-statement reveal target.
pub const PROBLEM_SINK: &str = "res-problem";
/// Module label shown when the response has none.
pub const DEFAULT_MODULE_LABEL: &str = "ServiceNow Module";
/// Tips label shown when the response has none.
pub const NO_TIPS: &str = "No pro tips available.";
/// Problem statement revealed when the response has none.
pub const NO_PROBLEM_STATEMENT: &str = "No problem statement generated.";
/// Placeholder item for a missing or empty list.
pub const NOT_AVAILABLE: &str = "Not available.";
/// First line of every failure alert.
pub const ALERT_HEADLINE: &str = "Failed to generate scenario.";

/// Which top-level screen is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Module menu.
    Selection,
    /// Waiting for the backend.
    Loading,
    /// A scenario is displayed.
    Result,
}

/// Collapsible sections of the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// The hints list.
    Hints,
    /// The guided-steps list.
    Steps,
}

/// The display shell.
pub struct ScenarioView {
    screen: Screen,
    module_label: String,
    tips_label: String,
    /// Problem statement as received, before tokenization.
    problem_source: String,
    hints: Vec<String>,
    steps: Vec<String>,
    references: Vec<String>,
    /// At most one panel is open.
    open_panel: Option<Panel>,
    problem_sink: SharedSink,
    problem_id: SinkId,
    interval: Duration,
    menu_cursor: usize,
    /// Result rows scrolled past the top.
    scroll: usize,
    alert: Option<String>,
}

impl ScenarioView {
    /// Entries of the selection menu: every module, then `Random`.
    pub const MENU: [ModuleSelection; 9] = [
        ModuleSelection::Named(Module::ALL[0]),
        ModuleSelection::Named(Module::ALL[1]),
        ModuleSelection::Named(Module::ALL[2]),
        ModuleSelection::Named(Module::ALL[3]),
        ModuleSelection::Named(Module::ALL[4]),
        ModuleSelection::Named(Module::ALL[5]),
        ModuleSelection::Named(Module::ALL[6]),
        ModuleSelection::Named(Module::ALL[7]),
        ModuleSelection::Random,
    ];

    /// Create a shell revealing the problem statement into `problem_sink`.
    pub fn new(problem_sink: SharedSink, interval: Duration) -> Self {
        Self {
            screen: Screen::Selection,
            module_label: String::new(),
            tips_label: String::new(),
            problem_source: String::new(),
            hints: Vec::new(),
            steps: Vec::new(),
            references: Vec::new(),
            open_panel: None,
            problem_sink,
            problem_id: SinkId::new(PROBLEM_SINK),
            interval,
            menu_cursor: 0,
            scroll: 0,
            alert: None,
        }
    }

    /// Visible screen.
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Switch to the loading screen.
    pub fn begin_loading(&mut self) {
        self.alert = None;
        self.screen = Screen::Loading;
    }

    /// Fill every target from `response` and start the problem reveal.
    ///
    /// Both panels are closed and the result is scrolled to the top.
    pub fn populate(&mut self, response: &ScenarioResponse, engine: &RevealEngine) -> JobHandle {
        self.module_label = non_empty(response.module_name.as_deref(), DEFAULT_MODULE_LABEL);
        self.tips_label = non_empty(response.pro_tips.as_deref(), NO_TIPS);
        self.problem_source = non_empty(response.problem_statement.as_deref(), NO_PROBLEM_STATEMENT);

        self.hints = list_or_placeholder(response.hints.as_deref());
        self.steps = list_or_placeholder(response.guided_steps.as_deref());
        self.references = list_or_placeholder(response.theoretical_references.as_deref());

        self.open_panel = None;
        self.scroll = 0;
        self.screen = Screen::Result;
        info!(module = %self.module_label, "scenario displayed");

        engine.start(
            self.problem_id.clone(),
            self.problem_sink.clone(),
            &self.problem_source,
            self.interval,
        )
    }

    /// Record a failed exchange, then return to the menu.
    ///
    /// Returns the alert text.
    pub fn fail(&mut self, error: &Error, include_detail: bool, engine: &RevealEngine) -> String {
        let alert = alert_message(error, include_detail);
        self.reset(engine);
        self.alert = Some(alert.clone());
        alert
    }

    /// Return to the menu, stopping the reveal.
    ///
    /// Content already revealed is left in the sink.
    pub fn reset(&mut self, engine: &RevealEngine) {
        engine.cancel(&self.problem_id);
        self.screen = Screen::Selection;
        self.scroll = 0;
        debug!("view reset");
    }

    /// Open `panel` (closing the other one), or close it if already open.
    pub fn toggle(&mut self, panel: Panel) {
        self.open_panel = if self.open_panel == Some(panel) {
            None
        } else {
            Some(panel)
        };
    }

    /// Whether `panel` is expanded.
    pub fn is_open(&self, panel: Panel) -> bool {
        self.open_panel == Some(panel)
    }

    /// Module label target.
    pub fn module_label(&self) -> &str {
        &self.module_label
    }

    /// Tips label target.
    pub fn tips_label(&self) -> &str {
        &self.tips_label
    }

    /// Problem statement as received.
    pub fn problem_source(&self) -> &str {
        &self.problem_source
    }

    /// Hints list target.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Guided-steps list target.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// References list target.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Identity of the problem-statement sink.
    pub const fn problem_id(&self) -> &SinkId {
        &self.problem_id
    }

    /// Highlighted menu entry index.
    pub const fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    /// Highlighted menu entry.
    pub const fn selection(&self) -> ModuleSelection {
        Self::MENU[self.menu_cursor]
    }

    /// Move the menu highlight, wrapping at both ends.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = Self::MENU.len();
        let offset = delta.unsigned_abs() % len;
        self.menu_cursor = if delta >= 0 {
            (self.menu_cursor + offset) % len
        } else {
            (self.menu_cursor + len - offset) % len
        };
    }

    /// Highlight entry `index`; returns `false` if out of range.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < Self::MENU.len() {
            self.menu_cursor = index;
            true
        } else {
            false
        }
    }

    /// Result rows scrolled past the top.
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll the result by `delta` rows, staying within `0..=max`.
    pub fn scroll_by(&mut self, delta: isize, max: usize) {
        let rows = delta.unsigned_abs();
        let next = if delta >= 0 {
            self.scroll.saturating_add(rows)
        } else {
            self.scroll.saturating_sub(rows)
        };
        self.scroll = next.min(max);
    }

    /// Pending alert, if the last exchange failed.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Dismiss the pending alert.
    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.alert.take()
    }
}

/// Alert text for a failed exchange.
pub fn alert_message(error: &Error, include_detail: bool) -> String {
    if include_detail {
        format!("{ALERT_HEADLINE}\nError details: {error}")
    } else {
        ALERT_HEADLINE.to_string()
    }
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback).to_string()
}

fn list_or_placeholder(items: Option<&[String]>) -> Vec<String> {
    match items {
        Some(items) if !items.is_empty() => items.to_vec(),
        _ => vec![NOT_AVAILABLE.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{EMPHASIS_CLOSE, EMPHASIS_OPEN};
    use crate::reveal::{JobState, TextSink};
    use std::sync::{Arc, Mutex};

    fn shell(interval: Duration) -> (ScenarioView, Arc<Mutex<TextSink>>) {
        let sink = Arc::new(Mutex::new(TextSink::new()));
        (ScenarioView::new(sink.clone(), interval), sink)
    }

    fn sample() -> ScenarioResponse {
        ScenarioResponse {
            module_name: Some("X".into()),
            problem_statement: Some("**Hi** there".into()),
            hints: Some(vec![]),
            guided_steps: Some(vec!["s1".into()]),
            theoretical_references: None,
            ..ScenarioResponse::default()
        }
    }

    #[test]
    fn test_populate_fills_every_target() {
        let engine = RevealEngine::default();
        let (mut view, sink) = shell(Duration::from_millis(1));

        let job = view.populate(&sample(), &engine);

        assert_eq!(job.wait(Some(Duration::from_secs(5))), JobState::Completed);
        assert_eq!(view.screen(), Screen::Result);
        assert_eq!(view.module_label(), "X");
        assert_eq!(view.tips_label(), NO_TIPS);
        assert_eq!(view.hints(), [NOT_AVAILABLE]);
        assert_eq!(view.steps(), ["s1"]);
        assert_eq!(view.references(), [NOT_AVAILABLE]);
        assert_eq!(
            sink.lock().unwrap().content(),
            format!("{EMPHASIS_OPEN}Hi{EMPHASIS_CLOSE} there")
        );
    }

    #[test]
    fn test_populate_defaults_for_empty_response() {
        let engine = RevealEngine::default();
        let (mut view, sink) = shell(Duration::ZERO);

        let response = ScenarioResponse {
            module_name: Some(String::new()),
            ..ScenarioResponse::default()
        };
        view.populate(&response, &engine).wait(Some(Duration::from_secs(5)));

        assert_eq!(view.module_label(), DEFAULT_MODULE_LABEL);
        assert_eq!(view.problem_source(), NO_PROBLEM_STATEMENT);
        assert_eq!(sink.lock().unwrap().content(), NO_PROBLEM_STATEMENT);
    }

    #[test]
    fn test_panels_hidden_after_new_result() {
        let engine = RevealEngine::default();
        let (mut view, _sink) = shell(Duration::ZERO);

        view.populate(&sample(), &engine);
        view.toggle(Panel::Hints);
        assert!(view.is_open(Panel::Hints));

        view.populate(&sample(), &engine);
        assert!(!view.is_open(Panel::Hints));
        assert!(!view.is_open(Panel::Steps));
    }

    #[test]
    fn test_panels_are_mutually_exclusive() {
        let (mut view, _sink) = shell(Duration::ZERO);

        view.toggle(Panel::Hints);
        assert!(view.is_open(Panel::Hints));

        view.toggle(Panel::Steps);
        assert!(view.is_open(Panel::Steps));
        assert!(!view.is_open(Panel::Hints));

        view.toggle(Panel::Steps);
        assert!(!view.is_open(Panel::Steps));
    }

    #[test]
    fn test_fail_with_detail() {
        let engine = RevealEngine::default();
        let (mut view, _sink) = shell(Duration::ZERO);
        view.begin_loading();

        let alert = view.fail(&Error::Backend("quota exceeded".into()), true, &engine);

        assert_eq!(alert, "Failed to generate scenario.\nError details: quota exceeded");
        assert_eq!(view.screen(), Screen::Selection);
        assert_eq!(view.dismiss_alert().as_deref(), Some(alert.as_str()));
        assert_eq!(view.alert(), None);
    }

    #[test]
    fn test_fail_without_detail() {
        let engine = RevealEngine::default();
        let (mut view, _sink) = shell(Duration::ZERO);
        let err = Error::Server {
            status: 500,
            message: "Server error: 500".into(),
        };

        assert_eq!(view.fail(&err, false, &engine), ALERT_HEADLINE);
    }

    #[test]
    fn test_reset_cancels_reveal_and_keeps_partial_text() {
        let engine = RevealEngine::default();
        let (mut view, sink) = shell(Duration::from_secs(60));

        let job = view.populate(&sample(), &engine);
        view.reset(&engine);

        assert_eq!(job.state(), JobState::Cancelled);
        assert_eq!(view.screen(), Screen::Selection);
        assert!(!sink.lock().unwrap().content().is_empty());
    }

    #[test]
    fn test_scroll_is_clamped_and_reset() {
        let engine = RevealEngine::default();
        let (mut view, _sink) = shell(Duration::ZERO);
        view.populate(&sample(), &engine);

        view.scroll_by(5, 3);
        assert_eq!(view.scroll(), 3);
        view.scroll_by(-1, 3);
        assert_eq!(view.scroll(), 2);
        view.scroll_by(-10, 3);
        assert_eq!(view.scroll(), 0);

        view.scroll_by(2, 3);
        view.populate(&sample(), &engine);
        assert_eq!(view.scroll(), 0);
        view.scroll_by(2, 3);
        view.reset(&engine);
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn test_menu_cursor_wraps() {
        let (mut view, _sink) = shell(Duration::ZERO);

        view.move_cursor(-1);
        assert_eq!(view.selection(), ModuleSelection::Random);

        view.move_cursor(1);
        assert_eq!(view.selection(), ModuleSelection::Named(Module::Overview));

        assert!(view.select_index(3));
        assert_eq!(view.selection(), ModuleSelection::Named(Module::DataSchema));
        assert!(!view.select_index(9));
    }
}
