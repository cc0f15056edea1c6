//! App: The interactive loop tying the actors to the terminal.
//!
//! The loop multiplexes three sources with `select!`:
//! input events, fetch replies and a redraw tick. The tick only
//! triggers a redraw when the problem sink has been rendered since the
//! last frame, so an idle UI does no drawing work.

use super::controller::{Action, Controller};
use super::fetch::FetchActor;
use super::input::InputActor;
use super::messages::{AppEvent, InputEvent};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::scenario::ScenarioClient;
use crate::terminal::{OutputBuffer, SessionConfig, TerminalSession};
use crossbeam_channel::{bounded, select, tick, unbounded, Receiver};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// Configuration for the app loop.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// How often to check for revealed content.
    pub redraw_interval: Duration,
    /// Where exported scenarios are written.
    pub export_dir: PathBuf,
    /// Terminal session settings.
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            redraw_interval: Duration::from_millis(16),
            export_dir: PathBuf::from("."),
            session: SessionConfig::default(),
        }
    }
}

/// The interactive scenario UI.
pub struct App {
    config: AppConfig,
    controller: Controller,
    client: ScenarioClient,
}

impl App {
    /// Create the app; nothing touches the terminal until [`App::run`].
    pub fn new(config: &Config, client: ScenarioClient, app_config: AppConfig) -> Self {
        Self {
            controller: Controller::new(config, app_config.export_dir.clone()),
            config: app_config,
            client,
        }
    }

    /// Enter the terminal session and run until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, drawing or spawning the actor
    /// threads fails.
    pub fn run(mut self) -> Result<()> {
        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let (event_tx, event_rx) = unbounded::<AppEvent>();

        let mut session = TerminalSession::enter(self.config.session.clone())?;
        let input = InputActor::spawn(input_tx, self.config.input_poll_timeout)?;
        let fetch = FetchActor::spawn(self.client.clone(), event_tx)?;
        info!(base_url = self.client.base_url(), "interactive session started");

        let result = self.event_loop(&mut session, &input_rx, &event_rx, &fetch);

        input.join();
        fetch.shutdown();
        drop(session);
        info!("interactive session ended");
        result
    }

    fn event_loop(
        &mut self,
        session: &mut TerminalSession,
        input_rx: &Receiver<InputEvent>,
        event_rx: &Receiver<AppEvent>,
        fetch: &FetchActor,
    ) -> Result<()> {
        let ticker = tick(self.config.redraw_interval);
        let mut frame = OutputBuffer::with_capacity(16 * 1024);
        let mut last_renders = self.controller.sink_renders();

        self.redraw(session, &mut frame)?;

        loop {
            let action = select! {
                recv(input_rx) -> msg => match msg {
                    Ok(InputEvent::Key { code, modifiers }) => self.controller.handle_key(code, modifiers),
                    Ok(InputEvent::Resize { width, height }) => {
                        session.resize(width, height);
                        Action::Redraw
                    }
                    Ok(InputEvent::Error(message)) => {
                        error!(%message, "input error");
                        Action::None
                    }
                    Ok(InputEvent::Shutdown) | Err(_) => Action::Quit,
                },
                recv(event_rx) -> msg => match msg {
                    Ok(event) => self.controller.handle_event(event),
                    Err(_) => Action::None,
                },
                recv(ticker) -> _ => {
                    let renders = self.controller.sink_renders();
                    if renders == last_renders {
                        Action::None
                    } else {
                        last_renders = renders;
                        Action::Redraw
                    }
                }
            };

            match action {
                Action::None => {}
                Action::Redraw => self.redraw(session, &mut frame)?,
                Action::Fetch(request) => {
                    if !fetch.request(request) {
                        self.controller.fail(&Error::Io(std::io::Error::other("fetch thread stopped")));
                    }
                    self.redraw(session, &mut frame)?;
                }
                Action::Quit => return Ok(()),
            }
        }
    }

    fn redraw(&mut self, session: &mut TerminalSession, frame: &mut OutputBuffer) -> Result<()> {
        self.controller.draw(session.width(), session.height(), frame);
        session.present(frame)?;
        Ok(())
    }
}
