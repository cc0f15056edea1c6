//! Fetch Actor: Dedicated thread for backend requests.
//!
//! The thread owns a single-threaded tokio runtime and serves
//! [`FetchRequest`]s one at a time, replying with [`AppEvent::Scenario`].
//! The app loop never blocks on the network.

use super::messages::{AppEvent, FetchRequest};
use crate::scenario::ScenarioClient;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Fetch actor that performs scenario requests.
pub struct FetchActor {
    /// Handle to the fetch thread.
    handle: Option<JoinHandle<()>>,
    /// Request queue; dropping it stops the thread.
    requests: Option<Sender<FetchRequest>>,
}

impl FetchActor {
    /// Spawn the fetch actor thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be built or the OS fails to
    /// spawn the thread.
    pub fn spawn(client: ScenarioClient, events: Sender<AppEvent>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let (requests, rx) = unbounded();

        let handle = thread::Builder::new()
            .name("scenario-fetch".to_string())
            .spawn(move || {
                Self::run_loop(&runtime, &client, &rx, &events);
            })?;

        Ok(Self {
            handle: Some(handle),
            requests: Some(requests),
        })
    }

    /// Queue a request. Returns `false` if the thread has stopped.
    pub fn request(&self, request: FetchRequest) -> bool {
        self.requests
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok())
    }

    /// Stop accepting requests and join the thread if it is idle.
    ///
    /// A request still in flight is abandoned; its thread exits once the
    /// request completes or times out.
    pub fn shutdown(mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                debug!("fetch thread still busy, detaching");
            }
        }
    }

    fn run_loop(
        runtime: &tokio::runtime::Runtime,
        client: &ScenarioClient,
        requests: &Receiver<FetchRequest>,
        events: &Sender<AppEvent>,
    ) {
        for FetchRequest { request_id, module } in requests {
            info!(request_id, module = module.name(), "generating scenario");
            let result = runtime.block_on(client.generate(module));
            if let Err(error) = &result {
                warn!(request_id, %error, "scenario request failed");
            }
            let event = AppEvent::Scenario {
                request_id,
                module,
                result,
            };
            if events.send(event).is_err() {
                // App loop gone
                break;
            }
        }
        debug!("fetch thread exiting");
    }
}

impl Drop for FetchActor {
    fn drop(&mut self) {
        self.requests.take();
    }
}
