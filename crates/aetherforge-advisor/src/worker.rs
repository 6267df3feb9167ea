//! Advisor worker thread.
//!
//! The service runs on its own thread so a slow backend never delays a
//! frame. Requests go in over one channel, resolved text comes back over
//! another. Dropping the [`Advisor`] closes the request channel and joins
//! the thread.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::request::AdviceRequest;
use crate::service::{resolve, AdviceService};

pub struct Advisor {
    request_tx: Option<mpsc::Sender<AdviceRequest>>,
    answer_rx: mpsc::Receiver<String>,
    handle: Option<JoinHandle<()>>,
    in_flight: usize,
}

impl Advisor {
    /// Spawn the worker thread that owns `service`.
    pub fn spawn<S: AdviceService>(service: S) -> std::io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<AdviceRequest>();
        let (answer_tx, answer_rx) = mpsc::channel::<String>();

        let handle = std::thread::Builder::new()
            .name("aetherforge-advisor".into())
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    let text = resolve(service.advise(&request));
                    if answer_tx.send(text).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            request_tx: Some(request_tx),
            answer_rx,
            handle: Some(handle),
            in_flight: 0,
        })
    }

    /// Queue a request. Never blocks. Returns false if the worker is gone.
    pub fn request(&mut self, request: AdviceRequest) -> bool {
        let sent = self
            .request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());
        if sent {
            self.in_flight += 1;
        } else {
            tracing::warn!("advisor worker is not running");
        }
        sent
    }

    /// Drain finished answers. The latest one wins.
    pub fn poll(&mut self) -> Option<String> {
        let mut latest = None;
        while let Ok(text) = self.answer_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            latest = Some(text);
        }
        latest
    }

    /// Block up to `timeout` for the next answer.
    pub fn wait(&mut self, timeout: Duration) -> Option<String> {
        let text = self.answer_rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(text)
    }

    /// Requests sent but not yet answered.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl Drop for Advisor {
    fn drop(&mut self) {
        self.request_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
