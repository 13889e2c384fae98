//! Simulated server links.
//!
//! Every in-memory repository is bound to the link of the system it belongs
//! to (`ETOUR` or `SMOS`). While a link is down every repository call fails
//! with [`RepositoryError::ConnectionInterrupted`] before touching any data.
//! Reconnecting is a manual flag flip; there is no retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::config::SimulationSettings;
use crate::infrastructure::metrics;
use crate::shared::error::RepositoryError;

pub const ETOUR: &str = "ETOUR";
pub const SMOS: &str = "SMOS";

#[derive(Debug, Clone, Copy)]
struct Behaviour {
    latency: Duration,
    failure_rate: f64,
}

#[derive(Debug)]
struct LinkState {
    connected: AtomicBool,
    behaviour: RwLock<Behaviour>,
}

/// Handle on one simulated server. Cloning shares the same state.
#[derive(Debug, Clone)]
pub struct ServerLink {
    name: &'static str,
    state: Arc<LinkState>,
}

impl ServerLink {
    pub fn new(name: &'static str, connected: bool) -> Self {
        Self::with_behaviour(name, connected, Duration::ZERO, 0.0)
    }

    /// `failure_rate` is clamped to 0.0..=1.0.
    pub fn with_behaviour(
        name: &'static str,
        connected: bool,
        latency: Duration,
        failure_rate: f64,
    ) -> Self {
        let link = Self {
            name,
            state: Arc::new(LinkState {
                connected: AtomicBool::new(connected),
                behaviour: RwLock::new(Behaviour {
                    latency: Duration::ZERO,
                    failure_rate: 0.0,
                }),
            }),
        };
        link.configure(latency, failure_rate);
        link
    }

    /// Change latency and random failure rate (clamped to 0.0..=1.0).
    pub fn configure(&self, latency: Duration, failure_rate: f64) {
        *self.state.behaviour.write() = Behaviour {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        };
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected.load(Ordering::SeqCst)
    }

    pub fn disconnect(&self) {
        self.state.connected.store(false, Ordering::SeqCst);
        tracing::warn!(server = self.name, "Server link interrupted");
    }

    pub fn reconnect(&self) {
        self.state.connected.store(true, Ordering::SeqCst);
        tracing::info!(server = self.name, "Server link restored");
    }

    pub fn set_connected(&self, connected: bool) {
        if connected {
            self.reconnect();
        } else {
            self.disconnect();
        }
    }

    /// Gate run at the start of every repository call.
    pub async fn check(&self) -> Result<(), RepositoryError> {
        let behaviour = *self.state.behaviour.read();
        if !behaviour.latency.is_zero() {
            tokio::time::sleep(behaviour.latency).await;
        }

        let dropped =
            behaviour.failure_rate > 0.0 && rand::random::<f64>() < behaviour.failure_rate;

        if !self.is_connected() || dropped {
            metrics::record_connection_failure(self.name);
            tracing::debug!(server = self.name, dropped, "Repository call refused");
            return Err(RepositoryError::ConnectionInterrupted { server: self.name });
        }
        Ok(())
    }
}

/// The two simulated servers of the desk.
#[derive(Debug, Clone)]
pub struct ServerLinks {
    pub etour: ServerLink,
    pub smos: ServerLink,
}

impl ServerLinks {
    /// Bring both links to the configured state. Seeding runs on connected
    /// links first and applies the configuration afterwards.
    pub fn apply(&self, settings: &SimulationSettings) {
        let latency = Duration::from_millis(settings.latency_ms);
        for (link, connected) in [
            (&self.etour, settings.etour_connected),
            (&self.smos, settings.smos_connected),
        ] {
            link.configure(latency, settings.failure_rate);
            if link.is_connected() != connected {
                link.set_connected(connected);
            }
        }
    }

    /// Both links up, no latency, no random failures.
    pub fn connected() -> Self {
        Self {
            etour: ServerLink::new(ETOUR, true),
            smos: ServerLink::new(SMOS, true),
        }
    }

    /// Look a link up by its server name, case-insensitive.
    pub fn get(&self, server: &str) -> Option<&ServerLink> {
        if server.eq_ignore_ascii_case(ETOUR) {
            Some(&self.etour)
        } else if server.eq_ignore_ascii_case(SMOS) {
            Some(&self.smos)
        } else {
            None
        }
    }
}
