//! Connectivity listener.
//!
//! Turns every connectivity event into exactly one indicator call: steady on
//! while the link is up, one blink burst while it is down. Continuous blinking
//! is left to whoever publishes the events; it can simply keep re-publishing
//! while the link stays down.

use std::sync::Arc;

use log::{debug, warn};

use crate::bus::{EventBus, EventHandler, HandlerRef};
use crate::error::DriverError;
use crate::event::ConnectivityEvent;
use crate::indicator::{BlinkSpec, Indicator, IndicatorState};
use crate::status::ConnectivityStatus;

/// Maps connectivity events onto an [`Indicator`].
pub struct ConnectivityListener<I, S> {
    indicator: Arc<I>,
    status: S,
    link_lost: BlinkSpec,
}

impl<I: Indicator, S: ConnectivityStatus> ConnectivityListener<I, S> {
    /// `link_lost` is the burst played for each event while disconnected.
    pub fn new(indicator: Arc<I>, status: S, link_lost: BlinkSpec) -> Self {
        Self {
            indicator,
            status,
            link_lost,
        }
    }

    pub fn link_lost_burst(&self) -> BlinkSpec {
        self.link_lost
    }

    /// Re-reads the live status and updates the indicator.
    ///
    /// Driver errors are returned unchanged; nothing is retried here.
    pub fn on_event(&self, event: ConnectivityEvent) -> Result<(), DriverError> {
        let connected = self.status.current_connected_status();
        debug!("{event}: link {}", if connected { "up" } else { "down" });

        // The port may have degraded since boot.
        if !self.indicator.is_ready() {
            warn!("{event}: indicator not ready");
            return Err(DriverError::ResourceNotReady);
        }

        if connected {
            self.indicator.set(IndicatorState::On)
        } else {
            self.indicator.blink(self.link_lost)
        }
    }
}

impl<I, S> ConnectivityListener<I, S>
where
    I: Indicator + 'static,
    S: ConnectivityStatus + 'static,
{
    /// Subscribes the listener to every [`ConnectivityEvent`] kind.
    pub fn register(self: &Arc<Self>, bus: &mut EventBus) {
        for kind in ConnectivityEvent::ALL {
            bus.subscribe(kind, Arc::clone(self) as HandlerRef);
        }
    }
}

impl<I: Indicator, S: ConnectivityStatus> EventHandler for ConnectivityListener<I, S> {
    fn name(&self) -> &str {
        "connectivity-listener"
    }

    fn on_event(&self, event: ConnectivityEvent) -> Result<(), DriverError> {
        ConnectivityListener::on_event(self, event)
    }
}
