//! In-process connectivity event bus.
//!
//! Handlers subscribe explicitly per event kind. `publish` runs every matching
//! handler synchronously and in subscription order. A failing handler is
//! logged and counted; delivery to the remaining handlers continues.

use std::sync::Arc;

use log::{trace, warn};

use crate::error::DriverError;
use crate::event::ConnectivityEvent;

/// Receiver of connectivity events.
pub trait EventHandler: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &str {
        "handler"
    }

    fn on_event(&self, event: ConnectivityEvent) -> Result<(), DriverError>;
}

pub type HandlerRef = Arc<dyn EventHandler>;

/// Outcome of one `publish`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub errors: Vec<DriverError>,
}

impl DispatchReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Subscription table plus synchronous dispatch.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<(ConnectivityEvent, HandlerRef)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: ConnectivityEvent, handler: HandlerRef) {
        trace!("{} subscribed to {kind}", handler.name());
        self.subscriptions.push((kind, handler));
    }

    pub fn subscriber_count(&self, kind: ConnectivityEvent) -> usize {
        self.subscriptions.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn publish(&self, event: ConnectivityEvent) -> DispatchReport {
        let mut report = DispatchReport::default();
        for (_, handler) in self.subscriptions.iter().filter(|(k, _)| *k == event) {
            report.delivered += 1;
            if let Err(err) = handler.on_event(event) {
                warn!("{} failed to handle {event}: {err}", handler.name());
                report.errors.push(err);
            }
        }
        if report.delivered == 0 {
            trace!("no subscribers for {event}");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Collector {
        events: Mutex<Vec<ConnectivityEvent>>,
        fail: bool,
    }

    impl EventHandler for Collector {
        fn on_event(&self, event: ConnectivityEvent) -> Result<(), DriverError> {
            self.events.lock().unwrap().push(event);
            if self.fail {
                Err(DriverError::ResourceNotReady)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn delivers_only_subscribed_kinds() {
        let collector = Arc::new(Collector::default());
        let mut bus = EventBus::new();
        bus.subscribe(ConnectivityEvent::ActiveProfileChanged, collector.clone());

        let report = bus.publish(ConnectivityEvent::ConnectedStateChanged);
        assert_eq!(report.delivered, 0);

        let report = bus.publish(ConnectivityEvent::ActiveProfileChanged);
        assert_eq!(report.delivered, 1);
        assert!(report.is_ok());

        let events = collector.events.lock().unwrap();
        assert_eq!(*events, vec![ConnectivityEvent::ActiveProfileChanged]);
    }

    #[test]
    fn failing_handler_does_not_stop_delivery() {
        let failing = Arc::new(Collector {
            fail: true,
            ..Default::default()
        });
        let healthy = Arc::new(Collector::default());
        let mut bus = EventBus::new();
        bus.subscribe(ConnectivityEvent::ConnectedStateChanged, failing.clone());
        bus.subscribe(ConnectivityEvent::ConnectedStateChanged, healthy.clone());

        let report = bus.publish(ConnectivityEvent::ConnectedStateChanged);

        assert_eq!(report.delivered, 2);
        assert_eq!(report.errors, vec![DriverError::ResourceNotReady]);
        assert_eq!(healthy.events.lock().unwrap().len(), 1);
        assert_eq!(bus.subscriber_count(ConnectivityEvent::ConnectedStateChanged), 2);
    }
}
