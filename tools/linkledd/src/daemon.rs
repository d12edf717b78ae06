//! One step of the daemon's polling loop.

use std::time::Duration;

use linkled::{BlinkSpec, ConnectivityEvent, EventBus, Indicator, SharedLinkStatus};
use tracing::trace;

use crate::watcher::StatusWatcher;

/// What one [`tick`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tick {
    /// Events published, in order.
    pub published: Vec<ConnectivityEvent>,
    /// At least one link-lost burst was played.
    pub blinked: bool,
}

impl Tick {
    /// Time to wait before the next poll.
    ///
    /// A burst ends with the indicator on for one interval, so the burst time
    /// counts against the poll period and back-to-back bursts keep an even
    /// off/on rhythm.
    pub fn idle(&self, poll: Duration, link_lost: BlinkSpec) -> Duration {
        if self.blinked {
            poll.saturating_sub(link_lost.duration())
        } else {
            poll
        }
    }
}

/// Polls the status file once and publishes the resulting events.
///
/// Bursts are finite, so while the link stays down and the indicator is
/// usable a `ConnectedStateChanged` is re-published on every quiet poll.
pub fn tick(
    watcher: &mut StatusWatcher,
    bus: &EventBus,
    link: &SharedLinkStatus,
    indicator: &dyn Indicator,
) -> Tick {
    let mut published = watcher.poll();
    let link_down = !link.get();
    if published.is_empty() && link_down && indicator.is_ready() {
        trace!("link still down, repeating burst");
        published.push(ConnectivityEvent::ConnectedStateChanged);
    }

    let mut handled = false;
    for &event in &published {
        let report = bus.publish(event);
        handled |= report.delivered > 0 && report.is_ok();
    }

    Tick {
        blinked: handled && link_down,
        published,
    }
}
