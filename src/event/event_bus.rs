// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting fleet events.

use tokio::sync::broadcast;

use super::FleetEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcasts fleet events to any number of subscribers.
///
/// Built on tokio's broadcast channel: each subscriber receives its own
/// copy of every event published after it subscribed. If a slow subscriber
/// lets the channel fill up, it loses the oldest events and sees a
/// `RecvError::Lagged` on the next receive.
///
/// # Examples
///
/// ```
/// use valvr_lib::event::{EventBus, FleetEvent};
/// use valvr_lib::types::ValveId;
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
/// bus.publish(FleetEvent::created(ValveId::new(1)));
/// ```
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<FleetEvent>,
}

impl EventBus {
    /// Creates an event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates an event bus buffering up to `capacity` events per
    /// subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to fleet events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FleetEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// With no subscribers the event is silently discarded.
    pub fn publish(&self, event: FleetEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
