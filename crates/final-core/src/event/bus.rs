// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A generic, unbounded event channel.
///
/// Producers keep a [`flume::Sender`] obtained through [`EventBus::sender`];
/// the owner of the bus drains pending events once per frame with
/// [`EventBus::drain`]. Events are delivered in publication order.
#[derive(Debug, Clone)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    ///
    /// ## Returns
    /// An empty bus. Clones of it share the same channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::trace!("EventBus<{}> created.", std::any::type_name::<T>());
        Self { sender, receiver }
    }

    /// Publishes an event, logging an error if the channel is disconnected.
    ///
    /// ## Arguments
    /// * `event` - The event to queue. It is delivered after every event
    ///   published before it.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to publish event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    ///
    /// ## Returns
    /// A `flume::Sender<T>` that producers can keep without holding the bus.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a reference to the receiver end of the channel.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every pending event without blocking.
    ///
    /// ## Returns
    /// The pending events in publication order. Empty if nothing was queued.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Number of events waiting to be drained.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
