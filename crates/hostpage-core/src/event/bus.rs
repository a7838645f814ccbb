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

use std::sync::{Mutex, MutexGuard, PoisonError};

/// An event that can travel on a [`SignalBus`].
pub trait BusEvent: Clone + Send + Sync + 'static {
    /// The name listeners use to select the event.
    fn event_name(&self) -> &str;
}

type OnceCallback<T> = Box<dyn FnOnce(T) + Send + 'static>;

enum Listener<T> {
    /// Receives every event until the receiver is dropped.
    Channel(flume::Sender<T>),
    /// Receives the first event named `name`, then is removed.
    Once {
        name: String,
        callback: OnceCallback<T>,
    },
}

/// A generic, thread-safe, multi-subscriber broadcast channel.
///
/// Unlike a plain MPSC channel, every subscriber gets its own copy of each
/// published event. Subscribers never need to unsubscribe: channel receivers
/// are pruned once dropped, and `once` listeners are removed after firing.
pub struct SignalBus<T: BusEvent> {
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T: BusEvent> SignalBus<T> {
    /// Creates a bus without listeners.
    pub fn new() -> Self {
        log::debug!("SignalBus initialized.");
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<Listener<T>>> {
        // A panicking listener cannot leave the list half-updated.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to every future event.
    ///
    /// ## Returns
    /// The receiving end of an unbounded channel owned by the subscriber.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        self.listeners().push(Listener::Channel(sender));
        receiver
    }

    /// Registers a callback fired by the next event named `name`, then removed.
    ///
    /// Events published before the registration are not replayed.
    pub fn once<F>(&self, name: impl Into<String>, callback: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.listeners().push(Listener::Once {
            name: name.into(),
            callback: Box::new(callback),
        });
    }

    /// Broadcasts `event` to every listener.
    ///
    /// `once` callbacks run after the listener list is released, so a
    /// callback may itself publish or subscribe.
    ///
    /// ## Returns
    /// The number of listeners the event was delivered to.
    pub fn publish(&self, event: T) -> usize {
        log::trace!("Publishing '{}'.", event.event_name());

        let mut fired = Vec::new();
        let mut delivered = 0;
        {
            let mut listeners = self.listeners();
            let mut kept = Vec::with_capacity(listeners.len());
            for listener in listeners.drain(..) {
                match listener {
                    Listener::Channel(sender) => {
                        if sender.send(event.clone()).is_ok() {
                            delivered += 1;
                            kept.push(Listener::Channel(sender));
                        } else {
                            log::trace!("Pruning a dropped subscriber.");
                        }
                    }
                    Listener::Once { name, callback } if name == event.event_name() => {
                        fired.push(callback);
                    }
                    other => kept.push(other),
                }
            }
            *listeners = kept;
        }

        delivered += fired.len();
        for callback in fired {
            callback(event.clone());
        }
        delivered
    }

    /// Returns the number of registered listeners, dropped subscribers included
    /// until the next publication.
    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }
}

impl<T: BusEvent> Default for SignalBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BusEvent> std::fmt::Debug for SignalBus<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
