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

//! Completion bookkeeping of a single wave.

use hostpage_core::session::WaveKind;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Result of recording a completion on a [`WaveState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveProgress {
    /// More completions are needed.
    Pending {
        /// Completions recorded so far.
        completed: usize,
        /// Completions required.
        total: usize,
    },
    /// This completion closed the wave. Returned exactly once per wave.
    Completed,
    /// The wave had already signaled or was abandoned; the completion was ignored.
    AlreadySignaled,
}

/// Counters of one wave of a render session.
///
/// The total is fixed at construction. `completed` never exceeds `total`, and
/// `signaled` flips from `false` to `true` exactly once. All operations are
/// lock-free so load callbacks can record from any thread.
#[derive(Debug)]
pub struct WaveState {
    kind: WaveKind,
    total: usize,
    injected: AtomicUsize,
    completed: AtomicUsize,
    signaled: AtomicBool,
}

impl WaveState {
    /// Creates a wave expecting `total` completions.
    pub fn new(kind: WaveKind, total: usize) -> Self {
        Self {
            kind,
            total,
            injected: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            signaled: AtomicBool::new(false),
        }
    }

    /// Records that one unit of the wave was inserted into the document.
    ///
    /// ## Returns
    /// The number of insertions recorded so far.
    pub fn record_injection(&self) -> usize {
        self.injected.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Records one completion and reports whether it closed the wave.
    pub fn record_completion(&self) -> WaveProgress {
        if self.signaled.load(Ordering::Acquire) {
            return WaveProgress::AlreadySignaled;
        }

        let total = self.total;
        let completed = match self
            .completed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| {
                (c < total).then_some(c + 1)
            }) {
            Ok(previous) => previous + 1,
            // Already full: the completion that filled it owns the signal.
            Err(_) => return WaveProgress::AlreadySignaled,
        };

        if completed < total {
            WaveProgress::Pending { completed, total }
        } else if self.try_signal() {
            WaveProgress::Completed
        } else {
            // Abandoned while the last unit was loading.
            WaveProgress::AlreadySignaled
        }
    }

    /// Closes the wave without signaling it.
    ///
    /// Shares the at-most-once flag with the signal: once this returns
    /// `true`, no completion can close the wave anymore; once the wave
    /// signaled, it can no longer be abandoned.
    ///
    /// ## Returns
    /// `true` if this call closed the wave.
    pub fn abandon(&self) -> bool {
        self.try_signal()
    }

    /// Closes an empty wave.
    ///
    /// ## Returns
    /// `true` if the wave has no unit and this call signaled it.
    pub fn signal_if_empty(&self) -> bool {
        self.total == 0 && self.try_signal()
    }

    fn try_signal(&self) -> bool {
        self.signaled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// The wave this state tracks.
    pub fn kind(&self) -> WaveKind {
        self.kind
    }

    /// Number of completions required.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of insertions recorded.
    pub fn injected(&self) -> usize {
        self.injected.load(Ordering::Acquire)
    }

    /// Number of completions recorded.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Whether the wave signaled.
    pub fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::Acquire)
    }
}
