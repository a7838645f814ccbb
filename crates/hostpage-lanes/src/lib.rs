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

//! # Hostpage Lanes
//!
//! The "Data Plane" of asset activation: each lane turns one kind of asset
//! into document nodes, in input order, at the session's resolved injection
//! target. Lanes hold no session state; the per-session bookkeeping lives in
//! [`wave::WaveState`], owned by the orchestrator.

#![warn(missing_docs)]

pub mod script_lane;
pub mod style_lane;
pub mod wave;

pub use script_lane::{InlineScriptLane, LinkedScriptLane, LoadObserver};
pub use style_lane::StyleLane;
pub use wave::{WaveProgress, WaveState};
