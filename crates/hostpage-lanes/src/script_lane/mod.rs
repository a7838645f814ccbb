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

//! Script injection lanes.
//!
//! Scripts are activated in two waves:
//! 1. [`LinkedScriptLane`] inserts every linked script at once and reports each
//!    load to a [`LoadObserver`].
//! 2. [`InlineScriptLane`] inserts the inline scripts, once the caller decided
//!    the first wave is complete.

mod inline;
mod linked;

pub use inline::InlineScriptLane;
pub use linked::{LinkedScriptLane, LoadObserver};
