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

//! Error type for the failable variants of the normalizing operations.
//!
//! The default operations (`unit`, `inverse`, `normalize`) never fail: a zero
//! input silently produces non-finite components. The `try_*` variants return
//! one of these errors instead.

use thiserror::Error;

/// An error raised by a failable math operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// The quaternion has a zero norm, so it cannot be normalized or inverted.
    #[error("quaternion has zero norm")]
    ZeroNorm,
    /// The vector has a zero length, so it cannot be normalized.
    #[error("vector has zero length")]
    ZeroLength,
    /// The input already contains NaN or infinite components.
    #[error("input contains non-finite components")]
    NonFinite,
}
