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

//! Provides the quaternion and 3D vector primitives.
//!
//! All values are `f64`. All angular functions in this module operate in **radians**.
//!
//! Normalizing operations never raise: a zero-length input yields NaN or
//! infinite components. Use the `try_*` variants or [`Quaternion::is_finite`]
//! when the input may be degenerate.

// --- Fundamental Constants ---

/// The default tolerance for floating-point comparisons.
pub const EPSILON: f64 = 1e-6;

/// Dot product beyond which two unit vectors are treated as parallel
/// (or, negated, antiparallel) by [`Quaternion::from_two_vectors`].
pub const PARALLEL_THRESHOLD: f64 = 0.999_999;

/// Minimum length of the candidate axis in the antiparallel branch of
/// [`Quaternion::from_two_vectors`] before falling back to the Y axis.
pub const AXIS_FALLBACK_THRESHOLD: f64 = 1e-6;

// Re-export standard mathematical constants for convenience.
pub use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

// --- Declare Sub-Modules ---

pub mod quaternion;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::quaternion::{Quaternion, RotationMatrix};
pub use self::vector::Vec3;
