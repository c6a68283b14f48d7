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

//! # Versor Core
//!
//! Quaternion arithmetic over `f64`: the Hamilton algebra, Euler-angle and
//! rotation-matrix conversions, 3D vector rotation and shortest-arc rotation
//! between two vectors.
//!
//! Every operation is pure and works on `Copy` value types, so the crate can be
//! used from any number of threads without coordination.

#![warn(missing_docs)]

pub mod error;
pub mod math;

pub use error::MathError;
pub use math::{Quaternion, RotationMatrix, Vec3};
