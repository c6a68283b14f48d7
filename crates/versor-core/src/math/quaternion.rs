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

//! Provides a Quaternion type and the Hamilton algebra over it.
//!
//! A quaternion `w + xi + yj + zk` is stored as four `f64` components. The
//! type tracks no invariant: "unit quaternion" is a transient state produced by
//! [`Quaternion::unit`], and callers are responsible for knowing whether a
//! given value is normalized before treating it as a rotation.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use bincode::{Decode, Encode};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Vec3, AXIS_FALLBACK_THRESHOLD, EPSILON, PARALLEL_THRESHOLD, PI};
use crate::error::MathError;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

/// A 3x3 direction-cosine matrix, indexed as `m[row][column]`.
pub type RotationMatrix = [[f64; 3]; 3];

/// A quaternion `w + xi + yj + zk` with `f64` components.
///
/// Equality is exact and component-wise. For tolerance-based comparison, use
/// the `approx` traits (`relative_eq!`, `abs_diff_eq!`) implemented for this type.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Encode, Decode,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Quaternion {
    /// The scalar (real) part.
    pub w: f64,
    /// The `i` component of the vector part.
    pub x: f64,
    /// The `j` component of the vector part.
    pub y: f64,
    /// The `k` component of the vector part.
    pub z: f64,
}

impl Quaternion {
    /// The zero quaternion, identity element of addition.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion.
    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a quaternion with no vector part, `(w, 0, 0, 0)`.
    #[inline]
    pub const fn scalar(w: f64) -> Self {
        Self::new(w, 0.0, 0.0, 0.0)
    }

    /// Creates a pure quaternion with no scalar part, `(0, x, y, z)`.
    #[inline]
    pub const fn pure(x: f64, y: f64, z: f64) -> Self {
        Self::new(0.0, x, y, z)
    }

    /// Creates a quaternion representing a rotation around `axis` by `angle_radians`.
    ///
    /// The axis is normalized first; a zero axis yields NaN components.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f64) -> Self {
        let axis = axis.normalize();
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    /// Creates a quaternion from the Euler angles `phi` (about X), `theta`
    /// (about Y) and `psi` (about Z), applied in Z-Y-X order.
    ///
    /// Approximate inverse of [`Quaternion::to_euler`] away from gimbal lock.
    pub fn from_euler(phi: f64, theta: f64, psi: f64) -> Self {
        let (sp, cp) = (phi * 0.5).sin_cos();
        let (st, ct) = (theta * 0.5).sin_cos();
        let (ss, cs) = (psi * 0.5).sin_cos();
        Self {
            w: cp * ct * cs + sp * st * ss,
            x: sp * ct * cs - cp * st * ss,
            y: cp * st * cs + sp * ct * ss,
            z: cp * ct * ss - sp * st * cs,
        }
    }

    /// Returns the unit quaternion of the shortest-arc rotation carrying the
    /// direction of `from` onto the direction of `to`.
    ///
    /// Both inputs are normalized first. Nearly parallel inputs return
    /// [`Quaternion::IDENTITY`]. Nearly antiparallel inputs have no unique
    /// rotation axis, so a half-turn about an axis perpendicular to `from` is
    /// returned: `X × from`, or `Y × from` when `from` lies along the X axis.
    /// That half-turn is `from_axis_angle(axis, π)`, i.e. `(cos π/2, axis)`,
    /// whose scalar part is zero up to rounding. `π` is the rotation angle,
    /// never the scalar component.
    pub fn from_two_vectors(from: Vec3, to: Vec3) -> Self {
        let from = from.normalize();
        let to = to.normalize();
        let dot = from.dot(to);

        if dot < -PARALLEL_THRESHOLD {
            let mut axis = Vec3::X.cross(from);
            if axis.length() < AXIS_FALLBACK_THRESHOLD {
                log::trace!("Antiparallel vectors along X; using Y x from as rotation axis");
                axis = Vec3::Y.cross(from);
            }
            log::trace!("Antiparallel vectors; half-turn about {axis:?}");
            return Self::from_axis_angle(axis, PI).unit();
        }

        if dot > PARALLEL_THRESHOLD {
            log::trace!("Parallel vectors; returning identity rotation");
            return Self::IDENTITY;
        }

        let axis = from.cross(to);
        Self::new(1.0 + dot, axis.x, axis.y, axis.z).unit()
    }

    /// Returns the vector (imaginary) part as a [`Vec3`].
    #[inline]
    pub fn vector_part(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Returns the squared norm, `w² + x² + y² + z²`.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the Euclidean norm, `sqrt(w² + x² + y² + z²)`.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Returns the quaternion scaled to unit norm.
    ///
    /// Each component is divided by the norm. The zero quaternion yields NaN
    /// components; see [`Quaternion::try_unit`].
    #[inline]
    pub fn unit(&self) -> Self {
        let k = self.norm();
        Self::new(self.w / k, self.x / k, self.y / k, self.z / k)
    }

    /// Returns the quaternion scaled to unit norm, or an error if its norm is
    /// zero (or underflows to zero) or a component is not finite.
    pub fn try_unit(&self) -> Result<Self, MathError> {
        self.check_invertible()?;
        Ok(self.unit())
    }

    /// Computes the multiplicative inverse, the conjugate divided by the squared norm.
    ///
    /// For a unit quaternion, the inverse is equal to its conjugate. The zero
    /// quaternion yields non-finite components; see [`Quaternion::try_inverse`].
    #[inline]
    pub fn inverse(&self) -> Self {
        let k2 = self.norm_squared();
        let q = self.conjugate();
        Self::new(q.w / k2, q.x / k2, q.y / k2, q.z / k2)
    }

    /// Computes the multiplicative inverse, or an error if the norm is zero
    /// (or underflows to zero) or a component is not finite.
    pub fn try_inverse(&self) -> Result<Self, MathError> {
        self.check_invertible()?;
        Ok(self.inverse())
    }

    fn check_invertible(&self) -> Result<(), MathError> {
        if !self.is_finite() {
            log::debug!("Rejecting non-finite quaternion {self}");
            return Err(MathError::NonFinite);
        }
        if self.norm_squared() == 0.0 {
            log::debug!("Rejecting zero-norm quaternion {self}");
            return Err(MathError::ZeroNorm);
        }
        Ok(())
    }

    /// Computes the four-component dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns `true` if every component is neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Adds any number of quaternions component-wise, left to right.
    ///
    /// An empty sequence yields [`Quaternion::ZERO`].
    pub fn sum<I>(quaternions: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        quaternions.into_iter().fold(Self::ZERO, |acc, q| acc + q)
    }

    /// Multiplies any number of quaternions as `((q1 * q2) * q3) * ...`.
    ///
    /// The Hamilton product is not commutative, so order matters. An empty
    /// sequence yields [`Quaternion::IDENTITY`].
    pub fn product<I>(quaternions: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        quaternions.into_iter().fold(Self::IDENTITY, |acc, q| acc * q)
    }

    /// Returns the Euler angles `(phi, theta, psi)` of the normalized quaternion.
    ///
    /// `phi` and `psi` lie in `[-π, π]`, `theta` in `[-π/2, π/2]`. Near
    /// `theta = ±π/2` several `(phi, psi)` pairs describe the same rotation,
    /// and any of them may be returned.
    pub fn to_euler(&self) -> (f64, f64, f64) {
        let r = self.unit();
        let phi = (2.0 * (r.w * r.x + r.y * r.z)).atan2(1.0 - 2.0 * (r.x * r.x + r.y * r.y));
        // Rounding can push the sine just past ±1.
        let sin_theta = (2.0 * (r.w * r.y - r.z * r.x)).clamp(-1.0, 1.0);
        let theta = sin_theta.asin();
        let psi = (2.0 * (r.x * r.y + r.w * r.z)).atan2(1.0 - 2.0 * (r.y * r.y + r.z * r.z));
        (phi, theta, psi)
    }

    /// Returns the rotation matrix of the normalized quaternion.
    pub fn rotation_matrix(&self) -> RotationMatrix {
        let q = self.unit();
        [
            [
                1.0 - 2.0 * (q.y * q.y + q.z * q.z),
                2.0 * (q.x * q.y - q.w * q.z),
                2.0 * (q.w * q.y + q.x * q.z),
            ],
            [
                2.0 * (q.w * q.z + q.y * q.x),
                1.0 - 2.0 * (q.z * q.z + q.x * q.x),
                2.0 * (q.y * q.z - q.w * q.x),
            ],
            [
                2.0 * (q.z * q.x - q.w * q.y),
                2.0 * (q.w * q.x + q.z * q.y),
                1.0 - 2.0 * (q.x * q.x + q.y * q.y),
            ],
        ]
    }

    /// Rotates a 3D vector with the sandwich product `q * v * conj(q)`.
    ///
    /// The quaternion is not normalized. A non-unit `q` scales the rotated
    /// vector by its squared norm.
    #[inline]
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        Self::product([*self, Self::from(v), self.conjugate()]).vector_part()
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Slerp provides a smooth, constant-speed interpolation between two rotations,
    /// following the shortest path on the surface of a 4D sphere.
    ///
    /// *   `t` - The interpolation factor, clamped to the `[0.0, 1.0]` range.
    pub fn slerp(start: Self, end: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut cos_theta = start.dot(end);
        let mut end_adjusted = end;

        // q and -q are the same rotation; flip one side to take the short way round.
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end_adjusted = -end;
        }

        if cos_theta > 1.0 - EPSILON {
            let result = (start * (1.0 - t)) + (end_adjusted * t);
            result.unit()
        } else {
            let angle = cos_theta.acos();
            let sin_theta_inv = 1.0 / angle.sin();
            let scale_start = ((1.0 - t) * angle).sin() * sin_theta_inv;
            let scale_end = (t * angle).sin() * sin_theta_inv;
            (start * scale_start) + (end_adjusted * scale_end)
        }
    }
}

// --- Conversions ---

impl From<Vec3> for Quaternion {
    /// Embeds a vector as a pure quaternion.
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::pure(v.x, v.y, v.z)
    }
}

impl From<[f64; 4]> for Quaternion {
    /// Builds a quaternion from `[w, x, y, z]`.
    #[inline]
    fn from([w, x, y, z]: [f64; 4]) -> Self {
        Self::new(w, x, y, z)
    }
}

impl From<Quaternion> for [f64; 4] {
    #[inline]
    fn from(q: Quaternion) -> Self {
        [q.w, q.x, q.y, q.z]
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i + {}j + {}k", self.w, self.x, self.y, self.z)
    }
}

// --- Operator Overloads ---

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Computes the Hamilton product.
    /// Note that quaternion multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            z: self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
        }
    }
}

impl MulAssign<Quaternion> for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion, see [`Quaternion::rotate_vec3`].
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vec3(rhs)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f64) -> Self::Output {
        Self::new(
            self.w * scalar,
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
        )
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.w - rhs.w,
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
        )
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components of the quaternion.
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Sum for Quaternion {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, q| acc + q)
    }
}

impl<'a> Sum<&'a Quaternion> for Quaternion {
    fn sum<I: Iterator<Item = &'a Quaternion>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, q| acc + *q)
    }
}

impl Product for Quaternion {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, q| acc * q)
    }
}

impl<'a> Product<&'a Quaternion> for Quaternion {
    fn product<I: Iterator<Item = &'a Quaternion>>(iter: I) -> Self {
        iter.fold(Self::IDENTITY, |acc, q| acc * *q)
    }
}

// --- Tolerance Comparisons ---

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl UlpsEq for Quaternion {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.w.ulps_eq(&other.w, epsilon, max_ulps)
            && self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
    }
}
