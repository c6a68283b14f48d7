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

use approx::assert_relative_eq;
use versor_core::math::{EPSILON, FRAC_PI_2, PI};
use versor_core::{Quaternion, RotationMatrix, Vec3};

fn transpose(m: &RotationMatrix) -> RotationMatrix {
    let mut t = [[0.0; 3]; 3];
    for (i, row) in m.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            t[j][i] = *value;
        }
    }
    t
}

fn mat_mul(a: &RotationMatrix, b: &RotationMatrix) -> RotationMatrix {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn mat_vec(m: &RotationMatrix, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

fn sample_angles() -> impl Iterator<Item = (f64, f64, f64)> {
    let steps = [-3.0, -1.7, -0.4, 0.0, 0.9, 2.2, 3.0];
    let pitches = [-1.4, -0.8, -0.1, 0.0, 0.5, 1.2, 1.4];
    steps.into_iter().flat_map(move |phi| {
        pitches
            .into_iter()
            .flat_map(move |theta| steps.into_iter().map(move |psi| (phi, theta, psi)))
    })
}

#[test]
fn test_euler_round_trip_away_from_gimbal_lock() {
    for (phi, theta, psi) in sample_angles() {
        let (p, t, s) = Quaternion::from_euler(phi, theta, psi).to_euler();
        assert_relative_eq!(p, phi, epsilon = EPSILON);
        assert_relative_eq!(t, theta, epsilon = EPSILON);
        assert_relative_eq!(s, psi, epsilon = EPSILON);
    }
}

#[test]
fn test_from_euler_is_unit() {
    for (phi, theta, psi) in sample_angles() {
        assert_relative_eq!(
            Quaternion::from_euler(phi, theta, psi).norm(),
            1.0,
            epsilon = EPSILON
        );
    }
}

#[test]
fn test_euler_at_gimbal_lock_stays_finite() {
    // At theta = pi/2 phi and psi are not individually recoverable, but the
    // clamped arcsine must still yield a finite pitch.
    let q = Quaternion::from_euler(0.3, FRAC_PI_2, -0.2);
    let (phi, theta, psi) = q.to_euler();
    assert!(phi.is_finite() && theta.is_finite() && psi.is_finite());
    assert_relative_eq!(theta, FRAC_PI_2, epsilon = EPSILON);
}

#[test]
fn test_rotation_matrix_is_orthogonal() {
    let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    for (phi, theta, psi) in sample_angles() {
        let m = Quaternion::from_euler(phi, theta, psi).rotation_matrix();
        let product = mat_mul(&m, &transpose(&m));
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(product[i][j], identity[i][j], epsilon = EPSILON);
            }
        }
    }
}

#[test]
fn test_rotation_matrix_agrees_with_rotate_vec3() {
    let v = Vec3::new(1.5, -0.25, 2.0);
    for (phi, theta, psi) in sample_angles() {
        let q = Quaternion::from_euler(phi, theta, psi);
        assert_relative_eq!(mat_vec(&q.rotation_matrix(), v), q.rotate_vec3(v), epsilon = EPSILON);
    }
}

#[test]
fn test_rotation_matrix_normalizes_input() {
    let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, -1.0), 0.8);
    let scaled = (q * 7.5).rotation_matrix();
    let unit = q.rotation_matrix();
    for i in 0..3 {
        for j in 0..3 {
            assert_relative_eq!(scaled[i][j], unit[i][j], epsilon = EPSILON);
        }
    }
}

#[test]
fn test_rotation_composition_matches_product_order() {
    let first = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
    let second = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);
    let v = Vec3::Z;

    let stepwise = v.rotate(first).rotate(second);
    let combined = Quaternion::product([second, first]).rotate_vec3(v);
    assert_relative_eq!(stepwise, Vec3::X, epsilon = EPSILON);
    assert_relative_eq!(combined, stepwise, epsilon = EPSILON);
}

#[test]
fn test_from_two_vectors_carries_from_onto_to() {
    let vectors = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        Vec3::new(0.0, 0.0, -3.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-0.3, 0.8, 2.5),
        Vec3::new(4.0, -1.0, 0.5),
    ];
    for from in vectors {
        for to in vectors {
            let q = Quaternion::from_two_vectors(from, to);
            assert_relative_eq!(q.norm(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(q.rotate_vec3(from.normalize()), to.normalize(), epsilon = EPSILON);
        }
    }
}

#[test]
fn test_from_two_vectors_reference_case() {
    let q = Quaternion::from_two_vectors(Vec3::Z, Vec3::new(0.0, -1.0, 0.0));
    assert_relative_eq!(q.rotate_vec3(Vec3::Z), Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
}

#[test]
fn test_from_two_vectors_antiparallel_is_half_turn() {
    for from in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, -2.0, 0.5)] {
        let q = Quaternion::from_two_vectors(from, -from * 2.0);
        assert_relative_eq!(q.w, 0.0, epsilon = EPSILON);
        assert_relative_eq!(q.vector_part().dot(from), 0.0, epsilon = EPSILON);
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        assert_relative_eq!(angle, PI, epsilon = EPSILON);
        assert_relative_eq!(q.rotate_vec3(from), -from, epsilon = EPSILON);
    }
}

#[test]
fn test_from_two_vectors_same_direction_is_identity() {
    let v = Vec3::new(0.3, -0.4, 1.2);
    assert_eq!(Quaternion::from_two_vectors(v, v), Quaternion::IDENTITY);
    assert_eq!(Quaternion::from_two_vectors(v, v * 10.0), Quaternion::IDENTITY);
}

#[test]
fn test_operations_are_thread_safe() {
    let q = Quaternion::from_euler(0.4, -0.2, 1.1);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let v = Vec3::new(i as f64, 1.0, -2.0);
                q.rotate_vec3(v)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let expected = q.rotate_vec3(Vec3::new(i as f64, 1.0, -2.0));
        let rotated = handle.join().expect("rotation thread panicked");
        assert_eq!(rotated, expected);
    }
}
