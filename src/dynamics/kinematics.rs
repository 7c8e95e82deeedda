use nalgebra::{Matrix3, Vector3};

// ---------------------------------------------------------------------------
// Cross-product operator and MRP attitude kinematics
// ---------------------------------------------------------------------------

/// Skew-symmetric matrix of `v`, so that `skew(v) * w == v.cross(&w)`.
#[rustfmt::skip]
pub fn skew(v: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -v.z, v.y,
        v.z, 0.0, -v.x,
        -v.y, v.x, 0.0,
    )
}

/// MRP kinematic matrix G(sigma): dsigma/dt = G(sigma) * omega.
pub fn mrp_kinematic_matrix(sigma: &Vector3<f64>) -> Matrix3<f64> {
    let s2 = sigma.norm_squared();
    ((1.0 - s2) * Matrix3::identity() + 2.0 * skew(sigma) + 2.0 * sigma * sigma.transpose()) * 0.25
}

/// Direction cosine matrix R_t^c taking target-frame vectors into the chaser frame.
///
/// The denominator (1 + |sigma|^2)^2 never drops below one, so this is
/// defined for any finite sigma.
pub fn mrp_to_rotation(sigma: &Vector3<f64>) -> Matrix3<f64> {
    let s2 = sigma.norm_squared();
    let den = (1.0 + s2) * (1.0 + s2);
    let s = skew(sigma);
    Matrix3::identity() - (4.0 * (1.0 - s2) / den) * s + (8.0 / den) * (s * s)
}

/// Shadow MRP set, -sigma / |sigma|^2. Describes the same attitude with
/// |sigma| inverted about the unit sphere.
pub fn mrp_shadow(sigma: &Vector3<f64>) -> Vector3<f64> {
    let s2 = sigma.norm_squared();
    if s2 == 0.0 {
        return Vector3::zeros();
    }
    -sigma / s2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn samples() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(0.1, -0.2, 0.3),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(-0.9, 0.05, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.7, -2.2, 0.4),
        ]
    }

    #[test]
    fn skew_matches_cross_product() {
        let w = Vector3::new(-3.0, 0.25, 7.5);
        for v in samples() {
            assert_relative_eq!(skew(&v) * w, v.cross(&w), epsilon = 1e-12);
        }
    }

    #[test]
    fn skew_is_antisymmetric() {
        for v in samples() {
            let s = skew(&v);
            assert_abs_diff_eq!(s + s.transpose(), Matrix3::zeros());
        }
    }

    #[test]
    fn zero_mrp_is_identity() {
        assert_eq!(mrp_to_rotation(&Vector3::zeros()), Matrix3::identity());
    }

    #[test]
    fn rotation_is_orthonormal() {
        for sigma in samples() {
            let r = mrp_to_rotation(&sigma);
            assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-12);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn quarter_turn_about_z() {
        // |sigma| = tan(phi / 4); 90 deg about z -> tan(22.5 deg)
        let sigma = Vector3::new(0.0, 0.0, (std::f64::consts::FRAC_PI_8).tan());
        let r = mrp_to_rotation(&sigma);
        // Frame rotation: target x-axis seen from the chaser frame
        assert_relative_eq!(r * Vector3::x(), Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn shadow_set_same_attitude() {
        for sigma in samples() {
            let shadow = mrp_shadow(&sigma);
            assert_relative_eq!(sigma.norm() * shadow.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(
                mrp_to_rotation(&sigma),
                mrp_to_rotation(&shadow),
                epsilon = 1e-12
            );
        }
        assert_eq!(mrp_shadow(&Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn g_matrix_at_zero_is_quarter_identity() {
        assert_relative_eq!(mrp_kinematic_matrix(&Vector3::zeros()), Matrix3::identity() * 0.25);
    }

    #[test]
    fn g_matrix_identity_relation() {
        // G^T G = ((1 + |sigma|^2) / 4)^2 I
        for sigma in samples() {
            let g = mrp_kinematic_matrix(&sigma);
            let k = (1.0 + sigma.norm_squared()) / 4.0;
            assert_relative_eq!(g.transpose() * g, Matrix3::identity() * (k * k), epsilon = 1e-12);
        }
    }
}
