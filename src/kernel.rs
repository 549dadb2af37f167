//! SPH smoothing kernels. Both take `(support_radius, dist)`, in that order.
//!
//! The density kernel and the pressure-gradient kernel are deliberately different shapes: the
//! gradient comes from a spiky kernel, whose derivative doesn't vanish as `dist -> 0`. This keeps
//! close particles from clumping.

use std::f64::consts::PI;

/// Density kernel: `15 / (π h⁶) · (h - r)³` inside the support, 0 outside.
pub fn density_kernel(support_radius: f64, dist: f64) -> f64 {
    if dist > support_radius {
        return 0.;
    }

    let norm = 15. / (PI * support_radius.powi(6));
    norm * (support_radius - dist).powi(3)
}

/// Radial derivative of the spiky kernel: `-45 / (π h⁶) · (h - r)²` inside the support, 0 outside.
/// Always ≤ 0; callers supply the direction.
pub fn density_kernel_gradient(support_radius: f64, dist: f64) -> f64 {
    if dist > support_radius {
        return 0.;
    }

    let norm = -45. / (PI * support_radius.powi(6));
    norm * (support_radius - dist).powi(2)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn closed_form() {
        let expected = 15. / (PI * 64.) * 8.;
        assert!((density_kernel(2., 0.) - expected).abs() < 1e-15);

        let expected = -45. / (PI * 64.);
        assert!((density_kernel_gradient(2., 1.) - expected).abs() < 1e-15);
    }

    #[test]
    fn zero_at_support_edge() {
        assert_eq!(density_kernel(1.5, 1.5), 0.);
        assert_eq!(density_kernel_gradient(1.5, 1.5), 0.);
    }

    proptest! {
        #[test]
        fn zero_outside_support(h in 0.01f64..100., extra in 1e-9f64..1e3) {
            prop_assert_eq!(density_kernel(h, h + extra), 0.);
            prop_assert_eq!(density_kernel_gradient(h, h + extra), 0.);
        }

        #[test]
        fn positive_and_non_increasing_inside(h in 0.01f64..100., a in 0f64..0.999, b in 0f64..0.999) {
            let (near, far) = if a <= b { (a * h, b * h) } else { (b * h, a * h) };
            let w_near = density_kernel(h, near);
            let w_far = density_kernel(h, far);
            prop_assert!(w_far > 0.);
            prop_assert!(w_near >= w_far);
        }

        #[test]
        fn gradient_never_positive(h in 0.01f64..100., t in 0f64..2.) {
            prop_assert!(density_kernel_gradient(h, t * h) <= 0.);
        }
    }
}
