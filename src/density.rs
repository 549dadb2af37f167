//! Density field estimation, by brute-force summation over every particle.

use crate::{kernel::density_kernel, vec2::Vec2};

/// Density at `sample_pt`, from all particles at `posits`, each of mass `mass`. Includes the
/// particle located at the sample point itself, if any.
pub fn estimate_density(sample_pt: Vec2, posits: &[Vec2], mass: f64, support_radius: f64) -> f64 {
    let mut result = 0.;

    for posit in posits {
        let dist = (*posit - sample_pt).magnitude();
        result += mass * density_kernel(support_radius, dist);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_contribution() {
        let posits = [Vec2::new(3., 4.)];
        let d = estimate_density(posits[0], &posits, 2., 1.);
        assert_eq!(d, 2. * density_kernel(1., 0.));
    }

    #[test]
    fn pair() {
        let posits = [Vec2::new(0., 0.), Vec2::new(1., 0.)];
        let d = estimate_density(posits[0], &posits, 1., 2.);
        let expected = density_kernel(2., 0.) + density_kernel(2., 1.);
        assert!((d - expected).abs() < 1e-15);
    }

    #[test]
    fn uses_euclidean_distance() {
        // A neighbor on the diagonal at distance 5 must fall outside a support of 4.9, and inside
        // one of 5.1.
        let posits = [Vec2::new(3., 4.)];
        assert_eq!(estimate_density(Vec2::new_zero(), &posits, 1., 4.9), 0.);
        assert!(estimate_density(Vec2::new_zero(), &posits, 1., 5.1) > 0.);
    }

    #[test]
    fn empty_neighborhood() {
        let posits = [Vec2::new(100., 100.)];
        assert_eq!(estimate_density(Vec2::new_zero(), &posits, 1., 1.), 0.);
    }
}
