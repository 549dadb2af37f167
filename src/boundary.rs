//! Reflects particles off the walls of the rectangular domain.

use crate::vec2::Vec2;

/// Clamp one coordinate into `[radius, bound - radius]`, reversing and scaling its velocity
/// component on contact.
fn resolve_axis(posit: &mut f64, vel: &mut f64, radius: f64, bound: f64, restitution: f64) {
    if *posit - radius < 0. {
        *posit = radius;
        *vel = -*vel * restitution;
    }
    if *posit + radius > bound {
        *posit = bound - radius;
        *vel = -*vel * restitution;
    }
}

/// Each axis is handled independently; a wall only affects the velocity component normal to it.
pub fn resolve_boundary(
    posit: &mut Vec2,
    vel: &mut Vec2,
    radius: f64,
    bounds: (f64, f64),
    restitution: f64,
) {
    resolve_axis(&mut posit.x, &mut vel.x, radius, bounds.0, restitution);
    resolve_axis(&mut posit.y, &mut vel.y, radius, bounds.1, restitution);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f64 = 10.;
    const BOUNDS: (f64, f64) = (200., 100.);

    #[test]
    fn floor_bounce() {
        let mut posit = Vec2::new(50., RADIUS - 1.);
        let mut vel = Vec2::new(3., -5.);

        resolve_boundary(&mut posit, &mut vel, RADIUS, BOUNDS, 0.8);

        assert_eq!(posit.y, RADIUS);
        assert_eq!(vel.y, 4.0);
        assert_eq!(posit.x, 50.);
        assert_eq!(vel.x, 3.);
    }

    #[test]
    fn far_walls() {
        let mut posit = Vec2::new(BOUNDS.0 - 2., BOUNDS.1 + 4.);
        let mut vel = Vec2::new(2., 6.);

        resolve_boundary(&mut posit, &mut vel, RADIUS, BOUNDS, 1.);

        assert_eq!(posit, Vec2::new(BOUNDS.0 - RADIUS, BOUNDS.1 - RADIUS));
        assert_eq!(vel, Vec2::new(-2., -6.));
    }

    #[test]
    fn inside_untouched() {
        let mut posit = Vec2::new(100., 50.);
        let mut vel = Vec2::new(-7., 7.);

        resolve_boundary(&mut posit, &mut vel, RADIUS, BOUNDS, 0.5);

        assert_eq!(posit, Vec2::new(100., 50.));
        assert_eq!(vel, Vec2::new(-7., 7.));
    }

    #[test]
    fn inelastic_stops() {
        let mut posit = Vec2::new(0., 50.);
        let mut vel = Vec2::new(-20., 0.);

        resolve_boundary(&mut posit, &mut vel, RADIUS, BOUNDS, 0.);

        assert_eq!(posit.x, RADIUS);
        assert_eq!(vel.x, 0.);
    }
}
