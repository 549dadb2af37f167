//! Initial particle placement.

use crate::vec2::Vec2;

/// Lay out `count` particles on a square-ish grid, centered in `bounds`. Rows fill from the
/// bottom. `spacing` is the gap between neighboring particle edges, so grid pitch is
/// `2 · radius + spacing`.
pub fn make_particles_grid(count: usize, radius: f64, spacing: f64, bounds: (f64, f64)) -> Vec<Vec2> {
    let mut result = Vec::with_capacity(count);
    if count == 0 {
        return result;
    }

    let per_row = ((count as f64).sqrt() as usize).max(1);
    let per_col = (count - 1) / per_row + 1;
    let pitch = radius * 2. + spacing;

    let offset_x = (bounds.0 - (per_row - 1) as f64 * pitch) / 2.;
    let offset_y = (bounds.1 - (per_col - 1) as f64 * pitch) / 2.;

    for i in 0..count {
        let row = i / per_row;
        let col = i % per_row;

        result.push(Vec2::new(
            col as f64 * pitch + offset_x,
            row as f64 * pitch + offset_y,
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_grid_centered() {
        let posits = make_particles_grid(9, 1., 8., (100., 100.));

        assert_eq!(posits.len(), 9);
        assert_eq!(posits[0], Vec2::new(40., 40.));
        assert_eq!(posits[4], Vec2::new(50., 50.));
        assert_eq!(posits[8], Vec2::new(60., 60.));
    }

    #[test]
    fn partial_last_row() {
        // 2 per row, 4 rows; the top row holds a single particle.
        let posits = make_particles_grid(7, 1., 0., (20., 20.));

        assert_eq!(posits.len(), 7);
        assert_eq!(posits[6], Vec2::new(9., 13.));
    }

    #[test]
    fn default_count() {
        let posits = make_particles_grid(800, 4., 4., (1_024., 576.));

        assert_eq!(posits.len(), 800);
        for p in &posits {
            assert!(p.x >= 4. && p.x <= 1_020.);
            assert!(p.y >= 4. && p.y <= 572.);
        }
    }
}
