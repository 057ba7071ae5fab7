use std::ops::AddAssign;

/// The four axis-aligned arena walls.
///
/// Left/top sit at coordinate 0, right/bottom at the arena width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Right, Wall::Top, Wall::Bottom];

    /// Index of the coordinate this wall is normal to (0 = x, 1 = y).
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Wall::Left | Wall::Right => 0,
            Wall::Top | Wall::Bottom => 1,
        }
    }

    /// True for the wall at the far end of its axis.
    #[inline]
    pub fn is_max(self) -> bool {
        matches!(self, Wall::Right | Wall::Bottom)
    }

    /// Whether a particle at coordinate `x` with velocity component `v` along this wall's
    /// axis is within `radius` of a wall at `limit` and moving toward it.
    ///
    /// Proximity alone is not enough: a particle touching the wall but already leaving it
    /// must not be reflected again.
    #[inline]
    pub fn is_hit(self, x: f64, v: f64, radius: f64, limit: f64) -> bool {
        if self.is_max() {
            x >= limit - radius && v > 0.0
        } else {
            x <= radius && v < 0.0
        }
    }
}

/// Counts of what happened during one or more ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Particle pairs whose velocities were exchanged.
    pub particle_collisions: usize,
    /// Wall-normal velocity components negated.
    pub wall_reflections: usize,
    /// Eligible-looking pairs skipped because their centers coincided.
    pub degenerate_pairs: usize,
}

impl TickSummary {
    #[inline]
    pub fn is_quiet(&self) -> bool {
        *self == TickSummary::default()
    }
}

impl AddAssign for TickSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.particle_collisions += rhs.particle_collisions;
        self.wall_reflections += rhs.wall_reflections;
        self.degenerate_pairs += rhs.degenerate_pairs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_and_sides() {
        assert_eq!(Wall::Left.axis(), 0);
        assert_eq!(Wall::Bottom.axis(), 1);
        assert!(Wall::Right.is_max());
        assert!(!Wall::Top.is_max());
    }

    #[test]
    fn hit_requires_motion_toward_wall() {
        // Touching the left wall
        assert!(Wall::Left.is_hit(1.0, -0.5, 1.0, 0.0));
        assert!(!Wall::Left.is_hit(1.0, 0.5, 1.0, 0.0));
        assert!(!Wall::Left.is_hit(1.0, 0.0, 1.0, 0.0));
        // Touching the right wall at 100
        assert!(Wall::Right.is_hit(99.5, 1.0, 1.0, 100.0));
        assert!(!Wall::Right.is_hit(99.5, -1.0, 1.0, 100.0));
        // Far away
        assert!(!Wall::Right.is_hit(50.0, 1.0, 1.0, 100.0));
    }

    #[test]
    fn summaries_accumulate() {
        let mut total = TickSummary::default();
        assert!(total.is_quiet());
        total += TickSummary {
            particle_collisions: 2,
            wall_reflections: 1,
            degenerate_pairs: 0,
        };
        total += TickSummary {
            particle_collisions: 1,
            wall_reflections: 0,
            degenerate_pairs: 3,
        };
        assert_eq!(total.particle_collisions, 3);
        assert_eq!(total.wall_reflections, 1);
        assert_eq!(total.degenerate_pairs, 3);
        assert!(!total.is_quiet());
    }
}
