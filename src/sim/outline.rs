//! Entity outlines in local coordinates
//!
//! Outlines are closed polygons centred on the entity origin with the nose
//! pointing along +x. They are placed into the playfield only when a collision
//! test or a renderer asks for them.

use glam::Vec2;

use super::motion::Motion;

/// Ship hull
pub const SHIP_POINTS: &[(f32, f32)] = &[(20.0, 0.0), (-20.0, 12.0), (-13.0, 10.0), (-13.0, -10.0), (-20.0, -12.0)];

/// Ship hull with the exhaust flame showing
pub const SHIP_FLAME_POINTS: &[(f32, f32)] = &[
    (20.0, 0.0),
    (-20.0, 12.0),
    (-13.0, 10.0),
    (-13.0, 5.0),
    (-25.0, 0.0),
    (-13.0, -5.0),
    (-13.0, -10.0),
    (-20.0, -12.0),
];

/// Where ship bullets leave the hull
pub const SHIP_NOSE: Vec2 = Vec2::new(20.0, 0.0);

/// Raider saucer at scale 1.0
pub const RAIDER_POINTS: &[(f32, f32)] = &[
    (20.0, 0.0),
    (9.0, 9.0),
    (-9.0, 9.0),
    (-20.0, 0.0),
    (-9.0, -9.0),
    (-5.0, -17.0),
    (5.0, -17.0),
    (9.0, -9.0),
];

/// Asteroid shapes at scale 1.0, one per variety
pub const ASTEROID_POINTS: [&[(f32, f32)]; 4] = [
    &[(-30.0, -5.0), (-15.0, -28.0), (10.0, -30.0), (28.0, -12.0), (30.0, 10.0), (12.0, 30.0), (-10.0, 26.0), (-28.0, 14.0)],
    &[(-28.0, -18.0), (-5.0, -30.0), (5.0, -20.0), (25.0, -28.0), (30.0, 0.0), (20.0, 25.0), (-5.0, 30.0), (-25.0, 20.0), (-30.0, 0.0)],
    &[(-25.0, -25.0), (0.0, -30.0), (25.0, -25.0), (20.0, -5.0), (30.0, 15.0), (10.0, 30.0), (-15.0, 25.0), (-30.0, 5.0)],
    &[(-30.0, -10.0), (-20.0, -30.0), (0.0, -22.0), (22.0, -30.0), (30.0, -5.0), (22.0, 22.0), (0.0, 30.0), (-22.0, 25.0)],
];

/// Number of asteroid varieties
pub const ASTEROID_VARIETIES: usize = ASTEROID_POINTS.len();

/// Small octagon standing in for the round bullet
pub const BULLET_POINTS: &[(f32, f32)] = &[
    (1.0, 0.0),
    (0.7, 0.7),
    (0.0, 1.0),
    (-0.7, 0.7),
    (-1.0, 0.0),
    (-0.7, -0.7),
    (0.0, -1.0),
    (0.7, -0.7),
];

/// A closed polygon in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<Vec2>,
}

impl Outline {
    /// Build a polygon from a literal table, scaled uniformly
    pub fn scaled(points: &[(f32, f32)], scale: f32) -> Self {
        Self {
            points: points.iter().map(|&(x, y)| Vec2::new(x, y) * scale).collect(),
        }
    }

    /// A line segment of the given length along the local y axis
    pub fn segment(length: f32) -> Self {
        Self {
            points: vec![Vec2::new(0.0, -length / 2.0), Vec2::new(0.0, length / 2.0)],
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Place the outline at the motion's position and rotation
    pub fn to_world(&self, motion: &Motion) -> Vec<Vec2> {
        self.points.iter().map(|&p| motion.to_world(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_scaled_outline() {
        let outline = Outline::scaled(SHIP_POINTS, 0.5);
        assert_eq!(outline.points()[0], Vec2::new(10.0, 0.0));
        assert_eq!(outline.points()[1], Vec2::new(-10.0, 6.0));
        assert_eq!(outline.points().len(), SHIP_POINTS.len());
    }

    #[test]
    fn test_world_placement() {
        let mut motion = Motion::at(Vec2::new(50.0, 60.0));
        motion.set_rotation(FRAC_PI_2);
        let world = Outline::segment(10.0).to_world(&motion);
        // Local y axis maps onto world -x after a quarter turn
        assert!((world[0].x - 55.0).abs() < 1e-4);
        assert!((world[1].x - 45.0).abs() < 1e-4);
        assert!((world[0].y - 60.0).abs() < 1e-4);
    }
}
