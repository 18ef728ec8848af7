use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::GeometryError;

pub const MIN_SIDES: u32 = 3;
pub const MAX_SIDES: u32 = 10;

/// Closed ring of points on a circle in the `z = 0` plane: one point per
/// corner, then the first corner again.
///
/// Corners start at the top of the circle (`theta = 0` gives `(0, r, 0)`)
/// and advance clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonOutline {
    sides: u32,
    radius: f32,
    points: Vec<Vec3>,
}

impl PolygonOutline {
    pub fn new(sides: u32, radius: f32) -> Result<Self, GeometryError> {
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(GeometryError::InvalidSideCount(sides.to_string()));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }

        let mut points = Vec::with_capacity(sides as usize + 1);
        for i in 0..sides {
            let theta = TAU * i as f32 / sides as f32;
            points.push(Vec3::new(radius * theta.sin(), radius * theta.cos(), 0.0));
        }
        points.push(points[0]);

        Ok(Self {
            sides,
            radius,
            points,
        })
    }

    /// Parses a side count typed by a user, rejecting anything that is not an
    /// integer in range before any geometry is computed.
    pub fn parse_sides(input: &str) -> Result<u32, GeometryError> {
        let sides = input
            .trim()
            .parse::<u32>()
            .map_err(|_| GeometryError::InvalidSideCount(input.to_owned()))?;
        if !(MIN_SIDES..=MAX_SIDES).contains(&sides) {
            return Err(GeometryError::InvalidSideCount(input.to_owned()));
        }
        Ok(sides)
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn flat_positions(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Triangle-list indices equivalent to drawing the points as a fan
    /// around the first point.
    pub fn fan_indices(&self) -> Vec<u32> {
        let len = self.points.len() as u32;
        (1..len - 1).flat_map(|i| [0, i, i + 1]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_outline() {
        let square = PolygonOutline::new(4, 1.0).unwrap();
        let points = square.points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], points[4]);
        assert!((points[0] - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        assert!((points[1] - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        assert!((points[2] - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn corners_lie_on_circle() {
        let outline = PolygonOutline::new(7, 2.5).unwrap();
        for p in outline.points() {
            assert!((p.length() - 2.5).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn side_count_bounds() {
        assert!(PolygonOutline::new(3, 1.0).is_ok());
        assert!(PolygonOutline::new(10, 1.0).is_ok());
        assert_eq!(
            PolygonOutline::new(2, 1.0),
            Err(GeometryError::InvalidSideCount("2".into()))
        );
        assert!(PolygonOutline::new(11, 1.0).is_err());
    }

    #[test]
    fn radius_must_be_positive() {
        assert!(PolygonOutline::new(5, 0.0).is_err());
        assert!(PolygonOutline::new(5, -1.0).is_err());
        assert!(PolygonOutline::new(5, f32::INFINITY).is_err());
    }

    #[test]
    fn parses_user_input() {
        assert_eq!(PolygonOutline::parse_sides("6"), Ok(6));
        assert!(PolygonOutline::parse_sides("").is_err());
        assert!(PolygonOutline::parse_sides("12").is_err());
        assert!(PolygonOutline::parse_sides("4.5").is_err());
    }

    #[test]
    fn fan_covers_every_corner() {
        let triangle = PolygonOutline::new(3, 1.0).unwrap();
        assert_eq!(triangle.fan_indices(), vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(triangle.flat_positions().len(), 12);
    }
}
