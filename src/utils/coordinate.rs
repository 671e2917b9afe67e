use ndarray::Array2;
use opencv::core::{Point, Point2f, Vector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of points produced by the 68-landmark face model.
pub const LANDMARK_COUNT: usize = 68;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

/// Ordered, index-stable set of facial landmark coordinates.
///
/// Index n refers to the same anatomical feature for every face run
/// through the pipeline. That stability is what allows one face's
/// triangulation index triples to be reused against another face's
/// geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// from_points validates an ordered point list into a landmark set.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(Error::LandmarkCountMismatch {
                expected: LANDMARK_COUNT,
                got: points.len(),
            });
        }
        Ok(LandmarkSet { points })
    }

    /// from_array2 builds a landmark set from a 68x2 float matrix,
    /// rounding each coordinate to the nearest integer.
    pub fn from_array2(array: &Array2<f32>) -> Result<Self> {
        if array.ncols() != 2 {
            return Err(Error::InvalidLandmarks(format!(
                "landmark array must have 2 columns, got {}",
                array.ncols()
            )));
        }
        let points = array
            .rows()
            .into_iter()
            .map(|row| Point::new(row[0].round() as i32, row[1].round() as i32))
            .collect();
        LandmarkSet::from_points(points)
    }

    pub fn from_coordinates(coordinates: &[Coordinate2D]) -> Result<Self> {
        let points = coordinates
            .iter()
            .map(|c| Point::new(c.x.round() as i32, c.y.round() as i32))
            .collect();
        LandmarkSet::from_points(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn to_array2(&self) -> Array2<f32> {
        let mut flat: Vec<f32> = Vec::with_capacity(self.points.len() * 2);
        for point in &self.points {
            flat.extend_from_slice(&[point.x as f32, point.y as f32]);
        }
        Array2::from_shape_vec((self.points.len(), 2), flat)
            .unwrap_or_else(|_| Array2::zeros((0, 2)))
    }

    pub fn to_point_vector(&self) -> Vector<Point> {
        self.points.iter().copied().collect()
    }

    pub fn to_point2f_vector(&self) -> Vector<Point2f> {
        self.points
            .iter()
            .map(|p| Point2f::new(p.x as f32, p.y as f32))
            .collect()
    }

    pub fn to_coordinates(&self) -> Vec<Coordinate2D> {
        self.points
            .iter()
            .map(|p| Coordinate2D {
                x: p.x as f32,
                y: p.y as f32,
            })
            .collect()
    }
}

/// Index triple into a [`LandmarkSet`], one triangle of the shared
/// triangulation topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleIndices(pub [usize; 3]);

impl TriangleIndices {
    /// lookup resolves the triple against a concrete landmark set.
    /// Returns `None` if any index is out of range.
    pub fn lookup(&self, landmarks: &LandmarkSet) -> Option<[Point; 3]> {
        let a = landmarks.get(self.0[0])?;
        let b = landmarks.get(self.0[1])?;
        let c = landmarks.get(self.0[2])?;
        Some([a, b, c])
    }
}
