use log::debug;
use opencv::core::{Mat, Point, Point2f, Ptr, Rect, Size, Vector};
use opencv::face::{FacemarkLBF, FacemarkLBF_Params};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::config::config::{FaceDetectionConfig, FaceSelection, LandmarkModelConfig};
use crate::error::{Error, Result};
use crate::helper::swap_helper::{select_center_face, select_largest_face};
use crate::utils::coordinate::LandmarkSet;

/// Wrapper around the face-detection and landmark-prediction models:
/// a Haar cascade for the face region and an LBF facemark model for the
/// 68 ordered feature points. Both artifacts are loaded once at
/// construction.
pub(crate) struct LandmarkClient {
    detector: CascadeClassifier,
    predictor: Ptr<FacemarkLBF>,
    scale_factor: f64,
    min_neighbors: i32,
    min_face_size: i32,
    selection: FaceSelection,
    num_landmarks: usize,
}

impl LandmarkClient {
    /// new loads the cascade and facemark model artifacts.
    pub fn new(detection: FaceDetectionConfig, landmark: LandmarkModelConfig) -> Result<Self> {
        let detector = CascadeClassifier::new(&detection.cascade_path)?;
        if detector.empty()? {
            return Err(Error::Config(format!(
                "cascade model not loaded from {}",
                detection.cascade_path
            )));
        }

        let params = FacemarkLBF_Params::default()?;
        let mut predictor = FacemarkLBF::create(&params)?;
        predictor.load_model(&landmark.model_path).map_err(|e| {
            Error::Config(format!(
                "facemark model not loaded from {}: {e}",
                landmark.model_path
            ))
        })?;

        Ok(LandmarkClient {
            detector,
            predictor,
            scale_factor: detection.scale_factor,
            min_neighbors: detection.min_neighbors,
            min_face_size: detection.min_face_size,
            selection: detection.selection,
            num_landmarks: landmark.num_landmarks,
        })
    }

    /// detect_faces runs the cascade over a grayscale image.
    pub fn detect_faces(&mut self, gray: &Mat) -> Result<Vector<Rect>> {
        let mut faces: Vector<Rect> = Vector::new();
        self.detector.detect_multi_scale(
            gray,
            &mut faces,
            self.scale_factor,
            self.min_neighbors,
            0,
            Size::new(self.min_face_size, self.min_face_size),
            Size::new(0, 0),
        )?;
        debug!("detector returned {} face(s)", faces.len());
        Ok(faces)
    }

    fn select_face(&self, faces: &Vector<Rect>, image: &str, img_size: Size) -> Result<Rect> {
        if faces.is_empty() {
            return Err(Error::NoFaceDetected {
                image: image.to_string(),
            });
        }
        let no_face = || Error::NoFaceDetected {
            image: image.to_string(),
        };
        match self.selection {
            FaceSelection::First => Ok(faces.get(0)?),
            FaceSelection::Largest => select_largest_face(faces, img_size.width, img_size.height)
                .map(|(face, _)| face)
                .ok_or_else(no_face),
            FaceSelection::Center => select_center_face(faces, img_size, None)
                .map(|(face, _)| face)
                .ok_or_else(no_face),
            FaceSelection::Index(index) => {
                if index >= faces.len() {
                    return Err(Error::FaceIndexOutOfRange {
                        index,
                        count: faces.len(),
                    });
                }
                Ok(faces.get(index)?)
            }
        }
    }

    /// extract detects faces in a grayscale image, selects one region
    /// per the configured policy and predicts its ordered landmarks.
    ///
    /// # Arguments
    /// * `gray` - single-channel input image
    /// * `image` - label used in error context ("face", "body", ...)
    ///
    /// # Returns
    /// * `Result<LandmarkSet>`
    pub fn extract(&mut self, gray: &Mat, image: &str) -> Result<LandmarkSet> {
        let faces = self.detect_faces(gray)?;
        let face = self.select_face(&faces, image, gray.size()?)?;

        let mut selected: Vector<Rect> = Vector::new();
        selected.push(face);
        let mut shapes: Vector<Vector<Point2f>> = Vector::new();
        let found = self.predictor.fit(gray, &selected, &mut shapes)?;
        if !found || shapes.is_empty() {
            return Err(Error::NoFaceDetected {
                image: image.to_string(),
            });
        }

        let shape = shapes.get(0)?;
        if shape.len() != self.num_landmarks {
            return Err(Error::LandmarkCountMismatch {
                expected: self.num_landmarks,
                got: shape.len(),
            });
        }
        let points = shape
            .iter()
            .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
            .collect();
        LandmarkSet::from_points(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_missing_cascade() {
        let detection = FaceDetectionConfig::new("/nonexistent/cascade.xml");
        let landmark = LandmarkModelConfig::new("/nonexistent/lbfmodel.yaml");
        assert!(LandmarkClient::new(detection, landmark).is_err());
    }
}
