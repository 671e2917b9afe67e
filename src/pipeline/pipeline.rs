use log::{debug, info};
use ndarray::Array2;
use opencv::core::{Mat, MatTraitConst};

use crate::config::config::{FaceDetectionConfig, LandmarkModelConfig, SwapConfig};
use crate::error::Result;
use crate::helper::swap_helper::SwapHelper;
use crate::modules::landmark_client::LandmarkClient;
use crate::utils::coordinate::LandmarkSet;
use crate::utils::image::{read_image, to_grayscale, write_image};

/// End-to-end face swap: landmark extraction on both inputs, then the
/// geometric pipeline of [`SwapHelper`].
pub struct FaceSwapPipeline {
    landmark_client: LandmarkClient,
    swap_helper: SwapHelper,
}

impl FaceSwapPipeline {
    /// new initializes a pipeline instance, loading the detection and
    /// landmark model artifacts once.
    ///
    /// # Arguments
    /// * `detection` - cascade detector configuration
    /// * `landmark` - facemark model configuration
    /// * `swap` - geometric pipeline tunables
    ///
    /// # Returns
    /// * `Result<FaceSwapPipeline>`
    pub fn new(
        detection: FaceDetectionConfig,
        landmark: LandmarkModelConfig,
        swap: SwapConfig,
    ) -> Result<Self> {
        let landmark_client = LandmarkClient::new(detection, landmark)?;
        Ok(FaceSwapPipeline {
            landmark_client,
            swap_helper: SwapHelper::new(swap),
        })
    }

    /// extract_landmarks returns the ordered landmark set for one face
    /// in the image, selected per the configured policy.
    ///
    /// # Arguments
    /// * `img` - BGR input matrix
    /// * `name` - label used in error context ("face", "body", ...)
    ///
    /// # Returns
    /// * `Result<LandmarkSet>`
    pub fn extract_landmarks(&mut self, img: &Mat, name: &str) -> Result<LandmarkSet> {
        let gray = to_grayscale(img)?;
        self.landmark_client.extract(&gray, name)
    }

    /// swap transplants the face found in `face` onto the person in
    /// `body` and returns the blended result.
    ///
    /// # Arguments
    /// * `face` - image providing the face content
    /// * `body` - image providing the body and head position
    ///
    /// # Returns
    /// * `Result<Mat>`
    pub fn swap(&mut self, face: &Mat, body: &Mat) -> Result<Mat> {
        let src_landmarks = self.extract_landmarks(face, "face")?;
        let dst_landmarks = self.extract_landmarks(body, "body")?;
        debug!("landmarks extracted for both inputs");
        self.swap_helper
            .swap_faces(face, body, &src_landmarks, &dst_landmarks)
    }

    /// swap_with_landmarks runs the geometric pipeline with
    /// caller-supplied 68x2 landmark matrices, bypassing detection and
    /// landmark prediction entirely.
    ///
    /// # Arguments
    /// * `face` - image providing the face content
    /// * `body` - image providing the body and head position
    /// * `face_landmarks` - 68x2 landmark matrix for `face`
    /// * `body_landmarks` - 68x2 landmark matrix for `body`
    ///
    /// # Returns
    /// * `Result<Mat>`
    pub fn swap_with_landmarks(
        &self,
        face: &Mat,
        body: &Mat,
        face_landmarks: &Array2<f32>,
        body_landmarks: &Array2<f32>,
    ) -> Result<Mat> {
        let src_landmarks = LandmarkSet::from_array2(face_landmarks)?;
        let dst_landmarks = LandmarkSet::from_array2(body_landmarks)?;
        self.swap_helper
            .swap_faces(face, body, &src_landmarks, &dst_landmarks)
    }

    /// swap_files reads both input images from disk, swaps and writes
    /// the blended result.
    ///
    /// # Arguments
    /// * `face_path` - path of the image providing the face
    /// * `body_path` - path of the image providing the body
    /// * `output_path` - destination path for the result
    ///
    /// # Returns
    /// * `Result<()>`
    pub fn swap_files(&mut self, face_path: &str, body_path: &str, output_path: &str) -> Result<()> {
        let face = read_image(face_path)?;
        let body = read_image(body_path)?;
        debug!(
            "face {}x{}, body {}x{}",
            face.cols(),
            face.rows(),
            body.cols(),
            body.rows()
        );
        let result = self.swap(&face, &body)?;
        write_image(output_path, &result)?;
        info!("face swap written to {output_path}");
        Ok(())
    }
}
