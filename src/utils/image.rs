use ndarray::Array2;
use opencv::core::{Mat, MatTraitConst, Vector};
use opencv::imgcodecs::{imdecode, imread, imwrite, IMREAD_COLOR};
use opencv::imgproc::{cvt_color, COLOR_BGR2GRAY};

use crate::error::{Error, Result};
use crate::utils::coordinate::{Coordinate2D, LandmarkSet, LANDMARK_COUNT};

/// decode_image decodes an in-memory encoded image into a BGR matrix.
pub fn decode_image(im_bytes: &[u8]) -> Result<Mat> {
    let buf = Mat::from_slice(im_bytes)?;
    let img = imdecode(&buf, IMREAD_COLOR)?;
    if img.empty() {
        return Err(Error::InvalidImage("decoded image is empty".to_string()));
    }
    Ok(img)
}

/// read_image loads a BGR image from disk.
pub fn read_image(path: &str) -> Result<Mat> {
    let img = imread(path, IMREAD_COLOR)?;
    if img.empty() {
        return Err(Error::InvalidImage(format!(
            "cannot read image from {path}"
        )));
    }
    Ok(img)
}

/// write_image encodes and writes an image to disk, the format follows
/// the file extension.
pub fn write_image(path: &str, img: &Mat) -> Result<()> {
    let written = imwrite(path, img, &Vector::new())?;
    if !written {
        return Err(Error::InvalidImage(format!(
            "cannot write image to {path}"
        )));
    }
    Ok(())
}

/// to_grayscale converts a BGR matrix to single-channel grayscale.
pub fn to_grayscale(img: &Mat) -> Result<Mat> {
    let mut gray = Mat::default();
    cvt_color(img, &mut gray, COLOR_BGR2GRAY, 0)?;
    Ok(gray)
}

/// convert_json_landmarks_to_ndarray lays a decoded landmark list out
/// as a 68x2 float matrix.
pub fn convert_json_landmarks_to_ndarray(metadata: &[Coordinate2D]) -> Result<Array2<f32>> {
    if metadata.len() != LANDMARK_COUNT {
        return Err(Error::LandmarkCountMismatch {
            expected: LANDMARK_COUNT,
            got: metadata.len(),
        });
    }

    let mut result: Vec<f32> = Vec::with_capacity(LANDMARK_COUNT * 2);
    for point in metadata {
        result.extend_from_slice(&[point.x, point.y]);
    }

    Ok(Array2::from_shape_vec((LANDMARK_COUNT, 2), result)?)
}

/// load_landmarks_json parses a JSON array of `{"x": .., "y": ..}`
/// objects into a validated landmark set, letting callers supply
/// precomputed landmarks without running detection.
pub fn load_landmarks_json(raw: &str) -> Result<LandmarkSet> {
    let coordinates: Vec<Coordinate2D> = serde_json::from_str(raw)?;
    let array = convert_json_landmarks_to_ndarray(&coordinates)?;
    LandmarkSet::from_array2(&array)
}
