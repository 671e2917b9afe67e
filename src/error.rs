use thiserror::Error;

/// Error taxonomy for the face swap pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// No face was found in an input image. Fatal for the run, the
    /// caller must supply a better image.
    #[error("no face detected in {image} image")]
    NoFaceDetected { image: String },

    /// `FaceSelection::Index` pointed past the detector results.
    #[error("face index {index} out of range, detector returned {count} face(s)")]
    FaceIndexOutOfRange { index: usize, count: usize },

    /// The landmark model (or a caller-supplied array) broke the
    /// fixed-point-count contract.
    #[error("landmark set has {got} points, expected {expected}")]
    LandmarkCountMismatch { expected: usize, got: usize },

    /// A triangulated vertex could not be mapped back to a landmark
    /// index. Recoverable, the offending triangle is dropped.
    #[error("triangle {triangle}: vertex ({x}, {y}) matches no landmark (nearest is {nearest_dist:.1} px away)")]
    LandmarkIndexMismatch {
        triangle: usize,
        x: i32,
        y: i32,
        nearest_dist: f32,
    },

    /// Collinear or out-of-frame triangle, the affine solve would be
    /// ill-defined. Recoverable, the triangle is skipped.
    #[error("degenerate triangle {index}: {reason}")]
    DegenerateTriangle { index: usize, reason: String },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("invalid landmark data: {0}")]
    InvalidLandmarks(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
