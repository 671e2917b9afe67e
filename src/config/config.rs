use opencv::photo::{MIXED_CLONE, MONOCHROME_TRANSFER, NORMAL_CLONE};
use serde::{Deserialize, Serialize};

/// Policy for picking one face when the detector returns several.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FaceSelection {
    /// First face in detector order.
    First,
    /// Face with the largest clamped bounding-box area.
    Largest,
    /// Face closest to the image center.
    Center,
    /// Caller-specified detector index.
    Index(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaceDetectionConfig {
    pub cascade_path: String,
    pub scale_factor: f64,
    pub min_neighbors: i32,
    pub min_face_size: i32,
    pub selection: FaceSelection,
}

impl FaceDetectionConfig {
    pub fn new(cascade_path: &str) -> Self {
        FaceDetectionConfig {
            cascade_path: cascade_path.to_string(),
            scale_factor: 1.1,
            min_neighbors: 3,
            min_face_size: 30,
            selection: FaceSelection::First,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandmarkModelConfig {
    pub model_path: String,
    pub num_landmarks: usize,
}

impl LandmarkModelConfig {
    pub fn new(model_path: &str) -> Self {
        LandmarkModelConfig {
            model_path: model_path.to_string(),
            num_landmarks: 68,
        }
    }
}

/// Gradient-domain variant passed to the seamless-clone primitive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CloneMode {
    Normal,
    Mixed,
    Monochrome,
}

impl CloneMode {
    pub fn to_opencv(self) -> i32 {
        match self {
            CloneMode::Normal => NORMAL_CLONE,
            CloneMode::Mixed => MIXED_CLONE,
            CloneMode::Monochrome => MONOCHROME_TRANSFER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapConfig {
    /// Max distance in pixels between a triangulated vertex and the
    /// nearest landmark before the triangle is dropped.
    pub match_tolerance: f32,
    /// Twice-signed-area threshold below which a triangle counts as
    /// degenerate and is skipped.
    pub min_triangle_area: f32,
    pub clone_mode: CloneMode,
}

impl SwapConfig {
    pub fn new() -> Self {
        SwapConfig {
            match_tolerance: 2.0,
            min_triangle_area: 1.0,
            clone_mode: CloneMode::Normal,
        }
    }
}

impl Default for SwapConfig {
    fn default() -> Self {
        SwapConfig::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_mode_maps_to_opencv_flags() {
        assert_eq!(CloneMode::Normal.to_opencv(), NORMAL_CLONE);
        assert_eq!(CloneMode::Mixed.to_opencv(), MIXED_CLONE);
        assert_eq!(CloneMode::Monochrome.to_opencv(), MONOCHROME_TRANSFER);
    }

    #[test]
    fn test_selection_policy_serde() {
        let cfg = FaceDetectionConfig {
            selection: FaceSelection::Index(2),
            ..FaceDetectionConfig::new("cascade.xml")
        };
        let encoded = serde_json::to_string(&cfg).unwrap();
        let decoded: FaceDetectionConfig = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, cfg);
    }
}
