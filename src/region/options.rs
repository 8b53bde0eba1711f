use serde::{Deserialize, Serialize};

/// Automatic threshold used to split the inverted alpha histogram in two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMethod {
    /// Maximise between-class variance (Otsu).
    #[default]
    Otsu,
    /// Maximum distance to the peak-to-tail chord (Zack triangle).
    Triangle,
}

impl std::str::FromStr for ThresholdMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "otsu" => Ok(Self::Otsu),
            "triangle" => Ok(Self::Triangle),
            other => Err(format!("unknown threshold method '{other}' (expected otsu|triangle)")),
        }
    }
}

/// Options controlling screen-cutout detection.
///
/// - `min_width`/`min_height`: smallest fully transparent blob accepted as a
///   game screen, in source pixels.
/// - `threshold`: histogram split used to binarize the inverted alpha.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionOptions {
    pub min_width: usize,
    pub min_height: usize,
    pub threshold: ThresholdMethod,
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self {
            min_width: 320,
            min_height: 200,
            threshold: ThresholdMethod::Otsu,
        }
    }
}

impl RegionOptions {
    pub fn with_threshold(mut self, threshold: ThresholdMethod) -> Self {
        self.threshold = threshold;
        self
    }
}
