// crates/pitchviz-core/src/types.rs

use std::fmt;

use serde::Serialize;

use crate::error::SchemaError;
use crate::schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Handedness {
    #[serde(rename = "LHP")]
    Left,
    #[serde(rename = "RHP")]
    Right,
}

impl Handedness {
    /// Only an exact (case-insensitive) "left" is a left-handed pitcher.
    pub fn classify(raw: &str) -> Self {
        if raw.to_lowercase() == "left" {
            Handedness::Left
        } else {
            Handedness::Right
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "LHP",
            Handedness::Right => "RHP",
        }
    }

    pub fn arm_velocity_column(&self) -> &'static str {
        match self {
            Handedness::Left => schema::LEFT_ARM_VELOCITY,
            Handedness::Right => schema::RIGHT_ARM_VELOCITY,
        }
    }

    /// The lead leg is opposite the throwing arm.
    pub fn lead_leg_column(&self) -> &'static str {
        match self {
            Handedness::Left => schema::RIGHT_KNEE_EXTENSION_VELOCITY,
            Handedness::Right => schema::LEFT_KNEE_EXTENSION_VELOCITY,
        }
    }

    pub fn velocity_sign(&self) -> f64 {
        match self {
            Handedness::Left => -1.0,
            Handedness::Right => 1.0,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Handedness-adjusted signals, aligned by row index. Missing samples are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    pub handedness: Vec<String>,
    pub arm_velocity: Vec<f64>,
    pub time: Vec<f64>,
    pub trunk_velocity: Vec<f64>,
    pub pelvis_velocity: Vec<f64>,
    pub lead_leg_extension_velocity: Vec<f64>,
    pub foot_contact_time: Vec<f64>,
    pub ball_release_time: Vec<f64>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub series: NormalizedSeries,
    pub athlete_name: String,
    pub handedness: Handedness,
    pub foot_contact_time: Option<f64>,
    pub ball_release_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AnalysisResult {
    #[serde(rename = "no_input")]
    NoInputYet,
    SchemaError(SchemaError),
    Success(Analysis),
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }

    /// Displayable message for the failure case.
    pub fn error_message(&self) -> Option<String> {
        match self {
            AnalysisResult::SchemaError(err) => Some(err.to_string()),
            AnalysisResult::NoInputYet | AnalysisResult::Success(_) => None,
        }
    }
}
