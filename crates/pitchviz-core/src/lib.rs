pub mod analysis;
pub mod app;
pub mod chart;
pub mod config;
pub mod constants;
pub mod error;
pub mod ingestion;
pub mod schema;
pub mod types;

pub use analysis::analyze;
pub use app::{AppContext, Upload, UploadOutcome};
pub use chart::{render, Chart, ChartSeries, EventMarker};
pub use config::AppConfig;
pub use error::{ChartError, ConfigError, IngestError, SchemaError};
pub use ingestion::RawRecordSet;
pub use types::{Analysis, AnalysisResult, Handedness, NormalizedSeries};
