use tracing::{error, info};

use crate::analysis::analyze;
use crate::chart::{render, Chart};
use crate::config::AppConfig;
use crate::error::{ChartError, IngestError};
use crate::ingestion::RawRecordSet;
use crate::types::AnalysisResult;

/// One uploaded file as received from the transport.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub file_name: &'a str,
    pub content: &'a [u8],
}

/// Everything one recompute produces for the output slot.
#[derive(Debug)]
pub enum UploadOutcome {
    /// The file could not be turned into a record set.
    Rejected(IngestError),
    Analyzed {
        result: AnalysisResult,
        /// Inline SVG, present only for a successful analysis.
        svg: Option<String>,
    },
    /// Analysis succeeded but the drawing backend failed.
    DrawFailed {
        result: AnalysisResult,
        error: ChartError,
    },
}

impl UploadOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            UploadOutcome::Rejected(err) => Some(err.to_string()),
            UploadOutcome::Analyzed { result, .. } => result.error_message(),
            UploadOutcome::DrawFailed { error, .. } => Some(error.to_string()),
        }
    }
}

/// Application context built once at startup and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Ingests one upload and runs analysis. `None` means no file was supplied.
    pub fn analyze_upload(&self, upload: Option<Upload<'_>>) -> Result<AnalysisResult, IngestError> {
        let raw = upload
            .map(|upload| RawRecordSet::from_upload(upload.file_name, upload.content))
            .transpose()?;
        Ok(analyze(raw.as_ref()))
    }

    /// New upload: ingest, analyze, then render.
    pub fn on_upload(&self, upload: Option<Upload<'_>>) -> UploadOutcome {
        if let Some(upload) = upload {
            info!(
                file_name = upload.file_name,
                bytes = upload.content.len(),
                "received upload"
            );
        }

        let result = match self.analyze_upload(upload) {
            Ok(result) => result,
            Err(err) => {
                info!(error = %err, "upload rejected");
                return UploadOutcome::Rejected(err);
            }
        };

        let Some(chart) = render(&result) else {
            return UploadOutcome::Analyzed { result, svg: None };
        };

        match self.draw(&chart) {
            Ok(svg) => UploadOutcome::Analyzed {
                result,
                svg: Some(svg),
            },
            Err(error) => {
                error!(%error, "failed to draw velocity chart");
                UploadOutcome::DrawFailed { result, error }
            }
        }
    }

    pub fn draw(&self, chart: &Chart) -> Result<String, ChartError> {
        chart.to_svg(self.config.chart_width, self.config.chart_height)
    }
}
