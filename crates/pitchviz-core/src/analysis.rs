use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::error::SchemaError;
use crate::ingestion::RawRecordSet;
use crate::schema::{self, normalized};
use crate::types::{Analysis, AnalysisResult, Handedness, NormalizedSeries};

/// Validates the uploaded record set and derives the handedness-adjusted signals.
///
/// `None` means nothing has been uploaded yet. Failures are returned as
/// [`AnalysisResult::SchemaError`]; this function never panics on user data.
pub fn analyze(raw: Option<&RawRecordSet>) -> AnalysisResult {
    let Some(raw) = raw else {
        return AnalysisResult::NoInputYet;
    };

    match analyze_frame(raw.frame()) {
        Ok(analysis) => {
            info!(
                athlete = %analysis.athlete_name,
                handedness = %analysis.handedness,
                rows = analysis.series.len(),
                foot_contact_time = ?analysis.foot_contact_time,
                ball_release_time = ?analysis.ball_release_time,
                "analysis complete"
            );
            AnalysisResult::Success(analysis)
        }
        Err(err) => {
            warn!(error = %err, "uploaded record set rejected");
            AnalysisResult::SchemaError(err)
        }
    }
}

fn analyze_frame(df: &DataFrame) -> Result<Analysis, SchemaError> {
    let missing = schema::missing_columns(df);
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns { missing });
    }
    if df.height() == 0 {
        return Err(SchemaError::NoDataRows);
    }

    let athlete_name = first_text(df, schema::ATHLETE_NAME)?;
    let handedness = Handedness::classify(&first_text(df, schema::HANDEDNESS)?);
    let arm_column = handedness.arm_velocity_column();
    let lead_leg_column = handedness.lead_leg_column();
    debug!(
        rows = df.height(),
        %handedness,
        arm_column,
        lead_leg_column,
        "resolved source columns"
    );

    for column in [
        arm_column,
        schema::TIME,
        schema::TRUNK_VELOCITY,
        schema::PELVIS_VELOCITY,
        lead_leg_column,
        schema::FOOT_CONTACT_TIME,
        schema::BALL_RELEASE_TIME,
    ] {
        ensure_numeric(df, column)?;
    }

    let frame = normalize(df, handedness).map_err(frame_error)?;
    let foot_contact_time =
        event_time(&frame, normalized::FOOT_CONTACT_TIME).map_err(frame_error)?;
    let ball_release_time =
        event_time(&frame, normalized::BALL_RELEASE_TIME).map_err(frame_error)?;
    let series = series_from_frame(&frame).map_err(frame_error)?;

    Ok(Analysis {
        series,
        athlete_name,
        handedness,
        foot_contact_time,
        ball_release_time,
    })
}

/// Selects and renames the source columns, flipping the velocity sign for LHP.
fn normalize(df: &DataFrame, handedness: Handedness) -> PolarsResult<DataFrame> {
    let velocity = |source: &str, name: &str| {
        let values = col(source).cast(DataType::Float64);
        match handedness {
            Handedness::Left => (values * lit(handedness.velocity_sign())).alias(name),
            Handedness::Right => values.alias(name),
        }
    };
    let number = |source: &str, name: &str| col(source).cast(DataType::Float64).alias(name);

    df.clone()
        .lazy()
        .select([
            col(schema::HANDEDNESS)
                .cast(DataType::String)
                .alias(normalized::HANDEDNESS),
            velocity(handedness.arm_velocity_column(), normalized::ARM_VELOCITY),
            number(schema::TIME, normalized::TIME),
            velocity(schema::TRUNK_VELOCITY, normalized::TRUNK_VELOCITY),
            velocity(schema::PELVIS_VELOCITY, normalized::PELVIS_VELOCITY),
            velocity(
                handedness.lead_leg_column(),
                normalized::LEAD_LEG_EXTENSION_VELOCITY,
            ),
            number(schema::FOOT_CONTACT_TIME, normalized::FOOT_CONTACT_TIME),
            number(schema::BALL_RELEASE_TIME, normalized::BALL_RELEASE_TIME),
        ])
        .collect()
}

/// Earliest `time` among rows whose event flag is exactly zero.
/// The min over no matching rows is null, which reads back as `None`.
fn event_time(frame: &DataFrame, flag: &str) -> PolarsResult<Option<f64>> {
    let earliest = frame
        .clone()
        .lazy()
        .filter(col(flag).eq(lit(0.0)))
        .select([col(normalized::TIME).min()])
        .collect()?;

    Ok(earliest.column(normalized::TIME)?.f64()?.get(0))
}

fn series_from_frame(frame: &DataFrame) -> PolarsResult<NormalizedSeries> {
    let handedness = frame
        .column(normalized::HANDEDNESS)?
        .str()?
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect();

    Ok(NormalizedSeries {
        handedness,
        arm_velocity: values(frame, normalized::ARM_VELOCITY)?,
        time: values(frame, normalized::TIME)?,
        trunk_velocity: values(frame, normalized::TRUNK_VELOCITY)?,
        pelvis_velocity: values(frame, normalized::PELVIS_VELOCITY)?,
        lead_leg_extension_velocity: values(frame, normalized::LEAD_LEG_EXTENSION_VELOCITY)?,
        foot_contact_time: values(frame, normalized::FOOT_CONTACT_TIME)?,
        ball_release_time: values(frame, normalized::BALL_RELEASE_TIME)?,
    })
}

fn values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    Ok(frame
        .column(name)?
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

/// First-row value of a column rendered as text; null becomes empty.
fn first_text(df: &DataFrame, name: &str) -> Result<String, SchemaError> {
    let column = df
        .column(name)
        .and_then(|column| column.cast(&DataType::String))
        .map_err(frame_error)?;
    let text = column
        .str()
        .map_err(frame_error)?
        .get(0)
        .unwrap_or_default()
        .to_string();
    Ok(text)
}

fn ensure_numeric(df: &DataFrame, name: &str) -> Result<(), SchemaError> {
    let column = df.column(name).map_err(frame_error)?;
    if column.dtype() == &DataType::String {
        return Err(SchemaError::NonNumericColumn {
            column: name.to_string(),
        });
    }
    Ok(())
}

fn frame_error(err: PolarsError) -> SchemaError {
    SchemaError::Frame {
        message: err.to_string(),
    }
}
