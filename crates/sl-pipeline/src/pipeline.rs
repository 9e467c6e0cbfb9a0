//! Pipeline orchestrator.
//!
//! Sequences reader -> correction -> optional smoothing into one synchronous,
//! single-attempt run. Stage errors propagate unmodified; no partial bundle
//! is ever returned.

use std::time::Instant;

use rayon::prelude::*;
use sl_core::CurveBundle;
use tracing::debug;

use crate::correction;
use crate::error::PipelineResult;
use crate::options::ProcessingOptions;
use crate::savgol;

/// Lifecycle of one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Reading,
    Correcting,
    Smoothing,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Reading => "reading captures",
            PipelineStage::Correcting => "correcting",
            PipelineStage::Smoothing => "smoothing",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        }
    }
}

/// Progress event streamed to an optional observer.
#[derive(Debug, Clone)]
pub struct PipelineEvent {
    pub stage: PipelineStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

fn emit(
    progress_cb: &mut Option<&mut dyn FnMut(PipelineEvent)>,
    stage: PipelineStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(PipelineEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
        });
    }
}

/// Run the full pipeline over three raw captures.
pub fn run(
    sample_bytes: &[u8],
    water_bytes: &[u8],
    dark_bytes: &[u8],
    options: &ProcessingOptions,
) -> PipelineResult<CurveBundle> {
    run_with_progress(sample_bytes, water_bytes, dark_bytes, options, None)
}

/// Run the full pipeline, streaming stage events to `progress_cb`.
pub fn run_with_progress(
    sample_bytes: &[u8],
    water_bytes: &[u8],
    dark_bytes: &[u8],
    options: &ProcessingOptions,
    mut progress_cb: Option<&mut dyn FnMut(PipelineEvent)>,
) -> PipelineResult<CurveBundle> {
    let started = Instant::now();

    let result = run_stages(
        sample_bytes,
        water_bytes,
        dark_bytes,
        options,
        &mut progress_cb,
        started,
    );

    match &result {
        Ok(bundle) => {
            debug!(
                samples = bundle.len(),
                curves = bundle.curve_count(),
                "pipeline completed"
            );
            emit(
                &mut progress_cb,
                PipelineStage::Done,
                started,
                Some("Pipeline completed".to_string()),
            );
        }
        Err(err) => {
            debug!(error = %err, "pipeline failed");
            emit(
                &mut progress_cb,
                PipelineStage::Failed,
                started,
                Some(err.to_string()),
            );
        }
    }

    result
}

fn run_stages(
    sample_bytes: &[u8],
    water_bytes: &[u8],
    dark_bytes: &[u8],
    options: &ProcessingOptions,
    progress_cb: &mut Option<&mut dyn FnMut(PipelineEvent)>,
    started: Instant,
) -> PipelineResult<CurveBundle> {
    options.validate()?;

    emit(
        progress_cb,
        PipelineStage::Reading,
        started,
        Some("Reading captures".to_string()),
    );
    let sample = sl_capture::read(sample_bytes)?;
    let water = sl_capture::read(water_bytes)?;
    let dark = sl_capture::read(dark_bytes)?;

    emit(
        progress_cb,
        PipelineStage::Correcting,
        started,
        Some("Correcting intensities".to_string()),
    );
    let mut bundle = correction::correct(&sample, &water, &dark, options)?;

    if options.smoothing.enabled && bundle.curve_count() > 0 {
        emit(
            progress_cb,
            PipelineStage::Smoothing,
            started,
            Some(format!(
                "Smoothing {} curve(s), window {}, order {}",
                bundle.curve_count(),
                options.smoothing.window,
                options.smoothing.order
            )),
        );

        // Each curve smooths independently from its unsmoothed input
        let smoothed: Vec<(String, Vec<f64>)> = bundle
            .iter()
            .map(|(name, values)| (name.to_string(), values.to_vec()))
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(name, values)| {
                savgol::smooth(&values, options.smoothing.window, options.smoothing.order)
                    .map(|s| (name, s))
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        for (name, values) in smoothed {
            bundle.replace_curve(&name, values)?;
        }
    }

    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"500 10\n501 12\n";
    const WATER: &[u8] = b"500 8\n501 8\n";
    const DARK: &[u8] = b"500 2\n501 2\n";

    #[test]
    fn stage_sequence_on_success() {
        let mut options = ProcessingOptions::default();
        options.smoothing.enabled = true;
        options.smoothing.window = 3;
        options.smoothing.order = 1;

        let sample: Vec<u8> = (0..16)
            .map(|i| format!("{} {}\n", 500 + i, 10 + i))
            .collect::<String>()
            .into_bytes();
        let water: Vec<u8> = (0..16)
            .map(|i| format!("{} 8\n", 500 + i))
            .collect::<String>()
            .into_bytes();
        let dark: Vec<u8> = (0..16)
            .map(|i| format!("{} 2\n", 500 + i))
            .collect::<String>()
            .into_bytes();

        let mut stages = Vec::new();
        let mut cb = |event: PipelineEvent| stages.push(event.stage);
        let bundle =
            run_with_progress(&sample, &water, &dark, &options, Some(&mut cb)).unwrap();

        assert_eq!(bundle.curve_count(), 3);
        assert_eq!(
            stages,
            vec![
                PipelineStage::Reading,
                PipelineStage::Correcting,
                PipelineStage::Smoothing,
                PipelineStage::Done,
            ]
        );
    }

    #[test]
    fn failure_emits_failed_stage() {
        let mut stages = Vec::new();
        let mut cb = |event: PipelineEvent| stages.push(event.stage);
        let err = run_with_progress(b"garbage \xff", WATER, DARK, &ProcessingOptions::default(), Some(&mut cb));
        assert!(err.is_err());
        assert_eq!(stages.last(), Some(&PipelineStage::Failed));
    }

    #[test]
    fn invalid_options_fail_before_reading() {
        let mut options = ProcessingOptions::default();
        options.smoothing.enabled = true;
        options.smoothing.window = 4;

        let mut stages = Vec::new();
        let mut cb = |event: PipelineEvent| stages.push(event.stage);
        let result = run_with_progress(SAMPLE, WATER, DARK, &options, Some(&mut cb));
        assert!(result.is_err());
        assert!(!stages.contains(&PipelineStage::Reading));
    }

    #[test]
    fn smoothing_disabled_skips_stage() {
        let mut stages = Vec::new();
        let mut cb = |event: PipelineEvent| stages.push(event.stage);
        run_with_progress(SAMPLE, WATER, DARK, &ProcessingOptions::default(), Some(&mut cb))
            .unwrap();
        assert!(!stages.contains(&PipelineStage::Smoothing));
    }
}
