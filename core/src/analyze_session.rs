use log::{debug, warn};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{JumpError, ProcessingError};
use crate::metrics::{
    force_series_points_total, reports_computed_total, requests_rejected_total, EngineMetrics,
};
use crate::models::{AthleteProfile, ForceTimeSeries, JumpReport, KeyFrames, TreatInputAs, VideoTiming};
use crate::physics::{report_for, simulate_force_time_series};
use crate::types::{parse_jump_request, EngineConfig, JumpRequest};

/// Tekst som følger kraftkurven overalt der den vises.
pub const FORCE_SERIES_NOTE: &str =
    "Synthetic force-time curve: velocity is modelled as a linear ramp over the contact phase, not measured.";

#[derive(Clone)]
pub struct AnalyzeInputs<'a> {
    /// Bilder per sekund fra videoen (før ev. floor_fps)
    pub fps: f64,
    /// Antall bilder i videoen. None => ingen grensesjekk av nøkkelbildene.
    pub frame_count: Option<u64>,
    pub contact_start: u64,
    pub contact_end: u64,
    pub landing: u64,
    /// Tallet brukeren skrev inn (masse eller vekt, se `treat_input_as`)
    pub mass_input: f64,
    pub treat_input_as: TreatInputAs,
    pub config: &'a EngineConfig,
    pub metrics: Option<&'a EngineMetrics>,
}

impl<'a> AnalyzeInputs<'a> {
    pub fn from_request(req: &'a JumpRequest, metrics: Option<&'a EngineMetrics>) -> Result<Self, ProcessingError> {
        let (mass_input, treat_input_as) = req.mass_input()?;
        Ok(Self {
            fps: req.fps,
            frame_count: req.frame_count,
            contact_start: req.contact_start,
            contact_end: req.contact_end,
            landing: req.landing,
            mass_input,
            treat_input_as,
            config: &req.config,
            metrics,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeOutputs {
    pub fps_used: f64,
    /// Satt når frame_count var kjent
    pub timing: Option<VideoTiming>,
    pub key_frames: KeyFrames,
    pub profile: AthleteProfile,
    /// Hvilken masseformel som var aktiv
    pub mass_formula: &'static str,
    pub report: JumpReport,
    pub force_series: Option<ForceTimeSeries>,
}

fn validate(inputs: &AnalyzeInputs) -> Result<(f64, Option<VideoTiming>, AthleteProfile, KeyFrames), JumpError> {
    let fps = if inputs.config.floor_fps { inputs.fps.floor() } else { inputs.fps };
    if !(fps.is_finite() && fps > 0.0) {
        return Err(JumpError::NonPositiveFps(inputs.fps));
    }

    let timing = inputs.frame_count.map(|n| VideoTiming::new(fps, n)).transpose()?;
    let profile = AthleteProfile::from_input(inputs.mass_input, inputs.treat_input_as)?;

    let frames = match &timing {
        Some(t) => KeyFrames::new(inputs.contact_start, inputs.contact_end, inputs.landing, t)?,
        None => KeyFrames::ordered(inputs.contact_start, inputs.contact_end, inputs.landing)?,
    };

    Ok((fps, timing, profile, frames))
}

/// Hele beregningen for ett "beregn"-klikk: valider, rapport, ev. kraftkurve.
/// Alt eller ingenting: ved feil returneres ingen delrapport.
pub fn analyze_session(inputs: AnalyzeInputs) -> Result<AnalyzeOutputs, JumpError> {
    let (fps, timing, profile, key_frames) = match validate(&inputs) {
        Ok(v) => v,
        Err(e) => {
            warn!("jump request rejected: {} ({})", e.reason(), e);
            if let Some(m) = inputs.metrics {
                requests_rejected_total(m, e.reason()).inc();
            }
            return Err(e);
        }
    };

    let report = report_for(fps, &key_frames, profile.mass_kg);
    debug!(
        "jump computed: fps={fps} frames={:?} mass_kg={:.3} -> height_m={:.4} avg_power_w={:.1}",
        key_frames, profile.mass_kg, report.height_m, report.avg_power_w
    );

    let force_series = if inputs.config.include_force_series {
        let series = simulate_force_time_series(
            profile.mass_kg,
            report.contact_time_s,
            report.peak_velocity_mps,
            fps,
        );
        if series.is_empty() {
            warn!("force series is empty (contact_time_s={} fps={})", report.contact_time_s, fps);
        }
        if let Some(m) = inputs.metrics {
            force_series_points_total(m).inc_by(series.len() as u64);
        }
        Some(series)
    } else {
        None
    };

    if let Some(m) = inputs.metrics {
        reports_computed_total(m).inc();
    }

    Ok(AnalyzeOutputs {
        fps_used: fps,
        timing,
        key_frames,
        profile,
        mass_formula: inputs.treat_input_as.formula(),
        report,
        force_series,
    })
}

fn failure_json(err: &ProcessingError) -> Value {
    json!({
        "ok": false,
        "reason": err.reason(),
        "message": err.user_message(),
        "user_correctable": err.is_user_correctable(),
    })
}

fn success_json(out: &AnalyzeOutputs, config: &EngineConfig) -> Value {
    let mut resp = json!({
        "ok": true,
        "report": out.report,
        "display": out.report.rounded(config.display_decimals),
        "key_frames": out.key_frames,
        "fps_used": out.fps_used,
        "mass_kg": out.profile.mass_kg,
        "mass_formula": out.mass_formula,
    });

    if let Value::Object(ref mut obj) = resp {
        if let Some(t) = &out.timing {
            obj.insert(
                "timing".into(),
                json!({
                    "fps": t.fps(),
                    "frame_count": t.frame_count(),
                    "duration_s": t.duration_s(),
                }),
            );
        }
        if let Some(series) = &out.force_series {
            obj.insert("force_series".into(), json!(series));
            obj.insert("force_series_note".into(), json!(FORCE_SERIES_NOTE));
        }
    }
    resp
}

/// JSON inn → JSON ut. Malformert JSON gir `Err`; motorfeil gir `{"ok": false, ...}`.
pub fn analyze_session_json(json_in: &str, metrics: Option<&EngineMetrics>) -> Result<String, ProcessingError> {
    let reject = |e: ProcessingError| {
        if let Some(m) = metrics {
            requests_rejected_total(m, e.reason()).inc();
        }
        e
    };
    let req = parse_jump_request(json_in).map_err(reject)?;
    let inputs = AnalyzeInputs::from_request(&req, metrics).map_err(reject)?;

    let resp = match analyze_session(inputs) {
        Ok(out) => success_json(&out, &req.config),
        Err(e) => failure_json(&ProcessingError::from(e)),
    };
    Ok(resp.to_string())
}
