use once_cell::sync::Lazy;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;
use serde_json::json;

use crate::analyze_session::{analyze_session, analyze_session_json, AnalyzeInputs};
use crate::export::write_outputs_delimited;
use crate::metrics::EngineMetrics;
use crate::models::VideoTiming;
use crate::types::parse_jump_request;

// ──────────────────────────────────────────────────────────────────────────────
// Modul-tellere. Lever i Python-prosessen; motoren selv er tilstandsløs.
// ──────────────────────────────────────────────────────────────────────────────
static METRICS: Lazy<Option<EngineMetrics>> = Lazy::new(|| match EngineMetrics::new() {
    Ok(m) => Some(m),
    Err(e) => {
        log::warn!("prometheus registry unavailable: {e}");
        None
    }
});

fn metrics() -> Option<&'static EngineMetrics> {
    Option::as_ref(&*METRICS)
}

fn payload_to_json(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    // Tillat både str og dict/objekt
    if let Ok(s) = payload.extract::<&str>() {
        return Ok(s.to_owned());
    }
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    json_mod
        .call_method1("dumps", (payload,))
        .and_then(|o| o.extract::<String>())
        .map_err(|e| PyValueError::new_err(format!("failed to serialize payload with json.dumps: {e}")))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-FUNKSJONER
// ──────────────────────────────────────────────────────────────────────────────

/// JSON str inn → JSON str ut. ValueError kun for ugyldig JSON.
#[pyfunction]
fn compute_jump_json(json_in: &str) -> PyResult<String> {
    analyze_session_json(json_in, metrics()).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Som `compute_jump_json`, men tar dict/str og returnerer dict.
#[pyfunction]
fn compute_jump(py: Python<'_>, payload: &PyAny) -> PyResult<PyObject> {
    let json_in = payload_to_json(py, payload)?;
    let out = analyze_session_json(&json_in, metrics()).map_err(|e| PyValueError::new_err(e.to_string()))?;

    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    let obj = json_mod
        .call_method1("loads", (out.as_str(),))
        .map_err(|e| PyValueError::new_err(format!("internal JSON parse error via json.loads: {e}")))?;
    Ok(obj.into_py(py))
}

/// Uleselig video-metadata gir generisk melding, ikke unntak.
#[pyfunction]
#[pyo3(signature = (raw_fps, raw_frame_count, floor_fps = false))]
fn probe_video_timing(raw_fps: f64, raw_frame_count: f64, floor_fps: bool) -> String {
    let resp = match VideoTiming::from_probe(raw_fps, raw_frame_count, floor_fps) {
        Ok(t) => json!({
            "ok": true,
            "fps": t.fps(),
            "frame_count": t.frame_count(),
            "last_frame": t.last_frame(),
            "duration_s": t.duration_s(),
        }),
        Err(e) => {
            log::warn!("video probe failed: {e}");
            json!({
                "ok": false,
                "reason": e.reason(),
                "message": e.user_message(),
            })
        }
    };
    resp.to_string()
}

/// Semikolon-eksport: `(rapport, kraftkurve)` som to separate tabeller.
/// Kurven er `None` med mindre `include_series` og den ble beregnet.
/// Motorfeil → ValueError, siden eksport bare skal tilbys etter en vellykket rapport.
#[pyfunction]
#[pyo3(signature = (json_in, include_series = false))]
fn export_report_csv(json_in: &str, include_series: bool) -> PyResult<(String, Option<String>)> {
    let req = parse_jump_request(json_in).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let inputs = AnalyzeInputs::from_request(&req, None).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let out = analyze_session(inputs).map_err(|e| PyValueError::new_err(e.to_string()))?;

    let (report, series) = write_outputs_delimited(&out, req.config.decimal_separator)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((report, if include_series { series } else { None }))
}

#[pyfunction]
fn render_report_text(json_in: &str) -> PyResult<String> {
    crate::cli::render_from_json(json_in).map_err(|e| PyValueError::new_err(format!("{e:#}")))
}

#[pyfunction]
fn metrics_text() -> PyResult<String> {
    match metrics() {
        Some(m) => m.render().map_err(|e| PyValueError::new_err(e.to_string())),
        None => Ok(String::new()),
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn jumpmetrics_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_jump_json, m)?)?;
    m.add_function(wrap_pyfunction!(compute_jump, m)?)?;
    m.add_function(wrap_pyfunction!(probe_video_timing, m)?)?;
    m.add_function(wrap_pyfunction!(export_report_csv, m)?)?;
    m.add_function(wrap_pyfunction!(render_report_text, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
