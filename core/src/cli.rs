use anyhow::{Context, Result};

use crate::analyze_session::{analyze_session, AnalyzeInputs, AnalyzeOutputs, FORCE_SERIES_NOTE};
use crate::physics::MAX_ROUND_DP;
use crate::types::{parse_jump_request, EngineConfig};

/// Tekstrapport slik skallet viser den (fast antall desimaler fra config).
pub fn render_report_text(out: &AnalyzeOutputs, config: &EngineConfig) -> String {
    let dp = config.display_decimals.min(MAX_ROUND_DP) as usize;
    let r = &out.report;
    let kf = &out.key_frames;

    let mut lines = vec!["--- Jump Report ---".to_string()];
    if let Some(t) = &out.timing {
        lines.push(format!(
            "Video: {:.2} fps, {} frames, {:.2} s",
            t.fps(),
            t.frame_count(),
            t.duration_s()
        ));
    }
    lines.push(format!(
        "Key frames: contact {} -> takeoff {} -> landing {}",
        kf.contact_start(),
        kf.contact_end(),
        kf.landing()
    ));
    lines.push(format!("Mass: {:.dp$} kg ({})", out.profile.mass_kg, out.mass_formula));
    lines.push(format!("Contact time: {:.dp$} s", r.contact_time_s));
    lines.push(format!("Flight time: {:.dp$} s", r.flight_time_s));
    lines.push(format!("Jump height: {:.dp$} m", r.height_m));
    lines.push(format!("Peak velocity: {:.dp$} m/s", r.peak_velocity_mps));
    lines.push(format!("Avg force: {:.dp$} N", r.avg_force_n));
    lines.push(format!("Avg power: {:.dp$} W", r.avg_power_w));
    lines.push(format!("Contact/flight ratio: {:.dp$}", r.contact_flight_ratio));

    if let Some(series) = &out.force_series {
        lines.push(match series.peak_force_n() {
            Some(peak) => format!("Force curve: {} points, peak {:.dp$} N", series.len(), peak),
            None => "Force curve: no points (contact phase too short or too long)".to_string(),
        });
        lines.push(format!("Note: {FORCE_SERIES_NOTE}"));
    }

    let mut s = lines.join("\n");
    s.push('\n');
    s
}

/// JSON-forespørsel → tekstrapport. Motorfeil blir også `Err` her.
pub fn render_from_json(json_in: &str) -> Result<String> {
    let req = parse_jump_request(json_in).context("could not parse jump request")?;
    let inputs = AnalyzeInputs::from_request(&req, None).context("could not resolve athlete mass")?;
    let formula = inputs.treat_input_as.formula();
    let out = analyze_session(inputs).with_context(|| format!("jump rejected ({formula})"))?;
    Ok(render_report_text(&out, &req.config))
}
