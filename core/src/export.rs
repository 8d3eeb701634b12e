// core/src/export.rs
//! Semikolon-separert eksport. `;` som skilletegn slik at komma kan brukes
//! som desimaltegn i regneark med europeisk locale.
use csv::{ReaderBuilder, WriterBuilder};

use crate::analyze_session::AnalyzeOutputs;
use crate::error::ExportError;
use crate::models::{ForceTimeSeries, JumpReport};
use crate::types::DecimalSeparator;

pub const REPORT_HEADER: [&str; 2] = ["Metric", "Valor"];
pub const SERIES_HEADER: [&str; 2] = ["Tiempo (s)", "Fuerza (N)"];

const DELIMITER: u8 = b';';

// Etikett per felt, i fast rekkefølge.
const METRIC_LABELS: [&str; 8] = [
    "Tiempo de contacto (s)",
    "Tiempo de vuelo (s)",
    "Altura del salto (m)",
    "Velocidad pico (m/s)",
    "Aceleracion promedio (m/s2)",
    "Fuerza promedio (N)",
    "Potencia promedio (W)",
    "Ratio contacto/vuelo",
];

fn report_values(r: &JumpReport) -> [f64; 8] {
    [
        r.contact_time_s,
        r.flight_time_s,
        r.height_m,
        r.peak_velocity_mps,
        r.avg_acceleration_mps2,
        r.avg_force_n,
        r.avg_power_w,
        r.contact_flight_ratio,
    ]
}

/// Full presisjon (Rust sin korteste round-trip-form), ev. med komma.
pub fn format_value(x: f64, sep: DecimalSeparator) -> String {
    let s = x.to_string();
    match sep {
        DecimalSeparator::Point => s,
        DecimalSeparator::Comma => s.replace('.', ","),
    }
}

/// Tolker både "0.1" og "0,1".
pub fn parse_value(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok()
}

pub fn write_report_delimited(report: &JumpReport, sep: DecimalSeparator) -> Result<String, ExportError> {
    let mut w = WriterBuilder::new().delimiter(DELIMITER).from_writer(Vec::new());
    w.write_record(REPORT_HEADER)?;
    for (label, value) in METRIC_LABELS.iter().zip(report_values(report)) {
        w.write_record([*label, format_value(value, sep).as_str()])?;
    }
    let bytes = w.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn write_series_delimited(series: &ForceTimeSeries, sep: DecimalSeparator) -> Result<String, ExportError> {
    let mut w = WriterBuilder::new().delimiter(DELIMITER).from_writer(Vec::new());
    w.write_record(SERIES_HEADER)?;
    for p in series.iter() {
        w.write_record([format_value(p.time_s, sep), format_value(p.force_n, sep)])?;
    }
    let bytes = w.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Rapport og kraftkurve som to separate tabeller (ulike overskrifter,
/// kan ikke leses som én CSV). Kurven er `None` når den ikke ble beregnet.
pub fn write_outputs_delimited(
    out: &AnalyzeOutputs,
    sep: DecimalSeparator,
) -> Result<(String, Option<String>), ExportError> {
    let report = write_report_delimited(&out.report, sep)?;
    let series = out
        .force_series
        .as_ref()
        .map(|s| write_series_delimited(s, sep))
        .transpose()?;
    Ok((report, series))
}

/// Leser tilbake en eksport fra `write_report_delimited`.
pub fn parse_report_delimited(text: &str) -> Result<JumpReport, ExportError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let header = rdr.headers()?.clone();
    if header.iter().map(str::trim).ne(REPORT_HEADER.iter().copied()) {
        return Err(ExportError::BadHeader {
            found: header.iter().collect::<Vec<_>>().join(";"),
            expected: REPORT_HEADER.join(";"),
        });
    }

    let mut values: [Option<f64>; 8] = [None; 8];
    for rec in rdr.records() {
        let rec = rec?;
        let metric = rec.get(0).unwrap_or("").trim();
        let raw = rec.get(1).unwrap_or("");

        let idx = METRIC_LABELS
            .iter()
            .position(|l| *l == metric)
            .ok_or_else(|| ExportError::UnknownMetric(metric.to_string()))?;
        let v = parse_value(raw).ok_or_else(|| ExportError::BadValue {
            metric: metric.to_string(),
            value: raw.to_string(),
        })?;
        values[idx] = Some(v);
    }

    let get = |i: usize| values[i].ok_or(ExportError::MissingMetric(METRIC_LABELS[i]));
    Ok(JumpReport {
        contact_time_s: get(0)?,
        flight_time_s: get(1)?,
        height_m: get(2)?,
        peak_velocity_mps: get(3)?,
        avg_acceleration_mps2: get(4)?,
        avg_force_n: get(5)?,
        avg_power_w: get(6)?,
        contact_flight_ratio: get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_values_parse() {
        assert_eq!(parse_value("0,25"), Some(0.25));
        assert_eq!(parse_value(" 12.5 "), Some(12.5));
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn comma_formatting_keeps_precision() {
        let s = format_value(0.1 + 0.2, DecimalSeparator::Comma);
        assert!(s.starts_with("0,3"));
        assert_eq!(parse_value(&s), Some(0.1 + 0.2));
    }
}
