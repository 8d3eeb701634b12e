// core/src/physics.rs
use log::warn;

use crate::error::JumpError;
use crate::models::{ForcePoint, ForceTimeSeries, JumpReport, KeyFrames};

pub const G: f64 = 9.81; // gravitasjon (m/s²), samme konstant som referansetallene
pub const MAX_ROUND_DP: u32 = 15;        // flere desimaler gir ingen mening for f64
pub const MAX_SERIES_SAMPLES: usize = 100_000; // tak på rampepunkter i kraftkurven

// --- RoundTo trait (offentlig, brukt av models.rs og cli.rs) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp.min(MAX_ROUND_DP) as i32);
        (self * factor).round() / factor
    }
}

#[inline]
fn check_fps(fps: f64) -> Result<(), JumpError> {
    if fps.is_finite() && fps > 0.0 { Ok(()) } else { Err(JumpError::NonPositiveFps(fps)) }
}

#[inline]
fn check_mass(mass_kg: f64) -> Result<(), JumpError> {
    if mass_kg.is_finite() && mass_kg > 0.0 { Ok(()) } else { Err(JumpError::NonPositiveMass(mass_kg)) }
}

/// Hopphøyde fra flytid, symmetrisk parabel: h = t² · g / 8.
#[inline]
pub fn height_from_flight_time(flight_time_s: f64) -> f64 {
    (flight_time_s * flight_time_s * G) / 8.0
}

/// Avsprettshastighet som gir høyden h: v = sqrt(2 · h · g).
#[inline]
pub fn takeoff_velocity(height_m: f64) -> f64 {
    (2.0 * height_m * G).sqrt()
}

/// Beregn hopprapport fra fps, tre nøkkelbilder og masse.
///
/// Avviser input før noe regnes ut: fps og masse må være positive og endelige,
/// kontaktvinduet kan ikke ha lengde null, og bildene må være strengt stigende.
pub fn compute_report(
    fps: f64,
    contact_start: u64,
    contact_end: u64,
    landing: u64,
    mass_kg: f64,
) -> Result<JumpReport, JumpError> {
    check_fps(fps)?;
    check_mass(mass_kg)?;
    let frames = KeyFrames::ordered(contact_start, contact_end, landing)?;
    Ok(report_for(fps, &frames, mass_kg))
}

/// Kjernen etter validering. `frames` er garantert strengt stigende.
pub(crate) fn report_for(fps: f64, frames: &KeyFrames, mass_kg: f64) -> JumpReport {
    let contact_time_s = frames.contact_frames() as f64 / fps;
    let flight_time_s = frames.flight_frames() as f64 / fps;

    let height_m = height_from_flight_time(flight_time_s);
    let peak_velocity_mps = takeoff_velocity(height_m);

    let avg_acceleration_mps2 = peak_velocity_mps / contact_time_s;
    let avg_force_n = mass_kg * (avg_acceleration_mps2 + G);
    let avg_power_w = avg_force_n * peak_velocity_mps;

    JumpReport {
        contact_time_s,
        flight_time_s,
        height_m,
        peak_velocity_mps,
        avg_acceleration_mps2,
        avg_force_n,
        avg_power_w,
        contact_flight_ratio: contact_time_s / flight_time_s,
    }
}

/// Antall rampepunkter: floor(contact_time_s · fps). Ikke-endelig eller negativ gir 0,
/// over `MAX_SERIES_SAMPLES` gir `None`.
fn ramp_sample_count(contact_time_s: f64, fps: f64) -> Option<usize> {
    let n = (contact_time_s * fps).floor();
    if !(n.is_finite() && n > 0.0) {
        return Some(0);
    }
    if n > MAX_SERIES_SAMPLES as f64 {
        return None;
    }
    Some(n as usize)
}

/// Lineær rampe 0 → peak over n punkter (endepunktene inkludert).
fn linear_ramp(peak: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = peak / (n - 1) as f64;
            (0..n).map(|i| if i == n - 1 { peak } else { step * i as f64 }).collect()
        }
    }
}

/// Syntetisk kraft-tid-serie for kontaktfasen.
///
/// Hastigheten modelleres som en lineær rampe fra 0 til `peak_velocity_mps`,
/// samplet med `fps` over `contact_time_s`. Kraft per punkt er
/// `m · ((v_i − v_{i−1}) · fps + g)`. Punkt 0 har ingen forgjenger, så serien
/// har n−1 punkter (kan være tom). Dette er en modell, ikke målt bevegelse.
/// Kontaktfaser med flere enn `MAX_SERIES_SAMPLES` punkter gir tom serie.
pub fn simulate_force_time_series(
    mass_kg: f64,
    contact_time_s: f64,
    peak_velocity_mps: f64,
    fps: f64,
) -> ForceTimeSeries {
    let n = match ramp_sample_count(contact_time_s, fps) {
        Some(n) => n,
        None => {
            warn!(
                "force series skipped: contact_time_s={contact_time_s} at fps={fps} exceeds {MAX_SERIES_SAMPLES} samples"
            );
            return ForceTimeSeries::default();
        }
    };
    let v = linear_ramp(peak_velocity_mps, n);

    let points = (1..v.len())
        .map(|i| {
            let acceleration = (v[i] - v[i - 1]) * fps;
            ForcePoint {
                time_s: i as f64 / fps,
                force_n: mass_kg * (acceleration + G),
            }
        })
        .collect();

    ForceTimeSeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(0.19620_f64.round_to(2), 0.2);
        assert_eq!(1.96199_f64.round_to(0), 2.0);
    }

    #[test]
    fn linear_ramp_hits_both_ends() {
        let v = linear_ramp(2.0, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[4], 2.0);
        assert!((v[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ramp_of_one_point_is_zero() {
        assert_eq!(linear_ramp(3.0, 1), vec![0.0]);
        assert!(linear_ramp(3.0, 0).is_empty());
    }

    #[test]
    fn sample_count_guards_garbage() {
        assert_eq!(ramp_sample_count(f64::NAN, 30.0), Some(0));
        assert_eq!(ramp_sample_count(-1.0, 30.0), Some(0));
        assert_eq!(ramp_sample_count(0.1, 30.0), Some(3));
        assert_eq!(ramp_sample_count(1e12 / 30.0, 30.0), None);
        assert_eq!(ramp_sample_count(f64::INFINITY, 30.0), Some(0));
    }

    #[test]
    fn round_to_caps_decimals() {
        let x = 0.19620_f64;
        assert!(x.round_to(400).is_finite());
        assert_eq!(x.round_to(u32::MAX), x.round_to(MAX_ROUND_DP));
    }

    #[test]
    fn height_formula_matches_half_g_t_squared() {
        let t: f64 = 0.4;
        let alt = 0.5 * G * (t / 2.0).powi(2);
        assert!((height_from_flight_time(t) - alt).abs() < 1e-12);
    }
}
