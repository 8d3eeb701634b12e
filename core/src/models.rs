use serde::{Deserialize, Serialize};

use crate::error::{JumpError, ProcessingError};
use crate::physics::{RoundTo, G};

/// Video-timing slik skallet leser den fra containeren. Endres ikke etter opprettelse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoTiming {
    fps: f64,
    frame_count: u64,
}

impl VideoTiming {
    pub fn new(fps: f64, frame_count: u64) -> Result<Self, JumpError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(JumpError::NonPositiveFps(fps));
        }
        if frame_count == 0 {
            return Err(JumpError::EmptyVideo);
        }
        Ok(Self { fps, frame_count })
    }

    /// Rå verdier fra video-biblioteket (f.eks. 0.0 fps når filen ikke kunne åpnes).
    /// `floor_fps` kutter fps til heltall slik det gamle skallet gjorde.
    pub fn from_probe(raw_fps: f64, raw_frame_count: f64, floor_fps: bool) -> Result<Self, ProcessingError> {
        let fps = if floor_fps { raw_fps.floor() } else { raw_fps };
        if !(fps.is_finite() && fps > 0.0) {
            return Err(ProcessingError::VideoIo(format!("unusable fps {raw_fps}")));
        }
        if !(raw_frame_count.is_finite() && raw_frame_count >= 1.0) {
            return Err(ProcessingError::VideoIo(format!("unusable frame count {raw_frame_count}")));
        }
        Ok(Self::new(fps, raw_frame_count as u64)?)
    }

    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn duration_s(&self) -> f64 {
        self.frame_count as f64 / self.fps
    }

    pub fn last_frame(&self) -> u64 {
        self.frame_count - 1
    }

    pub fn frame_to_time(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }

    pub fn contains(&self, frame: u64) -> bool {
        frame < self.frame_count
    }
}

/// De tre nøkkelbildene: start kontakt, avsprett og landing.
/// Kan bare lages via `ordered`/`new`, så start < avsprett < landing holder alltid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyFrames {
    contact_start: u64,
    contact_end: u64,
    landing: u64,
}

impl KeyFrames {
    /// Sjekker rekkefølge uten kjent videolengde.
    pub fn ordered(contact_start: u64, contact_end: u64, landing: u64) -> Result<Self, JumpError> {
        if contact_start == contact_end {
            return Err(JumpError::DegenerateContactWindow { frame: contact_start });
        }
        if contact_start > contact_end || contact_end >= landing {
            return Err(JumpError::InvalidKeyFrameOrder { contact_start, contact_end, landing });
        }
        Ok(Self { contact_start, contact_end, landing })
    }

    /// Som `ordered`, men krever også at alle bildene ligger i `[0, frame_count-1]`.
    pub fn new(contact_start: u64, contact_end: u64, landing: u64, timing: &VideoTiming) -> Result<Self, JumpError> {
        for frame in [contact_start, contact_end, landing] {
            if !timing.contains(frame) {
                return Err(JumpError::FrameOutOfRange { frame, frame_count: timing.frame_count() });
            }
        }
        Self::ordered(contact_start, contact_end, landing)
    }

    #[inline]
    pub fn contact_start(&self) -> u64 {
        self.contact_start
    }

    #[inline]
    pub fn contact_end(&self) -> u64 {
        self.contact_end
    }

    #[inline]
    pub fn landing(&self) -> u64 {
        self.landing
    }

    #[inline]
    pub fn contact_frames(&self) -> u64 {
        self.contact_end - self.contact_start
    }

    #[inline]
    pub fn flight_frames(&self) -> u64 {
        self.landing - self.contact_end
    }
}

/// Hvordan tallet brukeren skriver inn skal tolkes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatInputAs {
    /// Input er masse i kg, brukes direkte.
    #[default]
    MassKg,
    /// Input merket "vekt (kg)"; masse = input / G.
    WeightKg,
}

impl TreatInputAs {
    pub fn formula(&self) -> &'static str {
        match self {
            TreatInputAs::MassKg => "mass_kg = input",
            TreatInputAs::WeightKg => "mass_kg = input / 9.81",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub mass_kg: f64,
}

impl AthleteProfile {
    pub fn new(mass_kg: f64) -> Result<Self, JumpError> {
        if !(mass_kg.is_finite() && mass_kg > 0.0) {
            return Err(JumpError::NonPositiveMass(mass_kg));
        }
        Ok(Self { mass_kg })
    }

    pub fn from_input(value: f64, treat_as: TreatInputAs) -> Result<Self, JumpError> {
        match treat_as {
            TreatInputAs::MassKg => Self::new(value),
            TreatInputAs::WeightKg => {
                // valider råverdien, ikke kvotienten
                if !(value.is_finite() && value > 0.0) {
                    return Err(JumpError::NonPositiveMass(value));
                }
                Self::new(value / G)
            }
        }
    }
}

/// Resultatet av én beregning. Lages på nytt ved hvert "beregn"-klikk.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JumpReport {
    pub contact_time_s: f64,
    pub flight_time_s: f64,
    pub height_m: f64,
    pub peak_velocity_mps: f64,
    pub avg_acceleration_mps2: f64,
    pub avg_force_n: f64,
    pub avg_power_w: f64,
    pub contact_flight_ratio: f64,
}

impl JumpReport {
    /// Avrundet kopi for visning i UI.
    pub fn rounded(&self, dp: u32) -> JumpReport {
        JumpReport {
            contact_time_s: self.contact_time_s.round_to(dp),
            flight_time_s: self.flight_time_s.round_to(dp),
            height_m: self.height_m.round_to(dp),
            peak_velocity_mps: self.peak_velocity_mps.round_to(dp),
            avg_acceleration_mps2: self.avg_acceleration_mps2.round_to(dp),
            avg_force_n: self.avg_force_n.round_to(dp),
            avg_power_w: self.avg_power_w.round_to(dp),
            contact_flight_ratio: self.contact_flight_ratio.round_to(dp),
        }
    }

    pub fn all_finite(&self) -> bool {
        [
            self.contact_time_s,
            self.flight_time_s,
            self.height_m,
            self.peak_velocity_mps,
            self.avg_acceleration_mps2,
            self.avg_force_n,
            self.avg_power_w,
            self.contact_flight_ratio,
        ]
        .iter()
        .all(|x| x.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForcePoint {
    pub time_s: f64,
    pub force_n: f64,
}

/// Syntetisk kraft-tid-kurve (lineær hastighetsrampe). Ikke en måling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForceTimeSeries {
    pub points: Vec<ForcePoint>,
}

impl ForceTimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForcePoint> {
        self.points.iter()
    }

    pub fn peak_force_n(&self) -> Option<f64> {
        self.points.iter().map(|p| p.force_n).reduce(f64::max)
    }
}
