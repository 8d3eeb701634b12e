use serde::{Deserialize, Serialize};
use serde_json as json;
use serde_path_to_error as spte;

use crate::error::ProcessingError;
use crate::models::TreatInputAs;
use crate::physics::MAX_ROUND_DP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalSeparator {
    #[default]
    Point,
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(&self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

/// Motor-konfig. Alle felt har defaults, så `{}` er gyldig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// mass_kg | weight_kg – se `TreatInputAs`. None => mass_kg.
    #[serde(alias = "treat_input")]
    pub treat_input_as: Option<TreatInputAs>,
    pub include_force_series: bool,
    /// Kutt fps fra containeren til heltall (gammel skall-oppførsel)
    pub floor_fps: bool,
    pub decimal_separator: DecimalSeparator,
    pub display_decimals: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            treat_input_as: None,
            include_force_series: true,
            floor_fps: false,
            decimal_separator: DecimalSeparator::Point,
            display_decimals: 2,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ProcessingError> {
        if self.display_decimals > MAX_ROUND_DP {
            return Err(ProcessingError::Request {
                path: "config.display_decimals".into(),
                message: format!("must be at most {MAX_ROUND_DP}, got {}", self.display_decimals),
            });
        }
        Ok(())
    }
}

/// Inngang fra UI-skallet. Tåler de spanske feltnavnene fra det gamle skjemaet.
#[derive(Debug, Clone, Deserialize)]
pub struct JumpRequest {
    pub fps: f64,
    #[serde(default, alias = "total_frames", alias = "frames")]
    pub frame_count: Option<u64>,
    #[serde(alias = "inicio_contacto")]
    pub contact_start: u64,
    #[serde(alias = "final_contacto", alias = "takeoff")]
    pub contact_end: u64,
    #[serde(alias = "aterrizaje")]
    pub landing: u64,
    // tallet brukeren skrev inn; tolkes via config.treat_input_as
    #[serde(default, alias = "masa", alias = "mass")]
    pub mass_kg: Option<f64>,
    /// "vekt (kg)" fra skjemaet; gir alltid masse = input / G
    #[serde(default, alias = "peso")]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub config: EngineConfig,
}

impl JumpRequest {
    /// Velg inputverdi og tolkning. Nøyaktig ett av `mass_kg`/`weight_kg` må være satt,
    /// og `weight_kg` kan ikke kombineres med `treat_input_as = mass_kg`.
    pub fn mass_input(&self) -> Result<(f64, TreatInputAs), ProcessingError> {
        let bad = |path: &str, message: &str| ProcessingError::Request {
            path: path.into(),
            message: message.into(),
        };
        match (self.mass_kg, self.weight_kg) {
            (Some(m), None) => Ok((m, self.config.treat_input_as.unwrap_or_default())),
            (None, Some(w)) => match self.config.treat_input_as {
                Some(TreatInputAs::MassKg) => Err(bad(
                    "weight_kg",
                    "weight_kg given but config.treat_input_as is mass_kg",
                )),
                _ => Ok((w, TreatInputAs::WeightKg)),
            },
            (Some(_), Some(_)) => Err(bad("weight_kg", "give either mass_kg or weight_kg, not both")),
            (None, None) => Err(bad(".", "missing field `mass_kg` or `weight_kg`")),
        }
    }
}

fn parse_with_path<T: for<'de> Deserialize<'de>>(json_in: &str) -> Result<T, ProcessingError> {
    let mut de = json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de).map_err(|e| ProcessingError::Request {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

pub fn parse_jump_request(json_in: &str) -> Result<JumpRequest, ProcessingError> {
    let req: JumpRequest = parse_with_path(json_in)?;
    req.config.validate()?;
    Ok(req)
}

pub fn parse_engine_config(json_in: &str) -> Result<EngineConfig, ProcessingError> {
    let cfg: EngineConfig = parse_with_path(json_in)?;
    cfg.validate()?;
    Ok(cfg)
}
