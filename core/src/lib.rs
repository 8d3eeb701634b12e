pub mod analyze_session;
pub mod cli;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod physics;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use analyze_session::{analyze_session, analyze_session_json, AnalyzeInputs, AnalyzeOutputs};
pub use error::{ExportError, JumpError, ProcessingError};
pub use export::{
    parse_report_delimited, write_outputs_delimited, write_report_delimited, write_series_delimited,
};
pub use metrics::EngineMetrics;
pub use models::{
    AthleteProfile, ForcePoint, ForceTimeSeries, JumpReport, KeyFrames, TreatInputAs, VideoTiming,
};
pub use physics::{compute_report, simulate_force_time_series, RoundTo, G, MAX_ROUND_DP, MAX_SERIES_SAMPLES};
pub use types::{DecimalSeparator, EngineConfig, JumpRequest};
