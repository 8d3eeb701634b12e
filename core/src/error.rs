// core/src/error.rs
use thiserror::Error;

/// Feil fra selve beregningsmotoren. Alle kan rettes av brukeren
/// (velg nye nøkkelbilder, skriv inn gyldig masse osv.).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JumpError {
    #[error(
        "key frames must be strictly increasing (contact_start={contact_start}, contact_end={contact_end}, landing={landing})"
    )]
    InvalidKeyFrameOrder {
        contact_start: u64,
        contact_end: u64,
        landing: u64,
    },

    #[error("contact phase has zero length (contact_start == contact_end == {frame})")]
    DegenerateContactWindow { frame: u64 },

    #[error("fps must be a positive finite number, got {0}")]
    NonPositiveFps(f64),

    #[error("mass must be a positive finite number, got {0}")]
    NonPositiveMass(f64),

    #[error("frame {frame} is outside the video ({frame_count} frames)")]
    FrameOutOfRange { frame: u64, frame_count: u64 },

    #[error("video has no frames")]
    EmptyVideo,
}

impl JumpError {
    /// Stabil kode for JSON-svar (`reason`).
    pub fn reason(&self) -> &'static str {
        match self {
            JumpError::InvalidKeyFrameOrder { .. } => "invalid_key_frame_order",
            JumpError::DegenerateContactWindow { .. } => "degenerate_contact_window",
            JumpError::NonPositiveFps(_) => "non_positive_fps",
            JumpError::NonPositiveMass(_) => "non_positive_mass",
            JumpError::FrameOutOfRange { .. } => "frame_out_of_range",
            JumpError::EmptyVideo => "empty_video",
        }
    }
}

/// Feil på skall-nivå: motorfeil, uleselig video eller ugyldig JSON.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Engine(#[from] JumpError),

    #[error("video could not be processed: {0}")]
    VideoIo(String),

    #[error("request parse error at {path}: {message}")]
    Request { path: String, message: String },
}

impl ProcessingError {
    pub fn reason(&self) -> &'static str {
        match self {
            ProcessingError::Engine(e) => e.reason(),
            ProcessingError::VideoIo(_) => "video_io",
            ProcessingError::Request { .. } => "bad_request",
        }
    }

    /// Motorfeil og ugyldige forespørsler kan brukeren rette selv; videofeil ikke.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, ProcessingError::VideoIo(_))
    }

    /// Tekst som vises i UI. Videofeil rapporteres generisk.
    pub fn user_message(&self) -> String {
        match self {
            ProcessingError::VideoIo(_) => "The video could not be processed.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Feil ved lesing av semikolon-eksport.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unexpected header {found:?}, expected {expected:?}")]
    BadHeader { found: String, expected: String },

    #[error("unknown metric {0:?}")]
    UnknownMetric(String),

    #[error("metric {metric:?} has unparsable value {value:?}")]
    BadValue { metric: String, value: String },

    #[error("metric {0:?} missing from export")]
    MissingMetric(&'static str),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
