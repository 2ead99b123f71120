use thiserror::Error;

pub type GwResult<T> = Result<T, GwError>;

#[derive(Error, Debug)]
pub enum GwError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },

    #[error("Waveform error: {message}")]
    Waveform { message: String },

    #[error("Match error: {message}")]
    Match { message: String },
}
