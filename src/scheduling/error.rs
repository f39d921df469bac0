use thiserror::Error;

/// Errors raised by the pure scheduling functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    /// The identifier does not name a zone in the timezone database.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A working-hours window whose start is not before its end.
    #[error("Invalid working hours window: {start_hour}-{end_hour}")]
    InvalidWindow {
        /// Requested start hour
        start_hour: u32,
        /// Requested end hour
        end_hour: u32,
    },

    /// A participant of the proposal has no conversion to format.
    #[error("No conversion available for timezone: {0}")]
    MissingConversion(String),

    /// A conversion would leave the range of representable instants.
    #[error("Time is outside the supported range: {0}")]
    OutOfRange(String),
}

/// Result alias for scheduling operations
pub type SchedulingResult<T> = Result<T, SchedulingError>;
