//! Error type shared by the schedule model.

/// Failures raised at the edges of the schedule model.
///
/// All of these are boundary rejections: the model never stores a value that
/// produced one of these errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid date input: {input:?} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },
    #[error("unknown status code: {code:?}")]
    UnknownStatus { code: String },
    #[error("unknown theme: {slug:?}")]
    UnknownTheme { slug: String },
}
