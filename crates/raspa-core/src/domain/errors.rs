use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RaspaResult<T> = Result<T, RaspaError>;
pub type ClassifyResult<T> = RaspaResult<T>;
pub type PrepareResult<T> = RaspaResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaspaErrorCategory {
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl RaspaErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }
}

/// Fatal pre-submission failure.
///
/// `placeholder` is a stable code (`INPUT.MISSING_PARAMETERS`, `IO.INPUT_WRITE`, ...)
/// that callers can match on without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaspaError {
    category: RaspaErrorCategory,
    placeholder: &'static str,
    message: String,
    job_id: Option<String>,
}

impl RaspaError {
    pub fn new(
        category: RaspaErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
            job_id: None,
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            RaspaErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(RaspaErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(RaspaErrorCategory::InternalError, placeholder, message)
    }

    /// Attaches the job identifier unless one is already recorded.
    pub fn with_job(mut self, job_id: impl Into<String>) -> Self {
        if self.job_id.is_none() {
            self.job_id = Some(job_id.into());
        }
        self
    }

    pub const fn category(&self) -> RaspaErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        match &self.job_id {
            Some(job_id) => format!(
                "ERROR: [{}] {} (job {})",
                self.placeholder, self.message, job_id
            ),
            None => format!("ERROR: [{}] {}", self.placeholder, self.message),
        }
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for RaspaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )?;
        if let Some(job_id) = &self.job_id {
            write!(f, " (job {})", job_id)?;
        }
        Ok(())
    }
}

impl Error for RaspaError {}

#[cfg(test)]
mod tests {
    use super::{RaspaError, RaspaErrorCategory};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (
                RaspaErrorCategory::InputValidationError,
                2,
                "InputValidationError",
            ),
            (RaspaErrorCategory::IoSystemError, 3, "IoSystemError"),
            (RaspaErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, name) in cases {
            assert_eq!(category.exit_code(), exit_code);
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = RaspaError::input_validation("INPUT.MISSING_CODE", "no code specified");

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.MISSING_CODE] no code specified"
        );
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 2");
    }

    #[test]
    fn job_context_is_attached_once() {
        let error = RaspaError::input_validation("INPUT.UNRECOGNIZED_NODES", "unrecognized input nodes: foo")
            .with_job("job-1")
            .with_job("job-2");

        assert_eq!(error.job_id(), Some("job-1"));
        assert_eq!(
            error.to_string(),
            "InputValidationError [INPUT.UNRECOGNIZED_NODES] unrecognized input nodes: foo (job job-1)"
        );
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.UNRECOGNIZED_NODES] unrecognized input nodes: foo (job job-1)"
        );
    }
}
