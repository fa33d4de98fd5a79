//! Outcomes of UI actions and error modeling for the desktop GUI controller.

use shared::{domain::CountMode, error::CountError};

pub enum UiEvent {
    Counted { mode: CountMode, report: String },
    HistoryCleared,
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    InvalidArgument,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Count,
    Clipboard,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_count_error(context: UiErrorContext, err: &CountError) -> Self {
        let category = match err {
            CountError::Validation(_) => UiErrorCategory::Validation,
            CountError::InvalidArgument(_) => UiErrorCategory::InvalidArgument,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner title: input problems versus anything unexpected.
    pub fn title(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Validation | UiErrorCategory::InvalidArgument => "Input Error",
            UiErrorCategory::Unknown => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_engine_and_validation_errors() {
        let err = UiError::from_count_error(
            UiErrorContext::Count,
            &CountError::invalid_argument("Step cannot be zero"),
        );
        assert_eq!(err.category(), UiErrorCategory::InvalidArgument);
        assert_eq!(err.title(), "Input Error");
        assert_eq!(err.message(), "invalid argument: Step cannot be zero");

        let err = UiError::from_count_error(
            UiErrorContext::Count,
            &CountError::validation("Please enter items to count."),
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.message(), "Please enter items to count.");
    }

    #[test]
    fn free_form_messages_are_unexpected_errors() {
        let err = UiError::from_message(UiErrorContext::Clipboard, "clipboard unavailable");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.context(), UiErrorContext::Clipboard);
        assert_eq!(err.title(), "Error");
    }
}
