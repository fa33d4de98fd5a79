//! Turns the form the user filled in into engine calls and UI events.

use counting_core::{report::render_report, CountingEngine};
use shared::{domain::CountMode, error::CountError, request::CountRequest};

use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Raw text of every input field, kept across mode switches.
#[derive(Debug, Clone, PartialEq)]
pub struct CountForm {
    pub mode: CountMode,
    pub range_start: String,
    pub range_end: String,
    pub range_step: String,
    pub text: String,
    pub case_sensitive: bool,
    pub items: String,
}

impl CountForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: settings.default_mode,
            range_start: settings.range_start.to_string(),
            range_end: settings.range_end.to_string(),
            range_step: settings.range_step.to_string(),
            text: String::new(),
            case_sensitive: settings.case_sensitive,
            items: String::new(),
        }
    }

    pub fn to_request(&self) -> Result<CountRequest, CountError> {
        match self.mode {
            CountMode::Basic => CountRequest::range_from_fields(
                &self.range_start,
                &self.range_end,
                &self.range_step,
            ),
            CountMode::Occurrences => {
                CountRequest::text_from_input(&self.text, self.case_sensitive)
            }
            CountMode::Custom => CountRequest::items_from_list(&self.items),
        }
    }
}

pub fn perform_count(
    engine: &mut CountingEngine,
    form: &CountForm,
    max_range_len: usize,
) -> UiEvent {
    let outcome = form.to_request().and_then(|request| {
        request.ensure_within(max_range_len)?;
        let result = engine.execute(&request)?;
        Ok(render_report(&request, &result))
    });

    match outcome {
        Ok(report) => {
            tracing::debug!(mode = %form.mode, "ui: count completed");
            UiEvent::Counted {
                mode: form.mode,
                report,
            }
        }
        Err(err) => {
            tracing::warn!(mode = %form.mode, error = %err, "ui: count rejected");
            UiEvent::Error(UiError::from_count_error(UiErrorContext::Count, &err))
        }
    }
}

pub fn clear_history(engine: &mut CountingEngine) -> UiEvent {
    engine.clear_log();
    UiEvent::HistoryCleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiErrorCategory;

    fn form(mode: CountMode) -> CountForm {
        CountForm {
            mode,
            ..CountForm::from_settings(&Settings::default())
        }
    }

    #[test]
    fn default_form_counts_one_to_ten() {
        let mut engine = CountingEngine::new();
        match perform_count(&mut engine, &form(CountMode::Basic), 100) {
            UiEvent::Counted { mode, report } => {
                assert_eq!(mode, CountMode::Basic);
                assert_eq!(
                    report,
                    "Counting from 1 to 10 by 1:\n[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]"
                );
            }
            _ => panic!("expected a counted event"),
        }
        assert_eq!(engine.log().len(), 1);
    }

    #[test]
    fn empty_text_is_a_validation_error_and_not_logged() {
        let mut engine = CountingEngine::new();
        match perform_count(&mut engine, &form(CountMode::Occurrences), 100) {
            UiEvent::Error(err) => {
                assert_eq!(err.category(), UiErrorCategory::Validation);
                assert_eq!(err.message(), "Please enter text to analyze.");
            }
            _ => panic!("expected an error event"),
        }
        assert!(engine.log().is_empty());
    }

    #[test]
    fn zero_step_surfaces_engine_error() {
        let mut engine = CountingEngine::new();
        let mut zero_step = form(CountMode::Basic);
        zero_step.range_step = "0".to_string();

        match perform_count(&mut engine, &zero_step, 100) {
            UiEvent::Error(err) => assert_eq!(err.category(), UiErrorCategory::InvalidArgument),
            _ => panic!("expected an error event"),
        }
    }

    #[test]
    fn oversized_range_is_rejected_before_the_engine() {
        let mut engine = CountingEngine::new();
        let mut large = form(CountMode::Basic);
        large.range_end = "1000000".to_string();

        assert!(matches!(
            perform_count(&mut engine, &large, 1_000),
            UiEvent::Error(_)
        ));
        assert!(engine.log().is_empty());
    }

    #[test]
    fn custom_items_are_split_and_counted() {
        let mut engine = CountingEngine::new();
        let mut custom = form(CountMode::Custom);
        custom.items = "a, b, a".to_string();

        match perform_count(&mut engine, &custom, 100) {
            UiEvent::Counted { report, .. } => {
                assert!(report.contains("Items analyzed: ['a', 'b', 'a']"));
                assert!(report.contains("  'a': 2\n"));
            }
            _ => panic!("expected a counted event"),
        }
    }

    #[test]
    fn clearing_history_empties_engine_log() {
        let mut engine = CountingEngine::new();
        perform_count(&mut engine, &form(CountMode::Basic), 100);
        assert!(matches!(clear_history(&mut engine), UiEvent::HistoryCleared));
        assert!(engine.log().is_empty());
    }
}
