use arboard::Clipboard;
use counting_core::CountingEngine;
use eframe::egui;
use shared::domain::CountMode;

use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::{self, perform_count, CountForm};
use crate::ui::theme::{
    scaled_text_styles, visuals_for_theme, PersistedDesktopSettings, ThemeSettings,
    UiReadabilitySettings, SETTINGS_STORAGE_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
pub(crate) struct StatusBanner {
    pub(crate) severity: StatusBannerSeverity,
    pub(crate) title: &'static str,
    pub(crate) message: String,
}

pub struct CountingGuiApp {
    pub(crate) engine: CountingEngine,
    pub(crate) form: CountForm,
    pub(crate) max_range_len: usize,

    pub(crate) result_text: String,
    pub(crate) status: String,
    pub(crate) status_banner: Option<StatusBanner>,

    pub(crate) settings_open: bool,
    pub(crate) theme: ThemeSettings,
    applied_theme: Option<ThemeSettings>,
    pub(crate) readability: UiReadabilitySettings,
    applied_readability: Option<UiReadabilitySettings>,
}

impl CountingGuiApp {
    pub fn new(
        settings: &Settings,
        mode_override: Option<CountMode>,
        persisted_settings: Option<PersistedDesktopSettings>,
    ) -> Self {
        let (theme, readability, last_mode) =
            persisted_settings.unwrap_or_default().into_runtime();

        let mut form = CountForm::from_settings(settings);
        if let Some(mode) = mode_override.or(last_mode) {
            form.mode = mode;
        }

        let mut engine = CountingEngine::new();
        engine.set_mode(form.mode);

        Self {
            engine,
            form,
            max_range_len: settings.max_range_len,
            result_text: String::new(),
            status: "Ready".to_string(),
            status_banner: None,
            settings_open: false,
            theme,
            applied_theme: None,
            readability,
            applied_readability: None,
        }
    }

    pub(crate) fn select_mode(&mut self, mode: CountMode) {
        if self.form.mode != mode {
            self.form.mode = mode;
            self.engine.set_mode(mode);
            tracing::debug!(mode = %mode, "ui: mode switched");
        }
    }

    pub(crate) fn run_count(&mut self) {
        let event = perform_count(&mut self.engine, &self.form, self.max_range_len);
        self.apply_event(event);
    }

    pub(crate) fn clear_history(&mut self) {
        let event = orchestration::clear_history(&mut self.engine);
        self.apply_event(event);
    }

    pub(crate) fn copy_result(&mut self) {
        if self.result_text.is_empty() {
            self.apply_event(UiEvent::Info("Nothing to copy yet".to_string()));
            return;
        }

        let copied = Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(self.result_text.clone()));
        let event = match copied {
            Ok(()) => UiEvent::Info("Result copied to clipboard".to_string()),
            Err(err) => UiEvent::Error(UiError::from_message(
                UiErrorContext::Clipboard,
                format!("Failed to copy result: {err}"),
            )),
        };
        self.apply_event(event);
    }

    pub(crate) fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Counted { mode, report } => {
                self.result_text = report;
                self.status = format!("{} complete", mode.label());
                self.status_banner = None;
            }
            UiEvent::HistoryCleared => {
                self.result_text.clear();
                self.status = "History cleared".to_string();
                self.status_banner = None;
            }
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Error(err) => {
                tracing::debug!(
                    context = ?err.context(),
                    category = ?err.category(),
                    "ui: showing error banner"
                );
                self.status = format!("{}: {}", err.title(), err.message());
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    title: err.title(),
                    message: err.message().to_string(),
                });
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme)
            && self.applied_readability == Some(self.readability)
        {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals_for_theme(self.theme);
        style.text_styles = scaled_text_styles(self.readability.text_scale);

        if self.readability.compact_density {
            style.spacing.item_spacing = egui::vec2(6.0, 4.0);
            style.spacing.button_padding = egui::vec2(8.0, 5.0);
            style.spacing.interact_size = egui::vec2(40.0, 24.0);
        } else {
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 6.0);
            style.spacing.interact_size = egui::vec2(40.0, 30.0);
        }
        ctx.set_style(style);
        self.applied_theme = Some(self.theme);
        self.applied_readability = Some(self.readability);
    }
}

impl eframe::App for CountingGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme_if_needed(ctx);

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_main_panel(ctx);
        self.show_settings_window(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDesktopSettings::from_runtime(
            self.theme,
            self.readability,
            Some(self.form.mode),
        );
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> CountingGuiApp {
        CountingGuiApp::new(&Settings::default(), None, None)
    }

    #[test]
    fn mode_override_beats_persisted_mode() {
        let persisted = PersistedDesktopSettings {
            last_mode: Some(CountMode::Custom),
            ..PersistedDesktopSettings::default()
        };
        let restored = CountingGuiApp::new(&Settings::default(), None, Some(persisted.clone()));
        assert_eq!(restored.form.mode, CountMode::Custom);

        let overridden = CountingGuiApp::new(
            &Settings::default(),
            Some(CountMode::Occurrences),
            Some(persisted),
        );
        assert_eq!(overridden.form.mode, CountMode::Occurrences);
        assert_eq!(overridden.engine.mode(), CountMode::Occurrences);
    }

    #[test]
    fn count_then_clear_resets_result_panel() {
        let mut app = app();
        app.run_count();
        assert!(app.result_text.starts_with("Counting from 1 to 10 by 1:"));
        assert_eq!(app.engine.log().len(), 1);

        app.clear_history();
        assert!(app.result_text.is_empty());
        assert!(app.engine.log().is_empty());
    }

    #[test]
    fn failed_count_keeps_previous_result_and_shows_banner() {
        let mut app = app();
        app.run_count();
        let previous = app.result_text.clone();

        app.form.range_step = "0".to_string();
        app.run_count();

        assert_eq!(app.result_text, previous);
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.title, "Input Error");
        assert_eq!(app.engine.log().len(), 1);
    }

    #[test]
    fn switching_mode_keeps_field_contents() {
        let mut app = app();
        app.form.items = "a, b".to_string();
        app.select_mode(CountMode::Custom);
        app.select_mode(CountMode::Basic);
        app.select_mode(CountMode::Custom);
        assert_eq!(app.form.items, "a, b");
        assert_eq!(app.engine.mode(), CountMode::Custom);
    }

    #[test]
    fn copying_empty_result_is_a_no_op() {
        let mut app = app();
        app.copy_result();
        assert_eq!(app.status, "Nothing to copy yet");
        assert!(app.status_banner.is_none());
    }
}
