//! Panels of the main window. Actions are collected while drawing and run
//! once the frame's widgets are laid out.

use chrono::Local;
use eframe::egui;
use shared::domain::CountMode;

use crate::ui::app::{CountingGuiApp, StatusBannerSeverity};
use crate::ui::theme::{text_scale_range, ThemePreset, ThemeSettings, UiReadabilitySettings};

const NUMBER_FIELD_WIDTH: f32 = 80.0;
const RESULT_PANEL_HEIGHT: f32 = 240.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PanelActions {
    count: bool,
    clear_history: bool,
    copy_result: bool,
}

impl CountingGuiApp {
    pub(crate) fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("AI Counting Assistant");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        self.settings_open = !self.settings_open;
                    }
                });
            });
            ui.add_space(6.0);
        });
    }

    pub(crate) fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("{} operations logged", self.engine.log().len()));
                });
            });
        });
    }

    pub(crate) fn show_main_panel(&mut self, ctx: &egui::Context) {
        let mut actions = PanelActions::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_mode_selector(ui);
            ui.add_space(8.0);
            self.show_inputs(ui, &mut actions);
            ui.add_space(8.0);
            self.show_status_banner(ui);
            self.show_results(ui);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                actions.count |= ui.button("Count").clicked();
                actions.clear_history |= ui.button("Clear History").clicked();
                actions.copy_result |= ui
                    .add_enabled(!self.result_text.is_empty(), egui::Button::new("Copy Result"))
                    .clicked();
            });
            ui.add_space(8.0);

            self.show_history(ui);
        });

        if actions.count {
            self.run_count();
        }
        if actions.clear_history {
            self.clear_history();
        }
        if actions.copy_result {
            self.copy_result();
        }
    }

    fn show_mode_selector(&mut self, ui: &mut egui::Ui) {
        let mut selected = self.form.mode;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Counting Mode").strong());
            ui.horizontal(|ui| {
                for mode in CountMode::ALL {
                    ui.radio_value(&mut selected, mode, mode.label());
                }
            });
        });
        self.select_mode(selected);
    }

    fn show_inputs(&mut self, ui: &mut egui::Ui, actions: &mut PanelActions) {
        ui.horizontal(|ui| match self.form.mode {
            CountMode::Basic => {
                let fields = [
                    ("Start:", &mut self.form.range_start),
                    ("End:", &mut self.form.range_end),
                    ("Step:", &mut self.form.range_step),
                ];
                for (label, value) in fields {
                    ui.label(label);
                    let response = ui.add(
                        egui::TextEdit::singleline(value).desired_width(NUMBER_FIELD_WIDTH),
                    );
                    actions.count |= submitted(ui, &response);
                    ui.add_space(8.0);
                }
            }
            CountMode::Occurrences => {
                ui.label("Text to analyze:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.form.text)
                        .id_salt("occurrences_text")
                        .desired_width(360.0),
                );
                actions.count |= submitted(ui, &response);
                ui.checkbox(&mut self.form.case_sensitive, "Case sensitive");
            }
            CountMode::Custom => {
                ui.label("Items (comma separated):");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.form.items)
                        .id_salt("custom_items")
                        .hint_text("apple, pear, apple")
                        .desired_width(360.0),
                );
                actions.count |= submitted(ui, &response);
            }
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{}: {}", banner.title, banner.message))
                                .color(egui::Color32::WHITE),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(6.0);
        }
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Results").strong());
        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .max_height(RESULT_PANEL_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.result_text.as_str())
                        .font(egui::TextStyle::Monospace)
                        .desired_rows(10)
                        .desired_width(f32::INFINITY),
                );
            });
    }

    fn show_history(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("History").strong());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("history_scroll")
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    let log = self.engine.log();
                    if log.is_empty() {
                        ui.weak("No counting operations yet");
                    }
                    for (idx, record) in log.iter().enumerate() {
                        let line = record.history_line(idx + 1);
                        if self.readability.show_timestamps {
                            let at = record.recorded_at.with_timezone(&Local);
                            ui.label(format!("[{}] {line}", at.format("%H:%M:%S")));
                        } else {
                            ui.label(line);
                        }
                    }
                });
        });
    }

    pub(crate) fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let window_frame = egui::Frame::NONE
            .fill(ctx.style().visuals.window_fill)
            .stroke(egui::Stroke::new(
                1.0,
                ctx.style().visuals.window_stroke().color,
            ))
            .corner_radius(egui::CornerRadius::same(self.theme.panel_rounding))
            .inner_margin(egui::Margin::symmetric(12, 10));

        let mut settings_open = self.settings_open;
        egui::Window::new("Settings")
            .frame(window_frame)
            .open(&mut settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Theme").strong());
                egui::ComboBox::from_id_salt("theme_preset")
                    .selected_text(self.theme.preset.label())
                    .show_ui(ui, |ui| {
                        for preset in ThemePreset::ALL {
                            ui.selectable_value(&mut self.theme.preset, preset, preset.label());
                        }
                    });
                ui.horizontal(|ui| {
                    ui.label("Accent color");
                    ui.color_edit_button_srgba(&mut self.theme.accent_color);
                });
                ui.add(
                    egui::Slider::new(&mut self.theme.panel_rounding, 0..=16)
                        .text("Panel rounding"),
                );

                ui.separator();
                ui.label(egui::RichText::new("Readability").strong());
                ui.add(
                    egui::Slider::new(&mut self.readability.text_scale, text_scale_range())
                        .text("Text scale")
                        .step_by(0.05),
                );
                ui.checkbox(&mut self.readability.compact_density, "Compact UI density");
                ui.checkbox(
                    &mut self.readability.show_timestamps,
                    "Show history timestamps",
                );

                ui.separator();
                if ui.button("Reset all settings to defaults").clicked() {
                    self.theme = ThemeSettings::defaults();
                    self.readability = UiReadabilitySettings::defaults();
                }
            });
        self.settings_open = settings_open;
    }
}

fn submitted(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}
