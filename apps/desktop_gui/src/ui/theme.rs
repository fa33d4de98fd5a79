//! Theme and readability settings, and their persisted form.

use std::collections::BTreeMap;

use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::CountMode;

pub const SETTINGS_STORAGE_KEY: &str = "counting_gui.settings";

const MIN_TEXT_SCALE: f32 = 0.8;
const MAX_TEXT_SCALE: f32 = 1.4;
const MAX_PANEL_ROUNDING: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreset {
    EguiDark,
    AtomOneDark,
    EguiLight,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 3] = [Self::EguiDark, Self::AtomOneDark, Self::EguiLight];

    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::EguiDark => "Egui Dark",
            ThemePreset::AtomOneDark => "Atom One Dark",
            ThemePreset::EguiLight => "Egui Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSettings {
    pub preset: ThemePreset,
    pub accent_color: egui::Color32,
    pub panel_rounding: u8,
}

impl ThemeSettings {
    pub fn defaults() -> Self {
        Self {
            preset: ThemePreset::EguiLight,
            accent_color: egui::Color32::from_rgb(88, 101, 242),
            panel_rounding: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiReadabilitySettings {
    pub text_scale: f32,
    pub compact_density: bool,
    pub show_timestamps: bool,
}

impl UiReadabilitySettings {
    pub fn defaults() -> Self {
        Self {
            text_scale: 1.0,
            compact_density: false,
            show_timestamps: false,
        }
    }
}

/// What survives a restart: appearance plus the last selected mode. The
/// operation log itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    pub theme_preset: ThemePreset,
    pub accent_color: [u8; 4],
    pub panel_rounding: u8,
    pub text_scale: f32,
    pub compact_density: bool,
    pub show_timestamps: bool,
    pub last_mode: Option<CountMode>,
}

impl Default for PersistedDesktopSettings {
    fn default() -> Self {
        Self::from_runtime(
            ThemeSettings::defaults(),
            UiReadabilitySettings::defaults(),
            None,
        )
    }
}

impl PersistedDesktopSettings {
    pub fn into_runtime(self) -> (ThemeSettings, UiReadabilitySettings, Option<CountMode>) {
        (
            ThemeSettings {
                preset: self.theme_preset,
                accent_color: egui::Color32::from_rgba_unmultiplied(
                    self.accent_color[0],
                    self.accent_color[1],
                    self.accent_color[2],
                    self.accent_color[3],
                ),
                panel_rounding: self.panel_rounding.min(MAX_PANEL_ROUNDING),
            },
            UiReadabilitySettings {
                text_scale: clamp_text_scale(self.text_scale),
                compact_density: self.compact_density,
                show_timestamps: self.show_timestamps,
            },
            self.last_mode,
        )
    }

    pub fn from_runtime(
        theme: ThemeSettings,
        readability: UiReadabilitySettings,
        last_mode: Option<CountMode>,
    ) -> Self {
        Self {
            theme_preset: theme.preset,
            accent_color: theme.accent_color.to_srgba_unmultiplied(),
            panel_rounding: theme.panel_rounding.min(MAX_PANEL_ROUNDING),
            text_scale: clamp_text_scale(readability.text_scale),
            compact_density: readability.compact_density,
            show_timestamps: readability.show_timestamps,
            last_mode,
        }
    }
}

fn clamp_text_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE)
    } else {
        1.0
    }
}

pub fn text_scale_range() -> std::ops::RangeInclusive<f32> {
    MIN_TEXT_SCALE..=MAX_TEXT_SCALE
}

pub fn visuals_for_theme(theme: ThemeSettings) -> egui::Visuals {
    let mut visuals = match theme.preset {
        ThemePreset::EguiDark => egui::Visuals::dark(),
        ThemePreset::AtomOneDark => {
            let mut v = egui::Visuals::dark();
            v.override_text_color = Some(egui::Color32::from_rgb(171, 178, 191));
            v.window_fill = egui::Color32::from_rgb(40, 44, 52);
            v.panel_fill = egui::Color32::from_rgb(33, 37, 43);
            v.extreme_bg_color = egui::Color32::from_rgb(24, 26, 31);
            v.faint_bg_color = egui::Color32::from_rgb(52, 57, 66);
            v
        }
        ThemePreset::EguiLight => egui::Visuals::light(),
    };

    visuals.hyperlink_color = theme.accent_color;
    visuals.selection.bg_fill = theme.accent_color;
    visuals.widgets.active.bg_fill = theme.accent_color;
    visuals.widgets.hovered.bg_fill = theme.accent_color.gamma_multiply(0.85);

    let radius = egui::CornerRadius::same(theme.panel_rounding);
    visuals.widgets.noninteractive.corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;
    visuals.widgets.open.corner_radius = radius;

    visuals
}

pub fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_settings_clamp_out_of_range_values() {
        let persisted = PersistedDesktopSettings {
            panel_rounding: 200,
            text_scale: 9.0,
            ..PersistedDesktopSettings::default()
        };
        let (theme, readability, last_mode) = persisted.into_runtime();
        assert_eq!(theme.panel_rounding, 16);
        assert_eq!(readability.text_scale, 1.4);
        assert_eq!(last_mode, None);
    }

    #[test]
    fn persisted_settings_survive_json_round_trip() {
        let settings = PersistedDesktopSettings::from_runtime(
            ThemeSettings::defaults(),
            UiReadabilitySettings::defaults(),
            Some(CountMode::Occurrences),
        );
        let json = serde_json::to_string(&settings).expect("serialize");
        let restored: PersistedDesktopSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, settings);
    }

    #[test]
    fn missing_persisted_fields_fall_back_to_defaults() {
        let restored: PersistedDesktopSettings =
            serde_json::from_str(r#"{"theme_preset":"atom_one_dark"}"#).expect("deserialize");
        assert_eq!(restored.theme_preset, ThemePreset::AtomOneDark);
        assert_eq!(restored.text_scale, 1.0);
    }

    #[test]
    fn text_styles_scale_with_setting() {
        let base = scaled_text_styles(1.0);
        let larger = scaled_text_styles(1.2);
        let body = egui::TextStyle::Body;
        assert!(larger[&body].size > base[&body].size);
    }
}
