//! Theme and styling for the assistant UI.

use egui::{Color32, Rounding};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Error color
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_muted: Color32,

    /// Mic control fill while idle
    pub mic_idle: Color32,
    /// Mic control fill and pulse while listening
    pub listening: Color32,
    /// Listening overlay background
    pub overlay_bg: Color32,

    /// Message bubble fills
    pub user_bubble: Color32,
    pub bot_bubble: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,
    /// Border radius for message bubbles
    pub bubble_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(6, 182, 212), // Cyan
            error: Color32::from_rgb(239, 68, 68),   // Red

            bg_primary: Color32::from_rgb(17, 24, 39),   // Dark blue-gray
            bg_secondary: Color32::from_rgb(31, 41, 55), // Lighter blue-gray
            bg_tertiary: Color32::from_rgb(55, 65, 81),  // Even lighter

            text_primary: Color32::from_rgb(249, 250, 251), // Almost white
            text_muted: Color32::from_rgb(156, 163, 175),   // Medium gray

            mic_idle: Color32::from_rgb(51, 65, 85),  // Slate
            listening: Color32::from_rgb(220, 38, 38), // Red
            overlay_bg: Color32::from_rgba_unmultiplied(6, 182, 212, 230),

            user_bubble: Color32::from_rgb(37, 99, 235), // Blue
            bot_bubble: Color32::from_rgb(55, 65, 81),   // Gray

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),
            bubble_rounding: Rounding::same(10.0),

            spacing: 12.0,
            spacing_sm: 6.0,
        }
    }

    /// Apply the theme to the egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        ctx.set_visuals(visuals);
    }
}
