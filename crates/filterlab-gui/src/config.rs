//! Style and Default-Parameter Store
//!
//! One immutable [`Settings`] object is built at startup and handed to every
//! view behind an `Arc`. Nothing here changes after construction; theme
//! selection is a compile-time constant, so switching themes means
//! rebuilding, not flipping state at runtime.

use std::path::{Path, PathBuf};

use egui::{Color32, Visuals};

/// Which of the two built-in themes is active. Fixed at build time.
const THEME: ThemeVariant = ThemeVariant::Dark;

/// The two theme flavors filterlab ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeVariant::Dark => "dark",
            ThemeVariant::Light => "light",
        }
    }

    /// Plot palette for this variant
    pub fn palette(&self) -> &'static PlotTheme {
        match self {
            ThemeVariant::Dark => &DARK_THEME,
            ThemeVariant::Light => &LIGHT_THEME,
        }
    }
}

/// Colors the plot views pull from the active theme.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotTheme {
    /// Fill behind panels and around the axes
    pub figure_fill: Color32,
    /// Fill of the plot area itself
    pub axes_fill: Color32,
    /// Label and tick text
    pub text_color: Color32,
    /// Grid lines
    pub grid_color: Color32,
    /// Curve color cycle; views index into this in drawing order
    pub curve_colors: &'static [Color32],
}

/// Dark flavor: near-black figure, saturated curve colors.
pub const DARK_THEME: PlotTheme = PlotTheme {
    figure_fill: Color32::from_rgb(32, 32, 32),
    axes_fill: Color32::BLACK,
    text_color: Color32::from_rgb(230, 230, 230),
    grid_color: Color32::from_rgb(64, 64, 64),
    curve_colors: &[
        Color32::from_rgb(255, 84, 84),   // red
        Color32::from_rgb(84, 255, 84),   // green
        Color32::from_rgb(84, 255, 255),  // cyan
        Color32::from_rgb(255, 84, 255),  // magenta
        Color32::from_rgb(255, 255, 84),  // yellow
        Color32::WHITE,
    ],
};

/// Light flavor: white figure, darkened curve colors.
pub const LIGHT_THEME: PlotTheme = PlotTheme {
    figure_fill: Color32::WHITE,
    axes_fill: Color32::from_rgb(250, 250, 250),
    text_color: Color32::BLACK,
    grid_color: Color32::from_rgb(200, 200, 200),
    curve_colors: &[
        Color32::from_rgb(200, 0, 0),    // red
        Color32::from_rgb(0, 0, 200),    // blue
        Color32::from_rgb(0, 160, 160),  // cyan
        Color32::from_rgb(180, 0, 180),  // magenta
        Color32::BLACK,
    ],
};

/// Marker styling for pole and zero annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub size: f32,
    pub color: Color32,
}

/// Shared numeric defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// FFT length for frequency-response evaluation
    pub n_fft: usize,
    /// Marker for poles (denominator roots)
    pub pole_marker: MarkerStyle,
    /// Marker for zeros (numerator roots)
    pub zero_marker: MarkerStyle,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            n_fft: 2048,
            pole_marker: MarkerStyle {
                size: 12.0,
                color: Color32::from_rgb(220, 50, 50),
            },
            zero_marker: MarkerStyle {
                size: 12.0,
                color: Color32::from_rgb(50, 90, 220),
            },
        }
    }
}

/// Everything the application reads but never writes after startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub variant: ThemeVariant,
    pub theme: &'static PlotTheme,
    pub params: Params,
    /// Directory the process started in
    pub base_dir: PathBuf,
    /// Directory offered for exports, already validated
    pub save_dir: PathBuf,
}

impl Settings {
    /// Build the settings for this process.
    ///
    /// The export directory can be pointed somewhere else with the
    /// `FILTERLAB_SAVE_DIR` environment variable; a configured directory that
    /// does not exist falls back to the base directory with a warning.
    pub fn load() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let configured = std::env::var_os("FILTERLAB_SAVE_DIR").map(PathBuf::from);
        let (save_dir, _) = resolve_save_dir(configured.as_deref(), &base_dir);

        Self {
            variant: THEME,
            theme: THEME.palette(),
            params: Params::default(),
            base_dir,
            save_dir,
        }
    }

    /// Widget styling for the active theme, applied to the egui context once
    /// at startup.
    pub fn visuals(&self) -> Visuals {
        let mut visuals = match self.variant {
            ThemeVariant::Dark => Visuals::dark(),
            ThemeVariant::Light => Visuals::light(),
        };
        visuals.panel_fill = self.theme.figure_fill;
        visuals.window_fill = self.theme.figure_fill;
        visuals.extreme_bg_color = self.theme.axes_fill;
        visuals.override_text_color = Some(self.theme.text_color);
        // Plot grids draw with the noninteractive stroke
        visuals.widgets.noninteractive.bg_stroke.color = self.theme.grid_color;
        visuals
    }

    /// Curve color `index` steps into the active cycle, wrapping around.
    pub fn curve_color(&self, index: usize) -> Color32 {
        self.theme.curve_colors[index % self.theme.curve_colors.len()]
    }
}

/// Decide where exports go.
///
/// Returns the directory plus whether the configured path had to be
/// abandoned. `None` means nothing was configured and the base directory is
/// used without comment.
pub fn resolve_save_dir(configured: Option<&Path>, base_dir: &Path) -> (PathBuf, bool) {
    match configured {
        None => (base_dir.to_path_buf(), false),
        Some(dir) if dir.is_dir() => (dir.to_path_buf(), false),
        Some(dir) => {
            tracing::warn!(
                "configured save directory {} does not exist, falling back to {}",
                dir.display(),
                base_dir.display()
            );
            (base_dir.to_path_buf(), true)
        }
    }
}
