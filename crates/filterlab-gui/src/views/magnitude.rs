//! Magnitude frequency response view

use egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};
use serde::Serialize;

use filterlab_core::fft_utils::FftProcessor;
use filterlab_core::response::{freqz, select_range, FrequencyResponse};
use filterlab_core::{FilterSpec, SharedFilterSpec};

use crate::config::Settings;
use crate::event::ViewEvent;
use crate::platform::{self, FileError};

/// Amplitude scaling for the magnitude plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagnitudeUnit {
    /// 20·log10 |H|
    #[default]
    Db,
    /// |H|
    Linear,
    /// |H|²
    Power,
}

impl MagnitudeUnit {
    pub fn name(&self) -> &'static str {
        match self {
            MagnitudeUnit::Db => "dB",
            MagnitudeUnit::Linear => "linear",
            MagnitudeUnit::Power => "power",
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            MagnitudeUnit::Db => "|H| (dB)",
            MagnitudeUnit::Linear => "|H|",
            MagnitudeUnit::Power => "|H|²",
        }
    }

    pub const ALL: [MagnitudeUnit; 3] =
        [MagnitudeUnit::Db, MagnitudeUnit::Linear, MagnitudeUnit::Power];
}

/// Plot-ready magnitude curve with its axis labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeCurve {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct ExportPayload<'a> {
    filter: &'a FilterSpec,
    curve: &'a MagnitudeCurve,
}

pub struct MagnitudeView {
    unit: MagnitudeUnit,
    enabled: bool,
    reset_axes: bool,
    response: Option<FrequencyResponse>,
    curve: Option<MagnitudeCurve>,
    export_status: Option<String>,
}

impl Default for MagnitudeView {
    fn default() -> Self {
        Self::new()
    }
}

impl MagnitudeView {
    pub fn new() -> Self {
        Self {
            unit: MagnitudeUnit::Db,
            enabled: true,
            reset_axes: false,
            response: None,
            curve: None,
            export_status: None,
        }
    }

    pub fn unit(&self) -> MagnitudeUnit {
        self.unit
    }

    pub fn curve(&self) -> Option<&MagnitudeCurve> {
        self.curve.as_ref()
    }

    /// Switch the amplitude unit and re-derive the curve. No recomputation.
    pub fn set_unit(&mut self, unit: MagnitudeUnit, spec: &SharedFilterSpec) {
        if self.unit != unit {
            self.unit = unit;
            self.update_view(spec);
        }
    }

    /// React to a notification from the owning window.
    pub fn handle_event(&mut self, event: ViewEvent, spec: &SharedFilterSpec, settings: &Settings) {
        match event {
            ViewEvent::ViewChanged => self.update_view(spec),
            ViewEvent::DataChanged => self.recompute(spec, settings),
            ViewEvent::Home => {
                self.reset_axes = true;
                self.recompute(spec, settings);
            }
            ViewEvent::EnabledChanged(enabled) => {
                self.enabled = enabled;
                if enabled {
                    self.reset_axes = true;
                    self.recompute(spec, settings);
                }
            }
        }
    }

    fn recompute(&mut self, spec: &SharedFilterSpec, settings: &Settings) {
        if !self.enabled {
            return;
        }

        let (b, a) = {
            let s = spec.read().unwrap();
            (s.numerator(), s.denominator().to_vec())
        };

        match freqz(&b, &a, settings.params.n_fft, true) {
            Ok(mut response) => {
                response.sanitize();
                self.response = Some(response);
                self.update_view(spec);
            }
            Err(e) => tracing::warn!("frequency response evaluation failed: {e}"),
        }
    }

    fn update_view(&mut self, spec: &SharedFilterSpec) {
        let Some(response) = &self.response else {
            self.curve = None;
            return;
        };

        let (freqs, h, divisor, x_label) = {
            let s = spec.read().unwrap();
            let (freqs, h) = select_range(response, s.display_range, s.sample_rate);
            (freqs, h, s.freq_divisor(), s.freq_label())
        };

        let values = match self.unit {
            MagnitudeUnit::Db => FftProcessor::power_spectrum_db(&h),
            MagnitudeUnit::Linear => FftProcessor::magnitude_spectrum(&h),
            MagnitudeUnit::Power => h.iter().map(|c| c.norm_sqr()).collect(),
        };

        let points: Vec<[f64; 2]> = freqs
            .iter()
            .zip(&values)
            .map(|(&f, &v)| [f / divisor, v])
            .collect();

        self.curve = Some(MagnitudeCurve {
            x_label: x_label.to_string(),
            y_label: self.unit.axis_label().to_string(),
            points,
        });
    }

    pub fn render(&mut self, ui: &mut Ui, spec: &SharedFilterSpec, settings: &Settings) {
        ui.heading("Magnitude Frequency Response");
        ui.add_space(8.0);

        if !self.enabled {
            ui.label("Plots are disabled. Re-enable them in the toolbar to resume updates.");
            return;
        }

        if self.response.is_none() {
            self.recompute(spec, settings);
        }

        let (filter_name, phase_label, span) = {
            let s = spec.read().unwrap();
            (s.name.clone(), s.phase_label.clone(), s.freq_span())
        };

        ui.label(format!(
            "|H(e^jΩ)| for {}. The phase view currently plots {}.",
            filter_name, phase_label
        ));

        ui.add_space(12.0);

        let mut unit = self.unit;
        let mut export_clicked = false;
        ui.horizontal(|ui| {
            ui.label("Scale:");
            egui::ComboBox::from_id_salt("magnitude_unit")
                .selected_text(unit.name())
                .show_ui(ui, |ui| {
                    for u in MagnitudeUnit::ALL {
                        ui.selectable_value(&mut unit, u, u.name());
                    }
                });

            if ui.button("Export JSON").clicked() {
                export_clicked = true;
            }
        });
        self.set_unit(unit, spec);
        if export_clicked {
            self.export(spec, settings);
        }

        if let Some(status) = &self.export_status {
            ui.add_space(4.0);
            ui.label(status.clone());
        }

        ui.add_space(12.0);

        if let Some(curve) = &self.curve {
            let mut plot = Plot::new("magnitude_response_plot")
                .height(320.0)
                .allow_zoom(true)
                .allow_drag(true)
                .x_axis_label(curve.x_label.clone())
                .y_axis_label(curve.y_label.clone())
                .include_x(span.0)
                .include_x(span.1);
            if self.reset_axes {
                plot = plot.reset();
                self.reset_axes = false;
            }

            plot.show(ui, |plot_ui| {
                let points: PlotPoints = curve.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name("Magnitude")
                        .color(settings.curve_color(1)),
                );
            });

            ui.add_space(8.0);
            ui.label(format!(
                "{} points | FFT length {}",
                curve.points.len(),
                settings.params.n_fft
            ));
        }

        ui.add_space(20.0);
        ui.separator();

        ui.collapsing("Understanding Magnitude Response", |ui| {
            ui.label("• The magnitude shows how strongly each frequency passes through the filter");
            ui.label("• dB scale makes stopband attenuation visible; values are floored at -200 dB");
            ui.label("• An allpass filter is flat at 0 dB and shapes only the phase");
            ui.label("• Compare with the phase view to see delay and attenuation together");
        });
    }

    fn export(&mut self, spec: &SharedFilterSpec, settings: &Settings) {
        let Some(curve) = &self.curve else {
            return;
        };
        let filter = spec.read().unwrap().clone();
        let payload = ExportPayload {
            filter: &filter,
            curve,
        };

        match serde_json::to_string_pretty(&payload) {
            Ok(json) => {
                match platform::save_text_file(&settings.save_dir, "magnitude_response.json", &json)
                {
                    Ok(path) => {
                        self.export_status = Some(format!("Exported to {}", path.display()));
                    }
                    Err(FileError::Cancelled) => {}
                    Err(e) => {
                        tracing::warn!("magnitude curve export failed: {e}");
                        self.export_status = Some(format!("Export failed: {e}"));
                    }
                }
            }
            Err(e) => tracing::warn!("magnitude curve serialization failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Params, ThemeVariant, DARK_THEME};
    use filterlab_core::{presets, shared};
    use std::path::PathBuf;

    fn fixture() -> (MagnitudeView, SharedFilterSpec, Settings) {
        let settings = Settings {
            variant: ThemeVariant::Dark,
            theme: &DARK_THEME,
            params: Params::default(),
            base_dir: PathBuf::from("."),
            save_dir: PathBuf::from("."),
        };
        (MagnitudeView::new(), shared(FilterSpec::default()), settings)
    }

    #[test]
    fn test_data_changed_builds_curve() {
        let (mut view, spec, settings) = fixture();
        view.handle_event(ViewEvent::DataChanged, &spec, &settings);

        let curve = view.curve().unwrap();
        assert_eq!(curve.points.len(), 1024);
        assert_eq!(curve.y_label, "|H| (dB)");
        // Moving average has unity DC gain: 0 dB at the left edge
        assert!(curve.points[0][1].abs() < 1e-9);
    }

    #[test]
    fn test_db_values_respect_floor() {
        let (mut view, spec, settings) = fixture();
        spec.write().unwrap().apply_preset(&presets()[2]); // highpass blocks DC
        view.handle_event(ViewEvent::DataChanged, &spec, &settings);

        for p in &view.curve().unwrap().points {
            assert!(p[1] >= -200.0);
        }
    }

    #[test]
    fn test_allpass_is_flat_at_zero_db() {
        let (mut view, spec, settings) = fixture();
        spec.write().unwrap().apply_preset(&presets()[3]);
        view.handle_event(ViewEvent::DataChanged, &spec, &settings);

        for p in &view.curve().unwrap().points {
            assert!(p[1].abs() < 1e-6, "allpass not flat: {} dB", p[1]);
        }
    }

    #[test]
    fn test_linear_unit_is_nonnegative() {
        let (mut view, spec, settings) = fixture();
        assert_eq!(view.unit(), MagnitudeUnit::Db);
        view.handle_event(ViewEvent::DataChanged, &spec, &settings);
        view.set_unit(MagnitudeUnit::Linear, &spec);
        assert_eq!(view.unit(), MagnitudeUnit::Linear);

        let curve = view.curve().unwrap();
        assert_eq!(curve.y_label, "|H|");
        for p in &curve.points {
            assert!(p[1] >= 0.0);
        }
    }

    #[test]
    fn test_view_changed_keeps_stale_response() {
        let (mut view, spec, settings) = fixture();
        view.handle_event(ViewEvent::DataChanged, &spec, &settings);
        let before = view.curve().unwrap().clone();

        spec.write().unwrap().b = vec![1.0];
        view.handle_event(ViewEvent::ViewChanged, &spec, &settings);
        assert_eq!(view.curve().unwrap(), &before);
    }
}
