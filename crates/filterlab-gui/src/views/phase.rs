//! Phase frequency response view

use egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};
use serde::Serialize;

use filterlab_core::phase::{phase_curve, PhaseUnit};
use filterlab_core::response::{freqz, select_range, FrequencyResponse};
use filterlab_core::{FilterSpec, SharedFilterSpec};

use crate::config::Settings;
use crate::event::ViewEvent;
use crate::platform::{self, FileError};

/// Plot-ready phase curve with its axis labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseCurve {
    pub x_label: String,
    pub y_label: String,
    /// (frequency, phase) pairs in display units
    pub points: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct ExportPayload<'a> {
    filter: &'a FilterSpec,
    curve: &'a PhaseCurve,
}

pub struct PhaseView {
    unit: PhaseUnit,
    wrapped: bool,
    enabled: bool,
    reset_axes: bool,
    /// Whole-period response, refreshed only when the filter data changes
    response: Option<FrequencyResponse>,
    /// Curve derived from `response` and the current presentation state
    curve: Option<PhaseCurve>,
    export_status: Option<String>,
}

impl Default for PhaseView {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseView {
    pub fn new() -> Self {
        Self {
            unit: PhaseUnit::Rad,
            wrapped: false,
            enabled: true,
            reset_axes: false,
            response: None,
            curve: None,
            export_status: None,
        }
    }

    pub fn unit(&self) -> PhaseUnit {
        self.unit
    }

    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    pub fn curve(&self) -> Option<&PhaseCurve> {
        self.curve.as_ref()
    }

    /// Switch the phase unit and re-derive the curve. No recomputation.
    pub fn set_unit(&mut self, unit: PhaseUnit, spec: &SharedFilterSpec) {
        if self.unit != unit {
            self.unit = unit;
            self.update_view(spec);
        }
    }

    /// Toggle wrapped display and re-derive the curve. No recomputation.
    pub fn set_wrapped(&mut self, wrapped: bool, spec: &SharedFilterSpec) {
        if self.wrapped != wrapped {
            self.wrapped = wrapped;
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

    /// Evaluate a fresh whole-period response for the current coefficients,
    /// sanitize it, and rebuild the curve. Skipped while disabled; the view
    /// catches up when it is enabled again.
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
                let replaced = response.sanitize();
                if replaced > 0 {
                    tracing::debug!("replaced {replaced} non-finite response samples");
                }
                self.response = Some(response);
                self.update_view(spec);
            }
            // Keeps the previous curve; presets can never trigger this.
            Err(e) => tracing::warn!("frequency response evaluation failed: {e}"),
        }
    }

    /// Derive the displayed curve from the cached response and the current
    /// presentation state, and publish the phase axis label/unit for the
    /// sibling views.
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

        let phase = phase_curve(&h, self.wrapped, self.unit);
        let points: Vec<[f64; 2]> = freqs
            .iter()
            .zip(&phase)
            .map(|(&f, &p)| [f / divisor, p])
            .collect();

        let y_label = self.unit.axis_label();
        self.curve = Some(PhaseCurve {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            points,
        });

        let mut s = spec.write().unwrap();
        s.phase_label = y_label.to_string();
        s.phase_unit = self.unit;
    }

    pub fn render(&mut self, ui: &mut Ui, spec: &SharedFilterSpec, settings: &Settings) {
        ui.heading("Phase Frequency Response");
        ui.add_space(8.0);

        if !self.enabled {
            ui.label("Plots are disabled. Re-enable them in the toolbar to resume updates.");
            return;
        }

        // Nothing cached yet on the very first frame
        if self.response.is_none() {
            self.recompute(spec, settings);
        }

        let (filter_name, class_name, kind_name, span) = {
            let s = spec.read().unwrap();
            (s.name.clone(), s.class.name(), s.kind.name(), s.freq_span())
        };

        ui.label(format!(
            "Phase of H(e^jΩ) for {} ({} {}). Unwrapped phase stays continuous \
            across the axis; wrapped phase folds every value into (-π, π].",
            filter_name, class_name, kind_name
        ));

        ui.add_space(12.0);

        // Controls
        let mut unit = self.unit;
        let mut wrapped = self.wrapped;
        let mut export_clicked = false;
        ui.horizontal(|ui| {
            ui.label("Unit:");
            egui::ComboBox::from_id_salt("phase_unit")
                .selected_text(unit.name())
                .show_ui(ui, |ui| {
                    for u in PhaseUnit::ALL {
                        ui.selectable_value(&mut unit, u, u.name());
                    }
                });

            ui.checkbox(&mut wrapped, "Wrapped phase");

            if ui.button("Export JSON").clicked() {
                export_clicked = true;
            }
        });
        self.set_unit(unit, spec);
        self.set_wrapped(wrapped, spec);
        if export_clicked {
            self.export(spec, settings);
        }

        if let Some(status) = &self.export_status {
            ui.add_space(4.0);
            ui.label(status.clone());
        }

        ui.add_space(12.0);

        if let Some(curve) = &self.curve {
            let mut plot = Plot::new("phase_response_plot")
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
                        .name("Phase")
                        .color(settings.curve_color(0)),
                );
            });

            ui.add_space(8.0);
            ui.label(format!(
                "{} points | FFT length {} | theme {}",
                curve.points.len(),
                settings.params.n_fft,
                settings.variant.name()
            ));
        }

        ui.add_space(20.0);
        ui.separator();

        ui.collapsing("Understanding Phase Response", |ui| {
            ui.label("• Phase tells how much each frequency component is delayed by the filter");
            ui.label("• A straight line means constant group delay (linear phase)");
            ui.label("• Wrapped phase folds the same curve into (-π, π], so steady delay shows as a sawtooth");
            ui.label("• In rad/π units the value at Nyquist reads directly as delay in samples");
            ui.label("• IIR filters bend the phase near their pole frequencies");
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
                match platform::save_text_file(&settings.save_dir, "phase_response.json", &json) {
                    Ok(path) => {
                        self.export_status = Some(format!("Exported to {}", path.display()));
                    }
                    Err(FileError::Cancelled) => {}
                    Err(e) => {
                        tracing::warn!("phase curve export failed: {e}");
                        self.export_status = Some(format!("Export failed: {e}"));
                    }
                }
            }
            Err(e) => tracing::warn!("phase curve serialization failed: {e}"),
        }
    }
}
