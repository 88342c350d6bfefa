//! Application shell
//!
//! Owns the shared filter spec, the immutable settings, and the plot views.
//! Control interactions map onto [`ViewEvent`] notifications which are
//! dispatched synchronously to every view, whether or not its tab is
//! currently visible, so switching tabs never shows stale curves.

use std::sync::Arc;

use egui::{RichText, Ui};

use filterlab_core::filter_spec::{presets, FilterSpec, FreqUnit};
use filterlab_core::response::DisplayRange;
use filterlab_core::{shared, SharedFilterSpec};

use crate::config::Settings;
use crate::event::ViewEvent;
use crate::views::{MagnitudeView, PhaseView};

/// Central-panel tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Phase,
    Magnitude,
}

pub struct FilterLab {
    settings: Arc<Settings>,
    filter: SharedFilterSpec,
    selected_tab: Tab,
    phase: PhaseView,
    magnitude: MagnitudeView,
    plots_enabled: bool,
    preset_index: usize,
}

impl FilterLab {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Arc::new(Settings::load());
        cc.egui_ctx.set_visuals(settings.visuals());

        tracing::info!(
            theme = settings.variant.name(),
            save_dir = %settings.save_dir.display(),
            "filterlab starting"
        );

        let mut app = Self {
            settings,
            filter: shared(FilterSpec::default()),
            selected_tab: Tab::Phase,
            phase: PhaseView::new(),
            magnitude: MagnitudeView::new(),
            plots_enabled: true,
            preset_index: 0,
        };
        // Warm the views so the first frame already has curves
        app.broadcast(ViewEvent::DataChanged);
        app
    }

    /// Deliver one event to every view, in a fixed order, on this thread.
    fn broadcast(&mut self, event: ViewEvent) {
        self.phase.handle_event(event, &self.filter, &self.settings);
        self.magnitude.handle_event(event, &self.filter, &self.settings);
    }

    fn side_panel(&mut self, ui: &mut Ui) {
        ui.add_space(4.0);
        ui.heading("Filter");
        ui.add_space(8.0);

        // Preset selection replaces the coefficient set
        let mut preset_index = self.preset_index;
        egui::ComboBox::from_id_salt("filter_preset")
            .selected_text(presets()[preset_index].name)
            .width(200.0)
            .show_ui(ui, |ui| {
                for (i, preset) in presets().iter().enumerate() {
                    ui.selectable_value(&mut preset_index, i, preset.name);
                }
            });
        if preset_index != self.preset_index {
            self.preset_index = preset_index;
            self.filter
                .write()
                .unwrap()
                .apply_preset(&presets()[preset_index]);
            self.broadcast(ViewEvent::DataChanged);
        }

        {
            let s = self.filter.read().unwrap();
            ui.label(format!("{} {}", s.class.name(), s.kind.short_name()));
        }

        ui.add_space(8.0);

        let mut gain = self.filter.read().unwrap().gain;
        let gain_changed = ui
            .add(
                egui::Slider::new(&mut gain, 0.1..=10.0)
                    .logarithmic(true)
                    .text("Gain")
                    .clamping(egui::SliderClamping::Always),
            )
            .changed();
        if gain_changed {
            self.filter.write().unwrap().gain = gain;
            self.broadcast(ViewEvent::DataChanged);
        }

        ui.add_space(12.0);
        ui.separator();
        ui.heading("Display");
        ui.add_space(8.0);

        // Sample rate only rescales the axis; the response is stored in
        // radians and stays valid
        let mut rate = self.filter.read().unwrap().sample_rate;
        let mut rate_changed = false;
        ui.horizontal(|ui| {
            ui.label("Sample rate:");
            rate_changed = ui
                .add(
                    egui::DragValue::new(&mut rate)
                        .speed(100.0)
                        .range(1.0..=1e9)
                        .suffix(" Hz"),
                )
                .changed();
        });
        if rate_changed {
            self.filter.write().unwrap().sample_rate = rate;
            self.broadcast(ViewEvent::ViewChanged);
        }

        let mut range = self.filter.read().unwrap().display_range;
        let old_range = range;
        ui.horizontal(|ui| {
            ui.label("Range:");
            egui::ComboBox::from_id_salt("freq_range")
                .selected_text(range.name())
                .show_ui(ui, |ui| {
                    for r in DisplayRange::ALL {
                        ui.selectable_value(&mut range, r, r.name());
                    }
                });
        });
        if range != old_range {
            self.filter.write().unwrap().display_range = range;
            self.broadcast(ViewEvent::ViewChanged);
        }

        let mut freq_unit = self.filter.read().unwrap().freq_unit;
        let old_unit = freq_unit;
        ui.horizontal(|ui| {
            ui.label("Freq unit:");
            egui::ComboBox::from_id_salt("freq_unit")
                .selected_text(freq_unit.name())
                .show_ui(ui, |ui| {
                    for u in FreqUnit::ALL {
                        ui.selectable_value(&mut freq_unit, u, u.name());
                    }
                });
        });
        if freq_unit != old_unit {
            self.filter.write().unwrap().freq_unit = freq_unit;
            self.broadcast(ViewEvent::ViewChanged);
        }

        ui.add_space(12.0);
        ui.separator();
        ui.heading("Coefficients");
        ui.add_space(4.0);

        let (b, a) = {
            let s = self.filter.read().unwrap();
            (s.b.clone(), s.a.clone())
        };
        let zero_marker = self.settings.params.zero_marker;
        let pole_marker = self.settings.params.pole_marker;

        ui.label(
            RichText::new("b (zeros)")
                .color(zero_marker.color)
                .size(zero_marker.size),
        );
        ui.indent("b_coefficients", |ui| {
            for (i, c) in b.iter().enumerate() {
                ui.monospace(format!("b[{i}] = {c:+.6}"));
            }
        });

        ui.add_space(4.0);
        ui.label(
            RichText::new("a (poles)")
                .color(pole_marker.color)
                .size(pole_marker.size),
        );
        ui.indent("a_coefficients", |ui| {
            for (i, c) in a.iter().enumerate() {
                ui.monospace(format!("a[{i}] = {c:+.6}"));
            }
        });
    }
}

impl eframe::App for FilterLab {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("FilterLab");
                ui.separator();

                if ui.button("Home").clicked() {
                    self.broadcast(ViewEvent::Home);
                }

                let mut enabled = self.plots_enabled;
                if ui.checkbox(&mut enabled, "Plots enabled").changed() {
                    self.plots_enabled = enabled;
                    self.broadcast(ViewEvent::EnabledChanged(enabled));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("theme: {}", self.settings.variant.name()));
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (phase_label, phase_unit, rate, nyquist) = {
                    let s = self.filter.read().unwrap();
                    (
                        s.phase_label.clone(),
                        s.phase_unit.name(),
                        s.sample_rate,
                        s.nyquist(),
                    )
                };
                // The label the phase view published for its siblings
                ui.label(format!("Phase axis: {phase_label} [{phase_unit}]"));
                ui.separator();
                ui.label(format!("f_S = {rate:.0} Hz, Nyquist {nyquist:.0} Hz"));
                ui.separator();
                ui.label(format!("exports: {}", self.settings.save_dir.display()));
            });
        });

        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.side_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.selected_tab, Tab::Phase, "Phase");
                ui.selectable_value(&mut self.selected_tab, Tab::Magnitude, "Magnitude");
            });
            ui.separator();
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| match self.selected_tab {
                Tab::Phase => self.phase.render(ui, &self.filter, &self.settings),
                Tab::Magnitude => self.magnitude.render(ui, &self.filter, &self.settings),
            });
        });
    }
}
