// SPDX-License-Identifier: MIT OR Apache-2.0
//! Algorithm, language and playback controls.

use crate::listings::Language;
use traversal_viz_graph::TraversalMode;
use traversal_viz_sequencer::{MAX_SPEED, MIN_SPEED};

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Start playback of the selected algorithm
    Run,
    /// Stop the live run
    Stop,
}

/// Control bar state
#[derive(Debug, Clone)]
pub struct Controls {
    /// Selected algorithm
    pub mode: TraversalMode,
    /// Selected listing language
    pub language: Language,
    /// Playback speed multiplier
    pub speed: f32,
}

impl Controls {
    /// Create controls with the given selections
    pub fn new(mode: TraversalMode, language: Language, speed: f32) -> Self {
        Self { mode, language, speed }
    }

    /// Header shown above the listing ("BFS Algorithm")
    pub fn header(&self) -> String {
        format!("{} Algorithm", self.mode.short_name())
    }

    /// Draw the bar. Selectors and Run are disabled while `busy`.
    ///
    /// Returns the action requested this frame, if any.
    pub fn ui(&mut self, ui: &mut egui::Ui, busy: bool) -> Option<ControlAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading(self.header());
            ui.separator();

            ui.add_enabled_ui(!busy, |ui| {
                ui.label("Algorithm:");
                egui::ComboBox::from_id_salt("algorithm")
                    .selected_text(self.mode.short_name())
                    .show_ui(ui, |ui| {
                        for mode in TraversalMode::all() {
                            ui.selectable_value(&mut self.mode, *mode, mode.short_name())
                                .on_hover_text(mode.name());
                        }
                    });

                ui.label("Language:");
                egui::ComboBox::from_id_salt("language")
                    .selected_text(self.language.name())
                    .show_ui(ui, |ui| {
                        for language in Language::all() {
                            ui.selectable_value(&mut self.language, *language, language.name());
                        }
                    });

                let run_text = if busy { "Running..." } else { "Run" };
                if ui.button(run_text).on_hover_text("Play the traversal").clicked() {
                    action = Some(ControlAction::Run);
                }
            });

            if ui
                .add_enabled(busy, egui::Button::new("\u{25A0}"))
                .on_hover_text("Stop")
                .clicked()
            {
                action = Some(ControlAction::Stop);
            }

            ui.separator();
            ui.add(
                egui::Slider::new(&mut self.speed, MIN_SPEED..=MAX_SPEED)
                    .text("Speed")
                    .suffix("x")
                    .logarithmic(true),
            );
        });

        action
    }
}
