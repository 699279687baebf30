// SPDX-License-Identifier: MIT OR Apache-2.0
//! Code panel - read-only listing for the selected algorithm and language.

use crate::controls::Controls;
use crate::listings::listing;

/// The code listing panel
pub struct CodeListingPanel {
    /// Show the line-number gutter
    pub show_line_numbers: bool,
    /// Listing font size
    pub font_size: f32,
}

impl CodeListingPanel {
    /// Create a new code listing panel
    pub fn new() -> Self {
        Self {
            show_line_numbers: true,
            font_size: 13.0,
        }
    }

    /// Render the code listing panel
    pub fn ui(&mut self, ui: &mut egui::Ui, controls: &Controls) {
        let text = listing(controls.mode, controls.language);

        ui.horizontal(|ui| {
            ui.strong(controls.header());
            ui.label(
                egui::RichText::new(controls.language.name())
                    .color(ui.visuals().weak_text_color()),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Copy").on_hover_text("Copy listing").clicked() {
                    ui.output_mut(|o| o.copied_text = text.to_string());
                }
                ui.checkbox(&mut self.show_line_numbers, "Line numbers");
            });
        });

        ui.separator();

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    if self.show_line_numbers {
                        ui.label(
                            egui::RichText::new(line_numbers(text))
                                .monospace()
                                .size(self.font_size)
                                .color(ui.visuals().weak_text_color()),
                        );
                        ui.separator();
                    }
                    ui.label(egui::RichText::new(text).monospace().size(self.font_size));
                });
            });
    }
}

impl Default for CodeListingPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Right-aligned line numbers, one per line of `text`
fn line_numbers(text: &str) -> String {
    let count = text.lines().count().max(1);
    let width = count.to_string().len();
    (1..=count)
        .map(|n| format!("{n:>width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_numbers_match_line_count() {
        let text = "a\nb\nc";
        assert_eq!(line_numbers(text), "1\n2\n3");
    }

    #[test]
    fn test_line_numbers_are_right_aligned() {
        let text = vec!["x"; 12].join("\n");
        let gutter = line_numbers(&text);
        let lines: Vec<_> = gutter.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], " 1");
        assert_eq!(lines[11], "12");
    }

    #[test]
    fn test_empty_text_has_one_line() {
        assert_eq!(line_numbers(""), "1");
    }
}
