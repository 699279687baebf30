// SPDX-License-Identifier: MIT OR Apache-2.0
//! Console panel - in-app log output.

use std::collections::VecDeque;
use std::sync::mpsc;

/// A tracing event captured by the [`TracingBridge`] layer.
#[derive(Debug, Clone)]
pub struct TracingEvent {
    /// The log level.
    pub level: LogLevel,
    /// The formatted message, with structured fields appended.
    pub message: String,
    /// Target (module path).
    pub target: String,
}

/// A `tracing_subscriber::Layer` that forwards events over an `mpsc` channel
/// so the [`ConsolePanel`] can display them.
pub struct TracingBridge {
    sender: mpsc::Sender<TracingEvent>,
}

impl TracingBridge {
    /// Create a new bridge and return `(layer, receiver)`.
    pub fn new() -> (Self, mpsc::Receiver<TracingEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl<S> tracing_subscriber::Layer<S> for TracingBridge
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let level = LogLevel::from(*event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        // The receiver is gone once the window closes
        let _ = self.sender.send(TracingEvent {
            level,
            message: visitor.finish(),
            target: event.metadata().target().to_string(),
        });
    }
}

/// Visitor that collects the `message` field and any other fields.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (true, true) => "(empty)".to_string(),
            (true, false) => self.fields.join(", "),
            (false, true) => self.message,
            (false, false) => format!("{} {}", self.message, self.fields.join(", ")),
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{} = {:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{} = {}", field.name(), value));
        }
    }
}

/// Format a SystemTime as HH:MM:SS (UTC)
fn format_system_time(time: &std::time::SystemTime) -> String {
    let secs = time
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{:02}:{:02}:{:02}", (secs / 3600) % 24, (secs / 60) % 60, secs % 60)
}

/// Log level for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Trace
    Trace,
    /// Debug
    Debug,
    /// Info
    Info,
    /// Warning
    Warn,
    /// Error
    Error,
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

impl LogLevel {
    const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            Self::Trace => "T",
            Self::Debug => "D",
            Self::Info => "I",
            Self::Warn => "W",
            Self::Error => "E",
        }
    }

    fn color(&self) -> egui::Color32 {
        match self {
            Self::Trace => egui::Color32::from_rgb(100, 100, 100),
            Self::Debug => egui::Color32::from_rgb(150, 150, 150),
            Self::Info => egui::Color32::from_rgb(200, 200, 200),
            Self::Warn => egui::Color32::from_rgb(255, 200, 80),
            Self::Error => egui::Color32::from_rgb(255, 100, 100),
        }
    }

    fn bg_color(&self) -> egui::Color32 {
        match self {
            Self::Trace | Self::Debug | Self::Info => egui::Color32::TRANSPARENT,
            Self::Warn => egui::Color32::from_rgba_unmultiplied(255, 200, 80, 20),
            Self::Error => egui::Color32::from_rgba_unmultiplied(255, 100, 100, 30),
        }
    }
}

/// A log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Level
    pub level: LogLevel,
    /// Module path the event came from
    pub target: String,
    /// Message text
    pub message: String,
    /// Time of the latest occurrence
    pub timestamp: String,
    /// Number of collapsed duplicates
    pub count: u32,
}

/// The console panel
pub struct ConsolePanel {
    /// Receiver for tracing events
    tracing_rx: Option<mpsc::Receiver<TracingEvent>>,
    /// Log entries
    entries: VecDeque<LogEntry>,
    /// Maximum entries to keep
    pub max_entries: usize,
    /// Search filter
    pub search: String,
    /// Auto-scroll to bottom
    pub auto_scroll: bool,
    /// Show timestamps
    pub show_timestamps: bool,
    /// Show the event target
    pub show_targets: bool,
    /// Collapse duplicate messages
    pub collapse_duplicates: bool,
    /// Per-level filter toggles, indexed by level
    visible: [bool; 5],
    /// Entry counts, indexed by level
    counts: [usize; 5],
}

impl ConsolePanel {
    /// Create a console panel wired to a tracing receiver.
    pub fn with_tracing_receiver(tracing_rx: Option<mpsc::Receiver<TracingEvent>>) -> Self {
        Self {
            tracing_rx,
            entries: VecDeque::new(),
            max_entries: 1000,
            search: String::new(),
            auto_scroll: true,
            show_timestamps: false,
            show_targets: false,
            collapse_duplicates: true,
            visible: [false, true, true, true, true],
            counts: [0; 5],
        }
    }

    /// Add a log entry
    pub fn log(&mut self, level: LogLevel, target: impl Into<String>, message: impl Into<String>) {
        let target = target.into();
        let message = message.into();
        let timestamp = format_system_time(&std::time::SystemTime::now());
        self.counts[level.index()] += 1;

        if self.collapse_duplicates {
            if let Some(last) = self.entries.back_mut() {
                if last.level == level && last.message == message && last.target == target {
                    last.count += 1;
                    last.timestamp = timestamp;
                    return;
                }
            }
        }

        self.entries.push_back(LogEntry {
            level,
            target,
            message,
            timestamp,
            count: 1,
        });

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counts = [0; 5];
    }

    /// Entries passing the level toggles and search filter
    pub fn filtered(&self) -> impl Iterator<Item = &LogEntry> {
        let needle = self.search.to_lowercase();
        self.entries.iter().filter(move |entry| {
            self.visible[entry.level.index()]
                && (needle.is_empty() || entry.message.to_lowercase().contains(&needle))
        })
    }

    /// Show or hide a level
    pub fn set_level_visible(&mut self, level: LogLevel, visible: bool) {
        self.visible[level.index()] = visible;
    }

    /// Drain any pending tracing events into the log.
    pub fn poll_tracing_events(&mut self) {
        let Some(rx) = &self.tracing_rx else {
            return;
        };

        // Drain into a local buffer first; `log` needs `&mut self`
        let events: Vec<_> = rx.try_iter().collect();
        for event in events {
            self.log(event.level, event.target, event.message);
        }
    }

    /// Render the console panel
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.poll_tracing_events();

        ui.horizontal(|ui| {
            if ui.button("Clear").on_hover_text("Clear all logs").clicked() {
                self.clear();
            }

            ui.separator();

            // Per-level toggle buttons with counts
            for level in LogLevel::ALL {
                let shown = self.visible[level.index()];
                let text = format!("{} {}", level.short_name(), self.counts[level.index()]);
                let color = if shown { level.color() } else { egui::Color32::GRAY };
                if ui
                    .add(egui::Button::new(egui::RichText::new(text).color(color).monospace()))
                    .on_hover_text(format!("{} messages", level.name()))
                    .clicked()
                {
                    self.set_level_visible(level, !shown);
                }
            }

            ui.separator();

            ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Search...")
                    .desired_width(150.0),
            );
            if !self.search.is_empty() && ui.button("x").on_hover_text("Clear search").clicked() {
                self.search.clear();
            }

            ui.separator();

            ui.menu_button("Options", |ui| {
                ui.checkbox(&mut self.auto_scroll, "Auto-scroll");
                ui.checkbox(&mut self.show_timestamps, "Show timestamps");
                ui.checkbox(&mut self.show_targets, "Show targets");
                ui.checkbox(&mut self.collapse_duplicates, "Collapse duplicates");
            });
        });

        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(self.auto_scroll)
            .show(ui, |ui| {
                for entry in self.filtered() {
                    self.entry_ui(ui, entry);
                }
            });
    }

    fn entry_ui(&self, ui: &mut egui::Ui, entry: &LogEntry) {
        let bg_color = entry.level.bg_color();

        let response = ui.horizontal(|ui| {
            let rect = ui.available_rect_before_wrap();
            if bg_color != egui::Color32::TRANSPARENT {
                ui.painter().rect_filled(
                    egui::Rect::from_min_size(rect.min, egui::vec2(ui.available_width(), 18.0)),
                    0.0,
                    bg_color,
                );
            }

            if self.show_timestamps {
                ui.label(
                    egui::RichText::new(&entry.timestamp)
                        .monospace()
                        .size(11.0)
                        .color(egui::Color32::from_rgb(100, 100, 100)),
                );
            }

            ui.label(
                egui::RichText::new(format!("[{}]", entry.level.short_name()))
                    .monospace()
                    .size(11.0)
                    .color(entry.level.color()),
            );

            if entry.count > 1 {
                ui.label(
                    egui::RichText::new(format!("({})", entry.count))
                        .monospace()
                        .size(10.0)
                        .color(egui::Color32::from_rgb(150, 150, 200)),
                );
            }

            if self.show_targets {
                ui.label(
                    egui::RichText::new(&entry.target)
                        .monospace()
                        .size(10.0)
                        .color(egui::Color32::from_rgb(100, 150, 200)),
                );
            }

            ui.label(
                egui::RichText::new(&entry.message)
                    .monospace()
                    .size(12.0)
                    .color(entry.level.color()),
            );
        });

        response.response.context_menu(|ui| {
            if ui.button("Copy message").clicked() {
                ui.output_mut(|o| o.copied_text = entry.message.clone());
                ui.close_menu();
            }
        });
    }
}

impl Default for ConsolePanel {
    fn default() -> Self {
        Self::with_tracing_receiver(None)
    }
}
