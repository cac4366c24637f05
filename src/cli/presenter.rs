//! CLI presenter for output formatting

use std::io::{self, Write};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::panel::{PanelView, RecordingStatus};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    pub fn is_spinner_active(&self) -> bool {
        self.spinner.is_some()
    }

    /// Keep the recording spinner in line with the panel: running with the
    /// live duration and size while recording, gone otherwise.
    pub fn sync_recording_status(&mut self, view: &PanelView) {
        match (view.status, self.spinner.is_some()) {
            (RecordingStatus::Recording, false) => {
                self.start_spinner(&Self::recording_line(view));
            }
            (RecordingStatus::Recording, true) => {
                self.update_spinner(&Self::recording_line(view));
            }
            (RecordingStatus::Ready, true) => self.stop_spinner(),
            (RecordingStatus::Ready, false) => {}
        }
    }

    fn recording_line(view: &PanelView) -> String {
        format!(
            "Recording {}  {}  {}",
            view.bag_name.bold(),
            view.duration.as_deref().unwrap_or("00:00:00"),
            view.bag_size.as_deref().unwrap_or("0.00 MB"),
        )
    }

    /// Print the whole panel to stdout
    pub fn show_panel(&mut self, view: &PanelView) {
        // Spinner redraws would interleave with the panel text
        let resume = self.spinner.is_some();
        self.stop_spinner();

        for line in Self::format_panel(view) {
            println!("{}", line);
        }

        if resume {
            self.sync_recording_status(view);
        }
    }

    /// Format the panel as lines of text
    pub fn format_panel(view: &PanelView) -> Vec<String> {
        let mut lines = Vec::new();

        let status = match view.status {
            RecordingStatus::Recording => format!("● {}", view.status).red().bold(),
            RecordingStatus::Ready => format!("● {}", view.status).green(),
        };
        lines.push(format!("{} {}", "Status:".bold(), status));
        if let (Some(duration), Some(size)) = (&view.duration, &view.bag_size) {
            lines.push(format!("  {} {}", "Duration:".cyan(), duration));
            lines.push(format!("  {} {}", "Bag size:".cyan(), size));
        }

        lines.push(String::new());
        lines.push(format!("{} {}", "Bag name:".cyan(), placeholder(&view.bag_name)));
        lines.push(format!(
            "{} {}",
            "Output directory:".cyan(),
            placeholder(&view.output_directory)
        ));

        lines.push(String::new());
        lines.push(format!(
            "{} ({} selected)",
            "Topics:".bold(),
            view.selected_count
        ));
        if view.checklist.is_empty() {
            lines.push(format!("  {}", "(no topics available)".dimmed()));
        }
        for entry in &view.checklist {
            let mark = if entry.checked { "[x]" } else { "[ ]" };
            lines.push(format!("  {} {}", mark, entry.name));
        }

        lines.push(String::new());
        let button = format!("[ {} ]", view.action.label);
        lines.push(if view.action.enabled {
            button.bold().to_string()
        } else {
            button.dimmed().to_string()
        });

        if !view.saved_bags.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}", "Saved Recordings".bold()));
            for bag in &view.saved_bags {
                lines.push(format!(
                    "  {}  {}  {}",
                    bag.name,
                    bag.size.cyan(),
                    bag.timestamp.dimmed()
                ));
            }
        }

        lines
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.suspend(|| eprintln!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        self.suspend(|| println!("{}", text));
    }

    /// Print the session prompt
    pub fn prompt(&self) {
        self.suspend(|| {
            print!("{} ", ">".cyan());
            let _ = io::stdout().flush();
        });
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        self.suspend(|| println!("{}: {}", key.cyan(), value));
    }

    fn suspend<F: FnOnce()>(&self, print: F) {
        match self.spinner {
            Some(ref spinner) => spinner.suspend(print),
            None => print(),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder(value: &str) -> String {
    if value.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::{ActionButton, SavedBag, TopicEntry};

    fn idle_view() -> PanelView {
        PanelView {
            status: RecordingStatus::Ready,
            duration: None,
            bag_size: None,
            bag_name: "run".to_string(),
            output_directory: String::new(),
            checklist: vec![
                TopicEntry {
                    name: "/imu".to_string(),
                    checked: true,
                },
                TopicEntry {
                    name: "/odom".to_string(),
                    checked: false,
                },
            ],
            action: ActionButton {
                label: "Start Recording",
                enabled: false,
            },
            selected_count: 1,
            saved_bags: Vec::new(),
        }
    }

    fn joined(view: &PanelView) -> String {
        colored::control::set_override(false);
        Presenter::format_panel(view).join("\n")
    }

    #[test]
    fn format_idle_panel() {
        let text = joined(&idle_view());
        assert!(text.contains("Status: ● Ready"));
        assert!(text.contains("Bag name: run"));
        assert!(text.contains("Output directory: (not set)"));
        assert!(text.contains("[x] /imu"));
        assert!(text.contains("[ ] /odom"));
        assert!(text.contains("(1 selected)"));
        assert!(text.contains("[ Start Recording ]"));
        assert!(!text.contains("Duration:"));
        assert!(!text.contains("Saved Recordings"));
    }

    #[test]
    fn format_recording_panel() {
        let mut view = idle_view();
        view.status = RecordingStatus::Recording;
        view.duration = Some("00:01:05".to_string());
        view.bag_size = Some("2.50 MB".to_string());
        view.action = ActionButton {
            label: "Stop Recording",
            enabled: true,
        };
        let text = joined(&view);
        assert!(text.contains("● Recording"));
        assert!(text.contains("Duration: 00:01:05"));
        assert!(text.contains("Bag size: 2.50 MB"));
        assert!(text.contains("[ Stop Recording ]"));
    }

    #[test]
    fn format_saved_recordings() {
        let mut view = idle_view();
        view.saved_bags = vec![SavedBag {
            name: "run".to_string(),
            size: "1.00 MB".to_string(),
            timestamp: "2024-01-01 10:00:00".to_string(),
        }];
        let text = joined(&view);
        assert!(text.contains("Saved Recordings"));
        assert!(text.contains("run  1.00 MB  2024-01-01 10:00:00"));
    }

    #[test]
    fn format_empty_catalog() {
        let mut view = idle_view();
        view.checklist.clear();
        assert!(joined(&view).contains("(no topics available)"));
    }

    #[test]
    fn spinner_follows_recording_status() {
        let mut presenter = Presenter::new();
        let mut view = idle_view();
        presenter.sync_recording_status(&view);
        assert!(!presenter.is_spinner_active());

        view.status = RecordingStatus::Recording;
        presenter.sync_recording_status(&view);
        assert!(presenter.is_spinner_active());

        view.status = RecordingStatus::Ready;
        presenter.sync_recording_status(&view);
        assert!(!presenter.is_spinner_active());
    }
}
