//! Line-oriented rendering of engine state

use harmony_core::{PlaybackMode, Track};
use harmony_playback::{EngineState, EngineStatus, PlayerView};
use std::io::Write;

/// Format seconds as `m:ss`, or `--:--` when unknown
pub fn format_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s.floor() as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "--:--".to_string(),
    }
}

pub fn format_track(index: usize, track: &Track) -> String {
    format!(
        "{:>3}. {} - {} [{}]",
        index + 1,
        track.title,
        track.artist,
        format_time((track.duration_seconds > 0.0).then_some(track.duration_seconds))
    )
}

/// Multi-line summary used by `harmony status`
pub fn format_state(state: &EngineState) -> String {
    let mut lines = Vec::new();
    match (&state.current_track, state.current_index) {
        (Some(track), Some(index)) => {
            lines.push(format!("Track:    {}", format_track(index, track).trim_start()));
        }
        _ => lines.push("Track:    (none)".to_string()),
    }
    lines.push(format!("Status:   {}", status_label(state.status)));
    lines.push(format!(
        "Position: {} / {}",
        format_time(Some(state.position_seconds)),
        format_time(state.duration_seconds)
    ));
    lines.push(format!(
        "Volume:   {:.0}%{}",
        state.volume * 100.0,
        if state.is_muted { " (muted)" } else { "" }
    ));
    lines.push(format!("Mode:     {}", state.mode));
    lines.push(format!("Tracks:   {}", state.track_count));
    if let Some(message) = &state.last_error {
        lines.push(format!("Error:    {}", message));
    }
    lines.join("\n")
}

pub fn status_label(status: EngineStatus) -> &'static str {
    match status {
        EngineStatus::Idle => "idle",
        EngineStatus::Paused => "paused",
        EngineStatus::Playing => "playing",
        EngineStatus::Error => "error",
    }
}

/// Prints transitions as they happen; position updates are not printed
pub struct ConsoleView<W: Write + Send> {
    out: W,
}

impl ConsoleView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::debug!("Console write failed: {}", e);
        }
    }
}

impl<W: Write + Send> PlayerView for ConsoleView<W> {
    fn render_track(&mut self, index: usize, track: &Track) {
        self.line(&format!("> {}", format_track(index, track).trim_start()));
    }

    fn render_status(&mut self, status: EngineStatus) {
        self.line(&format!("  [{}]", status_label(status)));
    }

    fn render_volume(&mut self, level: f64, is_muted: bool) {
        if is_muted {
            self.line("  volume: muted");
        } else {
            self.line(&format!("  volume: {:.0}%", level * 100.0));
        }
    }

    fn render_mode(&mut self, mode: PlaybackMode) {
        self.line(&format!("  mode: {}", mode));
    }

    fn render_error(&mut self, message: &str) {
        self.line(&format!("! {}", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(Some(0.0)), "0:00");
        assert_eq!(format_time(Some(65.9)), "1:05");
        assert_eq!(format_time(Some(3600.0)), "60:00");
        assert_eq!(format_time(None), "--:--");
        assert_eq!(format_time(Some(f64::NAN)), "--:--");
    }

    #[test]
    fn track_line_is_one_based() {
        let track = Track::new("a", "a.mp3").with_title("Intro").with_duration(90.0);
        assert_eq!(format_track(0, &track), "  1. Intro - Unknown Artist [1:30]");
    }

    #[test]
    fn console_view_writes_transitions() {
        let mut view = ConsoleView::new(Vec::new());
        view.render_status(EngineStatus::Playing);
        view.render_volume(0.5, false);
        view.render_volume(0.5, true);
        view.render_position(10.0, Some(20.0));

        let text = String::from_utf8(view.out).unwrap();
        assert_eq!(text, "  [playing]\n  volume: 50%\n  volume: muted\n");
    }
}
