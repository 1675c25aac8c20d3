//! Cross-platform notification support
//! Currently only implements macOS notifications

use crate::domain::TimerMode;
#[cfg(target_os = "macos")]
use std::process::Command;

/// Text shown when an interval ends
pub fn session_complete_message(finished: TimerMode, next: TimerMode) -> String {
    if finished.is_break() {
        "Break over. Ready to grow again?".to_string()
    } else {
        format!("Focus session done. Time for a {}.", next.name().to_lowercase())
    }
}

/// Send a notification when a session or break finishes
pub fn notify_session_complete(finished: TimerMode, next: TimerMode) {
    let message = session_complete_message(finished, next);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Grove""#,
            message.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "Notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_complete_message() {
        assert_eq!(
            session_complete_message(TimerMode::Focus, TimerMode::LongBreak),
            "Focus session done. Time for a long break."
        );
        assert_eq!(
            session_complete_message(TimerMode::ShortBreak, TimerMode::Focus),
            "Break over. Ready to grow again?"
        );
    }
}
