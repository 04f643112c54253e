//! Outward-facing collaborator interfaces
//!
//! The core never renders anything itself. User-visible messages go
//! through a `Notifier` and alarm sounds through an `AudioPlayer`;
//! both are fire-and-forget from the core's point of view. The default
//! implementations log, which is all a headless run needs.

use crate::error::Result;
use crate::models::AlarmSound;

/// Severity attached to a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Displays a transient message to the user. The core never consumes a
/// return value from it.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Notifier that writes to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => tracing::info!("Notification: {}", message),
            Severity::Warning => tracing::warn!("Notification: {}", message),
            Severity::Error => tracing::error!("Notification: {}", message),
        }
    }
}

/// Plays an alarm sound. Failures (e.g. a missing asset) stay inside
/// the caller; the scheduler logs them and carries on.
pub trait AudioPlayer: Send + Sync {
    fn play(&self, sound: AlarmSound) -> Result<()>;
}

/// Audio player that only logs the playback request.
pub struct LogAudioPlayer;

impl AudioPlayer for LogAudioPlayer {
    fn play(&self, sound: AlarmSound) -> Result<()> {
        tracing::info!("Audio playback requested: {}", sound.as_str());
        Ok(())
    }
}
