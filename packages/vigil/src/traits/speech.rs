//! Text-to-speech collaborator trait.

/// Fire-and-forget speech playback.
///
/// The only collaborator allowed to outlive a turn: playback may continue
/// across turns, so it must be explicitly stoppable (e.g. when the session
/// view loses focus).
pub trait SpeechPlayer: Send + Sync {
    /// Start speaking; returns immediately.
    fn speak(&self, text: &str);

    /// Stop any in-flight playback.
    fn stop(&self);
}
