/// Errors surfaced to the user. All of them end the current attempt but
/// never the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Task cannot be empty!")]
    EmptyTaskText,
    #[error("no task at position {0}")]
    TaskNotFound(usize),
    #[error("Speech recognition not supported in your browser")]
    VoiceCaptureUnavailable,
    #[error("Error starting speech recognition: {0}")]
    VoiceStartFailed(String),
    #[error("Speech recognition error: {0}")]
    VoiceCaptureFailed(String),
}
