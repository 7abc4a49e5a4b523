use tracing::{debug, warn};

use crate::error::TaskError;

/// Which text field a capture fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTarget {
    TaskEntry,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTranscript {
    pub target: VoiceTarget,
    pub text: String,
}

/// Trims the recognizer output and drops one sentence-ending period.
pub fn normalize_transcript(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

/// Capture bookkeeping for a single-shot recognizer. The target is fixed at
/// `start` and used when the result arrives.
#[derive(Debug)]
pub struct VoiceCapture {
    available: bool,
    listening: Option<VoiceTarget>,
}

impl VoiceCapture {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            listening: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn listening(&self) -> Option<VoiceTarget> {
        self.listening
    }

    pub fn mark_unavailable(&mut self) {
        self.available = false;
        self.listening = None;
    }

    pub fn start(&mut self, target: VoiceTarget) -> Result<(), TaskError> {
        if !self.available {
            return Err(TaskError::VoiceCaptureUnavailable);
        }
        debug!(?target, "voice capture started");
        self.listening = Some(target);
        Ok(())
    }

    /// Routes a transcript to the field that was active when capture began.
    pub fn on_result(&mut self, raw: &str) -> Option<VoiceTranscript> {
        let target = self.listening.take()?;
        Some(VoiceTranscript {
            target,
            text: normalize_transcript(raw),
        })
    }

    /// The recognizer refused to start, usually because a session is
    /// already running. That session keeps its original target.
    pub fn on_start_failed(
        &mut self,
        previous: Option<VoiceTarget>,
        reason: &str,
    ) -> TaskError {
        warn!(reason, ?previous, "voice capture did not start");
        self.listening = previous;
        TaskError::VoiceStartFailed(reason.to_string())
    }

    pub fn on_error(&mut self, reason: &str) -> TaskError {
        warn!(reason, "voice capture failed");
        self.listening = None;
        TaskError::VoiceCaptureFailed(reason.to_string())
    }

    pub fn on_end(&mut self) {
        self.listening = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{VoiceCapture, VoiceTarget, normalize_transcript};
    use crate::error::TaskError;

    #[test]
    fn strips_single_trailing_period() {
        assert_eq!(normalize_transcript(" Buy milk. "), "Buy milk");
        assert_eq!(normalize_transcript("Wait..."), "Wait..");
        assert_eq!(normalize_transcript("Walk dog"), "Walk dog");
    }

    #[test]
    fn result_goes_to_target_chosen_at_start() {
        let mut voice = VoiceCapture::new(true);
        voice.start(VoiceTarget::Search).expect("start");
        let transcript = voice.on_result("groceries.").expect("listening");
        assert_eq!(transcript.target, VoiceTarget::Search);
        assert_eq!(transcript.text, "groceries");
        assert_eq!(voice.listening(), None);
        assert!(voice.on_result("late").is_none());
    }

    #[test]
    fn unavailable_capability_rejects_start() {
        let mut voice = VoiceCapture::new(false);
        assert_eq!(
            voice.start(VoiceTarget::TaskEntry),
            Err(TaskError::VoiceCaptureUnavailable)
        );
    }

    #[test]
    fn error_clears_listening() {
        let mut voice = VoiceCapture::new(true);
        voice.start(VoiceTarget::TaskEntry).expect("start");
        let err = voice.on_error("no-speech");
        assert_eq!(err.to_string(), "Speech recognition error: no-speech");
        assert_eq!(voice.listening(), None);
    }

    #[test]
    fn refused_restart_keeps_running_capture() {
        let mut voice = VoiceCapture::new(true);
        voice.start(VoiceTarget::TaskEntry).expect("first start");

        let previous = voice.listening();
        voice.start(VoiceTarget::Search).expect("second start");
        let err = voice.on_start_failed(
            previous,
            "InvalidStateError: recognition has already started",
        );
        assert_eq!(
            err.to_string(),
            "Error starting speech recognition: InvalidStateError: recognition has already started"
        );
        assert_eq!(voice.listening(), Some(VoiceTarget::TaskEntry));

        let transcript = voice.on_result("Buy milk.").expect("in-flight result");
        assert_eq!(transcript.target, VoiceTarget::TaskEntry);
        assert_eq!(transcript.text, "Buy milk");
    }

    #[test]
    fn refused_first_start_leaves_idle() {
        let mut voice = VoiceCapture::new(true);
        voice.start(VoiceTarget::Search).expect("start");
        voice.on_start_failed(None, "NotAllowedError");
        assert_eq!(voice.listening(), None);
    }
}
