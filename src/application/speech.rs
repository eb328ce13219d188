use crate::domain::traits::SpeechResult;

/// Text accumulated from a recognizer
///
/// Final results are committed; an interim result only replaces the current
/// hypothesis until the next final one arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    committed: String,
    interim: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, result: &SpeechResult) {
        let text = result.transcript.trim();
        if result.is_final {
            self.interim.clear();
            if !text.is_empty() {
                self.committed.push_str(text);
                self.committed.push(' ');
            }
        } else {
            self.interim = text.to_string();
        }
    }

    /// Committed text followed by the current hypothesis
    pub fn text(&self) -> String {
        let mut text = self.committed.clone();
        text.push_str(&self.interim);
        text.trim().to_string()
    }

    pub fn has_final(&self) -> bool {
        !self.committed.trim().is_empty()
    }

    pub fn reset(&mut self) {
        self.committed.clear();
        self.interim.clear();
    }

    /// Committed text, clearing the transcript
    pub fn take(&mut self) -> String {
        let text = self.committed.trim().to_string();
        self.reset();
        text
    }
}
