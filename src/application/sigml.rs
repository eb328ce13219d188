// Placeholder SiGML generation; real avatar animation is not implemented
use crate::domain::traits::SigmlPlayer;
use tracing::info;

/// Turn text into placeholder SiGML markup, one flat-hand sign per word.
///
/// Punctuation is stripped and words are lowercased, so word content never
/// needs XML escaping.
pub fn text_to_sigml(text: &str) -> String {
    let clean: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut sigml = String::from("<sigml>");
    for word in clean.split_whitespace() {
        sigml.push_str(&format!(
            "<sign_manual><handconfig handshape=\"flat\"/><handlocation location=\"{}\"/></sign_manual>",
            word
        ));
    }
    sigml.push_str("</sigml>");
    sigml
}

/// Number of signs in a SiGML document produced by [`text_to_sigml`]
pub fn sign_count(sigml: &str) -> usize {
    sigml.matches("<sign_manual>").count()
}

/// Player that only records what it was asked to play
#[derive(Debug, Default)]
pub struct LogPlayer;

impl SigmlPlayer for LogPlayer {
    fn load(&self, container: &str) {
        info!("Loading SiGML player in container: {}", container);
    }

    fn play(&self, sigml: &str) {
        info!("Playing SiGML ({} signs)", sign_count(sigml));
    }
}
