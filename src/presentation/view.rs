use crate::application::coordinator::{Phase, Surface};
use crate::domain::model::RequestKind;
use crate::presentation::theme::Theme;
use tokio::sync::watch;

/// Renders coordinator surface changes to the terminal
pub struct TerminalView {
    theme: Theme,
    enable_emoji: bool,
}

impl TerminalView {
    pub fn new(theme: Theme, enable_emoji: bool) -> Self {
        Self {
            theme,
            enable_emoji,
        }
    }

    /// Line to print for a surface snapshot, if it warrants one
    pub fn render(&self, surface: &Surface) -> Option<String> {
        match surface.phase {
            Phase::Pending => {
                let label = match surface.kind {
                    Some(RequestKind::Word) => surface.lexicon.label,
                    _ => surface.translate.label,
                };
                let prefix = if self.enable_emoji { "⏳ " } else { "" };
                Some(format!("{}{}", prefix, (self.theme.busy)(label)))
            }
            Phase::Idle => {
                let result = surface.result.as_ref()?;
                if result.success {
                    let prefix = if self.enable_emoji { "🤟 " } else { "" };
                    let line = match surface.output.split_once(": ") {
                        Some((label, payload)) => format!(
                            "{}{} {}",
                            prefix,
                            (self.theme.label)(&format!("{}:", label)),
                            (self.theme.payload)(payload)
                        ),
                        None => format!("{}{}", prefix, (self.theme.payload)(&surface.output)),
                    };
                    Some(line)
                } else {
                    let prefix = if self.enable_emoji { "✘ " } else { "" };
                    Some(format!("{}{}", prefix, (self.theme.error)(&surface.output)))
                }
            }
        }
    }

    /// Print every surface change until the coordinator goes away
    pub async fn run(self, mut rx: watch::Receiver<Surface>) {
        while rx.changed().await.is_ok() {
            let surface = rx.borrow_and_update().clone();
            if let Some(line) = self.render(&surface) {
                if surface.phase == Phase::Pending {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            }
        }
    }
}
