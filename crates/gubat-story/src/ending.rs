use std::fmt;

/// How a finished story turned out, judged from the ending node's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndingKind {
    /// The hunter became a legend.
    Legendary,
    /// The hunter died.
    GameOver,
    /// The hunter was turned by the creature.
    Corrupted,
    /// The hunter ran away.
    Coward,
    /// Any other ending.
    Default,
}

impl EndingKind {
    /// Classify an ending by keywords in its text (case-insensitive).
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("legend") {
            Self::Legendary
        } else if text.contains("game over") {
            Self::GameOver
        } else if text.contains("corrupted") {
            Self::Corrupted
        } else if text.contains("coward") {
            Self::Coward
        } else {
            Self::Default
        }
    }

    /// Banner shown when the story ends.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Legendary => "LEGENDARY VICTORY!",
            Self::GameOver => "GAME OVER",
            Self::Corrupted => "CORRUPTED",
            Self::Coward => "COWARD'S END",
            Self::Default => "THE END",
        }
    }
}

impl fmt::Display for EndingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
