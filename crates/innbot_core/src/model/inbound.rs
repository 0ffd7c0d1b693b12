//! Inbound chat message classification.

/// Literal greeting answered with [`GREETING_REPLY`].
pub const GREETING_TEXT: &str = "Привет";
/// Reply to the greeting.
pub const GREETING_REPLY: &str = "Привет, введи ИНН";
/// Reply to any text that is neither the greeting nor an identifier.
pub const REJECTION_REPLY: &str = "Нужно ввести именно ИНН";
/// Identifier length in characters.
pub const IDENTIFIER_LEN: usize = 10;

/// Shape of one inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Exact greeting literal.
    Greeting,
    /// Exactly [`IDENTIFIER_LEN`] characters; content is not validated.
    Identifier(String),
    /// Anything else.
    Rejected,
}

impl InboundMessage {
    /// Classifies raw text. No trimming is applied.
    pub fn classify(text: &str) -> Self {
        if text == GREETING_TEXT {
            Self::Greeting
        } else if text.chars().count() == IDENTIFIER_LEN {
            Self::Identifier(text.to_string())
        } else {
            Self::Rejected
        }
    }

    /// Stable label for log events; never contains message text.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Identifier(_) => "identifier",
            Self::Rejected => "rejected",
        }
    }
}
