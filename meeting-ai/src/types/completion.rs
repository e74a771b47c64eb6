//! Types exchanged with a completion provider.

/// A single-turn request: fixed system instruction plus the user's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user_message: String,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user_message: user_message.into(),
        }
    }
}

/// One content item of a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Text { text: String },
    /// Any non-text block (tool use, images, ...), kept only by its type name.
    Other { kind: String },
}

/// Raw provider output, in the order the provider produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub content: Vec<ContentBlock>,
}

impl Completion {
    /// Convenience constructor for a response holding a single text block.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// The first text content item, if the provider returned one.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other { .. } => None,
        })
    }
}
