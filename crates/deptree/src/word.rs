use serde::{Deserialize, Serialize};

/// Text of the synthetic null word.
pub const NULL_TEXT: &str = "NULL";

/// Placeholder relation for words without a dependency label.
pub const NO_RELATION: &str = "_";

/// A token of a sentence with its dependency annotation.
///
/// `head` is the id of the governing word, `0` for the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: usize,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feats: Option<String>,
    #[serde(default)]
    pub head: Option<usize>,
    #[serde(default)]
    pub deprel: Option<String>,
}

impl Word {
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            lemma: None,
            upos: None,
            xpos: None,
            feats: None,
            head: None,
            deprel: None,
        }
    }

    pub fn null() -> Self {
        Self::new(0, NULL_TEXT)
    }

    pub fn is_null(&self) -> bool {
        self.id == 0
    }

    pub fn with_head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    pub fn with_deprel(mut self, deprel: impl Into<String>) -> Self {
        self.deprel = Some(deprel.into());
        self
    }

    /// Dependency relation without its subtype (`nmod:poss` gives `nmod`).
    pub fn relation(&self) -> &str {
        match self.deprel.as_deref() {
            Some(deprel) => deprel.split(':').next().unwrap_or(deprel),
            None => NO_RELATION,
        }
    }
}
