use serde::{Deserialize, Serialize};

use crate::error::{SentenceError, TreeError};
use crate::tree::DependencyTree;
use crate::word::Word;

/// The words of one sentence, stored by id.
///
/// Slot `0` always holds the null word, so `word(id)` indexes directly.
/// Serializes as the list of real words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Word>", into = "Vec<Word>")]
pub struct Sentence {
    words: Vec<Word>,
}

impl Sentence {
    /// Wraps `words`, whose ids must be `1..=n` in order.
    pub fn new(words: Vec<Word>) -> Result<Self, SentenceError> {
        for (position, word) in words.iter().enumerate() {
            if word.id != position + 1 {
                return Err(SentenceError::NonSequentialIds {
                    expected: position + 1,
                    found: word.id,
                });
            }
        }
        let mut all = Vec::with_capacity(words.len() + 1);
        all.push(Word::null());
        all.extend(words);
        Ok(Self { words: all })
    }

    /// Plain tokens without dependency annotation.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = vec![Word::null()];
        for token in tokens {
            let id = words.len();
            words.push(Word::new(id, token));
        }
        Self { words }
    }

    /// `(id, text, head, deprel)` rows, `head == 0` marking the root.
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = (usize, &'a str, usize, &'a str)>,
    ) -> Result<Self, SentenceError> {
        let words = rows
            .into_iter()
            .map(|(id, text, head, deprel)| Word::new(id, text).with_head(head).with_deprel(deprel))
            .collect();
        Self::new(words)
    }

    /// Number of real words.
    pub fn len(&self) -> usize {
        self.words.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The word with `id`; `0` is the null word.
    pub fn word(&self, id: usize) -> Option<&Word> {
        self.words.get(id)
    }

    /// Real words in order, without the null word.
    pub fn words(&self) -> &[Word] {
        &self.words[1..]
    }

    pub fn text(&self) -> String {
        self.words()
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn tree(&self) -> Result<DependencyTree, TreeError> {
        DependencyTree::build(self)
    }
}

impl TryFrom<Vec<Word>> for Sentence {
    type Error = SentenceError;

    fn try_from(words: Vec<Word>) -> Result<Self, Self::Error> {
        Self::new(words)
    }
}

impl From<Sentence> for Vec<Word> {
    fn from(sentence: Sentence) -> Self {
        let mut words = sentence.words;
        words.remove(0);
        words
    }
}
