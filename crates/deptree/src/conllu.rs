//! Reader for tab-separated dependency tables in the CoNLL-U column layout.
//!
//! Columns: ID, FORM, LEMMA, UPOS, XPOS, FEATS, HEAD, DEPREL, DEPS, MISC.
//! `_` marks an absent value. Comment lines, multi-word token ranges
//! (`1-2`) and empty nodes (`1.1`) are skipped.

use crate::error::SentenceError;
use crate::sentence::Sentence;
use crate::word::Word;

const COLUMNS: usize = 10;

impl Sentence {
    /// Reads one sentence; blank lines are ignored.
    pub fn from_conllu(text: &str) -> Result<Self, SentenceError> {
        let mut words = Vec::new();
        for (number, line) in text.lines().enumerate() {
            if let Some(word) = parse_line(number + 1, line)? {
                words.push(word);
            }
        }
        Sentence::new(words)
    }
}

/// Reads every blank-line separated sentence of `text`.
pub fn read_conllu(text: &str) -> Result<Vec<Sentence>, SentenceError> {
    let mut sentences = Vec::new();
    let mut words = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !words.is_empty() {
                sentences.push(Sentence::new(std::mem::take(&mut words))?);
            }
            continue;
        }
        if let Some(word) = parse_line(number + 1, line)? {
            words.push(word);
        }
    }
    if !words.is_empty() {
        sentences.push(Sentence::new(words)?);
    }
    Ok(sentences)
}

fn parse_line(line: usize, raw: &str) -> Result<Option<Word>, SentenceError> {
    let raw = raw.trim_end_matches(['\r', '\n']);
    if raw.trim().is_empty() || raw.starts_with('#') {
        return Ok(None);
    }
    let columns: Vec<&str> = raw.split('\t').collect();
    if columns.len() != COLUMNS {
        return Err(SentenceError::Parse {
            line,
            reason: format!("expected {COLUMNS} columns, found {}", columns.len()),
        });
    }
    if columns[0].contains(['-', '.']) {
        return Ok(None);
    }
    let id = columns[0].parse::<usize>().map_err(|_| SentenceError::Parse {
        line,
        reason: format!("invalid word id '{}'", columns[0]),
    })?;

    let mut word = Word::new(id, columns[1]);
    word.lemma = field(columns[2]);
    word.upos = field(columns[3]);
    word.xpos = field(columns[4]);
    word.feats = field(columns[5]);
    word.head = match field(columns[6]) {
        Some(head) => Some(head.parse::<usize>().map_err(|_| SentenceError::Parse {
            line,
            reason: format!("invalid head '{head}'"),
        })?),
        None => None,
    };
    word.deprel = field(columns[7]);
    Ok(Some(word))
}

fn field(value: &str) -> Option<String> {
    (value != "_" && !value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;

    const SAMPLE: &str = "# text = I saw her duck\n\
1\tI\tI\tPRON\tPRP\t_\t2\tnsubj\t_\t_\n\
2\tsaw\tsee\tVERB\tVBD\tTense=Past\t0\troot\t_\t_\n\
3\ther\tshe\tPRON\tPRP$\t_\t4\tnmod:poss\t_\t_\n\
4\tduck\tduck\tNOUN\tNN\t_\t2\tobj\t_\t_\n";

    #[test]
    fn reads_columns() {
        let sentence = Sentence::from_conllu(SAMPLE).unwrap();
        assert_eq!(sentence.len(), 4);
        let her = sentence.word(3).unwrap();
        assert_eq!(her.head, Some(4));
        assert_eq!(her.relation(), "nmod");
        assert_eq!(her.upos.as_deref(), Some("PRON"));
        assert_eq!(sentence.word(1).unwrap().feats, None);
        assert_eq!(sentence.tree().unwrap().root(), 2);
    }

    #[test]
    fn skips_ranges_and_empty_nodes() {
        let text = "1-2\tdu\t_\t_\t_\t_\t_\t_\t_\t_\n\
1\tde\t_\tADP\t_\t_\t2\tcase\t_\t_\n\
2\tle\t_\tDET\t_\t_\t0\troot\t_\t_\n\
2.1\tx\t_\t_\t_\t_\t_\t_\t_\t_\n";
        let sentence = Sentence::from_conllu(text).unwrap();
        assert_eq!(sentence.len(), 2);
    }

    #[test]
    fn reports_line_of_bad_row() {
        let err = Sentence::from_conllu("# c\n1\tonly\tthree\n").unwrap_err();
        assert!(matches!(err, SentenceError::Parse { line: 2, .. }));
    }

    #[test]
    fn missing_heads_leave_no_tree() {
        let text = "1\ta\t_\t_\t_\t_\t_\t_\t_\t_\n";
        let sentence = Sentence::from_conllu(text).unwrap();
        assert_eq!(sentence.tree().unwrap_err(), TreeError::MissingHead { word: 1 });
    }

    #[test]
    fn reads_several_sentences() {
        let doc = format!("{SAMPLE}\n{SAMPLE}\n");
        let sentences = read_conllu(&doc).unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].text(), "I saw her duck");
    }
}
