use astred::{
    AlignError, AlignedSentences, AlignmentIndex, AstredConfig, AstredError, EditCosts, Sentence,
    SentenceError, Side, process_pair,
};

fn pair() -> (Sentence, Sentence) {
    (
        Sentence::from_rows([(1, "good", 2, "amod"), (2, "morning", 0, "root")]).unwrap(),
        Sentence::from_rows([(1, "goedemorgen", 0, "root")]).unwrap(),
    )
}

#[test]
fn malformed_alignment_tokens_are_rejected() {
    for aligns in ["0-", "a-b", "0-0-0", "0:0", "-1-0"] {
        let (src, tgt) = pair();
        let err = process_pair(src, tgt, aligns, &AstredConfig::default()).unwrap_err();
        assert!(
            matches!(err, AstredError::Align(AlignError::InvalidAlignmentFormat { .. })),
            "{aligns:?} gave {err:?}"
        );
    }
}

#[test]
fn out_of_range_positions_are_rejected() {
    let (src, tgt) = pair();
    let err = process_pair(src, tgt, "0-0 1-1", &AstredConfig::default()).unwrap_err();
    assert_eq!(
        err,
        AstredError::Align(AlignError::IndexOutOfRange {
            side: Side::Tgt,
            index: 1,
            len: 1,
        })
    );
}

#[test]
fn index_for_other_sentence_lengths_is_rejected() {
    let (src, tgt) = pair();
    let index = AlignmentIndex::from_pharaoh("0-0", 2, 4).unwrap();
    let err = AlignedSentences::build(src, tgt, index, &AstredConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        AstredError::LengthMismatch {
            side: Side::Tgt,
            sentence: 1,
            alignment: 4
        }
    ));
}

#[test]
fn asymmetric_costs_are_a_configuration_error() {
    let (src, tgt) = pair();
    let cfg = AstredConfig::default().with_costs(EditCosts::default().with_deletion(3));
    let err = process_pair(src, tgt, "0-0 1-0", &cfg).unwrap_err();
    assert!(matches!(err, AstredError::Config(_)));
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn malformed_tabular_input_is_rejected() {
    let err = Sentence::from_conllu("1\tonly\tthree").unwrap_err();
    assert!(matches!(err, SentenceError::Parse { line: 1, .. }));

    let skipped_id = "1\ta\t_\t_\t_\t_\t0\troot\t_\t_\n3\tb\t_\t_\t_\t_\t1\tdep\t_\t_\n";
    let err = Sentence::from_conllu(skipped_id).unwrap_err();
    assert_eq!(
        err,
        SentenceError::NonSequentialIds {
            expected: 2,
            found: 3
        }
    );
}
