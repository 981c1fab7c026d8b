use astred::{
    AlignedSentences, AlignmentIndex, AstredConfig, AstredError, EditCosts, LabeledTree, Sentence,
};

const SRC: &str = "\
1\tThe\t_\tDET\t_\t_\t2\tdet\t_\t_
2\tdog\t_\tNOUN\t_\t_\t3\tnsubj\t_\t_
3\tchased\t_\tVERB\t_\t_\t0\troot\t_\t_
4\tthe\t_\tDET\t_\t_\t5\tdet\t_\t_
5\tcat\t_\tNOUN\t_\t_\t3\tobj\t_\t_
6\tquickly\t_\tADV\t_\t_\t3\tadvmod\t_\t_
";

const TGT: &str = "\
1\tDe\t_\tDET\t_\t_\t2\tdet\t_\t_
2\thond\t_\tNOUN\t_\t_\t3\tnsubj\t_\t_
3\tjoeg\t_\tVERB\t_\t_\t0\troot\t_\t_
4\tsnel\t_\tADV\t_\t_\t3\tadvmod\t_\t_
5\tde\t_\tDET\t_\t_\t6\tdet\t_\t_
6\tkat\t_\tNOUN\t_\t_\t3\tobj\t_\t_
7\tna\t_\tADP\t_\t_\t3\tcompound:prt\t_\t_
";

const ALIGNMENTS: &[&str] = &[
    "0-0 1-1 2-2 3-4 4-5 5-3",
    "0-0 1-1 2-2 2-6 3-4 4-5 5-3",
    "0-0 1-1 2-2",
    "0-5 1-4 2-3 3-2 4-1 5-0",
    "0-0 0-1 1-0 1-1 2-2 3-4 4-5",
    "",
];

fn sentences() -> (Sentence, Sentence) {
    (
        Sentence::from_conllu(SRC).unwrap(),
        Sentence::from_conllu(TGT).unwrap(),
    )
}

fn unchecked() -> AstredConfig {
    AstredConfig::default().with_symmetry_check(false)
}

#[test]
fn every_metric_survives_swapping_roles() {
    let (src, tgt) = sentences();
    for aligns in ALIGNMENTS {
        let index = AlignmentIndex::from_pharaoh(aligns, src.len(), tgt.len()).unwrap();
        let forward =
            AlignedSentences::build(src.clone(), tgt.clone(), index.clone(), &unchecked()).unwrap();
        let backward =
            AlignedSentences::build(tgt.clone(), src.clone(), index.swapped(), &unchecked())
                .unwrap();

        assert_eq!(forward.word_cross(), backward.word_cross(), "word_cross for {aligns:?}");
        assert_eq!(forward.seq_cross(), backward.seq_cross(), "seq_cross for {aligns:?}");
        assert_eq!(forward.sacr_cross(), backward.sacr_cross(), "sacr_cross for {aligns:?}");
        assert_eq!(forward.ted(), backward.ted(), "ted for {aligns:?}");
        assert_eq!(forward.astred(), backward.astred(), "astred for {aligns:?}");
        assert_eq!(
            forward.label_changes().default,
            backward.label_changes().default,
            "label changes for {aligns:?}"
        );
    }
}

#[test]
fn built_in_check_accepts_consistent_pairs() {
    let (src, tgt) = sentences();
    let cfg = AstredConfig::default().with_symmetry_check(true);
    for aligns in ALIGNMENTS {
        let built = AlignedSentences::from_pharaoh(src.clone(), tgt.clone(), aligns, &cfg);
        assert!(
            !matches!(built, Err(AstredError::SymmetryViolation { .. })),
            "{aligns:?}: {built:?}"
        );
        assert!(built.is_ok());
    }
}

#[test]
fn tree_distance_is_symmetric_for_bracket_trees() {
    let trees = [
        "{a{b}{c}}",
        "{a{c{b}}}",
        "{f{d{a}{c{b}}}{e}}",
        "{f{c{d{a}{b}}}{e}}",
        "{x}",
        "{a{b{c{d{e}}}}}",
    ];
    let costs = EditCosts::default().with_rename(2);
    for first in trees {
        for second in trees {
            let a = LabeledTree::parse_bracket(first).unwrap();
            let b = LabeledTree::parse_bracket(second).unwrap();
            let there = ted::distance(&a, &b, &costs);
            let back = ted::distance(&b, &a, &costs);
            assert_eq!(there.distance, back.distance, "{first} vs {second}");
            assert_eq!(there.step_cost(), there.distance);
        }
    }
}
