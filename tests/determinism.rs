use astred::{
    AlignmentMetrics, AstredConfig, Sentence, SentencePairInput, demo_pair, process_batch,
};

fn chain(n: usize) -> Sentence {
    let rows: Vec<(usize, String, usize, &str)> = (1..=n)
        .map(|id| (id, format!("w{id}"), id - 1, if id == 1 { "root" } else { "dep" }))
        .collect();
    Sentence::from_rows(rows.iter().map(|(id, text, head, rel)| (*id, text.as_str(), *head, *rel)))
        .unwrap()
}

fn inputs() -> Vec<SentencePairInput> {
    let alignments = [
        "0-0 1-1 2-2 3-3 4-4",
        "0-4 1-3 2-2 3-1 4-0",
        "0-1 1-0 2-3 3-2",
        "0-0 0-1 1-0 1-1 4-4",
        "2-2",
        "0-9",
    ];
    alignments
        .iter()
        .map(|aligns| SentencePairInput::new(chain(5), chain(5), *aligns))
        .collect()
}

#[test]
fn repeated_builds_produce_identical_metrics() {
    let cfg = AstredConfig::default();
    let first = demo_pair(&cfg).unwrap().metrics();
    for _ in 0..5 {
        assert_eq!(demo_pair(&cfg).unwrap().metrics(), first);
    }
}

#[test]
fn parallel_batch_matches_sequential_batch() {
    let inputs = inputs();
    let sequential = process_batch(&inputs, &AstredConfig::default().with_parallel(false));
    let parallel = process_batch(&inputs, &AstredConfig::default().with_parallel(true));
    assert_eq!(sequential, parallel);
    assert!(sequential[..5].iter().all(Result::is_ok));
    assert!(sequential[5].is_err());
}

#[test]
fn metrics_survive_json_round_trip() {
    let metrics = demo_pair(&AstredConfig::default()).unwrap().metrics();
    let json = metrics.to_json().unwrap();
    let back: AlignmentMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back.word_cross, metrics.word_cross);
    assert_eq!(back.astred, metrics.astred);
    assert_eq!(back.words, metrics.words);
    assert_eq!(back.astred_steps, metrics.astred_steps);
}
