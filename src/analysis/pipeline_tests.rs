//! Scenario tests for the analysis pipeline and the scaling sweep
//!
//! Run with: cargo test pipeline_tests

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::analysis::{FrequencyTable, Pipeline};
    use crate::corpus::{chunk_bounds, Corpus, SplitMode};
    use crate::error::AnalysisError;
    use crate::scaling::ScalingHarness;
    use crate::tokenizer::{LinguisticTokenizer, SimpleTokenizer, Tokenizer};

    // =========================================================================
    // FIXTURES
    // =========================================================================

    const CATS: &str = "the cat sat on the mat the cat ran";

    const PROSE: &str = r#"
It was the best of times, it was the worst of times, it was the age of
wisdom, it was the age of foolishness, it was the epoch of belief, it was
the epoch of incredulity, it was the season of Light, it was the season of
Darkness, it was the spring of hope, it was the winter of despair.
"#;

    /// Panics on any chunk containing "poison"
    struct PoisonTokenizer;

    impl Tokenizer for PoisonTokenizer {
        fn name(&self) -> &'static str {
            "poison"
        }

        fn tokenize(&self, text: &str) -> Vec<String> {
            if text.contains("poison") {
                panic!("poisoned chunk");
            }
            SimpleTokenizer.tokenize(text)
        }
    }

    /// Panics on chunks containing "boom", counts the chunks it finished
    struct CountingTokenizer {
        finished: Arc<AtomicUsize>,
    }

    impl Tokenizer for CountingTokenizer {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn tokenize(&self, text: &str) -> Vec<String> {
            if text.contains("boom") {
                panic!("boom chunk");
            }
            // keep siblings in flight while the failing chunks unwind
            std::thread::sleep(Duration::from_millis(20));
            let tokens = SimpleTokenizer.tokenize(text);
            self.finished.fetch_add(1, Ordering::SeqCst);
            tokens
        }
    }

    /// Sleeps once per chunk
    struct SlowTokenizer(Duration);

    impl Tokenizer for SlowTokenizer {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn tokenize(&self, text: &str) -> Vec<String> {
            std::thread::sleep(self.0);
            SimpleTokenizer.tokenize(text)
        }
    }

    fn simple_pipeline() -> Pipeline {
        Pipeline::new(Arc::new(SimpleTokenizer), SplitMode::Word)
    }

    fn harness(pipeline: Pipeline) -> ScalingHarness {
        ScalingHarness::new(pipeline).with_resource_monitoring(false)
    }

    fn write_corpus(dir: &tempfile::TempDir, files: &[(&str, &str)]) -> Corpus {
        let paths: Vec<PathBuf> = files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                std::fs::write(&path, content).unwrap();
                path
            })
            .collect();
        Corpus::from_paths(paths).unwrap()
    }

    fn expected_cats() -> FrequencyTable {
        [("the", 3), ("cat", 2), ("sat", 1), ("on", 1), ("mat", 1), ("ran", 1)]
            .into_iter()
            .collect()
    }

    // =========================================================================
    // CONCRETE SCENARIOS
    // =========================================================================

    #[test]
    fn test_cats_two_chunks_match_direct_count() {
        let direct: FrequencyTable = SimpleTokenizer.tokenize(CATS).into_iter().collect();
        assert_eq!(direct, expected_cats());

        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("cats.txt", CATS)]);
        let run = simple_pipeline().analyze_corpus(&corpus, 2).unwrap();

        assert_eq!(run.table, expected_cats());
        assert_eq!(run.total_tokens, 9);
        assert_eq!(run.distinct_tokens, 6);
        assert_eq!(run.files[0].chunk_count, 2);
        assert!(run.diagnostics.is_empty());
    }

    #[test]
    fn test_worker_counts_one_and_four_identical() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("a.txt", PROSE), ("b.txt", CATS)]);

        let points = harness(simple_pipeline()).measure(&corpus, &[1, 4]).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].table_digest, points[1].table_digest);
        assert_eq!(points[0].total_tokens, points[1].total_tokens);
        assert_eq!(points[0].distinct_tokens, points[1].distinct_tokens);

        let one = simple_pipeline().analyze_corpus(&corpus, 1).unwrap();
        let four = simple_pipeline().analyze_corpus(&corpus, 4).unwrap();
        assert_eq!(one.table, four.table);
        assert_eq!(one.table.get("was"), 10);
    }

    #[test]
    fn test_sweep_preserves_caller_order_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("a.txt", PROSE)]);

        let points = harness(simple_pipeline()).measure(&corpus, &[3, 1, 3]).unwrap();
        let workers: Vec<usize> = points.iter().map(|p| p.workers).collect();
        assert_eq!(workers, vec![3, 1, 3]);
        if points[0].elapsed_secs > 0.0 {
            assert_eq!(points[0].speedup, Some(1.0));
        }
    }

    #[test]
    fn test_sweep_rejects_bad_worker_lists() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("a.txt", CATS)]);
        let harness = harness(simple_pipeline());

        let err = harness.measure(&corpus, &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument(_)));
        let err = harness.measure(&corpus, &[2, 0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument(_)));
    }

    #[test]
    fn test_char_split_mismatch_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("cats.txt", CATS)]);
        let pipeline = Pipeline::new(Arc::new(SimpleTokenizer), SplitMode::Char);

        // "the cat sat on th" | "e mat the cat ran" cuts "the" in two
        let report = harness(pipeline).run(&corpus, &[1, 2], 1, 10).unwrap();
        assert_eq!(report.points[0].total_tokens, 9);
        assert_eq!(report.points[1].total_tokens, 10);
        assert!(!report.content_invariant());
        assert!(!report.content_mismatch_is_fatal());
    }

    #[test]
    fn test_word_split_report_is_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("cats.txt", CATS)]);

        let report = harness(simple_pipeline()).run(&corpus, &[1, 2], 1, 10).unwrap();
        assert!(report.content_invariant());
        assert!(!report.content_mismatch_is_fatal());

        let mut broken = report.clone();
        broken.points[1].table_digest = "different".to_string();
        assert!(broken.content_mismatch_is_fatal());
    }

    #[test]
    fn test_file_span_covers_chunk_processing() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let delay = Duration::from_millis(30);
        let pipeline = Pipeline::new(Arc::new(SlowTokenizer(delay)), SplitMode::Word);

        let file = pipeline.analyze_text(&pool, 2, "cats", CATS).unwrap();
        assert_eq!(file.chunk_count, 2);
        assert!(file.elapsed >= delay);
        assert_eq!(file.table, expected_cats());
    }

    #[test]
    fn test_repeats_record_min_and_mean() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("a.txt", PROSE)]);

        let points = harness(simple_pipeline())
            .with_repeats(3)
            .measure(&corpus, &[2])
            .unwrap();
        assert!(points[0].min_elapsed_secs <= points[0].elapsed_secs);
    }

    // =========================================================================
    // EMPTY AND MISSING INPUT
    // =========================================================================

    #[test]
    fn test_empty_and_missing_files_yield_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut corpus_paths = write_corpus(&dir, &[("empty.txt", ""), ("blank.txt", " \n\t\n")])
            .paths()
            .to_vec();
        corpus_paths.push(dir.path().join("missing.txt"));
        let corpus = Corpus::from_paths(corpus_paths).unwrap();

        let run = simple_pipeline().analyze_corpus(&corpus, 3).unwrap();
        assert!(run.table.is_empty());
        assert_eq!(run.total_tokens, 0);
        assert_eq!(run.files.len(), 3);
        assert!(run.files.iter().all(|f| f.total_tokens == 0 && f.chunk_count == 0));

        let kinds: Vec<&str> = run.diagnostics.iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, vec!["empty_corpus", "empty_corpus", "file_not_found"]);
    }

    #[test]
    fn test_missing_file_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let real = write_corpus(&dir, &[("cats.txt", CATS)]).paths()[0].clone();
        let corpus = Corpus::from_paths(vec![dir.path().join("gone.txt"), real]).unwrap();

        let run = simple_pipeline().analyze_corpus(&corpus, 2).unwrap();
        assert_eq!(run.table, expected_cats());
        assert_eq!(run.diagnostics.len(), 1);
    }

    #[test]
    fn test_only_punctuation_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("punct.txt", "... !!! 123 ???")]);

        let run = simple_pipeline().analyze_corpus(&corpus, 2).unwrap();
        assert!(run.table.is_empty());
        assert_eq!(run.diagnostics[0].kind, "empty_corpus");
    }

    // =========================================================================
    // FAILURES
    // =========================================================================

    #[test]
    fn test_worker_failure_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(
            &dir,
            &[("ok.txt", CATS), ("bad.txt", "clean words here and poison there")],
        );
        let pipeline = Pipeline::new(Arc::new(PoisonTokenizer), SplitMode::Word);

        let err = pipeline.analyze_corpus(&corpus, 2).unwrap_err();
        match err {
            AnalysisError::WorkerFailure { file, message, .. } => {
                assert!(file.ends_with("bad.txt"));
                assert!(message.contains("poisoned chunk"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_worker_failure_lets_siblings_finish() {
        let text = "boomx okayy boomx okayy okayy boomx okayy okayy";
        let workers = 8;
        let chunks: Vec<String> = chunk_bounds(text, workers, SplitMode::Word)
            .unwrap()
            .into_iter()
            .map(|r| text[r].to_string())
            .collect();
        let failing: Vec<usize> = (0..chunks.len())
            .filter(|&i| chunks[i].contains("boom"))
            .collect();
        assert!(failing.len() >= 2);
        assert_eq!(failing[0], 0);

        let finished = Arc::new(AtomicUsize::new(0));
        let tokenizer = CountingTokenizer {
            finished: Arc::clone(&finished),
        };
        let pipeline = Pipeline::new(Arc::new(tokenizer), SplitMode::Word);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .unwrap();

        let err = pipeline.analyze_text(&pool, workers, "mixed", text).unwrap_err();
        assert_eq!(finished.load(Ordering::SeqCst), chunks.len() - failing.len());
        match err {
            AnalysisError::WorkerFailure { chunk, message, .. } => {
                assert_eq!(chunk, failing[0]);
                assert!(message.contains("boom chunk"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_worker_failure_aborts_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("bad.txt", "poison")]);
        let pipeline = Pipeline::new(Arc::new(PoisonTokenizer), SplitMode::Word);

        let result = harness(pipeline).run(&corpus, &[1, 2], 1, 10);
        assert!(matches!(result, Err(AnalysisError::WorkerFailure { .. })));
    }

    // =========================================================================
    // FULL SWEEP
    // =========================================================================

    #[test]
    fn test_run_report() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("a.txt", PROSE), ("b.txt", CATS)]);

        let report = harness(simple_pipeline()).run(&corpus, &[1, 2], 2, 3).unwrap();
        assert_eq!(report.baseline_workers, 1);
        assert_eq!(report.report_workers, 2);
        assert!(report.content_invariant());
        assert_eq!(report.files.len(), 2);

        let top: Vec<(&str, u64)> = report
            .top_tokens
            .iter()
            .map(|t| (t.token.as_str(), t.count))
            .collect();
        assert_eq!(top, vec![("the", 13), ("it", 10), ("of", 10)]);
    }

    #[test]
    fn test_linguistic_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = write_corpus(&dir, &[("a.txt", PROSE)]);
        let pipeline = Pipeline::new(Arc::new(LinguisticTokenizer::english()), SplitMode::Word);

        let one = pipeline.analyze_corpus(&corpus, 1).unwrap();
        let three = pipeline.analyze_corpus(&corpus, 3).unwrap();
        assert_eq!(one.table, three.table);
        assert_eq!(one.table.get("was"), 0);
        assert_eq!(one.table.get("time"), 2);
        assert_eq!(one.table.get("season"), 2);
    }

    #[test]
    #[ignore = "timing-sensitive; run with --ignored on a multi-core machine"]
    fn test_two_workers_not_slower_than_one() {
        let dir = tempfile::tempdir().unwrap();
        let text = PROSE.repeat(20_000);
        let corpus = write_corpus(&dir, &[("big.txt", text.as_str())]);

        let points = harness(simple_pipeline())
            .with_repeats(3)
            .measure(&corpus, &[1, 2])
            .unwrap();
        assert!(points[1].elapsed_secs <= points[0].elapsed_secs * 1.25);
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    fn text_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                "[a-zA-Zăș]{1,8}",
                "[.,!?;:\"'()]{1,2}",
                "[0-9]{1,3}",
                Just(" ".to_string()),
                Just("\n".to_string()),
                Just("\t ".to_string()),
            ],
            0..40,
        )
        .prop_map(|parts| parts.concat())
    }

    fn token_multiset(tokens: Vec<String>) -> FrequencyTable {
        tokens.into_iter().collect()
    }

    proptest! {
        #[test]
        fn prop_word_split_preserves_tokens(text in text_strategy()) {
            let direct = token_multiset(SimpleTokenizer.tokenize(&text));
            for n in 1..=text.len().max(1) {
                let mut merged = FrequencyTable::new();
                for range in chunk_bounds(&text, n, SplitMode::Word).unwrap() {
                    merged.merge(token_multiset(SimpleTokenizer.tokenize(&text[range])));
                }
                prop_assert_eq!(&merged, &direct, "num_chunks = {}", n);
            }
        }

        #[test]
        fn prop_chunks_are_contiguous(text in text_strategy(), n in 1usize..16) {
            let bounds = chunk_bounds(&text, n, SplitMode::Char).unwrap();
            prop_assert!(bounds.len() <= n);
            for pair in bounds.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
                // only whitespace was dropped between kept chunks
                prop_assert!(text[pair[0].end..pair[1].start].trim().is_empty());
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_result_independent_of_worker_count(text in text_strategy(), workers in 1usize..6) {
            let dir = tempfile::tempdir().unwrap();
            let corpus = write_corpus(&dir, &[("p.txt", text.as_str())]);
            let pipeline = simple_pipeline();

            let single = pipeline.analyze_corpus(&corpus, 1).unwrap();
            let many = pipeline.analyze_corpus(&corpus, workers).unwrap();
            prop_assert_eq!(single.table, many.table);
            prop_assert_eq!(single.total_tokens, many.total_tokens);
        }
    }
}
