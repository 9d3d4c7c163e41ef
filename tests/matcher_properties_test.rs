use std::sync::Arc;

use typofix::spelling::levenshtein::{
    DistanceMetric, damerau_levenshtein_distance, levenshtein_distance,
    levenshtein_distance_threshold,
};
use typofix::spelling::{BuiltinLexicon, Lexicon, Matcher, MatcherConfig, SearchStrategy};

const SAMPLE: &[&str] = &[
    "", "a", "the", "teh", "hello", "helo", "world", "wrold", "keyboard", "keybord", "café",
    "cafe", "naïve", "xyzxyzxyz", "because", "becuase",
];

const QUERIES: &[&str] = &[
    "", "a", "A", "teh", "Teh", "helo", "HELO", "wrold", "keybord", "servise", "xyzxyzxyz",
    "thier", "becuase", "peple", "typng", "corect", "wich", "Hello", "q", "zz",
];

#[test]
fn test_distance_identity_and_symmetry() {
    for a in SAMPLE {
        assert_eq!(levenshtein_distance(a, a), 0);
        assert_eq!(damerau_levenshtein_distance(a, a), 0);
        for b in SAMPLE {
            assert_eq!(levenshtein_distance(a, b), levenshtein_distance(b, a));
            assert_eq!(
                damerau_levenshtein_distance(a, b),
                damerau_levenshtein_distance(b, a)
            );
        }
    }
}

#[test]
fn test_distance_triangle_inequality() {
    for a in SAMPLE {
        for b in SAMPLE {
            for c in SAMPLE {
                assert!(
                    levenshtein_distance(a, c)
                        <= levenshtein_distance(a, b) + levenshtein_distance(b, c),
                    "{a:?} {b:?} {c:?}"
                );
            }
        }
    }
}

#[test]
fn test_distance_bounds() {
    for a in SAMPLE {
        for b in SAMPLE {
            let d = levenshtein_distance(a, b);
            let (la, lb) = (a.chars().count(), b.chars().count());
            assert!(d >= la.abs_diff(lb));
            assert!(d <= la.max(lb));
            assert!(damerau_levenshtein_distance(a, b) <= d);
        }
    }
}

#[test]
fn test_threshold_agrees_with_full_distance() {
    for a in SAMPLE {
        for b in SAMPLE {
            let full = levenshtein_distance(a, b);
            for threshold in 0..4 {
                let expected = (full <= threshold).then_some(full);
                assert_eq!(
                    levenshtein_distance_threshold(a, b, threshold),
                    expected,
                    "{a:?} {b:?} within {threshold}"
                );
            }
        }
    }
}

#[test]
fn test_spec_examples() {
    let matcher = Matcher::new();

    assert_eq!(matcher.correct_word("helo"), "hello");
    assert_eq!(matcher.correct_word("teh"), "the");
    assert_eq!(matcher.correct_word("Hello"), "Hello");
    assert_eq!(matcher.correct_word("xyzxyzxyz"), "xyzxyzxyz");
    assert_eq!(matcher.correct_word(""), "");
    assert!(!matcher.is_valid_word(""));
}

#[test]
fn test_lexicon_words_are_fixed_points() {
    let matcher = Matcher::new();
    for word in matcher.lexicon().entries() {
        assert_eq!(matcher.correct_word(word), word);
        let upper = word.to_uppercase();
        assert_eq!(matcher.correct_word(&upper), upper);
        assert!(matcher.is_valid_word(&upper));
    }
}

#[test]
fn test_correction_is_idempotent() {
    let matcher = Matcher::new();
    for query in QUERIES {
        let once = matcher.correct_word(query);
        assert_eq!(matcher.correct_word(&once), once, "{query:?}");
    }
}

#[test]
fn test_correction_ignores_input_case() {
    let matcher = Matcher::new();
    for query in QUERIES {
        if matcher.is_valid_word(query) {
            continue;
        }
        let lower = matcher.correct_word(&query.to_lowercase());
        let upper = matcher.correct_word(&query.to_uppercase());
        if lower != query.to_lowercase() {
            assert_eq!(lower, upper, "{query:?}");
        }
    }
}

#[test]
fn test_corrections_are_lexicon_entries_within_threshold() {
    let matcher = Matcher::new();
    for query in QUERIES {
        let corrected = matcher.correct_word(query);
        if corrected != *query {
            assert!(matcher.lexicon().contains(&corrected));
            assert!(levenshtein_distance(&query.to_lowercase(), &corrected) <= 2);
        }
    }
}

#[test]
fn test_strategies_return_identical_results() {
    let lexicon = BuiltinLexicon::shared_english();
    let build = |strategy, parallel_threshold, adaptive_threshold| {
        let config = MatcherConfig {
            strategy,
            parallel_threshold,
            adaptive_threshold,
            ..Default::default()
        };
        Matcher::with_config(Arc::clone(&lexicon), config).unwrap()
    };

    for adaptive in [false, true] {
        let linear = build(SearchStrategy::Linear, usize::MAX, adaptive);
        let parallel = build(SearchStrategy::Linear, 0, adaptive);
        let tree = build(SearchStrategy::BkTree, usize::MAX, adaptive);

        for query in QUERIES {
            let expected = linear.correct_word(query);
            assert_eq!(parallel.correct_word(query), expected, "{query:?} {adaptive}");
            assert_eq!(tree.correct_word(query), expected, "{query:?} {adaptive}");
        }
    }
}

#[test]
fn test_adaptive_threshold_spares_short_words() {
    let config = MatcherConfig {
        strategy: SearchStrategy::BkTree,
        adaptive_threshold: true,
        ..Default::default()
    };
    let matcher = Matcher::with_config(BuiltinLexicon::shared_english(), config).unwrap();

    // three letters or fewer get no edit budget at all
    assert_eq!(matcher.correct_word("teh"), "teh");
    assert_eq!(matcher.correct_word("helo"), "hello");
}

#[test]
fn test_order_of_construction_does_not_matter() {
    let words = ["cat", "bat", "hat", "mat", "rat"];
    let mut reversed = words;
    reversed.reverse();

    let forward = Matcher::with_lexicon(Arc::new(Lexicon::from_words(words)));
    let backward = Matcher::with_lexicon(Arc::new(Lexicon::from_words(reversed)));

    for query in ["xat", "at", "cats", "brat"] {
        assert_eq!(forward.correct_word(query), backward.correct_word(query));
    }
}

#[test]
fn test_damerau_matcher_handles_transpositions() {
    let config = MatcherConfig {
        metric: DistanceMetric::DamerauLevenshtein,
        max_distance: 1,
        ..Default::default()
    };
    let matcher = Matcher::with_config(BuiltinLexicon::shared_english(), config).unwrap();

    assert_eq!(matcher.correct_word("teh"), "the");
    assert_eq!(matcher.correct_word("wrold"), "world");
}
