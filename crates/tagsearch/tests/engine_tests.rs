//! End-to-end tests for SearchEngine

use pretty_assertions::assert_eq;
use tagsearch::{normalize, EngineConfig, MatchKind, SearchEngine, VariantMode};

fn engine() -> SearchEngine {
    SearchEngine::new(EngineConfig::default()).unwrap()
}

/// Queries and cells exercised by the property-style tests
const SAMPLES: &[&str] = &[
    "",
    "   ",
    "А-0",
    "A-0",
    "C-20",
    "С-20",
    "с 20",
    "С20",
    "с-",
    "Задвижка-20А",
    "Резервный клапан С-20 установлен",
    "КТП №5 (резерв), 1/2",
    "Ёмкость Е–3",
    "mixed Latin и Кириллица",
    "\u{00A0}Н\u{2011}3\u{00A0}",
    "!!!",
];

#[test]
fn test_scenario_normalize_and_variants() {
    let e = engine();
    assert_eq!(e.normalize_query("А-0"), "а-0");

    let variants = e.generate_variants("а-0");
    for v in ["а-0", "а0", "а 0"] {
        assert!(variants.contains(v), "missing {:?}", v);
    }
}

#[test]
fn test_scenario_latin_query_matches_cyrillic_cell() {
    assert!(engine().matches(Some("А-0 Задвижка"), "A-0"));
}

#[test]
fn test_scenario_compact_query_matches_dashed_cell() {
    assert!(engine().matches(Some("С-20 Клапан"), "с20"));
}

#[test]
fn test_scenario_digit_after_occurrence_rejected() {
    assert!(!engine().matches(Some("Описание С-200"), "С-20"));
}

#[test]
fn test_scenario_score_ordering() {
    let e = engine();
    let exact = e.score(Some("С-20"), "с-20");
    let prefix = e.score(Some("С-200"), "с-20");
    let substring = e.score(Some("Резервный клапан С-20 установлен"), "с-20");
    assert!(exact > prefix, "{} <= {}", exact, prefix);
    assert!(prefix > substring, "{} <= {}", prefix, substring);
    assert!(substring > 0);
}

#[test]
fn test_scenario_clear_caches_preserves_results() {
    let e = engine();
    let cells = [
        "С-20",
        "С-200",
        "Описание С-200",
        "Резервный клапан С-20 установлен",
        "А-0 Задвижка",
    ];
    let queries = ["с-20", "С20", "A-0", "20"];

    let before: Vec<(bool, u32)> = queries
        .iter()
        .flat_map(|q| cells.iter().map(move |c| (*q, *c)))
        .map(|(q, c)| (e.matches(Some(c), q), e.score(Some(c), q)))
        .collect();

    e.clear_caches();

    let after: Vec<(bool, u32)> = queries
        .iter()
        .flat_map(|q| cells.iter().map(move |c| (*q, *c)))
        .map(|(q, c)| (e.matches(Some(c), q), e.score(Some(c), q)))
        .collect();

    assert_eq!(before, after);
}

#[test]
fn test_confusable_equivalence() {
    assert_eq!(normalize("C-20"), normalize("С-20"));
    assert_eq!(normalize("А—0"), normalize("а-0"));
}

#[test]
fn test_normalize_idempotent() {
    for s in SAMPLES {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "input {:?}", s);
    }
}

#[test]
fn test_variants_non_empty_and_contain_source() {
    for mode in [VariantMode::Strict, VariantMode::Extended] {
        for s in SAMPLES {
            let n = normalize(s);
            let set = tagsearch::generate_variants(&n, mode);
            if n.is_empty() {
                assert!(set.is_empty(), "{:?} should have no variants", s);
            } else {
                assert!(!set.is_empty());
                assert!(set.contains(&n), "{:?} ({}) missing itself", s, mode);
            }
        }
    }
}

#[test]
fn test_cache_transparency() {
    let cached = engine();
    let uncached = SearchEngine::new(EngineConfig {
        query_cache_capacity: 0,
        variants_cache_capacity: 0,
        cell_cache_capacity: 0,
        ..Default::default()
    })
    .unwrap();

    // run twice so the second pass is served from cache
    for _ in 0..2 {
        for q in SAMPLES {
            assert_eq!(cached.normalize_query(q), uncached.normalize_query(q));
            assert_eq!(cached.generate_variants(q), uncached.generate_variants(q));
            for c in SAMPLES {
                assert_eq!(
                    cached.score(Some(*c), q),
                    uncached.score(Some(*c), q),
                    "cell {:?} query {:?}",
                    c,
                    q
                );
            }
        }
    }
    assert!(cached.cache_snapshot().query.hits > 0);
    assert_eq!(uncached.cache_snapshot().query.size, 0);
}

#[test]
fn test_token_boundaries() {
    let e = engine();
    assert!(e.matches(Some("С-20 Задвижка"), "20"));
    assert!(!e.matches(Some("С-200"), "20"));
    assert!(e.matches(Some("Задвижка-20А"), "20А"));
    assert!(!e.matches(Some("Задвижка20А"), "20А"));
}

#[test]
fn test_single_letter_query_only_matches_as_prefix() {
    let e = engine();
    assert!(e.matches(Some("С-20"), "с"));
    assert!(!e.matches(Some("Клапан С-20"), "с"));
}

#[test]
fn test_dash_glyphs_and_nbsp_in_cells() {
    let e = engine();
    assert!(e.matches(Some("Н\u{2011}3\u{00A0}насос"), "H-3"));
    assert!(e.matches(Some("Е–3 ёмкость"), "e3"));
}

#[test]
fn test_explain() {
    let e = engine();
    let explanation = e.explain(Some("Клапан С 20"), "c-20").unwrap();
    assert_eq!(explanation.kind, MatchKind::BoundedSubstring);
    assert_eq!(explanation.variant, "с 20");
}

#[test]
fn test_cache_stats_report() {
    let e = engine();
    e.matches(Some("С-20"), "с-20");
    e.matches(Some("С-20"), "с-20");

    let report = e.cache_stats();
    assert!(report.contains("query:"), "{}", report);
    assert!(report.contains("variants:"), "{}", report);
    assert!(report.contains("cell: 1/300 entries"), "{}", report);
    assert!(e.cache_health());
}

#[test]
fn test_score_is_max_over_all_variants() {
    let e = engine();
    let tag = format!("{}/", "а".repeat(60));
    assert_eq!(e.score(Some(&tag), &tag), 1100);

    let ranked = e.rank(&tag, &[tag.as_str()], None);
    assert_eq!(ranked[0].kind, MatchKind::Prefix);
    assert_eq!(ranked[0].score, 1100);
}
