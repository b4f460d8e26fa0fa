use std::collections::{BTreeMap, BTreeSet};

use launcher_search::ranking::{
    classify, highlight_ranges, normalize_query, rank, rank_with_tiers, MatchTier, UsageLog,
};
use launcher_search::{AppEntry, Candidate};

fn drawer() -> Vec<AppEntry> {
    vec![
        AppEntry::new("com.example.clock", "Clock"),
        AppEntry::new("com.example.bitmap", "Bitmap Converter"),
        AppEntry::new("com.google.maps", "Google Maps"),
        AppEntry::new("com.example.run", "MapMyRun"),
        AppEntry::new("com.example.maps", "Maps"),
        AppEntry::new("com.example.mail", "Mail And Posts"),
    ]
}

fn labels(ranked: &[&AppEntry]) -> Vec<String> {
    ranked.iter().map(|app| app.label.clone()).collect()
}

#[test]
fn map_query_orders_by_tier_then_input_order() {
    let apps = drawer();
    let ranked = rank("map", &apps);

    // Prefix matches keep their input order: MapMyRun comes before Maps.
    assert_eq!(
        labels(&ranked),
        ["MapMyRun", "Maps", "Google Maps", "Bitmap Converter", "Mail And Posts"]
    );
}

#[test]
fn tiers_are_reported_per_candidate() {
    let apps = vec![
        AppEntry::new("a", "Maps"),
        AppEntry::new("b", "Maps Go"),
        AppEntry::new("c", "Google Maps"),
        AppEntry::new("d", "Bitmaps"),
        AppEntry::new("e", "Mail And Posts"),
        AppEntry::new("f", "Clock"),
    ];

    let tiers: Vec<(String, MatchTier)> = rank_with_tiers("maps", &apps)
        .into_iter()
        .map(|entry| (entry.candidate.label.clone(), entry.tier))
        .collect();

    assert_eq!(
        tiers,
        [
            ("Maps".to_string(), MatchTier::Exact),
            ("Maps Go".to_string(), MatchTier::PrefixMatch),
            ("Google Maps".to_string(), MatchTier::WordBoundary),
            ("Bitmaps".to_string(), MatchTier::Substring),
            ("Mail And Posts".to_string(), MatchTier::Subsequence),
        ]
    );
}

#[test]
fn query_is_trimmed_and_case_folded() {
    let apps = drawer();
    assert_eq!(rank("  MAPS ", &apps), rank("maps", &apps));
}

#[test]
fn blank_query_keeps_every_candidate_in_order() {
    let apps = drawer();
    let ranked = rank("   ", &apps);
    assert_eq!(ranked.len(), apps.len());
    assert!(ranked.iter().zip(&apps).all(|(ranked, app)| std::ptr::eq(*ranked, app)));
}

#[test]
fn ranking_is_idempotent_and_never_duplicates() {
    let apps = drawer();
    let first = rank("ma", &apps);
    let second = rank("ma", &apps);
    assert_eq!(first, second);

    for (i, a) in first.iter().enumerate() {
        for b in &first[i + 1..] {
            assert!(!std::ptr::eq(*a, *b));
        }
    }
}

fn tier_groups<C: Candidate>(
    query: &str,
    candidates: &[C],
) -> BTreeMap<MatchTier, BTreeSet<String>> {
    let mut groups: BTreeMap<MatchTier, BTreeSet<String>> = BTreeMap::new();
    for entry in rank_with_tiers(query, candidates) {
        groups
            .entry(entry.tier)
            .or_default()
            .insert(entry.candidate.key().to_string());
    }
    groups
}

#[test]
fn reranking_and_reordering_keep_tier_groups() {
    let apps = drawer();

    for query in ["map", "ma", "s", "mps", "clock"] {
        let groups = tier_groups(query, &apps);

        let ranked: Vec<AppEntry> = rank(query, &apps).into_iter().cloned().collect();
        assert_eq!(tier_groups(query, &ranked), groups, "re-ranked {query:?}");

        let mut reversed = apps.clone();
        reversed.reverse();
        assert_eq!(tier_groups(query, &reversed), groups, "reversed {query:?}");

        let normalized = normalize_query(query);
        for app in &apps {
            let included = ranked.iter().any(|entry| entry.package == app.package);
            assert_eq!(
                included,
                classify(&app.lowercase_name(), &normalized).is_some(),
                "{} for {query:?}",
                app.label
            );
        }
    }
}

#[test]
fn results_are_a_subset_of_matching_candidates() {
    let apps = drawer();
    let ranked = rank("xyz", &apps);
    assert!(ranked.is_empty());
    assert!(rank("map", &[] as &[AppEntry]).is_empty());
}

#[test]
fn non_ascii_names_rank_like_ascii_ones() {
    let apps = vec![
        AppEntry::new("a", "Café Finder"),
        AppEntry::new("b", "Über"),
        AppEntry::new("c", "خرائط"),
    ];
    assert_eq!(labels(&rank("über", &apps)), ["Über"]);
    assert_eq!(labels(&rank("caf", &apps)), ["Café Finder"]);
    assert_eq!(labels(&rank("خر", &apps)), ["خرائط"]);
}

#[test]
fn highlights_follow_the_tier() {
    assert_eq!(highlight_ranges("Google Maps", "map"), vec![(7, 10)]);
    assert_eq!(highlight_ranges("Maps", "maps"), vec![(0, 4)]);
    assert!(highlight_ranges("Clock", "xyz").is_empty());
}

#[test]
fn recents_prefer_frequent_recent_launches() {
    let apps = drawer();
    let now = 1_700_000_000;
    let mut usage = UsageLog::new();

    usage.record_launch("com.example.clock", now - 3_600);
    usage.record_launch("com.google.maps", now - 60);
    usage.record_launch("com.google.maps", now - 30);

    let recents = usage.recents(&apps, 5, now);
    assert_eq!(labels(&recents), ["Google Maps", "Clock"]);
    assert_eq!(usage.recents(&apps, 1, now).len(), 1);
}
