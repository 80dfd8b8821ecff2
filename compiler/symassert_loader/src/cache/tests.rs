#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use symassert_ir::UnitBuilder;

fn unit(path: &str) -> Arc<CompilationUnit> {
    let name = path.rsplit('/').next().unwrap_or(path);
    Arc::new(UnitBuilder::new(path, name).build())
}

fn tags(list: &[&str]) -> BuildTags {
    BuildTags::new(list.iter().copied())
}

const REMOTE: &str = "example.com/internal/remotepkg";

const NAME_TYPES: LoadMode = LoadMode::NAME.union(LoadMode::TYPES);

fn exercise_subsumption(path: &str) {
    let cache = LoadCache::new();
    let t = tags(&["linux"]);
    let stored = cache.put(NAME_TYPES, &t, path, unit("example.com/internal/remotepkg"));

    let hit = cache.get(LoadMode::NAME, &t, path);
    assert!(hit.is_some_and(|u| Arc::ptr_eq(&u, &stored)));
    let hit = cache.get(NAME_TYPES, &t, path);
    assert!(hit.is_some_and(|u| Arc::ptr_eq(&u, &stored)));

    assert!(cache.get(LoadMode::MODULE, &t, path).is_none());
    assert!(cache.get(LoadMode::NAME, &BuildTags::default(), path).is_none());
    assert!(cache.get(LoadMode::NAME, &tags(&["linux", "amd64"]), path).is_none());
    assert!(cache.get(LoadMode::NAME, &t, "other").is_none());
}

#[test]
fn subsumption_by_full_path() {
    exercise_subsumption("example.com/internal/remotepkg");
}

#[test]
fn subsumption_by_local_path() {
    exercise_subsumption("./internal/remotepkg");
}

#[test]
fn tags_compared_as_set() {
    let cache = LoadCache::new();
    cache.put(LoadMode::NAME, &tags(&["linux", "amd64"]), "p", unit("p"));
    assert!(cache.get(LoadMode::NAME, &tags(&["amd64", "linux"]), "p").is_some());
}

#[test]
fn upgrade_replaces_weaker_entries() {
    let cache = LoadCache::new();
    let t = BuildTags::default();
    cache.put(LoadMode::NAME, &t, "p", unit("p"));
    cache.put(LoadMode::FILES, &t, "p", unit("p"));
    assert_eq!(cache.entries_for("p"), 2);

    let all = LoadMode::NAME | LoadMode::FILES | LoadMode::TYPES;
    let strongest = cache.put(all, &t, "p", unit("p"));
    assert_eq!(cache.entries_for("p"), 1);

    // A lighter re-put is absorbed.
    let again = cache.put(LoadMode::NAME, &t, "p", unit("p"));
    assert!(Arc::ptr_eq(&again, &strongest));
    assert_eq!(cache.len(), 1);
}

#[test]
fn equal_mask_keeps_first_instance() {
    let cache = LoadCache::new();
    let t = BuildTags::default();
    let first = cache.put(NAME_TYPES, &t, "p", unit("p"));
    let second = cache.put(NAME_TYPES, &t, "p", unit("p"));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn different_tags_coexist() {
    let cache = LoadCache::new();
    cache.put(NAME_TYPES, &tags(&["a"]), "p", unit("p"));
    cache.put(NAME_TYPES, &tags(&["b"]), "p", unit("p"));
    assert_eq!(cache.entries_for("p"), 2);
}

#[test]
fn alias_paths_share_one_instance() {
    let cache = LoadCache::new();
    let t = BuildTags::default();
    let remote = cache.put(NAME_TYPES, &t, "example.com/internal/remotepkg", unit(REMOTE));
    let local = cache.put(LoadMode::NAME, &t, "./internal/remotepkg", unit(REMOTE));
    assert!(Arc::ptr_eq(&remote, &local));
    assert_eq!(cache.entries_for("./internal/remotepkg"), 1);

    let hit = cache.get(LoadMode::NAME, &t, "./internal/remotepkg");
    assert!(hit.is_some_and(|u| Arc::ptr_eq(&u, &remote)));
}

#[test]
fn heavier_load_upgrades_other_paths() {
    let cache = LoadCache::new();
    let t = BuildTags::default();
    let light = cache.put(LoadMode::NAME, &t, "a", unit("p"));
    let heavy = cache.put(NAME_TYPES, &t, "b", unit("p"));
    assert!(!Arc::ptr_eq(&light, &heavy));

    let hit = cache.get(NAME_TYPES, &t, "a");
    assert!(hit.is_some_and(|u| Arc::ptr_eq(&u, &heavy)));
    let hit = cache.get(LoadMode::NAME, &t, "a");
    assert!(hit.is_some_and(|u| Arc::ptr_eq(&u, &heavy)));
    assert_eq!(cache.modes_for("a"), vec![NAME_TYPES]);
    assert_eq!(cache.modes_for("b"), vec![NAME_TYPES]);
}

#[test]
fn upgrade_under_another_path_collapses_its_variants() {
    let cache = LoadCache::new();
    let t = BuildTags::default();
    cache.put(LoadMode::NAME, &t, "a", unit("p"));
    cache.put(LoadMode::FILES, &t, "a", unit("p"));
    assert_eq!(cache.entries_for("a"), 2);

    let all = LoadMode::NAME | LoadMode::FILES | LoadMode::TYPES;
    let heavy = cache.put(all, &t, "b", unit("p"));
    assert_eq!(cache.modes_for("a"), vec![all]);
    assert!(cache.get(LoadMode::FILES, &t, "a").is_some_and(|u| Arc::ptr_eq(&u, &heavy)));
}

#[test]
fn upgrades_stay_within_unit_and_tags() {
    let cache = LoadCache::new();
    let t = BuildTags::default();
    cache.put(LoadMode::NAME, &t, "a", unit("p"));
    cache.put(LoadMode::NAME, &tags(&["linux"]), "c", unit("p"));
    cache.put(LoadMode::NAME, &t, "d", unit("q"));

    cache.put(NAME_TYPES, &t, "b", unit("p"));
    assert_eq!(cache.modes_for("a"), vec![NAME_TYPES]);
    assert_eq!(cache.modes_for("c"), vec![LoadMode::NAME]);
    assert_eq!(cache.modes_for("d"), vec![LoadMode::NAME]);
}

#[test]
fn concurrent_puts_share_one_instance() {
    let cache = Arc::new(LoadCache::new());
    let t = BuildTags::default();

    let units: Vec<Arc<CompilationUnit>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let t = t.clone();
                s.spawn(move || {
                    let path = format!("p{}", i % 4);
                    let mut seen = Vec::new();
                    for _ in 0..50 {
                        seen.push(cache.put(NAME_TYPES, &t, &path, unit("p")));
                        if let Some(hit) = cache.get(LoadMode::NAME, &t, &path) {
                            seen.push(hit);
                        }
                    }
                    seen
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let first = &units[0];
    assert!(units.iter().all(|u| Arc::ptr_eq(u, first)));
    assert_eq!(cache.len(), 4);
    for i in 0..4 {
        assert_eq!(cache.modes_for(&format!("p{i}")), vec![NAME_TYPES]);
    }
}

#[test]
fn empty_cache_reports_empty() {
    let cache = LoadCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.entries_for("p"), 0);
}

fn mode_strategy() -> impl Strategy<Value = LoadMode> {
    (1u32..16).prop_map(LoadMode::from_bits_truncate)
}

proptest! {
    #[test]
    fn get_answers_every_covered_request(stored in mode_strategy(), requested in mode_strategy()) {
        let cache = LoadCache::new();
        let t = BuildTags::default();
        cache.put(stored, &t, "p", unit("p"));
        prop_assert_eq!(cache.get(requested, &t, "p").is_some(), stored.covers(requested));
    }

    #[test]
    fn puts_never_leave_comparable_entries(
        puts in proptest::collection::vec((mode_strategy(), 0usize..3), 1..12),
    ) {
        const PATHS: [&str; 3] = ["a", "b", "c"];
        let cache = LoadCache::new();
        let t = BuildTags::default();
        for (mode, at) in &puts {
            cache.put(*mode, &t, PATHS[*at], unit("p"));
        }

        for path in PATHS {
            let modes = cache.modes_for(path);
            for (i, a) in modes.iter().enumerate() {
                for (j, b) in modes.iter().enumerate() {
                    prop_assert!(i == j || !a.covers(*b), "{path}: {a:?} covers {b:?}");
                }
            }
        }
        // Every request made so far is still answered.
        for (mode, at) in &puts {
            prop_assert!(cache.get(*mode, &t, PATHS[*at]).is_some());
        }
    }
}
