//! Property-based tests for the synthesis phases.
//!
//! Package maps are generated from small name pools so that repositories,
//! architectures and artifacts collide often and the interesting cases
//! (partial noarch coverage, foreign-arch artifacts) show up routinely.

#[cfg(test)]
mod proptest_tests {
    use crate::arch;
    use crate::phases::{index, orchestrator, phase2, phase3, CatalogInputs};
    use crate::prepopulate::PackageMap;
    use crate::prototxt;
    use proptest::prelude::*;

    const REPOS: &[&str] = &["BaseOS", "AppStream", "CRB"];
    const ARCHES: &[&str] = &["x86_64", "aarch64", "s390x"];
    const PACKAGES: &[&str] = &["foo", "bar", "glibc"];
    const SUFFIXES: &[&str] = &["x86_64", "aarch64", "s390x", "i686", "noarch"];

    fn package_map() -> impl Strategy<Value = PackageMap> {
        let entry = (0..3usize, 0..3usize, 0..3usize, 1..3u8, 0..5usize);
        prop::collection::vec(entry, 0..24).prop_map(|entries| {
            let mut map = PackageMap::new();
            for (repo, architecture, package, version, suffix) in entries {
                let name = PACKAGES[package];
                let artifact = format!("{}-{}-1.{}", name, version, SUFFIXES[suffix]);
                map.insert(REPOS[repo], ARCHES[architecture], name, &artifact);
            }
            map
        })
    }

    proptest! {
        /// Property: an architecture is recorded as multilib exactly when it
        /// carries a foreign, non-noarch artifact of the package
        #[test]
        fn multilib_matches_foreign_artifacts(map in package_map()) {
            let idx = index::execute(&map);
            for record in map.records() {
                let entry = idx.get(record.package, record.repository).unwrap();
                if arch::is_multilib(record.artifact, record.architecture) {
                    prop_assert!(entry.multilib.contains(record.architecture));
                }
            }
            for (package, repos) in idx.packages() {
                for (repository, entry) in repos {
                    for multilib_arch in &entry.multilib {
                        let witnessed = map.records().any(|r| {
                            r.package == package
                                && r.repository == repository.as_str()
                                && r.architecture == multilib_arch.as_str()
                                && arch::is_multilib(r.artifact, r.architecture)
                        });
                        prop_assert!(
                            witnessed,
                            "{} has no foreign artifact on {}", package, multilib_arch
                        );
                    }
                }
            }
        }

        /// Property: each observed artifact appears exactly once in its include filter
        #[test]
        fn include_filter_has_each_artifact_once(map in package_map()) {
            let idx = index::execute(&map);
            for record in map.records() {
                let entry = idx.get(record.package, record.repository).unwrap();
                let count = entry.include_filter.iter().filter(|a| *a == record.artifact).count();
                prop_assert_eq!(count, 1);
            }
        }

        /// Property: every noarch gap is covered by an exclusion rule
        #[test]
        fn every_noarch_gap_is_excluded(map in package_map()) {
            let arches = map.architectures();
            let rules = phase3::execute(&phase2::execute(&index::execute(&map), &map, &arches));

            for record in map.records().filter(|r| arch::is_noarch(r.artifact)) {
                for observed in arches.iter() {
                    if map.contains(record.repository, observed, record.package, record.artifact) {
                        continue;
                    }
                    let pattern = phase3::repo_match(record.repository);
                    let rule = rules.iter().find(|rule| rule.repo_match == pattern);
                    prop_assert!(rule.is_some(), "no rule for {}", record.repository);
                    let globs = rule.and_then(|rule| rule.arches.get(observed));
                    let bare = arch::bare_name(record.artifact);
                    prop_assert!(
                        globs.is_some_and(|g| g.iter().any(|n| n == bare)),
                        "{} not excluded on {}", record.artifact, observed
                    );
                }
            }
        }

        /// Property: noarch artifacts present on every architecture are never excluded
        #[test]
        fn symmetric_noarch_is_never_excluded(map in package_map()) {
            let mut symmetric = map.clone();
            for observed in map.architectures().iter() {
                symmetric.insert("BaseOS", observed, "common", "common-1-1.noarch");
            }
            let arches = symmetric.architectures();
            let asymmetries = phase2::execute(&index::execute(&symmetric), &symmetric, &arches);
            let rules = phase3::execute(&asymmetries);

            for rule in &rules {
                for globs in rule.arches.values() {
                    prop_assert!(!globs.iter().any(|g| g == "common-1-1"));
                }
            }
        }

        /// Property: rules hold no duplicate repositories or names
        #[test]
        fn exclusion_rules_are_deduplicated(map in package_map()) {
            let arches = map.architectures();
            let rules = phase3::execute(&phase2::execute(&index::execute(&map), &map, &arches));

            let mut seen = std::collections::HashSet::new();
            for rule in &rules {
                prop_assert!(seen.insert(rule.repo_match.clone()));
                prop_assert!(!rule.arches.is_empty());
                for globs in rule.arches.values() {
                    let unique: std::collections::HashSet<_> = globs.iter().collect();
                    prop_assert_eq!(unique.len(), globs.len());
                }
            }
        }

        /// Property: synthesis and rendering are deterministic
        #[test]
        fn synthesis_is_deterministic(map in package_map()) {
            let inputs = CatalogInputs { packages: map, ..Default::default() };
            let first = prototxt::render(&orchestrator::synthesize(&inputs).unwrap());
            let second = prototxt::render(&orchestrator::synthesize(&inputs).unwrap());
            prop_assert_eq!(first, second);
        }
    }
}
