use std::collections::HashMap;

use crate::analysis::normalize::fold_key;

/// Anything that can be collapsed by case-insensitive keyword text.
pub trait Dedupable {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: String);

    /// Collision rank for `DedupPolicy::PriorityByCategory`. Higher wins.
    fn rank(&self) -> u8 {
        0
    }
}

/// How a collision between two entries with the same folded text is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Keep the first occurrence, regardless of category. Used for resume keywords.
    FirstSeen,
    /// Keep the entry whose category ranks highest; ties keep the first.
    /// Used for JD keywords, where the strongest framing of a term should win.
    PriorityByCategory,
}

/// Collapses case-insensitive duplicates.
///
/// Every retained entry has its text rewritten to the normalized lowercase key.
/// Entries whose text is empty after normalization are dropped. Output keeps the
/// order of first occurrence; a higher-priority replacement takes over the slot
/// of the entry it displaces.
pub fn dedupe<K, I>(items: I, policy: DedupPolicy) -> Vec<K>
where
    K: Dedupable,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<K> = Vec::new();

    for mut item in items {
        let key = fold_key(item.text());
        if key.is_empty() {
            continue;
        }
        item.set_text(key.clone());

        match slots.get(&key) {
            None => {
                slots.insert(key, out.len());
                out.push(item);
            }
            Some(&idx) => {
                if policy == DedupPolicy::PriorityByCategory && item.rank() > out[idx].rank() {
                    out[idx] = item;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::analysis::keyword::{JdCategory, JdKeyword, ResumeKeyword};

    fn jd(text: &str, category: JdCategory) -> JdKeyword {
        JdKeyword {
            keyword_text: text.to_string(),
            category,
            evidence: None,
            importance: None,
        }
    }

    fn resume(text: &str, evidence: &str) -> ResumeKeyword {
        ResumeKeyword {
            keyword_text: text.to_string(),
            evidence: Some(evidence.to_string()),
            section: None,
        }
    }

    fn category_from(n: u8) -> JdCategory {
        match n % 4 {
            0 => JdCategory::Context,
            1 => JdCategory::Preferred,
            2 => JdCategory::Responsibility,
            _ => JdCategory::Required,
        }
    }

    #[test]
    fn test_priority_keeps_required_over_context() {
        let out = dedupe(
            vec![jd("cicd", JdCategory::Context), jd("cicd", JdCategory::Required)],
            DedupPolicy::PriorityByCategory,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, JdCategory::Required);
    }

    #[test]
    fn test_priority_lower_rank_does_not_displace() {
        let out = dedupe(
            vec![jd("Rust", JdCategory::Required), jd("rust", JdCategory::Preferred)],
            DedupPolicy::PriorityByCategory,
        );
        assert_eq!(out, vec![jd("rust", JdCategory::Required)]);
    }

    #[test]
    fn test_priority_tie_keeps_first() {
        let mut first = jd("docker", JdCategory::Preferred);
        first.evidence = Some("first".to_string());
        let mut second = jd("Docker", JdCategory::Preferred);
        second.evidence = Some("second".to_string());

        let out = dedupe(vec![first, second], DedupPolicy::PriorityByCategory);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].evidence.as_deref(), Some("first"));
    }

    #[test]
    fn test_replacement_keeps_first_occurrence_slot() {
        let out = dedupe(
            vec![
                jd("kafka", JdCategory::Context),
                jd("sql", JdCategory::Required),
                jd("KAFKA", JdCategory::Required),
            ],
            DedupPolicy::PriorityByCategory,
        );
        let texts: Vec<&str> = out.iter().map(|k| k.keyword_text.as_str()).collect();
        assert_eq!(texts, vec!["kafka", "sql"]);
        assert_eq!(out[0].category, JdCategory::Required);
    }

    #[test]
    fn test_first_seen_ignores_category() {
        let out = dedupe(
            vec![jd("go", JdCategory::Context), jd("Go", JdCategory::Required)],
            DedupPolicy::FirstSeen,
        );
        assert_eq!(out, vec![jd("go", JdCategory::Context)]);
    }

    #[test]
    fn test_first_seen_resume_keeps_first_evidence() {
        let out = dedupe(
            vec![
                resume("Python", "Skills: Python"),
                resume(" python ", "Built ETL in Python"),
            ],
            DedupPolicy::FirstSeen,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].keyword_text, "python");
        assert_eq!(out[0].evidence.as_deref(), Some("Skills: Python"));
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let out = dedupe(
            vec![jd("   ", JdCategory::Required), jd("sql", JdCategory::Required)],
            DedupPolicy::PriorityByCategory,
        );
        assert_eq!(out, vec![jd("sql", JdCategory::Required)]);
    }

    #[test]
    fn test_text_stored_lowercase_and_collapsed() {
        let out = dedupe(vec![jd("  Spring   Boot ", JdCategory::Required)], DedupPolicy::FirstSeen);
        assert_eq!(out[0].keyword_text, "spring boot");
    }

    fn arb_keywords() -> impl Strategy<Value = Vec<JdKeyword>> {
        prop::collection::vec(("[ aAbBcC]{0,4}", any::<u8>()), 0..24).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(text, n)| jd(&text, category_from(n)))
                .collect()
        })
    }

    fn arb_policy() -> impl Strategy<Value = DedupPolicy> {
        prop_oneof![
            Just(DedupPolicy::FirstSeen),
            Just(DedupPolicy::PriorityByCategory)
        ]
    }

    proptest! {
        #[test]
        fn prop_dedupe_is_idempotent(items in arb_keywords(), policy in arb_policy()) {
            let once = dedupe(items, policy);
            let twice = dedupe(once.clone(), policy);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_output_unique_under_case_folding(items in arb_keywords(), policy in arb_policy()) {
            let out = dedupe(items, policy);
            let mut seen = HashSet::new();
            for k in &out {
                prop_assert!(!k.keyword_text.is_empty());
                prop_assert!(seen.insert(k.keyword_text.to_lowercase()));
            }
        }

        #[test]
        fn prop_priority_keeps_max_rank(items in arb_keywords()) {
            let out = dedupe(items.clone(), DedupPolicy::PriorityByCategory);
            for kept in &out {
                let best = items
                    .iter()
                    .filter(|k| fold_key(&k.keyword_text) == kept.keyword_text)
                    .map(|k| k.category.rank())
                    .max();
                prop_assert_eq!(Some(kept.category.rank()), best);
            }
        }
    }
}
