// primary_target.rs - Primary reference-locus selection (S2)

use crate::core::threshold::percentile;
use crate::data::AlignmentRow;
use std::collections::HashMap;

/// Per-candidate-locus summary used to rank primary targets.
struct LocusCandidate {
    target_id: String,
    p90_as: f64,
    max_aln_len: u64,
}

/// For one query's alignment rows, pick the single primary target per
/// `(p90_as desc, max_aln_len desc, target_id asc)`. Returns `None` if the
/// query has no alignment rows.
pub fn select_primary_target(rows: &[AlignmentRow]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut by_target: HashMap<&str, Vec<&AlignmentRow>> = HashMap::new();
    for row in rows {
        by_target.entry(row.target_id.as_str()).or_default().push(row);
    }

    let mut candidates: Vec<LocusCandidate> = by_target
        .into_iter()
        .map(|(target_id, group)| {
            let scores: Vec<f64> = group.iter().map(|r| r.aln_score as f64).collect();
            let p90_as = percentile(&scores, 90.0);
            let max_aln_len = group.iter().map(|r| r.aln_len).max().unwrap_or(0);
            LocusCandidate {
                target_id: target_id.to_string(),
                p90_as,
                max_aln_len,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.p90_as
            .partial_cmp(&a.p90_as)
            .unwrap()
            .then_with(|| b.max_aln_len.cmp(&a.max_aln_len))
            .then_with(|| a.target_id.cmp(&b.target_id))
    });

    candidates.into_iter().next().map(|c| c.target_id)
}

/// Group alignment rows by `query_id`, select each query's primary target,
/// and drop rows aligned to any other locus. Returns `(query_id -> primary
/// target)` and the filtered row set.
pub fn assign_primary_targets(
    rows: Vec<AlignmentRow>,
) -> (HashMap<String, String>, Vec<AlignmentRow>) {
    let mut by_query: HashMap<String, Vec<AlignmentRow>> = HashMap::new();
    for row in rows {
        by_query.entry(row.query_id.clone()).or_default().push(row);
    }

    let mut primary_targets = HashMap::new();
    let mut filtered = Vec::new();

    for (query_id, group) in by_query {
        if let Some(target) = select_primary_target(&group) {
            filtered.extend(group.into_iter().filter(|r| r.target_id == target));
            primary_targets.insert(query_id, target);
        }
    }

    (primary_targets, filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(query_id: &str, target_id: &str, aln_len: u64, aln_score: i64) -> AlignmentRow {
        AlignmentRow {
            query_id: query_id.to_string(),
            query_length: 1000,
            query_start: 0,
            query_end: aln_len,
            target_id: target_id.to_string(),
            target_start: 0,
            target_end: aln_len,
            aln_len,
            mapping_quality: 60,
            aln_score,
        }
    }

    #[test]
    fn picks_highest_p90_then_longest_then_id() {
        let rows = vec![
            row("q1", "t1", 100, 50),
            row("q1", "t2", 200, 90),
            row("q1", "t2", 50, 10),
        ];
        assert_eq!(select_primary_target(&rows), Some("t2".to_string()));
    }

    #[test]
    fn ties_break_by_target_id_ascending() {
        let rows = vec![row("q1", "tB", 100, 50), row("q1", "tA", 100, 50)];
        assert_eq!(select_primary_target(&rows), Some("tA".to_string()));
    }

    #[test]
    fn no_rows_returns_none() {
        assert_eq!(select_primary_target(&[]), None);
    }

    #[test]
    fn assign_filters_out_non_primary_rows() {
        let rows = vec![
            row("q1", "t1", 100, 50),
            row("q1", "t2", 200, 90),
            row("q2", "t1", 300, 10),
        ];
        let (targets, filtered) = assign_primary_targets(rows);
        assert_eq!(targets.get("q1"), Some(&"t2".to_string()));
        assert_eq!(targets.get("q2"), Some(&"t1".to_string()));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.target_id == targets[&r.query_id]));
    }
}
