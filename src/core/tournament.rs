// tournament.rs - Iterative per-locus tournament (S5)

use crate::core::model::{intervals_overlap, ContigRecord, Status};
use crate::core::oracle::DistanceOracle;
use std::collections::HashMap;

pub struct TournamentParams {
    pub distance_threshold: f64,
    pub min_overlap: u64,
    pub size_safeguard: f64,
    pub max_iterations: u64,
}

/// `competes(ci, oi)`: does the contig at `oi` outrank the one at `ci`?
fn competes(
    ci: usize,
    oi: usize,
    group: &[ContigRecord],
    oracle: &DistanceOracle,
    params: &TournamentParams,
    order_rank: &HashMap<String, usize>,
) -> bool {
    let c = &group[ci];
    let o = &group[oi];

    if o.status != Status::AlignedRetained {
        return false;
    }
    if !intervals_overlap(&c.intervals, &o.intervals, params.min_overlap) {
        return false;
    }

    let superior = if o.sum_normalized_score > c.sum_normalized_score {
        true
    } else if o.sum_normalized_score == c.sum_normalized_score {
        let o_wins = order_rank[&o.id] < order_rank[&c.id];
        if o_wins {
            eprintln!(
                "⚠️  Score tie between {} and {}, breaking by canonical order",
                c.id, o.id
            );
        }
        o_wins
    } else {
        false
    };
    if !superior {
        return false;
    }

    let dist = match oracle.get(&c.id, &o.id) {
        Some(d) => d,
        None => return false,
    };
    if dist >= params.distance_threshold {
        return false;
    }

    if (o.length as f64) < params.size_safeguard * c.length as f64 {
        return false;
    }

    true
}

fn canonical_order(group: &[ContigRecord]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..group.len()).collect();
    indices.sort_by(|&a, &b| {
        group[a]
            .min_start()
            .cmp(&group[b].min_start())
            .then_with(|| group[a].id.cmp(&group[b].id))
    });
    indices
}

/// Internal invariant breach is a fatal assertion (spec §7): a discarded
/// contig with no recorded disqualifier and no discard-reason flag set would
/// mean a downstream report row nobody can explain. `run_tournament_on_locus`
/// checks this after pass 1 and after every fixpoint iteration; the caller is
/// expected to contain the resulting panic per-locus (see `pipeline.rs`).
fn check_invariants(group: &[ContigRecord], locus_id: &str) {
    for c in group {
        if c.status == Status::AlignedDiscarded {
            assert!(
                c.disqualifier.is_some(),
                "invariant breach on locus {locus_id}: contig {} discarded with no disqualifier",
                c.id
            );
            assert!(
                c.discarded_reason.round1 || c.discarded_reason.orphan_override,
                "invariant breach on locus {locus_id}: contig {} discarded with no discard_reason flag",
                c.id
            );
        }
    }
}

fn set_discarded(c: &mut ContigRecord, disqualifier: &str, round1: bool) {
    c.status = Status::AlignedDiscarded;
    c.disqualifier = Some(disqualifier.to_string());
    c.discarded_reason.clear();
    c.retained_reason.clear();
    if round1 {
        c.discarded_reason.round1 = true;
    } else {
        c.discarded_reason.orphan_override = true;
    }
}

/// Compute Pass-1-style retained-reason flags for `ci` by scanning every
/// overlapping member of the group. Also reused in the orphan-recovery
/// promotion path.
fn compute_retained_reasons(ci: usize, group: &mut [ContigRecord], params: &TournamentParams, oracle: &DistanceOracle) {
    let mut any_overlap = false;
    let c_id = group[ci].id.clone();
    let c_score = group[ci].sum_normalized_score;
    let c_length = group[ci].length;
    let c_intervals = group[ci].intervals.clone();

    let mut score_flag = false;
    let mut mash_flag = false;
    let mut size_flag = false;

    for oi in 0..group.len() {
        if oi == ci {
            continue;
        }
        if !intervals_overlap(&c_intervals, &group[oi].intervals, params.min_overlap) {
            continue;
        }
        any_overlap = true;
        if group[oi].status != Status::AlignedRetained {
            continue;
        }

        let o_score = group[oi].sum_normalized_score;
        let o_length = group[oi].length;

        if c_score > o_score {
            score_flag = true;
        }
        if c_score < o_score {
            if let Some(d) = oracle.get(&c_id, &group[oi].id) {
                if d > params.distance_threshold {
                    mash_flag = true;
                }
            }
            if (o_length as f64) < params.size_safeguard * c_length as f64 {
                size_flag = true;
            }
        }
    }

    group[ci].retained_reason.score = score_flag;
    group[ci].retained_reason.mash = mash_flag;
    group[ci].retained_reason.size = size_flag;
    if !any_overlap {
        group[ci].retained_reason.unique = true;
    }
}

/// Run the tournament to a fixpoint for one locus group. Returns the number
/// of fixpoint iterations used, and whether it converged within
/// `max_iterations`.
pub fn run_tournament_on_locus(
    group: &mut Vec<ContigRecord>,
    oracle: &DistanceOracle,
    params: &TournamentParams,
    locus_id: &str,
) -> (u64, bool) {
    if group.is_empty() {
        return (0, true);
    }

    let order = canonical_order(group);
    let order_rank: HashMap<String, usize> = order
        .iter()
        .enumerate()
        .map(|(rank, &idx)| (group[idx].id.clone(), rank))
        .collect();
    let id_index: HashMap<String, usize> = group
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();

    // Pass 1: initial sweep.
    for &ci in &order {
        if group[ci].status != Status::AlignedRetained {
            continue;
        }

        let mut disqualifier: Option<usize> = None;
        for &oi in &order {
            if oi == ci {
                continue;
            }
            if competes(ci, oi, group, oracle, params, &order_rank) {
                disqualifier = Some(oi);
                break;
            }
        }

        if let Some(oi) = disqualifier {
            let o_id = group[oi].id.clone();
            set_discarded(&mut group[ci], &o_id, true);
        } else {
            compute_retained_reasons(ci, group, params, oracle);
        }
    }
    check_invariants(group, locus_id);

    // Fixpoint: orphan recovery.
    let mut iterations: u64 = 0;
    let mut status_changed = true;
    while status_changed {
        if iterations >= params.max_iterations {
            eprintln!(
                "⚠️  Tournament limit reached ({}) for locus {}",
                params.max_iterations, locus_id
            );
            return (iterations, false);
        }
        status_changed = false;
        iterations += 1;

        let mut orphans: Vec<usize> = Vec::new();
        for (i, c) in group.iter().enumerate() {
            if c.status != Status::AlignedDiscarded {
                continue;
            }
            if let Some(dq_id) = &c.disqualifier {
                if let Some(&dqi) = id_index.get(dq_id) {
                    if group[dqi].status == Status::AlignedDiscarded {
                        orphans.push(i);
                    }
                }
            }
        }
        orphans.sort_by(|&a, &b| {
            group[a]
                .min_start()
                .cmp(&group[b].min_start())
                .then_with(|| group[a].id.cmp(&group[b].id))
        });

        for ci in orphans {
            // 1. Challenge existing winners, treating ci as retained.
            let saved_status = group[ci].status;
            group[ci].status = Status::AlignedRetained;
            for ri in 0..group.len() {
                if ri == ci || group[ri].status != Status::AlignedRetained {
                    continue;
                }
                if competes(ri, ci, group, oracle, params, &order_rank) {
                    let c_id = group[ci].id.clone();
                    set_discarded(&mut group[ri], &c_id, false);
                    status_changed = true;
                }
            }
            group[ci].status = saved_status;

            // 2. Re-test ci against remaining winners.
            let mut disqualified_by: Option<usize> = None;
            for &ri in &order {
                if group[ri].status != Status::AlignedRetained {
                    continue;
                }
                if competes(ci, ri, group, oracle, params, &order_rank) {
                    disqualified_by = Some(ri);
                    break;
                }
            }

            if let Some(ri) = disqualified_by {
                let r_id = group[ri].id.clone();
                set_discarded(&mut group[ci], &r_id, false);
            } else {
                group[ci].status = Status::AlignedRetained;
                group[ci].disqualifier = None;
                group[ci].discarded_reason.clear();
                group[ci].retained_reason.clear();
                group[ci].retained_reason.orphan_recovery = true;
                compute_retained_reasons(ci, group, params, oracle);
                status_changed = true;
            }
        }
        check_invariants(group, locus_id);
    }

    (iterations, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn contig(id: &str, length: u64, interval: (u64, u64), score: f64) -> ContigRecord {
        let mut c = ContigRecord::new(id.to_string(), length, 40.0, HashSet::new());
        c.status = Status::AlignedRetained;
        c.primary_target = Some("t1".to_string());
        c.intervals = vec![interval];
        c.sum_normalized_score = score;
        c
    }

    fn default_params() -> TournamentParams {
        TournamentParams {
            distance_threshold: 0.05,
            min_overlap: 1,
            size_safeguard: 0.5,
            max_iterations: 1000,
        }
    }

    #[test]
    fn disqualifier_choice_is_independent_of_vector_storage_order() {
        // V is beaten by both A and B; canonical order (by min_start: V=100,
        // A=120, B=150) must always pick A as the recorded disqualifier,
        // regardless of which order the three contigs sit in the input Vec.
        let mut oracle = DistanceOracle::new();
        oracle.insert("V", "A", 0.01);
        oracle.insert("V", "B", 0.01);

        let mut forward = vec![
            contig("V", 1000, (100, 500), 0.5),
            contig("A", 1000, (120, 520), 0.9),
            contig("B", 1000, (150, 550), 0.9),
        ];
        run_tournament_on_locus(&mut forward, &oracle, &default_params(), "t1");

        let mut reversed = vec![
            contig("B", 1000, (150, 550), 0.9),
            contig("A", 1000, (120, 520), 0.9),
            contig("V", 1000, (100, 500), 0.5),
        ];
        run_tournament_on_locus(&mut reversed, &oracle, &default_params(), "t1");

        for group in [&forward, &reversed] {
            let v = group.iter().find(|c| c.id == "V").unwrap();
            assert_eq!(v.status, Status::AlignedDiscarded);
            assert_eq!(v.disqualifier.as_deref(), Some("A"));
        }
    }

    #[test]
    fn scenario_s_d_direct_discard() {
        let mut group = vec![
            contig("C1", 1000, (100, 500), 0.8),
            contig("C2", 1000, (200, 600), 0.9),
        ];
        let mut oracle = DistanceOracle::new();
        oracle.insert("C1", "C2", 0.01);

        run_tournament_on_locus(&mut group, &oracle, &default_params(), "t1");

        let c1 = group.iter().find(|c| c.id == "C1").unwrap();
        let c2 = group.iter().find(|c| c.id == "C2").unwrap();
        assert_eq!(c2.status, Status::AlignedRetained);
        assert_eq!(c1.status, Status::AlignedDiscarded);
        assert_eq!(c1.disqualifier.as_deref(), Some("C2"));
        assert!(c1.discarded_reason.round1);
    }

    #[test]
    fn scenario_s_e_size_safeguard_protects_large() {
        let mut group = vec![
            contig("C1", 1000, (100, 500), 0.8),
            contig("C2", 300, (200, 600), 0.9),
        ];
        let mut oracle = DistanceOracle::new();
        oracle.insert("C1", "C2", 0.01);

        run_tournament_on_locus(&mut group, &oracle, &default_params(), "t1");

        let c1 = group.iter().find(|c| c.id == "C1").unwrap();
        let c2 = group.iter().find(|c| c.id == "C2").unwrap();
        assert_eq!(c1.status, Status::AlignedRetained);
        assert_eq!(c2.status, Status::AlignedRetained);
        assert!(c1.retained_reason.size);
    }

    #[test]
    fn single_non_overlapping_contig_is_unique() {
        let mut group = vec![contig("C1", 1000, (100, 500), 0.8)];
        let oracle = DistanceOracle::new();
        run_tournament_on_locus(&mut group, &oracle, &default_params(), "t1");
        assert_eq!(group[0].status, Status::AlignedRetained);
        assert!(group[0].retained_reason.unique);
    }

    #[test]
    #[should_panic(expected = "invariant breach")]
    fn check_invariants_panics_on_discard_with_no_disqualifier() {
        let mut group = vec![contig("C1", 1000, (100, 500), 0.8)];
        group[0].status = Status::AlignedDiscarded;
        check_invariants(&group, "t1");
    }

    #[test]
    fn zero_threshold_never_discards_for_similarity() {
        let mut group = vec![
            contig("C1", 1000, (100, 500), 0.8),
            contig("C2", 1000, (200, 600), 0.9),
        ];
        let mut oracle = DistanceOracle::new();
        oracle.insert("C1", "C2", 0.01);
        let mut params = default_params();
        params.distance_threshold = 0.0;

        run_tournament_on_locus(&mut group, &oracle, &params, "t1");
        assert_eq!(group[0].status, Status::AlignedRetained);
        assert_eq!(group[1].status, Status::AlignedRetained);
    }

    #[test]
    fn orphan_recovery_promotes_chain() {
        // C is beaten by B in pass 1 (B still retained at the time C is
        // scanned); B is in turn beaten by A, leaving C an orphan whose
        // disqualifier (B) is itself discarded. Since C never overlaps A,
        // nothing disqualifies it on re-test, so it is promoted.
        let mut group = vec![
            contig("C", 1000, (100, 300), 0.5),
            contig("B", 1000, (250, 450), 0.7),
            contig("A", 1000, (400, 600), 0.9),
        ];
        let mut oracle = DistanceOracle::new();
        oracle.insert("C", "B", 0.01);
        oracle.insert("B", "A", 0.01);

        run_tournament_on_locus(&mut group, &oracle, &default_params(), "t1");

        let a = group.iter().find(|c| c.id == "A").unwrap();
        let b = group.iter().find(|c| c.id == "B").unwrap();
        let c = group.iter().find(|c| c.id == "C").unwrap();
        assert_eq!(a.status, Status::AlignedRetained);
        assert_eq!(b.status, Status::AlignedDiscarded);
        assert_eq!(b.disqualifier.as_deref(), Some("A"));
        assert_eq!(c.status, Status::AlignedRetained);
        assert!(c.retained_reason.orphan_recovery);
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let mut group = vec![
            contig("C1", 1000, (100, 500), 0.8),
            contig("C2", 1000, (200, 600), 0.9),
        ];
        let mut oracle = DistanceOracle::new();
        oracle.insert("C1", "C2", 0.01);
        run_tournament_on_locus(&mut group, &oracle, &default_params(), "t1");

        let snapshot: Vec<(String, Status)> =
            group.iter().map(|c| (c.id.clone(), c.status)).collect();
        run_tournament_on_locus(&mut group, &oracle, &default_params(), "t1");
        let after: Vec<(String, Status)> = group.iter().map(|c| (c.id.clone(), c.status)).collect();
        assert_eq!(snapshot, after);
    }
}
