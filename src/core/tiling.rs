// tiling.rs - Alignment tiling and score finalization (S3)

use crate::data::AlignmentRow;

/// Result of tiling one contig's alignments against its primary target.
pub struct TileResult {
    pub intervals: Vec<(u64, u64)>,
    pub sum_normalized_score: f64,
    pub max_alignment_score: u64,
    pub tiled_out_count: u64,
    pub initial_overlapping_bases: u64,
}

fn overlap(a: (u64, u64), b: (u64, u64)) -> i64 {
    a.1.min(b.1) as i64 - a.0.max(b.0) as i64
}

/// Greedy score-first tiling: sort by `(aln_score desc, aln_len desc)`,
/// accept an interval unless it overlaps a previously accepted one by more
/// than `overlap_tolerance` bases.
pub fn tile_and_score_contig(rows: &[AlignmentRow], query_length: u64, overlap_tolerance: u64) -> TileResult {
    let initial_overlapping_bases = compute_initial_overlapping_bases(rows);

    let mut sorted: Vec<&AlignmentRow> = rows.iter().collect();
    sorted.sort_by(|a, b| {
        b.aln_score
            .cmp(&a.aln_score)
            .then_with(|| b.aln_len.cmp(&a.aln_len))
    });

    let mut accepted: Vec<(u64, u64)> = Vec::new();
    let mut total_score: i64 = 0;
    let mut max_score: i64 = 0;
    let mut tiled_out_count: u64 = 0;

    for row in sorted {
        let interval = (row.target_start, row.target_end);
        let overlaps_too_much = accepted
            .iter()
            .any(|&a| overlap(interval, a) > overlap_tolerance as i64);

        if overlaps_too_much {
            tiled_out_count += 1;
        } else {
            accepted.push(interval);
            total_score += row.aln_score;
            if row.aln_score > max_score {
                max_score = row.aln_score;
            }
        }
    }

    let sum_normalized_score = if query_length > 0 {
        total_score as f64 / query_length as f64
    } else {
        0.0
    };

    TileResult {
        intervals: accepted,
        sum_normalized_score,
        max_alignment_score: max_score.max(0) as u64,
        tiled_out_count,
        initial_overlapping_bases,
    }
}

/// Reference bases covered by more than one input alignment on the primary
/// target, via a coordinate-sweep of `(position, ±1)` events.
fn compute_initial_overlapping_bases(rows: &[AlignmentRow]) -> u64 {
    if rows.is_empty() {
        return 0;
    }
    let mut events: Vec<(u64, i32)> = Vec::with_capacity(rows.len() * 2);
    for row in rows {
        events.push((row.target_start, 1));
        events.push((row.target_end, -1));
    }
    events.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut coverage: i64 = 0;
    let mut last_pos = events[0].0;
    let mut redundant_bases: u64 = 0;

    for (pos, delta) in events {
        if coverage > 1 {
            redundant_bases += pos.saturating_sub(last_pos);
        }
        coverage += delta as i64;
        last_pos = pos;
    }

    redundant_bases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(start: u64, end: u64, score: i64) -> AlignmentRow {
        AlignmentRow {
            query_id: "q1".to_string(),
            query_length: 1000,
            query_start: 0,
            query_end: end - start,
            target_id: "t1".to_string(),
            target_start: start,
            target_end: end,
            aln_len: end - start,
            mapping_quality: 60,
            aln_score: score,
        }
    }

    #[test]
    fn scenario_s_a_tile_and_score() {
        let rows = vec![row(100, 300, 200), row(500, 700, 300), row(150, 350, 250)];
        let result = tile_and_score_contig(&rows, 1000, 10);

        let mut intervals = result.intervals.clone();
        intervals.sort();
        assert_eq!(intervals, vec![(150, 350), (500, 700)]);
        assert_eq!(result.tiled_out_count, 1);
        assert_eq!(result.max_alignment_score, 300);
        assert!((result.sum_normalized_score - 0.55).abs() < 1e-9);
    }

    #[test]
    fn overlap_within_tolerance_both_accepted() {
        let rows = vec![row(100, 300, 200), row(295, 500, 150)];
        let result = tile_and_score_contig(&rows, 1000, 10);
        assert_eq!(result.intervals.len(), 2);
        assert_eq!(result.tiled_out_count, 0);
    }

    #[test]
    fn empty_rows_yield_empty_result() {
        let result = tile_and_score_contig(&[], 1000, 10);
        assert!(result.intervals.is_empty());
        assert_eq!(result.sum_normalized_score, 0.0);
        assert_eq!(result.max_alignment_score, 0);
    }

    #[test]
    fn zero_length_query_normalizes_to_zero() {
        let rows = vec![row(0, 100, 50)];
        let result = tile_and_score_contig(&rows, 0, 10);
        assert_eq!(result.sum_normalized_score, 0.0);
    }
}
