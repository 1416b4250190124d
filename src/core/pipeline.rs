// pipeline.rs - Orchestrates S1-S6 over the parsed inputs
//
// S3 (tiling) and S5 (tournament) shard by query_id / primary_target using
// rayon's data-parallel iterators over disjoint owned Vec<ContigRecord>
// groups. Results are merged back into the master map by id on the calling
// thread.

use crate::core::model::{ContigRecord, Status};
use crate::core::oracle::DistanceOracle;
use crate::core::primary_target::assign_primary_targets;
use crate::core::threshold::{estimate_distance_threshold, ThresholdMethod};
use crate::core::tiling::tile_and_score_contig;
use crate::core::tournament::{run_tournament_on_locus, TournamentParams};
use crate::core::unaligned::screen_unaligned_contigs;
use crate::data::{AlignmentRow, SequenceInfo};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

pub struct PipelineParams {
    pub overlap_tolerance: u64,
    pub min_overlap: u64,
    pub size_safeguard: f64,
    pub distance_threshold: Option<f64>,
    pub max_iterations: u64,
}

pub struct PipelineOutcome {
    pub records: HashMap<String, ContigRecord>,
    pub tau: f64,
    pub tau_method: ThresholdMethod,
}

/// Run the full redundancy-resolution pipeline (S1-S6) over parsed inputs.
pub fn run_pipeline(
    sequences: &HashMap<String, SequenceInfo>,
    markers: &HashMap<String, HashSet<String>>,
    alignments: Vec<AlignmentRow>,
    oracle: &DistanceOracle,
    params: &PipelineParams,
) -> PipelineOutcome {
    // S1: initialize one record per known contig.
    let mut records: HashMap<String, ContigRecord> = sequences
        .iter()
        .map(|(id, info)| {
            let busco_set = markers.get(id).cloned().unwrap_or_default();
            (id.clone(), ContigRecord::new(id.clone(), info.length, info.gc, busco_set))
        })
        .collect();

    // S2: primary-target selection, dropping non-primary alignment rows.
    println!("🔍 Selecting primary targets for {} alignment record(s)...", alignments.len());
    let (primary_targets, filtered_rows) = assign_primary_targets(alignments);

    for (query_id, target_id) in &primary_targets {
        if let Some(record) = records.get_mut(query_id) {
            record.primary_target = Some(target_id.clone());
            record.status = Status::AlignedRetained;
        }
    }

    // S3: per-contig tiling, sharded by query_id with rayon.
    println!("📊 Tiling alignments for {} contig(s)...", primary_targets.len());
    let mut rows_by_query: HashMap<String, Vec<AlignmentRow>> = HashMap::new();
    for row in filtered_rows {
        rows_by_query.entry(row.query_id.clone()).or_default().push(row);
    }

    let tile_results: Vec<(String, crate::core::tiling::TileResult)> = rows_by_query
        .into_par_iter()
        .map(|(query_id, rows)| {
            let query_length = rows.first().map(|r| r.query_length).unwrap_or(0);
            let result = tile_and_score_contig(&rows, query_length, params.overlap_tolerance);
            (query_id, result)
        })
        .collect();

    for (query_id, result) in tile_results {
        if let Some(record) = records.get_mut(&query_id) {
            record.intervals = result.intervals;
            record.sum_normalized_score = result.sum_normalized_score;
            record.max_alignment_score = result.max_alignment_score;
            record.tiled_out_count = result.tiled_out_count;
            record.initial_overlapping_bases = result.initial_overlapping_bases;
        }
    }

    // S4: locus-overlap enumeration + threshold estimation.
    println!("🔍 Estimating sketch-distance threshold...");
    let overlap_distances = collect_locus_overlap_distances(&records, oracle, params.min_overlap);
    let (tau, tau_method) = match params.distance_threshold {
        Some(t) => (t, ThresholdMethod::UserSupplied),
        None => estimate_distance_threshold(&overlap_distances),
    };
    println!("✅ τ = {:.4} (method: {})", tau, tau_method.as_str());

    // S5: per-locus tournament, sharded by primary_target with rayon. Only
    // AlignedRetained contigs form locus groups; everything else (unaligned,
    // or already dropped) passes through untouched. Group order here tracks
    // HashMap iteration and is not reproducible across runs, but the
    // tournament always re-derives canonical_order(group) internally before
    // scanning, so this HashMap order never leaks into the result.
    let mut locus_groups: HashMap<String, Vec<ContigRecord>> = HashMap::new();
    let mut passthrough: Vec<ContigRecord> = Vec::new();
    for (_, record) in records {
        if record.status == Status::AlignedRetained {
            locus_groups
                .entry(record.primary_target.clone().unwrap())
                .or_default()
                .push(record);
        } else {
            passthrough.push(record);
        }
    }

    println!("🧬 Running tournament across {} locus group(s)...", locus_groups.len());
    let tournament_params = TournamentParams {
        distance_threshold: tau,
        min_overlap: params.min_overlap,
        size_safeguard: params.size_safeguard,
        max_iterations: params.max_iterations,
    };

    // A per-locus invariant-breach panic (spec §7) must not abort sibling
    // loci: each shard is caught independently and, on failure, that locus
    // falls back to its pre-tournament state rather than dragging down the
    // whole run.
    let resolved: Vec<Vec<ContigRecord>> = locus_groups
        .into_par_iter()
        .map(|(locus_id, mut group)| {
            let before = group.clone();
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                run_tournament_on_locus(&mut group, oracle, &tournament_params, &locus_id);
            }));
            match outcome {
                Ok(()) => group,
                Err(_) => {
                    eprintln!(
                        "⚠️  Tournament failed for locus {locus_id}; locus skipped, pre-tournament state kept"
                    );
                    before
                }
            }
        })
        .collect();

    let mut records: HashMap<String, ContigRecord> = resolved
        .into_iter()
        .flatten()
        .chain(passthrough)
        .map(|c| (c.id.clone(), c))
        .collect();

    // S6: unaligned redundancy screening (single-threaded, rolling survivor set).
    println!("🔍 Screening unaligned contigs for redundancy...");
    let mut record_vec: Vec<ContigRecord> = records.drain().map(|(_, v)| v).collect();
    screen_unaligned_contigs(&mut record_vec, oracle, tau);
    let records: HashMap<String, ContigRecord> = record_vec.into_iter().map(|c| (c.id.clone(), c)).collect();

    println!("✅ Pipeline complete: {} contig(s) processed", records.len());

    PipelineOutcome { records, tau, tau_method }
}

fn collect_locus_overlap_distances(
    records: &HashMap<String, ContigRecord>,
    oracle: &DistanceOracle,
    min_overlap: u64,
) -> Vec<f64> {
    let mut by_locus: HashMap<&str, Vec<&ContigRecord>> = HashMap::new();
    for record in records.values() {
        if record.status == Status::AlignedRetained {
            if let Some(target) = &record.primary_target {
                by_locus.entry(target.as_str()).or_default().push(record);
            }
        }
    }

    let mut distances = Vec::new();
    for contigs in by_locus.values() {
        for i in 0..contigs.len() {
            for j in (i + 1)..contigs.len() {
                let a = contigs[i];
                let b = contigs[j];
                if crate::core::model::intervals_overlap(&a.intervals, &b.intervals, min_overlap) {
                    if let Some(d) = oracle.get(&a.id, &b.id) {
                        distances.push(d);
                    }
                }
            }
        }
    }
    distances
}
