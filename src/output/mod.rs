// mod.rs - Output formatters module

pub mod stats;

use crate::core::model::ContigRecord;
use bio::io::fasta;
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                format!("Failed to create parent directory '{}': {}", parent.display(), e)
            })?;
        }
    }
    Ok(())
}

/// Write the per-contig TSV report: a `#`-prefixed command/timestamp/version
/// header followed by one row per contig record.
pub fn write_report(
    file_path: &str,
    records: &HashMap<String, ContigRecord>,
    command_line: &str,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Command: {command_line}").map_err(|e| format!("Write error: {e}"))?;
    writeln!(
        writer,
        "# Generated: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
    .map_err(|e| format!("Write error: {e}"))?;
    writeln!(writer, "# haplodedupe v{}", env!("CARGO_PKG_VERSION"))
        .map_err(|e| format!("Write error: {e}"))?;

    writeln!(
        writer,
        "query_id\tlength\tgc\tstatus\tprimary_target\tmatching_length\tsum_normalized_score\tmax_alignment_score\ttiled_out_count\tinitial_overlapping_bases\tdisqualifier\tround1_discard\torphan_override_discard\tmash_redundancy_discard\tscore_retain\tmash_retain\tsize_retain\torphan_recovery_retain\tunique_retain\tbusco_count"
    )
    .map_err(|e| format!("Write error: {e}"))?;

    let mut ids: Vec<&String> = records.keys().collect();
    ids.sort();

    for id in ids {
        let c = &records[id];
        writeln!(
            writer,
            "{}\t{}\t{:.2}\t{}\t{}\t{}\t{:.6}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            c.id,
            c.length,
            c.gc,
            c.status.as_str(),
            c.primary_target.as_deref().unwrap_or("NA"),
            c.matching_length(),
            c.sum_normalized_score,
            c.max_alignment_score,
            c.tiled_out_count,
            c.initial_overlapping_bases,
            c.disqualifier.as_deref().unwrap_or("NA"),
            c.discarded_reason.round1,
            c.discarded_reason.orphan_override,
            c.discarded_reason.mash_redundancy,
            c.retained_reason.score,
            c.retained_reason.mash,
            c.retained_reason.size,
            c.retained_reason.orphan_recovery,
            c.retained_reason.unique,
            c.busco_set.len(),
        )
        .map_err(|e| format!("Write error: {e}"))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {e}"))?;
    println!("✅ Report written to: {file_path}");
    Ok(())
}

/// Stream the input FASTA and write only the contigs whose final status is
/// retained, preserving original order.
pub fn write_filtered_fasta(
    input_fasta: &str,
    output_path: &str,
    records: &HashMap<String, ContigRecord>,
) -> Result<(), String> {
    ensure_parent_dir(output_path)?;

    let reader = fasta::Reader::from_file(input_fasta)
        .map_err(|e| format!("Failed to open FASTA file '{input_fasta}': {e}"))?;
    let out_file = File::create(output_path)
        .map_err(|e| format!("Failed to create output file '{output_path}': {e}"))?;
    let mut writer = fasta::Writer::new(BufWriter::new(out_file));

    let mut written = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to parse FASTA file '{input_fasta}': {e}"))?;
        let retained = records
            .get(record.id())
            .map(|c| c.status.is_retained())
            .unwrap_or(false);
        if retained {
            writer
                .write_record(&record)
                .map_err(|e| format!("Write error: {e}"))?;
            written += 1;
        }
    }

    writer.flush().map_err(|e| format!("Flush error: {e}"))?;
    println!("✅ Filtered FASTA ({written} contig(s)) written to: {output_path}");
    Ok(())
}
