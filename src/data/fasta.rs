// fasta.rs - Contig sequence parser: per-record length and GC content
//
// GC and length computation is embarrassingly parallel across records, the
// same way original_source/parsers/fasta_parser.py farms it out to a
// process pool; here it's a rayon par_iter over already-loaded records.

use bio::io::fasta;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Per-contig length and GC fraction (percentage, `[0, 100]`).
#[derive(Debug, Clone, Copy)]
pub struct SequenceInfo {
    pub length: u64,
    pub gc: f64,
}

fn gc_fraction(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc_count = seq
        .iter()
        .filter(|&&b| matches!(b, b'G' | b'g' | b'C' | b'c'))
        .count();
    100.0 * gc_count as f64 / seq.len() as f64
}

/// Parse a FASTA file and compute `(length, gc)` for every record.
pub fn parse_fasta<P: AsRef<Path>>(path: P) -> Result<HashMap<String, SequenceInfo>, String> {
    let path = path.as_ref();
    let reader = fasta::Reader::from_file(path)
        .map_err(|e| format!("Failed to open FASTA file '{}': {}", path.display(), e))?;

    let records: Vec<fasta::Record> = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Failed to parse FASTA file '{}': {}", path.display(), e))?;

    println!("🧬 Computing GC/length for {} contig(s)...", records.len());

    let computed: Vec<(String, SequenceInfo)> = records
        .par_iter()
        .map(|record| {
            let seq = record.seq();
            (
                record.id().to_string(),
                SequenceInfo {
                    length: seq.len() as u64,
                    gc: gc_fraction(seq),
                },
            )
        })
        .collect();

    Ok(computed.into_iter().collect())
}
