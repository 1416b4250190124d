// paf.rs - Alignment (PAF-like) input parser
//
// Twelve mandatory tab-separated columns followed by optional tag:type:value
// columns; the only tag the core needs is `AS:i:<score>`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One parsed alignment row (mapping-quality pre-filter already applied).
#[derive(Debug, Clone)]
pub struct AlignmentRow {
    pub query_id: String,
    pub query_length: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub target_id: String,
    pub target_start: u64,
    pub target_end: u64,
    pub aln_len: u64,
    pub mapping_quality: u32,
    pub aln_score: i64,
}

fn extract_as_tag(fields: &[&str]) -> Option<i64> {
    for field in fields {
        if let Some(rest) = field.strip_prefix("AS:i:") {
            if let Ok(v) = rest.parse::<i64>() {
                return Some(v);
            }
        }
    }
    None
}

/// Parse a PAF-like alignment file, applying the `mq >= min_mq` filter
/// while reading. Rows missing an `AS:i:` tag default their score to 0 and
/// are counted in the returned warning total.
pub fn parse_paf<P: AsRef<Path>>(
    path: P,
    min_mq: u32,
) -> Result<(Vec<AlignmentRow>, usize), String> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| format!("Failed to open alignment file '{}': {}", path.display(), e))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    let mut missing_as = 0usize;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!(
                "Failed to read line {} of '{}': {}",
                line_num + 1,
                path.display(),
                e
            )
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            return Err(format!(
                "'{}' line {}: expected at least 12 PAF columns, found {}",
                path.display(),
                line_num + 1,
                fields.len()
            ));
        }

        let parse_u64 = |s: &str, col: &str| -> Result<u64, String> {
            s.parse::<u64>().map_err(|_| {
                format!(
                    "'{}' line {}: invalid {} '{}'",
                    path.display(),
                    line_num + 1,
                    col,
                    s
                )
            })
        };
        let parse_u32 = |s: &str, col: &str| -> Result<u32, String> {
            s.parse::<u32>().map_err(|_| {
                format!(
                    "'{}' line {}: invalid {} '{}'",
                    path.display(),
                    line_num + 1,
                    col,
                    s
                )
            })
        };

        let mapping_quality = parse_u32(fields[11], "mapping_quality")?;
        if mapping_quality < min_mq {
            continue;
        }

        let aln_score = match extract_as_tag(&fields[12..]) {
            Some(v) => v,
            None => {
                missing_as += 1;
                0
            }
        };

        rows.push(AlignmentRow {
            query_id: fields[0].to_string(),
            query_length: parse_u64(fields[1], "query_length")?,
            query_start: parse_u64(fields[2], "query_start")?,
            query_end: parse_u64(fields[3], "query_end")?,
            target_id: fields[5].to_string(),
            target_start: parse_u64(fields[7], "target_start")?,
            target_end: parse_u64(fields[8], "target_end")?,
            aln_len: parse_u64(fields[10], "aln_len")?,
            mapping_quality,
            aln_score,
        });
    }

    if missing_as > 0 {
        eprintln!(
            "⚠️  {} alignment record(s) in '{}' missing AS:i: tag, defaulted to 0",
            missing_as,
            path.display()
        );
    }

    Ok((rows, missing_as))
}
