// sketch.rs - Pairwise sketch-distance input parser

use crate::core::oracle::DistanceOracle;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const P_VALUE_CUTOFF: f64 = 0.05;

/// Parse a tab-separated `(id_a, id_b, distance, p_value[, hashes])` file
/// and build the symmetric oracle directly, keeping only rows with
/// `p_value < 0.05`. A 5th `hashes` column, if present, is ignored.
pub fn parse_sketch_distances<P: AsRef<Path>>(path: P) -> Result<(DistanceOracle, usize), String> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| format!("Failed to open sketch distance file '{}': {}", path.display(), e))?;
    let reader = BufReader::new(file);

    let mut oracle = DistanceOracle::new();
    let mut total = 0usize;
    let mut kept = 0usize;

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
        total += 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            return Err(format!(
                "'{}' line {}: expected at least 4 columns (id_a, id_b, distance, p_value), found {}",
                path.display(),
                line_num + 1,
                fields.len()
            ));
        }

        let id_a = fields[0];
        let id_b = fields[1];
        let distance: f64 = fields[2].parse().map_err(|_| {
            format!(
                "'{}' line {}: invalid distance '{}'",
                path.display(),
                line_num + 1,
                fields[2]
            )
        })?;
        let p_value: f64 = fields[3].parse().map_err(|_| {
            format!(
                "'{}' line {}: invalid p_value '{}'",
                path.display(),
                line_num + 1,
                fields[3]
            )
        })?;

        if p_value < P_VALUE_CUTOFF {
            oracle.insert(id_a, id_b, distance);
            kept += 1;
        }
    }

    if total > kept {
        println!(
            "🔍 Filtered out {} sketch-distance record(s) with p-value >= {}",
            total - kept,
            P_VALUE_CUTOFF
        );
    }

    Ok((oracle, kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("haplodedupe_sketch_{}_{}.tsv", std::process::id(), contents.len()));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn filters_by_p_value() {
        let contents = "a\tb\t0.01\t0.001\nc\td\t0.02\t0.2\n";
        let path = write_temp(contents);
        let (oracle, kept) = parse_sketch_distances(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(kept, 1);
        assert_eq!(oracle.get("a", "b"), Some(0.01));
        assert_eq!(oracle.get("c", "d"), None);
    }

    #[test]
    fn ignores_trailing_hashes_column() {
        let contents = "a\tb\t0.01\t0.001\t950/1000\n";
        let path = write_temp(contents);
        let (oracle, _) = parse_sketch_distances(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(oracle.get("a", "b"), Some(0.01));
    }
}
