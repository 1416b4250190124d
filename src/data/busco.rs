// busco.rs - Marker-gene (BUSCO full_table) parser
//
// Grounded on original_source/parsers/busco_parser.py: skip `#`-prefixed
// comment lines, keep only rows whose status is Complete or Duplicated,
// and collect the set of marker ids seen per contig.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const KEEP_STATUSES: [&str; 2] = ["Complete", "Duplicated"];

/// Parse a BUSCO `full_table.tsv` and return, per contig id (the `Sequence`
/// column), the set of marker-gene ids found on it with an accepted status.
pub fn parse_busco<P: AsRef<Path>>(path: P) -> Result<HashMap<String, HashSet<String>>, String> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| format!("Failed to open BUSCO table '{}': {}", path.display(), e))?;
    let reader = BufReader::new(file);

    let mut markers: HashMap<String, HashSet<String>> = HashMap::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!("Failed to read line {} of '{}': {}", line_num + 1, path.display(), e)
        })?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            continue;
        }

        let busco_id = fields[0];
        let status = fields[1];
        let sequence = fields[2];

        if !KEEP_STATUSES.contains(&status) {
            continue;
        }
        if sequence.is_empty() {
            continue;
        }

        markers
            .entry(sequence.to_string())
            .or_default()
            .insert(busco_id.to_string());
    }

    println!(
        "📊 Loaded marker genes for {} contig(s) from '{}'",
        markers.len(),
        path.display()
    );

    Ok(markers)
}
