// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub paf: Option<String>,
    pub sketch: Option<String>,
    pub fasta: Option<String>,
    pub busco: Option<String>,
    pub output: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Core settings
    pub min_mq: Option<u32>,
    pub overlap_tolerance: Option<u64>,
    pub min_overlap: Option<u64>,
    pub size_safeguard: Option<f64>,
    pub distance_threshold: Option<f64>,
    pub max_iterations: Option<u64>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            paf: None,
            sketch: None,
            fasta: None,
            busco: None,
            output: None,
            threads: None,
            min_mq: None,
            overlap_tolerance: None,
            min_overlap: None,
            size_safeguard: None,
            distance_threshold: None,
            max_iterations: None,
            dry_run: None,
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# haplodedupe.toml - Configuration file for haplodedupe
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Alignment (PAF-like) input path
paf = "/path/to/alignments.paf"

# Sketch-distance input path
sketch = "/path/to/sketch_distances.tsv"

# Contig sequence FASTA
fasta = "/path/to/assembly.fasta"

# Optional marker-gene (BUSCO) table
# busco = "/path/to/full_table.tsv"

# Output directory
output = "./output"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of rayon worker threads (omit for auto-detection: CPUs - 1)
threads = 8

# =============================================================================
# CORE SETTINGS
# =============================================================================

# Alignment mapping-quality filter
min_mq = 10

# Max accepted same-contig tile overlap (bp)
overlap_tolerance = 10

# Min inter-contig overlap (bp) to trigger competition
min_overlap = 1

# Small/large length ratio floor for disqualification
size_safeguard = 0.50

# Override the sketch-distance threshold (tau); omit to estimate it
# distance_threshold = 0.05

# Fixpoint iteration ceiling per locus
max_iterations = 100000

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
