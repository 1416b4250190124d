// lib.rs - haplodedupe library root

//! # haplodedupe - reference-based redundancy resolution for genome assemblies
//!
//! This library removes redundant haplotypic copies of the same genomic
//! locus from a diploid/polyploid assembly, given precomputed contig-to-
//! reference alignments and pairwise contig sketch distances. Unique,
//! divergent, or uniquely-informative copies are retained.
//!
//! ## Pipeline
//!
//! 1. Primary-target selection: one reference locus per aligned contig.
//! 2. Alignment tiling and score finalization.
//! 3. Sketch-distance threshold (tau) estimation via KDE valley detection.
//! 4. Iterative per-locus tournament with orphan-recovery fixpoint.
//! 5. Unaligned redundancy screening against the retained survivor set.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use haplodedupe::prelude::*;
//!
//! let (alignments, _) = parse_paf("alignments.paf", 10)?;
//! let (oracle, _) = parse_sketch_distances("sketch.tsv")?;
//! let sequences = parse_fasta("assembly.fasta")?;
//!
//! let params = PipelineParams {
//!     overlap_tolerance: 10,
//!     min_overlap: 1,
//!     size_safeguard: 0.5,
//!     distance_threshold: None,
//!     max_iterations: 100_000,
//! };
//! let outcome = run_pipeline(&sequences, &Default::default(), alignments, &oracle, &params);
//! # Ok::<(), String>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{apply_config, validate_args, Args, Config, ValidationResult};
    pub use crate::core::{
        run_pipeline, ContigRecord, DiscardReasons, DistanceOracle, PipelineOutcome,
        PipelineParams, RetainReasons, Status, ThresholdMethod,
    };
    pub use crate::data::{parse_busco, parse_fasta, parse_paf, parse_sketch_distances, SequenceInfo};
    pub use crate::output::{write_filtered_fasta, write_report};
}

pub use core::{ContigRecord, DistanceOracle, PipelineOutcome, PipelineParams, Status};
pub use data::{parse_busco, parse_fasta, parse_paf, parse_sketch_distances};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("haplodedupe v{VERSION} - reference-based assembly redundancy resolution")
}
