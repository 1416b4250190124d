// mod.rs - Data structures module

pub mod busco;
pub mod fasta;
pub mod paf;
pub mod sketch;

pub use busco::parse_busco;
pub use fasta::{parse_fasta, SequenceInfo};
pub use paf::{parse_paf, AlignmentRow};
pub use sketch::parse_sketch_distances;
