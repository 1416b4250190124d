// mod.rs - Core logic module: the redundancy resolution engine

pub mod model;
pub mod oracle;
pub mod pipeline;
pub mod primary_target;
pub mod threshold;
pub mod tiling;
pub mod tournament;
pub mod unaligned;

pub use model::{ContigRecord, DiscardReasons, RetainReasons, Status};
pub use oracle::DistanceOracle;
pub use pipeline::{run_pipeline, PipelineOutcome, PipelineParams};
pub use threshold::ThresholdMethod;
