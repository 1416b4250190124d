// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// haplodedupe - reference-based redundancy resolution for genome assemblies
pub struct Args {
    /// alignment (PAF-like) input path
    #[argh(option)]
    pub paf: Option<String>,

    /// sketch-distance input path
    #[argh(option)]
    pub sketch: Option<String>,

    /// contig sequence FASTA
    #[argh(option)]
    pub fasta: Option<String>,

    /// optional marker-gene (BUSCO) table
    #[argh(option)]
    pub busco: Option<String>,

    /// output directory (default: ./output)
    #[argh(option, default = "String::from(\"./output\")")]
    pub output: String,

    /// alignment mapping-quality filter (default: 10)
    #[argh(option, default = "10")]
    pub min_mq: u32,

    /// max accepted same-contig tile overlap in bp (default: 10)
    #[argh(option, default = "10")]
    pub overlap_tolerance: u64,

    /// min inter-contig overlap in bp to trigger competition (default: 1)
    #[argh(option, default = "1")]
    pub min_overlap: u64,

    /// small/large length ratio floor for disqualification (default: 0.50)
    #[argh(option, default = "0.50")]
    pub size_safeguard: f64,

    /// override the sketch-distance threshold (tau); estimated when unset
    #[argh(option)]
    pub distance_threshold: Option<f64>,

    /// fixpoint iteration ceiling per locus (default: 100000)
    #[argh(option, default = "100_000")]
    pub max_iterations: u64,

    /// rayon worker thread count (default: CPUs - 1)
    #[argh(option)]
    pub threads: Option<usize>,

    /// path to TOML configuration file (CLI flags override it)
    #[argh(option)]
    pub config: Option<String>,

    /// generate a sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// parse and validate inputs only, no pipeline run
    #[argh(switch)]
    pub dry_run: bool,
}
