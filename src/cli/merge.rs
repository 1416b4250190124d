// merge.rs - Merge a loaded TOML config into parsed CLI args
//
// CLI flags take precedence; a config value only fills in a field still at
// its argh-parsed default. Path-like Option<String> fields are the
// exception: those are only ever set by the user (argh has no default for
// them), so a config value fills them whenever the flag was omitted.

use crate::cli::args::Args;
use crate::cli::config::Config;

const DEFAULT_OUTPUT: &str = "./output";
const DEFAULT_MIN_MQ: u32 = 10;
const DEFAULT_OVERLAP_TOLERANCE: u64 = 10;
const DEFAULT_MIN_OVERLAP: u64 = 1;
const DEFAULT_SIZE_SAFEGUARD: f64 = 0.50;
const DEFAULT_MAX_ITERATIONS: u64 = 100_000;

pub fn apply_config(args: &mut Args, config: &Config) {
    if args.paf.is_none() {
        args.paf = config.paf.clone();
    }
    if args.sketch.is_none() {
        args.sketch = config.sketch.clone();
    }
    if args.fasta.is_none() {
        args.fasta = config.fasta.clone();
    }
    if args.busco.is_none() {
        args.busco = config.busco.clone();
    }
    if args.threads.is_none() {
        args.threads = config.threads;
    }
    if args.distance_threshold.is_none() {
        args.distance_threshold = config.distance_threshold;
    }

    if args.output == DEFAULT_OUTPUT {
        if let Some(v) = &config.output {
            args.output = v.clone();
        }
    }
    if args.min_mq == DEFAULT_MIN_MQ {
        if let Some(v) = config.min_mq {
            args.min_mq = v;
        }
    }
    if args.overlap_tolerance == DEFAULT_OVERLAP_TOLERANCE {
        if let Some(v) = config.overlap_tolerance {
            args.overlap_tolerance = v;
        }
    }
    if args.min_overlap == DEFAULT_MIN_OVERLAP {
        if let Some(v) = config.min_overlap {
            args.min_overlap = v;
        }
    }
    if args.size_safeguard == DEFAULT_SIZE_SAFEGUARD {
        if let Some(v) = config.size_safeguard {
            args.size_safeguard = v;
        }
    }
    if args.max_iterations == DEFAULT_MAX_ITERATIONS {
        if let Some(v) = config.max_iterations {
            args.max_iterations = v;
        }
    }
    if !args.dry_run {
        if let Some(v) = config.dry_run {
            args.dry_run = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> Args {
        Args {
            paf: None,
            sketch: None,
            fasta: None,
            busco: None,
            output: DEFAULT_OUTPUT.to_string(),
            min_mq: DEFAULT_MIN_MQ,
            overlap_tolerance: DEFAULT_OVERLAP_TOLERANCE,
            min_overlap: DEFAULT_MIN_OVERLAP,
            size_safeguard: DEFAULT_SIZE_SAFEGUARD,
            distance_threshold: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threads: None,
            config: None,
            generate_config: false,
            dry_run: false,
        }
    }

    #[test]
    fn config_fills_unset_paths() {
        let mut args = default_args();
        let mut config = Config::new();
        config.paf = Some("from_config.paf".to_string());
        apply_config(&mut args, &config);
        assert_eq!(args.paf.as_deref(), Some("from_config.paf"));
    }

    #[test]
    fn explicit_cli_flag_wins_over_config() {
        let mut args = default_args();
        args.min_mq = 30;
        let mut config = Config::new();
        config.min_mq = Some(5);
        apply_config(&mut args, &config);
        assert_eq!(args.min_mq, 30);
    }

    #[test]
    fn config_fills_default_scalar() {
        let mut args = default_args();
        let mut config = Config::new();
        config.size_safeguard = Some(0.75);
        apply_config(&mut args, &config);
        assert_eq!(args.size_safeguard, 0.75);
    }
}
