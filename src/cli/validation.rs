// validation.rs - Input validation utilities

use crate::cli::args::Args;

/// Resolved, validated CLI/config state ready to drive the pipeline.
pub struct ValidationResult {
    pub paf: String,
    pub sketch: String,
    pub fasta: String,
    pub busco: Option<String>,
    pub output: String,
    pub min_mq: u32,
    pub overlap_tolerance: u64,
    pub min_overlap: u64,
    pub size_safeguard: f64,
    pub distance_threshold: Option<f64>,
    pub max_iterations: u64,
    pub threads: Option<usize>,
    pub dry_run: bool,
}

/// Validate all command line arguments (already merged with any config file).
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let paf = args
        .paf
        .clone()
        .ok_or_else(|| "Missing required argument: --paf".to_string())?;
    let sketch = args
        .sketch
        .clone()
        .ok_or_else(|| "Missing required argument: --sketch".to_string())?;
    let fasta = args
        .fasta
        .clone()
        .ok_or_else(|| "Missing required argument: --fasta".to_string())?;

    if args.size_safeguard <= 0.0 || args.size_safeguard > 1.0 {
        return Err(format!(
            "--size-safeguard must be in (0.0, 1.0], got {}",
            args.size_safeguard
        ));
    }
    if let Some(tau) = args.distance_threshold {
        if !(0.0..=1.0).contains(&tau) {
            return Err(format!("--distance-threshold must be in [0.0, 1.0], got {tau}"));
        }
    }
    if args.max_iterations == 0 {
        return Err("--max-iterations must be greater than 0".to_string());
    }

    Ok(ValidationResult {
        paf,
        sketch,
        fasta,
        busco: args.busco.clone(),
        output: args.output.clone(),
        min_mq: args.min_mq,
        overlap_tolerance: args.overlap_tolerance,
        min_overlap: args.min_overlap,
        size_safeguard: args.size_safeguard,
        distance_threshold: args.distance_threshold,
        max_iterations: args.max_iterations,
        threads: args.threads,
        dry_run: args.dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            paf: Some("a.paf".to_string()),
            sketch: Some("a.tsv".to_string()),
            fasta: Some("a.fa".to_string()),
            busco: None,
            output: "./output".to_string(),
            min_mq: 10,
            overlap_tolerance: 10,
            min_overlap: 1,
            size_safeguard: 0.5,
            distance_threshold: None,
            max_iterations: 1000,
            threads: None,
            config: None,
            generate_config: false,
            dry_run: false,
        }
    }

    #[test]
    fn rejects_missing_paf() {
        let mut args = base_args();
        args.paf = None;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn rejects_out_of_range_size_safeguard() {
        let mut args = base_args();
        args.size_safeguard = 1.5;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn accepts_well_formed_args() {
        assert!(validate_args(&base_args()).is_ok());
    }
}
