// main.rs - CLI entry point

use std::time::Instant;

use haplodedupe::output::stats::calculate_assembly_stats;
use haplodedupe::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load and merge configuration file if specified; CLI flags still win.
    if let Some(config_path) = args.config.clone() {
        let config = Config::from_file(&config_path)?;
        apply_config(&mut args, &config);
    }

    println!("🚀 haplodedupe v{}", env!("CARGO_PKG_VERSION"));
    println!("⚡ Strategy: primary-target selection → tiling → τ estimation → tournament → unaligned screen");

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to configure thread pool");
        println!("🧵 Threads: {}", n);
    } else {
        let num_threads = rayon::current_num_threads();
        println!("🧵 Threads: {} (auto-detected)", num_threads);
    }

    let validated = validate_args(&args)?;

    if validated.dry_run {
        println!("✅ Dry run: inputs validated, pipeline not executed");
        println!("📄 PAF: {}", validated.paf);
        println!("📄 Sketch: {}", validated.sketch);
        println!("📄 FASTA: {}", validated.fasta);
        if let Some(busco) = &validated.busco {
            println!("📄 BUSCO: {}", busco);
        }
        println!("📁 Output: {}", validated.output);
        println!(
            "⚙️  min_mq={} overlap_tolerance={} min_overlap={} size_safeguard={} max_iterations={}",
            validated.min_mq,
            validated.overlap_tolerance,
            validated.min_overlap,
            validated.size_safeguard,
            validated.max_iterations
        );
        return Ok(());
    }

    let total_start = Instant::now();

    // Load inputs
    println!("\n📂 Loading inputs...");
    let sequences = parse_fasta(&validated.fasta)?;
    let (oracle, sketch_kept) = parse_sketch_distances(&validated.sketch)?;
    println!("✅ Loaded {} sketch-distance pair(s)", sketch_kept);
    let (alignments, missing_as) = parse_paf(&validated.paf, validated.min_mq)?;
    println!(
        "✅ Loaded {} alignment record(s) ({} missing AS:i: tag)",
        alignments.len(),
        missing_as
    );
    let markers = match &validated.busco {
        Some(path) => parse_busco(path)?,
        None => Default::default(),
    };

    let pre_lengths: Vec<u64> = sequences.values().map(|s| s.length).collect();
    let pre_stats = calculate_assembly_stats(&pre_lengths);
    println!(
        "📊 Input assembly: {} contig(s), {} bp total, N50={} bp",
        pre_stats.num_contigs,
        pre_stats.total_bases,
        pre_stats.nx.iter().find(|(l, _, _)| *l == 50).map(|(_, len, _)| *len).unwrap_or(0)
    );

    // Run the pipeline
    println!("\n🧬 Running redundancy resolution pipeline...");
    let params = PipelineParams {
        overlap_tolerance: validated.overlap_tolerance,
        min_overlap: validated.min_overlap,
        size_safeguard: validated.size_safeguard,
        distance_threshold: validated.distance_threshold,
        max_iterations: validated.max_iterations,
    };
    let outcome = run_pipeline(&sequences, &markers, alignments, &oracle, &params);

    let retained_lengths: Vec<u64> = outcome
        .records
        .values()
        .filter(|c| c.status.is_retained())
        .map(|c| c.length)
        .collect();
    let post_stats = calculate_assembly_stats(&retained_lengths);

    // Write outputs
    println!("\n💾 Writing outputs...");
    let output_dir = validated.output.trim_end_matches('/');
    let report_path = format!("{output_dir}/report.tsv");
    let fasta_path = format!("{output_dir}/filtered.fasta");

    write_report(&report_path, &outcome.records, &command_line)?;
    write_filtered_fasta(&validated.fasta, &fasta_path, &outcome.records)?;

    // Print summary
    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === HAPLODEDUPE COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!(
        "📊 Input:  {} contig(s), {} bp, N50={} bp",
        pre_stats.num_contigs,
        pre_stats.total_bases,
        pre_stats.nx.iter().find(|(l, _, _)| *l == 50).map(|(_, len, _)| *len).unwrap_or(0)
    );
    println!(
        "📊 Output: {} contig(s), {} bp, N50={} bp",
        post_stats.num_contigs,
        post_stats.total_bases,
        post_stats.nx.iter().find(|(l, _, _)| *l == 50).map(|(_, len, _)| *len).unwrap_or(0)
    );
    println!(
        "🧮 τ = {:.4} (method: {})",
        outcome.tau,
        outcome.tau_method.as_str()
    );
    println!("📁 Report: {}", report_path);
    println!("📁 Filtered FASTA: {}", fasta_path);
    println!("🔧 Command: {}", command_line);

    Ok(())
}
