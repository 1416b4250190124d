// stats.rs - N50-family assembly statistics
//
// Grounded on original_source/utils/stats.py::calculate_assembly_stats.

const NX_LEVELS: [u32; 6] = [50, 60, 70, 80, 90, 100];

#[derive(Debug, Clone)]
pub struct AssemblyStats {
    pub total_bases: u64,
    pub num_contigs: usize,
    /// `(Nx level, length, contig count to reach it)`, one entry per NX_LEVELS.
    pub nx: Vec<(u32, u64, usize)>,
}

/// Compute Nx statistics (N50..N100) and total/contig counts from a list of
/// contig lengths.
pub fn calculate_assembly_stats(lengths: &[u64]) -> AssemblyStats {
    if lengths.is_empty() {
        return AssemblyStats {
            total_bases: 0,
            num_contigs: 0,
            nx: NX_LEVELS.iter().map(|&level| (level, 0, 0)).collect(),
        };
    }

    let mut sorted: Vec<u64> = lengths.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    let total_bases: u64 = sorted.iter().sum();
    let num_contigs = sorted.len();

    let targets: Vec<f64> = NX_LEVELS
        .iter()
        .map(|&level| total_bases as f64 * (level as f64 / 100.0))
        .collect();

    let mut nx: Vec<(u32, u64, usize)> = NX_LEVELS.iter().map(|&level| (level, 0, 0)).collect();
    let mut cumulative: u64 = 0;
    let mut current = 0usize;

    for (i, &length) in sorted.iter().enumerate() {
        cumulative += length;
        while current < NX_LEVELS.len() && cumulative as f64 >= targets[current] {
            nx[current] = (NX_LEVELS[current], length, i + 1);
            current += 1;
        }
    }

    AssemblyStats {
        total_bases,
        num_contigs,
        nx,
    }
}

/// Cumulative-size L-curve: `(contig rank, cumulative bases)`.
pub fn calculate_l_curve(lengths: &[u64]) -> Vec<(usize, u64)> {
    let mut sorted: Vec<u64> = lengths.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    let mut cumulative = 0u64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, length)| {
            cumulative += length;
            (i + 1, cumulative)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_zeros() {
        let stats = calculate_assembly_stats(&[]);
        assert_eq!(stats.total_bases, 0);
        assert_eq!(stats.num_contigs, 0);
        assert!(stats.nx.iter().all(|&(_, len, count)| len == 0 && count == 0));
    }

    #[test]
    fn n50_matches_known_example() {
        // total = 100; N50 target = 50; sorted desc [40, 30, 20, 10]
        // cumulative: 40, 70 (>=50 here) -> N50 length = 30, count = 2
        let stats = calculate_assembly_stats(&[10, 20, 30, 40]);
        assert_eq!(stats.total_bases, 100);
        let n50 = stats.nx.iter().find(|(level, _, _)| *level == 50).unwrap();
        assert_eq!(n50.1, 30);
        assert_eq!(n50.2, 2);
    }

    #[test]
    fn l_curve_is_monotonic_cumulative() {
        let curve = calculate_l_curve(&[10, 30, 20]);
        assert_eq!(curve, vec![(1, 30), (2, 50), (3, 60)]);
    }
}
