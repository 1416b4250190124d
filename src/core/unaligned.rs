// unaligned.rs - Unaligned redundancy screening (S6)

use crate::core::model::{ContigRecord, Status};
use crate::core::oracle::DistanceOracle;

/// Screen all `UnalignedRetained` contigs against a rolling survivor set,
/// processed in length-descending order. `records` holds every contig
/// (aligned and unaligned); only unaligned ones change status here.
pub fn screen_unaligned_contigs(records: &mut [ContigRecord], oracle: &DistanceOracle, tau: f64) {
    let mut order: Vec<usize> = (0..records.len())
        .filter(|&i| records[i].status == Status::UnalignedRetained)
        .collect();
    order.sort_by(|&a, &b| {
        records[b]
            .length
            .cmp(&records[a].length)
            .then_with(|| records[a].id.cmp(&records[b].id))
    });

    let mut survivors: Vec<usize> = (0..records.len())
        .filter(|&i| records[i].status.is_retained())
        .collect();

    for ui in order {
        let u_id = records[ui].id.clone();
        let mut discarded_by: Option<usize> = None;

        for &ri in &survivors {
            if ri == ui {
                continue;
            }
            if let Some(d) = oracle.get(&u_id, &records[ri].id) {
                if d < tau {
                    discarded_by = Some(ri);
                    break;
                }
            }
        }

        if let Some(ri) = discarded_by {
            let r_id = records[ri].id.clone();
            records[ui].status = Status::UnalignedDiscarded;
            records[ui].disqualifier = Some(r_id);
            records[ui].discarded_reason.clear();
            records[ui].discarded_reason.mash_redundancy = true;
        } else {
            survivors.push(ui);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn unaligned(id: &str, length: u64) -> ContigRecord {
        ContigRecord::new(id.to_string(), length, 40.0, HashSet::new())
    }

    fn aligned_retained(id: &str, length: u64) -> ContigRecord {
        let mut c = ContigRecord::new(id.to_string(), length, 40.0, HashSet::new());
        c.status = Status::AlignedRetained;
        c.primary_target = Some("t1".to_string());
        c.intervals = vec![(0, 100)];
        c
    }

    #[test]
    fn scenario_s_f_unaligned_screen() {
        let mut records = vec![unaligned("U1", 1000), aligned_retained("R1", 900)];
        let mut oracle = DistanceOracle::new();
        oracle.insert("U1", "R1", 0.01);

        screen_unaligned_contigs(&mut records, &oracle, 0.05);

        let u1 = records.iter().find(|c| c.id == "U1").unwrap();
        assert_eq!(u1.status, Status::UnalignedDiscarded);
        assert_eq!(u1.disqualifier.as_deref(), Some("R1"));
        assert!(u1.discarded_reason.mash_redundancy);
    }

    #[test]
    fn dissimilar_unaligned_contig_survives() {
        let mut records = vec![unaligned("U1", 1000), aligned_retained("R1", 900)];
        let oracle = DistanceOracle::new();
        screen_unaligned_contigs(&mut records, &oracle, 0.05);
        assert_eq!(records[0].status, Status::UnalignedRetained);
    }

    #[test]
    fn longer_unaligned_contig_processed_first_and_can_discard_shorter() {
        let mut records = vec![unaligned("short", 100), unaligned("long", 1000)];
        let mut oracle = DistanceOracle::new();
        oracle.insert("short", "long", 0.01);

        screen_unaligned_contigs(&mut records, &oracle, 0.05);

        let long = records.iter().find(|c| c.id == "long").unwrap();
        let short = records.iter().find(|c| c.id == "short").unwrap();
        assert_eq!(long.status, Status::UnalignedRetained);
        assert_eq!(short.status, Status::UnalignedDiscarded);
        assert_eq!(short.disqualifier.as_deref(), Some("long"));
    }
}
