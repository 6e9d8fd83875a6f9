use std::time::Instant;

use rand::Rng;

use crate::{
    genealogy::generate_people,
    sorting::{is_sorted, Algorithm},
    timings::{TimingRow, TimingTable},
};

pub const TIMINGS_FILE: &str = "genealogy_sorting_times.csv";
pub const SORTED_SAMPLE_FILE: &str = "sorted_genealogy_output.csv";

pub const DEFAULT_SIZES: [usize; 15] = [
    100, 500, 1000, 2000, 3000, 5000, 7500, 10000, 15000, 20000, 25000, 30000, 35000, 40000,
    50000,
];

/// Sorts `data` in place and returns the elapsed wall-clock time in milliseconds.
pub fn measure_sort_time<T: Ord>(algorithm: Algorithm, data: &mut [T]) -> f64 {
    let start = Instant::now();
    algorithm.sort(data);
    start.elapsed().as_secs_f64() * 1000.0
}

/// Times every algorithm on one random population per size. Each algorithm
/// gets its own copy of the same population.
pub fn run<R: Rng>(sizes: &[usize], rng: &mut R) -> TimingTable {
    let mut rows = Vec::with_capacity(sizes.len());

    for (index, &size) in sizes.iter().enumerate() {
        let original = generate_people(size, rng);
        let mut times = [0.0; 4];

        for (slot, algorithm) in times.iter_mut().zip(Algorithm::ALL) {
            let mut copy = original.clone();
            *slot = flame::span_of(algorithm.column(), || measure_sort_time(algorithm, &mut copy));
            if !is_sorted(&copy) {
                log::warn!("{:?} sort left {} records unsorted", algorithm, size);
            }
        }

        let [bubble, shaker, heap, std_sort] = times;
        log::info!(
            "[{}/{}] size {}: bubble {:.3} ms | shaker {:.3} ms | heap {:.3} ms | std {:.3} ms",
            index + 1,
            sizes.len(),
            size,
            bubble,
            shaker,
            heap,
            std_sort
        );
        rows.push(TimingRow {
            size: size as u64,
            bubble,
            shaker,
            heap,
            std: std_sort,
        });
    }

    TimingTable::new(rows)
}
