/// The four strategies compared by the benchmark, in chart and CSV order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Shaker,
    Heap,
    Std,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bubble,
        Algorithm::Shaker,
        Algorithm::Heap,
        Algorithm::Std,
    ];

    /// Header of the timing column holding this algorithm's measurements.
    pub fn column(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble",
            Algorithm::Shaker => "Shaker",
            Algorithm::Heap => "Heap",
            Algorithm::Std => "Std",
        }
    }

    pub fn sort<T: Ord>(self, data: &mut [T]) {
        match self {
            Algorithm::Bubble => bubble_sort(data),
            Algorithm::Shaker => shaker_sort(data),
            Algorithm::Heap => heap_sort(data),
            // unstable, like the std::sort it stands in for
            Algorithm::Std => data.sort_unstable(),
        }
    }
}

/// Repeated adjacent swaps; every pass fixes the largest remaining element
/// at the end of the unsorted tail. Stops after the first pass without a swap.
pub fn bubble_sort<T: Ord>(data: &mut [T]) {
    let mut n = data.len();
    loop {
        let mut swapped = false;
        for i in 1..n {
            if data[i] < data[i - 1] {
                data.swap(i, i - 1);
                swapped = true;
            }
        }
        if !swapped || n <= 1 {
            break;
        }
        n -= 1;
    }
}

/// Bidirectional bubble sort: a forward pass pushes the maximum right, a
/// backward pass pulls the minimum left, and both bounds shrink.
pub fn shaker_sort<T: Ord>(data: &mut [T]) {
    if data.len() < 2 {
        return;
    }
    let mut left = 0;
    let mut right = data.len() - 1;
    while left < right {
        for i in left..right {
            if data[i] > data[i + 1] {
                data.swap(i, i + 1);
            }
        }
        right -= 1;
        for i in (left + 1..=right).rev() {
            if data[i] < data[i - 1] {
                data.swap(i, i - 1);
            }
        }
        left += 1;
    }
}

pub fn heap_sort<T: Ord>(data: &mut [T]) {
    let n = data.len();
    if n <= 1 {
        return;
    }

    for i in (0..n / 2).rev() {
        sift_down(data, n, i);
    }

    for end in (1..n).rev() {
        data.swap(0, end);
        sift_down(data, end, 0);
    }
}

// Restores the max-heap property for the subtree rooted at `root`,
// considering only the first `len` elements.
fn sift_down<T: Ord>(data: &mut [T], len: usize, mut root: usize) {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < len && data[left] > data[largest] {
            largest = left;
        }
        if right < len && data[right] > data[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        data.swap(root, largest);
        root = largest;
    }
}

pub fn is_sorted<T: Ord>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::generate_people;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn check_algorithm(algorithm: Algorithm) {
        let mut empty: Vec<i32> = vec![];
        algorithm.sort(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![42];
        algorithm.sort(&mut single);
        assert_eq!(single, vec![42]);

        let mut two = vec![5, 3];
        algorithm.sort(&mut two);
        assert_eq!(two, vec![3, 5]);

        let mut sorted: Vec<i32> = (0..100).collect();
        algorithm.sort(&mut sorted);
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());

        let mut reverse: Vec<i32> = (0..100).rev().collect();
        algorithm.sort(&mut reverse);
        assert_eq!(reverse, (0..100).collect::<Vec<_>>());

        let mut same = vec![7; 50];
        algorithm.sort(&mut same);
        assert_eq!(same, vec![7; 50]);

        let mut rng = StdRng::seed_from_u64(12345);
        let mut random: Vec<i64> = (0..1000).map(|_| rng.gen_range(-500..500)).collect();
        let mut expected = random.clone();
        expected.sort();
        algorithm.sort(&mut random);
        assert_eq!(random, expected);
    }

    #[test]
    fn bubble_sorts() {
        check_algorithm(Algorithm::Bubble);
    }

    #[test]
    fn shaker_sorts() {
        check_algorithm(Algorithm::Shaker);
    }

    #[test]
    fn heap_sorts() {
        check_algorithm(Algorithm::Heap);
    }

    #[test]
    fn std_sorts() {
        check_algorithm(Algorithm::Std);
    }

    #[test]
    fn all_algorithms_agree_on_people() {
        let mut rng = StdRng::seed_from_u64(7);
        let people = generate_people(300, &mut rng);

        let mut reference = people.clone();
        Algorithm::Std.sort(&mut reference);
        let reference_keys: Vec<_> = reference.iter().map(|p| p.sort_key()).collect();

        for algorithm in Algorithm::ALL {
            let mut copy = people.clone();
            algorithm.sort(&mut copy);
            assert!(is_sorted(&copy), "{:?} left the data unsorted", algorithm);
            let keys: Vec<_> = copy.iter().map(|p| p.sort_key()).collect();
            assert_eq!(keys, reference_keys, "{:?} disagrees with std", algorithm);
        }
    }

    #[test]
    fn columns_follow_fixed_order() {
        let columns: Vec<_> = Algorithm::ALL.iter().map(|a| a.column()).collect();
        assert_eq!(columns, vec!["Bubble", "Shaker", "Heap", "Std"]);
    }
}
