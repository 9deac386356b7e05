//! Property tests for flat index search ordering.

use proptest::prelude::*;
use shopql_rag::index::FlatIndex;

const DIM: usize = 16;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any set of indexed vectors and any k, search returns at most k
    /// results, never more than the index holds, ordered by non-decreasing
    /// distance, with no duplicate ids.
    #[test]
    fn results_ordered_ascending_and_bounded_by_k(
        vectors in proptest::collection::vec(arb_normalized_embedding(DIM), 1..30),
        query in arb_normalized_embedding(DIM),
        k in 1usize..40,
    ) {
        let stored = vectors.len();
        let index = FlatIndex::from_vectors(DIM, vectors);
        let results = index.search(&query, k);

        prop_assert!(results.len() <= k);
        prop_assert!(results.len() <= stored);

        for window in results.windows(2) {
            prop_assert!(
                window[0].1 <= window[1].1,
                "results not in ascending order: {} > {}",
                window[0].1,
                window[1].1,
            );
        }

        let mut ids: Vec<usize> = results.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), results.len(), "duplicate ids in results");
    }

    /// For any index with at least k vectors, search returns exactly k
    /// results; when k exceeds the stored count, it returns all of them.
    #[test]
    fn result_count_is_min_of_k_and_len(
        vectors in proptest::collection::vec(arb_normalized_embedding(DIM), 1..30),
        query in arb_normalized_embedding(DIM),
        k in 1usize..40,
    ) {
        let stored = vectors.len();
        let index = FlatIndex::from_vectors(DIM, vectors);
        let results = index.search(&query, k);
        prop_assert_eq!(results.len(), k.min(stored));
    }

    /// Searching twice with the same query yields identical results.
    #[test]
    fn search_is_deterministic(
        vectors in proptest::collection::vec(arb_normalized_embedding(DIM), 1..30),
        query in arb_normalized_embedding(DIM),
        k in 1usize..40,
    ) {
        let index = FlatIndex::from_vectors(DIM, vectors);
        prop_assert_eq!(index.search(&query, k), index.search(&query, k));
    }
}
