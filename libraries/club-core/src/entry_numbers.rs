//! Club entry-number sequencing
//!
//! New albums get `max + 1` (or `1` for an empty catalog). Deleting albums
//! leaves gaps which stay until an administrator runs the repair, which
//! rewrites the catalog to the dense sequence `1..N` in current order.

use crate::types::AlbumId;

/// Entry number for the next album given the current maximum
pub fn next_entry_number(current_max: Option<i64>) -> i64 {
    current_max.map_or(1, |max| max + 1)
}

/// A single rewrite produced by the repair plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renumbering {
    pub album_id: AlbumId,
    pub from: i64,
    pub to: i64,
}

/// Compute the rewrites that make entry numbers dense
///
/// Albums are ordered by their current number (stable for equal numbers) and
/// assigned `1..N`. Albums already holding their target number are skipped.
/// Applying the result in order never makes two albums share a number, since
/// every target is at most the album's current number.
pub fn plan_repair(albums: &[(AlbumId, i64)]) -> Vec<Renumbering> {
    let mut ordered: Vec<&(AlbumId, i64)> = albums.iter().collect();
    ordered.sort_by_key(|(_, number)| *number);

    ordered
        .into_iter()
        .zip(1_i64..)
        .filter(|((_, current), target)| current != target)
        .map(|((album_id, current), target)| Renumbering {
            album_id: album_id.clone(),
            from: *current,
            to: target,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog(numbers: &[i64]) -> Vec<(AlbumId, i64)> {
        numbers
            .iter()
            .map(|number| (AlbumId::generate(), *number))
            .collect()
    }

    fn apply(albums: &[(AlbumId, i64)], plan: &[Renumbering]) -> Vec<(AlbumId, i64)> {
        albums
            .iter()
            .map(|(id, number)| {
                let renumbered = plan
                    .iter()
                    .find(|r| &r.album_id == id)
                    .map_or(*number, |r| r.to);
                (id.clone(), renumbered)
            })
            .collect()
    }

    #[test]
    fn next_number_starts_at_one() {
        assert_eq!(next_entry_number(None), 1);
        assert_eq!(next_entry_number(Some(41)), 42);
    }

    #[test]
    fn repair_closes_single_gap() {
        let albums = catalog(&[1, 3, 4]);
        let plan = plan_repair(&albums);

        assert_eq!(plan.len(), 2);
        assert_eq!((plan[0].from, plan[0].to), (3, 2));
        assert_eq!((plan[1].from, plan[1].to), (4, 3));

        let numbers: Vec<i64> = apply(&albums, &plan).iter().map(|(_, n)| *n).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn dense_catalog_needs_no_rewrites() {
        assert!(plan_repair(&catalog(&[1, 2, 3, 4])).is_empty());
        assert!(plan_repair(&[]).is_empty());
    }

    #[test]
    fn repair_handles_unsorted_input() {
        let albums = catalog(&[10, 2, 7]);
        let renumbered = apply(&albums, &plan_repair(&albums));
        let numbers: Vec<i64> = renumbered.iter().map(|(_, n)| *n).collect();
        assert_eq!(numbers, vec![3, 1, 2]);
    }

    proptest! {
        /// Property: repair yields 1..N and preserves relative order
        #[test]
        fn repair_is_dense_and_order_preserving(
            numbers in prop::collection::btree_set(1i64..10_000, 0..60)
        ) {
            let numbers: Vec<i64> = numbers.into_iter().collect();
            let albums = catalog(&numbers);
            let plan = plan_repair(&albums);
            let renumbered = apply(&albums, &plan);

            let result: Vec<i64> = renumbered.iter().map(|(_, n)| *n).collect();
            let expected: Vec<i64> = (1..=numbers.len() as i64).collect();
            prop_assert_eq!(result, expected);

            for rewrite in &plan {
                prop_assert!(rewrite.to < rewrite.from);
            }
        }
    }
}
