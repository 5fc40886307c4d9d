use rstar::primitives::{GeomWithData, Rectangle};
use rstar::RTree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::ElementCatalog;
use crate::math::{Real, DIM};
use crate::utils::SortedPair;

type ElementEnvelope = GeomWithData<Rectangle<[Real; DIM]>, u32>;

/// Two elements close enough to be physically connected.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementPair {
    /// The element indices, lowest first.
    pub elements: SortedPair<u32>,
    /// The distance between the centers of both element AABBs.
    pub distance: Real,
    /// The distance between both (un-expanded) element AABBs, zero if they overlap.
    pub gap: Real,
}

/// Finds every pair of assigned elements whose AABBs, each loosened by half
/// of `search_margin`, intersect.
///
/// In other words, elements separated by at most `search_margin` are
/// candidates. The broad phase is an R-tree over the loosened AABBs; the
/// result is sorted by element pair, so repeated runs yield identical lists.
/// Same-group pairs are included here, see [`retain_connectable`].
pub fn find_candidates(catalog: &ElementCatalog, search_margin: Real) -> Vec<ElementPair> {
    let half_margin = search_margin.max(0.0) * 0.5;
    let envelopes: Vec<ElementEnvelope> = catalog
        .elements()
        .iter()
        .enumerate()
        .filter(|(_, element)| element.is_assigned())
        .map(|(i, element)| {
            GeomWithData::new(element.aabb.loosened(half_margin).to_rectangle(), i as u32)
        })
        .collect();
    let tree = RTree::bulk_load(envelopes);

    let mut keys: Vec<SortedPair<u32>> = tree
        .intersection_candidates_with_other_tree(&tree)
        .filter(|(a, b)| a.data < b.data)
        .map(|(a, b)| SortedPair::new(a.data, b.data))
        .collect();
    keys.sort_unstable();
    keys.dedup();

    let narrow_phase = |key: &SortedPair<u32>| {
        let aabb1 = &catalog.element(*key.first()).aabb;
        let aabb2 = &catalog.element(*key.second()).aabb;

        if !aabb1
            .loosened(half_margin)
            .intersects(&aabb2.loosened(half_margin))
        {
            return None;
        }

        Some(ElementPair {
            elements: *key,
            distance: na::distance(&aabb1.center(), &aabb2.center()),
            gap: aabb1.distance(aabb2),
        })
    };

    #[cfg(feature = "parallel")]
    let pairs: Vec<_> = keys.par_iter().filter_map(narrow_phase).collect();
    #[cfg(not(feature = "parallel"))]
    let pairs: Vec<_> = keys.iter().filter_map(narrow_phase).collect();

    log::info!(
        "Proximity search: {} candidate pairs among {} elements.",
        pairs.len(),
        catalog.len()
    );

    pairs
}

/// Removes the pairs whose elements belong to the same group, unless `connect_same_group` is set.
pub fn retain_connectable(
    catalog: &ElementCatalog,
    pairs: &mut Vec<ElementPair>,
    connect_same_group: bool,
) {
    if connect_same_group {
        return;
    }

    pairs.retain(|pair| {
        catalog.element(*pair.elements.first()).group
            != catalog.element(*pair.elements.second()).group
    });
}
