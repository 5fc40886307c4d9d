use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use super::ElementPair;
use crate::catalog::ElementCatalog;
use crate::math::Real;

/// A rigid attachment of an undersized element to a neighbor.
///
/// Tiny fragments would produce numerically unstable joints, so they are
/// parented to their nearest non-tiny neighbor instead of being connected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentLink {
    /// The undersized element.
    pub child: u32,
    /// The element it becomes a rigid child of.
    pub parent: u32,
}

/// Removes every pair involving a tiny element and parents each tiny element
/// to its nearest non-tiny neighbor.
///
/// The nearest neighbor is the candidate with the smallest center distance,
/// ties being broken by the lowest element index. A tiny element whose
/// candidates are all tiny stays unattached. Links are sorted by child index.
pub fn redirect_tiny_elements(
    catalog: &ElementCatalog,
    pairs: Vec<ElementPair>,
) -> (Vec<ElementPair>, Vec<ParentLink>) {
    if catalog.minimum_element_size() <= 0.0 {
        return (pairs, vec![]);
    }

    let is_tiny = |i: u32| catalog.element(i).is_tiny;
    let mut nearest: BTreeMap<u32, (OrderedFloat<Real>, u32)> = BTreeMap::new();
    let mut kept = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let [a, b] = *pair.elements.as_array();

        match (is_tiny(a), is_tiny(b)) {
            (false, false) => kept.push(pair),
            (tiny_a, tiny_b) => {
                for (child, parent, parent_is_tiny) in [(a, b, tiny_b), (b, a, tiny_a)] {
                    if !is_tiny(child) || parent_is_tiny {
                        continue;
                    }

                    let candidate = (OrderedFloat(pair.distance), parent);
                    let best = nearest.entry(child).or_insert(candidate);
                    if candidate < *best {
                        *best = candidate;
                    }
                }
            }
        }
    }

    for (i, element) in catalog.elements().iter().enumerate() {
        if element.is_tiny && !nearest.contains_key(&(i as u32)) {
            log::debug!(
                "Tiny element {:?} has no qualifying neighbor to be parented to.",
                element.name
            );
        }
    }

    let links: Vec<_> = nearest
        .into_iter()
        .map(|(child, (_, parent))| ParentLink { child, parent })
        .collect();

    if !links.is_empty() {
        log::debug!("{} tiny elements redirected to parent links.", links.len());
    }

    (kept, links)
}
