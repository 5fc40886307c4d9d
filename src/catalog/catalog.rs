use indexmap::{IndexMap, IndexSet};

use super::{CatalogError, Element, GroupTable, RawElement};
use crate::bounding_volume::Aabb;
use crate::math::Real;

/// The flat, host-independent record of one catalog element.
///
/// This is what a [`BuildSnapshot`](crate::pipeline::BuildSnapshot) stores:
/// enough to re-resolve group indices without touching the geometry again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// The host name of the element.
    pub name: String,
    /// The group name the element was assigned to at the last build or update.
    pub group_name: Option<String>,
    /// The group index at the last build or update.
    pub group: Option<u32>,
    /// The world-space AABB at build time.
    pub aabb: Aabb,
    /// Was the element below the minimum element size?
    pub is_tiny: bool,
}

impl ElementRecord {
    /// Resolves the group index of this record against the current group table.
    pub fn resolve_group(&self, groups: &GroupTable) -> Option<u32> {
        self.group_name
            .as_deref()
            .and_then(|name| groups.index_of(name))
    }
}

/// The normalized set of elements a build works on.
///
/// Element indices are positions in the input order, after removal of
/// duplicated names. They stay stable as long as the host selection does.
#[derive(Clone, Debug)]
pub struct ElementCatalog {
    elements: Vec<Element>,
    group_count: usize,
    minimum_element_size: Real,
}

impl ElementCatalog {
    /// Normalizes `raw` into a catalog.
    ///
    /// Every element gets its scale and position baked into a private copy of
    /// its mesh, and its group name resolved to a dense index of `groups`.
    /// Elements whose name was already seen are dropped. Elements smaller than
    /// `minimum_element_size` (if positive) are flagged as tiny.
    ///
    /// Fails if less than two elements are given, if less than two of them are
    /// assigned to a known group or, unless `connect_same_group` is set, if all
    /// assigned elements belong to the same group.
    pub fn build(
        raw: &[RawElement],
        groups: &GroupTable,
        minimum_element_size: Real,
        connect_same_group: bool,
    ) -> Result<Self, CatalogError> {
        let mut seen = IndexSet::new();
        let mut unique = Vec::with_capacity(raw.len());

        for element in raw {
            if seen.insert(element.name.as_str()) {
                unique.push(element);
            } else {
                log::debug!("Skipping duplicate element {:?}.", element.name);
            }
        }

        if unique.len() < 2 {
            return Err(CatalogError::TooFewElements {
                found: unique.len(),
            });
        }

        let elements: Vec<_> = unique
            .into_iter()
            .map(|raw| {
                let mesh = raw.mesh.baked(&raw.position, &raw.scale);
                let aabb = mesh.aabb();
                let group = raw.group.as_deref().and_then(|name| groups.index_of(name));

                if raw.group.is_some() && group.is_none() {
                    log::debug!(
                        "Element {:?} references the unknown group {:?}.",
                        raw.name,
                        raw.group
                    );
                }

                Element {
                    name: raw.name.clone(),
                    is_tiny: minimum_element_size > 0.0
                        && aabb.largest_extent() < minimum_element_size,
                    mesh,
                    aabb,
                    group,
                    group_name: raw.group.clone(),
                }
            })
            .collect();

        let assigned = elements.iter().filter(|e| e.is_assigned()).count();
        let distinct: IndexSet<u32> = elements.iter().filter_map(|e| e.group).collect();

        if assigned < 2 || (!connect_same_group && distinct.len() < 2) {
            return Err(CatalogError::InsufficientGroups {
                assigned,
                groups: distinct.len(),
            });
        }

        log::info!(
            "Catalog: {} elements, {} assigned to {} group(s), {} tiny.",
            elements.len(),
            assigned,
            distinct.len(),
            elements.iter().filter(|e| e.is_tiny).count()
        );

        Ok(Self {
            elements,
            group_count: groups.len(),
            minimum_element_size,
        })
    }

    /// The elements of this catalog, indexed by element index.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The element with the given index.
    #[inline]
    pub fn element(&self, i: u32) -> &Element {
        &self.elements[i as usize]
    }

    /// The number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Is this catalog empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The number of groups of the table this catalog was built against.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// The minimum element size this catalog was built with.
    #[inline]
    pub fn minimum_element_size(&self) -> Real {
        self.minimum_element_size
    }

    /// Re-derives the group index of persisted element records against the current group table.
    ///
    /// Records whose group was renamed or removed since the build resolve to `None`.
    pub fn refresh_groups(records: &[ElementRecord], groups: &GroupTable) -> Vec<Option<u32>> {
        records.iter().map(|r| r.resolve_group(groups)).collect()
    }

    /// Moves persisted element records to the groups their host elements belong to now.
    ///
    /// Records are matched to `raw` by element name, the first element of a
    /// given name winning as in [`ElementCatalog::build`]. Records without a
    /// matching element keep their stored group.
    pub fn reassign_groups(records: &mut [ElementRecord], raw: &[RawElement], groups: &GroupTable) {
        let mut current: IndexMap<&str, Option<&str>> = IndexMap::with_capacity(raw.len());
        for element in raw {
            let _ = current
                .entry(element.name.as_str())
                .or_insert(element.group.as_deref());
        }

        for record in records {
            let Some(&group_name) = current.get(record.name.as_str()) else {
                continue;
            };

            if record.group_name.as_deref() != group_name {
                log::debug!(
                    "Element {:?} moved from group {:?} to {:?}.",
                    record.name,
                    record.group_name,
                    group_name
                );
                record.group_name = group_name.map(str::to_string);
                record.group = record.resolve_group(groups);
            }
        }
    }

    /// Checks that enough persisted elements still belong to a known group.
    ///
    /// `element_groups` are the groups resolved by [`ElementCatalog::refresh_groups`].
    pub fn check_assignment(element_groups: &[Option<u32>]) -> Result<(), CatalogError> {
        let distinct: IndexSet<u32> = element_groups.iter().flatten().copied().collect();
        let assigned = element_groups.iter().flatten().count();

        if assigned < 2 {
            return Err(CatalogError::InsufficientGroups {
                assigned,
                groups: distinct.len(),
            });
        }

        Ok(())
    }

    /// The flat records of every element, for persistence.
    pub fn records(&self) -> Vec<ElementRecord> {
        self.elements
            .iter()
            .map(|e| ElementRecord {
                name: e.name.clone(),
                group_name: e.group_name.clone(),
                group: e.group,
                aabb: e.aabb,
                is_tiny: e.is_tiny,
            })
            .collect()
    }
}
