use indexmap::IndexMap;

use super::Connection;
use crate::catalog::ElementCatalog;
use crate::contact::EstimatedPair;
use crate::math::Real;
use crate::utils::SortedPair;

/// Converts the estimated pairs into connections.
///
/// Connections are created in the order of `pairs`. A pair whose group pair
/// already has a connection within `dedup_tolerance` of its location is
/// skipped. Pairs involving unassigned elements are ignored.
pub fn build_connections(
    catalog: &ElementCatalog,
    pairs: &[EstimatedPair],
    dedup_tolerance: Real,
) -> Vec<Connection> {
    let mut connections: Vec<Connection> = Vec::with_capacity(pairs.len());
    let mut by_groups: IndexMap<SortedPair<u32>, Vec<usize>> = IndexMap::new();

    for estimated in pairs {
        let [a, b] = *estimated.pair.elements.as_array();
        let (Some(group_a), Some(group_b)) = (catalog.element(a).group, catalog.element(b).group)
        else {
            log::debug!("Ignoring pair ({a}, {b}) with an unassigned element.");
            continue;
        };

        let location = estimated.contact.location;
        let siblings = by_groups
            .entry(SortedPair::new(group_a, group_b))
            .or_default();

        if siblings
            .iter()
            .any(|i| na::distance(&connections[*i].location, &location) <= dedup_tolerance)
        {
            log::debug!("Skipping duplicate connection ({a}, {b}) at {location:?}.");
            continue;
        }

        siblings.push(connections.len());
        connections.push(Connection {
            elements: [a, b],
            groups: [group_a, group_b],
            location,
            geometry: estimated.contact.geometry,
            cluster: None,
        });
    }

    connections
}

/// Topology queries over a list of connections.
#[derive(Copy, Clone, Debug)]
pub struct ConnectionGraph<'a> {
    connections: &'a [Connection],
}

impl<'a> ConnectionGraph<'a> {
    /// Wraps a list of connections.
    pub fn new(connections: &'a [Connection]) -> Self {
        Self { connections }
    }

    /// The number of connections touching each group.
    ///
    /// A connection between two elements of the same group counts once.
    pub fn group_degrees(&self, group_count: usize) -> Vec<usize> {
        let mut degrees = vec![0; group_count];

        for connection in self.connections {
            let [group1, group2] = connection.groups;
            let count = if group1 == group2 { 1 } else { 2 };

            for group in &connection.groups[..count] {
                if let Some(degree) = degrees.get_mut(*group as usize) {
                    *degree += 1;
                }
            }
        }

        degrees
    }

    /// The number of connections touching each element.
    pub fn element_degrees(&self, element_count: usize) -> Vec<usize> {
        let mut degrees = vec![0; element_count];

        for connection in self.connections {
            for element in connection.elements {
                if let Some(degree) = degrees.get_mut(element as usize) {
                    *degree += 1;
                }
            }
        }

        degrees
    }

    /// The number of distinct clusters referenced by the connections.
    pub fn cluster_count(&self) -> usize {
        let mut clusters: Vec<u32> = self.connections.iter().filter_map(|c| c.cluster).collect();
        clusters.sort_unstable();
        clusters.dedup();
        clusters.len()
    }
}
