use ena::unify::{InPlaceUnificationTable, UnifyKey};
use ordered_float::OrderedFloat;
use rstar::primitives::GeomWithData;
use rstar::RTree;

use super::{Cluster, ClusterSet};
use crate::graph::Connection;
use crate::math::{Real, DIM};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
struct ConnectionKey(u32);

impl UnifyKey for ConnectionKey {
    type Value = ();
    fn index(&self) -> u32 {
        self.0
    }
    fn from_index(u: u32) -> ConnectionKey {
        ConnectionKey(u)
    }
    fn tag() -> &'static str {
        "ConnectionKey"
    }
}

/// Merges connections whose locations are within `radius` of each other.
///
/// Only connections joining the same pair of groups are merged. The radius is
/// inclusive: two connections exactly `radius` apart end up in the same
/// cluster. Merging is transitive and processes the candidate pairs by
/// increasing distance, so the result does not depend on the input order
/// beyond the connection indices themselves.
///
/// With a non-positive radius every connection is its own cluster.
pub fn merge_clusters(connections: &[Connection], radius: Real) -> ClusterSet {
    if radius <= 0.0 {
        let clusters = (0..connections.len() as u32)
            .map(|i| Cluster::from_members(vec![i], connections))
            .collect();
        return ClusterSet {
            clusters,
            connection_to_cluster: (0..connections.len() as u32).collect(),
        };
    }

    let radius_sq = radius * radius;
    let points: Vec<GeomWithData<[Real; DIM], u32>> = connections
        .iter()
        .enumerate()
        .map(|(i, c)| GeomWithData::new(c.location.into(), i as u32))
        .collect();
    let tree = RTree::bulk_load(points);

    // The R-tree is only a filter, the exact test is done on the squared distances.
    let query_radius_sq = radius_sq * 1.01;
    let mut candidates = vec![];

    for (i, connection) in connections.iter().enumerate() {
        for neighbor in tree.locate_within_distance(connection.location.into(), query_radius_sq) {
            let j = neighbor.data as usize;

            if j <= i || connections[j].group_pair() != connection.group_pair() {
                continue;
            }

            let dist_sq = na::distance_squared(&connection.location, &connections[j].location);
            if dist_sq <= radius_sq {
                candidates.push((OrderedFloat(dist_sq), i as u32, j as u32));
            }
        }
    }

    candidates.sort_unstable();

    let mut ufind: InPlaceUnificationTable<ConnectionKey> = InPlaceUnificationTable::new();
    let keys: Vec<_> = (0..connections.len()).map(|_| ufind.new_key(())).collect();

    for (_, i, j) in &candidates {
        ufind.union(keys[*i as usize], keys[*j as usize]);
    }

    // Roots are numbered in the order of their smallest member.
    let mut root_to_cluster = vec![u32::MAX; connections.len()];
    let mut members: Vec<Vec<u32>> = vec![];
    let mut connection_to_cluster = Vec::with_capacity(connections.len());

    for (i, key) in keys.iter().enumerate() {
        let root = ufind.find(*key).0 as usize;

        if root_to_cluster[root] == u32::MAX {
            root_to_cluster[root] = members.len() as u32;
            members.push(vec![]);
        }

        let cluster = root_to_cluster[root];
        members[cluster as usize].push(i as u32);
        connection_to_cluster.push(cluster);
    }

    let clusters: Vec<_> = members
        .into_iter()
        .map(|members| Cluster::from_members(members, connections))
        .collect();

    log::info!(
        "Clustering: {} connections merged into {} clusters (radius {}).",
        connections.len(),
        clusters.len(),
        radius
    );

    ClusterSet {
        clusters,
        connection_to_cluster,
    }
}
