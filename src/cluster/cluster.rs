use crate::graph::Connection;
use crate::math::{Point, Real};

/// A set of connections merged into a single joint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// The indices of the member connections, in increasing order.
    pub members: Vec<u32>,
    /// The group pair shared by all the members, lowest first.
    pub groups: [u32; 2],
    /// The mean location of the members.
    pub location: Point<Real>,
    /// The mean contact area of the members.
    pub area: Real,
}

impl Cluster {
    /// The number of real contact points merged into this cluster.
    #[inline]
    pub fn member_count(&self) -> u32 {
        self.members.len() as u32
    }

    pub(crate) fn from_members(members: Vec<u32>, connections: &[Connection]) -> Self {
        let count = members.len() as Real;
        let first = &connections[members[0] as usize];
        let pair = first.group_pair();
        let (location_sum, area_sum) = members.iter().fold(
            (na::Vector3::zeros(), 0.0),
            |(loc, area), i| {
                let connection = &connections[*i as usize];
                (loc + connection.location.coords, area + connection.area())
            },
        );

        Self {
            groups: *pair.as_array(),
            location: Point::from(location_sum / count),
            area: area_sum / count,
            members,
        }
    }
}

/// The result of clustering: every cluster and the cluster of each connection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSet {
    /// The clusters, ordered by their smallest member.
    pub clusters: Vec<Cluster>,
    /// `connection_to_cluster[i]` is the cluster of the `i`-th connection.
    pub connection_to_cluster: Vec<u32>,
}

impl ClusterSet {
    /// Writes the cluster index of every connection into its `cluster` field.
    pub fn assign(&self, connections: &mut [Connection]) {
        for (connection, cluster) in connections.iter_mut().zip(&self.connection_to_cluster) {
            connection.cluster = Some(*cluster);
        }
    }

    /// The number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Is there no cluster at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
