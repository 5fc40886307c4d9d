use bondnet3d::cluster::{merge_clusters, ClusterSet};
use bondnet3d::contact::ContactGeometry;
use bondnet3d::graph::Connection;
use bondnet3d::math::{Point, Vector};

fn connections(rng: &mut oorandom::Rand32, count: usize) -> Vec<Connection> {
    (0..count)
        .map(|i| Connection {
            elements: [i as u32, i as u32 + 1],
            groups: if i % 3 == 0 { [0, 1] } else { [2, 1] },
            location: Point::new(rng.rand_float() * 4.0, rng.rand_float(), 0.0),
            geometry: ContactGeometry {
                area: 1.0,
                normal: Vector::y(),
                width: 1.0,
                height: 1.0,
                thickness: 0.0,
            },
            cluster: None,
        })
        .collect()
}

/// The clusters as sets of member locations, independently of connection indices.
fn partition(set: &ClusterSet, connections: &[Connection]) -> Vec<Vec<[u32; 2]>> {
    let mut result: Vec<Vec<[u32; 2]>> = set
        .clusters
        .iter()
        .map(|cluster| {
            let mut members: Vec<_> = cluster
                .members
                .iter()
                .map(|m| {
                    let location = connections[*m as usize].location;
                    [location.x.to_bits(), location.y.to_bits()]
                })
                .collect();
            members.sort_unstable();
            members
        })
        .collect();
    result.sort();
    result
}

#[test]
fn clustering_does_not_depend_on_the_input_order() {
    let mut rng = oorandom::Rand32::new(42);
    let original = connections(&mut rng, 60);
    let expected = partition(&merge_clusters(&original, 0.3), &original);
    assert!(expected.len() > 1 && expected.len() < original.len());

    for _ in 0..10 {
        let mut shuffled = original.clone();
        for i in (1..shuffled.len()).rev() {
            let j = rng.rand_range(0..i as u32 + 1) as usize;
            shuffled.swap(i, j);
        }

        let set = merge_clusters(&shuffled, 0.3);
        assert_eq!(partition(&set, &shuffled), expected);

        for (i, cluster) in set.connection_to_cluster.iter().enumerate() {
            assert!(set.clusters[*cluster as usize].members.contains(&(i as u32)));
        }
    }
}

#[test]
fn assigned_clusters_are_written_back() {
    let mut rng = oorandom::Rand32::new(7);
    let mut connections = connections(&mut rng, 10);
    let set = merge_clusters(&connections, 0.5);
    set.assign(&mut connections);

    for (connection, cluster) in connections.iter().zip(&set.connection_to_cluster) {
        assert_eq!(connection.cluster, Some(*cluster));
    }
}
