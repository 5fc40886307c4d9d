use crate::cluster::Cluster;
use crate::graph::Connection;
use crate::math::{Point, Real};
use crate::params::{JointId, JointKind, JointRecord, StressMode};

#[derive(Serialize)]
struct ConstraintLine {
    joint: JointId,
    constraint: u32,
    elements: [u32; 2],
    groups: [u32; 2],
    location: Point<Real>,
    kind: JointKind,
    mode: StressMode,
    threshold: Real,
}

/// Dumps every constraint as one JSON object per line.
///
/// Constraints are numbered joint by joint, like in
/// [`ConstraintIndex`](crate::params::ConstraintIndex). The elements of a
/// constraint are the ones of the first connection of its cluster.
pub fn text_export(
    joints: &[JointRecord],
    clusters: &[Cluster],
    connections: &[Connection],
) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    let mut constraint = 0;

    for joint in joints {
        let elements = clusters
            .get(joint.cluster as usize)
            .and_then(|c| c.members.first())
            .and_then(|m| connections.get(*m as usize))
            .map(|c| c.elements)
            .unwrap_or_default();

        for params in &joint.constraints {
            let line = ConstraintLine {
                joint: joint.joint,
                constraint,
                elements,
                groups: joint.groups,
                location: joint.location,
                kind: params.slot.kind,
                mode: params.slot.mode,
                threshold: params.threshold,
            };
            out.push_str(&serde_json::to_string(&line)?);
            out.push('\n');
            constraint += 1;
        }
    }

    Ok(out)
}
