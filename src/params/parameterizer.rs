use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{ConnectionType, ConstraintSlot, MaterialProperties, StrengthInput, StrengthModel};
use crate::catalog::{ElementCatalog, GroupTable};
use crate::cluster::{Cluster, ClusterSet};
use crate::math::{Point, Real};
use crate::pipeline::{BuildSnapshot, BuildWarning};

/// Global knobs applied to every breaking threshold.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterOptions {
    /// The simulation rate. Thresholds are impulses per simulation step.
    pub steps_per_second: Real,
    /// A multiplier applied to every threshold.
    pub global_multiplier: Real,
}

impl Default for ParameterOptions {
    fn default() -> Self {
        Self {
            steps_per_second: 60.0,
            global_multiplier: 1.0,
        }
    }
}

impl ParameterOptions {
    /// The factor every strength is multiplied by: `global_multiplier / steps_per_second`.
    #[inline]
    pub fn scale(&self) -> Real {
        self.global_multiplier / self.steps_per_second
    }
}

/// The identity of a joint, stable across update passes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointId(pub u32);

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "joint#{}", self.0)
    }
}

/// The persisted layout of a joint: which constraints it is made of.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointSlot {
    /// The joint identity.
    pub joint: JointId,
    /// The cluster realized by this joint.
    pub cluster: u32,
    /// The connection type the constraints were laid out for.
    pub connection_type: ConnectionType,
    /// The constraints of the joint.
    pub constraints: Vec<ConstraintSlot>,
}

/// One constraint of a joint with its breaking threshold.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstraintParameters {
    /// The constraint layout.
    pub slot: ConstraintSlot,
    /// The impulse above which the constraint breaks.
    pub threshold: Real,
}

/// A fully parameterized joint, ready to be realized by the physics engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointRecord {
    /// The joint identity.
    pub joint: JointId,
    /// The cluster realized by this joint.
    pub cluster: u32,
    /// The (current) group pair of the joint, lowest first.
    pub groups: [u32; 2],
    /// The group whose material governs the thresholds.
    pub governing_group: u32,
    /// Where the joint is placed.
    pub location: Point<Real>,
    /// The mean contact area of the merged connections.
    pub area: Real,
    /// The number of merged connections.
    pub member_count: u32,
    /// The constraints of the joint.
    pub constraints: Vec<ConstraintParameters>,
}

impl JointRecord {
    /// The breaking threshold of the joint, i.e., the one of its first constraint.
    pub fn breaking_threshold(&self) -> Real {
        self.constraints.first().map(|c| c.threshold).unwrap_or(0.0)
    }
}

/// The correspondence between constraints and the connections they realize.
///
/// Constraints are numbered joint by joint, in joint order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintIndex {
    /// For each connection, the constraints of the joint it was merged into.
    pub connection_to_constraints: Vec<Vec<u32>>,
    /// For each constraint, the representative connection of its joint.
    pub constraint_to_connection: Vec<u32>,
}

impl ConstraintIndex {
    fn new(connection_count: usize, clusters: &[Cluster], joints: &[JointRecord]) -> Self {
        let mut result = Self {
            connection_to_constraints: vec![vec![]; connection_count],
            constraint_to_connection: vec![],
        };

        for joint in joints {
            let cluster = &clusters[joint.cluster as usize];
            let first = result.constraint_to_connection.len() as u32;
            let ids: Vec<u32> = (first..first + joint.constraints.len() as u32).collect();

            for member in &cluster.members {
                result.connection_to_constraints[*member as usize].extend_from_slice(&ids);
            }

            result
                .constraint_to_connection
                .extend(ids.iter().map(|_| cluster.members[0]));
        }

        result
    }

    /// The total number of constraints.
    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraint_to_connection.len()
    }
}

/// The output of a parameterization pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameterization {
    /// The parameterized joints, in cluster order.
    pub joints: Vec<JointRecord>,
    /// The layout of every joint, to be persisted.
    pub slots: Vec<JointSlot>,
    /// The constraint/connection correspondence.
    pub index: ConstraintIndex,
    /// The recoverable problems met along the way.
    pub warnings: Vec<BuildWarning>,
}

/// The resolved material of every group of a table.
struct MaterialTable {
    materials: Vec<MaterialProperties>,
    fell_back: Vec<bool>,
}

impl MaterialTable {
    fn new(groups: &GroupTable) -> Self {
        let (materials, fell_back) = (0..groups.len() as u32)
            .map(|i| match groups.properties(i) {
                Some(props) if props.is_valid() => (*props, false),
                _ => (MaterialProperties::fallback(), true),
            })
            .unzip();
        Self {
            materials,
            fell_back,
        }
    }

    fn fallback_warnings(
        &self,
        groups: &GroupTable,
        used: impl IntoIterator<Item = u32>,
    ) -> Vec<BuildWarning> {
        let used: BTreeSet<u32> = used.into_iter().collect();
        used.into_iter()
            .filter(|g| self.fell_back[*g as usize])
            .map(|group| {
                let warning = BuildWarning::MaterialFallback {
                    group,
                    name: groups.name(group).unwrap_or_default().to_string(),
                };
                log::warn!("{}", warning);
                warning
            })
            .collect()
    }

    /// The governing group: lowest compressive strength, then lowest index.
    fn governing(&self, groups: [u32; 2]) -> u32 {
        let [g1, g2] = groups;
        let c1 = self.materials[g1 as usize].compressive;
        let c2 = self.materials[g2 as usize].compressive;

        if c2 < c1 || (c2 == c1 && g2 < g1) {
            g2
        } else {
            g1
        }
    }
}

fn joint_record(
    joint: JointId,
    cluster_id: u32,
    cluster: &Cluster,
    groups: [u32; 2],
    constraints: &[ConstraintSlot],
    materials: &MaterialTable,
    options: &ParameterOptions,
    model: &dyn StrengthModel,
) -> JointRecord {
    let governing_group = materials.governing(groups);
    let material = &materials.materials[governing_group as usize];
    let scale = options.scale();

    let constraints = constraints
        .iter()
        .map(|slot| ConstraintParameters {
            slot: *slot,
            threshold: model.threshold(&StrengthInput {
                coefficient: material.strength(slot.mode),
                area: cluster.area,
                count: cluster.member_count(),
                scale,
            }),
        })
        .collect();

    JointRecord {
        joint,
        cluster: cluster_id,
        groups,
        governing_group,
        location: cluster.location,
        area: cluster.area,
        member_count: cluster.member_count(),
        constraints,
    }
}

/// Creates and parameterizes one joint per cluster.
///
/// The joint of the `i`-th cluster gets the identity `JointId(i)` and the
/// constraint layout of the connection type of its governing group.
pub fn parameterize_new(
    clusters: &ClusterSet,
    groups: &GroupTable,
    options: &ParameterOptions,
    model: &dyn StrengthModel,
) -> Parameterization {
    let materials = MaterialTable::new(groups);
    let warnings = materials.fallback_warnings(
        groups,
        clusters.clusters.iter().flat_map(|c| c.groups),
    );

    let parameterize = |(i, cluster): (usize, &Cluster)| {
        let governing = materials.governing(cluster.groups);
        let connection_type = materials.materials[governing as usize].connection_type;
        let slot = JointSlot {
            joint: JointId(i as u32),
            cluster: i as u32,
            connection_type,
            constraints: connection_type.slots().to_vec(),
        };
        let record = joint_record(
            slot.joint,
            i as u32,
            cluster,
            cluster.groups,
            &slot.constraints,
            &materials,
            options,
            model,
        );
        (record, slot)
    };

    #[cfg(not(feature = "parallel"))]
    let (joints, slots): (Vec<_>, Vec<_>) =
        clusters.clusters.iter().enumerate().map(parameterize).unzip();
    #[cfg(feature = "parallel")]
    let (joints, slots): (Vec<_>, Vec<_>) = clusters
        .clusters
        .par_iter()
        .enumerate()
        .map(parameterize)
        .unzip();

    let index = ConstraintIndex::new(
        clusters.connection_to_cluster.len(),
        &clusters.clusters,
        &joints,
    );

    Parameterization {
        joints,
        slots,
        index,
        warnings,
    }
}

enum Reparameterized {
    Joint(JointRecord, Option<BuildWarning>),
    Orphaned(Vec<BuildWarning>),
}

/// Recomputes the parameters of the joints stored in `snapshot` without any geometric work.
///
/// Group indices are re-derived from the group names recorded in the
/// snapshot. Joints whose groups no longer exist are dropped, with one
/// [`BuildWarning::OrphanedConnection`] per merged connection. Joints whose
/// governing group now asks for another connection type keep their stored
/// constraint layout and are flagged with [`BuildWarning::ConnectionTypeChanged`].
pub fn reparameterize(
    snapshot: &BuildSnapshot,
    groups: &GroupTable,
    options: &ParameterOptions,
    model: &dyn StrengthModel,
) -> Parameterization {
    let materials = MaterialTable::new(groups);
    let element_groups = ElementCatalog::refresh_groups(&snapshot.elements, groups);
    let current_groups = |connection: u32| -> Option<[u32; 2]> {
        let [a, b] = snapshot.connections.get(connection as usize)?.elements;
        let ga = (*element_groups.get(a as usize)?)?;
        let gb = (*element_groups.get(b as usize)?)?;
        Some(if ga <= gb { [ga, gb] } else { [gb, ga] })
    };

    let update = |slot: &JointSlot| {
        let Some(cluster) = snapshot.clusters.get(slot.cluster as usize) else {
            return Reparameterized::Orphaned(vec![]);
        };

        let Some(groups) = cluster.members.first().and_then(|m| current_groups(*m)) else {
            let warnings = cluster
                .members
                .iter()
                .map(|m| BuildWarning::OrphanedConnection {
                    connection: *m,
                    elements: snapshot
                        .connections
                        .get(*m as usize)
                        .map(|c| c.elements)
                        .unwrap_or_default(),
                })
                .collect();
            return Reparameterized::Orphaned(warnings);
        };

        let governing = materials.governing(groups);
        let needed = materials.materials[governing as usize].connection_type;
        let changed = (needed != slot.connection_type).then_some(
            BuildWarning::ConnectionTypeChanged {
                joint: slot.joint,
                built: slot.connection_type,
                needed,
            },
        );

        let record = joint_record(
            slot.joint,
            slot.cluster,
            cluster,
            groups,
            &slot.constraints,
            &materials,
            options,
            model,
        );
        Reparameterized::Joint(record, changed)
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<_> = snapshot.joint_slots.iter().map(update).collect();
    #[cfg(feature = "parallel")]
    let outcomes: Vec<_> = snapshot
        .joint_slots
        .par_iter()
        .map(update)
        .collect();

    let mut joints = vec![];
    let mut slots = vec![];
    let mut warnings = vec![];

    for (outcome, slot) in outcomes.into_iter().zip(&snapshot.joint_slots) {
        match outcome {
            Reparameterized::Joint(record, changed) => {
                joints.push(record);
                slots.push(slot.clone());
                warnings.extend(changed);
            }
            Reparameterized::Orphaned(orphans) => warnings.extend(orphans),
        }
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    let mut all_warnings =
        materials.fallback_warnings(groups, joints.iter().flat_map(|j| j.groups));
    all_warnings.append(&mut warnings);

    let index = ConstraintIndex::new(snapshot.connections.len(), &snapshot.clusters, &joints);

    Parameterization {
        joints,
        slots,
        index,
        warnings: all_warnings,
    }
}
