use crate::math::Real;

/// The kind of physics constraint backing one slot of a joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointKind {
    /// All relative motion is locked.
    Fixed,
    /// Relative translations are locked, rotations are free.
    Point,
    /// A configurable constraint limited to one stress mode.
    Generic,
}

/// The stress mode a constraint resists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressMode {
    /// Pushing the elements toward each other.
    Compressive,
    /// Pulling the elements apart.
    Tensile,
    /// Sliding along the contact plane.
    Shear,
    /// Rotating around an axis of the contact plane.
    Bending,
}

impl StressMode {
    /// All the stress modes, in slot order.
    pub const ALL: [StressMode; 4] = [
        StressMode::Compressive,
        StressMode::Tensile,
        StressMode::Shear,
        StressMode::Bending,
    ];
}

/// One physics constraint of a joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintSlot {
    /// The constraint kind.
    pub kind: JointKind,
    /// The stress mode whose strength gives the breaking threshold.
    pub mode: StressMode,
}

impl ConstraintSlot {
    const fn new(kind: JointKind, mode: StressMode) -> Self {
        Self { kind, mode }
    }
}

/// How the joints of a group are realized in terms of physics constraints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectionType {
    /// One fixed constraint.
    #[default]
    Fixed,
    /// One point constraint.
    Point,
    /// A fixed constraint breaking in shear, plus a point constraint breaking in tension.
    FixedAndPoint,
    /// One generic constraint per stress mode.
    PerMode,
}

impl ConnectionType {
    /// The constraint slots a joint of this type is made of.
    ///
    /// The first slot gives the breaking threshold of the whole joint.
    pub fn slots(self) -> &'static [ConstraintSlot] {
        static FIXED: [ConstraintSlot; 1] =
            [ConstraintSlot::new(JointKind::Fixed, StressMode::Tensile)];
        static POINT: [ConstraintSlot; 1] =
            [ConstraintSlot::new(JointKind::Point, StressMode::Tensile)];
        static FIXED_AND_POINT: [ConstraintSlot; 2] = [
            ConstraintSlot::new(JointKind::Fixed, StressMode::Shear),
            ConstraintSlot::new(JointKind::Point, StressMode::Tensile),
        ];
        static PER_MODE: [ConstraintSlot; 4] = [
            ConstraintSlot::new(JointKind::Generic, StressMode::Compressive),
            ConstraintSlot::new(JointKind::Generic, StressMode::Tensile),
            ConstraintSlot::new(JointKind::Generic, StressMode::Shear),
            ConstraintSlot::new(JointKind::Generic, StressMode::Bending),
        ];

        match self {
            ConnectionType::Fixed => &FIXED,
            ConnectionType::Point => &POINT,
            ConnectionType::FixedAndPoint => &FIXED_AND_POINT,
            ConnectionType::PerMode => &PER_MODE,
        }
    }
}

/// The strength of the material of an element group, per unit of contact area.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// How joints of this group are realized.
    pub connection_type: ConnectionType,
    /// Compressive strength.
    pub compressive: Real,
    /// Tensile strength.
    pub tensile: Real,
    /// Shear strength.
    pub shear: Real,
    /// Bending strength.
    pub bending: Real,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self::fallback()
    }
}

impl MaterialProperties {
    /// The properties used for groups without (valid) properties.
    ///
    /// These are loosely based on plain concrete, in MPa.
    pub const fn fallback() -> Self {
        Self {
            connection_type: ConnectionType::Fixed,
            compressive: 30.0,
            tensile: 3.0,
            shear: 3.0,
            bending: 3.0,
        }
    }

    /// Sets the connection type.
    pub fn with_connection_type(mut self, connection_type: ConnectionType) -> Self {
        self.connection_type = connection_type;
        self
    }

    /// Sets all four strengths.
    pub fn with_strengths(mut self, compressive: Real, tensile: Real, shear: Real, bending: Real) -> Self {
        self.compressive = compressive;
        self.tensile = tensile;
        self.shear = shear;
        self.bending = bending;
        self
    }

    /// Are all the strengths finite and positive?
    pub fn is_valid(&self) -> bool {
        StressMode::ALL
            .iter()
            .all(|mode| self.strength(*mode).is_finite() && self.strength(*mode) > 0.0)
    }

    /// The strength for the given stress mode.
    #[inline]
    pub fn strength(&self, mode: StressMode) -> Real {
        match mode {
            StressMode::Compressive => self.compressive,
            StressMode::Tensile => self.tensile,
            StressMode::Shear => self.shear,
            StressMode::Bending => self.bending,
        }
    }
}
