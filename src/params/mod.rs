//! Breaking parameters of the joints.

pub use self::material::{
    ConnectionType, ConstraintSlot, JointKind, MaterialProperties, StressMode,
};
pub use self::parameterizer::{
    parameterize_new, reparameterize, ConstraintIndex, ConstraintParameters, JointId,
    JointRecord, JointSlot, ParameterOptions, Parameterization,
};
pub use self::strength_model::{LinearStrengthModel, StrengthInput, StrengthModel};

mod material;
mod parameterizer;
mod strength_model;
