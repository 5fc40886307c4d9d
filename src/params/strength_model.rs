use crate::math::Real;

/// What a [`StrengthModel`] gets to compute one breaking threshold.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrengthInput {
    /// The material strength for the stress mode of the constraint.
    pub coefficient: Real,
    /// The mean contact area of the joint.
    pub area: Real,
    /// The number of connections merged into the joint.
    pub count: u32,
    /// The global scale factor, see [`ParameterOptions::scale`](super::ParameterOptions::scale).
    pub scale: Real,
}

/// The formula turning contact areas and material strengths into breaking thresholds.
pub trait StrengthModel: Sync {
    /// The breaking threshold of one constraint.
    fn threshold(&self, input: &StrengthInput) -> Real;
}

/// `coefficient * area * count^count_exponent * scale`.
///
/// Strictly increasing in both the area and the count as long as the
/// coefficient, the scale and the exponent are positive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearStrengthModel {
    /// How much merging several contacts into one joint strengthens it.
    pub count_exponent: Real,
}

impl Default for LinearStrengthModel {
    fn default() -> Self {
        Self {
            count_exponent: 1.0,
        }
    }
}

impl StrengthModel for LinearStrengthModel {
    fn threshold(&self, input: &StrengthInput) -> Real {
        input.coefficient
            * input.area
            * (input.count as Real).powf(self.count_exponent)
            * input.scale
    }
}
