use crate::contact::ContactMode;
use crate::math::Real;
use crate::params::ParameterOptions;

/// Error indicating that a [`BuildConfig`] cannot be used.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A distance option is negative, NaN or infinite.
    #[error("`{option}` must be finite and non-negative, got {value}")]
    InvalidDistance {
        /// The name of the offending option.
        option: &'static str,
        /// Its value.
        value: Real,
    },
    /// A parameter option is zero, negative, NaN or infinite.
    #[error("`{option}` must be finite and positive, got {value}")]
    InvalidParameter {
        /// The name of the offending option.
        option: &'static str,
        /// Its value.
        value: Real,
    },
}

/// The options of a build.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// How far apart two elements may be and still get connected.
    pub search_margin: Real,
    /// Elements whose largest extent is below this are parented instead of connected. Zero disables it.
    pub minimum_element_size: Real,
    /// Estimate contact areas from mesh intersections instead of bounding boxes.
    pub use_accurate_area: bool,
    /// Connections closer than this (inclusive) are merged into one joint. Zero disables it.
    pub cluster_radius: Real,
    /// Produce a flat text dump of the constraints instead of a persisted snapshot.
    pub export_as_text: bool,
    /// Also connect two elements of the same group.
    pub connect_same_group: bool,
    /// Contact areas smaller or equal to this are ignored.
    pub contact_epsilon: Real,
    /// Two connections of the same element pair closer than this are duplicates.
    pub dedup_tolerance: Real,
    /// Global threshold scaling.
    pub parameters: ParameterOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            search_margin: 0.02,
            minimum_element_size: 0.0,
            use_accurate_area: false,
            cluster_radius: 0.0,
            export_as_text: false,
            connect_same_group: false,
            contact_epsilon: 1.0e-6,
            dedup_tolerance: 1.0e-4,
            parameters: ParameterOptions::default(),
        }
    }
}

impl BuildConfig {
    /// Sets the search margin.
    pub fn with_search_margin(mut self, search_margin: Real) -> Self {
        self.search_margin = search_margin;
        self
    }

    /// Sets the minimum element size.
    pub fn with_minimum_element_size(mut self, minimum_element_size: Real) -> Self {
        self.minimum_element_size = minimum_element_size;
        self
    }

    /// Enables or disables accurate contact areas.
    pub fn with_accurate_area(mut self, use_accurate_area: bool) -> Self {
        self.use_accurate_area = use_accurate_area;
        self
    }

    /// Sets the clustering radius.
    pub fn with_cluster_radius(mut self, cluster_radius: Real) -> Self {
        self.cluster_radius = cluster_radius;
        self
    }

    /// Enables or disables the text export.
    pub fn with_export_as_text(mut self, export_as_text: bool) -> Self {
        self.export_as_text = export_as_text;
        self
    }

    /// Allows or forbids connections between elements of the same group.
    pub fn with_connect_same_group(mut self, connect_same_group: bool) -> Self {
        self.connect_same_group = connect_same_group;
        self
    }

    /// Sets the contact area epsilon.
    pub fn with_contact_epsilon(mut self, contact_epsilon: Real) -> Self {
        self.contact_epsilon = contact_epsilon;
        self
    }

    /// Sets the connection deduplication tolerance.
    pub fn with_dedup_tolerance(mut self, dedup_tolerance: Real) -> Self {
        self.dedup_tolerance = dedup_tolerance;
        self
    }

    /// Sets the threshold scaling options.
    pub fn with_parameters(mut self, parameters: ParameterOptions) -> Self {
        self.parameters = parameters;
        self
    }

    /// The contact estimation strategy selected by `use_accurate_area`.
    #[inline]
    pub fn contact_mode(&self) -> ContactMode {
        if self.use_accurate_area {
            ContactMode::Accurate
        } else {
            ContactMode::Approximate
        }
    }

    /// Checks that every option is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("search_margin", self.search_margin),
            ("minimum_element_size", self.minimum_element_size),
            ("cluster_radius", self.cluster_radius),
            ("contact_epsilon", self.contact_epsilon),
            ("dedup_tolerance", self.dedup_tolerance),
        ];

        for (option, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { option, value });
            }
        }

        let parameters = [
            ("steps_per_second", self.parameters.steps_per_second),
            ("global_multiplier", self.parameters.global_multiplier),
        ];

        for (option, value) in parameters {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidParameter { option, value });
            }
        }

        Ok(())
    }
}
