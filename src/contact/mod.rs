//! Contact area estimation between candidate element pairs.

pub use self::accurate::contact_from_volume;
pub use self::approximate::approximate_contact;
pub use self::contact_estimate::{ContactEstimate, ContactGeometry, ContactMode, NoContact};
pub use self::contact_estimator::{ContactEstimator, EstimatedPair};

mod accurate;
mod approximate;
mod contact_estimate;
mod contact_estimator;
