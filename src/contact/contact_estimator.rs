#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{approximate_contact, contact_from_volume, ContactEstimate, ContactMode, NoContact};
use crate::catalog::{Element, ElementCatalog};
use crate::math::Real;
use crate::pipeline::BuildWarning;
use crate::proximity::ElementPair;
use crate::query::{IntersectionError, MeshIntersector};

/// A candidate pair that survived contact estimation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EstimatedPair {
    /// The element pair.
    pub pair: ElementPair,
    /// Its estimated contact.
    pub contact: ContactEstimate,
}

/// Estimates contact areas with the configured strategy.
#[derive(Copy, Clone)]
pub struct ContactEstimator<'a> {
    /// The estimation strategy.
    pub mode: ContactMode,
    /// The boolean service used by [`ContactMode::Accurate`].
    pub intersector: &'a dyn MeshIntersector,
    /// The margin the first mesh of each pair is inflated by before intersection.
    pub search_margin: Real,
    /// Areas smaller or equal to this are considered as no contact at all.
    pub epsilon: Real,
}

impl ContactEstimator<'_> {
    /// Estimates the contact between two elements.
    ///
    /// If the accurate strategy fails, the approximate estimate is returned
    /// along with the error that caused the fallback.
    pub fn estimate(
        &self,
        element1: &Element,
        element2: &Element,
    ) -> (Result<ContactEstimate, NoContact>, Option<IntersectionError>) {
        let (estimate, fallback) = match self.mode {
            ContactMode::Approximate => (
                Some(approximate_contact(&element1.aabb, &element2.aabb)),
                None,
            ),
            ContactMode::Accurate => {
                match self
                    .intersector
                    .intersect(&element1.mesh, &element2.mesh, self.search_margin)
                {
                    Ok(Some(volume)) => {
                        let direction = element2.aabb.center() - element1.aabb.center();
                        (contact_from_volume(&volume, &direction), None)
                    }
                    Ok(None) => (None, None),
                    Err(err) => (
                        Some(approximate_contact(&element1.aabb, &element2.aabb)),
                        Some(err),
                    ),
                }
            }
        };

        let result = match estimate {
            Some(contact) if contact.area() > self.epsilon => Ok(contact),
            Some(contact) => Err(NoContact {
                area: contact.area(),
            }),
            None => Err(NoContact { area: 0.0 }),
        };

        (result, fallback)
    }

    /// Estimates the contact of every pair, dropping the pairs without contact.
    ///
    /// The order of `pairs` is preserved. Fallbacks to the approximate
    /// strategy are reported as warnings.
    pub fn estimate_all(
        &self,
        catalog: &ElementCatalog,
        pairs: &[ElementPair],
    ) -> (Vec<EstimatedPair>, Vec<BuildWarning>) {
        let estimate_pair = |pair: &ElementPair| {
            let element1 = catalog.element(*pair.elements.first());
            let element2 = catalog.element(*pair.elements.second());
            (*pair, self.estimate(element1, element2))
        };

        #[cfg(feature = "parallel")]
        let results: Vec<_> = pairs.par_iter().map(estimate_pair).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = pairs.iter().map(estimate_pair).collect();

        let mut estimated = Vec::with_capacity(results.len());
        let mut warnings = vec![];

        for (pair, (result, fallback)) in results {
            if let Some(error) = fallback {
                let warning = BuildWarning::IntersectionFallback {
                    elements: *pair.elements.as_array(),
                    error,
                };
                log::warn!("{}", warning);
                warnings.push(warning);
            }

            match result {
                Ok(contact) => estimated.push(EstimatedPair { pair, contact }),
                Err(no_contact) => log::debug!(
                    "Dropping pair {:?}: {}",
                    pair.elements.as_array(),
                    no_contact
                ),
            }
        }

        log::info!(
            "Contact estimation: {} of {} pairs in contact.",
            estimated.len(),
            pairs.len()
        );

        (estimated, warnings)
    }
}
