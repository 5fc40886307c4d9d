/*!
bondnet3d
=========

**bondnet3d** derives a network of breakable joints between the rigid
fragments of a fractured object, so that a physics engine can simulate
progressive collapse.

The pipeline goes through six stages:

1. [`catalog`] bakes the host elements and assigns dense group indices.
2. [`proximity`] finds candidate element pairs with an R-tree broad phase and
   redirects undersized elements into parent links.
3. [`contact`] estimates the contact area and location of every candidate.
4. [`graph`] turns the surviving pairs into group-keyed connections.
5. [`cluster`] merges nearby connections into single joints.
6. [`params`] derives the breaking thresholds of every joint.

The [`pipeline`] module orchestrates all of them, persists a
[`pipeline::BuildSnapshot`] and re-enters at the last stage when only the
parameters changed.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::type_complexity)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod catalog;
pub mod cluster;
pub mod contact;
pub mod graph;
pub mod math;
pub mod params;
pub mod pipeline;
pub mod proximity;
pub mod query;
pub mod shape;
pub mod utils;

pub use crate::pipeline::{
    BuildConfig, BuildOutput, BuildStatus, BuildWarning, Pipeline, PipelineMode,
};
