#[macro_use]
extern crate approx;

mod common;

mod abc_scenario;
mod accurate_area;
mod cluster_merging;
mod preconditions;
mod text_export;
mod thresholds;
mod tiny_elements;
mod update_mode;
