//! Candidate pair discovery and tiny element redirection.

pub use self::candidates::{find_candidates, retain_connectable, ElementPair};
pub use self::parent_link::{redirect_tiny_elements, ParentLink};

mod candidates;
mod parent_link;
