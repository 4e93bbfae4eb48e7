//! Geographic indexing shared by foot-path construction and the
//! access/egress resolver.
//!
//! Both answer "which stops lie within a walking radius of this point"
//! against the same R-tree (`rstar`) over stop coordinates; an exhaustive
//! haversine scan would be O(|S|²) for foot-path construction, so the tree
//! prunes candidates by a generous planar bounding radius before every
//! surviving candidate is re-checked against the exact haversine distance.
//! The output is identical to a full scan — the tree is purely an
//! optimisation.

mod index;

pub use index::SpatialIndex;
