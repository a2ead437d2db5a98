//! Registry to catalog sync pipeline
//!
//! Lists every configured package type, looks up each package's latest
//! version, turns the pair into a catalog entity and upserts it. Everything
//! runs on one task, one request at a time, in registry order.

pub mod pipeline;
pub mod report;
pub mod transform;

pub use pipeline::SyncPipeline;
pub use report::{ListingOutcome, PackageOutcome, SkipReason, SyncReport, TypeReport};
pub use transform::to_entity;
