//! Models shared between providers and the sync engine.

mod float_range;
mod listing;
mod phase;

pub use float_range::FloatRange;
pub use listing::{Listing, ListingType};
pub use phase::{extract_phase, Phase};
