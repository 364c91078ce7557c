//! Statistics over a day slice: summary figures, era grouping, histogram
//! and kernel density.

pub mod density;
pub mod era;
pub mod histogram;
pub mod summary;
