//! Turning a day slice into something to look at.

pub mod html;
pub mod svg;
pub mod view;

#[cfg(feature = "plotting")]
pub mod plotly;
