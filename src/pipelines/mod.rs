//! Render pipelines.
//!
//! Every surface of the configurator is lit by the same shader, so there is a
//! single pipeline, built for the surface format. Screenshot targets use the
//! same format so they can share it.

pub mod basic;
