//! Display-space render output.
//!
//! The engine never draws. It resolves [`descriptor::RenderDescriptor`]s that a host paints
//! through a [`surface::DrawSurface`].

pub(crate) mod descriptor;
pub(crate) mod surface;
