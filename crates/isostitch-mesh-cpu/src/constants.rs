//! Shared constants for isostitch-mesh-cpu.

pub(crate) const CORNER_COUNT: usize = 8;
pub(crate) const EDGE_COUNT: usize = 12;
pub(crate) const CASE_COUNT: usize = 256; // 2^8 corner sign patterns

// Table rows hold at most five triangles plus a terminator slot.
pub(crate) const TRI_ROW_LEN: usize = 16;
pub(crate) const TRI_TERMINATOR: i8 = -1;

/// Density deltas below this are treated as flat and interpolate to the
/// edge midpoint.
pub const DENSITY_EPSILON: f32 = 1e-6;

// Local coordinate written onto axes that wrap into a forward neighbor.
pub(crate) const SEAM_FACE: f32 = 1.0;
