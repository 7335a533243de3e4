//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry specifies an offset (dx, dy) and a weight for a neighbor that
/// has not been processed yet. Each neighbor receives
/// `error * weight / divisor`.
///
/// The `max_dy` field indicates how many rows ahead the kernel reaches,
/// which determines how many rows of pending error are kept: `max_dy + 1`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,

    /// Maximum dy value in entries.
    pub max_dy: usize,
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};
