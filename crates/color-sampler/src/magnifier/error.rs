use std::fmt;

/// Error type for magnifier setup.
#[derive(Debug, Clone, PartialEq)]
pub enum MagnifierError {
    /// Geometry with no center cell or an unusable surface size
    InvalidGeometry {
        /// Requested cells per side
        rect_num: u32,
        /// Requested cell size in surface pixels
        rect_size: u32,
    },
    /// The canvas could not allocate a surface of the given size
    SurfaceAllocation {
        /// Requested surface width
        width: u32,
        /// Requested surface height
        height: u32,
    },
}

impl fmt::Display for MagnifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagnifierError::InvalidGeometry {
                rect_num,
                rect_size,
            } => write!(
                f,
                "invalid magnifier geometry: {} cells of {}px \
                 (cell count must be odd, surface edge 1..={}px)",
                rect_num,
                rect_size,
                super::MAX_SURFACE_SIZE
            ),
            MagnifierError::SurfaceAllocation { width, height } => {
                write!(f, "failed to allocate {}x{} magnifier surface", width, height)
            }
        }
    }
}

impl std::error::Error for MagnifierError {}
