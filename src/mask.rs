use crate::ellipse::rasterize_ellipse;
use crate::error::{FocalStatsError, Result};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Requested mask extent in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize {
    pub height: usize,
    pub width: usize,
}

impl WindowSize {
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(FocalStatsError::config(format!(
                "window size must be at least 1x1, got {}x{}",
                height, width
            )));
        }
        Ok(Self { height, width })
    }

    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    /// Reach of the mask from its center cell: `ceil((dim - 1) / 2)` per axis.
    pub fn spacing(&self) -> Spacing {
        Spacing {
            vertical: self.height / 2,
            horizontal: self.width / 2,
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            height: 3,
            width: 3,
        }
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

/// Parses `"5"`, `"5x3"` or `"5,3"` (height first).
impl FromStr for WindowSize {
    type Err = FocalStatsError;

    fn from_str(s: &str) -> Result<Self> {
        let parse_dim = |part: &str| {
            part.trim().parse::<usize>().map_err(|_| {
                FocalStatsError::config(format!("invalid window size '{}'", s))
            })
        };

        let parts: Vec<&str> = s.split(|c: char| c == 'x' || c == 'X' || c == ',').collect();
        match parts.as_slice() {
            [size] => WindowSize::square(parse_dim(*size)?),
            [height, width] => WindowSize::new(parse_dim(*height)?, parse_dim(*width)?),
            _ => Err(FocalStatsError::config(format!(
                "invalid window size '{}' (expected N, HxW or H,W)",
                s
            ))),
        }
    }
}

/// Half-height and half-width of a mask, measured from its center cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub vertical: usize,
    pub horizontal: usize,
}

impl Spacing {
    /// Height and width of the box `[0, 2 * spacing]` the mask offsets live in.
    pub fn extent(&self) -> Result<(usize, usize)> {
        let span = |reach: usize| reach.checked_mul(2).and_then(|d| d.checked_add(1));
        match (span(self.vertical), span(self.horizontal)) {
            (Some(height), Some(width)) => Ok((height, width)),
            _ => Err(FocalStatsError::config(format!(
                "mask reach {}x{} is too large",
                self.vertical, self.horizontal
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskKind {
    Rectangular,
    Elliptical,
}

impl MaskKind {
    pub fn name(self) -> &'static str {
        match self {
            MaskKind::Rectangular => "rectangular",
            MaskKind::Elliptical => "elliptical",
        }
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaskKind {
    type Err = FocalStatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangular" | "rect" | "square" => Ok(MaskKind::Rectangular),
            "elliptical" | "ellipse" | "circular" => Ok(MaskKind::Elliptical),
            _ => Err(FocalStatsError::config(format!(
                "unknown mask kind '{}' (expected rectangular or elliptical)",
                s
            ))),
        }
    }
}

/// Cell count of a rectangular mask: each even dimension grows by one cell
/// so the window has a center. `None` if the count does not fit in `usize`.
pub fn parity_cell_count(window: WindowSize) -> Option<usize> {
    let grow = |dim: usize| if dim % 2 == 0 { dim.checked_add(1) } else { Some(dim) };
    grow(window.height)?.checked_mul(grow(window.width)?)
}

fn reserve_offsets(window: WindowSize, cells: usize) -> Result<Vec<(usize, usize)>> {
    let mut offsets = Vec::new();
    offsets.try_reserve_exact(cells).map_err(|e| {
        FocalStatsError::config(format!("mask {} with {} cells is too large: {}", window, cells, e))
    })?;
    Ok(offsets)
}

/// Resolved mask: the offsets sampled for every output pixel.
///
/// Offsets are relative to the top-left corner of the pixel's mask box in
/// padded coordinates, so the center cell sits at `(vertical, horizontal)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskGeometry {
    kind: MaskKind,
    window: WindowSize,
    spacing: Spacing,
    offsets: Vec<(usize, usize)>,
}

impl MaskGeometry {
    pub fn new(kind: MaskKind, window: WindowSize) -> Result<Self> {
        let geometry = match kind {
            MaskKind::Rectangular => Self::rectangular(window)?,
            MaskKind::Elliptical => Self::elliptical(window)?,
        };

        if geometry.offsets.is_empty() {
            return Err(FocalStatsError::config(format!(
                "{} mask {} has no cells",
                kind, window
            )));
        }

        debug!(
            "{} mask {}: spacing={}x{}, {} cells",
            kind,
            window,
            geometry.spacing.vertical,
            geometry.spacing.horizontal,
            geometry.cell_count()
        );
        Ok(geometry)
    }

    pub fn rectangular(window: WindowSize) -> Result<Self> {
        let spacing = window.spacing();
        let (height, width) = spacing.extent()?;

        let n = parity_cell_count(window).ok_or_else(|| {
            FocalStatsError::config(format!("rectangular mask {} has too many cells", window))
        })?;
        if Some(n) != height.checked_mul(width) {
            return Err(FocalStatsError::config(format!(
                "rectangular mask {}: parity cell count {} does not match {}x{} enumeration box",
                window, n, height, width
            )));
        }

        let mut offsets = reserve_offsets(window, n)?;
        for dr in 0..height {
            for dc in 0..width {
                offsets.push((dr, dc));
            }
        }

        Ok(Self {
            kind: MaskKind::Rectangular,
            window,
            spacing,
            offsets,
        })
    }

    pub fn elliptical(window: WindowSize) -> Result<Self> {
        let spacing = window.spacing();
        let (height, width) = spacing.extent()?;
        let center = (spacing.vertical as f64, spacing.horizontal as f64);
        let radii = (
            (spacing.vertical + 1) as f64,
            (spacing.horizontal + 1) as f64,
        );

        let offsets = rasterize_ellipse(center, radii)?
            .into_iter()
            .map(|(row, col)| {
                let inside = (0..height as i64).contains(&row) && (0..width as i64).contains(&col);
                if inside {
                    Ok((row as usize, col as usize))
                } else {
                    Err(FocalStatsError::config(format!(
                        "elliptical mask {}: cell ({}, {}) falls outside the {}x{} mask box",
                        window, row, col, height, width
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind: MaskKind::Elliptical,
            window,
            spacing,
            offsets,
        })
    }

    pub fn kind(&self) -> MaskKind {
        self.kind
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn offsets(&self) -> &[(usize, usize)] {
        &self.offsets
    }

    /// Number of cells in the mask, which sizes the per-pixel sample buffer.
    pub fn cell_count(&self) -> usize {
        self.offsets.len()
    }
}
