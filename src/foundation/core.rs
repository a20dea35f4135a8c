use crate::foundation::error::{PartycamError, PartycamResult};

/// Frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The quarter-size box used for corner decorations (integer division).
    pub fn quarter(self) -> Self {
        Self {
            width: self.width / 4,
            height: self.height / 4,
        }
    }
}

/// Axis-aligned rectangle in frame coordinates, as produced by a face detector.
///
/// Rectangles are only meaningful for the frame they were detected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AnchorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AnchorRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge. Saturates instead of wrapping for absurd detector output.
    pub fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies fully inside `canvas`.
    pub fn fits_in(self, canvas: Canvas) -> bool {
        self.right() <= canvas.width && self.bottom() <= canvas.height
    }

    /// Parse the `x,y,w,h` form used on the command line.
    pub fn parse(s: &str) -> PartycamResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(PartycamError::validation(format!(
                "anchor '{s}' must have the form x,y,w,h"
            )));
        }
        let mut vals = [0u32; 4];
        for (slot, part) in vals.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                PartycamError::validation(format!("anchor component '{part}' is not a u32"))
            })?;
        }
        Ok(Self::new(vals[0], vals[1], vals[2], vals[3]))
    }
}

impl std::str::FromStr for AnchorRect {
    type Err = PartycamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
