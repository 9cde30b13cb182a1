//! Core type definitions for diagram translation
//!
//! Translation options and the small geometric value types shared by the
//! pipeline stages.

use std::fmt;

/// Default magnification applied to position offsets from the diagram center
pub const DEFAULT_SCALING_FACTOR: f64 = 1.4;

/// Options controlling one translation
///
/// These are the only values shared between translations in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateOptions {
    /// Magnification of each vertex's offset from the diagram center
    pub scaling_factor: f64,
    /// Whether main-system selection prompts a human or takes the first vertex
    pub interactive: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            scaling_factor: DEFAULT_SCALING_FACTOR,
            interactive: true,
        }
    }
}

impl TranslateOptions {
    /// Create options with the default scaling factor, in interactive mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for unattended runs: first vertex becomes the main system
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            ..Self::default()
        }
    }

    /// Set the scaling factor
    pub fn with_scaling_factor(mut self, scaling_factor: f64) -> Self {
        self.scaling_factor = scaling_factor;
        self
    }

    /// Enable or disable the interactive main-system prompt
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

/// A point in diagram coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A vertex rectangle as read from its `mxGeometry`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Axis-aligned bounds of all vertices with usable geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Span used when no vertex carries usable geometry
    pub const DEFAULT: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 500.0,
        max_y: 500.0,
    };

    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The smallest box covering a rectangle
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.x, rect.y, rect.right(), rect.bottom())
    }

    /// Grow the box to cover a rectangle
    pub fn include(&mut self, rect: &Rect) {
        self.min_x = self.min_x.min(rect.x);
        self.min_y = self.min_y.min(rect.y);
        self.max_x = self.max_x.max(rect.right());
        self.max_y = self.max_y.max(rect.bottom());
    }

    /// Midpoint of the box
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
