//! Canvas geometry: points, rectangles and snap-to-grid placement.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default grid unit in pixels.
pub const DEFAULT_GRID_SIZE: f64 = 8.0;

/// A position on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Point {
    /// Horizontal offset from the canvas origin.
    pub x: f64,
    /// Vertical offset from the canvas origin.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_origin(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Point containment with inclusive edges.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Rounds `value` to the nearest multiple of `grid`.
///
/// A non-positive or non-finite grid leaves the value untouched.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if !(grid.is_finite() && grid > 0.0) {
        return value;
    }
    (value / grid).round() * grid
}

/// Grid used to quantize committed table positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    size: f64,
}

impl GridSpec {
    /// Creates a grid with the given unit. Non-positive units fall back to
    /// [`DEFAULT_GRID_SIZE`].
    #[must_use]
    pub fn new(size: f64) -> Self {
        if size.is_finite() && size > 0.0 {
            Self { size }
        } else {
            Self {
                size: DEFAULT_GRID_SIZE,
            }
        }
    }

    /// Returns the grid unit in pixels.
    #[must_use]
    pub const fn size(&self) -> f64 {
        self.size
    }

    /// Clamps `raw` so a `footprint`-sized table stays inside `canvas`, then
    /// snaps both axes to the grid.
    ///
    /// The result is always grid-aligned and inside
    /// `[0, canvas - footprint]`. When the canvas is smaller than the
    /// footprint the axis resolves to `0`.
    #[must_use]
    pub fn place(&self, raw: Point, canvas: Size, footprint: Size) -> Point {
        Point::new(
            self.place_axis(raw.x, canvas.width - footprint.width),
            self.place_axis(raw.y, canvas.height - footprint.height),
        )
    }

    fn place_axis(&self, raw: f64, max: f64) -> f64 {
        if !raw.is_finite() || !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let snapped = snap_to_grid(raw.clamp(0.0, max), self.size);
        if snapped > max {
            // rounding crossed the far edge; fall back to the previous line
            (max / self.size).floor() * self.size
        } else {
            snapped
        }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(800.0, 600.0);
    const TABLE: Size = Size::new(120.0, 100.0);

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        assert_eq!(snap_to_grid(3.0, 8.0), 0.0);
        assert_eq!(snap_to_grid(4.0, 8.0), 8.0);
        assert_eq!(snap_to_grid(63.0, 8.0), 64.0);
        assert_eq!(snap_to_grid(-5.0, 8.0), -8.0);
    }

    #[test]
    fn snap_ignores_invalid_grid() {
        assert_eq!(snap_to_grid(13.0, 0.0), 13.0);
        assert_eq!(snap_to_grid(13.0, f64::NAN), 13.0);
    }

    #[test]
    fn place_snaps_table_drag() {
        let grid = GridSpec::default();
        let placed = grid.place(Point::new(50.0 + 13.0, 50.0 - 3.0), CANVAS, TABLE);
        assert_eq!(placed, Point::new(64.0, 48.0));
    }

    #[test]
    fn place_clamps_to_canvas() {
        let grid = GridSpec::default();
        let placed = grid.place(Point::new(-40.0, 10_000.0), CANVAS, TABLE);
        assert_eq!(placed.x, 0.0);
        assert_eq!(placed.y, 496.0);
    }

    #[test]
    fn place_never_rounds_past_far_edge() {
        let grid = GridSpec::default();
        // max x = 205 - 120 = 85; nearest line 88 would overflow
        let placed = grid.place(Point::new(85.0, 0.0), Size::new(205.0, 600.0), TABLE);
        assert_eq!(placed.x, 80.0);
        assert!(placed.x <= 85.0);
    }

    #[test]
    fn place_on_unmeasured_canvas_is_origin() {
        let grid = GridSpec::default();
        let placed = grid.place(Point::new(300.0, 300.0), Size::default(), TABLE);
        assert_eq!(placed, Point::new(0.0, 0.0));
    }

    #[test]
    fn place_treats_nan_as_origin() {
        let grid = GridSpec::default();
        let placed = grid.place(Point::new(f64::NAN, 40.0), CANVAS, TABLE);
        assert_eq!(placed, Point::new(0.0, 40.0));
    }

    #[test]
    fn placed_positions_are_aligned_and_in_bounds() {
        let grid = GridSpec::default();
        let mut raw = -37.5;
        while raw < 900.0 {
            let p = grid.place(Point::new(raw, raw * 0.7), CANVAS, TABLE);
            assert_eq!(p.x % 8.0, 0.0);
            assert_eq!(p.y % 8.0, 0.0);
            assert!((0.0..=CANVAS.width - TABLE.width).contains(&p.x));
            assert!((0.0..=CANVAS.height - TABLE.height).contains(&p.y));
            raw += 3.3;
        }
    }

    #[test]
    fn rect_contains_is_inclusive() {
        let rect = Rect::from_origin(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(30.0, 30.0)));
        assert!(!rect.contains(Point::new(30.1, 15.0)));
    }

    #[test]
    fn invalid_grid_falls_back_to_default() {
        assert_eq!(GridSpec::new(0.0).size(), DEFAULT_GRID_SIZE);
        assert_eq!(GridSpec::new(16.0).size(), 16.0);
    }
}
