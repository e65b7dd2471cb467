//! Tables: shape, capacity, category and canvas position.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TableId;
use super::geometry::Point;

/// Smallest allowed seat count.
pub const MIN_SEATS: u32 = 1;
/// Largest allowed seat count.
pub const MAX_SEATS: u32 = 30;

/// Physical table shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    /// Round table.
    #[default]
    Round,
    /// Long rectangular table.
    Rectangle,
    /// Small square table.
    Square,
}

impl TableShape {
    /// All shapes in menu order.
    pub const ALL: [Self; 3] = [Self::Round, Self::Rectangle, Self::Square];

    /// Seat count given to a freshly added table of this shape.
    #[must_use]
    pub const fn default_seats(self) -> u32 {
        match self {
            Self::Round => 8,
            Self::Rectangle => 10,
            Self::Square => 4,
        }
    }

    /// Returns the shape as a static string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Rectangle => "rectangle",
            Self::Square => "square",
        }
    }
}

/// Who a table is reserved for. Drives the label and accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TableCategory {
    /// Family of the couple.
    Family,
    /// Friends.
    Friends,
    /// Guests giving speeches.
    Speakers,
    /// Children.
    Kids,
    /// Groomsmen.
    Groomsmen,
    /// Bridesmaids.
    Bridesmaids,
    /// Anything else.
    #[default]
    Other,
}

impl TableCategory {
    /// All categories in picker order.
    pub const ALL: [Self; 7] = [
        Self::Family,
        Self::Friends,
        Self::Speakers,
        Self::Kids,
        Self::Groomsmen,
        Self::Bridesmaids,
        Self::Other,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Friends => "Friends",
            Self::Speakers => "Speakers",
            Self::Kids => "Kids",
            Self::Groomsmen => "Groomsmen",
            Self::Bridesmaids => "Bridesmaids",
            Self::Other => "Other",
        }
    }

    /// Accent colour as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Family => "#ec4899",
            Self::Friends => "#8b5cf6",
            Self::Speakers => "#f59e0b",
            Self::Kids => "#10b981",
            Self::Groomsmen => "#3b82f6",
            Self::Bridesmaids => "#f472b6",
            Self::Other => "#6b7280",
        }
    }
}

/// A seating unit with a fixed capacity and a canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Table {
    /// Unique table id.
    pub id: TableId,
    /// Display name, e.g. `"Table 1"`.
    pub name: String,
    /// Physical shape.
    pub shape: TableShape,
    /// Seat count, always within `[MIN_SEATS, MAX_SEATS]`.
    pub seats: u32,
    /// Top-left corner on the canvas.
    pub position: Point,
    /// Locked tables cannot be dragged.
    #[serde(default)]
    pub locked: bool,
    /// Guest grouping for this table.
    #[serde(default)]
    pub category: TableCategory,
    /// Marks a table held back from general seating.
    #[serde(default)]
    pub reserved: bool,
}

impl Table {
    /// Builds the table created by the "add table" action when `existing`
    /// tables are already on the chart.
    ///
    /// New tables stack vertically, 100 px apart, so they never spawn on top
    /// of the previous one.
    #[must_use]
    pub fn new_default(shape: TableShape, existing: usize) -> Self {
        let n = existing as f64;
        Self {
            id: TableId::new(),
            name: format!("Table {}", existing.saturating_add(1)),
            shape,
            seats: shape.default_seats(),
            position: Point::new(50.0, 50.0 + n * 100.0),
            locked: false,
            category: TableCategory::Other,
            reserved: false,
        }
    }

    /// Applies an edit form, clamping the seat count.
    pub fn apply(&mut self, draft: &TableDraft) {
        self.name.clone_from(&draft.name);
        self.seats = clamp_seats(i64::from(draft.seats));
        self.shape = draft.shape;
        self.locked = draft.locked;
        self.reserved = draft.reserved;
        self.category = draft.category;
    }
}

/// Values from the table edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TableDraft {
    /// New display name.
    pub name: String,
    /// Requested seat count; clamped to `[MIN_SEATS, MAX_SEATS]` on save.
    pub seats: i32,
    /// New shape.
    pub shape: TableShape,
    /// Drag lock.
    #[serde(default)]
    pub locked: bool,
    /// Reserved marker.
    #[serde(default)]
    pub reserved: bool,
    /// Guest grouping.
    #[serde(default)]
    pub category: TableCategory,
}

impl From<&Table> for TableDraft {
    fn from(table: &Table) -> Self {
        Self {
            name: table.name.clone(),
            seats: i32::try_from(table.seats).unwrap_or(i32::MAX),
            shape: table.shape,
            locked: table.locked,
            reserved: table.reserved,
            category: table.category,
        }
    }
}

/// Clamps a requested seat count to `[MIN_SEATS, MAX_SEATS]`.
#[must_use]
pub fn clamp_seats(value: i64) -> u32 {
    let clamped = value.clamp(i64::from(MIN_SEATS), i64::from(MAX_SEATS));
    u32::try_from(clamped).unwrap_or(MIN_SEATS)
}

/// Parses free-form seat input. Unparseable input counts as the minimum.
#[must_use]
pub fn parse_seats(input: &str) -> u32 {
    input
        .trim()
        .parse::<i64>()
        .map_or(MIN_SEATS, clamp_seats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seats_follow_shape() {
        assert_eq!(TableShape::Round.default_seats(), 8);
        assert_eq!(TableShape::Rectangle.default_seats(), 10);
        assert_eq!(TableShape::Square.default_seats(), 4);
    }

    #[test]
    fn new_tables_stack_below_existing_ones() {
        let first = Table::new_default(TableShape::Round, 0);
        let third = Table::new_default(TableShape::Square, 2);
        assert_eq!(first.name, "Table 1");
        assert_eq!(first.position, Point::new(50.0, 50.0));
        assert_eq!(third.name, "Table 3");
        assert_eq!(third.position, Point::new(50.0, 250.0));
        assert_eq!(third.seats, 4);
        assert_eq!(third.category, TableCategory::Other);
    }

    #[test]
    fn seats_are_clamped_not_rejected() {
        assert_eq!(clamp_seats(0), 1);
        assert_eq!(clamp_seats(-4), 1);
        assert_eq!(clamp_seats(12), 12);
        assert_eq!(clamp_seats(31), 30);
    }

    #[test]
    fn unparseable_seat_input_is_minimum() {
        assert_eq!(parse_seats("abc"), 1);
        assert_eq!(parse_seats(""), 1);
        assert_eq!(parse_seats(" 6 "), 6);
        assert_eq!(parse_seats("99"), 30);
    }

    #[test]
    fn apply_draft_keeps_position() {
        let mut table = Table::new_default(TableShape::Round, 0);
        let draft = TableDraft {
            name: "Head table".to_string(),
            seats: 45,
            shape: TableShape::Rectangle,
            locked: true,
            reserved: true,
            category: TableCategory::Family,
        };
        table.apply(&draft);
        assert_eq!(table.name, "Head table");
        assert_eq!(table.seats, 30);
        assert_eq!(table.shape, TableShape::Rectangle);
        assert!(table.locked && table.reserved);
        assert_eq!(table.position, Point::new(50.0, 50.0));
    }

    #[test]
    fn shape_serializes_snake_case() {
        let json = serde_json::to_string(&TableShape::Rectangle).unwrap_or_default();
        assert_eq!(json, "\"rectangle\"");
        let json = serde_json::to_string(&TableCategory::Bridesmaids).unwrap_or_default();
        assert_eq!(json, "\"bridesmaids\"");
    }

    #[test]
    fn categories_have_labels_and_colors() {
        for category in TableCategory::ALL {
            assert!(!category.label().is_empty());
            assert!(category.color().starts_with('#'));
        }
    }
}
