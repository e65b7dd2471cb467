//! Measured table rectangles for pointer hit-testing.
//!
//! [`HitTestIndex`] keeps the last measured rectangle per table in
//! insertion order. A point query returns the first rectangle that contains
//! the point, so when tables overlap the one measured first wins.

use super::TableId;
use super::geometry::{Point, Rect, Size};

/// Insertion-ordered map from table id to its last measured rectangle.
#[derive(Debug, Clone, Default)]
pub struct HitTestIndex {
    entries: Vec<(TableId, Rect)>,
}

impl HitTestIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a measurement. Re-measuring a table updates it in place and
    /// keeps its original position in the iteration order.
    pub fn measure(&mut self, table_id: TableId, rect: Rect) {
        match self.entries.iter_mut().find(|(id, _)| *id == table_id) {
            Some((_, existing)) => *existing = rect,
            None => self.entries.push((table_id, rect)),
        }
    }

    /// Moves a table's rectangle to `origin`, keeping its measured size.
    /// Unmeasured tables get `fallback` as their size.
    pub fn move_to(&mut self, table_id: TableId, origin: Point, fallback: Size) {
        let size = self.get(table_id).map_or(fallback, |rect| rect.size());
        self.measure(table_id, Rect::from_origin(origin, size));
    }

    /// Forgets a table.
    pub fn remove(&mut self, table_id: TableId) {
        self.entries.retain(|(id, _)| *id != table_id);
    }

    /// Forgets every table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the last measured rectangle for a table.
    #[must_use]
    pub fn get(&self, table_id: TableId) -> Option<Rect> {
        self.entries
            .iter()
            .find(|(id, _)| *id == table_id)
            .map(|(_, rect)| *rect)
    }

    /// Returns the first table whose rectangle contains `point`.
    #[must_use]
    pub fn hit(&self, point: Point) -> Option<TableId> {
        self.entries
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, _)| *id)
    }

    /// Number of measured tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been measured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64) -> Rect {
        Rect::from_origin(Point::new(x, y), Size::new(120.0, 100.0))
    }

    #[test]
    fn hit_finds_containing_table() {
        let mut index = HitTestIndex::new();
        let a = TableId::new();
        let b = TableId::new();
        index.measure(a, rect(0.0, 0.0));
        index.measure(b, rect(200.0, 0.0));

        assert_eq!(index.hit(Point::new(250.0, 50.0)), Some(b));
        assert_eq!(index.hit(Point::new(60.0, 99.0)), Some(a));
        assert_eq!(index.hit(Point::new(150.0, 50.0)), None);
    }

    #[test]
    fn overlap_resolves_to_first_measured() {
        let mut index = HitTestIndex::new();
        let first = TableId::new();
        let second = TableId::new();
        index.measure(first, rect(0.0, 0.0));
        index.measure(second, rect(60.0, 50.0));

        assert_eq!(index.hit(Point::new(100.0, 80.0)), Some(first));

        // re-measuring keeps the original order
        index.measure(first, rect(0.0, 0.0));
        assert_eq!(index.hit(Point::new(100.0, 80.0)), Some(first));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn move_keeps_measured_size() {
        let mut index = HitTestIndex::new();
        let id = TableId::new();
        index.measure(id, Rect::from_origin(Point::default(), Size::new(80.0, 80.0)));
        index.move_to(id, Point::new(40.0, 40.0), Size::new(120.0, 100.0));

        assert_eq!(
            index.get(id),
            Some(Rect::from_origin(Point::new(40.0, 40.0), Size::new(80.0, 80.0)))
        );
    }

    #[test]
    fn move_unmeasured_uses_fallback() {
        let mut index = HitTestIndex::new();
        let id = TableId::new();
        index.move_to(id, Point::new(8.0, 16.0), Size::new(120.0, 100.0));
        assert_eq!(index.get(id), Some(rect(8.0, 16.0)));
    }

    #[test]
    fn removed_tables_no_longer_hit() {
        let mut index = HitTestIndex::new();
        let id = TableId::new();
        index.measure(id, rect(0.0, 0.0));
        index.remove(id);
        assert!(index.is_empty());
        assert_eq!(index.hit(Point::new(10.0, 10.0)), None);
    }
}
