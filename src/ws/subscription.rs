//! Per-connection subscription manager.
//!
//! Tracks which chart IDs a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::ChartId;

/// Parses client-supplied chart ids. Returns the valid ids and whether the
/// `"*"` wildcard was present; malformed ids are skipped.
#[must_use]
pub fn parse_chart_ids(raw: &[String]) -> (Vec<ChartId>, bool) {
    let mut ids = Vec::with_capacity(raw.len());
    let mut wildcard = false;
    for s in raw {
        if s == "*" {
            wildcard = true;
        } else if let Ok(uuid) = s.parse::<uuid::Uuid>() {
            ids.push(ChartId::from_uuid(uuid));
        }
    }
    (ids, wildcard)
}

/// Manages the set of chart subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed chart IDs. If `subscribe_all` is true, this set is ignored.
    chart_ids: HashSet<ChartId>,
    /// Whether the client subscribes to all charts (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds chart IDs to the subscription set and optionally enables the
    /// wildcard.
    pub fn subscribe(&mut self, ids: &[ChartId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for id in ids {
            self.chart_ids.insert(*id);
        }
    }

    /// Removes chart IDs from the subscription set. `wildcard` also turns
    /// the wildcard off.
    pub fn unsubscribe(&mut self, ids: &[ChartId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for id in ids {
            self.chart_ids.remove(id);
        }
    }

    /// Returns `true` if the given chart ID matches the subscription filter.
    #[must_use]
    pub fn matches(&self, chart_id: ChartId) -> bool {
        self.subscribe_all || self.chart_ids.contains(&chart_id)
    }

    /// Returns the number of explicitly subscribed chart IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.chart_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(ChartId::new()));
    }

    #[test]
    fn subscribe_specific_chart() {
        let mut mgr = SubscriptionManager::new();
        let id = ChartId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        assert!(!mgr.matches(ChartId::new()));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(ChartId::new()));
        assert!(mgr.matches(ChartId::new()));
    }

    #[test]
    fn unsubscribe_removes_chart() {
        let mut mgr = SubscriptionManager::new();
        let id = ChartId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        mgr.unsubscribe(&[id], false);
        assert!(!mgr.matches(id));
    }

    #[test]
    fn unsubscribe_wildcard_turns_it_off() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
        assert!(!mgr.matches(ChartId::new()));
    }

    #[test]
    fn parse_skips_malformed_ids() {
        let id = ChartId::new();
        let (ids, wildcard) =
            parse_chart_ids(&[id.to_string(), "not-a-uuid".to_string(), "*".to_string()]);
        assert_eq!(ids, vec![id]);
        assert!(wildcard);
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(&[ChartId::new(), ChartId::new()], false);
        assert_eq!(mgr.count(), 2);
    }
}
