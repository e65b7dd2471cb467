//! Seat assignment rules and per-table groupings.
//!
//! Everything here is derived from the full guest list on demand. Guest lists
//! are wedding-sized, so occupancy is recounted instead of cached.

use std::collections::HashMap;

use super::{Guest, GuestId, SeatingError, Speech, Table, TableId};

/// Number of guests seated at `table_id`.
#[must_use]
pub fn occupancy(guests: &[Guest], table_id: TableId) -> usize {
    guests.iter().filter(|g| g.is_seated_at(table_id)).count()
}

/// Guests grouped by the table they sit at, in guest-list order.
#[must_use]
pub fn guests_by_table(guests: &[Guest]) -> HashMap<TableId, Vec<&Guest>> {
    let mut map: HashMap<TableId, Vec<&Guest>> = HashMap::new();
    for guest in guests {
        if let Some(table_id) = guest.table_id {
            map.entry(table_id).or_default().push(guest);
        }
    }
    map
}

/// Speeches grouped by the speaker's table.
#[must_use]
pub fn speeches_by_table(speeches: &[Speech]) -> HashMap<TableId, Vec<&Speech>> {
    let mut map: HashMap<TableId, Vec<&Speech>> = HashMap::new();
    for speech in speeches {
        if let Some(table_id) = speech.table_id {
            map.entry(table_id).or_default().push(speech);
        }
    }
    map
}

/// Unassigned guests whose name contains `query`, case-insensitively.
/// An empty query matches every unassigned guest.
#[must_use]
pub fn unassigned<'a>(guests: &'a [Guest], query: &str) -> Vec<&'a Guest> {
    let needle = query.trim().to_lowercase();
    guests
        .iter()
        .filter(|g| g.is_unassigned())
        .filter(|g| needle.is_empty() || g.name.to_lowercase().contains(&needle))
        .collect()
}

/// Seats a guest, returning the updated guest list.
///
/// # Errors
///
/// Returns [`SeatingError::TableNotFound`] or
/// [`SeatingError::GuestNotFound`] for unknown ids, and
/// [`SeatingError::TableFull`] when every seat is taken. The input slices
/// are never modified.
pub fn assign(
    tables: &[Table],
    guests: &[Guest],
    guest_id: GuestId,
    table_id: TableId,
) -> Result<Vec<Guest>, SeatingError> {
    let table = tables
        .iter()
        .find(|t| t.id == table_id)
        .ok_or(SeatingError::TableNotFound(table_id))?;
    if !guests.iter().any(|g| g.id == guest_id) {
        return Err(SeatingError::GuestNotFound(guest_id));
    }

    let seats = usize::try_from(table.seats).unwrap_or(usize::MAX);
    if occupancy(guests, table_id) >= seats {
        return Err(SeatingError::TableFull {
            table_id,
            seats: table.seats,
        });
    }

    Ok(guests
        .iter()
        .map(|g| {
            if g.id == guest_id {
                Guest {
                    table_id: Some(table_id),
                    ..g.clone()
                }
            } else {
                g.clone()
            }
        })
        .collect())
}

/// Clears a guest's table, returning the updated guest list.
///
/// # Errors
///
/// Returns [`SeatingError::GuestNotFound`] for unknown ids.
pub fn unassign(guests: &[Guest], guest_id: GuestId) -> Result<Vec<Guest>, SeatingError> {
    if !guests.iter().any(|g| g.id == guest_id) {
        return Err(SeatingError::GuestNotFound(guest_id));
    }
    Ok(guests
        .iter()
        .map(|g| {
            if g.id == guest_id {
                Guest {
                    table_id: None,
                    ..g.clone()
                }
            } else {
                g.clone()
            }
        })
        .collect())
}

/// Removes a table and unseats everyone at it.
///
/// # Errors
///
/// Returns [`SeatingError::TableNotFound`] for unknown ids.
pub fn delete_table(
    tables: &[Table],
    guests: &[Guest],
    table_id: TableId,
) -> Result<(Vec<Table>, Vec<Guest>), SeatingError> {
    if !tables.iter().any(|t| t.id == table_id) {
        return Err(SeatingError::TableNotFound(table_id));
    }
    let guests = guests
        .iter()
        .map(|g| {
            if g.is_seated_at(table_id) {
                Guest {
                    table_id: None,
                    ..g.clone()
                }
            } else {
                g.clone()
            }
        })
        .collect();
    let tables = tables.iter().filter(|t| t.id != table_id).cloned().collect();
    Ok((tables, guests))
}

/// Confirmation prompt shown before deleting a table.
#[must_use]
pub fn delete_prompt(guests: &[Guest], table_id: TableId) -> String {
    match occupancy(guests, table_id) {
        0 => "Remove this table?".to_string(),
        1 => "This table has 1 assigned guest. All guests will be unassigned.".to_string(),
        n => format!("This table has {n} assigned guests. All guests will be unassigned."),
    }
}
