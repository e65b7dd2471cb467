//! Speeches on the event programme, read-only for the seating editor.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SpeechId, TableId};

/// Progress of a speech during the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpeechStatus {
    /// Scheduled, not started.
    Ready,
    /// The speaker is on now.
    Speaking,
    /// Finished.
    Done,
}

/// A scheduled speech, optionally linked to the speaker's table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Speech {
    /// Unique speech id.
    pub id: SpeechId,
    /// Name of the speaker.
    pub speaker_name: String,
    /// Speaker role, e.g. `"Best man"`.
    #[serde(default)]
    pub role: String,
    /// Planned start time as entered by the couple.
    #[serde(default)]
    pub time: String,
    /// Position in the programme.
    #[serde(default)]
    pub order: u32,
    /// Progress marker.
    #[serde(default)]
    pub status: Option<SpeechStatus>,
    /// Table the speaker is seated at.
    #[serde(default)]
    pub table_id: Option<TableId>,
    /// Planned duration.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Speech {
    /// Returns `true` while the speaker is on.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.status == Some(SpeechStatus::Speaking)
    }
}
