//! Novelty Model
//!
//! Absence requests submitted by a parent from the calendar. A novelty is
//! created as `Pending` and is only kept in memory: nothing persists it and
//! nothing reconciles it with the exception list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review state of a novelty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoveltyStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl NoveltyStatus {
    /// Badge text shown next to the novelty
    pub fn display_name(&self) -> &'static str {
        match self {
            NoveltyStatus::Pending => "Pendiente",
            NoveltyStatus::Confirmed => "Confirmada",
            NoveltyStatus::Rejected => "Rechazada",
        }
    }
}

/// A parent-submitted absence request for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Novelty {
    pub id: Uuid,
    pub date: NaiveDate,
    pub child_ids: Vec<String>,
    pub note: String,
    pub status: NoveltyStatus,
    pub created_at: DateTime<Utc>,
}

impl Novelty {
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    pub fn concerns(&self, child_id: &str) -> bool {
        self.child_ids.iter().any(|id| id == child_id)
    }
}

/// Novelty validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoveltyError {
    #[error("Select at least one student")]
    NoChildrenSelected,

    #[error("The novelty note cannot be empty")]
    EmptyNote,

    #[error("No calendar day selected")]
    NoDateSelected,

    #[error("Unknown student: {0}")]
    UnknownChild(String),
}

/// The novelty form: which children are ticked and what the note says
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoveltyDraft {
    selected_children: Vec<String>,
    note: String,
}

impl NoveltyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft from an already collected selection
    pub fn from_parts(child_ids: Vec<String>, note: impl Into<String>) -> Self {
        let mut draft = Self::new();
        for id in child_ids {
            if !draft.is_selected(&id) {
                draft.selected_children.push(id);
            }
        }
        draft.note = note.into();
        draft
    }

    /// Tick the child if unticked, untick otherwise
    pub fn toggle_child(&mut self, child_id: &str) {
        if let Some(position) = self.selected_children.iter().position(|id| id == child_id) {
            self.selected_children.remove(position);
        } else {
            self.selected_children.push(child_id.to_string());
        }
    }

    pub fn is_selected(&self, child_id: &str) -> bool {
        self.selected_children.iter().any(|id| id == child_id)
    }

    pub fn selected_children(&self) -> &[String] {
        &self.selected_children
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn validate(&self) -> Result<(), NoveltyError> {
        if self.selected_children.is_empty() {
            return Err(NoveltyError::NoChildrenSelected);
        }
        if self.note.trim().is_empty() {
            return Err(NoveltyError::EmptyNote);
        }
        Ok(())
    }

    /// Turn the draft into a pending novelty for `date`
    pub fn submit(self, date: NaiveDate, now: DateTime<Utc>) -> Result<Novelty, NoveltyError> {
        self.validate()?;

        Ok(Novelty {
            id: Uuid::new_v4(),
            date,
            child_ids: self.selected_children,
            note: self.note.trim().to_string(),
            status: NoveltyStatus::Pending,
            created_at: now,
        })
    }
}

/// Append-only list of the novelties submitted so far
#[derive(Debug, Clone, Default)]
pub struct NoveltyBook {
    novelties: Vec<Novelty>,
}

impl NoveltyBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and record a draft. Nothing is recorded on error.
    pub fn submit(
        &mut self,
        draft: NoveltyDraft,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Novelty, NoveltyError> {
        let novelty = draft.submit(date, now)?;
        self.novelties.push(novelty.clone());
        Ok(novelty)
    }

    pub fn all(&self) -> &[Novelty] {
        &self.novelties
    }

    pub fn len(&self) -> usize {
        self.novelties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.novelties.is_empty()
    }
}
