use serde::Serialize;
use tracing::{debug, warn};

use crate::editor::ids::IdGenerator;
use crate::editor::skills::parse_skills;
use crate::editor::template::initial_document;
use crate::models::cv::{
    CvDocument, Education, Experience, ItemId, Project, ScalarField, SectionField, SectionItem,
    SectionKind,
};

/// Result of an index-addressed section edit. An index past the end is not an
/// error: the edit is skipped and reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EditOutcome {
    Applied,
    OutOfBounds { index: usize, len: usize },
}

impl EditOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }
}

/// Owns the single CV document and the id generator for its section items.
#[derive(Debug)]
pub struct CvEditor {
    document: CvDocument,
    ids: IdGenerator,
}

impl Default for CvEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl CvEditor {
    pub fn new() -> Self {
        Self {
            document: initial_document(),
            ids: IdGenerator::new(),
        }
    }

    pub fn document(&self) -> &CvDocument {
        &self.document
    }

    /// Drops all edits and starts over from the template. The id generator is
    /// kept, so ids handed out after a reset still never collide.
    pub fn reset(&mut self) {
        self.document = initial_document();
        debug!("CV document reset to template");
    }

    pub fn set_field(&mut self, field: ScalarField, value: String) {
        let doc = &mut self.document;
        let slot = match field {
            ScalarField::Name => &mut doc.name,
            ScalarField::Email => &mut doc.email,
            ScalarField::Phone => &mut doc.phone,
            ScalarField::Linkedin => &mut doc.linkedin,
            ScalarField::Summary => &mut doc.summary,
        };
        *slot = value;
    }

    /// Replaces the skills wholesale from comma-separated input.
    pub fn set_skills(&mut self, raw: &str) {
        self.document.skills = parse_skills(raw);
    }

    /// Appends a blank item to `section` and returns its freshly assigned id.
    pub fn add_item(&mut self, section: SectionKind) -> ItemId {
        let id = self.ids.next_id();
        let doc = &mut self.document;
        match section {
            SectionKind::Experience => doc.experience.push(Experience::blank(id)),
            SectionKind::Education => doc.education.push(Education::blank(id)),
            SectionKind::Projects => doc.projects.push(Project::blank(id)),
        }
        debug!(section = %section, id, "section item added");
        id
    }

    /// Sets one field on the item at `index` in the field's section.
    pub fn update_item(&mut self, index: usize, field: SectionField, value: String) -> EditOutcome {
        let doc = &mut self.document;
        let outcome = match field {
            SectionField::Experience(f) => update_at(&mut doc.experience, index, f, value),
            SectionField::Education(f) => update_at(&mut doc.education, index, f, value),
            SectionField::Projects(f) => update_at(&mut doc.projects, index, f, value),
        };
        log_skipped(field.section(), "update", outcome);
        outcome
    }

    /// Removes the item at `index`; later items shift down one position.
    pub fn remove_item(&mut self, section: SectionKind, index: usize) -> EditOutcome {
        let doc = &mut self.document;
        let removed = match section {
            SectionKind::Experience => remove_at(&mut doc.experience, index),
            SectionKind::Education => remove_at(&mut doc.education, index),
            SectionKind::Projects => remove_at(&mut doc.projects, index),
        };
        let outcome = match removed {
            Ok(id) => {
                debug!(section = %section, index, id, "section item removed");
                EditOutcome::Applied
            }
            Err(outcome) => outcome,
        };
        log_skipped(section, "remove", outcome);
        outcome
    }
}

fn update_at<T: SectionItem>(
    items: &mut [T],
    index: usize,
    field: T::Field,
    value: String,
) -> EditOutcome {
    let len = items.len();
    match items.get_mut(index) {
        Some(item) => {
            item.set(field, value);
            EditOutcome::Applied
        }
        None => EditOutcome::OutOfBounds { index, len },
    }
}

/// Removes `items[index]` and returns its id.
fn remove_at<T: SectionItem>(
    items: &mut Vec<T>,
    index: usize,
) -> Result<ItemId, EditOutcome> {
    if index < items.len() {
        Ok(items.remove(index).id())
    } else {
        Err(EditOutcome::OutOfBounds {
            index,
            len: items.len(),
        })
    }
}

fn log_skipped(section: SectionKind, op: &str, outcome: EditOutcome) {
    if let EditOutcome::OutOfBounds { index, len } = outcome {
        warn!(section = %section, index, len, "{op} skipped: index out of bounds");
    }
}
