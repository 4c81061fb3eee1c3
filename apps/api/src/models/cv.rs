use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier of a repeatable-section item. Unique within its section and
/// never reused; it carries list identity only, not domain meaning.
pub type ItemId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: ItemId,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: ItemId,
    pub degree: String,
    pub university: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub link: String,
}

/// The CV being edited. Exactly one exists per editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvDocument {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub summary: String,
    /// Insertion order is display order. May hold empty segments.
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
}

impl CvDocument {
    /// Skills that render as tags: stored order, empty segments dropped.
    pub fn visible_skills(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .map(String::as_str)
            .filter(|skill| !skill.is_empty())
    }

    /// The comma-joined form shown back in the skills input.
    pub fn skills_input(&self) -> String {
        self.skills.join(", ")
    }

    pub fn section_len(&self, section: SectionKind) -> usize {
        match section {
            SectionKind::Experience => self.experience.len(),
            SectionKind::Education => self.education.len(),
            SectionKind::Projects => self.projects.len(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field selectors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    Projects,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Projects => "projects",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_name(s).ok_or_else(|| format!("unknown section '{s}'"))
    }
}

/// Top-level text fields of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    Name,
    Email,
    Phone,
    Linkedin,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    Title,
    Company,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    Degree,
    University,
    StartDate,
    EndDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Name,
    Description,
    Link,
}

/// A field of one specific section. The variant fixes the section, so a
/// selector can never address a field the section does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionField {
    Experience(ExperienceField),
    Education(EducationField),
    Projects(ProjectField),
}

impl SectionField {
    /// Resolves a wire field name within `section`. `None` if the section has
    /// no such field.
    pub fn parse(section: SectionKind, name: &str) -> Option<Self> {
        match section {
            SectionKind::Experience => parse_name(name).map(SectionField::Experience),
            SectionKind::Education => parse_name(name).map(SectionField::Education),
            SectionKind::Projects => parse_name(name).map(SectionField::Projects),
        }
    }

    pub fn section(&self) -> SectionKind {
        match self {
            SectionField::Experience(_) => SectionKind::Experience,
            SectionField::Education(_) => SectionKind::Education,
            SectionField::Projects(_) => SectionKind::Projects,
        }
    }
}

/// Field-name lookup through the serde renames, so wire names are declared once.
fn parse_name<T: DeserializeOwned>(name: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Section items
// ────────────────────────────────────────────────────────────────────────────

/// Common shape of the records held by a section.
pub trait SectionItem {
    type Field: Copy;

    /// A record with the given id and every other field empty.
    fn blank(id: ItemId) -> Self;
    fn id(&self) -> ItemId;
    fn set(&mut self, field: Self::Field, value: String);
}

impl SectionItem for Experience {
    type Field = ExperienceField;

    fn blank(id: ItemId) -> Self {
        Experience {
            id,
            title: String::new(),
            company: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Title => self.title = value,
            ExperienceField::Company => self.company = value,
            ExperienceField::StartDate => self.start_date = value,
            ExperienceField::EndDate => self.end_date = value,
            ExperienceField::Description => self.description = value,
        }
    }
}

impl SectionItem for Education {
    type Field = EducationField;

    fn blank(id: ItemId) -> Self {
        Education {
            id,
            degree: String::new(),
            university: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Degree => self.degree = value,
            EducationField::University => self.university = value,
            EducationField::StartDate => self.start_date = value,
            EducationField::EndDate => self.end_date = value,
        }
    }
}

impl SectionItem for Project {
    type Field = ProjectField;

    fn blank(id: ItemId) -> Self {
        Project {
            id,
            name: String::new(),
            description: String::new(),
            link: String::new(),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set(&mut self, field: ProjectField, value: String) {
        match field {
            ProjectField::Name => self.name = value,
            ProjectField::Description => self.description = value,
            ProjectField::Link => self.link = value,
        }
    }
}
