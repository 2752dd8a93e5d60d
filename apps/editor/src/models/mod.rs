pub mod document;

pub use document::{
    split_skills, Document, EducationEntry, ExperienceEntry, PartialDocument, PersonalInfo,
    TemplateId, PERSONAL_TEXT_FIELDS,
};
