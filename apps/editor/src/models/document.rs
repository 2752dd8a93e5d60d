use serde::{Deserialize, Serialize};

/// Presentation selector for the preview. Unknown or missing ids resolve to `Modern`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TemplateId {
    #[default]
    Modern,
    Executive,
    Creative,
    Minimalist,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Modern,
        TemplateId::Executive,
        TemplateId::Creative,
        TemplateId::Minimalist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Executive => "executive",
            TemplateId::Creative => "creative",
            TemplateId::Minimalist => "minimalist",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "executive" => TemplateId::Executive,
            "creative" => TemplateId::Creative,
            "minimalist" => TemplateId::Minimalist,
            _ => TemplateId::Modern,
        }
    }
}

impl From<String> for TemplateId {
    fn from(raw: String) -> Self {
        TemplateId::parse(&raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub website: String,
    pub location: String,
    pub headline: String,
    /// JPEG data URI produced by the photo pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Keys addressable as `personal.<key>` by the field binder.
pub const PERSONAL_TEXT_FIELDS: &[&str] = &[
    "fullName", "email", "phone", "linkedin", "website", "location", "headline",
];

impl PersonalInfo {
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "fullName" => Some(&self.full_name),
            "email" => Some(&self.email),
            "phone" => Some(&self.phone),
            "linkedin" => Some(&self.linkedin),
            "website" => Some(&self.website),
            "location" => Some(&self.location),
            "headline" => Some(&self.headline),
            _ => None,
        }
    }

    /// Returns a copy with one text key overwritten, or `None` for an unknown key.
    pub fn with_field(&self, key: &str, value: String) -> Option<Self> {
        let mut next = self.clone();
        match key {
            "fullName" => next.full_name = value,
            "email" => next.email = value,
            "phone" => next.phone = value,
            "linkedin" => next.linkedin = value,
            "website" => next.website = value,
            "location" => next.location = value,
            "headline" => next.headline = value,
            _ => return None,
        }
        Some(next)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: i64,
    pub school: String,
    pub degree: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
}

/// The résumé aggregate. Always fully defined: missing persisted keys are backfilled
/// from [`Document::sample`] during load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: String,
    pub template: TemplateId,
    pub resume_title: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::sample()
    }
}

impl Document {
    /// Built-in sample résumé shown on first start.
    pub fn sample() -> Self {
        Self {
            personal: PersonalInfo {
                full_name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: "+1 234 567 890".to_string(),
                linkedin: "linkedin.com/in/johndoe".to_string(),
                website: "johndoe.com".to_string(),
                location: "New York, NY".to_string(),
                headline: "Senior Software Engineer".to_string(),
                photo: None,
            },
            experience: vec![ExperienceEntry {
                id: 1,
                company: "Tech Corp".to_string(),
                role: "Senior Developer".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "2020-01".to_string(),
                end_date: "Present".to_string(),
                description: "• Led a team of 5 developers\n• Architected microservices"
                    .to_string(),
            }],
            education: vec![EducationEntry {
                id: 1,
                school: "University of Tech".to_string(),
                degree: "B.S. CS".to_string(),
                location: "Boston, MA".to_string(),
                start_date: "2015".to_string(),
                end_date: "2019".to_string(),
            }],
            skills: "JavaScript, React, Node.js".to_string(),
            template: TemplateId::Modern,
            resume_title: String::new(),
        }
    }

    /// Comma-separated skills, trimmed, empty tokens dropped.
    pub fn skill_list(&self) -> Vec<&str> {
        split_skills(&self.skills)
    }
}

pub fn split_skills(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shallow top-level update. Each present key replaces the whole value;
/// nested objects must be merged by the caller first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialDocument {
    pub personal: Option<PersonalInfo>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub skills: Option<String>,
    pub template: Option<TemplateId>,
    pub resume_title: Option<String>,
}

impl PartialDocument {
    pub fn personal(personal: PersonalInfo) -> Self {
        Self {
            personal: Some(personal),
            ..Default::default()
        }
    }

    pub fn experience(entries: Vec<ExperienceEntry>) -> Self {
        Self {
            experience: Some(entries),
            ..Default::default()
        }
    }

    pub fn education(entries: Vec<EducationEntry>) -> Self {
        Self {
            education: Some(entries),
            ..Default::default()
        }
    }

    pub fn skills(skills: String) -> Self {
        Self {
            skills: Some(skills),
            ..Default::default()
        }
    }

    pub fn template(template: TemplateId) -> Self {
        Self {
            template: Some(template),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the present keys over `base`, leaving the rest untouched.
    pub fn merge_into(self, base: &Document) -> Document {
        Document {
            personal: self.personal.unwrap_or_else(|| base.personal.clone()),
            experience: self.experience.unwrap_or_else(|| base.experience.clone()),
            education: self.education.unwrap_or_else(|| base.education.clone()),
            skills: self.skills.unwrap_or_else(|| base.skills.clone()),
            template: self.template.unwrap_or(base.template),
            resume_title: self.resume_title.unwrap_or_else(|| base.resume_title.clone()),
        }
    }
}
