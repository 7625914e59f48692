use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub duration: String,
    pub description: String,
}

/// A scholarly publication, either free text or a structured citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Publication {
    Plain(String),
    Structured {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        year: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        journal: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
}

impl Publication {
    /// Single normalization used for display and prompt assembly:
    /// `title in journal (year)`, omitting the parts that are absent.
    pub fn display_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Structured {
                title,
                year,
                journal,
                ..
            } => {
                let mut out = title.clone();
                if let Some(journal) = journal.as_deref().filter(|j| !j.is_empty()) {
                    out.push_str(" in ");
                    out.push_str(journal);
                }
                if let Some(year) = year.as_deref().filter(|y| !y.is_empty()) {
                    out.push_str(" (");
                    out.push_str(year);
                    out.push(')');
                }
                out
            }
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Structured { link, .. } => link.as_deref(),
        }
    }
}

/// Join normalized publication texts with `separator`.
pub fn join_publications(publications: &[Publication], separator: &str) -> String {
    publications
        .iter()
        .map(Publication::display_text)
        .collect::<Vec<_>>()
        .join(separator)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    pub name: String,
    pub designation: String,
    pub qualification: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub research_interests: Vec<String>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub research_papers: Vec<String>,
    #[serde(default)]
    pub conferences: Vec<String>,
}

const AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

impl FacultyMember {
    /// Fixture bio, if the record carries a non-blank one.
    pub fn fixture_bio(&self) -> Option<&str> {
        self.bio.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Explicit portrait, or a generated placeholder avatar in brand colors.
    pub fn avatar_url(&self) -> String {
        if let Some(image) = self.image.as_deref().filter(|i| !i.trim().is_empty()) {
            return image.to_string();
        }

        // Percent-encode spaces (`%20`), not the form-style `+`.
        let name = url::form_urlencoded::byte_serialize(self.name.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        format!(
            "{AVATAR_BASE_URL}?name={name}&background=004d2c&color=ffffff&size=256&bold=true&font-size=0.33"
        )
    }

    /// Family name used in placeholder copy ("Dr. Khan has ...").
    pub fn surname(&self) -> &str {
        self.name.split_whitespace().last().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub faculty: String,
    pub image: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub head_of_department: Option<String>,
    #[serde(default)]
    pub research_areas: Vec<String>,
    #[serde(default)]
    pub programs_offered: Vec<Program>,
    #[serde(default)]
    pub faculty_members: Vec<FacultyMember>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

impl Department {
    pub fn faculty_member(&self, name: &str) -> Option<&FacultyMember> {
        self.faculty_members.iter().find(|m| m.name == name)
    }

    /// Case-insensitive substring match on department or faculty name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.faculty.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum NewsCategory {
    Event,
    Notice,
    Result,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub date: String,
    pub category: NewsCategory,
    pub excerpt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum StatIcon {
    Users,
    GraduationCap,
    BookOpen,
    Building2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatItem {
    pub label: String,
    pub value: String,
    pub icon: StatIcon,
}
