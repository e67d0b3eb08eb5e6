use serde::{Deserialize, Serialize};

/// Everything the user entered, in the order it should be printed.
///
/// Built once per request (by the form handler or the JSON endpoint) and only
/// ever read by the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: String,
    pub contact: Contact,
    pub summary: String,
    pub experience: Vec<JobEntry>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub graduation_year: String,
}

impl JobEntry {
    /// `"{title} - {company}"`, the first line printed for a job.
    pub fn heading(&self) -> String {
        format!("{} - {}", self.title, self.company)
    }

    /// `"{start_date} - {end_date}"`.
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.start_date, self.end_date)
    }
}

impl EducationEntry {
    /// `"{degree} - {institution}"`, the first line printed for an education entry.
    pub fn heading(&self) -> String {
        format!("{} - {}", self.degree, self.institution)
    }
}
