//! Assembles a `ResumeRecord` from the flat fields the HTML form posts.
//!
//! Repeated sections arrive as `title_0`, `company_0`, ... with the number of
//! groups in `num_experience` / `num_education`. The form always asks for at
//! least one group of each, so an untouched form yields one empty job and one
//! empty education entry; the layout prints those as blank lines.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;
use crate::models::resume::{Contact, EducationEntry, JobEntry, ResumeRecord};

/// Upper bound on repeated groups accepted from one submission.
pub const MAX_ENTRIES: usize = 50;

pub const PROFILE_IMAGE_FIELD: &str = "profile_image";

#[derive(Debug, Default)]
pub struct ResumeForm {
    fields: HashMap<String, String>,
    profile_image: Option<Bytes>,
}

impl ResumeForm {
    /// Drains a multipart upload. The picture stays in memory for the
    /// lifetime of the form and is never staged on disk.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ResumeForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == PROFILE_IMAGE_FIELD {
                form.set_profile_image(field.bytes().await?);
            } else {
                let value = field.text().await?;
                form.insert_field(name, value);
            }
        }
        Ok(form)
    }

    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// An empty file part means the user did not pick a picture.
    pub fn set_profile_image(&mut self, bytes: Bytes) {
        self.profile_image = if bytes.is_empty() { None } else { Some(bytes) };
    }

    pub fn into_parts(self) -> (ResumeRecord, Option<Bytes>) {
        let record = self.to_record();
        (record, self.profile_image)
    }

    pub fn to_record(&self) -> ResumeRecord {
        let experience = (0..self.count("num_experience"))
            .map(|i| JobEntry {
                title: self.field(&format!("title_{i}")),
                company: self.field(&format!("company_{i}")),
                start_date: self.field(&format!("start_date_{i}")),
                end_date: self.field(&format!("end_date_{i}")),
                description: self.field(&format!("description_{i}")),
            })
            .collect();

        let education = (0..self.count("num_education"))
            .map(|i| EducationEntry {
                degree: self.field(&format!("degree_{i}")),
                institution: self.field(&format!("institution_{i}")),
                graduation_year: self.field(&format!("graduation_year_{i}")),
            })
            .collect();

        ResumeRecord {
            name: self.field("name"),
            contact: Contact {
                email: self.field("email"),
                phone: self.field("phone"),
                address: self.field("address"),
            },
            summary: self.field("summary"),
            experience,
            education,
        }
    }

    fn field(&self, key: &str) -> String {
        self.fields.get(key).cloned().unwrap_or_default()
    }

    /// Group count, defaulting to 1 and clamped to `1..=MAX_ENTRIES`.
    fn count(&self, key: &str) -> usize {
        self.fields
            .get(key)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_ENTRIES)
    }
}
