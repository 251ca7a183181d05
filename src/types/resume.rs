// src/types/resume.rs
//! Structured resume content as the polish service returns it, plus the
//! typed field addresses the editor writes through.

use serde::{Deserialize, Serialize};

use crate::error::EditError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeData {
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub duration: String,
    pub location: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub graduation: String,
    pub location: Option<String>,
    pub details: Option<String>,
}

/// Address of one editable location in a [`ResumeData`].
///
/// The editor holds at most one of these at a time; `get` reads the
/// current value and `set` writes exactly that location. Indexed variants
/// fail with [`EditError::StaleIndex`] instead of touching anything when
/// the entry they point at is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    ContactName,
    ContactEmail,
    ContactPhone,
    ContactLocation,
    ContactLinkedin,
    ContactWebsite,
    Summary,
    ExperienceTitle(usize),
    ExperienceCompany(usize),
    ExperienceDuration(usize),
    ExperienceLocation(usize),
    /// Achievement `item` of experience entry `entry`.
    Achievement { entry: usize, item: usize },
    EducationDegree(usize),
    EducationSchool(usize),
    EducationGraduation(usize),
    EducationDetails(usize),
    Skill(usize),
    Certification(usize),
}

impl EditableField {
    /// Short section label for edit prompts and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            EditableField::ContactName => "name",
            EditableField::ContactEmail => "email",
            EditableField::ContactPhone => "phone",
            EditableField::ContactLocation => "location",
            EditableField::ContactLinkedin => "linkedin",
            EditableField::ContactWebsite => "website",
            EditableField::Summary => "summary",
            EditableField::ExperienceTitle(_) => "job title",
            EditableField::ExperienceCompany(_) => "company",
            EditableField::ExperienceDuration(_) => "duration",
            EditableField::ExperienceLocation(_) => "job location",
            EditableField::Achievement { .. } => "achievement",
            EditableField::EducationDegree(_) => "degree",
            EditableField::EducationSchool(_) => "school",
            EditableField::EducationGraduation(_) => "graduation",
            EditableField::EducationDetails(_) => "details",
            EditableField::Skill(_) => "skill",
            EditableField::Certification(_) => "certification",
        }
    }

    /// Read the current value of this field. Optional fields read as the
    /// empty string so the editor can prefill its input.
    pub fn get(&self, resume: &ResumeData) -> Result<String, EditError> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();

        match *self {
            EditableField::ContactName => Ok(resume.contact_info.name.clone()),
            EditableField::ContactEmail => Ok(opt(&resume.contact_info.email)),
            EditableField::ContactPhone => Ok(opt(&resume.contact_info.phone)),
            EditableField::ContactLocation => Ok(opt(&resume.contact_info.location)),
            EditableField::ContactLinkedin => Ok(opt(&resume.contact_info.linkedin)),
            EditableField::ContactWebsite => Ok(opt(&resume.contact_info.website)),
            EditableField::Summary => Ok(resume.summary.clone()),
            EditableField::ExperienceTitle(i) => {
                Ok(Self::experience(resume, i)?.title.clone())
            }
            EditableField::ExperienceCompany(i) => {
                Ok(Self::experience(resume, i)?.company.clone())
            }
            EditableField::ExperienceDuration(i) => {
                Ok(Self::experience(resume, i)?.duration.clone())
            }
            EditableField::ExperienceLocation(i) => {
                Ok(opt(&Self::experience(resume, i)?.location))
            }
            EditableField::Achievement { entry, item } => {
                let exp = Self::experience(resume, entry)?;
                exp.achievements
                    .get(item)
                    .cloned()
                    .ok_or(EditError::StaleIndex {
                        section: "achievement",
                        index: item,
                    })
            }
            EditableField::EducationDegree(i) => Ok(Self::education(resume, i)?.degree.clone()),
            EditableField::EducationSchool(i) => Ok(Self::education(resume, i)?.school.clone()),
            EditableField::EducationGraduation(i) => {
                Ok(Self::education(resume, i)?.graduation.clone())
            }
            EditableField::EducationDetails(i) => {
                Ok(opt(&Self::education(resume, i)?.details))
            }
            EditableField::Skill(i) => {
                resume.skills.get(i).cloned().ok_or(EditError::StaleIndex {
                    section: "skill",
                    index: i,
                })
            }
            EditableField::Certification(i) => {
                resume
                    .certifications
                    .get(i)
                    .cloned()
                    .ok_or(EditError::StaleIndex {
                        section: "certification",
                        index: i,
                    })
            }
        }
    }

    /// Write `value` into exactly this field, leaving every other field
    /// untouched. Optional contact fields store an empty value as `None`.
    pub fn set(&self, resume: &mut ResumeData, value: String) -> Result<(), EditError> {
        let as_opt = |v: String| if v.is_empty() { None } else { Some(v) };

        match *self {
            EditableField::ContactName => resume.contact_info.name = value,
            EditableField::ContactEmail => resume.contact_info.email = as_opt(value),
            EditableField::ContactPhone => resume.contact_info.phone = as_opt(value),
            EditableField::ContactLocation => resume.contact_info.location = as_opt(value),
            EditableField::ContactLinkedin => resume.contact_info.linkedin = as_opt(value),
            EditableField::ContactWebsite => resume.contact_info.website = as_opt(value),
            EditableField::Summary => resume.summary = value,
            EditableField::ExperienceTitle(i) => Self::experience_mut(resume, i)?.title = value,
            EditableField::ExperienceCompany(i) => {
                Self::experience_mut(resume, i)?.company = value
            }
            EditableField::ExperienceDuration(i) => {
                Self::experience_mut(resume, i)?.duration = value
            }
            EditableField::ExperienceLocation(i) => {
                Self::experience_mut(resume, i)?.location = as_opt(value)
            }
            EditableField::Achievement { entry, item } => {
                let exp = Self::experience_mut(resume, entry)?;
                let slot = exp
                    .achievements
                    .get_mut(item)
                    .ok_or(EditError::StaleIndex {
                        section: "achievement",
                        index: item,
                    })?;
                *slot = value;
            }
            EditableField::EducationDegree(i) => Self::education_mut(resume, i)?.degree = value,
            EditableField::EducationSchool(i) => Self::education_mut(resume, i)?.school = value,
            EditableField::EducationGraduation(i) => {
                Self::education_mut(resume, i)?.graduation = value
            }
            EditableField::EducationDetails(i) => {
                Self::education_mut(resume, i)?.details = as_opt(value)
            }
            EditableField::Skill(i) => {
                let slot = resume.skills.get_mut(i).ok_or(EditError::StaleIndex {
                    section: "skill",
                    index: i,
                })?;
                *slot = value;
            }
            EditableField::Certification(i) => {
                let slot = resume
                    .certifications
                    .get_mut(i)
                    .ok_or(EditError::StaleIndex {
                        section: "certification",
                        index: i,
                    })?;
                *slot = value;
            }
        }

        Ok(())
    }

    fn experience(resume: &ResumeData, index: usize) -> Result<&ExperienceEntry, EditError> {
        resume.experience.get(index).ok_or(EditError::StaleIndex {
            section: "experience",
            index,
        })
    }

    fn experience_mut(
        resume: &mut ResumeData,
        index: usize,
    ) -> Result<&mut ExperienceEntry, EditError> {
        resume
            .experience
            .get_mut(index)
            .ok_or(EditError::StaleIndex {
                section: "experience",
                index,
            })
    }

    fn education(resume: &ResumeData, index: usize) -> Result<&EducationEntry, EditError> {
        resume.education.get(index).ok_or(EditError::StaleIndex {
            section: "education",
            index,
        })
    }

    fn education_mut(
        resume: &mut ResumeData,
        index: usize,
    ) -> Result<&mut EducationEntry, EditError> {
        resume
            .education
            .get_mut(index)
            .ok_or(EditError::StaleIndex {
                section: "education",
                index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resume() -> ResumeData {
        ResumeData {
            contact_info: ContactInfo {
                name: "Jane Smith".to_string(),
                email: Some("jane@example.com".to_string()),
                phone: None,
                location: Some("Lyon, France".to_string()),
                linkedin: None,
                website: None,
            },
            summary: "Backend engineer.".to_string(),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2019 - 2023".to_string(),
                location: Some("Remote".to_string()),
                achievements: vec!["Shipped the thing".to_string()],
            }],
            education: vec![EducationEntry {
                degree: "MSc".to_string(),
                school: "INSA".to_string(),
                graduation: "2019".to_string(),
                location: None,
                details: None,
            }],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            certifications: vec![],
        }
    }

    #[test]
    fn test_set_touches_only_its_field() {
        let mut resume = sample_resume();
        EditableField::ExperienceTitle(0)
            .set(&mut resume, "Staff Engineer".to_string())
            .unwrap();

        assert_eq!(resume.experience[0].title, "Staff Engineer");
        assert_eq!(resume.experience[0].company, "Acme");
        assert_eq!(resume.experience[0].achievements[0], "Shipped the thing");
        assert_eq!(resume.contact_info.name, "Jane Smith");
        assert_eq!(resume.summary, "Backend engineer.");
    }

    #[test]
    fn test_get_prefills_optional_as_empty() {
        let resume = sample_resume();
        assert_eq!(EditableField::ContactPhone.get(&resume).unwrap(), "");
        assert_eq!(
            EditableField::ContactEmail.get(&resume).unwrap(),
            "jane@example.com"
        );
    }

    #[test]
    fn test_set_optional_empty_clears_to_none() {
        let mut resume = sample_resume();
        EditableField::ContactEmail
            .set(&mut resume, String::new())
            .unwrap();
        assert_eq!(resume.contact_info.email, None);
    }

    #[test]
    fn test_stale_index_leaves_resume_unchanged() {
        let mut resume = sample_resume();
        let before = serde_json::to_string(&resume).unwrap();

        let err = EditableField::Skill(99)
            .set(&mut resume, "Go".to_string())
            .unwrap_err();
        assert!(matches!(err, EditError::StaleIndex { index: 99, .. }));

        let err = EditableField::Achievement { entry: 0, item: 5 }
            .set(&mut resume, "x".to_string())
            .unwrap_err();
        assert!(matches!(err, EditError::StaleIndex { index: 5, .. }));

        assert_eq!(serde_json::to_string(&resume).unwrap(), before);
    }

    #[test]
    fn test_deserialize_tolerates_missing_sections() {
        let json = r#"{
            "contact_info": {"name": "Jane Smith"},
            "summary": "Engineer",
            "improvements_made": ["Tightened wording"]
        }"#;
        let resume: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(resume.contact_info.name, "Jane Smith");
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
        assert_eq!(resume.contact_info.website, None);
    }
}
