// src/intake.rs
//! Applicant intake form and its client-side validation

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::errors::ValidationError;
use crate::types::MarksType;
use crate::utils::{content_type_for, file_name_of};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());

pub const CGPA_SCALES: [&str; 3] = ["10", "4", "5"];

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub degree: String,
    pub specialization: String,
    pub passing_year: String,
    pub marks_type: MarksType,
    pub marks_value: String,
    pub cgpa_out_of: String,
    pub tenth_marks: String,
    pub twelfth_marks: String,
    pub resume: Option<PathBuf>,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            degree: String::new(),
            specialization: String::new(),
            passing_year: String::new(),
            marks_type: MarksType::Cgpa,
            marks_value: String::new(),
            cgpa_out_of: "10".to_string(),
            tenth_marks: String::new(),
            twelfth_marks: String::new(),
            resume: None,
        }
    }
}

/// A form that passed validation, with its resume resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedApplication {
    form: ApplicationForm,
    resume_path: PathBuf,
    resume_name: String,
    resume_mime: &'static str,
}

impl ApplicationForm {
    pub fn validate(&self) -> Result<ValidatedApplication, ValidationError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("degree", &self.degree),
            ("specialization", &self.specialization),
            ("passingYear", &self.passing_year),
            ("marksValue", &self.marks_value),
            ("tenthMarks", &self.tenth_marks),
            ("twelfthMarks", &self.twelfth_marks),
        ];
        let mut missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if self.resume.is_none() {
            missing.push("resume");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if !PHONE_RE.is_match(self.phone.trim()) {
            return Err(ValidationError::InvalidPhone);
        }

        let resume_path = self.resume.clone().ok_or(ValidationError::MissingFields(vec!["resume"]))?;
        let resume_name = file_name_of(&resume_path)
            .map_err(|_| ValidationError::InvalidResumeType(resume_path.display().to_string()))?;
        let resume_mime = content_type_for(&resume_name)
            .ok_or_else(|| ValidationError::InvalidResumeType(resume_name.clone()))?;

        let numeric = [
            ("passingYear", &self.passing_year),
            ("marksValue", &self.marks_value),
            ("tenthMarks", &self.tenth_marks),
            ("twelfthMarks", &self.twelfth_marks),
        ];
        for (field, value) in numeric {
            let parsed = value.trim().parse::<f64>();
            if !matches!(parsed, Ok(v) if v.is_finite()) {
                return Err(ValidationError::InvalidNumber {
                    field,
                    value: value.clone(),
                });
            }
        }

        if self.marks_type == MarksType::Cgpa && !CGPA_SCALES.contains(&self.cgpa_out_of.trim()) {
            return Err(ValidationError::InvalidCgpaScale(self.cgpa_out_of.clone()));
        }

        Ok(ValidatedApplication {
            form: self.clone(),
            resume_path,
            resume_name,
            resume_mime,
        })
    }
}

impl ValidatedApplication {
    /// Multipart text fields in submission order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let form = &self.form;
        let mut fields = vec![
            ("name", form.name.trim().to_string()),
            ("email", form.email.trim().to_string()),
            ("phone", form.phone.trim().to_string()),
            ("degree", form.degree.trim().to_string()),
            ("specialization", form.specialization.trim().to_string()),
            ("passingYear", form.passing_year.trim().to_string()),
            ("marksType", form.marks_type.to_string()),
            ("marksValue", form.marks_value.trim().to_string()),
        ];
        if form.marks_type == MarksType::Cgpa {
            fields.push(("cgpaOutOf", form.cgpa_out_of.trim().to_string()));
        }
        fields.push(("tenthMarks", form.tenth_marks.trim().to_string()));
        fields.push(("twelfthMarks", form.twelfth_marks.trim().to_string()));
        fields
    }

    pub fn name(&self) -> &str {
        self.form.name.trim()
    }

    pub fn resume_path(&self) -> &Path {
        &self.resume_path
    }

    pub fn resume_name(&self) -> &str {
        &self.resume_name
    }

    pub fn resume_mime(&self) -> &'static str {
        self.resume_mime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{DOCX_MIME, PDF_MIME};

    fn filled_form() -> ApplicationForm {
        ApplicationForm {
            name: "Aisha Sharma".to_string(),
            email: "aisha@example.com".to_string(),
            phone: "9876543210".to_string(),
            degree: "B.Tech".to_string(),
            specialization: "Computer Science".to_string(),
            passing_year: "2024".to_string(),
            marks_type: MarksType::Cgpa,
            marks_value: "8.8".to_string(),
            cgpa_out_of: "10".to_string(),
            tenth_marks: "95".to_string(),
            twelfth_marks: "92".to_string(),
            resume: Some(PathBuf::from("resumes/aisha.pdf")),
        }
    }

    #[test]
    fn test_valid_form() {
        let validated = filled_form().validate().unwrap();
        assert_eq!(validated.resume_name(), "aisha.pdf");
        assert_eq!(validated.resume_mime(), PDF_MIME);
        assert_eq!(validated.name(), "Aisha Sharma");
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let form = ApplicationForm {
            phone: " ".to_string(),
            degree: String::new(),
            resume: None,
            ..filled_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["phone", "degree", "resume"]));
        assert_eq!(
            err.to_string(),
            "Please fill all mandatory fields and upload your resume."
        );
    }

    #[test]
    fn test_missing_fields_checked_before_email() {
        let form = ApplicationForm {
            email: "not-an-email".to_string(),
            name: String::new(),
            ..filled_form()
        };
        assert!(matches!(form.validate(), Err(ValidationError::MissingFields(_))));
    }

    #[test]
    fn test_email_shape() {
        for bad in ["aisha", "aisha@example", "ai sha@example.com", "@example.com"] {
            let form = ApplicationForm {
                email: bad.to_string(),
                ..filled_form()
            };
            assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidEmail, "{}", bad);
        }
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        for bad in ["987654321", "98765432100", "98765-43210", "+919876543210"] {
            let form = ApplicationForm {
                phone: bad.to_string(),
                ..filled_form()
            };
            assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidPhone, "{}", bad);
        }
    }

    #[test]
    fn test_resume_type() {
        let form = ApplicationForm {
            resume: Some(PathBuf::from("aisha.txt")),
            ..filled_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::InvalidResumeType("aisha.txt".to_string())
        );

        let form = ApplicationForm {
            resume: Some(PathBuf::from("aisha.DOCX")),
            ..filled_form()
        };
        assert_eq!(form.validate().unwrap().resume_mime(), DOCX_MIME);
    }

    #[test]
    fn test_numeric_fields() {
        let form = ApplicationForm {
            tenth_marks: "ninety".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::InvalidNumber {
                field: "tenthMarks",
                value: "ninety".to_string()
            }
        );
    }

    #[test]
    fn test_cgpa_scale() {
        let form = ApplicationForm {
            cgpa_out_of: "7".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::InvalidCgpaScale("7".to_string())
        );

        let form = ApplicationForm {
            marks_type: MarksType::Percentage,
            marks_value: "81".to_string(),
            cgpa_out_of: "7".to_string(),
            ..filled_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_form_fields_include_scale_only_for_cgpa() {
        let cgpa = filled_form().validate().unwrap();
        let names: Vec<&str> = cgpa.form_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "email",
                "phone",
                "degree",
                "specialization",
                "passingYear",
                "marksType",
                "marksValue",
                "cgpaOutOf",
                "tenthMarks",
                "twelfthMarks"
            ]
        );

        let percentage = ApplicationForm {
            marks_type: MarksType::Percentage,
            marks_value: "81".to_string(),
            ..filled_form()
        }
        .validate()
        .unwrap();
        let fields = percentage.form_fields();
        assert!(fields.iter().all(|(k, _)| *k != "cgpaOutOf"));
        assert!(fields.contains(&("marksType", "percentage".to_string())));
    }
}
