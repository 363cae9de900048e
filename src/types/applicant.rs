// src/types/applicant.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{lenient, Validate};

/// How an applicant reports degree marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarksType {
    Cgpa,
    Percentage,
}

impl fmt::Display for MarksType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarksType::Cgpa => write!(f, "cgpa"),
            MarksType::Percentage => write!(f, "percentage"),
        }
    }
}

impl FromStr for MarksType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cgpa" => Ok(MarksType::Cgpa),
            "percentage" | "percent" | "%" => Ok(MarksType::Percentage),
            other => anyhow::bail!("Unknown marks type: {}. Use cgpa or percentage", other),
        }
    }
}

/// Degree marks together with the scale they were reported on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeMarks {
    pub value: f64,
    pub marks_type: MarksType,
    /// Only meaningful for CGPA
    pub cgpa_out_of: Option<f64>,
}

/// One application as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub degree: String,
    pub specialization: String,
    #[serde(deserialize_with = "lenient::i32")]
    pub passing_year: i32,
    #[serde(deserialize_with = "lenient::f64")]
    pub tenth_marks: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub twelfth_marks: f64,
    #[serde(alias = "marksValue", deserialize_with = "lenient::f64")]
    pub degree_marks: f64,
    pub marks_type: MarksType,
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub cgpa_out_of: Option<f64>,
    #[serde(default, alias = "resumepath", alias = "resumeUrl")]
    pub resume_path: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub applied_on: Option<String>,
}

fn default_status() -> String {
    "Pending".to_string()
}

impl Applicant {
    pub fn degree_marks(&self) -> DegreeMarks {
        DegreeMarks {
            value: self.degree_marks,
            marks_type: self.marks_type,
            cgpa_out_of: self.cgpa_out_of,
        }
    }

    /// Label used wherever an applicant is identified in output
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format!("#{} {}", id, self.name),
            None => self.name.clone(),
        }
    }
}

impl Validate for Applicant {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Applicant record has an empty name");
        }

        let marks = [
            ("tenthMarks", self.tenth_marks),
            ("twelfthMarks", self.twelfth_marks),
            ("degreeMarks", self.degree_marks),
        ];
        for (field, value) in marks {
            if value < 0.0 {
                anyhow::bail!("Applicant '{}' has negative {}: {}", self.name, field, value);
            }
        }

        if let Some(out_of) = self.cgpa_out_of {
            if out_of <= 0.0 {
                anyhow::bail!("Applicant '{}' has invalid cgpaOutOf: {}", self.name, out_of);
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_record_with_text_numbers() {
        let raw = r#"{
            "id": 7,
            "name": "Aisha Sharma",
            "email": "aisha@example.com",
            "phone": "9876543210",
            "degree": "B.Tech",
            "specialization": "Computer Science",
            "passingYear": "2024",
            "tenthMarks": "95",
            "twelfthMarks": 92,
            "degreeMarks": "8.8",
            "marksType": "cgpa",
            "cgpaOutOf": "10",
            "resumepath": "uploads/aisha.pdf",
            "appliedOn": "Tue, 14 Oct 2025 10:00:00 GMT"
        }"#;

        let applicant: Applicant = serde_json::from_str(raw).unwrap();
        assert_eq!(applicant.id, Some(7));
        assert_eq!(applicant.passing_year, 2024);
        assert_eq!(applicant.tenth_marks, 95.0);
        assert_eq!(applicant.twelfth_marks, 92.0);
        assert_eq!(applicant.degree_marks, 8.8);
        assert_eq!(applicant.cgpa_out_of, Some(10.0));
        assert_eq!(applicant.resume_path.as_deref(), Some("uploads/aisha.pdf"));
        assert_eq!(applicant.status, "Pending");
        assert!(applicant.validate().is_ok());
    }

    #[test]
    fn test_accepts_marks_value_alias_and_blank_cgpa_out_of() {
        let raw = r#"{
            "name": "Chloe Davis",
            "degree": "B.Sc",
            "specialization": "Physics",
            "passingYear": 2024,
            "tenthMarks": 98,
            "twelfthMarks": 96,
            "marksValue": "92",
            "marksType": "percentage",
            "cgpaOutOf": ""
        }"#;

        let applicant: Applicant = serde_json::from_str(raw).unwrap();
        assert_eq!(applicant.degree_marks, 92.0);
        assert_eq!(applicant.marks_type, MarksType::Percentage);
        assert_eq!(applicant.cgpa_out_of, None);
    }

    #[test]
    fn test_rejects_malformed_records() {
        let not_a_number = r#"{
            "name": "Ben", "degree": "B.E.", "specialization": "Mech",
            "passingYear": "twenty", "tenthMarks": 88, "twelfthMarks": 85,
            "degreeMarks": 7.5, "marksType": "cgpa"
        }"#;
        assert!(serde_json::from_str::<Applicant>(not_a_number).is_err());

        let fractional_year = r#"{
            "name": "Ben", "degree": "B.E.", "specialization": "Mech",
            "passingYear": 2023.5, "tenthMarks": 88, "twelfthMarks": 85,
            "degreeMarks": 7.5, "marksType": "cgpa"
        }"#;
        assert!(serde_json::from_str::<Applicant>(fractional_year).is_err());

        let unknown_type = r#"{
            "name": "Ben", "degree": "B.E.", "specialization": "Mech",
            "passingYear": 2023, "tenthMarks": 88, "twelfthMarks": 85,
            "degreeMarks": 7.5, "marksType": "grade"
        }"#;
        assert!(serde_json::from_str::<Applicant>(unknown_type).is_err());

        let nan_marks = r#"{
            "name": "Ben", "degree": "B.E.", "specialization": "Mech",
            "passingYear": 2023, "tenthMarks": "NaN", "twelfthMarks": 85,
            "degreeMarks": 7.5, "marksType": "cgpa"
        }"#;
        assert!(serde_json::from_str::<Applicant>(nan_marks).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_name_and_negative_marks() {
        let mut applicant = fixtures::applicant("Gaurav", 2023, 78.0, 75.0, 78.0, MarksType::Percentage);
        assert!(applicant.validate().is_ok());

        applicant.tenth_marks = -1.0;
        assert!(applicant.validate().is_err());

        applicant.tenth_marks = 78.0;
        applicant.name = "  ".to_string();
        assert!(applicant.validate().is_err());
    }

    #[test]
    fn test_marks_type_from_str() {
        assert_eq!("CGPA".parse::<MarksType>().unwrap(), MarksType::Cgpa);
        assert_eq!("percentage".parse::<MarksType>().unwrap(), MarksType::Percentage);
        assert!("grade".parse::<MarksType>().is_err());
    }
}
