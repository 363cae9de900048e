// src/types/mod.rs
//! Typed records exchanged with the screening backend

use anyhow::Result;

pub mod analysis;
pub mod applicant;
pub mod criteria;
pub mod response;

pub use analysis::{AnalyzedApplicant, FitVerdict, ParseOutcome, ScoredAnalysis};
pub use applicant::{Applicant, DegreeMarks, MarksType};
pub use criteria::{Criteria, CriteriaForm, CriteriaSubmission};
pub use response::{Ack, ParseAllResponse};

/// Records decoded from the backend are checked before anything renders them.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        for (index, item) in self.iter().enumerate() {
            item.validate()
                .map_err(|e| e.context(format!("Invalid record at index {}", index)))?;
        }
        Ok(())
    }
}

/// The backend stores marks and years as text; accept a JSON number or a numeric string.
pub(crate) mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    fn to_f64<E: Error>(raw: NumberOrText) -> Result<f64, E> {
        let value = match raw {
            NumberOrText::Number(n) => n,
            NumberOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got {:?}", s)))?,
        };

        if !value.is_finite() {
            return Err(E::custom(format!("expected a finite number, got {}", value)));
        }
        Ok(value)
    }

    pub fn f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        to_f64(NumberOrText::deserialize(deserializer)?)
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => to_f64(raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        let value = to_f64(NumberOrText::deserialize(deserializer)?)?;
        if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(D::Error::custom(format!("expected a whole number, got {}", value)));
        }
        Ok(value as i32)
    }
}
