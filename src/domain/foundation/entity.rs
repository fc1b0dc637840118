//! Criterion and alternative value objects.
//!
//! Names are opaque labels the external layer uses to join results back to
//! its UI. The engine itself works on positional indices, so the only rules
//! enforced here are the character set and uniqueness within a list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::{ensure_positive, ValidationError};

/// A validated criterion or alternative name.
///
/// Non-empty after trimming, restricted to ASCII letters, digits,
/// whitespace and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityName(String);

impl EntityName {
    /// Creates a name, returning error if empty or containing disallowed characters.
    pub fn try_new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-'))
        {
            return Err(ValidationError::invalid_format(
                "name",
                format!("'{}' contains disallowed character '{}'", trimmed, bad),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<EntityName> for String {
    fn from(name: EntityName) -> Self {
        name.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether higher raw values are better or worse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionCategory {
    #[default]
    Benefit,
    Cost,
}

impl CriterionCategory {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            CriterionCategory::Benefit => "benefit",
            CriterionCategory::Cost => "cost",
        }
    }
}

impl fmt::Display for CriterionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A decision criterion.
///
/// `weight` is only meaningful for SAW, where weights are supplied directly.
/// AHP derives criterion weights from the criteria comparison matrix and
/// ignores both `weight` and `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: EntityName,
    #[serde(default)]
    pub category: CriterionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Criterion {
    /// Creates a benefit criterion without a weight.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: EntityName::try_new(name)?,
            category: CriterionCategory::Benefit,
            weight: None,
        })
    }

    /// Creates a weighted criterion for SAW.
    pub fn weighted(
        name: impl Into<String>,
        category: CriterionCategory,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        let criterion = Self {
            name: EntityName::try_new(name)?,
            category,
            weight: Some(weight),
        };
        criterion.require_weight()?;
        Ok(criterion)
    }

    /// Returns the weight, requiring it to be present, finite and positive.
    pub fn require_weight(&self) -> Result<f64, ValidationError> {
        let field = format!("weight of '{}'", self.name);
        match self.weight {
            None => Err(ValidationError::empty_field(field)),
            Some(w) => ensure_positive(field, w),
        }
    }
}

/// A decision alternative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alternative {
    pub name: EntityName,
}

impl Alternative {
    /// Creates an alternative with a validated name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: EntityName::try_new(name)?,
        })
    }
}

/// Checks that a list has at least `min` entries and no repeated names.
/// Names differing only in case count as repeats.
pub fn ensure_unique_names<'a>(
    field: &str,
    names: impl IntoIterator<Item = &'a EntityName>,
    min: usize,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str().to_lowercase()) {
            return Err(ValidationError::duplicate(field, name.as_str()));
        }
    }

    if seen.len() < min {
        return Err(ValidationError::out_of_range(
            format!("{} count", field),
            min as f64,
            f64::from(u32::MAX),
            seen.len() as f64,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_accepts_letters_digits_spaces_and_hyphens() {
        let name = EntityName::try_new("Price per-unit 2").unwrap();
        assert_eq!(name.as_str(), "Price per-unit 2");
    }

    #[test]
    fn name_is_trimmed() {
        let name = EntityName::try_new("  Quality ").unwrap();
        assert_eq!(name.as_str(), "Quality");
    }

    #[test]
    fn name_rejects_empty_and_blank() {
        assert!(matches!(
            EntityName::try_new(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(matches!(
            EntityName::try_new("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn name_rejects_punctuation() {
        let result = EntityName::try_new("Cost ($)");
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn name_deserialization_validates() {
        let ok: Result<EntityName, _> = serde_json::from_str("\"Speed\"");
        assert!(ok.is_ok());

        let bad: Result<EntityName, _> = serde_json::from_str("\"Speed!\"");
        assert!(bad.is_err());
    }

    #[test]
    fn criterion_category_defaults_to_benefit() {
        let c: Criterion = serde_json::from_str(r#"{"name": "Quality"}"#).unwrap();
        assert_eq!(c.category, CriterionCategory::Benefit);
        assert!(c.weight.is_none());
    }

    #[test]
    fn criterion_category_deserializes_lowercase() {
        let c: Criterion =
            serde_json::from_str(r#"{"name": "Price", "category": "cost", "weight": 0.4}"#).unwrap();
        assert_eq!(c.category, CriterionCategory::Cost);
        assert_eq!(c.weight, Some(0.4));
    }

    #[test]
    fn weighted_criterion_rejects_non_positive_weight() {
        assert!(Criterion::weighted("Price", CriterionCategory::Cost, 0.0).is_err());
        assert!(Criterion::weighted("Price", CriterionCategory::Cost, -1.0).is_err());
        assert!(Criterion::weighted("Price", CriterionCategory::Cost, f64::NAN).is_err());
        assert!(Criterion::weighted("Price", CriterionCategory::Cost, 0.3).is_ok());
    }

    #[test]
    fn require_weight_fails_when_missing() {
        let c = Criterion::new("Quality").unwrap();
        assert!(matches!(
            c.require_weight(),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn alternative_serializes_as_plain_string() {
        let alt = Alternative::new("Option A").unwrap();
        assert_eq!(serde_json::to_string(&alt).unwrap(), "\"Option A\"");
    }

    #[test]
    fn unique_names_detects_duplicates() {
        let names = vec![
            EntityName::try_new("A").unwrap(),
            EntityName::try_new("B").unwrap(),
            EntityName::try_new("A").unwrap(),
        ];
        let result = ensure_unique_names("alternatives", &names, 2);
        assert_eq!(result, Err(ValidationError::duplicate("alternatives", "A")));
    }

    #[test]
    fn unique_names_ignores_case() {
        let names = vec![
            EntityName::try_new("Price").unwrap(),
            EntityName::try_new("price").unwrap(),
        ];
        let result = ensure_unique_names("criteria", &names, 2);
        assert_eq!(result, Err(ValidationError::duplicate("criteria", "price")));
    }

    #[test]
    fn unique_names_enforces_minimum_count() {
        let names = vec![EntityName::try_new("Only").unwrap()];
        assert!(matches!(
            ensure_unique_names("criteria", &names, 2),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(ensure_unique_names("criteria", &names, 1).is_ok());
    }
}
