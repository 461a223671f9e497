//! Property condition types
//!
//! A `PropertyCondition` is one leaf comparison of a targeting rule. It
//! deserializes from the flag-definition wire form:
//!
//! ```json
//! {"key": "email", "operator": "icontains", "value": "@example.com", "type": "person"}
//! ```

use crate::error::{CoreError, Result};
use crate::operator::{Arity, OperatorKind};
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Where a property comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Event,
    #[default]
    Person,
    Group,
    Cohort,
    Flag,
}

/// A single property comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCondition {
    /// Property key looked up in the context (flag key / cohort key for
    /// dependency operators)
    pub key: String,

    /// Comparison operator
    #[serde(default = "default_operator")]
    pub operator: OperatorKind,

    /// Target value; ignored by presence operators
    #[serde(default)]
    pub value: Value,

    #[serde(rename = "type", default)]
    pub property_type: PropertyType,

    /// Inverts a decided outcome
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negation: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type_index: Option<i32>,
}

fn default_operator() -> OperatorKind {
    OperatorKind::Exact
}

impl PropertyCondition {
    /// Create a person-property condition
    pub fn new(key: impl Into<String>, operator: OperatorKind, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
            property_type: PropertyType::default(),
            negation: false,
            group_type_index: None,
        }
    }

    /// Create a presence condition (`is_set` / `is_not_set`)
    pub fn presence(key: impl Into<String>, operator: OperatorKind) -> Self {
        Self::new(key, operator, Value::Null)
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = property_type;
        self
    }

    pub fn with_negation(mut self, negation: bool) -> Self {
        self.negation = negation;
        self
    }

    pub fn with_group_type_index(mut self, index: i32) -> Self {
        self.group_type_index = Some(index);
        self
    }

    /// Parse a condition from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidCondition(e.to_string()))
    }

    /// Check the target value against the operator's arity.
    ///
    /// Only structural problems are reported here; type mismatches are left
    /// to the matcher, which turns them into indeterminate outcomes.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(CoreError::InvalidCondition(format!(
                "empty key for operator {}",
                self.operator
            )));
        }

        match self.operator.arity() {
            Arity::Zero => Ok(()),
            Arity::Single if self.value.is_null() => Err(CoreError::InvalidCondition(format!(
                "operator {} on '{}' needs a value",
                self.operator, self.key
            ))),
            Arity::Single => Ok(()),
            Arity::Range => match self.value.as_array() {
                Some(items) if items.len() == 2 => Ok(()),
                _ => Err(CoreError::InvalidCondition(format!(
                    "operator {} on '{}' needs two operands",
                    self.operator, self.key
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_json() {
        let condition = PropertyCondition::from_json(
            r#"{"key": "email", "operator": "icontains", "value": "@example.com", "type": "person"}"#,
        )
        .unwrap();

        assert_eq!(condition.key, "email");
        assert_eq!(condition.operator, OperatorKind::Icontains);
        assert_eq!(condition.value, Value::from("@example.com"));
        assert_eq!(condition.property_type, PropertyType::Person);
        assert!(!condition.negation);
    }

    #[test]
    fn test_condition_defaults() {
        let condition = PropertyCondition::from_json(r#"{"key": "plan", "value": "pro"}"#).unwrap();
        assert_eq!(condition.operator, OperatorKind::Exact);
        assert_eq!(condition.property_type, PropertyType::Person);
        assert_eq!(condition.group_type_index, None);
    }

    #[test]
    fn test_condition_unknown_operator_rejected() {
        let err = PropertyCondition::from_json(r#"{"key": "x", "operator": "between", "value": [1, 2]}"#)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCondition(_)));
    }

    #[test]
    fn test_condition_presence_without_value() {
        let condition = PropertyCondition::from_json(r#"{"key": "email", "operator": "is_set"}"#).unwrap();
        assert!(condition.value.is_null());
        assert!(condition.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_value() {
        let condition = PropertyCondition::new("age", OperatorKind::Gt, Value::Null);
        assert!(condition.validate().is_err());

        let condition = PropertyCondition::new(" ", OperatorKind::Gt, 3.0);
        assert!(condition.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let condition = PropertyCondition::new("industry", OperatorKind::Exact, "fintech")
            .with_property_type(PropertyType::Group)
            .with_group_type_index(1)
            .with_negation(true);

        assert_eq!(condition.property_type, PropertyType::Group);
        assert_eq!(condition.group_type_index, Some(1));
        assert!(condition.negation);

        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["type"], "group");
        assert_eq!(json["operator"], "exact");
        assert_eq!(json["negation"], true);
    }
}
