//! # Policy Data Model
//!
//! - [`PolicyType`]: closed set of policy kinds.
//! - [`PolicyName`]: validated name newtype, `^[A-Za-z0-9_]{1,32}$`.
//! - [`Policy`]: the user-supplied fields of a policy.
//! - [`PolicyUpdate`]: partial field set applied by an update.
//! - [`PolicyRecord`]: a stored policy plus its identifier. Records handed out
//!   by the store are owned snapshots.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::PolicyId;

// ---------------------------------------------------------------------------
// PolicyType
// ---------------------------------------------------------------------------

/// Kind of a policy.
///
/// Serialized as the variant name (`"Arupa"`, `"Frisco"`). Whether names of a
/// kind must be unique is configuration (see
/// [`NameUniqueness`](crate::NameUniqueness)), not a property of the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyType {
    /// Arupa policies.
    Arupa,
    /// Frisco policies.
    Frisco,
}

impl PolicyType {
    /// All policy types, in declaration order.
    pub fn all() -> &'static [PolicyType] {
        &[PolicyType::Arupa, PolicyType::Frisco]
    }

    /// Return the canonical wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arupa => "Arupa",
            Self::Frisco => "Frisco",
        }
    }
}

impl std::fmt::Display for PolicyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = ValidationError;

    /// Parse a type name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PolicyType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownPolicyType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PolicyName
// ---------------------------------------------------------------------------

/// Validated policy name.
///
/// # Validation
///
/// - At least one character
/// - At most [`PolicyName::MAX_LEN`] characters
/// - Only ASCII letters, ASCII digits, and `_`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PolicyName(String);

impl PolicyName {
    /// Maximum name length in characters.
    pub const MAX_LEN: usize = 32;

    /// Create a policy name, validating its format.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first rule the name breaks.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Check a candidate name without constructing it.
    pub fn validate(s: &str) -> Result<(), ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let length = s.chars().count();
        if length > Self::MAX_LEN {
            return Err(ValidationError::NameTooLong {
                length,
                max: Self::MAX_LEN,
            });
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidNameCharacters(s.to_string()));
        }
        Ok(())
    }

    /// Access the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PolicyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PolicyName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PolicyName> for String {
    fn from(name: PolicyName) -> Self {
        name.0
    }
}

impl PartialEq<&str> for PolicyName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// Policy / PolicyUpdate / PolicyRecord
// ---------------------------------------------------------------------------

/// The caller-supplied fields of a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Validated name.
    pub name: PolicyName,
    /// Free-form description.
    pub description: String,
    /// Policy kind. Immutable once stored.
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
}

impl Policy {
    /// Build a policy, validating the name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        policy_type: PolicyType,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: PolicyName::new(name)?,
            description: description.into(),
            policy_type,
        })
    }
}

/// Partial update of a stored policy. `None` keeps the stored value.
///
/// `policy_type` is accepted only so the store can reject an attempt to
/// change it; supplying the stored type is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyUpdate {
    /// Replacement name.
    #[serde(default)]
    pub name: Option<PolicyName>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Type the caller believes the policy has.
    #[serde(default, rename = "type")]
    pub policy_type: Option<PolicyType>,
}

impl PolicyUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement name.
    pub fn with_name(mut self, name: PolicyName) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the replacement description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the type assertion.
    pub fn with_type(mut self, policy_type: PolicyType) -> Self {
        self.policy_type = Some(policy_type);
        self
    }

    /// Whether no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.policy_type.is_none()
    }
}

/// A stored policy together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Identifier assigned at creation.
    pub policy_id: PolicyId,
    /// Current name.
    pub name: PolicyName,
    /// Current description.
    pub description: String,
    /// Type fixed at creation.
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
}

impl PolicyRecord {
    /// Attach an identifier to a policy.
    pub fn new(policy_id: PolicyId, policy: Policy) -> Self {
        Self {
            policy_id,
            name: policy.name,
            description: policy.description,
            policy_type: policy.policy_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_name_accepted() {
        let name = PolicyName::new("valid_Name9").unwrap();
        assert_eq!(name.as_str(), "valid_Name9");
    }

    #[test]
    fn name_with_space_rejected() {
        assert_eq!(
            PolicyName::new("a b"),
            Err(ValidationError::InvalidNameCharacters("a b".to_string()))
        );
    }

    #[test]
    fn empty_name_rejected() {
        assert_eq!(PolicyName::new(""), Err(ValidationError::EmptyName));
    }

    #[test]
    fn thirty_three_char_name_rejected() {
        let long = "a".repeat(33);
        assert_eq!(
            PolicyName::new(long),
            Err(ValidationError::NameTooLong { length: 33, max: 32 })
        );
    }

    #[test]
    fn thirty_two_char_name_accepted() {
        assert!(PolicyName::new("Z".repeat(32)).is_ok());
    }

    #[test]
    fn non_ascii_letters_rejected() {
        assert!(PolicyName::new("café").is_err());
        assert!(PolicyName::new("name-with-dash").is_err());
    }

    #[test]
    fn name_deserialization_validates() {
        let ok: PolicyName = serde_json::from_str("\"p_1\"").unwrap();
        assert_eq!(ok, "p_1");
        assert!(serde_json::from_str::<PolicyName>("\"bad name\"").is_err());
        assert!(serde_json::from_str::<PolicyName>("\"\"").is_err());
    }

    #[test]
    fn policy_type_wire_names() {
        assert_eq!(serde_json::to_string(&PolicyType::Arupa).unwrap(), "\"Arupa\"");
        assert_eq!(serde_json::to_string(&PolicyType::Frisco).unwrap(), "\"Frisco\"");
        assert!(serde_json::from_str::<PolicyType>("\"Unknown\"").is_err());
    }

    #[test]
    fn policy_type_from_str_ignores_case() {
        assert_eq!("arupa".parse::<PolicyType>().unwrap(), PolicyType::Arupa);
        assert_eq!(" FRISCO ".parse::<PolicyType>().unwrap(), PolicyType::Frisco);
        assert_eq!(
            "Nope".parse::<PolicyType>(),
            Err(ValidationError::UnknownPolicyType("Nope".to_string()))
        );
    }

    #[test]
    fn policy_uses_type_as_wire_field() {
        let policy = Policy::new("p1", "d", PolicyType::Arupa).unwrap();
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "p1", "description": "d", "type": "Arupa"})
        );
    }

    #[test]
    fn policy_new_propagates_name_error() {
        assert_eq!(
            Policy::new("", "d", PolicyType::Frisco),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn empty_update_deserializes_from_empty_object() {
        let update: PolicyUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn update_builders_set_fields() {
        let update = PolicyUpdate::new()
            .with_name(PolicyName::new("n").unwrap())
            .with_description("x")
            .with_type(PolicyType::Frisco);
        assert!(!update.is_empty());
        assert_eq!(update.description.as_deref(), Some("x"));
        assert_eq!(update.policy_type, Some(PolicyType::Frisco));
    }

    proptest! {
        /// Every string built from the allowed alphabet within the length
        /// limit is a valid name.
        #[test]
        fn allowed_alphabet_always_valid(s in "[a-zA-Z0-9_]{1,32}") {
            prop_assert!(PolicyName::new(s).is_ok());
        }

        /// Any character outside the alphabet makes the name invalid.
        #[test]
        fn foreign_character_always_invalid(
            prefix in "[a-z]{0,10}",
            bad in "[ !@#$%^&*().,;:/-]",
        ) {
            let candidate = format!("{prefix}{bad}");
            prop_assert!(PolicyName::new(candidate).is_err());
        }
    }
}
