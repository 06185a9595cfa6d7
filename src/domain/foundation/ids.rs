//! Strongly-typed identifier value objects.
//!
//! Submissions, forms and tenants are all keyed by UUID in the platform
//! database. Wrapping them keeps a form id from being bound where a
//! submission id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Tenant (customer organisation) that owns forms and submissions.
    TenantId
);

uuid_id!(
    /// Survey form definition.
    FormId
);

uuid_id!(
    /// A single respondent's submission to a form.
    SubmissionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }

    #[test]
    fn id_parses_from_string() {
        let raw = "550e8400-e29b-41d4-a716-446655440000";
        let id: FormId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn id_rejects_garbage() {
        assert!("not-a-uuid".parse::<TenantId>().is_err());
    }

    #[test]
    fn id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id = SubmissionId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
