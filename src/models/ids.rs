//! Typed record identifiers
//!
//! Each record type gets its own UUID newtype so ids cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short prefix used in listings, e.g. `bil-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(BillId, "bil-");
define_id!(IncomeId, "inc-");
define_id!(BankAccountId, "acc-");
define_id!(CreditCardId, "crd-");
define_id!(TransferId, "trf-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefix() {
        let id = BillId::new();
        assert!(id.to_string().starts_with("bil-"));
        assert_eq!(id.short().len(), 12);
        assert!(CreditCardId::new().short().starts_with("crd-"));
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let id = IncomeId::new();
        assert_eq!(id.to_string().parse::<IncomeId>().unwrap(), id);
        assert_eq!(id.as_uuid().to_string().parse::<IncomeId>().unwrap(), id);
        assert!("inc-nope".parse::<IncomeId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = TransferId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: TransferId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(BankAccountId::new(), BankAccountId::new());
    }
}
