//! Serialization of expressions as their canonical text.
//!
//! Deserialization parses the text and rebuilds the expression through the smart constructors, so
//! a deserialized expression is canonical even if the input was written by hand.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use super::Expr;

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        crate::symbolic::parse::parse(&source).map_err(|errors| {
            de::Error::custom(format!(
                "invalid expression `{}` ({} error{})",
                source,
                errors.len(),
                if errors.len() == 1 { "" } else { "s" },
            ))
        })
    }
}
