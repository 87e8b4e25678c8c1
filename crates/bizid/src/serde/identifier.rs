use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::Identifier;

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.hyphenated().as_str())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_str(IdentifierVisitor)
    }
}

struct IdentifierVisitor;

impl Visitor<'_> for IdentifierVisitor {
    type Value = Identifier;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hyphenated or 32-digit hex identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Identifier::decode(v).map_err(E::custom)
    }
}

pub mod as_u128 {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Identifier;

    /// Serialize an identifier as its native `u128`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &Identifier, s: S) -> Result<S::Ok, S::Error> {
        id.to_raw().serialize(s)
    }

    /// Deserialize an identifier from its native `u128`.
    ///
    /// Any value is accepted; whether it decodes is up to
    /// [`IdParser`](crate::IdParser).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Identifier, D::Error> {
        u128::deserialize(d).map(Identifier::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use crate::{BusinessType, IdGenerator, Identifier};

    const SAMPLE: &str = "6911b0c0-07b8-8002-8ab4-e9f001e4d3c5";

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: Identifier,
        #[serde(with = "super::as_u128")]
        raw: Identifier,
    }

    #[test]
    fn identifier_is_a_string() {
        let id: Identifier = SAMPLE.parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{SAMPLE}\""));
        let back: Identifier = serde_json::from_str(&format!("\"{SAMPLE}\"")).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn simple_and_uppercase_text_deserialize() {
        let id: Identifier = SAMPLE.parse().unwrap();
        let simple = SAMPLE.replace('-', "").to_uppercase();
        let back: Identifier = serde_json::from_str(&format!("\"{simple}\"")).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(serde_json::from_str::<Identifier>("\"not-an-id\"").is_err());
        assert!(serde_json::from_str::<Identifier>("42").is_err());
    }

    #[test]
    fn native_u128_field() {
        let id = IdGenerator::new().generate(&BusinessType::USER, 1001).unwrap();
        let row = Row { id, raw: id };

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains(&format!("\"raw\":{}", id.to_raw())), "{json}");

        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn parsed_info_serializes_its_fields() {
        let generator = IdGenerator::new();
        let id = generator.generate(&BusinessType::PROJECT, 0).unwrap();
        let info = generator.parse(&id).unwrap();

        let value = serde_json::to_value(info).unwrap();
        assert_eq!(value["identifier"], id.to_string());
        assert_eq!(value["tenant_id"], 0);
        assert_eq!(value["business_type"]["name"], "PROJECT");
        assert_eq!(value["business_type"]["code"], 3);
    }
}
