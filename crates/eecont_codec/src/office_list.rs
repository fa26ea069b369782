//! Office-code list codec.

use crate::error::{CodecError, CodecResult};
use crate::FieldCodec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// An ordered list of provider office codes.
///
/// Stored as the codes joined with `,`. Empty segments are dropped when
/// decoding, so `""` and `"1,,2,"` are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OfficeList(Vec<u32>);

impl OfficeList {
    /// Wraps an ordered list of codes.
    pub fn new(codes: Vec<u32>) -> Self {
        Self(codes)
    }

    /// Returns the codes.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Returns true if the list holds no codes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of codes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Consumes the list, returning the codes.
    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }

    fn parse_code(text: &str) -> CodecResult<u32> {
        text.trim()
            .parse::<u32>()
            .map_err(|e| CodecError::validation(format!("invalid office code {text:?}: {e}")))
    }

    fn code_from_item(item: &Value) -> CodecResult<u32> {
        match item {
            Value::String(s) => Self::parse_code(s),
            Value::Number(n) => n
                .as_u64()
                .and_then(|code| u32::try_from(code).ok())
                .ok_or_else(|| CodecError::validation(format!("invalid office code: {n}"))),
            other => Err(CodecError::validation(format!(
                "all items should be ints (or int strings): {other}"
            ))),
        }
    }
}

impl From<Vec<u32>> for OfficeList {
    fn from(codes: Vec<u32>) -> Self {
        Self(codes)
    }
}

impl FieldCodec for OfficeList {
    type Stored = String;

    fn encode(&self) -> String {
        self.0
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn decode(value: &Value) -> CodecResult<Self> {
        match value {
            Value::String(s) => s
                .split(',')
                .filter(|segment| !segment.trim().is_empty())
                .map(Self::parse_code)
                .collect::<CodecResult<Vec<_>>>()
                .map(Self),
            Value::Array(items) => items
                .iter()
                .map(Self::code_from_item)
                .collect::<CodecResult<Vec<_>>>()
                .map(Self),
            other => Err(CodecError::validation(format!(
                "pass a string or a list of integers, not {other}"
            ))),
        }
    }
}

impl Serialize for OfficeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for OfficeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::decode(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn encode_joins_with_commas() {
        assert_eq!(OfficeList::new(vec![1000, 1001, 7]).encode(), "1000,1001,7");
        assert_eq!(OfficeList::default().encode(), "");
    }

    #[test]
    fn decode_string_drops_empty_segments() {
        let list = OfficeList::decode(&json!("1000,,1001, ,")).unwrap();
        assert_eq!(list.as_slice(), &[1000, 1001]);
        assert!(OfficeList::decode(&json!("")).unwrap().is_empty());
    }

    #[test]
    fn decode_list_coerces_items() {
        let list = OfficeList::decode(&json!(["1000", 1001, "1002"])).unwrap();
        assert_eq!(list.as_slice(), &[1000, 1001, 1002]);
    }

    #[test]
    fn decode_rejects_non_integers() {
        assert!(matches!(
            OfficeList::decode(&json!("1000,abc")),
            Err(CodecError::Validation { .. })
        ));
        assert!(OfficeList::decode(&json!(["1000", {"code": 1}])).is_err());
        assert!(OfficeList::decode(&json!([-1])).is_err());
        assert!(OfficeList::decode(&json!(42)).is_err());
        assert!(OfficeList::decode(&json!(null)).is_err());
    }

    #[test]
    fn serde_uses_comma_string() {
        let list = OfficeList::new(vec![3, 1, 2]);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!("3,1,2"));

        let mut bytes = Vec::new();
        ciborium::into_writer(&list, &mut bytes).unwrap();
        let back: OfficeList = ciborium::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(back, list);
    }

    proptest! {
        #[test]
        fn decode_encode_roundtrip(codes in proptest::collection::vec(any::<u32>(), 0..16)) {
            let list = OfficeList::new(codes);
            let decoded = OfficeList::decode(&json!(list.encode())).unwrap();
            prop_assert_eq!(decoded, list);
        }
    }
}
