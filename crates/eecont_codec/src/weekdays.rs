//! Weekday mask codec.

use crate::error::{CodecError, CodecResult};
use crate::FieldCodec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Decode masks, indexed Monday-first.
const DAY_MASKS: [u8; 7] = [
    0x01, // Monday
    0x02, // Tuesday
    0x04, // Wednesday
    0x08, // Thursday
    0x10, // Friday
    0x20, // Saturday
    0x40, // Sunday
];

/// A day of the week, Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    /// All days in storage order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Position of the day in a [`WeekDays`] vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower-case English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name() == lower)
            .ok_or_else(|| CodecError::validation(format!("unknown weekday: {s:?}")))
    }
}

/// Service flags for each day of the week, Monday-first.
///
/// Stored as an integer mask. The encoder folds the flags with the first
/// element most significant and then reverses the seven-bit string, which
/// leaves Monday in bit 0. The decoder tests the fixed masks `0x01`
/// (Monday) through `0x40` (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekDays([bool; 7]);

impl WeekDays {
    /// Wraps seven Monday-first flags.
    pub fn new(days: [bool; 7]) -> Self {
        Self(days)
    }

    /// Returns the flag for `day`.
    pub fn serves(&self, day: Weekday) -> bool {
        self.0[day.index()]
    }

    /// Returns the flags as an array.
    pub fn as_array(&self) -> &[bool; 7] {
        &self.0
    }

    /// Iterates the days whose flag is set.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|day| self.serves(*day))
    }

    fn from_mask(mask: i64) -> Self {
        let mut days = [false; 7];
        for (slot, bit) in days.iter_mut().zip(DAY_MASKS) {
            *slot = mask & i64::from(bit) != 0;
        }
        Self(days)
    }

    fn parse_mask(text: &str) -> CodecResult<i64> {
        let text = if text.is_empty() { "0" } else { text };
        let parsed = match text.strip_prefix("0b") {
            Some(binary) => i64::from_str_radix(binary, 2),
            None => text.trim().parse::<i64>(),
        };
        parsed.map_err(|e| CodecError::validation(format!("invalid weekday mask {text:?}: {e}")))
    }
}

impl From<[bool; 7]> for WeekDays {
    fn from(days: [bool; 7]) -> Self {
        Self(days)
    }
}

impl FieldCodec for WeekDays {
    type Stored = u8;

    fn encode(&self) -> u8 {
        let forward = self
            .0
            .iter()
            .fold(0u8, |acc, &day| (acc << 1) | u8::from(day));
        // reverse the seven-bit string
        forward.reverse_bits() >> 1
    }

    fn decode(value: &Value) -> CodecResult<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::from_mask)
                .ok_or_else(|| CodecError::validation(format!("weekday mask must be an integer: {n}"))),
            Value::String(s) => Self::parse_mask(s).map(Self::from_mask),
            Value::Array(items) => {
                let flags: Option<Vec<bool>> = items.iter().map(Value::as_bool).collect();
                let flags = flags.ok_or_else(|| {
                    CodecError::validation(format!("all items should be boolean: {value}"))
                })?;
                let days: [bool; 7] = flags.try_into().map_err(|flags: Vec<bool>| {
                    CodecError::validation(format!("expected 7 day flags, got {}", flags.len()))
                })?;
                Ok(Self(days))
            }
            other => Err(CodecError::validation(format!(
                "pass a string, an integer or a list of booleans, not {other}"
            ))),
        }
    }
}

impl Serialize for WeekDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.encode())
    }
}

impl<'de> Deserialize<'de> for WeekDays {
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

    const FIXTURE: [bool; 7] = [true, true, true, false, false, true, true];

    #[test]
    fn encode_fixture() {
        // 0b1110011 reversed is 0b1100111
        assert_eq!(WeekDays::new(FIXTURE).encode(), 103);
    }

    #[test]
    fn decode_fixture_against_masks() {
        // 103 = 0x01 | 0x02 | 0x04 | 0x20 | 0x40
        let days = WeekDays::decode(&json!(103)).unwrap();
        assert_eq!(days.as_array(), &FIXTURE);
    }

    #[test]
    fn decode_strings() {
        assert_eq!(WeekDays::decode(&json!("103")).unwrap().as_array(), &FIXTURE);
        assert_eq!(
            WeekDays::decode(&json!("0b1100111")).unwrap().as_array(),
            &FIXTURE
        );
        assert_eq!(WeekDays::decode(&json!("")).unwrap(), WeekDays::default());
    }

    #[test]
    fn decode_list() {
        let input = json!([true, true, true, false, false, true, true]);
        assert_eq!(WeekDays::decode(&input).unwrap().as_array(), &FIXTURE);
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert!(matches!(
            WeekDays::decode(&json!([true, 1, true, false, false, true, true])),
            Err(CodecError::Validation { .. })
        ));
        assert!(WeekDays::decode(&json!([true, false])).is_err());
        assert!(WeekDays::decode(&json!("monday")).is_err());
        assert!(WeekDays::decode(&json!("0b102")).is_err());
        assert!(WeekDays::decode(&json!(null)).is_err());
        assert!(WeekDays::decode(&json!(1.5)).is_err());
    }

    #[test]
    fn weekday_accessors() {
        let days = WeekDays::new(FIXTURE);
        assert!(days.serves(Weekday::Monday));
        assert!(!days.serves(Weekday::Thursday));
        assert!(days.serves(Weekday::Sunday));
        assert_eq!(
            days.days().collect::<Vec<_>>(),
            vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Saturday,
                Weekday::Sunday
            ]
        );
        assert_eq!("Friday".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert!("funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn serde_uses_mask() {
        let days = WeekDays::new(FIXTURE);
        assert_eq!(serde_json::to_value(days).unwrap(), json!(103));
        let back: WeekDays = serde_json::from_value(json!("0b1100111")).unwrap();
        assert_eq!(back, days);
    }

    proptest! {
        #[test]
        fn encode_stays_in_seven_bits(days in proptest::array::uniform7(any::<bool>())) {
            let mask = WeekDays::new(days).encode();
            prop_assert!(mask <= 127);
        }

        #[test]
        fn decode_encode_is_identity(days in proptest::array::uniform7(any::<bool>())) {
            let value = WeekDays::new(days);
            let decoded = WeekDays::decode(&json!(value.encode())).unwrap();
            prop_assert_eq!(decoded, value);
        }
    }
}
