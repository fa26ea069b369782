//! # eecont codec
//!
//! Storage codecs for the compact field encodings used by the provider's
//! reference data.
//!
//! This crate provides:
//! - [`WeekDays`]: seven Monday-first service-day flags stored as a 7-bit mask
//! - [`OfficeList`]: an ordered list of office codes stored as a comma string
//!
//! Each field implements [`FieldCodec`], which converts between the
//! in-memory value and its storage representation. Decoding is lenient
//! about the input shape (integers, numeric strings, lists) and strict about
//! the content: anything that cannot be interpreted fails with
//! [`CodecError::Validation`].
//!
//! Both fields serialize through their codec, so any serde format stores
//! the compact representation.
//!
//! ## Usage
//!
//! ```
//! use eecont_codec::{FieldCodec, OfficeList, WeekDays};
//! use serde_json::json;
//!
//! let days = WeekDays::new([true, true, true, false, false, true, true]);
//! assert_eq!(days.encode(), 103);
//! assert_eq!(WeekDays::decode(&json!(103)).unwrap(), days);
//!
//! let offices = OfficeList::decode(&json!("1000,1001,")).unwrap();
//! assert_eq!(offices.as_slice(), &[1000, 1001]);
//! assert_eq!(offices.encode(), "1000,1001");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod office_list;
mod weekdays;

pub use error::{CodecError, CodecResult};
pub use office_list::OfficeList;
pub use weekdays::{WeekDays, Weekday};

/// A field whose storage representation differs from its in-memory value.
pub trait FieldCodec: Sized {
    /// The representation written to storage.
    type Stored;

    /// Encodes the value into its storage representation.
    fn encode(&self) -> Self::Stored;

    /// Decodes a value from any accepted storage or wire shape.
    fn decode(value: &serde_json::Value) -> CodecResult<Self>;
}
