use std::io;

use serde::de;
use serde_json::ser::PrettyFormatter;

/// A JSON (de)serialization error.
pub type Error = serde_path_to_error::Error<serde_json::Error>;

/// Deserialize a type `T` from a reader as JSON.
/// The reader is wrapped in a buffered reader.
///
/// # Errors
///
/// Errors from `serde_path_to_error` are returned verbatim.
pub fn from_reader<R, T>(reader: R) -> Result<T, Error>
where
	R: io::Read,
	T: de::DeserializeOwned,
{
	let reader = io::BufReader::new(reader);
	let de = &mut serde_json::Deserializer::from_reader(reader);

	serde_path_to_error::deserialize(de)
}

/// Serialize a type `T` to a writer as JSON.
/// The writer is wrapped in a buffered writer.
///
/// # Errors
///
/// Errors from `serde_path_to_error` are returned verbatim.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<(), Error>
where
	W: io::Write,
	T: serde::Serialize,
{
	let writer = io::BufWriter::new(writer);
	let ser = &mut serde_json::Serializer::new(writer);

	serde_path_to_error::serialize(value, ser)
}

/// Serialize a type `T` to a writer as pretty-printed JSON,
/// indented with 4 spaces.
///
/// # Errors
///
/// Errors from `serde_path_to_error` are returned verbatim.
pub fn to_writer_pretty<W, T>(writer: W, value: &T) -> Result<(), Error>
where
	W: io::Write,
	T: serde::Serialize,
{
	let writer = io::BufWriter::new(writer);
	let formatter = PrettyFormatter::with_indent(b"    ");
	let ser = &mut serde_json::Serializer::with_formatter(writer, formatter);

	serde_path_to_error::serialize(value, ser)
}
