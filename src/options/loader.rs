//! Reads option declarations out of JSON documents.
//!
//! A document is a single object whose keys are option names (long names or
//! one-character short aliases) and whose values are the option arguments:
//! strings and numbers become the argument, `null` and `true` mean "present,
//! no argument". Anything else is rejected.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use serde_json::Value;
use tracing::debug;

use super::queue::{FlagQueue, PendingFlag};
use crate::error::{OptionError, Result};

/// Where a JSON option document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonSource {
    /// The argument is the document itself.
    Inline(String),
    /// The argument names a file holding the document.
    File(PathBuf),
}

impl JsonSource {
    pub fn new(source: impl Into<String>, inline: bool) -> Self {
        let source = source.into();
        if inline {
            Self::Inline(source)
        } else {
            Self::File(source.into())
        }
    }
}

impl fmt::Display for JsonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(text) => f.write_str(text),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Object members in source order, duplicates included. Values stay as
/// their source text so numbers keep their exact spelling.
struct Members(Vec<(Value, Box<RawValue>)>);

impl<'de> Deserialize<'de> for Members {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Members, A::Error> {
                let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(member) = map.next_entry::<Value, Box<RawValue>>()? {
                    members.push(member);
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

/// Parses `source` and appends its flags to the back of `queue`.
///
/// The document is validated in full first, so on error the queue is left
/// untouched.
pub fn load(source: &JsonSource, queue: &mut FlagQueue) -> Result<()> {
    let flags = read_flags(source)?;
    debug!(source = %source, count = flags.len(), "loaded json options");
    queue.extend(flags);
    Ok(())
}

/// Parses `source` into pending flags, in the document's member order.
pub fn read_flags(source: &JsonSource) -> Result<Vec<PendingFlag>> {
    let document = parse(source)?;
    if !document.get().starts_with('{') {
        debug!(source = %source, root = document.get(), "option document is not an object");
        return Err(OptionError::NotAnObject {
            source_name: source.to_string(),
        });
    }
    let Members(members) = serde_json::from_str(document.get()).map_err(|error| parse_error(source, error))?;
    members
        .into_iter()
        .map(|(key, value)| pending_flag(source, key, &value))
        .collect()
}

/// Checks the text is well-formed JSON without building a tree, so nesting
/// depth and number range are left to the schema checks.
fn parse(source: &JsonSource) -> Result<Box<RawValue>> {
    let parsed = match source {
        JsonSource::Inline(text) => serde_json::from_str(text),
        JsonSource::File(path) => {
            let file = File::open(path).map_err(|source| OptionError::Io {
                source_name: path.display().to_string(),
                source,
            })?;
            serde_json::from_reader(BufReader::new(file))
        }
    };
    parsed.map_err(|error| parse_error(source, error))
}

fn parse_error(source: &JsonSource, error: serde_json::Error) -> OptionError {
    OptionError::Parse {
        source_name: source.to_string(),
        source: error,
    }
}

fn pending_flag(source: &JsonSource, key: Value, value: &RawValue) -> Result<PendingFlag> {
    let Value::String(name) = key else {
        return Err(OptionError::OptionNotString {
            source_name: source.to_string(),
            fragment: key.to_string(),
        });
    };
    let text = value.get();
    let argument = match text.as_bytes()[0] {
        b'"' => Some(serde_json::from_str::<String>(text).map_err(|error| parse_error(source, error))?),
        b'-' | b'0'..=b'9' => Some(text.to_owned()),
        _ if text == "null" || text == "true" => None,
        _ => {
            return Err(OptionError::InvalidArgument {
                source_name: source.to_string(),
                fragment: text.to_owned(),
            })
        }
    };
    Ok(PendingFlag { name, argument })
}
