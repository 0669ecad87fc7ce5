// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates function names and version tags while parsing.

use serde::Deserialize;

use crate::types::{FunctionName, VersionTag};

pub fn deserialize_function_name<'de, D>(deserializer: D) -> Result<FunctionName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    FunctionName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<VersionTag, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    VersionTag::new(&s).map_err(serde::de::Error::custom)
}
