//! File serialization of records, as compact binary or pretty JSON

use std::{fs, path::Path};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};

/// Pretty-printed JSON
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("cannot serialize value to JSON")
}

pub fn write_json_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = to_json(value)?;
    fs::write(path, json).with_context(|| format!("cannot write JSON to {}", path.display()))
}

pub fn read_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read JSON from {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("cannot parse JSON in {}", path.display()))
}

pub fn write_binary_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let data = bincode::serialize(value).context("cannot serialize value to binary")?;
    fs::write(path, data).with_context(|| format!("cannot write binary data to {}", path.display()))
}

pub fn read_binary_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let data =
        fs::read(path).with_context(|| format!("cannot read binary data from {}", path.display()))?;
    bincode::deserialize(&data)
        .with_context(|| format!("cannot decode binary data in {}", path.display()))
}
