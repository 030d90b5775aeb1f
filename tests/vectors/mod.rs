//! Test vector types for hash record and normalization tests.
//!
//! Vectors live next to this file as JSON and were generated independently
//! of this crate.

// Some fields are only read for diagnostics
#![allow(dead_code)]

use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

/// Hash record suite with the encryption keys its records use.
#[derive(Debug, Deserialize)]
pub struct HashVectorSuite {
    pub name: String,
    pub keys: Vec<EncryptionKeyVector>,
    pub tests: Vec<HashTestVector>,
}

/// An encryption parameter set referenced by `#id` tags.
#[derive(Debug, Deserialize)]
pub struct EncryptionKeyVector {
    pub id: u32,
    /// `xchacha20-blake2b` or `aes-ctr-hmac-sha384`
    pub cipher: String,
    /// Hex-encoded key bytes
    pub key: String,
}

/// Test vector for verifying a stored hash.
#[derive(Debug, Deserialize)]
pub struct HashTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    pub hash: String,
    pub password: String,
    /// Expected verification result (null for fail tests)
    pub matches: Option<bool>,
    /// Expected error kind (null for success tests)
    pub error: Option<String>,
}

/// Test vector for password normalization.
#[derive(Debug, Deserialize)]
pub struct NormalizationTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    pub input: String,
    /// Expected normalized form (null for fail tests)
    pub output: Option<String>,
    /// Expected index of the rejected code point (null for success tests)
    pub index: Option<usize>,
}

/// Decode a hex string to bytes.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Load and deserialize a JSON file relative to `tests/vectors`.
pub fn load_vectors<T: serde::de::DeserializeOwned>(file: &str) -> T {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/vectors")
        .join(file);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}
