// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blob codecs for cache records.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes and decodes the blobs stored in the job cache.
pub trait RecordCodec: Clone + Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error>;

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, Self::Error>;
}

/// JSON blobs.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(bytes)
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, Self::Error> {
        serde_json::to_vec(value)
    }
}
