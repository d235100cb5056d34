//! Wire encodings for request and response bodies.
//!
//! Two interchangeable codecs are supported, selected by media type:
//!
//! - [`ContentCodec::Json`] - `application/json`
//! - [`ContentCodec::MessagePack`] - `application/msgpack`
//!
//! MessagePack bodies are encoded as maps with named fields so that either
//! encoding decodes into the same structures.

use crate::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCodec {
    Json,
    MessagePack,
}

impl ContentCodec {
    pub const ALL: [ContentCodec; 2] = [ContentCodec::Json, ContentCodec::MessagePack];

    pub fn content_type(&self) -> &'static str {
        match self {
            ContentCodec::Json => "application/json",
            ContentCodec::MessagePack => "application/msgpack",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ContentCodec::Json => "JSON",
            ContentCodec::MessagePack => "MsgPack",
        }
    }

    /// Media types accepted for requests and produced for responses
    pub fn supported_content_types() -> Vec<String> {
        Self::ALL.iter().map(|c| c.content_type().to_string()).collect()
    }

    /// Codec for a declared `Content-Type`. Parameters such as `charset` are ignored.
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self> {
        let raw = content_type.ok_or_else(|| {
            Error::UnsupportedContentType("missing Content-Type header".to_string())
        })?;
        let media_type = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|c| c.content_type() == media_type)
            .ok_or_else(|| {
                Error::UnsupportedContentType(format!(
                    "{}, must be one of {:?}",
                    raw,
                    Self::supported_content_types()
                ))
            })
    }

    /// Codec for a response given the `Accept` header; JSON unless MessagePack is listed
    pub fn from_accept(accept: Option<&str>) -> Self {
        let wants_msgpack = accept
            .map(|a| {
                a.split(',').any(|part| {
                    part.split(';')
                        .next()
                        .is_some_and(|m| m.trim().eq_ignore_ascii_case("application/msgpack"))
                })
            })
            .unwrap_or(false);

        if wants_msgpack {
            ContentCodec::MessagePack
        } else {
            ContentCodec::Json
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let decoded = match self {
            ContentCodec::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            ContentCodec::MessagePack => rmp_serde::from_slice(bytes).map_err(|e| e.to_string()),
        };
        decoded.map_err(|message| Error::Decode {
            format: self.label(),
            message,
        })
    }

    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            ContentCodec::Json => {
                serde_json::to_vec(value).map_err(|e| Error::Encode(e.to_string()))
            }
            ContentCodec::MessagePack => {
                rmp_serde::to_vec_named(value).map_err(|e| Error::Encode(e.to_string()))
            }
        }
    }
}
