//! Transport-safe sticker documents and persistence payloads.
//!
//! Documents carry elements with their image source descriptors but never
//! decoded pixels. The payload types mirror the JSON exchanged with the
//! sticker storage service.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::now_ms;
use crate::constants::DOWNLOAD_PREFIX;
use crate::{CanvasError, CanvasResult, Element, Scene};

/// Alphabet of reference codes; omits `I`, `O`, `0` and `1`.
const REFERENCE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Prefix of every reference code.
const REFERENCE_PREFIX: &str = "SF-";

/// Number of random characters after the prefix.
const REFERENCE_LEN: usize = 8;

/// Serialized sticker design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerDocument {
    /// Elements in paint order, with raster handles stripped.
    pub elements: Vec<Element>,
    /// Template the design started from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl StickerDocument {
    /// Build a document from a live scene.
    #[must_use]
    pub fn from_scene(scene: &Scene, template: Option<String>) -> Self {
        Self {
            elements: scene.elements.iter().map(Element::detached).collect(),
            template,
        }
    }

    /// Serialize the document to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(CanvasError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a valid document.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        serde_json::from_str(json).map_err(CanvasError::Serialization)
    }
}

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStickerRequest {
    /// Design elements.
    pub elements: Vec<Element>,
    /// Rendered preview as a PNG data URI.
    pub image_data: String,
    /// Language tag of the sticker text.
    pub language: String,
    /// Template the design started from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl SaveStickerRequest {
    /// Build a request from a document and its rendered preview.
    #[must_use]
    pub fn new(document: StickerDocument, image_data: String, language: impl Into<String>) -> Self {
        Self {
            elements: document.elements,
            image_data,
            language: language.into(),
            template: document.template,
        }
    }
}

/// Reply to a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStickerResponse {
    /// Code the user quotes to retrieve the design.
    pub reference_code: ReferenceCode,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
    /// Storage id of the design.
    pub sticker_design_id: String,
}

/// Lifecycle state of a stored design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerStatus {
    /// Can still be turned into a sticker.
    Active,
    /// Past its expiry.
    Expired,
    /// Already redeemed.
    Used,
}

/// A stored design fetched by reference code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveStickerResponse {
    /// Code the design was stored under.
    pub reference_code: ReferenceCode,
    /// Design elements.
    pub elements: Vec<Element>,
    /// Rendered preview as a PNG data URI.
    pub image_data: String,
    /// Language tag of the sticker text.
    pub language: String,
    /// Template the design started from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Lifecycle state.
    pub status: StickerStatus,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
}

impl RetrieveStickerResponse {
    /// The editable document carried by this response.
    #[must_use]
    pub fn document(&self) -> StickerDocument {
        StickerDocument {
            elements: self.elements.clone(),
            template: self.template.clone(),
        }
    }
}

/// Short code identifying a saved design, e.g. `SF-7K2M9QXA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    /// Generate a random code.
    #[must_use]
    pub fn generate() -> Self {
        let bytes = Uuid::new_v4().into_bytes();
        let mut code = String::with_capacity(REFERENCE_PREFIX.len() + REFERENCE_LEN);
        code.push_str(REFERENCE_PREFIX);
        // 32 symbols, so masking to five bits keeps the choice uniform.
        code.extend(
            bytes
                .iter()
                .take(REFERENCE_LEN)
                .map(|b| char::from(REFERENCE_ALPHABET[usize::from(b & 0x1f)])),
        );
        Self(code)
    }

    /// Accept a code typed by a user, normalizing case and whitespace.
    ///
    /// Returns `None` if the code is not well formed.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim().to_ascii_uppercase();
        let body = code.strip_prefix(REFERENCE_PREFIX)?;
        let valid = body.len() == REFERENCE_LEN
            && body.bytes().all(|b| REFERENCE_ALPHABET.contains(&b));
        valid.then_some(Self(code))
    }

    /// Borrow the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File name for a downloaded sticker PNG.
///
/// Uses the reference code when the design has been saved, otherwise the
/// current time in milliseconds.
#[must_use]
pub fn download_file_name(reference: Option<&ReferenceCode>) -> String {
    match reference {
        Some(code) => format!("{DOWNLOAD_PREFIX}-{code}.png"),
        None => format!("{DOWNLOAD_PREFIX}-{}.png", now_ms()),
    }
}
