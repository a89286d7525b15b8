//! Data models for the banner studio.
//!
//! This module contains the banner snapshot that drives every render pass,
//! its loosely-typed wire form, and the request/response bodies of the
//! JSON API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::normalize_hex;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_ICON_COLOR: &str = "#FFFFFF";
pub const DEFAULT_CTA_BG: &str = "#FCBA30";
pub const DEFAULT_CTA_TEXT_COLOR: &str = "#00274C";

/// Default and allowed range of a pixel-size field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub default: u32,
    pub min: u32,
    pub max: u32,
}

impl SizeSpec {
    const fn new(default: u32, min: u32, max: u32) -> Self {
        Self { default, min, max }
    }

    /// Resolve an optional raw value. Non-finite input takes the default,
    /// everything else is rounded and clamped into range.
    pub fn resolve(&self, raw: Option<f64>) -> u32 {
        match raw {
            Some(v) if v.is_finite() => {
                (v.round().max(0.0) as u32).clamp(self.min, self.max)
            }
            _ => self.default,
        }
    }
}

pub const TITLE_FONT: SizeSpec = SizeSpec::new(28, 12, 72);
pub const SUBHEADING_FONT: SizeSpec = SizeSpec::new(18, 10, 48);
pub const DETAILS_FONT: SizeSpec = SizeSpec::new(16, 10, 36);
pub const CTA_FONT: SizeSpec = SizeSpec::new(15, 10, 36);
pub const LOGO_SIZE: SizeSpec = SizeSpec::new(70, 20, 200);

// ============================================================================
// Wire Form
// ============================================================================

/// A banner form exactly as the browser sends it. Every field is optional
/// and unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BannerForm {
    pub event_name: Option<String>,
    pub subheading: Option<String>,
    pub location: Option<String>,
    pub dates: Option<String>,
    pub cta_text: Option<String>,
    pub image_url: Option<String>,
    pub logo_url: Option<String>,
    pub partner_logo_url: Option<String>,
    pub color_text: Option<String>,
    pub color_icon: Option<String>,
    pub color_cta_bg: Option<String>,
    pub color_cta_text: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub title_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub subheading_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub details_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub cta_font_size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub logo_size: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub partner_logo_size: Option<f64>,
}

/// Range inputs post their value as a string; accept either form.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

// ============================================================================
// Snapshot
// ============================================================================

/// The complete, defaulted field values for one render pass.
///
/// Only [`BannerSnapshot::from_form`] builds one, so no field is ever
/// missing or out of range by the time the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BannerSnapshot {
    pub event_name: String,
    pub subheading: String,
    pub location: String,
    pub dates: String,
    pub cta_text: String,
    pub image_url: String,
    pub logo_url: String,
    pub partner_logo_url: String,
    pub color_text: String,
    pub color_icon: String,
    pub color_cta_bg: String,
    pub color_cta_text: String,
    pub title_font_size: u32,
    pub subheading_font_size: u32,
    pub details_font_size: u32,
    pub cta_font_size: u32,
    pub logo_size: u32,
    pub partner_logo_size: u32,
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn color_or(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .and_then(normalize_hex)
        .unwrap_or_else(|| fallback.to_string())
}

impl BannerSnapshot {
    pub fn from_form(form: &BannerForm) -> Self {
        Self {
            event_name: trimmed(&form.event_name),
            subheading: trimmed(&form.subheading),
            location: trimmed(&form.location),
            dates: trimmed(&form.dates),
            cta_text: trimmed(&form.cta_text),
            image_url: trimmed(&form.image_url),
            logo_url: trimmed(&form.logo_url),
            partner_logo_url: trimmed(&form.partner_logo_url),
            color_text: color_or(&form.color_text, DEFAULT_TEXT_COLOR),
            color_icon: color_or(&form.color_icon, DEFAULT_ICON_COLOR),
            color_cta_bg: color_or(&form.color_cta_bg, DEFAULT_CTA_BG),
            color_cta_text: color_or(&form.color_cta_text, DEFAULT_CTA_TEXT_COLOR),
            title_font_size: TITLE_FONT.resolve(form.title_font_size),
            subheading_font_size: SUBHEADING_FONT.resolve(form.subheading_font_size),
            details_font_size: DETAILS_FONT.resolve(form.details_font_size),
            cta_font_size: CTA_FONT.resolve(form.cta_font_size),
            logo_size: LOGO_SIZE.resolve(form.logo_size),
            partner_logo_size: LOGO_SIZE.resolve(form.partner_logo_size),
        }
    }

    /// The wire form this snapshot was (or could have been) built from.
    pub fn to_form(&self) -> BannerForm {
        BannerForm {
            event_name: Some(self.event_name.clone()),
            subheading: Some(self.subheading.clone()),
            location: Some(self.location.clone()),
            dates: Some(self.dates.clone()),
            cta_text: Some(self.cta_text.clone()),
            image_url: Some(self.image_url.clone()),
            logo_url: Some(self.logo_url.clone()),
            partner_logo_url: Some(self.partner_logo_url.clone()),
            color_text: Some(self.color_text.clone()),
            color_icon: Some(self.color_icon.clone()),
            color_cta_bg: Some(self.color_cta_bg.clone()),
            color_cta_text: Some(self.color_cta_text.clone()),
            title_font_size: Some(self.title_font_size as f64),
            subheading_font_size: Some(self.subheading_font_size as f64),
            details_font_size: Some(self.details_font_size as f64),
            cta_font_size: Some(self.cta_font_size as f64),
            logo_size: Some(self.logo_size as f64),
            partner_logo_size: Some(self.partner_logo_size as f64),
        }
    }

    /// True when no text or image field carries anything to show.
    pub fn is_blank(&self) -> bool {
        [
            &self.event_name,
            &self.subheading,
            &self.location,
            &self.dates,
            &self.cta_text,
            &self.image_url,
            &self.logo_url,
            &self.partner_logo_url,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

impl Default for BannerSnapshot {
    fn default() -> Self {
        Self::from_form(&BannerForm::default())
    }
}

impl From<BannerForm> for BannerSnapshot {
    fn from(form: BannerForm) -> Self {
        Self::from_form(&form)
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlResponse {
    pub html: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// One stock photo candidate for the background.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageResult {
    pub thumb: String,
    pub full: String,
    pub photographer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub images: Vec<ImageResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub data_uri: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
