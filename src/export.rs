//! Export seams: clipboard, confirmation prompts and raster capture.
//!
//! The editor session drives these. Real implementations live at the
//! browser boundary; tests substitute in-memory ones.

use thiserror::Error;

use crate::ingest::is_embedded;
use crate::models::BannerSnapshot;
use crate::state::ImageSlot;

pub const PNG_FILE_NAME: &str = "event-banner.png";
pub const PNG_SCALE: f32 = 2.0;

// ============================================================================
// Collaborators
// ============================================================================

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// An OK/Cancel prompt. Returns `true` to proceed.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("no banner element to capture")]
    MissingElement,
    #[error("canvas tainted by cross-origin image: {0}")]
    Tainted(String),
    #[error("capture failed: {0}")]
    Failed(String),
}

/// Rasterizes a rendered banner fragment into PNG bytes at `scale`x.
pub trait RasterCapture {
    fn capture(&self, fragment: &str, scale: f32) -> Result<Vec<u8>, CaptureError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngDownload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// ============================================================================
// Local Image Warning
// ============================================================================

/// Slots whose image is an embedded `data:` URI, in display order.
pub fn embedded_images(snap: &BannerSnapshot) -> Vec<ImageSlot> {
    ImageSlot::ALL
        .into_iter()
        .filter(|slot| {
            let reference = match slot {
                ImageSlot::Background => &snap.image_url,
                ImageSlot::Logo => &snap.logo_url,
                ImageSlot::PartnerLogo => &snap.partner_logo_url,
            };
            is_embedded(reference)
        })
        .collect()
}

/// The advisory shown before copying HTML when images are not publicly
/// hosted, or `None` when every image is a link.
pub fn local_image_warning(snap: &BannerSnapshot) -> Option<String> {
    let names: Vec<&str> = embedded_images(snap).iter().map(|s| s.label()).collect();
    let (last, rest) = names.split_last()?;
    let listed = if rest.is_empty() {
        last.to_string()
    } else {
        format!("{} and {}", rest.join(", "), last)
    };
    let verb = if names.len() > 1 { "are" } else { "is" };

    Some(format!(
        "Your {listed} {verb} uploaded locally. For Mailchimp, you need publicly hosted image URLs.\n\n\
         Upload your images to Mailchimp Content Studio first, then replace the URLs in the HTML.\n\n\
         Copy the HTML anyway?"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BannerForm;

    fn snap(image: &str, logo: &str, partner: &str) -> BannerSnapshot {
        BannerSnapshot::from_form(&BannerForm {
            image_url: Some(image.to_string()),
            logo_url: Some(logo.to_string()),
            partner_logo_url: Some(partner.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_no_warning_for_hosted_images() {
        let s = snap("https://x.test/bg.jpg", "", "https://x.test/p.png");
        assert_eq!(local_image_warning(&s), None);
    }

    #[test]
    fn test_single_embedded_image() {
        let s = snap("", "data:image/png;base64,AAAA", "");
        let warning = local_image_warning(&s).unwrap();
        assert!(warning.starts_with("Your logo is uploaded locally."));
        assert!(warning.ends_with("Copy the HTML anyway?"));
    }

    #[test]
    fn test_uppercase_data_scheme_still_warns() {
        let s = snap("", "", "DATA:image/png;base64,AAAA");
        let warning = local_image_warning(&s).unwrap();
        assert!(warning.starts_with("Your partner logo is uploaded locally."));
    }

    #[test]
    fn test_two_embedded_images() {
        let s = snap("data:image/jpeg;base64,AAAA", "data:image/png;base64,AAAA", "");
        let warning = local_image_warning(&s).unwrap();
        assert!(warning.starts_with("Your background image and logo are uploaded locally."));
    }

    #[test]
    fn test_three_embedded_images() {
        let d = "data:image/png;base64,AAAA";
        let warning = local_image_warning(&snap(d, d, d)).unwrap();
        assert!(warning.starts_with("Your background image, logo and partner logo are uploaded"));
        assert_eq!(
            embedded_images(&snap(d, "https://x.test/l.png", d)),
            vec![ImageSlot::Background, ImageSlot::PartnerLogo]
        );
    }

    #[test]
    fn test_closure_confirm() {
        let mut seen = String::new();
        let mut prompt = |m: &str| {
            seen = m.to_string();
            false
        };
        assert!(!prompt.confirm("proceed?"));
        assert_eq!(seen, "proceed?");
    }
}
