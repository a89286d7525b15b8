//! Banner rendering.
//!
//! [`render_banner`] is the single templating path for the banner. The live
//! preview, the exported email document and the PNG capture all go through
//! it, so they stay visually identical. Everything it emits uses inline
//! styles only.

use crate::models::BannerSnapshot;
use crate::templates::icons::{arrow_icon, calendar_icon, pin_icon, PICTURE_ICON};

// ============================================================================
// Layout Constants
// ============================================================================

pub const BANNER_WIDTH: u32 = 600;
pub const BANNER_MIN_HEIGHT: u32 = 450;
pub const LOGO_MAX_WIDTH: u32 = 280;
pub const LOGO_GAP: u32 = 24;
pub const FALLBACK_BACKGROUND: &str = "#1a1a2e";

const TITLE_PLACEHOLDER: &str = r#"<span style="opacity:0.4;">Event Name</span>"#;

// ============================================================================
// Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Rendering
// ============================================================================

/// The placeholder shown while every text and image field is empty.
pub fn empty_state() -> String {
    format!(
        r#"<div class="banner-empty-state">{icon}<p>Fill in the fields to see your banner</p></div>"#,
        icon = PICTURE_ICON
    )
}

/// Render the preview fragment for a snapshot.
///
/// A blank snapshot short-circuits to [`empty_state`]; nothing else is
/// emitted in that case.
pub fn render_banner(snap: &BannerSnapshot) -> String {
    if snap.is_blank() {
        return empty_state();
    }
    render_banner_markup(snap)
}

/// Render the banner itself, placeholders included, regardless of how much
/// of the form is filled in.
pub fn render_banner_markup(snap: &BannerSnapshot) -> String {
    let text_color = &snap.color_text;
    let has_subheading = !snap.subheading.is_empty();

    let title_text = if snap.event_name.is_empty() {
        TITLE_PLACEHOLDER.to_string()
    } else {
        html_escape(&snap.event_name.to_uppercase())
    };

    let subheading = if has_subheading {
        format!(
            r#"<div style="font-size:{size}px; font-weight:500; color:{text_color}; line-height:1.3; margin-bottom:20px;">{text}</div>"#,
            size = snap.subheading_font_size,
            text = html_escape(&snap.subheading),
        )
    } else {
        String::new()
    };

    let location = if snap.location.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="display:flex; align-items:center; gap:6px; color:{text_color}; font-size:{size}px; font-weight:500;">{icon}{text}</div>"#,
            size = snap.details_font_size,
            icon = pin_icon(&snap.color_icon),
            text = html_escape(&snap.location),
        )
    };

    let dates = if snap.dates.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="display:flex; align-items:center; gap:6px; color:{text_color}; font-size:{size}px; font-weight:500; margin-top:8px;">{icon}{text}</div>"#,
            size = snap.details_font_size,
            icon = calendar_icon(&snap.color_icon),
            text = html_escape(&snap.dates),
        )
    };

    let cta = if snap.cta_text.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="margin-top:28px;"><div style="display:inline-flex; align-items:center; background:{bg}; color:{fg}; padding:12px 32px; border-radius:25px; font-size:{size}px; font-weight:700;">{text}{icon}</div></div>"#,
            bg = snap.color_cta_bg,
            fg = snap.color_cta_text,
            size = snap.cta_font_size,
            text = html_escape(&snap.cta_text),
            icon = arrow_icon(&snap.color_cta_text),
        )
    };

    format!(
        r#"<div class="banner" style="width:{width}px; max-width:100%; {background} overflow:hidden; font-family:'Montserrat', Arial, Helvetica, sans-serif;"><div style="background:linear-gradient(180deg, rgba(0,39,76,0.55) 0%, rgba(0,0,0,0.70) 100%); display:flex; flex-direction:column; align-items:center; justify-content:center; padding:50px 50px; text-align:center; min-height:{min_height}px; box-sizing:border-box;">{logos}<div style="font-size:{title_size}px; font-weight:800; color:{text_color}; line-height:1.2; margin-bottom:{title_margin}px; text-transform:uppercase; letter-spacing:0.02em;">{title_text}</div>{subheading}{location}{dates}{cta}</div></div>"#,
        width = BANNER_WIDTH,
        background = background_style(snap),
        min_height = BANNER_MIN_HEIGHT,
        logos = logo_block(snap),
        title_size = snap.title_font_size,
        title_margin = if has_subheading { 8 } else { 20 },
    )
}

fn background_style(snap: &BannerSnapshot) -> String {
    if snap.image_url.is_empty() {
        format!("background:{};", FALLBACK_BACKGROUND)
    } else {
        format!(
            "background-image:url('{}'); background-size:cover; background-position:center;",
            html_escape(&css_url(&snap.image_url))
        )
    }
}

/// Percent-encode the characters that could end a quoted CSS `url()` or
/// start a new declaration. The attribute decoder runs before the CSS
/// parser, so HTML escaping alone does not cover them.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if matches!(c, '\'' | '"' | '(' | ')' | '\\') || c.is_whitespace() || c.is_control() {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn logo_img(src: &str, height: u32, alt: &str, margin_bottom: u32) -> String {
    format!(
        r#"<img src="{src}" alt="{alt}" style="max-height:{height}px; max-width:{max_width}px; width:auto; height:auto; margin-bottom:{margin_bottom}px; object-fit:contain;">"#,
        src = html_escape(src),
        max_width = LOGO_MAX_WIDTH,
    )
}

/// Both logos sit side by side, a single logo stands alone, and with no
/// logo at all a dashed drop target takes their place. Neither logo takes
/// precedence over the other.
fn logo_block(snap: &BannerSnapshot) -> String {
    let main = (!snap.logo_url.is_empty()).then_some((&snap.logo_url, snap.logo_size, "Logo"));
    let partner = (!snap.partner_logo_url.is_empty()).then_some((
        &snap.partner_logo_url,
        snap.partner_logo_size,
        "Partner logo",
    ));

    match (main, partner) {
        (Some(a), Some(b)) => format!(
            r#"<div style="display:flex; align-items:center; justify-content:center; gap:{gap}px; margin-bottom:20px;">{first}{second}</div>"#,
            gap = LOGO_GAP,
            first = logo_img(a.0, a.1, a.2, 0),
            second = logo_img(b.0, b.1, b.2, 0),
        ),
        (Some(only), None) | (None, Some(only)) => logo_img(only.0, only.1, only.2, 20),
        (None, None) => r#"<div style="height:70px; width:200px; border:2px dashed rgba(255,255,255,0.3); border-radius:8px; display:flex; align-items:center; justify-content:center; margin-bottom:20px; color:rgba(255,255,255,0.4); font-size:12px;">Upload logo</div>"#.to_string(),
    }
}
