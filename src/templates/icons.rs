//! Inline SVG icons used by the banner.
//!
//! Each icon takes a single color. Callers pass validated `#RRGGBB` values
//! straight from a snapshot.

pub fn pin_icon(color: &str) -> String {
    format!(
        r#"<svg width="14" height="18" viewBox="0 0 14 18" fill="none" style="flex-shrink:0;"><path d="M7 0C3.13 0 0 3.13 0 7c0 4.87 6.25 10.5 6.52 10.74a.67.67 0 0 0 .96 0C7.75 17.5 14 11.87 14 7c0-3.87-3.13-7-7-7zm0 9.5a2.5 2.5 0 1 1 0-5 2.5 2.5 0 0 1 0 5z" fill="{color}"/></svg>"#
    )
}

pub fn calendar_icon(color: &str) -> String {
    format!(
        r#"<svg width="16" height="16" viewBox="0 0 16 16" fill="none" style="flex-shrink:0;"><rect x="1" y="2.5" width="14" height="12" rx="2" stroke="{color}" stroke-width="1.5" fill="none"/><line x1="1" y1="6.5" x2="15" y2="6.5" stroke="{color}" stroke-width="1.5"/><line x1="5" y1="1" x2="5" y2="4" stroke="{color}" stroke-width="1.5" stroke-linecap="round"/><line x1="11" y1="1" x2="11" y2="4" stroke="{color}" stroke-width="1.5" stroke-linecap="round"/></svg>"#
    )
}

/// Trailing arrow inside the call-to-action pill.
pub fn arrow_icon(color: &str) -> String {
    format!(
        r#"<svg width="16" height="16" viewBox="0 0 16 16" fill="none" style="flex-shrink:0; margin-left:6px;"><path d="M3 8h10M9 4l4 4-4 4" stroke="{color}" stroke-width="1.8" stroke-linecap="round" stroke-linejoin="round"/></svg>"#
    )
}

/// Picture glyph shown in the empty state. Inherits `currentColor`.
pub const PICTURE_ICON: &str = r#"<svg width="48" height="48" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round"><rect x="3" y="3" width="18" height="18" rx="2" ry="2"/><circle cx="8.5" cy="8.5" r="1.5"/><polyline points="21 15 16 10 5 21"/></svg>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_bind_their_color() {
        assert!(pin_icon("#123456").contains(r##"fill="#123456""##));
        assert_eq!(calendar_icon("#ABCDEF").matches("#ABCDEF").count(), 4);
        assert!(arrow_icon("#00274C").contains(r##"stroke="#00274C""##));
    }
}
