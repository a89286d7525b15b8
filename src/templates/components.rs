//! Form controls for the editor page.
//!
//! Element ids follow the banner's wire field names so the page script can
//! collect a `BannerForm` by id.

use crate::banner::html_escape;
use crate::models::SizeSpec;

// ============================================================================
// Inputs
// ============================================================================

pub fn text_field(id: &str, label: &str, placeholder: &str) -> String {
    format!(
        r#"<div class="field">
            <label for="{id}">{label}</label>
            <input type="text" id="{id}" data-field="{id}" placeholder="{placeholder}" autocomplete="off">
        </div>"#,
        label = html_escape(label),
        placeholder = html_escape(placeholder),
    )
}

/// Native picker plus a hex text box. `default` must be `#RRGGBB`.
pub fn color_field(id: &str, label: &str, default: &str) -> String {
    format!(
        r#"<div class="field">
            <label for="{id}">{label}</label>
            <div class="color-row">
                <input type="color" id="{id}" data-field="{id}" value="{lower}">
                <input type="text" id="{id}_hex" data-hex-for="{id}" value="{default}" maxlength="7" spellcheck="false">
            </div>
        </div>"#,
        label = html_escape(label),
        lower = default.to_lowercase(),
    )
}

pub fn size_slider(id: &str, label: &str, spec: SizeSpec, hidden: bool) -> String {
    format!(
        r#"<div class="field" id="{id}_row"{style}>
            <label for="{id}">{label} <span class="value" id="{id}_value">{default}px</span></label>
            <input type="range" id="{id}" data-field="{id}" min="{min}" max="{max}" value="{default}">
        </div>"#,
        label = html_escape(label),
        default = spec.default,
        min = spec.min,
        max = spec.max,
        style = if hidden { r#" style="display:none""# } else { "" },
    )
}

// ============================================================================
// Image Upload
// ============================================================================

/// Drop area plus the "file selected" row for one image slot. `key` is the
/// slot name used by the page script (`background`, `logo`, `partner_logo`).
pub fn upload_area(key: &str, label: &str) -> String {
    format!(
        r#"<div class="field">
            <label>{label}</label>
            <label class="upload-area" id="{key}-upload-area">
                Click to upload an image
                <input type="file" id="{key}_upload" accept="image/*" data-slot="{key}">
            </label>
            <div class="file-selected" id="{key}-file-selected">
                <span class="name" id="{key}-file-name"></span>
                <button type="button" class="btn link" data-clear="{key}">Remove</button>
            </div>
        </div>"#,
        label = html_escape(label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LOGO_SIZE;

    #[test]
    fn test_color_field_carries_both_inputs() {
        let html = color_field("color_cta_bg", "Button", "#FCBA30");
        assert!(html.contains(r##"type="color" id="color_cta_bg" data-field="color_cta_bg" value="#fcba30""##));
        assert!(html.contains(r##"id="color_cta_bg_hex" data-hex-for="color_cta_bg" value="#FCBA30""##));
    }

    #[test]
    fn test_hidden_slider() {
        let html = size_slider("logo_size", "Logo size", LOGO_SIZE, true);
        assert!(html.contains(r#"id="logo_size_row" style="display:none""#));
        assert!(html.contains(r#"min="20" max="200" value="70""#));
    }

    #[test]
    fn test_labels_are_escaped() {
        assert!(text_field("dates", "Dates & times", "<when>").contains("Dates &amp; times"));
        assert!(upload_area("logo", "Logo").contains(r#"data-slot="logo""#));
    }
}
