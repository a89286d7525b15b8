//! Standalone email document for the "Copy Mailchimp HTML" export.
//!
//! Wraps the banner markup in the centered 600px presentation table that
//! Mailchimp's custom-code blocks expect.

use crate::banner::{html_escape, render_banner_markup, BANNER_WIDTH};
use crate::models::BannerSnapshot;

pub fn render_email_document(snap: &BannerSnapshot) -> String {
    let title = if snap.event_name.is_empty() {
        "Event Banner".to_string()
    } else {
        html_escape(&snap.event_name)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta http-equiv="X-UA-Compatible" content="IE=edge">
    <title>{title}</title>
</head>
<body style="margin:0; padding:0;">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0">
        <tr>
            <td align="center" style="padding:0;">
                <table role="presentation" width="{width}" cellpadding="0" cellspacing="0" border="0" style="width:{width}px; max-width:100%;">
                    <tr>
                        <td>
{banner}
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
        width = BANNER_WIDTH,
        banner = render_banner_markup(snap),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::render_banner;
    use crate::models::BannerForm;

    #[test]
    fn test_document_embeds_preview_markup() {
        let snap = BannerSnapshot::from_form(&BannerForm {
            event_name: Some("Tom & Jerry Expo".to_string()),
            cta_text: Some("Register".to_string()),
            ..Default::default()
        });
        let doc = render_email_document(&snap);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Tom &amp; Jerry Expo</title>"));
        assert!(doc.contains(&render_banner(&snap)));
        assert!(doc.contains(r#"width="600""#));
    }

    #[test]
    fn test_blank_snapshot_still_exports_banner() {
        let doc = render_email_document(&BannerSnapshot::default());
        assert!(doc.contains("<title>Event Banner</title>"));
        assert!(doc.contains(r#"class="banner""#));
        assert!(!doc.contains("banner-empty-state"));
    }
}
