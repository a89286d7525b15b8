//! HTML templates for the banner studio.
//!
//! ## Module Structure
//!
//! - `styles` - CSS for the editor page
//! - `components` - Form controls (text, color, slider, upload)
//! - `editor` - The editor page and its script
//! - `icons` - Inline SVG icons used inside the banner
//! - `email` - Standalone email document for HTML export

mod components;
mod editor;
mod email;
pub mod icons;
mod styles;

pub use editor::render_editor_page;
pub use email::render_email_document;
