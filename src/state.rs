//! Form state for the banner editor.
//!
//! [`FormStateStore`] owns every editable value: typed text, the color
//! pickers, the size sliders and the three image references that arrive from
//! file reads or the photo picker. Each successful change notifies the
//! subscribed observers with a fresh [`BannerSnapshot`]. The live preview and
//! the upload widgets are both just observers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::color::{HexColorInput, HexInput};
use crate::models::{
    BannerForm, BannerSnapshot, DEFAULT_CTA_BG, DEFAULT_CTA_TEXT_COLOR, DEFAULT_ICON_COLOR,
    DEFAULT_TEXT_COLOR,
};

// ============================================================================
// Field Identifiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    EventName,
    Subheading,
    Location,
    Dates,
    CtaText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorField {
    Text,
    Icon,
    CtaBackground,
    CtaText,
}

impl ColorField {
    fn default_value(self) -> &'static str {
        match self {
            ColorField::Text => DEFAULT_TEXT_COLOR,
            ColorField::Icon => DEFAULT_ICON_COLOR,
            ColorField::CtaBackground => DEFAULT_CTA_BG,
            ColorField::CtaText => DEFAULT_CTA_TEXT_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeField {
    TitleFont,
    SubheadingFont,
    DetailsFont,
    CtaFont,
    LogoSize,
    PartnerLogoSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Background,
    Logo,
    PartnerLogo,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 3] = [ImageSlot::Background, ImageSlot::Logo, ImageSlot::PartnerLogo];

    pub fn label(self) -> &'static str {
        match self {
            ImageSlot::Background => "background image",
            ImageSlot::Logo => "logo",
            ImageSlot::PartnerLogo => "partner logo",
        }
    }
}

/// Where an image reference came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    Upload { file_name: String },
    Search { photographer: String },
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Text(TextField),
    Color(ColorField),
    Size(SizeField),
    ImageSet { slot: ImageSlot, origin: ImageOrigin },
    ImageCleared(ImageSlot),
}

pub type Observer = Box<dyn FnMut(&StateChange, &BannerSnapshot) + Send>;

// ============================================================================
// Store
// ============================================================================

pub struct FormStateStore {
    text: HashMap<TextField, String>,
    colors: HashMap<ColorField, HexColorInput>,
    sizes: HashMap<SizeField, f64>,
    images: HashMap<ImageSlot, String>,
    observers: Vec<Observer>,
}

impl FormStateStore {
    pub fn new() -> Self {
        let colors = [
            ColorField::Text,
            ColorField::Icon,
            ColorField::CtaBackground,
            ColorField::CtaText,
        ]
        .into_iter()
        .map(|field| (field, HexColorInput::new(field.default_value())))
        .collect();

        Self {
            text: HashMap::new(),
            colors,
            sizes: HashMap::new(),
            images: HashMap::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&StateChange, &BannerSnapshot) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: StateChange) {
        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer(&change, &snapshot);
        }
    }

    /// Build the defaulted snapshot for the current values.
    pub fn snapshot(&self) -> BannerSnapshot {
        let text = |f: TextField| self.text.get(&f).cloned();
        let color = |f: ColorField| self.colors.get(&f).map(|c| c.value().to_string());
        let size = |f: SizeField| self.sizes.get(&f).copied();
        let image = |s: ImageSlot| self.images.get(&s).cloned();

        BannerSnapshot::from_form(&BannerForm {
            event_name: text(TextField::EventName),
            subheading: text(TextField::Subheading),
            location: text(TextField::Location),
            dates: text(TextField::Dates),
            cta_text: text(TextField::CtaText),
            image_url: image(ImageSlot::Background),
            logo_url: image(ImageSlot::Logo),
            partner_logo_url: image(ImageSlot::PartnerLogo),
            color_text: color(ColorField::Text),
            color_icon: color(ColorField::Icon),
            color_cta_bg: color(ColorField::CtaBackground),
            color_cta_text: color(ColorField::CtaText),
            title_font_size: size(SizeField::TitleFont),
            subheading_font_size: size(SizeField::SubheadingFont),
            details_font_size: size(SizeField::DetailsFont),
            cta_font_size: size(SizeField::CtaFont),
            logo_size: size(SizeField::LogoSize),
            partner_logo_size: size(SizeField::PartnerLogoSize),
        })
    }

    pub fn text(&self, field: TextField) -> &str {
        self.text.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_text(&mut self, field: TextField, value: &str) {
        self.text.insert(field, value.to_string());
        self.notify(StateChange::Text(field));
    }

    pub fn color(&self, field: ColorField) -> &str {
        self.colors
            .get(&field)
            .map(HexColorInput::value)
            .unwrap_or_else(|| field.default_value())
    }

    /// Feed the color text box. Only a complete color reaches the preview.
    pub fn input_color(&mut self, field: ColorField, text: &str) -> HexInput {
        let result = self
            .colors
            .entry(field)
            .or_insert_with(|| HexColorInput::new(field.default_value()))
            .input(text);
        if matches!(result, HexInput::Applied(_)) {
            self.notify(StateChange::Color(field));
        }
        result
    }

    /// The value the color text box resets to when it loses focus.
    pub fn blur_color(&self, field: ColorField) -> String {
        self.color(field).to_string()
    }

    pub fn set_size(&mut self, field: SizeField, value: f64) {
        self.sizes.insert(field, value);
        self.notify(StateChange::Size(field));
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        self.images.get(&slot).map(String::as_str)
    }

    /// Store an image reference as-is. Returns `false` (and changes nothing)
    /// for an empty reference.
    pub fn set_image(&mut self, slot: ImageSlot, reference: &str, origin: ImageOrigin) -> bool {
        if reference.trim().is_empty() {
            return false;
        }
        self.images.insert(slot, reference.to_string());
        self.notify(StateChange::ImageSet { slot, origin });
        true
    }

    pub fn clear_image(&mut self, slot: ImageSlot) {
        if self.images.remove(&slot).is_some() {
            self.notify(StateChange::ImageCleared(slot));
        }
    }

    pub fn set_background_image(&mut self, data_or_url: &str) -> bool {
        self.set_image(ImageSlot::Background, data_or_url, ImageOrigin::Link)
    }

    pub fn clear_background_image(&mut self) {
        self.clear_image(ImageSlot::Background)
    }

    pub fn set_logo(&mut self, data_or_url: &str) -> bool {
        self.set_image(ImageSlot::Logo, data_or_url, ImageOrigin::Link)
    }

    pub fn clear_logo(&mut self) {
        self.clear_image(ImageSlot::Logo)
    }

    pub fn set_partner_logo(&mut self, data_or_url: &str) -> bool {
        self.set_image(ImageSlot::PartnerLogo, data_or_url, ImageOrigin::Link)
    }

    pub fn clear_partner_logo(&mut self) {
        self.clear_image(ImageSlot::PartnerLogo)
    }
}

impl Default for FormStateStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Upload Widget Affordances
// ============================================================================

/// What the upload widget for one image slot shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotAffordance {
    /// `Some(label)` swaps the drop area for the "file selected" row.
    pub selected: Option<String>,
    pub size_slider_visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Affordances {
    slots: HashMap<ImageSlot, SlotAffordance>,
}

impl Affordances {
    /// Subscribe a shared affordance tracker to `store`.
    pub fn attach(store: &mut FormStateStore) -> Arc<Mutex<Affordances>> {
        let shared = Arc::new(Mutex::new(Affordances::default()));
        let handle = Arc::clone(&shared);
        store.subscribe(move |change, _| {
            let mut affordances = handle.lock().unwrap_or_else(|poisoned| {
                warn!("affordance lock poisoned; recovering");
                poisoned.into_inner()
            });
            affordances.apply(change);
        });
        shared
    }

    pub fn slot(&self, slot: ImageSlot) -> SlotAffordance {
        self.slots.get(&slot).cloned().unwrap_or_default()
    }

    fn apply(&mut self, change: &StateChange) {
        match change {
            StateChange::ImageSet { slot, origin } => {
                let selected = match origin {
                    ImageOrigin::Upload { file_name } => file_name.clone(),
                    ImageOrigin::Search { photographer } => format!("Photo by {}", photographer),
                    ImageOrigin::Link => "Selected image".to_string(),
                };
                self.slots.insert(
                    *slot,
                    SlotAffordance {
                        selected: Some(selected),
                        size_slider_visible: *slot != ImageSlot::Background,
                    },
                );
            }
            StateChange::ImageCleared(slot) => {
                self.slots.remove(slot);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::{empty_state, render_banner};

    fn recorder(store: &mut FormStateStore) -> Arc<Mutex<Vec<(StateChange, BannerSnapshot)>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = Arc::clone(&log);
        store.subscribe(move |change, snap| {
            handle.lock().unwrap().push((change.clone(), snap.clone()));
        });
        log
    }

    #[test]
    fn test_fresh_store_is_blank_and_defaulted() {
        let store = FormStateStore::new();
        let snap = store.snapshot();
        assert!(snap.is_blank());
        assert_eq!(snap.color_cta_bg, "#FCBA30");
        assert_eq!(snap.color_cta_text, "#00274C");
    }

    #[test]
    fn test_every_setter_notifies_with_new_snapshot() {
        let mut store = FormStateStore::new();
        let log = recorder(&mut store);

        store.set_text(TextField::EventName, "Expo");
        store.set_background_image("https://x.test/bg.jpg");
        store.set_logo("data:image/png;base64,AAAA");
        store.set_partner_logo("https://x.test/p.png");
        store.set_size(SizeField::LogoSize, 90.0);

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 5);
        assert_eq!(log[0].1.event_name, "Expo");
        assert_eq!(log[1].1.image_url, "https://x.test/bg.jpg");
        assert_eq!(log[2].1.logo_url, "data:image/png;base64,AAAA");
        assert_eq!(log[3].1.partner_logo_url, "https://x.test/p.png");
        assert_eq!(log[4].1.logo_size, 90);
    }

    #[test]
    fn test_clear_resets_slot_and_notifies_once() {
        let mut store = FormStateStore::new();
        store.set_logo("https://x.test/l.png");
        let log = recorder(&mut store);

        store.clear_logo();
        store.clear_logo();

        assert_eq!(store.image(ImageSlot::Logo), None);
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, StateChange::ImageCleared(ImageSlot::Logo));
        assert!(log[0].1.logo_url.is_empty());
    }

    #[test]
    fn test_each_slot_clears_independently() {
        let mut store = FormStateStore::new();
        store.set_background_image("https://x.test/bg.jpg");
        store.set_logo("https://x.test/l.png");
        store.set_partner_logo("data:image/png;base64,AAAA");
        let log = recorder(&mut store);

        store.clear_background_image();
        let snap = store.snapshot();
        assert!(snap.image_url.is_empty());
        assert_eq!(snap.logo_url, "https://x.test/l.png");
        assert_eq!(snap.partner_logo_url, "data:image/png;base64,AAAA");

        store.clear_partner_logo();
        let snap = store.snapshot();
        assert!(snap.partner_logo_url.is_empty());
        assert_eq!(snap.logo_url, "https://x.test/l.png");

        store.clear_logo();
        assert!(store.snapshot().is_blank());

        let log = log.lock().unwrap();
        let changes: Vec<_> = log.iter().map(|(change, _)| change.clone()).collect();
        assert_eq!(
            changes,
            vec![
                StateChange::ImageCleared(ImageSlot::Background),
                StateChange::ImageCleared(ImageSlot::PartnerLogo),
                StateChange::ImageCleared(ImageSlot::Logo),
            ]
        );
        assert!(log[0].1.image_url.is_empty());
        assert!(log[1].1.partner_logo_url.is_empty());
    }

    #[test]
    fn test_empty_image_reference_is_rejected() {
        let mut store = FormStateStore::new();
        let log = recorder(&mut store);
        assert!(!store.set_background_image("  "));
        assert_eq!(store.image(ImageSlot::Background), None);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_url_is_accepted_verbatim() {
        let mut store = FormStateStore::new();
        assert!(store.set_background_image("not a url at all"));
        assert_eq!(store.snapshot().image_url, "not a url at all");
    }

    #[test]
    fn test_invalid_color_keeps_last_value_and_stays_quiet() {
        let mut store = FormStateStore::new();
        let log = recorder(&mut store);

        assert_eq!(
            store.input_color(ColorField::CtaBackground, "ff00ff"),
            HexInput::Applied("#FF00FF".to_string())
        );
        assert_eq!(store.input_color(ColorField::CtaBackground, "zz0000"), HexInput::Rejected);
        assert_eq!(store.input_color(ColorField::CtaBackground, "#FF"), HexInput::Pending);

        assert_eq!(store.snapshot().color_cta_bg, "#FF00FF");
        assert_eq!(store.blur_color(ColorField::CtaBackground), "#FF00FF");
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_preview_observer_tracks_renders() {
        let mut store = FormStateStore::new();
        let preview = Arc::new(Mutex::new(String::new()));
        let handle = Arc::clone(&preview);
        store.subscribe(move |_, snap| *handle.lock().unwrap() = render_banner(snap));

        store.set_text(TextField::EventName, "Spring Fest");
        assert!(preview.lock().unwrap().contains("SPRING FEST"));

        store.set_text(TextField::EventName, "");
        assert_eq!(*preview.lock().unwrap(), empty_state());
    }

    #[test]
    fn test_affordances_follow_image_changes() {
        let mut store = FormStateStore::new();
        let affordances = Affordances::attach(&mut store);

        store.set_image(
            ImageSlot::Logo,
            "data:image/png;base64,AAAA",
            ImageOrigin::Upload { file_name: "logo.png".to_string() },
        );
        store.set_image(
            ImageSlot::Background,
            "https://images.test/full.jpg",
            ImageOrigin::Search { photographer: "Ana".to_string() },
        );

        {
            let a = affordances.lock().unwrap();
            let logo = a.slot(ImageSlot::Logo);
            assert_eq!(logo.selected.as_deref(), Some("logo.png"));
            assert!(logo.size_slider_visible);
            let bg = a.slot(ImageSlot::Background);
            assert_eq!(bg.selected.as_deref(), Some("Photo by Ana"));
            assert!(!bg.size_slider_visible);
            assert_eq!(a.slot(ImageSlot::PartnerLogo), SlotAffordance::default());
        }

        store.clear_logo();
        assert_eq!(affordances.lock().unwrap().slot(ImageSlot::Logo), SlotAffordance::default());
    }

    #[test]
    fn test_affordances_survive_a_poisoned_lock() {
        let mut store = FormStateStore::new();
        let affordances = Affordances::attach(&mut store);

        let handle = Arc::clone(&affordances);
        let _ = std::thread::spawn(move || {
            let _guard = handle.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(affordances.is_poisoned());

        store.set_image(
            ImageSlot::PartnerLogo,
            "https://x.test/p.png",
            ImageOrigin::Link,
        );
        let a = affordances.lock().unwrap_or_else(|p| p.into_inner());
        assert!(a.slot(ImageSlot::PartnerLogo).size_slider_visible);
    }
}
