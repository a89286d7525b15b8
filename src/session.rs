//! Editor session: turns user actions into store mutations, remote calls
//! and toast notifications.
//!
//! Every action takes `&mut self`, so a second action cannot start while one
//! is still awaiting its request. State is only touched once an action has
//! fully succeeded; failures end in a toast and leave the form as it was.

use std::path::Path;

use tracing::{info, warn};

use crate::banner::render_banner;
use crate::client::{ClientError, StudioApi};
use crate::export::{
    local_image_warning, Clipboard, Confirm, PngDownload, RasterCapture, PNG_FILE_NAME, PNG_SCALE,
};
use crate::ingest::read_image_file;
use crate::models::ImageResult;
use crate::state::{FormStateStore, ImageOrigin, ImageSlot, TextField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
}

/// Transient user-visible messages.
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

impl Notifier for Vec<Toast> {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Copied,
    Cancelled,
    Failed,
}

pub struct EditorSession<A, N> {
    store: FormStateStore,
    api: A,
    notifier: N,
    suggestions: Vec<String>,
    search_results: Vec<ImageResult>,
}

impl<A: StudioApi, N: Notifier> EditorSession<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self::with_store(FormStateStore::new(), api, notifier)
    }

    pub fn with_store(store: FormStateStore, api: A, notifier: N) -> Self {
        Self {
            store,
            api,
            notifier,
            suggestions: Vec::new(),
            search_results: Vec::new(),
        }
    }

    pub fn store(&self) -> &FormStateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FormStateStore {
        &mut self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn search_results(&self) -> &[ImageResult] {
        &self.search_results
    }

    pub fn preview(&self) -> String {
        render_banner(&self.store.snapshot())
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.notifier.notify(Toast {
            message: message.into(),
            is_error: false,
        });
    }

    fn toast_error(&mut self, message: impl Into<String>) {
        self.notifier.notify(Toast {
            message: message.into(),
            is_error: true,
        });
    }

    fn remote_failure(&mut self, err: ClientError, fallback: &str) {
        warn!(error = %err, "{}", fallback);
        match err {
            ClientError::Service(message) => self.toast_error(message),
            _ => self.toast_error(fallback),
        }
    }

    // ------------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------------

    /// Read an image from disk into `slot`.
    pub async fn upload_image(&mut self, slot: ImageSlot, path: &Path) -> bool {
        match read_image_file(path).await {
            Ok(image) => {
                info!(file = %image.file_name, mime = %image.mime, "image ingested");
                self.store.set_image(
                    slot,
                    &image.data_uri,
                    ImageOrigin::Upload {
                        file_name: image.file_name,
                    },
                )
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "image ingestion failed");
                self.toast_error(format!("Could not load {}: {}", slot.label(), err));
                false
            }
        }
    }

    pub async fn suggest_images(&mut self) -> bool {
        let location = self.store.text(TextField::Location).trim().to_string();
        if location.is_empty() {
            self.toast_error("Enter a location first");
            return false;
        }

        match self.api.suggest(&location).await {
            Ok(terms) => {
                self.suggestions = terms;
                true
            }
            Err(err) => {
                self.remote_failure(err, "Failed to get suggestions");
                false
            }
        }
    }

    pub fn copy_suggestion<C: Clipboard>(&mut self, index: usize, clipboard: &mut C) -> bool {
        let Some(term) = self.suggestions.get(index).cloned() else {
            return false;
        };
        match clipboard.write_text(&term) {
            Ok(()) => {
                self.toast(format!("Copied: {}", term));
                true
            }
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                self.toast_error("Failed to copy");
                false
            }
        }
    }

    pub async fn search_images(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            self.toast_error("Enter a search term first");
            return false;
        }

        match self.api.search(query).await {
            Ok(images) => {
                if images.is_empty() {
                    self.toast("No images found");
                }
                self.search_results = images;
                true
            }
            Err(err) => {
                self.remote_failure(err, "Image search failed");
                false
            }
        }
    }

    /// Use a search result as the background, exactly as an upload would.
    pub fn select_search_result(&mut self, index: usize) -> bool {
        let Some(result) = self.search_results.get(index).cloned() else {
            return false;
        };
        self.store.set_image(
            ImageSlot::Background,
            &result.full,
            ImageOrigin::Search {
                photographer: result.photographer,
            },
        )
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    pub async fn copy_mailchimp_html<P, C>(&mut self, prompt: &mut P, clipboard: &mut C) -> ExportOutcome
    where
        P: Confirm,
        C: Clipboard,
    {
        let snapshot = self.store.snapshot();

        if let Some(warning) = local_image_warning(&snapshot) {
            if !prompt.confirm(&warning) {
                return ExportOutcome::Cancelled;
            }
        }

        let html = match self.api.render(&snapshot).await {
            Ok(html) => html,
            Err(err) => {
                warn!(error = %err, "render request failed");
                self.toast_error("Failed to copy HTML");
                return ExportOutcome::Failed;
            }
        };

        match clipboard.write_text(&html) {
            Ok(()) => {
                self.toast("Mailchimp HTML copied to clipboard!");
                ExportOutcome::Copied
            }
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                self.toast_error("Failed to copy HTML");
                ExportOutcome::Failed
            }
        }
    }

    pub fn download_png<R: RasterCapture>(&mut self, capture: &R) -> Option<PngDownload> {
        let snapshot = self.store.snapshot();
        if snapshot.is_blank() {
            self.toast_error("Fill in the banner details first");
            return None;
        }

        self.toast("Generating PNG...");
        match capture.capture(&render_banner(&snapshot), PNG_SCALE) {
            Ok(bytes) => {
                self.toast("PNG downloaded!");
                Some(PngDownload {
                    file_name: PNG_FILE_NAME.to_string(),
                    bytes,
                })
            }
            Err(err) => {
                warn!(error = %err, "png capture failed");
                self.toast_error("Failed to generate PNG");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::empty_state;
    use crate::export::CaptureError;
    use crate::models::BannerSnapshot;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeApi {
        suggestions: Option<Vec<String>>,
        images: Option<Vec<ImageResult>>,
        service_error: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn fail<T>(&self) -> Result<T, ClientError> {
            match &self.service_error {
                Some(msg) => Err(ClientError::Service(msg.clone())),
                None => Err(ClientError::Decode("offline".to_string())),
            }
        }
    }

    impl StudioApi for FakeApi {
        async fn suggest(&self, _location: &str) -> Result<Vec<String>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.suggestions.clone().map_or_else(|| self.fail(), Ok)
        }

        async fn search(&self, _query: &str) -> Result<Vec<ImageResult>, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.images.clone().map_or_else(|| self.fail(), Ok)
        }

        async fn render(&self, snapshot: &BannerSnapshot) -> Result<String, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.service_error {
                Some(_) => self.fail(),
                None => Ok(crate::templates::render_email_document(snapshot)),
            }
        }

        async fn preview(&self, snapshot: &BannerSnapshot) -> Result<String, ClientError> {
            Ok(render_banner(snapshot))
        }
    }

    #[derive(Default)]
    struct MemoryClipboard(Vec<String>);

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), String> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    struct FixedCapture(Result<Vec<u8>, CaptureError>);

    impl RasterCapture for FixedCapture {
        fn capture(&self, fragment: &str, scale: f32) -> Result<Vec<u8>, CaptureError> {
            assert!(fragment.starts_with(r#"<div class="banner""#));
            assert_eq!(scale, 2.0);
            self.0.clone()
        }
    }

    fn session(api: FakeApi) -> EditorSession<FakeApi, Vec<Toast>> {
        EditorSession::new(api, Vec::new())
    }

    fn photo(full: &str, who: &str) -> ImageResult {
        ImageResult {
            thumb: format!("{}?w=200", full),
            full: full.to_string(),
            photographer: who.to_string(),
            alt: None,
        }
    }

    #[tokio::test]
    async fn test_suggest_without_location_sends_nothing() {
        let mut s = session(FakeApi::default());
        assert!(!s.suggest_images().await);
        assert_eq!(s.api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            s.notifier().last(),
            Some(&Toast {
                message: "Enter a location first".to_string(),
                is_error: true
            })
        );
    }

    #[tokio::test]
    async fn test_suggest_and_copy_term() {
        let mut s = session(FakeApi {
            suggestions: Some(vec!["Austin skyline".to_string(), "Texas capitol".to_string()]),
            ..Default::default()
        });
        s.store_mut().set_text(TextField::Location, "  Austin, TX ");
        assert!(s.suggest_images().await);
        assert_eq!(s.suggestions().len(), 2);

        let mut clipboard = MemoryClipboard::default();
        assert!(s.copy_suggestion(1, &mut clipboard));
        assert_eq!(clipboard.0, vec!["Texas capitol"]);
        assert_eq!(s.notifier().last().unwrap().message, "Copied: Texas capitol");
        assert!(!s.copy_suggestion(9, &mut clipboard));
    }

    #[tokio::test]
    async fn test_remote_error_surfaces_service_message_and_keeps_state() {
        let mut s = session(FakeApi {
            service_error: Some("ANTHROPIC_API_KEY not configured".to_string()),
            ..Default::default()
        });
        s.suggestions = vec!["previous".to_string()];
        s.store_mut().set_text(TextField::Location, "Paris");
        assert!(!s.suggest_images().await);
        assert_eq!(s.suggestions(), ["previous".to_string()]);
        let toast = s.notifier().last().unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, "ANTHROPIC_API_KEY not configured");
    }

    #[tokio::test]
    async fn test_transport_error_uses_generic_message() {
        let mut s = session(FakeApi::default());
        assert!(!s.search_images("paris").await);
        assert_eq!(s.notifier().last().unwrap().message, "Image search failed");
    }

    #[tokio::test]
    async fn test_search_then_select_sets_background() {
        let mut s = session(FakeApi {
            images: Some(vec![photo("https://img.test/a.jpg", "Ana"), photo("https://img.test/b.jpg", "Ben")]),
            ..Default::default()
        });
        assert!(!s.search_images("   ").await);
        assert_eq!(s.api.calls.load(Ordering::SeqCst), 0);

        assert!(s.search_images("lisbon").await);
        assert!(s.select_search_result(1));
        assert_eq!(s.store().image(ImageSlot::Background), Some("https://img.test/b.jpg"));
        assert!(s.preview().contains("background-image:url('https://img.test/b.jpg')"));
        assert!(!s.select_search_result(5));
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_slot_untouched() {
        let mut s = session(FakeApi::default());
        s.store_mut().set_logo("https://cdn.test/logo.png");
        let missing = std::env::temp_dir().join("banner-studio-missing-logo.png");
        assert!(!s.upload_image(ImageSlot::Logo, &missing).await);
        assert_eq!(s.store().image(ImageSlot::Logo), Some("https://cdn.test/logo.png"));
        assert!(s.notifier().last().unwrap().message.starts_with("Could not load logo"));
    }

    #[tokio::test]
    async fn test_upload_sets_data_uri() {
        let path = std::env::temp_dir().join(format!("banner-studio-upload-{}.gif", std::process::id()));
        std::fs::write(&path, b"GIF89a\x01\x00\x01\x00").unwrap();
        let mut s = session(FakeApi::default());
        let ok = s.upload_image(ImageSlot::PartnerLogo, &path).await;
        std::fs::remove_file(&path).ok();
        assert!(ok);
        let reference = s.store().image(ImageSlot::PartnerLogo).unwrap();
        assert!(reference.starts_with("data:image/gif;base64,"));
    }

    #[tokio::test]
    async fn test_copy_html_warns_and_can_cancel() {
        let mut s = session(FakeApi::default());
        s.store_mut().set_background_image("data:image/png;base64,AAAA");
        let mut clipboard = MemoryClipboard::default();
        let mut asked = Vec::new();
        let mut decline = |m: &str| {
            asked.push(m.to_string());
            false
        };

        let outcome = s.copy_mailchimp_html(&mut decline, &mut clipboard).await;
        assert_eq!(outcome, ExportOutcome::Cancelled);
        assert_eq!(asked.len(), 1);
        assert!(asked[0].starts_with("Your background image is uploaded locally."));
        assert!(clipboard.0.is_empty());
        assert_eq!(s.api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_copy_html_writes_document() {
        let mut s = session(FakeApi::default());
        s.store_mut().set_text(TextField::EventName, "Spring Fest");
        let mut clipboard = MemoryClipboard::default();
        let mut never = |_: &str| -> bool { panic!("no warning expected") };

        let outcome = s.copy_mailchimp_html(&mut never, &mut clipboard).await;
        assert_eq!(outcome, ExportOutcome::Copied);
        assert!(clipboard.0[0].starts_with("<!DOCTYPE html>"));
        assert!(clipboard.0[0].contains("SPRING FEST"));
        assert_eq!(s.notifier().last().unwrap().message, "Mailchimp HTML copied to clipboard!");
    }

    #[tokio::test]
    async fn test_copy_html_failure_is_reported() {
        let mut s = session(FakeApi {
            service_error: Some("boom".to_string()),
            ..Default::default()
        });
        s.store_mut().set_text(TextField::EventName, "Expo");
        let mut clipboard = MemoryClipboard::default();
        let mut accept = |_: &str| true;
        let outcome = s.copy_mailchimp_html(&mut accept, &mut clipboard).await;
        assert_eq!(outcome, ExportOutcome::Failed);
        assert!(clipboard.0.is_empty());
        assert_eq!(s.notifier().last().unwrap().message, "Failed to copy HTML");
    }

    #[test]
    fn test_png_needs_a_banner() {
        let mut s = session(FakeApi::default());
        assert_eq!(s.preview(), empty_state());
        assert_eq!(s.download_png(&FixedCapture(Ok(vec![1]))), None);
        assert_eq!(s.notifier().last().unwrap().message, "Fill in the banner details first");
    }

    #[test]
    fn test_png_download_and_failure() {
        let mut s = session(FakeApi::default());
        s.store_mut().set_text(TextField::CtaText, "Register");

        let download = s.download_png(&FixedCapture(Ok(vec![0x89, b'P']))).unwrap();
        assert_eq!(download.file_name, "event-banner.png");
        assert_eq!(download.bytes, vec![0x89, b'P']);

        let before = s.preview();
        let tainted = FixedCapture(Err(CaptureError::Tainted("https://img.test".to_string())));
        assert_eq!(s.download_png(&tainted), None);
        let toast = s.notifier().last().unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, "Failed to generate PNG");
        assert_eq!(s.preview(), before);
    }
}
