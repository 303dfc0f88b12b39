//! Timeline event records.
//!
//! A [`TimeFrame`] is one dated entry: a required date, optional body text,
//! an optional image, and an optional callback fired when that image is
//! tapped. Frames are immutable once built.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::geometry::Size;

/// Callback fired with the tapped image.
pub type TapHandler = Arc<dyn Fn(&Image) + Send + Sync>;

/// Caller-owned image data.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageData {
    /// Display name, usually the file name.
    pub name: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Encoded bytes as supplied by the caller.
    pub bytes: Vec<u8>,
}

/// Shared handle to [`ImageData`]. Cloning never copies the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image(Arc<ImageData>);

impl Image {
    pub fn new(name: impl Into<String>, width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self(Arc::new(ImageData {
            name: name.into(),
            width,
            height,
            bytes,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn width(&self) -> u32 {
        self.0.width
    }

    pub fn height(&self) -> u32 {
        self.0.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    /// Pixel size as layout-unit size, for aspect fitting.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.0.width), f64::from(self.0.height))
    }

    /// Whether two handles point at the same image data.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for Image {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Image", 3)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

/// One dated entry in a timeline.
#[derive(Clone)]
pub struct TimeFrame {
    /// The date, shown as the title of the entry.
    pub date: String,
    /// Optional description shown under the date.
    pub text: Option<String>,
    /// Optional image shown under the text.
    pub image: Option<Image>,
    /// Fired with `image` when its region is tapped.
    pub on_image_tapped: Option<TapHandler>,
}

impl TimeFrame {
    /// Create a frame with only a date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: None,
            image: None,
            on_image_tapped: None,
        }
    }

    /// Set the body text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the image.
    #[must_use]
    pub fn image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the tap callback for the image.
    #[must_use]
    pub fn on_image_tapped<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Image) + Send + Sync + 'static,
    {
        self.on_image_tapped = Some(Arc::new(handler));
        self
    }

    /// Body text, treating an empty string as absent.
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

impl fmt::Debug for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeFrame")
            .field("date", &self.date)
            .field("text", &self.text)
            .field("image", &self.image.as_ref().map(Image::name))
            .field("on_image_tapped", &self.on_image_tapped.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder() {
        let image = Image::new("fireworks.jpeg", 640, 480, vec![1, 2, 3]);
        let frame = TimeFrame::new("January 1")
            .text("New Year's Day")
            .image(image.clone());
        assert_eq!(frame.date, "January 1");
        assert_eq!(frame.body(), Some("New Year's Day"));
        assert!(frame.image.as_ref().is_some_and(|i| i.ptr_eq(&image)));
        assert!(frame.on_image_tapped.is_none());
    }

    #[test]
    fn test_empty_text_is_no_body() {
        assert_eq!(TimeFrame::new("March").text("").body(), None);
        assert_eq!(TimeFrame::new("March").body(), None);
    }

    #[test]
    fn test_image_clone_shares_bytes() {
        let image = Image::new("heart.png", 10, 20, vec![0; 1024]);
        let copy = image.clone();
        assert!(copy.ptr_eq(&image));
        assert_eq!(copy.size(), Size::new(10.0, 20.0));
        assert_eq!(copy.bytes().len(), 1024);
    }

    #[test]
    fn test_tap_handler_receives_image() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let frame = TimeFrame::new("April 1").on_image_tapped(move |image| {
            assert_eq!(image.name(), "april.jpeg");
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let image = Image::new("april.jpeg", 1, 1, Vec::new());
        if let Some(handler) = &frame.on_image_tapped {
            handler(&image);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_image_serializes_metadata_only() {
        let image = Image::new("heart.png", 10, 20, vec![9; 4]);
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, r#"{"name":"heart.png","width":10,"height":20}"#);
    }

    #[test]
    fn test_debug_omits_closure() {
        let frame = TimeFrame::new("x").on_image_tapped(|_| {});
        let debug = format!("{frame:?}");
        assert!(debug.contains("on_image_tapped: true"));
    }
}
