use std::fmt;
use std::sync::Arc;

/// On-page layout of a bound image element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementLayout {
    /// Rendered width in CSS pixels
    pub width: u32,
    /// Rendered height in CSS pixels
    pub height: u32,
    /// Viewport x offset of the element's left edge
    pub left: f64,
    /// Viewport y offset of the element's top edge
    pub top: f64,
}

impl ElementLayout {
    pub fn new(width: u32, height: u32, left: f64, top: f64) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }
}

/// Layout query capability for a live element.
///
/// Queried once when an interactive session starts.
pub trait LayoutProvider: Send + Sync {
    fn layout(&self) -> ElementLayout;
}

impl LayoutProvider for ElementLayout {
    fn layout(&self) -> ElementLayout {
        *self
    }
}

/// An image element bound to a page: its source plus live layout.
#[derive(Clone)]
pub struct ImageElement {
    src: String,
    layout: Arc<dyn LayoutProvider>,
}

impl ImageElement {
    pub fn new(src: impl Into<String>, layout: Arc<dyn LayoutProvider>) -> Self {
        Self {
            src: src.into(),
            layout,
        }
    }

    /// Element with a fixed layout.
    pub fn with_layout(src: impl Into<String>, layout: ElementLayout) -> Self {
        Self::new(src, Arc::new(layout))
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn layout(&self) -> ElementLayout {
        self.layout.layout()
    }
}

impl fmt::Debug for ImageElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageElement")
            .field("src", &self.src)
            .field("layout", &self.layout.layout())
            .finish()
    }
}

/// What a picker is bound to.
///
/// Palette extraction works with either variant; interactive picking needs
/// an [`ImageSource::Element`] for its layout.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Bare locator: URL, `data:` URI or file path
    Url(String),
    /// Image element with on-page layout
    Element(ImageElement),
}

impl ImageSource {
    /// The locator to rasterize.
    pub fn locator(&self) -> &str {
        match self {
            ImageSource::Url(url) => url,
            ImageSource::Element(element) => element.src(),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(url: &str) -> Self {
        ImageSource::Url(url.to_string())
    }
}

impl From<String> for ImageSource {
    fn from(url: String) -> Self {
        ImageSource::Url(url)
    }
}

impl From<ImageElement> for ImageSource {
    fn from(element: ImageElement) -> Self {
        ImageSource::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MovingLayout(Mutex<f64>);

    impl LayoutProvider for MovingLayout {
        fn layout(&self) -> ElementLayout {
            let mut left = self.0.lock().unwrap();
            *left += 10.0;
            ElementLayout::new(4, 4, *left, 0.0)
        }
    }

    #[test]
    fn test_locator_for_each_variant() {
        let url = ImageSource::from("https://example.com/a.png");
        assert_eq!(url.locator(), "https://example.com/a.png");

        let element = ImageSource::from(ImageElement::with_layout(
            "data:image/png;base64,AAAA",
            ElementLayout::new(10, 20, 1.0, 2.0),
        ));
        assert_eq!(element.locator(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_element_layout_is_queried_live() {
        let element = ImageElement::new("a.png", Arc::new(MovingLayout(Mutex::new(0.0))));
        assert_eq!(element.layout().left, 10.0);
        assert_eq!(element.layout().left, 20.0);
    }
}
