use color_sampler::{aggregate, Canvas, ColorCount, Magnifier, MagnifierConfig, PixelGrid};

use crate::error::PickError;
use crate::models::{ElementLayout, ImageSource, PaletteOptions};
use crate::rendering::{RasterTarget, Rasterizer};
use crate::services::pointer::{PointerEvents, PointerMove, PointerSubscription};

/// One live interactive picking session.
struct Session<C: Canvas> {
    magnifier: Magnifier<C>,
    subscription: PointerSubscription,
}

/// Palette extraction and interactive picking for one image.
///
/// Palette requests work on any [`ImageSource`]. Interactive picking
/// ([`start`](Self::start)) needs an [`ImageSource::Element`] so pointer
/// positions can be mapped into the image.
pub struct PickerController<R: Rasterizer, C: Canvas + Clone> {
    source: ImageSource,
    rasterizer: R,
    canvas: C,
    config: MagnifierConfig,
    layout: Option<ElementLayout>,
    session: Option<Session<C>>,
}

impl<R: Rasterizer, C: Canvas + Clone> PickerController<R, C> {
    pub fn new(
        source: impl Into<ImageSource>,
        rasterizer: R,
        canvas: C,
        config: MagnifierConfig,
    ) -> Self {
        Self {
            source: source.into(),
            rasterizer,
            canvas,
            config,
            layout: None,
            session: None,
        }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Most frequent colors as `rgb(...)` / `rgba(...)` strings.
    pub async fn palette(&self, options: &PaletteOptions) -> Result<Vec<String>, PickError> {
        let counts = self.palette_counts(options).await?;
        Ok(counts.iter().map(|entry| entry.color.to_string()).collect())
    }

    /// Most frequent colors with their pixel counts.
    ///
    /// Once a session has captured the element layout, the image is
    /// rasterized at that layout size times `options.scale` instead of its
    /// natural size.
    pub async fn palette_counts(
        &self,
        options: &PaletteOptions,
    ) -> Result<Vec<ColorCount>, PickError> {
        let aggregate_options = options.to_aggregate()?;
        let target = match self.layout {
            Some(layout) => RasterTarget::sized(layout.width, layout.height),
            None => RasterTarget::natural(1.0),
        }
        .with_scale(options.scale);

        let buffer = self
            .rasterizer
            .rasterize(self.source.locator(), target)
            .await?;
        let counts = aggregate(&buffer, &aggregate_options);

        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            colors = counts.len(),
            top = counts.first().map(|entry| entry.count).unwrap_or(0),
            "Extracted palette"
        );
        Ok(counts)
    }

    /// Begin interactive picking. No-op if a session is already running.
    pub async fn start(&mut self, events: &PointerEvents) -> Result<(), PickError> {
        let element = match &self.source {
            ImageSource::Element(element) => element,
            ImageSource::Url(url) => return Err(PickError::InvalidTarget(url.clone())),
        };
        if self.session.is_some() {
            return Ok(());
        }

        let layout = element.layout();
        let buffer = self
            .rasterizer
            .rasterize(element.src(), RasterTarget::sized(layout.width, layout.height))
            .await?;

        let grid = PixelGrid::from_buffer(&buffer);
        let mut magnifier = Magnifier::new(grid, self.config, self.canvas.clone());
        magnifier.create()?;

        tracing::info!(
            width = layout.width,
            height = layout.height,
            left = layout.left,
            top = layout.top,
            "Started color picking session"
        );

        self.layout = Some(layout);
        self.session = Some(Session {
            magnifier,
            subscription: events.subscribe(),
        });
        Ok(())
    }

    /// Map a viewport position into the image and show or hide the
    /// magnifier. Returns whether the magnifier is showing afterwards.
    pub fn handle_move(&mut self, client_x: f64, client_y: f64) -> bool {
        let (Some(session), Some(layout)) = (self.session.as_mut(), self.layout) else {
            return false;
        };

        let x = (client_x - layout.left).trunc();
        let y = (client_y - layout.top).trunc();
        let inside = x >= 0.0
            && y >= 0.0
            && x < layout.width as f64
            && y < layout.height as f64;

        if inside {
            session.magnifier.show(client_x, client_y, x as i64, y as i64)
        } else {
            session.magnifier.hidden();
            false
        }
    }

    /// Apply the newest queued pointer move, if any.
    pub fn process_pending(&mut self) -> Option<PointerMove> {
        let event = self.session.as_mut()?.subscription.latest()?;
        self.handle_move(event.client_x, event.client_y);
        Some(event)
    }

    /// Wait for the next pointer move and apply it.
    ///
    /// Returns `None` when no session is running or the hub has closed.
    pub async fn next_move(&mut self) -> Option<PointerMove> {
        let event = self.session.as_mut()?.subscription.next().await?;
        self.handle_move(event.client_x, event.client_y);
        Some(event)
    }

    /// End the session: release the overlay and unsubscribe. No-op if not
    /// started.
    pub fn exit(&mut self) {
        if let Some(Session {
            mut magnifier,
            subscription,
        }) = self.session.take()
        {
            drop(subscription);
            magnifier.destroy();
            tracing::info!("Exited color picking session");
        }
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    pub fn magnifier(&self) -> Option<&Magnifier<C>> {
        self.session.as_ref().map(|session| &session.magnifier)
    }

    /// Layout captured by the most recent [`start`](Self::start).
    pub fn layout(&self) -> Option<ElementLayout> {
        self.layout
    }
}
