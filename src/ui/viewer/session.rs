// SPDX-License-Identifier: MPL-2.0
//! Per-presentation state owned by the transition controller.
//!
//! A [`ViewerSession`] lives from a successful `show` to the final
//! dismissal callback. It holds the geometry captured when the presentation
//! started, the metrics recomputed on every layout pass, and the few
//! booleans that are not implied by the controller's primary state.

use crate::acquisition::SessionId;
use crate::domain::{
    rotation_delta_degrees, BackgroundStyle, Orientation, OverlayBarStyle, SurfaceHandle,
    TransitionOrigin, ViewerMode, ZoomScale,
};
use crate::geometry;
use crate::image_info::ImageInfo;
use crate::port::{CancellationToken, Host};
use crate::ui::state::ZoomController;
use iced_core::{Padding, Rectangle, Size};

/// What the host asks the viewer to present.
#[derive(Debug, Clone, Default)]
pub struct ShowRequest {
    pub info: ImageInfo,
    pub mode: ViewerMode,
    pub background: BackgroundStyle,
    pub origin: TransitionOrigin,
}

impl ShowRequest {
    #[must_use]
    pub fn image(info: ImageInfo) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn alt_text(info: ImageInfo) -> Self {
        Self {
            info,
            mode: ViewerMode::AltText,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: BackgroundStyle) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: TransitionOrigin) -> Self {
        self.origin = origin;
        self
    }
}

/// Environment and thumbnail geometry captured once per `show`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartingGeometry {
    pub overlay_bar_visible: bool,
    pub overlay_bar_style: OverlayBarStyle,

    /// Thumbnail frame in host coordinates at presentation start.
    pub thumbnail_frame: Rectangle,

    /// The thumbnail frame re-expressed in the reference orientation.
    pub reference_frame: Rectangle,

    pub orientation: Orientation,

    /// Container size in the starting orientation.
    pub container_size: Size,

    /// The host was already rotated away from the reference orientation.
    pub presented_in_unsupported_orientation: bool,
}

impl StartingGeometry {
    /// Captures the host environment around `thumbnail_frame`.
    pub fn capture(host: &dyn Host, thumbnail_frame: Rectangle) -> Self {
        let orientation = host.current_orientation();
        let container_size = host.container_bounds().size();
        Self {
            overlay_bar_visible: host.overlay_bar_visible(),
            overlay_bar_style: host.overlay_bar_style(),
            thumbnail_frame,
            reference_frame: geometry::reproject_between(
                thumbnail_frame,
                container_size,
                orientation,
                Orientation::REFERENCE,
            ),
            orientation,
            container_size,
            presented_in_unsupported_orientation: orientation != Orientation::REFERENCE,
        }
    }

    /// The thumbnail frame as seen from `current` orientation.
    #[must_use]
    pub fn thumbnail_in(&self, current: Orientation) -> Rectangle {
        geometry::reproject_between(
            self.thumbnail_frame,
            self.container_size,
            self.orientation,
            current,
        )
    }

    /// A zero-area thumbnail cannot be collapsed into.
    #[must_use]
    pub fn has_usable_thumbnail(&self) -> bool {
        !geometry::is_degenerate_rect(self.thumbnail_frame)
    }
}

/// Rotation delta between the starting and the current orientation,
/// recomputed whenever either side changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationTransform {
    key: Option<(Orientation, Orientation)>,
    degrees: i16,
}

impl RotationTransform {
    /// Signed delta in degrees for `start → current`.
    pub fn resolve(&mut self, start: Orientation, current: Orientation) -> i16 {
        if self.key != Some((start, current)) {
            self.degrees = rotation_delta_degrees(start, current);
            self.key = Some((start, current));
        }
        self.degrees
    }

    #[must_use]
    pub fn radians(degrees: i16) -> f32 {
        f32::from(degrees).to_radians()
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

/// Layout of the content, recomputed on every pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentMetrics {
    /// Image pixel size, or the thumbnail size until the image is known.
    pub natural_size: Size,
    pub zoom_scale: ZoomScale,
    pub frame: Rectangle,
    pub insets: Padding,
}

impl ContentMetrics {
    #[must_use]
    pub fn new(natural_size: Size) -> Self {
        Self {
            natural_size,
            zoom_scale: ZoomScale::FIT,
            frame: Rectangle::new(iced_core::Point::ORIGIN, natural_size),
            insets: Padding::ZERO,
        }
    }

    /// Recomputes the frame and insets for `container`.
    pub fn update(&mut self, container: Rectangle, zoom: &ZoomController) {
        self.zoom_scale = zoom.scale();
        self.frame = zoom.content_frame(container, self.natural_size);
        self.insets = zoom.insets(container, self.natural_size);
    }
}

/// Session booleans that are not implied by the controller state, physics
/// or zoom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub transitioning_to_interactive: bool,
    pub view_has_appeared: bool,
    pub download_failed: bool,

    /// Set between an orientation change and its settle delay.
    pub manually_resizing_container: bool,
}

/// One presentation lifecycle.
#[derive(Debug, Clone)]
pub struct ViewerSession {
    pub id: SessionId,
    pub info: ImageInfo,
    pub mode: ViewerMode,
    pub background_style: BackgroundStyle,
    pub origin: TransitionOrigin,
    pub starting: StartingGeometry,
    pub metrics: ContentMetrics,
    pub flags: SessionFlags,
    pub cancel: CancellationToken,
    pub background: Option<SurfaceHandle>,
    pub blurred_background: Option<SurfaceHandle>,
    pub download_progress: f32,
    pub fade_thumbnail: bool,
}

impl ViewerSession {
    #[must_use]
    pub fn is_content_loaded(&self) -> bool {
        self.info.has_image()
    }
}
