// SPDX-License-Identifier: MPL-2.0
//! Description of the media shown by the viewer.
//!
//! An [`ImageInfo`] carries everything the host knows about the thumbnail it
//! wants to enlarge: the loaded image (if any), where to fetch a better one
//! from, the accessible text, and where the thumbnail sits on screen.

use crate::domain::ReferenceView;
use iced_core::{Point, Rectangle, Size};
use std::collections::HashMap;

const TITLE_ALT_TEXT_SEPARATOR: &str = "\n\n- - -\n\n";

/// Media and reference geometry for one presentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageInfo {
    /// Pixel size of the already-loaded image.
    pub image_size: Option<Size>,

    /// Size of a low-resolution placeholder shown while fetching.
    pub placeholder_size: Option<Size>,

    pub image_url: Option<String>,
    pub canonical_url: Option<String>,
    pub alt_text: Option<String>,
    pub title: Option<String>,

    /// Thumbnail frame in the reference view's coordinates.
    pub reference_rect: Rectangle,

    /// View that owns the thumbnail.
    pub reference_view: Option<ReferenceView>,

    /// Host-defined extras, passed through untouched.
    pub user_info: HashMap<String, String>,
}

fn non_empty(text: Option<&String>) -> Option<&str> {
    text.map(String::as_str).filter(|text| !text.is_empty())
}

impl ImageInfo {
    /// Info for an image that is already loaded.
    #[must_use]
    pub fn with_image(size: Size, reference_rect: Rectangle, reference_view: ReferenceView) -> Self {
        Self {
            image_size: Some(size),
            reference_rect,
            reference_view: Some(reference_view),
            ..Self::default()
        }
    }

    /// Info for an image that still has to be fetched from `url`.
    #[must_use]
    pub fn with_url(
        url: impl Into<String>,
        reference_rect: Rectangle,
        reference_view: ReferenceView,
    ) -> Self {
        Self {
            image_url: Some(url.into()),
            reference_rect,
            reference_view: Some(reference_view),
            ..Self::default()
        }
    }

    /// The title if it has any text, otherwise the alt text.
    #[must_use]
    pub fn displayable_title_alt_text_summary(&self) -> Option<&str> {
        non_empty(self.title.as_ref()).or_else(|| non_empty(self.alt_text.as_ref()))
    }

    /// Title followed by the alt text, separated by a rule, when both are
    /// present and differ.
    #[must_use]
    pub fn combined_title_and_alt_text(&self) -> Option<String> {
        match (non_empty(self.title.as_ref()), non_empty(self.alt_text.as_ref())) {
            (Some(title), Some(alt)) if title != alt => {
                Some(format!("{title}{TITLE_ALT_TEXT_SEPARATOR}{alt}"))
            }
            (Some(title), _) => Some(title.to_owned()),
            (None, alt) => alt.map(str::to_owned),
        }
    }

    /// Center of the reference rect in its own coordinate space.
    ///
    /// Only the size is used; the origin is ignored.
    #[must_use]
    pub fn reference_rect_center(&self) -> Point {
        Point::new(
            self.reference_rect.width / 2.0,
            self.reference_rect.height / 2.0,
        )
    }

    /// Best known natural size: the loaded image, then the placeholder, then
    /// the thumbnail itself.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        self.image_size
            .or(self.placeholder_size)
            .unwrap_or_else(|| self.reference_rect.size())
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }
}
