// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tracks a single pan gesture that has grabbed the presented content.
//! The state lives from pan start to pan end and never outlives the gesture.

use iced_core::{Point, Vector};

/// State of a content drag.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Pointer position where the drag started (container coordinates)
    pub start_position: Option<Point>,

    /// Pointer position relative to the content center at drag start
    pub offset_from_center: Vector,

    /// Cumulative pointer translation since the drag started
    pub translation: Vector,
}

impl DragState {
    /// Starts a drag at `position` over content centered at `content_center`.
    pub fn start(&mut self, position: Point, content_center: Point) {
        self.is_dragging = true;
        self.start_position = Some(position);
        self.offset_from_center = position - content_center;
        self.translation = Vector::new(0.0, 0.0);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
        self.offset_from_center = Vector::new(0.0, 0.0);
        self.translation = Vector::new(0.0, 0.0);
    }

    /// Records the cumulative translation and returns the new anchor point.
    ///
    /// The anchor is the start position moved by the translation, so the
    /// grabbed point of the content stays under the pointer instead of the
    /// content jumping to center on it.
    pub fn update(&mut self, translation: Vector) -> Option<Point> {
        if !self.is_dragging {
            return None;
        }
        self.translation = translation;
        self.anchor()
    }

    /// Current anchor point, if dragging.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        let start = self.start_position?;
        Some(start + self.translation)
    }

    /// Content center implied by the current anchor.
    #[must_use]
    pub fn content_center(&self) -> Option<Point> {
        let anchor = self.anchor()?;
        Some(anchor - self.offset_from_center)
    }
}
