//! Coordinate transform between image-native pixels and display pixels.
//!
//! Everything here is a pure function of (container size, image size, zoom,
//! pan). [`Geometry`] is recomputed for every draw pass and every hit test and
//! is never cached across differing inputs.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::annotation::BBox;
use crate::consts::{BADGE_MIN_RADIUS_PX, BADGE_RADIUS_PER_ZOOM};

/// A point in either display or image-native space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Edge-inclusive containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Circle in display space (annotation badges).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Boundary-inclusive containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius
    }
}

/// Badge radius in display pixels for the given zoom.
#[must_use]
pub fn badge_radius(zoom: f64) -> f64 {
    BADGE_MIN_RADIUS_PX.max(BADGE_RADIUS_PER_ZOOM * zoom)
}

/// Where the image lands on the display surface for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Container (canvas) size in CSS pixels.
    pub container: Size,
    /// Native image size in pixels.
    pub image: Size,
    /// Image width after fitting to the container at zoom 1.
    pub base_width: f64,
    /// Image height after fitting to the container at zoom 1.
    pub base_height: f64,
    pub scaled_width: f64,
    pub scaled_height: f64,
    /// Left edge of the drawn image, including pan.
    pub offset_x: f64,
    /// Top edge of the drawn image, including pan.
    pub offset_y: f64,
}

/// Fit `image` into `container`, apply `zoom`, center, then shift by `pan`.
///
/// The image is fitted by width first and refitted by height when that would
/// overflow, so at zoom 1 it is always fully visible. Returns `None` when
/// either size is not drawable.
#[must_use]
pub fn fit_geometry(container: Size, image: Size, zoom: f64, pan: Point) -> Option<Geometry> {
    if !container.is_drawable() || !image.is_drawable() {
        return None;
    }

    let aspect = image.width / image.height;
    let mut base_width = container.width;
    let mut base_height = base_width / aspect;
    if base_height > container.height {
        base_height = container.height;
        base_width = base_height * aspect;
    }

    let scaled_width = base_width * zoom;
    let scaled_height = base_height * zoom;

    Some(Geometry {
        container,
        image,
        base_width,
        base_height,
        scaled_width,
        scaled_height,
        offset_x: (container.width - scaled_width) / 2.0 + pan.x,
        offset_y: (container.height - scaled_height) / 2.0 + pan.y,
    })
}

impl Geometry {
    /// Horizontal display pixels per image pixel.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scaled_width / self.image.width
    }

    /// Vertical display pixels per image pixel.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scaled_height / self.image.height
    }

    #[must_use]
    pub fn image_to_display(&self, p: Point) -> Point {
        Point {
            x: p.x * self.scale_x() + self.offset_x,
            y: p.y * self.scale_y() + self.offset_y,
        }
    }

    #[must_use]
    pub fn display_to_image(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.offset_x) / self.scale_x(),
            y: (p.y - self.offset_y) / self.scale_y(),
        }
    }

    /// The drawn image bounds in display space.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.scaled_width, self.scaled_height)
    }

    /// Map an image-native bounding box into a display rectangle.
    #[must_use]
    pub fn bbox_to_display(&self, bbox: &BBox) -> Rect {
        let tl = self.image_to_display(Point::new(bbox.x1, bbox.y1));
        let br = self.image_to_display(Point::new(bbox.x2, bbox.y2));
        Rect::new(tl.x, tl.y, br.x - tl.x, br.y - tl.y)
    }

    /// The index badge sitting on top of `bbox`, tangent to its top edge.
    #[must_use]
    pub fn badge_circle(&self, bbox: &BBox, zoom: f64) -> Circle {
        let rect = self.bbox_to_display(bbox);
        let radius = badge_radius(zoom);
        Circle {
            center: Point::new(rect.center_x(), rect.y - radius),
            radius,
        }
    }
}
