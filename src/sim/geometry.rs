//! Screen-space geometry shared by the board entities
//!
//! Coordinates follow the CSS convention: `y` grows downward, so a smaller
//! `top` is visually higher.

use serde::{Deserialize, Serialize};

/// Horizontal side of the board (also the ball's travel direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A surface the ball can bounce off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Top,
    Bottom,
    Left,
    Right,
}

impl From<Side> for Surface {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Surface::Left,
            Side::Right => Surface::Right,
        }
    }
}

/// Bounding box of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            bottom: top + height,
            left,
            right: left + width,
            width,
            height,
        }
    }

    /// Edge coordinate facing the given side
    #[inline]
    pub fn edge(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Edge coordinate of any surface
    #[inline]
    pub fn surface(&self, surface: Surface) -> f32 {
        match surface {
            Surface::Top => self.top,
            Surface::Bottom => self.bottom,
            Surface::Left => self.left,
            Surface::Right => self.right,
        }
    }

    /// Offset of this box's top-left corner relative to `parent`
    pub fn offset_within(&self, parent: &Rect) -> Offset {
        Offset {
            left: self.left - parent.left,
            top: self.top - parent.top,
        }
    }

    /// True when either dimension has collapsed
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Position of an element relative to its parent (CSS `left`/`top`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub left: f32,
    pub top: f32,
}

impl Offset {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(100.0, 200.0, 15.0, 15.0);
        assert_eq!(r.right, 115.0);
        assert_eq!(r.bottom, 215.0);
        assert_eq!(r.edge(Side::Left), 100.0);
        assert_eq!(r.edge(Side::Right), 115.0);
        assert_eq!(r.surface(Surface::Bottom), 215.0);
    }

    #[test]
    fn test_offset_within_parent() {
        let parent = Rect::new(50.0, 20.0, 800.0, 600.0);
        let child = Rect::new(170.0, 320.0, 15.0, 15.0);
        assert_eq!(child.offset_within(&parent), Offset::new(120.0, 300.0));
    }

    #[test]
    fn test_degenerate() {
        assert!(Rect::new(0.0, 0.0, 0.0, 600.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 800.0, 600.0).is_degenerate());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Surface::from(Side::Right), Surface::Right);
    }
}
