//! Platform abstraction layer
//!
//! The game never touches the DOM directly. Everything it needs from the
//! page goes through [`Toolkit`]:
//! - Element construction and removal
//! - Bounding-box queries
//! - Position animation with a duration and easing
//! - Periodic timers that call back into the game with a [`Task`]

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessToolkit;

use crate::sim::{Offset, Rect};

/// Periodic work the game schedules on the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Poll held keys and move paddles
    MovePaddles,
    /// Collision and scoring checks for one round
    Round { round: u32 },
}

/// Animation timing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed, as the ball and paddles move
    #[default]
    Linear,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
        }
    }
}

/// Initial size and anchoring of a new element inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub left: Option<f32>,
    /// Distance from the parent's right edge (used when `left` is unset)
    pub right: Option<f32>,
    pub top: Option<f32>,
    /// `None` fills the parent
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Placement {
    /// Element at `offset` with a fixed size
    pub fn at(offset: Offset, width: f32, height: f32) -> Self {
        Self {
            left: Some(offset.left),
            right: None,
            top: Some(offset.top),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Resolve to a box given the parent's box
    pub fn resolve(&self, parent: &Rect) -> Rect {
        let width = self.width.unwrap_or(parent.width);
        let height = self.height.unwrap_or(parent.height);
        let left = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => parent.width - right - width,
            (None, None) => 0.0,
        };
        let top = self.top.unwrap_or(0.0);
        Rect::new(parent.left + left, parent.top + top, width, height)
    }

    /// Inline CSS matching [`Placement::resolve`]
    pub fn to_css(&self) -> String {
        let px = |v: f32| format!("{v}px");
        let fill = |v: Option<f32>| v.map(px).unwrap_or_else(|| "100%".to_string());

        let horizontal = match (self.left, self.right) {
            (None, Some(right)) => format!("right: {};", px(right)),
            (left, _) => format!("left: {};", px(left.unwrap_or(0.0))),
        };
        format!(
            "position: absolute; {horizontal} top: {}; width: {}; height: {};",
            px(self.top.unwrap_or(0.0)),
            fill(self.width),
            fill(self.height),
        )
    }
}

/// Class and placement of an element to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSpec {
    pub class: &'static str,
    pub placement: Placement,
}

impl ElementSpec {
    pub fn new(class: &'static str, placement: Placement) -> Self {
        Self { class, placement }
    }
}

/// UI collaborator consumed by the game
///
/// Implementations are single-threaded; timers fire back into the game
/// through whatever dispatch the host wires up.
pub trait Toolkit {
    /// Handle to a rendered element
    type Element: Clone;
    /// Handle to a scheduled periodic task
    type Timer;

    /// Look up an existing element by id
    fn find_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Create an element and append it to `parent`
    fn create_element(&mut self, parent: &Self::Element, spec: &ElementSpec) -> Self::Element;

    /// Current on-screen box, including any in-flight animation
    fn bounding_box(&self, element: &Self::Element) -> Rect;

    /// Move `element` to `to` (relative to its parent) over `duration_ms`
    ///
    /// A zero duration moves it immediately. Starting a new animation
    /// replaces any animation already running on the element.
    fn animate(&mut self, element: &Self::Element, to: Offset, duration_ms: f32, easing: Easing);

    /// Halt any animation, leaving the element where it currently is
    fn stop(&mut self, element: &Self::Element);

    fn remove(&mut self, element: &Self::Element);

    fn set_text(&mut self, element: &Self::Element, text: &str);

    fn schedule_periodic(&mut self, task: Task, interval_ms: u32) -> Self::Timer;

    fn cancel(&mut self, timer: Self::Timer);
}
