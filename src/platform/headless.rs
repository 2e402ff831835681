//! In-memory toolkit with a virtual clock
//!
//! Elements are plain records positioned relative to their parent.
//! Animations are interpolated on demand from the clock, so a bounding-box
//! read mid-flight sees the same in-between position a browser would.
//! Timers fire only when the clock is advanced.

use crate::game::Game;
use crate::sim::{Offset, Rect};

use super::{Easing, ElementSpec, Task, Toolkit};

/// Handle to a headless element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// Handle to a headless periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: Offset,
    to: Offset,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl Animation {
    fn offset_at(&self, now_ms: f64) -> Offset {
        let t = ((now_ms - self.start_ms) / self.duration_ms) as f32;
        let k = self.easing.apply(t);
        Offset {
            left: self.from.left + (self.to.left - self.from.left) * k,
            top: self.from.top + (self.to.top - self.from.top) * k,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    dom_id: Option<String>,
    class: &'static str,
    offset: Offset,
    width: f32,
    height: f32,
    animation: Option<Animation>,
    text: String,
    removed: bool,
}

#[derive(Debug, Clone)]
struct Timer {
    id: u64,
    task: Task,
    interval_ms: f64,
    next_due_ms: f64,
}

/// Toolkit for tests and the native demo
#[derive(Debug, Clone, Default)]
pub struct HeadlessToolkit {
    now_ms: f64,
    nodes: Vec<Node>,
    /// Removed slots, reused by the next created element
    free: Vec<usize>,
    timers: Vec<Timer>,
    next_timer: u64,
}

impl HeadlessToolkit {
    /// Empty page with no elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with a single container element at `bounds`
    pub fn with_container(id: &str, bounds: Rect) -> Self {
        let mut toolkit = Self::new();
        toolkit.add_container(id, bounds);
        toolkit
    }

    /// Add a top-level element addressable by `id`
    pub fn add_container(&mut self, id: &str, bounds: Rect) -> ElementId {
        self.insert(Node {
            parent: None,
            dom_id: Some(id.to_string()),
            class: "",
            offset: Offset::new(bounds.left, bounds.top),
            width: bounds.width,
            height: bounds.height,
            animation: None,
            text: String::new(),
            removed: false,
        })
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advance the clock to the next timer due no later than `deadline_ms`
    ///
    /// Returns that timer's task, or `None` after moving the clock to the
    /// deadline when nothing is due.
    pub fn next_due(&mut self, deadline_ms: f64) -> Option<Task> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due_ms <= deadline_ms)
            .min_by(|a, b| a.next_due_ms.total_cmp(&b.next_due_ms).then(a.id.cmp(&b.id)));

        match timer {
            Some(timer) => {
                self.now_ms = self.now_ms.max(timer.next_due_ms);
                timer.next_due_ms += timer.interval_ms;
                Some(timer.task)
            }
            None => {
                self.now_ms = self.now_ms.max(deadline_ms);
                None
            }
        }
    }

    pub fn text(&self, element: &ElementId) -> &str {
        &self.nodes[element.0].text
    }

    pub fn is_removed(&self, element: &ElementId) -> bool {
        self.nodes[element.0].removed
    }

    pub fn is_animating(&self, element: &ElementId) -> bool {
        self.nodes[element.0]
            .animation
            .is_some_and(|a| self.now_ms < a.start_ms + a.duration_ms)
    }

    /// Live elements carrying `class`
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.removed && n.class == class)
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.timers.iter().any(|t| t.task == task)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Allocated element slots, live or waiting for reuse
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, node: Node) -> ElementId {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                ElementId(index)
            }
            None => {
                self.nodes.push(node);
                ElementId(self.nodes.len() - 1)
            }
        }
    }

    /// Mark `index` and everything under it removed and free their slots
    fn detach(&mut self, index: usize) {
        if self.nodes[index].removed {
            return;
        }
        self.nodes[index].removed = true;
        self.nodes[index].animation = None;
        self.free.push(index);

        let children: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.removed && n.parent == Some(index))
            .map(|(i, _)| i)
            .collect();
        for child in children {
            self.detach(child);
        }
    }

    fn current_offset(&self, index: usize) -> Offset {
        let node = &self.nodes[index];
        match node.animation {
            Some(animation) => animation.offset_at(self.now_ms),
            None => node.offset,
        }
    }

    /// Absolute top-left corner of a node
    fn origin(&self, index: usize) -> Offset {
        let own = self.current_offset(index);
        match self.nodes[index].parent {
            Some(parent) => {
                let base = self.origin(parent);
                Offset::new(base.left + own.left, base.top + own.top)
            }
            None => own,
        }
    }
}

impl Toolkit for HeadlessToolkit {
    type Element = ElementId;
    type Timer = TimerId;

    fn find_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|n| !n.removed && n.dom_id.as_deref() == Some(id))
            .map(ElementId)
    }

    fn create_element(&mut self, parent: &ElementId, spec: &ElementSpec) -> ElementId {
        let parent_box = self.bounding_box(parent);
        let rect = spec.placement.resolve(&parent_box);
        self.insert(Node {
            parent: Some(parent.0),
            dom_id: None,
            class: spec.class,
            offset: rect.offset_within(&parent_box),
            width: rect.width,
            height: rect.height,
            animation: None,
            text: String::new(),
            removed: false,
        })
    }

    fn bounding_box(&self, element: &ElementId) -> Rect {
        let origin = self.origin(element.0);
        let node = &self.nodes[element.0];
        Rect::new(origin.left, origin.top, node.width, node.height)
    }

    fn animate(&mut self, element: &ElementId, to: Offset, duration_ms: f32, easing: Easing) {
        let from = self.current_offset(element.0);
        let now_ms = self.now_ms;
        let node = &mut self.nodes[element.0];
        if duration_ms <= 0.0 {
            node.offset = to;
            node.animation = None;
        } else {
            node.offset = from;
            node.animation = Some(Animation {
                from,
                to,
                start_ms: now_ms,
                duration_ms: f64::from(duration_ms),
                easing,
            });
        }
    }

    fn stop(&mut self, element: &ElementId) {
        let here = self.current_offset(element.0);
        let node = &mut self.nodes[element.0];
        node.offset = here;
        node.animation = None;
    }

    fn remove(&mut self, element: &ElementId) {
        self.stop(element);
        self.detach(element.0);
    }

    fn set_text(&mut self, element: &ElementId, text: &str) {
        self.nodes[element.0].text = text.to_string();
    }

    fn schedule_periodic(&mut self, task: Task, interval_ms: u32) -> TimerId {
        let id = self.next_timer;
        self.next_timer += 1;
        let interval_ms = f64::from(interval_ms.max(1));
        self.timers.push(Timer {
            id,
            task,
            interval_ms,
            next_due_ms: self.now_ms + interval_ms,
        });
        TimerId(id)
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|t| t.id != timer.0);
    }
}

impl Game<HeadlessToolkit> {
    /// Run every timer that falls due in the next `ms` of virtual time
    pub fn advance(&mut self, ms: f64) {
        let deadline = self.toolkit().now_ms() + ms;
        while let Some(task) = self.toolkit_mut().next_due(deadline) {
            self.handle_task(task);
        }
    }
}
