//! Browser toolkit on top of `web-sys`
//!
//! Elements are absolutely positioned `div`s. Ball motion uses CSS
//! transitions on `left`/`top`, so `getBoundingClientRect` reports the
//! in-flight position. Timers are `setInterval` calls that feed a [`Task`]
//! back into the mounted game.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, KeyboardEvent, Window};

use crate::backdrop::{Backdrop, BackdropConfig, STEP_MS};
use crate::consts::CONTAINER_ID;
use crate::game::Game;
use crate::sim::{KeyCode, Offset, Rect};

use super::{Easing, ElementSpec, Task, Toolkit};

/// Receiver for fired timers, filled in once the game exists
type DispatchSlot = Rc<RefCell<Option<Box<dyn Fn(Task)>>>>;

fn encode_task(task: Task) -> f64 {
    match task {
        Task::MovePaddles => -1.0,
        Task::Round { round } => f64::from(round),
    }
}

fn decode_task(value: f64) -> Task {
    if value < 0.0 {
        Task::MovePaddles
    } else {
        Task::Round { round: value as u32 }
    }
}

fn to_rect(rect: &web_sys::DomRect) -> Rect {
    Rect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// DOM-backed toolkit
pub struct WebToolkit {
    window: Window,
    document: Document,
    /// Stand-in returned if the page ever refuses to create an element
    spare: HtmlElement,
    /// Shared `setInterval` handler; the task travels as the interval argument
    on_interval: Closure<dyn FnMut(JsValue)>,
}

impl WebToolkit {
    fn new(slot: DispatchSlot) -> anyhow::Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let spare = document
            .create_element("div")
            .map_err(|err| anyhow::anyhow!("createElement failed: {err:?}"))?
            .unchecked_into();

        let on_interval = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let Some(code) = value.as_f64() else {
                return;
            };
            if let Some(dispatch) = slot.borrow().as_ref() {
                dispatch(decode_task(code));
            }
        });

        Ok(Self {
            window,
            document,
            spare,
            on_interval,
        })
    }

    /// Pin the element's inline position to where it is drawn right now
    fn pin(&self, element: &HtmlElement) {
        let here = to_rect(&element.get_bounding_client_rect());
        let parent = element
            .parent_element()
            .map(|p| to_rect(&p.get_bounding_client_rect()))
            .unwrap_or_default();
        let offset = here.offset_within(&parent);

        let style = element.style();
        let _ = style.set_property("transition", "none");
        let _ = style.remove_property("right");
        let _ = style.set_property("left", &format!("{}px", offset.left));
        let _ = style.set_property("top", &format!("{}px", offset.top));
    }
}

impl Toolkit for WebToolkit {
    type Element = HtmlElement;
    type Timer = i32;

    fn find_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn create_element(&mut self, parent: &HtmlElement, spec: &ElementSpec) -> HtmlElement {
        // A div is always an HtmlElement
        let element: HtmlElement = match self.document.create_element("div") {
            Ok(element) => element.unchecked_into(),
            Err(err) => {
                log::error!("createElement failed, reusing spare element: {err:?}");
                self.spare.clone()
            }
        };
        element.set_class_name(spec.class);
        let _ = element.set_attribute("style", &spec.placement.to_css());
        let _ = parent.append_child(&element);
        element
    }

    fn bounding_box(&self, element: &HtmlElement) -> Rect {
        to_rect(&element.get_bounding_client_rect())
    }

    fn animate(&mut self, element: &HtmlElement, to: Offset, duration_ms: f32, easing: Easing) {
        self.pin(element);
        let style = element.style();
        if duration_ms > 0.0 {
            // Flush layout so the transition starts from the pinned position
            let _ = element.offset_width();
            let timing = format!("{duration_ms}ms {}", easing.as_css());
            let _ = style.set_property("transition", &format!("left {timing}, top {timing}"));
        }
        let _ = style.set_property("left", &format!("{}px", to.left));
        let _ = style.set_property("top", &format!("{}px", to.top));
    }

    fn stop(&mut self, element: &HtmlElement) {
        self.pin(element);
    }

    fn remove(&mut self, element: &HtmlElement) {
        element.remove();
    }

    fn set_text(&mut self, element: &HtmlElement, text: &str) {
        element.set_text_content(Some(text));
    }

    fn schedule_periodic(&mut self, task: Task, interval_ms: u32) -> i32 {
        // Handle 0 is never issued, so cancelling it later is harmless
        self.window
            .set_interval_with_callback_and_timeout_and_arguments_1(
                self.on_interval.as_ref().unchecked_ref(),
                interval_ms as i32,
                &JsValue::from_f64(encode_task(task)),
            )
            .unwrap_or_else(|err| {
                log::error!("setInterval for {task:?} failed: {err:?}");
                0
            })
    }

    fn cancel(&mut self, timer: i32) {
        self.window.clear_interval_with_handle(timer);
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second mount on the same page finds the logger already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount a game into `container_id`, wire keyboard and focus, start play
pub fn mount(container_id: &str) -> anyhow::Result<Rc<RefCell<Game<WebToolkit>>>> {
    let slot: DispatchSlot = Rc::new(RefCell::new(None));
    let toolkit = WebToolkit::new(slot.clone())?;

    // The board is absolutely positioned inside the container
    if let Some(container) = toolkit.find_by_id(container_id) {
        if container.style().get_property_value("position").unwrap_or_default().is_empty() {
            let _ = container.style().set_property("position", "relative");
        }
    }

    let window = toolkit.window.clone();
    let seed = js_sys::Date::now() as u64;
    let game = Rc::new(RefCell::new(Game::mount(toolkit, container_id, seed)?));

    let weak = Rc::downgrade(&game);
    *slot.borrow_mut() = Some(Box::new(move |task| {
        if let Some(game) = weak.upgrade() {
            game.borrow_mut().handle_task(task);
        }
    }));

    setup_input_handlers(&window, game.clone());
    setup_auto_pause(&window, game.clone());
    log::info!("Pong running (seed {})", seed);
    Ok(game)
}

fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game<WebToolkit>>>) {
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().key_down(KeyCode(event.key_code())) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().key_up(KeyCode(event.key_code())) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_auto_pause(window: &Window, game: Rc<RefCell<Game<WebToolkit>>>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
        game.borrow_mut().blur();
        log::info!("Auto-paused (window blur)");
    });
    let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Repaint every `.moving-bg` element with the cycling gradient
pub fn start_backdrop(config: BackdropConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let targets = document.get_elements_by_class_name("moving-bg");
    if targets.length() == 0 {
        log::info!("No .moving-bg elements, backdrop disabled");
        return;
    }

    let backdrop = RefCell::new(Backdrop::new(config));
    let handle = Rc::new(Cell::new(0));
    let interval = handle.clone();
    let timer_window = window.clone();
    let closure = Closure::<dyn FnMut()>::new(move || {
        let mut backdrop = backdrop.borrow_mut();
        let css = backdrop.css();
        for i in 0..targets.length() {
            if let Some(el) = targets.item(i).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
                let _ = el.style().set_property("background", &css);
            }
        }
        if backdrop.is_finished() {
            timer_window.clear_interval_with_handle(interval.get());
        }
        backdrop.advance();
    });
    if let Ok(id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        STEP_MS as i32,
    ) {
        handle.set(id);
    }
    closure.forget();
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    init_logging();
    log::info!("Folio Pong loaded");
    start_backdrop(BackdropConfig::default());

    let has_container = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONTAINER_ID))
        .is_some();
    if !has_container {
        log::info!("No #{CONTAINER_ID} on this page, waiting for start_pong");
        return;
    }
    if let Err(e) = mount(CONTAINER_ID) {
        log::error!("Pong failed to start: {e:#}");
    }
}

/// Host page entry point: mount the game into `container_id`
///
/// Pages with a `#pong-container` are mounted automatically on load; this
/// is for other containers.
#[wasm_bindgen]
pub fn start_pong(container_id: &str) -> Result<(), JsValue> {
    init_logging();
    mount(container_id).map(|_| ()).map_err(|e| {
        log::error!("Pong failed to start: {e:#}");
        JsValue::from_str(&format!("{e:#}"))
    })
}
