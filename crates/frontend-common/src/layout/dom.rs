//! Browser document host

use super::{AssetHost, LayoutError, Widget};
use crate::config::LAYOUT_ATTRIBUTE;
use async_trait::async_trait;
use futures::channel::oneshot;
use gloo::events::EventListener;
use js_sys::{Function, Object, Reflect};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// [`AssetHost`] backed by the live DOM
///
/// Widget listeners are kept per layout and dropped, which detaches them,
/// when the layout is released.
#[derive(Default)]
pub struct DomAssetHost {
    listeners: RefCell<HashMap<String, Vec<EventListener>>>,
}

impl DomAssetHost {
    pub fn new() -> Self {
        Self::default()
    }
}

fn document() -> Result<Document, LayoutError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| LayoutError::Dom("no document available".into()))
}

fn dom_error(value: JsValue) -> LayoutError {
    LayoutError::Dom(format!("{value:?}"))
}

/// Append `element` to `parent` and wait for its load or error event
async fn append_and_wait(parent: &Element, element: &Element) -> Result<bool, LayoutError> {
    let (sender, receiver) = oneshot::channel();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let on_load = EventListener::once(element, "load", {
        let sender = sender.clone();
        move |_| {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(true);
            }
        }
    });
    let on_error = EventListener::once(element, "error", move |_| {
        if let Some(sender) = sender.borrow_mut().take() {
            let _ = sender.send(false);
        }
    });

    parent.append_child(element).map_err(dom_error)?;
    let loaded = receiver.await.unwrap_or(false);

    drop(on_load);
    drop(on_error);
    Ok(loaded)
}

fn js_object(entries: &[(&str, JsValue)]) -> Object {
    let object = Object::new();
    for (key, value) in entries {
        let _ = Reflect::set(&object, &JsValue::from_str(key), value);
    }
    object
}

fn global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined())
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn init_animate_on_scroll() {
    let Some(aos) = global("AOS") else {
        return;
    };
    let options = js_object(&[
        ("duration", JsValue::from(1000)),
        ("once", JsValue::TRUE),
    ]);
    if let Some(init) = method(&aos, "init") {
        let _ = init.call1(&aos, &options);
    }
    if let Some(refresh) = method(&aos, "refresh") {
        let _ = refresh.call0(&aos);
    }
}

fn init_carousels() {
    let Some(jquery) = global("jQuery").and_then(|value| value.dyn_into::<Function>().ok()) else {
        return;
    };
    let Ok(carousels) = jquery.call1(
        &JsValue::NULL,
        &JsValue::from_str(".owl-carousel:not(.owl-loaded)"),
    ) else {
        return;
    };
    let Some(owl) = method(&carousels, "owlCarousel") else {
        warn!("Carousel plugin not loaded");
        return;
    };

    let items = |count: u32| -> JsValue { js_object(&[("items", JsValue::from(count))]).into() };
    let responsive = js_object(&[("0", items(1)), ("768", items(2)), ("1024", items(3))]);
    let options = js_object(&[
        ("loop", JsValue::TRUE),
        ("margin", JsValue::from(24)),
        ("nav", JsValue::TRUE),
        ("dots", JsValue::FALSE),
        ("autoplay", JsValue::FALSE),
        ("responsive", responsive.into()),
    ]);
    let _ = owl.call1(&carousels, &options);
}

fn mobile_menu_listeners(document: &Document) -> Vec<EventListener> {
    let Some(body) = document.body() else {
        return Vec::new();
    };
    let mut listeners = Vec::new();

    if let Some(open) = document.get_element_by_id("mobile_btn") {
        let body = body.clone();
        listeners.push(EventListener::new(&open, "click", move |_| {
            let _ = body.class_list().toggle("menu-opened");
        }));
    }
    if let Some(close) = document.get_element_by_id("menu_close") {
        listeners.push(EventListener::new(&close, "click", move |_| {
            let _ = body.class_list().remove_1("menu-opened");
        }));
    }

    listeners
}

#[async_trait(?Send)]
impl AssetHost for DomAssetHost {
    async fn load_stylesheet(&self, url: &str, layout: &str) -> Result<(), LayoutError> {
        let document = document()?;
        let head = document
            .head()
            .ok_or_else(|| LayoutError::Dom("document has no head".into()))?;

        let link = document.create_element("link").map_err(dom_error)?;
        link.set_attribute("rel", "stylesheet").map_err(dom_error)?;
        link.set_attribute("href", url).map_err(dom_error)?;
        link.set_attribute(LAYOUT_ATTRIBUTE, layout).map_err(dom_error)?;

        if append_and_wait(&head, &link).await? {
            Ok(())
        } else {
            link.remove();
            Err(LayoutError::Stylesheet { url: url.to_string() })
        }
    }

    async fn load_script(&self, url: &str, layout: &str) -> Result<(), LayoutError> {
        let document = document()?;
        let body = document
            .body()
            .ok_or_else(|| LayoutError::Dom("document has no body".into()))?;

        let script = document.create_element("script").map_err(dom_error)?;
        script.set_attribute("src", url).map_err(dom_error)?;
        script.set_attribute(LAYOUT_ATTRIBUTE, layout).map_err(dom_error)?;

        if append_and_wait(&body, &script).await? {
            Ok(())
        } else {
            Err(LayoutError::Script { url: url.to_string() })
        }
    }

    fn has_script(&self, url: &str) -> bool {
        document()
            .ok()
            .and_then(|document| document.query_selector(&format!("script[src=\"{url}\"]")).ok())
            .flatten()
            .is_some()
    }

    fn remove_stylesheets(&self, layout: &str) -> Vec<String> {
        let Ok(document) = document() else {
            return Vec::new();
        };
        let selector = format!("link[{LAYOUT_ATTRIBUTE}=\"{layout}\"]");
        let Ok(links) = document.query_selector_all(&selector) else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        for index in 0..links.length() {
            let Some(link) = links.get(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            if let Some(href) = link.get_attribute("href") {
                removed.push(href);
            }
            link.remove();
        }
        removed
    }

    fn widgets_ready(&self) -> bool {
        global("jQuery").is_some()
    }

    fn init_widgets(&self, layout: &str, widgets: &[Widget]) {
        let mut installed = Vec::new();

        for widget in widgets {
            match widget {
                Widget::AnimateOnScroll => init_animate_on_scroll(),
                Widget::Carousel => init_carousels(),
                Widget::MobileMenu => {
                    if let Ok(document) = document() {
                        installed.extend(mobile_menu_listeners(&document));
                    }
                }
            }
        }

        debug!(layout, listeners = installed.len(), "Widgets initialized");
        self.listeners
            .borrow_mut()
            .insert(layout.to_string(), installed);
    }

    fn release_widgets(&self, layout: &str) {
        self.listeners.borrow_mut().remove(layout);
    }
}
