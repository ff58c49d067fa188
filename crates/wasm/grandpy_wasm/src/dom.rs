//! [`Page`] over the live DOM.

use grandpy_core::config::WidgetConfig;
use grandpy_core::page::{BusyTarget, Page};
use grandpy_core::view::{Element, MapView, Node};
use grandpy_core::{WidgetError, WidgetResult};
use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

use crate::maps;

/// The chat page: transcript container, body and submit button.
pub struct DomPage {
    document: Document,
    transcript: web_sys::Element,
    body: HtmlElement,
    submit_button: web_sys::Element,
}

fn page_error(e: JsValue) -> WidgetError {
    WidgetError::Page(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

/// First element matching `selector`.
pub fn query(document: &Document, selector: &str) -> WidgetResult<web_sys::Element> {
    document
        .query_selector(selector)
        .map_err(page_error)?
        .ok_or_else(|| WidgetError::ElementNotFound(selector.to_string()))
}

impl DomPage {
    /// Look up the transcript and submit button named by `config`.
    pub fn new(document: &Document, config: &WidgetConfig) -> WidgetResult<Self> {
        Ok(Self {
            document: document.clone(),
            transcript: query(document, &config.transcript_selector)?,
            body: document
                .body()
                .ok_or_else(|| WidgetError::ElementNotFound("body".into()))?,
            submit_button: query(document, &config.submit_button_selector)?,
        })
    }

    /// Build the DOM subtree for `element`.
    ///
    /// Maps are drawn as they are created; a map service failure leaves an
    /// empty container rather than failing the render.
    pub fn materialize(&self, element: &Element) -> Result<web_sys::Element, JsValue> {
        let node = self.document.create_element(element.tag)?;
        let classes = node.class_list();
        for class in &element.classes {
            classes.add_1(class)?;
        }
        for (name, value) in &element.attributes {
            node.set_attribute(name, value)?;
        }

        for child in &element.children {
            match child {
                Node::Text(text) => {
                    node.append_child(&self.document.create_text_node(text))?;
                }
                Node::Element(child) => {
                    let child = self.materialize(child)?;
                    node.append_child(&child)?;
                }
                Node::Map(map) => {
                    let container = self.document.create_element("div")?;
                    container.class_list().add_1(MapView::CLASS)?;
                    if let Err(e) = maps::draw(&container, map) {
                        warn!("map service failed: {e:?}");
                    }
                    node.append_child(&container)?;
                }
            }
        }

        Ok(node)
    }
}

impl Page for DomPage {
    type Handle = web_sys::Element;

    fn append_to_transcript(&self, element: &Element) -> WidgetResult<web_sys::Element> {
        let node = self.materialize(element).map_err(page_error)?;
        self.transcript.append_child(&node).map_err(page_error)?;
        Ok(node)
    }

    fn remove_from_transcript(&self, handle: &web_sys::Element) {
        handle.remove();
    }

    fn scroll_into_view(&self, handle: &web_sys::Element) {
        handle.scroll_into_view();
    }

    fn toggle_class(&self, target: BusyTarget, class: &str) -> WidgetResult<bool> {
        let list = match target {
            BusyTarget::Body => self.body.class_list(),
            BusyTarget::SubmitButton => self.submit_button.class_list(),
        };
        list.toggle(class).map_err(page_error)
    }
}
