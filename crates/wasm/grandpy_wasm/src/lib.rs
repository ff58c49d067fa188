//! # grandpy_wasm
//!
//! Browser entry point for the GrandPy chat widget.
//!
//! ```js
//! import init, { start } from "./grandpy_wasm.js";
//! await init();
//! start({ imageFolder: "/static/img" });
//! ```

pub mod dom;
pub mod form;
pub mod maps;

use std::cell::Cell;
use std::fmt::Display;
use std::rc::Rc;

use grandpy_client::QuestionClient;
use grandpy_core::config::WidgetConfig;
use grandpy_core::widget::ChatWidget;
use log::info;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlFormElement;

use crate::dom::DomPage;

thread_local! {
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

fn js_error(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// Decode the optional JS config object; `undefined`/`null` mean defaults.
pub fn read_config(config: JsValue) -> Result<WidgetConfig, JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(js_error)?
    };
    config.validated().map_err(js_error)
}

fn init_logging(config: &WidgetConfig) {
    if let Some(level) = config.level_filter().to_level() {
        let _ = console_log::init_with_level(level);
    }
}

/// Bind the widget to the page and intercept the chat form's submissions.
///
/// Works once per page: after a successful call, later calls return an error
/// instead of installing a second submit listener. A failed call can be
/// retried.
#[wasm_bindgen]
pub fn start(config: JsValue) -> Result<(), JsValue> {
    if STARTED.with(Cell::get) {
        return Err(js_error("GrandPy widget already started"));
    }
    let config = read_config(config)?;
    init_logging(&config);

    let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| js_error("window has no document"))?;

    let chat_form: HtmlFormElement = dom::query(&document, &config.form_selector)
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| js_error(format!("{} is not a form", config.form_selector)))?;

    let page = DomPage::new(&document, &config).map_err(js_error)?;
    let origin = window.location().origin()?;
    let client = QuestionClient::new(&origin, &config.endpoint).map_err(js_error)?;
    info!("GrandPy widget posting to {}", client.endpoint());

    let widget = Rc::new(ChatWidget::new(page, client, config));
    form::install_submit_handler(&chat_form, widget)?;
    STARTED.with(|started| started.set(true));
    Ok(())
}

/// Returns the version of the grandpy_wasm package.
#[wasm_bindgen]
pub fn version() -> String {
    grandpy_core::version().to_string()
}
