//! Chat form serialization and submit handling.

use std::rc::Rc;

use grandpy_client::QuestionClient;
use grandpy_core::models::QuestionForm;
use grandpy_core::widget::ChatWidget;
use js_sys::Array;
use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, FormData, HtmlFormElement};

use crate::dom::DomPage;

/// The widget as bound in the browser.
pub type BrowserWidget = ChatWidget<DomPage, QuestionClient>;

/// Read the form's string fields in document order. File inputs are skipped.
pub fn serialize(form: &HtmlFormElement) -> Result<QuestionForm, JsValue> {
    let data = FormData::new_with_form(form)?;
    let entries = js_sys::try_iter(&data)?
        .ok_or_else(|| JsValue::from_str("FormData is not iterable"))?;

    let mut fields = QuestionForm::default();
    for entry in entries {
        let pair = Array::from(&entry?);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push(name, value);
        }
    }
    Ok(fields)
}

/// Replace the native submission of `form` with an asynchronous one.
///
/// Each submit spawns its own request on the browser event loop; the
/// listener lives as long as the page.
pub fn install_submit_handler(
    form: &HtmlFormElement,
    widget: Rc<BrowserWidget>,
) -> Result<(), JsValue> {
    let target = form.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let fields = match serialize(&target) {
            Ok(fields) => fields,
            Err(e) => {
                error!("cannot read chat form: {e:?}");
                return;
            }
        };

        let widget = Rc::clone(&widget);
        spawn_local(async move {
            widget.submit(&fields).await;
        });
    });

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}
