//! Google Maps JavaScript API bindings.
//!
//! Only the two constructors the widget needs. The API script is loaded by
//! the page; when it is missing the map container stays empty.

use grandpy_core::view::MapView;
use js_sys::{Object, Reflect};
use log::warn;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    type GoogleMap;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "Map")]
    fn new(container: &web_sys::Element, options: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    type Marker;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "Marker")]
    fn new(options: &JsValue) -> Result<Marker, JsValue>;
}

/// Whether the page loaded the Maps API.
pub fn is_available() -> bool {
    Reflect::get(&js_sys::global(), &JsValue::from_str("google"))
        .and_then(|google| Reflect::get(&google, &JsValue::from_str("maps")))
        .is_ok_and(|maps| maps.is_object())
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

fn lat_lng(map: &MapView) -> Result<Object, JsValue> {
    let location = Object::new();
    set(&location, "lat", &map.latitude.into())?;
    set(&location, "lng", &map.longitude.into())?;
    Ok(location)
}

/// Draw `map` into `container`: centered on the location, with a marker.
pub fn draw(container: &web_sys::Element, map: &MapView) -> Result<(), JsValue> {
    if !is_available() {
        warn!("google.maps is not loaded, map left empty");
        return Ok(());
    }

    let location = lat_lng(map)?;

    let map_options = Object::new();
    set(&map_options, "zoom", &JsValue::from(map.zoom))?;
    set(&map_options, "center", &location)?;
    let google_map = GoogleMap::new(container, &map_options)?;

    let marker_options = Object::new();
    set(&marker_options, "position", &location)?;
    set(&marker_options, "map", &google_map)?;
    set(&marker_options, "title", &JsValue::from_str(&map.title))?;
    Marker::new(&marker_options)?;

    Ok(())
}
