//! Bindings to the subset of Leaflet (`window.L`) the page uses.
//!
//! Leaflet owns tiles, pan/zoom, hit-testing and popups; Rust only decides
//! what to add and how it is styled.

use js_sys::{Array, Function, JSON, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use foundation::LatLng;

#[wasm_bindgen]
extern "C" {
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn new_map(container_id: &str, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &Map, layer: &JsValue) -> Map;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &Function) -> Map;

    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn new_tile_layer(url_template: &str, options: &JsValue) -> TileLayer;

    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn new_layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &LayerGroup, layer: &JsValue) -> LayerGroup;

    pub type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    pub fn new_circle_marker(latlng: &JsValue, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &CircleMarker, html: &str) -> CircleMarker;

    #[wasm_bindgen(method)]
    pub fn on(this: &CircleMarker, event: &str, handler: &Function) -> CircleMarker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &CircleMarker) -> CircleMarker;

    #[wasm_bindgen(method, js_name = closePopup)]
    pub fn close_popup(this: &CircleMarker) -> CircleMarker;

    pub type Polyline;

    #[wasm_bindgen(js_namespace = L, js_name = polyline)]
    pub fn new_polyline(latlngs: &JsValue, options: &JsValue) -> Polyline;

    pub type Control;

    #[wasm_bindgen(js_namespace = L, js_name = control)]
    pub fn new_control(options: &JsValue) -> Control;

    #[wasm_bindgen(js_namespace = ["L", "control"], js_name = layers)]
    pub fn new_layers_control(base_layers: &Object, overlays: &Object, options: &JsValue)
        -> Control;

    #[wasm_bindgen(method, setter = onAdd)]
    pub fn set_on_add(this: &Control, handler: &Function);

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Control, map: &Map) -> Control;

    /// Event object passed to layer handlers; `target` is the marker.
    pub type MarkerEvent;

    #[wasm_bindgen(method, getter)]
    pub fn target(this: &MarkerEvent) -> CircleMarker;

    /// `overlayadd` / `overlayremove` / `baselayerchange` payload.
    pub type LayersControlEvent;

    #[wasm_bindgen(method, getter)]
    pub fn name(this: &LayersControlEvent) -> String;
}

/// Serializes through JSON so option structs keep their serde names.
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    JSON::parse(&text)
}

pub fn latlng(p: LatLng) -> JsValue {
    Array::of2(&JsValue::from_f64(p.lat), &JsValue::from_f64(p.lng)).into()
}

pub fn latlngs(path: &[LatLng]) -> JsValue {
    path.iter().map(|p| latlng(*p)).collect::<Array>().into()
}

/// Plain `{name: layer}` object as the layers control expects.
pub fn named_layers<'a>(entries: impl IntoIterator<Item = (&'a str, &'a JsValue)>) -> Result<Object, JsValue> {
    let obj = Object::new();
    for (name, layer) in entries {
        Reflect::set(&obj, &JsValue::from_str(name), layer)?;
    }
    Ok(obj)
}
