use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use layers::legend::{ControlPosition, LEGEND_CLASS, Legend};
use layers::popup::{PopupAction, PopupEvent, escape_html};
use layers::raster::TileSource;
use layers::Layer;
use runtime::{
    EARTHQUAKES_OVERLAY, FeedError, FeedKind, MapConfig, MapContext, PLATES_OVERLAY,
};

mod leaflet;
use leaflet::{latlng, latlngs, named_layers, to_js};

const CONFIG_ELEMENT_ID: &str = "quakemap-config";

/// Everything mounted on the page. `ctx` is the single source of truth;
/// the Leaflet handles mirror it.
struct App {
    ctx: MapContext,
    map: leaflet::Map,
    quake_group: leaflet::LayerGroup,
    plate_group: leaflet::LayerGroup,
    status_el: Option<HtmlElement>,
    // Page-lifetime listeners; dropping them would detach the handlers.
    popup_handlers: Vec<(PopupEvent, Closure<dyn FnMut(leaflet::MarkerEvent)>)>,
    control_handlers: Vec<Closure<dyn FnMut(leaflet::LayersControlEvent)>>,
    control_mounts: Vec<Closure<dyn FnMut(JsValue) -> JsValue>>,
}

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();

    let config = read_page_config()?;
    let app = mount(config)?;
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    load_feed(app.clone(), FeedKind::Earthquakes);
    load_feed(app, FeedKind::TectonicPlates);
    Ok(())
}

/// Reads the optional JSON config element; absent means stock settings.
fn read_page_config() -> Result<MapConfig, JsValue> {
    let document = document()?;
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(MapConfig::default());
    };
    let text = el.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(MapConfig::default());
    }
    MapConfig::from_json_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Map Initializer: viewport, base layers, overlay groups, layer control.
fn mount(config: MapConfig) -> Result<Rc<RefCell<App>>, JsValue> {
    let ctx = runtime::initialize_map(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let map_options = serde_json::json!({
        "center": [ctx.center.lat, ctx.center.lng],
        "zoom": ctx.zoom,
    });
    let map = leaflet::new_map(&ctx.config.container_id, &to_js(&map_options)?);

    let mut base_handles: Vec<(String, JsValue)> = Vec::new();
    for layer in ctx.base_layers() {
        let handle: JsValue = tile_layer(&layer.source)?.into();
        base_handles.push((layer.name().to_string(), handle));
    }
    if let Some((_, first)) = base_handles.first() {
        map.add_layer(first);
    }

    let quake_group = leaflet::new_layer_group();
    let plate_group = leaflet::new_layer_group();
    map.add_layer(&quake_group);
    map.add_layer(&plate_group);

    let base_obj = named_layers(base_handles.iter().map(|(n, h)| (n.as_str(), h)))?;
    let quake_js: &JsValue = quake_group.as_ref();
    let plate_js: &JsValue = plate_group.as_ref();
    let overlay_obj = named_layers([(EARTHQUAKES_OVERLAY, quake_js), (PLATES_OVERLAY, plate_js)])?;
    let control_options = serde_json::json!({ "collapsed": ctx.control().collapsed });
    leaflet::new_layers_control(&base_obj, &overlay_obj, &to_js(&control_options)?).add_to(&map);

    let app = Rc::new(RefCell::new(App {
        ctx,
        map,
        quake_group,
        plate_group,
        status_el: None,
        popup_handlers: Vec::new(),
        control_handlers: Vec::new(),
        control_mounts: Vec::new(),
    }));

    install_popup_handlers(&app);
    install_control_handlers(&app);
    flush_events(&mut app.borrow_mut().ctx);
    Ok(app)
}

fn tile_layer(source: &TileSource) -> Result<leaflet::TileLayer, JsValue> {
    let options = serde_json::json!({
        "attribution": source.attribution,
        "subdomains": source.subdomains,
        "maxZoom": source.max_zoom,
    });
    Ok(leaflet::new_tile_layer(&source.url_template, &to_js(&options)?))
}

/// One shared handler per pointer event; each is bound on every marker.
fn install_popup_handlers(app: &Rc<RefCell<App>>) {
    let handlers = PopupEvent::ALL
        .iter()
        .map(|&event| {
            let handler = Closure::wrap(Box::new(move |e: leaflet::MarkerEvent| {
                let marker = e.target();
                match event.action() {
                    PopupAction::Open => marker.open_popup(),
                    PopupAction::Close => marker.close_popup(),
                };
            }) as Box<dyn FnMut(leaflet::MarkerEvent)>);
            (event, handler)
        })
        .collect();
    app.borrow_mut().popup_handlers = handlers;
}

/// Mirrors layer-control clicks into the context.
fn install_control_handlers(app: &Rc<RefCell<App>>) {
    let weak = Rc::downgrade(app);
    let mut handlers = Vec::new();
    for (event, visible) in [("overlayadd", Some(true)), ("overlayremove", Some(false)), ("baselayerchange", None)] {
        let weak: Weak<RefCell<App>> = weak.clone();
        let handler = Closure::wrap(Box::new(move |e: leaflet::LayersControlEvent| {
            let Some(app) = weak.upgrade() else {
                return;
            };
            let name = e.name();
            let mut app = app.borrow_mut();
            let result = match visible {
                Some(v) => app.ctx.set_overlay_visible(&name, v),
                None => app.ctx.select_base_layer(&name),
            };
            if let Err(err) = result {
                web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
            }
            flush_events(&mut app.ctx);
        }) as Box<dyn FnMut(leaflet::LayersControlEvent)>);
        app.borrow().map.on(event, handler.as_ref().unchecked_ref());
        handlers.push(handler);
    }
    app.borrow_mut().control_handlers = handlers;
}

fn load_feed(app: Rc<RefCell<App>>, kind: FeedKind) {
    let url = match runtime::begin_feed(&mut app.borrow_mut().ctx, kind) {
        Ok(url) => url,
        Err(err) => {
            web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
            return;
        }
    };
    flush_events(&mut app.borrow_mut().ctx);

    spawn_local(async move {
        let payload = fetch_text(&url).await;
        let result = match kind {
            FeedKind::Earthquakes => on_earthquakes(&app, payload),
            FeedKind::TectonicPlates => on_plates(&app, payload),
        };
        if let Err(err) = result {
            web_sys::console::error_1(&err);
        }
        flush_events(&mut app.borrow_mut().ctx);
    });
}

async fn fetch_text(url: &str) -> Result<String, FeedError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| FeedError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(FeedError::Http(resp.status()));
    }
    resp.text().await.map_err(|e| FeedError::Body(e.to_string()))
}

/// Earthquake Layer Builder plus Legend Builder, run once the feed settles.
fn on_earthquakes(app: &Rc<RefCell<App>>, payload: Result<String, FeedError>) -> Result<(), JsValue> {
    let feed = payload.and_then(|text| runtime::parse_earthquake_payload(&text));
    let mut guard = app.borrow_mut();
    let app = &mut *guard;

    runtime::build_earthquake_layer(&mut app.ctx, feed)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    for marker in &app.ctx.earthquakes().markers {
        let circle = leaflet::new_circle_marker(&latlng(marker.position), &to_js(&marker.style)?);
        circle.bind_popup(&marker.popup_html);
        for (event, handler) in &app.popup_handlers {
            circle.on(event.event_name(), handler.as_ref().unchecked_ref());
        }
        app.quake_group.add_layer(&circle);
    }

    if let Some(legend) = app.ctx.legend().cloned() {
        mount_legend(app, &legend)?;
    }
    show_status(app)
}

/// Tectonic Plate Layer Builder.
fn on_plates(app: &Rc<RefCell<App>>, payload: Result<String, FeedError>) -> Result<(), JsValue> {
    let feed = payload.and_then(|text| runtime::parse_plate_payload(&text));
    let mut guard = app.borrow_mut();
    let app = &mut *guard;

    runtime::build_plate_layer(&mut app.ctx, feed)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let options = to_js(&app.ctx.plates().style)?;
    for path in app.ctx.plates().paths() {
        let line = leaflet::new_polyline(&latlngs(path), &options);
        app.plate_group.add_layer(&line);
    }
    show_status(app)
}

fn mount_legend(app: &mut App, legend: &Legend) -> Result<(), JsValue> {
    let div = create_div(LEGEND_CLASS)?;
    div.set_inner_html(&legend.to_html());
    add_control(app, legend.position, div)
}

/// Shows feed failures in a visible box instead of failing silently.
fn show_status(app: &mut App) -> Result<(), JsValue> {
    if app.ctx.status_messages().is_empty() {
        return Ok(());
    }
    let html: String = app
        .ctx
        .status_messages()
        .iter()
        .map(|m| format!("<p>{}</p>", escape_html(&m.text)))
        .collect();

    if let Some(el) = &app.status_el {
        el.set_inner_html(&html);
        return Ok(());
    }
    let div = create_div("info status")?;
    div.set_inner_html(&html);
    app.status_el = Some(div.clone());
    add_control(app, ControlPosition::TopRight, div)
}

fn add_control(app: &mut App, position: ControlPosition, content: HtmlElement) -> Result<(), JsValue> {
    let control = leaflet::new_control(&to_js(&serde_json::json!({ "position": position }))?);
    let on_add = Closure::wrap(Box::new(move |_map: JsValue| -> JsValue { content.clone().into() })
        as Box<dyn FnMut(JsValue) -> JsValue>);
    control.set_on_add(on_add.as_ref().unchecked_ref());
    control.add_to(&app.map);
    app.control_mounts.push(on_add);
    Ok(())
}

fn create_div(class: &str) -> Result<HtmlElement, JsValue> {
    let el = document()?.create_element("div")?;
    el.set_class_name(class);
    el.dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("div is not an HtmlElement"))
}

fn flush_events(ctx: &mut MapContext) {
    for event in ctx.events.drain() {
        let line = format!("[{}] {}: {}", event.seq, event.kind, event.message);
        web_sys::console::log_1(&JsValue::from_str(&line));
    }
}

/// Current feed states, for debugging from the browser console.
#[wasm_bindgen]
pub fn feed_status() -> String {
    APP.with(|slot| {
        let slot = slot.borrow();
        let Some(app) = slot.as_ref() else {
            return "not mounted".to_string();
        };
        let app = app.borrow();
        [FeedKind::Earthquakes, FeedKind::TectonicPlates]
            .iter()
            .map(|k| format!("{}: {}", k.label(), app.ctx.feed(*k).state().name()))
            .collect::<Vec<_>>()
            .join(", ")
    })
}
