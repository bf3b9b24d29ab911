#![cfg(target_arch = "wasm32")]
use head_core::SceneConfig;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod asset;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod labels;
mod listener;
mod overlay;
mod render;

use app::App;
use listener::{ListenerGuard, Listeners};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> Option<ListenerGuard> {
    dom::sync_canvas_backing_size(canvas);
    let window = web::window()?;
    let canvas_resize = canvas.clone();
    ListenerGuard::new(&window, "resize", move |_ev: web::Event| {
        dom::sync_canvas_backing_size(&canvas_resize);
    })
}

fn spawn_asset_load(app: Rc<RefCell<App>>, url: String) {
    spawn_local(async move {
        match asset::load_head_mesh(&url).await {
            Ok(mesh) => {
                log::info!(
                    "[asset] head mesh ready: {} vertices, {} triangles",
                    mesh.positions.len(),
                    mesh.triangle_count()
                );
                app.borrow_mut().mesh = Some(Rc::new(mesh));
            }
            // Markers still render; picking stays a no-op without a mesh.
            Err(e) => log::error!("[asset] failed to load {}: {:?}", url, e),
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("head-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config: SceneConfig = dom::read_scene_config(&document);
    let mut listeners = Listeners::default();

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    listeners.push(wire_canvas_resize(&canvas));

    let app = Rc::new(RefCell::new(App::new(&config)));
    spawn_asset_load(app.clone(), config.asset_url.clone());

    let gpu = frame::init_gpu(&canvas).await;
    let labels = labels::LabelLayer::new(&document);
    match &labels {
        Some(layer) => app
            .borrow_mut()
            .state
            .markers
            .fit_label_widths(|text| layer.measure_width(text)),
        None => log::warn!("missing #{}; labels disabled", constants::LABEL_CANVAS_ID),
    }

    let wiring = events::InputWiring {
        canvas: canvas.clone(),
        app: app.clone(),
    };
    let picker = Rc::new(RefCell::new(events::PickerTool::new(wiring.clone())));
    if config.picker_enabled {
        picker.borrow_mut().activate();
    }

    events::wire_input_handlers(&wiring, &mut listeners);
    listeners.push(events::wire_global_keydown(app.clone(), picker.clone()));
    log::info!("[input] {} listeners registered", listeners.len());

    overlay::show_hint(&document);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        canvas,
        labels,
        gpu,
        draw: Default::default(),
        last_instant: Instant::now(),
        _listeners: listeners,
        _picker: picker,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
