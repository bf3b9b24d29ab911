use crate::app::App;
use crate::dom;
use crate::events::PickerTool;
use crate::labels::LabelLayer;
use crate::listener::Listeners;
use crate::render;
use head_core::DrawList;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: Rc<RefCell<App>>,
    pub canvas: web::HtmlCanvasElement,
    pub labels: Option<LabelLayer>,
    pub gpu: Option<render::GpuState>,
    pub draw: DrawList,
    pub last_instant: Instant,
    // Listener guards live as long as the loop does.
    pub _listeners: Listeners,
    pub _picker: Rc<RefCell<PickerTool>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        let w = self.canvas.width();
        let h = self.canvas.height();

        let mut app = self.app.borrow_mut();
        app.state.set_viewport(w as f32, h as f32);
        let update = app.state.tick(dt_sec);
        if let Some(cursor) = update.cursor {
            dom::set_cursor(&self.canvas, cursor);
        }
        self.draw.build(&app.state.markers, &app.state.transient);

        if let Some(g) = &mut self.gpu {
            if !g.has_mesh() {
                if let Some(mesh) = &app.mesh {
                    g.set_mesh(mesh);
                    log::info!("[render] head mesh uploaded ({} tris)", mesh.triangle_count());
                }
            }
            g.resize_if_needed(w, h);
            match g.render(&app.state.camera, &self.draw) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        if let Some(labels) = &self.labels {
            labels.draw(&app.state, w, h);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
