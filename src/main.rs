//! Pulse Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use pulse_dodge::renderer::{Label, RenderState, ShapeBatch, TextAlign};
    use pulse_dodge::sim::GamePhase;
    use pulse_dodge::{Game, Settings};

    /// Everything the page keeps alive between frames
    struct App {
        game: Game,
        canvas: HtmlCanvasElement,
        render_state: Option<RenderState>,
        batch: ShapeBatch,
        /// Reusable label elements inside `#labels`
        label_nodes: Vec<HtmlElement>,
        /// Set once the simulation hits an unrecoverable error
        halted: bool,
    }

    impl App {
        /// Convert a pointer offset on the canvas to field coordinates
        fn to_field(&self, offset_x: i32, offset_y: i32) -> (f32, f32) {
            let field = self.game.state.field;
            let w = self.canvas.client_width().max(1) as f32;
            let h = self.canvas.client_height().max(1) as f32;
            (
                offset_x as f32 * field.width / w,
                offset_y as f32 * field.height / h,
            )
        }

        fn step(&mut self, time: f64) {
            if !self.halted {
                if let Err(e) = self.game.frame(time) {
                    log::error!("Simulation halted: {e}");
                    self.halted = true;
                }
            }

            self.game.draw(&mut self.batch);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            self.sync_labels();
            self.update_chrome();
        }

        /// Mirror the batch's text labels as absolutely positioned DOM nodes
        fn sync_labels(&mut self) {
            let document = match web_sys::window().and_then(|w| w.document()) {
                Some(d) => d,
                None => return,
            };
            let Some(layer) = document.get_element_by_id("labels") else {
                return;
            };

            let field = self.game.state.field;
            let scale_x = self.canvas.client_width() as f32 / field.width;
            let scale_y = self.canvas.client_height() as f32 / field.height;

            while self.label_nodes.len() < self.batch.labels.len() {
                let Some(node) = document
                    .create_element("div")
                    .ok()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };
                let _ = node.set_attribute("class", "label");
                let _ = layer.append_child(&node);
                self.label_nodes.push(node);
            }

            for (i, node) in self.label_nodes.iter().enumerate() {
                match self.batch.labels.get(i) {
                    Some(label) => place_label(node, label, scale_x, scale_y),
                    None => {
                        let _ = node.style().set_property("display", "none");
                    }
                }
            }
        }

        /// Show the start button only before the first run
        fn update_chrome(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(btn) = document.get_element_by_id("start-btn") {
                let class = if self.game.phase() == GamePhase::Idle {
                    ""
                } else {
                    "hidden"
                };
                let _ = btn.set_attribute("class", class);
            }
        }
    }

    fn place_label(node: &HtmlElement, label: &Label, scale_x: f32, scale_y: f32) {
        let style = node.style();
        let size = label.size_px * scale_y;
        // Labels are positioned by baseline; approximate the ascent for the top edge
        let top = label.pos.y * scale_y - size * 0.8;
        let transform = match label.align {
            TextAlign::Left => "none",
            TextAlign::Center => "translateX(-50%)",
        };
        node.set_text_content(Some(&label.text));
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{}px", label.pos.x * scale_x));
        let _ = style.set_property("top", &format!("{}px", top));
        let _ = style.set_property("font-size", &format!("{}px", size));
        let _ = style.set_property("color", &label.css_color());
        let _ = style.set_property("transform", transform);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pulse Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings =
            Settings::from_json_or_default(canvas.get_attribute("data-settings").as_deref());
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Game::new(settings, seed).expect("settings were validated on load");
        let field = game.state.field;

        // The canvas shows the field 1:1 in CSS pixels, at device resolution
        let dpr = window.device_pixel_ratio();
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", field.width));
        let _ = style.set_property("height", &format!("{}px", field.height));
        let width = (field.width as f64 * dpr) as u32;
        let height = (field.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let app = Rc::new(RefCell::new(App {
            game,
            canvas: canvas.clone(),
            render_state: None,
            batch: ShapeBatch::new(),
            label_nodes: Vec::new(),
            halted: false,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, (field.width, field.height)).await
        {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_input_handlers(&canvas, app.clone());
        setup_start_button(app.clone());

        request_animation_frame(app);

        log::info!("Pulse Dodge running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer position
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.to_field(event.offset_x(), event.offset_y());
                a.game.input.pointer_moved(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - shoot, or start/restart
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.to_field(event.offset_x(), event.offset_y());
                let phase = a.game.phase();
                a.game.input.pointer_clicked(x, y, phase);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let window = web_sys::window().expect("no window");

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.input.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - key-up events will not arrive while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.input.release_all();
                log::debug!("Released held keys (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.input.start_pressed();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().step(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pulse Dodge (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let settings = pulse_dodge::Settings::load();
    let seed = settings.seed.unwrap_or(0x5eed);
    match headless_session(settings, seed) {
        Ok(score) => println!("Headless session finished with score {score}"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one run with a simple autopilot: pulse when ready, shoot the nearest enemy
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(
    settings: pulse_dodge::Settings,
    seed: u64,
) -> Result<u64, Box<dyn std::error::Error>> {
    use pulse_dodge::Game;
    use pulse_dodge::consts::SIM_DT_MS;
    use pulse_dodge::sim::GamePhase;

    let mut game = Game::new(settings, seed)?;
    game.input.start_pressed();

    // Two simulated minutes at most
    let max_frames = (120_000.0 / SIM_DT_MS) as u64;
    for frame in 0..max_frames {
        let player = game.state.player.pos;
        let nearest = game
            .state
            .enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
        if let Some(target) = nearest {
            let phase = game.phase();
            game.input.pointer_clicked(target.x, target.y, phase);
        }
        game.input.key_down("f");
        game.input.key_up("f");

        game.frame(frame as f64 * SIM_DT_MS)?;
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Headless run ended in {:?} after {} ticks",
        game.phase(),
        game.state.time_ticks
    );
    Ok(game.state.score)
}
