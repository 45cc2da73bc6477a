//! Tron Orbit entry point
//!
//! Handles platform-specific initialization and drives the effects loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, PointerEvent};

    use tron_orbit::renderer::css;
    use tron_orbit::sim::{TargetEvent, TargetRegion};
    use tron_orbit::{Frame, Settings, SplashEffects};

    /// Class the host page styles for a button hit by lightning
    const TARGET_HIT_CLASS: &str = "tron-button-highlight";
    /// Class for the rotating highlight
    const HIGHLIGHT_CLASS: &str = "highlighted-button";
    const DIMMING_CLASS: &str = "highlight-dimming";
    const TARGET_SELECTOR: &str = "[id^='orbit-btn-']";

    /// Host instance holding the effects core and DOM handles
    struct Host {
        effects: SplashEffects,
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        raf_id: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Host {
        fn now() -> f64 {
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now)
        }

        /// Resize canvas backing store and push the new viewport to the core
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let dpr = window.device_pixel_ratio();
            self.canvas.set_width((w * dpr) as u32);
            self.canvas.set_height((h * dpr) as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

            self.effects.supply_viewport(w as f32, h as f32);
            self.apply_sizes();
        }

        /// Button sizes only change on resize
        fn apply_sizes(&self) {
            for item in self.effects.layout().all_items() {
                if let Some(el) = self.element(&item.id) {
                    let size = format!("{:.1}px", item.button_size);
                    let style = el.style();
                    let _ = style.set_property("width", &size);
                    let _ = style.set_property("height", &size);
                }
            }
        }

        /// Read button geometry from the DOM
        fn collect_targets(&self) -> Vec<TargetRegion> {
            let Ok(nodes) = self.document.query_selector_all(TARGET_SELECTOR) else {
                return Vec::new();
            };
            (0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
                .map(|el| {
                    let rect = el.get_bounding_client_rect();
                    TargetRegion::from_rect(
                        el.id(),
                        rect.left() as f32,
                        rect.top() as f32,
                        rect.width() as f32,
                        rect.height() as f32,
                    )
                })
                .collect()
        }

        fn element(&self, id: &str) -> Option<HtmlElement> {
            self.document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }

        fn frame(&mut self, time: f64) {
            // FPS tracking
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                self.fps = ((self.frame_times.len() as f64 - 1.0) * 1000.0 / (time - oldest)) as u32;
            }

            let targets = self.collect_targets();
            self.effects.supply_targets(targets);

            let frame = self.effects.tick(time);
            self.apply_dom(&frame);
            self.draw(&frame);
        }

        fn apply_dom(&self, frame: &Frame) {
            for t in &frame.orbit {
                if let Some(el) = self.element(&t.id) {
                    let _ = el.style().set_property("transform", &css::orbit_transform(t));
                }
            }

            for item in self.effects.layout().all_items() {
                if let Some(el) = self.element(&item.id) {
                    let current = frame.highlight.highlighted.as_deref() == Some(item.id.as_str());
                    let classes = el.class_list();
                    let _ = classes.toggle_with_force(HIGHLIGHT_CLASS, frame.highlight.is_highlighted(&item.id));
                    let _ = classes.toggle_with_force(DIMMING_CLASS, current && frame.highlight.is_dimming);
                }
            }

            self.apply_target_events(&frame.events);
        }

        fn apply_target_events(&self, events: &[TargetEvent]) {
            for event in events {
                let (id, on) = match event {
                    TargetEvent::TargetHit { id, .. } => (id, true),
                    TargetEvent::TargetUnhit { id } => (id, false),
                };
                if let Some(el) = self.element(id) {
                    let _ = el.class_list().toggle_with_force(TARGET_HIT_CLASS, on);
                    let style = el.style();
                    for (prop, value) in css::target_hit_style(on) {
                        let _ = style.set_property(prop, &value);
                    }
                }
            }
        }

        fn draw(&self, frame: &Frame) {
            let ctx = &self.ctx;
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;
            ctx.save();
            let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            ctx.clear_rect(0.0, 0.0, w, h);
            ctx.restore();

            ctx.set_line_cap("round");
            for seg in &frame.trail {
                ctx.set_stroke_style_str(&css::trail_stroke(seg.opacity));
                ctx.set_line_width(seg.width as f64);
                ctx.begin_path();
                ctx.move_to(seg.from.x as f64, seg.from.y as f64);
                ctx.line_to(seg.to.x as f64, seg.to.y as f64);
                ctx.stroke();
            }

            for sprite in &frame.particles {
                ctx.set_global_alpha(sprite.opacity.clamp(0.0, 1.0) as f64);
                match sprite.glow {
                    Some(glow) => {
                        ctx.set_shadow_blur((glow.blur + glow.spread) as f64);
                        ctx.set_shadow_color(&css::trail_stroke(glow.alpha));
                    }
                    None => ctx.set_shadow_blur(0.0),
                }
                ctx.set_fill_style_str(&sprite.color.css());
                ctx.begin_path();
                let _ = ctx.arc(
                    sprite.pos.x as f64,
                    sprite.pos.y as f64,
                    (sprite.diameter() * 0.5) as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }
            ctx.set_global_alpha(1.0);
            ctx.set_shadow_blur(0.0);
        }

        /// Apply a settings change and persist it
        fn change_settings(&mut self, change: impl FnOnce(&mut Settings)) {
            let mut settings = self.effects.settings().clone();
            change(&mut settings);
            settings.save();
            log::info!(
                "Settings: quality {}, reduced motion {}",
                settings.quality.as_str(),
                settings.reduced_motion
            );
            self.effects.update_settings(settings);
        }

        fn shutdown(&mut self) {
            if let (Some(id), Some(window)) = (self.raf_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            let events = self.effects.unmount();
            self.apply_target_events(&events);
            log::info!("Host stopped (last fps {})", self.fps);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tron Orbit starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("effects-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let host = Rc::new(RefCell::new(Host {
            effects: SplashEffects::new(seed, settings),
            document,
            canvas,
            ctx,
            raf_id: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        log::info!("Effects initialized with seed: {}", seed);

        {
            let mut h = host.borrow_mut();
            h.resize();
            let now = Host::now();
            h.effects.mount(now);
        }

        setup_input_handlers(host.clone());
        setup_lifecycle(host.clone());

        request_animation_frame(host);

        log::info!("Tron Orbit running!");
    }

    fn setup_input_handlers(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Pointer movement
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let now = Host::now();
                host.borrow_mut()
                    .effects
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32, now);
            });
            let _ = document
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer enters the page
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                host.borrow_mut().effects.pointer_entered();
            });
            let _ = document.document_element().map(|root| {
                root.add_event_listener_with_callback("pointerenter", closure.as_ref().unchecked_ref())
            });
            closure.forget();
        }

        // Pointer leaves the page
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                host.borrow_mut().effects.pointer_left();
            });
            let _ = document.document_element().map(|root| {
                root.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref())
            });
            closure.forget();
        }

        // Settings shortcuts: Q cycles quality, M toggles reduced motion
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.key().as_str() {
                    "q" | "Q" => host
                        .borrow_mut()
                        .change_settings(|s| s.apply_preset(s.quality.next())),
                    "m" | "M" => host
                        .borrow_mut()
                        .change_settings(|s| s.reduced_motion = !s.reduced_motion),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Viewport resize
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                host.borrow_mut().resize();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_lifecycle(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().shutdown();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let host_clone = host.clone();
        let closure = Closure::once(move |time: f64| {
            frame_loop(host_clone, time);
        });
        let id = window.request_animation_frame(closure.as_ref().unchecked_ref()).ok();
        closure.forget();
        host.borrow_mut().raf_id = id;
    }

    fn frame_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            if !h.effects.is_mounted() {
                return;
            }
            h.frame(time);
        }

        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_host::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tron Orbit (native) starting...");
    log::info!("The effects need a browser host - build for wasm32 to see them");

    let preset = std::env::args()
        .nth(1)
        .and_then(|arg| tron_orbit::QualityPreset::from_str(&arg))
        .unwrap_or_default();

    println!("\nRunning headless effects demo ({})...", preset.as_str());
    run_headless_demo(preset);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Sweep a pointer across a button for two seconds of 60fps frames
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo(preset: tron_orbit::QualityPreset) {
    use tron_orbit::sim::{TargetEvent, TargetRegion};
    use tron_orbit::{Settings, SplashEffects};

    let mut effects = SplashEffects::new(7, Settings::from_preset(preset));
    effects.supply_viewport(1280.0, 720.0);
    effects.supply_targets(vec![TargetRegion::from_rect("orbit-btn-apps", 660.0, 330.0, 60.0, 60.0)]);
    effects.mount(0.0);

    let mut hits = 0;
    let mut peak = 0;
    let mut retired = 0;
    for frame_no in 0..120u32 {
        let now = frame_no as f64 * (1000.0 / 60.0);
        let x = 560.0 + (frame_no as f32 * 2.0);
        effects.pointer_moved(x, 360.0, now);

        let frame = effects.tick(now);
        peak = peak.max(frame.particles.len());
        retired += frame.retired.len();
        hits += frame
            .events
            .iter()
            .filter(|e| matches!(e, TargetEvent::TargetHit { .. }))
            .count();
    }
    let released = effects.unmount();

    log::info!("Peak particles: {}", peak);
    log::info!("Particles retired: {}", retired);
    log::info!("Target hits: {} (released {})", hits, released.len());
    assert!(peak <= effects.settings().max_particles(), "particle cap exceeded");
    println!("✓ Headless effects demo passed!");
}
