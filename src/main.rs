//! Bill Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, PageTransitionEvent};

    use bill_chase::Tuning;
    use bill_chase::platform::lifecycle::{LifecycleAction, PageTransition, lifecycle_action};
    use bill_chase::platform::time::IntlClock;
    use bill_chase::sim::{Catalog, ClickOutcome, ContainerBounds, GameSession, GameSnapshot};

    /// Game instance holding all state
    struct Game {
        session: GameSession<IntlClock>,
        /// Last snapshot pushed to the DOM
        shown: Option<GameSnapshot>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let session = GameSession::new(seed, Catalog::builtin(), Tuning::load(), IntlClock)
                .unwrap_or_else(|e| {
                    log::warn!("Rejected tuning, using defaults: {}", e);
                    GameSession::with_defaults(seed, IntlClock)
                });
            Self {
                session,
                shown: None,
            }
        }

        /// Fire due timers
        fn update(&mut self) {
            self.session.advance(now_ms());
        }

        /// Push the current snapshot into the DOM (only what changed)
        fn update_view(&mut self, document: &Document) {
            let snap = self.session.snapshot();
            if self.shown.as_ref() == Some(&snap) {
                return;
            }
            let prev = self.shown.take();
            let currency_changed = prev
                .as_ref()
                .map(|p| p.currency_code != snap.currency_code)
                .unwrap_or(true);

            if currency_changed {
                if let Some(el) = html_element(document, "game-container") {
                    let _ = el.style().set_property("background-color", &snap.background_color);
                }
                if let Some(el) = document.get_element_by_id("backdrop") {
                    let class = format!("backdrop city-{}", snap.currency_code.to_lowercase());
                    let _ = el.set_attribute("class", &class);
                }
                set_text(document, "hud-capital", &snap.capital);
                set_text(document, "bill-code", &snap.currency_code);
                set_text(document, "bill-symbol", &snap.symbol);
                if let Some(bill) = html_element(document, "bill") {
                    let _ = bill.style().set_property("background-color", &snap.color);
                }
            }

            if prev.as_ref().map(|p| p.score) != Some(snap.score) {
                if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                    el.set_text_content(Some(&snap.score.to_string()));
                }
            }
            set_text(document, "hud-time", &snap.display_time);
            set_text(document, "bill-denomination", &snap.denomination.to_string());

            // Bill
            if let Some(bill) = html_element(document, "bill") {
                let style = bill.style();
                let _ = style.set_property("left", &format!("{}%", snap.target.x));
                let _ = style.set_property("top", &format!("{}%", snap.target.y));
                let _ = style.set_property("opacity", if snap.is_hitting { "0.7" } else { "1" });
                let _ = style.set_property("scale", if snap.is_hitting { "0.8" } else { "1" });
            }

            // Character
            if let Some(character) = html_element(document, "character") {
                let style = character.style();
                let _ = style.set_property("left", &format!("{}%", snap.character.x));
                let _ = style.set_property("top", &format!("{}%", snap.character.y));
                let transform = if snap.is_hitting {
                    "translate(-50%, -50%) scale(1.1) rotate(5deg)"
                } else {
                    "translate(-50%, -50%)"
                };
                let _ = style.set_property("transform", transform);
            }

            self.shown = Some(snap);
        }

        /// Start over (keeps the page, drops the score)
        fn restart(&mut self, seed: u64) {
            self.session.reset(seed);
            self.shown = None;
        }
    }

    /// Monotonic page time in ms
    fn now_ms() -> u64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now().max(0.0) as u64)
            .unwrap_or(0)
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Bill Chase starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let container = html_element(&document, "game-container").ok_or("no #game-container")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&container, game.clone());
        setup_keyboard(game.clone());
        setup_teardown(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bill Chase running!");
        Ok(())
    }

    fn setup_input_handlers(container: &HtmlElement, game: Rc<RefCell<Game>>) {
        // Mouse move - map client coordinates into the container
        {
            let game = game.clone();
            let container_clone = container.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = container_clone.get_bounding_client_rect();
                let bounds = ContainerBounds::new(
                    rect.left() as f32,
                    rect.top() as f32,
                    rect.width() as f32,
                    rect.height() as f32,
                );
                let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().session.pointer_moved(pointer, bounds);
            });
            let _ = container
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - hit check against the latest positions
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                // Bring timers up to date so the hit delay starts from now
                g.update();
                if let ClickOutcome::Hit { .. } = g.session.click() {
                    log::debug!("Bill hit, resolving shortly");
                }
            });
            let _ = container
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if matches!(event.key().as_str(), "r" | "R") {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop every timer when the page is unloaded; a page restored from the
    /// back/forward cache gets a fresh round if its session was stopped
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for name in ["pagehide", "pageshow"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                let persisted = event.persisted();
                let transition = if event.type_() == "pagehide" {
                    PageTransition::Hide { persisted }
                } else {
                    PageTransition::Show { persisted }
                };
                let active = game.borrow().session.is_active();
                match lifecycle_action(transition, active) {
                    LifecycleAction::Keep => {}
                    LifecycleAction::Shutdown => game.borrow_mut().session.shutdown(),
                    LifecycleAction::Resume => {
                        let seed = js_sys::Date::now() as u64;
                        game.borrow_mut().restart(seed);
                        log::info!("Restored from cache, restarted with seed: {}", seed);
                        request_animation_frame(game.clone());
                    }
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if !g.session.is_active() {
                log::info!("Game loop stopped");
                return;
            }
            g.update();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_view(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bill Chase (native) starting...");
    log::info!("The playable version runs in the browser - use `trunk serve`");

    println!("\nRunning headless demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Chase the bill for a few rounds with a perfect aim and report each catch
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use bill_chase::platform::time::SystemClock;
    use bill_chase::sim::{ClickOutcome, ContainerBounds, GameSession};

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = GameSession::with_defaults(seed, SystemClock);
    // A 640x384 play field somewhere on screen
    let bounds = ContainerBounds::new(20.0, 40.0, 640.0, 384.0);
    let mut now = 0;

    for _ in 0..5 {
        let snap = session.snapshot();
        println!(
            "{} {}{} in {} ({}) at ({:.0}%, {:.0}%)",
            snap.currency_code,
            snap.symbol,
            snap.denomination,
            snap.capital,
            snap.display_time,
            snap.target.x,
            snap.target.y
        );

        let pointer = glam::Vec2::new(
            bounds.left + snap.target.x / 100.0 * bounds.width,
            bounds.top + snap.target.y / 100.0 * bounds.height,
        );
        session.pointer_moved(pointer, bounds);
        match session.click() {
            ClickOutcome::Hit { .. } => println!("  caught it!"),
            other => println!("  {:?}", other),
        }
        now += session.tuning().hit_delay_ms;
        session.advance(now);
        println!("  score: {}", session.state().score);
    }

    session.shutdown();
    println!("\nFinal score: {}", session.state().score);
}
