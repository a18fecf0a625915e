//! Popball entry point
//!
//! Wires the deterministic sim to the page: animation loop, round timer,
//! input listeners and HUD updates.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent, Window};

    use popball::audio::{AudioManager, SoundEffect};
    use popball::consts::*;
    use popball::difficulty::{Difficulty, ViewportClass};
    use popball::highscores::HighScore;
    use popball::sim::{Bounds, GameEvent, GamePhase, GameState, step};
    use popball::ui;

    /// 1 Hz round clock. A single stored interval handle guards against
    /// duplicate tickers; stop clears it synchronously so no pending tick
    /// fires afterwards.
    struct RoundTimer {
        handle: Option<i32>,
        /// Created once at startup and kept alive for the whole session
        tick: Option<Closure<dyn FnMut()>>,
    }

    impl RoundTimer {
        fn new() -> Self {
            Self {
                handle: None,
                tick: None,
            }
        }

        fn set_callback(&mut self, tick: Closure<dyn FnMut()>) {
            self.tick = Some(tick);
        }

        /// Arm the interval. No-op when already armed.
        fn start(&mut self) {
            if self.handle.is_some() {
                return;
            }
            let Some(tick) = &self.tick else { return };
            let Some(window) = web_sys::window() else {
                return;
            };
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                1000,
            ) {
                Ok(handle) => self.handle = Some(handle),
                Err(_) => log::warn!("Failed to arm round timer"),
            }
        }

        /// Drop the interval so no further tick fires
        fn stop(&mut self) {
            if let Some(handle) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }

    /// Game instance holding sim state and its collaborators
    struct Game {
        state: GameState,
        store: HighScore,
        audio: AudioManager,
        timer: RoundTimer,
        container: Option<Element>,
        circles: Vec<Element>,
    }

    impl Game {
        fn new(
            seed: u64,
            container: Option<Element>,
            circles: Vec<Element>,
            viewport: ViewportClass,
            bounds: Bounds,
        ) -> Self {
            let store = HighScore::load();
            let mut state = GameState::new(seed, circles.len(), viewport, store.value(), bounds);

            // Per-target point values from data-score; malformed reads as 1
            for (ball, circle) in state.balls.iter_mut().zip(&circles) {
                if let Some(attr) = circle.get_attribute("data-score") {
                    ball.point_value = attr.trim().parse().unwrap_or(DEFAULT_POINT_VALUE);
                }
            }

            Self {
                state,
                store,
                audio: AudioManager::new(),
                timer: RoundTimer::new(),
                container,
                circles,
            }
        }

        /// Current container dimensions. Without a container everything
        /// degrades to a zero-sized arena.
        fn bounds(&self) -> Bounds {
            match &self.container {
                Some(c) => Bounds::new(c.client_width() as f32, c.client_height() as f32),
                None => Bounds::new(0.0, 0.0),
            }
        }

        /// Position each target element from its ball
        fn render_balls(&self) {
            for (ball, circle) in self.state.balls.iter().zip(&self.circles) {
                if let Some(el) = circle.dyn_ref::<HtmlElement>() {
                    let _ = el.style().set_property(
                        "transform",
                        &format!("translate({}px, {}px)", ball.pos.x, ball.pos.y),
                    );
                }
            }
        }

        /// Push sim state into the HUD and overlay
        fn update_hud(&self) {
            ui::set_text("current-score", &self.state.score.to_string());
            ui::set_text("high-score", &self.state.high_score.to_string());
            ui::set_text("timer", &self.state.time_left.to_string());

            let warn = self.state.time_left <= TIMER_WARN_SECS
                && self.state.phase == GamePhase::Running;
            ui::set_class("timer", if warn { "warn" } else { "" });

            // The pause button doubles as resume
            ui::set_text(
                "pause-game",
                match self.state.phase {
                    GamePhase::Paused => "Resume",
                    _ => "Pause",
                },
            );

            match self.state.phase {
                GamePhase::Ready => ui::show_overlay(
                    "Ready to Play?",
                    "Tap Start to begin. Choose a difficulty anytime.",
                    "Start",
                ),
                GamePhase::Paused => ui::show_overlay("Paused", "Tap Resume to continue", "Resume"),
                GamePhase::Ended => ui::show_overlay(
                    "Time's Up!",
                    &format!(
                        "You scored {} points on {} mode!",
                        self.state.score,
                        self.state.difficulty.as_str()
                    ),
                    "Play Again",
                ),
                GamePhase::Running => ui::hide_overlay(),
            }
        }

        /// React to sim events: sounds, persistence, logging
        fn process_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::BallPopped { .. } => self.audio.play(SoundEffect::Pop),
                    GameEvent::NewHighScore { score } => {
                        self.audio.play(SoundEffect::HighScore);
                        self.store.record(score);
                        self.store.save();
                    }
                    GameEvent::RoundEnded { score, difficulty } => {
                        self.audio.play(SoundEffect::RoundEnd);
                        log::info!("Round over: {} points on {} mode", score, difficulty.as_str());
                    }
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Popball starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let container = document.query_selector(".container").ok().flatten();
        if container.is_none() {
            log::warn!("No .container element - running with a zero-sized arena");
        }

        let circles = collect_circles(&document);
        if circles.is_empty() {
            log::warn!("No .circle targets in page");
        }

        let viewport = current_viewport(&window);
        let seed = js_sys::Date::now() as u64;

        let bounds = match &container {
            Some(c) => Bounds::new(c.client_width() as f32, c.client_height() as f32),
            None => Bounds::new(0.0, 0.0),
        };

        let game = Rc::new(RefCell::new(Game::new(
            seed, container, circles, viewport, bounds,
        )));

        log::info!("Game initialized with seed: {}", seed);

        apply_difficulty_attr(&game);
        setup_timer(game.clone());
        setup_ball_handlers(game.clone());
        setup_control_buttons(game.clone());
        setup_difficulty_buttons(game.clone());
        setup_reset_high_score(game.clone());
        setup_auto_pause(game.clone());
        setup_resize(game.clone());

        game.borrow().render_balls();
        game.borrow().update_hud();

        request_animation_frame_loop(game);

        log::info!("Popball running!");
    }

    /// Gather the clickable targets, one ball each, in document order
    fn collect_circles(document: &Document) -> Vec<Element> {
        let mut circles = Vec::new();
        if let Ok(list) = document.query_selector_all(".circle") {
            for i in 0..list.length() {
                if let Some(node) = list.item(i) {
                    if let Ok(el) = node.dyn_into::<Element>() {
                        circles.push(el);
                    }
                }
            }
        }
        circles
    }

    fn current_viewport(window: &Window) -> ViewportClass {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        ViewportClass::classify(width as u32)
    }

    /// Mirror the active difficulty onto the container so CSS can size the
    /// targets
    fn apply_difficulty_attr(game: &Rc<RefCell<Game>>) {
        let g = game.borrow();
        if let Some(container) = &g.container {
            let _ = container.set_attribute("data-difficulty", g.state.difficulty.as_str());
        }
    }

    /// Keep the interval armed exactly while the round is running
    fn sync_timer(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if g.state.phase == GamePhase::Running {
            g.timer.start();
        } else {
            g.timer.stop();
        }
    }

    /// Install the 1 Hz tick callback. The closure lives for the session;
    /// only the interval handle comes and goes.
    fn setup_timer(game: Rc<RefCell<Game>>) {
        let tick = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut g = game.borrow_mut();
                if g.state.on_timer_tick() {
                    g.timer.stop();
                }
                g.process_events();
            })
        };
        game.borrow_mut().timer.set_callback(tick);
    }

    /// Clicking a target scores while running. Listeners are attached once
    /// and never re-bound; the phase guard lives in the sim.
    fn setup_ball_handlers(game: Rc<RefCell<Game>>) {
        let circles = game.borrow().circles.clone();
        for (index, circle) in circles.iter().enumerate() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.state.on_ball_clicked(index);
                g.process_events();
            });
            let _ =
                circle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_control_buttons(game: Rc<RefCell<Game>>) {
        // Start / resume
        {
            let game = game.clone();
            on_click("start-game", move || {
                {
                    let mut g = game.borrow_mut();
                    let bounds = g.bounds();
                    g.state.start_or_resume(bounds);
                }
                sync_timer(&game);
            });
        }

        // Pause toggles to resume when already paused
        {
            let game = game.clone();
            on_click("pause-game", move || {
                {
                    let mut g = game.borrow_mut();
                    let bounds = g.bounds();
                    match g.state.phase {
                        GamePhase::Running => g.state.pause(),
                        GamePhase::Paused => g.state.start_or_resume(bounds),
                        _ => {}
                    }
                }
                sync_timer(&game);
            });
        }

        // New game
        {
            let game = game.clone();
            on_click("new-game", move || {
                {
                    let mut g = game.borrow_mut();
                    let bounds = g.bounds();
                    g.state.new_game(bounds);
                    g.render_balls();
                }
                sync_timer(&game);
            });
        }
    }

    /// One listener per `.difficulty-btn`, keyed by its data-difficulty value
    fn setup_difficulty_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(list) = document.query_selector_all(".difficulty-btn") else {
            return;
        };
        let buttons: Vec<Element> = (0..list.length())
            .filter_map(|i| list.item(i)?.dyn_into::<Element>().ok())
            .collect();

        for button in &buttons {
            let game = game.clone();
            let all_buttons = buttons.clone();
            let btn = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let difficulty = btn
                    .get_attribute("data-difficulty")
                    .and_then(|s| Difficulty::from_str(&s))
                    .unwrap_or_default();

                for b in &all_buttons {
                    let _ = b.class_list().remove_1("active");
                }
                let _ = btn.class_list().add_1("active");

                {
                    let mut g = game.borrow_mut();
                    let bounds = g.bounds();
                    g.state.change_difficulty(difficulty, bounds);
                    g.render_balls();
                }
                sync_timer(&game);
                apply_difficulty_attr(&game);
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wiping the stored high score is destructive, so it goes through the
    /// confirmation modal first
    fn setup_reset_high_score(game: Rc<RefCell<Game>>) {
        on_click("reset-high-score", move || {
            let game = game.clone();
            ui::confirm(
                "Reset High Score?",
                "This clears your stored best score. It cannot be undone.",
                "Reset",
                move || {
                    let mut g = game.borrow_mut();
                    g.store.clear();
                    g.state.reset_high_score();
                    log::info!("High score reset");
                },
            );
        });
    }

    /// Pause a running round when the tab is hidden
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else {
            return;
        };

        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                let running = game.borrow().state.phase == GamePhase::Running;
                if running {
                    game.borrow_mut().state.pause();
                    sync_timer(&game);
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Reclassify the viewport on window resize; target sizes follow
    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let viewport = current_viewport(&win);
            game.borrow_mut().state.set_viewport(viewport);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Attach a click handler to the element with `id`, if present
    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(el) = document.get_element_by_id(id) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Self-rescheduling animation loop. Stepping is gated on the Running
    /// phase; the loop itself never stops.
    fn request_animation_frame_loop(game: Rc<RefCell<Game>>) {
        let cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let scheduled = cb.clone();

        *cb.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            {
                let mut g = game.borrow_mut();
                let bounds = g.bounds();
                step(&mut g.state, bounds);
                g.render_balls();
                g.update_hud();
            }
            schedule_frame(&scheduled);
        }));

        schedule_frame(&cb);
    }

    fn schedule_frame(cb: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
        let Some(window) = web_sys::window() else { return };
        if let Some(closure) = cb.borrow().as_ref() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Popball (native) starting...");
    log::info!("The game targets the browser - build with trunk for the web version");

    headless_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run one scripted round without a browser, as a smoke check
#[cfg(not(target_arch = "wasm32"))]
fn headless_round() {
    use popball::consts::HEADLESS_BALL_COUNT;
    use popball::difficulty::{Difficulty, ViewportClass, profile_for};
    use popball::sim::{Bounds, GamePhase, GameState, step};

    let bounds = Bounds::new(800.0, 600.0);
    let mut state = GameState::new(1, HEADLESS_BALL_COUNT, ViewportClass::Regular, 0, bounds);
    state.change_difficulty(Difficulty::Hard, bounds);
    state.start_or_resume(bounds);

    let duration = profile_for(Difficulty::Hard).duration_secs as usize;
    for second in 0..duration {
        for _ in 0..60 {
            step(&mut state, bounds);
        }
        state.on_ball_clicked(second % HEADLESS_BALL_COUNT);
        state.on_timer_tick();
    }

    assert_eq!(state.phase, GamePhase::Ended);
    log::info!(
        "Headless round complete: {} points on {} mode",
        state.score,
        state.difficulty.as_str()
    );
    println!("✓ Headless round: {} points", state.score);
}
