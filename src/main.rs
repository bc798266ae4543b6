//! Rizz Valentine entry point
//!
//! Handles platform-specific initialization and runs the page loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use rizz_valentine::Settings;
    use rizz_valentine::audio::{AudioManager, play_with_fallback};
    use rizz_valentine::consts::*;
    use rizz_valentine::parse_delta;
    use rizz_valentine::platform::{FaviconCycler, PageView, dom, entity_target};
    use rizz_valentine::sim::{PageEvent, PageState, TickInput, tick};

    thread_local! {
        /// Handle for calls coming from page scripts
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Page instance holding all state
    struct Game {
        state: PageState,
        view: PageView,
        audio: Rc<AudioManager>,
        settings: Settings,
        favicon: FaviconCycler,
        input: TickInput,
        last_time: f64,
        /// Sub-millisecond remainder carried between frames
        accumulator: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: PageState::new(seed, &settings),
                view: PageView::new(),
                audio: Rc::new(AudioManager::new(settings.effective_volume())),
                favicon: FaviconCycler::start(&settings.favicon_frames),
                settings,
                input: TickInput::default(),
                last_time: 0.0,
                accumulator: 0.0,
            }
        }

        /// Feed pending input and elapsed time into the simulation
        fn update(&mut self, time: f64) {
            if self.last_time > 0.0 {
                self.accumulator += time - self.last_time;
            }
            self.last_time = time;

            let dt_ms = (self.accumulator.floor().max(0.0) as u64).min(MAX_FRAME_MS);
            self.accumulator = (self.accumulator - dt_ms as f64).clamp(0.0, 1.0);

            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, dt_ms);
            self.apply_events();
        }

        fn apply_events(&mut self) {
            for event in self.state.drain_events() {
                match &event {
                    PageEvent::Cue(cue) => self.audio.play(*cue),
                    PageEvent::PageSound(sound) => self.audio.play_page_sound(*sound),
                    PageEvent::Clip(clip) => {
                        if let Some(url) = self.settings.clip_url(*clip) {
                            let audio = self.audio.clone();
                            let url = url.to_string();
                            wasm_bindgen_futures::spawn_local(async move {
                                play_with_fallback(&*audio, &url).await;
                            });
                        }
                    }
                    _ => self.view.apply(&event),
                }
            }
        }

        fn render(&self) {
            self.view.render(&self.state);
        }

        /// Stop everything; the page is going away
        fn teardown(&mut self) {
            if self.state.is_torn_down() {
                return;
            }
            let input = TickInput {
                teardown: true,
                ..Default::default()
            };
            tick(&mut self.state, &input, 0);
            self.view.clear();
            self.favicon.stop();
            self.audio.release();
        }
    }

    /// Adjust the rizz counter from page scripts. Malformed deltas count as 0.
    #[wasm_bindgen]
    pub fn bump_rizz(delta: String, label: Option<String>) {
        let delta = parse_delta(&delta);
        GAME.with(|slot| {
            if let Some(game) = slot.borrow().as_ref() {
                game.borrow_mut().input.awards.push((delta, label));
            }
        });
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rizz Valentine starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        log::info!("Page initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            let remaining = g.state.replay_remaining();
            g.view.apply(&PageEvent::ReplayChanged { remaining });
        }

        // Set up input handlers
        setup_buttons(game.clone());
        setup_entity_clicks(game.clone());
        setup_keyboard(game.clone());
        setup_teardown(game.clone());

        // Start page loop
        request_animation_frame(game);

        log::info!("Rizz Valentine running!");
    }

    /// Record input on click of `#id`, if the element exists
    fn on_click(game: &Rc<RefCell<Game>>, id: &str, record: fn(&mut TickInput)) {
        let Some(el) = dom::by_id(id) else {
            log::debug!("#{} missing, control disabled", id);
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            event.stop_propagation();
            let mut g = game.borrow_mut();
            record(&mut g.input);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        on_click(&game, "yesBtn", |input| input.accept = true);
        on_click(&game, "noBtn", |input| input.dodges += 1);
        on_click(&game, "replayAudioBtn", |input| input.replay = true);
        on_click(&game, "backUpBtn", |input| input.back = true);
        on_click(&game, "secretEgg", |input| input.open_secret = true);
        on_click(&game, "closeBalloon", |input| input.close_secret = true);
        on_click(&game, "paw", |input| input.paw = true);
    }

    /// One delegated listener covers every spawned heart and balloon
    fn setup_entity_clicks(game: Rc<RefCell<Game>>) {
        let Some(body) = dom::document().and_then(|d| d.body()) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            if let Some(target) = entity_target(&event) {
                event.stop_propagation();
                game.borrow_mut().input.catches.push(target);
            }
        });
        let _ = body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Escape" {
                game.borrow_mut().input.cancel = true;
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().teardown();
        });
        let _ =
            window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.state.is_torn_down() {
                return;
            }
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
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
    log::info!("Rizz Valentine (native) starting...");
    log::info!("Native mode runs a headless walk-through - run with `trunk serve` for the page");

    println!("\nRunning headless walk-through...");
    headless_walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play the page without a browser: accept, chase a few hearts, pop the
/// secret balloons, then leave.
#[cfg(not(target_arch = "wasm32"))]
fn headless_walkthrough() {
    use rizz_valentine::Settings;
    use rizz_valentine::sim::{GameKind, PageState, TickInput, tick};

    const FRAME_MS: u64 = 16;

    fn frames(state: &mut PageState, ms: u64) {
        let idle = TickInput::default();
        for _ in 0..ms / FRAME_MS {
            tick(state, &idle, FRAME_MS);
        }
    }

    fn catch_first(state: &mut PageState, kind: GameKind) -> bool {
        let Some(id) = state.game(kind).entities().first().map(|e| e.id) else {
            return false;
        };
        let input = TickInput {
            catches: vec![(kind, id)],
            ..Default::default()
        };
        tick(state, &input, FRAME_MS);
        true
    }

    let mut state = PageState::new(0x5EED, &Settings::load());
    let accept = TickInput {
        accept: true,
        ..Default::default()
    };
    tick(&mut state, &accept, FRAME_MS);
    frames(&mut state, 1200);
    catch_first(&mut state, GameKind::Ambient);
    println!("Scene after tapping a floating heart: {:?}", state.scene());

    for _ in 0..20 {
        frames(&mut state, 1000);
        catch_first(&mut state, GameKind::Hearts);
    }
    frames(&mut state, 60_000);
    println!(
        "Hearts collected: {}",
        state.game(GameKind::Hearts).last_report().map_or(0, |r| r.score)
    );

    let open = TickInput {
        open_secret: true,
        ..Default::default()
    };
    tick(&mut state, &open, FRAME_MS);
    while state.game(GameKind::Balloons).is_running() {
        if !catch_first(&mut state, GameKind::Balloons) {
            frames(&mut state, FRAME_MS);
        }
    }
    println!(
        "Secret unlocked: {}",
        state.game(GameKind::Balloons).last_report().is_some_and(|r| r.won)
    );

    let leave = TickInput {
        teardown: true,
        ..Default::default()
    };
    tick(&mut state, &leave, 0);
    println!("Final rizz: {} ({} timers left)", state.rizz(), state.pending_timers());
    assert_eq!(state.pending_timers(), 0, "teardown must cancel every timer");
    println!("✓ Walk-through complete!");
}
