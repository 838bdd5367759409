//! Jegue Rei entry point
//!
//! Browser: wires the DOM screens, keyboard and sprite loading around the
//! library and drives frames with `requestAnimationFrame`.
//! Native: runs one headless session and prints the final score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, HtmlInputElement};

    use jegue_rei::app::{App, AppScreen, SaveOutcome};
    use jegue_rei::platform::{AssetTracker, KeyState, canvas_size};
    use jegue_rei::renderer::{CanvasSurface, Sprites};
    use jegue_rei::sim::EntityKind;
    use jegue_rei::{FrameOutcome, GameLoop, LocalHighScores, Tuning};

    const SPRITES: [(EntityKind, &str); 3] = [
        (EntityKind::Player, "/player.png"),
        (EntityKind::Obstacle, "/nyang.png"),
        (EntityKind::Food, "/food_green.png"),
    ];

    /// Everything the browser callbacks share
    struct Shell {
        app: App<LocalHighScores>,
        session: Option<GameLoop>,
        keys: KeyState,
        assets: AssetTracker,
        sprites: Sprites<HtmlImageElement>,
        tuning: Tuning,
        canvas: HtmlCanvasElement,
        surface: Option<CanvasSurface>,
        frame_handle: Option<i32>,
    }

    impl Shell {
        fn new(canvas: HtmlCanvasElement, tuning: Tuning) -> Self {
            let kinds: Vec<EntityKind> = SPRITES.iter().map(|(kind, _)| *kind).collect();
            Self {
                app: App::new(LocalHighScores::load()),
                session: None,
                keys: KeyState::default(),
                assets: AssetTracker::new(&kinds),
                sprites: Sprites::default(),
                surface: CanvasSurface::acquire(&canvas),
                tuning,
                canvas,
                frame_handle: None,
            }
        }

        /// Size the canvas to the window; returns the new bounds
        fn fit_canvas(&mut self) -> glam::Vec2 {
            let window = web_sys::window().expect("no window");
            let inner_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let inner_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            let size = canvas_size(
                inner_w as f32,
                inner_h as f32,
                self.tuning.min_canvas_side(),
            );
            self.canvas.set_width(size.x as u32);
            self.canvas.set_height(size.y as u32);
            size
        }

        /// Drop the running session and its pending frame
        fn teardown(&mut self) {
            if let Some(handle) = self.frame_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
            if let Some(mut session) = self.session.take() {
                session.teardown();
            }
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Reflect the current screen in the DOM
    fn show_screen(shell: &mut Shell) {
        let document = document();
        let screen = shell.app.screen();
        set_visible(&document, "menu", screen == AppScreen::Menu);
        set_visible(&document, "loading", screen == AppScreen::Loading);
        set_visible(&document, "game-container", screen == AppScreen::Playing);

        let over = matches!(screen, AppScreen::GameOver { .. });
        set_visible(&document, "game-over", over);
        if let AppScreen::GameOver { score } = screen {
            set_text(&document, "final-score", &score.to_string());
        }
        set_visible(&document, "save-btn", shell.app.can_save());

        let show_scores = screen == AppScreen::Menu || over;
        set_visible(&document, "high-scores", show_scores);
        if show_scores {
            render_high_scores(&document, shell);
        }
    }

    fn render_high_scores(document: &Document, shell: &Shell) {
        let Some(list) = document.get_element_by_id("high-score-list") else {
            return;
        };
        list.set_text_content(None);
        let entries = shell.app.high_scores();
        if entries.is_empty() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some("No high scores yet"));
                let _ = list.append_child(&li);
            }
            return;
        }
        for (i, entry) in entries.iter().enumerate() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(&format!("{}. {} - {}", i + 1, entry.name, entry.score)));
                let _ = list.append_child(&li);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Jegue Rei starting...");

        let document = document();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let shell = Rc::new(RefCell::new(Shell::new(canvas, Tuning::load())));
        {
            let mut s = shell.borrow_mut();
            s.fit_canvas();
            show_screen(&mut s);
        }

        load_sprites(shell.clone());
        setup_keyboard(shell.clone());
        setup_resize(shell.clone());
        setup_buttons(shell);

        log::info!("Jegue Rei ready");
    }

    fn load_sprites(shell: Rc<RefCell<Shell>>) {
        for (kind, src) in SPRITES {
            let Ok(image) = HtmlImageElement::new() else {
                log::warn!("Could not create image element for {:?}", kind);
                asset_settled(&shell, kind, None);
                continue;
            };
            image.set_cross_origin(Some("anonymous"));

            {
                let shell = shell.clone();
                let loaded = image.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    asset_settled(&shell, kind, Some(loaded.clone()));
                });
                image.set_onload(Some(closure.as_ref().unchecked_ref()));
                closure.forget();
            }
            {
                let shell = shell.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    asset_settled(&shell, kind, None);
                });
                image.set_onerror(Some(closure.as_ref().unchecked_ref()));
                closure.forget();
            }

            image.set_src(src);
        }
    }

    fn asset_settled(shell: &Rc<RefCell<Shell>>, kind: EntityKind, image: Option<HtmlImageElement>) {
        let start = {
            let mut s = shell.borrow_mut();
            let ok = image.is_some();
            if let Some(image) = image {
                s.sprites.set(kind, image);
            }
            if !s.assets.report(kind, ok) {
                return;
            }
            log::info!("Sprites settled ({} failed)", s.assets.failed().len());
            s.app.assets_settled() == AppScreen::Playing && s.session.is_none()
        };
        if start {
            start_session(shell.clone());
        }
    }

    fn start_session(shell: Rc<RefCell<Shell>>) {
        {
            let mut s = shell.borrow_mut();
            s.teardown();
            s.keys.release_all();
            let bounds = s.fit_canvas();
            let now = js_sys::Date::now();
            let seed = now as u64;
            s.session = Some(GameLoop::start(seed, bounds, s.tuning.clone(), now));
            show_screen(&mut s);
        }
        request_animation_frame(shell);
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().expect("no window");
        let inner = shell.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(inner);
        });
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        shell.borrow_mut().frame_handle = handle;
    }

    fn game_loop(shell: Rc<RefCell<Shell>>) {
        let keep_going = {
            let mut guard = shell.borrow_mut();
            let s = &mut *guard;
            s.frame_handle = None;
            if s.surface.is_none() {
                s.surface = CanvasSurface::acquire(&s.canvas);
            }
            let input = s.keys.sample();
            let Some(session) = s.session.as_mut() else {
                return;
            };
            match session.frame(js_sys::Date::now(), &input, s.surface.as_mut(), &s.sprites) {
                FrameOutcome::Running | FrameOutcome::Skipped => true,
                FrameOutcome::GameOver(score) => {
                    s.app.game_over(score);
                    show_screen(s);
                    false
                }
                FrameOutcome::Stopped => false,
            }
        };
        if keep_going {
            request_animation_frame(shell);
        }
    }

    fn setup_keyboard(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().expect("no window");

        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut s = shell.borrow_mut();
                // Only steal keys from the page while playing (the name box needs WASD)
                if s.keys.key_down(&event.key()) && s.app.screen() == AppScreen::Playing {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                shell.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                shell.borrow_mut().keys.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut s = shell.borrow_mut();
            let bounds = s.fit_canvas();
            if let Some(session) = s.session.as_mut() {
                session.resize(bounds);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(shell: Rc<RefCell<Shell>>) {
        let document = document();

        {
            let shell = shell.clone();
            let doc = document.clone();
            on_click(&document, "start-btn", move || {
                let raw = doc
                    .get_element_by_id("player-name")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                let result = {
                    let mut s = shell.borrow_mut();
                    let ready = s.assets.is_ready();
                    s.app.request_start(&raw, ready)
                };
                match result {
                    Ok(AppScreen::Playing) => {
                        set_text(&doc, "name-error", "");
                        start_session(shell.clone());
                    }
                    Ok(_) => {
                        set_text(&doc, "name-error", "");
                        show_screen(&mut shell.borrow_mut());
                    }
                    Err(e) => set_text(&doc, "name-error", &e.to_string()),
                }
            });
        }

        {
            let shell = shell.clone();
            let doc = document.clone();
            on_click(&document, "save-btn", move || {
                let mut s = shell.borrow_mut();
                match s.app.save_score() {
                    Ok(SaveOutcome::Saved { rank }) => {
                        set_text(&doc, "notice", &format!("Score saved! Rank #{rank}"))
                    }
                    Ok(SaveOutcome::OffBoard) => {
                        set_text(&doc, "notice", "Not enough for the top 10 this time.")
                    }
                    Ok(SaveOutcome::NothingToSave) => {}
                    Err(e) => {
                        log::warn!("Failed to save score: {e}");
                        set_text(&doc, "notice", &format!("Could not save score: {e}"));
                    }
                }
                if let Some(notice) = s.app.take_notice() {
                    set_text(&doc, "notice", &notice);
                }
                show_screen(&mut s);
            });
        }

        {
            let doc = document.clone();
            on_click(&document, "play-again-btn", move || {
                let mut s = shell.borrow_mut();
                s.teardown();
                s.app.play_again();
                set_text(&doc, "notice", "");
                show_screen(&mut s);
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use jegue_rei::renderer::{Sprites, Surface};
    use jegue_rei::sim::TickInput;
    use jegue_rei::{FrameOutcome, GameLoop, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of frames
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Surface that draws nothing
    struct NullSurface;

    impl Surface for NullSurface {
        type Image = ();

        fn clear(&mut self, _size: Vec2, _color: &str) {}
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str) {}
        fn draw_image(&mut self, _image: &(), _center: Vec2, _radius: f32, _rotation: f32) {}
        fn draw_text(&mut self, _text: &str, _pos: Vec2, _color: &str) {}
    }

    /// Play one session with an idle player; returns the final score
    pub fn run(seed: u64) -> u64 {
        let mut game = GameLoop::start(seed, Vec2::new(800.0, 600.0), Tuning::load(), 0.0);
        let mut surface = NullSurface;
        let sprites = Sprites::default();
        let input = TickInput::default();

        for frame in 1..=MAX_FRAMES {
            let now = frame as f64 * FRAME_MS;
            if let FrameOutcome::GameOver(score) =
                game.frame(now, &input, Some(&mut surface), &sprites)
            {
                log::info!("Caught after {} frames", frame);
                return score;
            }
        }
        log::info!("Survived {} frames", MAX_FRAMES);
        game.teardown();
        game.state().score.total()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Jegue Rei (native) starting...");
    log::info!("The playable build is the web version; running a headless session");

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                eprintln!("invalid seed {arg:?}: {e}");
                std::process::exit(2);
            }
        },
        None => 1,
    };

    let score = headless::run(seed);
    println!("Seed {seed}: final score {score}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
