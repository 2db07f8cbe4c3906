//! Swarm Survivor entry point
//!
//! On wasm32 this wires a 2D canvas, keyboard/mouse handlers, HUD text and a
//! restart button to the simulation core. On native it runs a short headless
//! session and prints the final state as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use swarm_survivor::consts::BASE_FRAME_MS;
    use swarm_survivor::sim::{
        GameConfig, GamePhase, GameState, InputState, Ruleset, fire_at, tick,
    };

    const PLAYER_COLOR: &str = "#3498db";
    const PROJECTILE_COLOR: &str = "#fff";
    const HP_BAR_BG: &str = "#000";
    const HP_BAR_FILL: &str = "#2ecc40";
    const ITEM_COLOR: &str = "#f39c12";
    const OBSTACLE_SHADES: [&str; 3] = ["#7f8c8d", "#95a5a6", "#616a6b"];

    /// Game instance: sim state plus the canvas context it draws into
    struct Game {
        state: GameState,
        input: InputState,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::new(config, seed),
                input: InputState::default(),
                ctx,
                last_time: 0.0,
            }
        }

        /// One frame: advance the sim by the rAF delta, draw, refresh the
        /// HUD. Returns false when the loop must halt (game over).
        fn frame(&mut self, time: f64) -> bool {
            let delta = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                BASE_FRAME_MS
            };
            self.last_time = time;

            tick(&mut self.state, &self.input, delta, time);
            self.draw();
            self.update_hud();

            if self.state.phase == GamePhase::GameOver {
                show_restart_button(true);
                false
            } else {
                true
            }
        }

        fn restart(&mut self, seed: u64) {
            self.state.reset_session(seed);
            self.input = InputState::default();
            self.last_time = 0.0;
        }

        fn circle(&self, pos: Vec2, radius: f32, color: &str) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                f64::from(pos.x),
                f64::from(pos.y),
                f64::from(radius),
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.set_fill_style_str(color);
            self.ctx.fill();
        }

        fn draw(&self) {
            let state = &self.state;
            let (w, h) = (f64::from(state.config.width), f64::from(state.config.height));
            self.ctx.clear_rect(0.0, 0.0, w, h);

            for obstacle in &state.obstacles {
                let shade = OBSTACLE_SHADES[usize::from(obstacle.shade) % OBSTACLE_SHADES.len()];
                self.circle(obstacle.pos, obstacle.radius, shade);
            }

            for item in &state.items {
                self.circle(item.pos, item.radius, ITEM_COLOR);
            }

            // Player, at half alpha on the invincibility blink
            if state.player.blink {
                self.ctx.set_global_alpha(0.5);
            }
            self.circle(state.player.pos, state.player.radius, PLAYER_COLOR);
            self.ctx.set_line_width(3.0);
            self.ctx.set_stroke_style_str("#fff");
            self.ctx.stroke();
            self.ctx.set_global_alpha(1.0);

            for p in &state.projectiles {
                self.circle(p.pos, p.radius, PROJECTILE_COLOR);
            }

            for enemy in &state.enemies {
                self.circle(enemy.pos, enemy.radius, enemy.kind.color());
                // Health bar above the enemy
                let x = f64::from(enemy.pos.x - 16.0);
                let y = f64::from(enemy.pos.y - 22.0);
                self.ctx.set_fill_style_str(HP_BAR_BG);
                self.ctx.fill_rect(x, y, 32.0, 5.0);
                self.ctx.set_fill_style_str(HP_BAR_FILL);
                let ratio = f64::from((enemy.hp / enemy.max_hp).clamp(0.0, 1.0));
                self.ctx.fill_rect(x, y, 32.0 * ratio, 5.0);
            }

            if state.phase == GamePhase::GameOver {
                self.ctx.set_global_alpha(0.8);
                self.ctx.set_fill_style_str("#000");
                self.ctx.fill_rect(0.0, 0.0, w, h);
                self.ctx.set_global_alpha(1.0);
                self.ctx.set_fill_style_str("#fff");
                self.ctx.set_font("40px Arial");
                let _ = self.ctx.fill_text("Game Over", w / 2.0 - 110.0, h / 2.0);
                self.ctx.set_font("24px Arial");
                let _ = self.ctx.fill_text(
                    &format!("Score: {}", state.score),
                    w / 2.0 - 50.0,
                    h / 2.0 + 40.0,
                );
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("time") {
                el.set_text_content(Some(&format!("Time: {:.1}", self.state.time_s)));
            }
            if let Some(el) = document.get_element_by_id("hp") {
                el.set_text_content(Some(&format!("HP: {:.1}", self.state.player.hp)));
            }
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
        }
    }

    fn show_restart_button(visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let _ = btn.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Bounds come from the canvas attributes; the rule variant from an
        // optional data attribute
        let ruleset = match canvas.get_attribute("data-ruleset").as_deref() {
            Some("classic") => Ruleset::Classic,
            _ => Ruleset::Survivor,
        };
        let config = GameConfig {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            ruleset,
        };

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context")
            .expect("2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        log::info!("swarm survivor starting ({ruleset:?} rules, seed {seed})");

        let game = Rc::new(RefCell::new(Game::new(config, seed, ctx)));
        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        show_restart_button(false);
        request_animation_frame(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Held-key tracking: keydown sets, keyup clears
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                set_key(&mut game.borrow_mut().input, &event.key(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                set_key(&mut game.borrow_mut().input, &event.key(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click fires toward the canvas-local pointer position
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let target = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
                fire_at(&mut game.borrow_mut().state, target);
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_key(input: &mut InputState, key: &str, held: bool) {
        match key {
            "w" | "W" | "ArrowUp" => input.up = held,
            "s" | "S" | "ArrowDown" => input.down = held,
            "a" | "A" | "ArrowLeft" => input.left = held,
            "d" | "D" | "ArrowRight" => input.right = held,
            _ => {}
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                show_restart_button(false);
                request_animation_frame(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// rAF recursion; stops scheduling once `frame` reports game over. The
    /// restart button starts it again.
    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            if game.borrow_mut().frame(time) {
                request_animation_frame(game);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // wasm entry point is wasm_main; this only satisfies the bin target
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use swarm_survivor::consts::BASE_FRAME_MS;
    use swarm_survivor::sim::{
        GameConfig, GamePhase, GameState, InputState, Ruleset, fire_at, tick,
    };

    env_logger::init();

    let config = GameConfig {
        ruleset: Ruleset::Survivor,
        ..GameConfig::default()
    };
    let mut state = GameState::new(config, 7);
    log::info!("headless survivor run (seed {})", state.seed);

    // One simulated minute of circling the arena, clicking toward the
    // top-left corner every 1.5 s; auto-fire does the rest
    for i in 0..3600u32 {
        let leg = (i / 60) % 4;
        let input = InputState {
            up: leg == 0,
            right: leg == 1,
            down: leg == 2,
            left: leg == 3,
        };
        if i % 90 == 0 {
            fire_at(&mut state, Vec2::new(0.0, 0.0));
        }
        let now = 1000.0 + f64::from(i) * f64::from(BASE_FRAME_MS);
        tick(&mut state, &input, BASE_FRAME_MS, now);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "finished at {:.1}s: score {}, {} enemies alive, {} obstacles",
        state.time_s,
        state.score,
        state.enemies.len(),
        state.obstacles.len()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&state).expect("state serializes")
    );
}
