//! Frame rendering
//!
//! The game needs only four drawing primitives, captured by [`Surface`]. The
//! browser build implements it over a Canvas 2D context (`canvas` module);
//! tests use a recording surface.
//!
//! Entities are drawn by kind: a loaded sprite when there is one, otherwise a
//! solid circle in the kind's fallback colour.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::consts::{FOOD_BOB_AMPLITUDE, FOOD_BOB_SPEED};
use crate::sim::{Body, EntityKind, GameState};

pub const BACKGROUND: &str = "black";
pub const TEXT_COLOR: &str = "white";
/// Baseline position of the score readout
pub const READOUT_POS: Vec2 = Vec2::new(10.0, 30.0);

/// Minimal 2D drawing surface
pub trait Surface {
    /// Loaded sprite handle
    type Image;

    /// Fill the whole surface
    fn clear(&mut self, size: Vec2, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    /// Draw `image` into the square of side `2 * radius` around `center`,
    /// rotated by `rotation` radians about the centre
    fn draw_image(&mut self, image: &Self::Image, center: Vec2, radius: f32, rotation: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: &str);
}

/// Sprite table keyed by entity kind. `None` means the asset failed to load.
#[derive(Debug, Clone)]
pub struct Sprites<I> {
    pub player: Option<I>,
    pub obstacle: Option<I>,
    pub food: Option<I>,
}

impl<I> Default for Sprites<I> {
    fn default() -> Self {
        Self {
            player: None,
            obstacle: None,
            food: None,
        }
    }
}

impl<I> Sprites<I> {
    pub fn get(&self, kind: EntityKind) -> Option<&I> {
        match kind {
            EntityKind::Player => self.player.as_ref(),
            EntityKind::Obstacle => self.obstacle.as_ref(),
            EntityKind::Food => self.food.as_ref(),
        }
    }

    pub fn set(&mut self, kind: EntityKind, image: I) {
        let slot = match kind {
            EntityKind::Player => &mut self.player,
            EntityKind::Obstacle => &mut self.obstacle,
            EntityKind::Food => &mut self.food,
        };
        *slot = Some(image);
    }
}

/// Solid colour used when a kind has no sprite
pub fn fallback_color(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Player => "blue",
        EntityKind::Obstacle => "red",
        EntityKind::Food => "green",
    }
}

fn draw_entity<S: Surface>(
    surface: &mut S,
    sprites: &Sprites<S::Image>,
    kind: EntityKind,
    body: &Body,
    rotation: f32,
    sprite_offset: Vec2,
) {
    match sprites.get(kind) {
        Some(image) => surface.draw_image(image, body.pos + sprite_offset, body.radius, rotation),
        None => surface.fill_circle(body.pos, body.radius, fallback_color(kind)),
    }
}

/// Draw one frame of `state`: background, obstacles, then player, food and
/// the score readout unless the session just ended
pub fn draw_frame<S: Surface>(surface: &mut S, state: &GameState, sprites: &Sprites<S::Image>, now_ms: f64) {
    surface.clear(state.bounds, BACKGROUND);

    for obstacle in &state.obstacles {
        draw_entity(
            surface,
            sprites,
            EntityKind::Obstacle,
            &obstacle.body,
            obstacle.rotation,
            Vec2::ZERO,
        );
    }

    // The fatal frame freezes on the obstacles that caught the player
    if state.is_over() {
        return;
    }

    draw_entity(
        surface,
        sprites,
        EntityKind::Player,
        &state.player.body,
        0.0,
        Vec2::ZERO,
    );

    let bob = state
        .food
        .bob_offset(now_ms, FOOD_BOB_SPEED, FOOD_BOB_AMPLITUDE);
    draw_entity(
        surface,
        sprites,
        EntityKind::Food,
        &state.food.body,
        0.0,
        Vec2::new(0.0, bob),
    );

    surface.draw_text(&state.score.readout(), READOUT_POS, TEXT_COLOR);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::{Obstacle, SpawnCause};
    use crate::tuning::Tuning;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear(Vec2, String),
        Circle(Vec2, f32, String),
        Image(&'static str, Vec2, f32, f32),
        Text(String, Vec2),
    }

    /// Surface that records every call
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl Surface for RecordingSurface {
        type Image = &'static str;

        fn clear(&mut self, size: Vec2, color: &str) {
            self.calls.push(DrawCall::Clear(size, color.to_string()));
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
            self.calls
                .push(DrawCall::Circle(center, radius, color.to_string()));
        }

        fn draw_image(&mut self, image: &Self::Image, center: Vec2, radius: f32, rotation: f32) {
            self.calls
                .push(DrawCall::Image(*image, center, radius, rotation));
        }

        fn draw_text(&mut self, text: &str, pos: Vec2, _color: &str) {
            self.calls.push(DrawCall::Text(text.to_string(), pos));
        }
    }

    fn state() -> GameState {
        let mut state = GameState::new(7, Vec2::new(800.0, 600.0), Tuning::default(), 0.0);
        state.spawn_obstacle(SpawnCause::Timed);
        state.obstacles[0].rotation = 0.5;
        state
    }

    #[test]
    fn test_fallback_circles_without_sprites() {
        let state = state();
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state, &Sprites::default(), 0.0);

        assert_eq!(
            surface.calls[0],
            DrawCall::Clear(Vec2::new(800.0, 600.0), "black".into())
        );
        assert_eq!(
            surface.calls[1],
            DrawCall::Circle(state.obstacles[0].body.pos, 15.0, "red".into())
        );
        assert_eq!(
            surface.calls[2],
            DrawCall::Circle(Vec2::new(400.0, 300.0), 15.0, "blue".into())
        );
        // Fallback food circle never bobs
        assert_eq!(
            surface.calls[3],
            DrawCall::Circle(state.food.body.pos, 15.0, "green".into())
        );
        assert_eq!(
            surface.calls[4],
            DrawCall::Text("Score: 0 (Gifts: 0 + Time: 0)".into(), READOUT_POS)
        );
        assert_eq!(surface.calls.len(), 5);
    }

    #[test]
    fn test_sprites_by_kind() {
        let mut state = state();
        state.obstacles.push(Obstacle::new(
            99,
            Vec2::new(100.0, 100.0),
            15.0,
            Vec2::new(0.0, 3.0),
        ));
        let sprites = Sprites {
            player: None,
            obstacle: Some("nyang"),
            food: Some("gift"),
        };
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state, &sprites, 1234.0);

        assert_eq!(
            surface.calls[1],
            DrawCall::Image("nyang", state.obstacles[0].body.pos, 15.0, 0.5)
        );
        assert_eq!(
            surface.calls[2],
            DrawCall::Image("nyang", Vec2::new(100.0, 100.0), 15.0, 0.0)
        );
        assert!(matches!(&surface.calls[3], DrawCall::Circle(_, _, c) if c == "blue"));
        match &surface.calls[4] {
            DrawCall::Image(name, center, _, rotation) => {
                assert_eq!(*name, "gift");
                assert_eq!(center.x, state.food.body.pos.x);
                assert!((center.y - state.food.body.pos.y).abs() <= FOOD_BOB_AMPLITUDE + 1e-3);
                assert_eq!(*rotation, 0.0);
            }
            other => panic!("expected food sprite, got {other:?}"),
        }
    }

    #[test]
    fn test_game_over_frame_shows_only_obstacles() {
        let mut state = state();
        state.phase = crate::sim::GamePhase::GameOver;
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state, &Sprites::default(), 0.0);

        assert_eq!(surface.calls.len(), 2);
        assert!(matches!(surface.calls[0], DrawCall::Clear(..)));
        assert_eq!(
            surface.calls[1],
            DrawCall::Circle(state.obstacles[0].body.pos, 15.0, "red".into())
        );
    }
}
