//! Fixed-step simulation tick
//!
//! One call = one rendered frame. Movement is a fixed pixel step per call;
//! only the score clock and the spawn schedule read wall-clock time.

use super::score::elapsed_seconds;
use super::spawn::{SpawnCause, spawn_delay_ms};
use super::state::{GameEvent, GamePhase, GameState};

/// Held directions for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one frame at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.score.elapsed_secs = elapsed_seconds(state.started_at_ms, now_ms);

    state
        .player
        .steer(input, state.tuning.player_speed, state.bounds);

    for obstacle in &mut state.obstacles {
        obstacle.advance(state.bounds, state.tuning.obstacle_spin);
    }

    // Lethal check: first hit ends the session and the rest of the frame
    if let Some(hit) = state
        .obstacles
        .iter()
        .find(|o| o.body.overlaps(&state.player.body))
    {
        let final_score = state.score.total();
        log::info!(
            "Player hit obstacle {} after {}s, final score {}",
            hit.id,
            state.score.elapsed_secs,
            final_score
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { final_score });
        return;
    }

    if state.player.body.overlaps(&state.food.body) {
        state.score.pickup_score += state.tuning.pickup_score;
        state.events.push(GameEvent::FoodCollected {
            pickup_score: state.score.pickup_score,
        });
        state.respawn_food();
        state.spawn_obstacle(SpawnCause::Pickup);
    }

    if state.spawn.take_opening(now_ms) {
        state.spawn_obstacle(SpawnCause::Opening);
    }

    let delay = spawn_delay_ms(state.score.elapsed_secs, &state.tuning);
    if state.spawn.timed_spawn_due(now_ms) && state.can_spawn() {
        state.spawn_obstacle(SpawnCause::Timed);
        state.spawn.reschedule(now_ms, delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Food, Obstacle};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const START: f64 = 10_000.0;

    fn state() -> GameState {
        GameState::new(99999, Vec2::new(800.0, 600.0), Tuning::default(), START)
    }

    /// Keep the food well away from the player so it never triggers a pickup
    fn park_food(state: &mut GameState) {
        state.food = Food::new(Vec2::new(40.0, 40.0), 15.0, 0.0);
    }

    fn count_spawns(events: &[GameEvent], cause: SpawnCause) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { cause: c, .. } if *c == cause))
            .count()
    }

    #[test]
    fn test_pickup_scores_and_spawns_bonus() {
        let mut state = state();
        let centre = Vec2::new(400.0, 300.0);
        let food_pos = centre + Vec2::new(10.0, 0.0);
        state.food = Food::new(food_pos, 15.0, 0.0);

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, START + 16.0);

        assert_eq!(state.player.body.pos, Vec2::new(405.0, 300.0));
        assert_eq!(state.score.pickup_score, 5);
        assert_ne!(state.food.body.pos, food_pos);
        assert_eq!(state.obstacles.len(), 1);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::FoodCollected { pickup_score: 5 });
        assert_eq!(count_spawns(&events, SpawnCause::Pickup), 1);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_score_is_elapsed_seconds_without_pickups() {
        let mut state = state();
        park_food(&mut state);
        tick(&mut state, &TickInput::default(), START + 7_000.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.pickup_score, 0);
        assert_eq!(state.score.total(), 7);
    }

    #[test]
    fn test_score_after_pickups_and_time() {
        let mut state = state();
        for i in 0..3 {
            let food_pos = state.player.body.pos;
            state.food = Food::new(food_pos, 15.0, 0.0);
            tick(&mut state, &TickInput::default(), START + 100.0 * (i + 1) as f64);
        }
        // Bonus obstacles enter at edges; clear them so the player survives
        state.obstacles.clear();
        park_food(&mut state);
        tick(&mut state, &TickInput::default(), START + 4_250.0);
        assert_eq!(state.score.pickup_score, 15);
        assert_eq!(state.score.total(), 5 * 3 + 4);
    }

    #[test]
    fn test_lethal_collision_ends_session() {
        let mut state = state();
        park_food(&mut state);
        state.score.pickup_score = 10;
        let player = state.player.body.pos;
        state
            .obstacles
            .push(Obstacle::new(50, player + Vec2::new(20.0, 0.0), 15.0, Vec2::ZERO));

        tick(&mut state, &TickInput::default(), START + 3_500.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::GameOver { final_score: 13 }]);

        // Later ticks are inert and never emit again
        let before = state.player.body.pos;
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input, START + 9_000.0);
        assert_eq!(state.player.body.pos, before);
        assert!(state.drain_events().is_empty());
        assert_eq!(state.score.total(), 13);
    }

    #[test]
    fn test_game_over_short_circuits_pickup_and_spawns() {
        let mut state = state();
        let player = state.player.body.pos;
        state.food = Food::new(player, 15.0, 0.0);
        state
            .obstacles
            .push(Obstacle::new(50, player, 15.0, Vec2::ZERO));

        // Both the opening and the timed spawn are due at this instant
        tick(&mut state, &TickInput::default(), START + 6_000.0);
        assert!(state.is_over());
        assert_eq!(state.score.pickup_score, 0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { final_score: 6 }]);
    }

    #[test]
    fn test_spawn_schedule() {
        let mut state = state();
        park_food(&mut state);
        let idle = TickInput::default();

        tick(&mut state, &idle, START + 1_000.0);
        assert!(state.obstacles.is_empty());

        tick(&mut state, &idle, START + 2_000.0);
        assert_eq!(state.obstacles.len(), 1);

        tick(&mut state, &idle, START + 4_999.0);
        assert_eq!(state.obstacles.len(), 1);

        tick(&mut state, &idle, START + 5_000.0);
        assert_eq!(state.obstacles.len(), 2);
        // 5s survived: 5000 - (5 / 20) * 50
        assert_eq!(state.spawn.current_delay_ms, 4_987.5);
        assert_eq!(state.spawn.next_spawn_at_ms, START + 9_987.5);

        let events = state.drain_events();
        assert_eq!(count_spawns(&events, SpawnCause::Opening), 1);
        assert_eq!(count_spawns(&events, SpawnCause::Timed), 1);
    }

    #[test]
    fn test_spawn_delay_shrinks_with_time() {
        let mut state = state();
        park_food(&mut state);
        state.spawn.opening_spawn_at_ms = None;
        state.spawn.next_spawn_at_ms = START + 40_000.0;
        tick(&mut state, &TickInput::default(), START + 40_000.0);
        // 40s survived: 5000 - (40 / 20) * 50
        assert_eq!(state.spawn.current_delay_ms, 4_900.0);
        assert_eq!(state.spawn.next_spawn_at_ms, START + 44_900.0);
    }

    #[test]
    fn test_timed_spawn_waits_at_cap() {
        let mut state = GameState::new(
            5,
            Vec2::new(800.0, 600.0),
            Tuning {
                max_obstacles: 1,
                opening_spawn_delay_ms: None,
                ..Tuning::default()
            },
            START,
        );
        park_food(&mut state);
        tick(&mut state, &TickInput::default(), START + 5_000.0);
        assert_eq!(state.obstacles.len(), 1);
        let scheduled = state.spawn.next_spawn_at_ms;

        tick(&mut state, &TickInput::default(), START + 10_000.0);
        assert_eq!(state.obstacles.len(), 1);
        // Not rescheduled while capped: fires as soon as room frees up
        assert_eq!(state.spawn.next_spawn_at_ms, scheduled);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = state();
        let mut state2 = state();
        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for (i, input) in inputs.iter().cycle().take(300).enumerate() {
            let now = START + i as f64 * 50.0;
            tick(&mut state1, input, now);
            tick(&mut state2, input, now);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.body, state2.player.body);
        assert_eq!(state1.phase, state2.phase);
    }

    #[test]
    fn test_food_reachable_after_canvas_shrinks() {
        let tuning = Tuning {
            opening_spawn_delay_ms: None,
            ..Tuning::default()
        };
        let mut state = GameState::new(4242, Vec2::new(800.0, 600.0), tuning, START);
        state.food = Food::new(Vec2::new(770.0, 570.0), 15.0, 0.0);
        state.resize(Vec2::new(400.0, 300.0));

        for _ in 0..2000 {
            let player = state.player.body.pos;
            let food = state.food.body.pos;
            let input = TickInput {
                up: food.y < player.y - 2.5,
                down: food.y > player.y + 2.5,
                left: food.x < player.x - 2.5,
                right: food.x > player.x + 2.5,
            };
            tick(&mut state, &input, START + 16.0);
            if state.score.pickup_score > 0 {
                break;
            }
        }

        assert_eq!(state.score.pickup_score, 5);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
