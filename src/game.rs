//! Round controller
//!
//! Owns the board, both paddles, the live ball and the scoreboard, and
//! drives two periodic tasks on the toolkit:
//! - `MovePaddles`: apply held keys to the paddles
//! - `Round`: wall/paddle collisions, then the scoring check
//!
//! A round runs Serving -> Rallying -> Scoring and loops forever. Pausing
//! is an orthogonal flag that freezes the ball and the paddles.

use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::{Easing, ElementSpec, Placement, Task, Toolkit};
use crate::sim::{
    Ball, BallMotion, InputState, KeyCode, Offset, Paddle, Rect, Scoreboard, Side, Surface,
    paddle_contact, scoring_side, serve_offset, wall_contact,
};
use crate::tuning::Tuning;

/// Key that toggles pause
pub const PAUSE_KEY: KeyCode = KeyCode::P;

const INSTRUCTIONS: &str = "Left: W / S    Right: \u{2191} / \u{2193}    Pause: P";

/// Where the current round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Ball placed, not yet launched
    Serving,
    /// Ball in flight, round tick running
    Rallying,
    /// A point was just scored; the next serve follows immediately
    Scoring,
}

/// The playfield element and its fixed bounds
#[derive(Debug, Clone)]
pub struct Board<E> {
    pub element: E,
    pub bounds: Rect,
}

/// One mounted game
pub struct Game<T: Toolkit> {
    toolkit: T,
    tuning: Tuning,
    board: Board<T::Element>,
    paddles: [Paddle<T::Element>; 2],
    ball: Option<Ball<T::Element>>,
    scoreboard: Scoreboard,
    scoreboard_element: T::Element,
    input: InputState,
    last_collision_surface: Option<Surface>,
    phase: RoundPhase,
    paused: bool,
    round: u32,
    round_timer: Option<T::Timer>,
    paddle_timer: Option<T::Timer>,
}

impl<T: Toolkit> Game<T> {
    /// Mount into the element with `container_id` and start playing
    pub fn mount(toolkit: T, container_id: &str, seed: u64) -> anyhow::Result<Self> {
        Self::mount_with_tuning(toolkit, container_id, seed, Tuning::default())
    }

    pub fn mount_with_tuning(
        mut toolkit: T,
        container_id: &str,
        seed: u64,
        tuning: Tuning,
    ) -> anyhow::Result<Self> {
        let container = toolkit
            .find_by_id(container_id)
            .with_context(|| format!("pong container #{container_id} not found"))?;

        let element =
            toolkit.create_element(&container, &ElementSpec::new("board", Placement::default()));
        let bounds = toolkit.bounding_box(&element);
        anyhow::ensure!(
            !bounds.is_degenerate(),
            "pong board has no area ({}x{})",
            bounds.width,
            bounds.height
        );
        let board = Board { element, bounds };

        let paddles = [
            Self::create_paddle(&mut toolkit, &board, &tuning, Side::Left),
            Self::create_paddle(&mut toolkit, &board, &tuning, Side::Right),
        ];

        let banner = |top: f32| Placement {
            left: Some(0.0),
            top: Some(top),
            height: Some(24.0),
            ..Default::default()
        };
        let scoreboard_element =
            toolkit.create_element(&board.element, &ElementSpec::new("scoreboard", banner(8.0)));
        let instructions = toolkit.create_element(
            &board.element,
            &ElementSpec::new("instructions", banner(bounds.height - 32.0)),
        );
        toolkit.set_text(&instructions, INSTRUCTIONS);

        let mut game = Self {
            toolkit,
            tuning,
            board,
            paddles,
            ball: None,
            scoreboard: Scoreboard::new(),
            scoreboard_element,
            input: InputState::new(),
            last_collision_surface: None,
            phase: RoundPhase::Serving,
            paused: false,
            round: 0,
            round_timer: None,
            paddle_timer: None,
        };
        game.render_scoreboard();

        let mut rng = Pcg32::seed_from_u64(seed);
        let direction = if rng.random_bool(0.5) { Side::Left } else { Side::Right };
        game.create_ball(direction);
        game.start_paddle_tick();
        game.start_round();

        log::info!(
            "Pong mounted in #{} ({}x{}), serving {}",
            container_id,
            bounds.width,
            bounds.height,
            direction.as_str()
        );
        Ok(game)
    }

    fn create_paddle(
        toolkit: &mut T,
        board: &Board<T::Element>,
        tuning: &Tuning,
        side: Side,
    ) -> Paddle<T::Element> {
        let mut placement = Placement {
            top: Some(0.0),
            width: Some(tuning.paddle_width),
            height: Some(tuning.paddle_height),
            ..Default::default()
        };
        match side {
            Side::Left => placement.left = Some(0.0),
            Side::Right => placement.right = Some(0.0),
        }
        let element = toolkit.create_element(&board.element, &ElementSpec::new("paddle", placement));
        let bounds = toolkit.bounding_box(&element);
        Paddle::new(side, element, &board.bounds, bounds)
    }

    /// Replace the live ball with a fresh one heading toward `direction`
    fn create_ball(&mut self, direction: Side) {
        if let Some(old) = self.ball.take() {
            self.toolkit.stop(&old.element);
            self.toolkit.remove(&old.element);
        }

        let size = self.tuning.ball_size;
        let offset = serve_offset(&self.board.bounds, direction, size, self.tuning.serve_inset);
        let spec = ElementSpec::new("ball", Placement::at(offset, size, size));
        let element = self.toolkit.create_element(&self.board.element, &spec);
        let bounds = self.toolkit.bounding_box(&element);
        let motion = BallMotion::new(self.tuning.ball_speed, direction, self.tuning.ball_angle);
        self.ball = Some(Ball::new(element, motion, bounds));
        self.phase = RoundPhase::Serving;
    }

    /// Launch the live ball and start this round's tick
    fn start_round(&mut self) {
        self.round += 1;
        self.last_collision_surface = None;
        self.phase = RoundPhase::Rallying;
        if !self.paused {
            self.move_ball();
        }
        let timer = self
            .toolkit
            .schedule_periodic(Task::Round { round: self.round }, self.tuning.tick_interval_ms);
        self.round_timer = Some(timer);
    }

    /// Animate the ball along a trajectory computed from where it is now
    fn move_ball(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        ball.bounds = self.toolkit.bounding_box(&ball.element);
        let trajectory = ball.trajectory(&self.board.bounds, self.tuning.overshoot);

        // The trajectory tracks the leading edges; the animation moves the top-left corner
        let mut to = Offset::new(
            trajectory.destination.x - self.board.bounds.left,
            trajectory.destination.y - self.board.bounds.top,
        );
        if ball.motion.direction == Side::Right {
            to.left -= ball.bounds.width;
        }
        if ball.motion.angle < 0.0 {
            to.top -= ball.bounds.height;
        }

        let duration = trajectory.duration_ms(ball.motion.speed);
        self.toolkit.animate(&ball.element, to, duration, Easing::Linear);
    }

    fn start_paddle_tick(&mut self) {
        if self.paddle_timer.is_none() {
            let timer = self
                .toolkit
                .schedule_periodic(Task::MovePaddles, self.tuning.tick_interval_ms);
            self.paddle_timer = Some(timer);
        }
    }

    fn stop_paddle_tick(&mut self) {
        if let Some(timer) = self.paddle_timer.take() {
            self.toolkit.cancel(timer);
        }
    }

    /// Dispatch a periodic task fired by the toolkit
    pub fn handle_task(&mut self, task: Task) {
        match task {
            Task::MovePaddles => self.move_paddles(),
            Task::Round { round } if round == self.round => self.round_tick(),
            Task::Round { round } => {
                log::warn!("Ignoring tick for finished round {} (current {})", round, self.round);
            }
        }
    }

    fn move_paddles(&mut self) {
        if self.paused {
            return;
        }
        let held: Vec<KeyCode> = self.input.held().collect();
        for paddle in &mut self.paddles {
            for &key in &held {
                let Some(dy) = paddle.move_for(key, self.tuning.paddle_step) else {
                    continue;
                };
                let offset = paddle.bounds.offset_within(&self.board.bounds);
                let to = Offset::new(offset.left, offset.top + dy);
                self.toolkit.animate(&paddle.element, to, 0.0, Easing::Linear);
                paddle.bounds = self.toolkit.bounding_box(&paddle.element);
            }
        }
    }

    fn round_tick(&mut self) {
        if self.paused || self.phase != RoundPhase::Rallying {
            return;
        }
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        ball.bounds = self.toolkit.bounding_box(&ball.element);

        self.check_collision();
        self.check_scored_point();
    }

    fn check_collision(&mut self) {
        let Some(ball) = self.ball.as_ref() else {
            return;
        };
        let wall = wall_contact(
            &ball.bounds,
            &self.board.bounds,
            self.last_collision_surface,
            self.tuning.wall_threshold,
        );
        if let Some(wall) = wall {
            self.bounce(wall);
        }

        let Some(ball) = self.ball.as_ref() else {
            return;
        };
        let direction = ball.direction();
        let paddle = &self.paddles[side_index(direction)];
        if paddle_contact(&ball.bounds, direction, &paddle.bounds, self.tuning.paddle_threshold) {
            self.bounce(Surface::from(direction));
        }
    }

    /// Halt the ball, apply the bounce and send it on its new trajectory
    fn bounce(&mut self, surface: Surface) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        self.last_collision_surface = Some(surface);
        self.toolkit.stop(&ball.element);
        ball.update_trajectory(surface);
        log::debug!(
            "Bounce off {:?}: heading {} at {}\u{b0}",
            surface,
            ball.motion.direction.as_str(),
            ball.motion.angle
        );
        self.move_ball();
    }

    fn check_scored_point(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        ball.bounds = self.toolkit.bounding_box(&ball.element);
        if let Some(scorer) = scoring_side(&ball.bounds, ball.direction(), &self.board.bounds) {
            self.score_point(scorer);
        }
    }

    /// End the round in favour of `scorer` and serve the next ball
    fn score_point(&mut self, scorer: Side) {
        self.phase = RoundPhase::Scoring;
        if let Some(timer) = self.round_timer.take() {
            self.toolkit.cancel(timer);
        }
        if let Some(ball) = self.ball.as_ref() {
            self.toolkit.stop(&ball.element);
        }

        self.scoreboard.add_point(scorer);
        self.render_scoreboard();
        log::info!(
            "Player {} scored ({})",
            side_index(scorer) + 1,
            self.scoreboard.render()
        );

        // The new ball starts on the conceding side and heads toward the scorer
        self.create_ball(scorer);
        self.start_round();
    }

    fn render_scoreboard(&mut self) {
        let text = self.scoreboard.render();
        self.toolkit.set_text(&self.scoreboard_element, &text);
    }

    /// Freeze the ball and paddles; no-op when already paused
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        if let Some(ball) = self.ball.as_mut() {
            self.toolkit.stop(&ball.element);
            ball.bounds = self.toolkit.bounding_box(&ball.element);
        }
        self.stop_paddle_tick();
        log::info!("Paused");
    }

    /// Continue from the held position; no-op when not paused
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.phase == RoundPhase::Rallying {
            self.move_ball();
        }
        self.start_paddle_tick();
        log::info!("Resumed");
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Record a key press; returns true when the game uses this key
    pub fn key_down(&mut self, key: KeyCode) -> bool {
        // Auto-repeat delivers further presses while the key stays held
        if key == PAUSE_KEY && !self.input.is_held(key) {
            self.toggle_pause();
        }
        self.input.press(key);
        self.binds(key)
    }

    /// Record a key release; returns true when the game uses this key
    pub fn key_up(&mut self, key: KeyCode) -> bool {
        self.input.release(key);
        self.binds(key)
    }

    /// The page lost focus: pause and forget held keys
    pub fn blur(&mut self) {
        self.input.clear();
        self.pause();
    }

    pub fn binds(&self, key: KeyCode) -> bool {
        key == PAUSE_KEY || self.paddles.iter().any(|p| p.controls.binds(key))
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn ball(&self) -> Option<&Ball<T::Element>> {
        self.ball.as_ref()
    }

    pub fn paddle(&self, side: Side) -> &Paddle<T::Element> {
        &self.paddles[side_index(side)]
    }

    pub fn board(&self) -> &Board<T::Element> {
        &self.board
    }

    pub fn last_collision_surface(&self) -> Option<Surface> {
        self.last_collision_surface
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CONTAINER_ID;
    use crate::platform::HeadlessToolkit;

    fn mount(seed: u64) -> Game<HeadlessToolkit> {
        let board = Rect::new(0.0, 0.0, 800.0, 600.0);
        let toolkit = HeadlessToolkit::with_container(CONTAINER_ID, board);
        Game::mount(toolkit, CONTAINER_ID, seed).unwrap()
    }

    #[test]
    fn test_mount_starts_first_round() {
        let game = mount(7);
        assert_eq!(game.phase(), RoundPhase::Rallying);
        assert_eq!(game.round(), 1);
        assert_eq!(game.scoreboard().scores(), [0, 0]);
        assert!(game.toolkit().is_scheduled(Task::MovePaddles));
        assert!(game.toolkit().is_scheduled(Task::Round { round: 1 }));

        let ball = game.ball().unwrap();
        assert!(game.toolkit().is_animating(&ball.element));
        assert_eq!(game.toolkit().elements_with_class("ball").len(), 1);
    }

    #[test]
    fn test_paddles_use_fixed_bindings() {
        let game = mount(7);
        assert_eq!(game.paddle(Side::Left).controls.up, KeyCode::W);
        assert_eq!(game.paddle(Side::Right).controls.down, KeyCode::ARROW_DOWN);
        assert_eq!(game.paddle(Side::Right).bounds.right, 800.0);
        assert!(game.binds(KeyCode::P));
        assert!(!game.binds(KeyCode(65)));
    }

    #[test]
    fn test_wall_bounce_records_surface() {
        let mut game = mount(3);
        let angle = game.ball().unwrap().motion.angle;
        assert!(angle > 0.0);

        // The ball starts mid-height heading down; step until it reaches the floor
        for _ in 0..200 {
            game.advance(15.0);
            if game.last_collision_surface() == Some(Surface::Bottom) {
                break;
            }
        }
        assert_eq!(game.last_collision_surface(), Some(Surface::Bottom));
        assert_eq!(game.ball().unwrap().motion.angle, -angle);
    }

    #[test]
    fn test_pause_key_repeat_does_not_toggle_back() {
        let mut game = mount(1);
        assert!(game.key_down(PAUSE_KEY));
        assert!(game.is_paused());
        game.key_down(PAUSE_KEY);
        assert!(game.is_paused());
        game.key_up(PAUSE_KEY);
        game.key_down(PAUSE_KEY);
        assert!(!game.is_paused());
    }

    #[test]
    fn test_blur_pauses_and_clears_keys() {
        let mut game = mount(1);
        game.key_down(KeyCode::S);
        game.blur();
        assert!(game.is_paused());
        assert!(!game.input().is_held(KeyCode::S));
        assert!(!game.toolkit().is_scheduled(Task::MovePaddles));
    }
}
