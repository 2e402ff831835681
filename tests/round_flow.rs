//! Full games driven over the headless toolkit

use folio_pong::consts::CONTAINER_ID;
use folio_pong::platform::{HeadlessToolkit, Task, Toolkit};
use folio_pong::sim::{Controls, KeyCode, Rect, Side, Surface};
use folio_pong::{Game, RoundPhase};

const TICK: f64 = 15.0;

fn mount(seed: u64) -> Game<HeadlessToolkit> {
    let toolkit = HeadlessToolkit::with_container(CONTAINER_ID, Rect::new(0.0, 0.0, 800.0, 600.0));
    Game::mount(toolkit, CONTAINER_ID, seed).expect("mount")
}

fn ball_box(game: &Game<HeadlessToolkit>) -> Rect {
    let ball = game.ball().expect("live ball");
    game.toolkit().bounding_box(&ball.element)
}

/// Tick until the scoreboard changes; returns the ball direction seen
/// just before the scoring tick
fn play_until_point(game: &mut Game<HeadlessToolkit>) -> Side {
    let before = game.scoreboard().scores();
    for _ in 0..20_000 {
        let direction = game.ball().expect("live ball").direction();
        game.advance(TICK);
        if game.scoreboard().scores() != before {
            return direction;
        }
    }
    panic!("no point scored");
}

/// First seed whose opening serve heads toward `direction`
fn seed_serving(direction: Side) -> u64 {
    (0..64)
        .find(|&seed| mount(seed).ball().expect("live ball").direction() == direction)
        .expect("some seed serves each way")
}

/// Hold the keys that move `side`'s paddle toward the ball's center
fn steer_toward_ball(game: &mut Game<HeadlessToolkit>, side: Side) {
    let controls = Controls::for_side(side);
    let ball = ball_box(game);
    let paddle = game.paddle(side).bounds;
    let ball_mid = (ball.top + ball.bottom) / 2.0;
    let paddle_mid = (paddle.top + paddle.bottom) / 2.0;

    game.key_up(controls.up);
    game.key_up(controls.down);
    if ball_mid < paddle_mid - 5.0 {
        game.key_down(controls.up);
    } else if ball_mid > paddle_mid + 5.0 {
        game.key_down(controls.down);
    }
}

#[test]
fn test_missing_container_is_fatal() {
    let toolkit = HeadlessToolkit::with_container("elsewhere", Rect::new(0.0, 0.0, 800.0, 600.0));
    let err = Game::mount(toolkit, CONTAINER_ID, 1).err().expect("mount must fail");
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_degenerate_board_is_rejected() {
    let toolkit = HeadlessToolkit::with_container(CONTAINER_ID, Rect::new(0.0, 0.0, 800.0, 0.0));
    assert!(Game::mount(toolkit, CONTAINER_ID, 1).is_err());
}

#[test]
fn test_first_serve_placement() {
    let game = mount(11);
    let ball = ball_box(&game);
    assert_eq!(ball.top, 292.5);
    match game.ball().unwrap().direction() {
        Side::Right => assert_eq!(ball.left, 120.0),
        Side::Left => assert_eq!(ball.left, 665.0),
    }
    assert_eq!(game.toolkit().text(&scoreboard_element(&game)), "0 - 0");
}

fn scoreboard_element(game: &Game<HeadlessToolkit>) -> folio_pong::platform::headless::ElementId {
    game.toolkit().elements_with_class("scoreboard")[0]
}

#[test]
fn test_point_goes_to_side_opposite_exit() {
    let mut game = mount(42);
    let mut expected = [0u32, 0];
    let slots = game.toolkit().slot_count();

    for _ in 0..3 {
        let round = game.round();
        let exit_direction = play_until_point(&mut game);
        let scorer = exit_direction.opposite();
        match scorer {
            Side::Left => expected[0] += 1,
            Side::Right => expected[1] += 1,
        }
        assert_eq!(game.scoreboard().scores(), expected);

        // Fresh round: one ball, serving from the conceding side toward the scorer
        assert_eq!(game.round(), round + 1);
        assert_eq!(game.phase(), RoundPhase::Rallying);
        assert_eq!(game.last_collision_surface(), None);
        assert_eq!(game.ball().unwrap().direction(), scorer);
        assert_eq!(game.toolkit().elements_with_class("ball").len(), 1);
        assert_eq!(game.toolkit().slot_count(), slots);
        assert!(!game.toolkit().is_scheduled(Task::Round { round }));
        assert!(game.toolkit().is_scheduled(Task::Round { round: round + 1 }));

        let text = format!("{} - {}", expected[0], expected[1]);
        assert_eq!(game.toolkit().text(&scoreboard_element(&game)), text);
    }
}

#[test]
fn test_left_exit_scores_for_player_two_and_serves_right() {
    let mut game = mount(seed_serving(Side::Left));
    // Left paddle parked at the top, well clear of the ball's path
    game.key_down(KeyCode::W);

    let exit_direction = play_until_point(&mut game);

    assert_eq!(exit_direction, Side::Left);
    assert_eq!(game.scoreboard().scores(), [0, 1]);
    assert_eq!(game.ball().unwrap().direction(), Side::Right);
    assert_eq!(ball_box(&game).left, 120.0);
    assert_eq!(game.toolkit().text(&scoreboard_element(&game)), "0 - 1");
}

#[test]
fn test_paddle_hit_reverses_ball() {
    for serve in [Side::Left, Side::Right] {
        let mut game = mount(seed_serving(serve));

        let mut bounced = false;
        for _ in 0..2_000 {
            let direction = game.ball().expect("live ball").direction();
            steer_toward_ball(&mut game, direction);
            game.advance(TICK);

            let surface = game.last_collision_surface();
            if matches!(surface, Some(Surface::Left | Surface::Right)) {
                assert_eq!(surface, Some(Surface::from(direction)));
                let ball = game.ball().unwrap();
                assert_eq!(ball.direction(), direction.opposite());
                assert!(game.toolkit().is_animating(&ball.element));
                assert_eq!(game.scoreboard().scores(), [0, 0]);
                bounced = true;
                break;
            }
        }
        assert!(bounced, "ball served {serve:?} never met a paddle");
    }
}

#[test]
fn test_stale_round_tick_is_noop() {
    let mut game = mount(42);
    play_until_point(&mut game);
    let scores = game.scoreboard().scores();
    let ball = ball_box(&game);

    game.handle_task(Task::Round { round: game.round() - 1 });

    assert_eq!(game.scoreboard().scores(), scores);
    assert_eq!(ball_box(&game), ball);
    assert_eq!(game.last_collision_surface(), None);
}

#[test]
fn test_paddle_moves_and_stops_at_top() {
    let mut game = mount(5);
    assert_eq!(game.paddle(Side::Left).bounds.top, 0.0);

    // Already at the top: holding up does nothing
    game.key_down(KeyCode::W);
    game.advance(TICK);
    assert_eq!(game.paddle(Side::Left).bounds.top, 0.0);
    game.key_up(KeyCode::W);

    game.key_down(KeyCode::S);
    game.advance(5.0 * TICK);
    game.key_up(KeyCode::S);
    assert_eq!(game.paddle(Side::Left).bounds.top, 50.0);

    game.key_down(KeyCode::W);
    game.advance(TICK);
    assert_eq!(game.paddle(Side::Left).bounds.top, 40.0);

    game.advance(10.0 * TICK);
    assert_eq!(game.paddle(Side::Left).bounds.top, 0.0);
    // The right paddle ignores W
    assert_eq!(game.paddle(Side::Right).bounds.top, 0.0);
}

#[test]
fn test_paddle_clamps_at_bottom() {
    let mut game = mount(5);
    game.key_down(KeyCode::ARROW_DOWN);
    game.advance(2000.0);
    let paddle = game.paddle(Side::Right);
    assert_eq!(paddle.bounds.bottom, 600.0);
    assert_eq!(game.toolkit().bounding_box(&paddle.element), paddle.bounds);
}

#[test]
fn test_pause_holds_ball_and_resume_continues_from_there() {
    let mut game = mount(9);
    game.advance(300.0);

    game.pause();
    let held = ball_box(&game);
    let ball = game.ball().unwrap().element;
    assert!(!game.toolkit().is_animating(&ball));
    assert!(!game.toolkit().is_scheduled(Task::MovePaddles));

    // Paddles and ball stay put while paused
    game.key_down(KeyCode::S);
    game.advance(1000.0);
    assert_eq!(ball_box(&game), held);
    assert_eq!(game.paddle(Side::Left).bounds.top, 0.0);
    assert_eq!(game.scoreboard().scores(), [0, 0]);

    // Pausing twice changes nothing
    let timers = game.toolkit().timer_count();
    game.pause();
    assert_eq!(game.toolkit().timer_count(), timers);

    game.resume();
    assert!(game.toolkit().is_animating(&ball));
    let resumed_timers = game.toolkit().timer_count();
    game.resume();
    assert_eq!(game.toolkit().timer_count(), resumed_timers);

    game.advance(TICK);
    let moved = ball_box(&game);
    let dx = (moved.left - held.left).abs();
    let dy = (moved.top - held.top).abs();
    // 500 px/s for 15 ms is 7.5 px along the path
    assert!(dx > 0.0 && dx < 8.0, "dx = {dx}");
    assert!(dy < 8.0, "dy = {dy}");
    assert!(game.paddle(Side::Left).bounds.top > 0.0);
}

#[test]
fn test_games_do_not_share_input() {
    let mut a = mount(1);
    let b = mount(2);
    a.key_down(KeyCode::W);
    assert!(a.input().is_held(KeyCode::W));
    assert!(!b.input().is_held(KeyCode::W));
}
