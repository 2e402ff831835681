//! Ball contact checks against walls, paddles and the scoring lines
//!
//! All checks are pure functions over bounding boxes read on the current
//! tick. The caller decides what to do with a hit.

use super::geometry::{Rect, Side, Surface};

/// Horizontal walls, in the order they are checked
const WALLS: [Surface; 2] = [Surface::Top, Surface::Bottom];

/// Find the horizontal wall the ball is touching, if any
///
/// `last` is skipped so the ball cannot re-trigger a bounce off the wall it
/// is already leaving.
pub fn wall_contact(
    ball: &Rect,
    board: &Rect,
    last: Option<Surface>,
    threshold: f32,
) -> Option<Surface> {
    WALLS
        .into_iter()
        .filter(|&wall| Some(wall) != last)
        .find(|&wall| (ball.surface(wall) - board.surface(wall)).abs() < threshold)
}

/// Check whether the ball is striking a paddle while heading toward it
///
/// The ball must be within `threshold` of the paddle's outer edge on the
/// travel side and one of its horizontal edges must lie strictly inside
/// the paddle's vertical span.
pub fn paddle_contact(ball: &Rect, direction: Side, paddle: &Rect, threshold: f32) -> bool {
    let x_distance = (ball.edge(direction) - paddle.edge(direction)).abs();
    if x_distance >= threshold {
        return false;
    }

    let bottom_touching = ball.bottom < paddle.bottom && ball.bottom > paddle.top;
    let top_touching = ball.top > paddle.top && ball.top < paddle.bottom;
    bottom_touching || top_touching
}

/// Return the side that scores if the ball has fully left the board
///
/// The ball has to be at least its own width beyond the edge it is
/// travelling toward.
pub fn scoring_side(ball: &Rect, direction: Side, board: &Rect) -> Option<Side> {
    let exited = match direction {
        Side::Left => ball.left + ball.width < board.left,
        Side::Right => ball.right - ball.width > board.right,
    };
    exited.then(|| direction.opposite())
}
