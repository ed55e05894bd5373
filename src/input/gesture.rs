//! Pointer gesture classification
//!
//! A press/release pair becomes either a tap (place or relocate the handle)
//! or a spin command. Everything here is pure math over world coordinates:
//! y grows downward, so "above" always means smaller y.
//!
//! A swipe only counts as a spin when it actually torques the handle: the
//! angle between the swipe and its lever arm from the handle anchor must lie
//! strictly between 30 and 150 degrees. Shallower or blunter swipes are
//! dragging motions, not rotations, and are dropped.

use glam::Vec2;

use crate::types::SpinDirection;

/// A classified pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Place or relocate the handle at the press position.
    Tap { at: Vec2 },
    /// Spin the locked handle.
    Spin(SpinDirection),
}

/// Compass bucket of a swipe, from its angle against +x with screen-up
/// positive. Half-open buckets so every angle lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compass {
    Right,
    Up,
    Left,
    Down,
}

fn in_range(v: f32, min: f32, max: f32) -> bool {
    v > min && v <= max
}

fn compass(swipe: Vec2) -> Compass {
    // Flip y so the angle reads in screen terms (up = +90).
    let theta = (-swipe.y).atan2(swipe.x).to_degrees();
    if in_range(theta, -45.0, 45.0) {
        Compass::Right
    } else if in_range(theta, 45.0, 135.0) {
        Compass::Up
    } else if in_range(theta, -135.0, -45.0) {
        Compass::Down
    } else {
        Compass::Left
    }
}

/// Unsigned angle between two vectors, in degrees `[0, 180]`.
fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).abs().atan2(a.dot(b)).to_degrees()
}

/// Classify a press/release pair against the current handle anchor.
///
/// Short swipes and swipes with no handle to torque are taps. Valid swipes
/// map through the compass bucket and the swipe midpoint's side of the
/// anchor to a spin direction; a midpoint exactly on the deciding axis is
/// ambiguous and produces nothing.
pub fn classify(
    down: Vec2,
    up: Vec2,
    anchor: Option<Vec2>,
    min_swipe_distance: f32,
) -> Option<Gesture> {
    let swipe = up - down;
    let Some(anchor) = anchor else {
        return Some(Gesture::Tap { at: down });
    };
    if swipe.length() < min_swipe_distance {
        return Some(Gesture::Tap { at: down });
    }

    let mid = down.lerp(up, 0.5);
    let lever = mid - anchor;
    let torque_deg = angle_between_deg(lever, swipe);
    if !(torque_deg > 30.0 && torque_deg < 150.0) {
        return None;
    }

    // Chirality reads the midpoint's side of the anchor, not the press
    // point's: a swipe can start on one side and torque from the other.
    use SpinDirection::{Clockwise, CounterClockwise};
    let direction = match compass(swipe) {
        Compass::Left | Compass::Right => {
            let above = mid.y < anchor.y;
            let below = mid.y > anchor.y;
            match (compass(swipe), above, below) {
                (Compass::Left, true, _) => Clockwise,
                (Compass::Left, _, true) => CounterClockwise,
                (Compass::Right, true, _) => CounterClockwise,
                (Compass::Right, _, true) => Clockwise,
                _ => return None,
            }
        }
        Compass::Up | Compass::Down => {
            let left = mid.x < anchor.x;
            let right = mid.x > anchor.x;
            match (compass(swipe), left, right) {
                (Compass::Up, true, _) => Clockwise,
                (Compass::Up, _, true) => CounterClockwise,
                (Compass::Down, true, _) => CounterClockwise,
                (Compass::Down, _, true) => Clockwise,
                _ => return None,
            }
        }
    };
    Some(Gesture::Spin(direction))
}
