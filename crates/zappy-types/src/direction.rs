use crate::orientation::Orientation;
use std::f64::consts::PI;

/// Signed wrap-minimal distance between two coordinates on an axis of the
/// given size: the direct delta, or its wrap-around counterpart, whichever
/// has the smaller absolute value. Ties favor the direct delta (§4.7).
pub fn wrap_delta(a: i32, b: i32, size: i32) -> i32 {
    let direct = a - b;
    let wrapped = if direct > 0 {
        direct - size
    } else {
        direct + size
    };
    if direct.abs() <= wrapped.abs() {
        direct
    } else {
        wrapped
    }
}

/// Sound arrival sector (1..8) for a recipient facing `orientation`, given
/// the wrap-minimal displacement (dx, dy) from receiver to sender. Returns
/// 0 when sender and receiver share a tile (§4.7).
///
/// The sector is measured counter-clockwise from the recipient's front
/// (1 = front, 3 = left, 5 = behind, 7 = right): the displacement and the
/// recipient's front offset are both converted to a standard (y-up) angle,
/// and the sector is the rounded angular offset between them in eighths of
/// a full turn.
pub fn broadcast_sector(dx: i32, dy: i32, orientation: Orientation) -> u8 {
    if dx == 0 && dy == 0 {
        return 0;
    }
    let angle = (-dy as f64).atan2(dx as f64);
    let (fx, fy) = orientation.front_offset();
    let front_angle = (-fy as f64).atan2(fx as f64);
    let relative = (angle - front_angle).rem_euclid(2.0 * PI);
    let sector = (relative / (PI / 4.0)).round() as i32 % 8;
    (sector + 1) as u8
}

/// Direction reported to an ejected player, relative to the ejector's
/// reverse orientation (§4.5, §9 open question 3).
pub fn eject_arrival_direction(ejector_orientation: Orientation) -> u8 {
    ejector_orientation.reverse().to_wire()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_delta_picks_direct_when_tied_or_smaller() {
        assert_eq!(wrap_delta(1, 9, 10), 2);
        assert_eq!(wrap_delta(9, 1, 10), -2);
        assert_eq!(wrap_delta(0, 5, 10), -5);
    }

    #[test]
    fn same_tile_is_sector_zero() {
        assert_eq!(broadcast_sector(0, 0, Orientation::North), 0);
    }

    #[test]
    fn front_tile_is_sector_one() {
        // Receiver facing North, sender directly north of it: dy = -1.
        assert_eq!(broadcast_sector(0, -1, Orientation::North), 1);
    }

    #[test]
    fn scenario_s3_behind_then_right_after_rotation() {
        // Sender (5,5), receiver (5,3), receiver facing North: sender is
        // south of (behind) the receiver.
        let dx = wrap_delta(5, 5, 10);
        let dy = wrap_delta(5, 3, 10);
        assert_eq!(broadcast_sector(dx, dy, Orientation::North), 5);
        assert_eq!(broadcast_sector(dx, dy, Orientation::East), 7);
    }
}
