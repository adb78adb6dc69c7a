// SPDX-License-Identifier: MPL-2.0
//! Interface orientation and the signed rotation between two orientations.
//!
//! The rotation delta is read from an explicit 4×4 table rather than derived
//! by angle subtraction, so each start/current pair maps to one documented
//! signed quarter-turn count.

use serde::{Deserialize, Serialize};

/// Interface orientation of the presenting context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    Portrait,
    LandscapeLeft,
    UpsideDown,
    LandscapeRight,
}

impl Orientation {
    /// All orientations in table order.
    pub const ALL: [Orientation; 4] = [
        Orientation::Portrait,
        Orientation::LandscapeLeft,
        Orientation::UpsideDown,
        Orientation::LandscapeRight,
    ];

    /// Orientation the viewer treats as natively supported.
    pub const REFERENCE: Orientation = Orientation::Portrait;

    fn index(self) -> usize {
        match self {
            Orientation::Portrait => 0,
            Orientation::LandscapeLeft => 1,
            Orientation::UpsideDown => 2,
            Orientation::LandscapeRight => 3,
        }
    }

    /// Normalized angle of this orientation: 0°, 90°, 180° or 270°.
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Portrait => 0,
            Orientation::LandscapeLeft => 90,
            Orientation::UpsideDown => 180,
            Orientation::LandscapeRight => 270,
        }
    }

    #[must_use]
    pub fn is_landscape(self) -> bool {
        matches!(
            self,
            Orientation::LandscapeLeft | Orientation::LandscapeRight
        )
    }
}

/// Signed rotation in quarter turns, indexed `[start][current]`.
///
/// Rows and columns follow [`Orientation::ALL`]. Half turns carry a positive
/// sign when read "forward" through the table and a negative sign in the
/// mirrored cell so that every pair is antisymmetric.
const ROTATION_QUARTER_TURNS: [[i8; 4]; 4] = [
    //  P   LL   UD   LR      (current)
    [0, 1, 2, -1],  // from Portrait
    [-1, 0, 1, 2],  // from LandscapeLeft
    [-2, -1, 0, 1], // from UpsideDown
    [1, -2, -1, 0], // from LandscapeRight
];

/// Signed rotation between two orientations, in degrees.
///
/// Portrait to landscape-left is +90° and portrait to landscape-right is
/// −90°; starting from upside-down mirrors both signs.
#[must_use]
pub fn rotation_delta_degrees(start: Orientation, current: Orientation) -> i16 {
    i16::from(ROTATION_QUARTER_TURNS[start.index()][current.index()]) * 90
}

/// Signed rotation between two orientations, in radians.
#[must_use]
pub fn rotation_delta(start: Orientation, current: Orientation) -> f32 {
    f32::from(rotation_delta_degrees(start, current)).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_orientation_has_no_rotation() {
        for orientation in Orientation::ALL {
            assert_eq!(rotation_delta_degrees(orientation, orientation), 0);
        }
    }

    #[test]
    fn table_is_antisymmetric() {
        for a in Orientation::ALL {
            for b in Orientation::ALL {
                assert_eq!(
                    rotation_delta_degrees(a, b),
                    -rotation_delta_degrees(b, a),
                    "{a:?} -> {b:?}"
                );
            }
        }
    }

    #[test]
    fn portrait_row_matches_authoring_convention() {
        use Orientation::*;
        assert_eq!(rotation_delta_degrees(Portrait, LandscapeLeft), 90);
        assert_eq!(rotation_delta_degrees(Portrait, LandscapeRight), -90);
        assert_eq!(rotation_delta_degrees(Portrait, UpsideDown), 180);
    }

    #[test]
    fn upside_down_row_mirrors_portrait_signs() {
        use Orientation::*;
        assert_eq!(rotation_delta_degrees(UpsideDown, LandscapeLeft), -90);
        assert_eq!(rotation_delta_degrees(UpsideDown, LandscapeRight), 90);
    }

    #[test]
    fn table_agrees_with_angle_difference_modulo_full_turn() {
        for a in Orientation::ALL {
            for b in Orientation::ALL {
                let expected = (i32::from(b.degrees()) - i32::from(a.degrees())).rem_euclid(360);
                let actual = i32::from(rotation_delta_degrees(a, b)).rem_euclid(360);
                assert_eq!(actual, expected, "{a:?} -> {b:?}");
            }
        }
    }

    #[test]
    fn radians_conversion() {
        use std::f32::consts::FRAC_PI_2;
        let angle = rotation_delta(Orientation::Portrait, Orientation::LandscapeLeft);
        assert!((angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn landscape_detection() {
        assert!(Orientation::LandscapeLeft.is_landscape());
        assert!(Orientation::LandscapeRight.is_landscape());
        assert!(!Orientation::Portrait.is_landscape());
        assert!(!Orientation::UpsideDown.is_landscape());
    }
}
