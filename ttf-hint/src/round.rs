//! Rounding state.

use super::math::{ceil, floor, round, round_pad};

/// Rounding strategies supported by the interpreter.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum RoundMode {
    /// Set by `RTG` instruction.
    #[default]
    Grid,
    /// Set by `RTHG` instruction.
    HalfGrid,
    /// Set by `RTDG` instruction.
    DoubleGrid,
    /// Set by `RDTG` instruction.
    DownToGrid,
    /// Set by `RUTG` instruction.
    UpToGrid,
    /// Set by `ROFF` instruction.
    Off,
    /// Set by `SROUND` instruction.
    Super,
    /// Set by `S45ROUND` instruction.
    Super45,
}

/// Graphics state that controls rounding.
///
/// See <https://developer.apple.com/fonts/TrueType-Reference-Manual/RM04/Chap4.html#round%20state>
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RoundState {
    pub mode: RoundMode,
    pub threshold: i32,
    pub phase: i32,
    pub period: i32,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            mode: RoundMode::Grid,
            threshold: 0,
            phase: 0,
            period: 64,
        }
    }
}

impl RoundState {
    /// Rounds a 26.6 distance according to the current mode.
    ///
    /// The sign of the input is always preserved.
    pub fn round(&self, distance: i32) -> i32 {
        use RoundMode::*;
        let (magnitude, sign) = if distance >= 0 {
            (distance, 1)
        } else {
            (distance.wrapping_neg(), -1)
        };
        match self.mode {
            HalfGrid => sign * (floor(magnitude) + 32).max(0),
            Grid => sign * round(magnitude).max(0),
            DoubleGrid => sign * round_pad(magnitude, 32).max(0),
            DownToGrid => sign * floor(magnitude).max(0),
            UpToGrid => sign * ceil(magnitude).max(0),
            Super => {
                let val = ((magnitude + (self.threshold - self.phase)) & -self.period) + self.phase;
                sign * if val < 0 { self.phase } else { val }
            }
            Super45 => {
                let val = if self.period == 0 {
                    self.phase
                } else {
                    (((magnitude + (self.threshold - self.phase)) / self.period) * self.period)
                        + self.phase
                };
                sign * if val < 0 { self.phase } else { val }
            }
            Off => distance,
        }
    }

    /// Configures super rounding from a packed selector.
    ///
    /// `grid_period` is 1 pixel for `SROUND[]` and sqrt(2)/2 pixels for
    /// `S45ROUND[]`, both in 2.14 notation.
    ///
    /// See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions#set-super_round>
    pub fn set_super(&mut self, mode: RoundMode, grid_period: i32, selector: i32) {
        let period = match selector & 0xC0 {
            0 => grid_period / 2,
            0x80 => grid_period * 2,
            _ => grid_period,
        };
        let phase = match selector & 0x30 {
            0 => 0,
            0x10 => period / 4,
            0x20 => period / 2,
            _ => period * 3 / 4,
        };
        let threshold = if (selector & 0x0F) == 0 {
            period - 1
        } else {
            ((selector & 0x0F) - 4) * period / 8
        };
        self.mode = mode;
        self.period = period >> 8;
        self.phase = phase >> 8;
        self.threshold = threshold >> 8;
    }
}
