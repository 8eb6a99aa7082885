//! Quarter-turn rotation of a square component's logical coordinates.
//!
//! Rotation never moves stored items. Reads and writes through logical
//! `(row, col)` are remapped to storage instead. A clockwise quarter turn
//! maps stored `(r, c)` to logical `(c, n - 1 - r)`.

use crate::error::GuiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rotation(u16);

impl Rotation {
    pub const NONE: Rotation = Rotation(0);

    /// Normalize `degrees` into `[0, 360)`. Fails unless it is a multiple of 90.
    ///
    /// `450` becomes `90`, `1080` becomes `0`, `-90` becomes `270`.
    pub fn new(degrees: i32) -> Result<Self, GuiError> {
        let normalized = degrees.rem_euclid(360);
        if normalized % 90 != 0 {
            return Err(GuiError::InvalidArgument(format!(
                "rotation must be a multiple of 90, got {degrees}"
            )));
        }
        Ok(Rotation(normalized as u16))
    }

    pub fn degrees(self) -> i32 {
        self.0 as i32
    }

    /// Clockwise quarter turns, `0..4`.
    pub fn quarter_turns(self) -> u8 {
        (self.0 / 90) as u8
    }

    /// Compose two rotations.
    pub fn then(self, other: Rotation) -> Rotation {
        Rotation((self.0 + other.0) % 360)
    }

    /// Logical coordinate of a stored cell in an `n × n` grid.
    pub fn to_logical(self, row: usize, col: usize, n: usize) -> (usize, usize) {
        let (mut r, mut c) = (row, col);
        for _ in 0..self.quarter_turns() {
            (r, c) = (c, n - 1 - r);
        }
        (r, c)
    }

    /// Stored coordinate behind a logical cell in an `n × n` grid.
    pub fn to_storage(self, row: usize, col: usize, n: usize) -> (usize, usize) {
        let (mut r, mut c) = (row, col);
        for _ in 0..self.quarter_turns() {
            (r, c) = (n - 1 - c, r);
        }
        (r, c)
    }
}
