//! Six-sided die and the roll counter.

use core::fmt;

use crate::app::ports::RandomPort;

/// Face shown after a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DieFace {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
}

impl DieFace {
    pub const ALL: [Self; 6] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
    ];

    /// Map a pip count to a face. Anything outside `1..=5` shows six.
    pub fn from_value(value: u8) -> Self {
        match value {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            5 => Self::Five,
            _ => Self::Six,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The die plus the number of rolls made with it.
#[derive(Debug, Default)]
pub struct Dice {
    roll_count: u32,
    last: Option<DieFace>,
}

impl Dice {
    pub fn new(roll_count: u32) -> Self {
        Self {
            roll_count,
            last: None,
        }
    }

    /// Roll once and bump the counter.
    pub fn roll(&mut self, rng: &mut impl RandomPort) -> DieFace {
        let face = DieFace::from_value((rng.next_u32() % 6) as u8 + 1);
        self.roll_count = self.roll_count.saturating_add(1);
        self.last = Some(face);
        face
    }

    pub fn roll_count(&self) -> u32 {
        self.roll_count
    }

    /// Replace the counter (restored from storage).
    pub fn set_roll_count(&mut self, count: u32) {
        self.roll_count = count;
    }

    pub fn last_face(&self) -> Option<DieFace> {
        self.last
    }
}
