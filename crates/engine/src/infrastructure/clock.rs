//! Real clock and dice, plus fixed stand-ins for tests.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::infrastructure::ports::{ClockPort, RandomPort};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Thread-local RNG dice.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomPort for SystemRandom {
    fn roll_die(&self, sides: u16) -> u16 {
        if sides <= 1 {
            return 1;
        }
        rand::thread_rng().gen_range(1..=sides)
    }

    fn uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Every die shows the same face, clamped to the die; uuids are nil.
#[cfg(test)]
pub struct FixedRandom(pub u16);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn roll_die(&self, sides: u16) -> u16 {
        self.0.clamp(1, sides.max(1))
    }

    fn uuid(&self) -> Uuid {
        Uuid::nil()
    }
}
