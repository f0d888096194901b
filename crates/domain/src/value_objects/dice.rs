//! Dice rolling value objects and parsing
//!
//! Supports dice formulas like "3d6", "2d6+6", "1d100", and the d6 shorthand used by
//! Sword World ("2d", "1d+3"). Randomness is injected by the caller as a roller closure
//! returning a face in `1..=sides`, so the domain stays deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Most dice a single formula may roll.
pub const MAX_DICE_COUNT: u16 = 1000;
/// Largest die a formula may name.
pub const MAX_DIE_SIZE: u16 = 1000;
/// Die size used when a formula omits it ("2d" means "2d6").
pub const SHORTHAND_DIE_SIZE: u16 = 6;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY or XdY+Z
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be within 1..=1000
    #[error("ダイスの個数は1から{max}の範囲で指定してください。現在の値: {count}")]
    InvalidDiceCount { count: u32, max: u16 },
    /// Die size must be within 2..=1000
    #[error("ダイスの面数は2から{max}の範囲で指定してください。現在の値: {size}")]
    InvalidDieSize { size: u32, max: u16 },
}

/// A parsed dice formula like "2d6+3"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u16,
    /// Size of each die (Y in XdY)
    pub die_size: u16,
    /// Modifier to add/subtract after rolling (+Z or -Z)
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u16, die_size: u16, modifier: i32) -> Result<Self, DiceParseError> {
        check_count(dice_count as u32)?;
        check_size(die_size as u32)?;
        Ok(Self {
            dice_count,
            die_size,
            modifier,
        })
    }

    /// Shorthand for N six-sided dice plus a modifier.
    pub fn d6(dice_count: u16, modifier: i32) -> Self {
        Self {
            dice_count,
            die_size: SHORTHAND_DIE_SIZE,
            modifier,
        }
    }

    /// Parse a dice formula string like "3d6", "2d6+6", "1d100", "2d", "1d+3"
    ///
    /// Supported formats:
    /// - "XdY" - Roll X dice of size Y
    /// - "XdY+Z" / "XdY-Z" - Roll X dice of size Y, then add or subtract Z
    /// - "dY" - Roll 1 die of size Y
    /// - "Xd" / "Xd+Z" - Roll X six-sided dice
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let count_str = &input[..d_pos];
        let dice_count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
            })?
        };
        check_count(dice_count)?;

        let after_d = &input[d_pos + 1..];
        let (size_str, modifier) = match after_d.find(['+', '-']) {
            Some(pos) => {
                let sign = if after_d.as_bytes()[pos] == b'-' { -1 } else { 1 };
                let mod_str = &after_d[pos + 1..];
                let value: i32 = mod_str.parse().map_err(|_| {
                    DiceParseError::InvalidFormat(format!("Invalid modifier: '{}'", mod_str))
                })?;
                (&after_d[..pos], sign * value)
            }
            None => (after_d, 0),
        };

        let die_size: u32 = if size_str.is_empty() {
            SHORTHAND_DIE_SIZE as u32
        } else {
            size_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", size_str))
            })?
        };
        check_size(die_size)?;

        Ok(Self {
            dice_count: dice_count as u16,
            die_size: die_size as u16,
            modifier,
        })
    }

    /// Roll the dice with the given roller.
    ///
    /// `roll_die(sides)` must return a face in `1..=sides`.
    pub fn roll_with(&self, mut roll_die: impl FnMut(u16) -> u16) -> DiceRollResult {
        let individual_rolls: Vec<i32> = (0..self.dice_count)
            .map(|_| roll_die(self.die_size) as i32)
            .collect();
        let dice_total: i32 = individual_rolls.iter().sum();

        DiceRollResult {
            formula: *self,
            individual_rolls,
            dice_total,
            modifier_applied: self.modifier,
            total: dice_total.saturating_add(self.modifier),
        }
    }

    /// Get the minimum possible roll
    pub fn min_roll(&self) -> i32 {
        i32::from(self.dice_count).saturating_add(self.modifier)
    }

    /// Get the maximum possible roll
    pub fn max_roll(&self) -> i32 {
        (i32::from(self.dice_count) * i32::from(self.die_size)).saturating_add(self.modifier)
    }

    /// Format as a display string (e.g., "2d6+6")
    pub fn display(&self) -> String {
        match self.modifier {
            0 => format!("{}d{}", self.dice_count, self.die_size),
            m if m > 0 => format!("{}d{}+{}", self.dice_count, self.die_size, m),
            m => format!("{}d{}{}", self.dice_count, self.die_size, m),
        }
    }
}

fn check_count(count: u32) -> Result<(), DiceParseError> {
    if count == 0 || count > MAX_DICE_COUNT as u32 {
        return Err(DiceParseError::InvalidDiceCount {
            count,
            max: MAX_DICE_COUNT,
        });
    }
    Ok(())
}

fn check_size(size: u32) -> Result<(), DiceParseError> {
    if !(2..=MAX_DIE_SIZE as u32).contains(&size) {
        return Err(DiceParseError::InvalidDieSize {
            size,
            max: MAX_DIE_SIZE,
        });
    }
    Ok(())
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Result of rolling dice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// The formula that was rolled
    pub formula: DiceFormula,
    /// Individual die results
    pub individual_rolls: Vec<i32>,
    /// Sum of dice before modifier
    pub dice_total: i32,
    /// Modifier that was applied
    pub modifier_applied: i32,
    /// Final total (dice_total + modifier)
    pub total: i32,
}

impl DiceRollResult {
    /// Format as a breakdown string (e.g., "3d6[2, 5, 6] = 13")
    pub fn breakdown(&self) -> String {
        let rolls: Vec<String> = self
            .individual_rolls
            .iter()
            .map(|r| r.to_string())
            .collect();
        let dice = format!(
            "{}d{}[{}]",
            self.formula.dice_count,
            self.formula.die_size,
            rolls.join(", ")
        );
        match self.modifier_applied {
            0 => format!("{} = {}", dice, self.total),
            m if m > 0 => format!("{} + {} = {}", dice, m, self.total),
            m => format!("{} - {} = {}", dice, -m, self.total),
        }
    }
}
