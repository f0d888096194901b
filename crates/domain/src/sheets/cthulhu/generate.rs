//! Characteristic generation ("auto-roll").

use super::{CthulhuAttributes, Edition};
use crate::value_objects::DiceFormula;

/// Rolls a full set of characteristics.
///
/// STR CON POW DEX APP roll 3d6, SIZ INT roll 2d6+6 and EDU rolls 3d6+3. 7th edition
/// multiplies every result by 5 and adds LUK (3d6×5).
pub fn roll_attributes(
    edition: Edition,
    mut roll_die: impl FnMut(u16) -> u16,
) -> CthulhuAttributes {
    let three_d6 = DiceFormula::d6(3, 0);
    let two_d6_plus_6 = DiceFormula::d6(2, 6);
    let three_d6_plus_3 = DiceFormula::d6(3, 3);

    let scale = match edition {
        Edition::Sixth => 1,
        Edition::Seventh => 5,
    };
    let mut roll = |formula: &DiceFormula| formula.roll_with(&mut roll_die).total * scale;

    let str = roll(&three_d6);
    let con = roll(&three_d6);
    let pow = roll(&three_d6);
    let dex = roll(&three_d6);
    let app = roll(&three_d6);
    let siz = roll(&two_d6_plus_6);
    let int = roll(&two_d6_plus_6);
    let edu = roll(&three_d6_plus_3);
    let luk = match edition {
        Edition::Sixth => None,
        Edition::Seventh => Some(roll(&three_d6)),
    };

    CthulhuAttributes {
        str,
        con,
        pow,
        dex,
        app,
        int,
        edu,
        siz,
        luk,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_edition_uses_expected_dice() {
        let attrs = roll_attributes(Edition::Sixth, |_| 1);
        assert_eq!(
            (attrs.str, attrs.con, attrs.pow, attrs.dex, attrs.app),
            (3, 3, 3, 3, 3)
        );
        assert_eq!((attrs.siz, attrs.int), (8, 8));
        assert_eq!(attrs.edu, 6);
        assert_eq!(attrs.luk, None);

        let max = roll_attributes(Edition::Sixth, |sides| sides);
        assert_eq!((max.str, max.siz, max.edu), (18, 18, 21));
    }

    #[test]
    fn seventh_edition_scales_by_five_and_rolls_luck() {
        let attrs = roll_attributes(Edition::Seventh, |_| 2);
        assert_eq!(attrs.str, 30);
        assert_eq!(attrs.siz, 50);
        assert_eq!(attrs.edu, 45);
        assert_eq!(attrs.luk, Some(30));
    }

    #[test]
    fn every_roll_asks_for_a_d6() {
        let mut asked = Vec::new();
        roll_attributes(Edition::Seventh, |sides| {
            asked.push(sides);
            1
        });
        // 5×3d6 + 2×2d6 + 3d6 + 3d6 luck
        assert_eq!(asked.len(), 15 + 4 + 3 + 3);
        assert!(asked.iter().all(|&s| s == 6));
    }
}
