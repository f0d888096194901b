//! Derived-stat tables for Cthulhu sheets.

use super::{CthulhuAttributes, CthulhuDerived, Edition};

/// Computes every derived value from the attributes. Current pools start at their max.
///
/// Attributes are clamped to the sheet number range first, so every product below
/// stays inside `i32`.
pub fn compute_derived(edition: Edition, attrs: &CthulhuAttributes) -> CthulhuDerived {
    let attrs = &attrs.clamped();
    let str_siz = attrs.str + attrs.siz;
    let con_siz = attrs.con + attrs.siz;

    let (san_max, hp_max, mp_max, idea, know, luck, db, build, mov) = match edition {
        Edition::Sixth => (
            attrs.pow * 5,
            ceil_div(con_siz, 10),
            ceil_div(attrs.pow, 5),
            attrs.int * 5,
            attrs.edu * 5,
            attrs.pow * 5,
            damage_bonus_6e(str_siz).to_string(),
            con_siz.div_euclid(2),
            None,
        ),
        Edition::Seventh => {
            let (db, build) = damage_bonus_and_build_7e(str_siz);
            (
                attrs.pow,
                con_siz.div_euclid(10),
                attrs.pow.div_euclid(5),
                attrs.int,
                attrs.edu,
                attrs.luk.unwrap_or(0),
                db,
                build,
                Some(movement_rate(attrs)),
            )
        }
    };

    CthulhuDerived {
        san_current: san_max,
        san_max,
        hp_current: hp_max,
        hp_max,
        mp_current: mp_max,
        mp_max,
        idea: Some(idea),
        know: Some(know),
        luck: Some(luck),
        db: Some(db),
        build: Some(build),
        mov,
    }
}

fn ceil_div(value: i32, by: i32) -> i32 {
    (value + by - 1).div_euclid(by)
}

/// 6th edition damage bonus by STR+SIZ.
pub fn damage_bonus_6e(str_siz: i32) -> &'static str {
    match str_siz {
        2..=12 => "-1D6",
        13..=16 => "-1D4",
        17..=24 => "+0",
        25..=32 => "+1D4",
        33..=40 => "+1D6",
        41..=56 => "+2D6",
        57..=72 => "+3D6",
        73..=88 => "+4D6",
        89.. => "+5D6",
        _ => "+0",
    }
}

/// 7th edition damage bonus and build by STR+SIZ.
///
/// Past 364 every further 80 points adds another D6 and one build.
pub fn damage_bonus_and_build_7e(str_siz: i32) -> (String, i32) {
    match str_siz {
        2..=64 => ("-2".to_string(), -2),
        65..=84 => ("-1".to_string(), -1),
        85..=124 => ("0".to_string(), 0),
        125..=164 => ("+1D4".to_string(), 1),
        165..=204 => ("+1D6".to_string(), 2),
        205..=284 => ("+2D6".to_string(), 3),
        285..=364 => ("+3D6".to_string(), 4),
        365.. => {
            let extra = (str_siz - 365) / 80 + 1;
            (format!("+{}D6", 3 + extra), 4 + extra)
        }
        _ => ("0".to_string(), 0),
    }
}

/// 7th edition movement rate.
pub fn movement_rate(attrs: &CthulhuAttributes) -> i32 {
    if attrs.dex < attrs.siz && attrs.str < attrs.siz {
        7
    } else if attrs.dex > attrs.siz && attrs.str > attrs.siz {
        9
    } else {
        8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(
        str: i32,
        con: i32,
        pow: i32,
        dex: i32,
        int: i32,
        edu: i32,
        siz: i32,
    ) -> CthulhuAttributes {
        CthulhuAttributes {
            str,
            con,
            pow,
            dex,
            app: 10,
            int,
            edu,
            siz,
            luk: None,
        }
    }

    #[test]
    fn damage_bonus_6e_boundaries() {
        let cases = [
            (0, "+0"),
            (1, "+0"),
            (2, "-1D6"),
            (12, "-1D6"),
            (13, "-1D4"),
            (16, "-1D4"),
            (17, "+0"),
            (24, "+0"),
            (25, "+1D4"),
            (32, "+1D4"),
            (33, "+1D6"),
            (40, "+1D6"),
            (41, "+2D6"),
            (56, "+2D6"),
            (57, "+3D6"),
            (72, "+3D6"),
            (73, "+4D6"),
            (88, "+4D6"),
            (89, "+5D6"),
            (200, "+5D6"),
        ];
        for (sum, expected) in cases {
            assert_eq!(damage_bonus_6e(sum), expected, "STR+SIZ = {}", sum);
        }
    }

    #[test]
    fn damage_bonus_and_build_7e_boundaries() {
        let cases = [
            (1, "0", 0),
            (2, "-2", -2),
            (64, "-2", -2),
            (65, "-1", -1),
            (84, "-1", -1),
            (85, "0", 0),
            (124, "0", 0),
            (125, "+1D4", 1),
            (164, "+1D4", 1),
            (165, "+1D6", 2),
            (204, "+1D6", 2),
            (205, "+2D6", 3),
            (284, "+2D6", 3),
            (285, "+3D6", 4),
            (364, "+3D6", 4),
            (365, "+4D6", 5),
            (444, "+4D6", 5),
            (445, "+5D6", 6),
        ];
        for (sum, db, build) in cases {
            assert_eq!(
                damage_bonus_and_build_7e(sum),
                (db.to_string(), build),
                "STR+SIZ = {}",
                sum
            );
        }
    }

    #[test]
    fn sixth_edition_formulas() {
        let a = attrs(13, 11, 12, 10, 14, 16, 14);
        let d = compute_derived(Edition::Sixth, &a);
        assert_eq!(d.san_max, 60);
        assert_eq!(d.hp_max, 3); // ceil(25 / 10)
        assert_eq!(d.mp_max, 3); // ceil(12 / 5)
        assert_eq!(d.idea, Some(70));
        assert_eq!(d.know, Some(80));
        assert_eq!(d.luck, Some(60));
        assert_eq!(d.build, Some(12));
        assert_eq!(d.db.as_deref(), Some("+1D4"));
        assert_eq!(d.mov, None);
        assert_eq!(d.san_current, d.san_max);
    }

    #[test]
    fn sixth_edition_rounds_pools_up() {
        let a = attrs(0, 10, 11, 0, 0, 0, 11);
        let d = compute_derived(Edition::Sixth, &a);
        assert_eq!(d.hp_max, 3);
        assert_eq!(d.mp_max, 3);
    }

    #[test]
    fn seventh_edition_formulas() {
        let mut a = attrs(65, 55, 60, 70, 75, 80, 60);
        a.luk = Some(45);
        let d = compute_derived(Edition::Seventh, &a);
        assert_eq!(d.san_max, 60);
        assert_eq!(d.hp_max, 11); // floor(115 / 10)
        assert_eq!(d.mp_max, 12);
        assert_eq!(d.idea, Some(75));
        assert_eq!(d.know, Some(80));
        assert_eq!(d.luck, Some(45));
        assert_eq!(d.db.as_deref(), Some("+1D4"));
        assert_eq!(d.build, Some(1));
        assert_eq!(d.mov, Some(9));
    }

    #[test]
    fn seventh_edition_rounds_pools_down() {
        let a = attrs(0, 14, 14, 0, 0, 0, 15);
        let d = compute_derived(Edition::Seventh, &a);
        assert_eq!(d.hp_max, 2);
        assert_eq!(d.mp_max, 2);
        assert_eq!(d.luck, Some(0));
    }

    #[test]
    fn derived_values_stay_in_range_at_the_attribute_ceiling() {
        let max = crate::sheets::lenient::MAX_SHEET_NUMBER;
        let mut a = attrs(max, max, max, max, max, max, max);
        a.luk = Some(max);
        let d = compute_derived(Edition::Sixth, &a);
        assert_eq!(d.san_max, max * 5);
        assert_eq!(d.hp_max, (2 * max).div_euclid(10) + 1);
        assert_eq!(d.db.as_deref(), Some("+5D6"));
        assert_eq!(d.build, Some(max));

        let d = compute_derived(Edition::Seventh, &a);
        assert_eq!(d.san_max, max);
        assert_eq!(d.luck, Some(max));
        assert_eq!(d.mov, Some(8));
    }

    #[test]
    fn out_of_range_attributes_are_clamped_before_deriving() {
        let max = crate::sheets::lenient::MAX_SHEET_NUMBER;
        let a = attrs(i32::MAX, i32::MAX, i32::MAX, 0, i32::MAX, i32::MAX, i32::MAX);
        let d = compute_derived(Edition::Sixth, &a);
        assert_eq!(d.san_max, max * 5);
        assert_eq!(d.idea, Some(max * 5));
        assert_eq!(d.know, Some(max * 5));
    }

    #[test]
    fn movement_rate_rules() {
        assert_eq!(movement_rate(&attrs(40, 0, 0, 40, 0, 0, 50)), 7);
        assert_eq!(movement_rate(&attrs(60, 0, 0, 60, 0, 0, 50)), 9);
        assert_eq!(movement_rate(&attrs(60, 0, 0, 40, 0, 0, 50)), 8);
        assert_eq!(movement_rate(&attrs(50, 0, 0, 50, 0, 0, 50)), 8);
    }
}
