//! Sword World 2.5 rule data: races, births, classes.

use crate::value_objects::DiceFormula;

/// Ability modifiers (技, 体, 心).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityModifiers {
    pub gi: i32,
    pub tai: i32,
    pub shin: i32,
}

const fn mods(gi: i32, tai: i32, shin: i32) -> AbilityModifiers {
    AbilityModifiers { gi, tai, shin }
}

pub const BIRTHS: [&str; 8] = [
    "魔動機師",
    "魔術師",
    "軽戦士",
    "一般人",
    "傭兵",
    "神官",
    "操霊術士",
    "その他",
];

/// Initial-value roll formulas for the six base attributes, in
/// 器用度 敏捷度 筋力 生命力 知力 精神力 order.
pub type InitialRolls = [&'static str; 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    pub name: &'static str,
    pub births: &'static [&'static str],
    pub modifiers: AbilityModifiers,
    pub initial_rolls: InitialRolls,
}

const ALL_BIRTHS: &[&str] = &BIRTHS;
const CASTER_BIRTHS: &[&str] = &["魔術師", "軽戦士", "一般人", "神官", "操霊術士", "その他"];
const FIGHTER_BIRTHS: &[&str] = &["軽戦士", "一般人", "傭兵", "その他"];

const DEFAULT_ROLLS: InitialRolls = ["2d", "2d", "2d", "2d", "2d", "2d"];

pub const RACES: [Race; 13] = [
    Race {
        name: "人間",
        births: ALL_BIRTHS,
        modifiers: mods(0, 0, 0),
        initial_rolls: DEFAULT_ROLLS,
    },
    Race {
        name: "エルフ",
        births: CASTER_BIRTHS,
        modifiers: mods(1, -1, 1),
        initial_rolls: ["2d", "2d", "1d", "2d", "2d", "2d"],
    },
    Race {
        name: "ドワーフ",
        births: &["魔動機師", "軽戦士", "一般人", "傭兵", "その他"],
        modifiers: mods(0, 1, -1),
        initial_rolls: ["2d+6", "1d", "2d", "2d", "1d", "2d+6"],
    },
    Race {
        name: "タビット",
        births: FIGHTER_BIRTHS,
        modifiers: mods(1, 0, 0),
        initial_rolls: ["1d", "1d", "1d", "2d", "2d+6", "2d"],
    },
    Race {
        name: "ルーンフォーク",
        births: CASTER_BIRTHS,
        modifiers: mods(0, 0, 1),
        initial_rolls: ["2d", "1d", "2d", "2d", "2d", "1d"],
    },
    Race {
        name: "ナイトメア",
        births: &["魔術師", "軽戦士", "一般人", "傭兵", "その他"],
        modifiers: mods(0, 1, 0),
        initial_rolls: ["2d", "2d", "1d", "1d", "2d", "2d"],
    },
    Race {
        name: "リカント",
        births: FIGHTER_BIRTHS,
        modifiers: mods(0, 1, -1),
        initial_rolls: ["1d", "1d+3", "2d", "2d", "1d+6", "1d"],
    },
    Race {
        name: "リルドラケン",
        births: CASTER_BIRTHS,
        modifiers: mods(-1, 0, 1),
        initial_rolls: ["1d", "2d", "2d", "2d+6", "1d", "2d"],
    },
    Race {
        name: "グラスランナー",
        births: FIGHTER_BIRTHS,
        modifiers: mods(1, 1, -1),
        initial_rolls: ["2d", "2d", "1d", "2d+6", "1d", "2d+6"],
    },
    Race {
        name: "メリア",
        births: CASTER_BIRTHS,
        modifiers: mods(0, -1, 1),
        initial_rolls: ["1d", "1d", "1d", "2d+6", "1d", "1d"],
    },
    Race {
        name: "ティエンス",
        births: ALL_BIRTHS,
        modifiers: mods(0, 0, 0),
        initial_rolls: ["2d", "2d", "1d", "1d+3", "2d", "2d+3"],
    },
    Race {
        name: "レプラカーン",
        births: CASTER_BIRTHS,
        modifiers: mods(1, -1, 1),
        initial_rolls: ["2d", "1d", "2d", "2d", "2d", "2d"],
    },
    Race {
        name: "その他",
        births: ALL_BIRTHS,
        modifiers: mods(0, 0, 0),
        initial_rolls: DEFAULT_ROLLS,
    },
];

pub fn race(name: &str) -> Option<&'static Race> {
    RACES.iter().find(|r| r.name == name)
}

/// Births available to a race; empty for unknown races.
pub fn births_for_race(name: &str) -> &'static [&'static str] {
    race(name).map(|r| r.births).unwrap_or_default()
}

/// Ability modifiers of a race; zero for unknown races.
pub fn race_modifiers(name: &str) -> AbilityModifiers {
    race(name).map(|r| r.modifiers).unwrap_or_default()
}

/// Roll formulas for a race's attribute initials. Unknown races roll 2d everywhere.
pub fn initial_roll_formulas(name: &str) -> [DiceFormula; 6] {
    let rolls = race(name).map_or(DEFAULT_ROLLS, |r| r.initial_rolls);
    rolls.map(|f| DiceFormula::parse(f).unwrap_or(DiceFormula::d6(2, 0)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassCategory {
    Warrior,
    Magic,
    Other,
}

impl ClassCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ClassCategory::Warrior => "戦士系",
            ClassCategory::Magic => "魔法系",
            ClassCategory::Other => "その他",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: &'static str,
    pub category: ClassCategory,
}

const fn class(name: &'static str, category: ClassCategory) -> ClassInfo {
    ClassInfo { name, category }
}

pub const CLASSES: [ClassInfo; 16] = [
    class("ファイター", ClassCategory::Warrior),
    class("グラップラー", ClassCategory::Warrior),
    class("フェンサー", ClassCategory::Warrior),
    class("シューター", ClassCategory::Warrior),
    class("ソーサラー", ClassCategory::Magic),
    class("コンジャラー", ClassCategory::Magic),
    class("プリースト", ClassCategory::Magic),
    class("フェアリーテイマー", ClassCategory::Magic),
    class("マギテック", ClassCategory::Magic),
    class("スカウト", ClassCategory::Other),
    class("レンジャー", ClassCategory::Other),
    class("セージ", ClassCategory::Other),
    class("エンハンサー", ClassCategory::Other),
    class("バード", ClassCategory::Other),
    class("ライダー", ClassCategory::Other),
    class("アルケミスト", ClassCategory::Other),
];

pub fn classes_in(category: ClassCategory) -> impl Iterator<Item = &'static ClassInfo> {
    CLASSES.iter().filter(move |c| c.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_race_formula_parses() {
        for race in RACES {
            for formula in race.initial_rolls {
                assert!(DiceFormula::parse(formula).is_ok(), "{}: {}", race.name, formula);
            }
        }
    }

    #[test]
    fn unknown_race_rolls_2d_everywhere() {
        let formulas = initial_roll_formulas("ゴブリン");
        assert!(formulas.iter().all(|f| *f == DiceFormula::d6(2, 0)));
    }

    #[test]
    fn dwarf_formulas() {
        let formulas = initial_roll_formulas("ドワーフ");
        assert_eq!(formulas[0], DiceFormula::d6(2, 6));
        assert_eq!(formulas[1], DiceFormula::d6(1, 0));
    }

    #[test]
    fn race_lookups() {
        assert_eq!(race_modifiers("エルフ"), mods(1, -1, 1));
        assert_eq!(race_modifiers("???"), AbilityModifiers::default());
        assert!(births_for_race("タビット").contains(&"傭兵"));
        assert!(!births_for_race("エルフ").contains(&"傭兵"));
        assert!(births_for_race("???").is_empty());
    }

    #[test]
    fn class_categories() {
        assert_eq!(classes_in(ClassCategory::Warrior).count(), 4);
        assert_eq!(classes_in(ClassCategory::Magic).count(), 5);
        assert_eq!(classes_in(ClassCategory::Other).count(), 7);
    }
}
