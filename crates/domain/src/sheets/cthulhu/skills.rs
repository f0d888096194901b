//! Default skill lists and skill-point rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CthulhuAttributes, CthulhuSheet, CthulhuSkill, Edition};

const DODGE: &str = "回避";
const OWN_LANGUAGE: &str = "母国語";

const SKILLS_6E: &[(&str, i32)] = &[
    ("言いくるめ", 5),
    ("医学", 5),
    ("運転", 20),
    ("応急手当", 30),
    ("オカルト", 5),
    ("化学", 1),
    ("鍵開け", 1),
    ("隠す", 15),
    ("隠れる", 10),
    ("機械修理", 20),
    ("聞き耳", 25),
    ("クトゥルフ神話", 0),
    ("芸術", 5),
    ("経理", 10),
    ("考古学", 1),
    ("コンピューター", 5),
    ("忍び歩き", 10),
    ("写真術", 10),
    ("重機械操作", 1),
    ("乗馬", 5),
    ("信用", 15),
    ("心理学", 5),
    ("人類学", 1),
    ("水泳", 25),
    ("製作", 5),
    ("精神分析", 1),
    ("生物学", 1),
    ("説得", 15),
    ("操縦", 1),
    ("地質学", 1),
    ("跳躍", 25),
    ("追跡", 10),
    ("電気修理", 10),
    ("電子工学", 1),
    ("天文学", 1),
    ("登攀", 40),
    ("図書館", 25),
    ("ナビゲート", 10),
    ("値切り", 5),
    ("博物学", 10),
    ("物理学", 1),
    ("変装", 1),
    ("法律", 5),
    ("他の言語", 1),
    (OWN_LANGUAGE, 0),
    ("目星", 25),
    ("薬学", 1),
    ("歴史", 5),
];

const SKILLS_7E: &[(&str, i32)] = &[
    ("言いくるめ", 5),
    ("医学", 1),
    ("運転", 20),
    ("応急手当", 30),
    ("オカルト", 5),
    ("鍵開け", 1),
    ("機械修理", 10),
    ("聞き耳", 20),
    ("クトゥルフ神話", 0),
    ("経理", 5),
    ("考古学", 1),
    ("コンピューター", 5),
    ("写真術", 10),
    ("重機械操作", 1),
    ("乗馬", 5),
    ("信用", 0),
    ("心理学", 10),
    ("人類学", 1),
    ("水泳", 20),
    ("精神分析", 1),
    ("生物学", 1),
    ("説得", 10),
    ("操縦", 1),
    ("地質学", 1),
    ("跳躍", 20),
    ("追跡", 10),
    ("電気修理", 10),
    ("電子工学", 1),
    ("天文学", 1),
    ("登攀", 40),
    ("図書館", 20),
    ("ナビゲート", 10),
    ("変装", 5),
    ("法律", 5),
    ("他の言語", 1),
    (OWN_LANGUAGE, 0),
    ("目星", 25),
    ("歴史", 5),
    ("威圧", 15),
    ("隠密", 20),
    ("科学", 1),
    ("鑑定", 5),
    ("芸術/製作", 5),
    ("サバイバル", 10),
    ("自然", 10),
    ("手さばき", 10),
    ("魅惑", 15),
];

const COMBAT_SKILLS_6E: &[(&str, i32)] = &[
    (DODGE, 0),
    ("キック", 25),
    ("こぶし/パンチ", 50),
    ("組み付き", 25),
    ("頭突き", 10),
    ("投擲", 25),
    ("マーシャルアーツ", 1),
    ("拳銃", 20),
    ("サブマシンガン", 15),
    ("ショットガン", 30),
    ("マシンガン", 10),
    ("ライフル", 25),
];

/// A selectable specialty and the base value it gives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseOption {
    pub value: &'static str,
    pub base_value: i32,
}

const fn opt(value: &'static str, base_value: i32) -> BaseOption {
    BaseOption { value, base_value }
}

/// 7th edition 近接戦闘 specialties.
pub const MELEE_OPTIONS_7E: &[BaseOption] = &[
    opt("斧", 15),
    opt("格闘", 25),
    opt("絞殺ひも", 15),
    opt("チェーンソー", 10),
    opt("刀剣", 20),
    opt("フレイル", 10),
    opt("むち", 5),
    opt("槍", 20),
];

/// 7th edition 射撃 specialties.
pub const RANGED_OPTIONS_7E: &[BaseOption] = &[
    opt("火炎放射器", 10),
    opt("拳銃", 20),
    opt("サブマシンガン", 15),
    opt("重火器", 10),
    opt("マシンガン", 10),
    opt("弓", 15),
    opt("ライフル/ショットガン", 25),
];

fn build(list: &[(&str, i32)]) -> Vec<CthulhuSkill> {
    list.iter()
        .map(|(name, base)| CthulhuSkill::new(*name, *base))
        .collect()
}

/// The general skill list a new sheet starts from.
pub fn default_skills(edition: Edition) -> Vec<CthulhuSkill> {
    match edition {
        Edition::Sixth => build(SKILLS_6E),
        Edition::Seventh => {
            let mut skills = build(SKILLS_7E);
            // 科学(数学) is its own row with a higher base.
            let science = skills
                .iter()
                .position(|s| s.name == "科学")
                .map_or(skills.len(), |i| i + 1);
            skills.insert(science, CthulhuSkill::new("科学", 10).with_specialty("数学"));
            skills
        }
    }
}

/// The combat skill list a new sheet starts from.
pub fn combat_skills(edition: Edition) -> Vec<CthulhuSkill> {
    match edition {
        Edition::Sixth => build(COMBAT_SKILLS_6E),
        Edition::Seventh => vec![
            CthulhuSkill::new(DODGE, 0),
            CthulhuSkill::new("投擲", 20),
            CthulhuSkill::new("近接戦闘", 25).with_specialty("格闘"),
            CthulhuSkill::new("射撃", 20).with_specialty("拳銃"),
        ],
    }
}

/// Base value used for totals.
///
/// 回避 and 母国語 scale with DEX and EDU while their stored base is 0. Custom skills
/// always use their stored base.
pub fn effective_base_value(
    skill: &CthulhuSkill,
    edition: Edition,
    attrs: &CthulhuAttributes,
) -> i32 {
    if skill.is_custom || skill.base_value != 0 {
        return skill.base_value;
    }
    match (skill.name.as_str(), edition) {
        (DODGE, Edition::Sixth) => attrs.dex.saturating_mul(2),
        (DODGE, Edition::Seventh) => attrs.dex / 2,
        (OWN_LANGUAGE, Edition::Sixth) => attrs.edu.saturating_mul(5),
        (OWN_LANGUAGE, Edition::Seventh) => attrs.edu,
        _ => skill.base_value,
    }
}

/// Job and interest points spent against their limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPointSummary {
    pub job_used: i32,
    pub job_limit: i32,
    pub interest_used: i32,
    pub interest_limit: i32,
}

impl SkillPointSummary {
    pub fn job_exceeded(&self) -> bool {
        self.job_used > self.job_limit
    }

    pub fn interest_exceeded(&self) -> bool {
        self.interest_used > self.interest_limit
    }
}

/// Counts job/interest points over `skills` and `customSkills`. Combat skills are not
/// counted.
pub fn skill_point_summary(sheet: &CthulhuSheet) -> SkillPointSummary {
    let counted = sheet.skills.iter().chain(sheet.custom_skills.iter());
    let (job_used, interest_used) = counted.fold((0i32, 0i32), |(job, interest), skill| {
        (
            job.saturating_add(skill.job_points),
            interest.saturating_add(skill.interest_points),
        )
    });
    SkillPointSummary {
        job_used,
        job_limit: sheet.attributes.edu.saturating_mul(20),
        interest_used,
        interest_limit: sheet.attributes.int.saturating_mul(10),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillPointViolation {
    #[error("職業Pの上限を超えています: {used}/{limit} (EDU × 20)")]
    JobPoints { used: i32, limit: i32 },
    #[error("興味Pの上限を超えています: {used}/{limit} (INT × 10)")]
    InterestPoints { used: i32, limit: i32 },
}

/// Checks the job-point (EDU×20) and interest-point (INT×10) limits.
pub fn validate_skill_points(sheet: &CthulhuSheet) -> Result<(), Vec<SkillPointViolation>> {
    let summary = skill_point_summary(sheet);
    let mut violations = Vec::new();
    if summary.job_exceeded() {
        violations.push(SkillPointViolation::JobPoints {
            used: summary.job_used,
            limit: summary.job_limit,
        });
    }
    if summary.interest_exceeded() {
        violations.push(SkillPointViolation::InterestPoints {
            used: summary.interest_used,
            limit: summary.interest_limit,
        });
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
