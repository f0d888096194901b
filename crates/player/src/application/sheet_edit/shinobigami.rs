//! Shinobigami sheet edits.

use sheetkeeper_domain::sheets::shinobigami::{domain_of_skill, Ninpo, ShinobigamiSheet};
use sheetkeeper_domain::DomainError;

use super::RowOp;

#[derive(Debug, Clone, PartialEq)]
pub enum ShinobigamiEdit {
    Attribute { key: String, value: i32 },
    /// Take or drop a skill from the table.
    ToggleSkill(String),
    School(String),
    Ninpo(RowOp<Ninpo>),
    Background(String),
    SecretFlag(bool),
}

/// Applies an edit. Taking a seventh skill is refused with a message for the user.
pub fn apply(sheet: &mut ShinobigamiSheet, edit: ShinobigamiEdit) -> Result<(), String> {
    match edit {
        ShinobigamiEdit::Attribute { key, value } => sheet.attributes.set(&key, value),
        ShinobigamiEdit::ToggleSkill(name) => {
            let domain = domain_of_skill(&name).unwrap_or_default();
            sheet
                .toggle_skill(&name, domain)
                .map_err(|e| match e {
                    DomainError::Constraint(message) => message,
                    other => other.to_string(),
                })?;
        }
        ShinobigamiEdit::School(school) => sheet.school = school,
        ShinobigamiEdit::Ninpo(op) => op.apply(&mut sheet.ninpo),
        ShinobigamiEdit::Background(text) => sheet.background = text,
        ShinobigamiEdit::SecretFlag(flag) => sheet.secret_flag = flag,
    }
    Ok(())
}
