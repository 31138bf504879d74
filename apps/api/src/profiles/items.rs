//! Index-addressed edits to the list sections of a profile.
//!
//! Every change is applied to an in-memory `Profile`; the caller persists the
//! result over the same file.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Education, Experience, Profile, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSection {
    Education,
    Experience,
    Projects,
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProfileSection::Education => "education",
            ProfileSection::Experience => "experience",
            ProfileSection::Projects => "projects",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemChange {
    Add(Value),
    Replace(usize, Value),
    Remove(usize),
}

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("invalid {section} item: {message}")]
    Invalid {
        section: ProfileSection,
        message: String,
    },

    #[error("{section} index {index} out of range (have {len})")]
    OutOfRange {
        section: ProfileSection,
        index: usize,
        len: usize,
    },
}

/// Applies `change` to the list named by `section`. Returns the new item count.
pub fn apply_item_change(
    profile: &mut Profile,
    section: ProfileSection,
    change: ItemChange,
) -> Result<usize, ItemError> {
    match section {
        ProfileSection::Education => {
            apply(&mut profile.education, section, change, |edu: &Education| edu.validate())
        }
        ProfileSection::Experience => {
            apply(&mut profile.experience, section, change, |_: &Experience| Ok(()))
        }
        ProfileSection::Projects => {
            apply(&mut profile.projects, section, change, |_: &Project| Ok(()))
        }
    }
}

fn apply<T, F>(
    items: &mut Vec<T>,
    section: ProfileSection,
    change: ItemChange,
    validate: F,
) -> Result<usize, ItemError>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<(), String>,
{
    let parse = |value: Value| -> Result<T, ItemError> {
        let item: T = serde_json::from_value(value).map_err(|e| ItemError::Invalid {
            section,
            message: e.to_string(),
        })?;
        validate(&item).map_err(|message| ItemError::Invalid { section, message })?;
        Ok(item)
    };
    let out_of_range = |index: usize, len: usize| ItemError::OutOfRange {
        section,
        index,
        len,
    };

    match change {
        ItemChange::Add(value) => items.push(parse(value)?),
        ItemChange::Replace(index, value) => {
            let len = items.len();
            let slot = items.get_mut(index).ok_or_else(|| out_of_range(index, len))?;
            *slot = parse(value)?;
        }
        ItemChange::Remove(index) => {
            if index >= items.len() {
                return Err(out_of_range(index, items.len()));
            }
            items.remove(index);
        }
    }
    Ok(items.len())
}
