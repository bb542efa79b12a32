use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::AppError;
use crate::users::repo_types::{SaveUser, UserProfile};

/// Body of `POST /`. The add form leaves `id` out (or sends it empty); the
/// edit form carries it.
#[derive(Debug, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("invalid user id `{}`", raw)))
}

impl UserForm {
    pub fn into_command(self) -> Result<SaveUser, AppError> {
        let profile = UserProfile {
            name: self.name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        };

        if profile.name.is_empty() {
            return Err(AppError::BadRequest("name is required".into()));
        }
        if !profile.email.is_empty() && !is_valid_email(&profile.email) {
            return Err(AppError::BadRequest("invalid email".into()));
        }

        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(SaveUser::Create(profile)),
            Some(raw) => Ok(SaveUser::Update {
                id: parse_id(raw)?,
                profile,
            }),
        }
    }
}
