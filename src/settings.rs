use anyhow::*;
use directories_next::BaseDirs;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::question::UserId;

pub const STORE_VAR: &str = "STUDYMATES_STORE";
pub const USER_VAR: &str = "STUDYMATES_USER";

#[derive(Debug)]
pub struct Settings {
    pub store_path: PathBuf,
    pub user: Option<UserId>,
}

fn default_store_path() -> Result<PathBuf> {
    let mut path = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    path.push("studymates");
    path.push("questions.csv");
    Ok(path)
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        Settings::from_vars(env::var_os(STORE_VAR), env::var(USER_VAR).ok())
    }

    fn from_vars(store: Option<OsString>, user: Option<String>) -> Result<Settings> {
        let store_path = match store {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_store_path()?,
        };
        let user = user
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .map(UserId);
        Ok(Settings { store_path, user })
    }
}
