use std::path::Path;

use crate::commands::common::LedgerSession;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ProfileData;
use crate::ledger::profile::{Profile, ProfileChanges};
use crate::store::profile::{load_profile, save_profile};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct ProfileShowOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Clone)]
pub struct ProfileSetOptions<'a> {
    pub changes: ProfileChanges,
    pub home_override: Option<&'a Path>,
}

pub fn show(options: ProfileShowOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = LedgerSession::open(options.home_override)?;
    let profile = load_profile(&session.connection, session.db_path())?.unwrap_or_default();
    success("profile show", profile_data(&profile))
}

pub fn set(options: ProfileSetOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let command = "profile set";
    if options.changes.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Pass at least one of `--name`, `--specialty` or `--crm`.",
            Some(command),
        ));
    }

    let session = LedgerSession::open(options.home_override)?;
    let profile = load_profile(&session.connection, session.db_path())?
        .unwrap_or_default()
        .apply(&options.changes);
    save_profile(&session.connection, session.db_path(), &profile)?;

    success(command, profile_data(&profile))
}

fn profile_data(profile: &Profile) -> ProfileData {
    ProfileData {
        full_name: profile.full_name.clone(),
        specialty: profile.specialty.clone(),
        crm: profile.crm.clone(),
        is_complete: profile.is_complete(),
    }
}
