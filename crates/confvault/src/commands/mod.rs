//! CLI command implementations.

pub(crate) mod backup;
pub(crate) mod restore;

pub(crate) use backup::BackupArgs;
pub(crate) use restore::RestoreArgs;
