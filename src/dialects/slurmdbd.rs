//! The `slurmdbd.conf` dialect.
//!
//! Flat directives only, no nested collections. This file carries database
//! credentials, so callers typically pass `DumpOptions { mode: Some(0o600),
//! .. }` when writing it.

use std::sync::OnceLock;

use super::dialect_file;
use crate::schema::{FieldDef, MapFormat, Schema};

fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "slurmdbd.conf",
            vec![
                FieldDef::yes_no("allow_no_def_acct", "AllowNoDefAcct"),
                FieldDef::yes_no("all_resources_absolute", "AllResourcesAbsolute"),
                FieldDef::str("archive_dir", "ArchiveDir"),
                FieldDef::yes_no("archive_events", "ArchiveEvents"),
                FieldDef::yes_no("archive_jobs", "ArchiveJobs"),
                FieldDef::yes_no("archive_resvs", "ArchiveResvs"),
                FieldDef::str("archive_script", "ArchiveScript"),
                FieldDef::yes_no("archive_steps", "ArchiveSteps"),
                FieldDef::yes_no("archive_suspend", "ArchiveSuspend"),
                FieldDef::yes_no("archive_txn", "ArchiveTXN"),
                FieldDef::yes_no("archive_usage", "ArchiveUsage"),
                FieldDef::list("auth_alt_types", "AuthAltTypes"),
                FieldDef::map("auth_alt_parameters", "AuthAltParameters", MapFormat::COMMA),
                FieldDef::map("auth_info", "AuthInfo", MapFormat::COMMA),
                FieldDef::str("auth_type", "AuthType"),
                FieldDef::int("commit_delay", "CommitDelay"),
                FieldDef::map(
                    "communication_parameters",
                    "CommunicationParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::str("dbd_addr", "DbdAddr"),
                FieldDef::str("dbd_backup_host", "DbdBackupHost"),
                FieldDef::str("dbd_host", "DbdHost"),
                FieldDef::int("dbd_port", "DbdPort"),
                FieldDef::list("debug_flags", "DebugFlags"),
                FieldDef::str("debug_level", "DebugLevel"),
                FieldDef::str("debug_level_syslog", "DebugLevelSyslog"),
                FieldDef::str("default_qos", "DefaultQOS"),
                FieldDef::yes_no("disable_coord_dbd", "DisableCoordDBD"),
                FieldDef::str("hash_plugin", "HashPlugin"),
                FieldDef::str("log_file", "LogFile"),
                FieldDef::str("log_time_format", "LogTimeFormat"),
                FieldDef::str("max_query_time_range", "MaxQueryTimeRange"),
                FieldDef::int("message_timeout", "MessageTimeout"),
                FieldDef::map("parameters", "Parameters", MapFormat::COMMA),
                FieldDef::str("pid_file", "PidFile"),
                FieldDef::colon_list("plugin_dir", "PluginDir"),
                FieldDef::list("private_data", "PrivateData"),
                FieldDef::str("purge_event_after", "PurgeEventAfter"),
                FieldDef::str("purge_job_after", "PurgeJobAfter"),
                FieldDef::str("purge_resv_after", "PurgeResvAfter"),
                FieldDef::str("purge_step_after", "PurgeStepAfter"),
                FieldDef::str("purge_suspend_after", "PurgeSuspendAfter"),
                FieldDef::str("purge_txn_after", "PurgeTXNAfter"),
                FieldDef::str("purge_usage_after", "PurgeUsageAfter"),
                FieldDef::str("slurm_user", "SlurmUser"),
                FieldDef::str("storage_backup_host", "StorageBackupHost"),
                FieldDef::str("storage_host", "StorageHost"),
                FieldDef::str("storage_loc", "StorageLoc"),
                FieldDef::map(
                    "storage_parameters",
                    "StorageParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::str("storage_pass", "StoragePass"),
                FieldDef::int("storage_port", "StoragePort"),
                FieldDef::str("storage_type", "StorageType"),
                FieldDef::str("storage_user", "StorageUser"),
                FieldDef::int("tcp_timeout", "TCPTimeout"),
                FieldDef::yes_no("track_slurmctld_down", "TrackSlurmctldDown"),
                FieldDef::yes_no("track_wc_key", "TrackWCKey"),
            ],
        )
    })
}

dialect_file!(
    /// Typed view of a `slurmdbd.conf` file.
    SlurmdbdConfig,
    "slurmdbd.conf"
);
