//! The `oci.conf` dialect: OCI container runtime settings.
//!
//! Booleans here use `true`/`false` tokens rather than the `yes`/`no` of the
//! other files, and the `RunTime*` command templates are always quoted.

use std::sync::OnceLock;

use super::dialect_file;
use crate::schema::{FieldDef, Schema};

fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "oci.conf",
            vec![
                FieldDef::str("container_path", "ContainerPath"),
                FieldDef::str("create_env_file", "CreateEnvFile"),
                FieldDef::list("debug_flags", "DebugFlags"),
                FieldDef::true_false("disable_cleanup", "DisableCleanup"),
                FieldDef::list("disable_hooks", "DisableHooks"),
                FieldDef::str("env_exclude", "EnvExclude").quoted(),
                FieldDef::str("mount_spool_dir", "MountSpoolDir"),
                FieldDef::str("run_time_env_exclude", "RunTimeEnvExclude").quoted(),
                FieldDef::str("file_debug", "FileDebug"),
                FieldDef::true_false("ignore_file_config_json", "IgnoreFileConfigJson"),
                FieldDef::str("run_time_create", "RunTimeCreate").quoted(),
                FieldDef::str("run_time_delete", "RunTimeDelete").quoted(),
                FieldDef::str("run_time_kill", "RunTimeKill").quoted(),
                FieldDef::str("run_time_query", "RunTimeQuery").quoted(),
                FieldDef::str("run_time_run", "RunTimeRun").quoted(),
                FieldDef::str("run_time_start", "RunTimeStart").quoted(),
                FieldDef::str("srun_path", "SrunPath"),
                FieldDef::repeated("srun_args", "SrunArgs"),
                FieldDef::str("std_io_debug", "StdIODebug"),
                FieldDef::str("syslog_debug", "SyslogDebug"),
            ],
        )
    })
}

dialect_file!(
    /// Typed view of an `oci.conf` file.
    OciConfig,
    "oci.conf"
);
