//! The `cgroup.conf` dialect: flat directives controlling the cgroup
//! enforcement plugin.

use std::sync::OnceLock;

use super::dialect_file;
use crate::schema::{FieldDef, Schema};

fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "cgroup.conf",
            vec![
                FieldDef::str("cgroup_mountpoint", "CgroupMountpoint"),
                FieldDef::str("cgroup_plugin", "CgroupPlugin"),
                FieldDef::int("systemd_timeout", "SystemdTimeout"),
                FieldDef::yes_no("ignore_systemd", "IgnoreSystemd"),
                FieldDef::yes_no("ignore_systemd_on_failure", "IgnoreSystemdOnFailure"),
                FieldDef::yes_no("enable_controllers", "EnableControllers"),
                FieldDef::float("allowed_ram_space", "AllowedRAMSpace"),
                FieldDef::float("allowed_swap_space", "AllowedSwapSpace"),
                FieldDef::yes_no("constrain_cores", "ConstrainCores"),
                FieldDef::yes_no("constrain_devices", "ConstrainDevices"),
                FieldDef::yes_no("constrain_ram_space", "ConstrainRAMSpace"),
                FieldDef::yes_no("constrain_swap_space", "ConstrainSwapSpace"),
                FieldDef::float("max_ram_percent", "MaxRAMPercent"),
                FieldDef::float("max_swap_percent", "MaxSwapPercent"),
                FieldDef::int("memory_swappiness", "MemorySwappiness"),
                FieldDef::float("min_ram_space", "MinRAMSpace"),
                FieldDef::yes_no("signal_children_processes", "SignalChildrenProcesses"),
            ],
        )
    })
}

dialect_file!(
    /// Typed view of a `cgroup.conf` file.
    CgroupConfig,
    "cgroup.conf"
);
