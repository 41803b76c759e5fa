//! The `slurm.conf` dialect.
//!
//! The largest schema by far: the flat controller/daemon directives plus
//! five nested collections (nodes, frontend nodes, node sets, partitions,
//! and down-node declarations). Nested blocks occupy one line each, keyed by
//! the directive that opens them (`NodeName`, `FrontendName`, `NodeSet`,
//! `PartitionName`, `DownNodes`).

use std::sync::OnceLock;

use super::dialect_file;
use crate::model::{RecordList, RecordMap};
use crate::schema::{FieldDef, MapFormat, Schema, SchemaResult};

fn node_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "Node",
            vec![
                FieldDef::str("node_name", "NodeName").primary(),
                FieldDef::str("node_hostname", "NodeHostname"),
                FieldDef::str("node_addr", "NodeAddr"),
                FieldDef::str("bcast_addr", "BcastAddr"),
                FieldDef::int("boards", "Boards"),
                FieldDef::int("core_spec_count", "CoreSpecCount"),
                FieldDef::int("cores_per_socket", "CoresPerSocket"),
                FieldDef::str("cpu_bind", "CpuBind"),
                FieldDef::int("cpus", "CPUs"),
                FieldDef::list("cpu_spec_list", "CpuSpecList"),
                FieldDef::list("features", "Features"),
                FieldDef::list("gres", "Gres"),
                FieldDef::int("mem_spec_limit", "MemSpecLimit"),
                FieldDef::int("port", "Port"),
                FieldDef::int("procs", "Procs"),
                FieldDef::int("real_memory", "RealMemory"),
                FieldDef::str("reason", "Reason").quoted(),
                FieldDef::int("sockets", "Sockets"),
                FieldDef::int("sockets_per_board", "SocketsPerBoard"),
                FieldDef::str("state", "State"),
                FieldDef::int("threads_per_core", "ThreadsPerCore"),
                FieldDef::int("tmp_disk", "TmpDisk"),
                FieldDef::int("weight", "Weight"),
            ],
        )
    })
}

fn frontend_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "FrontendNode",
            vec![
                FieldDef::str("frontend_name", "FrontendName").primary(),
                FieldDef::str("frontend_addr", "FrontendAddr"),
                FieldDef::list("allow_groups", "AllowGroups"),
                FieldDef::list("allow_users", "AllowUsers"),
                FieldDef::list("deny_groups", "DenyGroups"),
                FieldDef::list("deny_users", "DenyUsers"),
                FieldDef::int("port", "Port"),
                FieldDef::str("reason", "Reason").quoted(),
                FieldDef::str("state", "State"),
            ],
        )
    })
}

fn nodeset_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "NodeSet",
            vec![
                FieldDef::str("node_set", "NodeSet").primary(),
                FieldDef::str("feature", "Feature"),
                FieldDef::list("nodes", "Nodes"),
            ],
        )
    })
}

fn partition_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "Partition",
            vec![
                FieldDef::str("partition_name", "PartitionName").primary(),
                FieldDef::list("alloc_nodes", "AllocNodes"),
                FieldDef::list("allow_accounts", "AllowAccounts"),
                FieldDef::list("allow_groups", "AllowGroups"),
                FieldDef::list("allow_qos", "AllowQos"),
                FieldDef::str("alternate", "Alternate"),
                FieldDef::str("cpu_bind", "CpuBind"),
                FieldDef::yes_no("default", "Default"),
                FieldDef::str("default_time", "DefaultTime"),
                FieldDef::int("def_cpu_per_gpu", "DefCpuPerGPU"),
                FieldDef::int("def_mem_per_cpu", "DefMemPerCPU"),
                FieldDef::int("def_mem_per_gpu", "DefMemPerGPU"),
                FieldDef::int("def_mem_per_node", "DefMemPerNode"),
                FieldDef::list("deny_accounts", "DenyAccounts"),
                FieldDef::list("deny_qos", "DenyQos"),
                FieldDef::yes_no("disable_root_jobs", "DisableRootJobs"),
                FieldDef::yes_no("exclusive_topo", "ExclusiveTopo"),
                FieldDef::yes_no("exclusive_user", "ExclusiveUser"),
                FieldDef::int("grace_time", "GraceTime"),
                FieldDef::yes_no("hidden", "Hidden"),
                FieldDef::yes_no("lln", "LLN"),
                FieldDef::int("max_cpus_per_node", "MaxCPUsPerNode"),
                FieldDef::int("max_cpus_per_socket", "MaxCPUsPerSocket"),
                FieldDef::int("max_mem_per_cpu", "MaxMemPerCPU"),
                FieldDef::int("max_mem_per_node", "MaxMemPerNode"),
                FieldDef::limit("max_nodes", "MaxNodes"),
                FieldDef::str("max_time", "MaxTime"),
                FieldDef::int("min_nodes", "MinNodes"),
                FieldDef::list("nodes", "Nodes"),
                FieldDef::str("over_subscribe", "OverSubscribe"),
                FieldDef::limit("over_time_limit", "OverTimeLimit"),
                FieldDef::yes_no("power_down_on_idle", "PowerDownOnIdle"),
                FieldDef::str("preempt_mode", "PreemptMode"),
                FieldDef::int("priority_job_factor", "PriorityJobFactor"),
                FieldDef::int("priority_tier", "PriorityTier"),
                FieldDef::str("qos", "QOS"),
                FieldDef::yes_no("req_resv", "ReqResv"),
                FieldDef::int("resume_timeout", "ResumeTimeout"),
                FieldDef::yes_no("root_only", "RootOnly"),
                FieldDef::list("select_type_parameters", "SelectTypeParameters"),
                FieldDef::str("state", "State"),
                FieldDef::limit("suspend_time", "SuspendTime"),
                FieldDef::int("suspend_timeout", "SuspendTimeout"),
                FieldDef::map("tres_billing_weights", "TRESBillingWeights", MapFormat::COMMA),
            ],
        )
    })
}

fn down_nodes_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "DownNodes",
            vec![
                FieldDef::list("down_nodes", "DownNodes").primary(),
                FieldDef::str("reason", "Reason").quoted(),
                FieldDef::str("state", "State"),
            ],
        )
    })
}

fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "slurm.conf",
            vec![
                FieldDef::str("accounting_storage_backup_host", "AccountingStorageBackupHost"),
                FieldDef::list("accounting_storage_enforce", "AccountingStorageEnforce"),
                FieldDef::str(
                    "accounting_storage_external_host",
                    "AccountingStorageExternalHost",
                ),
                FieldDef::str("accounting_storage_host", "AccountingStorageHost"),
                FieldDef::map(
                    "accounting_storage_parameters",
                    "AccountingStorageParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::str("accounting_storage_pass", "AccountingStoragePass"),
                FieldDef::int("accounting_storage_port", "AccountingStoragePort"),
                FieldDef::list("accounting_storage_tres", "AccountingStorageTRES"),
                FieldDef::str("accounting_storage_type", "AccountingStorageType"),
                FieldDef::str("accounting_storage_user", "AccountingStorageUser"),
                FieldDef::list("accounting_store_flags", "AccountingStoreFlags"),
                FieldDef::int("acct_gather_node_freq", "AcctGatherNodeFreq"),
                FieldDef::str("acct_gather_energy_type", "AcctGatherEnergyType"),
                FieldDef::str("acct_gather_interconnect_type", "AcctGatherInterconnectType"),
                FieldDef::str("acct_gather_filesystem_type", "AcctGatherFilesystemType"),
                FieldDef::str("acct_gather_profile_type", "AcctGatherProfileType"),
                FieldDef::yes_no("allow_spec_resources_usage", "AllowSpecResourcesUsage"),
                FieldDef::list("auth_alt_types", "AuthAltTypes"),
                FieldDef::map("auth_alt_parameters", "AuthAltParameters", MapFormat::COMMA),
                FieldDef::map("auth_info", "AuthInfo", MapFormat::COMMA),
                FieldDef::str("auth_type", "AuthType"),
                FieldDef::int("batch_start_timeout", "BatchStartTimeout"),
                FieldDef::list("bcast_exclude", "BcastExclude"),
                FieldDef::map("bcast_parameters", "BcastParameters", MapFormat::COMMA),
                FieldDef::str("burst_buffer_type", "BurstBufferType"),
                FieldDef::list("cli_filter_plugins", "CliFilterPlugins"),
                FieldDef::str("cluster_name", "ClusterName"),
                FieldDef::map(
                    "communication_parameters",
                    "CommunicationParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::int("complete_wait", "CompleteWait"),
                FieldDef::str("cpu_freq_def", "CpuFreqDef"),
                FieldDef::list("cpu_freq_governors", "CpuFreqGovernors"),
                FieldDef::str("cred_type", "CredType"),
                FieldDef::list("debug_flags", "DebugFlags"),
                FieldDef::int("def_cpu_per_gpu", "DefCpuPerGPU"),
                FieldDef::int("def_mem_per_cpu", "DefMemPerCPU"),
                FieldDef::int("def_mem_per_gpu", "DefMemPerGPU"),
                FieldDef::int("def_mem_per_node", "DefMemPerNode"),
                FieldDef::map(
                    "dependency_parameters",
                    "DependencyParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::yes_no("disable_root_jobs", "DisableRootJobs"),
                FieldDef::int("eio_timeout", "EioTimeout"),
                FieldDef::str("enforce_part_limits", "EnforcePartLimits"),
                FieldDef::str("epilog", "Epilog"),
                FieldDef::int("epilog_msg_time", "EpilogMsgTime"),
                FieldDef::str("epilog_slurmctld", "EpilogSlurmctld"),
                FieldDef::int("fair_share_dampening_factor", "FairShareDampeningFactor"),
                FieldDef::map(
                    "federation_parameters",
                    "FederationParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::int("first_job_id", "FirstJobId"),
                FieldDef::int("get_env_timeout", "GetEnvTimeout"),
                FieldDef::list("gres_types", "GresTypes"),
                FieldDef::one_zero("group_update_force", "GroupUpdateForce"),
                FieldDef::int("group_update_time", "GroupUpdateTime"),
                FieldDef::str("gpu_freq_def", "GpuFreqDef"),
                FieldDef::int("health_check_interval", "HealthCheckInterval"),
                FieldDef::list("health_check_node_state", "HealthCheckNodeState"),
                FieldDef::str("health_check_program", "HealthCheckProgram"),
                FieldDef::int("inactive_limit", "InactiveLimit"),
                FieldDef::str("interactive_step_options", "InteractiveStepOptions").quoted(),
                FieldDef::str("job_acct_gather_type", "JobAcctGatherType"),
                FieldDef::map(
                    "job_acct_gather_frequency",
                    "JobAcctGatherFrequency",
                    MapFormat::COMMA,
                ),
                FieldDef::map(
                    "job_acct_gather_params",
                    "JobAcctGatherParams",
                    MapFormat::COMMA,
                ),
                FieldDef::str("job_comp_host", "JobCompHost"),
                FieldDef::str("job_comp_loc", "JobCompLoc"),
                FieldDef::map("job_comp_params", "JobCompParams", MapFormat::COMMA),
                FieldDef::str("job_comp_pass", "JobCompPass"),
                FieldDef::int("job_comp_port", "JobCompPort"),
                FieldDef::str("job_comp_type", "JobCompType"),
                FieldDef::str("job_comp_user", "JobCompUser"),
                FieldDef::str("job_container_type", "JobContainerType"),
                FieldDef::one_zero("job_file_append", "JobFileAppend"),
                FieldDef::one_zero("job_requeue", "JobRequeue"),
                FieldDef::list("job_submit_plugins", "JobSubmitPlugins"),
                FieldDef::one_zero("kill_on_bad_exit", "KillOnBadExit"),
                FieldDef::int("kill_wait", "KillWait"),
                FieldDef::int("max_batch_requeue", "MaxBatchRequeue"),
                FieldDef::list("node_features_plugins", "NodeFeaturesPlugins"),
                FieldDef::map("launch_parameters", "LaunchParameters", MapFormat::COMMA),
                FieldDef::map("licenses", "Licenses", MapFormat::COMMA_COLON),
                FieldDef::str("log_time_format", "LogTimeFormat"),
                FieldDef::str("mail_domain", "MailDomain"),
                FieldDef::str("mail_prog", "MailProg"),
                FieldDef::int("max_array_size", "MaxArraySize"),
                FieldDef::int("max_dbd_msgs", "MaxDBDMsgs"),
                FieldDef::limit("max_job_count", "MaxJobCount"),
                FieldDef::int("max_job_id", "MaxJobId"),
                FieldDef::int("max_mem_per_cpu", "MaxMemPerCPU"),
                FieldDef::int("max_mem_per_node", "MaxMemPerNode"),
                FieldDef::int("max_node_count", "MaxNodeCount"),
                FieldDef::int("max_step_count", "MaxStepCount"),
                FieldDef::int("max_tasks_per_node", "MaxTasksPerNode"),
                FieldDef::str("mcs_parameters", "MCSParameters"),
                FieldDef::str("mcs_plugin", "MCSPlugin"),
                FieldDef::int("message_timeout", "MessageTimeout"),
                FieldDef::int("min_job_age", "MinJobAge"),
                FieldDef::str("mpi_default", "MpiDefault"),
                FieldDef::map("mpi_params", "MpiParams", MapFormat::COMMA),
                FieldDef::limit("over_time_limit", "OverTimeLimit"),
                FieldDef::colon_list("plugin_dir", "PluginDir"),
                FieldDef::str("plug_stack_config", "PlugStackConfig"),
                FieldDef::str("preempt_mode", "PreemptMode"),
                FieldDef::map("preempt_parameters", "PreemptParameters", MapFormat::COMMA),
                FieldDef::str("preempt_type", "PreemptType"),
                FieldDef::str("preempt_exempt_time", "PreemptExemptTime"),
                FieldDef::map("pr_ep_parameters", "PrEpParameters", MapFormat::COMMA),
                FieldDef::list("pr_ep_plugins", "PrEpPlugins"),
                FieldDef::int("priority_calc_period", "PriorityCalcPeriod"),
                FieldDef::str("priority_decay_half_life", "PriorityDecayHalfLife"),
                FieldDef::yes_no("priority_favor_small", "PriorityFavorSmall"),
                FieldDef::list("priority_flags", "PriorityFlags"),
                FieldDef::str("priority_max_age", "PriorityMaxAge"),
                FieldDef::str("priority_parameters", "PriorityParameters"),
                FieldDef::str(
                    "priority_site_factor_parameters",
                    "PrioritySiteFactorParameters",
                ),
                FieldDef::str("priority_site_factor_plugin", "PrioritySiteFactorPlugin"),
                FieldDef::str("priority_type", "PriorityType"),
                FieldDef::str("priority_usage_reset_period", "PriorityUsageResetPeriod"),
                FieldDef::int("priority_weight_age", "PriorityWeightAge"),
                FieldDef::int("priority_weight_assoc", "PriorityWeightAssoc"),
                FieldDef::int("priority_weight_fairshare", "PriorityWeightFairshare"),
                FieldDef::int("priority_weight_job_size", "PriorityWeightJobSize"),
                FieldDef::int("priority_weight_partition", "PriorityWeightPartition"),
                FieldDef::int("priority_weight_qos", "PriorityWeightQOS"),
                FieldDef::map(
                    "priority_weight_tres",
                    "PriorityWeightTRES",
                    MapFormat::COMMA,
                ),
                FieldDef::list("private_data", "PrivateData"),
                FieldDef::str("proctrack_type", "ProctrackType"),
                FieldDef::str("prolog", "Prolog"),
                FieldDef::int("prolog_epilog_timeout", "PrologEpilogTimeout"),
                FieldDef::list("prolog_flags", "PrologFlags"),
                FieldDef::str("prolog_slurmctld", "PrologSlurmctld"),
                FieldDef::int("propagate_prio_process", "PropagatePrioProcess"),
                FieldDef::list("propagate_resource_limits", "PropagateResourceLimits"),
                FieldDef::list(
                    "propagate_resource_limits_except",
                    "PropagateResourceLimitsExcept",
                ),
                FieldDef::str("reboot_program", "RebootProgram").quoted(),
                FieldDef::list("reconfig_flags", "ReconfigFlags"),
                FieldDef::list("requeue_exit", "RequeueExit"),
                FieldDef::list("requeue_exit_hold", "RequeueExitHold"),
                FieldDef::str("resume_fail_program", "ResumeFailProgram"),
                FieldDef::str("resume_program", "ResumeProgram"),
                FieldDef::int("resume_rate", "ResumeRate"),
                FieldDef::int("resume_timeout", "ResumeTimeout"),
                FieldDef::str("resv_epilog", "ResvEpilog"),
                FieldDef::limit("resv_over_run", "ResvOverRun"),
                FieldDef::str("resv_prolog", "ResvProlog"),
                FieldDef::int("return_to_service", "ReturnToService"),
                FieldDef::map(
                    "scheduler_parameters",
                    "SchedulerParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::int("scheduler_time_slice", "SchedulerTimeSlice"),
                FieldDef::str("scheduler_type", "SchedulerType"),
                FieldDef::map("scron_parameters", "ScronParameters", MapFormat::COMMA),
                FieldDef::str("select_type", "SelectType"),
                FieldDef::map(
                    "select_type_parameters",
                    "SelectTypeParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::str("slurmctld_addr", "SlurmctldAddr"),
                FieldDef::str("slurmctld_debug", "SlurmctldDebug"),
                FieldDef::repeated("slurmctld_host", "SlurmctldHost"),
                FieldDef::str("slurmctld_log_file", "SlurmctldLogFile"),
                FieldDef::map(
                    "slurmctld_parameters",
                    "SlurmctldParameters",
                    MapFormat::COMMA,
                ),
                FieldDef::str("slurmctld_pid_file", "SlurmctldPidFile"),
                FieldDef::str("slurmctld_port", "SlurmctldPort"),
                FieldDef::str("slurmctld_primary_off_prog", "SlurmctldPrimaryOffProg"),
                FieldDef::str("slurmctld_primary_on_prog", "SlurmctldPrimaryOnProg"),
                FieldDef::str("slurmctld_syslog_debug", "SlurmctldSyslogDebug"),
                FieldDef::int("slurmctld_timeout", "SlurmctldTimeout"),
                FieldDef::str("slurmd_debug", "SlurmdDebug"),
                FieldDef::str("slurmd_log_file", "SlurmdLogFile"),
                FieldDef::map("slurmd_parameters", "SlurmdParameters", MapFormat::COMMA),
                FieldDef::str("slurmd_pid_file", "SlurmdPidFile"),
                FieldDef::int("slurmd_port", "SlurmdPort"),
                FieldDef::str("slurmd_spool_dir", "SlurmdSpoolDir"),
                FieldDef::str("slurmd_syslog_debug", "SlurmdSyslogDebug"),
                FieldDef::int("slurmd_timeout", "SlurmdTimeout"),
                FieldDef::str("slurmd_user", "SlurmdUser"),
                FieldDef::str("slurm_sched_log_file", "SlurmSchedLogFile"),
                FieldDef::one_zero("slurm_sched_log_level", "SlurmSchedLogLevel"),
                FieldDef::str("slurm_user", "SlurmUser"),
                FieldDef::str("srun_epilog", "SrunEpilog"),
                FieldDef::str("srun_port_range", "SrunPortRange"),
                FieldDef::str("srun_prolog", "SrunProlog"),
                FieldDef::str("state_save_location", "StateSaveLocation"),
                FieldDef::map(
                    "suspend_exc_nodes",
                    "SuspendExcNodes",
                    MapFormat::COMMA_COLON,
                ),
                FieldDef::list("suspend_exc_parts", "SuspendExcParts"),
                FieldDef::list("suspend_exc_states", "SuspendExcStates"),
                FieldDef::str("suspend_program", "SuspendProgram"),
                FieldDef::int("suspend_rate", "SuspendRate"),
                FieldDef::limit("suspend_time", "SuspendTime"),
                FieldDef::int("suspend_timeout", "SuspendTimeout"),
                FieldDef::map(
                    "switch_parameters",
                    "SwitchParameters",
                    MapFormat::COMMA_COLON_ARRAY,
                ),
                FieldDef::str("switch_type", "SwitchType"),
                FieldDef::str("task_epilog", "TaskEpilog"),
                FieldDef::list("task_plugin", "TaskPlugin"),
                FieldDef::map("task_plugin_param", "TaskPluginParam", MapFormat::COMMA),
                FieldDef::str("task_prolog", "TaskProlog"),
                FieldDef::int("tcp_timeout", "TCPTimeout"),
                FieldDef::str("tmpfs", "TmpFS"),
                FieldDef::map("topology_param", "TopologyParam", MapFormat::COMMA),
                FieldDef::str("topology_plugin", "TopologyPlugin"),
                FieldDef::yes_no("track_wc_key", "TrackWCKey"),
                FieldDef::int("tree_width", "TreeWidth"),
                FieldDef::str("unkillable_step_program", "UnkillableStepProgram"),
                FieldDef::int("unkillable_step_timeout", "UnkillableStepTimeout"),
                FieldDef::one_zero("use_pam", "UsePAM"),
                FieldDef::int("v_size_factor", "VSizeFactor"),
                FieldDef::int("wait_time", "WaitTime"),
                FieldDef::map("x11_parameters", "X11Parameters", MapFormat::COMMA),
                FieldDef::model_list("down_nodes", "DownNodes", down_nodes_schema),
                FieldDef::model_map("frontend_nodes", "FrontendName", frontend_schema),
                FieldDef::model_map("nodes", "NodeName", node_schema),
                FieldDef::model_map("nodesets", "NodeSet", nodeset_schema),
                FieldDef::model_map("partitions", "PartitionName", partition_schema),
            ],
        )
    })
}

dialect_file!(
    /// Typed view of a `slurm.conf` file.
    SlurmConfig,
    "slurm.conf"
);

impl SlurmConfig {
    /// Declared nodes, keyed by `NodeName`.
    pub fn nodes(&self) -> SchemaResult<Option<&RecordMap>> {
        self.doc.record_map("nodes")
    }

    /// Declared nodes, created empty on first access.
    pub fn nodes_mut(&mut self) -> SchemaResult<&mut RecordMap> {
        self.doc.record_map_mut("nodes")
    }

    /// Frontend nodes, keyed by `FrontendName`.
    pub fn frontend_nodes(&self) -> SchemaResult<Option<&RecordMap>> {
        self.doc.record_map("frontend_nodes")
    }

    /// Frontend nodes, created empty on first access.
    pub fn frontend_nodes_mut(&mut self) -> SchemaResult<&mut RecordMap> {
        self.doc.record_map_mut("frontend_nodes")
    }

    /// Node sets, keyed by `NodeSet`.
    pub fn nodesets(&self) -> SchemaResult<Option<&RecordMap>> {
        self.doc.record_map("nodesets")
    }

    /// Node sets, created empty on first access.
    pub fn nodesets_mut(&mut self) -> SchemaResult<&mut RecordMap> {
        self.doc.record_map_mut("nodesets")
    }

    /// Partitions, keyed by `PartitionName`.
    pub fn partitions(&self) -> SchemaResult<Option<&RecordMap>> {
        self.doc.record_map("partitions")
    }

    /// Partitions, created empty on first access.
    pub fn partitions_mut(&mut self) -> SchemaResult<&mut RecordMap> {
        self.doc.record_map_mut("partitions")
    }

    /// Down-node declarations, in file order.
    pub fn down_nodes(&self) -> SchemaResult<Option<&RecordList>> {
        self.doc.records("down_nodes")
    }

    /// Down-node declarations, created empty on first access.
    pub fn down_nodes_mut(&mut self) -> SchemaResult<&mut RecordList> {
        self.doc.records_mut("down_nodes")
    }
}

/// Schema of a single node declaration, for building records by hand.
pub fn node() -> &'static Schema {
    node_schema()
}

/// Schema of a single frontend node declaration.
pub fn frontend_node() -> &'static Schema {
    frontend_schema()
}

/// Schema of a single node set declaration.
pub fn nodeset() -> &'static Schema {
    nodeset_schema()
}

/// Schema of a single partition declaration.
pub fn partition() -> &'static Schema {
    partition_schema()
}

/// Schema of a single down-nodes declaration.
pub fn down_nodes_entry() -> &'static Schema {
    down_nodes_schema()
}
