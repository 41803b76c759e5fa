//! Parse, mutate, and re-render whole configuration files.

use slurmcfg::dialects::slurm::{self, SlurmConfig};
use slurmcfg::model::{Document, Limit, Record};
use slurmcfg::{ConfigFile, Error, ParseOptions};

const EXAMPLE_SLURM_CONFIG: &str = "\
#
# Cluster controller configuration
#
SlurmctldHost=ctl-0(10.152.28.20)
SlurmctldHost=ctl-1(10.152.28.100)

ClusterName=charmed-hpc
AuthType=auth/munge
FirstJobId=65536
InactiveLimit=120
KillWait=30
MaxJobCount=10000
MinJobAge=3600
PluginDir=/usr/local/lib:/usr/local/slurm/lib
ReturnToService=0
SchedulerType=sched/backfill
SlurmctldPort=7002
SlurmdPort=7003
StateSaveLocation=/var/spool/slurm.state
TmpFS=/tmp
WaitTime=30

#
# Node configurations
#
NodeName=node-2 NodeAddr=10.152.28.48 CPUs=1 RealMemory=1000 TmpDisk=10000
NodeName=node-3 NodeAddr=10.152.28.49 CPUs=1 RealMemory=1000 TmpDisk=10000
NodeName=node-4 NodeAddr=10.152.28.50 CPUs=1 RealMemory=1000 TmpDisk=10000

DownNodes=node-4 State=DOWN Reason=\"Maintenance Mode\"

PartitionName=DEFAULT MaxTime=30 MaxNodes=10 State=UP
PartitionName=batch Nodes=node-2,node-3,node-4 MinNodes=2 MaxTime=120 AllowGroups=admin
";

#[test]
fn test_example_config_parses_with_typed_access() {
    let config = slurm::loads(EXAMPLE_SLURM_CONFIG).unwrap();

    assert_eq!(config.get_str("cluster_name").unwrap(), Some("charmed-hpc"));
    assert_eq!(config.get_int("first_job_id").unwrap(), Some(65536));
    assert_eq!(
        config.get_limit("max_job_count").unwrap(),
        Some(Limit::Number(10000))
    );

    let plugin_dir = config.get("plugin_dir").unwrap().unwrap();
    assert_eq!(plugin_dir.as_list().unwrap().len(), 2);

    let hosts = config.get("slurmctld_host").unwrap().unwrap();
    assert_eq!(hosts.as_list().unwrap().len(), 2);

    let nodes = config.nodes().unwrap().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(
        nodes.get("node-3").unwrap().get_str("node_addr").unwrap(),
        Some("10.152.28.49")
    );

    let down = config.down_nodes().unwrap().unwrap();
    assert_eq!(
        down.get(0).unwrap().get_str("reason").unwrap(),
        Some("Maintenance Mode")
    );

    let partitions = config.partitions().unwrap().unwrap();
    assert_eq!(
        partitions
            .get("batch")
            .unwrap()
            .get_str("max_time")
            .unwrap(),
        Some("120")
    );
    assert_eq!(
        partitions
            .get("DEFAULT")
            .unwrap()
            .get_limit("max_nodes")
            .unwrap(),
        Some(Limit::Number(10))
    );
}

#[test]
fn test_render_then_reparse_is_stable() {
    let parsed = slurm::loads(EXAMPLE_SLURM_CONFIG).unwrap();
    let rendered = slurm::dumps(&parsed);
    let reparsed = slurm::loads(&rendered).unwrap();
    assert_eq!(parsed, reparsed);
    // A second render is byte-identical, not merely equivalent.
    assert_eq!(slurm::dumps(&reparsed), rendered);
}

#[test]
fn test_unknown_keys_survive_lenient_parse() {
    let config = slurm::loads("ClusterName=base\nFrobnicationRate=11\n").unwrap();
    let unknown = config.record().unknown();
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].key, "FrobnicationRate");
    assert_eq!(unknown[0].raw, "11");

    let rendered = slurm::dumps(&config);
    assert!(rendered.contains("FrobnicationRate=11\n"));
    assert_eq!(slurm::loads(&rendered).unwrap(), config);
}

#[test]
fn test_strict_mode_rejects_unknown_keys() {
    let err = slurmcfg::editor::loads::<SlurmConfig>(
        "ClusterName=base\nFrobnicationRate=11\n",
        ParseOptions::strict(),
    )
    .unwrap_err();
    match err {
        Error::Parse(slurmcfg::parser::ParseError::UnknownKey { line, key, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(key, "FrobnicationRate");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn test_invalid_value_reports_path_and_line() {
    let err = slurm::loads("ClusterName=base\nFirstJobId=soon\n").unwrap_err();
    match err {
        Error::Parse(slurmcfg::parser::ParseError::Validation { path, line, .. }) => {
            assert_eq!(path, "<string>");
            assert_eq!(line, 2);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_repeating_a_unique_key_fails() {
    assert!(slurm::loads("ClusterName=a\nClusterName=b\n").is_err());
}

#[test]
fn test_continuations_and_comments() {
    let config = slurm::loads(
        "# header comment\n\
         NodeName=node-1 \\\n  CPUs=4 \\\n  RealMemory=16000 # trailing\n",
    )
    .unwrap();
    let nodes = config.nodes().unwrap().unwrap();
    assert_eq!(nodes.get("node-1").unwrap().get_int("cpus").unwrap(), Some(4));
}

#[test]
fn test_set_and_delete_round_trip() {
    let mut config = slurm::loads("ClusterName=base\nKillWait=30\n").unwrap();

    config.set("kill_wait", 60i64).unwrap();
    config.set("max_job_count", Limit::Unlimited).unwrap();
    config.delete("cluster_name").unwrap();
    // Deleting an absent field is still fine.
    config.delete("cluster_name").unwrap();

    assert_eq!(
        slurm::dumps(&config),
        "KillWait=60\nMaxJobCount=UNLIMITED\n"
    );
}

#[test]
fn test_setting_the_wrong_type_is_rejected() {
    let mut config = SlurmConfig::new();
    assert!(config.set("cluster_name", 5i64).is_err());
    assert!(config.set("first_job_id", "soon").is_err());
    assert!(config.set("cluster_name", "base").is_ok());
}

#[test]
fn test_json_interchange() {
    let mut config = SlurmConfig::new();
    config.set("cluster_name", "base").unwrap();
    config.set("max_job_count", Limit::Unlimited).unwrap();

    let mut node = Record::new(slurm::node());
    node.set("node_name", "node-1").unwrap();
    node.set("cpus", 8i64).unwrap();
    config.nodes_mut().unwrap().insert(node).unwrap();

    let json = config.to_json();
    assert_eq!(json["cluster_name"], "base");
    assert_eq!(json["max_job_count"], "UNLIMITED");
    assert_eq!(json["nodes"]["node-1"]["cpus"], 8);

    let back = Document::from_json(SlurmConfig::schema(), &json).unwrap();
    assert_eq!(&back, config.document());
}

#[test]
fn test_wrong_kill_wait_does_not_partially_apply() {
    // The failing line is the second one; nothing before it is lost, nothing
    // after it is applied.
    let err = slurm::loads("ClusterName=base\nKillWait=never\nWaitTime=10\n").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
