//! `Include` directive resolution and round-trip behavior.

use std::path::Path;

use slurmcfg::dialects::slurm::{self, SlurmConfig};
use slurmcfg::{editor, Error, MemFs, ParseOptions};

fn store_with(files: &[(&str, &str)]) -> MemFs {
    let fs = MemFs::new();
    for (path, contents) in files {
        fs.insert(*path, contents.as_bytes().to_vec());
    }
    fs
}

fn load(fs: &MemFs, path: &str) -> Result<SlurmConfig, Error> {
    editor::load(fs, Path::new(path), ParseOptions::default())
}

#[test]
fn test_include_merges_content() {
    let fs = store_with(&[
        (
            "/etc/slurm/slurm.conf",
            "ClusterName=base\nInclude nodes.conf\nKillWait=30\n",
        ),
        (
            "/etc/slurm/nodes.conf",
            "NodeName=node-1 CPUs=4\nNodeName=node-2 CPUs=4\n",
        ),
    ]);

    let config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    assert_eq!(config.get_str("cluster_name").unwrap(), Some("base"));
    assert_eq!(config.nodes().unwrap().unwrap().len(), 2);
    assert_eq!(config.includes().collect::<Vec<_>>(), vec!["nodes.conf"]);
}

#[test]
fn test_included_content_is_not_inlined_on_render() {
    let fs = store_with(&[
        (
            "/etc/slurm/slurm.conf",
            "Include nodes.conf\nClusterName=base\n",
        ),
        ("/etc/slurm/nodes.conf", "NodeName=node-1 CPUs=4\nWaitTime=10\n"),
    ]);

    let config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    // Merged content is visible through the model.
    assert_eq!(config.get_int("wait_time").unwrap(), Some(10));
    assert!(config.nodes().unwrap().is_some());

    // But the render belongs to the including file alone.
    let rendered = slurm::dumps(&config);
    assert_eq!(rendered, "Include nodes.conf\nClusterName=base\n");
}

#[test]
fn test_write_back_then_reload_is_stable() {
    let fs = store_with(&[
        (
            "/etc/slurm/slurm.conf",
            "Include nodes.conf\nClusterName=base\n",
        ),
        ("/etc/slurm/nodes.conf", "NodeName=node-1 CPUs=4\n"),
    ]);

    let config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    editor::dump(
        &fs,
        Path::new("/etc/slurm/slurm.conf"),
        &config,
        Default::default(),
    )
    .unwrap();

    let reloaded = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    assert_eq!(reloaded, config);
}

#[test]
fn test_relative_includes_resolve_against_including_file() {
    let fs = store_with(&[
        ("/etc/slurm/slurm.conf", "Include conf.d/extra.conf\n"),
        ("/etc/slurm/conf.d/extra.conf", "ClusterName=nested\n"),
    ]);

    let config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    assert_eq!(config.get_str("cluster_name").unwrap(), Some("nested"));
}

#[test]
fn test_absolute_include_paths_are_used_verbatim() {
    let fs = store_with(&[
        ("/etc/slurm/slurm.conf", "Include /srv/shared/common.conf\n"),
        ("/srv/shared/common.conf", "ClusterName=shared\n"),
    ]);

    let config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    assert_eq!(config.get_str("cluster_name").unwrap(), Some("shared"));
}

#[test]
fn test_cyclic_include_is_detected() {
    let fs = store_with(&[
        ("/etc/slurm/a.conf", "Include b.conf\n"),
        ("/etc/slurm/b.conf", "Include a.conf\n"),
    ]);

    let err = load(&fs, "/etc/slurm/a.conf").unwrap_err();
    match err {
        Error::Parse(slurmcfg::parser::ParseError::CyclicInclude { target, .. }) => {
            assert_eq!(target, "a.conf");
        }
        other => panic!("expected CyclicInclude, got {other:?}"),
    }
}

#[test]
fn test_missing_include_file_is_reported() {
    let fs = store_with(&[("/etc/slurm/slurm.conf", "Include nowhere.conf\n")]);

    let err = load(&fs, "/etc/slurm/slurm.conf").unwrap_err();
    match err {
        Error::Parse(slurmcfg::parser::ParseError::MissingIncludeFile { target, line, .. }) => {
            assert_eq!(target, "nowhere.conf");
            assert_eq!(line, 1);
        }
        other => panic!("expected MissingIncludeFile, got {other:?}"),
    }
}

#[test]
fn test_loads_records_includes_without_resolving() {
    let config = slurm::loads("Include nodes.conf\nClusterName=base\n").unwrap();
    assert_eq!(config.includes().collect::<Vec<_>>(), vec!["nodes.conf"]);
    // No store, so nothing was merged.
    assert!(config.nodes().unwrap().is_none());
    assert_eq!(
        slurm::dumps(&config),
        "Include nodes.conf\nClusterName=base\n"
    );
}

#[test]
fn test_include_equals_form() {
    let config = slurm::loads("Include=nodes.conf\n").unwrap();
    assert_eq!(config.includes().collect::<Vec<_>>(), vec!["nodes.conf"]);
}

#[test]
fn test_editing_an_included_directive_keeps_the_file_loadable() {
    let fs = store_with(&[
        ("/etc/slurm/slurm.conf", "Include nodes.conf\n"),
        ("/etc/slurm/nodes.conf", "WaitTime=10\n"),
    ]);

    let mut config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    config.set("wait_time", 20i64).unwrap();
    editor::dump(
        &fs,
        Path::new("/etc/slurm/slurm.conf"),
        &config,
        Default::default(),
    )
    .unwrap();

    assert_eq!(
        fs.contents(Path::new("/etc/slurm/slurm.conf")).unwrap(),
        "Include nodes.conf\nWaitTime=20\n"
    );

    // The file's own directive overrides the included one, so the dump
    // still loads and keeps the edited value.
    let reloaded = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    assert_eq!(reloaded.get_int("wait_time").unwrap(), Some(20));
    assert_eq!(reloaded, config);
}

#[test]
fn test_repeated_key_split_across_include_round_trips() {
    let fs = store_with(&[
        (
            "/etc/slurm/slurm.conf",
            "Include extra.conf\nSlurmctldHost=ctl-0\n",
        ),
        ("/etc/slurm/extra.conf", "SlurmctldHost=ctl-1\n"),
    ]);

    let config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    let hosts = config.get("slurmctld_host").unwrap().unwrap();
    assert_eq!(hosts.as_list().unwrap().len(), 2);

    editor::dump(
        &fs,
        Path::new("/etc/slurm/slurm.conf"),
        &config,
        Default::default(),
    )
    .unwrap();

    // Only the file's own occurrence is written back.
    assert_eq!(
        fs.contents(Path::new("/etc/slurm/slurm.conf")).unwrap(),
        "Include extra.conf\nSlurmctldHost=ctl-0\n"
    );

    let reloaded = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    let hosts = reloaded.get("slurmctld_host").unwrap().unwrap();
    assert_eq!(hosts.as_list().unwrap().len(), 2);
    assert_eq!(reloaded, config);
}

#[test]
fn test_nested_include_belongs_to_its_own_file() {
    let fs = store_with(&[
        ("/etc/slurm/slurm.conf", "Include middle.conf\n"),
        ("/etc/slurm/middle.conf", "Include inner.conf\nKillWait=30\n"),
        ("/etc/slurm/inner.conf", "WaitTime=10\n"),
    ]);

    let config = load(&fs, "/etc/slurm/slurm.conf").unwrap();
    assert_eq!(config.get_int("kill_wait").unwrap(), Some(30));
    assert_eq!(config.get_int("wait_time").unwrap(), Some(10));
    // Only the top file's own directive is re-emitted.
    assert_eq!(slurm::dumps(&config), "Include middle.conf\n");
}
