//! Scoped edit sessions and atomic write-back.

use std::path::Path;

use slurmcfg::dialects::slurmdbd::{self, SlurmdbdConfig};
use slurmcfg::dialects::{cgroup, slurm};
use slurmcfg::{editor, DumpOptions, Error, FileAttrs, FileStore, MemFs, Owner, ParseOptions};

const CONF: &str = "/etc/slurm/slurmdbd.conf";

fn edit_dbd<F>(fs: &MemFs, opts: DumpOptions, apply: F) -> Result<SlurmdbdConfig, Error>
where
    F: FnOnce(&mut SlurmdbdConfig) -> Result<(), Error>,
{
    editor::edit(fs, Path::new(CONF), ParseOptions::default(), opts, apply)
}

#[test]
fn test_edit_writes_back_on_success() {
    let fs = MemFs::new();
    fs.insert(CONF, "DbdHost=db-0\n");

    let config = edit_dbd(&fs, Default::default(), |config| {
        config.set("storage_pass", "hunter2")?;
        config.set("dbd_port", 6819i64)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(config.get_int("dbd_port").unwrap(), Some(6819));
    assert_eq!(
        fs.contents(Path::new(CONF)).unwrap(),
        "DbdHost=db-0\nDbdPort=6819\nStoragePass=hunter2\n"
    );
}

#[test]
fn test_edit_aborts_without_writing_on_error() {
    let fs = MemFs::new();
    fs.insert(CONF, "DbdHost=db-0\n");

    // Setting a string field to an integer fails validation inside the
    // session.
    let result = edit_dbd(&fs, Default::default(), |config| {
        config.set("storage_pass", 42i64)?;
        Ok(())
    });

    assert!(result.is_err());
    assert_eq!(fs.contents(Path::new(CONF)).unwrap(), "DbdHost=db-0\n");
}

#[test]
fn test_edit_missing_file_starts_empty_and_creates_it() {
    let fs = MemFs::new();

    let config = edit_dbd(&fs, Default::default(), |config| {
        assert!(config.is_empty());
        config.set("dbd_host", "db-0")?;
        Ok(())
    })
    .unwrap();

    assert_eq!(config.get_str("dbd_host").unwrap(), Some("db-0"));
    assert_eq!(fs.contents(Path::new(CONF)).unwrap(), "DbdHost=db-0\n");
}

#[test]
fn test_dump_preserves_existing_attrs_by_default() {
    let fs = MemFs::new();
    fs.write_atomic(
        Path::new(CONF),
        b"DbdHost=db-0\n",
        FileAttrs {
            mode: Some(0o600),
            owner: Some(Owner { uid: 64030, gid: 64030 }),
        },
    )
    .unwrap();

    edit_dbd(&fs, Default::default(), |config| {
        config.set("commit_delay", 1i64)?;
        Ok(())
    })
    .unwrap();

    let attrs = fs.stored_attrs(Path::new(CONF)).unwrap();
    assert_eq!(attrs.mode, Some(0o600));
    assert_eq!(attrs.owner, Some(Owner { uid: 64030, gid: 64030 }));
}

#[test]
fn test_dump_options_override_attrs() {
    let fs = MemFs::new();
    fs.write_atomic(
        Path::new(CONF),
        b"DbdHost=db-0\n",
        FileAttrs {
            mode: Some(0o644),
            owner: None,
        },
    )
    .unwrap();

    edit_dbd(
        &fs,
        DumpOptions {
            mode: Some(0o600),
            owner: Some(Owner { uid: 0, gid: 0 }),
        },
        |_| Ok(()),
    )
    .unwrap();

    let attrs = fs.stored_attrs(Path::new(CONF)).unwrap();
    assert_eq!(attrs.mode, Some(0o600));
    assert_eq!(attrs.owner, Some(Owner { uid: 0, gid: 0 }));
}

#[test]
fn test_on_disk_edit_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slurm.conf");
    std::fs::write(&path, "ClusterName=base\nKillWait=30\n").unwrap();

    let config = slurm::edit(&path, |config| {
        config.set("kill_wait", 60i64)?;
        config.set("cluster_name", "prod")?;
        Ok(())
    })
    .unwrap();
    assert_eq!(config.get_int("kill_wait").unwrap(), Some(60));

    let reloaded = slurm::load(&path).unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "ClusterName=prod\nKillWait=60\n"
    );
}

#[test]
fn test_on_disk_load_resolves_relative_include() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("slurm.conf"),
        "Include nodes.conf\nClusterName=base\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("nodes.conf"), "NodeName=node-1 CPUs=4\n").unwrap();

    let config = slurm::load(dir.path().join("slurm.conf")).unwrap();
    assert_eq!(config.nodes().unwrap().unwrap().len(), 1);
}

#[test]
fn test_load_missing_file_is_io_not_found() {
    let err = cgroup::load("/definitely/not/here/cgroup.conf").unwrap_err();
    match err {
        Error::Io(err) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_dialect_dump_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slurmdbd.conf");

    let mut config = SlurmdbdConfig::new();
    config.set("dbd_host", "db-0").unwrap();
    config.set("storage_type", "accounting_storage/mysql").unwrap();
    slurmdbd::dump(&config, &path, Default::default()).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "DbdHost=db-0\nStorageType=accounting_storage/mysql\n"
    );
}
