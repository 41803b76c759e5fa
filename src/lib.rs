//! slurmcfg - typed models and round-trip editors for Slurm configuration files
//!
//! Parses the key-value configuration dialects used by the Slurm workload
//! manager (`slurm.conf`, `slurmdbd.conf`, `cgroup.conf`, `gres.conf`,
//! `acct_gather.conf`, `oci.conf`) into typed documents, lets callers mutate
//! them through a schema-checked record API, and serializes them back without
//! losing content that was already in the file.
//!
//! ```no_run
//! use slurmcfg::dialects::slurm;
//!
//! let mut config = slurm::load("/etc/slurm/slurm.conf")?;
//! config.set("max_job_count", 20_000i64)?;
//! slurm::dump(&config, "/etc/slurm/slurm.conf", Default::default())?;
//! # Ok::<(), slurmcfg::Error>(())
//! ```

pub mod dialects;
pub mod editor;
pub mod errors;
pub mod model;
pub mod parser;
pub mod schema;
pub mod serializer;

pub use editor::{ConfigFile, DumpOptions, FileAttrs, FileStore, LocalFs, MemFs, Owner};
pub use errors::Error;
pub use model::{Document, Limit, Record, RecordList, RecordMap, Value};
pub use parser::ParseOptions;
pub use schema::{FieldDef, FieldKind, FieldShape, Schema};
