//! Scoped editing of configuration files.
//!
//! The pattern mirrors a transaction: [`edit`] loads the file, hands a typed
//! config to a closure, and writes the result back atomically only when the
//! closure returns `Ok`. An error from the closure leaves the file untouched.

mod fs;

pub use fs::{FileAttrs, FileStore, LocalFs, MemFs, Owner};

use std::path::Path;

use tracing::debug;

use crate::errors::Error;
use crate::model::Document;
use crate::parser::{ParseOptions, Parser};
use crate::schema::Schema;
use crate::serializer;

/// A typed view over a [`Document`] for one configuration dialect.
///
/// Dialect wrappers implement this to plug into the generic load/dump/edit
/// machinery.
pub trait ConfigFile: Sized {
    /// Conventional file name, e.g. `slurm.conf`.
    const FILE_NAME: &'static str;

    /// Root schema of the dialect.
    fn schema() -> &'static Schema;

    /// Wrap a parsed document.
    fn from_document(doc: Document) -> Self;

    /// The underlying document.
    fn document(&self) -> &Document;

    /// The underlying document, mutable.
    fn document_mut(&mut self) -> &mut Document;
}

/// How [`dump`] and [`edit`] set permissions and ownership on write-back.
///
/// `None` fields preserve what the existing file has; for a new file they
/// fall back to platform defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Permission bits for the written file.
    pub mode: Option<u32>,
    /// Owner for the written file.
    pub owner: Option<Owner>,
}

/// Parse configuration text into a typed config.
///
/// `Include` directives are recorded but not resolved; there is no file
/// source to resolve them against.
pub fn loads<C: ConfigFile>(text: &str, opts: ParseOptions) -> Result<C, Error> {
    let mut parser = Parser::new(C::schema(), opts);
    Ok(C::from_document(parser.parse_str(text)?))
}

/// Load a typed config from `path`, resolving includes through `store`.
pub fn load<C: ConfigFile>(
    store: &dyn FileStore,
    path: &Path,
    opts: ParseOptions,
) -> Result<C, Error> {
    debug!(file = C::FILE_NAME, path = %path.display(), "loading config");
    let mut parser = Parser::with_store(C::schema(), opts, store);
    Ok(C::from_document(parser.parse_file(path)?))
}

/// Render a typed config to configuration text.
pub fn dumps<C: ConfigFile>(config: &C) -> String {
    serializer::dumps(config.document())
}

/// Write a typed config to `path` atomically.
///
/// Permission bits and ownership come from `opts`, falling back to the
/// existing file's attributes when unset.
pub fn dump<C: ConfigFile>(
    store: &dyn FileStore,
    path: &Path,
    config: &C,
    opts: DumpOptions,
) -> Result<(), Error> {
    let attrs = resolve_attrs(store, path, opts)?;
    debug!(file = C::FILE_NAME, path = %path.display(), "writing config");
    store.write_atomic(path, dumps(config).as_bytes(), attrs)?;
    Ok(())
}

/// Load, mutate, and write back in one scope.
///
/// A missing file edits as an empty document, so a first edit can create the
/// file. The write happens only when `apply` returns `Ok`; any error aborts
/// the session with the file untouched.
pub fn edit<C, F>(
    store: &dyn FileStore,
    path: &Path,
    parse: ParseOptions,
    dump_opts: DumpOptions,
    apply: F,
) -> Result<C, Error>
where
    C: ConfigFile,
    F: FnOnce(&mut C) -> Result<(), Error>,
{
    let mut config = match load::<C>(store, path, parse) {
        Ok(config) => config,
        Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(file = C::FILE_NAME, path = %path.display(), "editing absent file as empty");
            C::from_document(Document::new(C::schema()))
        }
        Err(err) => return Err(err),
    };

    apply(&mut config)?;
    dump(store, path, &config, dump_opts)?;
    Ok(config)
}

fn resolve_attrs(
    store: &dyn FileStore,
    path: &Path,
    opts: DumpOptions,
) -> Result<FileAttrs, Error> {
    if opts.mode.is_some() && opts.owner.is_some() {
        return Ok(FileAttrs {
            mode: opts.mode,
            owner: opts.owner,
        });
    }

    let existing = match store.attrs(path) {
        Ok(attrs) => attrs,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => FileAttrs::default(),
        Err(err) => return Err(err.into()),
    };

    Ok(FileAttrs {
        mode: opts.mode.or(existing.mode),
        owner: opts.owner.or(existing.owner),
    })
}
