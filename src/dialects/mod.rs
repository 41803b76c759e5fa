//! Typed wrappers for each supported configuration file.
//!
//! Every dialect module exposes the same surface: a config struct wrapping a
//! [`Document`](crate::model::Document), plus module-level `load`, `loads`,
//! `dump`, `dumps`, and `edit` functions. The schema tables live here as
//! static data; all parsing, validation, and rendering behavior comes from
//! the shared engine.

pub mod acct_gather;
pub mod cgroup;
pub mod gres;
pub mod oci;
pub mod slurm;
pub mod slurmdbd;

pub use acct_gather::AcctGatherConfig;
pub use cgroup::CgroupConfig;
pub use gres::GresConfig;
pub use oci::OciConfig;
pub use slurm::SlurmConfig;
pub use slurmdbd::SlurmdbdConfig;

/// Generates the config wrapper and file-level API of one dialect module.
///
/// Expects `schema()` to be in scope in the invoking module.
macro_rules! dialect_file {
    ($(#[$meta:meta])* $name:ident, $file:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            doc: $crate::model::Document,
        }

        impl $name {
            /// Empty configuration with no directives set.
            pub fn new() -> Self {
                Self {
                    doc: $crate::model::Document::new(schema()),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::editor::ConfigFile for $name {
            const FILE_NAME: &'static str = $file;

            fn schema() -> &'static $crate::schema::Schema {
                schema()
            }

            fn from_document(doc: $crate::model::Document) -> Self {
                Self { doc }
            }

            fn document(&self) -> &$crate::model::Document {
                &self.doc
            }

            fn document_mut(&mut self) -> &mut $crate::model::Document {
                &mut self.doc
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::model::Document;

            fn deref(&self) -> &$crate::model::Document {
                &self.doc
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut $crate::model::Document {
                &mut self.doc
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.doc, serializer)
            }
        }

        /// Parse configuration text. `Include` directives are recorded but
        /// not resolved.
        pub fn loads(text: &str) -> Result<$name, $crate::errors::Error> {
            $crate::editor::loads(text, $crate::parser::ParseOptions::default())
        }

        /// Load the configuration from disk, resolving includes relative to
        /// the file's directory.
        pub fn load(path: impl AsRef<std::path::Path>) -> Result<$name, $crate::errors::Error> {
            $crate::editor::load(
                &$crate::editor::LocalFs::new(),
                path.as_ref(),
                $crate::parser::ParseOptions::default(),
            )
        }

        /// Render the configuration to text.
        pub fn dumps(config: &$name) -> String {
            $crate::editor::dumps(config)
        }

        /// Write the configuration to disk atomically.
        pub fn dump(
            config: &$name,
            path: impl AsRef<std::path::Path>,
            opts: $crate::editor::DumpOptions,
        ) -> Result<(), $crate::errors::Error> {
            $crate::editor::dump(&$crate::editor::LocalFs::new(), path.as_ref(), config, opts)
        }

        /// Load, hand the config to `apply`, and write back only when it
        /// returns `Ok`. A missing file edits as an empty configuration.
        pub fn edit<F>(
            path: impl AsRef<std::path::Path>,
            apply: F,
        ) -> Result<$name, $crate::errors::Error>
        where
            F: FnOnce(&mut $name) -> Result<(), $crate::errors::Error>,
        {
            $crate::editor::edit(
                &$crate::editor::LocalFs::new(),
                path.as_ref(),
                $crate::parser::ParseOptions::default(),
                $crate::editor::DumpOptions::default(),
                apply,
            )
        }
    };
}

pub(crate) use dialect_file;
