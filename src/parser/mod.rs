//! Parser for the Slurm key-value configuration grammar.
//!
//! Works as a state machine over logical lines: assemble (continuations,
//! comments), tokenize (quote-aware `Key=Value` splitting), then classify
//! each line as an `Include` directive, a nested block (a line whose leading
//! key names a nested-model collection), or top-level scalar directives.
//! Included files are parsed recursively through the [`FileStore`] and
//! merged into the same document with provenance, so serialization can
//! reproduce the `Include` lines instead of inlining their content.

mod errors;
mod lines;

pub use errors::{ParseError, ParseResult};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::editor::FileStore;
use crate::errors::Error;
use crate::model::Document;
use crate::schema::{FieldDef, FieldShape, Schema, ValidationError};

use lines::{logical_lines, split_tokens, LogicalLine};

/// Pseudo-path reported in errors for in-memory sources.
const STRING_SOURCE: &str = "<string>";

/// Unknown-key policy for a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on keys the schema does not declare. The default (lenient)
    /// preserves unrecognized pairs opaquely so they round-trip.
    pub strict: bool,
}

impl ParseOptions {
    /// Lenient parsing: unknown keys are preserved, not rejected.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Strict parsing: unknown keys fail with [`ParseError::UnknownKey`].
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Configuration parser for one schema.
pub struct Parser<'a> {
    schema: &'static Schema,
    opts: ParseOptions,
    store: Option<&'a dyn FileStore>,
    stack: Vec<PathBuf>,
}

impl<'a> Parser<'a> {
    /// Parser for in-memory text. `Include` directives are recorded on the
    /// document but not resolved, since there is no file store to read
    /// them from.
    pub fn new(schema: &'static Schema, opts: ParseOptions) -> Self {
        Self {
            schema,
            opts,
            store: None,
            stack: Vec::new(),
        }
    }

    /// Parser that resolves `Include` directives through `store`.
    pub fn with_store(
        schema: &'static Schema,
        opts: ParseOptions,
        store: &'a dyn FileStore,
    ) -> Self {
        Self {
            schema,
            opts,
            store: Some(store),
            stack: Vec::new(),
        }
    }

    /// Parse configuration text into a document.
    pub fn parse_str(&mut self, text: &str) -> Result<Document, Error> {
        let mut doc = Document::new(self.schema);
        self.parse_into(&mut doc, text, None, false)?;
        Ok(doc)
    }

    /// Parse the file at `path` into a document, resolving includes.
    pub fn parse_file(&mut self, path: &Path) -> Result<Document, Error> {
        let Some(store) = self.store else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "parse_file requires a parser constructed with a file store",
            )
            .into());
        };

        debug!(schema = self.schema.name(), path = %path.display(), "parsing file");
        let text = read_text(store, path)?;
        let mut doc = Document::new(self.schema);
        self.stack.push(path.to_path_buf());
        let result = self.parse_into(&mut doc, &text, Some(path), false);
        self.stack.pop();
        result?;
        Ok(doc)
    }

    fn parse_into(
        &mut self,
        doc: &mut Document,
        text: &str,
        origin: Option<&Path>,
        from_include: bool,
    ) -> Result<(), Error> {
        let path_str = origin
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| STRING_SOURCE.to_string());

        for line in logical_lines(text) {
            let tokens = split_tokens(&line.text);
            let first = &tokens[0];
            let first_key = first.split_once('=').map(|(k, _)| k).unwrap_or(first);

            if first_key.eq_ignore_ascii_case("include") {
                self.handle_include(doc, &tokens, &line, origin, &path_str, from_include)?;
                continue;
            }

            if first.split_once('=').is_none() {
                return Err(self.unparseable(&path_str, &line).into());
            }

            match self.schema.field_by_wire(first_key) {
                Some(def)
                    if matches!(
                        def.shape,
                        FieldShape::ModelList(_) | FieldShape::ModelMap(_)
                    ) =>
                {
                    let def = *def;
                    self.parse_block(doc, &def, &tokens, &line, &path_str, from_include)?;
                }
                Some(_) => {
                    self.parse_directives(doc, &tokens, &line, &path_str, from_include)?;
                }
                None if self.opts.strict => {
                    return Err(ParseError::UnknownKey {
                        path: path_str,
                        line: line.number,
                        key: first_key.to_string(),
                    }
                    .into());
                }
                None => {
                    // Preserve the whole logical line as one opaque pair so
                    // an unrecognized block survives with its structure.
                    let raw = line.text[first_key.len() + 1..].to_string();
                    doc.record_mut()
                        .push_unknown(first_key.to_string(), raw, from_include);
                }
            }
        }
        Ok(())
    }

    /// Top-level scalar directives; one line may carry several.
    fn parse_directives(
        &mut self,
        doc: &mut Document,
        tokens: &[String],
        line: &LogicalLine,
        path: &str,
        from_include: bool,
    ) -> Result<(), Error> {
        for token in tokens {
            let Some((key, value)) = token.split_once('=') else {
                return Err(self.unparseable(path, line).into());
            };
            match self.schema.field_by_wire(key) {
                Some(def) => {
                    let def = *def;
                    doc.record_mut()
                        .apply_wire(&def, value, from_include)
                        .map_err(|source| self.validation(path, line, source))?;
                }
                None if self.opts.strict => {
                    return Err(ParseError::UnknownKey {
                        path: path.to_string(),
                        line: line.number,
                        key: key.to_string(),
                    }
                    .into());
                }
                None => {
                    doc.record_mut().push_unknown(
                        key.to_string(),
                        value.to_string(),
                        from_include,
                    );
                }
            }
        }
        Ok(())
    }

    /// A line whose leading key starts a nested block. Every `Key=Value`
    /// token on the line attaches to the new record; a repeated block key on
    /// a later line starts a sibling, never merges.
    fn parse_block(
        &mut self,
        doc: &mut Document,
        def: &FieldDef,
        tokens: &[String],
        line: &LogicalLine,
        path: &str,
        from_include: bool,
    ) -> Result<(), Error> {
        let nested = match def.shape {
            FieldShape::ModelList(nested) | FieldShape::ModelMap(nested) => nested(),
            _ => unreachable!("parse_block called for a non-nested field"),
        };

        let mut record = crate::model::Record::new(nested);
        for token in tokens {
            let Some((key, value)) = token.split_once('=') else {
                return Err(self.unparseable(path, line).into());
            };
            match nested.field_by_wire(key) {
                Some(fdef) => {
                    let fdef = *fdef;
                    record
                        .apply_wire(&fdef, value, false)
                        .map_err(|source| self.validation(path, line, source))?;
                }
                None if self.opts.strict => {
                    return Err(ParseError::UnknownKey {
                        path: path.to_string(),
                        line: line.number,
                        key: key.to_string(),
                    }
                    .into());
                }
                None => record.push_unknown(key.to_string(), value.to_string(), false),
            }
        }
        if from_include {
            record.mark_block_include();
        }

        match def.shape {
            FieldShape::ModelList(_) => {
                doc.record_mut()
                    .records_mut(def.name)?
                    .push(record)
                    .map_err(|source| self.validation(path, line, source))?;
            }
            _ => {
                doc.record_mut()
                    .record_map_mut(def.name)?
                    .insert(record)
                    .map_err(|source| self.validation(path, line, source))?;
            }
        }
        Ok(())
    }

    fn handle_include(
        &mut self,
        doc: &mut Document,
        tokens: &[String],
        line: &LogicalLine,
        origin: Option<&Path>,
        path: &str,
        from_include: bool,
    ) -> Result<(), Error> {
        let target = match tokens[0].split_once('=') {
            Some((_, value)) if tokens.len() == 1 => value,
            None if tokens.len() == 2 => tokens[1].as_str(),
            _ => return Err(self.unparseable(path, line).into()),
        };
        let target = target.trim_matches('"').to_string();

        doc.push_include(target.clone(), from_include);
        if self.store.is_some() {
            self.resolve_include(doc, &target, origin, line, path)?;
        }
        Ok(())
    }

    fn resolve_include(
        &mut self,
        doc: &mut Document,
        target: &str,
        origin: Option<&Path>,
        line: &LogicalLine,
        path: &str,
    ) -> Result<(), Error> {
        let Some(store) = self.store else {
            return Ok(());
        };

        let target_path = Path::new(target);
        let resolved = if target_path.is_absolute() {
            target_path.to_path_buf()
        } else {
            match origin.and_then(Path::parent) {
                Some(dir) => dir.join(target_path),
                None => target_path.to_path_buf(),
            }
        };

        if self.stack.contains(&resolved) {
            return Err(ParseError::CyclicInclude {
                path: path.to_string(),
                line: line.number,
                target: target.to_string(),
            }
            .into());
        }

        let text = match read_text(store, &resolved) {
            Ok(text) => text,
            Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ParseError::MissingIncludeFile {
                    path: path.to_string(),
                    line: line.number,
                    target: target.to_string(),
                }
                .into());
            }
            Err(err) => return Err(err),
        };

        debug!(target = %resolved.display(), from = path, "resolving include");
        self.stack.push(resolved.clone());
        let result = self.parse_into(doc, &text, Some(&resolved), true);
        self.stack.pop();
        result
    }

    fn unparseable(&self, path: &str, line: &LogicalLine) -> ParseError {
        ParseError::UnparseableLine {
            path: path.to_string(),
            line: line.number,
            text: line.text.clone(),
        }
    }

    fn validation(&self, path: &str, line: &LogicalLine, source: ValidationError) -> Error {
        ParseError::Validation {
            path: path.to_string(),
            line: line.number,
            source,
        }
        .into()
    }
}

fn read_text(store: &dyn FileStore, path: &Path) -> Result<String, Error> {
    let bytes = store.read(path)?;
    String::from_utf8(bytes).map_err(|_| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}: configuration is not valid UTF-8", path.display()),
        ))
    })
}
