//! Decode the Unihan character-property database into structured records.
//!
//! The database ships as tab-separated triples (codepoint, field, value)
//! spread across several text files. This crate merges the triples into one
//! record per character and unpacks each field's private micro-format
//! (positional dictionary codes, locale pairs, radical-stroke triples,
//! source references, …) into typed values.
//!
//! ```no_run
//! use unihan_d::{Manifest, Options, process};
//!
//! let manifest = Manifest::load_with_overrides().unwrap();
//! let options = Options::new("/tmp/unihan");
//! for record in process(&manifest, &options).unwrap() {
//!     println!("{} {}", record.ucn, record.character);
//! }
//! ```

mod loader;
mod manifest;
mod normalize;
mod shape;

pub mod decode;

use std::fmt;
use std::path::PathBuf;

pub use decode::{expand_field, has_decoder, DecodeError, FieldValue, DECODED_FIELDS};
pub use loader::{LoadError, RawTriple, TripleStream};
pub use manifest::{FieldFormat, Manifest, SourceConfig, UnknownFieldError};
pub use normalize::{char_to_ucn, normalize, ucn_to_char, CharacterRecord};
pub use shape::{field_order, prune, INDEX_FIELDS};

/// Any error the pipeline can surface.
#[derive(Debug)]
pub enum Error {
    /// A requested field is not supplied by any source file
    Manifest(UnknownFieldError),
    /// Reading or parsing a source file failed
    Load(LoadError),
    /// A field value failed its grammar
    Decode(DecodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Manifest(e) => e.fmt(f),
            Error::Load(e) => e.fmt(f),
            Error::Decode(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Manifest(e) => Some(e),
            Error::Load(e) => Some(e),
            Error::Decode(e) => Some(e),
        }
    }
}

impl From<UnknownFieldError> for Error {
    fn from(e: UnknownFieldError) -> Self {
        Error::Manifest(e)
    }
}

impl From<LoadError> for Error {
    fn from(e: LoadError) -> Self {
        Error::Load(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory holding the extracted `Unihan_*.txt` files.
    pub input_dir: PathBuf,
    /// Fields to load; `None` loads everything in the manifest.
    pub fields: Option<Vec<String>>,
    /// Run the field decoders after the merge.
    pub expand: bool,
    /// Drop absent/empty fields from each record.
    pub prune: bool,
}

impl Options {
    /// Options for `input_dir` with decoders on and pruning off.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Options {
            input_dir: input_dir.into(),
            fields: None,
            expand: true,
            prune: false,
        }
    }
}

/// Runs the full pipeline: load, merge, and (per `options`) expand and prune.
///
/// Only source files supplying at least one requested field are read, in
/// manifest order. Records come back in first-seen character order.
pub fn process(manifest: &Manifest, options: &Options) -> Result<Vec<CharacterRecord>, Error> {
    let fields = manifest.resolve_fields(options.fields.as_deref())?;
    let files = manifest.files_for_fields(&fields);
    tracing::debug!("{} fields across {} source files", fields.len(), files.len());

    let wanted = fields.iter().cloned().collect();
    let stream = TripleStream::in_dir(&options.input_dir, &files, wanted);
    let mut records = normalize(stream, &fields)?;

    if options.expand {
        expand(&mut records)?;
    }
    if options.prune {
        prune(&mut records);
    }
    Ok(records)
}

/// Decodes every present field of every record in place.
///
/// Fields already expanded are left alone, so the call is idempotent.
pub fn expand(records: &mut [CharacterRecord]) -> Result<(), DecodeError> {
    for record in records.iter_mut() {
        for (field, slot) in record.fields.iter_mut() {
            match slot.take() {
                Some(FieldValue::Scalar(raw)) => *slot = Some(expand_field(field, &raw)?),
                other => *slot = other,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
