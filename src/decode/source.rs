//! IRG source references and Karlgren (GSR) index entries.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::DecodeError;

/// An IRG source reference: source code plus optional location suffix.
///
/// `GKX-0075.01` splits into source `GKX` and location `0075.01`; a bare
/// code like `G4K` has no location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub source: String,
    pub location: Option<String>,
}

/// One kGSR entry: Grammata Serica Recensa set, letter, and prime marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GsrEntry {
    pub set: u32,
    pub letter: char,
    pub apostrophe: bool,
}

/// One kIICore entry: priority class plus contributing source letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IICoreEntry {
    pub priority: char,
    pub sources: Vec<String>,
}

/// Source letters admissible in kIICore.
const IICORE_SOURCES: &str = "GHJKMPT";

static SOURCE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][0-9A-Z]*)(?:-([0-9A-Za-z.]+))?$").unwrap());
static GSR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{4})([a-vx-z])('?)$").unwrap());
static IICORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ABC])([A-Z]+)$").unwrap());

pub(super) fn source_ref(field: &str, token: &str) -> Result<SourceRef, DecodeError> {
    let caps = SOURCE_REF
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(SourceRef {
        source: caps[1].to_string(),
        location: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

pub(super) fn gsr(field: &str, token: &str) -> Result<GsrEntry, DecodeError> {
    let caps = GSR
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(GsrEntry {
        set: caps[1]
            .parse()
            .map_err(|_| DecodeError::grammar(field, token))?,
        letter: caps[2]
            .chars()
            .next()
            .ok_or_else(|| DecodeError::grammar(field, token))?,
        apostrophe: &caps[3] == "'",
    })
}

pub(super) fn iicore(field: &str, token: &str) -> Result<IICoreEntry, DecodeError> {
    let caps = IICORE
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    let sources = caps[2]
        .chars()
        .map(|letter| {
            if IICORE_SOURCES.contains(letter) {
                Ok(letter.to_string())
            } else {
                Err(DecodeError::tag(field, token, letter.to_string()))
            }
        })
        .collect::<Result<_, _>>()?;
    Ok(IICoreEntry {
        priority: caps[1]
            .chars()
            .next()
            .ok_or_else(|| DecodeError::grammar(field, token))?,
        sources,
    })
}
