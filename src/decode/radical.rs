//! Radical-stroke grammars, core-set membership, and alternate stroke counts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::DecodeError;

/// KangXi radical number plus residual stroke count.
///
/// `simplified` is set when the radical number carries an apostrophe marker
/// (simplified-form radical). Residual strokes can be negative in the
/// published data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadicalStrokeCount {
    pub radical: u32,
    pub strokes: i32,
    pub simplified: bool,
}

/// Adobe-Japan1-6 glyph reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdobeJapanRef {
    /// `C` for a standard CID mapping, `V` for a variant glyph.
    #[serde(rename = "type")]
    pub kind: char,
    pub cid: u32,
    pub radical: u32,
    pub strokes: u32,
    pub strokes_residue: u32,
}

/// One kCheungBauer entry: radical/strokes, optional Cangjie input code,
/// and Cantonese readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheungBauerEntry {
    pub radical: u32,
    pub strokes: u32,
    pub cangjie: Option<String>,
    pub readings: Vec<String>,
}

/// One kAlternateTotalStrokes entry.
///
/// `strokes` is absent for the `-` sentinel ("no reliable count"); `sources`
/// holds one letter per contributing IRG source, or the sentinel itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateStrokeCount {
    pub strokes: Option<u32>,
    pub sources: Vec<String>,
}

/// IRG source letters admissible in kAlternateTotalStrokes.
const ALTERNATE_STROKE_SOURCES: &str = "BJKMPSUV";

/// Source letters admissible in kUnihanCore2020.
const CORE_2020_SOURCES: &str = "GHJKMPT";

static RADICAL_STROKES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([1-9][0-9]{0,2})('{0,2})\.(-?[0-9]{1,2})$").unwrap());
static ADOBE_JAPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([CV])\+([0-9]{1,5})\+([1-9][0-9]{0,2})\.([1-9][0-9]?)\.([0-9]{1,2})$").unwrap()
});
static CHEUNG_BAUER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{3})/([0-9]{2});([A-Z]*);(.+)$").unwrap());
static ALTERNATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+):([A-Z]+)$").unwrap());

fn num<T: std::str::FromStr>(field: &str, token: &str, digits: &str) -> Result<T, DecodeError> {
    digits
        .parse()
        .map_err(|_| DecodeError::grammar(field, token))
}

pub(super) fn radical_strokes(field: &str, token: &str) -> Result<RadicalStrokeCount, DecodeError> {
    let caps = RADICAL_STROKES
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(RadicalStrokeCount {
        radical: num(field, token, &caps[1])?,
        strokes: num(field, token, &caps[3])?,
        simplified: !caps[2].is_empty(),
    })
}

pub(super) fn adobe_japan(field: &str, token: &str) -> Result<AdobeJapanRef, DecodeError> {
    let caps = ADOBE_JAPAN
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(AdobeJapanRef {
        kind: caps[1]
            .chars()
            .next()
            .ok_or_else(|| DecodeError::grammar(field, token))?,
        cid: num(field, token, &caps[2])?,
        radical: num(field, token, &caps[3])?,
        strokes: num(field, token, &caps[4])?,
        strokes_residue: num(field, token, &caps[5])?,
    })
}

pub(super) fn cheung_bauer(field: &str, token: &str) -> Result<CheungBauerEntry, DecodeError> {
    let caps = CHEUNG_BAUER
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    let cangjie = &caps[3];
    Ok(CheungBauerEntry {
        radical: num(field, token, &caps[1])?,
        strokes: num(field, token, &caps[2])?,
        cangjie: (!cangjie.is_empty()).then(|| cangjie.to_string()),
        readings: caps[4].split(',').map(str::to_string).collect(),
    })
}

/// kUnihanCore2020: letters from a fixed alphabet, packed with no delimiter.
pub(super) fn core_set(field: &str, raw: &str) -> Result<Vec<String>, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::grammar(field, raw));
    }
    raw.chars()
        .map(|letter| {
            if CORE_2020_SOURCES.contains(letter) {
                Ok(letter.to_string())
            } else {
                Err(DecodeError::tag(field, raw, letter.to_string()))
            }
        })
        .collect()
}

pub(super) fn alternate_strokes(
    field: &str,
    token: &str,
) -> Result<AlternateStrokeCount, DecodeError> {
    if token == "-" {
        return Ok(AlternateStrokeCount {
            strokes: None,
            sources: vec!["-".to_string()],
        });
    }
    let caps = ALTERNATE
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    let sources = caps[2]
        .chars()
        .map(|letter| {
            if ALTERNATE_STROKE_SOURCES.contains(letter) {
                Ok(letter.to_string())
            } else {
                Err(DecodeError::tag(field, token, letter.to_string()))
            }
        })
        .collect::<Result<_, _>>()?;
    Ok(AlternateStrokeCount {
        strokes: Some(num(field, token, &caps[1])?),
        sources,
    })
}
