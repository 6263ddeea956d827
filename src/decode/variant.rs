//! Variant cross-references: semantic variants, Moji Jōhō serials, strange
//! classifications, and the Hanyu Da Zidian radical-break marker.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::location::{self, HanYuLocation};
use super::DecodeError;

/// A variant cross-reference to another character, with the dictionary
/// sources asserting the relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantRef {
    pub ucn: String,
    pub sources: Vec<VariantSource>,
}

/// One asserting source: field-style name plus optional T/B/Z flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSource {
    pub name: String,
    pub flags: Option<String>,
}

/// Decoded kMojiJoho value: the canonical serial plus any serial/variation
/// sequence pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MojiJoho {
    pub serial: String,
    pub variants: Vec<MojiJohoVariant>,
}

/// A serial registered for a specific variation sequence.
///
/// `standard` is set when the entry's serial equals the canonical one;
/// otherwise the entry is an alias registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MojiJohoVariant {
    pub serial: String,
    pub variation_sequence: String,
    pub standard: bool,
}

/// One kStrange entry: category tag plus optional sub-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrangeEntry {
    pub category: char,
    pub refs: Vec<String>,
}

/// Decoded kHDZRadBreak value: the radical heading a Hanyu Da Zidian
/// section break, its codepoint, and the break position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HdzRadBreak {
    pub radical: char,
    pub ucn: String,
    pub location: HanYuLocation,
}

/// Category tags admissible in kStrange.
const STRANGE_CATEGORIES: &str = "ABCFHIKMOPRSU";

static VARIANT_UCN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^U\+[0-9A-F]{4,6}$").unwrap());
static VARIANT_SOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(k[A-Za-z0-9_]+)(?::([TBZ]+))?$").unwrap());
static MOJI_SERIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^MJ[0-9]{6}$").unwrap());
static MOJI_VARIANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(MJ[0-9]{6}):(E01[0-9A-F]{2})$").unwrap());
static RAD_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.)\[(U\+2F[0-9A-F]{2})\]:(.+)$").unwrap());

pub(super) fn variant_ref(field: &str, token: &str) -> Result<VariantRef, DecodeError> {
    let (ucn, sources) = match token.split_once('<') {
        Some((ucn, rest)) => (ucn, Some(rest)),
        None => (token, None),
    };
    if !VARIANT_UCN.is_match(ucn) {
        return Err(DecodeError::grammar(field, token));
    }
    let sources = match sources {
        None => Vec::new(),
        Some(rest) => rest
            .split(',')
            .map(|part| {
                let caps = VARIANT_SOURCE
                    .captures(part)
                    .ok_or_else(|| DecodeError::grammar(field, token))?;
                Ok(VariantSource {
                    name: caps[1].to_string(),
                    flags: caps.get(2).map(|m| m.as_str().to_string()),
                })
            })
            .collect::<Result<_, _>>()?,
    };
    Ok(VariantRef {
        ucn: ucn.to_string(),
        sources,
    })
}

/// kMojiJoho: first token is the canonical serial; later tokens bind a
/// serial to a variation sequence and are compared against the canonical
/// serial to decide standard-vs-alias.
pub(super) fn moji_joho(field: &str, raw: &str) -> Result<MojiJoho, DecodeError> {
    let mut tokens = raw.split(' ');
    let serial = tokens.next().unwrap_or_default();
    if !MOJI_SERIAL.is_match(serial) {
        return Err(DecodeError::grammar(field, raw));
    }
    let variants = tokens
        .map(|token| {
            let caps = MOJI_VARIANT
                .captures(token)
                .ok_or_else(|| DecodeError::grammar(field, token))?;
            Ok(MojiJohoVariant {
                standard: &caps[1] == serial,
                serial: caps[1].to_string(),
                variation_sequence: caps[2].to_string(),
            })
        })
        .collect::<Result<_, _>>()?;
    Ok(MojiJoho {
        serial: serial.to_string(),
        variants,
    })
}

pub(super) fn strange(field: &str, token: &str) -> Result<StrangeEntry, DecodeError> {
    let mut parts = token.split(':');
    let tag = parts.next().unwrap_or_default();
    let mut chars = tag.chars();
    let (Some(category), None) = (chars.next(), chars.next()) else {
        return Err(DecodeError::grammar(field, token));
    };
    if !STRANGE_CATEGORIES.contains(category) {
        return Err(DecodeError::tag(field, token, category.to_string()));
    }
    let refs: Vec<String> = parts.map(str::to_string).collect();
    if refs.iter().any(|r| r.is_empty()) {
        return Err(DecodeError::grammar(field, token));
    }
    Ok(StrangeEntry { category, refs })
}

pub(super) fn hdz_rad_break(field: &str, raw: &str) -> Result<HdzRadBreak, DecodeError> {
    let caps = RAD_BREAK
        .captures(raw)
        .ok_or_else(|| DecodeError::grammar(field, raw))?;
    let radical = caps[1]
        .chars()
        .next()
        .ok_or_else(|| DecodeError::grammar(field, raw))?;
    Ok(HdzRadBreak {
        radical,
        ucn: caps[2].to_string(),
        location: location::han_yu(field, &caps[3])?,
    })
}
