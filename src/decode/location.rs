//! Positional dictionary-location grammars.
//!
//! Classical dictionaries reference a character by packed digit groups whose
//! widths are fixed per dictionary. Digit groups parse as plain integers, so
//! `0019` decodes to page 19.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::DecodeError;

/// Hanyu Da Zidian position: `volume page(4) . character(2) virtual(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HanYuLocation {
    pub volume: u8,
    pub page: u32,
    pub character: u8,
    pub r#virtual: u8,
}

/// KangXi-convention position: `page(4) . character(2) virtual(1)`.
///
/// Shared by kKangXi, kIRGKangXi, kDaeJaweon and kIRGDaeJaweon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KangXiLocation {
    pub page: u32,
    pub character: u8,
    pub r#virtual: u8,
}

/// Xiandai Hanyu Cidian (1983) position, with the `*` substitution marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Xhc1983Location {
    pub page: u32,
    pub position: u8,
    pub entry_type: u8,
    pub substituted: bool,
}

/// Tongyong Guifan Hanzi Zidian (2013) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tghz2013Location {
    pub page: u32,
    pub position: u32,
}

/// Cihai (Taiwan edition) position: `page . row position(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CihaiLocation {
    pub page: u32,
    pub row: u8,
    pub position: u8,
}

/// Song Ben Guang Yun position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SbgyLocation {
    pub page: u32,
    pub character: u8,
}

/// Plain `page.position` reference (kCheungBauerIndex, kFennIndex,
/// kSMSZD2003Index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: u32,
    pub position: u8,
}

static HAN_YU: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([1-8])([0-9]{4})\.([0-9]{2})([0-3])$").unwrap());
static KANG_XI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{4})\.([0-9]{2})([01])$").unwrap());
static XHC1983: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,4})\.([0-9]{2})([0-9])(\*?)$").unwrap());
static TGHZ2013: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{3})\.([0-9]{3})$").unwrap());
static CIHAI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([1-9][0-9]{0,3})\.([0-9])([0-9]{2})$").unwrap());
static SBGY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{3})\.([0-9]{2})$").unwrap());
static PAGE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{1,4})\.([0-9]{2})$").unwrap());

fn num<T: std::str::FromStr>(field: &str, token: &str, digits: &str) -> Result<T, DecodeError> {
    digits
        .parse()
        .map_err(|_| DecodeError::grammar(field, token))
}

pub(super) fn han_yu(field: &str, token: &str) -> Result<HanYuLocation, DecodeError> {
    let caps = HAN_YU
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(HanYuLocation {
        volume: num(field, token, &caps[1])?,
        page: num(field, token, &caps[2])?,
        character: num(field, token, &caps[3])?,
        r#virtual: num(field, token, &caps[4])?,
    })
}

pub(super) fn kang_xi(field: &str, token: &str) -> Result<KangXiLocation, DecodeError> {
    let caps = KANG_XI
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(KangXiLocation {
        page: num(field, token, &caps[1])?,
        character: num(field, token, &caps[2])?,
        r#virtual: num(field, token, &caps[3])?,
    })
}

pub(super) fn xhc1983(field: &str, token: &str) -> Result<Xhc1983Location, DecodeError> {
    let caps = XHC1983
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(Xhc1983Location {
        page: num(field, token, &caps[1])?,
        position: num(field, token, &caps[2])?,
        entry_type: num(field, token, &caps[3])?,
        substituted: &caps[4] == "*",
    })
}

pub(super) fn tghz2013(field: &str, token: &str) -> Result<Tghz2013Location, DecodeError> {
    let caps = TGHZ2013
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(Tghz2013Location {
        page: num(field, token, &caps[1])?,
        position: num(field, token, &caps[2])?,
    })
}

pub(super) fn cihai(field: &str, token: &str) -> Result<CihaiLocation, DecodeError> {
    let caps = CIHAI
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(CihaiLocation {
        page: num(field, token, &caps[1])?,
        row: num(field, token, &caps[2])?,
        position: num(field, token, &caps[3])?,
    })
}

pub(super) fn sbgy(field: &str, token: &str) -> Result<SbgyLocation, DecodeError> {
    let caps = SBGY
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(SbgyLocation {
        page: num(field, token, &caps[1])?,
        character: num(field, token, &caps[2])?,
    })
}

pub(super) fn page_ref(field: &str, token: &str) -> Result<PageRef, DecodeError> {
    let caps = PAGE_REF
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(PageRef {
        page: num(field, token, &caps[1])?,
        position: num(field, token, &caps[2])?,
    })
}
