//! Field decoder registry.
//!
//! Each Unihan field packs its value into a private micro-format: positional
//! dictionary codes, locale pairs, radical-stroke triples, source references
//! with optional suffixes, and so on. This module owns the registry that maps
//! a field name to its decoder and the [`FieldValue`] shapes decoders produce.
//!
//! Dispatch is a single `match` over field names, so decoder presence is a
//! compile-time fact (see [`decoded_fields`]); there is no dynamic lookup and
//! no silent fallback for a registered decoder that fails. Unregistered
//! fields pass through pre-splitting only.

mod location;
mod radical;
mod readings;
mod source;
mod variant;

use std::fmt;

use serde::Serialize;

use crate::manifest::FieldFormat;

pub use location::{
    CihaiLocation, HanYuLocation, KangXiLocation, PageRef, SbgyLocation, Tghz2013Location,
    Xhc1983Location,
};
pub use radical::{AdobeJapanRef, AlternateStrokeCount, CheungBauerEntry, RadicalStrokeCount};
pub use readings::{FennEntry, LocalePair, PinluReading, PinyinEntry, Tghz2013Entry, Xhc1983Entry};
pub use source::{GsrEntry, IICoreEntry, SourceRef};
pub use variant::{HdzRadBreak, MojiJoho, MojiJohoVariant, StrangeEntry, VariantRef, VariantSource};

/// Errors that can occur while decoding a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A codepoint notation could not be resolved to a Unicode scalar value
    BadCodepoint { notation: String },
    /// A token failed its field's anchored grammar
    GrammarMismatch { field: String, token: String },
    /// A tag inside a validated enumeration is outside the closed set
    InvalidTag {
        field: String,
        token: String,
        tag: String,
    },
}

impl DecodeError {
    /// Create a GrammarMismatch error for a token
    pub fn grammar(field: &str, token: &str) -> Self {
        DecodeError::GrammarMismatch {
            field: field.to_string(),
            token: token.to_string(),
        }
    }

    /// Create an InvalidTag error for a closed-set violation
    pub fn tag(field: &str, token: &str, tag: impl Into<String>) -> Self {
        DecodeError::InvalidTag {
            field: field.to_string(),
            token: token.to_string(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::BadCodepoint { notation } => {
                write!(f, "invalid codepoint notation '{}'", notation)
            }
            DecodeError::GrammarMismatch { field, token } => {
                write!(f, "{}: token '{}' does not match the field grammar", field, token)
            }
            DecodeError::InvalidTag { field, token, tag } => {
                write!(f, "{}: invalid tag '{}' in token '{}'", field, tag, token)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// A decoded field value.
///
/// One variant per decoder output shape, plus the two pass-through shapes
/// (`Scalar`, `List`) for fields with no registered decoder. Serializes
/// untagged, so exported records read as plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Raw value of a scalar field, unchanged.
    Scalar(String),
    /// Pre-split value of a list field with no registered decoder,
    /// and the kDefinition segment list.
    List(Vec<String>),
    /// kMandarin
    Mandarin(LocalePair<String>),
    /// kTotalStrokes
    TotalStrokes(LocalePair<u32>),
    /// kHanyuPinyin
    HanyuPinyin(Vec<PinyinEntry>),
    /// kHanYu, kIRGHanyuDaZidian
    HanYu(Vec<HanYuLocation>),
    /// kKangXi, kIRGKangXi, kDaeJaweon, kIRGDaeJaweon
    KangXi(Vec<KangXiLocation>),
    /// kXHC1983
    Xhc1983(Vec<Xhc1983Entry>),
    /// kTGHZ2013
    Tghz2013(Vec<Tghz2013Entry>),
    /// kCihaiT
    CihaiT(Vec<CihaiLocation>),
    /// kSBGY
    Sbgy(Vec<SbgyLocation>),
    /// kCheungBauerIndex, kFennIndex, kSMSZD2003Index
    PageRefs(Vec<PageRef>),
    /// kCheungBauer
    CheungBauer(Vec<CheungBauerEntry>),
    /// kFenn
    Fenn(Vec<FennEntry>),
    /// kHanyuPinlu
    HanyuPinlu(Vec<PinluReading>),
    /// kRSUnicode, kRSJapanese, kRSKangXi, kRSKanWa, kRSKorean
    RadicalStrokes(Vec<RadicalStrokeCount>),
    /// kRSAdobe_Japan1_6
    AdobeJapan(Vec<AdobeJapanRef>),
    /// kIRG_GSource through kIRG_VSource
    Sources(Vec<SourceRef>),
    /// kGSR
    Gsr(Vec<GsrEntry>),
    /// kIICore
    IICore(Vec<IICoreEntry>),
    /// kUnihanCore2020
    CoreSet(Vec<String>),
    /// kAlternateTotalStrokes
    AlternateStrokes(Vec<AlternateStrokeCount>),
    /// kStrange
    Strange(Vec<StrangeEntry>),
    /// kSemanticVariant, kSpecializedSemanticVariant, kZVariant
    Variants(Vec<VariantRef>),
    /// kMojiJoho
    MojiJoho(MojiJoho),
    /// kHDZRadBreak
    RadBreak(HdzRadBreak),
}

impl FieldValue {
    /// Whether this value carries no data and should be dropped by pruning.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => s.is_empty(),
            FieldValue::List(v) => v.is_empty(),
            FieldValue::HanyuPinyin(v) => v.is_empty(),
            FieldValue::HanYu(v) => v.is_empty(),
            FieldValue::KangXi(v) => v.is_empty(),
            FieldValue::Xhc1983(v) => v.is_empty(),
            FieldValue::Tghz2013(v) => v.is_empty(),
            FieldValue::CihaiT(v) => v.is_empty(),
            FieldValue::Sbgy(v) => v.is_empty(),
            FieldValue::PageRefs(v) => v.is_empty(),
            FieldValue::CheungBauer(v) => v.is_empty(),
            FieldValue::Fenn(v) => v.is_empty(),
            FieldValue::HanyuPinlu(v) => v.is_empty(),
            FieldValue::RadicalStrokes(v) => v.is_empty(),
            FieldValue::AdobeJapan(v) => v.is_empty(),
            FieldValue::Sources(v) => v.is_empty(),
            FieldValue::Gsr(v) => v.is_empty(),
            FieldValue::IICore(v) => v.is_empty(),
            FieldValue::CoreSet(v) => v.is_empty(),
            FieldValue::AlternateStrokes(v) => v.is_empty(),
            FieldValue::Strange(v) => v.is_empty(),
            FieldValue::Variants(v) => v.is_empty(),
            FieldValue::Mandarin(_)
            | FieldValue::TotalStrokes(_)
            | FieldValue::MojiJoho(_)
            | FieldValue::RadBreak(_) => false,
        }
    }
}

/// Field names with a registered decoder, in registry order.
pub const DECODED_FIELDS: &[&str] = &[
    "kDefinition",
    "kMandarin",
    "kTotalStrokes",
    "kHanyuPinyin",
    "kHanYu",
    "kIRGHanyuDaZidian",
    "kKangXi",
    "kIRGKangXi",
    "kDaeJaweon",
    "kIRGDaeJaweon",
    "kXHC1983",
    "kTGHZ2013",
    "kCihaiT",
    "kSBGY",
    "kCheungBauerIndex",
    "kFennIndex",
    "kSMSZD2003Index",
    "kCheungBauer",
    "kFenn",
    "kHanyuPinlu",
    "kRSUnicode",
    "kRSJapanese",
    "kRSKangXi",
    "kRSKanWa",
    "kRSKorean",
    "kRSAdobe_Japan1_6",
    "kIRG_GSource",
    "kIRG_HSource",
    "kIRG_JSource",
    "kIRG_KPSource",
    "kIRG_KSource",
    "kIRG_MSource",
    "kIRG_SSource",
    "kIRG_TSource",
    "kIRG_UKSource",
    "kIRG_USource",
    "kIRG_VSource",
    "kGSR",
    "kIICore",
    "kUnihanCore2020",
    "kAlternateTotalStrokes",
    "kStrange",
    "kSemanticVariant",
    "kSpecializedSemanticVariant",
    "kZVariant",
    "kMojiJoho",
    "kHDZRadBreak",
];

/// Whether `field` has a registered decoder.
pub fn has_decoder(field: &str) -> bool {
    DECODED_FIELDS.contains(&field)
}

/// Decodes one field's raw value into its structured form.
///
/// Pre-splits according to the field's [`FieldFormat`], then dispatches to
/// the field's decoder. Fields without a decoder return the pre-split value
/// unchanged. A token that fails its grammar is a hard error; nothing is
/// silently dropped.
pub fn expand_field(field: &str, raw: &str) -> Result<FieldValue, DecodeError> {
    match field {
        "kDefinition" => Ok(FieldValue::List(split_semicolons(raw))),
        "kMandarin" => readings::locale_pair(field, raw).map(FieldValue::Mandarin),
        "kTotalStrokes" => readings::stroke_pair(field, raw).map(FieldValue::TotalStrokes),
        "kHanyuPinyin" => each(field, raw, readings::pinyin_entry).map(FieldValue::HanyuPinyin),
        "kHanYu" | "kIRGHanyuDaZidian" => {
            each(field, raw, location::han_yu).map(FieldValue::HanYu)
        }
        "kKangXi" | "kIRGKangXi" | "kDaeJaweon" | "kIRGDaeJaweon" => {
            each(field, raw, location::kang_xi).map(FieldValue::KangXi)
        }
        "kXHC1983" => each(field, raw, readings::xhc1983_entry).map(FieldValue::Xhc1983),
        "kTGHZ2013" => each(field, raw, readings::tghz2013_entry).map(FieldValue::Tghz2013),
        "kCihaiT" => each(field, raw, location::cihai).map(FieldValue::CihaiT),
        "kSBGY" => each(field, raw, location::sbgy).map(FieldValue::Sbgy),
        "kCheungBauerIndex" | "kFennIndex" | "kSMSZD2003Index" => {
            each(field, raw, location::page_ref).map(FieldValue::PageRefs)
        }
        "kCheungBauer" => each(field, raw, radical::cheung_bauer).map(FieldValue::CheungBauer),
        "kFenn" => each(field, raw, readings::fenn).map(FieldValue::Fenn),
        "kHanyuPinlu" => each(field, raw, readings::pinlu).map(FieldValue::HanyuPinlu),
        "kRSUnicode" | "kRSJapanese" | "kRSKangXi" | "kRSKanWa" | "kRSKorean" => {
            each(field, raw, radical::radical_strokes).map(FieldValue::RadicalStrokes)
        }
        "kRSAdobe_Japan1_6" => each(field, raw, radical::adobe_japan).map(FieldValue::AdobeJapan),
        "kIRG_GSource" | "kIRG_HSource" | "kIRG_JSource" | "kIRG_KPSource" | "kIRG_KSource"
        | "kIRG_MSource" | "kIRG_SSource" | "kIRG_TSource" | "kIRG_UKSource" | "kIRG_USource"
        | "kIRG_VSource" => each(field, raw, source::source_ref).map(FieldValue::Sources),
        "kGSR" => each(field, raw, source::gsr).map(FieldValue::Gsr),
        "kIICore" => each(field, raw, source::iicore).map(FieldValue::IICore),
        "kUnihanCore2020" => radical::core_set(field, raw).map(FieldValue::CoreSet),
        "kAlternateTotalStrokes" => {
            each(field, raw, radical::alternate_strokes).map(FieldValue::AlternateStrokes)
        }
        "kStrange" => each(field, raw, variant::strange).map(FieldValue::Strange),
        "kSemanticVariant" | "kSpecializedSemanticVariant" | "kZVariant" => {
            each(field, raw, variant::variant_ref).map(FieldValue::Variants)
        }
        "kMojiJoho" => variant::moji_joho(field, raw).map(FieldValue::MojiJoho),
        "kHDZRadBreak" => variant::hdz_rad_break(field, raw).map(FieldValue::RadBreak),
        _ => Ok(passthrough(field, raw)),
    }
}

/// Pre-split without decoding, for fields with no registered decoder.
fn passthrough(field: &str, raw: &str) -> FieldValue {
    match FieldFormat::of(field) {
        FieldFormat::Scalar | FieldFormat::LocalePair => FieldValue::Scalar(raw.to_string()),
        FieldFormat::SemicolonList => FieldValue::List(split_semicolons(raw)),
        FieldFormat::SpaceList => {
            FieldValue::List(raw.split(' ').map(str::to_string).collect())
        }
    }
}

/// Splits a free-text value on `;`, trimming each segment.
fn split_semicolons(raw: &str) -> Vec<String> {
    raw.split(';').map(|s| s.trim().to_string()).collect()
}

/// Applies a token decoder to each space-separated token.
fn each<T>(
    field: &str,
    raw: &str,
    decode: impl Fn(&str, &str) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    raw.split(' ').map(|token| decode(field, token)).collect()
}
