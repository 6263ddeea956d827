//! Reading-field grammars: locale pairs, pinyin-with-locations, and
//! frequency-annotated readings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::location::{self, HanYuLocation, Tghz2013Location, Xhc1983Location};
use super::DecodeError;

/// A CN/TW value pair.
///
/// The first whitespace token applies to simplified-script usage and the
/// second to traditional-script usage; a lone token covers both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalePair<T> {
    #[serde(rename = "zh-Hans")]
    pub hans: T,
    #[serde(rename = "zh-Hant")]
    pub hant: T,
}

/// One kHanyuPinyin entry: the dictionary positions sharing a reading list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinyinEntry {
    pub locations: Vec<HanYuLocation>,
    pub readings: Vec<String>,
}

/// One kXHC1983 entry: the dictionary positions sharing a single reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Xhc1983Entry {
    pub locations: Vec<Xhc1983Location>,
    pub reading: String,
}

/// One kTGHZ2013 entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tghz2013Entry {
    pub locations: Vec<Tghz2013Location>,
    pub reading: String,
}

/// One kFenn entry: phonetic group plus frequency class letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FennEntry {
    pub phonetic: String,
    pub frequency: char,
}

/// One kHanyuPinlu entry: reading with its corpus occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinluReading {
    pub phonetic: String,
    pub frequency: u32,
}

static FENN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+a?)([A-KP*])$").unwrap());
static PINLU: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^()]+)\(([0-9]+)\)$").unwrap());

/// Decodes a 1–2 token CN/TW pair, repeating a lone token for both scripts.
pub(super) fn locale_pair(field: &str, raw: &str) -> Result<LocalePair<String>, DecodeError> {
    let tokens: Vec<&str> = raw.split(' ').collect();
    match tokens.as_slice() {
        [both] if !both.is_empty() => Ok(LocalePair {
            hans: both.to_string(),
            hant: both.to_string(),
        }),
        [hans, hant] if !hans.is_empty() && !hant.is_empty() => Ok(LocalePair {
            hans: hans.to_string(),
            hant: hant.to_string(),
        }),
        _ => Err(DecodeError::grammar(field, raw)),
    }
}

/// kTotalStrokes: the CN/TW pair convention with integer values.
pub(super) fn stroke_pair(field: &str, raw: &str) -> Result<LocalePair<u32>, DecodeError> {
    let pair = locale_pair(field, raw)?;
    let hans = pair
        .hans
        .parse()
        .map_err(|_| DecodeError::grammar(field, &pair.hans))?;
    let hant = pair
        .hant
        .parse()
        .map_err(|_| DecodeError::grammar(field, &pair.hant))?;
    Ok(LocalePair { hans, hant })
}

/// kHanyuPinyin token: `location,…:reading,…`.
pub(super) fn pinyin_entry(field: &str, token: &str) -> Result<PinyinEntry, DecodeError> {
    let (locations, readings) = token
        .split_once(':')
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    if readings.is_empty() {
        return Err(DecodeError::grammar(field, token));
    }
    Ok(PinyinEntry {
        locations: locations
            .split(',')
            .map(|loc| location::han_yu(field, loc))
            .collect::<Result<_, _>>()?,
        readings: readings.split(',').map(str::to_string).collect(),
    })
}

/// kXHC1983 token: `location,…:reading`.
pub(super) fn xhc1983_entry(field: &str, token: &str) -> Result<Xhc1983Entry, DecodeError> {
    let (locations, reading) = token
        .split_once(':')
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    if reading.is_empty() {
        return Err(DecodeError::grammar(field, token));
    }
    Ok(Xhc1983Entry {
        locations: locations
            .split(',')
            .map(|loc| location::xhc1983(field, loc))
            .collect::<Result<_, _>>()?,
        reading: reading.to_string(),
    })
}

/// kTGHZ2013 token: `location,…:reading`.
pub(super) fn tghz2013_entry(field: &str, token: &str) -> Result<Tghz2013Entry, DecodeError> {
    let (locations, reading) = token
        .split_once(':')
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    if reading.is_empty() {
        return Err(DecodeError::grammar(field, token));
    }
    Ok(Tghz2013Entry {
        locations: locations
            .split(',')
            .map(|loc| location::tghz2013(field, loc))
            .collect::<Result<_, _>>()?,
        reading: reading.to_string(),
    })
}

pub(super) fn fenn(field: &str, token: &str) -> Result<FennEntry, DecodeError> {
    let caps = FENN
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(FennEntry {
        phonetic: caps[1].to_string(),
        frequency: caps[2]
            .chars()
            .next()
            .ok_or_else(|| DecodeError::grammar(field, token))?,
    })
}

pub(super) fn pinlu(field: &str, token: &str) -> Result<PinluReading, DecodeError> {
    let caps = PINLU
        .captures(token)
        .ok_or_else(|| DecodeError::grammar(field, token))?;
    Ok(PinluReading {
        phonetic: caps[1].to_string(),
        frequency: caps[2]
            .parse()
            .map_err(|_| DecodeError::grammar(field, token))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_pair_single_token_covers_both() {
        let pair = locale_pair("kMandarin", "bǐ").unwrap();
        assert_eq!(pair.hans, "bǐ");
        assert_eq!(pair.hant, "bǐ");
    }

    #[test]
    fn test_locale_pair_two_tokens() {
        let pair = locale_pair("kMandarin", "bǐ bì").unwrap();
        assert_eq!(pair.hans, "bǐ");
        assert_eq!(pair.hant, "bì");
    }

    #[test]
    fn test_locale_pair_rejects_three_tokens() {
        assert!(locale_pair("kMandarin", "a b c").is_err());
    }

    #[test]
    fn test_stroke_pair_parses_integers() {
        let pair = stroke_pair("kTotalStrokes", "12 13").unwrap();
        assert_eq!(pair, LocalePair { hans: 12, hant: 13 });
    }

    #[test]
    fn test_stroke_pair_rejects_non_numeric() {
        assert!(stroke_pair("kTotalStrokes", "twelve").is_err());
    }

    #[test]
    fn test_pinyin_entry_exact_digit_widths() {
        let entry = pinyin_entry("kHanyuPinyin", "10019.020:tiàn").unwrap();
        assert_eq!(entry.locations.len(), 1);
        assert_eq!(entry.locations[0].volume, 1);
        assert_eq!(entry.locations[0].page, 19);
        assert_eq!(entry.locations[0].character, 2);
        assert_eq!(entry.locations[0].r#virtual, 0);
        assert_eq!(entry.readings, vec!["tiàn".to_string()]);
    }

    #[test]
    fn test_pinyin_entry_multiple_locations_and_readings() {
        let entry = pinyin_entry("kHanyuPinyin", "10093.130,74609.020:xī,lǔ").unwrap();
        assert_eq!(entry.locations.len(), 2);
        assert_eq!(entry.locations[1].volume, 7);
        assert_eq!(entry.locations[1].page, 4609);
        assert_eq!(entry.readings, vec!["xī".to_string(), "lǔ".to_string()]);
    }

    #[test]
    fn test_pinyin_entry_requires_reading() {
        assert!(pinyin_entry("kHanyuPinyin", "10019.020").is_err());
        assert!(pinyin_entry("kHanyuPinyin", "10019.020:").is_err());
    }

    #[test]
    fn test_xhc1983_entry() {
        let entry = xhc1983_entry("kXHC1983", "482.140:zhòu").unwrap();
        assert_eq!(entry.locations.len(), 1);
        assert_eq!(entry.locations[0].page, 482);
        assert_eq!(entry.locations[0].position, 14);
        assert_eq!(entry.locations[0].entry_type, 0);
        assert_eq!(entry.reading, "zhòu");
    }

    #[test]
    fn test_tghz2013_entry() {
        let entry = tghz2013_entry("kTGHZ2013", "097.110,097.120:dàn").unwrap();
        assert_eq!(entry.locations.len(), 2);
        assert_eq!(entry.locations[0].page, 97);
        assert_eq!(entry.locations[1].position, 120);
        assert_eq!(entry.reading, "dàn");
    }

    #[test]
    fn test_fenn_phonetic_with_suffix() {
        let entry = fenn("kFenn", "932aA").unwrap();
        assert_eq!(entry.phonetic, "932a");
        assert_eq!(entry.frequency, 'A');

        let entry = fenn("kFenn", "699P").unwrap();
        assert_eq!(entry.frequency, 'P');
    }

    #[test]
    fn test_fenn_rejects_bad_frequency() {
        assert!(fenn("kFenn", "932L").is_err());
    }

    #[test]
    fn test_pinlu_reading() {
        let entry = pinlu("kHanyuPinlu", "yī(32747)").unwrap();
        assert_eq!(entry.phonetic, "yī");
        assert_eq!(entry.frequency, 32747);
    }

    #[test]
    fn test_pinlu_rejects_missing_count() {
        assert!(pinlu("kHanyuPinlu", "yī").is_err());
    }
}
