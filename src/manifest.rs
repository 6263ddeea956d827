use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// Delimiter classification for a field's raw value.
///
/// Decides how a value is pre-split before its decoder (if any) runs.
/// The classification is a closed, compile-time table: see [`FieldFormat::of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Single opaque value, passed through untouched.
    Scalar,
    /// Free text split on `;` with per-segment trimming (kDefinition).
    SemicolonList,
    /// Whitespace-tokenized list of independently decoded tokens.
    SpaceList,
    /// One or two whitespace tokens: simplified-script reading first,
    /// traditional-script reading second (or repeated).
    LocalePair,
}

impl FieldFormat {
    /// Returns the classification for a field name.
    ///
    /// Fields not listed here are plain scalars. This table is the single
    /// source of truth; there is no runtime registration.
    pub fn of(field: &str) -> FieldFormat {
        match field {
            "kDefinition" => FieldFormat::SemicolonList,
            "kMandarin" | "kTotalStrokes" => FieldFormat::LocalePair,
            // Readings
            "kCantonese" | "kHangul" | "kHanyuPinlu" | "kHanyuPinyin" | "kJapanese"
            | "kJapaneseKun" | "kJapaneseOn" | "kKorean" | "kSMSZD2003Readings" | "kTang"
            | "kTGHZ2013" | "kVietnamese" | "kXHC1983" => FieldFormat::SpaceList,
            // Dictionary indices
            "kCheungBauerIndex" | "kCowles" | "kDaeJaweon" | "kFennIndex" | "kGSR" | "kHanYu"
            | "kIRGDaeJaweon" | "kIRGHanyuDaZidian" | "kIRGKangXi" | "kKangXi" | "kLau"
            | "kMatthews" | "kMeyerWempe" | "kMorohashi" | "kNelson" | "kSBGY"
            | "kSMSZD2003Index" => FieldFormat::SpaceList,
            // Dictionary-like data
            "kAlternateTotalStrokes" | "kCheungBauer" | "kCihaiT" | "kFenn"
            | "kFourCornerCode" | "kPhonetic" | "kStrange" => FieldFormat::SpaceList,
            // IRG sources and radical-stroke counts
            "kIICore" | "kIRG_GSource" | "kIRG_HSource" | "kIRG_JSource" | "kIRG_KPSource"
            | "kIRG_KSource" | "kIRG_MSource" | "kIRG_SSource" | "kIRG_TSource"
            | "kIRG_UKSource" | "kIRG_USource" | "kIRG_VSource" | "kRSAdobe_Japan1_6"
            | "kRSJapanese" | "kRSKangXi" | "kRSKanWa" | "kRSKorean" | "kRSUnicode" => {
                FieldFormat::SpaceList
            }
            // Variants
            "kMojiJoho" | "kSemanticVariant" | "kSimplifiedVariant"
            | "kSpecializedSemanticVariant" | "kSpoofingVariant" | "kTraditionalVariant"
            | "kZVariant" => FieldFormat::SpaceList,
            _ => FieldFormat::Scalar,
        }
    }
}

/// Fields supplied by a single Unihan source file.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Field names in their documented order within the file.
    pub fields: Vec<String>,
}

/// Ordered mapping from Unihan source-file name to the fields it supplies.
///
/// Loaded once at startup and passed by reference into each pipeline stage;
/// no stage reads ambient global state.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Map of source-file names to their field lists, in read order.
    pub sources: IndexMap<String, SourceConfig>,
}

impl Manifest {
    /// Parses a manifest from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the built-in manifest bundled with the library.
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        let content = include_str!("../manifest.toml");
        Ok(Self::from_toml(content)?)
    }

    /// Loads a manifest from a custom file path.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Loads the manifest with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in manifest (from library)
    /// 2. `~/.config/unihan-d/manifest.toml` (user overrides)
    /// 3. `./manifest.toml` (project-local overrides)
    ///
    /// Later configurations override earlier ones for matching file names.
    pub fn load_with_overrides() -> Result<Self, Box<dyn std::error::Error>> {
        let mut manifest = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("unihan-d").join("manifest.toml");
            if user_path.exists() {
                match Self::load_from_file(&user_path) {
                    Ok(user_manifest) => manifest.merge(user_manifest),
                    Err(e) => {
                        tracing::warn!("failed to load user manifest from {:?}: {}", user_path, e);
                    }
                }
            }
        }

        let local_path = std::path::Path::new("manifest.toml");
        if local_path.exists() {
            match Self::load_from_file(local_path) {
                Ok(local_manifest) => manifest.merge(local_manifest),
                Err(e) => {
                    tracing::warn!("failed to load local manifest from {:?}: {}", local_path, e);
                }
            }
        }

        Ok(manifest)
    }

    /// Merges another manifest into this one.
    ///
    /// Source files from `other` override entries with the same name in `self`.
    pub fn merge(&mut self, other: Manifest) {
        for (name, source) in other.sources {
            self.sources.insert(name, source);
        }
    }

    /// All field names across all source files, in manifest order, deduplicated.
    pub fn all_fields(&self) -> Vec<String> {
        let mut seen = indexmap::IndexSet::new();
        for source in self.sources.values() {
            for field in &source.fields {
                seen.insert(field.clone());
            }
        }
        seen.into_iter().collect()
    }

    /// Whether any source file supplies `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.sources
            .values()
            .any(|s| s.fields.iter().any(|f| f == field))
    }

    /// Resolves a field request against the manifest.
    ///
    /// `None` means "everything". An explicit request naming a field no
    /// source file supplies is a configuration error, not something to
    /// swallow. The index fields `ucn` and `char` are synthesized by the
    /// normalizer and accepted without a manifest entry.
    pub fn resolve_fields(
        &self,
        requested: Option<&[String]>,
    ) -> Result<Vec<String>, UnknownFieldError> {
        match requested {
            None => Ok(self.all_fields()),
            Some(fields) => {
                let mut resolved = Vec::with_capacity(fields.len());
                for field in fields {
                    if field == "ucn" || field == "char" {
                        continue;
                    }
                    if !self.contains_field(field) {
                        let known = self.all_fields();
                        let suggestion = find_closest_field(field, &known);
                        return Err(UnknownFieldError::new(field, suggestion));
                    }
                    resolved.push(field.clone());
                }
                Ok(resolved)
            }
        }
    }

    /// Source files supplying at least one of `fields`, in manifest order.
    pub fn files_for_fields(&self, fields: &[String]) -> Vec<String> {
        self.sources
            .iter()
            .filter(|(_, source)| source.fields.iter().any(|f| fields.contains(f)))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Error when a requested field is not supplied by any source file.
#[derive(Debug)]
pub struct UnknownFieldError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl UnknownFieldError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}' is not supplied by any source file", self.name)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnknownFieldError {}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest matching field name for a typo suggestion
pub fn find_closest_field(name: &str, available: &[String]) -> Option<String> {
    if available.is_empty() {
        return None;
    }

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for field_name in available {
        let distance = levenshtein_distance(name, field_name);

        // Only suggest near misses, not arbitrary renames
        let threshold = if name.len() < 5 { 2 } else { 3 };

        if distance < best_distance && distance <= threshold {
            best_distance = distance;
            best_match = Some(field_name.clone());
        }
    }

    best_match
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_manifest() {
        let manifest = Manifest::load_default().unwrap();
        assert!(manifest.sources.contains_key("Unihan_Readings.txt"));
        assert!(manifest.contains_field("kDefinition"));
    }

    #[test]
    fn test_source_order_preserved() {
        let manifest = Manifest::load_default().unwrap();
        let files: Vec<_> = manifest.sources.keys().collect();
        assert_eq!(files[0], "Unihan_DictionaryIndices.txt");
        assert_eq!(*files.last().unwrap(), "Unihan_Variants.txt");
    }

    #[test]
    fn test_resolve_all_fields() {
        let manifest = Manifest::load_default().unwrap();
        let fields = manifest.resolve_fields(None).unwrap();
        assert!(fields.iter().any(|f| f == "kHanyuPinyin"));
        assert!(fields.iter().any(|f| f == "kZVariant"));
    }

    #[test]
    fn test_resolve_unknown_field() {
        let manifest = Manifest::load_default().unwrap();
        let err = manifest
            .resolve_fields(Some(&["kDefinitoin".to_string()]))
            .unwrap_err();
        assert_eq!(err.suggestion.as_deref(), Some("kDefinition"));
    }

    #[test]
    fn test_resolve_index_fields_implicit() {
        let manifest = Manifest::load_default().unwrap();
        let fields = manifest
            .resolve_fields(Some(&["ucn".to_string(), "kMandarin".to_string()]))
            .unwrap();
        assert_eq!(fields, vec!["kMandarin".to_string()]);
    }

    #[test]
    fn test_files_for_fields() {
        let manifest = Manifest::load_default().unwrap();
        let files = manifest.files_for_fields(&["kDefinition".to_string()]);
        assert_eq!(files, vec!["Unihan_Readings.txt".to_string()]);
    }

    #[test]
    fn test_merge_manifests() {
        let mut base = Manifest::from_toml(
            r#"
[sources."a.txt"]
fields = ["kOne"]
"#,
        )
        .unwrap();
        let overlay = Manifest::from_toml(
            r#"
[sources."a.txt"]
fields = ["kOne", "kTwo"]

[sources."b.txt"]
fields = ["kThree"]
"#,
        )
        .unwrap();

        base.merge(overlay);

        assert_eq!(base.sources.len(), 2);
        assert_eq!(base.sources["a.txt"].fields.len(), 2);
    }

    #[test]
    fn test_field_format_classification() {
        assert_eq!(FieldFormat::of("kDefinition"), FieldFormat::SemicolonList);
        assert_eq!(FieldFormat::of("kMandarin"), FieldFormat::LocalePair);
        assert_eq!(FieldFormat::of("kHanyuPinyin"), FieldFormat::SpaceList);
        assert_eq!(FieldFormat::of("kUnihanCore2020"), FieldFormat::Scalar);
        assert_eq!(FieldFormat::of("kGradeLevel"), FieldFormat::Scalar);
    }

    #[test]
    fn test_find_closest_field() {
        let fields = vec![
            "kMandarin".to_string(),
            "kCantonese".to_string(),
            "kDefinition".to_string(),
        ];
        assert_eq!(
            find_closest_field("kMandarim", &fields),
            Some("kMandarin".to_string())
        );
        assert_eq!(find_closest_field("kTotallyElse", &fields), None);
    }
}
