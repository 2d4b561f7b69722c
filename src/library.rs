use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// Difficulty bucket with its own word list and target word count
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// Resolve a tier by name, falling back to `Easy` for anything unknown.
    pub fn from_name(name: &str) -> Tier {
        match name.trim().to_ascii_lowercase().as_str() {
            "medium" => Tier::Medium,
            "hard" => Tier::Hard,
            _ => Tier::Easy,
        }
    }

    /// The tier after this one, wrapping around.
    pub fn next(self) -> Tier {
        match self {
            Tier::Easy => Tier::Medium,
            Tier::Medium => Tier::Hard,
            Tier::Hard => Tier::Easy,
        }
    }
}

/// Display/count/colour settings for a tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    pub label: String,
    pub count: usize,
    #[serde(rename = "color")]
    pub color_tag: String,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            label: "Easy".to_string(),
            count: 50,
            color_tag: "green".to_string(),
        }
    }
}

/// A tier's word list as shipped in `src/words/<tier>.json`
#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    #[serde(flatten)]
    pub config: TierConfig,
    pub words: Vec<String>,
}

/// Read-only mapping from tier to words and config.
///
/// Lookups never fail: a tier without a list resolves to the `Easy` list,
/// and if that is missing too, to an empty list with the default config.
#[derive(Debug, Clone)]
pub struct WordLibrary {
    lists: HashMap<Tier, WordList>,
    fallback_config: TierConfig,
}

impl WordLibrary {
    pub fn empty() -> Self {
        Self {
            lists: HashMap::new(),
            fallback_config: TierConfig::default(),
        }
    }

    /// Load every tier bundled into the binary.
    pub fn embedded() -> Self {
        let mut library = Self::empty();
        for tier in Tier::ALL {
            match read_word_list(&format!("{tier}.json")) {
                Ok(list) => library.insert(tier, list),
                Err(err) => tracing::error!(%tier, error = %err, "unable to load word list"),
            }
        }
        library
    }

    pub fn insert(&mut self, tier: Tier, list: WordList) {
        self.lists.insert(tier, list);
    }

    fn list(&self, tier: Tier) -> Option<&WordList> {
        self.lists.get(&tier).or_else(|| self.lists.get(&Tier::Easy))
    }

    pub fn words(&self, tier: Tier) -> &[String] {
        self.list(tier).map(|l| l.words.as_slice()).unwrap_or(&[])
    }

    pub fn config(&self, tier: Tier) -> &TierConfig {
        self.list(tier)
            .map(|l| &l.config)
            .unwrap_or(&self.fallback_config)
    }
}

impl Default for WordLibrary {
    fn default() -> Self {
        Self::embedded()
    }
}

fn read_word_list(file_name: &str) -> Result<WordList, Box<dyn std::error::Error>> {
    let file = WORDS_DIR
        .get_file(file_name)
        .ok_or_else(|| format!("word list {file_name} not bundled"))?;
    let contents = file
        .contents_utf8()
        .ok_or_else(|| format!("word list {file_name} is not utf-8"))?;
    Ok(serde_json::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(words: &[&str], count: usize) -> WordList {
        WordList {
            name: "test".into(),
            config: TierConfig {
                label: "Test".into(),
                count,
                color_tag: "blue".into(),
            },
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn embedded_library_has_every_tier() {
        let lib = WordLibrary::embedded();
        for tier in Tier::ALL {
            assert!(!lib.words(tier).is_empty(), "{tier} should have words");
        }
        assert_eq!(lib.config(Tier::Easy).count, 50);
        assert_eq!(lib.config(Tier::Medium).count, 30);
        assert_eq!(lib.config(Tier::Hard).count, 20);
        assert_eq!(lib.config(Tier::Hard).color_tag, "red");
    }

    #[test]
    fn embedded_words_are_single_tokens() {
        let lib = WordLibrary::embedded();
        for tier in Tier::ALL {
            for word in lib.words(tier) {
                assert!(!word.is_empty());
                assert!(!word.contains(char::is_whitespace), "{word:?}");
            }
        }
    }

    #[test]
    fn missing_tier_falls_back_to_easy() {
        let mut lib = WordLibrary::empty();
        lib.insert(Tier::Easy, list(&["cat", "dog"], 2));

        assert_eq!(lib.words(Tier::Hard), lib.words(Tier::Easy));
        assert_eq!(lib.config(Tier::Medium).label, "Test");
    }

    #[test]
    fn empty_library_resolves_to_defaults() {
        let lib = WordLibrary::empty();
        assert!(lib.words(Tier::Medium).is_empty());
        assert_eq!(lib.config(Tier::Medium), &TierConfig::default());
    }

    #[test]
    fn tier_from_name() {
        assert_eq!(Tier::from_name("hard"), Tier::Hard);
        assert_eq!(Tier::from_name(" Medium "), Tier::Medium);
        assert_eq!(Tier::from_name("expert"), Tier::Easy);
        assert_eq!(Tier::from_name(""), Tier::Easy);
    }

    #[test]
    fn tier_display_and_serde_are_lowercase() {
        assert_eq!(Tier::Medium.to_string(), "medium");
        assert_eq!(serde_json::to_string(&Tier::Hard).unwrap(), "\"hard\"");
        let tier: Tier = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(tier, Tier::Easy);
    }

    #[test]
    fn tier_next_cycles() {
        assert_eq!(Tier::Easy.next(), Tier::Medium);
        assert_eq!(Tier::Medium.next(), Tier::Hard);
        assert_eq!(Tier::Hard.next(), Tier::Easy);
    }

    #[test]
    fn word_list_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "label": "Test",
            "count": 3,
            "color": "blue",
            "words": ["hello", "world", "test"]
        }
        "#;

        let list: WordList = serde_json::from_str(json_data).expect("valid word list");
        assert_eq!(list.name, "test");
        assert_eq!(list.config.count, 3);
        assert_eq!(list.config.color_tag, "blue");
        assert_eq!(list.words.len(), 3);
    }

    #[test]
    fn read_nonexistent_word_list() {
        assert!(read_word_list("nonexistent.json").is_err());
    }
}
