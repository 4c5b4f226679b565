//! # Offline Pakistan Knowledge Base
//!
//! Keyed facts answered without a network. Lookup is substring based: the
//! first key (in table order) that appears in the utterance wins.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Founder and K2 answers reachable through alternate phrasings
//! - 1.0.0: Initial fact table

/// Topic used when Pakistan is mentioned but no specific key matches
pub const DEFAULT_TOPIC: &str = "history";

/// Phrases that route an utterance to the knowledge base at all
pub const TRIGGERS: &[&str] = &[
    "pakistan",
    "capital of pakistan",
    "history of pakistan",
    "pakistan geography",
    "founder of pakistan",
    "k2",
    "karachi",
    "islamabad",
];

/// Whether the utterance is about Pakistan at all
pub fn mentions_pakistan(text: &str) -> bool {
    TRIGGERS.iter().any(|t| text.contains(t))
}

/// (key, fact) pairs in match priority order
const FACTS: &[(&str, &str)] = &[
    (
        "capital",
        "Islamabad is the capital city of Pakistan. It was built during the 1960s to replace Karachi as the capital.",
    ),
    (
        "largest city",
        "Karachi is the largest city of Pakistan and the country's main seaport and financial centre.",
    ),
    (
        "official language",
        "Urdu is the national language and lingua franca, and English is an official language used in government and business. Punjabi, Sindhi, Pashto and Balochi are among the many regional languages.",
    ),
    ("currency", "The Pakistani Rupee (PKR) is the currency of Pakistan."),
    (
        "population",
        "Pakistan's population is over 240 million by recent estimates, making it one of the world's most populous countries.",
    ),
    (
        "independence day",
        "Pakistan gained independence from British rule on 14 August 1947. Independence Day is celebrated every year on August 14.",
    ),
    (
        "geography",
        "Pakistan lies in South Asia, bordered by India to the east, Afghanistan and Iran to the west, China to the north and the Arabian Sea to the south. It spans coastline, plains, deserts and high mountain ranges, and the north holds some of the world's highest peaks, including K2.",
    ),
    (
        "history",
        "Modern Pakistan was created at the partition of British India in 1947 as a state for the Muslims of the subcontinent. The Indus Valley Civilization flourished here around 2600 to 1900 BCE, and Persian, Greek, Mauryan, Kushan and Islamic empires all shaped the region before the Mughal and then British eras. Partition in 1947 founded Pakistan under Muhammad Ali Jinnah, and East Pakistan became Bangladesh in 1971.",
    ),
    (
        "province list",
        "Pakistan's provinces are Punjab, Sindh, Khyber Pakhtunkhwa and Balochistan. Federal territories include the Islamabad Capital Territory, with Gilgit-Baltistan and Azad Jammu and Kashmir administered separately.",
    ),
    ("national animal", "The markhor is the national animal of Pakistan."),
    (
        "national bird",
        "The chukar partridge is recognized as the national bird of Pakistan.",
    ),
    ("national flower", "Jasmine is the national flower of Pakistan."),
];

/// Answers reached only through alternate phrasings: (phrases, key, fact)
const ALIASED_FACTS: &[(&[&str], &str, &str)] = &[
    (
        &["founder", "who founded", "quaid"],
        "founder",
        "Pakistan's founder, Quaid-e-Azam, was Muhammad Ali Jinnah.",
    ),
    (
        &["k2", "highest mountain", "highest peak"],
        "k2",
        "K2, also called Mount Godwin-Austen, is the highest peak in Pakistan and the second highest in the world.",
    ),
];

#[derive(Debug, Clone)]
pub struct Fact {
    pub key: &'static str,
    pub text: &'static str,
}

/// In-memory fact table, built once at startup
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    facts: Vec<Fact>,
    aliases: Vec<(&'static [&'static str], Fact)>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        KnowledgeBase {
            facts: FACTS
                .iter()
                .map(|&(key, text)| Fact { key, text })
                .collect(),
            aliases: ALIASED_FACTS
                .iter()
                .map(|&(phrases, key, text)| (phrases, Fact { key, text }))
                .collect(),
        }
    }

    /// Resolve the topic key for an utterance, falling back to the default topic
    pub fn resolve_topic(&self, text: &str) -> &'static str {
        if let Some(fact) = self.facts.iter().find(|f| text.contains(f.key)) {
            return fact.key;
        }

        self.aliases
            .iter()
            .find(|(phrases, _)| phrases.iter().any(|p| text.contains(p)))
            .map(|(_, fact)| fact.key)
            .unwrap_or(DEFAULT_TOPIC)
    }

    /// Fact text for a topic key
    pub fn fact(&self, topic: &str) -> Option<&'static str> {
        self.facts
            .iter()
            .chain(self.aliases.iter().map(|(_, fact)| fact))
            .find(|f| f.key == topic)
            .map(|f| f.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_key_in_table_order_wins() {
        let kb = KnowledgeBase::builtin();
        // "capital" precedes "largest city" in the table
        assert_eq!(
            kb.resolve_topic("capital and largest city of pakistan"),
            "capital"
        );
        assert_eq!(kb.resolve_topic("currency of pakistan"), "currency");
    }

    #[test]
    fn test_unmatched_mention_falls_back_to_history() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.resolve_topic("tell me something about pakistan"), DEFAULT_TOPIC);
        assert!(kb.fact(DEFAULT_TOPIC).unwrap().contains("1947"));
    }

    #[test]
    fn test_aliases() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.resolve_topic("who founded pakistan"), "founder");
        assert_eq!(kb.resolve_topic("how tall is k2"), "k2");
        assert_eq!(kb.resolve_topic("highest peak in pakistan"), "k2");
    }

    #[test]
    fn test_geography_key_beats_k2_alias() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.resolve_topic("pakistan geography and k2"), "geography");
    }

    #[test]
    fn test_triggers() {
        assert!(mentions_pakistan("i love karachi"));
        assert!(mentions_pakistan("pakistan"));
        assert!(!mentions_pakistan("what is the capital of france"));
    }

    #[test]
    fn test_every_key_has_text() {
        let kb = KnowledgeBase::builtin();
        for (key, _) in FACTS {
            assert!(kb.fact(key).is_some(), "missing fact for {key}");
        }
        assert!(kb.fact("founder").unwrap().contains("Jinnah"));
        assert!(kb.fact("nonexistent").is_none());
    }
}
