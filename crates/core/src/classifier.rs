//! Keyword classifier — maps a visitor's message to a topic.
//!
//! This is an ordered list of substring rules, not a lookup table: the first
//! rule with a matching keyword wins, so "project tech stack" is a skills
//! question because the skills rule is tested before the projects rule.

use serde::{Deserialize, Serialize};

/// The closed set of classification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicKey {
    Skills,
    Experience,
    Projects,
    Contact,
    Resume,
    Greeting,
    Default,
}

impl TopicKey {
    pub const ALL: [TopicKey; 7] = [
        TopicKey::Skills,
        TopicKey::Experience,
        TopicKey::Projects,
        TopicKey::Contact,
        TopicKey::Resume,
        TopicKey::Greeting,
        TopicKey::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Contact => "contact",
            Self::Resume => "resume",
            Self::Greeting => "greeting",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for TopicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TopicKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TopicKey::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic: {s}"))
    }
}

/// One classification rule: any keyword present selects the topic.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub topic: TopicKey,
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// Rules in priority order. Order is part of the behavior.
pub const RULES: &[Rule] = &[
    Rule {
        topic: TopicKey::Skills,
        keywords: &["skill", "tech", "stack"],
    },
    Rule {
        topic: TopicKey::Experience,
        keywords: &["experience", "work", "job", "company"],
    },
    Rule {
        topic: TopicKey::Projects,
        keywords: &["project", "portfolio", "built"],
    },
    Rule {
        topic: TopicKey::Contact,
        keywords: &["contact", "email", "hire", "reach"],
    },
    Rule {
        topic: TopicKey::Resume,
        keywords: &["resume", "cv", "download"],
    },
    Rule {
        topic: TopicKey::Greeting,
        keywords: &["hello", "hi", "hey"],
    },
];

/// Classify a message. Total over all strings; unmatched input is `Default`.
pub fn classify(input: &str) -> TopicKey {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.topic)
        .unwrap_or(TopicKey::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_keywords() {
        for input in ["What skills do you have?", "Which TECH?", "your stack", "Skill"] {
            assert_eq!(classify(input), TopicKey::Skills, "{input}");
        }
    }

    #[test]
    fn rule_order_breaks_ties() {
        assert_eq!(
            classify("What tech did you use for this project?"),
            TopicKey::Skills
        );
        assert_eq!(classify("project tech stack"), TopicKey::Skills);
        assert_eq!(classify("Which company project?"), TopicKey::Experience);
        assert_eq!(classify("email me your resume"), TopicKey::Contact);
    }

    #[test]
    fn each_topic_reachable() {
        assert_eq!(classify("Tell me about your experience"), TopicKey::Experience);
        assert_eq!(classify("Any job openings?"), TopicKey::Experience);
        assert_eq!(classify("Show me your portfolio"), TopicKey::Projects);
        assert_eq!(classify("What have you built?"), TopicKey::Projects);
        assert_eq!(classify("How can I reach you?"), TopicKey::Contact);
        assert_eq!(classify("Can I hire you?"), TopicKey::Contact);
        assert_eq!(classify("cv please"), TopicKey::Resume);
        assert_eq!(classify("Download"), TopicKey::Resume);
    }

    #[test]
    fn greeting_is_case_insensitive() {
        assert_eq!(classify("HELLO there"), TopicKey::Greeting);
        assert_eq!(classify("hey"), TopicKey::Greeting);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "this" contains "hi"
        assert_eq!(classify("is this real"), TopicKey::Greeting);
        // "network" contains "work"
        assert_eq!(classify("network"), TopicKey::Experience);
    }

    #[test]
    fn unmatched_and_empty_fall_to_default() {
        assert_eq!(classify(""), TopicKey::Default);
        assert_eq!(classify("   "), TopicKey::Default);
        assert_eq!(classify("What's the weather?"), TopicKey::Default);
    }

    #[test]
    fn topic_parses_from_str() {
        for topic in TopicKey::ALL {
            assert_eq!(topic.as_str().parse::<TopicKey>(), Ok(topic));
        }
        assert!("unknown".parse::<TopicKey>().is_err());
    }
}
