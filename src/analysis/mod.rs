pub mod recommend;
pub mod trends;

use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Technologies scanned for in posting descriptions.
pub const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "Python",
    "Java",
    "JavaScript",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Swift",
    "TypeScript",
    "Kotlin",
    "PHP",
    "Ruby",
    "Scala",
    "R",
    "SQL",
];

pub const FRAMEWORK_KEYWORDS: &[&str] = &[
    "React",
    "Angular",
    "Vue.js",
    "Django",
    "Flask",
    "Spring",
    "Express",
    "Laravel",
    "Rails",
    "ASP.NET",
    "Symfony",
    "Bootstrap",
    "jQuery",
];

pub const CERTIFICATION_KEYWORDS: &[&str] = &[
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "CISSP",
    "CISM",
    "PMP",
    "Scrum",
    "Agile",
    "DevOps",
    "ITIL",
    "CompTIA",
    "Cisco",
];

/// What the analyzer reads out of a single posting description.
#[derive(Debug, Clone, Default)]
pub struct DescriptionProfile {
    pub technologies: Vec<String>,
    pub frameworks: Vec<String>,
    pub certifications: Vec<String>,
    pub salary_range: Option<String>,
    pub recruiter: Option<String>,
}

pub struct DescriptionAnalyzer;

impl DescriptionAnalyzer {
    pub fn analyze(description: &str) -> DescriptionProfile {
        let tokens = tokenize(description);

        DescriptionProfile {
            technologies: find_keywords(&tokens, TECHNOLOGY_KEYWORDS),
            frameworks: find_keywords(&tokens, FRAMEWORK_KEYWORDS),
            certifications: find_keywords(&tokens, CERTIFICATION_KEYWORDS),
            salary_range: Self::extract_salary(description),
            recruiter: Self::extract_recruiter(description),
        }
    }

    /// First salary range found in the description, if any. Patterns are
    /// tried in order: $-ranges, $-ranges with k suffixes, then €-ranges.
    pub fn extract_salary(description: &str) -> Option<String> {
        static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            [
                r"\$[\d,]+\s*-\s*\$[\d,]+",
                r"\$[\d,]+k?\s*-\s*\$[\d,]+k?",
                r"[\d,]+\s*-\s*[\d,]+\s*€",
                r"[\d,]+k?\s*-\s*[\d,]+k?\s*€",
            ]
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .unwrap()
            })
            .collect()
        });

        patterns
            .iter()
            .find_map(|re| re.find(description))
            .map(|m| m.as_str().to_string())
    }

    /// First e-mail address in the description, used as recruiter contact.
    pub fn extract_recruiter(description: &str) -> Option<String> {
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        let re = EMAIL.get_or_init(|| {
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
        });

        re.find(description).map(|m| m.as_str().to_string())
    }
}

/// Lowercased tokens of the description. Splits on anything that is not
/// alphanumeric, '+', '#' or '.', then trims sentence periods, so "C++",
/// "C#", "Vue.js" and "ASP.NET" survive as single tokens while "R" no
/// longer matches inside unrelated words.
fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#' || c == '.'))
        .map(|t| t.trim_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Lexicon entries present in the token set, reported in lexicon order with
/// the lexicon's canonical casing.
fn find_keywords(tokens: &HashSet<String>, lexicon: &[&str]) -> Vec<String> {
    lexicon
        .iter()
        .filter(|keyword| tokens.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
        .collect()
}
