//! Lexicon-based polarity scoring for product descriptions.
//!
//! Each lexicon hit contributes its polarity, scaled by a directly
//! preceding intensifier and flipped to half strength by a preceding
//! negator ("not good" is mildly negative, not the mirror of "good").
//! The text score is the mean over hits, clamped to [-1, 1].

use serde::Serialize;
use std::collections::HashMap;

const NEGATION_FACTOR: f64 = -0.5;

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.6),
    ("attractive", 0.5),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("bright", 0.7),
    ("clean", 0.37),
    ("comfortable", 0.4),
    ("compact", 0.2),
    ("convenient", 0.4),
    ("delicious", 1.0),
    ("dependable", 0.5),
    ("durable", 0.5),
    ("easy", 0.43),
    ("effective", 0.6),
    ("efficient", 0.5),
    ("elegant", 0.5),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("exceptional", 0.67),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("favorite", 0.5),
    ("fine", 0.42),
    ("fresh", 0.3),
    ("fun", 0.3),
    ("gentle", 0.3),
    ("good", 0.7),
    ("gorgeous", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("healthy", 0.5),
    ("helpful", 0.5),
    ("ideal", 0.9),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("love", 0.5),
    ("lovely", 0.5),
    ("modern", 0.2),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("perfectly", 1.0),
    ("pleasant", 0.73),
    ("popular", 0.6),
    ("powerful", 0.3),
    ("premium", 0.5),
    ("quality", 0.3),
    ("quick", 0.33),
    ("recommend", 0.5),
    ("reliable", 0.5),
    ("safe", 0.5),
    ("satisfied", 0.5),
    ("simple", 0.2),
    ("smooth", 0.4),
    ("solid", 0.3),
    ("sturdy", 0.5),
    ("stylish", 0.5),
    ("superb", 1.0),
    ("superior", 0.7),
    ("useful", 0.3),
    ("versatile", 0.4),
    ("well", 0.2),
    ("wonderful", 1.0),
    // negative
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("bent", -0.3),
    ("boring", -1.0),
    ("broke", -0.4),
    ("broken", -0.4),
    ("cheaply", -0.3),
    ("cracked", -0.4),
    ("damaged", -0.5),
    ("defective", -0.6),
    ("difficult", -0.5),
    ("dirty", -0.6),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dull", -0.3),
    ("fail", -0.5),
    ("failed", -0.5),
    ("flimsy", -0.5),
    ("fragile", -0.3),
    ("hard", -0.29),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("junk", -0.6),
    ("leak", -0.4),
    ("leaks", -0.4),
    ("leaky", -0.4),
    ("loud", -0.2),
    ("mediocre", -0.4),
    ("messy", -0.4),
    ("noisy", -0.3),
    ("poor", -0.4),
    ("poorly", -0.4),
    ("problem", -0.3),
    ("rust", -0.4),
    ("rusty", -0.4),
    ("sad", -0.5),
    ("scratched", -0.3),
    ("slow", -0.3),
    ("sticky", -0.3),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("uncomfortable", -0.5),
    ("unreliable", -0.5),
    ("useless", -0.5),
    ("waste", -0.5),
    ("weak", -0.38),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.2),
    ("so", 1.2),
    ("super", 1.3),
    ("too", 1.2),
    ("totally", 1.3),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &["no", "not", "never", "nothing", "hardly", "cannot"];

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Polarity in [-1, 1]. Empty text, or text with no lexicon hit,
    /// scores exactly 0.
    pub fn score(&self, text: &str) -> f64 {
        let mut hits = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;

        for token in tokenize(text) {
            if is_negator(&token) {
                negated = true;
                continue;
            }
            if let Some(&factor) = self.intensifiers.get(token.as_str()) {
                intensity *= factor;
                continue;
            }
            if let Some(&polarity) = self.lexicon.get(token.as_str()) {
                let mut value = (polarity * intensity).clamp(-1.0, 1.0);
                if negated {
                    value *= NEGATION_FACTOR;
                }
                hits.push(value);
            }
            negated = false;
            intensity = 1.0;
        }

        if hits.is_empty() {
            return 0.0;
        }
        (hits.iter().sum::<f64>() / hits.len() as f64).clamp(-1.0, 1.0)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_matches('\'').to_lowercase())
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// For each keyword, the number of texts that contain it as a
/// case-insensitive substring. Keyword order is preserved.
pub fn keyword_counts<'a, I>(texts: I, keywords: &[String]) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut counts = vec![0usize; keywords.len()];

    for text in texts {
        let haystack = text.to_lowercase();
        for (idx, needle) in needles.iter().enumerate() {
            if haystack.contains(needle.as_str()) {
                counts[idx] += 1;
            }
        }
    }

    keywords
        .iter()
        .zip(counts)
        .map(|(keyword, count)| KeywordCount {
            keyword: keyword.clone(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_text_is_neutral() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.score(""), 0.0);
        assert_eq!(analyzer.score("Stainless steel 12 inch skillet"), 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        let analyzer = SentimentAnalyzer::new();
        assert!(analyzer.score("Great pan, excellent heat distribution") > 0.5);
        assert!(analyzer.score("Terrible lid, broken after a week") < -0.5);
    }

    #[test]
    fn test_negation_and_intensifiers() {
        let analyzer = SentimentAnalyzer::new();
        assert_relative_eq!(analyzer.score("good"), 0.7, epsilon = 1e-12);
        assert_relative_eq!(analyzer.score("nice"), 0.6, epsilon = 1e-12);
        assert_relative_eq!(analyzer.score("not nice"), -0.3, epsilon = 1e-12);
        assert_relative_eq!(analyzer.score("very nice"), 0.78, epsilon = 1e-12);
        assert_relative_eq!(analyzer.score("doesn't leak"), 0.2, epsilon = 1e-12);
        assert_relative_eq!(analyzer.score("absolutely perfect"), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_keyword_counts_case_insensitive() {
        let texts = ["Non-stick coating", "NON-STICK and dishwasher safe", "cast iron"];
        let keywords = vec!["non-stick".to_string(), "Dishwasher".to_string()];
        let counts = keyword_counts(texts.iter().copied(), &keywords);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].count, 1);
        assert_eq!(counts[1].keyword, "Dishwasher");
    }
}
