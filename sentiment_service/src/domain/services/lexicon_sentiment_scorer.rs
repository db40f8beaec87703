use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    domain::entities::{
        sentiment::{
            Sentiment, MAX_POLARITY, MAX_SUBJECTIVITY, MIN_POLARITY, MIN_SUBJECTIVITY,
        },
        submitted_text::SubmittedText,
    },
    ports::sentiment_scorer::{SentimentScorer, SentimentScorerError},
};

/// Opinion words: (word, polarity, subjectivity)
const OPINION_WORDS: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("brilliant", 0.9, 1.0),
    ("cool", 0.35, 0.65),
    ("delightful", 1.0, 1.0),
    ("easy", 0.43, 0.83),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("favorite", 0.5, 1.0),
    ("fine", 0.42, 0.5),
    ("fun", 0.3, 0.2),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("helpful", 0.5, 0.5),
    ("impressive", 1.0, 1.0),
    ("interesting", 0.5, 0.5),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("lovely", 0.5, 0.75),
    ("loves", 0.5, 0.6),
    ("nice", 0.6, 1.0),
    ("ok", 0.5, 0.5),
    ("okay", 0.5, 0.5),
    ("outstanding", 0.5, 0.7),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.73, 0.97),
    ("pleased", 0.5, 1.0),
    ("positive", 0.23, 0.55),
    ("reliable", 0.5, 0.6),
    ("satisfied", 0.5, 1.0),
    ("superb", 1.0, 1.0),
    ("useful", 0.3, 0.0),
    ("wonderful", 1.0, 1.0),
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("boring", -1.0, 1.0),
    ("broken", -0.4, 0.4),
    ("difficult", -0.5, 1.0),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("dreadful", -1.0, 1.0),
    ("fail", -0.5, 0.3),
    ("failed", -0.5, 0.3),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("hates", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("mediocre", -0.3, 0.6),
    ("nasty", -1.0, 1.0),
    ("negative", -0.3, 0.4),
    ("painful", -0.7, 0.9),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("slow", -0.3, 0.4),
    ("strange", -0.05, 0.15),
    ("stupid", -0.8, 1.0),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("unhappy", -0.6, 0.9),
    ("useless", -0.5, 0.2),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

/// Words scaling the next opinion word: (word, multiplier)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("very", 1.3),
    ("barely", 0.4),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

/// Upper bound of the combined multiplier of stacked intensifiers
const MAX_INTENSITY: f64 = 4.0;

const NEGATORS: &[&str] = &[
    "cannot", "hardly", "neither", "never", "no", "nobody", "nor", "not", "nothing", "without",
];

/// Polarity of a negated opinion word is multiplied by this factor
const NEGATION_FACTOR: f64 = -0.5;

/// Polarity amplification per exclamation mark
const EXCLAMATION_BOOST: f64 = 0.05;
const MAX_EXCLAMATIONS: usize = 3;

static OPINION_LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    OPINION_WORDS
        .iter()
        .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
        .collect()
});

static INTENSIFIER_LEXICON: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| INTENSIFIERS.iter().copied().collect());

// Words with an optional contraction ("don't", "it's"), and exclamation marks
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?|!").expect("Invalid token regex"));

/// Lexicon based sentiment scorer
///
/// The sentiment of a text is the average of the (polarity, subjectivity) of its opinion words.
/// An opinion word can be modified by the words right before it:
/// - an intensifier ("very good") scales its polarity and subjectivity
/// - a negator ("not good", "isn't good") flips and halves its polarity
///
/// Negation survives an intensifier ("not very good"), any other word clears pending modifiers.
#[derive(Debug, Default, Clone)]
pub struct LexiconSentimentScorer {}

impl LexiconSentimentScorer {
    pub fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone, Copy)]
struct Modifiers {
    intensity: f64,
    negated: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            negated: false,
        }
    }
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

impl SentimentScorer for LexiconSentimentScorer {
    #[tracing::instrument(name = "Scoring text sentiment", skip(self, text))]
    fn score(&self, text: &SubmittedText) -> Result<Sentiment, SentimentScorerError> {
        let lowercased = text.as_ref().to_lowercase();

        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut modifiers = Modifiers::default();
        let mut exclamations = 0;

        for token in TOKEN_REGEX.find_iter(&lowercased).map(|m| m.as_str()) {
            if token == "!" {
                exclamations += 1;
                continue;
            }

            if let Some((polarity, subjectivity)) = OPINION_LEXICON.get(token) {
                let mut polarity = polarity * modifiers.intensity;
                if modifiers.negated {
                    polarity *= NEGATION_FACTOR;
                }
                let subjectivity = subjectivity * modifiers.intensity;

                assessments.push((polarity, subjectivity));
                modifiers = Modifiers::default();
            } else if let Some(multiplier) = INTENSIFIER_LEXICON.get(token) {
                modifiers.intensity = (modifiers.intensity * multiplier).min(MAX_INTENSITY);
            } else if is_negator(token) {
                modifiers.negated = !modifiers.negated;
            } else {
                modifiers = Modifiers::default();
            }
        }

        if assessments.is_empty() {
            return Ok(Sentiment::neutral());
        }

        let count = assessments.len() as f64;
        let mut polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / count;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / count;

        polarity *= 1.0 + EXCLAMATION_BOOST * exclamations.min(MAX_EXCLAMATIONS) as f64;

        let sentiment = Sentiment::new(
            polarity.clamp(MIN_POLARITY, MAX_POLARITY),
            subjectivity.clamp(MIN_SUBJECTIVITY, MAX_SUBJECTIVITY),
        )?;

        Ok(sentiment)
    }
}
