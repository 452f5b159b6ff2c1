//! Lexicon-based sentiment scoring for journal text.
//!
//! Produces a single compound polarity score in `[-1.0, 1.0]`, following the
//! VADER family of heuristics: per-word valences from a fixed lexicon, adjusted
//! for intensifiers, negation, contrastive "but", capitalisation and trailing
//! punctuation, then normalised.

use std::collections::{HashMap, HashSet};

/// Compound polarity in `[-1.0, 1.0]`. Negative is negative affect, `0.0` is neutral.
pub type SentimentScore = f64;

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_EXCLAMATIONS: usize = 4;
/// How far back a booster or negation can reach.
const LOOKBACK: usize = 3;

/// (word, valence) on the -4..4 scale.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("happier", 2.4),
    ("happiness", 2.6),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("awesome", 3.1),
    ("nice", 1.8),
    ("fun", 2.3),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("calm", 1.3),
    ("relaxed", 2.2),
    ("relaxing", 2.0),
    ("peaceful", 2.2),
    ("grateful", 2.0),
    ("thankful", 2.7),
    ("proud", 2.1),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("better", 1.9),
    ("best", 3.2),
    ("ok", 1.2),
    ("okay", 0.9),
    ("fine", 0.8),
    ("productive", 1.7),
    ("accomplished", 1.8),
    ("success", 2.7),
    ("successful", 2.8),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("optimistic", 2.4),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("glad", 2.0),
    ("smile", 1.5),
    ("smiled", 1.6),
    ("laugh", 2.6),
    ("laughed", 2.0),
    ("beautiful", 2.9),
    ("energized", 2.0),
    ("motivated", 1.8),
    ("confident", 2.2),
    ("rested", 1.6),
    ("refreshed", 1.7),
    ("content", 1.5),
    ("satisfied", 1.8),
    ("win", 2.8),
    ("won", 2.7),
    ("kind", 2.4),
    ("friends", 2.1),
    ("support", 1.7),
    ("supported", 1.6),
    ("safe", 1.9),
    ("comfortable", 1.5),
    ("easy", 1.9),
    ("celebrate", 2.7),
    ("inspired", 2.2),
    ("thanks", 1.9),
    // negative
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("sad", -2.1),
    ("sadness", -1.9),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("hate", -2.7),
    ("hated", -3.2),
    ("angry", -2.3),
    ("anger", -2.7),
    ("mad", -2.2),
    ("anxious", -1.0),
    ("anxiety", -0.7),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("stressful", -2.1),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worrying", -1.4),
    ("tired", -1.9),
    ("exhausted", -1.5),
    ("drained", -1.5),
    ("lonely", -1.8),
    ("alone", -1.0),
    ("depressed", -2.3),
    ("depressing", -1.6),
    ("upset", -1.6),
    ("frustrated", -1.5),
    ("frustrating", -1.9),
    ("overwhelmed", -1.5),
    ("overwhelming", -1.1),
    ("hurt", -2.4),
    ("cry", -2.1),
    ("cried", -1.6),
    ("crying", -2.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("miserable", -2.2),
    ("scared", -1.9),
    ("afraid", -2.0),
    ("fear", -2.2),
    ("panic", -2.3),
    ("sick", -1.9),
    ("pain", -2.3),
    ("painful", -2.4),
    ("annoyed", -1.6),
    ("annoying", -1.8),
    ("bored", -1.1),
    ("boring", -1.3),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("hopeless", -2.0),
    ("helpless", -2.0),
    ("nervous", -1.1),
    ("tense", -1.4),
    ("guilty", -1.8),
    ("ashamed", -2.1),
    ("lost", -1.3),
    ("broken", -1.9),
    ("difficult", -1.5),
    ("hard", -0.4),
    ("problem", -1.7),
    ("problems", -1.7),
    ("argument", -1.5),
    ("fight", -1.6),
    ("conflict", -1.3),
    ("insomnia", -1.6),
    ("sleepless", -1.6),
    ("burnout", -2.0),
    ("deadline", -0.6),
    ("sorry", -0.3),
    ("unhappy", -1.8),
    ("grief", -2.2),
];

const BOOSTERS: &[&str] = &[
    "absolutely",
    "completely",
    "deeply",
    "extremely",
    "incredibly",
    "really",
    "so",
    "super",
    "totally",
    "truly",
    "very",
    "especially",
    "highly",
    "hugely",
    "most",
    "more",
    "utterly",
];

const DAMPENERS: &[&str] = &[
    "barely",
    "hardly",
    "kinda",
    "less",
    "little",
    "marginally",
    "partly",
    "slightly",
    "somewhat",
    "sorta",
];

/// Heads of two-word hedges ("kind of", "sort of") that act as a dampener.
const HEDGE_HEADS: &[&str] = &["kind", "sort"];

const NEGATIONS: &[&str] = &[
    "not",
    "no",
    "never",
    "none",
    "nobody",
    "nothing",
    "neither",
    "nor",
    "nowhere",
    "without",
    "cannot",
    "aint",
    "dont",
    "cant",
    "wont",
    "isnt",
    "wasnt",
    "arent",
    "didnt",
    "doesnt",
];

/// Lexicon-backed sentiment scorer. Construct once and share by reference.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashSet<&'static str>,
    dampeners: HashSet<&'static str>,
    negations: HashSet<&'static str>,
}

struct Token {
    lower: String,
    shouting: bool,
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
            boosters: BOOSTERS.iter().copied().collect(),
            dampeners: DAMPENERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Score `text`. Blank text is exactly neutral.
    pub fn score(&self, text: &str) -> SentimentScore {
        if text.trim().is_empty() {
            return 0.0;
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let caps_differential = {
            let shouting = tokens.iter().filter(|t| t.shouting).count();
            shouting > 0 && shouting < tokens.len()
        };

        let mut valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| self.token_valence(&tokens, i, token, caps_differential))
            .collect();

        apply_contrast(&tokens, &mut valences);

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            sum += punctuation_emphasis(text) * sum.signum();
        }

        normalize(sum)
    }

    fn token_valence(&self, tokens: &[Token], i: usize, token: &Token, caps_differential: bool) -> f64 {
        let Some(&base) = self.lexicon.get(token.lower.as_str()) else {
            return 0.0;
        };
        if is_hedge_head(tokens, i) {
            return 0.0;
        }

        let mut valence = base;
        if caps_differential && token.shouting {
            valence += CAPS_INCREMENT * base.signum();
        }

        for distance in 1..=LOOKBACK.min(i) {
            let prior = tokens[i - distance].lower.as_str();
            let decay = match distance {
                1 => 1.0,
                2 => 0.95,
                _ => 0.9,
            };
            if self.boosters.contains(prior) {
                valence += BOOSTER_INCREMENT * base.signum() * decay;
            } else if self.dampeners.contains(prior) || is_hedge_tail(tokens, i - distance) {
                valence -= BOOSTER_INCREMENT * base.signum() * decay;
            }
        }

        let negated = (1..=LOOKBACK.min(i)).any(|d| self.is_negation(&tokens[i - d].lower));
        if negated {
            valence *= NEGATION_SCALAR;
        }

        valence
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }
}

fn is_hedge_head(tokens: &[Token], i: usize) -> bool {
    HEDGE_HEADS.contains(&tokens[i].lower.as_str())
        && tokens.get(i + 1).is_some_and(|next| next.lower == "of")
}

/// The "of" closing a hedge carries the dampening, so it is counted once.
fn is_hedge_tail(tokens: &[Token], i: usize) -> bool {
    i > 0 && tokens[i].lower == "of" && is_hedge_head(tokens, i - 1)
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let word = raw
                .replace('\u{2019}', "'")
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .trim_matches('\'')
                .to_string();
            if word.is_empty() {
                return None;
            }
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            let shouting = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
            Some(Token {
                lower: word.to_lowercase(),
                shouting,
            })
        })
        .collect()
}

/// Text before the first "but" counts half, text after it counts one and a half.
fn apply_contrast(tokens: &[Token], valences: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < pivot {
            *valence *= 0.5;
        } else if i > pivot {
            *valence *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => 0.96,
    };
    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

fn normalize(sum: f64) -> SentimentScore {
    let score = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);
    (score * 10_000.0).round() / 10_000.0
}
