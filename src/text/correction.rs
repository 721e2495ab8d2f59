use crate::text::medicine_db::all_medicines;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::RwLock;

static FORM_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:tab|cap|inj|susp|sol|syp|oint|cream)\.?\s+").expect("prefix pattern is valid")
});

const MIN_NAME_LEN: usize = 3;
const MAX_CACHE_ENTRIES: usize = 256;

/// Similarity in 0..=100 based on the longest common subsequence,
/// `2 * lcs / (len_a + len_b)`, compared case-insensitively.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    let lcs = prev[b.len()];

    ((200 * lcs + total / 2) / total) as u8
}

/// Maps OCR-mangled medication names onto the known medicine list.
pub struct NameCorrector {
    threshold: u8,
    cache: RwLock<HashMap<String, String>>,
}

impl NameCorrector {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn correct(&self, name: &str) -> String {
        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(name) {
                return hit.clone();
            }
        }

        let corrected = self.lookup(name);

        if let Ok(mut cache) = self.cache.write() {
            if cache.len() >= MAX_CACHE_ENTRIES {
                cache.clear();
            }
            cache.insert(name.to_string(), corrected.clone());
        }
        corrected
    }

    fn lookup(&self, name: &str) -> String {
        let cleaned = FORM_PREFIX_RE.replace(name.trim(), "");
        let cleaned = cleaned.trim();

        if cleaned.chars().count() < MIN_NAME_LEN {
            return name.to_string();
        }

        if let Some(exact) = all_medicines().find(|known| known.eq_ignore_ascii_case(cleaned)) {
            return exact.to_string();
        }

        let mut matches: Vec<(&str, u8)> = all_medicines()
            .map(|known| (known, similarity(cleaned, known)))
            .filter(|(_, score)| *score >= self.threshold)
            .collect();
        matches.sort_by(|a, b| b.1.cmp(&a.1));

        match matches.first() {
            Some((best, score)) => {
                if matches.len() > 1 {
                    tracing::debug!("Multiple medication matches for '{}': {:?}", name, matches);
                }
                tracing::debug!("Corrected medication '{}' to '{}' (score {})", name, best, score);
                best.to_string()
            }
            None => name.to_string(),
        }
    }
}

impl Default for NameCorrector {
    fn default() -> Self {
        Self::new(80)
    }
}
