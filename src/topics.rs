//! Search subjects: the built-in list plus env/file augmentation.

use ahash::AHashSet;

pub const EXTRA_SUBJECTS_ENV: &str = "YTLINKS_EXTRA_SUBJECTS";
pub const SUBJECTS_FILE_ENV: &str = "YTLINKS_SUBJECTS_FILE";

/// Built-in subjects searched by the default run.
pub fn default_subjects() -> Vec<String> {
    let defaults = [
        "Canadian politics",
        "Canadian news",
        "Canadian entertainment",
        "Canadian sports",
        "Canadian technology",
        "Canadian economy",
        "Canadian culture",
        "Canadian history",
        "Canadian education",
        "Canadian healthcare",
        "Canadian travel & tourism",
        "Canadian environment & climate",
        "Canadian Indigenous issues",
        "Canadian science",
        "Canadian business",
        "Canadian weather events",
        "Canadian crime & justice",
        "Canadian military",
        "Canadian government updates",
        "Canadian social issues",
        "Canadian music",
        "Canadian movies & TV shows",
        "Canadian food",
        "Canadian festivals & events",
    ];
    normalize_subjects(defaults)
}

/// Trim, drop empties and remove case-insensitive repeats, keeping first-seen order.
pub fn normalize_subjects<I, S>(subjects: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = AHashSet::new();
    subjects
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

/// Append subjects from the environment to `target` (in place), then normalize.
/// - YTLINKS_EXTRA_SUBJECTS: `;`-separated subjects
/// - YTLINKS_SUBJECTS_FILE: path to a newline-separated file of subjects
pub fn merge_extra_subjects(target: &mut Vec<String>) {
    if let Ok(s) = std::env::var(EXTRA_SUBJECTS_ENV) {
        target.extend(s.split(';').map(str::to_string));
    }

    if let Ok(path) = std::env::var(SUBJECTS_FILE_ENV) {
        if !path.trim().is_empty() {
            match std::fs::read_to_string(&path) {
                Ok(body) => target.extend(body.lines().map(str::to_string)),
                Err(e) => tracing::warn!("{} is set but cannot be read: {} ({})", SUBJECTS_FILE_ENV, path, e),
            }
        }
    }

    *target = normalize_subjects(target.iter());
}
