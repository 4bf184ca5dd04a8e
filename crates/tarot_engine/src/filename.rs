use sha2::{Digest, Sha256};

const MAX_STEM_LEN: usize = 80;

/// Stable output name for a page: `{slug(title)}--{short_hash(url)}.{extension}`.
pub fn deterministic_filename(title: Option<&str>, url: &str, extension: &str) -> String {
    let slug = slugify(title.unwrap_or("page"));
    let hash = short_hash(url);
    format!("{slug}--{hash}.{extension}")
}

/// Lowercase ASCII words joined by `_`; everything else separates words.
fn slugify(input: &str) -> String {
    let words: Vec<String> = input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    let mut slug = words.join("_");
    if slug.is_empty() {
        slug = "page".to_string();
    }
    slug.truncate(MAX_STEM_LEN);
    slug.trim_end_matches('_').to_string()
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).map(|byte| format!("{byte:02x}")).collect()
}
