//! Line classifier for raw model output.
//!
//! Every line of a generated report is assigned exactly one semantic role by
//! an ordered rule table. The table order is a behavioral contract: the first
//! matching rule wins, so a line like "# Signature" is a header, never a
//! signature block.

/// Semantic role of a single report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Header,
    UppercaseHeader,
    Bullet,
    Signature,
    Body,
    Blank,
}

/// A raw line paired with its role and display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub text: String,
    pub role: LineRole,
}

/// Markers recognized at the start of a bullet line.
pub const BULLET_MARKERS: &[char] = &['-', '*', '•'];

/// Substrings that mark a signature block, matched case-insensitively.
pub const SIGNATURE_TOKENS: &[&str] = &["signature", "sign", "date:"];

/// Ordered rule table; evaluated top to bottom, first match wins.
const RULES: &[(fn(&str) -> bool, LineRole)] = &[
    (is_blank, LineRole::Blank),
    (is_hash_header, LineRole::Header),
    (is_uppercase_header, LineRole::UppercaseHeader),
    (is_bullet, LineRole::Bullet),
    (is_signature, LineRole::Signature),
];

/// Classify a single line. Deterministic and total: every string gets a role.
pub fn classify(line: &str) -> ClassifiedLine {
    for (matches, role) in RULES {
        if matches(line) {
            return ClassifiedLine {
                text: display_text(line, *role),
                role: *role,
            };
        }
    }
    ClassifiedLine {
        text: line.to_string(),
        role: LineRole::Body,
    }
}

/// Text the renderer should emit for a line of the given role.
fn display_text(line: &str, role: LineRole) -> String {
    match role {
        LineRole::Blank => String::new(),
        // Headers drop the leading '#' run and surrounding whitespace.
        LineRole::Header => line.trim().trim_start_matches('#').trim().to_string(),
        LineRole::UppercaseHeader | LineRole::Bullet => line.trim().to_string(),
        LineRole::Signature | LineRole::Body => line.to_string(),
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_hash_header(line: &str) -> bool {
    line.trim().starts_with('#')
}

fn is_uppercase_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() > 3
        && trimmed.chars().any(|ch| ch.is_uppercase())
        && !trimmed.chars().any(|ch| ch.is_lowercase())
}

fn is_bullet(line: &str) -> bool {
    line.trim().starts_with(BULLET_MARKERS)
}

fn is_signature(line: &str) -> bool {
    let lowered = line.to_lowercase();
    SIGNATURE_TOKENS.iter().any(|token| lowered.contains(token))
}
