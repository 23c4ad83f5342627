//! Typst source builder for consultation reports.
//!
//! Builds a complete Typst document from a [`GeneratedReport`]: a centered
//! title block, a right-aligned generation date, then one styled block per
//! classified line of the model output. Pure string assembly; compilation
//! lives in [`super::engine`].

use super::classify::{classify, LineRole};
use super::models::GeneratedReport;

/// Page setup and shared colors. Letter page, 72pt margins on all sides.
const PRELUDE: &str = r##"#set page(paper: "us-letter", margin: (left: 72pt, right: 72pt, top: 72pt, bottom: 72pt))
#set text(size: 11pt)
#set par(justify: true)
#let navy = rgb("#000080")
#let lightgrey = luma(211)
#let darkgrey = luma(169)
"##;

/// Escape characters that Typst treats as markup inside content blocks.
/// `-` and `+` are included so a literal bullet marker at the start of a
/// block stays a literal marker instead of becoming a Typst list item.
pub fn escape_markup(value: &str) -> String {
    const SPECIAL: &[char] = &[
        '\\', '#', '$', '*', '_', '[', ']', '@', '`', '<', '>', '~', '/', '-', '+',
    ];
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if SPECIAL.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build the full Typst source for a report.
pub fn build_source(report: &GeneratedReport) -> String {
    let mut doc = String::from(PRELUDE);

    // Title block: uppercased document type and business name, centered,
    // bold, navy; then the generation date, right-aligned.
    push_title_line(&mut doc, &report.report_title.to_uppercase());
    push_title_line(&mut doc, &format!("For: {}", report.owning_business_name));
    doc.push_str("#v(20pt)\n");
    doc.push_str(&format!(
        "#align(right, text(fill: darkgrey)[Date: {}])\n",
        escape_markup(&report.generated_at.format("%B %d, %Y").to_string())
    ));
    doc.push_str("#v(20pt)\n");

    for line in report.raw_text.lines() {
        let classified = classify(line);
        let text = escape_markup(classified.text.trim());
        match classified.role {
            // Blank lines emit nothing, not even spacing.
            LineRole::Blank => continue,
            LineRole::Header | LineRole::UppercaseHeader => {
                doc.push_str(&format!(
                    "#block(above: 15pt, below: 10pt, width: 100%, stroke: 1pt + lightgrey, inset: 5pt, radius: 2pt, text(size: 13pt, weight: \"bold\", fill: navy)[{text}])\n"
                ));
                doc.push_str("#v(10pt)\n");
            }
            LineRole::Bullet => {
                doc.push_str(&format!(
                    "#block(above: 3pt, below: 3pt, pad(left: 30pt)[{text}])\n"
                ));
                doc.push_str("#v(6pt)\n");
            }
            LineRole::Signature => {
                doc.push_str(&format!("#block(above: 15pt, below: 15pt)[{text}]\n"));
                doc.push_str("#v(6pt)\n");
            }
            LineRole::Body => {
                doc.push_str(&format!(
                    "#block(above: 6pt, below: 6pt)[#h(20pt){text}]\n"
                ));
                doc.push_str("#v(6pt)\n");
            }
        }
    }

    doc
}

fn push_title_line(doc: &mut String, text: &str) {
    doc.push_str(&format!(
        "#align(center, text(size: 16pt, weight: \"bold\", fill: navy)[{}])\n",
        escape_markup(text)
    ));
    doc.push_str("#v(20pt)\n");
}
