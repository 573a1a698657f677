//! Bullet rendering
//!
//! Selected units are regrouped by their owning sentence so clauses of one
//! sentence end up on one line.

use std::collections::BTreeMap;

use crate::types::Unit;

/// Renders picked units as `- ` prefixed lines.
#[derive(Debug, Clone)]
pub struct BulletBuilder {
    min_bullets: usize,
}

impl Default for BulletBuilder {
    fn default() -> Self {
        Self::new(3)
    }
}

impl BulletBuilder {
    pub fn new(min_bullets: usize) -> Self {
        Self { min_bullets }
    }

    /// Bullet lines for `picked` (indexes into `units`, in document order).
    ///
    /// One line per sentence; when that gives fewer than the minimum number
    /// of lines, one line per unit instead.
    pub fn bullets(&self, units: &[Unit], picked: &[usize]) -> Vec<String> {
        let selected: Vec<&Unit> = picked.iter().filter_map(|&i| units.get(i)).collect();

        let mut groups: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for unit in &selected {
            groups
                .entry(unit.sentence_id)
                .or_default()
                .push(unit.text.as_str());
        }

        if groups.len() >= self.min_bullets {
            groups
                .values()
                .map(|texts| bullet_line(&texts.join(", ")))
                .collect()
        } else {
            selected.iter().map(|unit| bullet_line(&unit.text)).collect()
        }
    }

    /// Bullets joined by newlines.
    pub fn render(&self, units: &[Unit], picked: &[usize]) -> String {
        self.bullets(units, picked).join("\n")
    }
}

fn bullet_line(text: &str) -> String {
    let collapsed: Vec<&str> = text.split_whitespace().collect();
    format!("- {}", collapsed.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(index: usize, sentence_id: usize, text: &str) -> Unit {
        Unit {
            index,
            text: text.to_string(),
            sentence_id,
            paragraph_index: 0,
            position_in_paragraph: sentence_id,
            sentence_count_in_paragraph: 1,
            raw_tokens: Vec::new(),
            tokens: Vec::new(),
            pos_tags: Vec::new(),
            ner_tags: Vec::new(),
            noun_phrases: Vec::new(),
        }
    }

    #[test]
    fn test_groups_by_sentence() {
        let units = vec![
            unit(0, 0, "Doanh thu tăng"),
            unit(1, 0, "lợi nhuận   giảm"),
            unit(2, 1, "Chi phí ổn định."),
            unit(3, 2, "Công ty mở rộng."),
        ];
        let rendered = BulletBuilder::default().render(&units, &[0, 1, 2, 3]);
        assert_eq!(
            rendered,
            "- Doanh thu tăng, lợi nhuận giảm\n- Chi phí ổn định.\n- Công ty mở rộng."
        );
    }

    #[test]
    fn test_too_few_groups_falls_back_to_units() {
        let units = vec![
            unit(0, 0, "Doanh thu tăng"),
            unit(1, 0, "lợi nhuận giảm"),
            unit(2, 1, "Chi phí ổn định."),
        ];
        let bullets = BulletBuilder::default().bullets(&units, &[0, 1, 2]);
        assert_eq!(
            bullets,
            vec!["- Doanh thu tăng", "- lợi nhuận giảm", "- Chi phí ổn định."]
        );
    }

    #[test]
    fn test_empty_selection() {
        assert!(BulletBuilder::default().render(&[], &[]).is_empty());
    }
}
