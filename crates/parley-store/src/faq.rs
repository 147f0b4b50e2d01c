//! Keyword-overlap FAQ lookup.

use crate::catalog::Catalog;

/// Fixed reply when neither the FAQ nor the catalog matches.
pub const FAQ_FALLBACK: &str =
    "I don't have an answer for that yet, but I can connect you with the team if you'd like.";

#[derive(Debug, Clone)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Static question/answer index searched by token overlap.
pub struct Faq {
    entries: Vec<FaqEntry>,
}

impl Faq {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn seeded() -> Self {
        let entry = |question: &str, answer: &str| FaqEntry {
            question: question.into(),
            answer: answer.into(),
        };
        Self::new(vec![
            entry(
                "What payment methods do you accept?",
                "We accept all major cards, UPI, and net banking.",
            ),
            entry(
                "How long does shipping take?",
                "Orders ship within 2 business days and arrive in 5 to 7.",
            ),
            entry(
                "What is your return policy?",
                "Unused items can be returned within 30 days for a full refund.",
            ),
            entry(
                "Do your t-shirts and hoodies run true to size?",
                "Yes, sizes S through XL are standard unisex fits.",
            ),
            entry(
                "Is there a discount for bulk orders?",
                "Orders of 25 or more items get a 10 percent discount.",
            ),
        ])
    }

    /// Answer the query by token overlap against FAQ questions first, then
    /// by substring match against product names, else the fixed fallback.
    pub fn search(&self, query: &str, catalog: &Catalog) -> String {
        let tokens: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .filter(|t| t.len() > 2)
            .map(str::to_string)
            .collect();

        if !tokens.is_empty() {
            let mut best: Option<(&FaqEntry, usize)> = None;
            for entry in &self.entries {
                let question = entry.question.to_lowercase();
                let score = tokens.iter().filter(|t| question.contains(*t)).count();
                if score > best.map_or(0, |(_, s)| s) {
                    best = Some((entry, score));
                }
            }
            if let Some((entry, _)) = best {
                return entry.answer.clone();
            }
        }

        let q = query.to_lowercase();
        if let Some(product) = catalog
            .all()
            .iter()
            .find(|p| p.name.to_lowercase().contains(&q) || q.contains(&p.name.to_lowercase()))
        {
            return format!(
                "{} — {}. {} {:.0}.",
                product.name, product.description, product.currency, product.price
            );
        }

        FAQ_FALLBACK.to_string()
    }
}
