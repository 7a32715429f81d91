use std::fmt;

use crate::providers::base::Usage;

/// USD per million tokens for one model family, matched by name prefix.
struct ModelPrice {
    prefix: &'static str,
    input: f64,
    output: f64,
}

const PRICES: &[ModelPrice] = &[
    ModelPrice {
        prefix: "claude-opus-4",
        input: 15.0,
        output: 75.0,
    },
    ModelPrice {
        prefix: "claude-sonnet-4",
        input: 3.0,
        output: 15.0,
    },
    ModelPrice {
        prefix: "claude-3-7-sonnet",
        input: 3.0,
        output: 15.0,
    },
    ModelPrice {
        prefix: "claude-3-5-sonnet",
        input: 3.0,
        output: 15.0,
    },
    ModelPrice {
        prefix: "claude-3-5-haiku",
        input: 0.80,
        output: 4.0,
    },
    ModelPrice {
        prefix: "claude-3-opus",
        input: 15.0,
        output: 75.0,
    },
    ModelPrice {
        prefix: "claude-3-haiku",
        input: 0.25,
        output: 1.25,
    },
];

/// Dollar cost of one completion, split by direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub input_cost: f64,
    pub output_cost: f64,
}

impl CostEstimate {
    pub fn total(&self) -> f64 {
        self.input_cost + self.output_cost
    }
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.4}", self.total())
    }
}

/// Estimate the cost of a completion from API-reported usage. Returns `None`
/// when the model is unknown or the API omitted token counts.
pub fn estimate(model: &str, usage: &Usage) -> Option<CostEstimate> {
    let price = PRICES
        .iter()
        .filter(|p| model.starts_with(p.prefix))
        .max_by_key(|p| p.prefix.len())?;

    let input_tokens = usage.input_tokens?;
    let output_tokens = usage.output_tokens?;

    Some(CostEstimate {
        input_cost: input_tokens as f64 * price.input / 1_000_000.0,
        output_cost: output_tokens as f64 * price.output / 1_000_000.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_known_model() {
        let usage = Usage::new(Some(1_000_000), Some(100_000));
        let cost = estimate("claude-opus-4-20250514", &usage).unwrap();
        assert!((cost.input_cost - 15.0).abs() < 1e-9);
        assert!((cost.output_cost - 7.5).abs() < 1e-9);
        assert!((cost.total() - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_matches_dated_model_names() {
        let usage = Usage::new(Some(1_000_000), Some(0));
        let haiku = estimate("claude-3-5-haiku-20241022", &usage).unwrap();
        assert!((haiku.input_cost - 0.80).abs() < 1e-9);

        let old_haiku = estimate("claude-3-haiku-20240307", &usage).unwrap();
        assert!((old_haiku.input_cost - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_unknown_model() {
        let usage = Usage::new(Some(100), Some(100));
        assert!(estimate("gpt-4o", &usage).is_none());
        assert!(estimate("", &usage).is_none());
    }

    #[test]
    fn test_estimate_missing_usage() {
        assert!(estimate("claude-opus-4-20250514", &Usage::new(None, Some(5))).is_none());
        assert!(estimate("claude-opus-4-20250514", &Usage::new(Some(5), None)).is_none());
    }

    #[test]
    fn test_display_rounds_to_cents_precision() {
        let cost = CostEstimate {
            input_cost: 0.00123,
            output_cost: 0.00044,
        };
        assert_eq!(cost.to_string(), "$0.0017");
    }
}
