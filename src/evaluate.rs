//! Elementwise evaluation of a function selection over a sample grid.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{CatalogKey, Expression, SampleGrid, Series, errors::EvaluationError};

/// Which function to sample.
///
/// Catalog entries evaluate through closed-form rules. Free-form text is
/// parsed into an [`Expression`] restricted to whitelisted operators and
/// functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionSelection {
    Catalog(CatalogKey),
    Expression(Expression),
}

impl FunctionSelection {
    /// Parses free-form expression text.
    pub fn parse(text: &str) -> Result<Self, EvaluationError> {
        text.parse().map(FunctionSelection::Expression)
    }
}

impl Default for FunctionSelection {
    fn default() -> Self {
        FunctionSelection::Catalog(CatalogKey::default())
    }
}

impl From<CatalogKey> for FunctionSelection {
    fn from(key: CatalogKey) -> Self {
        FunctionSelection::Catalog(key)
    }
}

impl From<Expression> for FunctionSelection {
    fn from(expression: Expression) -> Self {
        FunctionSelection::Expression(expression)
    }
}

impl fmt::Display for FunctionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionSelection::Catalog(key) => write!(f, "{}", key.source()),
            FunctionSelection::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// Samples `selection` at every point of `grid`.
///
/// The returned series has one value per grid point. Names are resolved
/// before any sampling, and a non-finite value at any point fails the whole
/// evaluation: no partial series is produced.
pub fn evaluate(selection: &FunctionSelection, grid: &SampleGrid) -> Result<Series, EvaluationError> {
    debug!("evaluating '{}' over {} points", selection, grid.len());

    let values: Vec<f64> = match selection {
        FunctionSelection::Catalog(key) => grid.iter().map(|&x| key.evaluate_at(x)).collect(),
        FunctionSelection::Expression(expr) => {
            expr.resolve()?;
            grid.iter()
                .map(|&x| expr.evaluate_at(x))
                .collect::<Result<Vec<f64>, _>>()?
        }
    };

    if let Some((&x, &value)) = grid.iter().zip(&values).find(|(_, v)| !v.is_finite()) {
        return Err(EvaluationError::NonFinite { x, value });
    }

    Ok(Series::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::unit_grid;

    #[test]
    fn test_catalog_broadcasts_over_grid() {
        let series = evaluate(&CatalogKey::Cubic.into(), &unit_grid()).unwrap();
        assert_eq!(series.values(), &[-2.0, 2.0, 0.0, -2.0, 2.0]);
    }

    #[test]
    fn test_expression_matches_catalog() {
        let grid = SampleGrid::uniform(-5.0, 5.0, 101).unwrap();
        for key in CatalogKey::ALL {
            let from_catalog = evaluate(&key.into(), &grid).unwrap();
            let from_text = evaluate(&FunctionSelection::parse(key.source()).unwrap(), &grid).unwrap();
            assert_eq!(from_catalog, from_text, "{}", key);
        }
    }

    #[test]
    fn test_undefined_name_fails_before_sampling() {
        let selection = FunctionSelection::parse("x + t").unwrap();
        assert_eq!(
            evaluate(&selection, &unit_grid()),
            Err(EvaluationError::UndefinedName("t".to_string()))
        );
    }

    #[test]
    fn test_domain_error_reports_first_point() {
        let selection = FunctionSelection::parse("ln(x)").unwrap();
        let err = evaluate(&selection, &unit_grid()).unwrap_err();
        assert!(matches!(err, EvaluationError::NonFinite { x, .. } if x == -2.0));

        let selection = FunctionSelection::parse("1 / x").unwrap();
        let err = evaluate(&selection, &unit_grid()).unwrap_err();
        assert!(matches!(err, EvaluationError::NonFinite { x, .. } if x == 0.0));
    }

    #[test]
    fn test_serde_tagged() {
        let selection: FunctionSelection = serde_json::from_str(r#"{"catalog": "sine"}"#).unwrap();
        assert_eq!(selection, FunctionSelection::Catalog(CatalogKey::Sine));

        let selection: FunctionSelection =
            serde_json::from_str(r#"{"expression": "x^2 - 1"}"#).unwrap();
        assert!(matches!(selection, FunctionSelection::Expression(_)));
    }
}
