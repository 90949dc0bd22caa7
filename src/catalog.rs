//! # Function catalog
//!
//! The fixed set of functions offered for exploration. Each entry evaluates
//! through its own closed-form rule; no text is interpreted on this path.
//! Every entry also carries its source text, which parses to an equivalent
//! [`Expression`].
//!
//! | Key       | Function        | Inflection points          |
//! |-----------|-----------------|----------------------------|
//! | `cubic`   | `x^3 - 3x`      | `x = 0`                    |
//! | `quartic` | `x^4 - 4x^2`    | `x = ±sqrt(2/3)`           |
//! | `sine`    | `sin(x)`        | `x = kπ`                   |
//! | `quintic` | `x^5 - 5x`      | `x = 0`                    |

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Expression, errors::EvaluationError, equation::parse_expression};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKey {
    #[default]
    Cubic,
    Quartic,
    Sine,
    Quintic,
}

impl CatalogKey {
    /// All entries in display order.
    pub const ALL: [CatalogKey; 4] = [
        CatalogKey::Cubic,
        CatalogKey::Quartic,
        CatalogKey::Sine,
        CatalogKey::Quintic,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CatalogKey::Cubic => "cubic",
            CatalogKey::Quartic => "quartic",
            CatalogKey::Sine => "sine",
            CatalogKey::Quintic => "quintic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CatalogKey::Cubic => "Cubic Function: x³ - 3x",
            CatalogKey::Quartic => "Quartic Function: x⁴ - 4x²",
            CatalogKey::Sine => "Sine Wave: sin(x)",
            CatalogKey::Quintic => "Quintic Function: x⁵ - 5x",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            CatalogKey::Cubic => "x^3 - 3*x",
            CatalogKey::Quartic => "x^4 - 4*x^2",
            CatalogKey::Sine => "sin(x)",
            CatalogKey::Quintic => "x^5 - 5*x",
        }
    }

    /// Evaluates the entry at a single point.
    pub fn evaluate_at(&self, x: f64) -> f64 {
        match self {
            CatalogKey::Cubic => x.powi(3) - 3.0 * x,
            CatalogKey::Quartic => x.powi(4) - 4.0 * x.powi(2),
            CatalogKey::Sine => x.sin(),
            CatalogKey::Quintic => x.powi(5) - 5.0 * x,
        }
    }

    /// Parses [`CatalogKey::source`] into an expression tree.
    pub fn expression(&self) -> Result<Expression, EvaluationError> {
        parse_expression(self.source())
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogKeyParseError {
    #[error("Unknown function '{0}', expected one of: cubic, quartic, sine, quintic")]
    InvalidValue(String),
}

impl FromStr for CatalogKey {
    type Err = CatalogKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CatalogKey::ALL
            .into_iter()
            .find(|key| key.key() == wanted)
            .ok_or_else(|| CatalogKeyParseError::InvalidValue(s.to_string()))
    }
}
