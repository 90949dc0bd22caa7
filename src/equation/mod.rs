pub mod expression;
pub mod identifier;
pub mod numeric;
pub mod parse;

pub use expression::{Expression, function::Function, operator::Operator};
pub use identifier::{Identifier, IdentifierError};
pub use numeric::{NumericConstant, NumericConstantError};
pub use parse::parse_expression;
