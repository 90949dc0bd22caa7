use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use function::Function;
use operator::Operator;

use crate::errors::EvaluationError;
use crate::equation::parse::parse_expression;

use super::{Identifier, NumericConstant};

/// An expression tree over the single grid variable `x`.
///
/// Only arithmetic, powers, named constants and the functions in
/// [`Function`] can be represented; nothing in the tree can reach outside
/// the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(NumericConstant),
    /// A bare name: the grid variable or a named constant
    Variable(Identifier),
    Parentheses(Box<Expression>),
    Exponentiation(Box<Expression>, Box<Expression>),
    UnaryPlus(Box<Expression>),
    UnaryMinus(Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Add(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    FunctionCall {
        target: Identifier,
        parameters: Vec<Expression>,
    },
}

impl Expression {
    pub fn constant(value: f64) -> Self {
        Expression::Constant(NumericConstant(value))
    }

    pub fn variable(identifier: Identifier) -> Self {
        Expression::Variable(identifier)
    }

    pub fn parentheses(expr: Expression) -> Self {
        Expression::Parentheses(Box::new(expr))
    }

    pub fn exponentiation(base: Expression, exponent: Expression) -> Self {
        Expression::Exponentiation(Box::new(base), Box::new(exponent))
    }

    pub fn unary_minus(expr: Expression) -> Self {
        Expression::UnaryMinus(Box::new(expr))
    }

    pub fn multiply(lhs: Expression, rhs: Expression) -> Self {
        Expression::Multiply(Box::new(lhs), Box::new(rhs))
    }

    pub fn divide(lhs: Expression, rhs: Expression) -> Self {
        Expression::Divide(Box::new(lhs), Box::new(rhs))
    }

    pub fn add(lhs: Expression, rhs: Expression) -> Self {
        Expression::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn subtract(lhs: Expression, rhs: Expression) -> Self {
        Expression::Subtract(Box::new(lhs), Box::new(rhs))
    }

    pub fn function_call(target: Identifier, parameters: Vec<Expression>) -> Self {
        Expression::FunctionCall { target, parameters }
    }

    /// Checks every name and call against the supported set without
    /// evaluating anything.
    pub fn resolve(&self) -> Result<(), EvaluationError> {
        match self {
            Expression::Constant(_) => Ok(()),
            Expression::Variable(id) => {
                if is_grid_variable(id) || named_constant(id).is_some() {
                    Ok(())
                } else {
                    Err(EvaluationError::UndefinedName(id.raw().to_string()))
                }
            }
            Expression::Parentheses(expr)
            | Expression::UnaryPlus(expr)
            | Expression::UnaryMinus(expr) => expr.resolve(),
            Expression::Exponentiation(lhs, rhs)
            | Expression::Multiply(lhs, rhs)
            | Expression::Divide(lhs, rhs)
            | Expression::Add(lhs, rhs)
            | Expression::Subtract(lhs, rhs) => {
                lhs.resolve()?;
                rhs.resolve()
            }
            Expression::FunctionCall { target, parameters } => {
                let function = Function::resolve(target)?;
                function.check_arity(parameters.len())?;
                parameters.iter().try_for_each(Expression::resolve)
            }
        }
    }

    /// Evaluates the expression with the grid variable bound to `x`.
    pub fn evaluate_at(&self, x: f64) -> Result<f64, EvaluationError> {
        let value = match self {
            Expression::Constant(value) => value.0,
            Expression::Variable(id) => {
                if is_grid_variable(id) {
                    x
                } else {
                    named_constant(id)
                        .ok_or_else(|| EvaluationError::UndefinedName(id.raw().to_string()))?
                }
            }
            Expression::Parentheses(expr) | Expression::UnaryPlus(expr) => expr.evaluate_at(x)?,
            Expression::UnaryMinus(expr) => -expr.evaluate_at(x)?,
            Expression::Exponentiation(base, exponent) => {
                power(base.evaluate_at(x)?, exponent.evaluate_at(x)?)
            }
            Expression::Multiply(lhs, rhs) => lhs.evaluate_at(x)? * rhs.evaluate_at(x)?,
            Expression::Divide(lhs, rhs) => lhs.evaluate_at(x)? / rhs.evaluate_at(x)?,
            Expression::Add(lhs, rhs) => lhs.evaluate_at(x)? + rhs.evaluate_at(x)?,
            Expression::Subtract(lhs, rhs) => lhs.evaluate_at(x)? - rhs.evaluate_at(x)?,
            Expression::FunctionCall { target, parameters } => {
                let function = Function::resolve(target)?;
                function.check_arity(parameters.len())?;
                function.apply(parameters[0].evaluate_at(x)?)
            }
        };
        Ok(value)
    }
}

/// Integral exponents go through `powi`.
fn power(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

fn is_grid_variable(id: &Identifier) -> bool {
    !id.is_qualified() && id.normalized() == "x"
}

fn named_constant(id: &Identifier) -> Option<f64> {
    if !function::is_known_qualifier(id.qualifier()) {
        return None;
    }
    match id.normalized() {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, "{}", value),
            Expression::Variable(id) => write!(f, "{}", id),
            Expression::Parentheses(expr) => write!(f, "({})", expr),
            Expression::Exponentiation(base, exponent) => {
                write!(f, "{}{}{}", base, Operator::Exponentiation, exponent)
            }
            Expression::UnaryPlus(expr) => write!(f, "{}{}", Operator::UnaryPlus, expr),
            Expression::UnaryMinus(expr) => write!(f, "{}{}", Operator::UnaryMinus, expr),
            Expression::Multiply(lhs, rhs) => write!(f, "{} {} {}", lhs, Operator::Multiply, rhs),
            Expression::Divide(lhs, rhs) => write!(f, "{} {} {}", lhs, Operator::Divide, rhs),
            Expression::Add(lhs, rhs) => write!(f, "{} {} {}", lhs, Operator::Add, rhs),
            Expression::Subtract(lhs, rhs) => write!(f, "{} {} {}", lhs, Operator::Subtract, rhs),
            Expression::FunctionCall { target, parameters } => {
                write!(f, "{}(", target)?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl FromStr for Expression {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        parse_expression(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Expression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub mod operator {
    //! ### Operators
    //!
    //! Supported operators in precedence order. Exponentiation and the unary
    //! operators associate right-to-left; the rest left-to-right.
    //!
    //! | Operators | Precedence Group                 |
    //! |:---------:|:---------------------------------|
    //! | ( )       | Parentheses                      |
    //! | ^ **      | Exponentiation                   |
    //! | + –       | Unary operators                  |
    //! | * /       | Multiplication, division         |
    //! | + –       | Addition, subtraction            |
    //!
    //! Exponentiation binds tighter than a unary minus on its left, so
    //! `-x^2` is `-(x^2)`.

    use std::fmt;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub enum Operator {
        Exponentiation,
        UnaryPlus,
        UnaryMinus,
        Multiply,
        Divide,
        Add,
        Subtract,
    }

    impl fmt::Display for Operator {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let symbol = match self {
                Operator::Exponentiation => "^",
                Operator::UnaryPlus => "+",
                Operator::UnaryMinus => "-",
                Operator::Multiply => "*",
                Operator::Divide => "/",
                Operator::Add => "+",
                Operator::Subtract => "-",
            };
            write!(f, "{}", symbol)
        }
    }
}

pub mod function {
    //! ### Function calls
    //!
    //! The whitelisted one-argument functions. A call may carry an `np.` or
    //! `numpy.` qualifier, e.g. `np.sin(x)`; any other qualifier is treated as
    //! an unknown function.

    use crate::Identifier;
    use crate::errors::EvaluationError;

    const KNOWN_QUALIFIERS: [&str; 2] = ["np", "numpy"];

    pub(crate) fn is_known_qualifier(qualifier: Option<&str>) -> bool {
        qualifier.is_none_or(|q| KNOWN_QUALIFIERS.contains(&q))
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub enum Function {
        Sin,
        Cos,
        Tan,
        Exp,
        /// Natural logarithm, also spelled `log`
        Ln,
        Sqrt,
        Abs,
    }

    impl Function {
        pub fn from_name(name: &str) -> Option<Self> {
            match name.to_ascii_lowercase().as_str() {
                "sin" => Some(Function::Sin),
                "cos" => Some(Function::Cos),
                "tan" => Some(Function::Tan),
                "exp" => Some(Function::Exp),
                "ln" | "log" => Some(Function::Ln),
                "sqrt" => Some(Function::Sqrt),
                "abs" => Some(Function::Abs),
                _ => None,
            }
        }

        pub fn resolve(target: &Identifier) -> Result<Self, EvaluationError> {
            if !is_known_qualifier(target.qualifier()) {
                return Err(EvaluationError::UnknownFunction(target.raw().to_string()));
            }
            Function::from_name(target.normalized())
                .ok_or_else(|| EvaluationError::UnknownFunction(target.raw().to_string()))
        }

        pub fn name(&self) -> &'static str {
            match self {
                Function::Sin => "sin",
                Function::Cos => "cos",
                Function::Tan => "tan",
                Function::Exp => "exp",
                Function::Ln => "ln",
                Function::Sqrt => "sqrt",
                Function::Abs => "abs",
            }
        }

        pub fn arity(&self) -> usize {
            1
        }

        pub fn check_arity(&self, found: usize) -> Result<(), EvaluationError> {
            if found == self.arity() {
                Ok(())
            } else {
                Err(EvaluationError::Arity {
                    name: self.name().to_string(),
                    expected: self.arity(),
                    found,
                })
            }
        }

        pub fn apply(&self, value: f64) -> f64 {
            match self {
                Function::Sin => value.sin(),
                Function::Cos => value.cos(),
                Function::Tan => value.tan(),
                Function::Exp => value.exp(),
                Function::Ln => value.ln(),
                Function::Sqrt => value.sqrt(),
                Function::Abs => value.abs(),
            }
        }
    }
}
