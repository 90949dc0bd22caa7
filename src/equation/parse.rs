use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, map_res, not, recognize, value},
    multi::{many0, separated_list0, separated_list1},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
};

use crate::{Expression, Identifier, NumericConstant, Operator, errors::EvaluationError};

/// Parse whitespace (spaces, tabs, newlines)
fn ws<'a, P, O>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier, optionally dot-qualified (`x`, `pi`, `np.sin`)
fn identifier(input: &str) -> IResult<&str, Identifier> {
    map_res(
        recognize(separated_list1(
            char('.'),
            pair(alt((alpha1, tag("_"))), many0(alt((alphanumeric1, tag("_"))))),
        )),
        Identifier::parse,
    )
    .parse(input)
}

/// Parse a numeric constant (integer or float)
fn numeric_constant(input: &str) -> IResult<&str, NumericConstant> {
    map_res(recognize_float, |s: &str| s.parse::<NumericConstant>()).parse(input)
}

/// Parse a parenthesised expression
fn parentheses(input: &str) -> IResult<&str, Expression> {
    map(
        delimited(ws(char('(')), additive, ws(char(')'))),
        Expression::parentheses,
    )
    .parse(input)
}

/// Parse function parameters
fn function_parameters(input: &str) -> IResult<&str, Vec<Expression>> {
    delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), additive),
        ws(char(')')),
    )
    .parse(input)
}

/// Parse a function call
fn function_call(input: &str) -> IResult<&str, Expression> {
    map(pair(identifier, function_parameters), |(target, parameters)| {
        Expression::function_call(target, parameters)
    })
    .parse(input)
}

/// Parse primary expressions (atoms)
fn primary(input: &str) -> IResult<&str, Expression> {
    ws(alt((
        map(numeric_constant, Expression::Constant),
        // Try function call before variable since both start with identifier
        function_call,
        map(identifier, Expression::variable),
        parentheses,
    )))
    .parse(input)
}

/// Parse exponentiation (right-associative, `^` or `**`)
fn exponentiation(input: &str) -> IResult<&str, Expression> {
    let (input, base) = primary(input)?;

    if let Ok((input, _)) = ws(alt((tag("**"), tag("^")))).parse(input) {
        // The exponent may itself carry a sign: x^-2
        let (input, exponent) = unary(input)?;
        Ok((input, Expression::exponentiation(base, exponent)))
    } else {
        Ok((input, base))
    }
}

/// Parse unary expressions (unary operators)
fn unary(input: &str) -> IResult<&str, Expression> {
    alt((
        map(preceded(ws(char('+')), unary), |expr| {
            Expression::UnaryPlus(Box::new(expr))
        }),
        map(preceded(ws(char('-')), unary), Expression::unary_minus),
        exponentiation,
    ))
    .parse(input)
}

/// Parse multiplication and division (left-associative)
fn multiplicative(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut left) = unary(input)?;

    loop {
        let op_result = alt((
            value(Operator::Multiply, ws(terminated(char('*'), not(char('*'))))),
            value(Operator::Divide, ws(char('/'))),
        ))
        .parse(input);

        if let Ok((new_input, op)) = op_result {
            let (new_input, right) = unary(new_input)?;
            input = new_input;
            left = match op {
                Operator::Multiply => Expression::multiply(left, right),
                _ => Expression::divide(left, right),
            };
        } else {
            break;
        }
    }

    Ok((input, left))
}

/// Parse addition and subtraction (left-associative)
fn additive(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut left) = multiplicative(input)?;

    loop {
        let op_result = alt((
            value(Operator::Add, ws(char('+'))),
            value(Operator::Subtract, ws(char('-'))),
        ))
        .parse(input);

        if let Ok((new_input, op)) = op_result {
            let (new_input, right) = multiplicative(new_input)?;
            input = new_input;
            left = match op {
                Operator::Add => Expression::add(left, right),
                _ => Expression::subtract(left, right),
            };
        } else {
            break;
        }
    }

    Ok((input, left))
}

/// Deepest nesting of parentheses, prefix signs and powers accepted.
pub const MAX_NESTING: usize = 32;

/// Longest expression text accepted, in characters.
pub const MAX_LENGTH: usize = 1024;

/// Upper bound on how deeply the parser recurses for `input`.
///
/// Every open parenthesis adds a level, and so does every prefix sign or
/// power operator chained at one level. Binary `+ - * /` and argument commas
/// end a chain because the parser loops over those instead of recursing.
fn nesting_depth(input: &str) -> usize {
    // (depth of the enclosing levels, chain length at this level)
    let mut levels = vec![(0usize, 0usize)];
    let mut deepest = 0;
    let mut previous: Option<char> = None;
    let mut before_previous: Option<char> = None;
    let mut chars = input.chars().filter(|c| !c.is_whitespace()).peekable();

    while let Some(c) = chars.next() {
        let (base, chain) = levels.last().copied().unwrap_or((0, 0));
        let is_prefix = previous.is_none_or(|p| "(,+-*/^".contains(p));
        let is_exponent_sign = matches!(previous, Some('e' | 'E'))
            && before_previous.is_some_and(|p| p.is_ascii_digit() || p == '.');

        match c {
            '(' => levels.push((base + chain + 1, 0)),
            ')' => {
                if levels.len() > 1 {
                    levels.pop();
                }
            }
            '^' => bump_chain(&mut levels),
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                bump_chain(&mut levels);
            }
            '+' | '-' if is_prefix => bump_chain(&mut levels),
            '+' | '-' if is_exponent_sign => {}
            '+' | '-' | '*' | '/' | ',' => {
                if let Some(level) = levels.last_mut() {
                    level.1 = 0;
                }
            }
            _ => {}
        }

        if let Some((base, chain)) = levels.last() {
            deepest = deepest.max(base + chain);
        }
        before_previous = previous;
        previous = Some(c);
    }

    deepest
}

fn bump_chain(levels: &mut [(usize, usize)]) {
    if let Some(level) = levels.last_mut() {
        level.1 += 1;
    }
}

/// Parse a complete expression, leaving any unparsed remainder
fn expression(input: &str) -> IResult<&str, Expression> {
    ws(additive).parse(input)
}

/// Parses `input` in full, reporting where parsing stopped on failure.
///
/// Text nested deeper than [`MAX_NESTING`] or longer than [`MAX_LENGTH`] is
/// rejected before parsing starts.
pub fn parse_expression(input: &str) -> Result<Expression, EvaluationError> {
    let depth = nesting_depth(input);
    if depth > MAX_NESTING {
        return Err(EvaluationError::TooDeep {
            depth,
            max: MAX_NESTING,
        });
    }
    let length = input.chars().count();
    if length > MAX_LENGTH {
        return Err(EvaluationError::TooLong {
            length,
            max: MAX_LENGTH,
        });
    }

    match expression(input) {
        Ok(("", expr)) => Ok(expr),
        Ok((remainder, _)) => Err(EvaluationError::Syntax {
            remainder: remainder.to_string(),
        }),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(EvaluationError::Syntax {
            remainder: e.input.to_string(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(EvaluationError::Syntax {
            remainder: input.to_string(),
        }),
    }
}
