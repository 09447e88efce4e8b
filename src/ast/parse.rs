use pest::Parser;
use pest::iterators::Pair;
use pest::error::{Error, ErrorVariant};

use pest_derive::*;
use crate::ast::{Expression, Operator, Proposition, Token, NEGATION};
use crate::error::ValidationError;
use crate::prover::{Body, Clause, Operand};

#[derive(Parser)]
#[grammar = "../grammar.pest"]
pub struct Grammar;

/// Check that `text` is a fact or a horn-like rule, producing the clause.
/// `text` must already be free of whitespace and aliases
pub fn validate_clause(text: &str) -> Result<Clause, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    // catch what the grammar would only report as "unexpected input"
    let mut implications = 0;
    for (position, symbol) in text.chars().enumerate() {
        match Token::from_symbol(symbol) {
            None => return Err(ValidationError::UnrecognizedSymbol { symbol, position }),
            Some(Token::Open) | Some(Token::Close) | Some(Token::Operator(Operator::Iff)) => {
                return Err(ValidationError::Unsupported { symbol, position });
            }
            Some(Token::Operator(Operator::Implies)) => {
                implications += 1;
                if implications > 1 {
                    return Err(ValidationError::ChainedImplication { position });
                }
            }
            Some(_) => {}
        }
    }
    if implications == 0 && text.chars().count() > 1 {
        return Err(ValidationError::MissingImplication);
    }

    let pairs = Grammar::parse(Rule::clause, text).map_err(explain)?;

    let mut body = None;
    let mut operands = Vec::new();
    let mut connective = None;
    let mut head = None;
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::fact => {
                return Proposition::from_text(pair.as_str())
                    .map(Clause::Fact)
                    .ok_or_else(|| unexpected(&pair));
            }
            Rule::body => body = Some(pair.as_str()),
            Rule::operand => operands.push(parse_operand(&pair)?),
            Rule::and | Rule::or => {
                let current = connective_of(&pair);
                match connective {
                    None => connective = Some(current),
                    // every connective in a body must agree with the first
                    Some(first) if first != current => {
                        return Err(ValidationError::MixedConnectives {
                            first,
                            second: current,
                            position: pair.as_span().start(),
                        });
                    }
                    Some(_) => {}
                }
            }
            Rule::head => head = Some(pair),
            _ => {}
        }
    }
    match (body, head) {
        (Some(body), Some(head)) => {
            let head = Proposition::from_text(head.as_str()).ok_or_else(|| unexpected(&head))?;
            let tokens = body.chars()
                .filter_map(Token::from_symbol)
                .collect();
            let expression = Expression::from_tokens(body, tokens);
            let body = Body::new(expression, operands, connective);
            Ok(Clause::Rule { body, head })
        }
        _ => Err(ValidationError::MissingImplication),
    }
}

/// Check that `text` names exactly one proposition,
/// ignoring a single trailing query marker
pub fn validate_query(text: &str) -> Result<Proposition, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    let pairs = Grammar::parse(Rule::query, text)
        .map_err(|_| ValidationError::NotAProposition(text.to_string()))?;
    pairs.flatten()
        .find(|pair| pair.as_rule() == Rule::proposition)
        .and_then(|pair| Proposition::from_text(pair.as_str()))
        .ok_or_else(|| ValidationError::NotAProposition(text.to_string()))
}

/// Parse a general expression, where parentheses and all operators are allowed
pub fn parse_expression(source: &str) -> Result<Expression, ValidationError> {
    if source.is_empty() {
        return Err(ValidationError::Empty);
    }
    if let Some((position, symbol)) = source.chars().enumerate().find(|(_, c)| Token::from_symbol(*c).is_none()) {
        return Err(ValidationError::UnrecognizedSymbol { symbol, position });
    }
    let pairs = Grammar::parse(Rule::expression, source).map_err(explain)?;
    let tokens = pairs.flatten()
        .filter_map(|pair| match pair.as_rule() {
            Rule::proposition | Rule::not | Rule::and | Rule::or
            | Rule::implies | Rule::iff | Rule::open | Rule::close => {
                pair.as_str().chars().next().and_then(Token::from_symbol)
            }
            _ => None,
        })
        .collect();
    Ok(Expression::from_tokens(source, tokens))
}

fn parse_operand(pair: &Pair<Rule>) -> Result<Operand, ValidationError> {
    let text = pair.as_str();
    let negations = text.chars().take_while(|&c| c == NEGATION).count();
    text.chars()
        .last()
        .and_then(Proposition::new)
        .map(|proposition| Operand::new(negations, proposition))
        .ok_or_else(|| unexpected(pair))
}

fn connective_of(pair: &Pair<Rule>) -> Operator {
    if pair.as_rule() == Rule::or {
        Operator::Or
    } else {
        Operator::And
    }
}

fn unexpected(pair: &Pair<Rule>) -> ValidationError {
    let variant = ErrorVariant::CustomError {
        message: format!("unexpected {:?} `{}`", pair.as_rule(), pair.as_str())
    };
    Error::new_from_span(variant, pair.as_span()).into()
}

/// updates the error so that expected rules are reported by their symbols
fn explain(error: Error<Rule>) -> Error<Rule> {
    error.renamed_rules(|rule| {
        let name = match rule {
            Rule::proposition | Rule::fact | Rule::head | Rule::operand => "proposition",
            Rule::not => "`~`",
            Rule::and => "`&`",
            Rule::or => "`|`",
            Rule::implies => "`>`",
            Rule::iff => "`-`",
            Rule::open => "`(`",
            Rule::close => "`)`",
            Rule::EOI => "end of input",
            other => return format!("{:?}", other),
        };
        name.to_string()
    })
}
