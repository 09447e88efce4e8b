use std::fmt;
use std::fmt::Formatter;

use crate::ast::{Expression, Operator, Proposition, Valuation, NEGATION, IMPLICATION};
use crate::error::InternalError;

/// A proposition under some number of negations, e.g. `~~A`
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Operand {
    negations: usize,
    proposition: Proposition,
}

impl Operand {
    pub fn new(negations: usize, proposition: Proposition) -> Operand {
        Operand { negations, proposition }
    }
    pub fn proposition(&self) -> Proposition {
        self.proposition
    }
    pub fn is_negated(&self) -> bool {
        self.negations % 2 == 1
    }
    /// The value of this operand, given the truth of its proposition
    pub fn truth<V: Valuation + ?Sized>(&self, assignment: &V) -> bool {
        assignment.truth(self.proposition) != self.is_negated()
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for _ in 0..self.negations {
            write!(f, "{}", NEGATION)?;
        }
        write!(f, "{}", self.proposition)
    }
}

/// The premises of a rule: operands joined uniformly by one connective
#[derive(Clone, PartialEq, Eq)]
pub struct Body {
    expression: Expression,
    operands: Vec<Operand>,
    connective: Option<Operator>,
}

impl Body {
    pub fn new(expression: Expression, operands: Vec<Operand>, connective: Option<Operator>) -> Body {
        Body { expression, operands, connective }
    }
    /// The body exactly as it was submitted
    pub fn text(&self) -> &str {
        self.expression.source()
    }
    pub fn expression(&self) -> &Expression {
        &self.expression
    }
    pub fn operands(&self) -> &[Operand] {
        self.operands.as_slice()
    }
    pub fn connective(&self) -> Option<Operator> {
        self.connective
    }
    /// A lone operand counts as a conjunction of one
    pub fn is_conjunctive(&self) -> bool {
        self.connective != Some(Operator::Or)
    }
    /// True once every negated operand has been assigned.
    /// Until then an unassigned proposition under a negation would read as true
    pub fn is_settled<V: Valuation + ?Sized>(&self, assignment: &V) -> bool {
        self.operands.iter()
            .filter(|operand| operand.is_negated())
            .all(|operand| assignment.lookup(operand.proposition).is_some())
    }
    pub fn evaluate<V: Valuation + ?Sized>(&self, assignment: &V) -> Result<bool, InternalError> {
        self.expression.evaluate(assignment)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Something the knowledge base holds to be true
#[derive(Clone, PartialEq, Eq)]
pub enum Clause {
    /// `A`
    Fact(Proposition),
    /// `A&B>C`
    Rule { body: Body, head: Proposition },
}

impl Clause {
    /// The proposition this clause concludes
    pub fn head(&self) -> Proposition {
        match self {
            Clause::Fact(p) => *p,
            Clause::Rule { head, .. } => *head,
        }
    }
    pub fn body(&self) -> Option<&Body> {
        match self {
            Clause::Fact(_) => None,
            Clause::Rule { body, .. } => Some(body),
        }
    }
    pub fn is_fact(&self) -> bool {
        if let Clause::Fact(_) = self {
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Fact(p) => write!(f, "{}", p),
            Clause::Rule { body, head } => write!(f, "{}{}{}", body.text(), IMPLICATION, head),
        }
    }
}
impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
