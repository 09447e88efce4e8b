use std::fmt;

use itertools::Itertools;

use crate::ast::{Expression, Operator, Proposition, Token, CONJUNCTION, DISJUNCTION, NEGATION};
use crate::error::InternalError;

/// A nested form of an expression, rebuilt from its postfix order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprTree {
    kind: Box<TreeKind>
}
/// Represents what type of expression it is, and any associated data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeKind {
    Literal(Proposition),
    Not(ExprTree),
    If(ExprTree, ExprTree),
    Iff(ExprTree, ExprTree),
    Or(Vec<ExprTree>),
    And(Vec<ExprTree>),
}

impl From<TreeKind> for ExprTree {
    fn from(kind: TreeKind) -> ExprTree {
        ExprTree { kind: Box::new(kind) }
    }
}

impl Expression {
    pub fn to_tree(&self) -> Result<ExprTree, InternalError> {
        let mut stack: Vec<ExprTree> = Vec::new();
        for token in self.postfix() {
            let tree = match token {
                Token::Proposition(p) => TreeKind::Literal(p).into(),
                Token::Operator(Operator::Not) => match stack.pop() {
                    Some(inner) => inner.negate(),
                    None => return internal_error!(),
                },
                Token::Operator(op) => {
                    let (left, right) = match (stack.pop(), stack.pop()) {
                        (Some(right), Some(left)) => (left, right),
                        _ => return internal_error!(),
                    };
                    match op {
                        Operator::And => TreeKind::And(vec![left, right]).into(),
                        Operator::Or => TreeKind::Or(vec![left, right]).into(),
                        Operator::Implies => TreeKind::If(left, right).into(),
                        Operator::Iff => TreeKind::Iff(left, right).into(),
                        Operator::Not => return internal_error!(),
                    }
                }
                Token::Open | Token::Close => return internal_error!(),
            };
            stack.push(tree);
        }
        match (stack.pop(), stack.is_empty()) {
            (Some(tree), true) => Ok(tree),
            _ => internal_error!(),
        }
    }
}

impl ExprTree {
    pub fn kind(&self) -> &TreeKind {
        &self.kind
    }
    pub fn negate(self) -> ExprTree {
        TreeKind::Not(self).into()
    }
    /// Eliminate implications and biconditionals,
    /// and move all NOTs to immediately before propositions
    pub fn normalize_negations(self) -> ExprTree {
        use TreeKind::*;
        match *self.kind {
            Not(negated) => {
                match *negated.kind {
                    // `~~P` becomes `P`
                    Not(inner) => {
                        inner.normalize_negations()
                    }
                    // de morgan's law
                    // `~(P & Q)` becomes `~P | ~Q`
                    And(subexprs) => {
                        let negated = subexprs.into_iter()
                            .map(|e| e.negate().normalize_negations())
                            .collect();
                        Or(flatten(negated, false)).into()
                    }
                    // `~(P | Q)` becomes `~P & ~Q`
                    Or(subexprs) => {
                        let negated = subexprs.into_iter()
                            .map(|e| e.negate().normalize_negations())
                            .collect();
                        And(flatten(negated, true)).into()
                    }
                    // `~(P > Q)` becomes `P & ~Q`
                    If(condition, consequence) => {
                        let conjuncts = vec![
                            condition.normalize_negations(),
                            consequence.negate().normalize_negations(),
                        ];
                        And(flatten(conjuncts, true)).into()
                    }
                    // `~(P - Q)` becomes `(P | Q) & (~P | ~Q)`
                    Iff(left, right) => {
                        let both = Or(vec![left.clone(), right.clone()]).into();
                        let neither = Or(vec![left.negate(), right.negate()]).into();
                        And(vec![both, neither]).into().normalize_negations()
                    }
                    Literal(p) => {
                        Not(Literal(p).into()).into()
                    }
                }
            }
            // `P > Q` becomes `~P | Q`
            If(condition, consequence) => {
                Or(vec![condition.negate(), consequence]).into().normalize_negations()
            }
            // `P - Q` becomes `(~P | Q) & (P | ~Q)`
            Iff(left, right) => {
                let forward = Or(vec![left.clone().negate(), right.clone()]).into();
                let backward = Or(vec![left, right.negate()]).into();
                And(vec![forward, backward]).into().normalize_negations()
            }
            Or(subexprs) => {
                let normalized = subexprs.into_iter()
                    .map(ExprTree::normalize_negations)
                    .collect();
                Or(flatten(normalized, false)).into()
            }
            And(subexprs) => {
                let normalized = subexprs.into_iter()
                    .map(ExprTree::normalize_negations)
                    .collect();
                And(flatten(normalized, true)).into()
            }
            Literal(p) => Literal(p).into()
        }
    }
    /// True for anything that needs parentheses when nested
    fn is_compound(&self) -> bool {
        match self.kind() {
            TreeKind::Literal(_) | TreeKind::Not(_) => false,
            _ => true,
        }
    }
    fn nested(&self) -> String {
        if self.is_compound() {
            format!("({})", self)
        } else {
            self.to_string()
        }
    }
}

// `.into()` on a kind would otherwise need a type annotation at every call site
impl TreeKind {
    fn into(self) -> ExprTree {
        ExprTree::from(self)
    }
}

/// Splice the children of same-kind subexpressions into their parent,
/// i.e. `A & (B & C)` becomes `A & B & C`
fn flatten(subexprs: Vec<ExprTree>, conjunctive: bool) -> Vec<ExprTree> {
    let mut flat = Vec::with_capacity(subexprs.len());
    for e in subexprs {
        match *e.kind {
            TreeKind::And(inner) if conjunctive => flat.extend(inner),
            TreeKind::Or(inner) if !conjunctive => flat.extend(inner),
            kind => flat.push(ExprTree::from(kind)),
        }
    }
    flat
}

impl fmt::Display for ExprTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TreeKind::Literal(p) => write!(f, "{}", p),
            TreeKind::Not(inner) => write!(f, "{}{}", NEGATION, inner.nested()),
            TreeKind::If(left, right) => {
                write!(f, "{}{}{}", left.nested(), Operator::Implies.symbol(), right.nested())
            }
            TreeKind::Iff(left, right) => {
                write!(f, "{}{}{}", left.nested(), Operator::Iff.symbol(), right.nested())
            }
            TreeKind::And(subexprs) => {
                write!(f, "{}", subexprs.iter().map(ExprTree::nested).join(&CONJUNCTION.to_string()))
            }
            TreeKind::Or(subexprs) => {
                write!(f, "{}", subexprs.iter().map(ExprTree::nested).join(&DISJUNCTION.to_string()))
            }
        }
    }
}
