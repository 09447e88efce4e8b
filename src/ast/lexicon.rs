use std::fmt;

/// An atomic boolean variable, named by a single letter.
/// Two propositions are the same iff their letters are equal
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Proposition(char);

impl Proposition {
    /// Returns the proposition named by `letter`, if `letter` can name one
    pub fn new(letter: char) -> Option<Proposition> {
        if is_proposition(letter) {
            Some(Proposition(letter))
        } else {
            None
        }
    }
    /// Parses a proposition from text consisting of exactly one letter
    pub fn from_text(text: &str) -> Option<Proposition> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Proposition::new(letter),
            _ => None,
        }
    }
    pub fn letter(self) -> char {
        self.0
    }
}

impl fmt::Debug for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// The logical connectives, with their fixed grammar properties
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    Implies,
    Iff,
}

pub const NEGATION: char = '~';
pub const CONJUNCTION: char = '&';
pub const DISJUNCTION: char = '|';
pub const IMPLICATION: char = '>';
pub const BICONDITIONAL: char = '-';
pub const OPEN_PARENTHESIS: char = '(';
pub const CLOSE_PARENTHESIS: char = ')';
pub const QUERY_MARKER: char = '?';

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Implies,
        Operator::Iff,
    ];

    pub fn from_symbol(symbol: char) -> Option<Operator> {
        let op = match symbol {
            NEGATION => Operator::Not,
            CONJUNCTION => Operator::And,
            DISJUNCTION => Operator::Or,
            IMPLICATION => Operator::Implies,
            BICONDITIONAL => Operator::Iff,
            _ => return None,
        };
        Some(op)
    }
    pub fn symbol(self) -> char {
        match self {
            Operator::Not => NEGATION,
            Operator::And => CONJUNCTION,
            Operator::Or => DISJUNCTION,
            Operator::Implies => IMPLICATION,
            Operator::Iff => BICONDITIONAL,
        }
    }
    /// Higher precedence binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Not => 4,
            Operator::And => 3,
            Operator::Or => 2,
            Operator::Implies => 1,
            Operator::Iff => 0,
        }
    }
    /// The number of operands consumed
    pub fn arity(self) -> usize {
        match self {
            Operator::Not => 1,
            _ => 2,
        }
    }
    pub fn associativity(self) -> Associativity {
        match self {
            Operator::Not => Associativity::Right,
            _ => Associativity::Left,
        }
    }
    /// Apply the operator to its operands.
    /// Unary operators ignore `left`
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Operator::Not => !right,
            Operator::And => left && right,
            Operator::Or => left || right,
            Operator::Implies => !left || right,
            Operator::Iff => (!left || right) && (left || !right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Not => "negation",
            Operator::And => "conjunction",
            Operator::Or => "disjunction",
            Operator::Implies => "implication",
            Operator::Iff => "biconditional",
        };
        write!(f, "{} `{}`", name, self.symbol())
    }
}

/// A single lexical unit of an infix expression
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Proposition(Proposition),
    Operator(Operator),
    Open,
    Close,
}

impl Token {
    pub fn from_symbol(symbol: char) -> Option<Token> {
        let token = match symbol {
            OPEN_PARENTHESIS => Token::Open,
            CLOSE_PARENTHESIS => Token::Close,
            _ => {
                if let Some(op) = Operator::from_symbol(symbol) {
                    Token::Operator(op)
                } else {
                    Token::Proposition(Proposition::new(symbol)?)
                }
            }
        };
        Some(token)
    }
    pub fn symbol(self) -> char {
        match self {
            Token::Proposition(p) => p.letter(),
            Token::Operator(op) => op.symbol(),
            Token::Open => OPEN_PARENTHESIS,
            Token::Close => CLOSE_PARENTHESIS,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn is_proposition(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// True for every character the grammar knows about, besides the query marker
pub fn is_recognized(c: char) -> bool {
    Token::from_symbol(c).is_some()
}
