mod lexicon;
pub use lexicon::*;

mod expr;
pub use expr::*;

mod tree;
pub use tree::*;

mod parse;
pub use parse::*;

use crate::error::Error;

/// Parse `source` as a general expression and evaluate it under `assignment`
pub fn evaluate<V: Valuation + ?Sized>(source: &str, assignment: &V) -> Result<bool, Error> {
    let expression = parse_expression(source)?;
    let value = expression.evaluate(assignment)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use itertools::Itertools;
    use crate::ast::*;
    use crate::error::ValidationError;
    use crate::prover::Clause;

    fn prop(letter: char) -> Proposition {
        Proposition::new(letter).expect("a letter")
    }
    /// A, B are true and C, D are false
    fn sample_assignment() -> HashMap<Proposition, bool> {
        vec![('A', true), ('B', true), ('C', false), ('D', false)]
            .into_iter()
            .map(|(letter, truth)| (prop(letter), truth))
            .collect()
    }
    fn postfix_of(source: &str) -> String {
        let tokens = source.chars()
            .filter_map(Token::from_symbol)
            .collect::<Vec<_>>();
        to_postfix(&tokens).iter().map(|t| t.symbol()).join(" ")
    }
    fn check(source: &str) -> bool {
        evaluate(source, &sample_assignment()).expect("should evaluate")
    }

    #[test]
    fn postfix_simple_0() {
        assert_eq!(postfix_of("A|B"), "A B |");
    }
    #[test]
    fn postfix_nested_0() {
        assert_eq!(postfix_of("((A&B)|C)|((D|E)&F)"), "A B & C | D E | F & |");
    }
    #[test]
    fn postfix_precedence_0() {
        // & binds tighter than |, which binds tighter than >
        assert_eq!(postfix_of("A|B&C"), "A B C & |");
        assert_eq!(postfix_of("A>B|C"), "A B C | >");
        assert_eq!(postfix_of("A-B>C"), "A B C > -");
    }
    #[test]
    fn postfix_left_associative() {
        assert_eq!(postfix_of("A&B&C"), "A B & C &");
        assert_eq!(postfix_of("A>B>C"), "A B > C >");
    }
    #[test]
    fn postfix_negation() {
        assert_eq!(postfix_of("~A&B"), "A ~ B &");
        assert_eq!(postfix_of("~~A"), "A ~ ~");
        assert_eq!(postfix_of("~(A|B)"), "A B | ~");
    }

    #[test]
    fn evaluate_and() {
        assert_eq!(check("A&B"), true);
        assert_eq!(check("A&C"), false);
        assert_eq!(check("D&C"), false);
        assert_eq!(check("A&B&C&D"), false);
    }
    #[test]
    fn evaluate_negation() {
        assert_eq!(check("A&B&~C&~D"), true);
        assert_eq!(check("~A|~B"), false);
        assert_eq!(check("~~A"), true);
    }
    #[test]
    fn evaluate_or() {
        assert_eq!(check("A|B"), true);
        assert_eq!(check("A|C"), true);
        assert_eq!(check("D|C"), false);
    }
    #[test]
    fn evaluate_implication() {
        // false implies anything
        assert_eq!(check("D>C"), true);
        assert_eq!(check("D>A"), true);
        assert_eq!(check("A>A"), true);
        assert_eq!(check("A>D"), false);
    }
    #[test]
    fn evaluate_biconditional() {
        assert_eq!(check("A-B"), true);
        assert_eq!(check("C-D"), true);
        assert_eq!(check("A-C"), false);
    }
    #[test]
    fn evaluate_parentheses() {
        assert_eq!(check("(A|C)&(A|D)"), true);
        assert_eq!(check("(C|D)|(A&B)"), true);
        assert_eq!(check("(C|D)|(A&D)"), false);
        assert_eq!(check("((A|D)|C)&((A|C)|D)"), true);
        assert_eq!(check("((A&D)|A)&((A|C)&D)"), false);
    }
    #[test]
    fn evaluate_unassigned_is_false() {
        assert_eq!(check("Z"), false);
        assert_eq!(check("~Z"), true);
        assert_eq!(check("A&Z"), false);
    }
    #[test]
    fn evaluate_single_proposition() {
        let expression = parse_expression("A").expect("should parse");
        assert_eq!(expression.evaluate(&sample_assignment()), Ok(true));
    }
    #[test]
    fn propositions_are_listed_once() {
        let expression = parse_expression("(A&B)|(~A&C)").expect("should parse");
        let found = expression.propositions().collect::<Vec<_>>();
        assert_eq!(found, vec![prop('A'), prop('B'), prop('C')]);
    }
    #[test]
    fn unbalanced_tokens_are_an_internal_error() {
        // skips validation on purpose
        let tokens = vec![Token::Proposition(prop('A')), Token::Operator(Operator::And)];
        let expression = Expression::from_tokens("A&", tokens);
        let _ = expression.evaluate(&sample_assignment()).expect_err("missing an operand");
        let tokens = vec![Token::Proposition(prop('A')), Token::Proposition(prop('B'))];
        let expression = Expression::from_tokens("AB", tokens);
        let _ = expression.evaluate(&sample_assignment()).expect_err("too many operands");
    }

    #[test]
    fn parse_expression_failure_0() {
        let _ = parse_expression("(A&B").expect_err("unbalanced parenthesis");
        let _ = parse_expression("A&").expect_err("missing operand");
        let _ = parse_expression("AB").expect_err("adjacent propositions");
        let _ = parse_expression("~").expect_err("negation of nothing");
        let _ = parse_expression("").expect_err("empty");
    }
    #[test]
    fn parse_expression_failure_1() {
        match parse_expression("A+B") {
            Err(ValidationError::UnrecognizedSymbol { symbol: '+', position: 1 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn validate_fact() {
        let clause = validate_clause("A").expect("a fact");
        assert_eq!(clause, Clause::Fact(prop('A')));
    }
    #[test]
    fn validate_rules() {
        for source in &["A>B", "~A>B", "~~A>B", "A&B&C>D", "A|~B|C>D", "a&b>c"] {
            let clause = validate_clause(source).expect("a rule");
            assert_eq!(clause.to_string(), *source);
        }
    }
    #[test]
    fn validate_rule_parts() {
        let clause = validate_clause("A&~B>C").expect("a rule");
        assert_eq!(clause.head(), prop('C'));
        let body = clause.body().expect("rules have bodies");
        assert_eq!(body.text(), "A&~B");
        assert_eq!(body.connective(), Some(Operator::And));
        assert_eq!(format!("{:?}", body.operands()), "[A, ~B]");
    }
    #[test]
    fn validate_failure_mixed() {
        match validate_clause("A&B|C>D") {
            Err(ValidationError::MixedConnectives { first: Operator::And, second: Operator::Or, position: 3 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
    #[test]
    fn validate_failure_head() {
        let _ = validate_clause("A>B&C").expect_err("head must be one proposition");
        let _ = validate_clause("A>~B").expect_err("head can not be negated");
        let _ = validate_clause("A>").expect_err("missing head");
        let _ = validate_clause(">A").expect_err("missing body");
    }
    #[test]
    fn validate_failure_implications() {
        match validate_clause("AB") {
            Err(ValidationError::MissingImplication) => {}
            other => panic!("unexpected {:?}", other),
        }
        match validate_clause("~A") {
            Err(ValidationError::MissingImplication) => {}
            other => panic!("unexpected {:?}", other),
        }
        match validate_clause("A>B>C") {
            Err(ValidationError::ChainedImplication { position: 3 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
    #[test]
    fn validate_failure_symbols() {
        match validate_clause("A#B>C") {
            Err(ValidationError::UnrecognizedSymbol { symbol: '#', position: 1 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match validate_clause("(A&B)>C") {
            Err(ValidationError::Unsupported { symbol: '(', position: 0 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match validate_clause("A-B>C") {
            Err(ValidationError::Unsupported { symbol: '-', position: 1 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match validate_clause("") {
            Err(ValidationError::Empty) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
    #[test]
    fn validate_failure_placement() {
        let _ = validate_clause("A&>B").expect_err("dangling conjunction");
        let _ = validate_clause("&A>B").expect_err("leading conjunction");
        let _ = validate_clause("A~B>C").expect_err("negation between propositions");
        let _ = validate_clause("A~>B").expect_err("negation of nothing");
    }
    #[test]
    fn validate_queries() {
        assert_eq!(validate_query("A").expect("a query"), prop('A'));
        assert_eq!(validate_query("A?").expect("a query"), prop('A'));
        let _ = validate_query("AB").expect_err("two propositions");
        let _ = validate_query("AB?").expect_err("two propositions");
        let _ = validate_query("?").expect_err("nothing asked");
        let _ = validate_query("~A").expect_err("not a proposition");
        let _ = validate_query("").expect_err("empty");
    }
    #[test]
    fn diagnostics_are_readable() {
        let why = validate_clause("A&B|C>D").expect_err("mixed connectives");
        assert_eq!(
            why.to_string(),
            "unexpected disjunction `|` after conjunction `&` at position 3; a rule body must not mix connectives"
        );
        let why = validate_query("AB").expect_err("two propositions");
        assert_eq!(why.to_string(), "`AB` is not a single proposition");
    }

    fn normalized(source: &str) -> String {
        parse_expression(source)
            .expect("should parse")
            .to_tree()
            .expect("should build")
            .normalize_negations()
            .to_string()
    }

    #[test]
    fn normalize_implication() {
        assert_eq!(normalized("A>B"), "~A|B");
        assert_eq!(normalized("~A>~B"), "A|~B");
    }
    #[test]
    fn normalize_double_negation() {
        assert_eq!(normalized("~~A"), "A");
        assert_eq!(normalized("~~~A"), "~A");
        assert_eq!(normalized("~~A|~~B|~C|~D"), "A|B|~C|~D");
    }
    #[test]
    fn normalize_de_morgan() {
        assert_eq!(normalized("~(A&B)"), "~A|~B");
        assert_eq!(normalized("~(A|~B)"), "~A&B");
        assert_eq!(normalized("~(A>B)"), "A&~B");
    }
    #[test]
    fn normalize_biconditional() {
        assert_eq!(normalized("A-B"), "(~A|B)&(A|~B)");
    }
    #[test]
    fn normalize_flattens() {
        assert_eq!(normalized("((A|B)|C)|(D|E)"), "A|B|C|D|E");
        assert_eq!(normalized("A&(B&(C|D))"), "A&B&(C|D)");
    }
    #[test]
    fn normalize_preserves_truth() {
        let sources = ["A>B>C", "~(A-B)", "(A|~C)>(B&~A)", "~(~A&(B>C))", "A-(B-C)"];
        let letters = [prop('A'), prop('B'), prop('C')];
        for source in sources.iter() {
            let original = parse_expression(source).expect("should parse");
            let normal = parse_expression(&normalized(source)).expect("normal form should parse");
            for bits in 0..8u8 {
                let assignment = letters.iter()
                    .enumerate()
                    .map(|(i, p)| (*p, bits & (1 << i) != 0))
                    .collect::<HashMap<_, _>>();
                assert_eq!(
                    original.evaluate(&assignment),
                    normal.evaluate(&assignment),
                    "`{}` under {:?}", source, assignment
                );
            }
        }
    }
}
