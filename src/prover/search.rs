use indexmap::{IndexMap, IndexSet};

use crate::ast::{validate_query, Proposition};
use crate::error::{Error, InternalError};
use crate::prover::KnowledgeBase;

/// Truth values already derived during one query
pub type TruthMemo = IndexMap<Proposition, bool>;

/// The rule bodies currently being proved, outermost first
pub type RecursionPath<'kb> = IndexSet<&'kb str>;

impl KnowledgeBase {
    /// Validate `text` as a query and try to derive it
    pub fn query(&self, text: &str) -> Result<bool, Error> {
        let goal = validate_query(text)?;
        let proved = self.prove(goal)?;
        Ok( proved )
    }
    /// Search backwards from `goal` for a derivation out of the facts
    pub fn prove(&self, goal: Proposition) -> Result<bool, InternalError> {
        let mut memo = TruthMemo::new();
        let mut path = RecursionPath::new();
        self.prove_goal(goal, &mut memo, &mut path)
    }

    fn prove_goal<'kb>(&'kb self, goal: Proposition, memo: &mut TruthMemo, path: &mut RecursionPath<'kb>) -> Result<bool, InternalError> {
        if self.is_fact(goal) {
            debug!("{} = T", goal);
            return Ok(true);
        }
        for body in self.rules_concluding(goal) {
            // re-entering a body that is still open could only prove it from itself
            if path.contains(body.text()) {
                debug!("{}>{} is circular, skipping it", body.text(), goal);
                continue;
            }
            debug!("inference match: {}>{}", body.text(), goal);
            path.insert(body.text());

            for operand in body.operands() {
                let literal = operand.proposition();
                if !memo.contains_key(&literal) {
                    debug!("asking: {}", literal);
                    let truth = self.prove_goal(literal, memo, path)?;
                    trace!("memo: {} = {}", literal, truth);
                    memo.insert(literal, truth);
                }
                // one false conjunct sinks the whole rule
                if body.is_conjunctive() && !operand.truth(&*memo) {
                    break;
                }
                if body.is_settled(&*memo) && body.evaluate(&*memo)? {
                    path.pop();
                    debug!("{}>{} can be inferred", body.text(), goal);
                    return Ok(true);
                }
            }
            path.pop();
        }
        debug!("{} = F", goal);
        Ok(false)
    }
}
