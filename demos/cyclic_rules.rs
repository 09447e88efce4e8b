use backward_chainer::KnowledgeBase;

fn main() {
    let clauses = vec![
        "A&B>C",
        "C>A",
        "C>B",
        "D>A",
        "D",
    ];
    let mut kb = KnowledgeBase::new();
    for clause in clauses {
        if let Err(why) = kb.submit_clause(clause) {
            eprintln!("{}: {}", clause, why);
            return;
        }
    }
    for goal in &["A", "B", "C"] {
        println!("{}: {:?}", goal, kb.query(goal));
    }
}
