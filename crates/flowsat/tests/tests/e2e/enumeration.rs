//! E2E: solve, decode, block, repeat until the solver reports UNSAT.

use flowsat_encoding::{Branching, Encoder, EncodingOptions};
use flowsat_engine::{DpllSolver, SatSolver, Solution, UNSAT};
use flowsat_tests::two_tool_domain;

#[test]
fn two_tools_one_step_yields_both_then_unsat() {
    let domain = two_tool_domain().unwrap();
    let options = EncodingOptions::default();
    let mut encoding = Encoder::new(&domain, &options)
        .encode(1, Branching::new(1, 1))
        .unwrap();
    let solver = DpllSolver::new();

    let mut found = Vec::new();
    loop {
        let response = solver.solve(&encoding.cnf, encoding.atom_count()).unwrap();
        let solution = Solution::from_response(&response, &encoding.mapping, &domain).unwrap();
        let Some(blocking) = solution.blocking_clause() else {
            assert_eq!(solution.render(), UNSAT);
            break;
        };

        // No data flows, so the tool is the only relevant fact.
        let tools = solution.tool_sequence();
        assert_eq!(tools.len(), 1);
        assert_eq!(solution.render_relevant(), format!("{}[M0]", tools[0]));
        found.push(tools[0].to_string());

        encoding.cnf.push(blocking);
        assert!(found.len() <= 2, "blocked workflow returned again");
    }

    found.sort();
    assert_eq!(found, vec!["a", "b"]);
}

#[test]
fn blocking_clause_mentions_only_selected_tools() {
    let domain = two_tool_domain().unwrap();
    let options = EncodingOptions::default();
    let encoding = Encoder::new(&domain, &options)
        .encode(2, Branching::new(1, 1))
        .unwrap();
    let response = DpllSolver::new()
        .solve(&encoding.cnf, encoding.atom_count())
        .unwrap();
    let solution = Solution::from_response(&response, &encoding.mapping, &domain).unwrap();

    let blocking = solution.blocking_clause().unwrap();
    assert_eq!(blocking.len(), 2);
    for literal in blocking.literals() {
        assert!(*literal < 0);
        let key = encoding.mapping.resolve(literal.unsigned_abs() as u32).unwrap();
        let id = key.node().unwrap();
        assert!(domain.modules.get(id).unwrap().is_tool());
    }
}

#[test]
fn dimacs_header_counts_atoms_and_clauses() {
    let domain = two_tool_domain().unwrap();
    let options = EncodingOptions::default();
    let encoding = Encoder::new(&domain, &options)
        .encode(1, Branching::new(1, 1))
        .unwrap();

    let dimacs = encoding.to_dimacs();
    let header = dimacs.lines().next().unwrap();
    assert_eq!(
        header,
        format!("p cnf {} {}", encoding.atom_count(), encoding.clause_count())
    );
    assert_eq!(dimacs.lines().count(), encoding.clause_count() + 1);
}
