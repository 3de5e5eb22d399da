//! Forward chaining to quiescence over bind rules.

use pretty_assertions::assert_eq;
use weft_tests::prelude::*;

/// edge(a, b), edge(b, c), edge(c, d)
fn path_graph() -> Fixture {
    let mut f = Fixture::new();
    let nodes: Vec<AtomId> = ["a", "b", "c", "d"].iter().map(|n| f.concept(n)).collect();
    for pair in nodes.windows(2) {
        f.eval("edge", pair);
    }
    f
}

/// edge($x, $y) => reach($x, $y)
fn base_rule(f: &mut Fixture) -> AtomId {
    let x = f.variable("$x");
    let y = f.variable("$y");
    let clause = f.eval("edge", &[x, y]);
    let implicand = f.eval("reach", &[x, y]);
    f.bind(&[x, y], clause, implicand)
}

/// reach($x, $y) AND edge($y, $z) => reach($x, $z)
fn transitive_rule(f: &mut Fixture) -> AtomId {
    let x = f.variable("$x");
    let y = f.variable("$y");
    let z = f.variable("$z");
    let reach = f.eval("reach", &[x, y]);
    let edge = f.eval("edge", &[y, z]);
    let predicate = f.and(&[reach, edge]);
    let implicand = f.eval("reach", &[x, z]);
    f.bind(&[x, y, z], predicate, implicand)
}

fn reach_chainer(f: &mut Fixture) -> ForwardChainer {
    let base = base_rule(f);
    let transitive = transitive_rule(f);
    let mut chainer = ForwardChainer::new();
    chainer.add_rule(BindRule::new("base", base)).unwrap();
    chainer.add_rule(BindRule::new("transitive", transitive)).unwrap();
    chainer
}

/// Every grounded `reach` fact, as sorted `x->y` strings.
fn reach_facts(f: &mut Fixture) -> Vec<String> {
    let x = f.variable("$rx");
    let y = f.variable("$ry");
    let clause = f.eval("reach", &[x, y]);
    let pair = f.list(&[x, y]);
    let query = f.bind(&[x, y], clause, pair);
    let aggregate = f.matcher().bindlink(query).unwrap();

    let mut facts: Vec<String> = f
        .outgoing(aggregate)
        .into_iter()
        .map(|pair| {
            let names: Vec<String> =
                f.outgoing(pair).into_iter().map(|id| f.name(id)).collect();
            names.join("->")
        })
        .collect();
    facts.sort();
    facts
}

#[test]
fn test_chaining_reaches_transitive_closure() {
    // GIVEN a path a-b-c-d and the reach rules
    let mut f = path_graph();
    let chainer = reach_chainer(&mut f);

    // WHEN
    let stats = chainer.run(f.store()).unwrap();

    // THEN every reachable pair is derived
    assert!(stats.quiescence_reached);
    assert!(stats.atoms_created > 0);
    assert_eq!(
        reach_facts(&mut f),
        vec!["a->b", "a->c", "a->d", "b->c", "b->d", "c->d"]
    );
}

#[test]
fn test_second_run_creates_nothing() {
    let mut f = path_graph();
    let chainer = reach_chainer(&mut f);
    chainer.run(f.store()).unwrap();
    let count = f.atom_count();

    let stats = chainer.run(f.store()).unwrap();

    assert_eq!(stats.rounds, 1);
    assert_eq!(stats.atoms_created, 0);
    assert_eq!(f.atom_count(), count);
}

#[test]
fn test_round_limit_stops_growing_chain() {
    let mut f = path_graph();
    let chainer = reach_chainer(&mut f).with_config(ChainerConfig::new().with_max_rounds(1));

    let err = chainer.run(f.store()).unwrap_err();

    assert!(matches!(err, RuleError::MaxRoundsExceeded { rounds: 1 }));
}

#[test]
fn test_crisp_rule_ignores_false_facts() {
    // GIVEN edge(c, d) is false
    let mut f = path_graph();
    let c = f.concept("c");
    let d = f.concept("d");
    let false_edge = f.eval("edge", &[c, d]);
    f.set_tv(false_edge, TruthValue::FALSE);
    let base = base_rule(&mut f);
    let mut chainer = ForwardChainer::new();
    chainer.add_rule(BindRule::new("base", base).crisp()).unwrap();

    // WHEN
    chainer.run(f.store()).unwrap();

    // THEN only the true edges are lifted, each marked true
    assert_eq!(reach_facts(&mut f), vec!["a->b", "b->c"]);
    let a = f.concept("a");
    let b = f.concept("b");
    let derived = f.eval("reach", &[a, b]);
    assert_eq!(f.tv(derived), TruthValue::TRUE);
}
