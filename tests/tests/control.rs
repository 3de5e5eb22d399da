//! Caller-controlled searches: stop hooks, raw matching and custom types.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use weft_registry::RegistryBuilder;
use weft_tests::prelude::*;

/// p(n0) .. p(n{count-1}) and the bind p($x) => q($x).
fn numbered(count: usize) -> (Fixture, AtomId) {
    let mut f = Fixture::new();
    for i in 0..count {
        let atom = f.concept(&format!("n{}", i));
        f.eval("p", &[atom]);
    }
    let x = f.variable("$x");
    let clause = f.eval("p", &[x]);
    let implicand = f.eval("q", &[x]);
    let bind = f.bind(&[x], clause, implicand);
    (f, bind)
}

mod stop_hook {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hook_bounds_results() {
        // GIVEN ten groundings and a hook that stops after three
        let (mut f, bind) = numbered(10);
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let mut implicator = Implicator::collect_all().with_stop_hook(move |_, _| {
            counter.set(counter.get() + 1);
            counter.get() >= 3
        });

        // WHEN
        let aggregate = f.matcher().run_bind(bind, &mut implicator).unwrap();

        // THEN the search ended at the third result
        assert_eq!(seen.get(), 3);
        assert_eq!(f.outgoing(aggregate).len(), 3);
        assert_eq!(
            f.results(aggregate)[0],
            "(EvaluationLink (PredicateNode \"q\") (ListLink (ConceptNode \"n0\")))"
        );
    }

    #[test]
    fn test_hook_sees_grounding() {
        let (mut f, bind) = numbered(3);
        let x = f.variable("$x");
        let target = f.concept("n1");
        let mut implicator =
            Implicator::collect_all().with_stop_hook(move |g, _| g.get(x) == Some(target));

        let aggregate = f.matcher().run_bind(bind, &mut implicator).unwrap();

        assert_eq!(f.outgoing(aggregate).len(), 2);
    }

    #[test]
    fn test_implicator_is_single_use() {
        let (mut f, bind) = numbered(2);
        let mut implicator = Implicator::collect_all();
        f.matcher().run_bind(bind, &mut implicator).unwrap();

        let err = f.matcher().run_bind(bind, &mut implicator).unwrap_err();

        assert!(matches!(err, PatternError::ImplicatorInUse));
        assert_eq!(implicator.results().len(), 2);
    }
}

mod raw_match {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_match_clauses_reports_groundings() {
        // GIVEN likes(ann, tea), likes(bob, tea), likes(bob, jam)
        let mut f = Fixture::new();
        let ann = f.concept("ann");
        let bob = f.concept("bob");
        let tea = f.concept("tea");
        let jam = f.concept("jam");
        f.eval("likes", &[ann, tea]);
        f.eval("likes", &[bob, tea]);
        f.eval("likes", &[bob, jam]);
        let who = f.variable("$who");
        let clause = f.eval("likes", &[who, tea]);
        let vars = f.list(&[who]);
        let clauses = f.and(&[clause]);
        let before = f.atom_count();

        // WHEN
        let mut collector = GroundingCollector::new();
        f.matcher()
            .match_clauses(&mut collector, vars, clauses, None)
            .unwrap();

        // THEN one grounding per liker, nothing written
        let grounds: Vec<Option<AtomId>> =
            collector.groundings().iter().map(|g| g.get(who)).collect();
        assert_eq!(grounds, vec![Some(ann), Some(bob)]);
        let fact = f.eval("likes", &[ann, tea]);
        assert_eq!(collector.groundings()[0].clause_ground(clause), Some(fact));
        assert_eq!(f.atom_count(), before);
    }

    #[test]
    fn test_match_clauses_with_negated_set() {
        let mut f = Fixture::new();
        let ann = f.concept("ann");
        let bob = f.concept("bob");
        let tea = f.concept("tea");
        f.eval("likes", &[ann, tea]);
        f.eval("likes", &[bob, tea]);
        f.eval("allergic", &[bob]);
        let who = f.variable("$who");
        let likes = f.eval("likes", &[who, tea]);
        let allergic = f.eval("allergic", &[who]);
        let vars = f.list(&[who]);
        let clauses = f.and(&[likes]);
        let negated = f.and(&[allergic]);

        let mut collector = GroundingCollector::new();
        f.matcher()
            .match_clauses(&mut collector, vars, clauses, Some(negated))
            .unwrap();

        let grounds: Vec<Option<AtomId>> =
            collector.groundings().iter().map(|g| g.get(who)).collect();
        assert_eq!(grounds, vec![Some(ann)]);
    }

    #[test]
    fn test_match_clauses_rejects_shapes() {
        let mut f = Fixture::new();
        let who = f.variable("$who");
        let clause = f.eval("likes", &[who]);
        let vars = f.list(&[who]);

        let mut collector = GroundingCollector::new();
        let err = f
            .matcher()
            .match_clauses(&mut collector, vars, clause, None)
            .unwrap_err();

        assert!(err.is_structural());
        assert!(collector.groundings().is_empty());
    }
}

mod custom_types {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    /// Standard types plus AnimalNode <: ConceptNode.
    fn zoo() -> Fixture {
        let mut builder = RegistryBuilder::new();
        builder.add_type("AnimalNode").extends("ConceptNode").done().unwrap();
        Fixture::with_registry(builder.build().unwrap())
    }

    #[test]
    fn test_restriction_admits_subtype() {
        // GIVEN is(AnimalNode cat) and is(ConceptNode rock)
        let mut f = zoo();
        let cat = f.node("AnimalNode", "cat");
        let rock = f.concept("rock");
        f.eval("is", &[cat]);
        f.eval("is", &[rock]);
        let x = f.variable("$x");
        let clause = f.eval("is", &[x]);
        let concepts = f.typed(x, "ConceptNode");
        let concept_bind = f.bind(&[concepts], clause, x);
        let animals = f.typed(x, "AnimalNode");
        let animal_bind = f.bind(&[animals], clause, x);

        // WHEN
        let concept_results = f.matcher().bindlink(concept_bind).unwrap();
        let animal_results = f.matcher().bindlink(animal_bind).unwrap();

        // THEN a ConceptNode restriction admits the subtype, not the reverse
        assert_eq!(f.outgoing(concept_results), vec![cat, rock]);
        assert_eq!(f.outgoing(animal_results), vec![cat]);
    }
}
