//! Instantiation scenarios: idempotence and grounded schemas.

use pretty_assertions::assert_eq;
use weft_tests::prelude::*;

/// `plus` adds two NumberNodes; `sqrt` fails on negatives.
fn arithmetic() -> SchemaRegistry {
    fn number(store: &dyn AtomStore, id: AtomId) -> Result<f64, SchemaError> {
        store
            .name(id)
            .and_then(|name| name.parse::<f64>().ok())
            .ok_or_else(|| SchemaError::domain(format!("{} is not a number", id)))
    }

    SchemaRegistry::new()
        .with("plus", |store: &mut dyn AtomStore, args: &[AtomId]| {
            let sum = args
                .iter()
                .map(|&arg| number(&*store, arg))
                .sum::<Result<f64, _>>()?;
            let number_node = store.core().number_node;
            Ok(store.add_node(number_node, &sum.to_string())?)
        })
        .with("sqrt", |store: &mut dyn AtomStore, args: &[AtomId]| {
            let [arg] = args else {
                return Err(SchemaError::domain("sqrt takes one argument"));
            };
            let value = number(&*store, *arg)?;
            if value < 0.0 {
                return Err(SchemaError::domain("sqrt of a negative number"));
            }
            let number_node = store.core().number_node;
            Ok(store.add_node(number_node, &value.sqrt().to_string())?)
        })
}

mod idempotence {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_instantiate_twice_same_term() {
        // GIVEN a template and a substitution
        let mut f = Fixture::new();
        let x = f.variable("$x");
        let cat = f.concept("cat");
        let template = f.eval("pet", &[x]);
        let grounding = Grounding::new().with_binding(x, cat);
        let instantiator = Instantiator::default();

        // WHEN instantiated twice
        let first = instantiator.instantiate(f.store(), template, &grounding).unwrap();
        let count = f.atom_count();
        let second = instantiator.instantiate(f.store(), template, &grounding).unwrap();

        // THEN the same deduplicated term, no new atoms
        assert_eq!(first, second);
        assert_eq!(f.atom_count(), count);
        assert_eq!(
            f.render(first),
            "(EvaluationLink (PredicateNode \"pet\") (ListLink (ConceptNode \"cat\")))"
        );
    }

    #[test]
    fn test_unbound_variable_is_rejected_whole() {
        let mut f = Fixture::new();
        let x = f.variable("$x");
        let y = f.variable("$y");
        let cat = f.concept("cat");
        let template = f.eval("pair", &[x, y]);
        let before = f.atom_count();

        let result = Instantiator::default().instantiate(
            f.store(),
            template,
            &Grounding::new().with_binding(x, cat),
        );

        assert!(matches!(result, Err(InstantiateError::UnboundVariable(v)) if v == y));
        assert_eq!(f.atom_count(), before);
    }
}

mod grounded_schemas {
    use super::*;
    #[allow(unused_imports)]
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_output_in_results() {
        // GIVEN size(a, 2), size(b, 3) and a rule doubling each size
        let mut f = Fixture::new().with_schemas(arithmetic());
        let a = f.concept("a");
        let b = f.concept("b");
        let two = f.number("2");
        let three = f.number("3");
        f.eval("size", &[a, two]);
        f.eval("size", &[b, three]);
        let x = f.variable("$x");
        let n = f.variable("$n");
        let clause = f.eval("size", &[x, n]);
        let doubled = f.exec("plus", &[n, n]);
        let implicand = f.eval("double", &[x, doubled]);
        let bind = f.bind(&[x, n], clause, implicand);

        // WHEN
        let aggregate = f.matcher().bindlink(bind).unwrap();

        // THEN
        assert_eq!(
            f.results(aggregate),
            vec![
                "(EvaluationLink (PredicateNode \"double\") \
                 (ListLink (ConceptNode \"a\") (NumberNode \"4\")))",
                "(EvaluationLink (PredicateNode \"double\") \
                 (ListLink (ConceptNode \"b\") (NumberNode \"6\")))",
            ]
        );
    }

    #[test]
    fn test_failing_schema_skips_candidate() {
        // GIVEN value(a, 4), value(b, -1), value(c, 9)
        let mut f = Fixture::new().with_schemas(arithmetic());
        for (name, value) in [("a", "4"), ("b", "-1"), ("c", "9")] {
            let who = f.concept(name);
            let number = f.number(value);
            f.eval("value", &[who, number]);
        }
        let x = f.variable("$x");
        let n = f.variable("$n");
        let clause = f.eval("value", &[x, n]);
        let root = f.exec("sqrt", &[n]);
        let implicand = f.eval("root", &[x, root]);
        let bind = f.bind(&[x, n], clause, implicand);

        // WHEN
        let aggregate = f.matcher().bindlink(bind).unwrap();

        // THEN the call succeeds and the negative value is absent
        assert_eq!(
            f.results(aggregate),
            vec![
                "(EvaluationLink (PredicateNode \"root\") \
                 (ListLink (ConceptNode \"a\") (NumberNode \"2\")))",
                "(EvaluationLink (PredicateNode \"root\") \
                 (ListLink (ConceptNode \"c\") (NumberNode \"3\")))",
            ]
        );
    }

    #[test]
    fn test_unknown_schema_skips_every_candidate() {
        let mut f = Fixture::new();
        let a = f.concept("a");
        f.eval("p", &[a]);
        let x = f.variable("$x");
        let clause = f.eval("p", &[x]);
        let implicand = f.exec("missing", &[x]);
        let bind = f.bind(&[x], clause, implicand);

        let aggregate = f.matcher().bindlink(bind).unwrap();

        assert!(f.outgoing(aggregate).is_empty());
    }
}
