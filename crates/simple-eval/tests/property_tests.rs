//! Property-based tests for the SIMPLE evaluators.
//!
//! These tests use proptest to generate well-typed programs and verify:
//! 1. Confluence: the small-step machine and the big-step evaluator agree,
//!    on well-typed programs and on programs that nest statements inside
//!    expressions (where failures must agree too)
//! 2. Determinism: `reduce` is referentially transparent
//! 3. Immutability: an assignment never changes the environment it was given

use proptest::prelude::*;
use simple_eval::{evaluate_expression, execute, normal_form, reduce, Environment, Machine};
use simple_types::{Node, Value};

const VARS: &[&str] = &["x", "y", "z"];

// -- Program Generation Strategies --

fn var_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VARS)
}

/// Integer expressions over literals and the three bound variables.
fn num_expr() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        (0i64..10).prop_map(Node::number),
        var_name().prop_map(|name| Node::variable(name)),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::add(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Node::multiply(l, r)),
        ]
    })
}

fn bool_expr() -> impl Strategy<Value = Node> {
    prop_oneof![
        any::<bool>().prop_map(Node::boolean),
        (num_expr(), num_expr()).prop_map(|(l, r)| Node::less_than(l, r)),
        (num_expr(), num_expr()).prop_map(|(l, r)| Node::greater_than(l, r)),
    ]
}

/// A loop that always terminates: counts `name` up to `bound`.
fn counting_loop() -> impl Strategy<Value = Node> {
    (var_name(), 0i64..10).prop_map(|(name, bound)| {
        Node::while_loop(
            Node::less_than(Node::variable(name), Node::number(bound)),
            Node::assign(name, Node::add(Node::variable(name), Node::number(1))),
        )
    })
}

fn statement() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        Just(Node::DoNothing),
        (var_name(), num_expr()).prop_map(|(name, e)| Node::assign(name, e)),
        counting_loop(),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Node::sequence(a, b)),
            (bool_expr(), inner.clone(), inner).prop_map(|(c, a, b)| Node::if_else(c, a, b)),
        ]
    })
}

/// Any node in any position: statements as operands, conditions and
/// assigned expressions, values sequenced before statements. Most of these
/// programs fail; both evaluators have to fail the same way.
fn mixed_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        (0i64..10).prop_map(Node::number),
        any::<bool>().prop_map(Node::boolean),
        var_name().prop_map(|name| Node::variable(name)),
        Just(Node::DoNothing),
        counting_loop(),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::add(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::greater_than(l, r)),
            (var_name(), inner.clone()).prop_map(|(name, e)| Node::assign(name, e)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| Node::if_else(c, a, b)),
            (inner.clone(), inner).prop_map(|(a, b)| Node::sequence(a, b)),
        ]
    })
}

fn environment() -> impl Strategy<Value = Environment> {
    (0i64..10, 0i64..10, 0i64..10).prop_map(|(x, y, z)| {
        Environment::from_iter([
            ("x", Value::Number(x)),
            ("y", Value::Number(y)),
            ("z", Value::Number(z)),
        ])
    })
}

// -- Properties --

proptest! {
    #[test]
    fn expressions_agree_with_big_step(expr in num_expr(), env in environment()) {
        let small = Machine::new(expr.clone(), env.clone())
            .run_silent()
            .map(|state| state.statement.as_value());
        let big = evaluate_expression(&expr, &env).map(Some);
        prop_assert_eq!(small, big);
    }

    #[test]
    fn conditions_agree_with_big_step(expr in bool_expr(), env in environment()) {
        let small = Machine::new(expr.clone(), env.clone())
            .run_silent()
            .map(|state| state.statement.as_value());
        let big = evaluate_expression(&expr, &env).map(Some);
        prop_assert_eq!(small, big);
    }

    #[test]
    fn statements_agree_with_big_step(stmt in statement(), env in environment()) {
        let small = Machine::new(stmt.clone(), env.clone()).run_silent();
        if let Ok(state) = &small {
            prop_assert_eq!(&state.statement, &Node::DoNothing);
        }
        let big = execute(&stmt, &env);
        prop_assert_eq!(small.map(|state| state.environment), big);
    }

    #[test]
    fn mixed_positions_agree_with_big_step(node in mixed_node(), env in environment()) {
        let small = Machine::new(node.clone(), env.clone()).run_silent();
        let big = normal_form(&node, &env);
        prop_assert_eq!(small, big);
    }

    #[test]
    fn reduce_is_deterministic(stmt in statement(), env in environment()) {
        prop_assume!(stmt.reducible());
        prop_assert_eq!(reduce(&stmt, &env), reduce(&stmt, &env));
    }

    #[test]
    fn assignment_leaves_old_environment_untouched(
        name in var_name(),
        expr in num_expr(),
        start in (0i64..10, 0i64..10, 0i64..10)
    ) {
        let (x, y, z) = start;
        let env = Environment::from_iter([
            ("x", Value::Number(x)),
            ("y", Value::Number(y)),
            ("z", Value::Number(z)),
        ]);

        // Only the first step sees `env`; later steps see its successors.
        let mut state = reduce(&Node::assign(name, expr.clone()), &env);
        while let Ok((node, current)) = &state {
            if !node.reducible() {
                break;
            }
            state = reduce(node, current);
        }

        prop_assert_eq!(env.lookup("x"), Ok(Value::Number(x)));
        prop_assert_eq!(env.lookup("y"), Ok(Value::Number(y)));
        prop_assert_eq!(env.lookup("z"), Ok(Value::Number(z)));
        prop_assert_eq!(env.len(), 3);

        let (node, current) = state.expect("well-typed assignment reduces");
        prop_assert_eq!(node, Node::DoNothing);
        prop_assert_eq!(current.lookup(name), evaluate_expression(&expr, &env));
        for other in VARS.iter().filter(|v| **v != name) {
            prop_assert_eq!(current.lookup(other), env.lookup(other));
        }
    }
}
