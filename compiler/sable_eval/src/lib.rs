//! Sable evaluator.
//!
//! Executes the arena AST directly: runtime values, the environment
//! chain, and the tree walker live here. No bytecode, no lowering pass.

mod env;
mod error;
mod evaluator;
mod value;

pub use env::Env;
pub use error::{EvalError, EvalErrorKind, EvalResult, Flow};
pub use evaluator::Evaluator;
pub use value::{FunctionValue, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_ir::StringInterner;

    fn run(src: &str) -> Result<Value, EvalError> {
        let interner = StringInterner::new();
        let parsed = sable_parse::parse(src, &interner);
        assert_eq!(parsed.errors, vec![], "parse errors for {src:?}");
        let evaluator = Evaluator::new(&parsed.arena, &interner);
        evaluator.eval_program(parsed.program, &Env::top_level())
    }

    #[track_caller]
    fn eval_ok(src: &str) -> Value {
        match run(src) {
            Ok(value) => value,
            Err(err) => panic!("unexpected error for {src:?}: {err}"),
        }
    }

    #[track_caller]
    fn eval_err(src: &str) -> String {
        match run(src) {
            Ok(value) => panic!("expected error for {src:?}, got {value}"),
            Err(err) => err.to_string(),
        }
    }

    #[track_caller]
    fn check_int(src: &str, expected: i64) {
        assert_eq!(eval_ok(src), Value::Int(expected), "source was {src:?}");
    }

    #[track_caller]
    fn check_bool(src: &str, expected: bool) {
        assert_eq!(eval_ok(src), Value::Bool(expected), "source was {src:?}");
    }

    #[test]
    fn integer_arithmetic() {
        check_int("5;", 5);
        check_int("5 + 5 * 2;", 15);
        check_int("(5 + 5) * 2;", 20);
        check_int("-7;", -7);
        check_int("2 - 10;", -8);
    }

    #[test]
    fn division_truncates_toward_zero() {
        check_int("7 / 2;", 3);
        check_int("-7 / 2;", -3);
        check_int("7 % 3;", 1);
        check_int("-7 % 3;", -1);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(eval_err("1 / 0;"), "division by zero");
        assert_eq!(eval_err("1 % 0;"), "division by zero");
    }

    #[test]
    fn bitwise_operators() {
        check_int("5 & 3;", 1);
        check_int("5 | 3;", 7);
        check_int("5 ^ 3;", 6);
        check_int("1 << 4;", 16);
        check_int("16 >> 2;", 4);
        check_int("-8 >> 1;", -4);
        check_int("~5;", -6);
    }

    #[test]
    fn comparisons() {
        check_bool("1 < 2;", true);
        check_bool("2 < 1;", false);
        check_bool("2 <= 2;", true);
        check_bool("3 >= 4;", false);
        check_bool("1 == 1;", true);
        check_bool("1 != 2;", true);
    }

    #[test]
    fn logical_operators() {
        check_bool("true && false;", false);
        check_bool("true && true;", true);
        check_bool("false || true;", true);
        check_bool("false || false;", false);
    }

    #[test]
    fn truthiness_of_not() {
        check_bool("!true;", false);
        check_bool("!false;", true);
        check_bool("!nil;", true);
        check_bool("!0;", false);
        check_bool("!!5;", true);
    }

    #[test]
    fn unary_operators_reject_wrong_types() {
        assert_eq!(eval_err("-true;"), "unknown operator: -BOOLEAN");
        assert_eq!(eval_err("~nil;"), "unknown operator: ~NIL");
    }

    #[test]
    fn type_mismatch_versus_unknown_operator() {
        assert_eq!(eval_err("1 + true;"), "type mismatch: INTEGER + BOOLEAN");
        assert_eq!(eval_err("nil && true;"), "type mismatch: NIL && BOOLEAN");
        assert_eq!(eval_err("true + false;"), "unknown operator: BOOLEAN + BOOLEAN");
        assert_eq!(eval_err("true < false;"), "unknown operator: BOOLEAN < BOOLEAN");
        assert_eq!(eval_err("1 && 2;"), "unknown operator: INTEGER && INTEGER");
    }

    #[test]
    fn equality_crosses_types_without_error() {
        check_bool("1 == true;", false);
        check_bool("1 != true;", true);
        check_bool("nil == nil;", true);
        check_bool("0 == nil;", false);
    }

    #[test]
    fn function_equality_is_identity() {
        check_bool("fn f() { return 1; } let a = f; a == f;", true);
        check_bool("fn f() { return 1; } fn g() { return 1; } f == g;", false);
    }

    #[test]
    fn let_and_assignment() {
        check_int("let x = 5; x;", 5);
        check_int("let x = 5; x = x + 1; x;", 6);
        check_int("let x = 5; let y = x; y;", 5);
        assert_eq!(eval_ok("let z;"), Value::Nil);
    }

    #[test]
    fn assignment_evaluates_to_the_value() {
        check_int("let x = 1; x = 9;", 9);
    }

    #[test]
    fn redefinition_in_the_same_scope_fails() {
        assert_eq!(eval_err("let x = 5; let x = 6;"), "x already defined");
        assert_eq!(
            eval_err("fn f() { return 1; } fn f() { return 2; }"),
            "f already defined"
        );
    }

    #[test]
    fn shadowing_leaves_the_outer_binding_alone() {
        check_int("let x = 1; { let x = 2; } x;", 1);
        check_int("let x = 1; { let x = 2; x = 3; } x;", 1);
    }

    #[test]
    fn assignment_in_a_block_mutates_the_outer_binding() {
        check_int("let x = 1; { x = 2; } x;", 2);
    }

    #[test]
    fn unbound_identifiers_are_errors() {
        assert_eq!(eval_err("foo;"), "identifier not found: foo");
        assert_eq!(eval_err("x = 1;"), "identifier not found: x");
    }

    #[test]
    fn an_error_stops_the_program() {
        assert_eq!(eval_err("foo; let x = 1; x;"), "identifier not found: foo");
    }

    #[test]
    fn if_expressions() {
        check_int("if (true) { 10; };", 10);
        check_int("if (false) { 1; } else { 2; };", 2);
        check_int("if (0) { 1; } else { 2; };", 1);
        check_int("if (1 < 2) { 1; } else { 2; };", 1);
        assert_eq!(eval_ok("if (false) { 10; };"), Value::Nil);
    }

    #[test]
    fn return_ends_the_program_with_its_value() {
        check_int("return 10; 9;", 10);
        check_int("{ return 5; } 9;", 5);
        assert_eq!(eval_ok("return;"), Value::Nil);
    }

    #[test]
    fn functions_and_calls() {
        check_int("let add = fn(a, b) { return a + b; }; add(2, 3);", 5);
        check_int("fn add(a, b) { return a + b; } add(2, 3);", 5);
        check_int("fn f(x) { x * 2; } f(4);", 8);
        check_int("fn seven() { return 7; } seven();", 7);
    }

    #[test]
    fn functions_can_be_passed_around() {
        check_int(
            "fn apply(f, x) { return f(x); } fn double(n) { return n * 2; } apply(double, 21);",
            42,
        );
        check_int("fn make() { return fn(x) { return x + 1; }; } make()(1);", 2);
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(
            eval_err("fn f(a, b) { return a; } f(1);"),
            "wrong number of arguments: expected 2, got 1"
        );
        assert_eq!(
            eval_err("fn f() { return 1; } f(1, 2);"),
            "wrong number of arguments: expected 0, got 2"
        );
    }

    #[test]
    fn calling_a_non_function_is_an_error() {
        assert_eq!(eval_err("let x = 5; x(1);"), "not a function: INTEGER");
        assert_eq!(eval_err("nil();"), "not a function: NIL");
    }

    #[test]
    fn scoping_is_lexical_not_dynamic() {
        check_int(
            "let x = 1; fn f() { return x; } fn g() { let y = 2; return f(); } g();",
            1,
        );
    }

    #[test]
    fn closures_share_their_captured_scope() {
        let src = "
            fn make_counter() {
                let n = 0;
                fn inc() { n = n + 1; return n; }
                return inc;
            }
            let c = make_counter();
            c();
            c();
        ";
        check_int(src, 2);
    }

    #[test]
    fn separate_closures_are_independent() {
        let src = "
            fn make_counter() {
                let n = 0;
                return fn() { n = n + 1; return n; };
            }
            let a = make_counter();
            let b = make_counter();
            a();
            a();
            b();
        ";
        check_int(src, 1);
    }

    #[test]
    fn while_loops() {
        check_int("let i = 0; while (i < 3) { i = i + 1; } i;", 3);
        assert_eq!(eval_ok("while (false) { 1; }"), Value::Nil);
    }

    #[test]
    fn for_loops() {
        check_int(
            "let total = 0; for (let i = 0; i < 5; i++) { total += i; } total;",
            10,
        );
        check_int("let i = 0; for (; i < 3;) { i++; } i;", 3);
    }

    #[test]
    fn for_induction_variable_does_not_leak() {
        assert_eq!(
            eval_err("for (let i = 0; i < 1; i++) { } i;"),
            "identifier not found: i"
        );
    }

    #[test]
    fn empty_for_condition_loops_until_return() {
        check_int("let i = 0; for (;;) { i++; if (i == 3) { return i; } }", 3);
    }

    #[test]
    fn return_propagates_out_of_loops() {
        check_int("fn f() { while (true) { return 7; } return 0; } f();", 7);
        check_int(
            "fn g() { for (let i = 0; i < 10; i++) { if (i == 3) { return i; } } return -1; } g();",
            3,
        );
        check_int("while (true) { return 1; } 2;", 1);
        check_int("while (false) { return 1; } 2;", 2);
    }

    #[test]
    fn update_expressions_yield_the_previous_value() {
        check_int("let i = 5; i++;", 5);
        check_int("let i = 5; i++; i;", 6);
        check_int("let i = 5; i--;", 5);
        check_int("let i = 5; i--; i;", 4);
        check_int("let i = 5; let a = i++ + 10; a;", 15);
    }

    #[test]
    fn compound_assignment_mutates_in_place() {
        check_int("let x = 8; x <<= 2; x;", 32);
        check_int("let x = 8; x /= 2; x;", 4);
        check_int("let x = 8; x %= 3; x;", 2);
    }

    #[test]
    fn errors_propagate_out_of_nested_calls() {
        assert_eq!(
            eval_err("fn f() { return missing; } fn g() { return f(); } g();"),
            "identifier not found: missing"
        );
        assert_eq!(
            eval_err("fn f() { return 1 + true; } f();"),
            "type mismatch: INTEGER + BOOLEAN"
        );
    }

    #[test]
    fn deep_recursion_grows_the_stack() {
        check_int(
            "fn down(n) { if (n == 0) { return 0; } return down(n - 1); } down(20000);",
            0,
        );
    }
}
