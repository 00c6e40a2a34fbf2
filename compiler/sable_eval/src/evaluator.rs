//! The tree walker.
//!
//! Evaluation is an exhaustive match over node kinds. Values flow back
//! through `Ok`; `return` and runtime errors flow through `Err(Flow)` so
//! `?` unwinds statement sequences without extra bookkeeping. A `Return`
//! signal is converted back into a plain value at a function-call boundary
//! and at the end of the program; an `Error` never is.

use std::rc::Rc;

use sable_ir::{
    Arena, BinaryOp, ExprId, ExprKind, Name, Program, Span, StmtId, StmtKind, StmtRange,
    StringInterner, UnaryOp,
};
use sable_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::env::Env;
use crate::error::{EvalError, EvalErrorKind, EvalResult, Flow};
use crate::value::{FunctionValue, Value};

/// Walks arena nodes against an environment chain.
pub struct Evaluator<'a> {
    arena: &'a Arena,
    interner: &'a StringInterner,
}

impl<'a> Evaluator<'a> {
    pub fn new(arena: &'a Arena, interner: &'a StringInterner) -> Self {
        Evaluator { arena, interner }
    }

    /// Evaluate a whole program. A top-level `return` ends the program
    /// early with its value; otherwise the result is the last statement's
    /// value (`nil` for an empty program).
    pub fn eval_program(&self, program: Program, env: &Env) -> Result<Value, EvalError> {
        let mut last = Value::Nil;
        for &stmt in self.arena.stmt_list(program.stmts) {
            match self.eval_stmt(stmt, env) {
                Ok(value) => last = value,
                Err(Flow::Return(value)) => return Ok(value),
                Err(Flow::Error(err)) => {
                    debug!(error = %err, "evaluation aborted");
                    return Err(err);
                }
            }
        }
        Ok(last)
    }

    /// Evaluate one statement, yielding its result value.
    pub fn eval_stmt(&self, id: StmtId, env: &Env) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_stmt_inner(id, env))
    }

    fn eval_stmt_inner(&self, id: StmtId, env: &Env) -> EvalResult {
        let stmt = self.arena.stmt(id);
        match stmt.kind {
            StmtKind::Let { name, init } => {
                let value = match init {
                    Some(init) => self.eval_expr(init, env)?,
                    None => Value::Nil,
                };
                self.define(name, value.clone(), env, stmt.span)?;
                Ok(value)
            }
            StmtKind::FnDecl { name, params, body } => {
                let function = Value::Function(Rc::new(FunctionValue {
                    name: Some(name),
                    params,
                    body,
                    env: env.clone(),
                }));
                self.define(name, function.clone(), env, stmt.span)?;
                Ok(function)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nil,
                };
                Err(Flow::Return(value))
            }
            StmtKind::Expr(expr) => self.eval_expr(expr, env),
            StmtKind::Block(stmts) => self.eval_block(stmts, &env.child()),
            StmtKind::While { cond, body } => {
                while self.eval_expr(cond, env)?.is_truthy() {
                    // `?` propagates both Return and Error out of the loop
                    // to the enclosing function.
                    self.eval_stmt(body, env)?;
                }
                Ok(Value::Nil)
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                // The header gets its own scope so the induction variable
                // does not leak.
                let header = env.child();
                if let Some(init) = init {
                    self.eval_stmt(init, &header)?;
                }
                loop {
                    let keep_going = match cond {
                        Some(cond) => self.eval_expr(cond, &header)?.is_truthy(),
                        // An absent condition is always true.
                        None => true,
                    };
                    if !keep_going {
                        break;
                    }
                    self.eval_stmt(body, &header)?;
                    if let Some(update) = update {
                        self.eval_expr(update, &header)?;
                    }
                }
                Ok(Value::Nil)
            }
        }
    }

    /// Evaluate the statements of a block in the given (already child)
    /// scope. The block's value is its last statement's value.
    fn eval_block(&self, stmts: StmtRange, env: &Env) -> EvalResult {
        let mut last = Value::Nil;
        for &stmt in self.arena.stmt_list(stmts) {
            last = self.eval_stmt(stmt, env)?;
        }
        Ok(last)
    }

    /// Evaluate one expression.
    pub fn eval_expr(&self, id: ExprId, env: &Env) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(id, env))
    }

    fn eval_expr_inner(&self, id: ExprId, env: &Env) -> EvalResult {
        let expr = self.arena.expr(id);
        match expr.kind {
            ExprKind::Int(value) => Ok(Value::Int(value)),
            ExprKind::Bool(value) => Ok(Value::Bool(value)),
            ExprKind::Nil => Ok(Value::Nil),
            ExprKind::Ident(name) => self.lookup(name, env, expr.span),

            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand, env)?;
                self.eval_unary(op, value, expr.span)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                self.eval_binary(op, left, right, expr.span)
            }

            ExprKind::Assign { target, value } => {
                // The target must already be bound somewhere in the chain;
                // assignment never creates a binding.
                self.lookup(target, env, expr.span)?;
                let value = self.eval_expr(value, env)?;
                if !env.assign(target, value.clone()) {
                    return Err(self.not_found(target, expr.span));
                }
                Ok(value)
            }
            ExprKind::Update { op, target } => {
                let old = self.lookup(target, env, expr.span)?;
                let new = self.eval_binary(op.binary_op(), old.clone(), Value::Int(1), expr.span)?;
                env.assign(target, new);
                // Post-increment: the expression's result is the value
                // before the update.
                Ok(old)
            }

            ExprKind::If {
                cond,
                consequence,
                alternative,
            } => {
                if self.eval_expr(cond, env)?.is_truthy() {
                    self.eval_stmt(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_stmt(alternative, env)
                } else {
                    Ok(Value::Nil)
                }
            }

            ExprKind::Call { callee, args } => {
                let callee_value = self.eval_expr(callee, env)?;
                let mut arg_values = Vec::with_capacity(self.arena.args(args).len());
                for &arg in self.arena.args(args) {
                    arg_values.push(self.eval_expr(arg, env)?);
                }
                self.apply_function(callee_value, arg_values, expr.span)
            }
            ExprKind::FnLit { params, body } => Ok(Value::Function(Rc::new(FunctionValue {
                name: None,
                params,
                body,
                env: env.clone(),
            }))),
        }
    }

    fn apply_function(&self, callee: Value, args: Vec<Value>, span: Span) -> EvalResult {
        let Value::Function(function) = callee else {
            return Err(self.error(EvalErrorKind::NotCallable(callee.type_name()), span));
        };

        let params = self.arena.params(function.params);
        if params.len() != args.len() {
            return Err(self.error(
                EvalErrorKind::WrongArgumentCount {
                    expected: params.len(),
                    got: args.len(),
                },
                span,
            ));
        }

        trace!(params = params.len(), "calling function");

        // Parameters live in a fresh scope chained to the environment the
        // function was defined in, not the caller's. That is lexical
        // scoping.
        let call_env = function.env.child();
        for (&param, arg) in params.iter().zip(args) {
            call_env.define(param, arg);
        }

        match self.eval_stmt(function.body, &call_env) {
            Ok(value) => Ok(value),
            // The call boundary is where a Return becomes a value again.
            Err(Flow::Return(value)) => Ok(value),
            Err(err) => Err(err),
        }
    }

    fn eval_unary(&self, op: UnaryOp, value: Value, span: Span) -> EvalResult {
        match (op, &value) {
            (UnaryOp::Not, _) => Ok(Value::Bool(!value.is_truthy())),
            (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
            (UnaryOp::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
            _ => Err(self.error(
                EvalErrorKind::UnknownUnaryOp {
                    op: op.as_symbol(),
                    operand: value.type_name(),
                },
                span,
            )),
        }
    }

    fn eval_binary(&self, op: BinaryOp, left: Value, right: Value, span: Span) -> EvalResult {
        match (&left, &right) {
            (Value::Int(a), Value::Int(b)) => return self.eval_int_binary(op, *a, *b, span),
            (Value::Bool(a), Value::Bool(b)) => match op {
                BinaryOp::And => return Ok(Value::Bool(*a && *b)),
                BinaryOp::Or => return Ok(Value::Bool(*a || *b)),
                _ => {}
            },
            _ => {}
        }

        // Equality is defined across every pair of values, so it is
        // checked before the operand types are compared. `1 == true` is
        // false, not a type mismatch.
        match op {
            BinaryOp::Eq => return Ok(Value::Bool(left == right)),
            BinaryOp::NotEq => return Ok(Value::Bool(left != right)),
            _ => {}
        }

        if left.type_name() != right.type_name() {
            Err(self.error(
                EvalErrorKind::TypeMismatch {
                    op: op.as_symbol(),
                    left: left.type_name(),
                    right: right.type_name(),
                },
                span,
            ))
        } else {
            Err(self.error(
                EvalErrorKind::UnknownBinaryOp {
                    op: op.as_symbol(),
                    left: left.type_name(),
                    right: right.type_name(),
                },
                span,
            ))
        }
    }

    fn eval_int_binary(&self, op: BinaryOp, a: i64, b: i64, span: Span) -> EvalResult {
        let value = match op {
            BinaryOp::Add => Value::Int(a.wrapping_add(b)),
            BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
            BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
            BinaryOp::Div => {
                if b == 0 {
                    return Err(self.error(EvalErrorKind::DivisionByZero, span));
                }
                Value::Int(a.wrapping_div(b))
            }
            BinaryOp::Mod => {
                if b == 0 {
                    return Err(self.error(EvalErrorKind::DivisionByZero, span));
                }
                Value::Int(a.wrapping_rem(b))
            }
            BinaryOp::BitAnd => Value::Int(a & b),
            BinaryOp::BitOr => Value::Int(a | b),
            BinaryOp::BitXor => Value::Int(a ^ b),
            // Shift counts are taken modulo the integer width.
            BinaryOp::Shl => Value::Int(a.wrapping_shl((b & 63) as u32)),
            BinaryOp::Shr => Value::Int(a.wrapping_shr((b & 63) as u32)),
            BinaryOp::Lt => Value::Bool(a < b),
            BinaryOp::Gt => Value::Bool(a > b),
            BinaryOp::LtEq => Value::Bool(a <= b),
            BinaryOp::GtEq => Value::Bool(a >= b),
            BinaryOp::Eq => Value::Bool(a == b),
            BinaryOp::NotEq => Value::Bool(a != b),
            BinaryOp::And | BinaryOp::Or => {
                return Err(self.error(
                    EvalErrorKind::UnknownBinaryOp {
                        op: op.as_symbol(),
                        left: "INTEGER",
                        right: "INTEGER",
                    },
                    span,
                ));
            }
        };
        Ok(value)
    }

    fn define(&self, name: Name, value: Value, env: &Env, span: Span) -> Result<(), Flow> {
        if env.define(name, value) {
            Ok(())
        } else {
            Err(self.error(
                EvalErrorKind::AlreadyDefined(self.interner.lookup(name).to_owned()),
                span,
            ))
        }
    }

    fn lookup(&self, name: Name, env: &Env, span: Span) -> EvalResult {
        env.lookup(name).ok_or_else(|| self.not_found(name, span))
    }

    fn not_found(&self, name: Name, span: Span) -> Flow {
        self.error(
            EvalErrorKind::IdentifierNotFound(self.interner.lookup(name).to_owned()),
            span,
        )
    }

    fn error(&self, kind: EvalErrorKind, span: Span) -> Flow {
        Flow::Error(EvalError::new(kind, span))
    }
}
