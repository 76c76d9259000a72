//! A small interpreter for the statement and expression subset the
//! promotion tests generate, including the loops, `else` blocks and
//! `break`s the transform produces.
//!
//! Every call is impure: it increments `x`, logs itself and returns a value
//! derived from a global call counter and its arguments. Evaluation order
//! of operands is selectable, which makes order dependence observable.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use shade_ir::{
    BinaryOp, CaseSelector, DeclKind, ExprId, ExprKind, Literal, Program, StmtId, StmtKind,
    UnaryOp,
};
use shade_stack::ensure_sufficient_stack;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Order {
    /// Operands left to right, `&&` and `||` short-circuit.
    LeftToRight,
    /// Operands right to left, `&&` and `||` evaluate both sides.
    RightToLeft,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Outcome {
    /// `x`, `y` and every `r*` local.
    pub values: BTreeMap<String, i64>,
    pub calls: Vec<String>,
}

/// How a statement finished.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Flow {
    Next,
    Break,
}

pub fn run(program: &Program, function: &str, order: Order) -> Outcome {
    let f = program.find_global(function).expect("function");
    let DeclKind::Function(func) = &program.decl(f).kind else {
        panic!("{function} is not a function");
    };
    let mut eval = Eval {
        program,
        order,
        vars: BTreeMap::from([("x".to_owned(), 1), ("y".to_owned(), 2)]),
        counter: 0,
        calls: Vec::new(),
    };
    let _ = eval.stmt(func.body.expect("body"));
    let values = eval
        .vars
        .into_iter()
        .filter(|(name, _)| name == "x" || name == "y" || name.starts_with('r'))
        .collect();
    Outcome {
        values,
        calls: eval.calls,
    }
}

struct Eval<'p> {
    program: &'p Program,
    order: Order,
    /// Globals and locals share one namespace; generated names never clash.
    vars: BTreeMap<String, i64>,
    counter: i64,
    calls: Vec<String>,
}

impl Eval<'_> {
    fn stmt(&mut self, id: StmtId) -> Flow {
        ensure_sufficient_stack(|| self.stmt_inner(id))
    }

    fn stmt_inner(&mut self, id: StmtId) -> Flow {
        let program = self.program;
        match program.stmt(id).kind {
            StmtKind::Block(range) => {
                for &stmt in program.arena().stmt_list(range) {
                    if self.stmt(stmt) == Flow::Break {
                        return Flow::Break;
                    }
                }
            }
            StmtKind::VarDecl(decl) => {
                let DeclKind::Variable(v) = &program.decl(decl).kind else {
                    panic!("not a variable");
                };
                let value = v.initializer.map_or(0, |init| self.expr(init));
                self.vars.insert(program.name(v.name).to_owned(), value);
            }
            StmtKind::Assign { lhs, rhs } => {
                let ExprKind::Ident { name, .. } = program.expr(lhs).kind else {
                    panic!("only identifiers are assigned");
                };
                let value = self.expr(rhs);
                self.vars.insert(program.name(name).to_owned(), value);
            }
            StmtKind::If {
                condition,
                body,
                else_stmt,
            } => {
                if self.expr(condition) != 0 {
                    return self.stmt(body);
                } else if let Some(else_stmt) = else_stmt {
                    return self.stmt(else_stmt);
                }
            }
            StmtKind::Call(call) => {
                self.expr(call);
            }
            StmtKind::Break => return Flow::Break,
            StmtKind::BreakIf(condition) => {
                if self.expr(condition) != 0 {
                    return Flow::Break;
                }
            }
            StmtKind::Loop { body, continuing } => loop {
                if self.stmt(body) == Flow::Break {
                    break;
                }
                if continuing.is_some_and(|cont| self.stmt(cont) == Flow::Break) {
                    break;
                }
            },
            StmtKind::While { condition, body } => {
                while self.expr(condition) != 0 {
                    if self.stmt(body) == Flow::Break {
                        break;
                    }
                }
            }
            StmtKind::For {
                initializer,
                condition,
                continuing,
                body,
            } => {
                if let Some(init) = initializer {
                    self.stmt(init);
                }
                loop {
                    if condition.is_some_and(|cond| self.expr(cond) == 0) {
                        break;
                    }
                    if self.stmt(body) == Flow::Break {
                        break;
                    }
                    if let Some(cont) = continuing {
                        self.stmt(cont);
                    }
                }
            }
            StmtKind::Switch { condition, cases } => {
                let value = self.expr(condition);
                let cases = program.arena().cases(cases);
                let chosen = cases
                    .iter()
                    .find(|case| {
                        case.selectors.iter().any(|selector| match *selector {
                            CaseSelector::Expr(expr) => self.expr(expr) == value,
                            CaseSelector::Default => false,
                        })
                    })
                    .or_else(|| {
                        cases
                            .iter()
                            .find(|case| case.selectors.contains(&CaseSelector::Default))
                    });
                // `break` leaves the switch, not an enclosing loop.
                if let Some(case) = chosen {
                    self.stmt(case.body);
                }
            }
            other => panic!("unsupported statement: {}", other.describe()),
        }
        Flow::Next
    }

    fn pair(&mut self, lhs: ExprId, rhs: ExprId) -> (i64, i64) {
        match self.order {
            Order::LeftToRight => {
                let l = self.expr(lhs);
                (l, self.expr(rhs))
            }
            Order::RightToLeft => {
                let r = self.expr(rhs);
                (self.expr(lhs), r)
            }
        }
    }

    fn expr(&mut self, id: ExprId) -> i64 {
        ensure_sufficient_stack(|| self.expr_inner(id))
    }

    fn expr_inner(&mut self, id: ExprId) -> i64 {
        let program = self.program;
        match program.expr(id).kind {
            ExprKind::Literal(Literal::Int { value, .. }) => value,
            ExprKind::Literal(Literal::Bool(value)) => i64::from(value),
            ExprKind::Ident { name, .. } => {
                let name = program.name(name);
                *self.vars.get(name).unwrap_or_else(|| panic!("unknown {name}"))
            }
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            } => i64::from(self.expr(operand) == 0),
            ExprKind::Binary { op, lhs, rhs } => match (op, self.order) {
                (BinaryOp::LogicalAnd, Order::LeftToRight) => {
                    i64::from(self.expr(lhs) != 0 && self.expr(rhs) != 0)
                }
                (BinaryOp::LogicalOr, Order::LeftToRight) => {
                    i64::from(self.expr(lhs) != 0 || self.expr(rhs) != 0)
                }
                _ => {
                    let (l, r) = self.pair(lhs, rhs);
                    match op {
                        BinaryOp::LogicalAnd => i64::from(l != 0 && r != 0),
                        BinaryOp::LogicalOr => i64::from(l != 0 || r != 0),
                        BinaryOp::Add => l.wrapping_add(r),
                        BinaryOp::Less => i64::from(l < r),
                        other => panic!("unsupported operator {}", other.as_symbol()),
                    }
                }
            },
            ExprKind::Call { target, args } => {
                let ExprKind::Ident { name, .. } = program.expr(target).kind else {
                    panic!("call target must be a name");
                };
                let mut ids: Vec<ExprId> = program.arena().expr_list(args).to_vec();
                if self.order == Order::RightToLeft {
                    ids.reverse();
                }
                let mut values: Vec<i64> = ids.into_iter().map(|arg| self.expr(arg)).collect();
                if self.order == Order::RightToLeft {
                    values.reverse();
                }
                self.counter += 1;
                *self.vars.entry("x".to_owned()).or_default() += 1;
                let name = program.name(name);
                self.calls.push(format!("{name}{values:?}"));
                (self.counter + values.iter().sum::<i64>()).rem_euclid(3)
            }
            other => panic!("unsupported expression: {}", other.describe()),
        }
    }
}
