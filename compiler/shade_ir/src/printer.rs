//! WGSL-style rendering of programs.
//!
//! Output is deterministic and fully parenthesizes binary expressions, which
//! makes printed programs a convenient structural fingerprint in tests and
//! debug logs.

use std::fmt::Write;

use shade_stack::ensure_sufficient_stack;

use crate::{
    Attribute, AttributeKind, CaseSelector, DeclId, DeclKind, ExprId, ExprKind, FloatSuffix,
    IntSuffix, Literal, Program, StmtId, StmtKind, VariableDecl, VariableKind,
};

const INDENT: &str = "  ";

/// Render every global declaration, separated by blank lines.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new(program);
    for (i, &decl) in program.module().global_declarations.iter().enumerate() {
        if i > 0 {
            printer.out.push('\n');
        }
        printer.decl(decl);
    }
    printer.out
}

/// Render one declaration.
pub fn print_decl(program: &Program, decl: DeclId) -> String {
    let mut printer = Printer::new(program);
    printer.decl(decl);
    printer.out
}

/// Render one statement at indentation level zero.
pub fn print_stmt(program: &Program, stmt: StmtId) -> String {
    let mut printer = Printer::new(program);
    printer.stmt(stmt);
    printer.out
}

/// Render one expression.
pub fn print_expr(program: &Program, expr: ExprId) -> String {
    Printer::new(program).expr_text(expr)
}

/// Strip the leading newline, trailing blank space, and common indentation
/// of an indented literal, ending the result with a single newline.
pub fn unindent(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text).trim_end();
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&line[indent..]);
            out.push('\n');
        }
    }
    out
}

struct Printer<'p> {
    program: &'p Program,
    out: String,
    depth: usize,
}

impl<'p> Printer<'p> {
    fn new(program: &'p Program) -> Self {
        Printer {
            program,
            out: String::new(),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn name(&self, name: crate::Name) -> &'static str {
        self.program.name(name)
    }

    fn decl(&mut self, id: DeclId) {
        let program = self.program;
        let decl = program.decl(id);
        match &decl.kind {
            DeclKind::Struct(s) => {
                let _ = writeln!(self.out, "struct {} {{", program.name(s.name));
                for member in &s.members {
                    let attrs = self.attributes(&member.attributes);
                    let ty = self.expr_text(member.ty);
                    let _ = writeln!(
                        self.out,
                        "{INDENT}{attrs}{} : {ty},",
                        program.name(member.name)
                    );
                }
                self.out.push_str("}\n");
            }
            DeclKind::Alias(a) => {
                let ty = self.expr_text(a.ty);
                let _ = writeln!(self.out, "alias {} = {ty};", program.name(a.name));
            }
            DeclKind::Function(f) => {
                let attrs = self.attributes(&f.attributes);
                let params: Vec<String> = f.params.iter().map(|&p| self.param_text(p)).collect();
                let _ = write!(
                    self.out,
                    "{attrs}fn {}({})",
                    program.name(f.name),
                    params.join(", ")
                );
                if let Some(ret) = f.return_type {
                    let ret_attrs = self.attributes(&f.return_type_attributes);
                    let ty = self.expr_text(ret);
                    let _ = write!(self.out, " -> {ret_attrs}{ty}");
                }
                match f.body {
                    Some(body) => {
                        self.out.push(' ');
                        self.block(body);
                        self.out.push('\n');
                    }
                    None => self.out.push_str(";\n"),
                }
            }
            DeclKind::Variable(v) => {
                let text = self.variable_text(v);
                let _ = writeln!(self.out, "{text};");
            }
            DeclKind::Parameter(_) => {
                let text = self.param_text(id);
                let _ = writeln!(self.out, "{text}");
            }
            DeclKind::DiagnosticDirective(d) => {
                let _ = writeln!(
                    self.out,
                    "diagnostic({}, {});",
                    program.name(d.severity),
                    program.name(d.rule)
                );
            }
            DeclKind::Enable(e) => {
                let exts: Vec<&str> = e.extensions.iter().map(|&n| program.name(n)).collect();
                let _ = writeln!(self.out, "enable {};", exts.join(", "));
            }
            DeclKind::ConstAssert(cond) => {
                let cond = self.expr_text(*cond);
                let _ = writeln!(self.out, "const_assert {cond};");
            }
        }
    }

    fn param_text(&self, id: DeclId) -> String {
        match &self.program.decl(id).kind {
            DeclKind::Parameter(p) => format!(
                "{}{} : {}",
                self.attributes(&p.attributes),
                self.name(p.name),
                self.expr_text(p.ty)
            ),
            _ => format!("<{}>", self.program.decl(id).kind_name()),
        }
    }

    fn variable_text(&self, v: &VariableDecl) -> String {
        let mut text = self.attributes(&v.attributes);
        text.push_str(v.kind.keyword());
        if let VariableKind::Var {
            address_space,
            access,
        } = v.kind
        {
            let args: Vec<String> = address_space
                .into_iter()
                .chain(access)
                .map(|e| self.expr_text(e))
                .collect();
            if !args.is_empty() {
                let _ = write!(text, "<{}>", args.join(", "));
            }
        }
        let _ = write!(text, " {}", self.name(v.name));
        if let Some(ty) = v.ty {
            let _ = write!(text, " : {}", self.expr_text(ty));
        }
        if let Some(init) = v.initializer {
            let _ = write!(text, " = {}", self.expr_text(init));
        }
        text
    }

    fn attributes(&self, attrs: &[Attribute]) -> String {
        let mut text = String::new();
        for attr in attrs {
            text.push('@');
            text.push_str(attr.kind.keyword());
            let args: Vec<String> = match &attr.kind {
                AttributeKind::Diagnostic { severity, rule } => {
                    vec![self.name(*severity).to_string(), self.name(*rule).to_string()]
                }
                AttributeKind::Stride(stride) => vec![stride.to_string()],
                other => other
                    .expressions()
                    .into_iter()
                    .map(|e| self.expr_text(e))
                    .collect(),
            };
            if !args.is_empty() {
                let _ = write!(text, "({})", args.join(", "));
            }
            text.push(' ');
        }
        text
    }

    /// Statements that also appear inside `for (...)` headers, without `;`.
    fn simple_stmt_text(&self, id: StmtId) -> Option<String> {
        let text = match self.program.stmt(id).kind {
            StmtKind::Assign { lhs, rhs } => {
                format!("{} = {}", self.expr_text(lhs), self.expr_text(rhs))
            }
            StmtKind::CompoundAssign { op, lhs, rhs } => format!(
                "{} {}= {}",
                self.expr_text(lhs),
                op.as_symbol(),
                self.expr_text(rhs)
            ),
            StmtKind::IncDec { lhs, increment } => {
                format!("{}{}", self.expr_text(lhs), if increment { "++" } else { "--" })
            }
            StmtKind::Call(call) => self.expr_text(call),
            StmtKind::VarDecl(decl) => match &self.program.decl(decl).kind {
                DeclKind::Variable(v) => self.variable_text(v),
                _ => format!("<{}>", self.program.decl(decl).kind_name()),
            },
            _ => return None,
        };
        Some(text)
    }

    fn stmt(&mut self, id: StmtId) {
        self.indent();
        self.stmt_inline(id);
        self.out.push('\n');
    }

    /// Statement without leading indentation or trailing newline.
    fn stmt_inline(&mut self, id: StmtId) {
        let program = self.program;
        if let Some(text) = self.simple_stmt_text(id) {
            self.out.push_str(&text);
            self.out.push(';');
            return;
        }
        match program.stmt(id).kind {
            StmtKind::Block(_) => self.block(id),
            StmtKind::Break => self.out.push_str("break;"),
            StmtKind::BreakIf(cond) => {
                let cond = self.expr_text(cond);
                let _ = write!(self.out, "break if {cond};");
            }
            StmtKind::Continue => self.out.push_str("continue;"),
            StmtKind::Discard => self.out.push_str("discard;"),
            StmtKind::Return(value) => match value {
                Some(value) => {
                    let value = self.expr_text(value);
                    let _ = write!(self.out, "return {value};");
                }
                None => self.out.push_str("return;"),
            },
            StmtKind::ConstAssert(cond) => {
                let cond = self.expr_text(cond);
                let _ = write!(self.out, "const_assert {cond};");
            }
            StmtKind::If {
                condition,
                body,
                else_stmt,
            } => {
                let cond = self.expr_text(condition);
                let _ = write!(self.out, "if ({cond}) ");
                self.block(body);
                if let Some(else_stmt) = else_stmt {
                    self.out.push_str(" else ");
                    self.stmt_inline(else_stmt);
                }
            }
            StmtKind::Loop { body, continuing } => {
                self.out.push_str("loop {\n");
                self.depth += 1;
                self.block_statements(body);
                if let Some(continuing) = continuing {
                    self.indent();
                    self.out.push_str("continuing ");
                    self.block(continuing);
                    self.out.push('\n');
                }
                self.depth -= 1;
                self.indent();
                self.out.push('}');
            }
            StmtKind::For {
                initializer,
                condition,
                continuing,
                body,
            } => {
                let init = initializer
                    .and_then(|s| self.simple_stmt_text(s))
                    .unwrap_or_default();
                let cond = condition.map(|c| self.expr_text(c)).unwrap_or_default();
                let cont = continuing
                    .and_then(|s| self.simple_stmt_text(s))
                    .unwrap_or_default();
                let _ = write!(self.out, "for ({init}; {cond}; {cont}) ");
                self.block(body);
            }
            StmtKind::While { condition, body } => {
                let cond = self.expr_text(condition);
                let _ = write!(self.out, "while ({cond}) ");
                self.block(body);
            }
            StmtKind::Switch { condition, cases } => {
                let cond = self.expr_text(condition);
                let _ = writeln!(self.out, "switch ({cond}) {{");
                self.depth += 1;
                for case in program.arena().cases(cases) {
                    let selectors: Vec<String> = case
                        .selectors
                        .iter()
                        .map(|sel| match sel {
                            CaseSelector::Default => "default".to_string(),
                            CaseSelector::Expr(e) => self.expr_text(*e),
                        })
                        .collect();
                    self.indent();
                    if selectors.len() == 1 && selectors[0] == "default" {
                        self.out.push_str("default: ");
                    } else {
                        let _ = write!(self.out, "case {}: ", selectors.join(", "));
                    }
                    self.block(case.body);
                    self.out.push('\n');
                }
                self.depth -= 1;
                self.indent();
                self.out.push('}');
            }
            StmtKind::Assign { .. }
            | StmtKind::CompoundAssign { .. }
            | StmtKind::IncDec { .. }
            | StmtKind::Call(_)
            | StmtKind::VarDecl(_) => {}
        }
    }

    /// `{`, the statements, and `}` without trailing newline.
    fn block(&mut self, id: StmtId) {
        self.out.push_str("{\n");
        self.depth += 1;
        self.block_statements(id);
        self.depth -= 1;
        self.indent();
        self.out.push('}');
    }

    fn block_statements(&mut self, id: StmtId) {
        let program = self.program;
        ensure_sufficient_stack(|| match program.stmt(id).kind {
            StmtKind::Block(range) => {
                for &stmt in program.arena().stmt_list(range) {
                    self.stmt(stmt);
                }
            }
            _ => self.stmt(id),
        });
    }

    fn expr_text(&self, id: ExprId) -> String {
        ensure_sufficient_stack(|| {
            let program = self.program;
            match program.expr(id).kind {
                ExprKind::Literal(lit) => literal_text(lit),
                ExprKind::Ident {
                    name,
                    template_args,
                } => {
                    let mut text = self.name(name).to_string();
                    if !template_args.is_empty() {
                        let args: Vec<String> = program
                            .arena()
                            .expr_list(template_args)
                            .iter()
                            .map(|&a| self.expr_text(a))
                            .collect();
                        let _ = write!(text, "<{}>", args.join(", "));
                    }
                    text
                }
                ExprKind::Phony => "_".to_string(),
                ExprKind::Binary { op, lhs, rhs } => format!(
                    "({} {} {})",
                    self.expr_text(lhs),
                    op.as_symbol(),
                    self.expr_text(rhs)
                ),
                ExprKind::Unary { op, operand } => {
                    format!("{}{}", op.as_symbol(), self.expr_text(operand))
                }
                ExprKind::Index { object, index } => {
                    format!("{}[{}]", self.expr_text(object), self.expr_text(index))
                }
                ExprKind::Member { object, member } => {
                    format!("{}.{}", self.expr_text(object), self.name(member))
                }
                ExprKind::Call { target, args } => {
                    let args: Vec<String> = program
                        .arena()
                        .expr_list(args)
                        .iter()
                        .map(|&a| self.expr_text(a))
                        .collect();
                    format!("{}({})", self.expr_text(target), args.join(", "))
                }
                ExprKind::Bitcast { ty, expr } => {
                    format!("bitcast<{}>({})", self.expr_text(ty), self.expr_text(expr))
                }
            }
        })
    }
}

fn literal_text(lit: Literal) -> String {
    match lit {
        Literal::Bool(value) => value.to_string(),
        Literal::Int { value, suffix } => {
            let suffix = match suffix {
                IntSuffix::None => "",
                IntSuffix::I => "i",
                IntSuffix::U => "u",
            };
            format!("{value}{suffix}")
        }
        Literal::Float { bits, suffix } => {
            let value = f64::from_bits(bits);
            let suffix = match suffix {
                FloatSuffix::None => "",
                FloatSuffix::F => "f",
                FloatSuffix::H => "h",
            };
            if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
                format!("{value:.1}{suffix}")
            } else {
                format!("{value}{suffix}")
            }
        }
    }
}
