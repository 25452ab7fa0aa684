//! Java-like rendering of target fragments.
//!
//! For logs and tests only; the real assembler consumes the trees directly.

use vela_ir::StringLookup;

use crate::{
    JBlock, JExpr, JMethod, JModifiers, JParam, JStmt, JType, JTypeParam, JVarDecl, Literal,
    Wildcard,
};

const INDENT: &str = "    ";

/// Render a type expression.
pub fn type_to_string<L: StringLookup + ?Sized>(ty: &JType, lookup: &L) -> String {
    let mut printer = Printer::new(lookup);
    printer.ty(ty);
    printer.buf
}

/// Render an expression.
pub fn expr_to_string<L: StringLookup + ?Sized>(expr: &JExpr, lookup: &L) -> String {
    let mut printer = Printer::new(lookup);
    printer.expr(expr);
    printer.buf
}

/// Render statements one per line, without a trailing newline.
pub fn stmts_to_string<L: StringLookup + ?Sized>(stmts: &[JStmt], lookup: &L) -> String {
    let mut printer = Printer::new(lookup);
    printer.stmt_lines(stmts);
    printer.finish()
}

/// Render a method declaration.
pub fn method_to_string<L: StringLookup + ?Sized>(method: &JMethod, lookup: &L) -> String {
    let mut printer = Printer::new(lookup);
    printer.method(method);
    printer.buf
}

struct Printer<'a, L: StringLookup + ?Sized> {
    lookup: &'a L,
    buf: String,
    depth: usize,
}

impl<'a, L: StringLookup + ?Sized> Printer<'a, L> {
    fn new(lookup: &'a L) -> Self {
        Printer {
            lookup,
            buf: String::new(),
            depth: 0,
        }
    }

    fn finish(mut self) -> String {
        while self.buf.ends_with('\n') {
            self.buf.pop();
        }
        self.buf
    }

    fn name(&mut self, name: vela_ir::Name) {
        self.buf.push_str(self.lookup.lookup(name));
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    fn comma_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            each(self, item);
        }
    }

    // Types

    fn ty(&mut self, ty: &JType) {
        match ty {
            JType::Primitive(p) => self.buf.push_str(p.keyword()),
            JType::Class(name) | JType::Var(name) => self.name(*name),
            JType::Member { outer, name } => {
                self.ty(outer);
                self.buf.push('.');
                self.name(*name);
            }
            JType::Apply { base, args } => {
                self.ty(base);
                self.buf.push('<');
                self.comma_list(args, Self::ty);
                self.buf.push('>');
            }
            JType::Wildcard(Wildcard::Unbounded) => self.buf.push('?'),
            JType::Wildcard(Wildcard::Extends(bound)) => {
                self.buf.push_str("? extends ");
                self.ty(bound);
            }
            JType::Wildcard(Wildcard::Super(bound)) => {
                self.buf.push_str("? super ");
                self.ty(bound);
            }
            JType::Array(element) => {
                self.ty(element);
                self.buf.push_str("[]");
            }
            JType::Erroneous => self.buf.push_str("<erroneous>"),
        }
    }

    // Expressions

    fn expr_at(&mut self, expr: &JExpr, min_precedence: u8) {
        if expr.precedence() < min_precedence {
            self.buf.push('(');
            self.expr(expr);
            self.buf.push(')');
        } else {
            self.expr(expr);
        }
    }

    fn expr(&mut self, expr: &JExpr) {
        match expr {
            JExpr::Ident(name) => self.name(*name),
            JExpr::Literal(lit) => self.literal(lit),
            JExpr::TypeRef(ty) => self.ty(ty),
            JExpr::ClassLiteral(ty) => {
                self.ty(ty);
                self.buf.push_str(".class");
            }
            JExpr::Select { target, name } => {
                self.expr_at(target, 15);
                self.buf.push('.');
                self.name(*name);
            }
            JExpr::Call {
                target,
                type_args,
                method,
                args,
            } => {
                if let Some(target) = target {
                    self.expr_at(target, 15);
                    self.buf.push('.');
                }
                if !type_args.is_empty() {
                    self.buf.push('<');
                    self.comma_list(type_args, Self::ty);
                    self.buf.push('>');
                }
                self.name(*method);
                self.args(args);
            }
            JExpr::New { class, args, body } => {
                self.buf.push_str("new ");
                self.ty(class);
                self.args(args);
                if let Some(body) = body {
                    self.buf.push_str(" {\n");
                    self.depth += 1;
                    for method in &body.methods {
                        self.indent();
                        self.method(method);
                        self.buf.push('\n');
                    }
                    self.depth -= 1;
                    self.indent();
                    self.buf.push('}');
                }
            }
            JExpr::NewArray { element, size } => {
                self.buf.push_str("new ");
                self.ty(element);
                self.buf.push('[');
                self.expr(size);
                self.buf.push(']');
            }
            JExpr::Cast { ty, expr } => {
                self.buf.push('(');
                self.ty(ty);
                self.buf.push_str(") ");
                self.expr_at(expr, 13);
            }
            JExpr::InstanceOf { expr, ty } => {
                self.expr_at(expr, 9);
                self.buf.push_str(" instanceof ");
                self.ty(ty);
            }
            JExpr::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                self.expr_at(lhs, prec);
                self.buf.push(' ');
                self.buf.push_str(op.symbol());
                self.buf.push(' ');
                self.expr_at(rhs, prec + 1);
            }
            JExpr::Not(inner) => {
                self.buf.push('!');
                self.expr_at(inner, 13);
            }
            JExpr::Assign { target, value } => {
                self.expr_at(target, 2);
                self.buf.push_str(" = ");
                self.expr_at(value, 1);
            }
            JExpr::Index { array, index } => {
                self.expr_at(array, 15);
                self.buf.push('[');
                self.expr(index);
                self.buf.push(']');
            }
            JExpr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                self.expr_at(cond, 3);
                self.buf.push_str(" ? ");
                self.expr_at(then, 3);
                self.buf.push_str(" : ");
                self.expr_at(otherwise, 2);
            }
            JExpr::Let { stmts, value } => {
                self.buf.push_str("(let ");
                for stmt in stmts {
                    self.stmt(stmt);
                    self.buf.push(' ');
                }
                self.buf.push_str("in ");
                self.expr(value);
                self.buf.push(')');
            }
        }
    }

    fn args(&mut self, args: &[JExpr]) {
        self.buf.push('(');
        self.comma_list(args, Self::expr);
        self.buf.push(')');
    }

    fn literal(&mut self, lit: &Literal) {
        match lit {
            Literal::Null => self.buf.push_str("null"),
            Literal::Bool(b) => self.buf.push_str(if *b { "true" } else { "false" }),
            Literal::Int(i) => self.buf.push_str(&i.to_string()),
            Literal::Long(l) => {
                self.buf.push_str(&l.to_string());
                self.buf.push('L');
            }
            Literal::Double(bits) => self.buf.push_str(&format!("{:?}", f64::from_bits(*bits))),
            Literal::Char(c) => self.buf.push_str(&format!("'{}'", c.escape_default())),
            Literal::String(name) => {
                let text = self.lookup.lookup(*name);
                self.buf.push_str(&format!("{text:?}"));
            }
        }
    }

    // Statements

    fn stmt_lines(&mut self, stmts: &[JStmt]) {
        for stmt in stmts {
            self.indent();
            self.stmt(stmt);
            self.buf.push('\n');
        }
    }

    fn block(&mut self, block: &JBlock) {
        self.buf.push_str("{\n");
        self.depth += 1;
        self.stmt_lines(&block.stmts);
        self.depth -= 1;
        self.indent();
        self.buf.push('}');
    }

    fn var_decl(&mut self, decl: &JVarDecl) {
        if decl.is_final {
            self.buf.push_str("final ");
        }
        self.ty(&decl.ty);
        self.buf.push(' ');
        self.name(decl.name);
        if let Some(init) = &decl.init {
            self.buf.push_str(" = ");
            self.expr(init);
        }
    }

    fn stmt(&mut self, stmt: &JStmt) {
        match stmt {
            JStmt::VarDef(decl) => {
                self.var_decl(decl);
                self.buf.push(';');
            }
            JStmt::Exec(expr) => {
                self.expr(expr);
                self.buf.push(';');
            }
            JStmt::If {
                cond,
                then,
                otherwise,
            } => {
                self.buf.push_str("if (");
                self.expr(cond);
                self.buf.push_str(") ");
                self.block(then);
                if let Some(otherwise) = otherwise {
                    self.buf.push_str(" else ");
                    self.block(otherwise);
                }
            }
            JStmt::While { cond, body } => {
                self.buf.push_str("while (");
                self.expr(cond);
                self.buf.push_str(") ");
                self.block(body);
            }
            JStmt::For {
                init,
                cond,
                step,
                body,
            } => {
                self.buf.push_str("for (");
                self.comma_list(init, Self::var_decl);
                self.buf.push_str("; ");
                self.expr(cond);
                self.buf.push_str("; ");
                self.comma_list(step, Self::expr);
                self.buf.push_str(") ");
                self.block(body);
            }
            JStmt::Break => self.buf.push_str("break;"),
            JStmt::Return(None) => self.buf.push_str("return;"),
            JStmt::Return(Some(expr)) => {
                self.buf.push_str("return ");
                self.expr(expr);
                self.buf.push(';');
            }
            JStmt::Block(block) => self.block(block),
        }
    }

    // Declarations

    fn modifiers(&mut self, modifiers: JModifiers) {
        const WORDS: [(JModifiers, &str); 5] = [
            (JModifiers::PUBLIC, "public "),
            (JModifiers::PRIVATE, "private "),
            (JModifiers::STATIC, "static "),
            (JModifiers::ABSTRACT, "abstract "),
            (JModifiers::FINAL, "final "),
        ];
        for (flag, word) in WORDS {
            if modifiers.contains(flag) {
                self.buf.push_str(word);
            }
        }
    }

    fn type_param(&mut self, param: &JTypeParam) {
        self.name(param.name);
        for (i, bound) in param.bounds.iter().enumerate() {
            self.buf.push_str(if i == 0 { " extends " } else { " & " });
            self.ty(bound);
        }
    }

    fn param(&mut self, param: &JParam) {
        if param.is_final {
            self.buf.push_str("final ");
        }
        if param.varargs {
            let element = match &param.ty {
                JType::Array(element) => element.as_ref(),
                other => other,
            };
            self.ty(element);
            self.buf.push_str("...");
        } else {
            self.ty(&param.ty);
        }
        self.buf.push(' ');
        self.name(param.name);
    }

    fn method(&mut self, method: &JMethod) {
        self.modifiers(method.modifiers);
        if !method.type_params.is_empty() {
            self.buf.push('<');
            self.comma_list(&method.type_params, Self::type_param);
            self.buf.push_str("> ");
        }
        self.ty(&method.result);
        self.buf.push(' ');
        self.name(method.name);
        self.buf.push('(');
        self.comma_list(&method.params, Self::param);
        self.buf.push(')');
        match &method.body {
            Some(body) => {
                self.buf.push(' ');
                self.block(body);
            }
            None => self.buf.push(';'),
        }
    }
}
