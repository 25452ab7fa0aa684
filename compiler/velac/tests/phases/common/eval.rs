//! A small interpreter for lowered fragments.
//!
//! Runs just enough of the target language to check what lowered code
//! does: locals and scopes, `if`/`while`/`for`, `break` and `return`,
//! let-expressions, anonymous callables, and the runtime methods the
//! lowerers call (iteration, boxing, emptiness). Boxing is the identity:
//! a value and its box evaluate the same.
//!
//! Unqualified calls to `emit` record their argument in
//! [`Machine::output`]; other unqualified calls go to the methods the
//! machine was given.

use std::rc::Rc;

use vela_ir::Name;
use vela_target::{JBinOp, JBlock, JExpr, JMethod, JStmt, JType, Literal};
use vela_types::Model;

/// Loop iterations allowed before a run is declared stuck.
const FUEL: usize = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Seq(Rc<Vec<Value>>),
    /// An iterator over a sequence, at a position.
    Iter(Rc<Vec<Value>>, usize),
    Entry(Rc<(Value, Value)>),
    Callable(Rc<Closure>),
}

impl Value {
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Seq(Rc::new(items.into_iter().collect()))
    }

    pub fn str(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    pub fn entry(key: Value, item: Value) -> Value {
        Value::Entry(Rc::new((key, item)))
    }

    fn truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            other => panic!("expected a boolean, got {other:?}"),
        }
    }

    fn int(&self) -> i64 {
        match self {
            Value::Int(i) => *i,
            other => panic!("expected an integer, got {other:?}"),
        }
    }
}

/// An anonymous class instance with a single `call` method, holding the
/// locals visible where it was created.
#[derive(Clone, Debug, PartialEq)]
pub struct Closure {
    method: JMethod,
    env: Vec<(Name, Value)>,
}

enum Flow {
    Normal,
    Break,
    Return(Value),
}

pub struct Machine<'m> {
    model: &'m Model,
    methods: Vec<JMethod>,
    globals: Vec<(Name, Value)>,
    env: Vec<(Name, Value)>,
    fuel: usize,
    pub output: Vec<Value>,
}

impl<'m> Machine<'m> {
    pub fn new(model: &'m Model, methods: Vec<JMethod>) -> Self {
        Machine {
            model,
            methods,
            globals: Vec::new(),
            env: Vec::new(),
            fuel: FUEL,
            output: Vec::new(),
        }
    }

    /// Make `name` visible to every method run from now on.
    #[must_use]
    pub fn with_global(mut self, name: &str, value: Value) -> Self {
        self.globals.push((self.model.intern(name), value));
        self
    }

    /// Run the method called `name`.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Value {
        let method = self
            .methods
            .iter()
            .find(|m| self.model.str(m.name) == name)
            .cloned()
            .unwrap_or_else(|| panic!("no method `{name}`"));
        let env = self.globals.clone();
        self.invoke(&method, env, args)
    }

    /// Call a function value.
    pub fn apply(&mut self, callable: &Value, args: Vec<Value>) -> Value {
        let Value::Callable(closure) = callable else {
            panic!("not callable: {callable:?}");
        };
        self.invoke(&closure.method, closure.env.clone(), args)
    }

    fn invoke(&mut self, method: &JMethod, env: Vec<(Name, Value)>, args: Vec<Value>) -> Value {
        let saved = std::mem::replace(&mut self.env, env);
        match method.params.as_slice() {
            [only] if only.varargs => self.env.push((only.name, Value::seq(args))),
            params => {
                assert_eq!(params.len(), args.len(), "arity of `{}`", self.model.str(method.name));
                self.env.extend(params.iter().map(|p| p.name).zip(args));
            }
        }
        let body = method.body.as_ref().expect("abstract method called");
        let flow = self.block(body);
        self.env = saved;
        match flow {
            Flow::Return(value) => value,
            Flow::Normal => Value::Null,
            Flow::Break => panic!("`break` escaped `{}`", self.model.str(method.name)),
        }
    }

    // ── Statements ──────────────────────────────────────────────────────

    fn block(&mut self, block: &JBlock) -> Flow {
        let mark = self.env.len();
        let flow = self.stmts(&block.stmts);
        self.env.truncate(mark);
        flow
    }

    fn stmts(&mut self, stmts: &[JStmt]) -> Flow {
        for stmt in stmts {
            match self.stmt(stmt) {
                Flow::Normal => {}
                other => return other,
            }
        }
        Flow::Normal
    }

    fn stmt(&mut self, stmt: &JStmt) -> Flow {
        match stmt {
            JStmt::VarDef(var) => {
                let value = var.init.as_ref().map_or(Value::Null, |init| self.eval(init));
                self.env.push((var.name, value));
            }
            JStmt::Exec(expr) => {
                self.eval(expr);
            }
            JStmt::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(cond).truthy() {
                    return self.block(then);
                }
                if let Some(otherwise) = otherwise {
                    return self.block(otherwise);
                }
            }
            JStmt::While { cond, body } => {
                while self.eval(cond).truthy() {
                    self.burn();
                    match self.block(body) {
                        Flow::Normal => {}
                        Flow::Break => break,
                        ret @ Flow::Return(_) => return ret,
                    }
                }
            }
            JStmt::For {
                init,
                cond,
                step,
                body,
            } => {
                let mark = self.env.len();
                for var in init {
                    let value = var.init.as_ref().map_or(Value::Null, |init| self.eval(init));
                    self.env.push((var.name, value));
                }
                let mut flow = Flow::Normal;
                while self.eval(cond).truthy() {
                    self.burn();
                    match self.block(body) {
                        Flow::Normal => {}
                        Flow::Break => break,
                        ret @ Flow::Return(_) => {
                            flow = ret;
                            break;
                        }
                    }
                    for expr in step {
                        self.eval(expr);
                    }
                }
                self.env.truncate(mark);
                return flow;
            }
            JStmt::Break => return Flow::Break,
            JStmt::Return(value) => {
                let value = value.as_ref().map_or(Value::Null, |v| self.eval(v));
                return Flow::Return(value);
            }
            JStmt::Block(block) => return self.block(block),
        }
        Flow::Normal
    }

    fn burn(&mut self) {
        self.fuel = self.fuel.checked_sub(1).expect("loop does not terminate");
    }

    // ── Expressions ─────────────────────────────────────────────────────

    fn eval(&mut self, expr: &JExpr) -> Value {
        match expr {
            JExpr::Ident(name) => self.lookup(*name),
            JExpr::Literal(literal) => match literal {
                Literal::Null => Value::Null,
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Int(i) => Value::Int(i64::from(*i)),
                Literal::Long(i) => Value::Int(*i),
                Literal::String(text) => Value::str(self.model.str(*text)),
                other => panic!("unsupported literal {other:?}"),
            },
            JExpr::Call {
                target,
                method,
                args,
                ..
            } => {
                let args: Vec<Value> = args.iter().map(|a| self.eval(a)).collect();
                let method = self.model.str(*method);
                match target.as_deref() {
                    None if method == "emit" => {
                        self.output.extend(args);
                        Value::Null
                    }
                    None => self.call(method, args),
                    Some(JExpr::TypeRef(_)) => static_call(method, args),
                    Some(receiver) => {
                        let receiver = self.eval(receiver);
                        self.method_call(receiver, method, args)
                    }
                }
            }
            JExpr::New { class, args, body } => match body {
                Some(body) => Value::Callable(Rc::new(Closure {
                    method: body.methods[0].clone(),
                    env: self.env.clone(),
                })),
                None if self.class_name(class) == "vela.language.ArraySequence" => {
                    Value::seq(args.iter().map(|a| self.eval(a)).collect::<Vec<_>>())
                }
                None => panic!("cannot instantiate {class:?}"),
            },
            JExpr::Cast { expr, .. } => self.eval(expr),
            JExpr::InstanceOf { expr, ty } => {
                let value = self.eval(expr);
                Value::Bool(self.instance_of(&value, ty))
            }
            JExpr::Binary { op, lhs, rhs } => self.binary(*op, lhs, rhs),
            JExpr::Not(operand) => Value::Bool(!self.eval(operand).truthy()),
            JExpr::Assign { target, value } => {
                let JExpr::Ident(name) = target.as_ref() else {
                    panic!("assignment to {target:?}");
                };
                let value = self.eval(value);
                let model = self.model;
                let slot = self
                    .env
                    .iter_mut()
                    .rev()
                    .find(|(n, _)| n == name)
                    .unwrap_or_else(|| panic!("assignment to unbound `{}`", model.str(*name)));
                slot.1 = value.clone();
                value
            }
            JExpr::Index { array, index } => {
                let Value::Seq(items) = self.eval(array) else {
                    panic!("indexing a non-array");
                };
                let index = usize::try_from(self.eval(index).int()).unwrap();
                items[index].clone()
            }
            JExpr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(cond).truthy() {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            JExpr::Let { stmts, value } => {
                let mark = self.env.len();
                assert!(matches!(self.stmts(stmts), Flow::Normal), "jump out of a let-expression");
                let value = self.eval(value);
                self.env.truncate(mark);
                value
            }
            other => panic!("unsupported expression {other:?}"),
        }
    }

    fn lookup(&self, name: Name) -> Value {
        self.env
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| panic!("unbound `{}`", self.model.str(name)))
    }

    fn binary(&mut self, op: JBinOp, lhs: &JExpr, rhs: &JExpr) -> Value {
        match op {
            JBinOp::And => {
                return Value::Bool(self.eval(lhs).truthy() && self.eval(rhs).truthy());
            }
            JBinOp::Or => {
                return Value::Bool(self.eval(lhs).truthy() || self.eval(rhs).truthy());
            }
            _ => {}
        }
        let lhs = self.eval(lhs);
        let rhs = self.eval(rhs);
        match op {
            JBinOp::Eq => Value::Bool(lhs == rhs),
            JBinOp::Ne => Value::Bool(lhs != rhs),
            JBinOp::Add => match (lhs, rhs) {
                (Value::Str(a), Value::Str(b)) => Value::Str(a + &b),
                (Value::Int(a), Value::Int(b)) => Value::Int(a + b),
                (a, b) => panic!("cannot add {a:?} and {b:?}"),
            },
            JBinOp::Sub => Value::Int(lhs.int() - rhs.int()),
            JBinOp::Mul => Value::Int(lhs.int() * rhs.int()),
            JBinOp::Lt => Value::Bool(lhs.int() < rhs.int()),
            JBinOp::Gt => Value::Bool(lhs.int() > rhs.int()),
            JBinOp::And | JBinOp::Or => unreachable!(),
        }
    }

    fn method_call(&mut self, receiver: Value, method: &str, mut args: Vec<Value>) -> Value {
        match (method, receiver) {
            ("iterator", Value::Seq(items)) => Value::Iter(items, 0),
            ("getHead", Value::Iter(items, at)) => items.get(at).cloned().unwrap_or(Value::Null),
            ("getTail", Value::Iter(items, at)) => Value::Iter(items, at + 1),
            ("getEmpty", Value::Seq(items)) => Value::Bool(items.is_empty()),
            ("getSize", Value::Seq(items)) => Value::Int(i64::try_from(items.len()).unwrap()),
            ("getKey", Value::Entry(entry)) => entry.0.clone(),
            ("getElement", Value::Entry(entry)) => entry.1.clone(),
            ("equals", receiver) => Value::Bool(receiver == args.remove(0)),
            ("call", callable @ Value::Callable(_)) => self.apply(&callable, args),
            ("longValue" | "intValue" | "booleanValue" | "toString", receiver) => receiver,
            (method, receiver) => panic!("no method `{method}` on {receiver:?}"),
        }
    }

    fn class_name(&self, ty: &JType) -> &'static str {
        match ty {
            JType::Class(name) => self.model.str(*name),
            JType::Apply { base, .. } => self.class_name(base),
            other => panic!("not a class type: {other:?}"),
        }
    }

    fn instance_of(&self, value: &Value, ty: &JType) -> bool {
        match (self.class_name(ty), value) {
            (_, Value::Null) => false,
            ("java.lang.Object", _)
            | ("vela.language.Integer", Value::Int(_))
            | ("vela.language.Boolean", Value::Bool(_))
            | ("vela.language.String" | "java.lang.String", Value::Str(_))
            | ("vela.language.Entry", Value::Entry(_))
            | ("vela.language.Callable", Value::Callable(_))
            | (
                "vela.language.Iterable" | "vela.language.Sequence" | "vela.language.FixedSized",
                Value::Seq(_),
            ) => true,
            _ => false,
        }
    }
}

/// Runtime factories: boxing and the empty sequence.
fn static_call(method: &str, mut args: Vec<Value>) -> Value {
    match method {
        "instance" => args.remove(0),
        "get_" => Value::seq([]),
        other => panic!("no static method `{other}`"),
    }
}
