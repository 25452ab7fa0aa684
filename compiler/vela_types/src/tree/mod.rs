//! Typed statement tree handed to the backend.
//!
//! Every expression carries its resolved type and whether the front end's
//! boxing analysis left it in raw-value (unboxed) form.

use vela_ir::{Name, Span};

use crate::{DeclId, Idx};

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Block {
            stmts,
            span: Span::DUMMY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt {
            kind,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Local value declaration.
    Attribute(AttributeDecl),
    /// `x = value;`
    Specifier { target: Name, value: Expr },
    /// Expression evaluated for effect.
    Expr(Expr),
    Return(Option<Expr>),
    Break,
    If {
        cond: Condition,
        then_block: Block,
        else_block: Option<Block>,
    },
    While { cond: Condition, body: Block },
    For(ForStmt),
    Block(Block),
}

/// `value x = init;` or `variable Integer x := init;`
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDecl {
    pub name: Name,
    pub ty: Idx,
    pub init: Option<Expr>,
    pub variable: bool,
}

/// A name bound by a condition or loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: Name,
    pub ty: Idx,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// `if (expr)`
    Boolean(Expr),
    /// `if (exists expr)` or `if (exists x = expr)`
    Exists {
        variable: Option<Variable>,
        expr: Expr,
    },
    /// `if (is T x)`: narrows `x` to `ty` inside the block.
    Is { variable: Name, ty: Idx, expr: Expr },
    /// `if (nonempty x)`: `variable.ty` is the nonempty narrowing.
    Nonempty { variable: Variable, expr: Expr },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ForIterator {
    /// `for (x in xs)`
    Value(Variable),
    /// `for (k -> v in entries)`
    KeyValue(Variable, Variable),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub iterator: ForIterator,
    pub subject: Expr,
    pub body: Block,
    pub else_block: Option<Block>,
}

/// A function or method with its body.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    /// The method declaration, carrying parameter lists and return type.
    pub decl: DeclId,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Idx,
    /// The value is in raw (unboxed) form.
    pub unboxed: bool,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Idx) -> Self {
        Expr {
            kind,
            ty,
            unboxed: false,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn unboxed(mut self) -> Self {
        self.unboxed = true;
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Eq,
    NotEq,
    Lt,
    Gt,
    And,
    Or,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Reference to a local value or parameter.
    Ident(Name),
    Integer(i64),
    /// Stored as bits so the tree stays `Eq`-friendly for callers.
    Float(u64),
    String(Name),
    Character(char),
    Boolean(bool),
    Null,
    /// Attribute read: `receiver.member`.
    Member { receiver: Box<Expr>, member: Name },
    /// Invocation of a function or method declaration with one argument
    /// per parameter of its first list.
    Call {
        receiver: Option<Box<Expr>>,
        function: DeclId,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Not(Box<Expr>),
    /// Sequence literal `{ a, b, c }`; `ty` is its sequence type.
    Sequence(Vec<Expr>),
    /// A function used as a value.
    FunctionRef(DeclId),
}
