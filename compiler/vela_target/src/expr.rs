//! Target expressions.

use vela_ir::Name;

use crate::{JClassBody, JStmt, JType};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    /// `f64` bits.
    Double(u64),
    Char(char),
    String(Name),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum JBinOp {
    Add,
    Sub,
    Mul,
    Eq,
    Ne,
    Lt,
    Gt,
    And,
    Or,
}

impl JBinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            JBinOp::Add => "+",
            JBinOp::Sub => "-",
            JBinOp::Mul => "*",
            JBinOp::Eq => "==",
            JBinOp::Ne => "!=",
            JBinOp::Lt => "<",
            JBinOp::Gt => ">",
            JBinOp::And => "&&",
            JBinOp::Or => "||",
        }
    }

    /// Binding strength, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            JBinOp::Or => 3,
            JBinOp::And => 4,
            JBinOp::Eq | JBinOp::Ne => 7,
            JBinOp::Lt | JBinOp::Gt => 8,
            JBinOp::Add | JBinOp::Sub => 10,
            JBinOp::Mul => 11,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum JExpr {
    Ident(Name),
    Literal(Literal),
    /// A type in expression position, as the receiver of a static call.
    TypeRef(JType),
    /// `T.class`
    ClassLiteral(JType),
    Select {
        target: Box<JExpr>,
        name: Name,
    },
    /// `target.<type_args>method(args)`, or an unqualified call.
    Call {
        target: Option<Box<JExpr>>,
        type_args: Vec<JType>,
        method: Name,
        args: Vec<JExpr>,
    },
    /// `new T(args)`, with an anonymous class body when `body` is set.
    New {
        class: JType,
        args: Vec<JExpr>,
        body: Option<JClassBody>,
    },
    /// `new T[size]`
    NewArray {
        element: JType,
        size: Box<JExpr>,
    },
    Cast {
        ty: JType,
        expr: Box<JExpr>,
    },
    InstanceOf {
        expr: Box<JExpr>,
        ty: JType,
    },
    Binary {
        op: JBinOp,
        lhs: Box<JExpr>,
        rhs: Box<JExpr>,
    },
    Not(Box<JExpr>),
    Assign {
        target: Box<JExpr>,
        value: Box<JExpr>,
    },
    Index {
        array: Box<JExpr>,
        index: Box<JExpr>,
    },
    Conditional {
        cond: Box<JExpr>,
        then: Box<JExpr>,
        otherwise: Box<JExpr>,
    },
    /// Statements run for effect, then `value`: the target's let-expression.
    Let {
        stmts: Vec<JStmt>,
        value: Box<JExpr>,
    },
}

impl JExpr {
    pub fn null() -> JExpr {
        JExpr::Literal(Literal::Null)
    }

    pub fn bool(value: bool) -> JExpr {
        JExpr::Literal(Literal::Bool(value))
    }

    pub fn int(value: i32) -> JExpr {
        JExpr::Literal(Literal::Int(value))
    }

    pub fn ident(name: Name) -> JExpr {
        JExpr::Ident(name)
    }

    pub fn select(target: JExpr, name: Name) -> JExpr {
        JExpr::Select {
            target: Box::new(target),
            name,
        }
    }

    /// `target.method(args)`
    pub fn call(target: JExpr, method: Name, args: Vec<JExpr>) -> JExpr {
        JExpr::Call {
            target: Some(Box::new(target)),
            type_args: Vec::new(),
            method,
            args,
        }
    }

    /// `method(args)`
    pub fn call_local(method: Name, args: Vec<JExpr>) -> JExpr {
        JExpr::Call {
            target: None,
            type_args: Vec::new(),
            method,
            args,
        }
    }

    /// `Class.<type_args>method(args)`
    pub fn static_call(class: JType, type_args: Vec<JType>, method: Name, args: Vec<JExpr>) -> JExpr {
        JExpr::Call {
            target: Some(Box::new(JExpr::TypeRef(class))),
            type_args,
            method,
            args,
        }
    }

    pub fn cast(ty: JType, expr: JExpr) -> JExpr {
        JExpr::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn instance_of(expr: JExpr, ty: JType) -> JExpr {
        JExpr::InstanceOf {
            expr: Box::new(expr),
            ty,
        }
    }

    pub fn binary(op: JBinOp, lhs: JExpr, rhs: JExpr) -> JExpr {
        JExpr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn not(expr: JExpr) -> JExpr {
        JExpr::Not(Box::new(expr))
    }

    pub fn assign(target: JExpr, value: JExpr) -> JExpr {
        JExpr::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn index(array: JExpr, index: JExpr) -> JExpr {
        JExpr::Index {
            array: Box::new(array),
            index: Box::new(index),
        }
    }

    pub fn conditional(cond: JExpr, then: JExpr, otherwise: JExpr) -> JExpr {
        JExpr::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn let_in(stmts: Vec<JStmt>, value: JExpr) -> JExpr {
        JExpr::Let {
            stmts,
            value: Box::new(value),
        }
    }

    /// Binding strength of this expression's outermost operator.
    pub fn precedence(&self) -> u8 {
        match self {
            JExpr::Assign { .. } => 1,
            JExpr::Conditional { .. } => 2,
            JExpr::Binary { op, .. } => op.precedence(),
            JExpr::InstanceOf { .. } => 8,
            JExpr::Not(_) | JExpr::Cast { .. } => 13,
            JExpr::New { .. } | JExpr::NewArray { .. } => 14,
            JExpr::Select { .. } | JExpr::Call { .. } | JExpr::Index { .. } => 15,
            JExpr::Ident(_)
            | JExpr::Literal(_)
            | JExpr::TypeRef(_)
            | JExpr::ClassLiteral(_)
            | JExpr::Let { .. } => 16,
        }
    }
}
