//! Target statements, methods and anonymous class bodies.

use bitflags::bitflags;
use vela_ir::Name;

use crate::{JExpr, JType, Literal};

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct JModifiers: u8 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const STATIC = 1 << 2;
        const FINAL = 1 << 3;
        const ABSTRACT = 1 << 4;
    }
}

/// `[final] T name [= init]`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct JVarDecl {
    pub is_final: bool,
    pub name: Name,
    pub ty: JType,
    pub init: Option<JExpr>,
}

impl JVarDecl {
    pub fn new(name: Name, ty: JType, init: JExpr) -> Self {
        JVarDecl {
            is_final: false,
            name,
            ty,
            init: Some(init),
        }
    }

    pub fn final_var(name: Name, ty: JType, init: JExpr) -> Self {
        JVarDecl {
            is_final: true,
            name,
            ty,
            init: Some(init),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct JBlock {
    pub stmts: Vec<JStmt>,
}

impl JBlock {
    pub fn new(stmts: Vec<JStmt>) -> Self {
        JBlock { stmts }
    }

    /// Whether control can fall off the end of the block.
    pub fn completes_normally(&self) -> bool {
        self.stmts.iter().all(JStmt::completes_normally)
    }

    /// Whether a `break` in this block leaves the loop directly around it.
    fn breaks_out(&self) -> bool {
        self.stmts.iter().any(|stmt| match stmt {
            JStmt::Break => true,
            JStmt::If { then, otherwise, .. } => {
                then.breaks_out() || otherwise.as_ref().is_some_and(JBlock::breaks_out)
            }
            JStmt::Block(block) => block.breaks_out(),
            _ => false,
        })
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum JStmt {
    VarDef(JVarDecl),
    Exec(JExpr),
    If {
        cond: JExpr,
        then: JBlock,
        otherwise: Option<JBlock>,
    },
    While {
        cond: JExpr,
        body: JBlock,
    },
    For {
        init: Vec<JVarDecl>,
        cond: JExpr,
        step: Vec<JExpr>,
        body: JBlock,
    },
    Break,
    Return(Option<JExpr>),
    Block(JBlock),
}

impl JStmt {
    /// Reachability as the target compiler judges it: a statement after
    /// one that cannot complete normally is rejected.
    pub fn completes_normally(&self) -> bool {
        match self {
            JStmt::VarDef(_) | JStmt::Exec(_) => true,
            JStmt::Break | JStmt::Return(_) => false,
            JStmt::If { then, otherwise, .. } => match otherwise {
                Some(otherwise) => then.completes_normally() || otherwise.completes_normally(),
                None => true,
            },
            JStmt::While { cond, body } | JStmt::For { cond, body, .. } => {
                !matches!(cond, JExpr::Literal(Literal::Bool(true))) || body.breaks_out()
            }
            JStmt::Block(block) => block.completes_normally(),
        }
    }
}

/// A formal parameter of a target method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct JParam {
    pub is_final: bool,
    pub varargs: bool,
    pub name: Name,
    pub ty: JType,
}

/// `<name extends bound1 & bound2>`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct JTypeParam {
    pub name: Name,
    pub bounds: Vec<JType>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct JMethod {
    pub modifiers: JModifiers,
    pub type_params: Vec<JTypeParam>,
    pub result: JType,
    pub name: Name,
    pub params: Vec<JParam>,
    /// `None` for abstract methods.
    pub body: Option<JBlock>,
}

/// Body of an anonymous class.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct JClassBody {
    pub methods: Vec<JMethod>,
}
