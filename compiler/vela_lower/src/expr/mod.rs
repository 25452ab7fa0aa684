//! Expression lowering.
//!
//! Only what statement and callable lowering need: identifiers (through
//! the active substitutions), literals, attribute reads, invocations,
//! operators, sequence literals and function references. Every expression
//! is first lowered to its natural form and then converted to the form the
//! position asks for.

use vela_target::{JBinOp, JExpr, Literal};
use vela_types::tree::{BinaryOp, Expr, ExprKind};
use vela_types::{DeclKind, Idx, Repr};

use crate::abi::EQUALS;
use crate::boxing::BoxingStrategy;
use crate::naming::getter_name;
use crate::stack::ensure_sufficient_stack;
use crate::{LowerError, LowerProblem, Lowerer};

/// A lowered expression and whether it is in raw form.
struct Natural {
    expr: JExpr,
    unboxed: bool,
}

impl Natural {
    fn boxed(expr: JExpr) -> Self {
        Natural {
            expr,
            unboxed: false,
        }
    }

    fn raw(expr: JExpr) -> Self {
        Natural {
            expr,
            unboxed: true,
        }
    }
}

impl Lowerer<'_> {
    /// Lower `expr` in the form `strategy` asks for. `Indifferent` keeps the
    /// form the typed tree records for the expression.
    pub fn lower_expr(&mut self, expr: &Expr, strategy: BoxingStrategy) -> Result<JExpr, LowerError> {
        let natural = ensure_sufficient_stack(|| self.lower_natural(expr))?;
        let strategy = match strategy {
            BoxingStrategy::Indifferent => BoxingStrategy::of_form(expr.unboxed),
            other => other,
        };
        Ok(self.box_unbox_if_necessary(natural.expr, !natural.unboxed, expr.ty, strategy))
    }

    fn lower_natural(&mut self, expr: &Expr) -> Result<Natural, LowerError> {
        let model = self.model;
        let natural = match &expr.kind {
            ExprKind::Ident(name) => Natural {
                expr: JExpr::ident(self.ctx.names.resolve(*name)),
                unboxed: expr.unboxed,
            },
            ExprKind::Integer(value) => {
                let literal = match i32::try_from(*value) {
                    Ok(small) if model.repr(expr.ty) == Some(Repr::Int) => Literal::Int(small),
                    _ => Literal::Long(*value),
                };
                Natural::raw(JExpr::Literal(literal))
            }
            ExprKind::Float(bits) => Natural::raw(JExpr::Literal(Literal::Double(*bits))),
            ExprKind::String(text) => Natural::raw(JExpr::Literal(Literal::String(*text))),
            ExprKind::Character(c) => Natural::raw(JExpr::Literal(Literal::Char(*c))),
            ExprKind::Boolean(value) => Natural::raw(JExpr::bool(*value)),
            ExprKind::Null => Natural::boxed(JExpr::null()),
            ExprKind::Member { receiver, member } => {
                let target = self.lower_expr(receiver, BoxingStrategy::Boxed)?;
                let getter = getter_name(model, *member);
                Natural::boxed(JExpr::call(target, getter, Vec::new()))
            }
            ExprKind::Call {
                receiver,
                function,
                args,
            } => {
                let decl = model.decl(*function);
                let params = decl.param_lists.first().map_or(&[][..], Vec::as_slice);
                let mut lowered = Vec::with_capacity(args.len());
                for (i, arg) in args.iter().enumerate() {
                    let strategy = match params.get(i).and_then(|p| p.unboxed) {
                        Some(true) => BoxingStrategy::Unboxed,
                        Some(false) | None => BoxingStrategy::Boxed,
                    };
                    lowered.push(self.lower_expr(arg, strategy)?);
                }
                let call = match receiver {
                    Some(receiver) => {
                        let target = self.lower_expr(receiver, BoxingStrategy::Boxed)?;
                        JExpr::call(target, decl.name, lowered)
                    }
                    None => JExpr::call_local(decl.name, lowered),
                };
                Natural {
                    expr: call,
                    unboxed: self.can_unbox(expr.ty),
                }
            }
            ExprKind::Binary { op, lhs, rhs } => Natural::raw(self.lower_binary(*op, lhs, rhs)?),
            ExprKind::Not(operand) => {
                Natural::raw(JExpr::not(self.lower_expr(operand, BoxingStrategy::Unboxed)?))
            }
            ExprKind::Sequence(elems) => {
                if elems.is_empty() {
                    Natural::boxed(self.make_empty())
                } else {
                    let element = model.iterated_type(expr.ty).unwrap_or(Idx::ERROR);
                    let mut lowered = Vec::with_capacity(elems.len());
                    for elem in elems {
                        lowered.push(self.lower_expr(elem, BoxingStrategy::Boxed)?);
                    }
                    let types: Vec<Idx> = elems.iter().map(|e| e.ty).collect();
                    Natural::boxed(self.make_sequence(
                        lowered,
                        &types,
                        element,
                        crate::TypeContext::CLASS_NEW,
                    ))
                }
            }
            ExprKind::FunctionRef(function) => {
                if model.decl(*function).kind == DeclKind::Method {
                    Natural::boxed(self.function_ref(*function)?)
                } else {
                    self.problem(LowerProblem::UnsupportedConstruct {
                        what: "a reference to a declaration that is not a function",
                        span: expr.span,
                    });
                    Natural::boxed(JExpr::null())
                }
            }
        };
        Ok(natural)
    }

    fn lower_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<JExpr, LowerError> {
        let op = match op {
            BinaryOp::Add => JBinOp::Add,
            BinaryOp::Sub => JBinOp::Sub,
            BinaryOp::Mul => JBinOp::Mul,
            BinaryOp::Lt => JBinOp::Lt,
            BinaryOp::Gt => JBinOp::Gt,
            BinaryOp::And => JBinOp::And,
            BinaryOp::Or => JBinOp::Or,
            BinaryOp::Eq | BinaryOp::NotEq => {
                let equal = self.lower_equals(lhs, rhs)?;
                return Ok(if op == BinaryOp::Eq {
                    equal
                } else {
                    JExpr::not(equal)
                });
            }
        };
        let lhs = self.lower_expr(lhs, BoxingStrategy::Unboxed)?;
        let rhs = self.lower_expr(rhs, BoxingStrategy::Unboxed)?;
        Ok(JExpr::binary(op, lhs, rhs))
    }

    /// Value equality: `==` on raw numbers, characters and booleans,
    /// `equals` on everything else.
    fn lower_equals(&mut self, lhs: &Expr, rhs: &Expr) -> Result<JExpr, LowerError> {
        let primitive = self.is_basic(lhs.ty) && !self.is_string(lhs.ty);
        if primitive {
            let lhs = self.lower_expr(lhs, BoxingStrategy::Unboxed)?;
            let rhs = self.lower_expr(rhs, BoxingStrategy::Unboxed)?;
            return Ok(JExpr::binary(JBinOp::Eq, lhs, rhs));
        }
        let target = self.lower_expr(lhs, BoxingStrategy::Boxed)?;
        let arg = self.lower_expr(rhs, BoxingStrategy::Boxed)?;
        Ok(JExpr::call(target, self.name(EQUALS), vec![arg]))
    }
}
