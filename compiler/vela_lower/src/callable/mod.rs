//! Callable lowering.
//!
//! Function values become instances of an anonymous subclass of the
//! runtime's abstract callable. The runtime dispatches on arity: there is
//! one `call` overload per arity up to [`MAX_FIXED_ARITY`], and a variadic
//! overload beyond it. Arguments arrive erased to the root object and are
//! cast and unboxed back to each parameter's declared form.
//!
//! Functions with several parameter lists are curried: the method takes
//! the first list and returns a callable taking the next one.

use tracing::debug;
use vela_target::{
    JBlock, JClassBody, JExpr, JMethod, JModifiers, JParam, JStmt, JType, JVarDecl, Literal,
    Primitive,
};
use vela_types::tree::FunctionDef;
use vela_types::{DeclId, Idx, Parameter};

use crate::abi::{CALL, CALL_ARG_PREFIX, MAX_FIXED_ARITY, PLATFORM_OBJECT};
use crate::boxing::BoxingStrategy;
use crate::lowerer::ReturnCtx;
use crate::{LowerError, Lowerer, TypeContext};

impl Lowerer<'_> {
    /// `new AbstractCallable<R>("<type>") { public R call(...) { body } }`
    ///
    /// `callable_ty` is the source type of the function value, `arity` the
    /// number of parameters `call` receives.
    pub fn build_callable(&mut self, callable_ty: Idx, arity: usize, body: Vec<JStmt>) -> JExpr {
        let model = self.model;
        let ret = model.callable_return(callable_ty).unwrap_or(Idx::ERROR);
        let result = self.lower(ret, TypeContext::EXTENDS);
        let class = self.lower(callable_ty, TypeContext::EXTENDS | TypeContext::CLASS_NEW);
        let type_name = model.intern(&model.display(callable_ty));

        let object = self.class(PLATFORM_OBJECT);
        let params = if arity <= MAX_FIXED_ARITY {
            (0..arity)
                .map(|i| JParam {
                    is_final: true,
                    varargs: false,
                    name: self.call_arg(i),
                    ty: object.clone(),
                })
                .collect()
        } else {
            vec![JParam {
                is_final: true,
                varargs: true,
                name: self.call_arg(0),
                ty: JType::array(object),
            }]
        };

        let call = JMethod {
            modifiers: JModifiers::PUBLIC,
            type_params: Vec::new(),
            result,
            name: self.name(CALL),
            params,
            body: Some(JBlock::new(body)),
        };
        JExpr::New {
            class,
            args: vec![JExpr::Literal(Literal::String(type_name))],
            body: Some(JClassBody {
                methods: vec![call],
            }),
        }
    }

    /// The `index`-th argument of `call`, cast and converted to the
    /// parameter's declared form.
    pub fn unpick_parameter(&mut self, param: &Parameter, index: usize, arity: usize) -> JExpr {
        let raw = if arity <= MAX_FIXED_ARITY {
            JExpr::ident(self.call_arg(index))
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                reason = "parameter lists never approach i32::MAX entries"
            )]
            let index = index as i32;
            JExpr::index(JExpr::ident(self.call_arg(0)), JExpr::int(index))
        };
        let ty = self.lower(param.ty, TypeContext::NO_PRIMITIVES);
        let cast = JExpr::cast(ty, raw);
        let strategy = BoxingStrategy::from_flag(param.unboxed);
        self.box_unbox_if_necessary(cast, true, param.ty, strategy)
    }

    /// A callable layer for one parameter list of a curried function: the
    /// list's parameters are unpacked into locals ahead of `body`.
    pub fn mpl_callable(
        &mut self,
        callable_ty: Idx,
        params: &[Parameter],
        mut body: Vec<JStmt>,
    ) -> JExpr {
        let arity = params.len();
        let mut prologue = Vec::with_capacity(arity + body.len());
        for (i, param) in params.iter().enumerate() {
            let init = self.unpick_parameter(param, i, arity);
            let ty = self.parameter_type(param);
            prologue.push(JStmt::VarDef(JVarDecl::final_var(param.name, ty, init)));
        }
        prologue.append(&mut body);
        self.build_callable(callable_ty, arity, prologue)
    }

    /// A function used as a value: a callable forwarding its arguments to
    /// the function.
    pub fn function_ref(&mut self, function: DeclId) -> Result<JExpr, LowerError> {
        let model = self.model;
        let decl = model.decl(function);
        let Some((first, rest)) = decl.param_lists.split_first() else {
            return Err(LowerError::NoParameterLists {
                name: model.qualified_name(function),
            });
        };
        let ret = self.curried_type(decl.ty.unwrap_or(Idx::ERROR), rest);
        let param_types: Vec<Idx> = first.iter().map(|p| p.ty).collect();
        let callable_ty = model.callable_type(ret, &param_types);

        let arity = first.len();
        let args = first
            .iter()
            .enumerate()
            .map(|(i, p)| self.unpick_parameter(p, i, arity))
            .collect();
        let call = JExpr::call_local(decl.name, args);
        let body = if ret == model.builtins().void_ty {
            vec![JStmt::Exec(call), JStmt::Return(Some(JExpr::null()))]
        } else {
            let unboxed = self.can_unbox(ret);
            let value = self.box_unbox_if_necessary(call, !unboxed, ret, BoxingStrategy::Boxed);
            vec![JStmt::Return(Some(value))]
        };
        Ok(self.build_callable(callable_ty, arity, body))
    }

    /// Lower a function definition to a method.
    ///
    /// `result` is the declared result type to emit, normally the one the
    /// refinement resolver settles on. A curried function's method takes its
    /// first parameter list and returns the callables for the rest.
    pub fn lower_function(&mut self, def: &FunctionDef, result: Idx) -> Result<JMethod, LowerError> {
        let model = self.model;
        let decl = model.decl(def.decl);
        let Some((first, rest)) = decl.param_lists.split_first() else {
            return Err(LowerError::NoParameterLists {
                name: model.qualified_name(def.decl),
            });
        };
        debug!(
            function = %model.qualified_name(def.decl),
            lists = decl.param_lists.len(),
            "lowering function"
        );
        self.set_span(def.body.span);

        let type_params = decl
            .type_params
            .iter()
            .map(|&p| self.lower_type_parameter(p))
            .collect();
        let params = first
            .iter()
            .map(|p| JParam {
                is_final: true,
                varargs: false,
                name: p.name,
                ty: self.parameter_type(p),
            })
            .collect();

        let void = model.builtins().void_ty;
        let (result_ty, body) = if rest.is_empty() {
            let strategy = self.value_repr(result);
            let body = self.with_returns(
                ReturnCtx {
                    ty: result,
                    strategy,
                    in_callable: false,
                },
                |this| this.lower_block(&def.body),
            )?;
            let result_ty = if result == void {
                JType::Primitive(Primitive::Void)
            } else {
                self.lower(result, TypeContext::empty())
            };
            (result_ty, body)
        } else {
            let body = self.with_returns(
                ReturnCtx {
                    ty: result,
                    strategy: BoxingStrategy::Boxed,
                    in_callable: true,
                },
                |this| this.lower_block(&def.body),
            )?;
            let falls_through = body.completes_normally();
            let mut stmts = body.stmts;
            if result == void && falls_through {
                stmts.push(JStmt::Return(Some(JExpr::null())));
            }
            // Innermost list first: each layer returns the next one.
            for (i, list) in rest.iter().enumerate().rev() {
                let ret = self.curried_type(result, &rest[i + 1..]);
                let param_types: Vec<Idx> = list.iter().map(|p| p.ty).collect();
                let callable_ty = model.callable_type(ret, &param_types);
                let layer = self.mpl_callable(callable_ty, list, stmts);
                stmts = vec![JStmt::Return(Some(layer))];
            }
            let method_ret = self.curried_type(result, rest);
            let result_ty = self.lower(method_ret, TypeContext::empty());
            (result_ty, JBlock::new(stmts))
        };

        let modifiers = if decl.is_shared() {
            JModifiers::PUBLIC
        } else {
            JModifiers::empty()
        };
        Ok(JMethod {
            modifiers,
            type_params,
            result: result_ty,
            name: decl.name,
            params,
            body: Some(body),
        })
    }

    /// `Callable<...Callable<ret, last>..., next>` for the parameter lists
    /// after the one being lowered.
    fn curried_type(&self, ret: Idx, lists: &[Vec<Parameter>]) -> Idx {
        lists.iter().rev().fold(ret, |ret, list| {
            let types: Vec<Idx> = list.iter().map(|p| p.ty).collect();
            self.model.callable_type(ret, &types)
        })
    }

    /// The target type of a parameter local, raw or boxed per its
    /// declared form.
    fn parameter_type(&mut self, param: &Parameter) -> JType {
        match param.unboxed {
            Some(true) => self.lower(param.ty, TypeContext::empty()),
            Some(false) | None => self.lower(param.ty, TypeContext::NO_PRIMITIVES),
        }
    }

    fn call_arg(&self, index: usize) -> vela_ir::Name {
        self.name(&format!("{CALL_ARG_PREFIX}{index}"))
    }

    /// Run `f` with `returns` as the active return context.
    pub(crate) fn with_returns<R>(
        &mut self,
        returns: ReturnCtx,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let prev = self.ctx.returns.replace(returns);
        let out = f(self);
        self.ctx.returns = prev;
        out
    }
}
