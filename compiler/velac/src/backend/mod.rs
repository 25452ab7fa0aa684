//! Per-compilation lowering state.

use tracing::{debug, warn};
use vela_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use vela_lower::{ConfigError, LowerConfig, LowerError, Lowerer, Naming};
use vela_target::JMethod;
use vela_types::tree::FunctionDef;
use vela_types::{Idx, Model};

/// Lowers declarations of one model and collects their diagnostics.
///
/// Declaration names are cached across declarations. Each declaration gets
/// a fresh [`Lowerer`], so temporaries and narrowed names never leak from
/// one body into the next.
pub struct Backend<'m> {
    model: &'m Model,
    naming: Naming,
    config: LowerConfig,
    queue: DiagnosticQueue,
}

impl<'m> Backend<'m> {
    /// A backend for `model`, or an `E9002` diagnostic when `config` asks
    /// for something this backend cannot emit.
    pub fn new(model: &'m Model, config: LowerConfig) -> Result<Self, Diagnostic> {
        config.validate().map_err(|err| config_diagnostic(&err))?;
        let queue = DiagnosticQueue::with_config(config.diagnostics.clone());
        Ok(Backend {
            model,
            naming: Naming::new(),
            config,
            queue,
        })
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Lower one function definition.
    ///
    /// Returns `None` when the tree is malformed; the defect is queued as
    /// an `E9001` diagnostic. Recoverable problems are queued either way.
    pub fn lower_function(&mut self, def: &FunctionDef) -> Option<JMethod> {
        let model = self.model;
        let mut lowerer = Lowerer::new(model, &self.naming, &self.config);
        let result = result_type(&lowerer, def);

        let lowered = lowerer.lower_function(def, result);
        let problems = lowerer.take_problems();
        if !problems.is_empty() {
            debug!(
                function = %model.qualified_name(def.decl),
                count = problems.len(),
                "lowering problems"
            );
        }
        for problem in problems {
            self.queue.add(problem.into_diagnostic(model));
        }

        match lowered {
            Ok(method) => Some(method),
            Err(err) => {
                warn!(function = %model.qualified_name(def.decl), %err, "malformed declaration");
                self.queue.emit_error(internal_diagnostic(&err, def));
                None
            }
        }
    }

    /// Lower every definition, skipping the malformed ones.
    pub fn lower_functions<'d>(
        &mut self,
        defs: impl IntoIterator<Item = &'d FunctionDef>,
    ) -> Vec<JMethod> {
        defs.into_iter()
            .filter_map(|def| self.lower_function(def))
            .collect()
    }

    /// Proof of errors, if any were queued so far.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        self.queue.has_errors()
    }

    /// The queued diagnostics, sorted by position.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.queue.flush()
    }
}

/// The result type the method header declares: the declaration's own, or
/// an inherited one when its own would widen what an ancestor promised.
fn result_type(lowerer: &Lowerer<'_>, def: &FunctionDef) -> Idx {
    let model = lowerer.model();
    let reference = lowerer.typed_reference(def.decl);
    let chosen = lowerer.non_widening_reference(reference);
    let result = model.ref_type(chosen);
    if chosen != reference {
        debug!(
            function = %model.qualified_name(def.decl),
            inherited = %model.qualified_name(chosen.decl),
            result = %model.display(result),
            "result type taken from refined declaration"
        );
    }
    if cfg!(debug_assertions) {
        if let Some(refined) = lowerer.refined_reference(reference) {
            debug_assert!(
                !lowerer.is_widening(result, model.ref_type(refined)),
                "result type of `{}` widens its refined declaration",
                model.qualified_name(def.decl)
            );
        }
    }
    result
}

fn internal_diagnostic(err: &LowerError, def: &FunctionDef) -> Diagnostic {
    let diag = Diagnostic::error(ErrorCode::E9001).with_message(err.to_string());
    let span = match err {
        LowerError::MissingSubjectVariable { span } => *span,
        LowerError::NoParameterLists { .. } => def.body.span,
    };
    if span.is_dummy() {
        diag
    } else {
        diag.with_label(span, "cannot be lowered")
    }
}

fn config_diagnostic(err: &ConfigError) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002).with_message(err.to_string())
}
