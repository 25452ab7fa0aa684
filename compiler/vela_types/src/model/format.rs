//! Source-level rendering of types, for diagnostics and runtime type names.

use crate::{Idx, Model, TypeKind};

impl Model {
    /// Render a type the way a user would write it.
    pub fn display(&self, ty: Idx) -> String {
        let mut buf = String::new();
        self.display_into(ty, &mut buf);
        buf
    }

    fn display_into(&self, ty: Idx, buf: &mut String) {
        match self.kind(ty) {
            TypeKind::Nominal(nominal) => {
                if let Some(outer) = nominal.qualifying {
                    self.display_into(outer, buf);
                    buf.push('.');
                }
                buf.push_str(self.str(self.decl(nominal.decl).name));
                if !nominal.args.is_empty() {
                    buf.push('<');
                    self.display_list(&nominal.args, ", ", buf);
                    buf.push('>');
                }
            }
            TypeKind::Union(cases) => {
                let nothing = self.builtins().nothing;
                match cases.as_slice() {
                    [a, b] if self.is_decl(*a, nothing) => {
                        self.display_into(*b, buf);
                        buf.push('?');
                    }
                    [a, b] if self.is_decl(*b, nothing) => {
                        self.display_into(*a, buf);
                        buf.push('?');
                    }
                    _ => self.display_list(&cases, "|", buf),
                }
            }
            TypeKind::Intersection(bounds) => self.display_list(&bounds, "&", buf),
            TypeKind::Param(param) => buf.push_str(self.str(self.type_param(param).name)),
            TypeKind::Bottom => buf.push_str("Bottom"),
            TypeKind::Error => buf.push_str("<error>"),
        }
    }

    fn display_list(&self, types: &[Idx], sep: &str, buf: &mut String) {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                buf.push_str(sep);
            }
            self.display_into(ty, buf);
        }
    }
}
