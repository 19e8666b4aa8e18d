//! Type rendering for diagnostics.
//!
//! Produces the human-readable form of a type term. Links are followed,
//! so a bound variable renders as its target. This is the only place the
//! type system turns terms into text; the diagnostic queue stores the
//! result as notes.

use tern_ir::StringInterner;

use crate::{Idx, Pool, Tag, VarState};

impl Pool {
    /// Render a type term for diagnostics.
    pub fn display(&self, idx: Idx, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.display_into(idx, interner, &mut out);
        out
    }

    fn display_into(&self, idx: Idx, interner: &StringInterner, out: &mut String) {
        match self.tag(idx) {
            Tag::Bool => out.push_str("bool"),
            Tag::Int => out.push_str("int"),
            Tag::Float => out.push_str("float"),
            Tag::Str => out.push_str("str"),
            Tag::Unit => out.push_str("unit"),
            Tag::Optional => {
                self.display_into(self.held(idx), interner, out);
                out.push('?');
            }
            Tag::Union => {
                out.push_str("union[");
                self.display_into(self.held(idx), interner, out);
                out.push(']');
            }
            Tag::Class => {
                let name = self.class_name(idx);
                match interner.resolve(name) {
                    Some(text) => out.push_str(&text),
                    None => out.push_str("<class>"),
                }
                let args = self.class_args(idx);
                if !args.is_empty() {
                    out.push('[');
                    for (i, &arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.display_into(arg, interner, out);
                    }
                    out.push(']');
                }
            }
            Tag::Function => {
                out.push('(');
                for (i, &param) in self.function_params(idx).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.display_into(param, interner, out);
                }
                out.push_str(") -> ");
                self.display_into(self.function_return(idx), interner, out);
            }
            Tag::Var => {
                let var_id = self.data(idx);
                match self.var_state(var_id) {
                    VarState::Link { target } => self.display_into(*target, interner, out),
                    VarState::Unbound { name: Some(name) } => match interner.resolve(*name) {
                        Some(text) => out.push_str(&text),
                        None => out.push_str(&format!("${var_id}")),
                    },
                    VarState::Unbound { name: None } => {
                        out.push_str(&format!("${var_id}"));
                    }
                }
            }
            Tag::BoundVar => {
                out.push_str(&format!("#{}", self.data(idx)));
            }
            Tag::Scheme => {
                out.push_str(&format!("scheme[{}] ", self.scheme_param_count(idx)));
                self.display_into(self.scheme_body(idx), interner, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::Pool;
    use tern_ir::StringInterner;

    #[test]
    fn renders_nested_types() {
        let interner = StringInterner::new();
        let mut pool = Pool::new();

        let opt_int = pool.optional(crate::Idx::INT);
        assert_eq!(pool.display(opt_int, &interner), "int?");

        let name = interner.intern("Pair");
        let pair = pool.class(name, &[crate::Idx::INT, crate::Idx::STR]);
        assert_eq!(pool.display(pair, &interner), "Pair[int, str]");

        let func = pool.function(&[crate::Idx::BOOL], pair);
        assert_eq!(pool.display(func, &interner), "(bool) -> Pair[int, str]");
    }

    #[test]
    fn bound_variable_renders_as_target() {
        let interner = StringInterner::new();
        let mut pool = Pool::new();

        let var = pool.fresh_var();
        let var_id = pool.data(var);
        *pool.var_state_mut(var_id) = crate::VarState::Link {
            target: crate::Idx::FLOAT,
        };
        assert_eq!(pool.display(var, &interner), "float");
    }
}
