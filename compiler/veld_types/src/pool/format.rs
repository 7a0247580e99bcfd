//! Human-readable rendering of types for diagnostics.
//!
//! Rendering never expands instances: an instantiated type prints as
//! `Name<args>`, so named cycles always produce finite text. Anonymous
//! interface cycles (mutually embedding interfaces) are cut by a seen
//! stack, the same descent the identity comparator guards.

use std::fmt::Write as _;

use veld_ir::StringInterner;

use crate::ty::{ChanDir, Type};
use crate::{Idx, TypePool};

impl TypePool {
    /// Render a type for a diagnostic message.
    pub fn display(&self, idx: Idx, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_type(&mut out, idx, interner, &mut Vec::new());
        out
    }

    fn write_type(
        &self,
        out: &mut String,
        idx: Idx,
        interner: &StringInterner,
        seen: &mut Vec<Idx>,
    ) {
        if idx.is_none() {
            out.push_str("<unresolved>");
            return;
        }
        match self.get(idx) {
            Type::Basic(b) => out.push_str(b.name),
            Type::Named(n) => {
                out.push_str(interner.lookup(n.name));
                if let Some(inst) = &n.inst {
                    self.write_targs(out, &inst.targs, interner, seen);
                } else {
                    self.write_tparams(out, &n.tparams, interner, seen);
                }
            }
            Type::Alias(a) => {
                out.push_str(interner.lookup(a.name));
                if a.targs.is_empty() {
                    self.write_tparams(out, &a.tparams, interner, seen);
                } else {
                    self.write_targs(out, &a.targs, interner, seen);
                }
            }
            Type::TypeParam(tp) => out.push_str(interner.lookup(tp.name)),
            Type::Signature(s) => {
                out.push_str("func");
                self.write_tparams(out, &s.tparams, interner, seen);
                out.push('(');
                for (i, &p) in s.params.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if s.variadic && i + 1 == s.params.len() {
                        out.push_str("...");
                    }
                    self.write_type(out, p, interner, seen);
                }
                out.push(')');
                match s.results.as_slice() {
                    [] => {}
                    [r] => {
                        out.push(' ');
                        self.write_type(out, *r, interner, seen);
                    }
                    results => {
                        out.push_str(" (");
                        for (i, &r) in results.iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            self.write_type(out, r, interner, seen);
                        }
                        out.push(')');
                    }
                }
            }
            Type::Interface(i) => {
                if idx == Idx::ANY {
                    out.push_str("any");
                    return;
                }
                if idx == Idx::COMPARABLE {
                    out.push_str("comparable");
                    return;
                }
                if seen.contains(&idx) {
                    out.push_str("interface{...}");
                    return;
                }
                seen.push(idx);
                out.push_str("interface{");
                let mut first = true;
                if i.comparable {
                    out.push_str("comparable");
                    first = false;
                }
                for &e in &i.embeddeds {
                    if !first {
                        out.push_str("; ");
                    }
                    first = false;
                    self.write_type(out, e, interner, seen);
                }
                for m in &i.methods {
                    if !first {
                        out.push_str("; ");
                    }
                    first = false;
                    out.push_str(interner.lookup(m.name));
                    // Drop the leading "func" of the signature.
                    let mut sig = String::new();
                    self.write_type(&mut sig, m.sig, interner, seen);
                    out.push_str(sig.strip_prefix("func").unwrap_or(&sig));
                }
                out.push('}');
                seen.pop();
            }
            Type::Struct(s) => {
                out.push_str("struct{");
                for (i, f) in s.fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !f.embedded {
                        out.push_str(interner.lookup(f.name));
                        out.push(' ');
                    }
                    self.write_type(out, f.ty, interner, seen);
                }
                out.push('}');
            }
            Type::Array(a) => {
                let _ = write!(out, "[{}]", a.len);
                self.write_type(out, a.elem, interner, seen);
            }
            Type::Slice(s) => {
                out.push_str("[]");
                self.write_type(out, s.elem, interner, seen);
            }
            Type::Pointer(p) => {
                out.push('*');
                self.write_type(out, p.elem, interner, seen);
            }
            Type::Map(m) => {
                out.push_str("map[");
                self.write_type(out, m.key, interner, seen);
                out.push(']');
                self.write_type(out, m.value, interner, seen);
            }
            Type::Chan(c) => {
                match c.dir {
                    ChanDir::SendRecv => out.push_str("chan "),
                    ChanDir::SendOnly => out.push_str("chan<- "),
                    ChanDir::RecvOnly => out.push_str("<-chan "),
                }
                self.write_type(out, c.elem, interner, seen);
            }
            Type::Union(u) => {
                for (i, t) in u.terms.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    if t.tilde {
                        out.push('~');
                    }
                    self.write_type(out, t.ty, interner, seen);
                }
            }
        }
    }

    fn write_targs(
        &self,
        out: &mut String,
        targs: &[Idx],
        interner: &StringInterner,
        seen: &mut Vec<Idx>,
    ) {
        if targs.is_empty() {
            return;
        }
        out.push('<');
        for (i, &t) in targs.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, t, interner, seen);
        }
        out.push('>');
    }

    fn write_tparams(
        &self,
        out: &mut String,
        tparams: &[Idx],
        interner: &StringInterner,
        seen: &mut Vec<Idx>,
    ) {
        if tparams.is_empty() {
            return;
        }
        out.push('<');
        for (i, &tp) in tparams.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match self.get(tp) {
                Type::TypeParam(p) => out.push_str(interner.lookup(p.name)),
                _ => self.write_type(out, tp, interner, seen),
            }
        }
        out.push('>');
    }
}
