//! Generic type instantiation.
//!
//! [`instantiate`] is the public entry: given a generic named type, alias,
//! or function signature and a list of type arguments, it produces the
//! canonical instance through a [`Context`]. Named instances are created
//! lazily; their underlying type is substituted on first demand. Aliases
//! and signatures substitute eagerly.
//!
//! With `validate` set, argument counts and constraints are checked and
//! violations come back as [`InstantiationError`]. Without it the caller
//! vouches for well-formedness, and a count mismatch is a bug that panics
//! at the latest when the instance expands.

use veld_ir::StringInterner;

use crate::context::Context;
use crate::error::InstantiationError;
use crate::subst::{subst, SubstMap};
use crate::ty::{AliasData, Expansion, NamedData, NamedInstance, Type};
use crate::typeset::implements;
use crate::{Idx, TypePool};

/// Instantiate `orig` with `targs`.
///
/// Panics if `orig` is not a named type, alias, or signature, or if
/// `targs` is empty.
#[tracing::instrument(level = "debug", skip(pool, interner, ctxt))]
pub fn instantiate(
    pool: &mut TypePool,
    interner: &StringInterner,
    ctxt: &Context,
    orig: Idx,
    targs: Vec<Idx>,
    validate: bool,
) -> Result<Idx, InstantiationError> {
    assert!(!targs.is_empty(), "instantiate called with no type arguments");

    let ty = pool.get(orig);
    let Some(tparams) = ty.tparams() else {
        panic!("cannot instantiate a {}", ty.kind_name())
    };
    let tparams = tparams.to_vec();

    if validate && targs.len() != tparams.len() {
        return Err(InstantiationError::ArgumentCountMismatch {
            name: type_name(pool, orig),
            got: targs.len(),
            want: tparams.len(),
        });
    }

    // A non-generic type instantiates to itself.
    if tparams.is_empty() {
        return Ok(orig);
    }

    // Constraints are checked before the instance is built so a rejected
    // instantiation never ends up recorded in the context.
    if validate {
        if let Err((index, cause)) = verify(pool, interner, &tparams, &targs, ctxt) {
            return Err(InstantiationError::ConstraintViolation { index, cause });
        }
    }

    Ok(instance(pool, orig, targs, None, ctxt))
}

fn type_name(pool: &TypePool, t: Idx) -> Option<veld_ir::Name> {
    match pool.get(t) {
        Type::Named(n) => Some(n.name),
        Type::Alias(a) => Some(a.name),
        _ => None,
    }
}

/// Check each type argument against its parameter's constraint. The
/// constraints are substituted with the full argument list first, so
/// parameters may refer to their siblings.
fn verify(
    pool: &mut TypePool,
    interner: &StringInterner,
    tparams: &[Idx],
    targs: &[Idx],
    ctxt: &Context,
) -> Result<(), (usize, String)> {
    let smap = SubstMap::new(pool, tparams, targs);
    for (i, (&tpar, &targ)) in tparams.iter().zip(targs).enumerate() {
        let Type::TypeParam(p) = pool.get(tpar) else {
            unreachable!("tparams hold only type parameters")
        };
        let bound = p.bound;
        let bound = subst(pool, bound, &smap, None, ctxt);
        let mut cause = String::new();
        if !implements(pool, interner, targ, bound, true, &mut cause) {
            if cause.is_empty() {
                cause = format!(
                    "{} does not satisfy {}",
                    pool.display(targ, interner),
                    pool.display(bound, interner),
                );
            }
            return Err((i, cause));
        }
    }
    Ok(())
}

/// Produce the canonical instance of `orig` applied to `targs`, creating
/// it if no context knows it yet.
///
/// `expanding` is the Named instance whose expansion triggered this call,
/// if any; its context takes priority, so a recursive reference resolves
/// to the instance already under construction.
pub(crate) fn instance(
    pool: &mut TypePool,
    orig: Idx,
    targs: Vec<Idx>,
    expanding: Option<Idx>,
    ctxt: &Context,
) -> Idx {
    let mut ctxts: Vec<Context> = Vec::with_capacity(2);
    if let Some(exp) = expanding {
        let Type::Named(n) = pool.get(exp) else {
            unreachable!("only named instances expand")
        };
        let inst = n.inst.as_ref().unwrap_or_else(|| {
            unreachable!("expanding type is always an instance")
        });
        ctxts.push(inst.ctxt.clone());
    }
    if !ctxts.iter().any(|c| c.same(ctxt)) {
        ctxts.push(ctxt.clone());
    }

    let hash = Context::instance_hash(pool, orig, &targs);

    // Record a result in every context, highest priority last so its
    // entry (oldest first in each bucket) wins future lookups.
    let update_all = |pool: &TypePool, ctxts: &[Context], mut res: Idx| {
        for c in ctxts.iter().rev() {
            res = c.update(pool, hash, orig, &targs, res);
        }
        res
    };

    for c in &ctxts {
        if let Some(found) = c.lookup(pool, hash, orig, &targs) {
            return update_all(pool, &ctxts, found);
        }
    }

    let created = match pool.get(orig) {
        // Counts are not checked here; an unvalidated mismatch surfaces
        // when the instance expands.
        Type::Named(n) => {
            let data = NamedData {
                decl: n.decl,
                name: n.name,
                tparams: Vec::new(),
                underlying: Idx::NONE,
                methods: Vec::new(),
                inst: Some(NamedInstance {
                    orig,
                    targs: targs.clone(),
                    expansion: Expansion::Unexpanded,
                    ctxt: ctxts[0].clone(),
                }),
            };
            pool.push(Type::Named(data))
        }

        Type::Alias(_) => alias_instance(pool, orig, &targs, expanding, ctxt),

        Type::Signature(s) => {
            assert!(
                expanding.is_none(),
                "a signature cannot be the expansion origin"
            );
            assert_eq!(
                targs.len(),
                s.tparams.len(),
                "instantiating signature: got {} type arguments, want {}",
                targs.len(),
                s.tparams.len(),
            );
            signature_instance(pool, orig, &targs, ctxt)
        }

        t => panic!("cannot instantiate a {}", t.kind_name()),
    };

    update_all(pool, &ctxts, created)
}

/// Eagerly substituted alias instance: the right-hand side is rewritten
/// with the arguments and the result keeps the alias shape.
fn alias_instance(
    pool: &mut TypePool,
    orig: Idx,
    targs: &[Idx],
    expanding: Option<Idx>,
    ctxt: &Context,
) -> Idx {
    let Type::Alias(a) = pool.get(orig).clone() else {
        unreachable!()
    };
    assert_eq!(
        targs.len(),
        a.tparams.len(),
        "instantiating alias: got {} type arguments, want {}",
        targs.len(),
        a.tparams.len(),
    );
    let smap = SubstMap::new(pool, &a.tparams, targs);
    let aliased = subst(pool, a.aliased, &smap, expanding, ctxt);
    pool.push(Type::Alias(AliasData {
        decl: a.decl,
        name: a.name,
        tparams: Vec::new(),
        targs: targs.to_vec(),
        aliased,
        orig: Some(orig),
    }))
}

/// Eagerly substituted signature instance. The instance is no longer
/// generic; its type parameter list is cleared even when substitution
/// changed nothing.
fn signature_instance(pool: &mut TypePool, orig: Idx, targs: &[Idx], ctxt: &Context) -> Idx {
    let Type::Signature(s) = pool.get(orig).clone() else {
        unreachable!()
    };
    let smap = SubstMap::new(pool, &s.tparams, targs);
    let params: Vec<Idx> = s
        .params
        .iter()
        .map(|&p| subst(pool, p, &smap, None, ctxt))
        .collect();
    let results: Vec<Idx> = s
        .results
        .iter()
        .map(|&r| subst(pool, r, &smap, None, ctxt))
        .collect();
    // Always a fresh node: the original stays generic, the instance must
    // not.
    pool.signature(Vec::new(), params, results, s.variadic)
}
