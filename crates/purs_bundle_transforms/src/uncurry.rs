//! Uncurries saturated curried applications: a member whose declaration is
//! a chain of nested single-argument functions gets flattened to one
//! multi-parameter function, and call sites that apply it fully in one go
//! are flattened to match — the shape of a compiler backend's uncurry pass
//! for a curried-by-default source language.

use purs_bundle_ast::{assign, call, expr_stmt, match_qualified_member, member_ident, var_decl_stmt};
use purs_bundle_common::{Key, Module, ModuleElement, ModuleIdentifier};
use rustc_hash::{FxHashMap, FxHashSet};
use swc_core::ecma::ast::{BlockStmt, Expr, Function, Param, Pat, ReturnStmt, Stmt};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::ModuleTransform;

pub struct Uncurry;

impl ModuleTransform for Uncurry {
  fn name(&self) -> &'static str {
    "uncurry"
  }

  fn apply(&self, modules: Vec<Module>, _entry_points: &[ModuleIdentifier]) -> Vec<Module> {
    let arities = compute_arities(&modules);
    if arities.is_empty() {
      return modules;
    }
    tracing::debug!(flattened = arities.len(), "uncurrying saturated curried members");

    modules
      .into_iter()
      .map(|module| {
        let imports = build_imports(&module.elements);
        let bound_names = build_bound_names(&module.elements);
        let id = module.id.clone();
        let elements = module
          .elements
          .into_iter()
          .map(|el| rewrite_element(el, &id, &arities, &imports, &bound_names))
          .collect();
        Module::new(id, elements)
      })
      .collect()
  }
}

/// Every `Member` whose declaration unwinds to `depth >= 2` nested
/// single-param functions, keyed by its program-wide `Key`.
fn compute_arities(modules: &[Module]) -> FxHashMap<Key, usize> {
  let mut out = FxHashMap::default();
  for module in modules {
    for el in &module.elements {
      if let ModuleElement::Member { name, decl, .. } = el {
        let depth = curried_depth(decl);
        if depth >= 2 {
          out.insert(Key::new(module.id.clone(), name.clone()), depth);
        }
      }
    }
  }
  out
}

/// Rebuilds a `Member`'s statement form from its (possibly rewritten)
/// declaration expression: `exports.name = decl;` when exported, `var name
/// = decl;` otherwise — the two shapes `match_exported_member`/
/// `match_member_var` recognise on the way in (spec.md §4.1.2, §4.1.3).
fn member_raw_stmt(exported: bool, name: &str, decl: Expr) -> Stmt {
  if exported {
    expr_stmt(assign(member_ident(purs_bundle_ast::ident_expr("exports"), name), decl))
  } else {
    var_decl_stmt(name, decl)
  }
}

/// How many single-param function layers `expr` unwinds to before hitting
/// a body that isn't just `return <nested function>;`. `0` if `expr` isn't
/// even a single-param function itself.
fn curried_depth(expr: &Expr) -> usize {
  let Expr::Fn(fn_expr) = expr else { return 0 };
  let f = &fn_expr.function;
  if f.params.len() != 1 || !matches!(f.params[0].pat, Pat::Ident(_)) {
    return 0;
  }
  let Some(body) = &f.body else { return 0 };
  if let [Stmt::Return(ReturnStmt { arg: Some(inner), .. })] = body.stmts.as_slice() {
    let inner_depth = curried_depth(inner);
    if inner_depth > 0 {
      return 1 + inner_depth;
    }
  }
  1
}

/// Rebuilds `expr` (known to satisfy `curried_depth(expr) >= 1`) as a flat
/// `(params, body)` pair: the collected parameter idents, outermost first,
/// and the innermost non-wrapper body verbatim.
fn flatten_fn(expr: &Expr) -> (Vec<Param>, BlockStmt) {
  let Expr::Fn(fn_expr) = expr else { unreachable!("caller only passes curried functions") };
  let f = &fn_expr.function;
  let param = f.params[0].clone();
  let body = f.body.as_ref().expect("curried_depth requires a body");
  if let [Stmt::Return(ReturnStmt { arg: Some(inner), .. })] = body.stmts.as_slice() {
    if curried_depth(inner) > 0 {
      let (mut params, inner_body) = flatten_fn(inner);
      params.insert(0, param);
      return (params, inner_body);
    }
  }
  (vec![param], body.clone())
}

fn rewrite_element(
  el: ModuleElement,
  this_module: &ModuleIdentifier,
  arities: &FxHashMap<Key, usize>,
  imports: &FxHashMap<String, ModuleIdentifier>,
  bound_names: &FxHashSet<String>,
) -> ModuleElement {
  match el {
    ModuleElement::Member { raw: _, exported, name, decl, deps } => {
      let own_key = Key::new(this_module.clone(), name.clone());
      let was_flattened = arities.contains_key(&own_key);
      let mut decl = if was_flattened {
        let (params, body) = flatten_fn(&decl);
        Box::new(Expr::Fn(swc_core::ecma::ast::FnExpr {
          ident: None,
          function: Box::new(Function {
            params,
            decorators: vec![],
            span: swc_core::common::DUMMY_SP,
            body: Some(body),
            is_generator: false,
            is_async: false,
            type_params: None,
            return_type: None,
          }),
        }))
      } else {
        decl
      };
      let mut flattener = CallFlattener { this_module, arities, imports, bound_names };
      decl.visit_mut_with(&mut flattener);
      // `raw` is what the emitter actually prints (emit.rs renders `Member`
      // verbatim from `raw`, never from `decl`). Re-synthesize it from the
      // (possibly rewritten) `decl` unconditionally — the flattener walks
      // every sub-expression, not just the top level, so a cheap syntactic
      // diff against the old `raw` buys nothing over just rebuilding it.
      let raw = member_raw_stmt(exported, &name, (*decl).clone());
      ModuleElement::Member { raw, exported, name, decl, deps }
    }
    ModuleElement::ExportsList { raw, entries } => {
      let entries = entries
        .into_iter()
        .map(|mut entry| {
          let mut flattener = CallFlattener { this_module, arities, imports, bound_names };
          entry.value.visit_mut_with(&mut flattener);
          entry
        })
        .collect();
      ModuleElement::ExportsList { raw, entries }
    }
    other @ (ModuleElement::Require { .. } | ModuleElement::Other { .. }) => other,
  }
}

fn build_imports(elements: &[ModuleElement]) -> FxHashMap<String, ModuleIdentifier> {
  elements
    .iter()
    .filter_map(|el| match el {
      ModuleElement::Require { local_name, resolved: purs_bundle_common::RequireResolution::Resolved(mid), .. } => {
        Some((local_name.clone(), mid.clone()))
      }
      _ => None,
    })
    .collect()
}

fn build_bound_names(elements: &[ModuleElement]) -> FxHashSet<String> {
  elements
    .iter()
    .filter_map(|el| match el {
      ModuleElement::Member { name, .. } => Some(name.clone()),
      _ => None,
    })
    .collect()
}

struct CallFlattener<'a> {
  this_module: &'a ModuleIdentifier,
  arities: &'a FxHashMap<Key, usize>,
  imports: &'a FxHashMap<String, ModuleIdentifier>,
  bound_names: &'a FxHashSet<String>,
}

impl<'a> CallFlattener<'a> {
  /// Unwinds `expr`'s leading chain of single-argument, non-spread calls,
  /// then checks whether the root callee is a known curried member with
  /// enough saturating arguments to flatten.
  fn try_flatten(&self, expr: &Expr) -> Option<Expr> {
    let mut args = Vec::new();
    let mut cur = expr;
    loop {
      let Expr::Call(call_expr) = cur else { break };
      let swc_core::ecma::ast::Callee::Expr(callee) = &call_expr.callee else { break };
      if call_expr.args.len() != 1 || call_expr.args[0].spread.is_some() {
        break;
      }
      args.push((*call_expr.args[0].expr).clone());
      cur = callee;
    }
    if args.is_empty() {
      return None;
    }
    args.reverse();

    let key = self.resolve_key(cur)?;
    let arity = *self.arities.get(&key)?;
    if args.len() < arity {
      return None;
    }

    let (saturating, rest) = args.split_at(arity);
    let mut result = call(cur.clone(), saturating.to_vec());
    for arg in rest {
      result = call(result, vec![arg.clone()]);
    }
    Some(result)
  }

  fn resolve_key(&self, expr: &Expr) -> Option<Key> {
    if let Expr::Ident(ident) = expr {
      let name = ident.sym.as_ref();
      if self.bound_names.contains(name) {
        return Some(Key::new(self.this_module.clone(), name.to_string()));
      }
      return None;
    }
    let (local, member) = match_qualified_member(expr)?;
    let mid = self.imports.get(local)?;
    Some(Key::new(mid.clone(), member))
  }
}

impl<'a> VisitMut for CallFlattener<'a> {
  fn visit_mut_expr(&mut self, expr: &mut Expr) {
    expr.visit_mut_children_with(self);
    if let Some(flattened) = self.try_flatten(expr) {
      *expr = flattened;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use purs_bundle_ast::ident_expr;
  use swc_core::common::DUMMY_SP;
  use swc_core::ecma::ast::{BindingIdent, ExprStmt};

  fn single_param_fn(param: &str, body: Stmt) -> Expr {
    Expr::Fn(swc_core::ecma::ast::FnExpr {
      ident: None,
      function: Box::new(Function {
        params: vec![Param {
          span: DUMMY_SP,
          decorators: vec![],
          pat: Pat::Ident(BindingIdent { id: purs_bundle_ast::ident(param), type_ann: None }),
        }],
        decorators: vec![],
        span: DUMMY_SP,
        body: Some(BlockStmt { span: DUMMY_SP, stmts: vec![body] }),
        is_generator: false,
        is_async: false,
        type_params: None,
        return_type: None,
      }),
    })
  }

  fn return_stmt(expr: Expr) -> Stmt {
    Stmt::Return(ReturnStmt { span: DUMMY_SP, arg: Some(Box::new(expr)) })
  }

  #[test]
  fn computes_depth_of_nested_curried_function() {
    let curried =
      single_param_fn("a", return_stmt(single_param_fn("b", return_stmt(ident_expr("result")))));
    assert_eq!(curried_depth(&curried), 2);
  }

  #[test]
  fn non_curried_function_has_zero_depth() {
    let plain = single_param_fn("a", return_stmt(ident_expr("a")));
    assert_eq!(curried_depth(&plain), 1);
    assert_eq!(curried_depth(&ident_expr("x")), 0);
  }

  #[test]
  fn flattens_saturated_call_chain_in_same_module() {
    let a = ModuleIdentifier::regular("A");
    let curried_body = return_stmt(single_param_fn("b", return_stmt(ident_expr("result"))));
    let curried = single_param_fn("a", curried_body);

    let call_chain =
      purs_bundle_ast::call(purs_bundle_ast::call(ident_expr("add"), vec![ident_expr("x")]), vec![ident_expr("y")]);

    let module = Module::new(
      a,
      vec![
        ModuleElement::Member {
          raw: Stmt::Expr(ExprStmt { span: DUMMY_SP, expr: Box::new(curried.clone()) }),
          exported: false,
          name: "add".to_string(),
          decl: Box::new(curried),
          deps: vec![],
        },
        ModuleElement::Member {
          raw: Stmt::Expr(ExprStmt { span: DUMMY_SP, expr: Box::new(call_chain.clone()) }),
          exported: true,
          name: "result".to_string(),
          decl: Box::new(call_chain),
          deps: vec![],
        },
      ],
    );

    let out = Uncurry.apply(vec![module], &[]);
    match &out[0].elements[0] {
      ModuleElement::Member { decl, .. } => match decl.as_ref() {
        Expr::Fn(f) => assert_eq!(f.function.params.len(), 2),
        _ => panic!("expected a flattened function"),
      },
      _ => panic!("expected a Member"),
    }
    match &out[0].elements[1] {
      ModuleElement::Member { decl, .. } => match decl.as_ref() {
        Expr::Call(call_expr) => assert_eq!(call_expr.args.len(), 2),
        other => panic!("expected a single flattened call, got {other:?}"),
      },
      _ => panic!("expected a Member"),
    }
  }
}
