//! Synthetic AST construction for statements the classifier never saw in
//! the source — `Require`/`ExportsList` emission and the per-module IIFE
//! wrapper (spec.md §4.7). Kept deliberately small: a handful of composable
//! builders rather than a generic quasi-quoter.

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
  AssignExpr, AssignOp, BinExpr, BinaryOp, BindingIdent, BlockStmt, Callee, CallExpr,
  ComputedPropName, Decl, Expr, ExprOrSpread, ExprStmt, FnExpr, Function, Ident, Lit, MemberExpr,
  MemberProp, ObjectLit, Param, ParenExpr, Pat, PatOrExpr, Stmt, Str, VarDecl, VarDeclKind,
  VarDeclarator,
};

pub fn ident(name: &str) -> Ident {
  Ident::new(name.into(), DUMMY_SP)
}

pub fn ident_expr(name: &str) -> Expr {
  Expr::Ident(ident(name))
}

pub fn str_lit(value: &str) -> Expr {
  Expr::Lit(Lit::Str(Str { span: DUMMY_SP, value: value.into(), raw: None }))
}

pub fn member_computed_str(obj: Expr, prop: &str) -> Expr {
  Expr::Member(MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(obj),
    prop: MemberProp::Computed(ComputedPropName { span: DUMMY_SP, expr: Box::new(str_lit(prop)) }),
  })
}

pub fn member_ident(obj: Expr, prop: &str) -> Expr {
  Expr::Member(MemberExpr { span: DUMMY_SP, obj: Box::new(obj), prop: MemberProp::Ident(ident(prop)) })
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
  Expr::Call(CallExpr {
    span: DUMMY_SP,
    callee: Callee::Expr(Box::new(callee)),
    args: args.into_iter().map(|expr| ExprOrSpread { spread: None, expr: Box::new(expr) }).collect(),
    type_args: None,
  })
}

pub fn assign(left: Expr, right: Expr) -> Expr {
  Expr::Assign(AssignExpr {
    span: DUMMY_SP,
    op: AssignOp::Assign,
    left: PatOrExpr::Expr(Box::new(left)),
    right: Box::new(right),
  })
}

pub fn logical_or(left: Expr, right: Expr) -> Expr {
  Expr::Bin(BinExpr { span: DUMMY_SP, op: BinaryOp::LogicalOr, left: Box::new(left), right: Box::new(right) })
}

pub fn empty_object() -> Expr {
  Expr::Object(ObjectLit { span: DUMMY_SP, props: vec![] })
}

pub fn expr_stmt(expr: Expr) -> Stmt {
  Stmt::Expr(ExprStmt { span: DUMMY_SP, expr: Box::new(expr) })
}

pub fn var_decl_stmt(name: &str, init: Expr) -> Stmt {
  Stmt::Decl(Decl::Var(Box::new(VarDecl {
    span: DUMMY_SP,
    kind: VarDeclKind::Var,
    declare: false,
    decls: vec![VarDeclarator {
      span: DUMMY_SP,
      name: Pat::Ident(BindingIdent { id: ident(name), type_ann: None }),
      init: Some(Box::new(init)),
      definite: false,
    }],
  })))
}

/// `var NS = {};` — the namespace object the whole bundle installs onto.
pub fn namespace_init_stmt(namespace: &str) -> Stmt {
  var_decl_stmt(namespace, empty_object())
}

/// `var LOCAL = NS["slot"];` — a `Require` resolved to an internal module.
pub fn resolved_require_stmt(local: &str, namespace: &str, slot: &str) -> Stmt {
  var_decl_stmt(local, member_computed_str(ident_expr(namespace), slot))
}

/// `var LOCAL = require("path");` — a `Require` left unresolved.
pub fn unresolved_require_stmt(local: &str, path: &str) -> Stmt {
  var_decl_stmt(local, call(ident_expr("require"), vec![str_lit(path)]))
}

/// `exports["name"] = value;` for a surviving `ExportsList` entry.
pub fn exports_assign_stmt(name: &str, value: Expr) -> Stmt {
  expr_stmt(assign(member_computed_str(ident_expr("exports"), name), value))
}

/// `(function(exports) { body })(NS["slot"] = NS["slot"] || {});`
pub fn iife_install_stmt(namespace: &str, slot: &str, body: Vec<Stmt>) -> Stmt {
  let param = Param {
    span: DUMMY_SP,
    decorators: vec![],
    pat: Pat::Ident(BindingIdent { id: ident("exports"), type_ann: None }),
  };
  let function = Function {
    params: vec![param],
    decorators: vec![],
    span: DUMMY_SP,
    body: Some(BlockStmt { span: DUMMY_SP, stmts: body }),
    is_generator: false,
    is_async: false,
    type_params: None,
    return_type: None,
  };
  let wrapped_fn =
    Expr::Paren(ParenExpr { span: DUMMY_SP, expr: Box::new(Expr::Fn(FnExpr { ident: None, function: Box::new(function) })) });

  let ns_slot = member_computed_str(ident_expr(namespace), slot);
  let default_to_empty = logical_or(ns_slot.clone(), empty_object());
  let install_arg = assign(ns_slot, default_to_empty);

  expr_stmt(call(wrapped_fn, vec![install_arg]))
}

/// `NS["mainModule"].main();`
pub fn main_call_stmt(namespace: &str, main_module: &str) -> Stmt {
  let ns_slot = member_computed_str(ident_expr(namespace), main_module);
  expr_stmt(call(member_ident(ns_slot, "main"), vec![]))
}
