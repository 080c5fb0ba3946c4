use swc_core::ecma::ast::{
  AssignExpr, AssignOp, ComputedPropName, Decl, Expr, ExprStmt, MemberExpr, MemberProp, Pat,
  PatOrExpr, Prop, PropName, PropOrSpread, Stmt, VarDeclKind,
};

/// `var LOCAL = require("literal");` — the literal's string value is
/// returned unresolved; resolution against `knownModules` is the
/// classifier's job (spec.md §4.1.1).
pub fn match_require(stmt: &Stmt) -> Option<(String, String)> {
  let Stmt::Decl(Decl::Var(var_decl)) = stmt else { return None };
  if var_decl.kind != VarDeclKind::Var || var_decl.decls.len() != 1 {
    return None;
  }
  let decl = &var_decl.decls[0];
  let Pat::Ident(binding) = &decl.name else { return None };
  let init = decl.init.as_ref()?;
  let Expr::Call(call) = init.as_ref() else { return None };
  let swc_core::ecma::ast::Callee::Expr(callee_expr) = &call.callee else { return None };
  let Expr::Ident(callee_ident) = callee_expr.as_ref() else { return None };
  if &*callee_ident.sym != "require" {
    return None;
  }
  if call.args.len() != 1 {
    return None;
  }
  let arg = &call.args[0];
  if arg.spread.is_some() {
    return None;
  }
  let Expr::Lit(swc_core::ecma::ast::Lit::Str(s)) = arg.expr.as_ref() else { return None };
  Some((binding.id.sym.to_string(), s.value.to_string()))
}

/// `var NAME = EXPR;` — a non-exported member (spec.md §4.1.2).
pub fn match_member_var(stmt: &Stmt) -> Option<(String, Expr)> {
  let Stmt::Decl(Decl::Var(var_decl)) = stmt else { return None };
  if var_decl.kind != VarDeclKind::Var || var_decl.decls.len() != 1 {
    return None;
  }
  let decl = &var_decl.decls[0];
  let Pat::Ident(binding) = &decl.name else { return None };
  let init = decl.init.as_ref()?;
  Some((binding.id.sym.to_string(), (**init).clone()))
}

/// `exports.NAME = EXPR;` or `exports["NAME"] = EXPR;` (spec.md §4.1.3).
pub fn match_exported_member(stmt: &Stmt) -> Option<(String, Expr)> {
  let Stmt::Expr(ExprStmt { expr, .. }) = stmt else { return None };
  let Expr::Assign(AssignExpr { op: AssignOp::Assign, left, right, .. }) = expr.as_ref() else {
    return None;
  };
  let PatOrExpr::Expr(left_expr) = left else { return None };
  let Expr::Member(member) = left_expr.as_ref() else { return None };
  let Expr::Ident(obj_ident) = member.obj.as_ref() else { return None };
  if &*obj_ident.sym != "exports" {
    return None;
  }
  let name = member_prop_name(&member.prop)?;
  Some((name, (**right).clone()))
}

/// One property of a recognised `module.exports = { … };` object literal,
/// before its value shape has been checked (spec.md §4.1.4).
pub struct RawExportProp {
  pub exported_name: String,
  pub value: Expr,
}

/// `module.exports = { … };`. Returns:
/// - `None` if the statement isn't this shape at all (try the next pattern).
/// - `Some(Err(()))` if the shape matched but a property key isn't a string
///   or identifier, or the object contains a spread — caller should raise
///   `UnsupportedExport`.
/// - `Some(Ok(props))` with every property's raw name/value otherwise.
pub fn match_exports_list(stmt: &Stmt) -> Option<Result<Vec<RawExportProp>, ()>> {
  let Stmt::Expr(ExprStmt { expr, .. }) = stmt else { return None };
  let Expr::Assign(AssignExpr { op: AssignOp::Assign, left, right, .. }) = expr.as_ref() else {
    return None;
  };
  let PatOrExpr::Expr(left_expr) = left else { return None };
  let Expr::Member(member) = left_expr.as_ref() else { return None };
  let Expr::Ident(obj_ident) = member.obj.as_ref() else { return None };
  if &*obj_ident.sym != "module" {
    return None;
  }
  let MemberProp::Ident(prop_ident) = &member.prop else { return None };
  if &*prop_ident.sym != "exports" {
    return None;
  }
  let Expr::Object(obj) = right.as_ref() else { return None };

  let mut props = Vec::with_capacity(obj.props.len());
  for prop in &obj.props {
    let PropOrSpread::Prop(prop) = prop else { return Some(Err(())) };
    let Prop::KeyValue(kv) = prop.as_ref() else { return Some(Err(())) };
    let Some(name) = prop_name_string(&kv.key) else { return Some(Err(())) };
    props.push(RawExportProp { exported_name: name, value: (*kv.value).clone() });
  }
  Some(Ok(props))
}

/// The shape of an `ExportsList` entry's value, per spec.md §4.1.4.
pub enum ExportValueShape {
  Ident(String),
  ForeignMember,
}

/// Classifies a `module.exports` property's value as `IDENT`,
/// `$foreign.X`/`$foreign["X"]`, or neither.
pub fn match_export_value(expr: &Expr) -> Option<ExportValueShape> {
  match expr {
    Expr::Ident(ident) => Some(ExportValueShape::Ident(ident.sym.to_string())),
    Expr::Member(member) => {
      let Expr::Ident(obj_ident) = member.obj.as_ref() else { return None };
      if &*obj_ident.sym != "$foreign" {
        return None;
      }
      member_prop_name(&member.prop)?;
      Some(ExportValueShape::ForeignMember)
    }
    _ => None,
  }
}

/// A reference to some member, found while walking a dependency expression:
/// `A.B`/`A["B"]` where `A` is a `require`-bound local, or a bare `IDENT`.
pub enum MemberRef<'a> {
  Qualified { local: &'a str, member: String },
  Bare(&'a str),
}

/// Recognises `A.B` / `A["B"]` member-access expressions (spec.md §4.3).
pub fn match_qualified_member(expr: &Expr) -> Option<(&str, String)> {
  let Expr::Member(member) = expr else { return None };
  let Expr::Ident(obj_ident) = member.obj.as_ref() else { return None };
  let name = member_prop_name(&member.prop)?;
  Some((obj_ident.sym.as_ref(), name))
}

pub(crate) fn member_prop_name(prop: &MemberProp) -> Option<String> {
  match prop {
    MemberProp::Ident(ident) => Some(ident.sym.to_string()),
    MemberProp::Computed(ComputedPropName { expr, .. }) => match expr.as_ref() {
      Expr::Lit(swc_core::ecma::ast::Lit::Str(s)) => Some(s.value.to_string()),
      _ => None,
    },
    MemberProp::PrivateName(_) => None,
  }
}

fn prop_name_string(name: &PropName) -> Option<String> {
  match name {
    PropName::Ident(ident) => Some(ident.sym.to_string()),
    PropName::Str(s) => Some(s.value.to_string()),
    _ => None,
  }
}
