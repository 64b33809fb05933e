//! Source-like rendering of expressions and values.

use std::fmt;

use crate::expr::{Expr, ExprKind};
use crate::value::Value;

/// Render an expression as compact, C-like source text for diagnostics.
pub fn pretty_print(expr: &Expr) -> String {
    let mut pp = PrettyPrinter::new();
    pp.emit_expr(expr);
    pp.buf
}

struct PrettyPrinter {
    buf: String,
}

impl PrettyPrinter {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn emit_list(&mut self, exprs: &[Expr]) {
        for (i, e) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(e);
        }
    }

    fn emit_expr(&mut self, expr: &Expr) {
        match expr.kind() {
            ExprKind::Member { object, member } => {
                self.emit_expr(object);
                self.write(".");
                self.write(member.name());
            }
            ExprKind::Constant(value) => {
                self.write(&value.to_string());
            }
            ExprKind::Parameter { name } => self.write(name),
            ExprKind::Lambda { params, body } => {
                if params.len() == 1 {
                    self.emit_expr(&params[0]);
                } else {
                    self.write("(");
                    self.emit_list(params);
                    self.write(")");
                }
                self.write(" => ");
                self.emit_expr(body);
            }
            ExprKind::Unary { op, operand } => {
                self.write(op.symbol());
                self.emit_expr(operand);
            }
            ExprKind::Binary { op, lhs, rhs } => {
                self.write("(");
                self.emit_expr(lhs);
                self.write(" ");
                self.write(op.symbol());
                self.write(" ");
                self.emit_expr(rhs);
                self.write(")");
            }
            ExprKind::Call { function, args } => {
                self.write(function);
                self.write("(");
                self.emit_list(args);
                self.write(")");
            }
            ExprKind::Conditional { test, then_expr, else_expr } => {
                self.write("(");
                self.emit_expr(test);
                self.write(" ? ");
                self.emit_expr(then_expr);
                self.write(" : ");
                self.emit_expr(else_expr);
                self.write(")");
            }
            ExprKind::Opaque { label } => {
                self.write("<");
                self.write(label);
                self.write(">");
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty_print(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Record(record) => write!(f, "{} {{ .. }}", record.class),
            Value::Boxed(holder) => write!(f, "Holder<{}>({})", holder.ty(), holder.value()),
        }
    }
}
