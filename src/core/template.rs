//! Runtime positional message templates
//!
//! Compile-time formatting goes through the `info!`/`warn!`/`error!` macros.
//! Templates only known at runtime use [`format_template`]:
//!
//! - each `{}` is replaced by the next argument,
//! - `{{` and `}}` produce literal braces,
//! - a `{}` with no argument left is kept verbatim,
//! - surplus arguments are appended as ` (extra args: a, b)`.

use std::fmt::{self, Write};

/// Substitute `args` into `template` positionally
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                match args.get(next) {
                    Some(arg) => {
                        let _ = write!(out, "{}", arg);
                    }
                    None => out.push_str("{}"),
                }
                next += 1;
            }
            other => out.push(other),
        }
    }

    if next < args.len() {
        out.push_str(" (extra args: ");
        for (i, arg) in args[next..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", arg);
        }
        out.push(')');
    }

    out
}
