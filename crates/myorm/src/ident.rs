//! MySQL identifier checking.
//!
//! Handles splice identifiers into SQL text. By default they are used
//! verbatim; with [`IdentPolicy::Strict`] every identifier argument is parsed
//! by [`Ident::parse`] first and rejected if it is not a plain MySQL
//! identifier.
//!
//! - Unquoted parts: `[A-Za-z0-9_$]+`, not made of digits only
//! - Quoted parts: backticks, any characters except NUL, `` ` `` escaped as ``` `` ```
//!
//! # Example
//! ```ignore
//! use myorm::Ident;
//!
//! let t = Ident::parse("shop.users")?;
//! let c = Ident::parse("`order`.`total amount`")?;
//! # Ok::<(), myorm::OrmError>(())
//! ```

use crate::error::{OrmError, OrmResult};

/// How a handle treats identifier arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentPolicy {
    /// Splice identifiers into SQL exactly as given.
    #[default]
    Verbatim,
    /// Reject anything that does not parse as a MySQL identifier.
    Strict,
}

impl IdentPolicy {
    /// Check `name` under this policy, returning it unchanged on success.
    pub fn check<'a>(&self, name: &'a str) -> OrmResult<&'a str> {
        if *self == IdentPolicy::Strict {
            Ident::parse(name)?;
        }
        Ok(name)
    }

    /// Check every name in `names`.
    pub fn check_all(&self, names: &[&str]) -> OrmResult<()> {
        for name in names {
            self.check(name)?;
        }
        Ok(())
    }

    /// Check projection items, which may also be `*` or `table.*`.
    pub fn check_projection(&self, items: &[&str]) -> OrmResult<()> {
        if *self == IdentPolicy::Verbatim {
            return Ok(());
        }
        for item in items {
            let name = item.strip_suffix(".*").unwrap_or(item);
            if name != "*" {
                Ident::parse(name)?;
            }
        }
        Ok(())
    }
}

/// A part of a MySQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A MySQL identifier (column, table, or database name), possibly dotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// Parse an identifier string, supporting dotted and backtick-quoted forms.
    ///
    /// - Dotted: `db.table.column`
    /// - Quoted: `` `Order Items` ``
    /// - Mixed: `` shop.`Order Items`.id ``
    pub fn parse(s: &str) -> OrmResult<Self> {
        if s.is_empty() {
            return Err(OrmError::validation("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(OrmError::validation(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') => {
                        if chars.peek().is_none() {
                            return Err(OrmError::validation("Trailing '.' in identifier"));
                        }
                    }
                    Some(c) => {
                        return Err(OrmError::validation(format!(
                            "Expected '.' between identifier parts, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            if chars.peek() == Some(&'`') {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('`') => {
                            if chars.peek() == Some(&'`') {
                                chars.next();
                                name.push('`');
                            } else {
                                break;
                            }
                        }
                        Some(c) => name.push(c),
                        None => return Err(OrmError::validation("Unclosed quoted identifier")),
                    }
                }
                if name.is_empty() {
                    return Err(OrmError::validation("Empty quoted identifier"));
                }
                parts.push(IdentPart::Quoted(name));
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                if c == '_' || c == '$' || c.is_ascii_alphanumeric() {
                    name.push(c);
                    chars.next();
                } else {
                    return Err(OrmError::validation(format!(
                        "Invalid character in identifier: '{c}'"
                    )));
                }
            }
            if name.is_empty() {
                return Err(OrmError::validation("Empty identifier segment"));
            }
            if name.chars().all(|c| c.is_ascii_digit()) {
                return Err(OrmError::validation(format!(
                    "Identifier segment cannot be all digits: '{name}'"
                )));
            }
            parts.push(IdentPart::Unquoted(name));
        }

        if parts.is_empty() {
            return Err(OrmError::validation("Empty identifier"));
        }

        Ok(Self { parts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Ident::parse("users").unwrap();
        assert_eq!(ident.parts, vec![IdentPart::Unquoted("users".into())]);
    }

    #[test]
    fn ident_dotted() {
        let ident = Ident::parse("shop.users.id").unwrap();
        assert_eq!(ident.parts.len(), 3);
    }

    #[test]
    fn ident_quoted_with_escape() {
        let ident = Ident::parse("`has``tick`").unwrap();
        assert_eq!(ident.parts, vec![IdentPart::Quoted("has`tick".into())]);
    }

    #[test]
    fn ident_mixed_quoted_unquoted() {
        let ident = Ident::parse("shop.`Order Items`.id").unwrap();
        assert_eq!(
            ident.parts,
            vec![
                IdentPart::Unquoted("shop".into()),
                IdentPart::Quoted("Order Items".into()),
                IdentPart::Unquoted("id".into()),
            ]
        );
    }

    #[test]
    fn ident_allows_leading_digit_and_dollar() {
        assert!(Ident::parse("1st_table").is_ok());
        assert!(Ident::parse("cost$").is_ok());
    }

    #[test]
    fn ident_rejects_unsafe() {
        assert!(Ident::parse("").is_err());
        assert!(Ident::parse("123").is_err());
        assert!(Ident::parse("my table").is_err());
        assert!(Ident::parse("users; DROP TABLE users").is_err());
        assert!(Ident::parse("db..users").is_err());
        assert!(Ident::parse("db.").is_err());
        assert!(Ident::parse("`unclosed").is_err());
    }

    #[test]
    fn verbatim_policy_accepts_anything() {
        assert_eq!(IdentPolicy::Verbatim.check("a b; --").unwrap(), "a b; --");
    }

    #[test]
    fn strict_policy_rejects_fragments() {
        assert_eq!(IdentPolicy::Strict.check("users").unwrap(), "users");
        assert!(IdentPolicy::Strict.check("users WHERE 1=1").is_err());
        assert!(IdentPolicy::Strict.check_all(&["a", "b c"]).is_err());
    }

    #[test]
    fn strict_projection_allows_stars() {
        assert!(IdentPolicy::Strict.check_projection(&["*", "users.*", "orders.total"]).is_ok());
        assert!(IdentPolicy::Strict.check_projection(&["COUNT(*)"]).is_err());
        assert!(IdentPolicy::Verbatim.check_projection(&["COUNT(*)"]).is_ok());
    }
}
