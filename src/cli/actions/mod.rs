//! Operations and their operand contract
//!
//! Every operation declares how many operands it takes, [`Operation::bind`]
//! checks the operands and turns them into a [`Request`] before any storage
//! call is made.

use std::{fmt, path::Path};
use thiserror::Error;

pub mod bucket;
pub mod object_delete;
pub mod object_exists;
pub mod object_get;
pub mod object_list;
pub mod object_put;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Operation {
    Create,
    Head,
    Get,
    Put,
    Delete,
    PrefixScan,
    ExistenceCheck,
    #[default]
    None,
}

/// Number of operands an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unknown method, expected one of: create, head, get, put, delete, exists, find")]
    UnknownMethod,

    #[error("{operation} takes {expected} operand(s), got {got}")]
    Operands {
        operation: Operation,
        expected: Arity,
        got: usize,
    },

    #[error("{operation}: invalid object key {key:?}, it can not be empty or have . or .. segments")]
    InvalidKey { operation: Operation, key: String },
}

/// An operation with its operands checked
#[derive(Debug, PartialEq, Eq)]
pub enum Request<'a> {
    Create,
    Head,
    Get { key: &'a str, path: &'a Path },
    Put { key: &'a str, path: &'a Path },
    Delete { keys: &'a [String] },
    PrefixScan { prefix: &'a str },
    ExistenceCheck { keys: &'a [String] },
}

impl Operation {
    /// `None` for [`Operation::None`], it accepts nothing
    #[must_use]
    pub const fn arity(self) -> Option<Arity> {
        match self {
            Self::Create | Self::Head => Some(Arity::Exactly(0)),
            Self::Get | Self::Put => Some(Arity::Exactly(2)),
            Self::Delete | Self::ExistenceCheck => Some(Arity::AtLeast(1)),
            Self::PrefixScan => Some(Arity::Exactly(1)),
            Self::None => None,
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the operands don't match the operation arity, or
    /// an object key is empty
    pub fn bind(self, operands: &[String]) -> Result<Request<'_>, UsageError> {
        let Some(arity) = self.arity() else {
            return Err(UsageError::UnknownMethod);
        };

        if !arity.accepts(operands.len()) {
            return Err(UsageError::Operands {
                operation: self,
                expected: arity,
                got: operands.len(),
            });
        }

        let keys: &[String] = match (self, operands) {
            (Self::Get | Self::Put, [key, _]) => std::slice::from_ref(key),
            (Self::Delete | Self::ExistenceCheck, keys) => keys,
            _ => &[],
        };

        if let Some(key) = keys.iter().find(|key| !is_valid_key(key)) {
            return Err(UsageError::InvalidKey {
                operation: self,
                key: key.clone(),
            });
        }

        let request = match (self, operands) {
            (Self::Create, []) => Request::Create,
            (Self::Head, []) => Request::Head,
            (Self::Get, [key, path]) => Request::Get {
                key,
                path: Path::new(path),
            },
            (Self::Put, [key, path]) => Request::Put {
                key,
                path: Path::new(path),
            },
            (Self::Delete, keys) => Request::Delete { keys },
            (Self::ExistenceCheck, keys) => Request::ExistenceCheck { keys },
            (Self::PrefixScan, [prefix]) => Request::PrefixScan { prefix },
            _ => {
                return Err(UsageError::Operands {
                    operation: self,
                    expected: arity,
                    got: operands.len(),
                });
            }
        };

        Ok(request)
    }
}

// "" and "/" address the bucket itself, "." and ".." segments are resolved
// away in the request URL
fn is_valid_key(key: &str) -> bool {
    let key = key.strip_prefix('/').unwrap_or(key);
    !key.is_empty() && !key.split('/').any(|segment| segment == "." || segment == "..")
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Head => "head",
            Self::Get => "get",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::PrefixScan => "find",
            Self::ExistenceCheck => "exists",
            Self::None => "none",
        };
        f.write_str(name)
    }
}
