//! Dispatch identifiers.
//!
//! ULID ベース: 生成順でソートでき、ログ上で dispatch 呼び出しを追跡できる。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifies one dispatch call. Recorded on the call's tracing span.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DispatchId(Ulid);

impl DispatchId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Ulid> for DispatchId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_prefix() {
        let id = DispatchId::from(Ulid::nil());
        assert_eq!(id.to_string(), "dispatch-00000000000000000000000000");
    }

    #[test]
    fn new_ids_are_distinct() {
        let a = DispatchId::new();
        let b = DispatchId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn serializes_as_plain_ulid() {
        let id = DispatchId::from(Ulid::nil());
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "\"00000000000000000000000000\"");
    }
}
