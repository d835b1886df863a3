//! Breakdown resolution: flatten a CU into its leaf stock-code rows.
//!
//! Traversal is depth-first and left-to-right: a child CU's leaves are spliced
//! in at the position of the row that referenced it. The walk uses an explicit
//! stack; a CU that is re-entered while still being expanded is a cycle.

use culookup_core::{CuId, LookupError, LookupResult};

use crate::table::{BreakdownRow, BreakdownTable, RowKind};

struct Frame<'t> {
    cu: &'t CuId,
    rows: Vec<&'t BreakdownRow>,
    next: usize,
}

/// Resolve `cu` into the ordered leaf rows it ultimately consists of.
///
/// A CU with no breakdown rows resolves to an empty list. Leaf rows are
/// returned unchanged (a leaf that also names a child CU keeps that field).
pub fn resolve<'t>(cu: &'t CuId, table: &'t BreakdownTable) -> LookupResult<Vec<&'t BreakdownRow>> {
    let mut leaves = Vec::new();
    let mut stack = vec![Frame {
        cu,
        rows: table.children_of(cu),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(row) = frame.rows.get(frame.next).copied() else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        match row.kind() {
            RowKind::Leaf(_) => leaves.push(row),
            RowKind::Internal(child) => {
                if stack.iter().any(|f| f.cu == child) {
                    let mut path: Vec<CuId> = stack.iter().map(|f| f.cu.clone()).collect();
                    path.push(child.clone());
                    return Err(LookupError::cycle(path));
                }
                stack.push(Frame {
                    cu: child,
                    rows: table.children_of(child),
                    next: 0,
                });
            }
            RowKind::Inert => {}
        }
    }

    tracing::debug!(cu = %cu, leaves = leaves.len(), "breakdown resolved");
    Ok(leaves)
}
