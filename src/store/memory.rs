//! In-process store with the same contract as the remote one.
//!
//! Assigns increasing integer ids, enforces the foreign keys declared by
//! `EntityKind`, and keeps an operation log. Backs `--dry-run` and the
//! pipeline tests.

use super::{ExecOutcome, RemoteStore, StoreError};
use demo_data_gen::{EntityKind, RecordId};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// One call made against a `MemoryStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Insert { table: String, rows: usize },
    Delete { table: String, rows: u64 },
    Execute { sql: String },
}

#[derive(Debug)]
pub struct MemoryStore {
    tables: BTreeMap<String, Vec<Value>>,
    next_id: u64,
    failing_tables: HashSet<String>,
    exec_endpoint: bool,
    ops: Vec<StoreOp>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            next_id: 1,
            failing_tables: HashSet::new(),
            exec_endpoint: true,
            ops: Vec::new(),
        }
    }

    /// Behave like a store with no ad-hoc SQL endpoint
    pub fn without_exec_endpoint(mut self) -> Self {
        self.exec_endpoint = false;
        self
    }

    /// Reject every subsequent insert into `table`
    pub fn fail_inserts_into(&mut self, table: &str) {
        self.failing_tables.insert(table.to_string());
    }

    pub fn rows(&self, table: &str) -> &[Value] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.rows(table).len()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Every call made so far, oldest first
    pub fn ops(&self) -> &[StoreOp] {
        &self.ops
    }

    /// Tables that received an insert call, in call order
    pub fn inserted_tables(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                StoreOp::Insert { table, .. } => Some(table.as_str()),
                _ => None,
            })
            .collect()
    }

    fn ids(&self, table: &str) -> HashSet<String> {
        self.rows(table)
            .iter()
            .filter_map(RecordId::from_row)
            .map(|id| id.as_str().to_string())
            .collect()
    }

    fn check_foreign_keys(&self, kind: EntityKind, rows: &[Value]) -> Result<(), StoreError> {
        for (column, parent) in kind.foreign_keys() {
            let parent_ids = self.ids(parent.table());
            for row in rows {
                let value = row.get(*column).and_then(id_text);
                let Some(value) = value else {
                    return Err(StoreError::Constraint {
                        target: kind.table().to_string(),
                        message: format!("null value in column {}", column),
                    });
                };
                if !parent_ids.contains(&value) {
                    return Err(StoreError::Constraint {
                        target: kind.table().to_string(),
                        message: format!(
                            "{}={} is not present in table {}",
                            column,
                            value,
                            parent.table()
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

impl RemoteStore for MemoryStore {
    fn insert(&mut self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        self.ops.push(StoreOp::Insert {
            table: table.to_string(),
            rows: rows.len(),
        });

        if self.failing_tables.contains(table) {
            return Err(StoreError::Rejected {
                target: table.to_string(),
                message: "insert rejected by store".to_string(),
            });
        }
        if let Some(kind) = EntityKind::from_table(table) {
            self.check_foreign_keys(kind, &rows)?;
        }

        let mut inserted = Vec::with_capacity(rows.len());
        for mut row in rows {
            let Some(object) = row.as_object_mut() else {
                return Err(StoreError::Rejected {
                    target: table.to_string(),
                    message: "row is not a JSON object".to_string(),
                });
            };
            object.insert("id".to_string(), Value::from(self.next_id));
            self.next_id += 1;
            inserted.push(row);
        }

        self.tables
            .entry(table.to_string())
            .or_default()
            .extend(inserted.iter().cloned());
        Ok(inserted)
    }

    fn delete_all(&mut self, table: &str) -> Result<u64, StoreError> {
        if let Some(kind) = EntityKind::from_table(table) {
            let blocking = EntityKind::ALL
                .into_iter()
                .filter(|child| child.references().contains(&kind))
                .find(|child| self.row_count(child.table()) > 0);
            if let Some(child) = blocking {
                self.ops.push(StoreOp::Delete {
                    table: table.to_string(),
                    rows: 0,
                });
                return Err(StoreError::Constraint {
                    target: table.to_string(),
                    message: format!("rows are still referenced from table {}", child.table()),
                });
            }
        }

        let removed = self
            .tables
            .remove(table)
            .map(|rows| rows.len() as u64)
            .unwrap_or(0);
        self.ops.push(StoreOp::Delete {
            table: table.to_string(),
            rows: removed,
        });
        Ok(removed)
    }

    fn execute_sql(&mut self, sql: &str) -> Result<ExecOutcome, StoreError> {
        self.ops.push(StoreOp::Execute {
            sql: sql.to_string(),
        });
        if self.exec_endpoint {
            Ok(ExecOutcome::Executed)
        } else {
            Ok(ExecOutcome::EndpointMissing)
        }
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assigns_increasing_ids() {
        let mut store = MemoryStore::new();
        let rows = store
            .insert("campaigns", vec![json!({"name": "a"}), json!({"name": "b"})])
            .unwrap();
        assert_eq!(rows[0]["id"], 1);
        assert_eq!(rows[1]["id"], 2);
        assert_eq!(rows[1]["name"], "b");
        assert_eq!(store.row_count("campaigns"), 2);
    }

    #[test]
    fn test_rejects_dangling_foreign_key() {
        let mut store = MemoryStore::new();
        store.insert("prospects", vec![json!({"email": "a@x.com"})]).unwrap();

        let ok = store.insert("interactions", vec![json!({"prospect_id": "1"})]);
        assert!(ok.is_ok());

        let err = store
            .insert("interactions", vec![json!({"prospect_id": "99"})])
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint { .. }));
        // Atomic: nothing from the failed batch is kept
        assert_eq!(store.row_count("interactions"), 1);
    }

    #[test]
    fn test_delete_blocked_by_children() {
        let mut store = MemoryStore::new();
        store.insert("prospects", vec![json!({})]).unwrap();
        store.insert("interactions", vec![json!({"prospect_id": 1})]).unwrap();

        assert!(store.delete_all("prospects").is_err());
        assert_eq!(store.delete_all("interactions").unwrap(), 1);
        assert_eq!(store.delete_all("prospects").unwrap(), 1);
        assert_eq!(store.delete_all("prospects").unwrap(), 0);
    }

    #[test]
    fn test_injected_failure_and_exec_endpoint() {
        let mut store = MemoryStore::new().without_exec_endpoint();
        store.fail_inserts_into("agent_logs");
        assert!(store.insert("agent_logs", vec![json!({})]).is_err());
        assert_eq!(
            store.execute_sql("select 1").unwrap(),
            ExecOutcome::EndpointMissing
        );
        assert_eq!(store.inserted_tables(), vec!["agent_logs"]);
    }
}
