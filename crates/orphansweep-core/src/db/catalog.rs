//! Catalog operations backed by SQLite

use super::Database;
use crate::catalog::{Catalog, FieldDescriptor, FieldKind, RecordType};
use crate::error::{OrphanSweepError, Result};
use rusqlite::types::ValueRef;
use rusqlite::{params, OptionalExtension};
use std::collections::BTreeSet;

/// Record type info, for inspection
#[derive(Debug, Clone, serde::Serialize)]
pub struct RecordTypeInfo {
    pub domain: String,
    pub name: String,
    pub backing_table: Option<String>,
    pub resolved: bool,
    pub file_fields: Vec<String>,
}

impl Database {
    /// Register (or re-register) a record type
    pub fn register_record_type(
        &self,
        domain: &str,
        name: &str,
        backing_table: Option<&str>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO record_types (domain, name, backing_table) VALUES (?1, ?2, ?3)
             ON CONFLICT(domain, name) DO UPDATE SET backing_table = excluded.backing_table",
            params![domain, name, backing_table],
        )?;
        Ok(())
    }

    /// Register a field of a record type with its kind tag
    pub fn register_field(&self, domain: &str, record_type: &str, name: &str, kind: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO record_fields (domain, record_type, name, kind)
             VALUES (?1, ?2, ?3, ?4)",
            params![domain, record_type, name, kind],
        )?;
        Ok(())
    }

    /// List every registered record type with its file fields
    pub fn list_record_types(&self) -> Result<Vec<RecordTypeInfo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT domain, name, backing_table FROM record_types ORDER BY domain, name")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut infos = Vec::with_capacity(rows.len());
        for (domain, name, backing_table) in rows {
            let rt = RecordType::new(domain.as_str(), name.as_str());
            let resolved = self.resolve_backing_table(&rt)?.is_some();
            let file_fields = self
                .declared_fields(&rt)?
                .into_iter()
                .filter(|f| f.kind.is_file_reference())
                .map(|f| f.name)
                .collect();
            infos.push(RecordTypeInfo {
                domain,
                name,
                backing_table,
                resolved,
                file_fields,
            });
        }
        Ok(infos)
    }

    /// Backing table of a record type, if it names a live table or view
    fn resolve_backing_table(&self, record_type: &RecordType) -> Result<Option<String>> {
        let backing: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT backing_table FROM record_types WHERE domain = ?1 AND name = ?2",
                params![record_type.domain, record_type.name],
                |row| row.get(0),
            )
            .optional()?;

        let Some(Some(table)) = backing else {
            return Ok(None);
        };

        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1)",
            params![table],
            |row| row.get(0),
        )?;

        Ok(exists.then_some(table))
    }

    fn declared_fields(&self, record_type: &RecordType) -> Result<Vec<FieldDescriptor>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, kind FROM record_fields
             WHERE domain = ?1 AND record_type = ?2
             ORDER BY name",
        )?;
        let fields = stmt
            .query_map(params![record_type.domain, record_type.name], |row| {
                let kind: String = row.get(1)?;
                Ok(FieldDescriptor {
                    name: row.get(0)?,
                    kind: FieldKind::from_tag(&kind),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(fields)
    }

    /// Column names of a table or view, lowercased
    fn table_columns(&self, table: &str) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1)")?;
        let columns = stmt
            .query_map(params![table], |row| {
                row.get::<_, String>(0).map(|name| name.to_lowercase())
            })?
            .collect::<std::result::Result<BTreeSet<_>, _>>()?;
        Ok(columns)
    }

    fn require_backing_table(&self, record_type: &RecordType) -> Result<String> {
        self.resolve_backing_table(record_type)?.ok_or_else(|| {
            OrphanSweepError::MetadataResolution(format!(
                "{} has no live backing table",
                record_type
            ))
        })
    }
}

impl Catalog for Database {
    fn record_types(&self, domain: &str) -> Result<Vec<RecordType>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM record_types WHERE domain = ?1 ORDER BY name")?;
        let types = stmt
            .query_map(params![domain], |row| {
                Ok(RecordType::new(domain, row.get::<_, String>(0)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(types)
    }

    fn fields(&self, record_type: &RecordType) -> Result<Vec<FieldDescriptor>> {
        self.require_backing_table(record_type)?;
        self.declared_fields(record_type)
    }

    fn project(&self, record_type: &RecordType, fields: &[String]) -> Result<Vec<Option<String>>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let table = self.require_backing_table(record_type)?;

        let available = self.table_columns(&table)?;
        if let Some(missing) = fields
            .iter()
            .find(|f| !available.contains(&f.to_lowercase()))
        {
            return Err(OrphanSweepError::MetadataResolution(format!(
                "{} has no column '{}' in {}",
                record_type, missing, table
            )));
        }

        let columns: Vec<String> = fields.iter().map(|f| quote_ident(f)).collect();
        let sql = format!("SELECT {} FROM {}", columns.join(", "), quote_ident(&table));
        let mut stmt = self.conn.prepare(&sql)?;

        let width = fields.len();
        let mut values = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            for i in 0..width {
                values.push(value_to_string(row.get_ref(i)?));
            }
        }
        Ok(values)
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn value_to_string(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(r) => Some(r.to_string()),
    }
}
