//! Needed-file collection
//!
//! Turns the file-reference fields of every live record in a domain into
//! absolute paths under the media base.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::paths;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Collect every file path referenced by records of `domain`.
///
/// Record types without file or image fields are skipped without a query.
/// Record types that cannot be resolved to a live store, or whose store lacks
/// a registered column, are logged and skipped; any other catalog failure is
/// returned.
pub fn collect_needed(
    catalog: &dyn Catalog,
    domain: &str,
    media_base: &Path,
) -> Result<BTreeSet<PathBuf>> {
    let mut needed = BTreeSet::new();

    for record_type in catalog.record_types(domain)? {
        let fields = match catalog.fields(&record_type) {
            Ok(fields) => fields,
            Err(e) if e.is_soft() => {
                warn!("Skipping {}: {}", record_type, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let file_fields: Vec<String> = fields
            .into_iter()
            .filter(|f| f.kind.is_file_reference())
            .map(|f| f.name)
            .collect();
        if file_fields.is_empty() {
            continue;
        }

        let values = match catalog.project(&record_type, &file_fields) {
            Ok(values) => values,
            Err(e) if e.is_soft() => {
                warn!("Skipping {}: {}", record_type, e);
                continue;
            }
            Err(e) => return Err(e),
        };
        let before = needed.len();
        needed.extend(
            values
                .into_iter()
                .flatten()
                .filter(|v| !v.is_empty())
                .map(|v| paths::normalize(media_base.join(v))),
        );
        debug!(
            "{}: {} file fields, {} new paths",
            record_type,
            file_fields.len(),
            needed.len() - before
        );
    }

    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldDescriptor, FieldKind, RecordType};
    use crate::error::OrphanSweepError;
    use std::cell::RefCell;

    /// In-memory catalog that records which record types were projected
    #[derive(Default)]
    struct FakeCatalog {
        types: Vec<(RecordType, Option<Vec<FieldDescriptor>>, Vec<Option<String>>)>,
        projected: RefCell<Vec<String>>,
    }

    impl FakeCatalog {
        fn with(
            mut self,
            name: &str,
            fields: Option<Vec<(&str, FieldKind)>>,
            values: &[Option<&str>],
        ) -> Self {
            let fields = fields.map(|fs| {
                fs.into_iter()
                    .map(|(n, kind)| FieldDescriptor {
                        name: n.to_string(),
                        kind,
                    })
                    .collect()
            });
            let values = values.iter().map(|v| v.map(String::from)).collect();
            self.types
                .push((RecordType::new("gallery", name), fields, values));
            self
        }
    }

    impl Catalog for FakeCatalog {
        fn record_types(&self, domain: &str) -> Result<Vec<RecordType>> {
            Ok(self
                .types
                .iter()
                .filter(|(rt, _, _)| rt.domain == domain)
                .map(|(rt, _, _)| rt.clone())
                .collect())
        }

        fn fields(&self, record_type: &RecordType) -> Result<Vec<FieldDescriptor>> {
            let (_, fields, _) = self
                .types
                .iter()
                .find(|(rt, _, _)| rt == record_type)
                .unwrap();
            fields
                .clone()
                .ok_or_else(|| OrphanSweepError::MetadataResolution(record_type.to_string()))
        }

        fn project(&self, record_type: &RecordType, _fields: &[String]) -> Result<Vec<Option<String>>> {
            self.projected.borrow_mut().push(record_type.name.clone());
            let (_, _, values) = self
                .types
                .iter()
                .find(|(rt, _, _)| rt == record_type)
                .unwrap();
            Ok(values.clone())
        }
    }

    #[test]
    fn test_joins_values_onto_media_base() {
        let catalog = FakeCatalog::default().with(
            "photo",
            Some(vec![("image", FieldKind::Image), ("doc", FieldKind::File)]),
            &[Some("photos/a.jpg"), None, Some(""), Some("docs/a.pdf"), Some("photos/a.jpg")],
        );

        let needed = collect_needed(&catalog, "gallery", Path::new("/srv/media")).unwrap();
        assert_eq!(
            needed,
            BTreeSet::from([
                PathBuf::from("/srv/media/docs/a.pdf"),
                PathBuf::from("/srv/media/photos/a.jpg"),
            ])
        );
    }

    #[test]
    fn test_types_without_file_fields_are_not_queried() {
        let catalog = FakeCatalog::default()
            .with("tag", Some(vec![("label", FieldKind::Other("char".into()))]), &[])
            .with("photo", Some(vec![("image", FieldKind::Image)]), &[Some("a.jpg")]);

        collect_needed(&catalog, "gallery", Path::new("/m")).unwrap();
        assert_eq!(*catalog.projected.borrow(), vec!["photo".to_string()]);
    }

    #[test]
    fn test_unresolved_types_are_skipped() {
        let catalog = FakeCatalog::default()
            .with("ghost", None, &[])
            .with("photo", Some(vec![("image", FieldKind::Image)]), &[Some("a.jpg")]);

        let needed = collect_needed(&catalog, "gallery", Path::new("/m")).unwrap();
        assert_eq!(needed, BTreeSet::from([PathBuf::from("/m/a.jpg")]));
    }

    #[test]
    fn test_unknown_domain_is_empty() {
        let catalog = FakeCatalog::default();
        assert!(collect_needed(&catalog, "nope", Path::new("/m")).unwrap().is_empty());
    }
}
