use crate::error::FlattenError;
use crate::models::{OutputRow, ServiceRecord, SkuRecord, SkuVmFamilyMap};

/// Expands one SKU into one row per serviceable region, in the SKU's region
/// order. A SKU without regions yields nothing.
pub fn rows_for_sku<'a>(
    service: &'a ServiceRecord,
    sku: &'a SkuRecord,
    vm_families: &'a SkuVmFamilyMap,
) -> Result<impl Iterator<Item = OutputRow> + 'a, FlattenError> {
    let category = sku.category.as_ref().ok_or_else(|| FlattenError::MissingField {
        sku_id: sku.sku_id.clone(),
        field: "category",
    })?;
    let vm_family = vm_families.get(&sku.sku_id);

    Ok(sku.service_regions.iter().map(move |region| OutputRow {
        service_name: service.display_name.clone(),
        service_id: service.service_id.clone(),
        sku_name: sku.description.clone(),
        sku_id: sku.sku_id.clone(),
        sku_resource_family: category.resource_family.clone(),
        sku_resource_group: category.resource_group.clone(),
        sku_usage_type: category.usage_type.clone(),
        sku_region: region.clone(),
        sku_vm_family: vm_family.cloned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn service() -> ServiceRecord {
        ServiceRecord {
            service_id: "S1".into(),
            display_name: "Compute Engine".into(),
        }
    }

    fn sku(id: &str, regions: &[&str]) -> SkuRecord {
        SkuRecord {
            sku_id: id.into(),
            description: "N2 instance".into(),
            category: Some(Category {
                resource_family: "Compute".into(),
                resource_group: "N2".into(),
                usage_type: "OnDemand".into(),
            }),
            service_regions: regions.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn one_row_per_region_in_order() {
        let service = service();
        let sku = sku("X1", &["us-east1", "us-west1", "europe-west4"]);
        let map = SkuVmFamilyMap::from([("X1".to_string(), "N2".to_string())]);

        let rows: Vec<OutputRow> = rows_for_sku(&service, &sku, &map).unwrap().collect();

        assert_eq!(rows.len(), 3);
        let regions: Vec<&str> = rows.iter().map(|r| r.sku_region.as_str()).collect();
        assert_eq!(regions, ["us-east1", "us-west1", "europe-west4"]);
        assert!(rows.iter().all(|r| r.sku_vm_family.as_deref() == Some("N2")));
        assert_eq!(rows[0].service_name, "Compute Engine");
        assert_eq!(rows[0].sku_resource_group, "N2");
    }

    #[test]
    fn no_regions_no_rows() {
        let service = service();
        let sku = sku("X1", &[]);
        let map = SkuVmFamilyMap::new();

        let rows = rows_for_sku(&service, &sku, &map).unwrap();

        assert_eq!(rows.count(), 0);
    }

    #[test]
    fn unmapped_sku_has_no_vm_family() {
        let service = service();
        let sku = sku("X9", &["global"]);
        let map = SkuVmFamilyMap::from([("X1".to_string(), "N2".to_string())]);

        let row = rows_for_sku(&service, &sku, &map).unwrap().next().unwrap();

        assert_eq!(row.sku_vm_family, None);
    }

    #[test]
    fn missing_category_is_an_error() {
        let service = service();
        let mut sku = sku("X1", &["us-east1"]);
        sku.category = None;
        let map = SkuVmFamilyMap::new();

        let err = rows_for_sku(&service, &sku, &map).err().unwrap();

        assert!(matches!(err, FlattenError::MissingField { field: "category", .. }));
    }
}
