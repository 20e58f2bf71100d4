use std::collections::HashMap;
use std::io::Write;

use csv::{Terminator, WriterBuilder};
use tracing::{error, info};

use crate::error::FlattenError;
use crate::flatten::rows_for_sku;
use crate::models::{OutputRow, ServiceRecord, SkuRecord, SkuVmFamilyMap};

#[derive(Debug, Default)]
pub struct WriteSummary {
    pub rows_written: usize,
    pub skus_written: usize,
    pub skipped: Vec<FlattenError>,
}

/// Writes the header, then one row per (SKU, region) for every service in
/// order. SKUs that cannot be flattened are logged, recorded and skipped.
pub fn flatten_and_write<W: Write>(
    services: &[ServiceRecord],
    skus_by_service: &HashMap<String, Vec<SkuRecord>>,
    vm_families: &SkuVmFamilyMap,
    out: W,
) -> Result<WriteSummary, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(OutputRow::HEADERS)?;

    let mut summary = WriteSummary::default();
    for service in services {
        let Some(skus) = skus_by_service.get(&service.service_id) else {
            continue;
        };
        info!(
            service = %service.display_name,
            skus = skus.len(),
            "Flattening service and sku data"
        );

        for sku in skus {
            let rows = match rows_for_sku(service, sku, vm_families) {
                Ok(rows) => rows,
                Err(e) => {
                    error!(
                        service_id = %service.service_id,
                        error = %e,
                        "Failed to flatten data"
                    );
                    summary.skipped.push(e);
                    continue;
                }
            };
            for row in rows {
                writer.serialize(row)?;
                summary.rows_written += 1;
            }
            summary.skus_written += 1;
        }
    }

    writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn service(id: &str, name: &str) -> ServiceRecord {
        ServiceRecord {
            service_id: id.into(),
            display_name: name.into(),
        }
    }

    fn sku(id: &str, description: &str, regions: &[&str]) -> SkuRecord {
        SkuRecord {
            sku_id: id.into(),
            description: description.into(),
            category: Some(Category {
                resource_family: "Compute".into(),
                resource_group: "N2".into(),
                usage_type: "OnDemand".into(),
            }),
            service_regions: regions.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn write(
        services: &[ServiceRecord],
        skus_by_service: &HashMap<String, Vec<SkuRecord>>,
        map: &SkuVmFamilyMap,
    ) -> (String, WriteSummary) {
        let mut out = Vec::new();
        let summary = flatten_and_write(services, skus_by_service, map, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    const HEADER: &str = "service_name,service_id,sku_name,sku_id,sku_resource_family,sku_resource_group,sku_usage_type,sku_region,sku_vm_family\n";

    #[test]
    fn header_only_when_no_rows() {
        let (csv, summary) = write(&[], &HashMap::new(), &SkuVmFamilyMap::new());

        assert_eq!(csv, HEADER);
        assert_eq!(summary.rows_written, 0);
    }

    #[test]
    fn writes_one_row_per_region() {
        let services = [service("S1", "Compute Engine")];
        let skus = HashMap::from([(
            "S1".to_string(),
            vec![sku("X1", "N2 instance", &["us-east1", "us-west1"])],
        )]);
        let map = SkuVmFamilyMap::from([("X1".to_string(), "N2".to_string())]);

        let (csv, summary) = write(&services, &skus, &map);

        assert_eq!(
            csv,
            format!(
                "{HEADER}\
                 Compute Engine,S1,N2 instance,X1,Compute,N2,OnDemand,us-east1,N2\n\
                 Compute Engine,S1,N2 instance,X1,Compute,N2,OnDemand,us-west1,N2\n"
            )
        );
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.skus_written, 1);
    }

    #[test]
    fn quotes_commas_and_leaves_missing_family_empty() {
        let services = [service("S1", "Cloud Storage")];
        let skus = HashMap::from([(
            "S1".to_string(),
            vec![sku("X2", "Storage, \"nearline\"", &["us"])],
        )]);

        let (csv, _) = write(&services, &skus, &SkuVmFamilyMap::new());

        let line = csv.lines().nth(1).unwrap();
        assert_eq!(line, r#"Cloud Storage,S1,"Storage, ""nearline""",X2,Compute,N2,OnDemand,us,"#);
    }

    #[test]
    fn malformed_sku_is_skipped() {
        let services = [service("S1", "Compute Engine")];
        let mut broken = sku("X1", "broken", &["us-east1"]);
        broken.category = None;
        let skus = HashMap::from([(
            "S1".to_string(),
            vec![broken, sku("X2", "fine", &["us-east1"]), sku("X3", "regionless", &[])],
        )]);

        let (csv, summary) = write(&services, &skus, &SkuVmFamilyMap::new());

        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().contains(",X2,"));
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skus_written, 2);
    }

    #[test]
    fn services_keep_their_order() {
        let services = [service("S2", "BigQuery"), service("S1", "Compute Engine")];
        let skus = HashMap::from([
            ("S1".to_string(), vec![sku("A", "a", &["r1"])]),
            ("S2".to_string(), vec![sku("B", "b", &["r1"])]),
        ]);

        let (csv, _) = write(&services, &skus, &SkuVmFamilyMap::new());

        let ids: Vec<&str> = csv.lines().skip(1).map(|l| l.split(',').nth(1).unwrap()).collect();
        assert_eq!(ids, ["S2", "S1"]);
    }
}
