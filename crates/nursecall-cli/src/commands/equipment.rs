//! Bed and call-device commands.

use anyhow::Result;
use serde_json::Value;

use crate::cli::{BedCommands, DeviceCommands, OutputFormat};
use crate::commands::crud::{
    created_id, delete_record, matches_search, record_object, set_optional_ref,
    set_optional_text, set_text,
};
use crate::output::{
    bed_status_cell, field_cell, print_detail, print_list, print_success, records_json, ref_cell,
};
use nursecall_client::{
    ApiClient, PayloadBuilder, ResolveRule, fetch_and_resolve, fetch_and_resolve_list,
};
use nursecall_core::{Bed, ResourceKind, sort};

const BED_RULES: [ResolveRule; 1] = [ResolveRule::new("ward", ResourceKind::Ward, "ward_detail")];

const DEVICE_RULES: [ResolveRule; 1] = [ResolveRule::new("bed", ResourceKind::Bed, "bed_detail")];

pub async fn beds(client: &ApiClient, command: &BedCommands, format: OutputFormat) -> Result<()> {
    match command {
        BedCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Bed, &BED_RULES).await?;
            // "B-10" sorts after "B-2": compare the numeric part, not the string.
            records.sort_by(|a, b| {
                sort::compare_numbered(&field_cell(a, "number"), &field_cell(b, "number"))
            });
            if let Some(status) = args.status {
                records.retain(|r| {
                    r.get("status").and_then(|v| v.as_str()) == Some(status.as_str())
                });
            }
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            field_cell(r, "number"),
                            r.resolved_str("ward_detail", "name")
                                .unwrap_or("")
                                .to_string(),
                        ],
                    )
                });
            }
            let rows = records
                .iter()
                .map(|r| {
                    vec![
                        field_cell(r, "number"),
                        ref_cell(r, "ward_detail", "name", "ward"),
                        bed_status_cell(&field_cell(r, "status")),
                        field_cell(r, "description"),
                    ]
                })
                .collect();
            print_list(
                format,
                &["Number", "Ward", "Status", "Description"],
                rows,
                || records_json(records),
            );
        }
        BedCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Bed, &args.id, &BED_RULES).await?;
            let rows = vec![
                ("Number", field_cell(&record, "number")),
                ("Ward", ref_cell(&record, "ward_detail", "name", "ward")),
                ("Status", bed_status_cell(&field_cell(&record, "status"))),
                ("Description", field_cell(&record, "description")),
            ];
            print_detail(format, &format!("beds {}", args.id), rows, || {
                record.into_value()
            });
        }
        BedCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .text("number", &args.number)
                .reference("ward", &args.ward)
                .text("status", args.status.as_str())
                .optional_text("description", args.description.as_deref())
                .build();
            let created = client.create(ResourceKind::Bed, &payload).await?;
            print_success(&format!("Created beds {}", created_id(&created)));
        }
        BedCommands::Edit(args) => {
            let record = client.get(ResourceKind::Bed, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.number {
                set_text(&mut map, "number", v);
            }
            if let Some(v) = &args.ward {
                set_text(&mut map, "ward", v);
            }
            if let Some(v) = args.status {
                set_text(&mut map, "status", v.as_str());
            }
            if let Some(v) = &args.description {
                set_optional_text(&mut map, "description", v);
            }
            client
                .update(ResourceKind::Bed, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated beds {}", args.id));
        }
        BedCommands::Delete(args) => {
            // Check occupancy first: deleting an occupied bed can strand
            // patient records, so it gets an explicit warning.
            let bed: Bed = client.get_as(&args.id).await?;
            let warning = bed.is_occupied().then_some(
                "This bed is currently occupied. Deleting it may affect patient records.",
            );
            delete_record(client, ResourceKind::Bed, &args.id, warning, args.yes).await?;
        }
    }
    Ok(())
}

pub async fn devices(
    client: &ApiClient,
    command: &DeviceCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        DeviceCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Device, &DEVICE_RULES).await?;
            records.sort_by(|a, b| {
                sort::compare_numbered(
                    &field_cell(a, "serial_number"),
                    &field_cell(b, "serial_number"),
                )
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            field_cell(r, "serial_number"),
                            r.resolved_str("bed_detail", "number")
                                .unwrap_or("")
                                .to_string(),
                        ],
                    )
                });
            }
            let rows = records
                .iter()
                .map(|r| {
                    vec![
                        field_cell(r, "serial_number"),
                        ref_cell(r, "bed_detail", "number", "bed"),
                    ]
                })
                .collect();
            print_list(format, &["Serial", "Bed"], rows, || records_json(records));
        }
        DeviceCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Device, &args.id, &DEVICE_RULES).await?;
            let rows = vec![
                ("Serial", field_cell(&record, "serial_number")),
                ("Bed", ref_cell(&record, "bed_detail", "number", "bed")),
            ];
            print_detail(format, &format!("devices {}", args.id), rows, || {
                record.into_value()
            });
        }
        DeviceCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .text("serial_number", &args.serial)
                .optional_reference("bed", args.bed.as_deref())
                .build();
            let created = client.create(ResourceKind::Device, &payload).await?;
            print_success(&format!("Created devices {}", created_id(&created)));
        }
        DeviceCommands::Edit(args) => {
            let record = client.get(ResourceKind::Device, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.serial {
                set_text(&mut map, "serial_number", v);
            }
            if let Some(v) = &args.bed {
                set_optional_ref(&mut map, "bed", v);
            }
            client
                .update(ResourceKind::Device, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated devices {}", args.id));
        }
        DeviceCommands::Delete(args) => {
            delete_record(client, ResourceKind::Device, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}
