//! Patient and call commands.

use anyhow::Result;
use serde_json::Value;

use crate::cli::{CallCommands, OutputFormat, PatientCommands};
use crate::commands::crud::{
    created_id, delete_record, matches_search, parse_time_flag, record_object, set_optional_ref,
    set_optional_text, set_text, set_u32, set_value,
};
use crate::output::{
    call_status_cell, field_cell, print_detail, print_list, print_success, records_json, ref_cell,
    short_time,
};
use nursecall_client::{
    ApiClient, PayloadBuilder, ResolveRule, fetch_and_resolve, fetch_and_resolve_list,
};
use nursecall_core::{ResourceKind, now_utc, sort};

const PATIENT_RULES: [ResolveRule; 3] = [
    ResolveRule::new("bed", ResourceKind::Bed, "bed_detail"),
    ResolveRule::new("nurse", ResourceKind::Nurse, "nurse_detail"),
    ResolveRule::new("device", ResourceKind::Device, "device_detail"),
];

const CALL_RULES: [ResolveRule; 3] = [
    ResolveRule::new("device", ResourceKind::Device, "device_detail"),
    ResolveRule::new("bed", ResourceKind::Bed, "bed_detail"),
    ResolveRule::new("nurse", ResourceKind::Nurse, "nurse_detail"),
];

pub async fn patients(
    client: &ApiClient,
    command: &PatientCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        PatientCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Patient, &PATIENT_RULES).await?;
            records.sort_by(|a, b| {
                sort::compare_names(&field_cell(a, "name"), &field_cell(b, "name"))
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            field_cell(r, "name"),
                            r.resolved_str("nurse_detail", "name")
                                .unwrap_or("")
                                .to_string(),
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
                        field_cell(r, "name"),
                        field_cell(r, "age"),
                        field_cell(r, "gender"),
                        ref_cell(r, "bed_detail", "number", "bed"),
                        ref_cell(r, "nurse_detail", "name", "nurse"),
                        ref_cell(r, "device_detail", "serial_number", "device"),
                    ]
                })
                .collect();
            print_list(
                format,
                &["Name", "Age", "Gender", "Bed", "Nurse", "Device"],
                rows,
                || records_json(records),
            );
        }
        PatientCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Patient, &args.id, &PATIENT_RULES).await?;
            let rows = vec![
                ("Name", field_cell(&record, "name")),
                ("Age", field_cell(&record, "age")),
                ("Gender", field_cell(&record, "gender")),
                ("Bed", ref_cell(&record, "bed_detail", "number", "bed")),
                ("Nurse", ref_cell(&record, "nurse_detail", "name", "nurse")),
                (
                    "Device",
                    ref_cell(&record, "device_detail", "serial_number", "device"),
                ),
            ];
            print_detail(format, &format!("patients {}", args.id), rows, || {
                record.into_value()
            });
        }
        PatientCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .text("name", &args.name)
                .number("age", args.age)
                .text("gender", &args.gender)
                .optional_reference("bed", args.bed.as_deref())
                .optional_reference("nurse", args.nurse.as_deref())
                .optional_reference("device", args.device.as_deref())
                .build();
            let created = client.create(ResourceKind::Patient, &payload).await?;
            print_success(&format!("Created patients {}", created_id(&created)));
        }
        PatientCommands::Edit(args) => {
            let record = client.get(ResourceKind::Patient, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.name {
                set_text(&mut map, "name", v);
            }
            if let Some(v) = args.age {
                set_u32(&mut map, "age", v);
            }
            if let Some(v) = &args.gender {
                set_text(&mut map, "gender", v);
            }
            if let Some(v) = &args.bed {
                set_optional_ref(&mut map, "bed", v);
            }
            if let Some(v) = &args.nurse {
                set_optional_ref(&mut map, "nurse", v);
            }
            if let Some(v) = &args.device {
                set_optional_ref(&mut map, "device", v);
            }
            client
                .update(ResourceKind::Patient, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated patients {}", args.id));
        }
        PatientCommands::Delete(args) => {
            delete_record(client, ResourceKind::Patient, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}

pub async fn calls(client: &ApiClient, command: &CallCommands, format: OutputFormat) -> Result<()> {
    match command {
        CallCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Call, &CALL_RULES).await?;
            // Newest first.
            records.sort_by(|a, b| field_cell(b, "call_time").cmp(&field_cell(a, "call_time")));
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
                            r.resolved_str("device_detail", "serial_number")
                                .unwrap_or("")
                                .to_string(),
                            r.resolved_str("bed_detail", "number")
                                .unwrap_or("")
                                .to_string(),
                            r.resolved_str("nurse_detail", "name")
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
                        ref_cell(r, "device_detail", "serial_number", "device"),
                        ref_cell(r, "bed_detail", "number", "bed"),
                        call_status_cell(&field_cell(r, "status")),
                        ref_cell(r, "nurse_detail", "name", "nurse"),
                        short_time(&field_cell(r, "call_time")),
                    ]
                })
                .collect();
            print_list(
                format,
                &["Device", "Bed", "Status", "Nurse", "Time"],
                rows,
                || records_json(records),
            );
        }
        CallCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Call, &args.id, &CALL_RULES).await?;
            let mut rows = vec![
                ("Status", call_status_cell(&field_cell(&record, "status"))),
                ("Call time", short_time(&field_cell(&record, "call_time"))),
                (
                    "Device",
                    ref_cell(&record, "device_detail", "serial_number", "device"),
                ),
                ("Bed", ref_cell(&record, "bed_detail", "number", "bed")),
                ("Nurse", ref_cell(&record, "nurse_detail", "name", "nurse")),
            ];
            if let Some(rt) = record.get("response_time").and_then(|v| v.as_str()) {
                rows.push(("Response time", short_time(rt)));
            }
            if let Some(notes) = record.get("notes").and_then(|v| v.as_str()) {
                rows.push(("Notes", notes.to_string()));
            }
            print_detail(format, &format!("calls {}", args.id), rows, || {
                record.into_value()
            });
        }
        CallCommands::Add(args) => {
            let call_time = match &args.time {
                Some(raw) => parse_time_flag("time", raw)?,
                None => now_utc(),
            };
            let payload = PayloadBuilder::new()
                .reference("device", &args.device)
                .reference("bed", &args.bed)
                .value("call_time", serde_json::to_value(&call_time)?)
                .text("status", args.status.as_str())
                .optional_reference("nurse", args.nurse.as_deref())
                .optional_text("notes", args.notes.as_deref())
                .value("response_time", Value::Null)
                .build();
            let created = client.create(ResourceKind::Call, &payload).await?;
            print_success(&format!("Created calls {}", created_id(&created)));
        }
        CallCommands::Edit(args) => {
            let record = client.get(ResourceKind::Call, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.device {
                set_text(&mut map, "device", v);
            }
            if let Some(v) = &args.bed {
                set_text(&mut map, "bed", v);
            }
            if let Some(raw) = &args.time {
                let parsed = parse_time_flag("time", raw)?;
                set_value(&mut map, "call_time", serde_json::to_value(&parsed)?);
            }
            if let Some(v) = args.status {
                set_text(&mut map, "status", v.as_str());
            }
            if let Some(v) = &args.nurse {
                set_optional_ref(&mut map, "nurse", v);
            }
            if let Some(v) = &args.notes {
                set_optional_text(&mut map, "notes", v);
            }
            if let Some(raw) = &args.response_time {
                if raw.trim().is_empty() {
                    set_value(&mut map, "response_time", Value::Null);
                } else {
                    let parsed = parse_time_flag("response-time", raw)?;
                    set_value(&mut map, "response_time", serde_json::to_value(&parsed)?);
                }
            }
            client
                .update(ResourceKind::Call, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated calls {}", args.id));
        }
        CallCommands::Delete(args) => {
            delete_record(client, ResourceKind::Call, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}
