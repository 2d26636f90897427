//! Hospital / building / floor / ward commands.

use anyhow::Result;
use serde_json::Value;

use crate::cli::{
    BuildingCommands, FloorCommands, HospitalCommands, OutputFormat, WardCommands,
};
use crate::commands::crud::{
    created_id, delete_record, matches_search, record_object, set_i32, set_optional_ref,
    set_optional_text, set_text, set_u32,
};
use crate::output::{field_cell, print_detail, print_list, print_success, records_json, ref_cell};
use nursecall_client::{
    ApiClient, PayloadBuilder, ResolveRule, ResolvedRecord, fetch_and_resolve,
    fetch_and_resolve_list,
};
use nursecall_core::{ResourceKind, sort};

const HOSPITAL_RULES: [ResolveRule; 1] =
    [ResolveRule::new("admin", ResourceKind::Nurse, "admin_detail")];

const BUILDING_RULES: [ResolveRule; 1] =
    [ResolveRule::new("hospital", ResourceKind::Hospital, "hospital_detail")];

const FLOOR_RULES: [ResolveRule; 1] =
    [ResolveRule::new("building", ResourceKind::Building, "building_detail")];

const WARD_RULES: [ResolveRule; 2] = [
    ResolveRule::new("building", ResourceKind::Building, "building_detail"),
    ResolveRule::new("floor", ResourceKind::Floor, "floor_detail"),
];

pub async fn hospitals(
    client: &ApiClient,
    command: &HospitalCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        HospitalCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Hospital, &HOSPITAL_RULES).await?;
            records.sort_by(|a, b| {
                sort::compare_names(&field_cell(a, "name"), &field_cell(b, "name"))
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            field_cell(r, "name"),
                            field_cell(r, "address"),
                            field_cell(r, "speciality"),
                        ],
                    )
                });
            }
            let rows = records
                .iter()
                .map(|r| {
                    vec![
                        field_cell(r, "name"),
                        field_cell(r, "address"),
                        field_cell(r, "phone_number"),
                        field_cell(r, "speciality"),
                        ref_cell(r, "admin_detail", "name", "admin"),
                    ]
                })
                .collect();
            print_list(
                format,
                &["Name", "Address", "Phone", "Speciality", "Admin"],
                rows,
                || records_json(records),
            );
        }
        HospitalCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Hospital, &args.id, &HOSPITAL_RULES)
                    .await?;
            let rows = vec![
                ("Name", field_cell(&record, "name")),
                ("Address", field_cell(&record, "address")),
                ("Phone", field_cell(&record, "phone_number")),
                ("Speciality", field_cell(&record, "speciality")),
                ("Admin", ref_cell(&record, "admin_detail", "name", "admin")),
            ];
            print_detail(format, &format!("hospitals {}", args.id), rows, || {
                record.into_value()
            });
        }
        HospitalCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .text("name", &args.name)
                .text("address", &args.address)
                .optional_text("phone_number", args.phone.as_deref())
                .optional_text("speciality", args.speciality.as_deref())
                .optional_reference("admin", args.admin.as_deref())
                .build();
            let created = client.create(ResourceKind::Hospital, &payload).await?;
            print_success(&format!("Created hospitals {}", created_id(&created)));
        }
        HospitalCommands::Edit(args) => {
            let record = client.get(ResourceKind::Hospital, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.name {
                set_text(&mut map, "name", v);
            }
            if let Some(v) = &args.address {
                set_text(&mut map, "address", v);
            }
            if let Some(v) = &args.phone {
                set_optional_text(&mut map, "phone_number", v);
            }
            if let Some(v) = &args.speciality {
                set_optional_text(&mut map, "speciality", v);
            }
            if let Some(v) = &args.admin {
                set_optional_ref(&mut map, "admin", v);
            }
            client
                .update(ResourceKind::Hospital, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated hospitals {}", args.id));
        }
        HospitalCommands::Delete(args) => {
            delete_record(client, ResourceKind::Hospital, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}

pub async fn buildings(
    client: &ApiClient,
    command: &BuildingCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        BuildingCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Building, &BUILDING_RULES).await?;
            records.sort_by(|a, b| {
                sort::compare_names(&field_cell(a, "name"), &field_cell(b, "name"))
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[field_cell(r, "name"), field_cell(r, "address")],
                    )
                });
            }
            let rows = records
                .iter()
                .map(|r| {
                    vec![
                        field_cell(r, "name"),
                        ref_cell(r, "hospital_detail", "name", "hospital"),
                        field_cell(r, "building_type"),
                        field_cell(r, "floors"),
                        field_cell(r, "address"),
                    ]
                })
                .collect();
            print_list(
                format,
                &["Name", "Hospital", "Type", "Floors", "Address"],
                rows,
                || records_json(records),
            );
        }
        BuildingCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Building, &args.id, &BUILDING_RULES)
                    .await?;
            let rows = vec![
                ("Name", field_cell(&record, "name")),
                (
                    "Hospital",
                    ref_cell(&record, "hospital_detail", "name", "hospital"),
                ),
                ("Type", field_cell(&record, "building_type")),
                ("Floors", field_cell(&record, "floors")),
                ("Address", field_cell(&record, "address")),
                ("Description", field_cell(&record, "description")),
                ("Supervisor", field_cell(&record, "supervisor")),
            ];
            print_detail(format, &format!("buildings {}", args.id), rows, || {
                record.into_value()
            });
        }
        BuildingCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .text("name", &args.name)
                .reference("hospital", &args.hospital)
                .optional_reference("supervisor", args.supervisor.as_deref())
                .text("building_type", args.building_type.as_str())
                .optional_number("floors", args.floors)
                // address/description are blank-allowed text on the backend,
                // stored as "" rather than null
                .text("address", args.address.as_deref().unwrap_or(""))
                .text("description", args.description.as_deref().unwrap_or(""))
                .build();
            let created = client.create(ResourceKind::Building, &payload).await?;
            print_success(&format!("Created buildings {}", created_id(&created)));
        }
        BuildingCommands::Edit(args) => {
            let record = client.get(ResourceKind::Building, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.name {
                set_text(&mut map, "name", v);
            }
            if let Some(v) = &args.hospital {
                set_text(&mut map, "hospital", v);
            }
            if let Some(v) = &args.supervisor {
                set_optional_ref(&mut map, "supervisor", v);
            }
            if let Some(v) = args.building_type {
                set_text(&mut map, "building_type", v.as_str());
            }
            if let Some(v) = args.floors {
                set_u32(&mut map, "floors", v);
            }
            // address/description are blank-allowed text on the backend:
            // "" clears them, null would be rejected
            if let Some(v) = &args.address {
                set_text(&mut map, "address", v);
            }
            if let Some(v) = &args.description {
                set_text(&mut map, "description", v);
            }
            client
                .update(ResourceKind::Building, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated buildings {}", args.id));
        }
        BuildingCommands::Delete(args) => {
            delete_record(client, ResourceKind::Building, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}

pub async fn floors(
    client: &ApiClient,
    command: &FloorCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        FloorCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Floor, &FLOOR_RULES).await?;
            records.sort_by(|a, b| {
                sort::compare_names(
                    a.resolved_str("building_detail", "name").unwrap_or(""),
                    b.resolved_str("building_detail", "name").unwrap_or(""),
                )
                .then_with(|| {
                    let num = |r: &ResolvedRecord| {
                        r.get("number").and_then(|v| v.as_i64()).unwrap_or(0)
                    };
                    num(a).cmp(&num(b))
                })
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            field_cell(r, "number"),
                            r.resolved_str("building_detail", "name")
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
                        ref_cell(r, "building_detail", "name", "building"),
                        field_cell(r, "supervisor"),
                    ]
                })
                .collect();
            print_list(
                format,
                &["Number", "Building", "Supervisor"],
                rows,
                || records_json(records),
            );
        }
        FloorCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Floor, &args.id, &FLOOR_RULES).await?;
            let rows = vec![
                ("Number", field_cell(&record, "number")),
                (
                    "Building",
                    ref_cell(&record, "building_detail", "name", "building"),
                ),
                ("Supervisor", field_cell(&record, "supervisor")),
            ];
            print_detail(format, &format!("floors {}", args.id), rows, || {
                record.into_value()
            });
        }
        FloorCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .number("number", args.number)
                .reference("building", &args.building)
                .optional_reference("supervisor", args.supervisor.as_deref())
                .build();
            let created = client.create(ResourceKind::Floor, &payload).await?;
            print_success(&format!("Created floors {}", created_id(&created)));
        }
        FloorCommands::Edit(args) => {
            let record = client.get(ResourceKind::Floor, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = args.number {
                set_i32(&mut map, "number", v);
            }
            if let Some(v) = &args.building {
                set_text(&mut map, "building", v);
            }
            if let Some(v) = &args.supervisor {
                set_optional_ref(&mut map, "supervisor", v);
            }
            client
                .update(ResourceKind::Floor, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated floors {}", args.id));
        }
        FloorCommands::Delete(args) => {
            delete_record(client, ResourceKind::Floor, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}

pub async fn wards(
    client: &ApiClient,
    command: &WardCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        WardCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Ward, &WARD_RULES).await?;
            // Sort by the resolved building name, not the raw building id;
            // ward name breaks ties.
            records.sort_by(|a, b| {
                sort::compare_names(
                    a.resolved_str("building_detail", "name").unwrap_or(""),
                    b.resolved_str("building_detail", "name").unwrap_or(""),
                )
                .then_with(|| {
                    sort::compare_names(&field_cell(a, "name"), &field_cell(b, "name"))
                })
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            field_cell(r, "name"),
                            r.resolved_str("building_detail", "name")
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
                        ref_cell(r, "building_detail", "name", "building"),
                        ref_cell(r, "floor_detail", "number", "floor"),
                        field_cell(r, "description"),
                    ]
                })
                .collect();
            print_list(
                format,
                &["Name", "Building", "Floor", "Description"],
                rows,
                || records_json(records),
            );
        }
        WardCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Ward, &args.id, &WARD_RULES).await?;
            let rows = vec![
                ("Name", field_cell(&record, "name")),
                (
                    "Building",
                    ref_cell(&record, "building_detail", "name", "building"),
                ),
                (
                    "Floor",
                    ref_cell(&record, "floor_detail", "number", "floor"),
                ),
                ("Description", field_cell(&record, "description")),
            ];
            print_detail(format, &format!("wards {}", args.id), rows, || {
                record.into_value()
            });
        }
        WardCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .text("name", &args.name)
                .reference("building", &args.building)
                .reference("floor", &args.floor)
                .optional_text("description", args.description.as_deref())
                .build();
            let created = client.create(ResourceKind::Ward, &payload).await?;
            print_success(&format!("Created wards {}", created_id(&created)));
        }
        WardCommands::Edit(args) => {
            let record = client.get(ResourceKind::Ward, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.name {
                set_text(&mut map, "name", v);
            }
            if let Some(v) = &args.building {
                set_text(&mut map, "building", v);
            }
            if let Some(v) = &args.floor {
                set_text(&mut map, "floor", v);
            }
            if let Some(v) = &args.description {
                set_optional_text(&mut map, "description", v);
            }
            client
                .update(ResourceKind::Ward, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated wards {}", args.id));
        }
        WardCommands::Delete(args) => {
            delete_record(client, ResourceKind::Ward, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}
