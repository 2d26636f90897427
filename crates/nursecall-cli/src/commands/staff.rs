//! Staff team / nurse / team-assignment commands.

use anyhow::Result;
use serde_json::Value;

use crate::cli::{AssignmentCommands, NurseCommands, OutputFormat, TeamCommands};
use crate::commands::crud::{
    created_id, delete_record, matches_search, record_object, set_text,
};
use crate::output::{field_cell, print_detail, print_list, print_success, records_json, ref_cell};
use nursecall_client::{
    ApiClient, PayloadBuilder, ResolveRule, fetch_and_resolve, fetch_and_resolve_list,
};
use nursecall_core::{ResourceKind, sort};

const NURSE_RULES: [ResolveRule; 1] =
    [ResolveRule::new("team", ResourceKind::StaffTeam, "team_detail")];

// All three relations resolve through one collection fetch each, however
// long the assignment list is.
const ASSIGNMENT_RULES: [ResolveRule; 3] = [
    ResolveRule::new("team", ResourceKind::StaffTeam, "team_detail"),
    ResolveRule::new("ward", ResourceKind::Ward, "ward_detail"),
    ResolveRule::new("floor", ResourceKind::Floor, "floor_detail"),
];

pub async fn teams(client: &ApiClient, command: &TeamCommands, format: OutputFormat) -> Result<()> {
    match command {
        TeamCommands::List(args) => {
            let mut records = fetch_and_resolve_list(client, ResourceKind::StaffTeam, &[]).await?;
            records.sort_by(|a, b| {
                sort::compare_names(&field_cell(a, "name"), &field_cell(b, "name"))
            });
            if let Some(term) = &args.search {
                records.retain(|r| matches_search(term, &[field_cell(r, "name")]));
            }
            let rows = records
                .iter()
                .map(|r| vec![field_cell(r, "id"), field_cell(r, "name")])
                .collect();
            print_list(format, &["Id", "Name"], rows, || records_json(records));
        }
        TeamCommands::Show(args) => {
            let record = fetch_and_resolve(client, ResourceKind::StaffTeam, &args.id, &[]).await?;
            let rows = vec![("Name", field_cell(&record, "name"))];
            print_detail(format, &format!("staff-teams {}", args.id), rows, || {
                record.into_value()
            });
        }
        TeamCommands::Add(args) => {
            let payload = PayloadBuilder::new().text("name", &args.name).build();
            let created = client.create(ResourceKind::StaffTeam, &payload).await?;
            print_success(&format!("Created staff-teams {}", created_id(&created)));
        }
        TeamCommands::Edit(args) => {
            let record = client.get(ResourceKind::StaffTeam, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.name {
                set_text(&mut map, "name", v);
            }
            client
                .update(ResourceKind::StaffTeam, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated staff-teams {}", args.id));
        }
        TeamCommands::Delete(args) => {
            delete_record(client, ResourceKind::StaffTeam, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}

pub async fn nurses(
    client: &ApiClient,
    command: &NurseCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        NurseCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::Nurse, &NURSE_RULES).await?;
            records.sort_by(|a, b| {
                sort::compare_names(&field_cell(a, "name"), &field_cell(b, "name"))
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            field_cell(r, "name"),
                            field_cell(r, "nurse_id"),
                            r.resolved_str("team_detail", "name")
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
                        field_cell(r, "nurse_id"),
                        field_cell(r, "name"),
                        ref_cell(r, "team_detail", "name", "team"),
                    ]
                })
                .collect();
            print_list(format, &["Badge", "Name", "Team"], rows, || {
                records_json(records)
            });
        }
        NurseCommands::Show(args) => {
            let record =
                fetch_and_resolve(client, ResourceKind::Nurse, &args.id, &NURSE_RULES).await?;
            let rows = vec![
                ("Badge", field_cell(&record, "nurse_id")),
                ("Name", field_cell(&record, "name")),
                ("Team", ref_cell(&record, "team_detail", "name", "team")),
            ];
            print_detail(format, &format!("nurses {}", args.id), rows, || {
                record.into_value()
            });
        }
        NurseCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .text("nurse_id", &args.nurse_id)
                .text("name", &args.name)
                .reference("team", &args.team)
                .build();
            let created = client.create(ResourceKind::Nurse, &payload).await?;
            print_success(&format!("Created nurses {}", created_id(&created)));
        }
        NurseCommands::Edit(args) => {
            let record = client.get(ResourceKind::Nurse, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.nurse_id {
                set_text(&mut map, "nurse_id", v);
            }
            if let Some(v) = &args.name {
                set_text(&mut map, "name", v);
            }
            if let Some(v) = &args.team {
                set_text(&mut map, "team", v);
            }
            client
                .update(ResourceKind::Nurse, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated nurses {}", args.id));
        }
        NurseCommands::Delete(args) => {
            delete_record(client, ResourceKind::Nurse, &args.id, None, args.yes).await?;
        }
    }
    Ok(())
}

pub async fn assignments(
    client: &ApiClient,
    command: &AssignmentCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        AssignmentCommands::List(args) => {
            let mut records =
                fetch_and_resolve_list(client, ResourceKind::TeamAssignment, &ASSIGNMENT_RULES)
                    .await?;
            records.sort_by(|a, b| {
                sort::compare_names(
                    a.resolved_str("team_detail", "name").unwrap_or(""),
                    b.resolved_str("team_detail", "name").unwrap_or(""),
                )
            });
            if let Some(term) = &args.search {
                records.retain(|r| {
                    matches_search(
                        term,
                        &[
                            r.resolved_str("team_detail", "name")
                                .unwrap_or("")
                                .to_string(),
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
                        field_cell(r, "id"),
                        ref_cell(r, "team_detail", "name", "team"),
                        ref_cell(r, "ward_detail", "name", "ward"),
                        ref_cell(r, "floor_detail", "number", "floor"),
                    ]
                })
                .collect();
            print_list(format, &["Id", "Team", "Ward", "Floor"], rows, || {
                records_json(records)
            });
        }
        AssignmentCommands::Show(args) => {
            let record = fetch_and_resolve(
                client,
                ResourceKind::TeamAssignment,
                &args.id,
                &ASSIGNMENT_RULES,
            )
            .await?;
            let rows = vec![
                ("Team", ref_cell(&record, "team_detail", "name", "team")),
                ("Ward", ref_cell(&record, "ward_detail", "name", "ward")),
                (
                    "Floor",
                    ref_cell(&record, "floor_detail", "number", "floor"),
                ),
            ];
            print_detail(format, &format!("team-assignments {}", args.id), rows, || {
                record.into_value()
            });
        }
        AssignmentCommands::Add(args) => {
            let payload = PayloadBuilder::new()
                .reference("team", &args.team)
                .reference("ward", &args.ward)
                .reference("floor", &args.floor)
                .build();
            let created = client.create(ResourceKind::TeamAssignment, &payload).await?;
            print_success(&format!(
                "Created team-assignments {}",
                created_id(&created)
            ));
        }
        AssignmentCommands::Edit(args) => {
            let record = client.get(ResourceKind::TeamAssignment, &args.id).await?;
            let mut map = record_object(record)?;
            if let Some(v) = &args.team {
                set_text(&mut map, "team", v);
            }
            if let Some(v) = &args.ward {
                set_text(&mut map, "ward", v);
            }
            if let Some(v) = &args.floor {
                set_text(&mut map, "floor", v);
            }
            client
                .update(ResourceKind::TeamAssignment, &args.id, &Value::Object(map))
                .await?;
            print_success(&format!("Updated team-assignments {}", args.id));
        }
        AssignmentCommands::Delete(args) => {
            delete_record(
                client,
                ResourceKind::TeamAssignment,
                &args.id,
                None,
                args.yes,
            )
            .await?;
        }
    }
    Ok(())
}
