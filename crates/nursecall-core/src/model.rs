//! Typed entity models, field-for-field with the backend's wire shapes.
//!
//! Every entity carries a server-generated opaque `id`. Required foreign
//! keys are plain id strings; optional ones are [`Reference`], which keeps
//! the null/empty-string normalization in one place. The client never
//! enforces referential integrity — ids are passed through and the backend
//! owns the rules.

use crate::error::CoreError;
use crate::reference::Reference;
use crate::resource::{Resource, ResourceKind};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bed occupancy status. Closed set; the UI only ever offers these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BedStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

impl BedStatus {
    pub const ALL: [BedStatus; 3] = [
        BedStatus::Available,
        BedStatus::Occupied,
        BedStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Available => "available",
            BedStatus::Occupied => "occupied",
            BedStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for BedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BedStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BedStatus::Available),
            "occupied" => Ok(BedStatus::Occupied),
            "maintenance" => Ok(BedStatus::Maintenance),
            other => Err(CoreError::invalid_status(other)),
        }
    }
}

/// Call lifecycle status. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    #[default]
    Pending,
    Answered,
    Cancelled,
    Urgent,
}

impl CallStatus {
    pub const ALL: [CallStatus; 4] = [
        CallStatus::Pending,
        CallStatus::Answered,
        CallStatus::Cancelled,
        CallStatus::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::Answered => "answered",
            CallStatus::Cancelled => "cancelled",
            CallStatus::Urgent => "urgent",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CallStatus::Pending),
            "answered" => Ok(CallStatus::Answered),
            "cancelled" => Ok(CallStatus::Cancelled),
            "urgent" => Ok(CallStatus::Urgent),
            other => Err(CoreError::invalid_status(other)),
        }
    }
}

/// Building classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    Administrator,
    Clinical,
    Research,
    Lab,
    #[default]
    Other,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        BuildingType::Administrator,
        BuildingType::Clinical,
        BuildingType::Research,
        BuildingType::Lab,
        BuildingType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::Administrator => "administrator",
            BuildingType::Clinical => "clinical",
            BuildingType::Research => "research",
            BuildingType::Lab => "lab",
            BuildingType::Other => "other",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuildingType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(BuildingType::Administrator),
            "clinical" => Ok(BuildingType::Clinical),
            "research" => Ok(BuildingType::Research),
            "lab" => Ok(BuildingType::Lab),
            "other" => Ok(BuildingType::Other),
            other => Err(CoreError::invalid_status(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub admin: Reference,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub speciality: Option<String>,
}

impl Resource for Hospital {
    const KIND: ResourceKind = ResourceKind::Hospital;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub hospital: String,
    #[serde(default)]
    pub supervisor: Reference,
    #[serde(default)]
    pub building_type: BuildingType,
    #[serde(default)]
    pub floors: Option<u32>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

impl Resource for Building {
    const KIND: ResourceKind = ResourceKind::Building;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub number: i32,
    pub building: String,
    #[serde(default)]
    pub supervisor: Reference,
}

impl Resource for Floor {
    const KIND: ResourceKind = ResourceKind::Floor;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ward {
    pub id: String,
    pub name: String,
    pub building: String,
    pub floor: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Resource for Ward {
    const KIND: ResourceKind = ResourceKind::Ward;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bed {
    pub id: String,
    pub number: String,
    pub ward: String,
    #[serde(default)]
    pub status: BedStatus,
    #[serde(default)]
    pub description: Option<String>,
}

impl Bed {
    pub fn is_occupied(&self) -> bool {
        self.status == BedStatus::Occupied
    }
}

impl Resource for Bed {
    const KIND: ResourceKind = ResourceKind::Bed;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub serial_number: String,
    #[serde(default)]
    pub bed: Reference,
}

impl Resource for Device {
    const KIND: ResourceKind = ResourceKind::Device;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffTeam {
    pub id: String,
    pub name: String,
}

impl Resource for StaffTeam {
    const KIND: ResourceKind = ResourceKind::StaffTeam;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nurse {
    pub id: String,
    /// Staff badge number; distinct from the entity id.
    pub nurse_id: String,
    pub name: String,
    pub team: String,
}

impl Resource for Nurse {
    const KIND: ResourceKind = ResourceKind::Nurse;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Three-way join record: which team covers which ward on which floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub id: String,
    pub team: String,
    pub ward: String,
    pub floor: String,
}

impl Resource for TeamAssignment {
    const KIND: ResourceKind = ResourceKind::TeamAssignment;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default)]
    pub bed: Reference,
    #[serde(default)]
    pub nurse: Reference,
    #[serde(default)]
    pub device: Reference,
}

impl Resource for Patient {
    const KIND: ResourceKind = ResourceKind::Patient;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub id: String,
    pub device: String,
    pub bed: String,
    pub call_time: Timestamp,
    pub status: CallStatus,
    #[serde(default)]
    pub nurse: Reference,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub response_time: Option<Timestamp>,
}

impl Call {
    pub fn is_open(&self) -> bool {
        matches!(self.status, CallStatus::Pending | CallStatus::Urgent)
    }
}

impl Resource for Call {
    const KIND: ResourceKind = ResourceKind::Call;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bed_status_wire_values() {
        assert_eq!(serde_json::to_value(BedStatus::Available).unwrap(), "available");
        assert_eq!(serde_json::to_value(BedStatus::Occupied).unwrap(), "occupied");
        assert_eq!(
            serde_json::to_value(BedStatus::Maintenance).unwrap(),
            "maintenance"
        );
    }

    #[test]
    fn test_bed_status_closed_set() {
        assert!(serde_json::from_value::<BedStatus>(json!("broken")).is_err());
        assert!("broken".parse::<BedStatus>().is_err());
    }

    #[test]
    fn test_call_status_roundtrip() {
        for status in CallStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            let back: CallStatus = serde_json::from_value(json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_call_status_closed_set() {
        assert!(serde_json::from_value::<CallStatus>(json!("escalated")).is_err());
    }

    #[test]
    fn test_building_type_default_is_other() {
        assert_eq!(BuildingType::default(), BuildingType::Other);
        assert_eq!(
            serde_json::to_value(BuildingType::Lab).unwrap(),
            json!("lab")
        );
    }

    #[test]
    fn test_bed_deserializes_with_default_status() {
        let bed: Bed = serde_json::from_value(json!({
            "id": "bed-1",
            "number": "B-12",
            "ward": "w1"
        }))
        .unwrap();
        assert_eq!(bed.status, BedStatus::Available);
        assert!(!bed.is_occupied());
        assert_eq!(bed.description, None);
    }

    #[test]
    fn test_patient_optional_refs_roundtrip_as_null() {
        let patient: Patient = serde_json::from_value(json!({
            "id": "p1",
            "name": "Asha Naidoo",
            "age": 54,
            "gender": "female",
            "bed": "bed-3",
            "nurse": null,
            "device": ""
        }))
        .unwrap();
        assert_eq!(patient.bed, Reference::new("bed-3"));
        assert_eq!(patient.nurse, Reference::Unset);
        assert_eq!(patient.device, Reference::Unset);

        let v = serde_json::to_value(&patient).unwrap();
        assert_eq!(v["nurse"], json!(null));
        assert_eq!(v["device"], json!(null));
        assert_ne!(v["device"], json!(""));
    }

    #[test]
    fn test_call_with_unassigned_nurse() {
        let call: Call = serde_json::from_value(json!({
            "id": "c1",
            "device": "d1",
            "bed": "bed-1",
            "call_time": "2025-03-10T08:15:00Z",
            "status": "pending",
            "nurse": null,
            "response_time": null
        }))
        .unwrap();
        assert!(call.is_open());
        assert_eq!(call.nurse, Reference::Unset);
        assert_eq!(call.response_time, None);
        assert_eq!(call.notes, None);
    }

    #[test]
    fn test_answered_call_with_response_time() {
        let call: Call = serde_json::from_value(json!({
            "id": "c2",
            "device": "d1",
            "bed": "bed-1",
            "call_time": "2025-03-10T08:15:00Z",
            "status": "answered",
            "nurse": "n1",
            "response_time": "2025-03-10T08:17:30Z"
        }))
        .unwrap();
        assert!(!call.is_open());
        assert_eq!(call.nurse, Reference::new("n1"));
        assert!(call.response_time.unwrap() > call.call_time);
    }

    #[test]
    fn test_building_defaults() {
        let building: Building = serde_json::from_value(json!({
            "id": "b1",
            "name": "North Wing",
            "hospital": "h1"
        }))
        .unwrap();
        assert_eq!(building.building_type, BuildingType::Other);
        assert_eq!(building.supervisor, Reference::Unset);
        assert_eq!(building.floors, None);
        assert_eq!(building.address, "");
    }

    #[test]
    fn test_resource_kind_bindings() {
        assert_eq!(Hospital::KIND, ResourceKind::Hospital);
        assert_eq!(TeamAssignment::KIND, ResourceKind::TeamAssignment);
        assert_eq!(Call::KIND, ResourceKind::Call);
    }

    #[test]
    fn test_nurse_badge_distinct_from_entity_id() {
        let nurse: Nurse = serde_json::from_value(json!({
            "id": "8d6f2a10-0000-0000-0000-000000000001",
            "nurse_id": "RN-204",
            "name": "Tomas Ek",
            "team": "t1"
        }))
        .unwrap();
        assert_ne!(nurse.id, nurse.nurse_id);
    }
}
