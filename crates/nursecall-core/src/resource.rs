use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of backend collections.
///
/// Each kind maps to one REST collection (`GET <base>/<collection>/`,
/// `GET <base>/<collection>/<id>/`, ...). Kinds are what resolution rules
/// and the typed client are parameterized over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Hospital,
    Building,
    Floor,
    Ward,
    Bed,
    Device,
    StaffTeam,
    Nurse,
    TeamAssignment,
    Patient,
    Call,
}

impl ResourceKind {
    /// All kinds, in the order the admin sidebar listed them.
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Hospital,
        ResourceKind::Building,
        ResourceKind::Floor,
        ResourceKind::Ward,
        ResourceKind::Bed,
        ResourceKind::Device,
        ResourceKind::StaffTeam,
        ResourceKind::Nurse,
        ResourceKind::TeamAssignment,
        ResourceKind::Patient,
        ResourceKind::Call,
    ];

    /// URL path segment of the collection, without slashes.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Hospital => "hospitals",
            ResourceKind::Building => "buildings",
            ResourceKind::Floor => "floors",
            ResourceKind::Ward => "wards",
            ResourceKind::Bed => "beds",
            ResourceKind::Device => "devices",
            ResourceKind::StaffTeam => "staff-teams",
            ResourceKind::Nurse => "nurses",
            ResourceKind::TeamAssignment => "team-assignments",
            ResourceKind::Patient => "patients",
            ResourceKind::Call => "calls",
        }
    }

    /// The field that best identifies a record of this kind to a human.
    /// Used for display labels and resolved-field sorting.
    pub fn display_field(&self) -> &'static str {
        match self {
            ResourceKind::Floor => "number",
            ResourceKind::Bed => "number",
            ResourceKind::Device => "serial_number",
            ResourceKind::TeamAssignment | ResourceKind::Call => "id",
            _ => "name",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection())
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hospitals" | "hospital" => Ok(ResourceKind::Hospital),
            "buildings" | "building" => Ok(ResourceKind::Building),
            "floors" | "floor" => Ok(ResourceKind::Floor),
            "wards" | "ward" => Ok(ResourceKind::Ward),
            "beds" | "bed" => Ok(ResourceKind::Bed),
            "devices" | "device" => Ok(ResourceKind::Device),
            "staff-teams" | "staff-team" | "teams" | "team" => Ok(ResourceKind::StaffTeam),
            "nurses" | "nurse" => Ok(ResourceKind::Nurse),
            "team-assignments" | "team-assignment" | "assignments" => {
                Ok(ResourceKind::TeamAssignment)
            }
            "patients" | "patient" => Ok(ResourceKind::Patient),
            "calls" | "call" => Ok(ResourceKind::Call),
            other => Err(CoreError::unknown_resource_kind(other)),
        }
    }
}

/// Implemented by the typed entity models so the client can derive the
/// endpoint from the type.
pub trait Resource {
    const KIND: ResourceKind;

    fn id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        assert_eq!(ResourceKind::Hospital.collection(), "hospitals");
        assert_eq!(ResourceKind::StaffTeam.collection(), "staff-teams");
        assert_eq!(ResourceKind::TeamAssignment.collection(), "team-assignments");
    }

    #[test]
    fn test_from_str_accepts_collection_and_singular() {
        assert_eq!("beds".parse::<ResourceKind>().unwrap(), ResourceKind::Bed);
        assert_eq!("bed".parse::<ResourceKind>().unwrap(), ResourceKind::Bed);
        assert_eq!(
            "teams".parse::<ResourceKind>().unwrap(),
            ResourceKind::StaffTeam
        );
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("elevators".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_display_matches_collection() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.to_string(), kind.collection());
        }
    }

    #[test]
    fn test_display_fields() {
        assert_eq!(ResourceKind::Nurse.display_field(), "name");
        assert_eq!(ResourceKind::Bed.display_field(), "number");
        assert_eq!(ResourceKind::Device.display_field(), "serial_number");
        assert_eq!(ResourceKind::Floor.display_field(), "number");
    }

    #[test]
    fn test_all_covers_every_collection_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in ResourceKind::ALL {
            assert!(seen.insert(kind.collection()));
        }
        assert_eq!(seen.len(), 11);
    }
}
