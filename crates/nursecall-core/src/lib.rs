pub mod error;
pub mod id;
pub mod model;
pub mod reference;
pub mod resource;
pub mod sort;
pub mod time;

pub use error::{CoreError, ErrorCategory, Result};
pub use id::{IdError, generate_id, validate_id};
pub use model::{
    Bed, BedStatus, Building, BuildingType, Call, CallStatus, Device, Floor, Hospital, Nurse,
    Patient, StaffTeam, TeamAssignment, Ward,
};
pub use reference::Reference;
pub use resource::{Resource, ResourceKind};
pub use time::{Timestamp, now_utc};
