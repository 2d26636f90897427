use clap::{Parser, Subcommand, ValueEnum};
use nursecall_core::{BedStatus, BuildingType, CallStatus};

#[derive(Parser)]
#[command(name = "nursecall")]
#[command(about = "nursecall — administer the hospital nurse-call backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and NURSECALL_URL env var)
    #[arg(short, long, global = true, env = "NURSECALL_URL")]
    pub server: Option<String>,

    /// Config profile name
    #[arg(
        short,
        long,
        global = true,
        env = "NURSECALL_PROFILE",
        default_value = "default"
    )]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Login to the backend and store the access token
    Login(LoginArgs),
    /// Logout (remove the stored token)
    Logout,
    /// Show current auth info
    Whoami,
    /// Manage CLI configuration
    Config(ConfigArgs),
    /// Record counts across every collection
    Overview,
    /// Manage hospitals
    Hospitals {
        #[command(subcommand)]
        command: HospitalCommands,
    },
    /// Manage buildings
    Buildings {
        #[command(subcommand)]
        command: BuildingCommands,
    },
    /// Manage floors
    Floors {
        #[command(subcommand)]
        command: FloorCommands,
    },
    /// Manage wards
    Wards {
        #[command(subcommand)]
        command: WardCommands,
    },
    /// Manage beds
    Beds {
        #[command(subcommand)]
        command: BedCommands,
    },
    /// Manage call devices
    Devices {
        #[command(subcommand)]
        command: DeviceCommands,
    },
    /// Manage staff teams
    Teams {
        #[command(subcommand)]
        command: TeamCommands,
    },
    /// Manage nurses
    Nurses {
        #[command(subcommand)]
        command: NurseCommands,
    },
    /// Manage team-to-ward assignments
    Assignments {
        #[command(subcommand)]
        command: AssignmentCommands,
    },
    /// Manage patients
    Patients {
        #[command(subcommand)]
        command: PatientCommands,
    },
    /// Manage patient calls
    Calls {
        #[command(subcommand)]
        command: CallCommands,
    },
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,
    /// Password
    #[arg(long)]
    pub password: String,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, format)
    pub key: String,
    /// Value
    pub value: String,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Substring filter on the display columns
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(clap::Args)]
pub struct ShowArgs {
    /// Record id
    pub id: String,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Record id
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum HospitalCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(HospitalAddArgs),
    Edit(HospitalEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct HospitalAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: String,
    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Comma-separated specialities, e.g. "Cardiology, Oncology"
    #[arg(long)]
    pub speciality: Option<String>,
    /// Managing nurse id
    #[arg(long)]
    pub admin: Option<String>,
}

#[derive(clap::Args)]
pub struct HospitalEditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Pass an empty value to clear
    #[arg(long)]
    pub phone: Option<String>,
    /// Pass an empty value to clear
    #[arg(long)]
    pub speciality: Option<String>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub admin: Option<String>,
}

#[derive(Subcommand)]
pub enum BuildingCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(BuildingAddArgs),
    Edit(BuildingEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct BuildingAddArgs {
    #[arg(long)]
    pub name: String,
    /// Hospital id
    #[arg(long)]
    pub hospital: String,
    /// Supervisor user id
    #[arg(long)]
    pub supervisor: Option<String>,
    #[arg(long = "type", default_value = "other")]
    pub building_type: BuildingType,
    /// Number of floors
    #[arg(long)]
    pub floors: Option<u32>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args)]
pub struct BuildingEditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub hospital: Option<String>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub supervisor: Option<String>,
    #[arg(long = "type")]
    pub building_type: Option<BuildingType>,
    #[arg(long)]
    pub floors: Option<u32>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum FloorCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(FloorAddArgs),
    Edit(FloorEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct FloorAddArgs {
    /// Floor number
    #[arg(long)]
    pub number: i32,
    /// Building id
    #[arg(long)]
    pub building: String,
    /// Supervisor user id
    #[arg(long)]
    pub supervisor: Option<String>,
}

#[derive(clap::Args)]
pub struct FloorEditArgs {
    pub id: String,
    #[arg(long)]
    pub number: Option<i32>,
    #[arg(long)]
    pub building: Option<String>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub supervisor: Option<String>,
}

#[derive(Subcommand)]
pub enum WardCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(WardAddArgs),
    Edit(WardEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct WardAddArgs {
    #[arg(long)]
    pub name: String,
    /// Building id
    #[arg(long)]
    pub building: String,
    /// Floor id
    #[arg(long)]
    pub floor: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args)]
pub struct WardEditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub building: Option<String>,
    #[arg(long)]
    pub floor: Option<String>,
    /// Pass an empty value to clear
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum BedCommands {
    List(BedListArgs),
    Show(ShowArgs),
    Add(BedAddArgs),
    Edit(BedEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct BedListArgs {
    #[arg(long)]
    pub search: Option<String>,
    /// Filter by status
    #[arg(long)]
    pub status: Option<BedStatus>,
}

#[derive(clap::Args)]
pub struct BedAddArgs {
    /// Bed number, e.g. "B-12"
    #[arg(long)]
    pub number: String,
    /// Ward id
    #[arg(long)]
    pub ward: String,
    #[arg(long, default_value = "available")]
    pub status: BedStatus,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args)]
pub struct BedEditArgs {
    pub id: String,
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub ward: Option<String>,
    #[arg(long)]
    pub status: Option<BedStatus>,
    /// Pass an empty value to clear
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum DeviceCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(DeviceAddArgs),
    Edit(DeviceEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct DeviceAddArgs {
    #[arg(long)]
    pub serial: String,
    /// Bed id; omit for an unassigned device
    #[arg(long)]
    pub bed: Option<String>,
}

#[derive(clap::Args)]
pub struct DeviceEditArgs {
    pub id: String,
    #[arg(long)]
    pub serial: Option<String>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub bed: Option<String>,
}

#[derive(Subcommand)]
pub enum TeamCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(TeamAddArgs),
    Edit(TeamEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct TeamAddArgs {
    #[arg(long)]
    pub name: String,
}

#[derive(clap::Args)]
pub struct TeamEditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Subcommand)]
pub enum NurseCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(NurseAddArgs),
    Edit(NurseEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct NurseAddArgs {
    /// Staff badge number, e.g. "RN-204"
    #[arg(long)]
    pub nurse_id: String,
    #[arg(long)]
    pub name: String,
    /// Team id
    #[arg(long)]
    pub team: String,
}

#[derive(clap::Args)]
pub struct NurseEditArgs {
    pub id: String,
    #[arg(long)]
    pub nurse_id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub team: Option<String>,
}

#[derive(Subcommand)]
pub enum AssignmentCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(AssignmentAddArgs),
    Edit(AssignmentEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct AssignmentAddArgs {
    /// Team id
    #[arg(long)]
    pub team: String,
    /// Ward id
    #[arg(long)]
    pub ward: String,
    /// Floor id
    #[arg(long)]
    pub floor: String,
}

#[derive(clap::Args)]
pub struct AssignmentEditArgs {
    pub id: String,
    #[arg(long)]
    pub team: Option<String>,
    #[arg(long)]
    pub ward: Option<String>,
    #[arg(long)]
    pub floor: Option<String>,
}

#[derive(Subcommand)]
pub enum PatientCommands {
    List(ListArgs),
    Show(ShowArgs),
    Add(PatientAddArgs),
    Edit(PatientEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct PatientAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub age: u32,
    #[arg(long)]
    pub gender: String,
    /// Bed id
    #[arg(long)]
    pub bed: Option<String>,
    /// Nurse id
    #[arg(long)]
    pub nurse: Option<String>,
    /// Device id
    #[arg(long)]
    pub device: Option<String>,
}

#[derive(clap::Args)]
pub struct PatientEditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub gender: Option<String>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub bed: Option<String>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub nurse: Option<String>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub device: Option<String>,
}

#[derive(Subcommand)]
pub enum CallCommands {
    List(CallListArgs),
    Show(ShowArgs),
    Add(CallAddArgs),
    Edit(CallEditArgs),
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct CallListArgs {
    /// Substring filter on device serial, bed number, or nurse name
    #[arg(long)]
    pub search: Option<String>,
    /// Filter by status
    #[arg(long)]
    pub status: Option<CallStatus>,
}

#[derive(clap::Args)]
pub struct CallAddArgs {
    /// Device id
    #[arg(long)]
    pub device: String,
    /// Bed id
    #[arg(long)]
    pub bed: String,
    /// RFC 3339 call time; defaults to now
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long, default_value = "pending")]
    pub status: CallStatus,
    /// Nurse id
    #[arg(long)]
    pub nurse: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args)]
pub struct CallEditArgs {
    pub id: String,
    #[arg(long)]
    pub device: Option<String>,
    #[arg(long)]
    pub bed: Option<String>,
    /// RFC 3339 call time
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub status: Option<CallStatus>,
    /// Pass an empty value to unassign
    #[arg(long)]
    pub nurse: Option<String>,
    /// Pass an empty value to clear
    #[arg(long)]
    pub notes: Option<String>,
    /// RFC 3339 response time; pass an empty value to clear
    #[arg(long)]
    pub response_time: Option<String>,
}
