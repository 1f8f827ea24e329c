pub use super::audit::Entity as Audit;
pub use super::download_export::Entity as DownloadExport;
pub use super::participant::Entity as Participant;
pub use super::payment::Entity as Payment;
pub use super::role::Entity as Role;
pub use super::seminar::Entity as Seminar;
pub use super::user::Entity as User;
