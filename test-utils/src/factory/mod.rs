//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults and handle foreign key dependencies,
//! keeping tests short. Each entity has a `*Factory` builder for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let seminar = factory::seminar::create_seminar(&db, Some(user.id)).await?;
//!
//! let (user, seminar, participant, payment) =
//!     factory::helpers::create_payment_with_dependencies(&db).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let seminar = factory::seminar::SeminarFactory::new(&db)
//!     .title("Rust for Accountants")
//!     .is_active(true)
//!     .build()
//!     .await?;
//! ```

pub mod audit;
pub mod download_export;
pub mod helpers;
pub mod participant;
pub mod payment;
pub mod role;
pub mod seminar;
pub mod user;

pub use download_export::create_download_export;
pub use participant::create_participant;
pub use payment::create_payment;
pub use role::create_role;
pub use seminar::create_seminar;
pub use user::create_user;
