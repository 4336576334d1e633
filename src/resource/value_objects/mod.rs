//! Value objects for directory resource primitives.
//!
//! Each value object validates its input at construction, so a [`User`]
//! assembled from them cannot hold a blank userName, a blank email or an
//! empty name structure.
//!
//! ```rust
//! use scim_directory::resource::value_objects::{Name, UserName};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let user_name = UserName::new("bjensen".to_string())?;
//!     let name = Name::new(Some("Barbara".to_string()), Some("Jensen".to_string()))?;
//!     assert_eq!(user_name.as_str(), "bjensen");
//!     assert_eq!(name.family_name(), Some("Jensen"));
//!     Ok(())
//! }
//! ```
//!
//! [`User`]: crate::resource::User

mod email_address;
mod meta;
mod name;
mod resource_id;
mod user_name;

pub use email_address::EmailAddress;
pub use meta::Meta;
pub use name::Name;
pub use resource_id::ResourceId;
pub use user_name::UserName;
