pub mod admin;
pub mod client;
pub mod config;
pub mod edit;
pub mod exception;
pub mod gallery;
pub mod gesture;
pub mod page;
pub mod param;
pub mod project;
pub mod request;
pub mod response;
pub mod session;
pub mod submit;
pub mod util;
pub mod validator;

pub use admin::AdminPage;
pub use client::{ApiService, HttpTransport, Transport};
pub use config::{Config, Environment};
pub use edit::EditPage;
pub use exception::Exception;
pub use gallery::{GalleryPage, StatusFilter};
pub use gesture::{GestureEvent, SecretGesture};
pub use project::{NewProject, Project, ProjectChanges, ProjectStatus};
pub use request::{Action, Framing};
pub use submit::SubmitPage;
pub use validator::{validate_field, Validation};
