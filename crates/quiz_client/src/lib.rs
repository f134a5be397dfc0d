//! Quiz client: HTTP access to the quiz backend and background request execution.
mod api;
mod error;
mod handle;
mod settings;

pub use api::{QuizApi, ReqwestQuizApi};
pub use error::ApiError;
pub use handle::{ClientEvent, ClientHandle};
pub use settings::{ClientSettings, DEFAULT_API_BASE};
