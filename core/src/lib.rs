pub use card::*;
pub use cell::*;
pub use error::*;
pub use session::*;
pub use types::*;

mod card;
mod cell;
pub mod codec;
mod error;
mod session;
mod types;
