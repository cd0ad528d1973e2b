pub mod mock;
pub mod traits;

pub use mock::MockBackend;
pub use traits::{BackendTrait, Reaction, SocialProvider};
