mod controller;
mod state;

pub use controller::{Attempt, Controller};
pub use state::{
    is_valid_name, RequestState, CONNECTION_ERROR_MESSAGE, REJECTION_FALLBACK_MESSAGE,
    VALIDATION_MESSAGE,
};
