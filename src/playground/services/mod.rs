//! # Services Layer
//!
//! External collaborators of the pipeline. The transform service is the only
//! network boundary.

pub mod mock;
pub mod transform;

pub use mock::{ScriptedReply, ScriptedTransformClient};
pub use transform::{
    HttpTransformClient, TransformClient, TransformError, TransformPayload, TransformRequest,
    TransformResponse, DEFAULT_TRANSFORM_ENDPOINT, UNKNOWN_CONTENT_TYPE,
};
