mod create_release_request;
mod update_release_request;

pub use create_release_request::CreateReleaseRequest;
pub use update_release_request::UpdateReleaseRequest;
