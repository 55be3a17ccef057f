// HTTP module entry point
// MIME detection and response building

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_405_response, build_500_response,
    build_file_response, build_html_response, build_options_response, build_redirect_response,
};
