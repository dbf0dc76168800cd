pub mod ai_service;
pub mod api_client;
pub mod grading_service;
pub mod parser_service;
pub mod session_service;
