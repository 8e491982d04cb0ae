// Resume analysis: prompt template, result parser, pipeline orchestration
// and the HTTP handlers for upload, listing and chat.

pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod prompts;
