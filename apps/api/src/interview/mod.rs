// Interview practice endpoints: question generation and answer feedback.
// All LLM calls go through llm_client.

pub mod feedback;
pub mod handlers;
pub mod prompts;
