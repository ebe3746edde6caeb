// Resume (cover letter) endpoints: critique of an existing draft and generation from keywords.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
