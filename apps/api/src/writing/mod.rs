// Writing practice: ENEM essay topics, evaluation, history and stats.
// All LLM calls go through llm_client; the parser never touches the network.

pub mod competency;
pub mod evaluator;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod stats;
pub mod storage;
